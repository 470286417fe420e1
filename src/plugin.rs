//! Plugin bootstrap
//!
//! The host calls [`init`] once while loading plugins. Everything after that
//! happens through the callbacks registered here, each holding a clone of
//! the shared [`Core`].

use std::sync::Arc;

use crate::error::Error;
use crate::events::Core;
use crate::persist::{cosave, Settings};
use crate::ui::ProfileStore;

/// Host services the plugin hooks into
///
/// Each method returns false when the host does not offer the service.
pub trait HostRegistrar {
    /// Button events, delivered to [`Core::on_input`]
    fn register_input(&mut self, core: Arc<Core>) -> bool;

    /// Equip events, delivered to [`Core::on_equip_event`]
    fn register_equip_events(&mut self, core: Arc<Core>) -> bool;

    /// Save, load and revert callbacks for the co-save under `uid`
    fn register_serialization(&mut self, uid: u32, core: Arc<Core>) -> bool;

    /// Per-frame editor drawing
    fn register_renderer(&mut self, core: Arc<Core>) -> bool;
}

fn require(available: bool, service: &'static str) -> Result<(), &'static str> {
    if available {
        return Ok(());
    }
    tracing::error!("{}", Error::HostMissing(service));
    Err(service)
}

/// Load settings, start logging and register with the host
///
/// Fails with the name of the first missing host service.
pub fn init(registrar: &mut dyn HostRegistrar) -> Result<Arc<Core>, &'static str> {
    let settings = Settings::load_default();
    crate::tracing::init(settings.log_level);
    crate::config_paths::ensure_all_dirs();
    tracing::info!("equip-hotkeys {} loading", env!("CARGO_PKG_VERSION"));

    let profiles = ProfileStore::open_default().unwrap_or_else(|| {
        tracing::warn!("No plugin directory available, profiles are stored next to the game");
        ProfileStore::new("equip-hotkeys-profiles")
    });
    init_with(registrar, settings, profiles)
}

/// Register with the host using the given settings and profile store
pub fn init_with(
    registrar: &mut dyn HostRegistrar,
    settings: Settings,
    profiles: ProfileStore,
) -> Result<Arc<Core>, &'static str> {
    let core = Arc::new(Core::new(settings, profiles));

    require(
        registrar.register_serialization(cosave::PLUGIN_UID, Arc::clone(&core)),
        "serialization interface",
    )?;
    require(registrar.register_input(Arc::clone(&core)), "input event source")?;
    require(
        registrar.register_equip_events(Arc::clone(&core)),
        "equip event source",
    )?;
    require(registrar.register_renderer(Arc::clone(&core)), "renderer")?;

    tracing::info!("equip-hotkeys ready");
    Ok(core)
}
