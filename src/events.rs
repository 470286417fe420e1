//! Host event handlers and the state they share
//!
//! [`Core`] is created once at plugin load and handed to every host
//! callback. Locks are always taken in the order live hotkeys, then UI.

use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::gear::Equipset;
use crate::host::{EquipEvent, HostActor};
use crate::hotkeys::Hotkeys;
use crate::keys::{keystrokes_from_events, InputEvent, KeysetMatch, Keysets, Keystroke};
use crate::persist::Settings;
use crate::ui::{ProfileStore, UiCmd, UiState};

/// Equip events this soon after our own actuation are attributed to it
pub const DEBOUNCE_MS: u32 = 500;

#[derive(Debug)]
pub(crate) struct Live {
    pub(crate) hotkeys: Hotkeys<Equipset>,
    /// Reused between input batches
    keystrokes: Vec<Keystroke>,
    menu_toggle: Keysets,
}

#[derive(Debug)]
pub struct Core {
    pub(crate) live: Mutex<Live>,
    pub(crate) ui: Mutex<UiState>,
    last_hotkey_apply_ms: AtomicU32,
    settings: RwLock<Settings>,
}

impl Core {
    pub fn new(settings: Settings, profiles: ProfileStore) -> Self {
        let menu_toggle = settings.toggle_keysets();
        Self {
            live: Mutex::new(Live {
                hotkeys: Hotkeys::default(),
                keystrokes: Vec::with_capacity(8),
                menu_toggle,
            }),
            ui: Mutex::new(UiState::new(profiles)),
            last_hotkey_apply_ms: AtomicU32::new(0),
            settings: RwLock::new(settings),
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    pub fn set_settings(&self, settings: Settings) {
        let menu_toggle = settings.toggle_keysets();
        *self.settings.write() = settings;
        self.live.lock().menu_toggle = menu_toggle;
    }

    /// Run `f` on the live hotkeys
    pub fn with_hotkeys<R>(&self, f: impl FnOnce(&mut Hotkeys<Equipset>) -> R) -> R {
        f(&mut self.live.lock().hotkeys)
    }

    /// Replace the live hotkeys, e.g. after loading a profile outside the editor
    pub fn set_hotkeys(&self, hotkeys: Hotkeys<Equipset>) {
        self.live.lock().hotkeys = hotkeys;
    }

    /// Access the editor state; for the draw callback
    pub fn with_ui<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> R {
        f(&mut self.ui.lock())
    }

    pub fn is_editor_open(&self) -> bool {
        self.ui.lock().is_open()
    }

    pub fn last_hotkey_apply_ms(&self) -> u32 {
        self.last_hotkey_apply_ms.load(Ordering::Relaxed)
    }

    /// Open the editor, or close it and commit its edits
    pub fn toggle_editor(&self) {
        let mut live = self.live.lock();
        let mut ui = self.ui.lock();
        toggle(&mut ui, &mut live.hotkeys);
    }

    /// Apply a command returned by the editor; true if the live list changed
    pub fn ui_command(&self, host: &dyn HostActor, cmd: UiCmd) -> bool {
        let mut live = self.live.lock();
        let mut ui = self.ui.lock();
        ui.apply(cmd, host, &mut live.hotkeys)
    }

    /// Handle one batch of button events
    pub fn on_input(&self, host: &dyn HostActor, events: &[InputEvent]) {
        let mut live = self.live.lock();
        let Live {
            hotkeys,
            keystrokes,
            menu_toggle,
        } = &mut *live;

        keystrokes_from_events(events, keystrokes);
        if keystrokes.is_empty() {
            return;
        }

        if menu_toggle.match_keystrokes(keystrokes) == KeysetMatch::Press {
            toggle(&mut self.ui.lock(), hotkeys);
            return;
        }
        if self.ui.lock().is_open() {
            return;
        }
        if !host.control_state().allows_hotkeys() {
            tracing::trace!("hotkeys blocked by {:?}", host.control_state());
            return;
        }

        let Some(equipset) = hotkeys.get_next_equipset(keystrokes).cloned() else {
            return;
        };
        self.last_hotkey_apply_ms
            .store(host.runtime_ms(), Ordering::Relaxed);
        equipset.apply(host);

        if self.settings.read().notify_equipset_change {
            if let Some(name) = hotkeys.active_name().filter(|n| !n.is_empty()) {
                host.notify(name);
            }
        }
    }

    /// Forget the active hotkey when gear changes by other means
    pub fn on_equip_event(&self, host: &dyn HostActor, event: &EquipEvent) {
        if !event.is_player || !host.form_kind(event.form).is_gear() {
            return;
        }
        let now = host.runtime_ms();
        let last = self.last_hotkey_apply_ms.load(Ordering::Relaxed);
        if now <= last.saturating_add(DEBOUNCE_MS) {
            tracing::trace!("ignoring equip event for {} at {}ms", event.form, now);
            return;
        }
        tracing::debug!("external equip of {}, deactivating hotkeys", event.form);
        self.live.lock().hotkeys.deactivate();
    }
}

fn toggle(ui: &mut UiState, hotkeys: &mut Hotkeys<Equipset>) {
    if ui.is_open() {
        ui.deactivate(hotkeys);
    } else {
        ui.activate(hotkeys);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryHost;
    use crate::host::{ControlState, FormKind, FormRef};
    use crate::keys::{registry, InputEvent};

    const SWORD: FormRef = FormRef(0x0001_2EB7);

    fn core() -> (Core, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let core = Core::new(Settings::default(), ProfileStore::new(dir.path()));
        (core, dir)
    }

    fn tap(name: &str) -> InputEvent {
        InputEvent::key_down(registry::code_of(name), 0.0)
    }

    #[test]
    fn test_toggle_chord_opens_and_closes_editor() {
        let (core, _dir) = core();
        let host = MemoryHost::new();
        let chord = [tap("leftshift"), tap("backslash")];
        core.on_input(&host, &chord);
        assert!(core.is_editor_open());
        core.on_input(&host, &chord);
        assert!(!core.is_editor_open());
    }

    #[test]
    fn test_equip_event_filters() {
        let (core, _dir) = core();
        let host = MemoryHost::new()
            .with_form(SWORD, FormKind::Weapon { two_handed: false })
            .with_form(FormRef(0x0001_0001), FormKind::Other);
        core.with_hotkeys(|h| {
            *h = Hotkeys::new(vec![crate::hotkeys::Hotkey::new(
                "h",
                Keysets::new(vec![crate::keys::Keyset::from_names(["a"])]),
                Default::default(),
            )]);
            h.set_active(Some(0));
        });
        host.set_time(10_000);

        let npc = EquipEvent {
            is_player: false,
            form: SWORD,
            equipped: true,
        };
        core.on_equip_event(&host, &npc);
        let misc = EquipEvent {
            is_player: true,
            form: FormRef(0x0001_0001),
            equipped: true,
        };
        core.on_equip_event(&host, &misc);
        assert_eq!(core.with_hotkeys(|h| h.active()), Some(0));

        let player = EquipEvent {
            is_player: true,
            form: SWORD,
            equipped: true,
        };
        core.on_equip_event(&host, &player);
        assert_eq!(core.with_hotkeys(|h| h.active()), None);
    }

    #[test]
    fn test_blocked_controls_do_nothing() {
        let (core, _dir) = core();
        let host = MemoryHost::new();
        host.set_controls(ControlState {
            blocking_menu_open: true,
            ..ControlState::GAMEPLAY
        });
        core.on_input(&host, &[tap("a")]);
        assert!(host.take_calls().is_empty());
        assert_eq!(core.last_hotkey_apply_ms(), 0);
    }
}
