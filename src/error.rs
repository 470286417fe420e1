//! Error kinds shared across the crate

use thiserror::Error;

/// Failures the plugin can report
///
/// Lookups that can simply come up empty return `Option` instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A host service the plugin cannot run without
    #[error("host service unavailable: {0}")]
    HostMissing(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid gear slot {0}")]
    InvalidSlot(u8),

    #[error("invalid profile name {0:?}")]
    InvalidName(String),

    #[error("unknown co-save record {tag:08X} v{version}")]
    UnknownRecord { tag: u32, version: u8 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
