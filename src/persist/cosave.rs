//! Host co-save records
//!
//! The host stores opaque `(tag, version, bytes)` records next to each game
//! save. The live hotkeys go into one `DATA` record holding the same JSON a
//! profile would, cursors included.

use crate::error::{Error, Result};
use crate::events::Core;
use crate::gear::Equipset;
use crate::host::Forms;
use crate::hotkeys::Hotkeys;

use super::profile;

/// Four-byte tag identifying this plugin to the host
pub const PLUGIN_UID: u32 = u32::from_be_bytes(*b"EQHK");
pub const RECORD_TAG: u32 = u32::from_be_bytes(*b"DATA");
pub const RECORD_VERSION: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CosaveRecord {
    pub tag: u32,
    pub version: u8,
    pub payload: Vec<u8>,
}

/// The host's record stream for one save file
pub trait SaveRecords {
    /// Append a record; false if the host refused it
    fn write_record(&mut self, tag: u32, version: u8, payload: &[u8]) -> bool;

    /// Next record when loading, None at the end
    fn next_record(&mut self) -> Option<CosaveRecord>;
}

/// Record stream kept in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryCosave {
    records: Vec<CosaveRecord>,
    cursor: usize,
}

impl MemoryCosave {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[CosaveRecord] {
        &self.records
    }

    /// Start reading from the first record again
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

impl SaveRecords for MemoryCosave {
    fn write_record(&mut self, tag: u32, version: u8, payload: &[u8]) -> bool {
        self.records.push(CosaveRecord {
            tag,
            version,
            payload: payload.to_vec(),
        });
        true
    }

    fn next_record(&mut self) -> Option<CosaveRecord> {
        let record = self.records.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(record)
    }
}

/// Serialize `hotkeys` with their cursors for the co-save
pub fn encode(hotkeys: &Hotkeys<Equipset>, forms: &dyn Forms) -> Result<Vec<u8>> {
    Ok(profile::to_json(hotkeys, forms, true)?.into_bytes())
}

/// Decode one record; unknown tags and versions are errors
pub fn decode(record: &CosaveRecord, forms: &dyn Forms) -> Result<Hotkeys<Equipset>> {
    if record.tag != RECORD_TAG || record.version != RECORD_VERSION {
        return Err(Error::UnknownRecord {
            tag: record.tag,
            version: record.version,
        });
    }
    profile::from_json(&record.payload, forms)
}

impl Core {
    /// Write the live hotkeys into the save being created
    pub fn save_game(&self, forms: &dyn Forms, out: &mut dyn SaveRecords) -> Result<()> {
        let live = self.live.lock();
        let payload = encode(&live.hotkeys, forms)?;
        if !out.write_record(RECORD_TAG, RECORD_VERSION, &payload) {
            tracing::error!("Host refused co-save record ({} bytes)", payload.len());
            return Ok(());
        }
        tracing::info!("Saved {} hotkeys to co-save", live.hotkeys.len());
        Ok(())
    }

    /// Replace the live hotkeys with the ones stored in a save being loaded
    ///
    /// Unknown records are skipped. A record that fails to decode leaves the
    /// hotkeys empty. The editor is closed without committing.
    pub fn load_game(&self, forms: &dyn Forms, input: &mut dyn SaveRecords) {
        let mut live = self.live.lock();
        let mut ui = self.ui.lock();

        while let Some(record) = input.next_record() {
            match decode(&record, forms) {
                Ok(hotkeys) => {
                    tracing::info!("Loaded {} hotkeys from co-save", hotkeys.len());
                    live.hotkeys = hotkeys;
                }
                Err(e @ Error::UnknownRecord { .. }) => {
                    tracing::warn!("Skipping {}", e);
                }
                Err(e) => {
                    tracing::warn!("Failed to decode co-save record: {}", e);
                    live.hotkeys = Hotkeys::default();
                }
            }
        }
        ui.reset();
    }

    /// Drop all state before a new game or another save is loaded
    pub fn revert(&self) {
        let mut live = self.live.lock();
        let mut ui = self.ui.lock();
        live.hotkeys = Hotkeys::default();
        ui.reset();
        tracing::debug!("Reverted hotkeys");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryHost;

    #[test]
    fn test_tags_are_big_endian_ascii() {
        assert_eq!(RECORD_TAG, 0x4441_5441);
        assert_eq!(PLUGIN_UID.to_be_bytes(), *b"EQHK");
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let record = CosaveRecord {
            tag: RECORD_TAG,
            version: 2,
            payload: b"{}".to_vec(),
        };
        let err = decode(&record, &MemoryHost::new()).unwrap_err();
        assert!(matches!(err, Error::UnknownRecord { version: 2, .. }));
    }

    #[test]
    fn test_memory_cosave_reads_in_order() {
        let mut cosave = MemoryCosave::new();
        cosave.write_record(1, 1, b"a");
        cosave.write_record(2, 1, b"b");
        assert_eq!(cosave.next_record().unwrap().tag, 1);
        assert_eq!(cosave.next_record().unwrap().tag, 2);
        assert!(cosave.next_record().is_none());
        cosave.rewind();
        assert_eq!(cosave.next_record().unwrap().payload, b"a");
    }
}
