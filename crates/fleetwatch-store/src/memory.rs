use std::sync::{Mutex, MutexGuard, PoisonError};

use fleetwatch_core::FleetProfile;

use crate::{ProfileStore, StoreError, decode, encode};

/// Process-local store. Holds the serialized form so that loads go through
/// the same decoding as the file store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with raw JSON, as if it had been persisted elsewhere.
    pub fn with_record(json: impl Into<String>) -> Self {
        Self {
            record: Mutex::new(Some(json.into())),
        }
    }

    /// The record slot. A panic while holding the lock cannot leave the
    /// `Option<String>` half written, so a poisoned lock is still usable.
    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Option<FleetProfile> {
        decode(self.slot().as_deref()?)
    }

    fn save(&self, profile: &FleetProfile) -> Result<(), StoreError> {
        let json = encode(profile)?;
        *self.slot() = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot() = None;
        Ok(())
    }
}
