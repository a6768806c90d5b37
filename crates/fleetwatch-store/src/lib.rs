//! Fleet profile persistence.
//!
//! A store holds at most one [`FleetProfile`]. Loading is fail-soft: a
//! missing, unreadable or incomplete record reads as "no profile".

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::{JsonFileStore, PROFILE_FILE};
pub use memory::MemoryStore;

use fleetwatch_core::FleetProfile;

pub trait ProfileStore {
    /// The stored profile, or `None` when absent, corrupt, or missing an
    /// organization name.
    fn load(&self) -> Option<FleetProfile>;

    /// Replace any stored profile. A profile without an organization is
    /// stored as given and reads back as `None`.
    fn save(&self, profile: &FleetProfile) -> Result<(), StoreError>;

    /// Remove the stored profile. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Parse a persisted profile, collapsing every failure to `None`.
pub(crate) fn decode(json: &str) -> Option<FleetProfile> {
    match serde_json::from_str::<FleetProfile>(json) {
        Ok(profile) if profile.is_valid() => Some(profile),
        Ok(_) => {
            tracing::warn!("stored profile has no organization; ignoring it");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "stored profile is corrupt; ignoring it");
            None
        }
    }
}

pub(crate) fn encode(profile: &FleetProfile) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(profile)?)
}
