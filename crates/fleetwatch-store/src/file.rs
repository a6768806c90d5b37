//! JSON file store under a data directory.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fleetwatch_core::FleetProfile;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::{ProfileStore, StoreError, decode, encode};

/// File name of the persisted profile inside the data directory.
pub const PROFILE_FILE: &str = "fleet_profile.json";

/// Persists the profile as pretty-printed JSON at
/// `<data_dir>/fleet_profile.json`.
///
/// Writes go to a temporary file in the same directory and are renamed into
/// place, so a crash mid-write leaves the previous profile intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// The directory is created on first save, not here.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(PROFILE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

impl ProfileStore for JsonFileStore {
    fn load(&self) -> Option<FleetProfile> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored profile");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read stored profile");
                return None;
            }
        };
        decode(&json)
    }

    fn save(&self, profile: &FleetProfile) -> Result<(), StoreError> {
        let json = encode(profile)?;
        let dir = self.dir();
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        info!(
            path = %self.path.display(),
            organization = %profile.organization,
            vessels = profile.vessels.len(),
            "saved fleet profile"
        );
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "cleared fleet profile");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetwatch_core::{AlertCategory, VesselDescriptor};

    fn profile() -> FleetProfile {
        FleetProfile {
            organization: "Blue Horizon Fisheries".into(),
            registration_id: "SC-2291".into(),
            tracked_bodies: vec!["IOTC".into(), "WCPFC".into()],
            zones: vec!["Indian Ocean".into()],
            species: vec!["Yellowfin Tuna".into()],
            categories: vec![AlertCategory::Quota, AlertCategory::Reporting],
            vessels: vec![VesselDescriptor {
                name: "Ocean Harvester".into(),
                flag: Some("Seychelles".into()),
                zone: "Indian Ocean".into(),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn missing_file_loads_as_absent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path());
        assert!(!store.path().exists());
        assert!(store.load().is_none());
    }

    #[test]
    fn save_creates_directory_and_reloads() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("nested").join("data"));

        store.save(&profile()).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load(), Some(profile()));

        // A fresh handle on the same directory sees the same profile.
        let reopened = JsonFileStore::new(tmp.path().join("nested").join("data"));
        assert_eq!(reopened.load(), Some(profile()));
    }

    #[test]
    fn save_overwrites() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path());
        store.save(&profile()).unwrap();

        let mut next = profile();
        next.vessels.clear();
        next.organization = "Coral Sea Co".into();
        store.save(&next).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.organization, "Coral Sea Co");
        assert!(loaded.vessels.is_empty());

        // Only the profile file remains; the temporary file was renamed away.
        let entries = fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn corrupt_file_loads_as_absent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path());
        fs::write(store.path(), "{\"organization\": ").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn file_without_organization_loads_as_absent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path());
        fs::write(store.path(), r#"{"tracked_bodies": ["IOTC"]}"#).unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn clear_removes_and_is_idempotent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path());
        store.save(&profile()).unwrap();

        store.clear().unwrap();
        assert!(!store.path().exists());
        assert!(store.load().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn usable_as_trait_object() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store: Box<dyn ProfileStore> = Box::new(JsonFileStore::new(tmp.path()));
        store.save(&profile()).unwrap();
        assert!(store.load().is_some());
    }
}
