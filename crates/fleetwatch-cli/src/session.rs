//! Everything one CLI invocation works from: the normalized alert store, the
//! known vessels and the operator profile.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use fleetwatch_core::reference::seed_vessels;
use fleetwatch_core::{Alert, NoEnrichment, RawRegulatoryRecord, UserProfile, Vessel};
use fleetwatch_engine::{QueryEngine, Universe, enrich_vessels, known_vessels, normalize_at};
use fleetwatch_store::{JsonFileStore, ProfileStore};
use tracing::{info, warn};

/// File name of the record snapshot inside the data directory.
pub const RECORDS_FILE: &str = "records.json";

pub struct Session {
    pub alerts: Vec<Alert>,
    pub vessels: Vec<Vessel>,
    pub profile: Option<UserProfile>,
    pub today: NaiveDate,
}

impl Session {
    /// Load the record snapshot and the stored profile.
    ///
    /// A missing snapshot is an empty batch. An unreadable or malformed
    /// snapshot is an error: it is operator input, not scraped data.
    pub fn open(
        records: &Path,
        store: &dyn ProfileStore,
        today: NaiveDate,
        use_profile: bool,
    ) -> anyhow::Result<Self> {
        let raw = read_records(records)?;
        let alerts = normalize_at(&raw, today);

        let fleet = if use_profile { store.load() } else { None };
        let profile = fleet.as_ref().map(UserProfile::from_fleet);
        let vessels = enrich_vessels(&known_vessels(&seed_vessels(), fleet.as_ref()), &NoEnrichment);

        info!(
            alerts = alerts.len(),
            vessels = vessels.len(),
            profile = fleet.as_ref().map(|f| f.organization.as_str()).unwrap_or("none"),
            "session ready"
        );
        Ok(Self {
            alerts,
            vessels,
            profile,
            today,
        })
    }

    pub fn universe(&self) -> Universe {
        Universe::build(&self.alerts, &self.vessels, self.profile.as_ref())
    }

    pub fn engine(&self) -> QueryEngine {
        QueryEngine::new(self.alerts.clone(), self.vessels.clone())
    }
}

/// `--records` when given, else `<data_dir>/records.json`.
pub fn records_path(data_dir: &Path, records: Option<&Path>) -> PathBuf {
    records.map_or_else(|| data_dir.join(RECORDS_FILE), Path::to_path_buf)
}

pub fn profile_store(data_dir: &Path) -> JsonFileStore {
    JsonFileStore::new(data_dir)
}

fn read_records(path: &Path) -> anyhow::Result<Vec<RawRegulatoryRecord>> {
    if !path.exists() {
        warn!(path = %path.display(), "no record snapshot; starting with an empty batch");
        return Ok(Vec::new());
    }
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading record snapshot {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("parsing record snapshot {}", path.display()))
}
