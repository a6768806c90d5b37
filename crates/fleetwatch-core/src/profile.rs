//! Operator fleet configuration and the matching view derived from it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{AlertCategory, Vessel, VesselStatus};
use crate::reference::body_info;

/// Operator-entered configuration, persisted by the profile store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetProfile {
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub registration_id: String,
    /// Issuing-body codes the operator follows.
    #[serde(default)]
    pub tracked_bodies: Vec<String>,
    #[serde(default)]
    pub zones: Vec<String>,
    #[serde(default)]
    pub species: Vec<String>,
    /// Preferred alert categories. Empty means every category.
    #[serde(default)]
    pub categories: Vec<AlertCategory>,
    #[serde(default)]
    pub vessels: Vec<VesselDescriptor>,
}

/// A vessel as described by the operator during onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselDescriptor {
    pub name: String,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub identifiers: BTreeMap<String, String>,
}

impl FleetProfile {
    /// A profile is usable once it names an organization.
    pub fn is_valid(&self) -> bool {
        !self.organization.trim().is_empty()
    }

    /// Vessels described by this profile, numbered `fleet-1`, `fleet-2`, ...
    ///
    /// Status starts as `compliant`; the relevance filter derives the real
    /// status against the alert universe.
    pub fn fleet_vessels(&self) -> Vec<Vessel> {
        self.vessels
            .iter()
            .filter(|d| !d.name.trim().is_empty())
            .enumerate()
            .map(|(i, d)| Vessel {
                id: format!("fleet-{}", i + 1),
                name: d.name.trim().to_string(),
                flag: d.flag.clone().unwrap_or_else(|| "Unknown".to_string()),
                zone: d.zone.clone(),
                species: d.species.clone(),
                status: VesselStatus::Compliant,
                identifiers: d.identifiers.clone(),
                last_position: None,
            })
            .collect()
    }
}

/// Matching view of a [`FleetProfile`].
///
/// Tracked bodies expand into the zones those bodies govern, so a profile
/// tracking `IOTC` also covers vessels operating in the Indian Ocean. All
/// lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub bodies: BTreeSet<String>,
    pub zones: BTreeSet<String>,
    pub vessel_names: BTreeSet<String>,
    pub species: BTreeSet<String>,
    pub categories: BTreeSet<AlertCategory>,
}

impl UserProfile {
    pub fn from_fleet(fleet: &FleetProfile) -> Self {
        let bodies: BTreeSet<String> = fleet
            .tracked_bodies
            .iter()
            .map(|b| b.trim().to_ascii_uppercase())
            .filter(|b| !b.is_empty())
            .collect();

        let mut zones: BTreeSet<String> = non_empty(&fleet.zones);
        for code in &bodies {
            match body_info(code) {
                Some(info) => {
                    zones.insert(info.zone.to_string());
                }
                None => debug!(body = %code, "tracked body has no known zone"),
            }
        }

        Self {
            bodies,
            zones,
            vessel_names: non_empty(fleet.vessels.iter().map(|v| &v.name)),
            species: non_empty(&fleet.species),
            categories: fleet.categories.iter().copied().collect(),
        }
    }

    /// No tracked bodies and no named vessels: nothing to narrow by.
    pub fn is_open(&self) -> bool {
        self.bodies.is_empty() && self.vessel_names.is_empty()
    }

    pub fn tracks_body(&self, code: &str) -> bool {
        self.bodies.iter().any(|b| b.eq_ignore_ascii_case(code.trim()))
    }

    /// An empty category preference tracks every category.
    pub fn tracks_category(&self, category: AlertCategory) -> bool {
        self.categories.is_empty() || self.categories.contains(&category)
    }

    pub fn has_vessel(&self, name: &str) -> bool {
        contains_ignore_case(&self.vessel_names, name)
    }

    pub fn has_zone(&self, zone: &str) -> bool {
        contains_ignore_case(&self.zones, zone)
    }
}

fn non_empty<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn contains_ignore_case(set: &BTreeSet<String>, value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && set.iter().any(|s| s.to_lowercase() == value.to_lowercase())
}
