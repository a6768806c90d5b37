//! The filtered view one operator sees: alerts, vessels and sources.

use chrono::NaiveDate;
use fleetwatch_core::reference::body_info;
use fleetwatch_core::{
    Alert, FleetProfile, RegulatorySource, SourceStatus, UserProfile, Vessel,
};
use serde::Serialize;
use tracing::debug;

use crate::filter::{
    assign_affected_vessels, derive_vessel_status, filter_alerts, filter_vessels,
    match_affected_vessels,
};

/// Alerts, vessels and sources after applying a profile (or none).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Universe {
    pub alerts: Vec<Alert>,
    pub vessels: Vec<Vessel>,
    pub sources: Vec<RegulatorySource>,
}

impl Universe {
    /// Narrow the canonical store to a profile.
    ///
    /// - alerts are matched to the known vessels they concern before the
    ///   relevance filter runs, so an alert naming one of the operator's
    ///   vessels survives whatever bodies or categories are tracked
    /// - alerts still naming nobody after filtering fall back to the first
    ///   filtered vessel, or the first known vessel when the filter kept none
    /// - vessel compliance status is derived only when a profile is given;
    ///   otherwise the stored status stands
    /// - sources cover every body seen in the store, restricted to tracked
    ///   bodies when the profile tracks any
    pub fn build(alerts: &[Alert], known_vessels: &[Vessel], profile: Option<&UserProfile>) -> Self {
        let open = UserProfile::default();
        let user = profile.unwrap_or(&open);

        let matched = match_affected_vessels(alerts, known_vessels);
        let filtered = filter_alerts(&matched, user);
        let mut vessels = filter_vessels(known_vessels, user);

        let pool: &[Vessel] = if vessels.is_empty() {
            known_vessels
        } else {
            &vessels
        };
        let alerts_out = assign_affected_vessels(&filtered, pool);

        if let Some(p) = profile {
            vessels = derive_vessel_status(&vessels, alerts, p);
        }

        let sources = match profile {
            Some(p) if !p.bodies.is_empty() => tracked_sources(alerts, p),
            _ => derive_sources(alerts),
        };

        debug!(
            alerts = alerts_out.len(),
            vessels = vessels.len(),
            sources = sources.len(),
            "built universe"
        );

        Self {
            alerts: alerts_out,
            vessels,
            sources,
        }
    }

    /// The full universe with no profile applied.
    pub fn unfiltered(alerts: &[Alert], known_vessels: &[Vessel]) -> Self {
        Self::build(alerts, known_vessels, None)
    }

    pub fn action_required(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(|a| a.is_action_required())
    }
}

/// Vessels the engine knows about: the operator's fleet when the profile
/// describes one, the reference fleet otherwise.
pub fn known_vessels(seed: &[Vessel], fleet: Option<&FleetProfile>) -> Vec<Vessel> {
    match fleet.map(FleetProfile::fleet_vessels) {
        Some(vessels) if !vessels.is_empty() => vessels,
        _ => seed.to_vec(),
    }
}

/// One source per issuing body, in first-seen order.
pub fn derive_sources(alerts: &[Alert]) -> Vec<RegulatorySource> {
    let mut sources: Vec<RegulatorySource> = Vec::new();
    for alert in alerts {
        match sources.iter_mut().find(|s| s.code == alert.body) {
            Some(source) => {
                source.document_count += 1;
                source.last_published = latest(source.last_published, alert.published_date);
            }
            None => {
                let mut source = empty_source(&alert.body);
                source.document_count = 1;
                source.last_published = Some(alert.published_date);
                source.status = SourceStatus::Online;
                sources.push(source);
            }
        }
    }
    sources
}

/// Sources for each tracked body. Tracked bodies with no ingested documents
/// are reported as degraded.
fn tracked_sources(alerts: &[Alert], profile: &UserProfile) -> Vec<RegulatorySource> {
    let seen = derive_sources(alerts);
    profile
        .bodies
        .iter()
        .map(|code| {
            seen.iter()
                .find(|s| s.code.eq_ignore_ascii_case(code))
                .cloned()
                .unwrap_or_else(|| empty_source(code))
        })
        .collect()
}

fn empty_source(code: &str) -> RegulatorySource {
    let (name, region) = match body_info(code) {
        Some(info) => (info.name.to_string(), info.region.to_string()),
        None => (code.to_string(), "Unknown".to_string()),
    };
    RegulatorySource {
        code: code.to_string(),
        name,
        region,
        document_count: 0,
        last_published: None,
        status: SourceStatus::Degraded,
    }
}

fn latest(current: Option<NaiveDate>, candidate: NaiveDate) -> Option<NaiveDate> {
    Some(current.map_or(candidate, |c| c.max(candidate)))
}
