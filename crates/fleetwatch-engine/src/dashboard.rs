//! Dashboard aggregation over a [`Universe`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use fleetwatch_core::{AlertCategory, Severity, SourceStatus, VesselStatus};
use serde::Serialize;

use crate::universe::Universe;

/// Headline counts for the operator dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_alerts: usize,
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
    pub action_required: usize,
    /// Action-required alerts whose deadline is before `as_of`.
    pub overdue: usize,
    /// Earliest deadline among action-required alerts.
    pub next_deadline: Option<NaiveDate>,
    pub by_category: BTreeMap<AlertCategory, usize>,
    pub vessels: usize,
    pub vessels_at_risk: usize,
    pub vessels_action_needed: usize,
    pub vessels_compliant: usize,
    pub sources_online: usize,
    pub sources_total: usize,
    pub as_of: NaiveDate,
}

impl DashboardSummary {
    pub fn from_universe(universe: &Universe, as_of: NaiveDate) -> Self {
        let mut summary = Self {
            as_of,
            total_alerts: universe.alerts.len(),
            vessels: universe.vessels.len(),
            sources_total: universe.sources.len(),
            ..Default::default()
        };

        for alert in &universe.alerts {
            match alert.severity {
                Severity::Critical => summary.critical += 1,
                Severity::Warning => summary.warning += 1,
                Severity::Info => summary.info += 1,
            }
            *summary.by_category.entry(alert.category).or_insert(0) += 1;

            if alert.is_action_required() {
                summary.action_required += 1;
                if alert.action_deadline < as_of {
                    summary.overdue += 1;
                }
                summary.next_deadline = Some(match summary.next_deadline {
                    Some(d) => d.min(alert.action_deadline),
                    None => alert.action_deadline,
                });
            }
        }

        for vessel in &universe.vessels {
            match vessel.status {
                VesselStatus::AtRisk => summary.vessels_at_risk += 1,
                VesselStatus::ActionNeeded => summary.vessels_action_needed += 1,
                VesselStatus::Compliant => summary.vessels_compliant += 1,
            }
        }

        summary.sources_online = universe
            .sources
            .iter()
            .filter(|s| s.status == SourceStatus::Online)
            .count();

        summary
    }
}
