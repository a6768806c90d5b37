//! Canonical entities shared by the normalizer, the relevance filter and the
//! query engine.
//!
//! Everything here is plain data. Alerts are built once by the normalizer and
//! never mutated afterwards; filtering produces new projections.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One ingested regulatory document, as delivered by the scraper feed.
///
/// Every field is optional on the wire. Dates stay as raw strings here; the
/// normalizer parses them and falls back to computed defaults when they are
/// missing or malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRegulatoryRecord {
    /// Issuing body code, e.g. `IOTC`.
    pub body: Option<String>,
    /// Alert type code, e.g. `QUOTA_OR_ALLOCATION_NOTICE`.
    pub alert_type: Option<String>,
    /// Severity tier: `high`, `medium` or `low`.
    pub severity: Option<String>,
    pub title: Option<String>,
    pub document_id: Option<String>,
    pub published_date: Option<String>,
    pub due_date: Option<String>,
    pub what_changed: Option<String>,
    pub action_required: Option<String>,
    /// Source URL or stored-document path.
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    /// Map a raw severity tier. Anything that is not `high` or `medium`,
    /// including unknown strings, is informational.
    pub fn from_tier(tier: &str) -> Self {
        match tier.trim().to_ascii_lowercase().as_str() {
            "high" => Self::Critical,
            "medium" => Self::Warning,
            _ => Self::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    ActionRequired,
    Acknowledged,
    Resolved,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActionRequired => "action_required",
            Self::Acknowledged => "acknowledged",
            Self::Resolved => "resolved",
        }
    }
}

/// Alert category.
///
/// `Closure` is part of the vocabulary but no alert-type code currently maps
/// to it; see [`AlertCategory::from_alert_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    Quota,
    Closure,
    SpeciesStatus,
    Reporting,
    Penalties,
}

impl AlertCategory {
    pub const ALL: [AlertCategory; 5] = [
        Self::Quota,
        Self::Closure,
        Self::SpeciesStatus,
        Self::Reporting,
        Self::Penalties,
    ];

    /// Map an alert-type code. Unknown codes fall through to `SpeciesStatus`.
    pub fn from_alert_type(code: &str) -> Self {
        match code.trim() {
            "REPORTING_DEADLINE" => Self::Reporting,
            "QUOTA_OR_ALLOCATION_NOTICE" => Self::Quota,
            "COMPLIANCE_SYSTEM_CHANGE" => Self::Penalties,
            _ => Self::SpeciesStatus,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quota => "quota",
            Self::Closure => "closure",
            Self::SpeciesStatus => "species_status",
            Self::Reporting => "reporting",
            Self::Penalties => "penalties",
        }
    }

    /// Human-readable label used in rendered answers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Quota => "Quota Change",
            Self::Closure => "Area Closure",
            Self::SpeciesStatus => "Species Status",
            Self::Reporting => "Reporting Requirement",
            Self::Penalties => "Compliance & Penalties",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Quota => "📊",
            Self::Closure => "🚫",
            Self::SpeciesStatus => "🐟",
            Self::Reporting => "📋",
            Self::Penalties => "⚖️",
        }
    }
}

/// A normalized regulatory alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Synthetic id: lower-cased body code plus the record ordinal.
    pub id: String,
    pub severity: Severity,
    pub status: AlertStatus,
    pub category: AlertCategory,
    pub title: String,
    pub summary: String,
    /// Issuing body code.
    pub body: String,
    pub species: String,
    pub zone: String,
    pub effective_date: NaiveDate,
    pub published_date: NaiveDate,
    /// Empty at normalization; filled in by the relevance filter.
    pub affected_vessels: Vec<String>,
    pub action_deadline: NaiveDate,
    pub change_detail: String,
    pub source_url: Option<String>,
}

impl Alert {
    pub fn is_action_required(&self) -> bool {
        self.status == AlertStatus::ActionRequired
    }

    /// Projection of this alert naming the given vessels.
    pub fn with_affected_vessels(&self, vessels: Vec<String>) -> Self {
        Self {
            affected_vessels: vessels,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VesselStatus {
    Compliant,
    ActionNeeded,
    AtRisk,
}

impl VesselStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::ActionNeeded => "action_needed",
            Self::AtRisk => "at_risk",
        }
    }
}

/// Last observed position reported by an external tracking service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// ISO 8601 timestamp string.
    pub observed_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vessel {
    pub id: String,
    pub name: String,
    pub flag: String,
    pub zone: String,
    pub species: Vec<String>,
    pub status: VesselStatus,
    /// Registry identifiers keyed by scheme (`imo`, `call_sign`, `mmsi`, ...).
    #[serde(default)]
    pub identifiers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_position: Option<Position>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Online,
    Degraded,
}

impl SourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Degraded => "degraded",
        }
    }
}

/// Monitoring view of one issuing body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulatorySource {
    pub code: String,
    pub name: String,
    pub region: String,
    pub document_count: usize,
    pub last_published: Option<NaiveDate>,
    pub status: SourceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_tiers() {
        assert_eq!(Severity::from_tier("high"), Severity::Critical);
        assert_eq!(Severity::from_tier("medium"), Severity::Warning);
        assert_eq!(Severity::from_tier("low"), Severity::Info);
        assert_eq!(Severity::from_tier("urgent"), Severity::Info);
        assert_eq!(Severity::from_tier(""), Severity::Info);
    }

    #[test]
    fn severity_tier_ignores_case_and_padding() {
        assert_eq!(Severity::from_tier(" HIGH "), Severity::Critical);
        assert_eq!(Severity::from_tier("Medium"), Severity::Warning);
    }

    #[test]
    fn known_alert_types() {
        assert_eq!(
            AlertCategory::from_alert_type("REPORTING_DEADLINE"),
            AlertCategory::Reporting
        );
        assert_eq!(
            AlertCategory::from_alert_type("QUOTA_OR_ALLOCATION_NOTICE"),
            AlertCategory::Quota
        );
        assert_eq!(
            AlertCategory::from_alert_type("COMPLIANCE_SYSTEM_CHANGE"),
            AlertCategory::Penalties
        );
    }

    #[test]
    fn unknown_alert_types_are_species_status() {
        for code in ["", "SPECIES_LISTING", "CLOSURE", "reporting_deadline", "???"] {
            assert_eq!(
                AlertCategory::from_alert_type(code),
                AlertCategory::SpeciesStatus,
                "code {code:?}"
            );
        }
    }

    #[test]
    fn closure_is_never_mapped() {
        let mapped: Vec<_> = [
            "REPORTING_DEADLINE",
            "QUOTA_OR_ALLOCATION_NOTICE",
            "COMPLIANCE_SYSTEM_CHANGE",
            "AREA_CLOSURE",
        ]
        .iter()
        .map(|c| AlertCategory::from_alert_type(c))
        .collect();
        assert!(!mapped.contains(&AlertCategory::Closure));
    }

    #[test]
    fn enums_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&AlertStatus::ActionRequired).unwrap(),
            "\"action_required\""
        );
        assert_eq!(
            serde_json::to_string(&AlertCategory::SpeciesStatus).unwrap(),
            "\"species_status\""
        );
        assert_eq!(
            serde_json::to_string(&VesselStatus::AtRisk).unwrap(),
            "\"at_risk\""
        );
    }

    #[test]
    fn raw_record_tolerates_missing_fields() {
        let raw: RawRegulatoryRecord =
            serde_json::from_str(r#"{"body": "IOTC", "title": "Resolution 24/01"}"#).unwrap();
        assert_eq!(raw.body.as_deref(), Some("IOTC"));
        assert!(raw.alert_type.is_none());
        assert!(raw.due_date.is_none());
    }
}
