//! Raw regulatory records → canonical alerts.
//!
//! Every rule here is a total function of the raw record and the processing
//! date, so the same batch normalized on the same day always yields the same
//! alerts.
//!
//! # Field rules
//!
//! - severity: `high` → critical, `medium` → warning, anything else → info
//! - category: from the alert-type code, unknown codes → species status
//! - species: first keyword of [`SPECIES_KEYWORDS`] found in the title
//! - zone: body-code lookup, unknown bodies → `"Unknown"`
//! - published / effective date: raw published date, else the processing date
//! - deadline: raw due date, else published + 7 days (critical) or + 14 days
//! - status: action required when a due date exists, the alert is critical,
//!   or the type is a compliance-system change or quota notice

use chrono::{Days, NaiveDate};
use fleetwatch_core::dates::{parse_opt, today_utc};
use fleetwatch_core::reference::{ALL_SPECIES, SPECIES_KEYWORDS, zone_for_body};
use fleetwatch_core::{Alert, AlertCategory, AlertStatus, RawRegulatoryRecord, Severity};
use tracing::{debug, info, warn};

/// Deadline offset for critical alerts without a due date.
pub const CRITICAL_DEADLINE_DAYS: u64 = 7;

/// Deadline offset for every other alert without a due date.
pub const DEFAULT_DEADLINE_DAYS: u64 = 14;

/// Body code used when a record has a title but no issuing body.
pub const UNKNOWN_BODY: &str = "UNKNOWN";

/// Alert types that always need operator action.
const ACTION_TYPES: &[&str] = &["COMPLIANCE_SYSTEM_CHANGE", "QUOTA_OR_ALLOCATION_NOTICE"];

/// Normalize a batch using today's UTC date for missing published dates.
pub fn normalize(records: &[RawRegulatoryRecord]) -> Vec<Alert> {
    normalize_at(records, today_utc())
}

/// Normalize a batch against an explicit processing date.
///
/// Output order follows input order. Records with neither a body nor a title
/// are dropped; ids keep the input ordinal so they stay stable when
/// neighbouring records are dropped.
pub fn normalize_at(records: &[RawRegulatoryRecord], today: NaiveDate) -> Vec<Alert> {
    let alerts: Vec<Alert> = records
        .iter()
        .enumerate()
        .filter_map(|(i, raw)| normalize_record(i + 1, raw, today))
        .collect();

    info!(
        records = records.len(),
        alerts = alerts.len(),
        dropped = records.len() - alerts.len(),
        "normalized regulatory records"
    );
    alerts
}

/// Normalize one record. `ordinal` is 1-based.
pub fn normalize_record(
    ordinal: usize,
    raw: &RawRegulatoryRecord,
    today: NaiveDate,
) -> Option<Alert> {
    let body = text(&raw.body).map(|b| b.to_ascii_uppercase());
    let raw_title = text(&raw.title);

    if body.is_none() && raw_title.is_none() {
        debug!(ordinal, "dropping record with no body and no title");
        return None;
    }
    let body = body.unwrap_or_else(|| UNKNOWN_BODY.to_string());
    let alert_type = text(&raw.alert_type).unwrap_or_default();

    let severity = Severity::from_tier(text(&raw.severity).unwrap_or_default());
    let category = AlertCategory::from_alert_type(alert_type);

    let published_date = match parse_opt(raw.published_date.as_deref()) {
        Some(d) => d,
        None => {
            if text(&raw.published_date).is_some() {
                warn!(ordinal, raw = ?raw.published_date, "unparseable published date");
            }
            today
        }
    };

    let due_date = parse_opt(raw.due_date.as_deref());
    if due_date.is_none() && text(&raw.due_date).is_some() {
        warn!(ordinal, raw = ?raw.due_date, "unparseable due date");
    }
    let action_deadline =
        due_date.unwrap_or_else(|| default_deadline(published_date, severity));

    let status = if due_date.is_some()
        || severity == Severity::Critical
        || ACTION_TYPES.contains(&alert_type)
    {
        AlertStatus::ActionRequired
    } else {
        AlertStatus::Acknowledged
    };

    let base_title = raw_title
        .map(str::to_string)
        .unwrap_or_else(|| format!("{body} regulatory update"));
    let species = infer_species(&base_title).to_string();
    let title = match text(&raw.document_id) {
        Some(doc) => format!("{base_title} ({doc})"),
        None => base_title,
    };

    let summary = text(&raw.what_changed)
        .map(str::to_string)
        .unwrap_or_else(|| format!("New {body} update detected."));
    let change_detail = text(&raw.action_required)
        .map(str::to_string)
        .unwrap_or_else(|| {
            format!("Review the {body} document and issue guidance to affected vessel masters.")
        });

    Some(Alert {
        id: format!("{}-{}", body.to_ascii_lowercase(), ordinal),
        severity,
        status,
        category,
        title,
        summary,
        zone: zone_for_body(&body).to_string(),
        species,
        effective_date: published_date,
        published_date,
        affected_vessels: Vec::new(),
        action_deadline,
        change_detail,
        source_url: text(&raw.source_url).map(str::to_string),
        body,
    })
}

/// First species keyword contained in the title, or [`ALL_SPECIES`].
///
/// The title is lower-cased and its whitespace collapsed before matching.
pub fn infer_species(title: &str) -> &'static str {
    let normalized = title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    SPECIES_KEYWORDS
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))
        .map(|(_, species)| *species)
        .unwrap_or(ALL_SPECIES)
}

fn default_deadline(published: NaiveDate, severity: Severity) -> NaiveDate {
    let days = if severity == Severity::Critical {
        CRITICAL_DEADLINE_DAYS
    } else {
        DEFAULT_DEADLINE_DAYS
    };
    published.checked_add_days(Days::new(days)).unwrap_or(published)
}

/// Trimmed field value, with blank strings treated as absent.
fn text(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
