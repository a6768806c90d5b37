//! Relevance filter: narrows the alert and vessel universe to one fleet.
//!
//! An open profile (no tracked bodies, no named vessels) narrows nothing.
//! Otherwise an alert survives when it names one of the profile's vessels,
//! or when its body is tracked and its category is among the preferred ones.

use fleetwatch_core::{Alert, UserProfile, Vessel, VesselStatus};
use tracing::debug;

/// Alerts applicable to the profile, in input order.
pub fn filter_alerts(alerts: &[Alert], profile: &UserProfile) -> Vec<Alert> {
    if profile.is_open() {
        return alerts.to_vec();
    }
    let kept: Vec<Alert> = alerts
        .iter()
        .filter(|a| alert_matches(a, profile))
        .cloned()
        .collect();
    debug!(total = alerts.len(), kept = kept.len(), "filtered alerts");
    kept
}

/// Vessels applicable to the profile, in input order.
pub fn filter_vessels(vessels: &[Vessel], profile: &UserProfile) -> Vec<Vessel> {
    if profile.is_open() {
        return vessels.to_vec();
    }
    vessels
        .iter()
        .filter(|v| profile.has_vessel(&v.name) || profile.has_zone(&v.zone))
        .cloned()
        .collect()
}

fn alert_matches(alert: &Alert, profile: &UserProfile) -> bool {
    // Naming one of the operator's vessels always wins.
    if alert.affected_vessels.iter().any(|v| profile.has_vessel(v)) {
        return true;
    }
    profile.tracks_body(&alert.body) && profile.tracks_category(alert.category)
}

/// Name the vessels each alert actually concerns, without any fallback.
///
/// A vessel is affected when it operates in the alert's zone or its name
/// contains the issuing body code. Alerts that already name vessels are left
/// untouched; alerts nothing matches stay unassigned.
pub fn match_affected_vessels(alerts: &[Alert], vessels: &[Vessel]) -> Vec<Alert> {
    alerts
        .iter()
        .map(|alert| {
            if !alert.affected_vessels.is_empty() {
                return alert.clone();
            }
            alert.with_affected_vessels(matching_vessels(alert, vessels))
        })
        .collect()
}

/// Name the vessels each alert applies to.
///
/// Same matching as [`match_affected_vessels`], but when nothing matches the
/// first vessel is used so every surfaced alert names someone. That fallback
/// can attribute an alert to an unrelated vessel; it is a display heuristic
/// only.
pub fn assign_affected_vessels(alerts: &[Alert], vessels: &[Vessel]) -> Vec<Alert> {
    alerts
        .iter()
        .map(|alert| {
            if !alert.affected_vessels.is_empty() {
                return alert.clone();
            }
            let matched = matching_vessels(alert, vessels);
            if matched.is_empty() {
                let first = vessels.first().map(|v| vec![v.name.clone()]);
                alert.with_affected_vessels(first.unwrap_or_default())
            } else {
                alert.with_affected_vessels(matched)
            }
        })
        .collect()
}

fn matching_vessels(alert: &Alert, vessels: &[Vessel]) -> Vec<String> {
    let body = alert.body.to_lowercase();
    vessels
        .iter()
        .filter(|v| {
            v.zone.eq_ignore_ascii_case(&alert.zone)
                || (!body.is_empty() && v.name.to_lowercase().contains(&body))
        })
        .map(|v| v.name.clone())
        .collect()
}

/// Recompute each vessel's compliance status against the profile's alerts.
///
/// A vessel needs action when any action-required alert from a tracked body
/// covers its zone. With no tracked bodies every alert counts.
pub fn derive_vessel_status(
    vessels: &[Vessel],
    alerts: &[Alert],
    profile: &UserProfile,
) -> Vec<Vessel> {
    let tracked: Vec<&Alert> = alerts
        .iter()
        .filter(|a| profile.bodies.is_empty() || profile.tracks_body(&a.body))
        .collect();

    vessels
        .iter()
        .map(|v| {
            let needs_action = tracked
                .iter()
                .any(|a| a.is_action_required() && a.zone.eq_ignore_ascii_case(&v.zone));
            Vessel {
                status: if needs_action {
                    VesselStatus::ActionNeeded
                } else {
                    VesselStatus::Compliant
                },
                ..v.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fleetwatch_core::reference::seed_vessels;
    use fleetwatch_core::{AlertCategory, AlertStatus, FleetProfile, Severity, VesselDescriptor};

    fn alert(id: &str, body: &str, zone: &str, category: AlertCategory, action: bool) -> Alert {
        let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        Alert {
            id: id.into(),
            severity: Severity::Warning,
            status: if action {
                AlertStatus::ActionRequired
            } else {
                AlertStatus::Acknowledged
            },
            category,
            title: format!("{body} notice"),
            summary: String::new(),
            body: body.into(),
            species: "All Species".into(),
            zone: zone.into(),
            effective_date: date,
            published_date: date,
            affected_vessels: Vec::new(),
            action_deadline: date,
            change_detail: String::new(),
            source_url: None,
        }
    }

    fn universe() -> Vec<Alert> {
        vec![
            alert("iotc-1", "IOTC", "Indian Ocean", AlertCategory::Quota, true),
            alert("iotc-2", "IOTC", "Indian Ocean", AlertCategory::Reporting, false),
            alert("wcpfc-3", "WCPFC", "Western & Central Pacific", AlertCategory::Quota, true),
            alert("iccat-4", "ICCAT", "Atlantic Ocean", AlertCategory::Penalties, false),
        ]
    }

    fn profile(bodies: &[&str], vessels: &[&str], categories: &[AlertCategory]) -> UserProfile {
        UserProfile::from_fleet(&FleetProfile {
            organization: "Test Fleet".into(),
            tracked_bodies: bodies.iter().map(|s| s.to_string()).collect(),
            categories: categories.to_vec(),
            vessels: vessels
                .iter()
                .map(|n| VesselDescriptor {
                    name: n.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        })
    }

    #[test]
    fn open_profile_is_a_no_op() {
        let open = UserProfile::default();
        assert_eq!(filter_alerts(&universe(), &open), universe());
        assert_eq!(filter_vessels(&seed_vessels(), &open), seed_vessels());
    }

    #[test]
    fn zones_alone_do_not_narrow() {
        let p = UserProfile::from_fleet(&FleetProfile {
            organization: "x".into(),
            zones: vec!["Indian Ocean".into()],
            ..Default::default()
        });
        assert_eq!(filter_vessels(&seed_vessels(), &p).len(), seed_vessels().len());
    }

    #[test]
    fn tracked_body_filter() {
        let kept = filter_alerts(&universe(), &profile(&["IOTC"], &[], &[]));
        let ids: Vec<_> = kept.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["iotc-1", "iotc-2"]);
    }

    #[test]
    fn category_preferences_narrow_tracked_bodies() {
        let kept = filter_alerts(
            &universe(),
            &profile(&["IOTC", "WCPFC"], &[], &[AlertCategory::Quota]),
        );
        let ids: Vec<_> = kept.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["iotc-1", "wcpfc-3"]);
    }

    #[test]
    fn vessel_override_ignores_body_and_category() {
        let mut alerts = universe();
        alerts[3].affected_vessels = vec!["Atlantic Dawn".into()];
        let kept = filter_alerts(
            &alerts,
            &profile(&["IOTC"], &["atlantic dawn"], &[AlertCategory::Quota]),
        );
        let ids: Vec<_> = kept.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["iotc-1", "iccat-4"]);
    }

    #[test]
    fn vessels_by_name_or_zone() {
        // IOTC expands to the Indian Ocean zone.
        let kept = filter_vessels(&seed_vessels(), &profile(&["IOTC"], &["Atlantic Dawn"], &[]));
        let names: Vec<_> = kept.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["Ocean Harvester", "Atlantic Dawn"]);
    }

    #[test]
    fn affected_vessels_by_zone() {
        let assigned = assign_affected_vessels(&universe(), &seed_vessels());
        assert_eq!(assigned[0].affected_vessels, ["Ocean Harvester"]);
        assert_eq!(assigned[2].affected_vessels, ["Pacific Star"]);
        assert_eq!(assigned[3].affected_vessels, ["Atlantic Dawn"]);
    }

    #[test]
    fn affected_vessels_by_body_in_name() {
        let mut vessels = seed_vessels();
        vessels[1].name = "NAFO Trader".into();
        let alerts = vec![alert("nafo-1", "NAFO", "Northwest Atlantic", AlertCategory::Quota, true)];
        let assigned = assign_affected_vessels(&alerts, &vessels);
        assert_eq!(assigned[0].affected_vessels, ["NAFO Trader"]);
    }

    #[test]
    fn affected_vessels_fall_back_to_first_vessel() {
        let alerts = vec![alert("gfcm-1", "GFCM", "Mediterranean Sea", AlertCategory::Quota, true)];
        let assigned = assign_affected_vessels(&alerts, &seed_vessels());
        assert_eq!(assigned[0].affected_vessels, ["Ocean Harvester"]);
    }

    #[test]
    fn matching_leaves_unmatched_alerts_unassigned() {
        let alerts = vec![
            alert("gfcm-1", "GFCM", "Mediterranean Sea", AlertCategory::Quota, true),
            alert("iccat-2", "ICCAT", "Atlantic Ocean", AlertCategory::Quota, true),
        ];
        let matched = match_affected_vessels(&alerts, &seed_vessels());
        assert!(matched[0].affected_vessels.is_empty());
        assert_eq!(matched[1].affected_vessels, ["Atlantic Dawn"]);
    }

    #[test]
    fn affected_vessels_with_no_vessels() {
        let assigned = assign_affected_vessels(&universe(), &[]);
        assert!(assigned.iter().all(|a| a.affected_vessels.is_empty()));
    }

    #[test]
    fn existing_affected_vessels_are_kept() {
        let mut alerts = universe();
        alerts[0].affected_vessels = vec!["Southern Cross".into()];
        let assigned = assign_affected_vessels(&alerts, &seed_vessels());
        assert_eq!(assigned[0].affected_vessels, ["Southern Cross"]);
    }

    #[test]
    fn assignment_does_not_touch_input() {
        let alerts = universe();
        let _ = assign_affected_vessels(&alerts, &seed_vessels());
        assert!(alerts.iter().all(|a| a.affected_vessels.is_empty()));
    }

    #[test]
    fn vessel_status_from_tracked_alerts() {
        let p = profile(&["IOTC", "ICCAT"], &[], &[]);
        let vessels = derive_vessel_status(&seed_vessels(), &universe(), &p);
        let status = |name: &str| vessels.iter().find(|v| v.name == name).unwrap().status;
        assert_eq!(status("Ocean Harvester"), VesselStatus::ActionNeeded);
        // WCPFC is not tracked, so its action-required alert does not count.
        assert_eq!(status("Pacific Star"), VesselStatus::Compliant);
        // ICCAT alert is acknowledged only.
        assert_eq!(status("Atlantic Dawn"), VesselStatus::Compliant);
    }

    #[test]
    fn vessel_status_without_tracked_bodies_uses_all_alerts() {
        let p = profile(&[], &["Pacific Star"], &[]);
        let vessels = derive_vessel_status(&seed_vessels(), &universe(), &p);
        assert_eq!(vessels[1].status, VesselStatus::ActionNeeded);
    }
}
