//! Answer templates.
//!
//! Answers use a light markup the UI understands: `## `/`### ` headings,
//! `**bold**` spans and `• ` bullets.

use fleetwatch_core::{Alert, RegulatorySource, SourceStatus, Vessel, VesselStatus};

pub const HELP: &str = "I can answer questions about regulatory alerts for your fleet. Try:\n\
\n\
• **What changed this week?**\n\
• **Am I compliant with the IOTC quota rules?**\n\
• **What do I need to do before March?**\n\
• **Any new reporting requirements?**\n\
• **How is my fleet doing?**\n\
• **Which sources are being monitored?**";

pub const NO_PENDING_DEADLINES: &str = "No pending deadlines. Nothing in this scope requires action.";

/// Digest of every action-required alert with the earliest deadline.
pub fn whats_new(action_required: &[&Alert]) -> String {
    let mut out = String::from("## What's new\n\n");
    if action_required.is_empty() {
        out.push_str("Nothing new requires action right now.");
        return out;
    }

    out.push_str(&format!("**{} alerts require action:**\n\n", action_required.len()));
    for alert in action_required {
        out.push_str(&format!(
            "• {} **{}**: {} ({})\n",
            alert.category.icon(),
            alert.category.label(),
            alert.title,
            alert.body
        ));
    }
    if let Some(earliest) = action_required.iter().map(|a| a.action_deadline).min() {
        out.push_str(&format!("\nEarliest deadline: **{earliest}**\n"));
    }
    trimmed(out)
}

/// Compliance verdict for the matched alerts.
pub fn compliance(matched: &[&Alert]) -> String {
    let open: Vec<&Alert> = matched
        .iter()
        .copied()
        .filter(|a| a.is_action_required())
        .collect();

    let mut out = String::from("## Compliance check\n\n");
    if open.is_empty() {
        out.push_str(&format!(
            "✅ **Compliant.** None of the {} matching alerts require action.\n",
            matched.len()
        ));
        return trimmed(out);
    }

    out.push_str(&format!(
        "⚠️ **Action required.** {} of {} matching alerts need attention:\n\n",
        open.len(),
        matched.len()
    ));
    for alert in &open {
        out.push_str(&format!(
            "• **{}** ({}, {}) due **{}**\n",
            alert.title,
            alert.body,
            alert.zone,
            alert.action_deadline
        ));
        out.push_str(&format!("  {}\n", alert.change_detail));
    }

    let vessels = affected_union(&open);
    if !vessels.is_empty() {
        out.push_str(&format!("\n**Affected vessels:** {}\n", vessels.join(", ")));
    }
    trimmed(out)
}

/// Action-required alerts from `alerts`, soonest deadline first. Ties keep
/// their input order.
pub fn pending_deadlines<'a>(alerts: &[&'a Alert]) -> Vec<&'a Alert> {
    let mut pending: Vec<&Alert> = alerts
        .iter()
        .copied()
        .filter(|a| a.is_action_required())
        .collect();
    pending.sort_by_key(|a| a.action_deadline);
    pending
}

/// Renders alerts already ordered by [`pending_deadlines`].
pub fn deadlines(pending: &[&Alert]) -> String {
    if pending.is_empty() {
        return NO_PENDING_DEADLINES.to_string();
    }
    let mut out = String::from("## Upcoming deadlines\n\n");
    for alert in pending {
        out.push_str(&format!(
            "• **{}** {} {} ({})\n",
            alert.action_deadline,
            alert.category.icon(),
            alert.title,
            alert.body
        ));
        out.push_str(&format!("  {}\n", alert.change_detail));
    }
    trimmed(out)
}

/// One detail block per matched alert.
pub fn details(matched: &[&Alert]) -> String {
    let mut out = String::new();
    let noun = if matched.len() == 1 { "alert" } else { "alerts" };
    out.push_str(&format!("## {} matching {noun}\n\n", matched.len()));
    for alert in matched {
        out.push_str(&format!("### {} {}\n", alert.category.icon(), alert.title));
        out.push_str(&format!("• **Category:** {}\n", alert.category.label()));
        out.push_str(&format!("• **Body:** {}\n", alert.body));
        out.push_str(&format!("• **Zone:** {}\n", alert.zone));
        out.push_str(&format!("• **Summary:** {}\n", alert.summary));
        out.push_str(&format!("• **What to do:** {}\n", alert.change_detail));
        out.push_str(&format!("• **Deadline:** {}\n", alert.action_deadline));
        out.push_str(&format!("• **Effective:** {}\n", alert.effective_date));
        let vessels = if alert.affected_vessels.is_empty() {
            "none assigned".to_string()
        } else {
            alert.affected_vessels.join(", ")
        };
        out.push_str(&format!("• **Affected vessels:** {}\n\n", vessels));
    }
    trimmed(out)
}

/// Vessel counts grouped by compliance status.
pub fn fleet_status(vessels: &[Vessel]) -> String {
    let mut out = String::from("## Fleet status\n\n");
    if vessels.is_empty() {
        out.push_str("No vessels are configured for this fleet.");
        return out;
    }

    let group = |status: VesselStatus| -> Vec<&Vessel> {
        vessels.iter().filter(|v| v.status == status).collect()
    };
    let at_risk = group(VesselStatus::AtRisk);
    let action_needed = group(VesselStatus::ActionNeeded);
    let compliant = group(VesselStatus::Compliant);

    out.push_str(&format!(
        "**{} vessels:** {} at risk, {} action needed, {} compliant\n",
        vessels.len(),
        at_risk.len(),
        action_needed.len(),
        compliant.len()
    ));
    for (heading, members) in [
        ("🔴 At risk", at_risk),
        ("🟡 Action needed", action_needed),
        ("🟢 Compliant", compliant),
    ] {
        if members.is_empty() {
            continue;
        }
        out.push_str(&format!("\n### {heading}\n"));
        for v in members {
            out.push_str(&format!("• **{}** ({}), {}\n", v.name, v.flag, v.zone));
        }
    }
    trimmed(out)
}

/// Per-body monitoring summary.
pub fn source_monitoring(sources: &[RegulatorySource]) -> String {
    let mut out = String::from("## Source monitoring\n\n");
    if sources.is_empty() {
        out.push_str("No regulatory sources are being monitored yet.");
        return out;
    }

    let online = sources
        .iter()
        .filter(|s| s.status == SourceStatus::Online)
        .count();
    let documents: usize = sources.iter().map(|s| s.document_count).sum();
    out.push_str(&format!(
        "**{online} of {} sources online**, {documents} documents tracked.\n\n",
        sources.len()
    ));
    for s in sources {
        let last = s
            .last_published
            .map_or_else(|| "never".to_string(), |d| d.to_string());
        out.push_str(&format!(
            "• **{}** {}: {} documents, last checked {}, {}\n",
            s.code,
            s.name,
            s.document_count,
            last,
            s.status.as_str()
        ));
    }
    trimmed(out)
}

/// Affected vessels across alerts, first-seen order, no duplicates.
fn affected_union(alerts: &[&Alert]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in alerts.iter().flat_map(|a| &a.affected_vessels) {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
    names
}

fn trimmed(mut out: String) -> String {
    out.truncate(out.trim_end().len());
    out
}
