//! Intent classification as an ordered rule table.
//!
//! Rules are tried top to bottom and the first applicable rule whose trigger
//! fires wins. Each rule is scoped to whether retrieval found any relevant
//! alerts; the last three rules only ever fire when it found none.

use fleetwatch_core::reference::BODIES;
use serde::Serialize;

use super::retrieval::Question;

/// What the question is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Digest of everything currently requiring action.
    WhatsNew,
    /// Is the matched scope compliant?
    Compliance,
    /// Pending deadlines, soonest first.
    Deadlines,
    /// Full detail for each matched alert.
    Details,
    /// Vessel compliance roll-up.
    FleetStatus,
    /// Per-body monitoring summary.
    SourceMonitoring,
    Help,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhatsNew => "whats_new",
            Self::Compliance => "compliance",
            Self::Deadlines => "deadlines",
            Self::Details => "details",
            Self::FleetStatus => "fleet_status",
            Self::SourceMonitoring => "source_monitoring",
            Self::Help => "help",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When a rule may fire, relative to retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Only when at least one alert is relevant.
    Matched,
    /// Only when no alert is relevant.
    Unmatched,
    /// Regardless of retrieval.
    Any,
}

impl Scope {
    fn admits(self, has_matches: bool) -> bool {
        match self {
            Self::Matched => has_matches,
            Self::Unmatched => !has_matches,
            Self::Any => true,
        }
    }
}

/// One row of the classifier.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub intent: Intent,
    pub scope: Scope,
    pub trigger: fn(&Question) -> bool,
}

impl Rule {
    pub fn fires(&self, question: &Question, has_matches: bool) -> bool {
        self.scope.admits(has_matches) && (self.trigger)(question)
    }
}

pub const WHATS_NEW_TRIGGERS: &[&str] = &["this week", "changed", "new", "recent", "latest"];
pub const COMPLIANCE_TRIGGERS: &[&str] = &["complian", "am i", "are we", "status"];
pub const DEADLINE_TRIGGERS: &[&str] = &["before", "deadline", "by when", "need to do", "action"];
pub const FLEET_TRIGGERS: &[&str] = &["fleet", "vessel", "status"];
pub const SOURCE_TRIGGERS: &[&str] = &["source", "monitor"];

/// The classifier, in priority order.
pub const RULES: &[Rule] = &[
    Rule {
        intent: Intent::WhatsNew,
        scope: Scope::Unmatched,
        trigger: |q| q.mentions_any(WHATS_NEW_TRIGGERS),
    },
    Rule {
        intent: Intent::Compliance,
        scope: Scope::Matched,
        trigger: |q| q.mentions_any(COMPLIANCE_TRIGGERS),
    },
    // With no matches the deadline listing widens to the whole universe.
    Rule {
        intent: Intent::Deadlines,
        scope: Scope::Any,
        trigger: |q| q.mentions_any(DEADLINE_TRIGGERS),
    },
    Rule {
        intent: Intent::Details,
        scope: Scope::Matched,
        trigger: |_| true,
    },
    Rule {
        intent: Intent::FleetStatus,
        scope: Scope::Unmatched,
        trigger: |q| q.mentions_any(FLEET_TRIGGERS),
    },
    Rule {
        intent: Intent::SourceMonitoring,
        scope: Scope::Unmatched,
        trigger: mentions_sources,
    },
    Rule {
        intent: Intent::Help,
        scope: Scope::Unmatched,
        trigger: |_| true,
    },
];

fn mentions_sources(q: &Question) -> bool {
    q.mentions_any(SOURCE_TRIGGERS)
        || BODIES
            .iter()
            .any(|b| q.mentions(b.code) || q.mentions(b.name))
}

/// First rule that fires. Falls through to [`Intent::Help`].
pub fn classify(question: &Question, has_matches: bool) -> Intent {
    RULES
        .iter()
        .find(|rule| rule.fires(question, has_matches))
        .map_or(Intent::Help, |rule| rule.intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(text: &str, has_matches: bool) -> Intent {
        classify(&Question::parse(text), has_matches)
    }

    #[test]
    fn whats_new_only_without_matches() {
        assert_eq!(intent("What changed this week?", false), Intent::WhatsNew);
        assert_eq!(intent("What changed this week?", true), Intent::Details);
        assert_eq!(intent("Latest news", false), Intent::WhatsNew);
    }

    #[test]
    fn compliance_beats_deadlines() {
        assert_eq!(intent("Am I compliant before the deadline?", true), Intent::Compliance);
        assert_eq!(intent("Are we ok?", true), Intent::Compliance);
    }

    #[test]
    fn compliance_needs_matches() {
        // "status" then falls through to the fleet roll-up.
        assert_eq!(intent("status", false), Intent::FleetStatus);
    }

    #[test]
    fn deadlines_with_or_without_matches() {
        assert_eq!(intent("What do I need to do before March?", true), Intent::Deadlines);
        assert_eq!(intent("What do I need to do before March?", false), Intent::Deadlines);
        assert_eq!(intent("by when?", false), Intent::Deadlines);
    }

    #[test]
    fn details_is_the_matched_default() {
        assert_eq!(intent("tell me about yellowfin", true), Intent::Details);
        assert_eq!(intent("", true), Intent::Details);
    }

    #[test]
    fn unmatched_fallbacks() {
        assert_eq!(intent("How is my fleet?", false), Intent::FleetStatus);
        assert_eq!(intent("Which vessels?", false), Intent::FleetStatus);
        assert_eq!(intent("Are sources up?", false), Intent::SourceMonitoring);
        assert_eq!(intent("monitoring", false), Intent::SourceMonitoring);
        assert_eq!(intent("anything from nafo", false), Intent::SourceMonitoring);
        assert_eq!(
            intent("Indian Ocean Tuna Commission", false),
            Intent::SourceMonitoring
        );
    }

    #[test]
    fn help_is_the_last_resort() {
        assert_eq!(intent("", false), Intent::Help);
        assert_eq!(intent("tell me a joke", false), Intent::Help);
        assert_eq!(intent("\u{0}\u{fffd}!!", false), Intent::Help);
    }

    #[test]
    fn every_question_classifies() {
        let cases = [
            ("", Intent::Details, Intent::Help),
            (" ", Intent::Details, Intent::Help),
            ("x", Intent::Details, Intent::Help),
            ("quota", Intent::Details, Intent::Help),
            ("what's new", Intent::Details, Intent::WhatsNew),
            ("status", Intent::Compliance, Intent::FleetStatus),
        ];
        for (text, matched, unmatched) in cases {
            assert_eq!(intent(text, true), matched, "{text:?} with matches");
            assert_eq!(intent(text, false), unmatched, "{text:?} without matches");
        }
    }

    #[test]
    fn table_ends_with_catch_alls() {
        let last = RULES.last().unwrap();
        assert_eq!(last.intent, Intent::Help);
        assert_eq!(RULES[0].intent, Intent::WhatsNew);
    }
}
