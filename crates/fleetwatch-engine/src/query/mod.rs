//! Deterministic question answering over the alert universe.
//!
//! A question is answered in three steps: retrieve the alerts it touches,
//! classify its [`Intent`] against the rule table in [`intent`], and render a
//! template from [`render`]. Every input yields an answer; questions that
//! match nothing end at the help text.

pub mod intent;
pub mod render;
pub mod retrieval;

use fleetwatch_core::{Alert, UserProfile, Vessel};
use serde::Serialize;
use tracing::debug;

pub use intent::Intent;
pub use retrieval::Question;

use crate::universe::Universe;

/// Rendered reply plus the alerts it cites.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    #[serde(rename = "answer")]
    pub text: String,
    pub sources: Vec<Alert>,
    pub intent: Intent,
}

impl Answer {
    fn new(intent: Intent, text: String, sources: Vec<&Alert>) -> Self {
        Self {
            text,
            sources: sources.into_iter().cloned().collect(),
            intent,
        }
    }
}

/// Holds the canonical alert store and the known vessels. Each call to
/// [`QueryEngine::answer`] derives its own universe from them, so one engine
/// serves any number of profiles.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    alerts: Vec<Alert>,
    vessels: Vec<Vessel>,
}

impl QueryEngine {
    pub fn new(alerts: Vec<Alert>, vessels: Vec<Vessel>) -> Self {
        Self { alerts, vessels }
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Answer `question` for `profile`, or for everyone when absent.
    pub fn answer(&self, question: &str, profile: Option<&UserProfile>) -> Answer {
        // Nothing normalized yet: no alert branch can apply.
        if self.alerts.is_empty() {
            return Answer::new(Intent::Help, render::HELP.to_string(), Vec::new());
        }

        let universe = Universe::build(&self.alerts, &self.vessels, profile);
        let answer = answer_in(&universe, &Question::parse(question));
        debug!(
            intent = %answer.intent,
            sources = answer.sources.len(),
            "answered question"
        );
        answer
    }
}

/// Answer a parsed question against an already built universe.
pub fn answer_in(universe: &Universe, question: &Question) -> Answer {
    let matched = retrieval::retrieve(question, &universe.alerts);
    let intent = intent::classify(question, !matched.is_empty());

    match intent {
        Intent::WhatsNew => {
            let pending: Vec<&Alert> = universe.action_required().collect();
            Answer::new(intent, render::whats_new(&pending), pending)
        }
        Intent::Compliance => Answer::new(intent, render::compliance(&matched), matched),
        Intent::Deadlines => {
            let scope: Vec<&Alert> = if matched.is_empty() {
                universe.alerts.iter().collect()
            } else {
                matched
            };
            let pending = render::pending_deadlines(&scope);
            Answer::new(intent, render::deadlines(&pending), pending)
        }
        Intent::Details => Answer::new(intent, render::details(&matched), matched),
        Intent::FleetStatus => {
            Answer::new(intent, render::fleet_status(&universe.vessels), Vec::new())
        }
        Intent::SourceMonitoring => Answer::new(
            intent,
            render::source_monitoring(&universe.sources),
            Vec::new(),
        ),
        Intent::Help => Answer::new(intent, render::HELP.to_string(), Vec::new()),
    }
}
