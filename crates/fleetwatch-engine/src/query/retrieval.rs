//! Keyword retrieval: which alerts does a free-text question touch?

use fleetwatch_core::{Alert, AlertCategory};

/// Question fragments that point at a category.
pub const CATEGORY_HINTS: &[(&str, AlertCategory)] = &[
    ("quota", AlertCategory::Quota),
    ("clos", AlertCategory::Closure),
    ("report", AlertCategory::Reporting),
    ("penalt", AlertCategory::Penalties),
    ("species", AlertCategory::SpeciesStatus),
];

/// Words ignored when extracting keywords.
pub const STOP_WORDS: &[&str] = &[
    "about", "after", "all", "and", "any", "are", "before", "been", "but", "can", "could", "did",
    "does", "for", "from", "get", "give", "had", "has", "have", "how", "into", "its", "list",
    "me", "need", "not", "our", "show", "should", "tell", "than", "that", "the", "their", "them",
    "then", "there", "these", "they", "this", "those", "was", "were", "what", "when", "where",
    "which", "who", "why", "will", "with", "would", "you", "your",
];

/// Minimum number of keywords an alert's text must contain to match on
/// keywords alone.
pub const MIN_KEYWORD_HITS: usize = 2;

/// A question prepared for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Lower-cased question text.
    pub text: String,
    /// Distinct keywords in question order.
    pub keywords: Vec<String>,
}

impl Question {
    pub fn parse(question: &str) -> Self {
        let text = question.to_lowercase();
        let keywords = extract_keywords(&text);
        Self { text, keywords }
    }

    pub fn mentions(&self, fragment: &str) -> bool {
        let fragment = fragment.trim();
        !fragment.is_empty() && self.text.contains(&fragment.to_lowercase())
    }

    pub fn mentions_any(&self, fragments: &[&str]) -> bool {
        fragments.iter().any(|f| self.mentions(f))
    }
}

/// Tokens longer than two characters that are not stop words, deduplicated.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for token in text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() > 2)
    {
        if STOP_WORDS.contains(&token) || keywords.iter().any(|k| k == token) {
            continue;
        }
        keywords.push(token.to_string());
    }
    keywords
}

/// Does the question touch this alert?
///
/// Any one of these is enough:
/// 1. a category hint in the question matches the alert's category
/// 2. the question mentions the alert's zone, species or issuing body
/// 3. the question mentions one of the affected vessels
/// 4. at least [`MIN_KEYWORD_HITS`] keywords appear in the alert's text
pub fn is_relevant(question: &Question, alert: &Alert) -> bool {
    let category_hit = CATEGORY_HINTS
        .iter()
        .any(|(hint, category)| *category == alert.category && question.text.contains(hint));
    if category_hit {
        return true;
    }

    if question.mentions(&alert.zone)
        || question.mentions(&alert.species)
        || question.mentions(&alert.body)
    {
        return true;
    }

    if alert.affected_vessels.iter().any(|v| question.mentions(v)) {
        return true;
    }

    keyword_hits(question, alert) >= MIN_KEYWORD_HITS
}

fn keyword_hits(question: &Question, alert: &Alert) -> usize {
    if question.keywords.len() < MIN_KEYWORD_HITS {
        return 0;
    }
    let haystack = [
        alert.title.as_str(),
        alert.summary.as_str(),
        alert.change_detail.as_str(),
        alert.species.as_str(),
        alert.zone.as_str(),
    ]
    .join(" ")
    .to_lowercase();

    question
        .keywords
        .iter()
        .filter(|k| haystack.contains(k.as_str()))
        .count()
}

/// Relevant alerts, in universe order.
pub fn retrieve<'a>(question: &Question, alerts: &'a [Alert]) -> Vec<&'a Alert> {
    alerts.iter().filter(|a| is_relevant(question, a)).collect()
}
