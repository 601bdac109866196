use std::collections::HashSet;

use crate::domain::models::ContextSuggestion;

/// Default confidence floor for surfacing a suggestion.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.7;

/// Drops low-confidence and previously dismissed candidates.
///
/// Pure: input order is preserved and nothing is reordered, since the
/// source already sorts by recency/relevance.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionFilter {
    min_confidence: f64,
}

impl Default for SuggestionFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionFilter {
    pub fn new() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }

    pub fn with_min_confidence(min_confidence: f64) -> Self {
        Self { min_confidence }
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    pub fn filter(
        &self,
        candidates: &[ContextSuggestion],
        dismissed_topics: &HashSet<String>,
    ) -> Vec<ContextSuggestion> {
        candidates
            .iter()
            .filter(|c| self.accepts(c, dismissed_topics))
            .cloned()
            .collect()
    }

    /// NaN confidence never passes.
    pub fn accepts(&self, candidate: &ContextSuggestion, dismissed_topics: &HashSet<String>) -> bool {
        candidate.confidence >= self.min_confidence
            && !dismissed_topics.contains(&candidate.topic_key())
    }
}
