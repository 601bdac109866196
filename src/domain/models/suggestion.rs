//! Proactive context suggestion model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of subsystem signal a suggestion points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Logs,
    Metrics,
    Models,
    Documentation,
    Alert,
}

impl SuggestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Logs => "logs",
            Self::Metrics => "metrics",
            Self::Models => "models",
            Self::Documentation => "documentation",
            Self::Alert => "alert",
        }
    }
}

impl fmt::Display for SuggestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared urgency, totally ordered `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate proactive notification as delivered by the polling endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSuggestion {
    /// Unique per emission; several emissions may share a topic.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub title: String,
    #[serde(default)]
    pub preview: String,
    /// Confidence in `[0.0, 1.0]`.
    pub confidence: f64,
    pub priority: Priority,
    /// The subsystem the suggestion concerns.
    pub kernel: String,
    /// ISO-8601 timestamp, kept verbatim.
    #[serde(default)]
    pub timestamp: String,
}

impl ContextSuggestion {
    /// Deduplication key derived from `(type, kernel)`.
    pub fn topic_key(&self) -> String {
        topic_key(self.kind, &self.kernel)
    }
}

/// Build the deduplication key for a `(type, kernel)` pair.
pub fn topic_key(kind: SuggestionType, kernel: &str) -> String {
    format!("{}:{}", kind.as_str(), kernel)
}

/// Envelope returned by `GET /api/context/suggestions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestionBatch {
    #[serde(default)]
    pub suggestions: Vec<ContextSuggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Critical);
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let raw = json!({
            "id": "s-1",
            "type": "alert",
            "title": "Replication lag",
            "preview": "Replica is 40s behind",
            "confidence": 0.92,
            "priority": "critical",
            "kernel": "db",
            "timestamp": "2024-03-01T12:00:00Z"
        });

        let s: ContextSuggestion = serde_json::from_value(raw).unwrap();
        assert_eq!(s.kind, SuggestionType::Alert);
        assert_eq!(s.priority, Priority::Critical);
        assert_eq!(s.topic_key(), "alert:db");
    }

    #[test]
    fn test_topic_key_ignores_id_and_title() {
        let a = topic_key(SuggestionType::Logs, "scheduler");
        let b = topic_key(SuggestionType::Logs, "scheduler");
        let c = topic_key(SuggestionType::Metrics, "scheduler");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let raw = json!({
            "id": "s-2", "type": "gossip", "title": "t", "confidence": 0.9,
            "priority": "low", "kernel": "k"
        });
        assert!(serde_json::from_value::<ContextSuggestion>(raw).is_err());
    }
}
