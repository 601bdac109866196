//! Execution trace and data provenance models.
//!
//! These mirror the wire shape every API response may embed under
//! `execution_trace` and `data_provenance`. Field names are the snake_case
//! wire names; the values are immutable once received.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One stage of a pipeline execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStep {
    /// Position within the trace (>= 1, strictly increasing).
    pub step_number: u32,
    pub component: String,
    pub action: String,
    pub duration_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    #[serde(default)]
    pub cache_hit: bool,
    #[serde(default)]
    pub governance_checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionStep {
    /// A step carrying an error ends its branch. Sibling steps stay valid.
    pub fn is_terminal(&self) -> bool {
        self.error.is_some()
    }
}

/// Full record for one logical request.
///
/// The aggregate counters are taken as reported by the backend and are
/// never re-derived from `steps`, even when they disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionTrace {
    pub request_id: String,
    pub total_duration_ms: f64,
    #[serde(default)]
    pub steps: Vec<ExecutionStep>,
    #[serde(default)]
    pub data_sources_used: Vec<String>,
    #[serde(default)]
    pub agents_involved: Vec<String>,
    #[serde(default)]
    pub governance_checks: u64,
    #[serde(default)]
    pub cache_hits: u64,
    #[serde(default)]
    pub database_queries: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_api_calls: Option<u64>,
}

impl ExecutionTrace {
    /// A trace with no steps and zeroed counters.
    pub fn empty(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            total_duration_ms: 0.0,
            steps: Vec::new(),
            data_sources_used: Vec::new(),
            agents_involved: Vec::new(),
            governance_checks: 0,
            cache_hits: 0,
            database_queries: 0,
            external_api_calls: None,
        }
    }

    /// Steps that ended their branch with an error.
    pub fn failed_steps(&self) -> impl Iterator<Item = &ExecutionStep> {
        self.steps.iter().filter(|s| s.is_terminal())
    }

    /// Number of steps flagged `cache_hit`.
    ///
    /// Informational only; `cache_hits` remains authoritative for display.
    pub fn observed_cache_hits(&self) -> u64 {
        self.steps.iter().filter(|s| s.cache_hit).count() as u64
    }
}

/// One attestation of where a fact or answer came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataProvenance {
    pub source_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// ISO-8601 timestamp, kept verbatim.
    pub timestamp: String,
    /// Confidence in `[0.0, 1.0]`.
    pub confidence: f64,
    #[serde(default)]
    pub verified: bool,
}

impl DataProvenance {
    pub fn new(source_type: impl Into<String>, confidence: f64, verified: bool) -> Self {
        Self {
            source_type: source_type.into(),
            source_id: None,
            timestamp: Utc::now().to_rfc3339(),
            confidence,
            verified,
        }
    }

    pub fn with_source_id(mut self, id: impl Into<String>) -> Self {
        self.source_id = Some(id.into());
        self
    }

    /// Parse `timestamp` as RFC 3339, if it is one.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Observability data extracted from one API response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseObservability {
    #[serde(rename = "execution_trace", default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<ExecutionTrace>,
    #[serde(rename = "data_provenance", default)]
    pub provenance: Vec<DataProvenance>,
}
