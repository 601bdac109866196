use serde::{Deserialize, Serialize};

use super::trace_ingestor::clamp_confidence;
use crate::domain::models::{DataProvenance, ExecutionTrace, ResponseObservability};

/// Fixed discount applied when any provenance record is unverified.
pub const UNVERIFIED_PENALTY: f64 = 0.7;

/// Display band for a trust score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustBand {
    High,
    Moderate,
    Low,
}

impl TrustBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::High
        } else if score >= 0.5 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::Low => "low",
        }
    }
}

/// Display summary of one execution trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    pub duration_ms: f64,
    /// One entry per step, in step order. Duplicates are kept.
    pub components_visited: Vec<String>,
    pub data_sources: Vec<String>,
    pub database_queries: u64,
    pub all_verified: bool,
}

/// Trust metrics attached to a response for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustMetrics {
    pub trust_score: f64,
    pub band: TrustBand,
    pub provenance_count: usize,
    pub summary: Option<TraceSummary>,
}

/// Reduces provenance records into a single trust score.
///
/// Unverified sources are discounted rather than excluded:
/// `mean(confidence)` when every record is verified, otherwise
/// `mean(confidence) * 0.7`. An empty set scores `0.0`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrustScorer;

impl TrustScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, provenance: &[DataProvenance]) -> f64 {
        if provenance.is_empty() {
            return 0.0;
        }

        // Records built in code bypass ingest, so clamp here as well
        let total: f64 = provenance
            .iter()
            .map(|p| clamp_confidence(Some(p.confidence)))
            .sum();
        let avg_confidence = total / provenance.len() as f64;
        let all_verified = provenance.iter().all(|p| p.verified);

        let score = if all_verified {
            avg_confidence
        } else {
            avg_confidence * UNVERIFIED_PENALTY
        };
        score.clamp(0.0, 1.0)
    }

    /// Summarize a trace for display consumers.
    ///
    /// `all_verified` is false for an empty provenance list: nothing was
    /// attested, so nothing is shown as verified.
    pub fn extract_summary(
        &self,
        trace: &ExecutionTrace,
        provenance: &[DataProvenance],
    ) -> TraceSummary {
        TraceSummary {
            duration_ms: trace.total_duration_ms,
            components_visited: trace.steps.iter().map(|s| s.component.clone()).collect(),
            data_sources: trace.data_sources_used.clone(),
            database_queries: trace.database_queries,
            all_verified: !provenance.is_empty() && provenance.iter().all(|p| p.verified),
        }
    }

    pub fn metrics(&self, observability: &ResponseObservability) -> TrustMetrics {
        let trust_score = self.score(&observability.provenance);
        TrustMetrics {
            trust_score,
            band: TrustBand::from_score(trust_score),
            provenance_count: observability.provenance.len(),
            summary: observability
                .trace
                .as_ref()
                .map(|t| self.extract_summary(t, &observability.provenance)),
        }
    }
}
