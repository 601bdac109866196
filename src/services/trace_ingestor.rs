//! Validation and normalization of inbound trace/provenance payloads.
//!
//! Responses from older or degraded backends may omit `execution_trace` and
//! `data_provenance` entirely; that is not an error. When a trace object is
//! present, every field is read on its own so one malformed field falls
//! back to its default without discarding the rest. Unknown fields are
//! ignored.

use serde_json::{Map, Value};

use crate::domain::errors::{json_kind, ValidationError};
use crate::domain::models::{DataProvenance, ExecutionStep, ExecutionTrace, ResponseObservability};

const TRACE_FIELD: &str = "execution_trace";
const PROVENANCE_FIELD: &str = "data_provenance";

/// Extracts execution traces and provenance from API response bodies.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceIngestor;

impl TraceIngestor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the execution trace embedded in a response body.
    ///
    /// Returns `Ok(None)` when the body carries no trace, and an error only
    /// when `execution_trace` is present but is not an object.
    pub fn ingest(&self, raw: &Value) -> Result<Option<ExecutionTrace>, ValidationError> {
        match raw.get(TRACE_FIELD) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(obj)) => Ok(Some(parse_trace(obj))),
            Some(other) => Err(ValidationError::NotAnObject {
                field: TRACE_FIELD,
                found: json_kind(other),
            }),
        }
    }

    /// Extract the provenance records embedded in a response body.
    ///
    /// Entries that are not objects are skipped.
    pub fn ingest_provenance(&self, raw: &Value) -> Result<Vec<DataProvenance>, ValidationError> {
        match raw.get(PROVENANCE_FIELD) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items
                .iter()
                .filter_map(|item| match item.as_object() {
                    Some(obj) => Some(parse_provenance(obj)),
                    None => {
                        tracing::warn!(found = %json_kind(item), "skipping non-object provenance entry");
                        None
                    }
                })
                .collect()),
            Some(other) => Err(ValidationError::NotAnArray {
                field: PROVENANCE_FIELD,
                found: json_kind(other),
            }),
        }
    }

    /// Extract both trace and provenance, recovering locally from any
    /// validation failure by falling back to an absent trace or an empty
    /// provenance list.
    pub fn ingest_response(&self, raw: &Value) -> ResponseObservability {
        let trace = self.ingest(raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "discarding malformed execution trace");
            None
        });
        let provenance = self.ingest_provenance(raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "discarding malformed data provenance");
            Vec::new()
        });

        if let Some(ref t) = trace {
            tracing::debug!(
                request_id = %t.request_id,
                steps = t.steps.len(),
                provenance = provenance.len(),
                "ingested response observability"
            );
        }

        ResponseObservability { trace, provenance }
    }
}

fn parse_trace(obj: &Map<String, Value>) -> ExecutionTrace {
    let request_id = string_field(obj, "request_id").unwrap_or_default();
    if request_id.is_empty() {
        tracing::debug!("execution trace has no request_id");
    }

    ExecutionTrace {
        request_id,
        total_duration_ms: non_negative_f64(obj, "total_duration_ms"),
        steps: parse_steps(obj.get("steps")),
        data_sources_used: string_set(obj, "data_sources_used"),
        agents_involved: string_set(obj, "agents_involved"),
        governance_checks: counter(obj, "governance_checks"),
        cache_hits: counter(obj, "cache_hits"),
        database_queries: counter(obj, "database_queries"),
        external_api_calls: optional_counter(obj, "external_api_calls"),
    }
}

/// Keep steps in arrival order, dropping any whose `step_number` is missing,
/// zero, or not strictly greater than the last accepted step.
fn parse_steps(raw: Option<&Value>) -> Vec<ExecutionStep> {
    let Some(Value::Array(items)) = raw else {
        return Vec::new();
    };

    let mut steps: Vec<ExecutionStep> = Vec::with_capacity(items.len());
    for item in items {
        let Some(obj) = item.as_object() else {
            tracing::warn!(found = %json_kind(item), "skipping non-object execution step");
            continue;
        };

        let step_number = optional_counter(obj, "step_number")
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n >= 1);
        let Some(step_number) = step_number else {
            tracing::warn!("skipping execution step without a valid step_number");
            continue;
        };

        if let Some(last) = steps.last() {
            if step_number <= last.step_number {
                tracing::warn!(
                    step_number,
                    previous = last.step_number,
                    "skipping out-of-order or duplicate execution step"
                );
                continue;
            }
        }

        steps.push(ExecutionStep {
            step_number,
            component: string_field(obj, "component").unwrap_or_default(),
            action: string_field(obj, "action").unwrap_or_default(),
            duration_ms: non_negative_f64(obj, "duration_ms"),
            input_data: obj.get("input_data").filter(|v| !v.is_null()).cloned(),
            output_data: obj.get("output_data").filter(|v| !v.is_null()).cloned(),
            data_source: string_field(obj, "data_source"),
            cache_hit: bool_field(obj, "cache_hit"),
            governance_checked: bool_field(obj, "governance_checked"),
            error: string_field(obj, "error"),
        });
    }
    steps
}

fn parse_provenance(obj: &Map<String, Value>) -> DataProvenance {
    DataProvenance {
        source_type: string_field(obj, "source_type").unwrap_or_default(),
        source_id: string_field(obj, "source_id"),
        timestamp: string_field(obj, "timestamp").unwrap_or_default(),
        confidence: clamp_confidence(obj.get("confidence").and_then(Value::as_f64)),
        verified: bool_field(obj, "verified"),
    }
}

/// Clamp into `[0.0, 1.0]`; missing or non-finite values become `0.0`.
pub(crate) fn clamp_confidence(raw: Option<f64>) -> f64 {
    raw.filter(|v| v.is_finite())
        .map_or(0.0, |v| v.clamp(0.0, 1.0))
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn non_negative_f64(obj: &Map<String, Value>, key: &str) -> f64 {
    obj.get(key)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

fn optional_counter(obj: &Map<String, Value>, key: &str) -> Option<u64> {
    let value = obj.get(key)?;
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0)
            .map(|v| v as u64)
    })
}

fn counter(obj: &Map<String, Value>, key: &str) -> u64 {
    optional_counter(obj, key).unwrap_or(0)
}

fn string_set(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    let Some(Value::Array(items)) = obj.get(key) else {
        return Vec::new();
    };
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for s in items.iter().filter_map(Value::as_str) {
        if !out.iter().any(|seen| seen == s) {
            out.push(s.to_string());
        }
    }
    out
}
