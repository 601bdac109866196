//! Domain errors for the beacon notification core.
//!
//! None of these are fatal to the host: validation failures fall back to
//! defaults, transport failures skip a poll cycle, and playback failures
//! drop the cue while the visual event still proceeds.

use thiserror::Error;

/// Malformed shape for an execution trace or provenance payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Expected a JSON object for {field}, found {found}")]
    NotAnObject { field: &'static str, found: String },

    #[error("Expected a JSON array for {field}, found {found}")]
    NotAnArray { field: &'static str, found: String },
}

/// Failure to fetch a suggestion batch from the polling endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Suggestion request failed: {0}")]
    Request(String),

    #[error("Suggestion endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Suggestion response could not be decoded: {0}")]
    Decode(String),
}

/// Failure of the host audio or haptic facility.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The host has no such facility. Treated as a silent no-op.
    #[error("{0} playback is not supported on this host")]
    Unsupported(&'static str),

    #[error("{facility} playback failed: {reason}")]
    Failed {
        facility: &'static str,
        reason: String,
    },
}

pub type TransportResult<T> = Result<T, TransportError>;

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Short JSON type name used in validation messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
    .to_string()
}
