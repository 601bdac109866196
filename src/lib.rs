//! Beacon - response trust scoring and proactive context suggestions
//!
//! Two independent pipelines share this crate:
//!
//! - **Trust scoring**: `TraceIngestor` validates the execution trace and
//!   data provenance embedded in an API response; `TrustScorer` reduces the
//!   provenance to a single trust score and summarizes the trace.
//! - **Proactive suggestions**: `SuggestionEngine` filters polled
//!   suggestions, gates them behind a global cooldown, escalates by priority
//!   and dispatches audio/haptic cues. `SuggestionRuntime` drives it on a
//!   10 second poll and publishes `RenderEvent`s to view components.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, errors and port traits
//! - **Service Layer** (`services`): the two pipelines
//! - **Infrastructure Layer** (`infrastructure`): config, logging, HTTP and cue adapters
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use beacon::{SuggestionEngine, SuggestionRuntime, SystemClock, NullCuePort};
//!
//! let engine = SuggestionEngine::new(Arc::new(SystemClock), Arc::new(NullCuePort));
//! let handle = SuggestionRuntime::spawn(engine, source);
//! let mut events = handle.subscribe();
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{PlaybackError, TransportError, ValidationError};
pub use domain::models::{
    ContextSuggestion, DataProvenance, ExecutionStep, ExecutionTrace, Priority, RenderEvent,
    ResponseObservability, SuggestionType,
};
pub use domain::ports::{Clock, CuePort, NullCuePort, SuggestionSource, SystemClock};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    EngineHandle, SuggestionEngine, SuggestionRuntime, TraceIngestor, TrustMetrics, TrustScorer,
};
