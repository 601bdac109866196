//! Service layer
//!
//! The trust-scoring pipeline (`TraceIngestor` -> `TrustScorer`) and the
//! proactive suggestion pipeline (`SuggestionFilter` -> `CooldownScheduler`
//! -> `PriorityEscalator` -> `CueDispatcher`), composed by
//! `SuggestionEngine` and driven by `SuggestionRuntime`.

pub mod cooldown_scheduler;
pub mod cue_dispatcher;
pub mod priority_escalator;
pub mod suggestion_engine;
pub mod suggestion_filter;
pub mod suggestion_runtime;
pub mod timer;
pub mod trace_ingestor;
pub mod trust_scorer;

pub use cooldown_scheduler::{CooldownScheduler, COOLDOWN_MS};
pub use cue_dispatcher::{CueDispatcher, TONE_DURATION_MS};
pub use priority_escalator::{DisplayState, PriorityEscalator, SelectOutcome, TOAST_TIMEOUT_MS};
pub use suggestion_engine::SuggestionEngine;
pub use suggestion_filter::{SuggestionFilter, DEFAULT_MIN_CONFIDENCE};
pub use suggestion_runtime::{EngineHandle, EngineSnapshot, SuggestionRuntime, POLL_INTERVAL};
pub use timer::Timer;
pub use trace_ingestor::TraceIngestor;
pub use trust_scorer::{TraceSummary, TrustBand, TrustMetrics, TrustScorer, UNVERIFIED_PENALTY};
