pub mod config;
pub mod presentation;
pub mod suggestion;
pub mod trace;

pub use config::{ApiConfig, Config, EngineConfig, LoggingConfig};
pub use presentation::{CueEvent, HapticPattern, PresentationTier, RenderEvent, Tone};
pub use suggestion::{topic_key, ContextSuggestion, Priority, SuggestionBatch, SuggestionType};
pub use trace::{DataProvenance, ExecutionStep, ExecutionTrace, ResponseObservability};
