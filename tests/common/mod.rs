//! Common test utilities for integration tests
//!
//! Provides shared fixtures and a scripted suggestion source used across
//! multiple integration test files.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use beacon::domain::errors::{TransportError, TransportResult};
use beacon::domain::models::{ContextSuggestion, Priority, SuggestionType};
use beacon::domain::ports::SuggestionSource;

/// Build a suggestion with sensible defaults.
pub fn suggestion(id: &str, kind: SuggestionType, kernel: &str, priority: Priority) -> ContextSuggestion {
    ContextSuggestion {
        id: id.to_string(),
        kind,
        title: format!("Suggestion {id}"),
        preview: "preview".to_string(),
        confidence: 0.9,
        priority,
        kernel: kernel.to_string(),
        timestamp: "2024-03-01T12:00:00Z".to_string(),
    }
}

/// Suggestion source that replays a fixed script of poll results.
///
/// Once the script is exhausted every fetch returns an empty batch.
#[derive(Default)]
pub struct ScriptedSource {
    script: Mutex<VecDeque<TransportResult<Vec<ContextSuggestion>>>>,
    fetches: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(script: Vec<TransportResult<Vec<ContextSuggestion>>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            fetches: AtomicUsize::new(0),
        })
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SuggestionSource for ScriptedSource {
    async fn fetch(&self) -> TransportResult<Vec<ContextSuggestion>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .expect("script lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// A 503 from the polling endpoint.
pub fn unavailable() -> TransportError {
    TransportError::Status {
        status: 503,
        body: "unavailable".to_string(),
    }
}

/// Setup test logging
///
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
