//! Async driver for the suggestion engine.
//!
//! A single tokio task owns the engine and multiplexes three inputs with
//! `tokio::select!`: the fixed 10 s poll interval, the 5 s toast timer, and
//! user commands from [`EngineHandle`]. Render events go out on a broadcast
//! channel. A fetch runs as its own branch, so commands and the toast timer
//! stay live while a request is outstanding. Shutting down (or dropping the
//! handle) drops any in-flight fetch, stops the poll loop and cancels the
//! toast timer together; nothing fires afterwards.

use std::future::{pending, Future};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::priority_escalator::{DisplayState, TOAST_TIMEOUT_MS};
use super::suggestion_engine::SuggestionEngine;
use super::timer::Timer;
use crate::domain::errors::TransportResult;
use crate::domain::models::{ContextSuggestion, RenderEvent};
use crate::domain::ports::SuggestionSource;

/// Fixed interval between suggestion polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

const COMMAND_CAPACITY: usize = 32;
const EVENT_CAPACITY: usize = 64;

#[derive(Debug)]
enum EngineCommand {
    Click,
    Dismiss,
    Select(String),
    SetEnabled(bool),
    SetAudioEnabled(bool),
    RestoreTopic(String),
    Snapshot(oneshot::Sender<EngineSnapshot>),
    Shutdown,
}

/// Point-in-time view of engine state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSnapshot {
    pub enabled: bool,
    pub audio_enabled: bool,
    pub display: DisplayState,
    /// Sorted for stable output.
    pub dismissed_topics: Vec<String>,
    pub last_surfaced_at: Option<DateTime<Utc>>,
}

impl EngineSnapshot {
    fn capture(engine: &SuggestionEngine) -> Self {
        let mut dismissed_topics: Vec<String> = engine.dismissed_topics().iter().cloned().collect();
        dismissed_topics.sort();
        Self {
            enabled: engine.is_enabled(),
            audio_enabled: engine.audio_enabled(),
            display: engine.display().clone(),
            dismissed_topics,
            last_surfaced_at: engine.last_surfaced_at(),
        }
    }
}

pub struct SuggestionRuntime;

impl SuggestionRuntime {
    /// Start driving `engine` with batches from `source`.
    ///
    /// The first poll happens immediately.
    pub fn spawn(engine: SuggestionEngine, source: Arc<dyn SuggestionSource>) -> EngineHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);

        let task = tokio::spawn(run_loop(engine, source, command_rx, event_tx.clone()));

        EngineHandle {
            commands: command_tx,
            events: event_tx,
            task: Some(task),
        }
    }
}

/// Control surface for a running engine.
pub struct EngineHandle {
    commands: mpsc::Sender<EngineCommand>,
    events: broadcast::Sender<RenderEvent>,
    task: Option<JoinHandle<()>>,
}

impl EngineHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<RenderEvent> {
        self.events.subscribe()
    }

    pub async fn click(&self) {
        self.send(EngineCommand::Click).await;
    }

    pub async fn dismiss(&self) {
        self.send(EngineCommand::Dismiss).await;
    }

    pub async fn select(&self, suggestion_id: impl Into<String>) {
        self.send(EngineCommand::Select(suggestion_id.into())).await;
    }

    pub async fn set_enabled(&self, enabled: bool) {
        self.send(EngineCommand::SetEnabled(enabled)).await;
    }

    pub async fn set_audio_enabled(&self, enabled: bool) {
        self.send(EngineCommand::SetAudioEnabled(enabled)).await;
    }

    pub async fn restore_topic(&self, topic_key: impl Into<String>) {
        self.send(EngineCommand::RestoreTopic(topic_key.into())).await;
    }

    /// Current engine state, or `None` once the engine has stopped.
    pub async fn snapshot(&self) -> Option<EngineSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(EngineCommand::Snapshot(tx)).await;
        rx.await.ok()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop polling and cancel any pending toast timeout, then wait for the
    /// engine task to exit.
    pub async fn shutdown(mut self) {
        self.send(EngineCommand::Shutdown).await;
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    tracing::error!(error = %e, "suggestion engine task failed");
                }
            }
        }
    }

    async fn send(&self, command: EngineCommand) {
        if self.commands.send(command).await.is_err() {
            tracing::debug!("suggestion engine already stopped, command dropped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

type PendingFetch = Pin<Box<dyn Future<Output = TransportResult<Vec<ContextSuggestion>>> + Send>>;

async fn run_loop(
    mut engine: SuggestionEngine,
    source: Arc<dyn SuggestionSource>,
    mut commands: mpsc::Receiver<EngineCommand>,
    events: broadcast::Sender<RenderEvent>,
) {
    let mut poll = interval(POLL_INTERVAL);
    poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut toast: Timer<String> = Timer::idle();
    let mut in_flight: Option<PendingFetch> = None;

    tracing::info!(
        enabled = engine.is_enabled(),
        poll_interval_secs = POLL_INTERVAL.as_secs(),
        "suggestion engine started"
    );

    loop {
        let emitted = tokio::select! {
            _ = poll.tick() => {
                start_poll(&engine, &source, &mut in_flight);
                Vec::new()
            }
            result = fetch_result(&mut in_flight), if in_flight.is_some() => {
                in_flight = None;
                poll_cycle(&mut engine, result)
            }
            suggestion_id = toast.fired() => engine.expire_toast(&suggestion_id),
            command = commands.recv() => match command {
                None | Some(EngineCommand::Shutdown) => break,
                Some(command) => apply(&mut engine, command),
            },
        };

        sync_toast_timer(&engine, &mut toast);
        for event in emitted {
            tracing::trace!(event = event.name(), "render event");
            // No subscribers is fine; the UI may not be attached yet.
            let _ = events.send(event);
        }
    }

    if in_flight.take().is_some() {
        tracing::debug!("dropping in-flight suggestion poll");
    }
    toast.cancel();
    tracing::info!("suggestion engine stopped");
}

/// Begin a fetch on this tick unless the engine is off or the previous
/// fetch is still outstanding.
fn start_poll(
    engine: &SuggestionEngine,
    source: &Arc<dyn SuggestionSource>,
    in_flight: &mut Option<PendingFetch>,
) {
    if !engine.is_enabled() {
        return;
    }
    if in_flight.is_some() {
        tracing::debug!("previous suggestion poll still in flight, skipping tick");
        return;
    }
    let source = Arc::clone(source);
    *in_flight = Some(Box::pin(async move { source.fetch().await }));
}

async fn fetch_result(in_flight: &mut Option<PendingFetch>) -> TransportResult<Vec<ContextSuggestion>> {
    match in_flight.as_mut() {
        Some(fetch) => fetch.await,
        None => pending().await,
    }
}

fn poll_cycle(
    engine: &mut SuggestionEngine,
    result: TransportResult<Vec<ContextSuggestion>>,
) -> Vec<RenderEvent> {
    match result {
        Ok(batch) => engine.process_batch(&batch),
        Err(e) => {
            tracing::warn!(error = %e, "suggestion poll failed, skipping cycle");
            Vec::new()
        }
    }
}

fn apply(engine: &mut SuggestionEngine, command: EngineCommand) -> Vec<RenderEvent> {
    match command {
        EngineCommand::Click => engine.click(),
        EngineCommand::Dismiss => engine.dismiss(),
        EngineCommand::Select(id) => engine.select(&id),
        EngineCommand::SetEnabled(enabled) => engine.set_enabled(enabled),
        EngineCommand::SetAudioEnabled(enabled) => {
            engine.set_audio_enabled(enabled);
            Vec::new()
        }
        EngineCommand::RestoreTopic(key) => engine.restore_topic(&key),
        EngineCommand::Snapshot(reply) => {
            let _ = reply.send(EngineSnapshot::capture(engine));
            Vec::new()
        }
        EngineCommand::Shutdown => Vec::new(),
    }
}

/// Arm the toast timer for a newly shown toast, disarm it once the toast
/// is gone (expanded, dismissed, hidden or expired).
fn sync_toast_timer(engine: &SuggestionEngine, toast: &mut Timer<String>) {
    match engine.toast_id() {
        Some(id) if toast.tag().map(String::as_str) != Some(id) => {
            toast.start(Duration::from_millis(TOAST_TIMEOUT_MS), id.to_string());
        }
        Some(_) => {}
        None => toast.cancel(),
    }
}
