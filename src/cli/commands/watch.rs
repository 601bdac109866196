//! `beacon watch`: run the suggestion engine against the polling endpoint.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::sync::broadcast::error::RecvError;

use crate::cli::output::{output_line, truncate};
use crate::domain::models::{Config, ContextSuggestion, RenderEvent};
use crate::domain::ports::SystemClock;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::cues::TerminalCuePort;
use crate::infrastructure::http::HttpSuggestionSource;
use crate::services::{SuggestionEngine, SuggestionRuntime};

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Override the API base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Override the minimum confidence for surfacing a suggestion
    #[arg(long, value_name = "SCORE")]
    pub min_confidence: Option<f64>,

    /// Surface suggestions without the terminal bell
    #[arg(long)]
    pub no_audio: bool,
}

impl WatchArgs {
    /// Fold command-line overrides into the loaded configuration.
    ///
    /// Running `watch` is the opt-in, so the engine is always enabled here.
    pub fn apply(&self, mut config: Config) -> Result<Config> {
        if let Some(ref url) = self.base_url {
            config.api.base_url = url.clone();
        }
        if let Some(min) = self.min_confidence {
            config.engine.min_confidence = min;
        }
        if self.no_audio {
            config.engine.audio_enabled = false;
        }
        config.engine.enabled = true;
        ConfigLoader::validate(&config)?;
        Ok(config)
    }
}

pub async fn execute(args: WatchArgs, config: Config, json_mode: bool) -> Result<()> {
    let config = args.apply(config)?;

    let source = HttpSuggestionSource::from_config(&config.api)
        .context("Failed to build HTTP client")?;
    tracing::info!(url = %source.url(), min_confidence = config.engine.min_confidence, "watching for suggestions");

    let engine = SuggestionEngine::from_config(
        &config.engine,
        Arc::new(SystemClock),
        Arc::new(TerminalCuePort::new()),
    );
    let handle = SuggestionRuntime::spawn(engine, Arc::new(source));
    let mut events = handle.subscribe();

    if !json_mode {
        eprintln!("Watching {} (Ctrl-C to stop)", config.api.base_url);
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupt received, stopping");
                break;
            }
            received = events.recv() => match received {
                Ok(event) => print_event(&event, json_mode),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "render event stream lagged");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    if let Some(snapshot) = handle.snapshot().await {
        tracing::debug!(
            dismissed = snapshot.dismissed_topics.len(),
            last_surfaced_at = ?snapshot.last_surfaced_at,
            "final engine state"
        );
    }
    handle.shutdown().await;
    Ok(())
}

fn print_event(event: &RenderEvent, json_mode: bool) {
    if json_mode {
        output_line(event);
    } else {
        println!("{}", describe(event));
    }
}

fn headline(suggestion: &ContextSuggestion) -> String {
    format!(
        "{} {} [{}] {} ({:.0}%)",
        suggestion.priority.as_str(),
        suggestion.kind,
        suggestion.kernel,
        truncate(&suggestion.title, 60),
        suggestion.confidence * 100.0
    )
}

/// One-line human rendering of a render event.
pub fn describe(event: &RenderEvent) -> String {
    match event {
        RenderEvent::ShowToast { suggestion, cue } => {
            let bell = if cue.tone.is_some() { " *" } else { "" };
            format!("toast     {}{bell}", headline(suggestion))
        }
        RenderEvent::AutoExpand { suggestion } => format!("expanded  {}", headline(suggestion)),
        RenderEvent::Expand { suggestion } => format!("expanded  {}", headline(suggestion)),
        RenderEvent::HideToast { suggestion_id } => format!("hidden    {suggestion_id}"),
        RenderEvent::Dismissed { suggestion_id, topic_key } => {
            format!("dismissed {suggestion_id} (topic {topic_key} muted)")
        }
        RenderEvent::Badge { pending } => format!("badge     {pending} more"),
        RenderEvent::TopicRestored { topic_key } => format!("restored  {topic_key}"),
    }
}
