//! The proactive suggestion engine.
//!
//! Owns every piece of mutable notification state for one session:
//! dismissed topics, the cooldown gate, the display slot and the two
//! toggles. All of it is in-memory and mutated only through the methods
//! below; nothing survives a restart. Each method returns the render events
//! the UI layer should apply.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::cooldown_scheduler::CooldownScheduler;
use super::cue_dispatcher::CueDispatcher;
use super::priority_escalator::{DisplayState, PriorityEscalator, SelectOutcome};
use super::suggestion_filter::SuggestionFilter;
use crate::domain::models::{ContextSuggestion, EngineConfig, PresentationTier, RenderEvent};
use crate::domain::ports::{Clock, CuePort};

pub struct SuggestionEngine {
    clock: Arc<dyn Clock>,
    cues: CueDispatcher,
    filter: SuggestionFilter,
    cooldown: CooldownScheduler,
    escalator: PriorityEscalator,
    dismissed_topics: HashSet<String>,
    enabled: bool,
    audio_enabled: bool,
}

impl SuggestionEngine {
    /// Create an enabled engine with audio on and the default confidence floor.
    pub fn new(clock: Arc<dyn Clock>, cue_port: Arc<dyn CuePort>) -> Self {
        Self {
            clock,
            cues: CueDispatcher::new(cue_port),
            filter: SuggestionFilter::new(),
            cooldown: CooldownScheduler::new(),
            escalator: PriorityEscalator::new(),
            dismissed_topics: HashSet::new(),
            enabled: true,
            audio_enabled: true,
        }
    }

    pub fn from_config(
        config: &EngineConfig,
        clock: Arc<dyn Clock>,
        cue_port: Arc<dyn CuePort>,
    ) -> Self {
        let mut engine = Self::new(clock, cue_port);
        engine.filter = SuggestionFilter::with_min_confidence(config.min_confidence);
        engine.enabled = config.enabled;
        engine.audio_enabled = config.audio_enabled;
        engine
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn audio_enabled(&self) -> bool {
        self.audio_enabled
    }

    pub fn display(&self) -> &DisplayState {
        self.escalator.state()
    }

    /// Id of the suggestion currently shown as a toast.
    pub fn toast_id(&self) -> Option<&str> {
        self.escalator.toast_id()
    }

    pub fn dismissed_topics(&self) -> &HashSet<String> {
        &self.dismissed_topics
    }

    pub fn last_surfaced_at(&self) -> Option<DateTime<Utc>> {
        self.cooldown.last_surfaced_at()
    }

    /// Run one poll cycle over a freshly fetched batch.
    ///
    /// At most the first eligible candidate is surfaced. Eligible candidates
    /// that are not surfaced are reported as a badge count and then dropped;
    /// the next cycle starts from scratch. The display slot is checked before
    /// the cooldown gate so a blocked cycle does not consume the cooldown.
    pub fn process_batch(&mut self, candidates: &[ContextSuggestion]) -> Vec<RenderEvent> {
        if !self.enabled {
            return Vec::new();
        }

        let eligible = self.filter.filter(candidates, &self.dismissed_topics);
        tracing::debug!(
            candidates = candidates.len(),
            eligible = eligible.len(),
            "filtered suggestion batch"
        );

        let Some(first) = eligible.first() else {
            return Vec::new();
        };

        if !self.escalator.is_idle() {
            tracing::debug!("suggestion already displayed, not preempting");
            return vec![RenderEvent::Badge {
                pending: eligible.len(),
            }];
        }

        if !self.cooldown.try_acquire(self.clock.now()) {
            return vec![RenderEvent::Badge {
                pending: eligible.len(),
            }];
        }

        let suggestion = first.clone();
        let Some(tier) = self.escalator.surface(suggestion.clone()) else {
            return Vec::new();
        };
        let cue = self.cues.dispatch(suggestion.priority, self.audio_enabled);

        tracing::info!(
            suggestion_id = %suggestion.id,
            topic = %suggestion.topic_key(),
            priority = %suggestion.priority,
            confidence = suggestion.confidence,
            tier = ?tier,
            "surfacing suggestion"
        );

        let mut events = vec![RenderEvent::ShowToast {
            suggestion: suggestion.clone(),
            cue,
        }];
        if tier == PresentationTier::AutoExpand {
            events.push(RenderEvent::AutoExpand { suggestion });
        }
        if eligible.len() > 1 {
            events.push(RenderEvent::Badge {
                pending: eligible.len() - 1,
            });
        }
        events
    }

    /// User clicked the toast.
    pub fn click(&mut self) -> Vec<RenderEvent> {
        match self.escalator.click() {
            Some(suggestion) => vec![RenderEvent::Expand {
                suggestion: suggestion.clone(),
            }],
            None => Vec::new(),
        }
    }

    /// User dismissed the displayed suggestion; its topic is suppressed for
    /// the rest of the session.
    pub fn dismiss(&mut self) -> Vec<RenderEvent> {
        match self.escalator.dismiss() {
            Some(suggestion) => vec![self.record_dismissal(&suggestion)],
            None => Vec::new(),
        }
    }

    /// User selected a suggestion by id.
    pub fn select(&mut self, suggestion_id: &str) -> Vec<RenderEvent> {
        match self.escalator.select(suggestion_id) {
            SelectOutcome::Expanded(suggestion) => vec![RenderEvent::Expand { suggestion }],
            SelectOutcome::Dismissed(suggestion) => vec![self.record_dismissal(&suggestion)],
            SelectOutcome::Unchanged => Vec::new(),
        }
    }

    /// The toast display timeout elapsed for `suggestion_id`.
    pub fn expire_toast(&mut self, suggestion_id: &str) -> Vec<RenderEvent> {
        match self.escalator.expire(suggestion_id) {
            Some(suggestion) => vec![RenderEvent::HideToast {
                suggestion_id: suggestion.id,
            }],
            None => Vec::new(),
        }
    }

    /// Flip the opt-in toggle.
    ///
    /// Disabling hides the displayed suggestion without dismissing its
    /// topic. The cooldown and dismissed topics are never reset here.
    pub fn set_enabled(&mut self, enabled: bool) -> Vec<RenderEvent> {
        if self.enabled == enabled {
            return Vec::new();
        }
        self.enabled = enabled;
        tracing::info!(enabled, "proactive suggestions toggled");

        if enabled {
            return Vec::new();
        }
        match self.escalator.hide() {
            Some(suggestion) => vec![RenderEvent::HideToast {
                suggestion_id: suggestion.id,
            }],
            None => Vec::new(),
        }
    }

    pub fn set_audio_enabled(&mut self, audio_enabled: bool) {
        self.audio_enabled = audio_enabled;
    }

    /// Undo a dismissal for the current session.
    pub fn restore_topic(&mut self, topic_key: &str) -> Vec<RenderEvent> {
        if self.dismissed_topics.remove(topic_key) {
            tracing::info!(topic = %topic_key, "dismissed topic restored");
            vec![RenderEvent::TopicRestored {
                topic_key: topic_key.to_string(),
            }]
        } else {
            Vec::new()
        }
    }

    fn record_dismissal(&mut self, suggestion: &ContextSuggestion) -> RenderEvent {
        let topic_key = suggestion.topic_key();
        tracing::info!(suggestion_id = %suggestion.id, topic = %topic_key, "suggestion dismissed");
        self.dismissed_topics.insert(topic_key.clone());
        RenderEvent::Dismissed {
            suggestion_id: suggestion.id.clone(),
            topic_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Priority, SuggestionType};
    use crate::domain::ports::{ManualClock, RecordingCuePort};

    fn suggestion(id: &str, kind: SuggestionType, kernel: &str, priority: Priority, confidence: f64) -> ContextSuggestion {
        ContextSuggestion {
            id: id.to_string(),
            kind,
            title: format!("suggestion {id}"),
            preview: String::new(),
            confidence,
            priority,
            kernel: kernel.to_string(),
            timestamp: "2024-03-01T12:00:00Z".to_string(),
        }
    }

    fn engine() -> (SuggestionEngine, Arc<ManualClock>, Arc<RecordingCuePort>) {
        let clock = Arc::new(ManualClock::at_millis(1_700_000_000_000));
        let port = Arc::new(RecordingCuePort::new());
        let engine = SuggestionEngine::new(clock.clone(), port.clone());
        (engine, clock, port)
    }

    #[test]
    fn test_surfaces_first_eligible_only() {
        let (mut engine, _clock, port) = engine();
        let mut batch: Vec<ContextSuggestion> = (0..9)
            .map(|i| suggestion(&format!("low{i}"), SuggestionType::Logs, "k", Priority::Low, 0.5))
            .collect();
        batch.insert(2, suggestion("a", SuggestionType::Metrics, "api", Priority::Medium, 0.8));
        batch.insert(5, suggestion("b", SuggestionType::Logs, "api", Priority::High, 0.9));
        batch.push(suggestion("c", SuggestionType::Models, "llm", Priority::Low, 0.95));
        assert_eq!(batch.len(), 12);

        let events = engine.process_batch(&batch);
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], RenderEvent::ShowToast { suggestion, .. } if suggestion.id == "a"));
        assert_eq!(events[1], RenderEvent::Badge { pending: 2 });
        assert_eq!(engine.toast_id(), Some("a"));
        assert_eq!(port.tones().len(), 1);
    }

    #[test]
    fn test_critical_auto_expands() {
        let (mut engine, _clock, _port) = engine();
        let events = engine.process_batch(&[suggestion("x", SuggestionType::Alert, "db", Priority::Critical, 0.99)]);

        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], RenderEvent::ShowToast { .. }));
        assert!(matches!(&events[1], RenderEvent::AutoExpand { suggestion } if suggestion.id == "x"));
        assert!(matches!(engine.display(), DisplayState::Expanded { auto: true, .. }));
    }

    #[test]
    fn test_medium_needs_click_to_expand() {
        let (mut engine, _clock, _port) = engine();
        engine.process_batch(&[suggestion("m", SuggestionType::Metrics, "api", Priority::Medium, 0.9)]);
        assert!(matches!(engine.display(), DisplayState::Toast { .. }));

        let events = engine.click();
        assert!(matches!(&events[0], RenderEvent::Expand { suggestion } if suggestion.id == "m"));
    }

    #[test]
    fn test_cooldown_blocks_next_cycle() {
        let (mut engine, clock, _port) = engine();
        engine.process_batch(&[suggestion("a", SuggestionType::Logs, "k1", Priority::Low, 0.9)]);
        engine.expire_toast("a");
        assert!(matches!(engine.display(), DisplayState::Idle));

        clock.advance_ms(10_000);
        let events = engine.process_batch(&[suggestion("b", SuggestionType::Logs, "k2", Priority::Critical, 0.9)]);
        assert_eq!(events, vec![RenderEvent::Badge { pending: 1 }]);

        clock.advance_ms(20_000);
        let events = engine.process_batch(&[suggestion("b", SuggestionType::Logs, "k2", Priority::Critical, 0.9)]);
        assert!(matches!(&events[0], RenderEvent::ShowToast { .. }));
    }

    #[test]
    fn test_displayed_suggestion_is_not_preempted_and_cooldown_untouched() {
        let (mut engine, clock, _port) = engine();
        engine.process_batch(&[suggestion("a", SuggestionType::Logs, "k1", Priority::Low, 0.9)]);
        engine.click();
        let surfaced_at = engine.last_surfaced_at();

        clock.advance_ms(60_000);
        let events = engine.process_batch(&[suggestion("b", SuggestionType::Alert, "k2", Priority::Critical, 1.0)]);
        assert_eq!(events, vec![RenderEvent::Badge { pending: 1 }]);
        assert_eq!(engine.last_surfaced_at(), surfaced_at);
    }

    #[test]
    fn test_dismissal_suppresses_topic_for_session() {
        let (mut engine, clock, _port) = engine();
        engine.process_batch(&[suggestion("a", SuggestionType::Alert, "db", Priority::High, 0.9)]);
        let events = engine.dismiss();
        assert_eq!(
            events,
            vec![RenderEvent::Dismissed {
                suggestion_id: "a".to_string(),
                topic_key: "alert:db".to_string()
            }]
        );

        clock.advance_ms(120_000);
        let events = engine.process_batch(&[suggestion("a2", SuggestionType::Alert, "db", Priority::Critical, 1.0)]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_select_other_dismisses_expanded() {
        let (mut engine, _clock, _port) = engine();
        engine.process_batch(&[suggestion("a", SuggestionType::Models, "llm", Priority::Critical, 0.9)]);
        let events = engine.select("b");
        assert!(matches!(&events[0], RenderEvent::Dismissed { topic_key, .. } if topic_key == "models:llm"));
        assert!(engine.dismissed_topics().contains("models:llm"));
    }

    #[test]
    fn test_timeout_is_not_a_dismissal() {
        let (mut engine, _clock, _port) = engine();
        engine.process_batch(&[suggestion("a", SuggestionType::Logs, "k", Priority::Low, 0.9)]);
        let events = engine.expire_toast("a");
        assert_eq!(events, vec![RenderEvent::HideToast { suggestion_id: "a".to_string() }]);
        assert!(engine.dismissed_topics().is_empty());
    }

    #[test]
    fn test_disable_hides_and_keeps_state() {
        let (mut engine, clock, _port) = engine();
        engine.process_batch(&[suggestion("a", SuggestionType::Alert, "db", Priority::Low, 0.9)]);
        engine.dismiss();
        clock.advance_ms(40_000);
        engine.process_batch(&[suggestion("b", SuggestionType::Logs, "api", Priority::Low, 0.9)]);
        let surfaced_at = engine.last_surfaced_at();

        let events = engine.set_enabled(false);
        assert_eq!(events, vec![RenderEvent::HideToast { suggestion_id: "b".to_string() }]);
        assert!(engine.process_batch(&[suggestion("c", SuggestionType::Logs, "x", Priority::Low, 0.9)]).is_empty());

        engine.set_enabled(true);
        assert_eq!(engine.last_surfaced_at(), surfaced_at);
        assert!(engine.dismissed_topics().contains("alert:db"));
    }

    #[test]
    fn test_audio_toggle() {
        let (mut engine, _clock, port) = engine();
        engine.set_audio_enabled(false);
        let events = engine.process_batch(&[suggestion("a", SuggestionType::Logs, "k", Priority::High, 0.9)]);
        assert!(matches!(&events[0], RenderEvent::ShowToast { cue, .. } if cue.tone.is_none()));
        assert!(port.tones().is_empty());
        assert_eq!(port.haptics().len(), 1);
    }

    #[test]
    fn test_restore_topic() {
        let (mut engine, clock, _port) = engine();
        engine.process_batch(&[suggestion("a", SuggestionType::Alert, "db", Priority::Low, 0.9)]);
        engine.dismiss();

        assert_eq!(
            engine.restore_topic("alert:db"),
            vec![RenderEvent::TopicRestored { topic_key: "alert:db".to_string() }]
        );
        assert!(engine.restore_topic("alert:db").is_empty());

        clock.advance_ms(30_000);
        let events = engine.process_batch(&[suggestion("a3", SuggestionType::Alert, "db", Priority::Low, 0.9)]);
        assert!(matches!(&events[0], RenderEvent::ShowToast { .. }));
    }

    #[test]
    fn test_from_config_respects_threshold_and_toggle() {
        let config = EngineConfig {
            enabled: false,
            audio_enabled: false,
            min_confidence: 0.95,
        };
        let clock = Arc::new(ManualClock::at_millis(0));
        let mut engine = SuggestionEngine::from_config(&config, clock, Arc::new(RecordingCuePort::new()));
        assert!(!engine.is_enabled());
        assert!(!engine.audio_enabled());

        engine.set_enabled(true);
        let events = engine.process_batch(&[suggestion("a", SuggestionType::Logs, "k", Priority::Low, 0.9)]);
        assert!(events.is_empty());
    }
}
