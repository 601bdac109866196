//! Presentation tiers, cues and the render contract consumed by the UI layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::suggestion::{ContextSuggestion, Priority};

/// How loudly a suggestion is presented.
///
/// `Badge` is never the tier of a surfaced suggestion: it only labels the
/// eligible candidates counted by [`RenderEvent::Badge`]. Surfacing always
/// yields `Toast` or `AutoExpand`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationTier {
    /// Silent counter, no cue.
    Badge,
    /// Transient toast that hides itself after a timeout.
    Toast,
    /// Full detail panel opened without a click.
    AutoExpand,
}

/// An audio tone request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency_hz: f64,
    pub gain: f64,
    pub duration_ms: u64,
}

/// Vibration pattern in milliseconds, alternating on/off and starting with on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HapticPattern(pub Vec<u64>);

impl HapticPattern {
    pub fn pulses(&self) -> &[u64] {
        &self.0
    }
}

/// The cue emitted alongside a surfaced suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CueEvent {
    pub id: Uuid,
    pub priority: Priority,
    /// `None` when audio is disabled.
    pub tone: Option<Tone>,
    pub haptic: HapticPattern,
}

/// Events emitted for external view components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RenderEvent {
    ShowToast {
        suggestion: ContextSuggestion,
        cue: CueEvent,
    },
    AutoExpand {
        suggestion: ContextSuggestion,
    },
    Expand {
        suggestion: ContextSuggestion,
    },
    HideToast {
        suggestion_id: String,
    },
    Dismissed {
        suggestion_id: String,
        topic_key: String,
    },
    /// Eligible candidates this cycle that were not surfaced.
    Badge {
        pending: usize,
    },
    TopicRestored {
        topic_key: String,
    },
}

impl RenderEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShowToast { .. } => "show_toast",
            Self::AutoExpand { .. } => "auto_expand",
            Self::Expand { .. } => "expand",
            Self::HideToast { .. } => "hide_toast",
            Self::Dismissed { .. } => "dismissed",
            Self::Badge { .. } => "badge",
            Self::TopicRestored { .. } => "topic_restored",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_event_tagging() {
        let event = RenderEvent::Dismissed {
            suggestion_id: "s-1".to_string(),
            topic_key: "alert:db".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "dismissed");
        assert_eq!(json["topic_key"], "alert:db");
        assert_eq!(event.name(), "dismissed");
    }

    #[test]
    fn test_haptic_pattern_is_a_plain_array() {
        let json = serde_json::to_value(HapticPattern(vec![50, 30, 50])).unwrap();
        assert_eq!(json, serde_json::json!([50, 30, 50]));
    }
}
