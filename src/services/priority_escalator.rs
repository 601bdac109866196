//! Presentation tier classification and the display state machine.
//!
//! ```text
//!   Idle --surface(non-critical)--> Toast --click--> Expanded
//!   Idle --surface(critical)------> Expanded (auto, toast shown as well)
//!   Toast --timeout--> Idle
//!   Toast | Expanded --dismiss--> Idle   (topic dismissed)
//!   Expanded --select(other)--> Idle     (topic dismissed)
//! ```
//!
//! Only one suggestion is displayed at a time and a new candidate never
//! preempts the displayed one.

use serde::Serialize;

use crate::domain::models::{ContextSuggestion, PresentationTier, Priority};

/// How long a toast stays up without interaction.
pub const TOAST_TIMEOUT_MS: u64 = 5_000;

/// Current display state for the single active suggestion slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DisplayState {
    #[default]
    Idle,
    Toast {
        suggestion: ContextSuggestion,
    },
    Expanded {
        suggestion: ContextSuggestion,
        /// Opened without a click because the suggestion was critical.
        auto: bool,
    },
}

#[derive(Debug, Clone, Default)]
pub struct PriorityEscalator {
    state: DisplayState,
}

impl PriorityEscalator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tier for a suggestion that has passed the filter and cooldown.
    pub fn classify(suggestion: &ContextSuggestion) -> PresentationTier {
        match suggestion.priority {
            Priority::Critical => PresentationTier::AutoExpand,
            Priority::High | Priority::Medium | Priority::Low => PresentationTier::Toast,
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DisplayState::Idle)
    }

    pub fn displayed(&self) -> Option<&ContextSuggestion> {
        match &self.state {
            DisplayState::Idle => None,
            DisplayState::Toast { suggestion } | DisplayState::Expanded { suggestion, .. } => {
                Some(suggestion)
            }
        }
    }

    /// Id of the suggestion currently shown as a toast, if any.
    pub fn toast_id(&self) -> Option<&str> {
        match &self.state {
            DisplayState::Toast { suggestion } => Some(&suggestion.id),
            _ => None,
        }
    }

    /// Show a suggestion. Returns `None` without changing state when the
    /// slot is already occupied.
    pub fn surface(&mut self, suggestion: ContextSuggestion) -> Option<PresentationTier> {
        if !self.is_idle() {
            return None;
        }
        let tier = Self::classify(&suggestion);
        self.state = if tier == PresentationTier::AutoExpand {
            DisplayState::Expanded {
                suggestion,
                auto: true,
            }
        } else {
            DisplayState::Toast { suggestion }
        };
        Some(tier)
    }

    /// Toast -> Expanded on user click.
    pub fn click(&mut self) -> Option<&ContextSuggestion> {
        if !matches!(self.state, DisplayState::Toast { .. }) {
            return None;
        }
        if let DisplayState::Toast { suggestion } = std::mem::take(&mut self.state) {
            self.state = DisplayState::Expanded {
                suggestion,
                auto: false,
            };
        }
        self.displayed()
    }

    /// Toast -> Idle when its timeout fires. A stale id is ignored.
    pub fn expire(&mut self, suggestion_id: &str) -> Option<ContextSuggestion> {
        if self.toast_id() != Some(suggestion_id) {
            return None;
        }
        self.take_displayed()
    }

    /// Toast | Expanded -> Idle. The caller records the dismissed topic.
    pub fn dismiss(&mut self) -> Option<ContextSuggestion> {
        self.take_displayed()
    }

    /// Selecting the toast expands it; selecting a different suggestion
    /// while one is expanded dismisses the expanded one.
    pub fn select(&mut self, suggestion_id: &str) -> SelectOutcome {
        let (expand, dismiss) = match &self.state {
            DisplayState::Idle => (false, false),
            DisplayState::Toast { suggestion } => (suggestion.id == suggestion_id, false),
            DisplayState::Expanded { suggestion, .. } => (false, suggestion.id != suggestion_id),
        };

        if expand {
            if let Some(s) = self.click() {
                return SelectOutcome::Expanded(s.clone());
            }
        } else if dismiss {
            if let Some(s) = self.take_displayed() {
                return SelectOutcome::Dismissed(s);
            }
        }
        SelectOutcome::Unchanged
    }

    /// Clear the slot without counting it as a dismissal.
    pub fn hide(&mut self) -> Option<ContextSuggestion> {
        self.take_displayed()
    }

    fn take_displayed(&mut self) -> Option<ContextSuggestion> {
        match std::mem::take(&mut self.state) {
            DisplayState::Idle => None,
            DisplayState::Toast { suggestion } | DisplayState::Expanded { suggestion, .. } => {
                Some(suggestion)
            }
        }
    }
}

/// Result of [`PriorityEscalator::select`].
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    Expanded(ContextSuggestion),
    Dismissed(ContextSuggestion),
    Unchanged,
}
