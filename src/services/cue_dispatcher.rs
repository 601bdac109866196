//! Maps a suggestion priority to an audio tone and haptic pattern.
//!
//! The cue table is fixed:
//!
//! | priority    | tone   | gain | haptic       |
//! |-------------|--------|------|--------------|
//! | critical    | 880 Hz | 0.15 | 50 / 30 / 50 |
//! | high        | 660 Hz | 0.10 | 30           |
//! | medium, low | 523 Hz | 0.08 | 30           |
//!
//! Tones last 150 ms. Haptics do not depend on the audio toggle, and any
//! playback failure is swallowed so the visual event still goes out.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::PlaybackError;
use crate::domain::models::{CueEvent, HapticPattern, Priority, Tone};
use crate::domain::ports::CuePort;

pub const TONE_DURATION_MS: u64 = 150;

pub struct CueDispatcher {
    port: Arc<dyn CuePort>,
}

impl CueDispatcher {
    pub fn new(port: Arc<dyn CuePort>) -> Self {
        Self { port }
    }

    pub fn tone_for(priority: Priority) -> Tone {
        let (frequency_hz, gain) = match priority {
            Priority::Critical => (880.0, 0.15),
            Priority::High => (660.0, 0.10),
            Priority::Medium | Priority::Low => (523.0, 0.08),
        };
        Tone {
            frequency_hz,
            gain,
            duration_ms: TONE_DURATION_MS,
        }
    }

    pub fn haptic_for(priority: Priority) -> HapticPattern {
        match priority {
            Priority::Critical => HapticPattern(vec![50, 30, 50]),
            Priority::High | Priority::Medium | Priority::Low => HapticPattern(vec![30]),
        }
    }

    /// Play the cue for `priority` and return the event describing it.
    pub fn dispatch(&self, priority: Priority, audio_enabled: bool) -> CueEvent {
        let tone = audio_enabled.then(|| Self::tone_for(priority));
        let haptic = Self::haptic_for(priority);

        if let Some(ref t) = tone {
            if let Err(e) = self.port.play_tone(t) {
                log_playback_failure(&e);
            }
        }
        if let Err(e) = self.port.vibrate(&haptic) {
            log_playback_failure(&e);
        }

        CueEvent {
            id: Uuid::new_v4(),
            priority,
            tone,
            haptic,
        }
    }
}

fn log_playback_failure(err: &PlaybackError) {
    match err {
        PlaybackError::Unsupported(_) => {}
        PlaybackError::Failed { .. } => tracing::debug!(error = %err, "cue playback failed"),
    }
}
