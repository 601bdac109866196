use std::sync::Mutex;

use crate::domain::errors::PlaybackError;
use crate::domain::models::{HapticPattern, Tone};

/// Port for host audio and haptic facilities.
///
/// The engine never touches platform APIs directly; adapters implement
/// this trait. Returning [`PlaybackError::Unsupported`] is how an adapter
/// reports a missing facility.
pub trait CuePort: Send + Sync {
    fn play_tone(&self, tone: &Tone) -> Result<(), PlaybackError>;

    fn vibrate(&self, pattern: &HapticPattern) -> Result<(), PlaybackError>;
}

/// Adapter that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCuePort;

impl CuePort for NullCuePort {
    fn play_tone(&self, _tone: &Tone) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn vibrate(&self, _pattern: &HapticPattern) -> Result<(), PlaybackError> {
        Ok(())
    }
}

/// A call observed by [`RecordingCuePort`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCue {
    Tone(Tone),
    Haptic(HapticPattern),
}

/// Adapter that records every call, optionally failing each one.
#[derive(Debug, Default)]
pub struct RecordingCuePort {
    calls: Mutex<Vec<RecordedCue>>,
    fail_tones: bool,
    fail_haptics: bool,
}

impl RecordingCuePort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record calls but report every tone as failed.
    pub fn failing_tones(mut self) -> Self {
        self.fail_tones = true;
        self
    }

    /// Record calls but report haptics as unsupported.
    pub fn without_haptics(mut self) -> Self {
        self.fail_haptics = true;
        self
    }

    pub fn calls(&self) -> Vec<RecordedCue> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn tones(&self) -> Vec<Tone> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RecordedCue::Tone(t) => Some(t),
                RecordedCue::Haptic(_) => None,
            })
            .collect()
    }

    pub fn haptics(&self) -> Vec<HapticPattern> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RecordedCue::Haptic(h) => Some(h),
                RecordedCue::Tone(_) => None,
            })
            .collect()
    }

    fn record(&self, cue: RecordedCue) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(cue);
        }
    }
}

impl CuePort for RecordingCuePort {
    fn play_tone(&self, tone: &Tone) -> Result<(), PlaybackError> {
        self.record(RecordedCue::Tone(*tone));
        if self.fail_tones {
            return Err(PlaybackError::Failed {
                facility: "audio",
                reason: "output device unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn vibrate(&self, pattern: &HapticPattern) -> Result<(), PlaybackError> {
        self.record(RecordedCue::Haptic(pattern.clone()));
        if self.fail_haptics {
            return Err(PlaybackError::Unsupported("haptic"));
        }
        Ok(())
    }
}
