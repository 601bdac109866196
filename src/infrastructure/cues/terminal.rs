//! Cue adapter for terminal hosts.
//!
//! A terminal has no tone generator or vibration motor: tones ring the
//! bell (BEL) on stderr, and haptics report `Unsupported`, which the
//! dispatcher treats as a silent no-op.

use std::io::{self, Write};

use crate::domain::errors::PlaybackError;
use crate::domain::models::{HapticPattern, Tone};
use crate::domain::ports::CuePort;

const BELL: &[u8] = b"\x07";

#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalCuePort;

impl TerminalCuePort {
    pub fn new() -> Self {
        Self
    }
}

impl CuePort for TerminalCuePort {
    fn play_tone(&self, tone: &Tone) -> Result<(), PlaybackError> {
        tracing::trace!(frequency_hz = tone.frequency_hz, gain = tone.gain, "ringing terminal bell");
        let mut stderr = io::stderr().lock();
        stderr
            .write_all(BELL)
            .and_then(|()| stderr.flush())
            .map_err(|e| PlaybackError::Failed {
                facility: "audio",
                reason: e.to_string(),
            })
    }

    fn vibrate(&self, _pattern: &HapticPattern) -> Result<(), PlaybackError> {
        Err(PlaybackError::Unsupported("haptic"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haptics_unsupported() {
        let port = TerminalCuePort::new();
        assert_eq!(
            port.vibrate(&HapticPattern(vec![30])),
            Err(PlaybackError::Unsupported("haptic"))
        );
    }
}
