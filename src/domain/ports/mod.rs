//! Port trait definitions (Hexagonal Architecture)
//!
//! - Clock: wall-clock time for the cooldown gate
//! - CuePort: host audio and haptic facilities
//! - SuggestionSource: the polled suggestion feed
//!
//! These traits let the engine run against fakes in tests and against
//! real adapters in the application shell.

pub mod clock;
pub mod cue_port;
pub mod suggestion_source;

pub use clock::{Clock, ManualClock, SystemClock};
pub use cue_port::{CuePort, NullCuePort, RecordedCue, RecordingCuePort};
pub use suggestion_source::SuggestionSource;
