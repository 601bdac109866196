//! Host cue adapters.

pub mod terminal;

pub use terminal::TerminalCuePort;
