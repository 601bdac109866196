//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - pretty or JSON console output on stderr
//! - optional daily-rotated JSON file output via tracing-appender

pub mod logger;

pub use logger::LoggerImpl;
