//! Infrastructure layer
//!
//! Adapters and ambient concerns for the application shell:
//! configuration, logging, the HTTP suggestion source and host cues.

pub mod config;
pub mod cues;
pub mod http;
pub mod logging;
