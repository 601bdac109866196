//! Domain layer for the beacon notification core
//!
//! Models, error taxonomy and the ports the services depend on.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{PlaybackError, TransportError, TransportResult, ValidationError};
