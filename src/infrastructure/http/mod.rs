//! HTTP adapters for the platform API.

pub mod suggestions_client;

pub use suggestions_client::{decode_batch, HttpSuggestionSource, SUGGESTIONS_PATH};
