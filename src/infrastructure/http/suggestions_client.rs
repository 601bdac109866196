//! HTTP adapter for the context suggestions polling endpoint.
//!
//! Wraps `GET /api/context/suggestions`. Entries that fail to decode are
//! skipped one by one so a single malformed suggestion does not cost the
//! whole batch.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::domain::errors::{TransportError, TransportResult};
use crate::domain::models::{ApiConfig, ContextSuggestion};
use crate::domain::ports::SuggestionSource;

/// Path of the polling endpoint, relative to the API base URL.
pub const SUGGESTIONS_PATH: &str = "/api/context/suggestions";

/// Suggestion source backed by the platform HTTP API.
#[derive(Debug, Clone)]
pub struct HttpSuggestionSource {
    http: Client,
    url: String,
}

impl HttpSuggestionSource {
    pub fn new(base_url: &str, timeout: Duration) -> TransportResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("beacon/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            url: format!("{}{}", base_url.trim_end_matches('/'), SUGGESTIONS_PATH),
        })
    }

    pub fn from_config(config: &ApiConfig) -> TransportResult<Self> {
        Self::new(
            &config.base_url,
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SuggestionSource for HttpSuggestionSource {
    async fn fetch(&self) -> TransportResult<Vec<ContextSuggestion>> {
        let resp = self.http.get(&self.url).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        let body: Value = resp.json().await?;
        decode_batch(&body)
    }
}

/// Decode a `{ "suggestions": [...] }` envelope, skipping bad entries.
pub fn decode_batch(body: &Value) -> TransportResult<Vec<ContextSuggestion>> {
    let items = match body.get("suggestions") {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(_) => {
            return Err(TransportError::Decode(
                "`suggestions` is not an array".to_string(),
            ))
        }
    };

    let mut batch = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value::<ContextSuggestion>(item.clone()) {
            Ok(suggestion) => batch.push(suggestion),
            Err(e) => tracing::warn!(index, error = %e, "skipping malformed suggestion"),
        }
    }
    Ok(batch)
}
