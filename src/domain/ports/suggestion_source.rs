use async_trait::async_trait;

use crate::domain::errors::TransportResult;
use crate::domain::models::ContextSuggestion;

/// Port for fetching the current batch of candidate suggestions.
///
/// One call per poll cycle. An error skips the cycle; nothing is retried
/// until the next scheduled poll.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn fetch(&self) -> TransportResult<Vec<ContextSuggestion>>;
}
