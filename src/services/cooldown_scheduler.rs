//! Global cooldown gate between proactively surfaced suggestions.
//!
//! One gate covers every suggestion type and priority. A failed
//! acquisition is final for the cycle: the batch is not queued.

use chrono::{DateTime, Duration, Utc};

/// Minimum gap between two surfaced suggestions.
pub const COOLDOWN_MS: i64 = 30_000;

#[derive(Debug, Clone, Default)]
pub struct CooldownScheduler {
    last_surfaced_at: Option<DateTime<Utc>>,
}

impl CooldownScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cooldown() -> Duration {
        Duration::milliseconds(COOLDOWN_MS)
    }

    pub fn last_surfaced_at(&self) -> Option<DateTime<Utc>> {
        self.last_surfaced_at
    }

    /// Open the gate at `now` if the cooldown has elapsed.
    ///
    /// A clock that moved backwards keeps the gate closed.
    pub fn try_acquire(&mut self, now: DateTime<Utc>) -> bool {
        if let Some(last) = self.last_surfaced_at {
            let elapsed = now.signed_duration_since(last);
            if elapsed < Self::cooldown() {
                tracing::debug!(
                    elapsed_ms = elapsed.num_milliseconds(),
                    cooldown_ms = COOLDOWN_MS,
                    "cooldown active, not surfacing"
                );
                return false;
            }
        }
        self.last_surfaced_at = Some(now);
        true
    }

    /// Time left before the gate opens again.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        match self.last_surfaced_at {
            Some(last) => (Self::cooldown() - now.signed_duration_since(last)).max(Duration::zero()),
            None => Duration::zero(),
        }
    }
}
