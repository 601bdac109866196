//! Cancellable fire-once timer for use inside `tokio::select!` loops.

use std::future::pending;
use std::pin::Pin;
use std::time::Duration;

use tokio::time::{sleep, Sleep};

/// A single pending deadline carrying a tag.
///
/// `start` re-arms (replacing any pending deadline), `cancel` disarms, and
/// [`fired`](Timer::fired) resolves once with the tag and then disarms.
/// Awaiting an idle timer never resolves, so it can sit in a `select!`
/// branch unconditionally. `fired` is cancel-safe: the deadline lives in the
/// timer, not in the future.
#[derive(Debug)]
pub struct Timer<T> {
    sleep: Option<Pin<Box<Sleep>>>,
    tag: Option<T>,
}

impl<T> Default for Timer<T> {
    fn default() -> Self {
        Self::idle()
    }
}

impl<T> Timer<T> {
    pub fn idle() -> Self {
        Self {
            sleep: None,
            tag: None,
        }
    }

    pub fn start(&mut self, after: Duration, tag: T) {
        self.sleep = Some(Box::pin(sleep(after)));
        self.tag = Some(tag);
    }

    pub fn cancel(&mut self) {
        self.sleep = None;
        self.tag = None;
    }

    pub fn is_armed(&self) -> bool {
        self.sleep.is_some()
    }

    pub fn tag(&self) -> Option<&T> {
        self.tag.as_ref()
    }

    pub async fn fired(&mut self) -> T {
        match (self.sleep.as_mut(), self.tag.is_some()) {
            (Some(deadline), true) => {
                deadline.as_mut().await;
                self.sleep = None;
                match self.tag.take() {
                    Some(tag) => tag,
                    None => pending().await,
                }
            }
            _ => pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_with_tag() {
        let mut timer = Timer::idle();
        timer.start(Duration::from_millis(5_000), "toast-1");
        assert!(timer.is_armed());

        let tag = timer.fired().await;
        assert_eq!(tag, "toast-1");
        assert!(!timer.is_armed());

        let again = tokio::time::timeout(Duration::from_secs(60), timer.fired()).await;
        assert!(again.is_err(), "disarmed timer must not fire again");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_fires() {
        let mut timer = Timer::idle();
        timer.start(Duration::from_millis(10), 1u32);
        timer.cancel();

        let result = tokio::time::timeout(Duration::from_secs(60), timer.fired()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_deadline() {
        let mut timer = Timer::idle();
        timer.start(Duration::from_millis(10), "a");
        timer.start(Duration::from_millis(20), "b");
        assert_eq!(timer.fired().await, "b");
    }
}
