//! Timer and clock abstractions, so waiting can be swapped out in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// An awaitable timer.
#[async_trait]
pub trait Delay: Send + Sync {
    /// Suspend for at least `millis` milliseconds. Zero or negative durations resolve
    /// immediately.
    async fn sleep(&self, millis: i64);
}

/// Suspend for `millis` milliseconds and then yield `value`.
pub async fn delay<D, T>(delay: &D, millis: i64, value: T) -> T
where
    D: Delay + ?Sized,
{
    delay.sleep(millis).await;
    value
}

/// [`Delay`] backed by the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, millis: i64) {
        if millis <= 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(millis as u64)).await;
    }
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
