use crate::delay::{delay, Clock, Delay, SystemClock, TokioDelay};
use github::RateLimit;
use log::{debug, info};

/// Holds callers back until GitHub's GraphQL rate limit resets.
///
/// Only the envelope handed to [`RateLimitGate::enforce`] is considered; there is no
/// bookkeeping across calls.
#[derive(Debug, Default)]
pub struct RateLimitGate<C = SystemClock, D = TokioDelay> {
    clock: C,
    delay: D,
}

impl RateLimitGate {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock, D: Delay> RateLimitGate<C, D> {
    pub fn with_clock_and_delay(clock: C, delay: D) -> Self {
        Self { clock, delay }
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Milliseconds until `rate_limit` resets, or `None` if the remaining budget still
    /// covers another query of the same cost. Negative when the reset is already past.
    pub fn wait_millis(&self, rate_limit: &RateLimit) -> Option<i64> {
        if rate_limit.is_sufficient() {
            return None;
        }

        Some((rate_limit.reset_at - self.clock.now()).num_milliseconds())
    }

    /// Wait out the rate limit if its budget is exhausted. Waits at most once.
    pub async fn enforce(&self, rate_limit: &RateLimit) {
        let wait = match self.wait_millis(rate_limit) {
            Some(wait) => wait,
            None => {
                debug!(
                    "rate limit ok: {} remaining, last query cost {}",
                    rate_limit.remaining, rate_limit.cost
                );
                return;
            }
        };

        info!(
            "rate limit exhausted ({} remaining, last query cost {}), waiting {}ms until {}",
            rate_limit.remaining, rate_limit.cost, wait, rate_limit.reset_at
        );
        delay(&self.delay, wait, ()).await
    }
}
