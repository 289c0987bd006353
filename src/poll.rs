use crate::{
    delay::{delay, Clock, Delay, SystemClock, TokioDelay},
    query::{ConditionalQuery, HasRateLimit, QueryExecutor},
    Error, Result,
};
use github::client::Variables;
use log::info;
use serde::de::DeserializeOwned;
use std::{convert::TryFrom, num::NonZeroU32, time::Duration};

/// Re-runs a [`ConditionalQuery`] until its predicate is satisfied.
#[derive(Debug)]
pub struct Poller<E, C = SystemClock, D = TokioDelay> {
    query: ConditionalQuery<E, C, D>,
    retry_interval: Duration,
    max_attempts: Option<NonZeroU32>,
}

impl<E, C, D> Poller<E, C, D>
where
    E: QueryExecutor,
    Error: From<E::Error>,
    C: Clock,
    D: Delay,
{
    pub fn new(query: ConditionalQuery<E, C, D>, retry_interval: Duration) -> Self {
        Self {
            query,
            retry_interval,
            max_attempts: None,
        }
    }

    /// Give up with [`Error::AttemptsExhausted`] after this many rejected results.
    pub fn max_attempts(mut self, max_attempts: Option<NonZeroU32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn query(&self) -> &ConditionalQuery<E, C, D> {
        &self.query
    }

    /// Query until `predicate` accepts a result, sleeping `retry_interval` between
    /// attempts. The first error from the executor ends polling.
    pub async fn poll_until<R, F>(&self, query: &str, args: &Variables, predicate: F) -> Result<R>
    where
        R: HasRateLimit + DeserializeOwned + Send + 'static,
        F: Fn(&R) -> bool,
    {
        let retry_millis = i64::try_from(self.retry_interval.as_millis()).unwrap_or(i64::MAX);
        let mut attempt: u32 = 0;

        loop {
            attempt = attempt.saturating_add(1);

            if let Some(result) = self.query.try_get_result(query, args, &predicate).await? {
                info!("condition satisfied after {} attempt(s)", attempt);
                return Ok(result);
            }

            if let Some(max_attempts) = self.max_attempts {
                if attempt >= max_attempts.get() {
                    return Err(Error::AttemptsExhausted(attempt));
                }
            }

            info!(
                "condition not satisfied on attempt {}, retrying in {:?}",
                attempt, self.retry_interval
            );
            delay(self.query.delay(), retry_millis, ()).await;
        }
    }
}

#[cfg(test)]
mod test {
    use super::Poller;
    use crate::{
        query::{ConditionalQuery, QueryResult},
        rate_limit::RateLimitGate,
        test_util::{rate_limit, FixedClock, RecordingDelay, StubExecutor},
        Error,
    };
    use chrono::Duration;
    use github::client::Variables;
    use serde::Deserialize;
    use serde_json::{json, Value};
    use std::{num::NonZeroU32, sync::Arc, time};

    #[derive(Debug, Deserialize)]
    struct Status {
        state: String,
    }

    type StatusResult = QueryResult<Status>;

    fn status(state: &str) -> Result<Value, &'static str> {
        Ok(json!({
            "rateLimit": rate_limit(1, 4000, Duration::minutes(20)),
            "state": state,
        }))
    }

    fn poller(
        executor: &Arc<StubExecutor>,
    ) -> Poller<Arc<StubExecutor>, FixedClock, RecordingDelay> {
        let gate =
            RateLimitGate::with_clock_and_delay(FixedClock::default(), RecordingDelay::default());
        Poller::new(
            ConditionalQuery::with_gate(executor.clone(), gate),
            time::Duration::from_millis(500),
        )
    }

    fn is_success(r: &StatusResult) -> bool {
        r.data.state == "SUCCESS"
    }

    #[tokio::test]
    async fn polls_until_satisfied() {
        let executor =
            StubExecutor::new(vec![status("PENDING"), status("PENDING"), status("SUCCESS")]);
        let poller = poller(&executor);

        let result = poller
            .poll_until("query", &Variables::new(), is_success)
            .await
            .unwrap();
        assert_eq!(result.data.state, "SUCCESS");
        assert_eq!(executor.calls(), 3);
        assert_eq!(poller.query().delay().sleeps(), vec![500, 500]);
    }

    #[tokio::test]
    async fn first_attempt_is_not_delayed() {
        let executor = StubExecutor::new(vec![status("SUCCESS")]);
        let poller = poller(&executor);

        poller
            .poll_until("query", &Variables::new(), is_success)
            .await
            .unwrap();
        assert_eq!(executor.calls(), 1);
        assert!(poller.query().delay().sleeps().is_empty());
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let executor = StubExecutor::new(vec![status("PENDING"), status("PENDING")]);
        let poller = poller(&executor).max_attempts(NonZeroU32::new(2));

        let err = poller
            .poll_until("query", &Variables::new(), is_success)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AttemptsExhausted(2)));
        assert_eq!(executor.calls(), 2);
        assert_eq!(poller.query().delay().sleeps(), vec![500]);
    }

    #[tokio::test]
    async fn transport_error_stops_polling() {
        let executor = StubExecutor::new(vec![status("PENDING"), Err("bad credentials")]);
        let poller = poller(&executor);

        let err = poller
            .poll_until("query", &Variables::new(), is_success)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Github(_)));
        assert_eq!(executor.calls(), 2);
        assert_eq!(poller.query().delay().sleeps(), vec![500]);
    }
}
