use crate::{
    delay::{Clock, Delay, SystemClock, TokioDelay},
    rate_limit::RateLimitGate,
};
use async_trait::async_trait;
use github::{client::Variables, Client, RateLimit};
use log::debug;
use serde::{de::DeserializeOwned, Deserialize};
use std::sync::Arc;

/// Runs a single GraphQL query. Implementations report transport, authentication and
/// GraphQL level failures through `Self::Error`.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn execute<R>(&self, query: &str, args: &Variables) -> Result<R, Self::Error>
    where
        R: DeserializeOwned + Send + 'static;
}

#[async_trait]
impl QueryExecutor for Client {
    type Error = github::client::Error;

    async fn execute<R>(&self, query: &str, args: &Variables) -> Result<R, Self::Error>
    where
        R: DeserializeOwned + Send + 'static,
    {
        self.graphql().query(query, args).await
    }
}

#[async_trait]
impl<E: QueryExecutor + ?Sized> QueryExecutor for Arc<E> {
    type Error = E::Error;

    async fn execute<R>(&self, query: &str, args: &Variables) -> Result<R, Self::Error>
    where
        R: DeserializeOwned + Send + 'static,
    {
        (**self).execute(query, args).await
    }
}

/// A query response that carries GitHub's `rateLimit` envelope.
pub trait HasRateLimit {
    fn rate_limit(&self) -> &RateLimit;
}

/// A response of `T`'s fields next to a `rateLimit` selection.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct QueryResult<T> {
    #[serde(rename = "rateLimit")]
    pub rate_limit: RateLimit,
    #[serde(flatten)]
    pub data: T,
}

impl<T> HasRateLimit for QueryResult<T> {
    fn rate_limit(&self) -> &RateLimit {
        &self.rate_limit
    }
}

/// Runs a query once, respects the rate limit it reports, and only hands the result
/// back when the caller's predicate accepts it.
#[derive(Debug)]
pub struct ConditionalQuery<E, C = SystemClock, D = TokioDelay> {
    executor: E,
    gate: RateLimitGate<C, D>,
}

impl<E: QueryExecutor> ConditionalQuery<E> {
    pub fn new(executor: E) -> Self {
        Self::with_gate(executor, RateLimitGate::new())
    }
}

impl<E, C, D> ConditionalQuery<E, C, D>
where
    E: QueryExecutor,
    C: Clock,
    D: Delay,
{
    pub fn with_gate(executor: E, gate: RateLimitGate<C, D>) -> Self {
        Self { executor, gate }
    }

    pub fn delay(&self) -> &D {
        self.gate.delay()
    }

    /// Execute `query` exactly once.
    ///
    /// Returns `Ok(Some(result))` when `predicate` accepts the result and `Ok(None)` when it
    /// doesn't. Any rate limit wait has finished before the predicate runs. Errors from the
    /// executor are returned as is, without waiting or evaluating the predicate.
    pub async fn try_get_result<R, F>(
        &self,
        query: &str,
        args: &Variables,
        predicate: F,
    ) -> Result<Option<R>, E::Error>
    where
        R: HasRateLimit + DeserializeOwned + Send + 'static,
        F: FnOnce(&R) -> bool,
    {
        let result: R = self.executor.execute(query, args).await?;

        self.gate.enforce(result.rate_limit()).await;

        if predicate(&result) {
            debug!("query result accepted");
            Ok(Some(result))
        } else {
            debug!("query result not accepted yet");
            Ok(None)
        }
    }
}
