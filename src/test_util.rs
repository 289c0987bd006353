//! Test doubles for the clock, the timer and the query transport.

use crate::{
    delay::{Clock, Delay},
    query::QueryExecutor,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use github::client::{Error, Variables};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 3, 28, 17, 0, 0).unwrap()
}

/// A clock that never advances
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(epoch())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Records every requested sleep and returns right away.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    sleeps: Mutex<Vec<i64>>,
}

impl RecordingDelay {
    pub fn sleeps(&self) -> Vec<i64> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Delay for RecordingDelay {
    async fn sleep(&self, millis: i64) {
        self.sleeps.lock().unwrap().push(millis);
    }
}

/// Rate limit json that resets `reset_in` after `epoch()`
pub fn rate_limit(cost: u64, remaining: u64, reset_in: Duration) -> Value {
    json!({
        "cost": cost,
        "remaining": remaining,
        "resetAt": (epoch() + reset_in).to_rfc3339(),
    })
}

/// Hands out queued responses, one per call.
#[derive(Debug, Default)]
pub struct StubExecutor {
    responses: Mutex<VecDeque<Result<Value, &'static str>>>,
    calls: AtomicUsize,
}

impl StubExecutor {
    pub fn new<I>(responses: I) -> Arc<Self>
    where
        I: IntoIterator<Item = Result<Value, &'static str>>,
    {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryExecutor for StubExecutor {
    type Error = Error;

    async fn execute<R>(&self, _query: &str, _args: &Variables) -> Result<R, Self::Error>
    where
        R: DeserializeOwned + Send + 'static,
    {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no more stubbed responses")?;
        Ok(serde_json::from_value(response)?)
    }
}
