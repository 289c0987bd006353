//! Poll GitHub's GraphQL API until a query result satisfies a condition, without
//! overrunning the account's rate limit.

mod command;
mod config;
mod delay;
mod error;
mod poll;
mod query;
mod rate_limit;
mod wait;

#[cfg(test)]
mod test_util;

pub use command::{parse_var, Until};
pub use config::{Config, ConfigError, Inputs};
pub use delay::{delay, Clock, Delay, SystemClock, TokioDelay};
pub use error::{Error, Result};
pub use poll::Poller;
pub use query::{ConditionalQuery, HasRateLimit, QueryExecutor, QueryResult};
pub use rate_limit::RateLimitGate;
pub use wait::{run_wait, WaitOptions};
