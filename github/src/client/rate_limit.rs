use chrono::{DateTime, Utc};
use serde::Deserialize;

/// The `rateLimit` object GitHub's GraphQL API reports alongside a query.
///
/// Authenticated requests are limited to 5,000 points per hour and each query
/// reports how many points it cost. The selection to request is:
///
/// ```graphql
/// rateLimit { cost remaining resetAt }
/// ```
///
/// GitHub API docs: https://docs.github.com/en/graphql/overview/resource-limitations
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    /// Points charged for the query that produced this envelope
    pub cost: u64,
    /// Points left in the current window
    pub remaining: u64,
    /// When the window resets and `remaining` is restored
    pub reset_at: DateTime<Utc>,
}

impl RateLimit {
    /// Whether another query of the same cost still fits in the current window.
    pub fn is_sufficient(&self) -> bool {
        self.remaining >= self.cost
    }
}
