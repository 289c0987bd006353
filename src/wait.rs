use crate::{
    command::{parse_var, Until},
    poll::Poller,
    query::{ConditionalQuery, QueryResult},
    Config, Result,
};
use log::info;
use serde_json::Value;
use std::{num::NonZeroU32, path::PathBuf};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub struct WaitOptions {
    #[structopt(long, parse(from_os_str))]
    /// file containing the GraphQL query, which must select `rateLimit { cost remaining resetAt }`
    query: PathBuf,

    #[structopt(long = "var", number_of_values = 1, parse(try_from_str = parse_var))]
    /// extra query variable as `key=value`, in addition to `owner`, `repo` and `branch`
    vars: Vec<(String, Value)>,

    #[structopt(long)]
    /// stop once the value at this json pointer into the response equals the given value,
    /// e.g. `/repository/ref/target/status/state=SUCCESS`
    until: Until,

    #[structopt(long)]
    /// give up after this many attempts
    max_attempts: Option<NonZeroU32>,
}

/// Poll the query in `options.query` and return the accepted response, without `rateLimit`.
pub async fn run_wait(config: &Config, options: &WaitOptions) -> Result<Value> {
    let document = tokio::fs::read_to_string(&options.query).await?;
    wait_for(config, &document, options).await
}

async fn wait_for(config: &Config, document: &str, options: &WaitOptions) -> Result<Value> {
    let mut variables = config.variables();
    for (key, value) in &options.vars {
        variables.insert(key.clone(), value.clone());
    }

    info!(
        "waiting on {}/{}@{} until {} is {}",
        config.owner(),
        config.repo(),
        config.branch(),
        options.until.pointer(),
        options.until.expected()
    );

    let query = ConditionalQuery::new(config.github_client()?);
    let poller = Poller::new(query, config.retry_interval()).max_attempts(options.max_attempts);

    let until = &options.until;
    let result: QueryResult<Value> = poller
        .poll_until(document, &variables, |r: &QueryResult<Value>| {
            until.matches(&r.data)
        })
        .await?;

    Ok(result.data)
}
