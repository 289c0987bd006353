use github::{client::Variables, Client};
use serde_json::Value;
use std::{fmt, time::Duration};
use structopt::StructOpt;
use thiserror::Error;

const BRANCH_REF_PREFIX: &str = "refs/heads/";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("input required and not supplied: token")]
    MissingToken,
    #[error("no repository found, expected `owner/repo`")]
    MissingRepository,
    #[error("invalid repository `{0}`, expected `owner/repo`")]
    InvalidRepository(String),
    #[error("no branch found in ref `{reference}`")]
    MissingBranch { reference: String },
    #[error("invalid retry interval `{0}`, expected milliseconds")]
    InvalidRetryInterval(String),
}

/// Raw inputs as handed to a GitHub Actions step, either through the
/// environment or on the command line.
#[derive(Clone, Debug, Default, StructOpt)]
pub struct Inputs {
    #[structopt(long, env = "INPUT_TOKEN", hide_env_values = true)]
    /// token used to authenticate against the GitHub API
    pub token: Option<String>,

    #[structopt(long, env = "INPUT_RETRYINTERVAL")]
    /// milliseconds to wait between attempts
    pub retry_interval: Option<String>,

    #[structopt(long, env = "GITHUB_REPOSITORY")]
    /// repository to query, as `owner/repo`
    pub repository: Option<String>,

    #[structopt(long = "ref", env = "GITHUB_REF")]
    /// git ref the branch is taken from, e.g. `refs/heads/main`
    pub reference: Option<String>,

    #[structopt(long, env = "GITHUB_API_URL")]
    /// base url of the GitHub API, for GitHub Enterprise
    pub api_url: Option<String>,
}

/// Validated, read-only configuration for a single run.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    token: String,
    retry_interval: Duration,
    owner: String,
    repo: String,
    branch: String,
    api_url: Option<String>,
}

impl Config {
    /// Validate `inputs`. This does no I/O so the same inputs always resolve the same way.
    pub fn resolve(inputs: &Inputs) -> Result<Self, ConfigError> {
        let token = non_empty(&inputs.token)
            .ok_or(ConfigError::MissingToken)?
            .to_owned();

        let retry_interval = match non_empty(&inputs.retry_interval) {
            Some(interval) => parse_millis(interval)
                .ok_or_else(|| ConfigError::InvalidRetryInterval(interval.to_owned()))?,
            None => Duration::from_millis(0),
        };

        let repository = non_empty(&inputs.repository).ok_or(ConfigError::MissingRepository)?;
        let (owner, repo) = match repository.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                (owner.to_owned(), repo.to_owned())
            }
            _ => return Err(ConfigError::InvalidRepository(repository.to_owned())),
        };

        let reference = inputs.reference.as_deref().unwrap_or_default();
        let branch = branch_from_ref(reference)
            .ok_or_else(|| ConfigError::MissingBranch {
                reference: reference.to_owned(),
            })?
            .to_owned();

        Ok(Self {
            token,
            retry_interval,
            owner,
            repo,
            branch,
            api_url: non_empty(&inputs.api_url).map(str::to_owned),
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    /// The `owner`, `repo` and `branch` variables every query receives.
    pub fn variables(&self) -> Variables {
        let mut variables = Variables::new();
        variables.insert("owner".into(), Value::from(self.owner.as_str()));
        variables.insert("repo".into(), Value::from(self.repo.as_str()));
        variables.insert("branch".into(), Value::from(self.branch.as_str()));
        variables
    }

    pub fn github_client(&self) -> github::client::Result<Client> {
        let mut builder = Client::builder().github_api_token(&self.token);
        if let Some(api_url) = &self.api_url {
            builder = builder.base_url(api_url);
        }
        builder.build()
    }
}

// Keep the token out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"***")
            .field("retry_interval", &self.retry_interval)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("branch", &self.branch)
            .field("api_url", &self.api_url)
            .finish()
    }
}

fn non_empty(input: &Option<String>) -> Option<&str> {
    input.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Milliseconds as any finite, non-negative number, e.g. `250`, `1.5` or `1e3`.
fn parse_millis(s: &str) -> Option<Duration> {
    let millis: f64 = s.parse().ok()?;
    if !millis.is_finite() || millis < 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(millis / 1000.0).ok()
}

/// Everything after the first `refs/heads/` up to the end of the line.
fn branch_from_ref(reference: &str) -> Option<&str> {
    let start = reference.find(BRANCH_REF_PREFIX)? + BRANCH_REF_PREFIX.len();
    let branch = reference[start..].lines().next()?;
    if branch.is_empty() {
        None
    } else {
        Some(branch)
    }
}
