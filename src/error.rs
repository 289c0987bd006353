use crate::config::ConfigError;
use std::io;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("github error: {0}")]
    Github(#[from] github::client::Error),
    #[error("Io error")]
    Io(#[from] io::Error),
    #[error("json error")]
    Json(#[from] serde_json::Error),
    #[error("condition not satisfied after {0} attempts")]
    AttemptsExhausted(u32),
}
