use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error body the provider attaches to rejected requests.
///
/// This is data, not a fault: operations hand it back to the caller
/// unchanged so the tool surface can serialize it as a normal result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub detail: String,
}

/// Faults the caller does not recover from locally. Anything here means
/// either the network/HTTP layer failed without a structured error body,
/// or the provider broke its response contract.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} without a structured error body: {body}")]
    Http { status: u16, body: String },

    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing YNAB_API_TOKEN environment variable")]
    MissingToken,

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}
