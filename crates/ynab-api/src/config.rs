use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://api.ynab.com/v1";

const TOKEN_VAR: &str = "YNAB_API_TOKEN";
const BASE_URL_VAR: &str = "YNAB_API_BASE_URL";
const TIMEOUT_VAR: &str = "YNAB_HTTP_TIMEOUT_SECS";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Process-level configuration, read once at startup. A missing token is
/// fatal before any tool is registered, never a per-call error.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_token: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            env::var(TOKEN_VAR).ok(),
            env::var(BASE_URL_VAR).ok(),
            env::var(TIMEOUT_VAR).ok(),
        )
    }

    fn from_vars(
        token: Option<String>,
        base_url: Option<String>,
        timeout_secs: Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_token = token
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let base_url = base_url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match timeout_secs {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    name: TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_token,
            base_url,
            timeout,
        })
    }
}
