pub mod client;
pub mod config;
pub mod error;
pub mod milliunits;
pub mod models;
pub mod ops;

pub use client::{ApiResponse, HttpMethod, Transport, YnabClient};
pub use config::Config;
pub use error::{ApiError, ClientError, ConfigError};
