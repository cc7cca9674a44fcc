//! Configuration loading from the process environment.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::schema::RuntimeConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("expecting envar {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for envar {name}")]
    Invalid { name: &'static str, value: String },
}

/// Load the runtime configuration from environment variables.
///
/// `BN_FUNCTION` and `BN_ENTRYPOINT` are required; `BOLT_PORT` and
/// `BN_LOGDIR` fall back to their defaults.
pub fn from_env() -> Result<RuntimeConfig, ConfigError> {
    let port = match env::var("BOLT_PORT") {
        Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
            name: "BOLT_PORT",
            value: raw,
        })?,
        Err(_) => 80,
    };

    Ok(RuntimeConfig {
        port,
        function: required("BN_FUNCTION")?,
        entrypoint: required("BN_ENTRYPOINT")?,
        log_dir: PathBuf::from(optional("BN_LOGDIR", "/logs")),
    })
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn optional(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
