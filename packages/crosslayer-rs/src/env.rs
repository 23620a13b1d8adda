//! Environment configuration helpers
//!
//! Every command reads its configuration from environment variables. The
//! required set is checked up front so a command exits before it touches
//! the network.

use std::env;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// One or more required variables are unset or empty
    #[error("missing required environment variables: {}", .names.join(", "))]
    Missing { names: Vec<String> },

    /// A variable is set but cannot be parsed
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: String, reason: String },
}

/// Check that every listed variable is set to a non-empty value.
///
/// All missing names are reported together, in the order given.
pub fn require_env_vars(names: &[&str]) -> Result<(), EnvError> {
    let missing: Vec<String> = names
        .iter()
        .filter(|name| {
            env::var(name)
                .map(|v| v.trim().is_empty())
                .unwrap_or(true)
        })
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(EnvError::Missing { names: missing })
    }
}

/// Read a variable that [`require_env_vars`] has already checked.
pub fn required(name: &str) -> Result<String, EnvError> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.trim().to_string())
        .ok_or_else(|| EnvError::Missing {
            names: vec![name.to_string()],
        })
}

/// Read an optional variable, treating empty values as unset.
pub fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an optional variable, falling back to `default` when unset.
pub fn parse_or<T>(name: &str, default: T) -> Result<T, EnvError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match optional(name) {
        Some(raw) => raw.parse().map_err(|e: T::Err| EnvError::Invalid {
            name: name.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Load a `.env` file from the working directory (or a parent) if present.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from {:?}", path);
    }
}

/// Log the title banner printed at the start of each script.
pub fn banner(title: &str) {
    let rule = "=".repeat(title.len() + 8);
    info!("{}", rule);
    info!("    {}    ", title);
    info!("{}", rule);
}
