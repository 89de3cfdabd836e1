//! Function configuration
//!
//! Read once per cold start and handed to the store and endpoints
//! explicitly.

use std::{env, str::FromStr};
use thiserror::Error;

/// Primary variable holding the notes table name
pub const TABLE_NAME_VAR: &str = "notesTableName";
/// Accepted fallback for [`TABLE_NAME_VAR`]
pub const TABLE_NAME_FALLBACK_VAR: &str = "NOTES_TABLE_NAME";
/// Selects where the caller's identity is read from
pub const IDENTITY_SOURCE_VAR: &str = "NOTES_IDENTITY_SOURCE";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("missing table name: set `{}` or `{}`", TABLE_NAME_VAR, TABLE_NAME_FALLBACK_VAR)]
    MissingTableName,

    #[error("unknown identity source `{0}`, expected `cognito` or `query`")]
    UnknownIdentitySource(String),
}

/// Where list, get, create and update read the owning user from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    /// Cognito identity id attached by API Gateway.
    Cognito,
    /// The `userId` query parameter. Unauthenticated; opt-in only.
    QueryParameter,
}

impl Default for IdentitySource {
    fn default() -> Self {
        IdentitySource::Cognito
    }
}

impl FromStr for IdentitySource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cognito" => Ok(IdentitySource::Cognito),
            "query" => Ok(IdentitySource::QueryParameter),
            other => Err(ConfigError::UnknownIdentitySource(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub table_name: String,
    pub identity: IdentitySource,
}

impl Config {
    pub fn new(table_name: impl Into<String>) -> Self {
        Config {
            table_name: table_name.into(),
            identity: IdentitySource::default(),
        }
    }

    pub fn with_identity(mut self, identity: IdentitySource) -> Self {
        self.identity = identity;
        self
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let table_name = present(TABLE_NAME_VAR)
            .or_else(|| present(TABLE_NAME_FALLBACK_VAR))
            .ok_or(ConfigError::MissingTableName)?;
        let identity = match present(IDENTITY_SOURCE_VAR) {
            Some(source) => source.parse()?,
            None => IdentitySource::default(),
        };

        Ok(Config { table_name, identity })
    }
}
