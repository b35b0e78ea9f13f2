//! Token read from an environment variable.

use super::provider::{BearerToken, TokenProvider};
use crate::error::ConfigError;

pub const DEFAULT_TOKEN_VAR: &str = "API_TOKEN";

#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Resolve from an explicit lookup instead of the process environment.
    pub fn token_from<F>(&self, lookup: F) -> Result<BearerToken, ConfigError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        lookup(&self.var)
            .and_then(BearerToken::new)
            .ok_or_else(|| ConfigError::MissingToken {
                var: self.var.clone(),
            })
    }
}

impl Default for EnvTokenProvider {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_VAR)
    }
}

impl TokenProvider for EnvTokenProvider {
    fn token(&self) -> Result<BearerToken, ConfigError> {
        self.token_from(|var| std::env::var(var).ok())
    }

    fn describe(&self) -> String {
        format!("env:{}", self.var)
    }
}
