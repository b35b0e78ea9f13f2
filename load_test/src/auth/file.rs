//! Token read from a file, e.g. the saved output of `oc whoami -t`.

use std::path::PathBuf;

use super::provider::{BearerToken, TokenProvider};
use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct FileTokenProvider {
    path: PathBuf,
}

impl FileTokenProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenProvider for FileTokenProvider {
    fn token(&self) -> Result<BearerToken, ConfigError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::TokenFile {
            path: self.path.clone(),
            source,
        })?;
        BearerToken::new(raw).ok_or_else(|| ConfigError::EmptyTokenFile {
            path: self.path.clone(),
        })
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
