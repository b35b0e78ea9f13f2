//! Token provider trait and the bearer token type.

use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;

/// Opaque credential presented as `Authorization: Bearer <token>`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token, rejecting empty or whitespace-only strings.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Never print the credential itself.
impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BearerToken(<{} chars>)", self.0.len())
    }
}

/// Source of the bearer token shared by every simulated user.
///
/// Resolved once at startup; an error here is a configuration error and the
/// run never starts.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Result<BearerToken, ConfigError>;

    /// Short human-readable description of where the token comes from.
    fn describe(&self) -> String;
}

pub type BoxedTokenProvider = Arc<dyn TokenProvider>;
