//! Bearer token acquisition for simulated users.

mod env;
mod file;
mod provider;

pub use env::{EnvTokenProvider, DEFAULT_TOKEN_VAR};
pub use file::FileTokenProvider;
pub use provider::{BearerToken, BoxedTokenProvider, TokenProvider};
