//! Run configuration assembled from the command line and a load profile.

mod load_profiles;
mod think_time;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Url;

use crate::auth::{BoxedTokenProvider, EnvTokenProvider, FileTokenProvider};
use crate::cli::RunArgs;
use crate::error::ConfigError;

pub use load_profiles::{get_load_profile, smoke_profile, standard_profile, stress_profile, LoadProfile};
pub use think_time::ThinkTime;

/// Validated settings for one load test run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub host: Url,
    pub users: usize,
    pub spawn_rate: f64,
    pub think_time: ThinkTime,
    pub duration: Duration,
    pub request_timeout: Duration,
    pub report_interval: u64,
    pub report_json: Option<PathBuf>,
    pub tag_operations: bool,
    pub debug_responses: bool,
    pub validate_responses: bool,
}

impl RunConfig {
    pub fn from_args(args: &RunArgs) -> Result<Self, ConfigError> {
        let profile = get_load_profile(&args.profile);

        let users = args.users.unwrap_or(profile.users);

        let think_time = ThinkTime::new(
            args.min_wait.unwrap_or(profile.think_time.min),
            args.max_wait.unwrap_or(profile.think_time.max),
        )?;

        let config = Self {
            host: parse_host(&args.host)?,
            users,
            spawn_rate: args.spawn_rate.unwrap_or(profile.spawn_rate),
            think_time,
            duration: Duration::from_secs(args.duration),
            request_timeout: Duration::from_secs(args.request_timeout),
            report_interval: args.report_interval,
            report_json: args.report_json.clone(),
            tag_operations: args.tag_operations,
            debug_responses: args.debug_responses,
            validate_responses: args.validate_responses,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the values the runner turns into timers and deadlines.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.users == 0 {
            return Err(ConfigError::Invalid("--users must be at least 1".to_string()));
        }
        self.spawn_interval()?;
        self.think_time.validate()?;
        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "--request-timeout must be at least 1 second".to_string(),
            ));
        }
        if Instant::now().checked_add(self.duration).is_none() {
            return Err(ConfigError::Invalid(format!(
                "--duration {}s is too large",
                self.duration.as_secs()
            )));
        }
        Ok(())
    }

    /// Time between two user starts.
    pub fn spawn_interval(&self) -> Result<Duration, ConfigError> {
        let rate = self.spawn_rate;
        if !(rate.is_finite() && rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "--spawn-rate must be positive, got {rate}"
            )));
        }
        let interval = Duration::try_from_secs_f64(1.0 / rate)
            .ok()
            .filter(|d| Instant::now().checked_add(*d).is_some())
            .ok_or_else(|| ConfigError::Invalid(format!("--spawn-rate {rate} is too small")))?;
        Ok(interval.max(Duration::from_millis(1)))
    }
}

/// Token source selected on the command line: a file if given, else the environment.
pub fn token_provider(args: &RunArgs) -> BoxedTokenProvider {
    match &args.token_file {
        Some(path) => Arc::new(FileTokenProvider::new(path)) as BoxedTokenProvider,
        None => Arc::new(EnvTokenProvider::new(&args.token_env)),
    }
}

fn parse_host(host: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(host).map_err(|e| ConfigError::InvalidHost {
        host: host.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidHost {
            host: host.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}
