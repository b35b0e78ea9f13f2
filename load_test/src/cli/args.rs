use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::scenarios::ScenarioKind;
use crate::tasks::template::DEFAULT_TEMPLATE_FILE;

/// Search API Load Testing Tool
#[derive(Parser, Debug)]
#[command(name = "search-load-test")]
#[command(about = "Load testing tool for the search GraphQL API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Mode {
    /// Run simulated users against the search API (runs until --duration or Ctrl+C)
    Run(RunArgs),

    /// List the built-in search tasks
    Tasks,

    /// Print the JSON body a task would send
    Payload(PayloadArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Base URL of the search API (the GraphQL path is appended)
    #[arg(
        long,
        default_value = "https://localhost:4010",
        env = "SEARCH_API_HOST"
    )]
    pub host: String,

    /// Load profile supplying default users, spawn rate and think-time: smoke, standard, stress
    #[arg(long, default_value = "standard")]
    pub profile: String,

    /// Number of simulated users (overrides the profile)
    #[arg(short, long)]
    pub users: Option<usize>,

    /// Users started per second (overrides the profile)
    #[arg(long)]
    pub spawn_rate: Option<f64>,

    /// Minimum think-time between tasks, in seconds (overrides the profile)
    #[arg(long)]
    pub min_wait: Option<f64>,

    /// Maximum think-time between tasks, in seconds (overrides the profile)
    #[arg(long)]
    pub max_wait: Option<f64>,

    /// Test duration in seconds
    #[arg(long, default_value = "60")]
    pub duration: u64,

    /// Which task set the users pick from
    #[arg(long, value_enum, default_value_t = ScenarioKind::Catalog)]
    pub scenario: ScenarioKind,

    /// Restrict the task set to these operation names (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// JSON file with `query` and `variables`, used by the template task
    #[arg(long, default_value = DEFAULT_TEMPLATE_FILE)]
    pub template_file: PathBuf,

    /// Environment variable holding the bearer token
    #[arg(long, default_value = "API_TOKEN")]
    pub token_env: String,

    /// Read the bearer token from this file instead of the environment
    #[arg(long)]
    pub token_file: Option<PathBuf>,

    /// Append `?op=<operationName>` to each request URL
    #[arg(long)]
    pub tag_operations: bool,

    /// Log the raw response body of every request
    #[arg(long)]
    pub debug_responses: bool,

    /// Count 2xx responses with GraphQL errors (or no data) as failures
    #[arg(long)]
    pub validate_responses: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "60")]
    pub request_timeout: u64,

    /// Metrics reporting interval in seconds (0 disables live reporting)
    #[arg(long, default_value = "5")]
    pub report_interval: u64,

    /// Write a JSON summary to this path when the run ends
    #[arg(long)]
    pub report_json: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PayloadArgs {
    /// Operation name, e.g. searchByFilter (see `tasks`)
    pub operation: String,

    /// Template file, used when the operation is searchTemplate
    #[arg(long, default_value = DEFAULT_TEMPLATE_FILE)]
    pub template_file: PathBuf,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,
}
