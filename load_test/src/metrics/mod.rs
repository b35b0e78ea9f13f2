// Metrics module
// Collection, console reporting and JSON summaries

pub mod collector;
pub mod json_report;
pub mod reporter;
pub mod types;
