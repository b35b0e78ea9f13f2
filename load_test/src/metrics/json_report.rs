use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::collector::{LatencyStats, MetricsCollector};
use super::types::{RequestMetrics, UserMetrics};
use crate::config::{RunConfig, ThinkTime};

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub timestamp: String,
    pub host: String,
    pub config: ReportConfig,
    pub duration_secs: f64,
    pub users: UserMetrics,
    pub requests: RequestMetrics,
    pub latency: LatencyStats,
    pub operations: Vec<OperationReport>,
}

#[derive(Debug, Serialize)]
pub struct ReportConfig {
    pub users: usize,
    pub spawn_rate: f64,
    pub think_time: ThinkTime,
    pub tag_operations: bool,
    pub validate_responses: bool,
}

#[derive(Debug, Serialize)]
pub struct OperationReport {
    pub operation: String,
    pub requests: usize,
    pub failures: usize,
    pub latency: LatencyStats,
}

/// Build the summary of a finished run.
pub fn build_report(collector: &MetricsCollector, config: &RunConfig) -> RunReport {
    let metrics = collector.get_snapshot();

    let operations = collector
        .get_operation_latency_percentiles()
        .into_iter()
        .map(|(operation, latency)| {
            let counts = metrics.operations.get(&operation).cloned().unwrap_or_default();
            OperationReport {
                operation,
                requests: counts.requests,
                failures: counts.failures,
                latency,
            }
        })
        .collect();

    RunReport {
        timestamp: chrono::Utc::now().to_rfc3339(),
        host: config.host.to_string(),
        config: ReportConfig {
            users: config.users,
            spawn_rate: config.spawn_rate,
            think_time: config.think_time,
            tag_operations: config.tag_operations,
            validate_responses: config.validate_responses,
        },
        duration_secs: collector.elapsed_secs_f64(),
        users: metrics.users,
        requests: metrics.requests,
        latency: collector.get_request_latency_percentiles(),
        operations,
    }
}

/// Write a JSON report to disk.
pub fn write_json_report(collector: &MetricsCollector, config: &RunConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report dir {}", parent.display()))?;
    }

    let report = build_report(collector, config);
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("Failed to write report {}", path.display()))?;

    Ok(())
}
