//! Metric types

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct RequestMetrics {
    pub started: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub in_flight: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserMetrics {
    pub spawned: usize,
    pub active: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OperationMetrics {
    pub requests: usize,
    pub failures: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SystemMetrics {
    pub cpu_usage: f32,
    pub memory_used_mb: u64,
    pub memory_total_mb: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TestMetrics {
    pub requests: RequestMetrics,
    pub users: UserMetrics,
    /// Keyed by operation name.
    pub operations: BTreeMap<String, OperationMetrics>,
    pub system: SystemMetrics,
}
