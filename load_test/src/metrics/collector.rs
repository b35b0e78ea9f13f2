//! Metrics collector - thread-safe collection with per-operation latency tracking

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use hdrhistogram::Histogram;
use parking_lot::RwLock;
use serde::Serialize;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

use super::types::TestMetrics;

#[derive(Clone)]
pub struct MetricsCollector {
    metrics: Arc<RwLock<TestMetrics>>,
    request_latencies: Arc<RwLock<Histogram<u64>>>,
    operation_latencies: Arc<RwLock<HashMap<String, Histogram<u64>>>>,
    system: Arc<RwLock<System>>,
    start_time: Instant,
}

fn new_histogram() -> Histogram<u64> {
    // 3 significant digits, auto-resizing
    Histogram::new(3).expect("3 significant figures is a valid histogram precision")
}

impl MetricsCollector {
    pub fn new() -> Self {
        let system = System::new_with_specifics(
            RefreshKind::new()
                .with_cpu(CpuRefreshKind::everything())
                .with_memory(MemoryRefreshKind::everything()),
        );

        Self {
            metrics: Arc::new(RwLock::new(TestMetrics::default())),
            request_latencies: Arc::new(RwLock::new(new_histogram())),
            operation_latencies: Arc::new(RwLock::new(HashMap::new())),
            system: Arc::new(RwLock::new(system)),
            start_time: Instant::now(),
        }
    }

    pub fn user_spawned(&self) {
        let mut metrics = self.metrics.write();
        metrics.users.spawned += 1;
        metrics.users.active += 1;
    }

    pub fn user_stopped(&self) {
        let mut metrics = self.metrics.write();
        metrics.users.active = metrics.users.active.saturating_sub(1);
    }

    pub fn request_started(&self, operation: &str) {
        let mut metrics = self.metrics.write();
        metrics.requests.started += 1;
        metrics.requests.in_flight += 1;
        metrics
            .operations
            .entry(operation.to_string())
            .or_default()
            .requests += 1;
    }

    pub fn request_succeeded(&self, operation: &str, duration_ms: u64) {
        let mut metrics = self.metrics.write();
        metrics.requests.succeeded += 1;
        metrics.requests.in_flight = metrics.requests.in_flight.saturating_sub(1);
        drop(metrics);

        self.record_latency(operation, duration_ms);
    }

    pub fn request_failed(&self, operation: &str, duration_ms: u64) {
        let mut metrics = self.metrics.write();
        metrics.requests.failed += 1;
        metrics.requests.in_flight = metrics.requests.in_flight.saturating_sub(1);
        metrics
            .operations
            .entry(operation.to_string())
            .or_default()
            .failures += 1;
        drop(metrics);

        // Still record latency for failed requests
        self.record_latency(operation, duration_ms);
    }

    fn record_latency(&self, operation: &str, duration_ms: u64) {
        let _ = self.request_latencies.write().record(duration_ms);
        let mut per_op = self.operation_latencies.write();
        let _ = per_op
            .entry(operation.to_string())
            .or_insert_with(new_histogram)
            .record(duration_ms);
    }

    /// Update system metrics (CPU, memory)
    pub fn update_system_metrics(&self) {
        let mut system = self.system.write();
        system.refresh_cpu_all();
        system.refresh_memory();

        let mut metrics = self.metrics.write();
        metrics.system.cpu_usage = system.global_cpu_usage();
        metrics.system.memory_used_mb = system.used_memory() / 1024 / 1024;
        metrics.system.memory_total_mb = system.total_memory() / 1024 / 1024;
    }

    pub fn get_snapshot(&self) -> TestMetrics {
        self.metrics.read().clone()
    }

    pub fn get_request_latency_percentiles(&self) -> LatencyStats {
        LatencyStats::from_histogram(&self.request_latencies.read())
    }

    /// Latency per operation, sorted by operation name.
    pub fn get_operation_latency_percentiles(&self) -> Vec<(String, LatencyStats)> {
        let per_op = self.operation_latencies.read();
        let mut stats: Vec<_> = per_op
            .iter()
            .map(|(op, hist)| (op.clone(), LatencyStats::from_histogram(hist)))
            .collect();
        stats.sort_by(|a, b| a.0.cmp(&b.0));
        stats
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn elapsed_secs_f64(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LatencyStats {
    pub min: u64,
    pub p50: u64,
    pub p95: u64,
    pub p99: u64,
    pub max: u64,
    pub mean: f64,
    pub count: u64,
}

impl LatencyStats {
    fn from_histogram(hist: &Histogram<u64>) -> Self {
        if hist.is_empty() {
            return Self {
                min: 0,
                p50: 0,
                p95: 0,
                p99: 0,
                max: 0,
                mean: 0.0,
                count: 0,
            };
        }
        Self {
            min: hist.min(),
            p50: hist.value_at_quantile(0.50),
            p95: hist.value_at_quantile(0.95),
            p99: hist.value_at_quantile(0.99),
            max: hist.max(),
            mean: hist.mean(),
            count: hist.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_and_failure_counts() {
        let collector = MetricsCollector::new();
        collector.request_started("searchByFilter");
        collector.request_succeeded("searchByFilter", 12);
        collector.request_started("searchByFilter");
        collector.request_failed("searchByFilter", 30);
        collector.request_started("searchCount");
        collector.request_succeeded("searchCount", 5);

        let snapshot = collector.get_snapshot();
        assert_eq!(snapshot.requests.started, 3);
        assert_eq!(snapshot.requests.succeeded, 2);
        assert_eq!(snapshot.requests.failed, 1);
        assert_eq!(snapshot.requests.in_flight, 0);
        assert_eq!(snapshot.operations["searchByFilter"].requests, 2);
        assert_eq!(snapshot.operations["searchByFilter"].failures, 1);
        assert_eq!(snapshot.operations["searchCount"].failures, 0);
    }

    #[test]
    fn test_operation_latencies_sorted() {
        let collector = MetricsCollector::new();
        for (op, ms) in [("searchSchema", 3), ("searchByKeyword", 7), ("searchByKeyword", 9)] {
            collector.request_started(op);
            collector.request_succeeded(op, ms);
        }
        let stats = collector.get_operation_latency_percentiles();
        assert_eq!(stats[0].0, "searchByKeyword");
        assert_eq!(stats[0].1.count, 2);
        assert_eq!(stats[0].1.max, 9);
        assert_eq!(stats[1].0, "searchSchema");
        assert_eq!(collector.get_request_latency_percentiles().count, 3);
    }

    #[test]
    fn test_empty_latency_stats() {
        let collector = MetricsCollector::new();
        let stats = collector.get_request_latency_percentiles();
        assert_eq!(stats.count, 0);
        assert_eq!(stats.max, 0);
    }

    #[test]
    fn test_user_counts() {
        let collector = MetricsCollector::new();
        collector.user_spawned();
        collector.user_spawned();
        collector.user_stopped();
        let snapshot = collector.get_snapshot();
        assert_eq!(snapshot.users.spawned, 2);
        assert_eq!(snapshot.users.active, 1);
    }
}
