//! Console reporter for metrics with real-time updates

use std::io::{self, Write};

use tokio::time::{interval, Duration};

use super::collector::{LatencyStats, MetricsCollector};
use super::types::TestMetrics;

/// Start periodic metrics reporting (every N seconds)
pub async fn start_periodic_reporter(collector: MetricsCollector, interval_secs: u64) {
    let mut ticker = interval(Duration::from_secs(interval_secs.max(1)));
    // First tick fires immediately; skip it so the first report has data.
    ticker.tick().await;

    loop {
        ticker.tick().await;

        collector.update_system_metrics();

        print_live_metrics(&collector);
    }
}

fn success_rate(metrics: &TestMetrics) -> f64 {
    let finished = metrics.requests.succeeded + metrics.requests.failed;
    if finished == 0 {
        return 0.0;
    }
    metrics.requests.succeeded as f64 / finished as f64 * 100.0
}

fn throughput(metrics: &TestMetrics, elapsed_secs: f64) -> f64 {
    if elapsed_secs <= 0.0 {
        return 0.0;
    }
    (metrics.requests.succeeded + metrics.requests.failed) as f64 / elapsed_secs
}

fn print_operation_table(metrics: &TestMetrics, per_op: &[(String, LatencyStats)]) {
    println!(
        "   {:<22} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "Operation", "Reqs", "Fails", "P50", "P95", "P99", "Max"
    );
    for (op, latency) in per_op {
        let (requests, failures) = metrics
            .operations
            .get(op)
            .map(|m| (m.requests, m.failures))
            .unwrap_or_default();
        println!(
            "   {:<22} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
            op, requests, failures, latency.p50, latency.p95, latency.p99, latency.max
        );
    }
}

/// Print live metrics (clears screen and updates in place)
pub fn print_live_metrics(collector: &MetricsCollector) {
    // Clear screen and move cursor to top
    print!("\x1B[2J\x1B[1;1H");

    let metrics = collector.get_snapshot();
    let elapsed = collector.elapsed_seconds();
    let latency = collector.get_request_latency_percentiles();
    let per_op = collector.get_operation_latency_percentiles();

    println!("╔════════════════════════════════════════════════════════════════╗");
    println!("║             Search API Load Test - Live Metrics               ║");
    println!("╚════════════════════════════════════════════════════════════════╝");

    println!(
        "\n⏱️  Elapsed Time: {:02}:{:02}:{:02}    Users: {} active / {} spawned",
        elapsed / 3600,
        (elapsed % 3600) / 60,
        elapsed % 60,
        metrics.users.active,
        metrics.users.spawned
    );

    println!("\n┌─ REQUESTS ──────────────────────────────────────────────────┐");
    println!(
        "│  Sent:         {:>8}    In-Flight:  {:>8}              │",
        metrics.requests.started, metrics.requests.in_flight
    );
    println!(
        "│  Succeeded:    {:>8}    Failed:     {:>8}              │",
        metrics.requests.succeeded, metrics.requests.failed
    );
    if metrics.requests.started > 0 {
        println!(
            "│  Success Rate: {:>7.2}%    Throughput: {:>7.2}/sec        │",
            success_rate(&metrics),
            throughput(&metrics, collector.elapsed_secs_f64())
        );
    }
    println!("└─────────────────────────────────────────────────────────────┘");

    if latency.count > 0 {
        println!("\n┌─ LATENCY (ms) ──────────────────────────────────────────────┐");
        println!(
            "│  Min: {:>6}  P50: {:>6}  P95: {:>6}  P99: {:>6}  Max: {:>6}│",
            latency.min, latency.p50, latency.p95, latency.p99, latency.max
        );
        println!("└─────────────────────────────────────────────────────────────┘");
        println!();
        print_operation_table(&metrics, &per_op);
    }

    println!("\n┌─ SYSTEM ────────────────────────────────────────────────────┐");
    println!(
        "│  CPU Usage:    {:>6.1}%    Memory: {:>6} / {:>6} MB       │",
        metrics.system.cpu_usage, metrics.system.memory_used_mb, metrics.system.memory_total_mb
    );
    println!("└─────────────────────────────────────────────────────────────┘");

    println!("\n  [Press Ctrl+C to stop test]");

    let _ = io::stdout().flush();
}

/// Print final summary report
pub fn print_final_report(collector: &MetricsCollector) {
    let metrics = collector.get_snapshot();
    let elapsed = collector.elapsed_secs_f64();
    let latency = collector.get_request_latency_percentiles();
    let per_op = collector.get_operation_latency_percentiles();

    println!("\n╔════════════════════════════════════════════════════════════════╗");
    println!("║                    FINAL TEST REPORT                           ║");
    println!("╚════════════════════════════════════════════════════════════════╝");

    println!("\n👥 USERS");
    println!("   Spawned:              {:>10}", metrics.users.spawned);

    println!("\n📊 REQUESTS");
    println!("   Total Sent:           {:>10}", metrics.requests.started);
    println!("   Total Succeeded:      {:>10}", metrics.requests.succeeded);
    println!("   Total Failed:         {:>10}", metrics.requests.failed);
    println!(
        "   Throughput:           {:>10.2} requests/sec",
        throughput(&metrics, elapsed)
    );
    if metrics.requests.started > 0 {
        println!("   Success Rate:         {:>10.2}%", success_rate(&metrics));
    }

    if latency.count > 0 {
        println!("\n📈 LATENCY");
        println!("   Min:                  {:>10} ms", latency.min);
        println!("   P50 (Median):         {:>10} ms", latency.p50);
        println!("   P95:                  {:>10} ms", latency.p95);
        println!("   P99:                  {:>10} ms", latency.p99);
        println!("   Max:                  {:>10} ms", latency.max);
        println!("   Mean:                 {:>10.2} ms", latency.mean);

        println!("\n🔎 PER OPERATION (ms)");
        print_operation_table(&metrics, &per_op);
    }

    println!("\n⏱️  Test Duration: {:.2} seconds", elapsed);
    println!("════════════════════════════════════════════════════════════════\n");
}
