//! Simulated users.
//!
//! Each user owns its name, token and random source. Names come from a
//! shared [`UserIdAllocator`] so concurrent startup cannot hand out the same
//! label twice.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::auth::BearerToken;
use crate::client::SearchClient;
use crate::config::ThinkTime;
use crate::error::TaskResult;
use crate::metrics::collector::MetricsCollector;
use crate::tasks::{SearchTask, TaskSet};

/// Hands out `user0`, `user1`, ... exactly once each.
#[derive(Debug, Default)]
pub struct UserIdAllocator {
    next: AtomicUsize,
}

impl UserIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_name(&self) -> String {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        format!("user{id}")
    }
}

pub struct SimulatedUser {
    name: String,
    token: BearerToken,
    rng: StdRng,
}

impl SimulatedUser {
    /// Create a user, taking the next name from `allocator`.
    pub fn start(allocator: &UserIdAllocator, token: BearerToken) -> Self {
        let name = allocator.next_name();
        tracing::info!("Starting user [{}]", name);
        Self {
            name,
            token,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    /// Pick the next task, uniformly among `tasks`.
    pub fn pick_task(&mut self, tasks: &TaskSet) -> Option<std::sync::Arc<dyn SearchTask>> {
        tasks.choose(&mut self.rng)
    }

    pub fn think_time(&mut self, think_time: &ThinkTime) -> Duration {
        think_time.sample(&mut self.rng)
    }

    /// Run one task: build its payload, POST it, record the sample.
    ///
    /// The error is returned for the caller to log; it has already been
    /// counted as a failed sample.
    pub async fn execute(
        &self,
        client: &SearchClient,
        task: &dyn SearchTask,
        collector: &MetricsCollector,
    ) -> TaskResult<u16> {
        let operation = task.operation_name();
        collector.request_started(operation);
        let start = Instant::now();

        let result = match task.payload() {
            Ok(payload) => client.post(&self.token, operation, &payload).await,
            Err(e) => Err(e),
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(status) => {
                tracing::debug!(user = %self.name, operation, status, duration_ms, "Request ok");
                collector.request_succeeded(operation, duration_ms);
            }
            Err(_) => collector.request_failed(operation, duration_ms),
        }
        result
    }
}
