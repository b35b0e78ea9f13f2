//! Swarm runner - spawns simulated users and drives them until the run ends
//!
//! Users start at `spawn_rate` per second. Each one loops: pick a task,
//! think, send the request, record the sample. Failures are recorded and the
//! user moves on; nothing is retried.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;
use tokio::time::{interval, sleep, sleep_until, Instant};

use crate::auth::BearerToken;
use crate::cli::RunArgs;
use crate::client::{ClientOptions, SearchClient};
use crate::config::{self, RunConfig, ThinkTime};
use crate::error::ConfigError;
use crate::metrics::collector::MetricsCollector;
use crate::metrics::reporter;
use crate::scenarios;
use crate::tasks::TaskSet;
use crate::user::{SimulatedUser, UserIdAllocator};

pub struct LoadTest {
    config: RunConfig,
    client: SearchClient,
    tasks: TaskSet,
    token: BearerToken,
    collector: MetricsCollector,
}

impl LoadTest {
    /// Resolve everything a run needs from the command line.
    ///
    /// The token is resolved first so a missing credential is reported before
    /// anything else is validated or any connection is made.
    pub fn prepare(args: &RunArgs) -> Result<Self, ConfigError> {
        let provider = config::token_provider(args);
        let token = provider.token()?;
        tracing::info!("Bearer token loaded from {}", provider.describe());

        let config = RunConfig::from_args(args)?;
        let tasks = scenarios::build_task_set(args.scenario, &args.template_file, &args.only)?;
        Self::new(config, tasks, token)
    }

    pub fn new(config: RunConfig, tasks: TaskSet, token: BearerToken) -> Result<Self, ConfigError> {
        if tasks.is_empty() {
            return Err(ConfigError::Invalid("task set is empty".to_string()));
        }
        config.validate()?;

        let client = SearchClient::new(
            &config.host,
            ClientOptions {
                tag_operations: config.tag_operations,
                debug_responses: config.debug_responses,
                validate_responses: config.validate_responses,
                request_timeout: config.request_timeout,
            },
        )?;

        Ok(Self {
            config,
            client,
            tasks,
            token,
            collector: MetricsCollector::new(),
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run until the configured duration elapses or Ctrl+C is pressed.
    pub async fn run(self) -> Result<MetricsCollector> {
        let LoadTest {
            config,
            client,
            tasks,
            token,
            collector,
        } = self;

        tracing::info!("Starting search load test");
        tracing::info!("  Endpoint: {}", client.endpoint());
        tracing::info!("  Users: {} (spawn rate {}/sec)", config.users, config.spawn_rate);
        tracing::info!(
            "  Think-time: {}s - {}s",
            config.think_time.min,
            config.think_time.max
        );
        tracing::info!("  Tasks: {}", tasks.operation_names().join(", "));

        let reporter_handle = (config.report_interval > 0).then(|| {
            let collector_clone = collector.clone();
            let interval_secs = config.report_interval;
            tokio::spawn(async move {
                reporter::start_periodic_reporter(collector_clone, interval_secs).await;
            })
        });

        let (stop_tx, stop_rx) = watch::channel(false);
        let allocator = UserIdAllocator::new();
        let tasks = Arc::new(tasks);

        let mut spawn_ticker = interval(config.spawn_interval()?);
        let deadline = Instant::now()
            .checked_add(config.duration)
            .ok_or_else(|| anyhow::anyhow!("Run duration {:?} overflows the clock", config.duration))?;
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let mut user_handles = Vec::with_capacity(config.users);

        loop {
            tokio::select! {
                _ = sleep_until(deadline) => {
                    tracing::info!("Load test duration completed");
                    break;
                }
                _ = &mut ctrl_c => {
                    tracing::warn!("Interrupted, stopping users");
                    break;
                }
                _ = spawn_ticker.tick(), if user_handles.len() < config.users => {
                    let user = SimulatedUser::start(&allocator, token.clone());
                    collector.user_spawned();
                    user_handles.push(tokio::spawn(user_loop(
                        user,
                        client.clone(),
                        tasks.clone(),
                        config.think_time,
                        collector.clone(),
                        stop_rx.clone(),
                    )));
                    if user_handles.len() == config.users {
                        tracing::info!("All {} users spawned", config.users);
                    }
                }
            }
        }

        let _ = stop_tx.send(true);

        tracing::info!(
            "Waiting for {} users to finish in-flight requests...",
            user_handles.len()
        );
        for (idx, handle) in user_handles.into_iter().enumerate() {
            if let Err(e) = handle.await {
                tracing::error!("User task {} panicked: {}", idx, e);
            }
        }

        if let Some(handle) = reporter_handle {
            handle.abort();
        }

        tracing::info!("All users stopped");
        Ok(collector)
    }
}

async fn user_loop(
    mut user: SimulatedUser,
    client: SearchClient,
    tasks: Arc<TaskSet>,
    think_time: ThinkTime,
    collector: MetricsCollector,
    mut stop: watch::Receiver<bool>,
) {
    loop {
        let Some(task) = user.pick_task(&tasks) else {
            break;
        };

        let wait = user.think_time(&think_time);
        tokio::select! {
            _ = sleep(wait) => {}
            _ = stop.changed() => break,
        }
        if *stop.borrow() {
            break;
        }

        if let Err(e) = user.execute(&client, task.as_ref(), &collector).await {
            tracing::error!(
                "User {} failed {}: {}",
                user.name(),
                task.operation_name(),
                e
            );
        }
    }

    collector.user_stopped();
}
