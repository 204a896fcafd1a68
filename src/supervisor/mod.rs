//! The Supervisor module manages the lifecycle of the medialift daemon.
//!
//! It acts as the top-level owner of all major components — the API
//! server, the event ingest service and the sync dispatcher — wiring them
//! together, supervising their tasks and orchestrating a clean shutdown.
//!
//! ## Responsibilities
//!
//! - **Initialization**: the `SupervisorBuilder` constructs and wires all
//!   services, injecting configuration and the shared accumulator.
//! - **Lifecycle Management**: the `Supervisor` starts all services and
//!   manages their lifetimes.
//! - **Graceful Shutdown**: it listens for SIGINT/SIGTERM and, before
//!   exiting, attempts one final flush of any backlog so a restart loses
//!   as little as possible. (Accumulator state is process-memory only; a
//!   hard kill still drops whatever is pending.)

mod builder;

use std::sync::Arc;

pub use builder::SupervisorBuilder;
use thiserror::Error;
use tokio::{signal, sync::mpsc};
use tokio_util::sync::CancellationToken;

use crate::{
    config::{AppConfig, SharedNotifierConfig},
    context::AppMetrics,
    engine::{EventAccumulator, EventIngestor, SyncDispatcher, TickOutcome},
    http_client::HttpClientPoolError,
    http_server::{self, ApiState},
    models::MediaEvent,
    notification::LiftSyncClient,
};

/// Represents the set of errors that can occur during the supervisor's
/// operation.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// A required configuration was not provided to the `SupervisorBuilder`.
    #[error("Missing configuration for Supervisor")]
    MissingConfig,

    /// An error occurred due to an invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An error occurred while building the outbound HTTP client.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] HttpClientPoolError),
}

/// The primary runtime manager for the application.
///
/// The Supervisor owns all the major components (services) and is
/// responsible for their startup, shutdown, and health monitoring. Once
/// `run` is called, it becomes the main process loop for the entire
/// application.
pub struct Supervisor {
    /// Shared application configuration.
    config: Arc<AppConfig>,

    /// Live notifier configuration, shared with every service.
    notifier_config: SharedNotifierConfig,

    /// The backlog shared between ingest and dispatch.
    accumulator: Arc<EventAccumulator>,

    /// The shared application metrics.
    app_metrics: AppMetrics,

    /// The dispatcher driving downstream syncs.
    dispatcher: Arc<SyncDispatcher<LiftSyncClient>>,

    /// A token used to signal a graceful shutdown to all supervised tasks.
    cancellation_token: CancellationToken,

    /// A set of all spawned tasks that the supervisor is actively managing.
    join_set: tokio::task::JoinSet<()>,
}

impl Supervisor {
    /// Creates a builder for assembling a supervisor.
    pub fn builder() -> SupervisorBuilder {
        SupervisorBuilder::new()
    }

    pub(crate) fn new(
        config: AppConfig,
        notifier_config: SharedNotifierConfig,
        accumulator: Arc<EventAccumulator>,
        app_metrics: AppMetrics,
        dispatcher: Arc<SyncDispatcher<LiftSyncClient>>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            config: Arc::new(config),
            notifier_config,
            accumulator,
            app_metrics,
            dispatcher,
            cancellation_token,
            join_set: tokio::task::JoinSet::new(),
        }
    }

    /// Starts the supervisor and all its managed services.
    ///
    /// 1. Spawns a signal handler for `SIGINT` (Ctrl+C) and `SIGTERM`.
    /// 2. Spawns the API server, the event ingest service and the sync
    ///    dispatcher.
    /// 3. Monitors task health; a failed task triggers a full shutdown.
    /// 4. On shutdown, attempts one final flush of the backlog, bounded by
    ///    `shutdown_timeout`.
    pub async fn run(mut self) -> Result<(), SupervisorError> {
        let cancellation_token = self.cancellation_token.clone();

        // Spawn a task to listen for shutdown signals.
        self.join_set.spawn(async move {
            let ctrl_c = signal::ctrl_c();
            #[cfg(unix)]
            let terminate = async {
                match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                    Ok(mut sigterm) => {
                        sigterm.recv().await;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to register SIGTERM handler.");
                        std::future::pending::<()>().await;
                    }
                }
            };
            #[cfg(not(unix))]
            let terminate = std::future::pending::<()>();

            tokio::select! {
                _ = ctrl_c => tracing::info!("SIGINT (Ctrl+C) received, initiating graceful shutdown."),
                _ = terminate => tracing::info!("SIGTERM received, initiating graceful shutdown."),
            }

            cancellation_token.cancel();
        });

        // The channel connecting the API server to the ingest service.
        let (events_tx, events_rx) =
            mpsc::channel::<MediaEvent>(self.config.event_channel_capacity as usize);

        // Spawn the API server.
        if self.config.server.enabled {
            let state = ApiState {
                config: Arc::clone(&self.config),
                notifier_config: self.notifier_config.clone(),
                accumulator: Arc::clone(&self.accumulator),
                app_metrics: self.app_metrics.clone(),
                events_tx: events_tx.clone(),
            };
            let http_cancellation_token = self.cancellation_token.clone();
            self.join_set.spawn(async move {
                http_server::run_server(state, http_cancellation_token).await;
            });
        }

        // The supervisor's own sender is dropped here so the ingest loop
        // can also terminate when the API server goes away.
        drop(events_tx);

        // Spawn the event ingest service.
        let ingestor = EventIngestor::new(
            self.notifier_config.clone(),
            Arc::clone(&self.accumulator),
            self.app_metrics.clone(),
            events_rx,
            self.cancellation_token.clone(),
        );
        self.join_set.spawn(async move {
            ingestor.run().await;
        });

        // Spawn the sync dispatcher.
        let dispatcher = Arc::clone(&self.dispatcher);
        let tick_interval = self.config.dispatch_interval_secs;
        self.join_set.spawn(async move {
            dispatcher.run(tick_interval).await;
        });

        // --- Main Supervisor Loop ---

        loop {
            tokio::select! {
                maybe_result = self.join_set.join_next() => {
                    match maybe_result {
                        Some(Ok(_)) => {
                            // Task completed, continue monitoring the rest.
                        }
                        Some(Err(e)) => {
                            tracing::error!("A critical task failed: {:?}. Initiating shutdown.", e);
                            self.cancellation_token.cancel();
                        }
                        None => {
                            // All tasks have completed.
                            break;
                        }
                    }
                }
                _ = self.cancellation_token.cancelled() => {
                    break;
                }
            }
        }

        // --- Graceful Shutdown ---

        self.join_set.shutdown().await;
        tracing::info!("All supervised tasks have completed.");

        let shutdown_timeout = self.config.shutdown_timeout;
        let dispatcher = Arc::clone(&self.dispatcher);
        let accumulator = Arc::clone(&self.accumulator);

        let cleanup_logic = async move {
            // One last flush attempt so a clean restart loses nothing.
            match dispatcher.flush_now().await {
                TickOutcome::Flushed { count } => {
                    tracing::info!(count, "Final flush dispatched during shutdown.");
                }
                TickOutcome::Idle => {
                    tracing::info!("No backlog at shutdown.");
                }
                TickOutcome::Disabled => {
                    tracing::debug!("Notifier disabled at shutdown, nothing flushed.");
                }
                outcome => {
                    let pending = accumulator.pending().await;
                    tracing::warn!(
                        ?outcome,
                        pending,
                        "Backlog could not be flushed; it is lost with this process."
                    );
                }
            }
        };

        if tokio::time::timeout(shutdown_timeout, cleanup_logic)
            .await
            .is_err()
        {
            tracing::warn!(
                "Cleanup did not complete within the timeout of {:?}. Continuing shutdown.",
                shutdown_timeout
            );
        }

        tracing::info!("Supervisor shutdown complete.");
        Ok(())
    }

    /// The cancellation token governing this supervisor, for embedding in
    /// other runtimes or tests.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }
}
