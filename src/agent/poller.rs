//! Reconciliation loop for review status polling.
//!
//! Each cycle:
//! 1. Fetches status changes after the current checkpoint
//! 2. Validates the response and interprets the first record
//! 3. Notifies the user, or announces the error if it is new
//! 4. Advances the checkpoint unless the cycle failed critically
//!
//! Empty answers are the steady state and stay silent. After every cycle the
//! poller sleeps for the configured interval, forever.

use std::sync::Arc;
use std::time::Duration;

use crate::agent::dedup::{DEFAULT_HISTORY_CAPACITY, ErrorHistory};
use crate::channels::Notifier;
use crate::config::DEFAULT_RETRY_SECS;
use crate::error::{ReviewError, Severity};
use crate::review::{ReviewSource, StatusRecord, check_response, parse_status};

/// Field of the review response holding the record list.
pub const DEFAULT_RECORDS_FIELD: &str = "homeworks";

/// Configuration for the review poller.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Delay between the end of one cycle and the start of the next.
    pub interval: Duration,
    /// Response field that carries the status records.
    pub records_field: String,
    /// Number of error messages retained for deduplication.
    pub history_capacity: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_RETRY_SECS),
            records_field: DEFAULT_RECORDS_FIELD.to_string(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl PollerConfig {
    /// Create a config with a specific interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

/// Result of a single polling cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status change was found; carries the message that was sent.
    Notified(String),
    /// Nothing changed since the checkpoint.
    Unchanged,
    /// The cycle failed; `announced` tells whether the error was sent out.
    Failed { error: ReviewError, announced: bool },
}

/// Drives fetch, classify, interpret and notify for a single subject.
pub struct ReviewPoller {
    config: PollerConfig,
    source: Arc<dyn ReviewSource>,
    notifier: Arc<dyn Notifier>,
    checkpoint: i64,
    errors: ErrorHistory,
}

impl ReviewPoller {
    /// Create a poller whose checkpoint starts at the current time.
    pub fn new(
        config: PollerConfig,
        source: Arc<dyn ReviewSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let errors = ErrorHistory::with_capacity(config.history_capacity);
        Self {
            config,
            source,
            notifier,
            checkpoint: chrono::Utc::now().timestamp(),
            errors,
        }
    }

    /// Start from an explicit checkpoint instead of the current time.
    pub fn with_checkpoint(mut self, checkpoint: i64) -> Self {
        self.checkpoint = checkpoint;
        self
    }

    /// Timestamp the next fetch will ask for changes after.
    pub fn checkpoint(&self) -> i64 {
        self.checkpoint
    }

    pub fn error_history(&self) -> &ErrorHistory {
        &self.errors
    }

    /// Run the polling loop.
    ///
    /// This runs forever; stop it by dropping the future.
    pub async fn run(&mut self) {
        tracing::info!(
            "Starting review poller with interval {:?}, checkpoint {}",
            self.config.interval,
            self.checkpoint
        );

        loop {
            self.run_cycle().await;
            tokio::time::sleep(self.config.interval).await;
        }
    }

    /// Run one cycle and update the checkpoint and error history.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let result = self.poll(self.checkpoint).await;
        match result {
            Ok((message, candidate)) => {
                tracing::info!("Review status changed: {}", message);
                self.send(&message).await;
                self.advance(candidate);
                CycleOutcome::Notified(message)
            }
            Err(error) => match error.severity() {
                Severity::NonCritical => {
                    tracing::debug!("{}", error);
                    self.advance(error.checkpoint_candidate());
                    CycleOutcome::Unchanged
                }
                Severity::Critical | Severity::DataShape => {
                    let text = error.to_string();
                    tracing::error!(severity = ?error.severity(), "{}", text);

                    let announced = self.errors.should_notify(&text);
                    if announced {
                        self.send(&text).await;
                    } else {
                        tracing::debug!("Same error as last cycle, not announcing again");
                    }
                    CycleOutcome::Failed { error, announced }
                }
            },
        }
    }

    /// Fetch, classify and interpret; returns the message and checkpoint candidate.
    async fn poll(&self, after: i64) -> Result<(String, Option<i64>), ReviewError> {
        let body = self.source.fetch(after).await?;
        let classified = check_response(&body, &self.config.records_field)?;

        if !classified.rest.is_empty() {
            tracing::debug!(
                "Response carried {} records, only the first is reported",
                classified.record_count()
            );
        }

        let record = StatusRecord::from_value(&classified.first)?;
        let message = parse_status(&record)?;
        Ok((message, classified.current_date))
    }

    fn advance(&mut self, candidate: Option<i64>) {
        let Some(next) = candidate else {
            return;
        };
        if next < self.checkpoint {
            tracing::warn!(
                "Review service moved checkpoint backwards: {} -> {}",
                self.checkpoint,
                next
            );
        }
        self.checkpoint = next;
    }

    async fn send(&self, message: &str) {
        match self.notifier.notify(message).await {
            Ok(()) => tracing::info!("Notification sent via {}", self.notifier.name()),
            Err(e) => tracing::error!("Failed to send notification: {}", e),
        }
    }
}
