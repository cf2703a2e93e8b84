//! Core polling logic.
//!
//! The agent owns:
//! - The reconciliation loop that polls the review service
//! - The checkpoint advanced between cycles
//! - Deduplication of repeated error notifications

pub mod dedup;
mod poller;

pub use dedup::ErrorHistory;
pub use poller::{CycleOutcome, DEFAULT_RECORDS_FIELD, PollerConfig, ReviewPoller};
