//! Notifier trait.

use async_trait::async_trait;

use crate::error::ChannelError;

/// Outbound channel for human-readable notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Channel name used in logs (e.g., "telegram").
    fn name(&self) -> &str;

    /// Deliver `message` to the configured destination.
    async fn notify(&self, message: &str) -> Result<(), ChannelError>;
}
