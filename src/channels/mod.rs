//! Notification channels.

mod channel;
mod telegram;

pub use channel::Notifier;
pub use telegram::TelegramNotifier;
