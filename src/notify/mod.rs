//! Notification delivery.

use anyhow::Result;

pub mod log;
pub mod telegram;

pub use log::LogNotifier;
pub use telegram::TelegramNotifier;

/// Delivers one text body to every configured recipient.
///
/// Delivery is all-or-nothing: the first recipient failure is returned and the
/// remaining recipients are not attempted.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
}
