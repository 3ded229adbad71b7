use anyhow::Result;

use super::Notifier;

/// Dry-run delivery: the message goes to the log and stdout only.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        tracing::info!(chars = text.chars().count(), "dry run: notification not delivered");
        println!("{text}");
        Ok(())
    }
}
