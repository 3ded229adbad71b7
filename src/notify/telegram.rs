use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::Notifier;

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Bot API `sendMessage`, once per chat id, in order.
#[derive(Clone)]
pub struct TelegramNotifier {
    token: String,
    chat_ids: Vec<String>,
    api_base: String,
    client: Client,
    timeout: Duration,
}

impl TelegramNotifier {
    pub fn new(token: String, chat_ids: Vec<String>) -> Self {
        Self {
            token,
            chat_ids,
            api_base: TELEGRAM_API_BASE.to_string(),
            client: Client::new(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Point at another Bot API host (tests, self-hosted API server).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        let url = self.endpoint();
        for chat_id in &self.chat_ids {
            let body = SendMessage {
                chat_id,
                text,
                disable_web_page_preview: true,
            };
            let rsp = self
                .client
                .post(&url)
                .timeout(self.timeout)
                .json(&body)
                .send()
                .await
                .with_context(|| format!("telegram post to chat {chat_id}"))?;

            let status = rsp.status();
            let rsp_text = rsp.text().await.unwrap_or_default();
            tracing::info!(chat_id = %chat_id, status = status.as_u16(), resp = %rsp_text, "telegram send");

            if !status.is_success() {
                anyhow::bail!("telegram non-2xx for chat {chat_id}: {status} {rsp_text}");
            }
        }
        Ok(())
    }
}
