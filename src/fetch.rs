// src/fetch.rs
//! Page retrieval. The orchestrator only sees `PageFetcher`; the reqwest
//! implementation lives here too.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; EditaisMonitor/1.0)";

/// Why a page could not be fetched. Display is `"<kind>: <message>"`, which is
/// what report items carry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("ConnectError: {0}")]
    Connect(String),
    #[error("HTTPError: {status} for url {url}")]
    Status { status: u16, url: String },
    #[error("BodyError: {0}")]
    Body(String),
    #[error("RequestError: {0}")]
    Request(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return Self::Status {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else if e.is_body() || e.is_decode() {
            Self::Body(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Body text of `url`, or why it could not be retrieved.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// GET over reqwest with a fixed user agent and a per-request timeout.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send().await?.error_for_status()?;
        Ok(resp.text().await?)
    }
}
