// src/state.rs
//! Per-source change-detection state, persisted as one JSON document:
//!
//! ```json
//! { "seen": { "<source url>": { "fingerprint": "…", "candidates_sig": "…", "checked_at": "…" } } }
//! ```
//!
//! Missing file → empty state. Unreadable or malformed file → error (fatal for the run).

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeenRecord {
    pub fingerprint: String,
    pub candidates_sig: String,
    pub checked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeenState {
    #[serde(default)]
    pub seen: BTreeMap<String, SeenRecord>,
}

impl SeenState {
    pub fn get(&self, url: &str) -> Option<&SeenRecord> {
        self.seen.get(url)
    }

    pub fn upsert(&mut self, url: &str, record: SeenRecord) {
        self.seen.insert(url.to_string(), record);
    }
}

#[async_trait]
pub trait StateStore: Send + Sync {
    async fn load(&self) -> Result<SeenState>;
    async fn save(&self, state: &SeenState) -> Result<()>;
}

/// State kept in a pretty-printed JSON file, rewritten in full on save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load(&self) -> Result<SeenState> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no state file yet, starting empty");
                return Ok(SeenState::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading state from {}", self.path.display()))
            }
        };
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing state file {}", self.path.display()))
    }

    async fn save(&self, state: &SeenState) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("creating state dir {}", dir.display()))?;
        }
        let body = serde_json::to_vec_pretty(state).context("serializing state")?;
        fs::write(&self.path, body)
            .await
            .with_context(|| format!("writing state to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> SeenRecord {
        SeenRecord {
            fingerprint: "aa".into(),
            candidates_sig: "bb".into(),
            checked_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    #[tokio::test]
    async fn missing_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));
        assert_eq!(store.load().await.unwrap(), SeenState::default());
    }

    #[tokio::test]
    async fn save_then_load_keeps_records() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("nested/state.json");
        let store = JsonFileStore::new(&p);
        let mut st = SeenState::default();
        st.upsert("https://a.example/", record());
        store.save(&st).await.unwrap();

        let raw = std::fs::read_to_string(&p).unwrap();
        assert!(raw.contains("\"seen\""));
        assert!(raw.contains("2026-01-02T03:04:05Z"));
        assert_eq!(store.load().await.unwrap(), st);
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("state.json");
        std::fs::write(&p, "{ not json").unwrap();
        let err = JsonFileStore::new(&p).load().await.unwrap_err();
        assert!(format!("{err:#}").contains("parsing state file"));
    }

    #[tokio::test]
    async fn reads_offset_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("state.json");
        std::fs::write(
            &p,
            r#"{"seen":{"https://a.example/":{"fingerprint":"f","candidates_sig":"s",
                "checked_at":"2025-11-03T12:00:00.123456+00:00"}}}"#,
        )
        .unwrap();
        let st = JsonFileStore::new(&p).load().await.unwrap();
        assert_eq!(st.get("https://a.example/").unwrap().fingerprint, "f");
    }
}
