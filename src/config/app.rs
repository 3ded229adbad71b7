// src/config/app.rs
use chrono::FixedOffset;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_CHAT_IDS: &str = "TELEGRAM_CHAT_IDS";
pub const ENV_SOURCES_PATH: &str = "SOURCES_PATH";
pub const ENV_STATE_PATH: &str = "STATE_PATH";
pub const ENV_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
pub const ENV_UTC_OFFSET_HOURS: &str = "MONITOR_UTC_OFFSET_HOURS";
pub const ENV_DRY_RUN: &str = "MONITOR_DRY_RUN";

pub const DEFAULT_SOURCES_PATH: &str = "sources.json";
pub const DEFAULT_STATE_PATH: &str = "state.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Brasília (UTC-3).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Everything the run needs that is not the source list itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Empty in dry-run mode when not provided.
    pub bot_token: String,
    pub recipient_ids: Vec<String>,
    pub sources_path: PathBuf,
    pub state_path: PathBuf,
    pub http_timeout: Duration,
    pub utc_offset: FixedOffset,
    pub dry_run: bool,
}

impl MonitorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from any key → value lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let dry_run = match get(ENV_DRY_RUN) {
            None => false,
            Some(v) => parse_flag(&v).ok_or_else(|| ConfigError::Invalid {
                key: ENV_DRY_RUN,
                reason: format!("expected 1/0/true/false, got {v:?}"),
            })?,
        };

        let bot_token = match get(ENV_BOT_TOKEN) {
            Some(t) => t,
            None if dry_run => String::new(),
            None => return Err(ConfigError::Missing(ENV_BOT_TOKEN)),
        };

        let recipient_ids = match get(ENV_CHAT_IDS) {
            Some(raw) => {
                let ids = split_ids(&raw);
                if ids.is_empty() && !dry_run {
                    return Err(ConfigError::Invalid {
                        key: ENV_CHAT_IDS,
                        reason: "no chat ids after splitting on ','".into(),
                    });
                }
                ids
            }
            None if dry_run => Vec::new(),
            None => return Err(ConfigError::Missing(ENV_CHAT_IDS)),
        };

        let http_timeout = match get(ENV_TIMEOUT_SECS) {
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Some(v) => match v.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: ENV_TIMEOUT_SECS,
                        reason: format!("expected a positive integer, got {v:?}"),
                    })
                }
            },
        };

        let offset_hours = match get(ENV_UTC_OFFSET_HOURS) {
            None => DEFAULT_UTC_OFFSET_HOURS,
            Some(v) => v
                .parse::<i32>()
                .ok()
                .filter(|h| (-12..=14).contains(h))
                .ok_or_else(|| ConfigError::Invalid {
                    key: ENV_UTC_OFFSET_HOURS,
                    reason: format!("expected whole hours in -12..=14, got {v:?}"),
                })?,
        };
        let utc_offset = FixedOffset::east_opt(offset_hours * 3600).ok_or_else(|| {
            ConfigError::Invalid {
                key: ENV_UTC_OFFSET_HOURS,
                reason: format!("offset {offset_hours}h out of range"),
            }
        })?;

        Ok(Self {
            bot_token,
            recipient_ids,
            sources_path: get(ENV_SOURCES_PATH)
                .unwrap_or_else(|| DEFAULT_SOURCES_PATH.to_string())
                .into(),
            state_path: get(ENV_STATE_PATH)
                .unwrap_or_else(|| DEFAULT_STATE_PATH.to_string())
                .into(),
            http_timeout,
            utc_offset,
            dry_run,
        })
    }
}

fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
