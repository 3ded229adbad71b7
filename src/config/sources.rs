// src/config/sources.rs
use anyhow::{anyhow, bail, Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One monitored page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub url: String,
}

#[derive(Deserialize)]
struct SourcesFile {
    sources: Vec<RawSource>,
}

// Fields optional here so a bad entry is reported by index instead of a serde position.
#[derive(Deserialize)]
struct RawSource {
    name: Option<String>,
    url: Option<String>,
}

/// Load the source list from JSON (`{"sources": [...]}`) or TOML (`[[sources]]`).
/// Any missing or malformed entry fails the whole load.
pub fn load_sources(path: &Path) -> Result<Vec<Source>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading sources from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_sources(&content, ext.as_str())
        .with_context(|| format!("loading sources from {}", path.display()))
}

fn parse_sources(s: &str, hint_ext: &str) -> Result<Vec<Source>> {
    let file = match hint_ext {
        "json" => parse_json(s)?,
        "toml" => parse_toml(s)?,
        _ => parse_json(s)
            .or_else(|_| parse_toml(s))
            .map_err(|_| anyhow!("unsupported sources format (expected JSON or TOML)"))?,
    };
    validate(file.sources)
}

fn parse_json(s: &str) -> Result<SourcesFile> {
    serde_json::from_str(s).context("parsing sources JSON")
}

fn parse_toml(s: &str) -> Result<SourcesFile> {
    toml::from_str(s).context("parsing sources TOML")
}

fn validate(raw: Vec<RawSource>) -> Result<Vec<Source>> {
    if raw.is_empty() {
        bail!("no sources configured");
    }
    raw.into_iter()
        .enumerate()
        .map(|(i, r)| {
            let name = r
                .name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .ok_or_else(|| anyhow!("source #{i}: missing name"))?;
            let url = r
                .url
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty())
                .ok_or_else(|| anyhow!("source #{i} ({name}): missing url"))?;
            let parsed =
                Url::parse(&url).with_context(|| format!("source #{i} ({name}): invalid url"))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                bail!("source #{i} ({name}): url must be http(s), got {url}");
            }
            Ok(Source { name, url })
        })
        .collect()
}
