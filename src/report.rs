//! report.rs — report items and the single summary message sent per run.

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::deadline::format_deadline;
use crate::fetch::FetchError;

/// Items listed in one digest.
pub const MAX_DIGEST_ITEMS: usize = 20;

/// Telegram `sendMessage` text limit.
pub const MAX_MESSAGE_LEN: usize = 4096;

pub const SOURCE_ERROR_TITLE: &str = "⚠️ Erro ao verificar fonte";

/// One line of the digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportItem {
    pub source: String,
    pub title: String,
    pub link: String,
}

impl ReportItem {
    /// Candidate with a deadline that has not passed.
    pub fn with_deadline(source: &str, label: &str, url: &str, deadline: NaiveDate) -> Self {
        Self {
            source: source.to_string(),
            title: format!("{label} [prazo: {}]", format_deadline(deadline)),
            link: url.to_string(),
        }
    }

    /// Candidate whose page carried no recognizable date.
    pub fn without_deadline(source: &str, label: &str, url: &str) -> Self {
        Self {
            source: source.to_string(),
            title: format!("{label} [prazo não identificado]"),
            link: url.to_string(),
        }
    }

    /// Source page itself could not be fetched.
    pub fn source_error(source: &str, url: &str, err: &FetchError) -> Self {
        Self {
            source: source.to_string(),
            title: SOURCE_ERROR_TITLE.to_string(),
            link: format!("{url} | {err}"),
        }
    }

    /// Candidate detail page could not be fetched.
    pub fn detail_error(source: &str, label: &str, url: &str, err: &FetchError) -> Self {
        Self {
            source: source.to_string(),
            title: format!("{label} ⚠️ erro ao abrir detalhe"),
            link: format!("{url} | {err}"),
        }
    }
}

fn stamp(now: DateTime<FixedOffset>) -> String {
    now.format("%d/%m/%Y %H:%M").to_string()
}

fn expired_phrase(n: usize) -> String {
    format!("{n} edital(is) com prazo vencido ignorado(s)")
}

/// Digest when there are items, heartbeat otherwise.
///
/// At most [`MAX_DIGEST_ITEMS`] items are listed, and listing stops early once the
/// next item would push the text past [`MAX_MESSAGE_LEN`]. Everything left out is
/// counted in the overflow line; the expired footer is always kept.
pub fn compose_message(items: &[ReportItem], expired: usize, now: DateTime<FixedOffset>) -> String {
    if items.is_empty() {
        return compose_heartbeat(expired, now);
    }

    let footer = if expired > 0 {
        format!("\n\n⏭️ {}.", expired_phrase(expired))
    } else {
        String::new()
    };
    // Widest overflow line this digest could need.
    let overflow_reserve = message_len(&overflow_line(items.len()));

    let mut msg = format!("🔎 Novidades detectadas ({})\n", stamp(now));
    let mut listed = 0;
    for (i, it) in items.iter().take(MAX_DIGEST_ITEMS).enumerate() {
        let line = format!("\n• {}: {}\n  {}", it.source, it.title, it.link);
        let left_after = items.len() - (i + 1);
        let reserve = message_len(&footer) + if left_after > 0 { overflow_reserve } else { 0 };
        if message_len(&msg) + message_len(&line) + reserve > MAX_MESSAGE_LEN {
            break;
        }
        msg.push_str(&line);
        listed += 1;
    }

    if listed < items.len() {
        msg.push_str(&overflow_line(items.len() - listed));
    }
    msg.push_str(&footer);
    msg
}

fn overflow_line(n: usize) -> String {
    format!("\n… e mais {n} item(ns) não listado(s).")
}

/// Telegram counts message length in UTF-16 code units.
fn message_len(s: &str) -> usize {
    s.encode_utf16().count()
}

pub fn compose_heartbeat(expired: usize, now: DateTime<FixedOffset>) -> String {
    let mut msg = format!(
        "✅ Monitor rodou ({}) e não encontrou novidades nas fontes.",
        stamp(now)
    );
    if expired > 0 {
        msg.push_str(&format!(" ({})", expired_phrase(expired)));
    }
    msg
}
