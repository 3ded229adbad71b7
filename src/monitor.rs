//! # Run Orchestrator
//!
//! One pass over every configured source, strictly in order:
//!
//! 1. fetch the page; an error becomes a single report item for that source;
//! 2. same fingerprint as last run → nothing else happens for this source;
//! 3. select candidates and sign the set; the record is updated either way, but
//!    only a changed signature leads to detail fetches;
//! 4. for the first [`DETAIL_FETCH_CAP`] candidates: fetch the detail page, extract
//!    dates, drop expired ones (counted), report the rest.
//!
//! State is saved once after all sources, then exactly one message is sent.
//! Only state load/save and delivery failures abort the run.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use tracing::{debug, info, warn};

use crate::candidates::{self, candidates_signature, Link, DETAIL_FETCH_CAP};
use crate::config::{MonitorConfig, Source};
use crate::deadline::{self, DeadlineStatus};
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::fingerprint::fingerprint;
use crate::html;
use crate::notify::{LogNotifier, Notifier, TelegramNotifier};
use crate::report::{compose_message, ReportItem};
use crate::state::{JsonFileStore, SeenRecord, SeenState, StateStore};

/// What one run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub items: Vec<ReportItem>,
    pub expired_skipped: usize,
    pub sources_unchanged: usize,
    pub sources_failed: usize,
    /// The text that was delivered.
    pub message: String,
}

#[derive(Default)]
struct Tally {
    items: Vec<ReportItem>,
    expired: usize,
    unchanged: usize,
    failed: usize,
}

pub struct Monitor {
    sources: Vec<Source>,
    fetcher: Box<dyn PageFetcher>,
    store: Box<dyn StateStore>,
    notifier: Box<dyn Notifier>,
    utc_offset: FixedOffset,
}

impl Monitor {
    pub fn new(
        sources: Vec<Source>,
        fetcher: Box<dyn PageFetcher>,
        store: Box<dyn StateStore>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            sources,
            fetcher,
            store,
            notifier,
            utc_offset: Utc.fix(),
        }
    }

    /// Offset used for "today" in expiry checks and for message timestamps.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// Production wiring: reqwest fetcher, JSON state file, Telegram (or log in dry-run).
    pub fn from_config(cfg: &MonitorConfig, sources: Vec<Source>) -> Result<Self> {
        let fetcher = HttpFetcher::new(cfg.http_timeout)?;
        let store = JsonFileStore::new(cfg.state_path.clone());
        let notifier: Box<dyn Notifier> = if cfg.dry_run {
            Box::new(LogNotifier)
        } else {
            Box::new(
                TelegramNotifier::new(cfg.bot_token.clone(), cfg.recipient_ids.clone())
                    .with_timeout(cfg.http_timeout),
            )
        };
        Ok(
            Self::new(sources, Box::new(fetcher), Box::new(store), notifier)
                .with_utc_offset(cfg.utc_offset),
        )
    }

    pub async fn run_once(&self, now: DateTime<Utc>) -> Result<RunSummary> {
        let mut state = self.store.load().await.context("loading state")?;
        let local_now = now.with_timezone(&self.utc_offset);
        let today = local_now.date_naive();

        let mut tally = Tally::default();
        for source in &self.sources {
            self.check_source(source, &mut state, &mut tally, now, today)
                .await;
        }

        self.store.save(&state).await.context("saving state")?;

        let message = compose_message(&tally.items, tally.expired, local_now);
        self.notifier
            .send(&message)
            .await
            .context("delivering notification")?;

        info!(
            items = tally.items.len(),
            expired = tally.expired,
            unchanged = tally.unchanged,
            failed = tally.failed,
            "run finished"
        );

        Ok(RunSummary {
            items: tally.items,
            expired_skipped: tally.expired,
            sources_unchanged: tally.unchanged,
            sources_failed: tally.failed,
            message,
        })
    }

    async fn check_source(
        &self,
        source: &Source,
        state: &mut SeenState,
        tally: &mut Tally,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) {
        let page = match self.fetcher.fetch(&source.url).await {
            Ok(p) => p,
            Err(e) => {
                warn!(source = %source.name, url = %source.url, error = %e, "source fetch failed");
                tally.failed += 1;
                tally
                    .items
                    .push(ReportItem::source_error(&source.name, &source.url, &e));
                return;
            }
        };

        let page_fp = fingerprint(&page);
        if state
            .get(&source.url)
            .is_some_and(|r| r.fingerprint == page_fp)
        {
            debug!(source = %source.name, "page unchanged");
            tally.unchanged += 1;
            return;
        }

        let links = html::extract_links(&page, &source.url);
        let candidates = candidates::select(&links);
        let sig = candidates_signature(&candidates);
        let same_candidates = state
            .get(&source.url)
            .is_some_and(|r| r.candidates_sig == sig);

        state.upsert(
            &source.url,
            SeenRecord {
                fingerprint: page_fp,
                candidates_sig: sig,
                checked_at: now,
            },
        );

        if same_candidates {
            debug!(source = %source.name, "page changed, candidates did not");
            return;
        }

        info!(
            source = %source.name,
            links = links.len(),
            candidates = candidates.len(),
            "new candidates"
        );
        for link in candidates.iter().take(DETAIL_FETCH_CAP) {
            self.check_candidate(source, link, tally, today).await;
        }
    }

    async fn check_candidate(
        &self,
        source: &Source,
        link: &Link,
        tally: &mut Tally,
        today: NaiveDate,
    ) {
        let page = match self.fetcher.fetch(&link.url).await {
            Ok(p) => p,
            Err(e) => {
                warn!(source = %source.name, url = %link.url, error = %e, "detail fetch failed");
                tally.items.push(ReportItem::detail_error(
                    &source.name,
                    &link.label,
                    &link.url,
                    &e,
                ));
                return;
            }
        };

        let text = html::extract_text(&page);
        let dates = deadline::extract_dates(&text);
        match deadline::assess(&dates, today) {
            DeadlineStatus::Expired(d) => {
                debug!(url = %link.url, deadline = %d, "expired, skipped");
                tally.expired += 1;
            }
            DeadlineStatus::Active(d) => tally.items.push(ReportItem::with_deadline(
                &source.name,
                &link.label,
                &link.url,
                d,
            )),
            DeadlineStatus::Unknown => tally.items.push(ReportItem::without_deadline(
                &source.name,
                &link.label,
                &link.url,
            )),
        }
    }
}
