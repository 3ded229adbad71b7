// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod candidates;
pub mod config;
pub mod deadline;
pub mod fetch;
pub mod fingerprint;
pub mod html;
pub mod monitor;
pub mod notify;
pub mod report;
pub mod state;

// ---- Re-exports for stable public API ----
pub use crate::candidates::Link;
pub use crate::config::{MonitorConfig, Source};
pub use crate::fetch::{FetchError, PageFetcher};
pub use crate::monitor::{Monitor, RunSummary};
pub use crate::notify::Notifier;
pub use crate::report::ReportItem;
pub use crate::state::{SeenRecord, SeenState, StateStore};
