//! Deadline extraction (free text → candidate dates) and the policy that turns
//! those candidates into a single deadline with an expiry verdict.

pub mod extract;
pub mod policy;

pub use extract::{extract_dates, DateLocale, DeadlineExtractor, PT_BR};
pub use policy::{assess, format_deadline, is_expired, pick_deadline, DeadlineStatus};
