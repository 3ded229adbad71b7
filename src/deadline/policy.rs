// src/deadline/policy.rs
//! Picks one deadline out of many candidate dates and classifies it.
//!
//! Pages usually list opening, publication and closing dates together; the
//! closing date is taken to be the latest one.

use chrono::NaiveDate;

/// Outcome of the deadline policy for one detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineStatus {
    /// Latest date is today or later.
    Active(NaiveDate),
    /// Latest date is strictly before today.
    Expired(NaiveDate),
    /// No date found.
    Unknown,
}

/// Latest date in `dates`, if any.
pub fn pick_deadline(dates: &[NaiveDate]) -> Option<NaiveDate> {
    dates.iter().max().copied()
}

/// True iff `deadline` is strictly earlier than `today`.
pub fn is_expired(deadline: NaiveDate, today: NaiveDate) -> bool {
    deadline < today
}

pub fn assess(dates: &[NaiveDate], today: NaiveDate) -> DeadlineStatus {
    match pick_deadline(dates) {
        Some(d) if is_expired(d, today) => DeadlineStatus::Expired(d),
        Some(d) => DeadlineStatus::Active(d),
        None => DeadlineStatus::Unknown,
    }
}

/// `dd/mm/yyyy`
pub fn format_deadline(d: NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
}
