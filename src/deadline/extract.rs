// src/deadline/extract.rs
//! Date grammar for deadline detection.
//!
//! Three pattern families run over a lowercased copy of the text and their
//! results are unioned:
//!   1. keyword + up to 60 non-digit chars + `dd/mm/yyyy` (also `.` or `-`);
//!   2. the same numeric triple anywhere (broad, noisy on purpose);
//!   3. keyword + up to 60 non-digit chars + `dd de <mês> de yyyy`.
//!
//! Two-digit years are read as 20yy. Triples that are not real calendar dates
//! are dropped. Everything locale-specific lives in [`DateLocale`].

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Keyword and month tables for one language.
#[derive(Debug, Clone, Copy)]
pub struct DateLocale {
    /// Deadline markers (lowercase).
    pub keywords: &'static [&'static str],
    /// Month names (lowercase) → month number; spelling variants get their own row.
    pub months: &'static [(&'static str, u32)],
    /// Word joining day, month and year in written-out dates.
    pub connector: &'static str,
}

/// Brazilian Portuguese.
pub const PT_BR: DateLocale = DateLocale {
    keywords: &[
        "até",
        "prazo",
        "data limite",
        "data-limite",
        "submissão",
        "submissões",
        "inscrição",
        "inscrições",
        "encerramento",
        "encerram",
        "vencimento",
    ],
    months: &[
        ("janeiro", 1),
        ("fevereiro", 2),
        ("março", 3),
        ("marco", 3),
        ("abril", 4),
        ("maio", 5),
        ("junho", 6),
        ("julho", 7),
        ("agosto", 8),
        ("setembro", 9),
        ("outubro", 10),
        ("novembro", 11),
        ("dezembro", 12),
    ],
    connector: "de",
};

// day, month, year (4 or 2 digits) not followed by another digit
const NUMERIC_TRIPLE: &str = r"(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4}|\d{2})(?:\D|$)";
const LOOKAHEAD: &str = r"\D{0,60}?";

/// Compiled grammar for one locale.
#[derive(Debug, Clone)]
pub struct DeadlineExtractor {
    anchored_numeric: Regex,
    numeric: Regex,
    anchored_written: Regex,
    months: HashMap<&'static str, u32>,
}

impl DeadlineExtractor {
    pub fn new(locale: &DateLocale) -> Result<Self, regex::Error> {
        let keywords = alternation(locale.keywords.iter().copied());
        let months = alternation(locale.months.iter().map(|(name, _)| *name));
        let conn = regex::escape(locale.connector);

        let anchored_numeric = Regex::new(&format!(r"(?:{keywords}){LOOKAHEAD}{NUMERIC_TRIPLE}"))?;
        let numeric = Regex::new(&format!(r"\b{NUMERIC_TRIPLE}"))?;
        let anchored_written = Regex::new(&format!(
            r"(?:{keywords}){LOOKAHEAD}(\d{{1,2}})[º°]?\s+{conn}\s+({months})\s+{conn}\s+(\d{{4}})"
        ))?;

        Ok(Self {
            anchored_numeric,
            numeric,
            anchored_written,
            months: locale.months.iter().copied().collect(),
        })
    }

    /// All valid dates found in `text`. Duplicates are possible; order is not meaningful.
    pub fn extract(&self, text: &str) -> Vec<NaiveDate> {
        let lower = text.to_lowercase();
        let mut out = Vec::new();

        for re in [&self.anchored_numeric, &self.numeric] {
            for caps in re.captures_iter(&lower) {
                if let Some(d) = numeric_date(&caps[1], &caps[2], &caps[3]) {
                    out.push(d);
                }
            }
        }

        for caps in self.anchored_written.captures_iter(&lower) {
            let month = self.months.get(&caps[2]).copied();
            if let Some(d) = month.and_then(|m| written_date(&caps[1], m, &caps[3])) {
                out.push(d);
            }
        }

        out
    }
}

static PT_BR_EXTRACTOR: Lazy<DeadlineExtractor> =
    Lazy::new(|| DeadlineExtractor::new(&PT_BR).expect("pt-BR date grammar"));

/// Extract candidate deadline dates using the pt-BR grammar.
pub fn extract_dates(text: &str) -> Vec<NaiveDate> {
    PT_BR_EXTRACTOR.extract(text)
}

fn alternation<'a>(words: impl Iterator<Item = &'a str>) -> String {
    // Longest first so "inscrições" wins over a shorter prefix.
    let mut v: Vec<&str> = words.collect();
    v.sort_by_key(|w| std::cmp::Reverse(w.len()));
    v.iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

fn numeric_date(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let mut year: i32 = year.parse().ok()?;
    if year < 100 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn written_date(day: &str, month: u32, year: &str) -> Option<NaiveDate> {
    let day: u32 = day.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn keyword_numeric_date() {
        let out = extract_dates("Prazo: 31/01/2026 às 18h");
        assert!(out.contains(&ymd(2026, 1, 31)), "{out:?}");
    }

    #[test]
    fn written_out_date_after_keyword() {
        let out = extract_dates("Inscrições abertas até 31 de janeiro de 2026.");
        assert_eq!(out, vec![ymd(2026, 1, 31)]);
    }

    #[test]
    fn accepts_marco_without_cedilla_and_ordinal_day() {
        let out = extract_dates("encerramento em 1º de marco de 2026");
        assert_eq!(out, vec![ymd(2026, 3, 1)]);
        let out = extract_dates("ATÉ 15 DE MARÇO DE 2026");
        assert_eq!(out, vec![ymd(2026, 3, 15)]);
    }

    #[test]
    fn two_digit_year_and_other_separators() {
        let out = extract_dates("publicado em 05.02.26; envio até 10-03-2026");
        assert!(out.contains(&ymd(2026, 2, 5)), "{out:?}");
        assert!(out.contains(&ymd(2026, 3, 10)), "{out:?}");
    }

    #[test]
    fn invalid_triples_are_dropped() {
        assert!(extract_dates("prazo: 45/13/2026").is_empty());
        assert!(extract_dates("até 31/02/2026").is_empty());
        assert!(extract_dates("até 30 de fevereiro de 2026").is_empty());
    }

    #[test]
    fn unanchored_dates_are_collected_too() {
        let out = extract_dates("Resultado publicado em 12/12/2025. Homologação 03/01/2026");
        assert_eq!(out, vec![ymd(2025, 12, 12), ymd(2026, 1, 3)]);
    }

    #[test]
    fn keyword_too_far_from_written_date_is_ignored() {
        let filler = "x".repeat(80);
        let text = format!("prazo {filler} 10 de abril de 2026");
        assert!(extract_dates(&text).is_empty());
    }

    #[test]
    fn three_digit_and_five_digit_years_do_not_match() {
        assert!(extract_dates("prazo 01/02/202 e 01/02/20261").is_empty());
    }
}
