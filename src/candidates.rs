//! # Candidate Selector
//!
//! Narrows the links of a source page down to the ones that plausibly point at
//! an announcement (edital, chamamento, seleção, ...).
//!
//! - Case-insensitive substring match against both label and URL.
//! - Stable with respect to input order; duplicates are kept.
//! - Fallback: when nothing matches, the first `FALLBACK_LINKS` links are used.
//!
//! The per-run detail-fetch cap (`DETAIL_FETCH_CAP`) is applied by the caller,
//! not here.

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use crate::fingerprint::fingerprint;

/// Links kept when no keyword matches.
pub const FALLBACK_LINKS: usize = 10;

/// How many candidates per source get their detail page fetched.
pub const DETAIL_FETCH_CAP: usize = 8;

/// Announcement vocabulary (lowercase).
pub const ANNOUNCEMENT_KEYWORDS: &[&str] = &[
    "edital",
    "chamamento",
    "seleção",
    "oportunidade",
    "retificação",
    "prorrogação",
    "inscrição",
    "inscrições",
];

/// One anchor from a page: visible label plus absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }

    fn matches_any(&self, keywords: &[&str]) -> bool {
        let label = self.label.to_lowercase();
        // Resolved URLs are percent-encoded; accented keywords match the decoded path.
        let url = percent_decode_str(&self.url)
            .decode_utf8_lossy()
            .to_lowercase();
        keywords
            .iter()
            .any(|k| label.contains(k) || url.contains(k))
    }
}

/// Keep links whose label or URL mentions an announcement keyword.
pub fn select(links: &[Link]) -> Vec<Link> {
    select_with(links, ANNOUNCEMENT_KEYWORDS)
}

/// Same as [`select`] with a caller-provided keyword list (lowercase).
pub fn select_with(links: &[Link], keywords: &[&str]) -> Vec<Link> {
    let matched: Vec<Link> = links
        .iter()
        .filter(|l| l.matches_any(keywords))
        .cloned()
        .collect();

    if matched.is_empty() {
        links.iter().take(FALLBACK_LINKS).cloned().collect()
    } else {
        matched
    }
}

/// Order-sensitive digest of a candidate set: fingerprint of the JSON array of
/// `[label, url]` pairs.
pub fn candidates_signature(candidates: &[Link]) -> String {
    let pairs: Vec<(&str, &str)> = candidates
        .iter()
        .map(|l| (l.label.as_str(), l.url.as_str()))
        .collect();
    // Serializing borrowed string tuples cannot fail.
    let json = serde_json::to_string(&pairs).unwrap_or_default();
    fingerprint(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(pairs: &[(&str, &str)]) -> Vec<Link> {
        pairs.iter().map(|(l, u)| Link::new(*l, *u)).collect()
    }

    #[test]
    fn keeps_label_or_url_matches_in_order() {
        let input = links(&[
            ("Início", "https://cultura.example/"),
            ("EDITAL nº 3/2026", "https://cultura.example/a"),
            ("Contato", "https://cultura.example/contato"),
            ("Ver mais", "https://cultura.example/chamamento-publico-12"),
            ("Seleção de projetos", "https://cultura.example/b"),
        ]);
        let out = select(&input);
        let labels: Vec<&str> = out.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["EDITAL nº 3/2026", "Ver mais", "Seleção de projetos"]
        );
    }

    #[test]
    fn accented_keywords_match_encoded_urls() {
        let input = crate::html::extract_links(
            r#"<a href="/editais/seleção-2026">Ver mais</a>
               <a href="/contato">Contato</a>
               <a href="/avisos/Retifica%C3%A7%C3%A3o-01">Aviso 01</a>"#,
            "https://cultura.example/",
        );
        assert!(input[0].url.contains("%C3%A7"), "{:?}", input[0]);

        let out = select(&input);
        let labels: Vec<&str> = out.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Ver mais", "Aviso 01"]);
    }

    #[test]
    fn falls_back_to_first_ten_when_nothing_matches() {
        let input: Vec<Link> = (0..15)
            .map(|i| Link::new(format!("Notícia {i}"), format!("https://x.example/{i}")))
            .collect();
        let out = select(&input);
        assert_eq!(out.len(), FALLBACK_LINKS);
        assert_eq!(out[..], input[..FALLBACK_LINKS]);
    }

    #[test]
    fn duplicates_are_not_collapsed() {
        let input = links(&[
            ("Edital A", "https://x.example/a"),
            ("Edital A", "https://x.example/a"),
        ]);
        assert_eq!(select(&input).len(), 2);
    }

    #[test]
    fn signature_depends_on_order() {
        let a = links(&[("Edital 1", "https://x/1"), ("Edital 2", "https://x/2")]);
        let mut b = a.clone();
        b.reverse();
        assert_eq!(candidates_signature(&a), candidates_signature(&a.clone()));
        assert_ne!(candidates_signature(&a), candidates_signature(&b));
    }
}
