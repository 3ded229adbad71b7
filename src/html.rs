// src/html.rs
//! HTML → links and HTML → plain text.

use once_cell::sync::Lazy;
use reqwest::Url;
use scraper::{Html, Node, Selector};

use crate::candidates::Link;

/// Labels longer than this are cut (in chars).
pub const MAX_LABEL_CHARS: usize = 140;

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("anchor selector"));

/// Collapse runs of whitespace to single spaces and trim.
pub fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Every `<a href>` with a non-empty label, resolved to an absolute http(s) URL.
/// Document order is preserved.
pub fn extract_links(html: &str, base_url: &str) -> Vec<Link> {
    let doc = Html::parse_document(html);
    let base = Url::parse(base_url).ok();

    let mut out = Vec::new();
    for a in doc.select(&ANCHOR) {
        let Some(href) = a.value().attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() || href.starts_with('#') {
            continue;
        }

        let label = collapse_ws(&a.text().collect::<Vec<_>>().join(" "));
        if label.is_empty() {
            continue;
        }

        let Some(url) = resolve(base.as_ref(), href) else {
            continue;
        };

        out.push(Link {
            label: label.chars().take(MAX_LABEL_CHARS).collect(),
            url,
        });
    }
    out
}

fn resolve(base: Option<&Url>, href: &str) -> Option<String> {
    let url = match base {
        Some(b) => b.join(href).ok()?,
        None => Url::parse(href).ok()?,
    };
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}

/// Visible text of a document, whitespace-collapsed. Script and style bodies are skipped.
pub fn extract_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let mut parts: Vec<&str> = Vec::new();

    for node in doc.tree.nodes() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|p| p.value().as_element())
            .is_some_and(|el| matches!(el.name(), "script" | "style" | "noscript"));
        if !hidden {
            parts.push(&**text);
        }
    }

    collapse_ws(&parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
        <html><body>
          <a href="/editais/2026/01">Edital
              nº 01/2026</a>
          <a href="https://outro.example/chamamento">Chamamento público</a>
          <a href="#topo">Topo</a>
          <a href="mailto:contato@cultura.example">Fale conosco</a>
          <a href="/vazio"> </a>
          <a href="noticias/abc">Notícia</a>
        </body></html>
    "##;

    #[test]
    fn links_are_resolved_and_filtered() {
        let links = extract_links(PAGE, "https://cultura.example/sec/index.html");
        assert_eq!(
            links,
            vec![
                Link::new("Edital nº 01/2026", "https://cultura.example/editais/2026/01"),
                Link::new("Chamamento público", "https://outro.example/chamamento"),
                Link::new("Notícia", "https://cultura.example/sec/noticias/abc"),
            ]
        );
    }

    #[test]
    fn long_labels_are_truncated() {
        let label = "a".repeat(300);
        let html = format!(r#"<a href="https://x.example/">{label}</a>"#);
        let links = extract_links(&html, "https://x.example/");
        assert_eq!(links[0].label.chars().count(), MAX_LABEL_CHARS);
    }

    #[test]
    fn text_skips_scripts_and_collapses_whitespace() {
        let html = r#"<html><head><style>p{color:red}</style>
            <script>var prazo = "01/01/1999";</script></head>
            <body><h1>Edital</h1>
            <p>Inscrições   até
               31/01/2026</p></body></html>"#;
        assert_eq!(extract_text(html), "Edital Inscrições até 31/01/2026");
    }
}
