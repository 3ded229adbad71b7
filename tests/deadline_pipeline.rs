// tests/deadline_pipeline.rs
use chrono::NaiveDate;
use editais_monitor::deadline::{assess, extract_dates, pick_deadline, DeadlineStatus};
use editais_monitor::html::extract_text;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn detail_page_deadline_is_latest_date() {
    let html = r#"
      <article>
        <h1>Edital nº 04/2026 – Prêmio de Culturas Populares</h1>
        <p>Abertura: 02/01/2026</p>
        <p>As inscrições poderão ser feitas até 31 de janeiro de 2026, às 23h59.</p>
        <p>Resultado previsto para 15/03/2026.</p>
        <script>var cache = "01/01/2099";</script>
      </article>"#;
    let text = extract_text(html);
    let dates = extract_dates(&text);

    assert!(dates.contains(&ymd(2026, 1, 31)));
    assert!(!dates.contains(&ymd(2099, 1, 1)), "script bodies are not text");
    // Broad numeric pass pulls the result date in and wins the max.
    assert_eq!(pick_deadline(&dates), Some(ymd(2026, 3, 15)));
    assert_eq!(
        assess(&dates, ymd(2026, 2, 1)),
        DeadlineStatus::Active(ymd(2026, 3, 15))
    );
}

#[test]
fn invalid_fragments_never_surface() {
    let dates = extract_dates("prazo: 45/13/2026, depois prazo: 31/01/2026");
    assert!(dates.iter().all(|d| *d == ymd(2026, 1, 31)), "{dates:?}");
    assert!(!dates.is_empty());
}

#[test]
fn page_without_dates_is_unknown() {
    let text = extract_text("<p>Em breve novas oportunidades.</p>");
    assert_eq!(assess(&extract_dates(&text), ymd(2026, 1, 1)), DeadlineStatus::Unknown);
}
