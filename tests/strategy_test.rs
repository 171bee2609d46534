//! TOC strategy priority: NCX beats HTML anchors beats spine synthesis.

mod common;

use common::{build_epub, content_with_words, html_toc, ncx, opf};
use tempfile::TempDir;

use booktally::process_book;

fn content_entries() -> Vec<(&'static str, String)> {
    vec![
        ("OEBPS/ch1.xhtml", content_with_words(10)),
        ("OEBPS/ch2.xhtml", content_with_words(20)),
    ]
}

fn ncx_entry() -> (&'static str, String) {
    (
        "OEBPS/toc.ncx",
        ncx(&[("NCX One", "ch1.xhtml"), ("NCX Two", "ch2.xhtml")]),
    )
}

fn html_toc_entry() -> (&'static str, String) {
    (
        "OEBPS/toc.html",
        html_toc(&[("HTML One", "ch1.xhtml"), ("HTML Two", "ch2.xhtml")]),
    )
}

fn opf_entry(with_ncx: bool) -> (&'static str, String) {
    let mut items = vec![("ch1", "ch1.xhtml"), ("ch2", "ch2.xhtml")];
    if with_ncx {
        items.push(("ncx", "toc.ncx"));
    }
    (
        "OEBPS/content.opf",
        opf(&items, &["ch1", "ch2"], with_ncx.then_some("ncx")),
    )
}

fn titles(rows: &[booktally::ChapterCount]) -> Vec<&str> {
    rows.iter().map(|row| row.title.as_str()).collect()
}

#[test]
fn test_ncx_wins_over_html_toc() {
    let tmp = TempDir::new().unwrap();
    let mut entries = content_entries();
    entries.push(ncx_entry());
    entries.push(html_toc_entry());
    entries.push(opf_entry(true));
    let path = build_epub(tmp.path(), "both.epub", &entries);

    let report = process_book(&path).unwrap();

    assert_eq!(titles(&report.rows), vec!["NCX One", "NCX Two"]);
    assert_eq!(report.rows[0].words, 10);
    assert_eq!(report.rows[1].words, 20);
}

#[test]
fn test_html_toc_used_when_ncx_absent() {
    let tmp = TempDir::new().unwrap();
    let mut entries = content_entries();
    entries.push(html_toc_entry());
    entries.push(opf_entry(false));
    let path = build_epub(tmp.path(), "htmlonly.epub", &entries);

    let report = process_book(&path).unwrap();

    assert_eq!(titles(&report.rows), vec!["HTML One", "HTML Two"]);
}

#[test]
fn test_synthesis_when_both_absent() {
    let tmp = TempDir::new().unwrap();
    let mut entries = content_entries();
    entries.push(opf_entry(false));
    let path = build_epub(tmp.path(), "neither.epub", &entries);

    let report = process_book(&path).unwrap();

    assert_eq!(titles(&report.rows), vec!["ch1", "ch2"]);
}

#[test]
fn test_empty_ncx_falls_through_to_html_toc() {
    // An NCX without a navMap is a strategy failure, not a fatal error
    let tmp = TempDir::new().unwrap();
    let mut entries = content_entries();
    entries.push(("OEBPS/toc.ncx", "<ncx><head></head></ncx>".to_string()));
    entries.push(html_toc_entry());
    entries.push(opf_entry(true));
    let path = build_epub(tmp.path(), "emptyncx.epub", &entries);

    let report = process_book(&path).unwrap();

    assert_eq!(titles(&report.rows), vec!["HTML One", "HTML Two"]);
}
