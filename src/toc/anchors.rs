//! Anchor-list HTML TOC parsing.

use scraper::{Html, Selector};

use crate::book::TocEntry;
use crate::href;

/// Scan an HTML/XHTML TOC document for anchors.
///
/// Every `<a href>` yields one entry: title is the anchor text trimmed,
/// href is resolved against `base_dir`. Parsing is best-effort; malformed
/// markup loses at most the anchors the parser could not recover, never
/// the book. Duplicate hrefs are kept deliberately so the allocator's
/// last-occurrence match merges their counts.
pub(super) fn parse(markup: &str, base_dir: &str) -> Vec<TocEntry> {
    let document = Html::parse_document(markup);
    let anchor = Selector::parse("a[href]").expect("static selector");

    document
        .select(&anchor)
        .filter_map(|element| {
            let raw = element.value().attr("href")?;
            let title: String = element.text().collect();
            Some(TocEntry::new(title.trim(), href::resolve(base_dir, raw)))
        })
        .collect()
}
