//! Word counting for HTML/XHTML content files.
//!
//! Body text is whatever sits inside heading or paragraph elements.
//! Tokenization is whitespace-only by design; counts stay comparable
//! across books without pulling in locale-aware segmentation.

use std::path::Path;

use scraper::{Html, Selector};
use tracing::warn;

use crate::util::decode_text;

/// Count the words in the content file at `path`.
///
/// A missing or unreadable file counts as zero with a diagnostic; it is
/// never fatal. Markup is parsed leniently, so malformed HTML degrades to
/// whatever text the parser can recover rather than an error.
pub fn count_file(path: &Path) -> u64 {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), "content file unreadable: {e}");
            return 0;
        }
    };
    count_markup(&decode_text(&bytes))
}

/// Count the words in a parsed markup string: all text nodes inside
/// heading (any level) or paragraph elements, in document order.
pub fn count_markup(markup: &str) -> u64 {
    let document = Html::parse_document(markup);
    let body_text = Selector::parse("h1, h2, h3, h4, h5, h6, p").expect("static selector");

    document
        .select(&body_text)
        .flat_map(|element| element.text())
        .map(count_tokens)
        .sum()
}

// Per text node: trim, split on single spaces, count non-empty tokens.
fn count_tokens(text: &str) -> u64 {
    text.trim().split(' ').filter(|token| !token.is_empty()).count() as u64
}
