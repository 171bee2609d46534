//! Table-of-contents resolution.
//!
//! Three strategies are tried in strict priority order, and the first one
//! that yields any entries wins: the legacy NCX navigation map, then an
//! anchor-list HTML TOC, then synthesis from the spine. The ordering is
//! policy, not performance: explicit chapter metadata is trusted over
//! reconstructed structure, and no strategy runs after one succeeds.

mod anchors;
mod ncx;

use std::path::Path;

use tracing::{info, warn};

use crate::book::{SpineEntry, TocEntry, TocSource};
use crate::extract;
use crate::href;
use crate::package::PackageDoc;
use crate::util::{decode_text, strip_bom};

/// The winning strategy's output.
pub struct ResolvedToc {
    pub entries: Vec<TocEntry>,
    pub source: TocSource,
}

/// Resolve the book's logical chapter structure.
///
/// Never fails: the spine-synthesis fallback always produces a TOC
/// (possibly empty, when the spine itself is empty).
pub fn resolve(root: &Path, doc: &PackageDoc, spine: &[SpineEntry]) -> ResolvedToc {
    if let Some(entries) = try_ncx(root, doc) {
        info!(entries = entries.len(), "using NCX navigation map");
        return ResolvedToc {
            entries,
            source: TocSource::Ncx,
        };
    }

    if let Some(entries) = try_html_anchors(root) {
        info!(entries = entries.len(), "using HTML anchor TOC");
        return ResolvedToc {
            entries,
            source: TocSource::HtmlAnchors,
        };
    }

    let entries = synthesize_from_spine(spine);
    info!(entries = entries.len(), "synthesized TOC from spine");
    ResolvedToc {
        entries,
        source: TocSource::SpineSynthesis,
    }
}

// Strategy 1: the NCX named by `<spine toc="...">`, or failing that the
// first .ncx in the tree. Absent navMap, parse failure, and an empty map
// all fall through to the next strategy.
fn try_ncx(root: &Path, doc: &PackageDoc) -> Option<Vec<TocEntry>> {
    let ncx_path = doc
        .toc_id
        .as_ref()
        .and_then(|id| doc.manifest.get(id))
        .filter(|path| root.join(path.as_str()).is_file())
        .cloned()
        .or_else(|| extract::find_by_extension(root, "ncx"))?;

    let bytes = match std::fs::read(root.join(&ncx_path)) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %ncx_path, "NCX unreadable: {e}");
            return None;
        }
    };
    let content = String::from_utf8_lossy(strip_bom(&bytes)).into_owned();

    match ncx::parse(&content, href::parent_dir(&ncx_path)) {
        Ok(entries) if !entries.is_empty() => Some(entries),
        Ok(_) => {
            warn!(path = %ncx_path, "NCX has no navigation points");
            None
        }
        Err(e) => {
            warn!(path = %ncx_path, "NCX parse failed: {e}");
            None
        }
    }
}

// Strategy 2: scan a toc.html / toc.xhtml document for anchors. Lenient
// parsing; a malformed anchor costs only itself, never the book.
fn try_html_anchors(root: &Path) -> Option<Vec<TocEntry>> {
    let toc_path = extract::find_by_name(root, &["toc.html", "toc.xhtml", "toc.htm"])?;

    let bytes = match std::fs::read(root.join(&toc_path)) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %toc_path, "HTML TOC unreadable: {e}");
            return None;
        }
    };

    let entries = anchors::parse(&decode_text(&bytes), href::parent_dir(&toc_path));
    if entries.is_empty() {
        warn!(path = %toc_path, "HTML TOC has no anchors");
        return None;
    }
    Some(entries)
}

// Strategy 3: one entry per spine item. Titles come from the spine id
// with separators spaced out and any markup suffix dropped.
fn synthesize_from_spine(spine: &[SpineEntry]) -> Vec<TocEntry> {
    spine
        .iter()
        .map(|item| TocEntry::new(title_from_id(&item.id), &item.href))
        .collect()
}

fn title_from_id(id: &str) -> String {
    let stem = id
        .strip_suffix(".xhtml")
        .or_else(|| id.strip_suffix(".html"))
        .unwrap_or(id);
    stem.replace(['-', '_'], " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_id() {
        assert_eq!(title_from_id("intro"), "intro");
        assert_eq!(title_from_id("intro.html"), "intro");
        assert_eq!(title_from_id("chapter-one.xhtml"), "chapter one");
        assert_eq!(title_from_id("front_matter"), "front matter");
    }

    #[test]
    fn test_synthesize_from_spine() {
        let spine = vec![
            SpineEntry::new("intro", "OEBPS/intro.html"),
            SpineEntry::new("chapter-1", "OEBPS/ch1.html"),
        ];

        let toc = synthesize_from_spine(&spine);

        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].title, "intro");
        assert_eq!(toc[0].href, "OEBPS/intro.html");
        assert_eq!(toc[1].title, "chapter 1");
    }

    #[test]
    fn test_synthesize_from_empty_spine() {
        assert!(synthesize_from_spine(&[]).is_empty());
    }
}
