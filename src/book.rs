//! Per-book value objects shared across the pipeline.

/// One book's worth of pipeline state.
///
/// The spine and toc sequences are cross-referenced purely by normalized
/// href equality; no direct links between the two are retained.
#[derive(Debug, Clone, Default)]
pub struct Book {
    /// Derived from the archive file name, minus the `.epub` suffix.
    pub name: String,
    /// Reading order, preserved verbatim from the package document.
    pub spine: Vec<SpineEntry>,
    /// Logical chapter order from whichever TOC strategy succeeded.
    pub toc: Vec<TocEntry>,
    pub toc_source: TocSource,
}

impl Book {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Total words across the spine, counted independently of any TOC.
    pub fn spine_words(&self) -> u64 {
        self.spine.iter().map(|item| item.words).sum()
    }
}

/// An item in the reading order.
///
/// Created during the spine parse with its word count filled in
/// immediately afterwards; read-only from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpineEntry {
    /// Manifest id referenced by the spine `idref`.
    pub id: String,
    /// Normalized tree-relative path to the content file.
    pub href: String,
    pub words: u64,
}

impl SpineEntry {
    pub fn new(id: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            href: href.into(),
            words: 0,
        }
    }
}

/// A logical chapter with a title and a content reference.
///
/// `words` starts at zero and is mutated only by the allocator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Chapter title, trimmed of surrounding whitespace.
    pub title: String,
    /// Normalized tree-relative path; empty when the entry carries no
    /// content reference.
    pub href: String,
    pub words: u64,
}

impl TocEntry {
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            words: 0,
        }
    }
}

/// Which strategy produced a book's table of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TocSource {
    /// Legacy NCX navigation map.
    Ncx,
    /// Anchor list scanned from an HTML/XHTML TOC document.
    HtmlAnchors,
    /// Synthesized from the spine itself; the guaranteed fallback.
    #[default]
    SpineSynthesis,
}

/// One report row: a chapter title and its aggregated word count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterCount {
    pub book: String,
    pub title: String,
    pub words: u64,
}
