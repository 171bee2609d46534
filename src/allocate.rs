//! Carry-forward allocation of spine word counts onto TOC entries.

use std::collections::HashSet;

use tracing::warn;

use crate::book::{Book, TocEntry};

/// Fold the spine's word counts into the book's chapters.
///
/// The spine is walked in reading order with a "current chapter" pointer.
/// A spine entry whose href matches a TOC entry moves the pointer there;
/// one with no TOC entry of its own carries forward into the chapter
/// already pointed at, which is how multi-file chapters collapse into a
/// single total. Matching is by normalized href equality only, never by
/// spine position, and a duplicated TOC href matches its last occurrence.
///
/// The pointer starts at a synthetic whole-book entry (titled with the
/// book name) so content ahead of the first recognizable chapter is
/// still attributed somewhere; that entry is only emitted when it
/// actually accumulated words. Σ emitted words = Σ spine words.
pub fn allocate(book: &Book) -> Vec<TocEntry> {
    let spine_hrefs: HashSet<&str> = book.spine.iter().map(|item| item.href.as_str()).collect();
    for entry in &book.toc {
        if !entry.href.is_empty() && !spine_hrefs.contains(entry.href.as_str()) {
            warn!(title = %entry.title, href = %entry.href, "TOC entry matches no spine entry");
        }
    }

    // Index 0 is the synthetic whole-book entry
    let mut chapters = Vec::with_capacity(book.toc.len() + 1);
    chapters.push(TocEntry::new(&book.name, ""));
    chapters.extend(book.toc.iter().cloned());

    let mut current = 0usize;
    for item in &book.spine {
        if let Some(pos) = chapters[1..]
            .iter()
            .rposition(|entry| entry.href == item.href)
        {
            current = pos + 1;
        }
        chapters[current].words += item.words;
    }

    if chapters[0].words == 0 {
        chapters.remove(0);
    }
    chapters
}
