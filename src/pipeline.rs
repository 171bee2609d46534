//! Per-book pipeline and the parallel batch driver.
//!
//! Each book's run is a pure function of its archive: unpack, read the
//! package document, count the spine, resolve the TOC, allocate. Books
//! have no data dependency on each other, so the batch fans out across
//! them; results come back in input order regardless of which book
//! finishes first.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{error, info, warn};

use crate::allocate;
use crate::book::{Book, ChapterCount};
use crate::error::Result;
use crate::extract;
use crate::package;
use crate::report::{self, BookReport};
use crate::toc;

/// What a batch run did, for the caller to turn into an exit code.
#[derive(Debug)]
pub struct RunSummary {
    /// Number of `.epub` archives discovered.
    pub discovered: usize,
    /// Books abandoned on a fatal-per-book error.
    pub failed: usize,
    /// Report file written.
    pub output: PathBuf,
}

/// Process every `.epub` in `dir` and write `results.txt` (or
/// `results.csv` with `csv`) into it.
///
/// Books are processed in parallel and merged in file-name order, so
/// repeated runs over an unchanged directory produce byte-identical
/// reports. A book that fails is logged and skipped; the batch always
/// attempts every book.
pub fn run(dir: &Path, csv: bool) -> Result<RunSummary> {
    let mut archives: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("epub"))
        })
        .collect();
    archives.sort();

    let discovered = archives.len();
    if discovered == 0 {
        warn!(dir = %dir.display(), "no .epub files found");
    }

    // Indexed map keeps results in archive order; the flatten below just
    // drops the failures without reshuffling anything.
    let outcomes: Vec<Option<BookReport>> = archives
        .par_iter()
        .map(|path| match process_book(path) {
            Ok(report) => Some(report),
            Err(e) => {
                error!(book = %path.display(), "skipping book: {e}");
                None
            }
        })
        .collect();
    let reports: Vec<BookReport> = outcomes.into_iter().flatten().collect();

    let failed = discovered - reports.len();
    let output = report::write_report(dir, csv, &reports)?;

    Ok(RunSummary {
        discovered,
        failed,
        output,
    })
}

/// Run one book through the whole pipeline.
///
/// The only fatal outcome is a missing or unreadable package document;
/// everything below that degrades to zero counts plus diagnostics.
pub fn process_book(archive_path: &Path) -> Result<BookReport> {
    let name = book_name(archive_path);
    let file_name = archive_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.clone());

    // 1. Unpack into a transient tree
    let tree = extract::unpack(archive_path)?;

    // 2. Locate and parse the package document
    let opf_path = package::find_package_doc(tree.root())?;
    let doc = package::read_package_doc(tree.root(), &opf_path)?;

    // 3. Build the spine and count each content file
    let mut book = Book::new(&name);
    book.spine = package::build_spine(tree.root(), &doc);

    // 4. Resolve the logical chapter structure
    let resolved = toc::resolve(tree.root(), &doc, &book.spine);
    book.toc = resolved.entries;
    book.toc_source = resolved.source;

    // 5. Allocate spine counts onto chapters
    let chapters = allocate::allocate(&book);
    if chapters.is_empty() {
        warn!(book = %name, "book produced no chapters");
    }
    info!(
        book = %name,
        source = ?book.toc_source,
        chapters = chapters.len(),
        words = book.spine_words(),
        "book processed"
    );

    let rows = chapters
        .into_iter()
        .map(|chapter| ChapterCount {
            book: name.clone(),
            title: chapter.title,
            words: chapter.words,
        })
        .collect();

    Ok(BookReport { file_name, rows })
}

fn book_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
