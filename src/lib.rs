//! # booktally
//!
//! Per-chapter word counts for EPUB e-books, grouped by the book's table
//! of contents rather than by raw file boundaries.
//!
//! EPUB content is split across many physical HTML files that rarely map
//! 1:1 to chapters. booktally reads the package document for the
//! authoritative spine order, resolves the logical chapter structure
//! (NCX navigation map, then an HTML anchor TOC, then synthesis from the
//! spine), counts the words in every spine file, and folds those counts
//! onto chapters with a carry-forward rule so multi-file chapters come
//! out as one total.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! // Per-chapter counts for one book
//! let report = booktally::process_book(Path::new("novel.epub"))?;
//! for row in &report.rows {
//!     println!("{}: {} words", row.title, row.words);
//! }
//!
//! // Or a whole directory, written to results.txt inside it
//! let summary = booktally::run(Path::new("/srv/books"), false)?;
//! println!("{} books, {} failed", summary.discovered, summary.failed);
//! # Ok::<(), booktally::Error>(())
//! ```

pub mod allocate;
pub mod book;
pub mod count;
pub mod error;
pub mod extract;
pub mod href;
pub mod package;
pub mod pipeline;
pub mod report;
pub mod toc;
pub(crate) mod util;

pub use book::{Book, ChapterCount, SpineEntry, TocEntry, TocSource};
pub use error::{Error, Result};
pub use pipeline::{RunSummary, process_book, run};
pub use report::BookReport;
