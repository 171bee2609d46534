//! Error types for booktally operations.

use thiserror::Error;

/// Errors that can occur while processing a book.
///
/// Only [`Error::NoPackageDocument`] is fatal for a book; conditions that
/// arise per spine entry or per TOC file are logged and absorbed before
/// they reach this type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("no package document (.opf) found in {0}")]
    NoPackageDocument(String),

    #[error("invalid EPUB: {0}")]
    InvalidEpub(String),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
