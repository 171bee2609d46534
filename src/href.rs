//! Reference normalization.
//!
//! Spine entries and TOC entries are matched by comparing normalized
//! hrefs, so every reference that enters the pipeline goes through
//! [`normalize`] (or [`resolve`], which also joins against the directory
//! of the file the reference was found in). Normalization strips the
//! fragment, percent-decodes, and collapses `.`/`..` path segments.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

/// Canonicalize a raw reference into a comparable file-relative path.
///
/// Idempotent: the result is a fixpoint, so feeding a normalized href
/// back in returns it unchanged. Malformed percent-escapes pass through
/// undecoded rather than failing.
pub fn normalize(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = normalize_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Join a reference against the directory of the file that contained it,
/// then normalize. `base` is the containing file's directory relative to
/// the tree root (empty at the root). Empty references stay empty.
pub fn resolve(base: &str, raw: &str) -> String {
    let href = normalize(raw);
    if href.is_empty() || base.is_empty() {
        return href;
    }
    // Join the raw reference, not the pre-normalized one: a leading `..`
    // has to climb out of `base` before segment collapse clamps it.
    normalize(&format!("{base}/{raw}"))
}

/// Directory portion of a tree-relative path, for use as a [`resolve`]
/// base. `"OEBPS/toc.ncx"` yields `"OEBPS"`; a bare file name yields `""`.
pub fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

// A single strip/decode/clean pass. Not idempotent on its own: an escape
// can decode into another escape (`%2523`) or into a fresh `#`, which is
// why `normalize` iterates this to a fixpoint. Every change this function
// makes shortens the string, so the iteration terminates.
fn normalize_once(raw: &str) -> String {
    let without_fragment = raw.split('#').next().unwrap_or("");
    let decoded: Cow<'_, str> = match percent_decode_str(without_fragment).decode_utf8() {
        Ok(decoded) => decoded,
        // Escapes that decode to invalid UTF-8 pass through untouched.
        Err(_) => Cow::Borrowed(without_fragment),
    };
    clean_segments(&decoded)
}

// Collapse `.` and `..` segments and redundant slashes. `..` at the root
// is dropped rather than preserved; references cannot climb out of the
// extracted tree.
fn clean_segments(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
