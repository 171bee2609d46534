//! Archive unpacking and extracted-tree scanning.
//!
//! An EPUB is a zip archive. Each book is unpacked into a [`TempDir`]
//! that lives exactly as long as that book's pipeline run; dropping the
//! [`ExtractedTree`] removes the transient files.

use std::fs::File;
use std::path::Path;

use tempfile::TempDir;
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::Result;

/// A book's unpacked file tree. Removed from disk on drop.
pub struct ExtractedTree {
    dir: TempDir,
}

impl ExtractedTree {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// Unpack one `.epub` archive into a transient directory.
pub fn unpack(archive_path: &Path) -> Result<ExtractedTree> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;
    let dir = TempDir::new()?;
    archive.extract(dir.path())?;
    Ok(ExtractedTree { dir })
}

/// Find the file with the given extension, as a forward-slash path
/// relative to `root`. When several match, the shortest path wins, ties
/// broken lexicographically, so the choice does not depend on
/// directory-walk order.
pub fn find_by_extension(root: &Path, extension: &str) -> Option<String> {
    scan(root, |name| {
        Path::new(name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
    })
}

/// Find the file whose name matches one of `names` (case-insensitive),
/// under the same shortest-path selection rule.
pub fn find_by_name(root: &Path, names: &[&str]) -> Option<String> {
    scan(root, |name| {
        names.iter().any(|n| name.eq_ignore_ascii_case(n))
    })
}

fn scan(root: &Path, matches: impl Fn(&str) -> bool) -> Option<String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| matches(&entry.file_name().to_string_lossy()))
        .filter_map(|entry| relative_path(root, entry.path()))
        .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
}

// Tree-relative path with forward-slash separators, matching the form
// hrefs take after normalization.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}
