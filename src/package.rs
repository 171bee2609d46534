//! Package document (OPF) location and parsing.
//!
//! The package document is the book's authority on reading order: its
//! manifest maps ids to hrefs and its spine lists those ids in document
//! order. Everything downstream (word counting, TOC resolution,
//! allocation) hangs off the spine built here.

use std::collections::HashMap;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::book::SpineEntry;
use crate::count;
use crate::error::{Error, Result};
use crate::extract;
use crate::href;
use crate::util::strip_bom;

/// Parsed package document data.
pub struct PackageDoc {
    /// Maps manifest id to a normalized tree-relative href.
    pub manifest: HashMap<String, String>,
    /// Spine idrefs in document order.
    pub spine_ids: Vec<String>,
    /// Manifest id named by `<spine toc="...">`, when present.
    pub toc_id: Option<String>,
}

/// Locate the package document in an extracted tree.
///
/// Returns its tree-relative path. When an archive carries more than one
/// `.opf`, the shortest path wins (ties lexicographic); see DESIGN.md.
/// No package document is the one fatal-per-book condition.
pub fn find_package_doc(root: &Path) -> Result<String> {
    extract::find_by_extension(root, "opf")
        .ok_or_else(|| Error::NoPackageDocument(root.display().to_string()))
}

/// Read and parse the package document at `opf_path` (tree-relative).
pub fn read_package_doc(root: &Path, opf_path: &str) -> Result<PackageDoc> {
    let bytes = std::fs::read(root.join(opf_path))?;
    let content = String::from_utf8(strip_bom(&bytes).to_vec())?;
    parse_package(&content, href::parent_dir(opf_path))
}

/// Parse manifest and spine out of package-document XML.
///
/// Manifest hrefs are resolved against `base_dir` (the package document's
/// directory) and normalized, so they compare directly against every
/// other href in the pipeline.
pub fn parse_package(content: &str, base_dir: &str) -> Result<PackageDoc> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut manifest: HashMap<String, String> = HashMap::new();
    let mut spine_ids: Vec<String> = Vec::new();
    let mut toc_id: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let name = e.name();
                let local = local_name(name.as_ref());

                match local {
                    b"item" => {
                        let mut id = String::new();
                        let mut item_href = String::new();

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"id" => id = String::from_utf8(attr.value.to_vec())?,
                                b"href" => item_href = String::from_utf8(attr.value.to_vec())?,
                                _ => {}
                            }
                        }

                        if !id.is_empty() {
                            manifest.insert(id, href::resolve(base_dir, &item_href));
                        }
                    }
                    b"itemref" => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"idref" {
                                spine_ids.push(String::from_utf8(attr.value.to_vec())?);
                            }
                        }
                    }
                    b"spine" => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"toc" {
                                toc_id = Some(String::from_utf8(attr.value.to_vec())?);
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    Ok(PackageDoc {
        manifest,
        spine_ids,
        toc_id,
    })
}

/// Build the ordered spine and fill in word counts.
///
/// Spine order is preserved verbatim. An idref with no manifest match
/// cannot be word-counted and is dropped, with a diagnostic. Counting
/// runs in parallel across the spine files; each count touches only its
/// own file, and the entries keep their positions.
pub fn build_spine(root: &Path, doc: &PackageDoc) -> Vec<SpineEntry> {
    let mut spine: Vec<SpineEntry> = doc
        .spine_ids
        .iter()
        .filter_map(|id| match doc.manifest.get(id) {
            Some(item_href) => Some(SpineEntry::new(id, item_href)),
            None => {
                warn!(idref = %id, "spine idref has no manifest entry, dropping");
                None
            }
        })
        .collect();

    spine.par_iter_mut().for_each(|entry| {
        entry.words = count::count_file(&root.join(&entry.href));
        debug!(href = %entry.href, words = entry.words, "counted spine entry");
    });

    spine
}

// ----------------------------------------------------------------------------
// Shared XML helpers
// ----------------------------------------------------------------------------

/// Extract the local name from a namespaced XML name
/// (e.g. `opf:item` to `item`).
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

/// Resolve XML entity references, named and numeric.
pub(crate) fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    if let Some(hex) = entity.strip_prefix("#x") {
        if let Ok(code) = u32::from_str_radix(hex, 16)
            && let Some(c) = char::from_u32(code)
        {
            return Some(c.to_string());
        }
    } else if let Some(dec) = entity.strip_prefix('#')
        && let Ok(code) = dec.parse::<u32>()
        && let Some(c) = char::from_u32(code)
    {
        return Some(c.to_string());
    }

    None
}
