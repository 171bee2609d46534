//! Synthetic EPUB fixtures for integration tests.
#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Write an EPUB archive containing the given (path, contents) entries.
pub fn build_epub(dir: &Path, file_name: &str, entries: &[(&str, String)]) -> PathBuf {
    let path = dir.join(file_name);
    let file = std::fs::File::create(&path).expect("create epub");
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    zip.start_file("mimetype", options).expect("start mimetype");
    zip.write_all(b"application/epub+zip").expect("write mimetype");

    for (entry_path, contents) in entries {
        zip.start_file(*entry_path, options).expect("start entry");
        zip.write_all(contents.as_bytes()).expect("write entry");
    }

    zip.finish().expect("finish epub");
    path
}

/// An XHTML content file containing exactly `n` words in one paragraph.
pub fn content_with_words(n: usize) -> String {
    let words: Vec<String> = (0..n).map(|i| format!("word{i}")).collect();
    format!(
        "<html><head><title>t</title></head><body><p>{}</p></body></html>",
        words.join(" ")
    )
}

/// A package document with one manifest item per (id, href) and a spine
/// listing `spine_ids` in order. `toc_id` fills the `<spine toc>` pointer.
pub fn opf(items: &[(&str, &str)], spine_ids: &[&str], toc_id: Option<&str>) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\"?>\n<package xmlns=\"http://www.idpf.org/2007/opf\" version=\"2.0\">\n  <manifest>\n",
    );
    for (id, href) in items {
        out.push_str(&format!("    <item href=\"{href}\" id=\"{id}\"/>\n"));
    }
    match toc_id {
        Some(id) => out.push_str(&format!("  </manifest>\n  <spine toc=\"{id}\">\n")),
        None => out.push_str("  </manifest>\n  <spine>\n"),
    }
    for id in spine_ids {
        out.push_str(&format!("    <itemref idref=\"{id}\"/>\n"));
    }
    out.push_str("  </spine>\n</package>\n");
    out
}

/// An NCX document with one navPoint per (title, src).
pub fn ncx(points: &[(&str, &str)]) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\"?>\n<ncx xmlns=\"http://www.daisy.org/z3986/2005/ncx/\" version=\"2005-1\">\n  <navMap>\n",
    );
    for (i, (title, src)) in points.iter().enumerate() {
        out.push_str(&format!(
            "    <navPoint id=\"np{i}\" playOrder=\"{}\">\n      <navLabel><text>{title}</text></navLabel>\n      <content src=\"{src}\"/>\n    </navPoint>\n",
            i + 1
        ));
    }
    out.push_str("  </navMap>\n</ncx>\n");
    out
}

/// An HTML TOC document with one anchor per (title, href).
pub fn html_toc(anchors: &[(&str, &str)]) -> String {
    let mut out = String::from("<html><body><ul>\n");
    for (title, href) in anchors {
        out.push_str(&format!("<li><a href=\"{href}\">{title}</a></li>\n"));
    }
    out.push_str("</ul></body></html>\n");
    out
}
