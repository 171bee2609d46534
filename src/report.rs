//! Report rendering (plain text and CSV) and output-file writing.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::book::ChapterCount;
use crate::error::Result;

/// One processed book's contribution to the report.
#[derive(Debug, Clone)]
pub struct BookReport {
    /// Archive file name, shown in the text-mode banner.
    pub file_name: String,
    pub rows: Vec<ChapterCount>,
}

/// Render the plain-text report: a `processing` banner per book followed
/// by one `Title: N words` line per chapter.
pub fn render_text(reports: &[BookReport]) -> String {
    let mut out = String::new();
    for report in reports {
        out.push_str(&format!("\n\nprocessing {}\n", report.file_name));
        for row in &report.rows {
            out.push_str(&format!("{}: {} words\n", row.title, row.words));
        }
    }
    out
}

/// Render the CSV report with its `"Book","Title","Words"` header.
pub fn render_csv(reports: &[BookReport]) -> String {
    let mut out = String::from("\"Book\",\"Title\",\"Words\"\n");
    for report in reports {
        for row in &report.rows {
            out.push_str(&format!(
                "{},{},{}\n",
                csv_field(&row.book),
                csv_field(&row.title),
                row.words
            ));
        }
    }
    out
}

/// Write the report into the input directory as `results.txt` or
/// `results.csv`, returning the path written.
pub fn write_report(dir: &Path, csv: bool, reports: &[BookReport]) -> Result<PathBuf> {
    let (name, contents) = if csv {
        ("results.csv", render_csv(reports))
    } else {
        ("results.txt", render_text(reports))
    };

    let path = dir.join(name);
    let mut file = std::fs::File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

// Quote a CSV field, doubling any embedded quotes.
fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<BookReport> {
        vec![BookReport {
            file_name: "novel.epub".to_string(),
            rows: vec![
                ChapterCount {
                    book: "novel".to_string(),
                    title: "Chapter One".to_string(),
                    words: 150,
                },
                ChapterCount {
                    book: "novel".to_string(),
                    title: "Chapter Two".to_string(),
                    words: 80,
                },
            ],
        }]
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample());
        assert!(text.contains("processing novel.epub\n"));
        assert!(text.contains("Chapter One: 150 words\n"));
        assert!(text.contains("Chapter Two: 80 words\n"));
    }

    #[test]
    fn test_render_csv() {
        let csv = render_csv(&sample());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "\"Book\",\"Title\",\"Words\"");
        assert_eq!(lines[1], "\"novel\",\"Chapter One\",150");
        assert_eq!(lines[2], "\"novel\",\"Chapter Two\",80");
    }

    #[test]
    fn test_csv_escapes_embedded_quotes() {
        assert_eq!(csv_field(r#"Say "when""#), r#""Say ""when""""#);
    }

    #[test]
    fn test_csv_header_present_with_no_books() {
        assert_eq!(render_csv(&[]), "\"Book\",\"Title\",\"Words\"\n");
    }

    #[test]
    fn test_write_report_paths() {
        let tmp = tempfile::TempDir::new().unwrap();

        let path = write_report(tmp.path(), false, &sample()).unwrap();
        assert!(path.ends_with("results.txt"));
        assert!(path.exists());

        let path = write_report(tmp.path(), true, &sample()).unwrap();
        assert!(path.ends_with("results.csv"));
        assert!(std::fs::read_to_string(path).unwrap().starts_with("\"Book\""));
    }
}
