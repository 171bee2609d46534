//! Legacy NCX navigation-map parsing.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::book::TocEntry;
use crate::error::Result;
use crate::href;
use crate::package::{local_name, resolve_entity};

// Per-navPoint parse state. `order` is the position of the navPoint's
// start tag, so nested points flatten back out in document order.
struct NavPoint {
    order: usize,
    label: String,
    src: Option<String>,
}

/// Parse the navMap out of NCX content.
///
/// Every navPoint contributes one entry: title is the concatenation of
/// all text under its navLabel (trimmed), href is the content `src`
/// resolved against `base_dir`. A missing navMap yields an empty list,
/// which the resolver treats as strategy failure.
pub(super) fn parse(content: &str, base_dir: &str) -> Result<Vec<TocEntry>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut in_nav_map = false;
    let mut label_depth = 0usize;
    let mut next_order = 0usize;
    let mut stack: Vec<NavPoint> = Vec::new();
    let mut flattened: Vec<(usize, TocEntry)> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"navMap" => in_nav_map = true,
                    b"navPoint" if in_nav_map => {
                        stack.push(NavPoint {
                            order: next_order,
                            label: String::new(),
                            src: None,
                        });
                        next_order += 1;
                    }
                    b"navLabel" if in_nav_map => label_depth += 1,
                    b"content" if in_nav_map => read_src(&e, base_dir, &mut stack),
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                let name = e.name();
                if local_name(name.as_ref()) == b"content" && in_nav_map {
                    read_src(&e, base_dir, &mut stack);
                }
            }
            Ok(Event::Text(e)) => {
                if label_depth > 0
                    && let Some(point) = stack.last_mut()
                {
                    point.label.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if label_depth > 0
                    && let Some(point) = stack.last_mut()
                    && let Some(resolved) = resolve_entity(&String::from_utf8_lossy(e.as_ref()))
                {
                    point.label.push_str(&resolved);
                }
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"navMap" => in_nav_map = false,
                    b"navLabel" => label_depth = label_depth.saturating_sub(1),
                    b"navPoint" => {
                        if let Some(point) = stack.pop() {
                            let title = point.label.trim().to_string();
                            let entry_href = point.src.unwrap_or_default();
                            // A point with neither label nor target says nothing
                            if !title.is_empty() || !entry_href.is_empty() {
                                flattened.push((point.order, TocEntry::new(title, entry_href)));
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

    flattened.sort_by_key(|(order, _)| *order);
    Ok(flattened.into_iter().map(|(_, entry)| entry).collect())
}

fn read_src(e: &quick_xml::events::BytesStart<'_>, base_dir: &str, stack: &mut Vec<NavPoint>) {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"src"
            && let Some(point) = stack.last_mut()
            && point.src.is_none()
        {
            let raw = String::from_utf8_lossy(&attr.value).into_owned();
            point.src = Some(href::resolve(base_dir, &raw));
        }
    }
}
