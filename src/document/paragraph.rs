//! Paragraph splitting and page-break markers

use smallvec::SmallVec;

/// Literal token authors embed in body text to force a page boundary.
pub const PAGE_BREAK_MARKER: &str = "[pagebreak]";

/// Split body text into trimmed paragraphs.
///
/// Paragraphs are separated by blank lines; a line containing only
/// whitespace counts as blank. `\r\n` line endings are tolerated.
pub fn split_paragraphs(body: &str) -> Vec<&str> {
    let mut paragraphs = Vec::new();
    let mut start: Option<usize> = None;
    let mut offset = 0;

    for line in body.split_inclusive('\n') {
        if line.trim().is_empty() {
            if let Some(s) = start.take() {
                paragraphs.push(body[s..offset].trim());
            }
        } else if start.is_none() {
            start = Some(offset);
        }
        offset += line.len();
    }

    if let Some(s) = start {
        paragraphs.push(body[s..].trim());
    }

    paragraphs
}

/// Split a paragraph at page-break markers.
///
/// The marker is consumed as a separator. Segments are returned raw and
/// possibly empty (a marker at a paragraph edge leaves an empty segment);
/// the paginator decides what an empty segment means. The common no-marker
/// case stays inline on the stack.
pub fn marker_segments(paragraph: &str) -> SmallVec<[&str; 2]> {
    paragraph.split(PAGE_BREAK_MARKER).collect()
}
