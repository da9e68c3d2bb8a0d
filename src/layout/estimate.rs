//! Character-count fallback pagination
//!
//! Used when no measurement surface is mounted (or the surface fails): pages
//! are cut by grapheme count instead of pixel height, so pagination always
//! terminates with a usable page list.

use crate::document::{marker_segments, Document};
use crate::layout::paginator::{Page, PageListBuilder};
use unicode_segmentation::UnicodeSegmentation;

/// Grapheme budget per page. A tuned constant, independent of the font size
/// setting.
pub const CHARS_PER_PAGE: usize = 900;

/// Paginate by grapheme count alone. Never fails on malformed or empty
/// input; a whitespace-only body yields just the title page.
pub fn estimate_pages(document: &Document) -> Vec<Page> {
    let mut builder = PageListBuilder::new(document.title());

    for paragraph in document.paragraphs() {
        for (i, segment) in marker_segments(paragraph).iter().enumerate() {
            if i > 0 {
                builder.flush();
            }
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            let length = builder.candidate(segment).graphemes(true).count();
            builder.push(segment, length <= CHARS_PER_PAGE);
        }
    }

    builder.finish()
}
