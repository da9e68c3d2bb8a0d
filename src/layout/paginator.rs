//! Measurement-based pagination
//!
//! Pagination is restartable, never incremental: each run recomputes the page
//! list from scratch, and callers swap the finished list in atomically.

use crate::document::{marker_segments, Document};
use crate::layout::estimate::estimate_pages;
use crate::layout::font::FontSizeClass;
use crate::layout::measure::MeasurementSurface;
use log::debug;
use serde::{Deserialize, Serialize};

/// Fixed page viewport plus the font setting, the inputs that drive
/// pagination. Changing any field invalidates the current page list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub font_size: FontSizeClass,
    pub viewport_width_px: f32,
    pub page_height_budget_px: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            font_size: FontSizeClass::Medium,
            viewport_width_px: 400.0,
            page_height_budget_px: 560.0,
        }
    }
}

/// Kind of page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Title,
    Body,
}

/// One unit of paginated output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 0-based; index 0 is always the synthetic title page
    pub index: usize,
    pub kind: PageKind,
    /// The title, or a blank-line-joined run of body paragraphs
    pub content: String,
}

impl Page {
    pub fn is_title(&self) -> bool {
        self.kind == PageKind::Title
    }
}

/// Paginate a document into fixed-viewport pages.
///
/// The measured pass runs when a surface is present and answers every
/// measurement; otherwise the character-count estimator takes over. Page 0 is
/// always the synthetic title page, so the result is never empty.
pub fn paginate(
    document: &Document,
    params: &LayoutParams,
    surface: Option<&dyn MeasurementSurface>,
) -> Vec<Page> {
    let pages = surface
        .and_then(|s| measured_pages(document, params, s))
        .unwrap_or_else(|| estimate_pages(document));

    debug!(
        "paginated {:?}: {} pages at {:?}",
        document.title(),
        pages.len(),
        params.font_size
    );
    pages
}

/// The measured pass. Bails with `None` as soon as the surface fails a
/// measurement; partial output is discarded.
fn measured_pages(
    document: &Document,
    params: &LayoutParams,
    surface: &dyn MeasurementSurface,
) -> Option<Vec<Page>> {
    let mut builder = PageListBuilder::new(document.title());

    for paragraph in document.paragraphs() {
        for (i, segment) in marker_segments(paragraph).iter().enumerate() {
            // Each marker closes the page accumulated so far
            if i > 0 {
                builder.flush();
            }
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            let candidate = builder.candidate(segment);
            let height = surface.measure_height(&candidate, params)?;
            builder.push(segment, height <= params.page_height_budget_px);
        }
    }

    Some(builder.finish())
}

/// Accumulates paragraph segments into pages. Shared by the measured pass and
/// the character-count estimator, so marker and boundary behavior cannot
/// drift between the two.
pub(crate) struct PageListBuilder {
    pages: Vec<Page>,
    accumulator: String,
}

impl PageListBuilder {
    /// Start a page list with the synthetic title page at index 0.
    pub(crate) fn new(title: &str) -> Self {
        Self {
            pages: vec![Page {
                index: 0,
                kind: PageKind::Title,
                content: title.to_string(),
            }],
            accumulator: String::new(),
        }
    }

    /// The current page's text as it would read with `segment` appended.
    pub(crate) fn candidate(&self, segment: &str) -> String {
        if self.accumulator.is_empty() {
            segment.to_string()
        } else {
            format!("{}\n\n{}", self.accumulator, segment)
        }
    }

    /// Accept the segment onto the current page, closing the page first when
    /// the candidate no longer fits and the page already has content. A
    /// segment that does not fit on its own still lands alone on a page.
    pub(crate) fn push(&mut self, segment: &str, candidate_fits: bool) {
        if !candidate_fits && !self.accumulator.is_empty() {
            self.flush();
        }
        if !self.accumulator.is_empty() {
            self.accumulator.push_str("\n\n");
        }
        self.accumulator.push_str(segment);
    }

    /// Close the current page if it has content.
    pub(crate) fn flush(&mut self) {
        if self.accumulator.is_empty() {
            return;
        }
        let content = std::mem::take(&mut self.accumulator);
        self.pages.push(Page {
            index: self.pages.len(),
            kind: PageKind::Body,
            content,
        });
    }

    pub(crate) fn finish(mut self) -> Vec<Page> {
        self.flush();
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PAGE_BREAK_MARKER;

    /// Surface whose "pixel height" is the byte length of the content, so a
    /// page budget of N px means N bytes of text.
    struct ByteHeightSurface;

    impl MeasurementSurface for ByteHeightSurface {
        fn measure_height(&self, content: &str, _params: &LayoutParams) -> Option<f32> {
            Some(content.len() as f32)
        }
    }

    /// Surface that always fails, forcing the fallback path.
    struct BrokenSurface;

    impl MeasurementSurface for BrokenSurface {
        fn measure_height(&self, _content: &str, _params: &LayoutParams) -> Option<f32> {
            None
        }
    }

    fn params_with_budget(budget: f32) -> LayoutParams {
        LayoutParams {
            page_height_budget_px: budget,
            ..LayoutParams::default()
        }
    }

    fn body_pages(pages: &[Page]) -> Vec<&str> {
        pages
            .iter()
            .filter(|p| !p.is_title())
            .map(|p| p.content.as_str())
            .collect()
    }

    #[test]
    fn test_title_page_always_first() {
        let doc = Document::new("My Novel", "");
        let pages = paginate(&doc, &LayoutParams::default(), Some(&ByteHeightSurface));
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].index, 0);
        assert!(pages[0].is_title());
        assert_eq!(pages[0].content, "My Novel");
    }

    #[test]
    fn test_two_short_paragraphs_share_a_page() {
        let doc = Document::new("T", "First.\n\nSecond.");
        let pages = paginate(&doc, &params_with_budget(100.0), Some(&ByteHeightSurface));
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].content, "First.\n\nSecond.");
    }

    #[test]
    fn test_greedy_split_when_over_budget() {
        // Each paragraph is 10 bytes; two fit (22 bytes with the joiner),
        // three do not.
        let doc = Document::new("T", "aaaaaaaaaa\n\nbbbbbbbbbb\n\ncccccccccc");
        let pages = paginate(&doc, &params_with_budget(25.0), Some(&ByteHeightSurface));
        assert_eq!(
            body_pages(&pages),
            vec!["aaaaaaaaaa\n\nbbbbbbbbbb", "cccccccccc"]
        );
    }

    #[test]
    fn test_no_paragraph_split_or_duplicated() {
        let body = (0..20)
            .map(|i| format!("paragraph number {i:02} with a fixed width"))
            .collect::<Vec<_>>()
            .join("\n\n");
        let doc = Document::new("T", body.clone());
        let pages = paginate(&doc, &params_with_budget(90.0), Some(&ByteHeightSurface));

        let rejoined = body_pages(&pages).join("\n\n");
        assert_eq!(rejoined, body);
    }

    #[test]
    fn test_oversized_paragraph_sits_alone() {
        let huge = "z".repeat(500);
        let doc = Document::new("T", format!("small\n\n{huge}\n\nalso small"));
        let pages = paginate(&doc, &params_with_budget(50.0), Some(&ByteHeightSurface));
        assert_eq!(
            body_pages(&pages),
            vec!["small", huge.as_str(), "also small"]
        );
    }

    #[test]
    fn test_marker_forces_break_even_when_fitting() {
        let body = format!("A\n\nB{PAGE_BREAK_MARKER}C\n\nD");
        let doc = Document::new("T", body);
        // Budget far larger than the whole body: only the marker breaks
        let pages = paginate(&doc, &params_with_budget(10_000.0), Some(&ByteHeightSurface));
        assert_eq!(body_pages(&pages), vec!["A\n\nB", "C\n\nD"]);
    }

    #[test]
    fn test_marker_and_height_rule_together() {
        // Pre-marker run exceeds the budget on its own, so the height rule
        // splits it and the marker still ends the final pre-marker page.
        let body = format!(
            "aaaaaaaaaa\n\nbbbbbbbbbb{PAGE_BREAK_MARKER}cccccccccc"
        );
        let doc = Document::new("T", body);
        let pages = paginate(&doc, &params_with_budget(15.0), Some(&ByteHeightSurface));
        assert_eq!(
            body_pages(&pages),
            vec!["aaaaaaaaaa", "bbbbbbbbbb", "cccccccccc"]
        );
    }

    #[test]
    fn test_two_markers_force_three_boundaries() {
        let body = format!(
            "one{PAGE_BREAK_MARKER}two{PAGE_BREAK_MARKER}three"
        );
        let doc = Document::new("T", body);
        let pages = paginate(&doc, &params_with_budget(10_000.0), Some(&ByteHeightSurface));
        assert_eq!(body_pages(&pages), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_marker_at_paragraph_edge_makes_no_empty_page() {
        let body = format!("lead{PAGE_BREAK_MARKER}");
        let doc = Document::new("T", body);
        let pages = paginate(&doc, &params_with_budget(10_000.0), Some(&ByteHeightSurface));
        assert_eq!(body_pages(&pages), vec!["lead"]);
    }

    #[test]
    fn test_broken_surface_falls_back_to_estimator() {
        let doc = Document::new("T", "First.\n\nSecond.");
        let pages = paginate(&doc, &LayoutParams::default(), Some(&BrokenSurface));
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].content, "First.\n\nSecond.");
    }

    #[test]
    fn test_no_surface_falls_back_to_estimator() {
        let doc = Document::new("T", "First.\n\nSecond.");
        let pages = paginate(&doc, &LayoutParams::default(), None);
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn test_whitespace_only_body_yields_title_only() {
        let doc = Document::new("T", "  \n\n \t ");
        let pages = paginate(&doc, &LayoutParams::default(), Some(&ByteHeightSurface));
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_indices_are_dense() {
        let doc = Document::new("T", "a\n\nb\n\nc");
        let pages = paginate(&doc, &params_with_budget(1.0), Some(&ByteHeightSurface));
        for (i, page) in pages.iter().enumerate() {
            assert_eq!(page.index, i);
        }
    }
}
