//! Measurement surfaces for pagination

use crate::layout::font::FontMetrics;
use crate::layout::paginator::LayoutParams;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::hash::{Hash, Hasher};
use unicode_linebreak::{linebreaks, BreakOpportunity};

/// Capability to report the rendered pixel height of a block of text at the
/// current layout.
///
/// Returning `None` marks the surface unusable for this call (for example the
/// backing JS callback threw); the measured pagination pass is abandoned and
/// the caller falls back to the character-count estimator.
pub trait MeasurementSurface {
    fn measure_height(&self, content: &str, params: &LayoutParams) -> Option<f32>;
}

/// Deterministic surface backed by font metrics and greedy line wrapping.
///
/// Heights are estimated as wrapped-line count times line height, wrapping at
/// Unicode line-break opportunities. Results are memoized by content hash
/// across the paginator's repeated candidate measurements.
pub struct MetricsSurface {
    cache: RefCell<FxHashMap<u64, f32>>,
}

impl MetricsSurface {
    pub fn new() -> Self {
        Self {
            cache: RefCell::new(FxHashMap::default()),
        }
    }
}

impl Default for MetricsSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasurementSurface for MetricsSurface {
    fn measure_height(&self, content: &str, params: &LayoutParams) -> Option<f32> {
        let key = measure_key(content, params);
        if let Some(height) = self.cache.borrow().get(&key) {
            return Some(*height);
        }

        let metrics = FontMetrics::for_class(params.font_size);
        let lines = wrapped_line_count(content, &metrics, params.viewport_width_px);
        let height = lines as f32 * metrics.line_height;

        self.cache.borrow_mut().insert(key, height);
        Some(height)
    }
}

/// Cache key over content and the layout inputs that affect height.
fn measure_key(content: &str, params: &LayoutParams) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    params.font_size.hash(&mut hasher);
    params.viewport_width_px.to_bits().hash(&mut hasher);
    hasher.finish()
}

/// Greedy wrap: break at the last fitting opportunity once the accumulated
/// run exceeds the viewport width. A single unbreakable run wider than the
/// viewport occupies one overflowing line.
fn wrapped_line_count(text: &str, metrics: &FontMetrics, max_width: f32) -> usize {
    if text.is_empty() {
        return 1;
    }

    let mut lines = 1;
    let mut line_start = 0;
    let mut last_fit = 0;

    for (end, opportunity) in linebreaks(text) {
        let run = text[line_start..end].trim_end();
        if metrics.text_width(run) > max_width && last_fit > line_start {
            lines += 1;
            line_start = last_fit;
        }

        if opportunity == BreakOpportunity::Mandatory && end < text.len() {
            lines += 1;
            line_start = end;
        }

        last_fit = end;
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font::FontSizeClass;
    use crate::layout::paginator::LayoutParams;

    fn params() -> LayoutParams {
        LayoutParams {
            font_size: FontSizeClass::Medium,
            viewport_width_px: 200.0,
            page_height_budget_px: 400.0,
        }
    }

    fn height(text: &str) -> f32 {
        MetricsSurface::new()
            .measure_height(text, &params())
            .expect("metrics surface always measures")
    }

    #[test]
    fn test_empty_text_is_one_line() {
        let line = FontSizeClass::Medium.line_height();
        assert_eq!(height(""), line);
    }

    #[test]
    fn test_short_text_is_one_line() {
        let line = FontSizeClass::Medium.line_height();
        assert_eq!(height("short"), line);
    }

    #[test]
    fn test_longer_text_is_taller() {
        let word = "kalima ";
        let short = word.repeat(4);
        let long = word.repeat(60);
        assert!(height(&long) > height(&short));
    }

    #[test]
    fn test_hard_newlines_add_lines() {
        let line = FontSizeClass::Medium.line_height();
        assert_eq!(height("alpha"), line);
        assert_eq!(height("alpha\nbeta\ngamma"), line * 3.0);
    }

    #[test]
    fn test_unbreakable_run_single_line() {
        // Wider than the viewport but with no break opportunity
        let run = "x".repeat(200);
        let line = FontSizeClass::Medium.line_height();
        assert_eq!(height(&run), line);
    }

    #[test]
    fn test_cache_hit_matches_fresh_measurement() {
        let surface = MetricsSurface::new();
        let p = params();
        let first = surface.measure_height("some body text here", &p);
        let second = surface.measure_height("some body text here", &p);
        assert_eq!(first, second);
    }

    #[test]
    fn test_font_step_changes_measurement() {
        let surface = MetricsSurface::new();
        let mut small = params();
        small.font_size = FontSizeClass::Small;
        let mut large = params();
        large.font_size = FontSizeClass::Large;

        let text = "word ".repeat(40);
        let h_small = surface.measure_height(&text, &small).unwrap();
        let h_large = surface.measure_height(&text, &large).unwrap();
        assert!(h_large > h_small);
    }
}
