//! Font size steps and metrics for layout

use serde::{Deserialize, Serialize};

/// Reader font size setting, three discrete steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSizeClass {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSizeClass {
    /// Font size in logical pixels.
    pub fn px(&self) -> f32 {
        match self {
            FontSizeClass::Small => 16.0,
            FontSizeClass::Medium => 18.0,
            FontSizeClass::Large => 22.0,
        }
    }

    /// Line height in logical pixels.
    pub fn line_height(&self) -> f32 {
        // 1.6 matches the reader page stylesheet
        self.px() * 1.6
    }

    /// CSS class the web reader applies to page content.
    pub fn css_class(&self) -> &'static str {
        match self {
            FontSizeClass::Small => "reader-text-sm",
            FontSizeClass::Medium => "reader-text-md",
            FontSizeClass::Large => "reader-text-lg",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FontSizeClass::Small => "small",
            FontSizeClass::Medium => "medium",
            FontSizeClass::Large => "large",
        }
    }

    /// Parse a setting name as it arrives from the UI.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "small" => Some(FontSizeClass::Small),
            "medium" => Some(FontSizeClass::Medium),
            "large" => Some(FontSizeClass::Large),
            _ => None,
        }
    }
}

/// Metrics used for offline height estimation.
#[derive(Debug, Clone, Copy)]
pub struct FontMetrics {
    /// Line height in logical pixels
    pub line_height: f32,
    /// Average advance width per grapheme cluster
    pub avg_char_width: f32,
}

impl FontMetrics {
    /// Metrics for a font size step. The average width is tuned for mixed
    /// Arabic/Latin prose in the reader's default face.
    pub fn for_class(class: FontSizeClass) -> Self {
        Self {
            line_height: class.line_height(),
            avg_char_width: class.px() * 0.52,
        }
    }

    /// Estimated rendered width of a text run.
    pub fn text_width(&self, text: &str) -> f32 {
        use unicode_segmentation::UnicodeSegmentation;
        text.graphemes(true).count() as f32 * self.avg_char_width
    }
}
