//! Document model for the reader

mod paragraph;

pub use paragraph::{marker_segments, split_paragraphs, PAGE_BREAK_MARKER};

/// Substitute title for all-whitespace input, so the title page and the
/// storage key stay non-empty.
const UNTITLED: &str = "Untitled";

/// The text a reading session opens: a title plus a free-form body.
///
/// The body is treated as immutable input; re-pagination happens by replacing
/// the document (or the layout parameters), never by editing it in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    title: String,
    body: String,
}

impl Document {
    /// Create a document. The title is trimmed; an all-whitespace title is
    /// replaced with a fixed placeholder.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        let title = title.into();
        let trimmed = title.trim();
        let title = if trimmed.is_empty() {
            UNTITLED.to_string()
        } else {
            trimmed.to_string()
        };

        Self {
            title,
            body: body.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Trimmed, blank-line-delimited paragraphs of the body.
    pub fn paragraphs(&self) -> Vec<&str> {
        split_paragraphs(&self.body)
    }

    /// Deterministic persistence key for this document's reading position.
    /// Injective in the title: distinct titles never share a key.
    pub fn storage_key(&self) -> String {
        format!("reading-position:{}", self.title)
    }

    /// Whether the document reads right-to-left, judged from the first
    /// strongly-directional character of the title, then the body.
    pub fn is_rtl(&self) -> bool {
        self.title
            .chars()
            .chain(self.body.chars())
            .find(|c| c.is_alphabetic())
            .map(is_rtl_char)
            .unwrap_or(false)
    }
}

/// Arabic and Hebrew blocks, including presentation forms.
fn is_rtl_char(c: char) -> bool {
    matches!(c,
        '\u{0590}'..='\u{05FF}'
        | '\u{0600}'..='\u{06FF}'
        | '\u{0700}'..='\u{074F}'
        | '\u{0750}'..='\u{077F}'
        | '\u{08A0}'..='\u{08FF}'
        | '\u{FB1D}'..='\u{FDFF}'
        | '\u{FE70}'..='\u{FEFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_trimmed() {
        let doc = Document::new("  The Title \n", "body");
        assert_eq!(doc.title(), "The Title");
    }

    #[test]
    fn test_blank_title_replaced() {
        let doc = Document::new("   ", "body");
        assert_eq!(doc.title(), "Untitled");
        assert_eq!(doc.storage_key(), "reading-position:Untitled");
    }

    #[test]
    fn test_storage_key_distinct_for_prefix_titles() {
        let a = Document::new("Nights", "");
        let b = Document::new("Nights II", "");
        assert_ne!(a.storage_key(), b.storage_key());
    }

    #[test]
    fn test_paragraphs_delegate() {
        let doc = Document::new("T", "one\n\ntwo");
        assert_eq!(doc.paragraphs(), vec!["one", "two"]);
    }

    #[test]
    fn test_rtl_detection() {
        let arabic = Document::new("رواية", "في قديم الزمان");
        assert!(arabic.is_rtl());

        let english = Document::new("A Novel", "Once upon a time");
        assert!(!english.is_rtl());

        // Direction follows the title even when the body opens with Latin text
        let mixed = Document::new("حكاية", "Chapter 1\n\nنص عربي");
        assert!(mixed.is_rtl());
    }

    #[test]
    fn test_rtl_empty_document_defaults_ltr() {
        // Placeholder title is Latin, so direction resolves left-to-right
        let doc = Document::new("  ", "");
        assert!(!doc.is_rtl());
    }
}
