//! Flipbook: pagination and reading-session core for a page-flip novel reader
//!
//! This crate turns a title plus a free-form body (possibly Arabic,
//! right-to-left, with blank-line paragraphs and explicit page-break markers)
//! into discrete fixed-viewport pages for a page-flip UI:
//! - Measurement-based pagination against a pluggable surface
//! - Character-count fallback when no surface is mounted
//! - A reading session that restores, clamps, and persists position
//!
//! The main interface is through WASM bindings ([`WasmReader`]); native
//! callers use [`Reader`] directly.

pub mod document;
pub mod layout;
pub mod session;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmReader;

// Re-export primary types
pub use document::{Document, PAGE_BREAK_MARKER};
pub use layout::{
    estimate_pages, paginate, FontMetrics, FontSizeClass, LayoutParams, MeasurementSurface,
    MetricsSurface, Page, PageKind, CHARS_PER_PAGE,
};
pub use session::{MemoryStore, NavCommand, PositionStore, ReadingSession};

/// The main reader state combining document, layout, pages, and session.
///
/// Owns the re-pagination triggers: replacing the document or changing the
/// font size rebuilds the page list from scratch and re-enters the session
/// from persisted storage. The old page list is only discarded once the new
/// one is fully computed.
pub struct Reader<S: PositionStore> {
    document: Document,
    params: LayoutParams,
    pages: Vec<Page>,
    surface: Option<Box<dyn MeasurementSurface>>,
    session: ReadingSession<S>,
    rtl: bool,
}

impl<S: PositionStore> Reader<S> {
    /// Open a reader over a document, paginating immediately. Pass `None`
    /// for the surface to paginate with the character-count estimator.
    pub fn open(
        document: Document,
        params: LayoutParams,
        store: S,
        surface: Option<Box<dyn MeasurementSurface>>,
    ) -> Self {
        let pages = paginate(&document, &params, surface.as_deref());
        let session = ReadingSession::open(pages.len(), document.storage_key(), store);
        let rtl = document.is_rtl();

        Self {
            document,
            params,
            pages,
            surface,
            session,
            rtl,
        }
    }

    /// Replace the document and re-paginate; the position is re-read from
    /// the store under the new document's key.
    pub fn set_document(&mut self, document: Document) {
        self.document = document;
        self.rtl = self.document.is_rtl();
        self.repaginate();
    }

    /// Change the font size step; re-paginates when it actually changed.
    pub fn set_font_size(&mut self, font_size: FontSizeClass) {
        if self.params.font_size == font_size {
            return;
        }
        self.params.font_size = font_size;
        self.repaginate();
    }

    /// Replace all layout parameters (viewport resize, font change).
    pub fn set_layout_params(&mut self, params: LayoutParams) {
        if self.params == params {
            return;
        }
        self.params = params;
        self.repaginate();
    }

    fn repaginate(&mut self) {
        self.pages = paginate(&self.document, &self.params, self.surface.as_deref());
        self.session
            .rebind(self.document.storage_key(), self.pages.len());
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn layout_params(&self) -> &LayoutParams {
        &self.params
    }

    pub fn font_size(&self) -> FontSizeClass {
        self.params.font_size
    }

    pub fn is_rtl(&self) -> bool {
        self.rtl
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The page currently open in the flip viewport.
    pub fn current_page(&self) -> &Page {
        &self.pages[self.session.current_page()]
    }

    pub fn current_page_index(&self) -> usize {
        self.session.current_page()
    }

    pub fn progress_percent(&self) -> u8 {
        self.session.progress_percent()
    }

    pub fn next_page(&mut self) -> usize {
        self.session.next()
    }

    pub fn prev_page(&mut self) -> usize {
        self.session.prev()
    }

    pub fn jump_to(&mut self, index: i64) -> usize {
        self.session.jump(index)
    }

    /// Route a keyboard event into navigation. Returns whether the key was
    /// handled; horizontal arrows are direction-aware.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match NavCommand::from_key(key, self.rtl) {
            Some(command) => {
                self.session.apply(command);
                true
            }
            None => false,
        }
    }
}
