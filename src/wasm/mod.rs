//! WASM bindings for the reader

use crate::layout::measure::MeasurementSurface;
use crate::layout::paginator::LayoutParams;
use crate::session::PositionStore;
use crate::{Document, FontSizeClass, Reader};
use js_sys::Function;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Measurement surface backed by a JS callback that renders content into an
/// off-screen node and reports its pixel height. Any JS exception or
/// non-numeric result reads as an unusable surface, which sends pagination
/// down the estimator path.
struct JsSurface {
    measure: Function,
}

impl MeasurementSurface for JsSurface {
    fn measure_height(&self, content: &str, params: &LayoutParams) -> Option<f32> {
        let height = self
            .measure
            .call2(
                &JsValue::NULL,
                &JsValue::from_str(content),
                &JsValue::from_f64(params.font_size.px() as f64),
            )
            .ok()?
            .as_f64()?;

        height.is_finite().then_some(height as f32)
    }
}

/// Position store backed by JS `get(key)` / `set(key, value)` callbacks,
/// typically thin wrappers over `localStorage`.
struct JsStore {
    get: Function,
    set: Function,
}

impl PositionStore for JsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.get
            .call1(&JsValue::NULL, &JsValue::from_str(key))
            .ok()?
            .as_string()
    }

    fn set(&mut self, key: &str, value: &str) {
        // Storage failures (quota, private mode) are non-fatal
        let _ = self.set.call2(
            &JsValue::NULL,
            &JsValue::from_str(key),
            &JsValue::from_str(value),
        );
    }
}

/// WASM-exposed reader wrapper
#[wasm_bindgen]
pub struct WasmReader {
    reader: Reader<JsStore>,
}

#[wasm_bindgen]
impl WasmReader {
    /// Open a reader with the default viewport.
    ///
    /// `measure(content, fontPx)` must return the rendered pixel height of
    /// the content string; pass `null` to paginate with the character-count
    /// estimator. `get(key)`/`set(key, value)` bridge position storage.
    #[wasm_bindgen(constructor)]
    pub fn new(
        title: &str,
        body: &str,
        font_size: &str,
        measure: Option<Function>,
        get: Function,
        set: Function,
    ) -> Self {
        let params = LayoutParams {
            font_size: FontSizeClass::from_name(font_size).unwrap_or_default(),
            ..LayoutParams::default()
        };
        Self::open(title, body, params, measure, get, set)
    }

    /// Open a reader with an explicit viewport.
    #[wasm_bindgen(js_name = withViewport)]
    pub fn with_viewport(
        title: &str,
        body: &str,
        font_size: &str,
        viewport_width_px: f32,
        page_height_budget_px: f32,
        measure: Option<Function>,
        get: Function,
        set: Function,
    ) -> Self {
        let params = LayoutParams {
            font_size: FontSizeClass::from_name(font_size).unwrap_or_default(),
            viewport_width_px,
            page_height_budget_px,
        };
        Self::open(title, body, params, measure, get, set)
    }

    fn open(
        title: &str,
        body: &str,
        params: LayoutParams,
        measure: Option<Function>,
        get: Function,
        set: Function,
    ) -> Self {
        let surface: Option<Box<dyn MeasurementSurface>> =
            measure.map(|measure| Box::new(JsSurface { measure }) as Box<dyn MeasurementSurface>);

        let reader = Reader::open(
            Document::new(title, body),
            params,
            JsStore { get, set },
            surface,
        );

        Self { reader }
    }

    /// Replace the open document; position is restored per the new title.
    #[wasm_bindgen(js_name = setDocument)]
    pub fn set_document(&mut self, title: &str, body: &str) {
        self.reader.set_document(Document::new(title, body));
    }

    /// Change the font size step by name; returns false for unknown names.
    #[wasm_bindgen(js_name = setFontSize)]
    pub fn set_font_size(&mut self, font_size: &str) -> bool {
        match FontSizeClass::from_name(font_size) {
            Some(class) => {
                self.reader.set_font_size(class);
                true
            }
            None => false,
        }
    }

    /// Flip forward; returns the landing page index.
    #[wasm_bindgen(js_name = nextPage)]
    pub fn next_page(&mut self) -> usize {
        self.reader.next_page()
    }

    /// Flip back; returns the landing page index.
    #[wasm_bindgen(js_name = prevPage)]
    pub fn prev_page(&mut self) -> usize {
        self.reader.prev_page()
    }

    /// Jump to a page index, clamped into range.
    #[wasm_bindgen(js_name = jumpTo)]
    pub fn jump_to(&mut self, index: i32) -> usize {
        self.reader.jump_to(index as i64)
    }

    /// Route a `KeyboardEvent.key` value; returns whether it was handled.
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str) -> bool {
        self.reader.handle_key(key)
    }

    #[wasm_bindgen(js_name = currentPage)]
    pub fn current_page(&self) -> usize {
        self.reader.current_page_index()
    }

    #[wasm_bindgen(js_name = pageCount)]
    pub fn page_count(&self) -> usize {
        self.reader.page_count()
    }

    #[wasm_bindgen(js_name = progressPercent)]
    pub fn progress_percent(&self) -> u8 {
        self.reader.progress_percent()
    }

    #[wasm_bindgen(js_name = isRtl)]
    pub fn is_rtl(&self) -> bool {
        self.reader.is_rtl()
    }

    /// CSS class for the active font size step.
    #[wasm_bindgen(js_name = fontCssClass)]
    pub fn font_css_class(&self) -> String {
        self.reader.font_size().css_class().to_string()
    }

    /// Content of one page, or `undefined` when out of range.
    #[wasm_bindgen(js_name = pageContent)]
    pub fn page_content(&self, index: usize) -> Option<String> {
        self.reader.pages().get(index).map(|p| p.content.clone())
    }

    /// Full reader snapshot for rendering (returns a JS object).
    pub fn snapshot(&self) -> JsValue {
        let snapshot = SnapshotData::from_reader(&self.reader);
        serde_wasm_bindgen::to_value(&snapshot).unwrap_or(JsValue::NULL)
    }
}

/// Serializable reader snapshot for JS
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotData {
    pub pages: Vec<PageData>,
    pub current_page: usize,
    pub total_pages: usize,
    pub progress_percent: u8,
    pub rtl: bool,
    pub font_css_class: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub index: usize,
    pub is_title: bool,
    pub content: String,
}

impl SnapshotData {
    fn from_reader<S: PositionStore>(reader: &Reader<S>) -> Self {
        let pages = reader
            .pages()
            .iter()
            .map(|page| PageData {
                index: page.index,
                is_title: page.is_title(),
                content: page.content.clone(),
            })
            .collect();

        Self {
            pages,
            current_page: reader.current_page_index(),
            total_pages: reader.page_count(),
            progress_percent: reader.progress_percent(),
            rtl: reader.is_rtl(),
            font_css_class: reader.font_size().css_class().to_string(),
        }
    }
}
