//! WASM bindings for the paginator
//!
//! The host supplies the render surface (usually a hidden element sized like
//! a page) and optionally a cache backed by `localStorage` or similar. Both are
//! plain JS objects with the methods declared below.

use crate::cache::BoundaryCache;
use crate::fragment::Fragment;
use crate::layout::{FontMetrics, MeasuredSurface, Viewport};
use crate::pagination::{Paginator, PaginatorConfig};
use crate::surface::RenderSurface;
use crate::{Document, PaginationError};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
extern "C" {
    /// `{ render(markup: string): void, overflows(): boolean }`, optionally
    /// with `markup(): string` and `cacheTag(): string`
    pub type JsSurface;

    #[wasm_bindgen(method)]
    fn render(this: &JsSurface, markup: &str);

    #[wasm_bindgen(method)]
    fn overflows(this: &JsSurface) -> bool;

    /// `{ get(key: string): string | null, set(key: string, value: string): void }`
    pub type JsCache;

    #[wasm_bindgen(method)]
    fn get(this: &JsCache, key: &str) -> Option<String>;

    #[wasm_bindgen(method)]
    fn set(this: &JsCache, key: &str, value: &str);
}

impl RenderSurface for JsSurface {
    fn render(&mut self, fragment: &Fragment) {
        JsSurface::render(self, &fragment.to_markup());
    }

    fn overflows(&self) -> bool {
        JsSurface::overflows(self)
    }

    fn rendered_markup(&self) -> Option<String> {
        call_optional(self, "markup")
    }

    fn cache_tag(&self) -> Option<String> {
        call_optional(self, "cacheTag")
    }
}

/// Call the zero-argument method `name` when the host object defines it
fn call_optional(this: &JsValue, name: &str) -> Option<String> {
    let method = js_sys::Reflect::get(this, &JsValue::from_str(name)).ok()?;
    let method = method.dyn_ref::<js_sys::Function>()?;
    method.call0(this).ok()?.as_string()
}

impl BoundaryCache for JsCache {
    fn get(&self, key: &str) -> Option<String> {
        JsCache::get(self, key)
    }

    fn set(&mut self, key: &str, value: &str) {
        JsCache::set(self, key, value)
    }
}

impl From<PaginationError> for JsValue {
    fn from(err: PaginationError) -> Self {
        JsError::new(&err.to_string()).into()
    }
}

fn parse_config(config: Option<String>) -> Result<PaginatorConfig, PaginationError> {
    match config {
        Some(json) if !json.trim().is_empty() => Ok(serde_json::from_str(&json)?),
        _ => Ok(PaginatorConfig::default()),
    }
}

/// Offsets past `u32::MAX` saturate
fn offsets_to_u32(offsets: &[usize]) -> Vec<u32> {
    offsets
        .iter()
        .map(|&offset| u32::try_from(offset).unwrap_or(u32::MAX))
        .collect()
}

fn boundaries_array(offsets: &[usize]) -> js_sys::Uint32Array {
    js_sys::Uint32Array::from(offsets_to_u32(offsets).as_slice())
}

macro_rules! paginator_methods {
    ($name:ident) => {
        #[wasm_bindgen]
        impl $name {
            /// Markup of page `n` (1-based), `undefined` past the end
            #[wasm_bindgen(js_name = getPage)]
            pub fn get_page(&mut self, n: usize) -> Option<String> {
                self.inner.get_page(n)
            }

            /// Page count, exact once every page has been computed
            #[wasm_bindgen(js_name = pagesNumber)]
            pub fn pages_number(&self) -> usize {
                self.inner.pages_number()
            }

            #[wasm_bindgen(js_name = computedPagesNumber)]
            pub fn computed_pages_number(&self) -> usize {
                self.inner.computed_pages_number()
            }

            /// Compute every page and return the exact count
            #[wasm_bindgen(js_name = paginateAll)]
            pub fn paginate_all(&mut self) -> usize {
                self.inner.paginate_all()
            }

            #[wasm_bindgen(js_name = contentFromRange)]
            pub fn content_from_range(&mut self, from: usize, to: usize) -> Result<String, JsValue> {
                Ok(self.inner.get_content_from_range(from, to)?)
            }

            /// Start offset of the text leaf holding `pos`
            #[wasm_bindgen(js_name = leafOffsetForPosition)]
            pub fn leaf_offset_for_position(&self, pos: usize) -> usize {
                self.inner.get_element_for_position(pos).offset
            }

            #[wasm_bindgen(js_name = pageForOffset)]
            pub fn page_for_offset(&mut self, pos: usize) -> Option<usize> {
                self.inner.page_for_offset(pos)
            }

            #[wasm_bindgen(js_name = pageForId)]
            pub fn page_for_id(&mut self, id: &str) -> Option<usize> {
                self.inner.page_for_id(id)
            }

            #[wasm_bindgen(js_name = positionOfId)]
            pub fn position_of_id(&self, id: &str) -> Option<usize> {
                self.inner.position_of_id(id)
            }

            #[wasm_bindgen(js_name = isPageOverflowing)]
            pub fn is_page_overflowing(&self, n: usize) -> bool {
                self.inner.is_page_overflowing(n)
            }

            #[wasm_bindgen(js_name = isExhausted)]
            pub fn is_exhausted(&self) -> bool {
                self.inner.is_exhausted()
            }

            /// Committed page start offsets, beginning with 0
            pub fn boundaries(&self) -> js_sys::Uint32Array {
                boundaries_array(self.inner.boundaries())
            }

            pub fn jump(&self) -> usize {
                self.inner.jump()
            }

            #[wasm_bindgen(js_name = maxPosition)]
            pub fn max_position(&self) -> usize {
                self.inner.max_position()
            }

            #[wasm_bindgen(js_name = cacheKey)]
            pub fn cache_key(&self) -> String {
                self.inner.cache_key().to_string()
            }
        }
    };
}

/// Paginator measuring pages on a host-provided surface
#[wasm_bindgen]
pub struct WasmPaginator {
    inner: Paginator<JsSurface>,
}

#[wasm_bindgen]
impl WasmPaginator {
    /// `config` is JSON such as `{"initialJump": 1500, "cacheKey": "ch-1"}`
    #[wasm_bindgen(constructor)]
    pub fn new(
        markup: &str,
        surface: JsSurface,
        config: Option<String>,
        cache: Option<JsCache>,
    ) -> Result<WasmPaginator, JsValue> {
        let config = parse_config(config)?;
        let document = Document::parse(markup)?;
        let inner = match cache {
            Some(cache) => Paginator::with_cache(document, surface, config, Box::new(cache))?,
            None => Paginator::new(document, surface, config)?,
        };
        Ok(Self { inner })
    }
}

paginator_methods!(WasmPaginator);

/// Paginator measuring pages with font metrics, without touching the DOM
#[wasm_bindgen]
pub struct WasmMeasuredPaginator {
    inner: Paginator<MeasuredSurface>,
}

#[wasm_bindgen]
impl WasmMeasuredPaginator {
    /// Monospace measurement: every character advances `char_width`
    #[wasm_bindgen(constructor)]
    pub fn new(
        markup: &str,
        width: f32,
        height: f32,
        char_width: f32,
        line_height: f32,
        config: Option<String>,
    ) -> Result<WasmMeasuredPaginator, JsValue> {
        let surface = MeasuredSurface::new(
            Viewport::new(width, height),
            FontMetrics::monospace(char_width, line_height),
        );
        let inner = Paginator::from_markup(markup, surface, parse_config(config)?)?;
        Ok(Self { inner })
    }

    /// Measurement with per-character widths, `metrics` being JSON like
    /// `{"lineHeight": 16.8, "charWidths": [...], "defaultWidth": 8.0}`
    #[wasm_bindgen(js_name = withMetrics)]
    pub fn with_metrics(
        markup: &str,
        width: f32,
        height: f32,
        metrics: &str,
        config: Option<String>,
    ) -> Result<WasmMeasuredPaginator, JsValue> {
        let metrics: FontMetrics = serde_json::from_str(metrics).map_err(PaginationError::from)?;
        let surface = MeasuredSurface::new(Viewport::new(width, height), metrics);
        let inner = Paginator::from_markup(markup, surface, parse_config(config)?)?;
        Ok(Self { inner })
    }

    /// Height of the last rendered fragment
    #[wasm_bindgen(js_name = contentHeight)]
    pub fn content_height(&self) -> f32 {
        self.inner.surface().content_height()
    }
}

paginator_methods!(WasmMeasuredPaginator);
