// File: crates/annotation-core/src/text.rs
// Summary: Memoized text measurement shared by every label drawn on this thread.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::options::FontSpec;
use crate::surface::Surface;

thread_local! {
    // (font css, text) -> width in px; append-only until cleared
    static WIDTH_CACHE: RefCell<HashMap<(String, String), f64>> = RefCell::new(HashMap::new());
}

/// Width of `text` in `font`, measured on `surface` only the first time it is seen.
pub fn measure_cached(surface: &mut dyn Surface, font: &FontSpec, text: &str) -> f64 {
    let key = (font.css(), text.to_string());
    if let Some(w) = WIDTH_CACHE.with(|c| c.borrow().get(&key).copied()) {
        return w;
    }
    let width = surface.measure_text(text, font);
    WIDTH_CACHE.with(|c| c.borrow_mut().insert(key, width));
    width
}

/// Drop every cached width, e.g. after fonts were (re)loaded.
pub fn clear_width_cache() {
    WIDTH_CACHE.with(|c| c.borrow_mut().clear());
}

pub fn cached_width_count() -> usize {
    WIDTH_CACHE.with(|c| c.borrow().len())
}
