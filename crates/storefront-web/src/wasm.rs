#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for [`super::runner_core::RunnerCore`].
//!
//! Only compiled on `wasm32` targets.

use js_sys::{Array, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::runner_core::RunnerCore;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = match info.location() {
                Some(loc) => format!("panic at {}:{}:{}: {info}", loc.file(), loc.line(), loc.column()),
                None => format!("panic: {info}"),
            };
            console_error(&msg);
        }));
    });
}

/// Storefront page runner.
///
/// Host-driven: JavaScript forwards DOM events as JSON, advances the clock
/// from its timers, applies the returned patches, and performs the review
/// `fetch` itself.
#[wasm_bindgen]
pub struct StorefrontRunner {
    inner: RunnerCore,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl StorefrontRunner {
    /// `handles` and `catalog` are JSON; `path` is `location.pathname`.
    #[wasm_bindgen(constructor)]
    pub fn new(handles: &str, catalog: &str, path: &str) -> Result<StorefrontRunner, JsValue> {
        install_panic_hook();
        RunnerCore::new(handles, catalog, path)
            .map(|inner| Self { inner })
            .map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = advanceTime)]
    pub fn advance_time(&mut self, dt_ms: f64) {
        self.inner.advance_time_ms(dt_ms);
    }

    #[wasm_bindgen(js_name = setTime)]
    pub fn set_time(&mut self, ts_ms: f64) {
        self.inner.set_time_ms(ts_ms);
    }

    /// Milliseconds since page load of the next timer, or `undefined`.
    #[wasm_bindgen(js_name = nextDeadline)]
    pub fn next_deadline(&self) -> Option<f64> {
        self.inner.next_deadline_ms()
    }

    /// Returns `true` if some component handled the event.
    #[wasm_bindgen(js_name = pushEvent)]
    pub fn push_event(&mut self, json: &str) -> bool {
        self.inner.push_event_json(json)
    }

    /// JSON array of patches produced since the last call.
    #[wasm_bindgen(js_name = takePatches)]
    pub fn take_patches(&mut self) -> String {
        self.inner.take_patches_json()
    }

    /// JSON body to POST to `reviewEndpoint()`, if the form validated.
    #[wasm_bindgen(js_name = takeReviewRequest)]
    pub fn take_review_request(&mut self) -> Option<String> {
        self.inner.take_review_request()
    }

    #[wasm_bindgen(js_name = reviewEndpoint)]
    pub fn review_endpoint(&self) -> String {
        self.inner.review_endpoint().to_string()
    }

    /// `ok` is `response.ok`; pass `false` with the error text on network failure.
    #[wasm_bindgen(js_name = finishReview)]
    pub fn finish_review(&mut self, ok: bool, body: &str) -> bool {
        self.inner.finish_review(ok, body)
    }

    #[wasm_bindgen(js_name = takeLogs)]
    pub fn take_logs(&mut self) -> Array {
        let arr = Array::new();
        for line in self.inner.take_logs() {
            arr.push(&JsValue::from_str(&line));
        }
        arr
    }

    pub fn dispose(&mut self) {
        self.inner.dispose();
    }
}
