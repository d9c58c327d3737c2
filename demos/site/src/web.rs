use std::rc::Rc;

use wasm_bindgen::prelude::*;
use vitrine_platform::{WebOptions, run_web_app};

use crate::{Page, app, catalog};

/// Entry point of the browser build: shows the page for the current location.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let path = web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string());
    let catalog = catalog().map_err(|e| JsValue::from_str(&e.to_string()))?;
    run_web_app(app(Page::resolve(&path), Rc::new(catalog)), WebOptions::default())
}
