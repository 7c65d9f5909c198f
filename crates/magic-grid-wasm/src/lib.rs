//! WebAssembly bindings for magic-grid.
//!
//! Exposes the masonry grid to JavaScript, driving the real DOM and the
//! browser's timers.
//!
//! ## Example
//!
//! ```js
//! import { MagicGrid } from 'magic-grid';
//!
//! const grid = new MagicGrid({
//!   container: '.gallery',
//!   items: 20,
//!   gutter: 20,
//!   animate: true,
//! });
//!
//! // After adding content without a resize:
//! grid.positionItems();
//!
//! // When the gallery leaves the page:
//! grid.dispose();
//! ```

use magic_grid_core::{GridError, GridOptions};
use magic_grid_engine::LifecycleState;
use wasm_bindgen::prelude::*;

mod dom;

pub use dom::{BrowserHandle, BrowserScheduler, Dom};

type Engine = magic_grid_engine::MagicGrid<Dom, Dom, BrowserScheduler>;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
}

/// A masonry grid bound to a container in the current document.
#[wasm_bindgen]
pub struct MagicGrid {
    engine: Engine,
}

#[wasm_bindgen]
impl MagicGrid {
    /// Create a grid from a plain options object and start it.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<MagicGrid, JsError> {
        let options: GridOptions = serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsError::new(&format!("Invalid MagicGrid config: {}", e)))?;
        Self::start(options).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Create a grid from a JSON options string and start it.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<MagicGrid, JsError> {
        GridOptions::from_json(json)
            .map_err(GridError::from)
            .and_then(Self::start)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Lay the items out again now.
    #[wasm_bindgen(js_name = positionItems)]
    pub fn position_items(&self) {
        self.engine.reposition();
    }

    /// Stop polling and stop following resize events.
    pub fn dispose(&self) {
        self.engine.dispose();
    }

    /// Whether the one-time positioning styles have been applied.
    #[wasm_bindgen(getter)]
    pub fn started(&self) -> bool {
        self.engine.is_started()
    }

    /// One of `unstarted`, `initialized`, `polling`, `listening`, `disposed`.
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        state_name(self.engine.state()).to_string()
    }

    /// The most recent layout, or `undefined` before the first pass.
    #[wasm_bindgen(js_name = lastLayout)]
    pub fn last_layout(&self) -> Result<JsValue, JsError> {
        match self.engine.last_layout() {
            Some(layout) => serde_wasm_bindgen::to_value(&layout)
                .map_err(|e| JsError::new(&format!("Serialization error: {}", e))),
            None => Ok(JsValue::UNDEFINED),
        }
    }
}

impl MagicGrid {
    fn start(options: GridOptions) -> Result<MagicGrid, GridError> {
        let config = options.validate()?;
        let dom = Dom::from_window()?;
        let engine = Engine::with_config(config, dom.clone(), dom, BrowserScheduler::new());
        Ok(MagicGrid { engine })
    }
}

fn state_name(state: LifecycleState) -> &'static str {
    match state {
        LifecycleState::Unstarted => "unstarted",
        LifecycleState::Initialized => "initialized",
        LifecycleState::Polling => "polling",
        LifecycleState::Listening => "listening",
        LifecycleState::Disposed => "disposed",
    }
}

/// Get the version of the bindings.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
