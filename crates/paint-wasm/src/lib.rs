//! WASM bridge for Paint: exposes the canvas controller to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. A page either calls
//! `mountCanvas("canvas-id", configJson)` to get a fully wired canvas, or
//! constructs `PaintCanvas` and drives it through its methods.

mod dom;
mod logging;
mod surface;

use paint_core::{CanvasConfig, PresetId};
use paint_editor::{Controller, Point};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{File, HtmlCanvasElement};

pub use dom::ElementIds;
pub use surface::WebSurface;

/// Controller shared between the JS-facing handle and DOM listeners.
pub(crate) type SharedController = Rc<RefCell<Controller<WebSurface>>>;

/// The JS-facing canvas handle.
///
/// All methods borrow the controller for the duration of the call only;
/// DOM listeners installed by `mount` share the same controller.
#[wasm_bindgen]
pub struct PaintCanvas {
    controller: SharedController,
}

#[wasm_bindgen]
impl PaintCanvas {
    /// Take over `canvas`. A malformed `config_json` falls back to defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: &str) -> Result<PaintCanvas, JsValue> {
        logging::install();

        let config = CanvasConfig::from_json(config_json).unwrap_or_else(|err| {
            log::warn!("{err}; using defaults");
            CanvasConfig::default()
        });
        let surface = WebSurface::new(canvas, config.width, config.height)?;
        let controller = Controller::new(surface, config);
        Ok(Self {
            controller: Rc::new(RefCell::new(controller)),
        })
    }

    /// Wire the page's toolbar and canvas listeners. `ids_json` may
    /// override control element ids; blank uses the defaults.
    pub fn mount(&self, ids_json: &str) -> Result<(), JsValue> {
        let ids = ElementIds::from_json(ids_json).map_err(|e| JsValue::from_str(&e))?;
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = self.controller.borrow().surface().canvas().clone();
        dom::wire(&document, &canvas, &self.controller, &ids)
    }

    pub fn pointer_down(&self, x: f64, y: f64) {
        self.controller.borrow_mut().pointer_down(Point::new(x, y));
    }

    pub fn pointer_move(&self, x: f64, y: f64) {
        self.controller.borrow_mut().pointer_move(Point::new(x, y));
    }

    pub fn pointer_up(&self) {
        self.controller.borrow_mut().pointer_up();
    }

    pub fn pointer_leave(&self) {
        self.controller.borrow_mut().pointer_leave();
    }

    pub fn click(&self) {
        self.controller.borrow_mut().click();
    }

    pub fn double_click(&self, x: f64, y: f64, text: &str) {
        self.controller
            .borrow_mut()
            .double_click(Point::new(x, y), text);
    }

    /// Stroke-width control value, as a string from the range input.
    pub fn set_line_width(&self, value: &str) {
        self.controller.borrow_mut().set_line_width_str(value);
    }

    pub fn select_preset(&self, id: &str) {
        self.controller
            .borrow_mut()
            .select_preset(&PresetId::new(id));
    }

    pub fn set_custom_color(&self, value: &str) {
        self.controller.borrow_mut().set_custom_color(value);
    }

    /// Toggle draw/fill mode. Returns the new mode-button label.
    pub fn toggle_mode(&self) -> String {
        self.controller.borrow_mut().toggle_mode().to_string()
    }

    pub fn mode_label(&self) -> String {
        self.controller.borrow().mode_label().to_string()
    }

    pub fn is_filling(&self) -> bool {
        self.controller.borrow().state().is_filling()
    }

    pub fn is_painting(&self) -> bool {
        self.controller.borrow().state().painting
    }

    pub fn eraser(&self) {
        self.controller.borrow_mut().eraser();
    }

    pub fn clear(&self) {
        self.controller.borrow_mut().clear();
    }

    /// Import an image file; it is drawn over the whole canvas once decoded.
    /// `undefined` (nothing selected) draws nothing.
    pub fn import_file(&self, file: Option<File>) -> Result<(), JsValue> {
        dom::import_file(&self.controller, file.as_ref())
    }

    /// PNG data URL of the current canvas.
    pub fn export_png(&self) -> Option<String> {
        self.controller
            .borrow()
            .download()
            .map(|download| download.payload)
    }

    /// Save the canvas as PNG. Returns `false` if the browser refused.
    pub fn download(&self) -> bool {
        let download = self.controller.borrow().download();
        let Some(download) = download else {
            return false;
        };
        match web_sys::window().and_then(|w| w.document()) {
            Some(document) => {
                dom::save_download(&document, &download);
                true
            }
            None => false,
        }
    }
}

/// Look up `canvas_id`, build a `PaintCanvas` and wire the default toolbar.
#[wasm_bindgen(js_name = mountCanvas)]
pub fn mount_canvas(canvas_id: &str, config_json: &str) -> Result<PaintCanvas, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{canvas_id}")))?
        .dyn_into::<HtmlCanvasElement>()?;
    let paint = PaintCanvas::new(canvas, config_json)?;
    paint.mount("")?;
    Ok(paint)
}

/// Set the console log level (`"off"` .. `"trace"`). Returns `false` for
/// an unknown level name.
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> bool {
    match logging::parse_level(level) {
        Some(filter) => {
            logging::set_level(filter);
            true
        }
        None => false,
    }
}
