//! DOM wiring.
//!
//! Attaches listeners on the canvas, the toolbar controls and the document,
//! and forwards each event to the shared controller. Controls missing from
//! the page are skipped, so a host can ship any subset of the toolbar.

use crate::SharedController;
use paint_core::PresetId;
use paint_editor::input::InputEvent;
use paint_editor::shortcuts::ShortcutMap;
use paint_editor::{Download, Point};
use serde::Deserialize;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Event, EventTarget, File, HtmlAnchorElement, HtmlCanvasElement, HtmlElement,
    HtmlImageElement, HtmlInputElement, KeyboardEvent, MouseEvent, Url,
};

/// Element ids of the toolbar controls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub line_width: String,
    pub color_picker: String,
    pub mode_button: String,
    pub eraser_button: String,
    pub clear_button: String,
    pub file_input: String,
    pub text_input: String,
    pub save_button: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            line_width: "line-width".into(),
            color_picker: "color-option".into(),
            mode_button: "mode-btn".into(),
            eraser_button: "eraser-btn".into(),
            clear_button: "destroy-btn".into(),
            file_input: "file".into(),
            text_input: "text".into(),
            save_button: "save".into(),
        }
    }
}

impl ElementIds {
    /// Parse id overrides. Blank input yields the defaults.
    pub fn from_json(source: &str) -> Result<Self, String> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(source).map_err(|e| format!("invalid element ids: {e}"))
    }
}

/// Wire every listener. Listeners live for the lifetime of the page.
pub(crate) fn wire(
    document: &Document,
    canvas: &HtmlCanvasElement,
    controller: &SharedController,
    ids: &ElementIds,
) -> Result<(), JsValue> {
    let text_input = element::<HtmlInputElement>(document, &ids.text_input);
    let mode_button = element::<HtmlElement>(document, &ids.mode_button);

    wire_canvas(canvas, controller, text_input)?;
    wire_controls(document, controller, ids, mode_button.clone())?;
    wire_keyboard(document, controller, mode_button)?;
    log::info!("paint canvas mounted");
    Ok(())
}

// ─── Canvas ─────────────────────────────────────────────────────────────

fn wire_canvas(
    canvas: &HtmlCanvasElement,
    controller: &SharedController,
    text_input: Option<HtmlInputElement>,
) -> Result<(), JsValue> {
    forward(canvas, "mousedown", controller, |event| {
        offset(event).map(|at| InputEvent::from_pointer_down(at.x, at.y))
    })?;
    forward(canvas, "mousemove", controller, |event| {
        offset(event).map(|at| InputEvent::from_pointer_move(at.x, at.y))
    })?;
    forward(canvas, "mouseup", controller, |event| {
        offset(event).map(|at| InputEvent::from_pointer_up(at.x, at.y))
    })?;
    // Leaving must always stop painting, position or not
    forward(canvas, "mouseleave", controller, |_| Some(InputEvent::PointerLeave))?;
    forward(canvas, "click", controller, |event| {
        offset(event).map(|at| InputEvent::Click { x: at.x, y: at.y })
    })?;
    forward(canvas, "dblclick", controller, move |event| {
        let at = offset(event)?;
        let text = text_input
            .as_ref()
            .map(HtmlInputElement::value)
            .unwrap_or_default();
        Some(InputEvent::DoubleClick {
            x: at.x,
            y: at.y,
            text,
        })
    })
}

// ─── Toolbar ────────────────────────────────────────────────────────────

fn wire_controls(
    document: &Document,
    controller: &SharedController,
    ids: &ElementIds,
    mode_button: Option<HtmlElement>,
) -> Result<(), JsValue> {
    if let Some(input) = element::<HtmlInputElement>(document, &ids.line_width) {
        let controller = Rc::clone(controller);
        let target = input.clone();
        listen(&target, "change", move |_| {
            controller.borrow_mut().set_line_width_str(&input.value());
        })?;
    }

    if let Some(input) = element::<HtmlInputElement>(document, &ids.color_picker) {
        let controller = Rc::clone(controller);
        let target = input.clone();
        listen(&target, "change", move |_| {
            controller.borrow_mut().set_custom_color(&input.value());
        })?;
    }

    let swatches: Vec<PresetId> = controller
        .borrow()
        .config()
        .palette
        .swatches()
        .iter()
        .map(|swatch| swatch.id.clone())
        .collect();
    for id in swatches {
        let Some(swatch) = element::<HtmlElement>(document, id.as_str()) else {
            continue;
        };
        let controller = Rc::clone(controller);
        listen(&swatch, "click", move |_| controller.borrow_mut().select_preset(&id))?;
    }

    if let Some(button) = mode_button {
        button.set_inner_text(controller.borrow().mode_label());
        let controller = Rc::clone(controller);
        let target = button.clone();
        listen(&target, "click", move |_| {
            let label = controller.borrow_mut().toggle_mode();
            button.set_inner_text(label);
        })?;
    }

    if let Some(button) = element::<HtmlElement>(document, &ids.eraser_button) {
        let controller = Rc::clone(controller);
        listen(&button, "click", move |_| controller.borrow_mut().eraser())?;
    }

    if let Some(button) = element::<HtmlElement>(document, &ids.clear_button) {
        let controller = Rc::clone(controller);
        listen(&button, "click", move |_| controller.borrow_mut().clear())?;
    }

    if let Some(input) = element::<HtmlInputElement>(document, &ids.file_input) {
        let controller = Rc::clone(controller);
        let target = input.clone();
        listen(&target, "change", move |_| {
            let file = input.files().and_then(|files| files.get(0));
            // Reset so picking the same file again fires another change
            input.set_value("");
            if let Err(err) = import_file(&controller, file.as_ref()) {
                log::warn!("image import failed to start: {err:?}");
            }
        })?;
    }

    if let Some(button) = element::<HtmlElement>(document, &ids.save_button) {
        let controller = Rc::clone(controller);
        let document = document.clone();
        listen(&button, "click", move |_| {
            let download = controller.borrow().download();
            if let Some(download) = download {
                save_download(&document, &download);
            }
        })?;
    }

    Ok(())
}

// ─── Keyboard ───────────────────────────────────────────────────────────

fn wire_keyboard(
    document: &Document,
    controller: &SharedController,
    mode_button: Option<HtmlElement>,
) -> Result<(), JsValue> {
    let controller = Rc::clone(controller);
    let doc = document.clone();
    listen(document, "keydown", move |event| {
        // Typing into a field must not trigger single-key shortcuts
        if event
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .is_some()
        {
            return;
        }
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let Some(action) = ShortcutMap::resolve(
            &key.key(),
            key.ctrl_key(),
            key.shift_key(),
            key.alt_key(),
            key.meta_key(),
        ) else {
            return;
        };
        event.prevent_default();

        let download = controller.borrow_mut().apply_shortcut(action);
        if let Some(button) = &mode_button {
            button.set_inner_text(controller.borrow().mode_label());
        }
        if let Some(download) = download {
            save_download(&doc, &download);
        }
    })
}

// ─── Import & export ────────────────────────────────────────────────────

/// Decode the selected file off the event loop and draw it once decoded.
/// No selection is a no-op.
///
/// The object URL is revoked after the decode settles, whether or not the
/// image was drawn.
pub(crate) fn import_file(
    controller: &SharedController,
    selection: Option<&File>,
) -> Result<(), JsValue> {
    let Some((ticket, file)) = controller.borrow_mut().begin_image_import_from(selection) else {
        return Ok(());
    };
    log::debug!("importing {} as #{}", file.name(), ticket.id());

    let loaded = HtmlImageElement::new().and_then(|image| {
        let url = Url::create_object_url_with_blob(file)?;
        image.set_src(&url);
        Ok((image, url))
    });
    let (image, url) = match loaded {
        Ok(loaded) => loaded,
        Err(err) => {
            controller.borrow_mut().abandon_image_import(ticket);
            return Err(err);
        }
    };

    let decode: js_sys::Promise = image.decode();
    let controller = Rc::clone(controller);
    wasm_bindgen_futures::spawn_local(async move {
        let decoded = JsFuture::from(decode).await;
        {
            let mut controller = controller.borrow_mut();
            match decoded {
                Ok(_) => {
                    controller.finish_image_import(ticket, &image);
                }
                Err(err) => {
                    log::warn!("image decode failed: {err:?}");
                    controller.abandon_image_import(ticket);
                }
            }
        }
        if let Err(err) = Url::revoke_object_url(&url) {
            log::warn!("revokeObjectURL failed: {err:?}");
        }
    });
    Ok(())
}

/// Save a PNG data URL through a temporary download link.
pub(crate) fn save_download(document: &Document, download: &Download<String>) {
    let anchor = document
        .create_element("a")
        .and_then(|el| el.dyn_into::<HtmlAnchorElement>().map_err(JsValue::from));
    match anchor {
        Ok(anchor) => {
            anchor.set_href(&download.payload);
            anchor.set_download(&download.filename);
            anchor.click();
        }
        Err(err) => log::warn!("download link unavailable: {err:?}"),
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn listen(
    target: &EventTarget,
    name: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Listen for `name` and hand the translated event to the controller.
fn forward(
    target: &EventTarget,
    name: &str,
    controller: &SharedController,
    translate: impl Fn(&Event) -> Option<InputEvent> + 'static,
) -> Result<(), JsValue> {
    let controller = Rc::clone(controller);
    listen(target, name, move |event| {
        if let Some(input) = translate(&event) {
            controller.borrow_mut().handle(&input);
        }
    })
}

fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    let found = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok());
    if found.is_none() {
        log::debug!("control #{id} not on page");
    }
    found
}

/// Pointer position relative to the canvas origin.
fn offset(event: &Event) -> Option<Point> {
    event
        .dyn_ref::<MouseEvent>()
        .map(|e| Point::new(f64::from(e.offset_x()), f64::from(e.offset_y())))
}
