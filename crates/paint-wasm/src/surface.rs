//! Canvas2D drawing surface.
//!
//! Implements `DrawingSurface` on top of an HTML `<canvas>` and its
//! `CanvasRenderingContext2d`. Rasterization and PNG encoding are left
//! entirely to the browser.

use paint_core::{ColorValue, LineCap};
use paint_editor::{DrawingSurface, Point, Rect, Size};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

pub struct WebSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WebSurface {
    /// Size the canvas bitmap and acquire its 2D context.
    pub fn new(canvas: HtmlCanvasElement, width: u32, height: u32) -> Result<Self, JsValue> {
        canvas.set_width(width);
        canvas.set_height(height);
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl DrawingSurface for WebSurface {
    type Image = HtmlImageElement;
    /// `data:image/png;base64,...`
    type Export = String;

    fn size(&self) -> Size {
        Size::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: Point) {
        self.ctx.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        self.ctx.line_to(p.x, p.y);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn line_width(&self) -> f64 {
        self.ctx.line_width()
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ctx.set_line_cap(cap.as_str());
    }

    fn set_stroke_color(&mut self, color: &ColorValue) {
        self.ctx.set_stroke_style_str(color.as_str());
    }

    fn set_fill_color(&mut self, color: &ColorValue) {
        self.ctx.set_fill_style_str(color.as_str());
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ctx
            .fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn fill_text(&mut self, text: &str, at: Point) {
        if let Err(err) = self.ctx.fill_text(text, at.x, at.y) {
            log::warn!("fillText failed: {err:?}");
        }
    }

    fn draw_image(&mut self, image: &HtmlImageElement, dest: Rect) {
        let drawn = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            dest.x0,
            dest.y0,
            dest.width(),
            dest.height(),
        );
        if let Err(err) = drawn {
            log::warn!("drawImage failed: {err:?}");
        }
    }

    fn export_png(&self) -> Option<String> {
        match self.canvas.to_data_url_with_type("image/png") {
            Ok(url) => Some(url),
            Err(err) => {
                // Tainted canvases refuse to export
                log::warn!("toDataURL failed: {err:?}");
                None
            }
        }
    }
}
