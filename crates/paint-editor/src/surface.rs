//! Drawing-surface abstraction.
//!
//! The controller never touches pixels. Everything it renders goes through
//! this command set, which maps one-to-one onto a Canvas2D context on the
//! web and onto `RecordingSurface` in tests.

use kurbo::{Point, Rect, Size};
use paint_core::{ColorValue, LineCap};
use std::ops::{Deref, DerefMut};

pub trait DrawingSurface {
    /// A decoded raster image that can be blitted onto the surface.
    type Image;
    /// Encoded snapshot produced by `export_png`.
    type Export;

    fn size(&self) -> Size;

    fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.size())
    }

    // ── Paths ──
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    /// Render the current path with the current stroke style.
    fn stroke(&mut self);

    // ── Style ──
    fn set_line_width(&mut self, width: f64);
    fn line_width(&self) -> f64;
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_stroke_color(&mut self, color: &ColorValue);
    fn set_fill_color(&mut self, color: &ColorValue);
    fn set_font(&mut self, font: &str);

    /// Push the current style attributes.
    fn save(&mut self);
    /// Pop the most recently saved style attributes.
    fn restore(&mut self);

    // ── Fills & blits ──
    fn fill_rect(&mut self, rect: Rect);
    fn fill_text(&mut self, text: &str, at: Point);
    /// Draw `image` scaled to exactly cover `dest`.
    fn draw_image(&mut self, image: &Self::Image, dest: Rect);

    /// Encode the whole surface as PNG. `None` when the host refuses.
    fn export_png(&self) -> Option<Self::Export>;
}

/// Saved-style scope over a surface.
///
/// Calls `save()` on creation and `restore()` when dropped, so style changes
/// made through the scope never outlive it, even when a draw call panics.
pub struct StyleScope<'a, S: DrawingSurface> {
    surface: &'a mut S,
}

impl<'a, S: DrawingSurface> StyleScope<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: DrawingSurface> Deref for StyleScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &*self.surface
    }
}

impl<S: DrawingSurface> DerefMut for StyleScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut *self.surface
    }
}

impl<S: DrawingSurface> Drop for StyleScope<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
