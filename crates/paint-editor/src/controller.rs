//! Canvas interaction controller.
//!
//! Owns the `InteractionState` and the drawing surface, and translates UI
//! events into surface commands. Handlers never fail: input that cannot be
//! acted on (blank color, unknown swatch, empty text) is a logged no-op.
//!
//! | Event | Effect |
//! |-------|--------|
//! | pointer down | start painting |
//! | pointer move | painting: extend + stroke; otherwise move the path start |
//! | pointer up / leave | stop painting, begin a fresh path |
//! | canvas click | fill mode: cover the whole canvas with the fill color |
//! | double click | stamp text at 1px line width inside a style scope |

use crate::import::{ImportTicket, ImportTracker};
use crate::input::InputEvent;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::surface::{DrawingSurface, StyleScope};
use kurbo::Point;
use paint_core::config::valid_line_width;
use paint_core::{CanvasConfig, ColorValue, DrawMode, InteractionState, PresetId};

/// A ready-to-save export.
#[derive(Debug, Clone, PartialEq)]
pub struct Download<E> {
    pub filename: String,
    pub payload: E,
}

pub struct Controller<S: DrawingSurface> {
    surface: S,
    state: InteractionState,
    config: CanvasConfig,
    imports: ImportTracker,
}

impl<S: DrawingSurface> Controller<S> {
    /// Take ownership of `surface`, apply the initial style from `config`,
    /// and paint the background.
    pub fn new(surface: S, config: CanvasConfig) -> Self {
        let config = config.sanitized();
        let state = InteractionState {
            stroke_color: config.color.clone(),
            stroke_width: config.line_width,
            ..InteractionState::default()
        };
        let mut controller = Self {
            surface,
            state,
            config,
            imports: ImportTracker::new(),
        };
        controller.surface.set_line_width(controller.state.stroke_width);
        controller.surface.set_line_cap(controller.config.line_cap);
        controller.apply_color(controller.state.stroke_color.clone());
        controller.clear();
        controller
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Current text of the mode button.
    pub fn mode_label(&self) -> &'static str {
        self.state.mode.next_action_label()
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    pub fn pointer_down(&mut self, at: Point) {
        self.state.painting = true;
        // Anchor the stroke at the press point even if no move preceded it
        self.surface.move_to(at);
    }

    pub fn pointer_move(&mut self, at: Point) {
        if self.state.painting && self.state.mode == DrawMode::Draw {
            self.surface.line_to(at);
            self.surface.stroke();
            return;
        }
        self.surface.move_to(at);
    }

    pub fn pointer_up(&mut self) {
        self.stop_painting();
    }

    pub fn pointer_leave(&mut self) {
        self.stop_painting();
    }

    fn stop_painting(&mut self) {
        self.state.painting = false;
        self.surface.begin_path();
    }

    /// Canvas click. Only meaningful in fill mode, where it covers the
    /// entire canvas with the current fill color.
    pub fn click(&mut self) {
        if !self.state.is_filling() {
            return;
        }
        let bounds = self.surface.bounds();
        log::debug!("fill canvas with {}", self.state.stroke_color);
        self.surface.fill_rect(bounds);
    }

    /// Stamp `text` at `at` with the configured font and a 1px line width.
    /// The surface style is restored afterwards. Empty text is ignored.
    pub fn double_click(&mut self, at: Point, text: &str) {
        if text.is_empty() {
            return;
        }
        let mut scope = StyleScope::new(&mut self.surface);
        scope.set_line_width(1.0);
        scope.set_font(&self.config.font);
        scope.fill_text(text, at);
    }

    // ─── Controls ────────────────────────────────────────────────────────

    pub fn set_line_width(&mut self, width: f64) {
        let Some(width) = valid_line_width(width) else {
            log::warn!("ignoring stroke width {width}");
            return;
        };
        self.state.stroke_width = width;
        self.surface.set_line_width(width);
    }

    /// Stroke-width control value as delivered by a range input.
    pub fn set_line_width_str(&mut self, value: &str) {
        match value.trim().parse::<f64>() {
            Ok(width) => self.set_line_width(width),
            Err(_) => log::warn!("ignoring stroke width {value:?}"),
        }
    }

    pub fn select_preset(&mut self, id: &PresetId) {
        match self.config.palette.color_for(id) {
            Some(color) => {
                let color = color.clone();
                self.apply_color(color);
            }
            None => log::warn!("unknown swatch {}", id.as_str()),
        }
    }

    pub fn set_custom_color(&mut self, value: &str) {
        match ColorValue::new(value) {
            Some(color) => self.apply_color(color),
            None => log::warn!("ignoring blank color"),
        }
    }

    /// Flip between draw and fill mode. Returns the new button label.
    pub fn toggle_mode(&mut self) -> &'static str {
        self.state.mode = self.state.mode.toggled();
        log::debug!("mode -> {:?}", self.state.mode);
        self.mode_label()
    }

    /// Paint with the background color. The mode is left as is.
    pub fn eraser(&mut self) {
        self.apply_color(self.config.background.clone());
    }

    /// Cover the whole canvas with the background color. Stroke and fill
    /// colors survive the clear.
    pub fn clear(&mut self) {
        let bounds = self.surface.bounds();
        self.surface.begin_path();
        let mut scope = StyleScope::new(&mut self.surface);
        scope.set_fill_color(&self.config.background);
        scope.fill_rect(bounds);
    }

    fn apply_color(&mut self, color: ColorValue) {
        self.surface.set_stroke_color(&color);
        self.surface.set_fill_color(&color);
        self.state.stroke_color = color;
    }

    // ─── Image import ────────────────────────────────────────────────────

    /// Register a new file selection. Any import still decoding is superseded.
    pub fn begin_image_import(&mut self) -> ImportTicket {
        self.imports.begin()
    }

    /// Start importing whatever the file picker holds. With nothing
    /// selected no ticket is issued and a pending import stays current.
    pub fn begin_image_import_from<F>(
        &mut self,
        selection: Option<F>,
    ) -> Option<(ImportTicket, F)> {
        let Some(file) = selection else {
            log::debug!("image import requested with no file selected");
            return None;
        };
        Some((self.begin_image_import(), file))
    }

    /// Decode finished: draw `image` scaled to the canvas if `ticket` is
    /// still current. Returns whether anything was drawn.
    pub fn finish_image_import(&mut self, ticket: ImportTicket, image: &S::Image) -> bool {
        if !self.imports.complete(ticket) {
            return false;
        }
        let bounds = self.surface.bounds();
        self.surface.draw_image(image, bounds);
        true
    }

    /// Decode failed. Nothing is drawn and style is untouched.
    pub fn abandon_image_import(&mut self, ticket: ImportTicket) {
        log::warn!("image import #{} failed to decode", ticket.id());
        self.imports.abandon(ticket);
    }

    pub fn has_pending_import(&self) -> bool {
        self.imports.is_pending()
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// Encode the canvas as PNG under the configured filename.
    pub fn download(&self) -> Option<Download<S::Export>> {
        let Some(payload) = self.surface.export_png() else {
            log::warn!("canvas export refused by surface");
            return None;
        };
        Some(Download {
            filename: self.config.export_filename.clone(),
            payload,
        })
    }

    // ─── Dispatch ────────────────────────────────────────────────────────

    /// Route a normalized event to its handler. Returns a download when the
    /// event was the download shortcut.
    pub fn handle(&mut self, event: &InputEvent) -> Option<Download<S::Export>> {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Point::new(*x, *y)),
            InputEvent::PointerMove { x, y } => self.pointer_move(Point::new(*x, *y)),
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::PointerLeave => self.pointer_leave(),
            InputEvent::Click { .. } => self.click(),
            InputEvent::DoubleClick { x, y, text } => self.double_click(Point::new(*x, *y), text),
            InputEvent::Key {
                key,
                ctrl,
                shift,
                alt,
                meta,
            } => {
                let action = ShortcutMap::resolve(key, *ctrl, *shift, *alt, *meta)?;
                return self.apply_shortcut(action);
            }
        }
        None
    }

    pub fn apply_shortcut(&mut self, action: ShortcutAction) -> Option<Download<S::Export>> {
        match action {
            ShortcutAction::ToggleMode => {
                self.toggle_mode();
            }
            ShortcutAction::Eraser => self.eraser(),
            ShortcutAction::Clear => self.clear(),
            ShortcutAction::Download => return self.download(),
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{RecordingSurface, SurfaceOp};
    use paint_core::{BACKGROUND, DEFAULT_LINE_WIDTH};

    fn controller() -> Controller<RecordingSurface> {
        let mut c = Controller::new(RecordingSurface::new(400.0, 300.0), CanvasConfig::default());
        c.surface_mut().clear_ops();
        c
    }

    #[test]
    fn new_applies_config_to_surface() {
        let config = CanvasConfig {
            line_width: 9.0,
            color: ColorValue::new("#123456").unwrap(),
            ..CanvasConfig::default()
        };
        let c = Controller::new(RecordingSurface::new(10.0, 10.0), config);
        assert_eq!(c.surface().line_width(), 9.0);
        assert_eq!(c.surface().stroke_color(), "#123456");
        assert_eq!(c.surface().fill_color(), "#123456");
        assert_eq!(c.surface().line_cap(), paint_core::LineCap::Round);
        assert_eq!(c.surface().save_depth(), 0);
        assert_eq!(
            c.surface().export_png().unwrap().uniform_color(),
            Some(BACKGROUND)
        );
    }

    #[test]
    fn painting_flag_follows_press() {
        let mut c = controller();
        assert!(!c.state().painting);
        c.pointer_down(Point::new(1.0, 1.0));
        assert!(c.state().painting);
        c.pointer_up();
        assert!(!c.state().painting);
        c.pointer_down(Point::new(1.0, 1.0));
        c.pointer_leave();
        assert!(!c.state().painting);
    }

    #[test]
    fn bad_width_input_is_ignored() {
        let mut c = controller();
        c.set_line_width_str("abc");
        c.set_line_width_str("0");
        c.set_line_width(f64::INFINITY);
        assert_eq!(c.state().stroke_width, DEFAULT_LINE_WIDTH);
        assert_eq!(c.surface().line_width(), DEFAULT_LINE_WIDTH);

        c.set_line_width_str(" 12 ");
        assert_eq!(c.state().stroke_width, 12.0);
        assert_eq!(c.surface().line_width(), 12.0);
    }

    #[test]
    fn unknown_preset_and_blank_color_are_noops() {
        let mut c = controller();
        c.select_preset(&PresetId::new("nope"));
        c.set_custom_color("  ");
        assert_eq!(c.state().stroke_color, ColorValue::default());
        assert_eq!(c.surface().stroke_color(), paint_core::DEFAULT_COLOR);
    }

    #[test]
    fn click_in_draw_mode_does_nothing() {
        let mut c = controller();
        c.click();
        assert!(c.surface().ops().is_empty());
    }

    #[test]
    fn fill_mode_drag_does_not_stroke() {
        let mut c = controller();
        c.toggle_mode();
        c.pointer_down(Point::new(10.0, 10.0));
        c.pointer_move(Point::new(50.0, 50.0));
        c.pointer_up();
        assert!(c.surface().strokes().is_empty());
    }

    #[test]
    fn eraser_keeps_mode() {
        let mut c = controller();
        c.toggle_mode();
        c.eraser();
        assert!(c.state().is_filling());
        assert_eq!(c.state().stroke_color.as_str(), BACKGROUND);
        assert_eq!(c.surface().fill_color(), BACKGROUND);
    }

    #[test]
    fn only_empty_text_is_skipped() {
        let mut c = controller();
        c.double_click(Point::new(5.0, 5.0), "");
        assert!(c.surface().ops().is_empty());

        c.double_click(Point::new(5.0, 5.0), "  ");
        assert_eq!(c.surface().ops().len(), 1);
    }

    #[test]
    fn fractional_width_is_applied_unchanged() {
        let mut c = controller();
        c.set_line_width(0.5);
        assert_eq!(c.state().stroke_width, 0.5);
        assert_eq!(c.surface().line_width(), 0.5);

        c.set_line_width_str("150");
        assert_eq!(c.surface().line_width(), 150.0);
    }

    #[test]
    fn stamp_uses_configured_font() {
        let mut c = controller();
        c.double_click(Point::new(5.0, 6.0), "hello");
        match c.surface().ops() {
            [
                SurfaceOp::FillText {
                    text,
                    at,
                    font,
                    line_width,
                    ..
                },
            ] => {
                assert_eq!(text, "hello");
                assert_eq!(*at, Point::new(5.0, 6.0));
                assert_eq!(font, paint_core::TEXT_FONT);
                assert_eq!(*line_width, 1.0);
            }
            other => panic!("expected one FillText, got {other:?}"),
        }
        assert_ne!(c.surface().font(), paint_core::TEXT_FONT);
    }

    #[test]
    fn key_events_dispatch_shortcuts() {
        let mut c = controller();
        let key = |k: &str, meta: bool| InputEvent::Key {
            key: k.to_string(),
            ctrl: false,
            shift: false,
            alt: false,
            meta,
        };
        assert!(c.handle(&key("f", false)).is_none());
        assert!(c.state().is_filling());
        assert_eq!(c.mode_label(), "Draw");

        let download = c.handle(&key("s", true)).unwrap();
        assert_eq!(download.filename, paint_core::EXPORT_FILENAME);

        assert!(c.handle(&key("q", false)).is_none());
    }
}
