//! Interaction state and color model for the paint canvas.
//!
//! The controller owns exactly one `InteractionState`. Colors travel as
//! opaque `ColorValue` tokens and are handed to the drawing surface
//! verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default canvas width in surface pixels.
pub const CANVAS_WIDTH: u32 = 800;
/// Default canvas height in surface pixels.
pub const CANVAS_HEIGHT: u32 = 800;
/// Background color used by the eraser and the clear action.
pub const BACKGROUND: &str = "#ffffff";
/// Initial value of the stroke-width control.
pub const DEFAULT_LINE_WIDTH: f64 = 5.0;
/// Initial stroke and fill color.
pub const DEFAULT_COLOR: &str = "#000000";
/// Font used when stamping text on double-click.
pub const TEXT_FONT: &str = "68px serif";
/// Filename offered when the canvas is downloaded.
pub const EXPORT_FILENAME: &str = "myDrawing.png";

// ─── Colors ──────────────────────────────────────────────────────────────

/// An opaque color token as produced by a swatch or the color picker.
///
/// Passed to the drawing surface unchanged, so CSS names like `"tomato"`
/// work as well as hex codes. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorValue(String);

impl ColorValue {
    /// Build a token from raw control input. Blank input yields `None`.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn background() -> Self {
        Self(BACKGROUND.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ColorValue {
    fn default() -> Self {
        Self(DEFAULT_COLOR.to_string())
    }
}

impl TryFrom<String> for ColorValue {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| "color must not be empty".to_string())
    }
}

impl From<ColorValue> for String {
    fn from(value: ColorValue) -> Self {
        value.0
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Stroke style ────────────────────────────────────────────────────────

/// End-cap style for stroked paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

// ─── Interaction state ───────────────────────────────────────────────────

/// Which drawing behavior a canvas gesture produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Pointer drags render freehand strokes.
    #[default]
    Draw,
    /// A canvas click covers the whole surface with the fill color.
    Fill,
}

impl DrawMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Draw => Self::Fill,
            Self::Fill => Self::Draw,
        }
    }

    pub fn is_filling(self) -> bool {
        self == Self::Fill
    }

    /// Mode-button label: names the mode the button switches *to*.
    pub fn next_action_label(self) -> &'static str {
        match self {
            Self::Draw => "Fill",
            Self::Fill => "Draw",
        }
    }
}

/// Mutable state owned by the controller for the whole session.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    /// True only between a pointer-down and the next pointer-up/leave.
    pub painting: bool,
    pub mode: DrawMode,
    pub stroke_color: ColorValue,
    pub stroke_width: f64,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            painting: false,
            mode: DrawMode::Draw,
            stroke_color: ColorValue::default(),
            stroke_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl InteractionState {
    pub fn is_filling(&self) -> bool {
        self.mode.is_filling()
    }
}
