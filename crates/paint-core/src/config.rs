//! Canvas configuration.
//!
//! The host page may pass a JSON object at mount time; every field is
//! optional and falls back to the built-in defaults.

use crate::model::{
    CANVAS_HEIGHT, CANVAS_WIDTH, ColorValue, DEFAULT_LINE_WIDTH, EXPORT_FILENAME,
    LineCap, TEXT_FONT,
};
use crate::palette::Palette;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub line_width: f64,
    pub line_cap: LineCap,
    pub color: ColorValue,
    pub background: ColorValue,
    /// CSS font used for double-click text stamps.
    pub font: String,
    pub export_filename: String,
    pub palette: Palette,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            line_width: DEFAULT_LINE_WIDTH,
            line_cap: LineCap::Round,
            color: ColorValue::default(),
            background: ColorValue::background(),
            font: TEXT_FONT.to_string(),
            export_filename: EXPORT_FILENAME.to_string(),
            palette: Palette::default(),
        }
    }
}

impl CanvasConfig {
    /// Parse a JSON config. Blank input yields the defaults.
    pub fn from_json(source: &str) -> Result<Self, String> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str::<Self>(source)
            .map(Self::sanitized)
            .map_err(|e| {
                log::warn!("canvas config rejected: {e}");
                format!("invalid canvas config: {e}")
            })
    }

    /// Replace unusable dimensions, stroke width and strings.
    pub fn sanitized(mut self) -> Self {
        self.width = self.width.max(1);
        self.height = self.height.max(1);
        self.line_width = valid_line_width(self.line_width).unwrap_or(DEFAULT_LINE_WIDTH);
        if self.font.trim().is_empty() {
            self.font = TEXT_FONT.to_string();
        }
        if self.export_filename.trim().is_empty() {
            self.export_filename = EXPORT_FILENAME.to_string();
        }
        self
    }
}

/// A stroke width the surface can apply, unchanged. Non-finite or
/// non-positive widths are rejected.
pub fn valid_line_width(width: f64) -> Option<f64> {
    if width.is_finite() && width > 0.0 {
        Some(width)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PresetId;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_config_is_default() {
        assert_eq!(CanvasConfig::from_json("").unwrap(), CanvasConfig::default());
        assert_eq!(CanvasConfig::from_json("  \n").unwrap(), CanvasConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = CanvasConfig::from_json(r#"{"width": 640, "lineWidth": 12}"#).unwrap();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, CANVAS_HEIGHT);
        assert_eq!(config.line_width, 12.0);
        assert_eq!(config.export_filename, EXPORT_FILENAME);
    }

    #[test]
    fn config_with_palette_and_cap() {
        let config = CanvasConfig::from_json(
            r##"{"lineCap": "square", "palette": [{"id": "red", "color": "#ff0000"}]}"##,
        )
        .unwrap();
        assert_eq!(config.line_cap, LineCap::Square);
        assert_eq!(config.palette.len(), 1);
        assert_eq!(
            config.palette.color_for(&PresetId::new("red")).unwrap().as_str(),
            "#ff0000"
        );
    }

    #[test]
    fn sanitize_replaces_unusable_values() {
        let config = CanvasConfig::from_json(r#"{"width": 0, "lineWidth": -2, "font": ""}"#)
            .unwrap();
        assert_eq!(config.width, 1);
        assert_eq!(config.line_width, DEFAULT_LINE_WIDTH);
        assert_eq!(config.font, TEXT_FONT);

        let wide = CanvasConfig::from_json(r#"{"lineWidth": 500}"#).unwrap();
        assert_eq!(wide.line_width, 500.0);
    }

    #[test]
    fn malformed_config_is_error() {
        let err = CanvasConfig::from_json("{width: }").unwrap_err();
        assert!(err.starts_with("invalid canvas config"));
        assert!(CanvasConfig::from_json(r#"{"color": ""}"#).is_err());
    }

    #[test]
    fn line_width_passes_positive_values_through() {
        assert_eq!(valid_line_width(0.0), None);
        assert_eq!(valid_line_width(-3.0), None);
        assert_eq!(valid_line_width(f64::NAN), None);
        assert_eq!(valid_line_width(0.5), Some(0.5));
        assert_eq!(valid_line_width(250.0), Some(250.0));
    }
}
