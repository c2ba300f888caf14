//! Preset color swatches.
//!
//! Each swatch control is identified by a `PresetId`; the palette maps that
//! id to the color it applies. Lookup is by id, never by position.

use crate::model::ColorValue;
use serde::{Deserialize, Serialize};

/// The standard swatch row shown next to the canvas.
pub const DEFAULT_SWATCHES: [&str; 12] = [
    "#1abc9c", "#3498db", "#34495e", "#27ae60", "#8e44ad", "#f1c40f", "#e74c3c", "#95a5a6",
    "#d35400", "#bdc3c7", "#2ecc71", "#e67e22",
];

/// Identifier of a preset swatch control (its DOM id on the web).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetId(String);

impl PresetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub id: PresetId,
    pub color: ColorValue,
}

/// Ordered mapping from swatch id to color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    swatches: Vec<Swatch>,
}

impl Default for Palette {
    fn default() -> Self {
        let swatches = DEFAULT_SWATCHES
            .iter()
            .enumerate()
            .filter_map(|(i, hex)| {
                Some(Swatch {
                    id: PresetId::new(format!("swatch-{i}")),
                    color: ColorValue::new(hex)?,
                })
            })
            .collect();
        Self { swatches }
    }
}

impl Palette {
    pub fn new(swatches: Vec<Swatch>) -> Self {
        Self { swatches }
    }

    /// Color bound to a swatch id. Later duplicates never shadow earlier ones.
    pub fn color_for(&self, id: &PresetId) -> Option<&ColorValue> {
        self.swatches
            .iter()
            .find(|swatch| swatch.id == *id)
            .map(|swatch| &swatch.color)
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }
}
