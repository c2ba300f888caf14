pub mod config;
pub mod model;
pub mod palette;

pub use config::CanvasConfig;
pub use model::*;
pub use palette::{Palette, PresetId};
