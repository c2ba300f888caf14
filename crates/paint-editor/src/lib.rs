pub mod controller;
pub mod import;
pub mod input;
pub mod recording;
pub mod shortcuts;
pub mod surface;

pub use controller::{Controller, Download};
pub use surface::{DrawingSurface, StyleScope};

// Re-export geometry so hosts don't need a direct kurbo dependency
pub use kurbo::{Point, Rect, Size};
