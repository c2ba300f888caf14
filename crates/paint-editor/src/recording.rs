//! In-memory drawing surface.
//!
//! Records every visible command with the style in effect at the time,
//! following Canvas2D path semantics: `move_to` opens a subpath, `line_to`
//! extends it, and `stroke` renders every subpath accumulated since the
//! last `begin_path`. Used by tests and headless callers.

use crate::surface::DrawingSurface;
use kurbo::{Point, Rect, Size};
use paint_core::{BACKGROUND, ColorValue, DEFAULT_COLOR, DEFAULT_LINE_WIDTH, LineCap};

#[derive(Debug, Clone, PartialEq)]
struct Style {
    line_width: f64,
    line_cap: LineCap,
    stroke_color: String,
    fill_color: String,
    font: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            line_cap: LineCap::Butt,
            stroke_color: DEFAULT_COLOR.to_string(),
            fill_color: DEFAULT_COLOR.to_string(),
            font: "10px sans-serif".to_string(),
        }
    }
}

/// A rendered command, with resolved style.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Stroke {
        /// Generation of the path being stroked; bumped by `begin_path`.
        path: u64,
        /// Subpaths with at least one segment.
        subpaths: Vec<Vec<Point>>,
        width: f64,
        cap: LineCap,
        color: String,
    },
    FillRect {
        rect: Rect,
        color: String,
    },
    FillText {
        text: String,
        at: Point,
        font: String,
        color: String,
        line_width: f64,
    },
    DrawImage {
        image: String,
        dest: Rect,
    },
}

impl SurfaceOp {
    /// Whether this op paints over every pixel of a surface with `bounds`.
    fn covers(&self, bounds: Rect) -> bool {
        match self {
            Self::FillRect { rect, .. } | Self::DrawImage { dest: rect, .. } => {
                rect.x0 <= bounds.x0
                    && rect.y0 <= bounds.y0
                    && rect.x1 >= bounds.x1
                    && rect.y1 >= bounds.y1
            }
            _ => false,
        }
    }
}

/// One continuous polyline as it appears on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeTrace {
    pub points: Vec<Point>,
    pub width: f64,
    pub color: String,
}

/// Exported image: the ops still visible on the surface, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub size: Size,
    pub ops: Vec<SurfaceOp>,
}

impl Snapshot {
    /// Color of the surface when a single full-surface fill is all that shows.
    pub fn uniform_color(&self) -> Option<&str> {
        match self.ops.as_slice() {
            [SurfaceOp::FillRect { color, .. }] => Some(color.as_str()),
            _ => None,
        }
    }
}

pub struct RecordingSurface {
    size: Size,
    style: Style,
    saved: Vec<Style>,
    path: u64,
    subpaths: Vec<Vec<Point>>,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            style: Style::default(),
            saved: Vec::new(),
            path: 0,
            subpaths: Vec::new(),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    pub fn stroke_color(&self) -> &str {
        &self.style.stroke_color
    }

    pub fn fill_color(&self) -> &str {
        &self.style.fill_color
    }

    pub fn line_cap(&self) -> LineCap {
        self.style.line_cap
    }

    pub fn font(&self) -> &str {
        &self.style.font
    }

    /// Distinct polylines rendered so far.
    ///
    /// Canvas2D re-strokes the whole path on every `stroke()`, so a drag
    /// produces a growing sequence of stroke ops. Each growth step of the
    /// same polyline is folded into one trace. Strokes from different paths
    /// are never folded, even when one retraces the other.
    pub fn strokes(&self) -> Vec<StrokeTrace> {
        let mut traces: Vec<(u64, StrokeTrace)> = Vec::new();
        for op in &self.ops {
            let SurfaceOp::Stroke {
                path,
                subpaths,
                width,
                color,
                ..
            } = op
            else {
                continue;
            };
            for points in subpaths {
                let existing = traces.iter().rposition(|(p, t)| {
                    p == path
                        && t.width == *width
                        && t.color == *color
                        && points.starts_with(&t.points)
                });
                match existing {
                    Some(i) => traces[i].1.points.clone_from(points),
                    None => traces.push((
                        *path,
                        StrokeTrace {
                            points: points.clone(),
                            width: *width,
                            color: color.clone(),
                        },
                    )),
                }
            }
        }
        traces.into_iter().map(|(_, trace)| trace).collect()
    }

    fn visible_ops(&self) -> Vec<SurfaceOp> {
        let bounds = Rect::from_origin_size(Point::ORIGIN, self.size);
        let start = self
            .ops
            .iter()
            .rposition(|op| op.covers(bounds))
            .unwrap_or(0);
        self.ops[start..].to_vec()
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(
            f64::from(paint_core::CANVAS_WIDTH),
            f64::from(paint_core::CANVAS_HEIGHT),
        )
    }
}

impl DrawingSurface for RecordingSurface {
    /// Images are identified by name.
    type Image = String;
    type Export = Snapshot;

    fn size(&self) -> Size {
        self.size
    }

    fn begin_path(&mut self) {
        self.path += 1;
        self.subpaths.clear();
    }

    fn move_to(&mut self, p: Point) {
        self.subpaths.push(vec![p]);
    }

    fn line_to(&mut self, p: Point) {
        match self.subpaths.last_mut() {
            Some(subpath) => subpath.push(p),
            // Canvas2D: lineTo on an empty path behaves like moveTo
            None => self.subpaths.push(vec![p]),
        }
    }

    fn stroke(&mut self) {
        let subpaths: Vec<Vec<Point>> = self
            .subpaths
            .iter()
            .filter(|s| s.len() >= 2)
            .cloned()
            .collect();
        if subpaths.is_empty() {
            return;
        }
        self.ops.push(SurfaceOp::Stroke {
            path: self.path,
            subpaths,
            width: self.style.line_width,
            cap: self.style.line_cap,
            color: self.style.stroke_color.clone(),
        });
    }

    fn set_line_width(&mut self, width: f64) {
        // Canvas2D ignores non-positive and non-finite widths
        if width.is_finite() && width > 0.0 {
            self.style.line_width = width;
        }
    }

    fn line_width(&self) -> f64 {
        self.style.line_width
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.style.line_cap = cap;
    }

    fn set_stroke_color(&mut self, color: &ColorValue) {
        self.style.stroke_color = color.as_str().to_string();
    }

    fn set_fill_color(&mut self, color: &ColorValue) {
        self.style.fill_color = color.as_str().to_string();
    }

    fn set_font(&mut self, font: &str) {
        self.style.font = font.to_string();
    }

    fn save(&mut self) {
        self.saved.push(self.style.clone());
    }

    fn restore(&mut self) {
        if let Some(style) = self.saved.pop() {
            self.style = style;
        }
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ops.push(SurfaceOp::FillRect {
            rect,
            color: self.style.fill_color.clone(),
        });
    }

    fn fill_text(&mut self, text: &str, at: Point) {
        self.ops.push(SurfaceOp::FillText {
            text: text.to_string(),
            at,
            font: self.style.font.clone(),
            color: self.style.fill_color.clone(),
            line_width: self.style.line_width,
        });
    }

    fn draw_image(&mut self, image: &String, dest: Rect) {
        self.ops.push(SurfaceOp::DrawImage {
            image: image.clone(),
            dest,
        });
    }

    fn export_png(&self) -> Option<Snapshot> {
        let mut ops = self.visible_ops();
        if ops.is_empty() {
            // Nothing drawn yet: a blank surface exports as background
            ops.push(SurfaceOp::FillRect {
                rect: Rect::from_origin_size(Point::ORIGIN, self.size),
                color: BACKGROUND.to_string(),
            });
        }
        Some(Snapshot {
            size: self.size,
            ops,
        })
    }
}
