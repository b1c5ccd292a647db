// File: crates/annotation-core/src/surface.rs
// Summary: Drawing-surface contract implemented by render backends, plus a recording surface.

use crate::color::Color;
use crate::geometry::{PathCommand, Point, Rect};
use crate::options::FontSpec;

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub color: Color,
    pub dash: Vec<f64>,
    pub dash_offset: f64,
}

impl Stroke {
    pub fn solid(width: f64, color: Color) -> Self {
        Self { width, color, dash: Vec::new(), dash_offset: 0.0 }
    }
}

/// Vertical anchor for text; text is always horizontally centered on its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
}

/// 2D canvas operations used to draw annotations. Transform and clip changes must be
/// undone by the matching `restore`.
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn clip_rect(&mut self, rect: Rect);
    fn translate(&mut self, dx: f64, dy: f64);
    /// Rotation in radians, clockwise in screen space.
    fn rotate(&mut self, radians: f64);

    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);
    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke);
    fn fill_path(&mut self, path: &[PathCommand], color: Color);
    fn fill_text(&mut self, text: &str, at: Point, baseline: TextBaseline, font: &FontSpec);

    /// Rendered width of `text` in pixels.
    fn measure_text(&mut self, text: &str, font: &FontSpec) -> f64;
}

/// One recorded [`Surface`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    Clip(Rect),
    Translate(f64, f64),
    Rotate(f64),
    FillRect(Rect, Color),
    StrokeRect(Rect, Stroke),
    StrokeLine(Point, Point, Stroke),
    FillPath(Vec<PathCommand>, Color),
    FillText { text: String, at: Point, baseline: TextBaseline },
}

/// Headless surface that records every call. Text is measured as a fixed advance per
/// character, which keeps layouts deterministic without fonts.
#[derive(Clone, Debug)]
pub struct Recorder {
    pub ops: Vec<DrawOp>,
    pub char_width: f64,
    pub measure_calls: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self { ops: Vec::new(), char_width: 6.0, measure_calls: 0 }
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for Recorder {
    fn default() -> Self { Self::new() }
}

impl Surface for Recorder {
    fn save(&mut self) { self.ops.push(DrawOp::Save); }
    fn restore(&mut self) { self.ops.push(DrawOp::Restore); }
    fn clip_rect(&mut self, rect: Rect) { self.ops.push(DrawOp::Clip(rect)); }
    fn translate(&mut self, dx: f64, dy: f64) { self.ops.push(DrawOp::Translate(dx, dy)); }
    fn rotate(&mut self, radians: f64) { self.ops.push(DrawOp::Rotate(radians)); }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.ops.push(DrawOp::StrokeRect(rect, stroke.clone()));
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.ops.push(DrawOp::StrokeLine(from, to, stroke.clone()));
    }

    fn fill_path(&mut self, path: &[PathCommand], color: Color) {
        self.ops.push(DrawOp::FillPath(path.to_vec(), color));
    }

    fn fill_text(&mut self, text: &str, at: Point, baseline: TextBaseline, _font: &FontSpec) {
        self.ops.push(DrawOp::FillText { text: text.to_string(), at, baseline });
    }

    fn measure_text(&mut self, text: &str, _font: &FontSpec) -> f64 {
        self.measure_calls += 1;
        text.chars().count() as f64 * self.char_width
    }
}
