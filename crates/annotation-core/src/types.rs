// File: crates/annotation-core/src/types.rs
// Summary: Shared types and constants (surface sizes, insets, chart area).

use crate::geometry::Rect;

/// Default surface width in pixels.
pub const WIDTH: i32 = 1024;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 640;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(72, 24, 24, 56)
    }
}

/// Plot rectangle of the host chart, in pixels. Annotations are clipped to it and
/// use its edges when a geometry field is missing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ChartArea {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// Area left over once `insets` are removed from a `width` x `height` surface.
    pub fn from_insets(width: i32, height: i32, insets: &Insets) -> Self {
        Self {
            left: insets.left as f64,
            top: insets.top as f64,
            right: (width - insets.right as i32) as f64,
            bottom: (height - insets.bottom as i32) as f64,
        }
    }

    pub fn width(&self) -> f64 { self.right - self.left }
    pub fn height(&self) -> f64 { self.bottom - self.top }

    pub fn rect(&self) -> Rect {
        Rect::from_xywh(self.left, self.top, self.width(), self.height())
    }
}

impl Default for ChartArea {
    fn default() -> Self {
        Self::from_insets(WIDTH, HEIGHT, &Insets::default())
    }
}
