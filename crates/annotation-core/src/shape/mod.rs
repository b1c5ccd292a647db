// File: crates/annotation-core/src/shape/mod.rs
// Summary: Shape contract (hit-test, center, size, draw) and the box/line variants.

pub mod label;
pub mod line;
pub mod rect;

pub use line::{LineShape, LineStyle};
pub use rect::{BoxShape, BoxStyle};

use crate::geometry::Point;
use crate::surface::Surface;

/// Pixel-space corners resolved from scales. `(x, y)` is the first endpoint, `(x2, y2)`
/// the second; boxes normalize them, lines keep their order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Capabilities every annotation shape provides.
pub trait Shape {
    /// Whether the pixel `(x, y)` hits the shape.
    fn in_range(&self, x: f64, y: f64) -> bool;
    fn center_point(&self) -> Point;
    /// Size proxy used to break ties between equally near shapes.
    fn area(&self) -> f64;
    fn draw(&mut self, surface: &mut dyn Surface);
}

#[derive(Clone, Debug, PartialEq)]
pub enum AnnotationShape {
    Box(BoxShape),
    Line(LineShape),
}

impl AnnotationShape {
    pub fn as_box(&self) -> Option<&BoxShape> {
        match self {
            AnnotationShape::Box(b) => Some(b),
            AnnotationShape::Line(_) => None,
        }
    }

    pub fn as_line(&self) -> Option<&LineShape> {
        match self {
            AnnotationShape::Line(l) => Some(l),
            AnnotationShape::Box(_) => None,
        }
    }

    fn inner(&self) -> &dyn Shape {
        match self {
            AnnotationShape::Box(b) => b,
            AnnotationShape::Line(l) => l,
        }
    }
}

impl Shape for AnnotationShape {
    fn in_range(&self, x: f64, y: f64) -> bool { self.inner().in_range(x, y) }
    fn center_point(&self) -> Point { self.inner().center_point() }
    fn area(&self) -> f64 { self.inner().area() }

    fn draw(&mut self, surface: &mut dyn Surface) {
        match self {
            AnnotationShape::Box(b) => b.draw(surface),
            AnnotationShape::Line(l) => l.draw(surface),
        }
    }
}
