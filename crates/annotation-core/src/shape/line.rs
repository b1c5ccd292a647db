// File: crates/annotation-core/src/shape/line.rs
// Summary: Line-segment annotation with an optional label.

use crate::color::Color;
use crate::geometry::{distance, interpolate_x, interpolate_y, Point, Rect};
use crate::options::{AnnotationOptions, LabelOptions, LineMode};
use crate::surface::{Stroke, Surface};
use crate::theme::Theme;

use super::label::draw_label;
use super::{Geometry, Shape};

#[derive(Clone, Debug, PartialEq)]
pub struct LineStyle {
    pub width: f64,
    pub color: Color,
    pub dash: Vec<f64>,
    pub dash_offset: f64,
}

impl LineStyle {
    pub fn resolve(options: &AnnotationOptions, theme: &Theme) -> Self {
        Self {
            width: options.border_width,
            color: options.border_color.unwrap_or(theme.border),
            dash: options.border_dash.clone(),
            dash_offset: options.border_dash_offset,
        }
    }

    pub fn stroke(&self) -> Stroke {
        Stroke { width: self.width, color: self.color, dash: self.dash.clone(), dash_offset: self.dash_offset }
    }
}

impl Default for LineStyle {
    fn default() -> Self { Self::resolve(&AnnotationOptions::default(), &Theme::default()) }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineShape {
    pub x: f64,
    pub y: f64,
    pub x2: f64,
    pub y2: f64,
    pub style: LineStyle,
    pub label: LabelOptions,
    pub mode: Option<LineMode>,
    /// Where the label was last drawn; `None` until drawn or when hidden.
    pub label_rect: Option<Rect>,
}

impl LineShape {
    pub fn new(x: f64, y: f64, x2: f64, y2: f64) -> Self {
        Self {
            x,
            y,
            x2,
            y2,
            style: LineStyle::default(),
            label: LabelOptions::default(),
            mode: None,
            label_rect: None,
        }
    }

    pub fn set_geometry(&mut self, g: Geometry) {
        self.x = g.x;
        self.y = g.y;
        self.x2 = g.x2;
        self.y2 = g.y2;
    }

    pub fn start(&self) -> Point { Point::new(self.x, self.y) }
    pub fn end(&self) -> Point { Point::new(self.x2, self.y2) }

    /// Hit tolerance in pixels: the border width, or 1 for hairlines.
    pub fn epsilon(&self) -> f64 {
        if self.style.width > 0.0 { self.style.width } else { 1.0 }
    }

    /// Whether `(x, y)` is within `epsilon` of the infinite line, measured along either
    /// axis. An axis whose interpolation is not finite is not consulted.
    pub fn intersects(&self, x: f64, y: f64, epsilon: f64) -> bool {
        let (p1, p2) = (self.start(), self.end());
        let iy = interpolate_y(x, p1, p2);
        let ix = interpolate_x(y, p1, p2);
        (iy.is_finite() && (y - iy).abs() < epsilon) || (ix.is_finite() && (x - ix).abs() < epsilon)
    }

    pub fn label_is_visible(&self) -> bool {
        self.label.is_visible()
    }

    pub fn is_on_label(&self, x: f64, y: f64) -> bool {
        self.label_is_visible() && self.label_rect.is_some_and(|r| r.contains(x, y))
    }
}

impl Shape for LineShape {
    fn in_range(&self, x: f64, y: f64) -> bool {
        self.intersects(x, y, self.epsilon()) || self.is_on_label(x, y)
    }

    fn center_point(&self) -> Point {
        Point::new((self.x + self.x2) / 2.0, (self.y + self.y2) / 2.0)
    }

    fn area(&self) -> f64 {
        distance(self.start(), self.end())
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        surface.save();
        surface.stroke_line(self.start(), self.end(), &self.style.stroke());
        self.label_rect = if self.label_is_visible() { Some(draw_label(surface, self)) } else { None };
        surface.restore();
    }
}
