// File: crates/annotation-core/src/shape/rect.rs
// Summary: Axis-aligned box annotation.

use crate::color::Color;
use crate::geometry::{Point, Rect};
use crate::options::AnnotationOptions;
use crate::surface::{Stroke, Surface};
use crate::theme::Theme;

use super::{Geometry, Shape};

#[derive(Clone, Debug, PartialEq)]
pub struct BoxStyle {
    pub border_width: f64,
    pub border_color: Color,
    pub background_color: Color,
}

impl BoxStyle {
    pub fn resolve(options: &AnnotationOptions, theme: &Theme) -> Self {
        Self {
            border_width: options.border_width,
            border_color: options.border_color.unwrap_or(theme.border),
            background_color: options.background_color.unwrap_or(theme.fill),
        }
    }
}

impl Default for BoxStyle {
    fn default() -> Self { Self::resolve(&AnnotationOptions::default(), &Theme::default()) }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoxShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub style: BoxStyle,
}

impl BoxShape {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height, style: BoxStyle::default() }
    }

    /// Box covering the corners of `g`, whichever order they come in.
    pub fn from_geometry(g: Geometry, style: BoxStyle) -> Self {
        let mut b = Self::new(0.0, 0.0, 0.0, 0.0);
        b.style = style;
        b.set_geometry(g);
        b
    }

    pub fn set_geometry(&mut self, g: Geometry) {
        let (x, x2) = if g.x2 < g.x { (g.x2, g.x) } else { (g.x, g.x2) };
        let (y, y2) = if g.y2 < g.y { (g.y2, g.y) } else { (g.y, g.y2) };
        self.x = x;
        self.y = y;
        self.width = x2 - x;
        self.height = y2 - y;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_xywh(self.x, self.y, self.width, self.height)
    }
}

impl Shape for BoxShape {
    fn in_range(&self, x: f64, y: f64) -> bool {
        self.rect().contains(x, y)
    }

    fn center_point(&self) -> Point {
        self.rect().center()
    }

    fn area(&self) -> f64 {
        self.width * self.height
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        let rect = self.rect();
        surface.save();
        surface.fill_rect(rect, self.style.background_color);
        surface.stroke_rect(rect, &Stroke::solid(self.style.border_width, self.style.border_color));
        surface.restore();
    }
}
