// File: crates/annotation-core/src/geometry.rs
// Summary: Pixel-space geometry helpers: points, rects, segment interpolation, rounded-rect paths.

use std::f64::consts::{FRAC_PI_2, PI};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of `width` x `height` centered on `center`.
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        Self { x: center.x - width / 2.0, y: center.y - height / 2.0, width, height }
    }

    pub fn right(&self) -> f64 { self.x + self.width }
    pub fn bottom(&self) -> f64 { self.y + self.height }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive containment test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Point at parameter `t` along the segment `p1 -> p2`.
#[inline]
pub fn point_in_line(p1: Point, p2: Point, t: f64) -> Point {
    Point::new(p1.x + t * (p2.x - p1.x), p1.y + t * (p2.y - p1.y))
}

/// X coordinate of the infinite line through `p1`/`p2` at height `y`.
/// Non-finite for horizontal lines.
#[inline]
pub fn interpolate_x(y: f64, p1: Point, p2: Point) -> f64 {
    point_in_line(p1, p2, (y - p1.y) / (p2.y - p1.y)).x
}

/// Y coordinate of the infinite line through `p1`/`p2` at abscissa `x`.
/// Non-finite for vertical lines.
#[inline]
pub fn interpolate_y(x: f64, p1: Point, p2: Point) -> f64 {
    point_in_line(p1, p2, (x - p1.x) / (p2.x - p1.x)).y
}

/// One step of a path, in the order a 2D canvas would receive it. Arc angles are radians,
/// clockwise in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    Arc { center: Point, radius: f64, start: f64, end: f64 },
    Rect(Rect),
    Close,
}

/// Path for a rectangle with the same `radius` on every corner.
///
/// The radius is clamped to half the smaller side. When the straight edges collapse the
/// path degenerates to a stadium (horizontal or vertical) or a circle.
pub fn rounded_rect(rect: Rect, radius: f64) -> Vec<PathCommand> {
    let Rect { x, y, width, height } = rect;
    if radius <= 0.0 || !radius.is_finite() {
        return vec![PathCommand::Rect(rect)];
    }

    let r = radius.min(height / 2.0).min(width / 2.0);
    let left = x + r;
    let top = y + r;
    let right = x + width - r;
    let bottom = y + height - r;
    let arc = |cx: f64, cy: f64, start: f64, end: f64| PathCommand::Arc {
        center: Point::new(cx, cy),
        radius: r,
        start,
        end,
    };

    let mut path = vec![PathCommand::MoveTo(Point::new(x, top))];
    if left < right && top < bottom {
        path.push(arc(left, top, -PI, -FRAC_PI_2));
        path.push(arc(right, top, -FRAC_PI_2, 0.0));
        path.push(arc(right, bottom, 0.0, FRAC_PI_2));
        path.push(arc(left, bottom, FRAC_PI_2, PI));
    } else if left < right {
        path.push(PathCommand::MoveTo(Point::new(left, y)));
        path.push(arc(right, top, -FRAC_PI_2, FRAC_PI_2));
        path.push(arc(left, top, FRAC_PI_2, PI + FRAC_PI_2));
    } else if top < bottom {
        path.push(arc(left, top, -PI, 0.0));
        path.push(arc(left, bottom, 0.0, PI));
    } else {
        path.push(arc(left, top, -PI, PI));
    }
    path.push(PathCommand::Close);
    path.push(PathCommand::MoveTo(Point::new(x, y)));
    path
}
