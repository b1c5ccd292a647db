// File: crates/annotation-core/src/shape/label.rs
// Summary: Label sizing, anchoring and rotation relative to a line, and label drawing.

use crate::geometry::{interpolate_x, interpolate_y, point_in_line, rounded_rect, Point, Rect};
use crate::options::{LabelOptions, LabelPosition, LineMode, Rotation};
use crate::surface::{Surface, TextBaseline};
use crate::text::measure_cached;

use super::LineShape;

/// Label box size: widest line plus horizontal padding, stacked lines plus vertical padding.
pub fn measure_label(surface: &mut dyn Surface, label: &LabelOptions) -> (f64, f64) {
    let lines = label.content.as_ref().map(|c| c.lines()).unwrap_or_default();
    let count = lines.len() as f64;
    let widest = lines
        .iter()
        .map(|text| measure_cached(surface, &label.font, text))
        .fold(0.0, f64::max);
    let width = widest + 2.0 * label.x_padding;
    let height = count * label.font.size + (count + 1.0) * label.y_padding;
    (width, height)
}

/// Anchor (center) of a `width` x `height` label on the line `p1 -> p2`.
pub fn label_position(p1: Point, p2: Point, label: &LabelOptions, width: f64, height: f64) -> Point {
    match label.position {
        LabelPosition::Top => {
            let y = label.y_padding + label.y_adjust;
            Point::new(interpolate_x(y, p1, p2), y)
        }
        LabelPosition::Bottom => {
            let y = height - label.y_padding + label.y_adjust;
            Point::new(interpolate_x(y, p1, p2), y)
        }
        LabelPosition::Left => {
            let x = label.x_padding + label.x_adjust;
            Point::new(x, interpolate_y(x, p1, p2))
        }
        LabelPosition::Right => {
            let x = width - label.x_padding + label.x_adjust;
            Point::new(x, interpolate_y(x, p1, p2))
        }
        LabelPosition::Center => {
            let mid = point_in_line(p1, p2, 0.5);
            Point::new(mid.x + label.x_adjust, mid.y + label.y_adjust)
        }
    }
}

/// Angle in radians aligning a label with the line. `Horizontal` mode measures the slope
/// against the y axis direction so both orientations resolve the arctangent correctly.
pub fn auto_rotation(p1: Point, p2: Point, mode: Option<LineMode>) -> f64 {
    let (adjacent, opposite) = match mode {
        Some(LineMode::Horizontal) => {
            let adjacent = if p2.y > p1.y { p2.x - p1.x } else { -(p2.x - p1.x) };
            (adjacent, (p1.y - p2.y).abs())
        }
        _ => {
            let opposite = if p2.x > p1.x { p2.y - p1.y } else { -(p2.y - p1.y) };
            ((p1.x - p2.x).abs(), opposite)
        }
    };
    let angle = (opposite / adjacent).atan();
    if angle.is_finite() { angle } else { 0.0 }
}

pub fn label_rotation(line: &LineShape) -> f64 {
    match line.label.rotation {
        Rotation::Auto => auto_rotation(line.start(), line.end(), line.mode),
        Rotation::Degrees(deg) => deg.to_radians(),
    }
}

/// Draw the label of `line` and return its unrotated bounding box.
///
/// Leaves the surface translated and rotated; callers wrap this in save/restore.
pub fn draw_label(surface: &mut dyn Surface, line: &LineShape) -> Rect {
    let label = &line.label;
    let (width, height) = measure_label(surface, label);
    let pos = label_position(line.start(), line.end(), label, width, height);
    let rotation = label_rotation(line);

    surface.translate(pos.x, pos.y);
    surface.rotate(rotation);

    let background = Rect::from_xywh(-width / 2.0, -height / 2.0, width, height);
    surface.fill_path(&rounded_rect(background, label.corner_radius), label.background_color);

    if let Some(content) = &label.content {
        if content.is_multiline() {
            let mut y = -height / 2.0 + label.y_padding;
            for text in content.lines() {
                surface.fill_text(text, Point::new(0.0, y), TextBaseline::Top, &label.font);
                y += label.font.size + label.y_padding;
            }
        } else {
            for text in content.lines() {
                surface.fill_text(text, Point::new(0.0, 0.0), TextBaseline::Middle, &label.font);
            }
        }
    }

    Rect::centered(pos, width, height)
}
