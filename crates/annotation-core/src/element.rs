// File: crates/annotation-core/src/element.rs
// Summary: Live annotation element: identity, resolved shape, display flag and pending click.

use std::time::Instant;

use crate::chart::Chart;
use crate::geometry::Point;
use crate::handlers::Handler;
use crate::options::{AnnotationKind, AnnotationOptions, DrawTime};
use crate::scale::{DataValue, Scale};
use crate::shape::{AnnotationShape, BoxShape, BoxStyle, Geometry, LineShape, LineStyle, Shape};
use crate::surface::Surface;
use crate::theme::Theme;

/// Identity of an element instance. Survives updates as long as the annotation at that
/// index keeps its type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub(crate) u64);

/// Single-click waiting for the double-click window to close.
#[derive(Clone)]
pub(crate) struct PendingClick {
    pub(crate) deadline: Instant,
    pub(crate) handler: Option<Handler>,
}

pub struct Element {
    id: ShapeId,
    index: usize,
    shape: AnnotationShape,
    options: AnnotationOptions,
    display: bool,
    resolved: bool,
    pub(crate) pending_click: Option<PendingClick>,
}

impl Element {
    pub(crate) fn new(id: ShapeId, index: usize, kind: AnnotationKind) -> Self {
        let shape = match kind {
            AnnotationKind::Box => AnnotationShape::Box(BoxShape::new(0.0, 0.0, 0.0, 0.0)),
            AnnotationKind::Line => AnnotationShape::Line(LineShape::new(0.0, 0.0, 0.0, 0.0)),
        };
        Self {
            id,
            index,
            shape,
            options: AnnotationOptions::new(kind),
            display: true,
            resolved: false,
            pending_click: None,
        }
    }

    pub fn id(&self) -> ShapeId { self.id }
    /// Position in the annotation list.
    pub fn index(&self) -> usize { self.index }
    pub fn shape(&self) -> &AnnotationShape { &self.shape }
    pub fn options(&self) -> &AnnotationOptions { &self.options }
    pub fn kind(&self) -> AnnotationKind {
        match self.shape {
            AnnotationShape::Box(_) => AnnotationKind::Box,
            AnnotationShape::Line(_) => AnnotationKind::Line,
        }
    }

    /// Whether the element is drawn and hit-tested this pass.
    pub fn is_displayed(&self) -> bool { self.display && self.resolved }
    /// False when none of the referenced scales exist.
    pub fn is_resolved(&self) -> bool { self.resolved }
    pub fn has_pending_click(&self) -> bool { self.pending_click.is_some() }

    pub fn draw_time(&self, fallback: DrawTime) -> DrawTime {
        self.options.draw_time.unwrap_or(fallback)
    }

    pub fn in_range(&self, x: f64, y: f64) -> bool {
        self.is_displayed() && self.shape.in_range(x, y)
    }

    pub fn center_point(&self) -> Point { self.shape.center_point() }
    pub fn area(&self) -> f64 { self.shape.area() }

    pub fn draw(&mut self, surface: &mut dyn Surface) {
        if self.is_displayed() {
            self.shape.draw(surface);
        }
    }

    pub(crate) fn set_display(&mut self, display: bool) {
        self.display = display;
    }

    /// Re-resolve geometry and style from `options` against the chart's current scales.
    pub(crate) fn update(&mut self, chart: &Chart, index: usize, options: &AnnotationOptions, theme: &Theme) {
        self.index = index;
        self.options = options.clone();
        let geometry = resolve_geometry(chart, options);
        self.resolved = geometry.is_some();
        let g = geometry.unwrap_or_default();
        match &mut self.shape {
            AnnotationShape::Box(b) => {
                b.set_geometry(g);
                b.style = BoxStyle::resolve(options, theme);
            }
            AnnotationShape::Line(l) => {
                l.set_geometry(g);
                l.style = LineStyle::resolve(options, theme);
                l.label = options.label.clone();
                l.mode = options.mode;
                if !l.label.is_visible() {
                    l.label_rect = None;
                }
            }
        }
    }
}

fn scale_value(scale: &dyn Scale, value: Option<&DataValue>, fallback: f64) -> f64 {
    let parsed = value.map_or(f64::NAN, |v| scale.parse(v));
    if parsed.is_finite() { scale.pixel_for_value(parsed) } else { fallback }
}

/// Pixel corners for `options`, or `None` when none of its scales exist on `chart`.
///
/// Scale-bound annotations (`scale_id`) span `value..end_value` on their scale and the
/// whole chart area on the other axis. Dual-axis annotations use `x_min..x_max` and
/// `y_min..y_max`, falling back to the area edges; boxes get the pair in ascending order.
pub fn resolve_geometry(chart: &Chart, options: &AnnotationOptions) -> Option<Geometry> {
    let area = chart.area;
    let mut g = Geometry { x: area.left, y: area.top, x2: area.right, y2: area.bottom };

    if let Some(scale) = options.scale_id.as_deref().and_then(|id| chart.scale(id)) {
        let min = scale_value(scale, options.value.as_ref(), f64::NAN);
        let max = scale_value(scale, options.end_value.as_ref(), min);
        if scale.is_horizontal() {
            g.x = min;
            g.x2 = max;
        } else {
            g.y = min;
            g.y2 = max;
        }
        return Some(g);
    }

    let x_scale = options.x_scale_id.as_deref().and_then(|id| chart.scale(id));
    let y_scale = options.y_scale_id.as_deref().and_then(|id| chart.scale(id));
    if x_scale.is_none() && y_scale.is_none() {
        return None;
    }
    if let Some(xs) = x_scale {
        g.x = scale_value(xs, options.x_min.as_ref(), area.left);
        g.x2 = scale_value(xs, options.x_max.as_ref(), area.right);
    }
    if let Some(ys) = y_scale {
        g.y = scale_value(ys, options.y_min.as_ref(), area.bottom);
        g.y2 = scale_value(ys, options.y_max.as_ref(), area.top);
    }
    Some(g)
}
