// File: crates/annotation-core/src/lib.rs
// Summary: Core library entry point; exports the annotation model, hit-testing and interaction API.

pub mod adjust;
pub mod axis;
pub mod chart;
pub mod color;
pub mod element;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod handlers;
pub mod interaction;
pub mod options;
pub mod plugin;
pub mod scale;
pub mod shape;
pub mod surface;
pub mod text;
pub mod theme;
pub mod types;

pub use adjust::{adjust_scale_range, scale_limits};
pub use axis::{Axis, ScaleKind};
pub use chart::{Chart, DataLimitsListener, ListenerId};
pub use color::Color;
pub use element::{Element, ShapeId};
pub use error::{ColorError, ConfigError};
pub use geometry::{Point, Rect};
pub use handlers::{EventContext, Handler, Handlers, Hook};
pub use interaction::{nearest_element, PointerEvent, PointerEventKind};
pub use options::{
    AnnotationKind, AnnotationOptions, Display, DrawTime, FontSpec, LabelContent, LabelOptions,
    LabelPosition, LineMode, PluginOptions, Rotation,
};
pub use plugin::AnnotationState;
pub use scale::{DataValue, LinearScale, Scale, ScaleConfig, ScaleOptions, ScaleUid};
pub use shape::{AnnotationShape, BoxShape, LineShape, Shape};
pub use surface::{DrawOp, Recorder, Stroke, Surface, TextBaseline};
pub use theme::Theme;
pub use types::ChartArea;
