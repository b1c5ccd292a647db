// File: crates/annotation-core/src/options.rs
// Summary: Annotation configuration (serde-deserializable) with plugin defaults and builders.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::axis::Axis;
use crate::color::Color;
use crate::error::ConfigError;
use crate::handlers::{EventContext, Handlers, Hook};
use crate::scale::DataValue;

/// Render phase at which an annotation is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrawTime {
    BeforeDatasetsDraw,
    #[default]
    AfterDatasetsDraw,
    AfterDraw,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Box,
    #[default]
    #[serde(other)]
    Line,
}

/// Selects which catheti feed the automatic label rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineMode {
    Horizontal,
    Vertical,
}

pub type DisplayPredicate = Rc<dyn Fn(&EventContext<'_>) -> bool>;

/// Whether an annotation is drawn and hit-tested; dynamic predicates run on every update.
#[derive(Clone)]
pub enum Display {
    Static(bool),
    Dynamic(DisplayPredicate),
}

impl Default for Display {
    fn default() -> Self { Display::Static(true) }
}

impl fmt::Debug for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Display::Static(v) => write!(f, "Static({v})"),
            Display::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl<'de> Deserialize<'de> for Display {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bool::deserialize(deserializer).map(Display::Static)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    Top,
    Bottom,
    Left,
    Right,
    #[default]
    #[serde(other)]
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rotation {
    /// Follow the slope of the line.
    Auto,
    Degrees(f64),
}

impl Default for Rotation {
    fn default() -> Self { Rotation::Degrees(0.0) }
}

impl<'de> Deserialize<'de> for Rotation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Degrees(f64),
            Keyword(String),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Degrees(d) => Ok(Rotation::Degrees(d)),
            Repr::Keyword(k) if k.eq_ignore_ascii_case("auto") => Ok(Rotation::Auto),
            Repr::Keyword(k) => Err(serde::de::Error::custom(format!("invalid rotation `{k}`"))),
        }
    }
}

/// Single line of text or an ordered list of lines.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LabelContent {
    Single(String),
    Lines(Vec<String>),
}

impl LabelContent {
    pub fn lines(&self) -> Vec<&str> {
        match self {
            LabelContent::Single(s) => vec![s.as_str()],
            LabelContent::Lines(v) => v.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            LabelContent::Single(s) => s.is_empty(),
            LabelContent::Lines(v) => v.is_empty(),
        }
    }

    pub fn is_multiline(&self) -> bool { matches!(self, LabelContent::Lines(_)) }
}

impl From<&str> for LabelContent {
    fn from(s: &str) -> Self { LabelContent::Single(s.to_string()) }
}

impl From<Vec<&str>> for LabelContent {
    fn from(v: Vec<&str>) -> Self { LabelContent::Lines(v.into_iter().map(str::to_string).collect()) }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
    pub style: String,
    pub color: Color,
}

impl FontSpec {
    /// CSS shorthand, e.g. `bold 12px Helvetica`. Also the text-width cache key.
    pub fn css(&self) -> String {
        format!("{} {}px {}", self.style, self.size, self.family)
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "'Helvetica Neue', 'Helvetica', 'Arial', sans-serif".to_string(),
            size: 12.0,
            style: "bold".to_string(),
            color: Color::WHITE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelOptions {
    pub background_color: Color,
    pub font: FontSpec,
    pub x_padding: f64,
    pub y_padding: f64,
    pub rotation: Rotation,
    pub corner_radius: f64,
    pub position: LabelPosition,
    pub x_adjust: f64,
    pub y_adjust: f64,
    pub enabled: bool,
    pub content: Option<LabelContent>,
}

impl LabelOptions {
    /// Enabled label showing `content`.
    pub fn text(content: impl Into<LabelContent>) -> Self {
        Self { enabled: true, content: Some(content.into()), ..Default::default() }
    }

    pub fn is_visible(&self) -> bool {
        self.enabled && self.content.as_ref().is_some_and(|c| !c.is_empty())
    }
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            background_color: Color::from_argb(204, 0, 0, 0),
            font: FontSpec::default(),
            x_padding: 6.0,
            y_padding: 6.0,
            rotation: Rotation::default(),
            corner_radius: 6.0,
            position: LabelPosition::Center,
            x_adjust: 0.0,
            y_adjust: 0.0,
            enabled: false,
            content: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnotationOptions {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    pub display: Display,
    /// Overrides [`PluginOptions::draw_time`].
    pub draw_time: Option<DrawTime>,
    #[serde(rename = "scaleID", alias = "scaleId")]
    pub scale_id: Option<String>,
    #[serde(rename = "xScaleID", alias = "xScaleId")]
    pub x_scale_id: Option<String>,
    #[serde(rename = "yScaleID", alias = "yScaleId")]
    pub y_scale_id: Option<String>,
    pub value: Option<DataValue>,
    pub end_value: Option<DataValue>,
    pub x_min: Option<DataValue>,
    pub x_max: Option<DataValue>,
    pub y_min: Option<DataValue>,
    pub y_max: Option<DataValue>,
    pub border_color: Option<Color>,
    pub border_width: f64,
    pub border_dash: Vec<f64>,
    pub border_dash_offset: f64,
    pub background_color: Option<Color>,
    pub mode: Option<LineMode>,
    pub label: LabelOptions,
    #[serde(skip)]
    pub handlers: Handlers,
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        Self {
            id: None,
            kind: AnnotationKind::default(),
            display: Display::default(),
            draw_time: None,
            scale_id: None,
            x_scale_id: None,
            y_scale_id: None,
            value: None,
            end_value: None,
            x_min: None,
            x_max: None,
            y_min: None,
            y_max: None,
            border_color: None,
            border_width: 1.0,
            border_dash: Vec::new(),
            border_dash_offset: 0.0,
            background_color: None,
            mode: None,
            label: LabelOptions::default(),
            handlers: Handlers::default(),
        }
    }
}

impl AnnotationOptions {
    pub fn new(kind: AnnotationKind) -> Self {
        Self { kind, ..Default::default() }
    }

    /// Box spanning `[x_min, x_max] x [y_min, y_max]` in data space.
    pub fn boxed(x_scale: &str, x: (f64, f64), y_scale: &str, y: (f64, f64)) -> Self {
        Self::new(AnnotationKind::Box).x_range(x_scale, x.0, x.1).y_range(y_scale, y.0, y.1)
    }

    /// Line across the chart area at `value` on `scale`.
    pub fn line_at(scale: &str, value: f64) -> Self {
        Self::new(AnnotationKind::Line).on_scale(scale, value, None)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn on_scale(mut self, scale: &str, value: f64, end_value: Option<f64>) -> Self {
        self.scale_id = Some(scale.to_string());
        self.value = Some(value.into());
        self.end_value = end_value.map(DataValue::from);
        self
    }

    pub fn x_range(mut self, scale: &str, min: f64, max: f64) -> Self {
        self.x_scale_id = Some(scale.to_string());
        self.x_min = Some(min.into());
        self.x_max = Some(max.into());
        self
    }

    pub fn y_range(mut self, scale: &str, min: f64, max: f64) -> Self {
        self.y_scale_id = Some(scale.to_string());
        self.y_min = Some(min.into());
        self.y_max = Some(max.into());
        self
    }

    pub fn with_border_width(mut self, width: f64) -> Self {
        self.border_width = width;
        self
    }

    pub fn with_draw_time(mut self, draw_time: DrawTime) -> Self {
        self.draw_time = Some(draw_time);
        self
    }

    pub fn with_label(mut self, label: LabelOptions) -> Self {
        self.label = label;
        self
    }

    pub fn display_when(mut self, f: impl Fn(&EventContext<'_>) -> bool + 'static) -> Self {
        self.display = Display::Dynamic(Rc::new(f));
        self
    }

    pub fn on(mut self, hook: Hook, f: impl Fn(&EventContext<'_>) + 'static) -> Self {
        self.handlers = self.handlers.on(hook, f);
        self
    }

    /// Id of the dual-axis scale this annotation uses on `axis`.
    pub fn axis_scale_id(&self, axis: Axis) -> Option<&str> {
        match axis {
            Axis::X => self.x_scale_id.as_deref(),
            Axis::Y => self.y_scale_id.as_deref(),
        }
    }

    /// `{axis}Min` / `{axis}Max` values.
    pub fn axis_bounds(&self, axis: Axis) -> [Option<&DataValue>; 2] {
        match axis {
            Axis::X => [self.x_min.as_ref(), self.x_max.as_ref()],
            Axis::Y => [self.y_min.as_ref(), self.y_max.as_ref()],
        }
    }
}

/// Ordered annotation list. Accepts a JSON array, or an object whose keys become ids.
#[derive(Clone, Debug, Default)]
pub struct AnnotationList(pub Vec<AnnotationOptions>);

impl AnnotationList {
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn iter(&self) -> std::slice::Iter<'_, AnnotationOptions> { self.0.iter() }
}

impl From<Vec<AnnotationOptions>> for AnnotationList {
    fn from(v: Vec<AnnotationOptions>) -> Self { Self(v) }
}

impl<'de> Deserialize<'de> for AnnotationList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ListVisitor;

        impl<'de> Visitor<'de> for ListVisitor {
            type Value = AnnotationList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array of annotations or a map of id to annotation")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(a) = seq.next_element::<AnnotationOptions>()? {
                    out.push(a);
                }
                Ok(AnnotationList(out))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, mut a)) = map.next_entry::<String, AnnotationOptions>()? {
                    a.id = Some(key);
                    out.push(a);
                }
                Ok(AnnotationList(out))
            }
        }

        deserializer.deserialize_any(ListVisitor)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginOptions {
    pub draw_time: DrawTime,
    /// Double-click window in milliseconds.
    pub dbl_click_speed: u64,
    pub annotations: AnnotationList,
    /// Chart-wide fallbacks for annotations without their own handler.
    #[serde(skip)]
    pub handlers: Handlers,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            draw_time: DrawTime::default(),
            dbl_click_speed: 350,
            annotations: AnnotationList::default(),
            handlers: Handlers::default(),
        }
    }
}

impl PluginOptions {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_annotations(mut self, annotations: Vec<AnnotationOptions>) -> Self {
        self.annotations = AnnotationList(annotations);
        self
    }

    pub fn on(mut self, hook: Hook, f: impl Fn(&EventContext<'_>) + 'static) -> Self {
        self.handlers = self.handlers.on(hook, f);
        self
    }

    pub fn dbl_click_window(&self) -> Duration {
        Duration::from_millis(self.dbl_click_speed)
    }
}
