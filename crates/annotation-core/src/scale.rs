// File: crates/annotation-core/src/scale.rs
// Summary: Host scale contract (value parsing, pixel mapping, mutable bounds) and a linear/log/time implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::axis::{Axis, ScaleKind};
use crate::grid::linspace;

/// Raw data-space value as written in an annotation (number or string).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Number(f64),
    Text(String),
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self { DataValue::Number(v) }
}

impl From<&str> for DataValue {
    fn from(v: &str) -> Self { DataValue::Text(v.to_string()) }
}

/// Identity of a scale instance. Two scales with the same `id` string but built separately
/// have different uids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScaleUid(u64);

impl ScaleUid {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// User-configured bounds. Explicit `min`/`max` win over data; suggested bounds only widen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleOptions {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub suggested_min: Option<f64>,
    pub suggested_max: Option<f64>,
}

/// What the annotation layer needs from a host scale.
pub trait Scale {
    fn uid(&self) -> ScaleUid;
    fn id(&self) -> &str;
    fn axis(&self) -> Axis;
    fn is_horizontal(&self) -> bool { self.axis() == Axis::X }

    /// Data-space number for `value`; NaN when it cannot be parsed.
    fn parse(&self, value: &DataValue) -> f64;
    fn pixel_for_value(&self, value: f64) -> f64;

    fn min(&self) -> Option<f64>;
    fn max(&self) -> Option<f64>;
    fn set_min(&mut self, min: f64);
    fn set_max(&mut self, max: f64);
    fn options(&self) -> &ScaleOptions;

    /// Compute bounds from data and options.
    fn determine_data_limits(&mut self);
    /// Re-derive anything that depends on bounds after they were changed externally.
    fn handle_tick_range_options(&mut self) {}
    /// Pixel positions of the scale's min and max values.
    fn set_pixel_range(&mut self, start: f64, end: f64);
}

/// Serializable description of a [`LinearScale`].
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleConfig {
    pub id: String,
    pub axis: Axis,
    #[serde(default)]
    pub kind: ScaleKind,
    /// Data extent `[min, max]` the scale would show without annotations.
    #[serde(default)]
    pub data: Option<(f64, f64)>,
    #[serde(flatten)]
    pub options: ScaleOptions,
}

#[derive(Clone, Debug)]
pub struct LinearScale {
    uid: ScaleUid,
    id: String,
    axis: Axis,
    pub kind: ScaleKind,
    pub options: ScaleOptions,
    data_range: Option<(f64, f64)>,
    min: Option<f64>,
    max: Option<f64>,
    start_px: f64,
    end_px: f64,
    pub tick_count: usize,
    ticks: Vec<f64>,
}

impl LinearScale {
    pub fn new(id: impl Into<String>, axis: Axis) -> Self {
        Self {
            uid: ScaleUid::next(),
            id: id.into(),
            axis,
            kind: ScaleKind::Linear,
            options: ScaleOptions::default(),
            data_range: None,
            min: None,
            max: None,
            start_px: 0.0,
            end_px: 1.0,
            tick_count: 6,
            ticks: Vec::new(),
        }
    }

    pub fn from_config(config: &ScaleConfig) -> Self {
        let mut s = Self::new(config.id.clone(), config.axis).with_kind(config.kind).with_options(config.options);
        s.data_range = config.data;
        s
    }

    pub fn with_kind(mut self, kind: ScaleKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_options(mut self, options: ScaleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_data_range(mut self, min: f64, max: f64) -> Self {
        self.set_data_range(min, max);
        self
    }

    pub fn set_data_range(&mut self, min: f64, max: f64) {
        self.data_range = Some((min.min(max), min.max(max)));
    }

    pub fn ticks(&self) -> &[f64] { &self.ticks }

    fn parse_text(&self, s: &str) -> f64 {
        let s = s.trim();
        if let Ok(n) = s.parse::<f64>() {
            return n;
        }
        if self.kind == ScaleKind::Time {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return dt.timestamp_millis() as f64;
            }
            if let Some(dt) = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)) {
                return dt.and_utc().timestamp_millis() as f64;
            }
        }
        f64::NAN
    }
}

impl Scale for LinearScale {
    fn uid(&self) -> ScaleUid { self.uid }
    fn id(&self) -> &str { &self.id }
    fn axis(&self) -> Axis { self.axis }

    fn parse(&self, value: &DataValue) -> f64 {
        match value {
            DataValue::Number(n) => *n,
            DataValue::Text(s) => self.parse_text(s),
        }
    }

    fn pixel_for_value(&self, value: f64) -> f64 {
        let (Some(min), Some(max)) = (self.min, self.max) else { return f64::NAN };
        let t = match self.kind {
            ScaleKind::Log10 => {
                if value <= 0.0 {
                    return f64::NAN;
                }
                let (lmin, lmax) = (min.max(1e-12).log10(), max.max(1e-12).log10());
                (value.log10() - lmin) / (lmax - lmin).max(1e-12)
            }
            ScaleKind::Linear | ScaleKind::Time => (value - min) / (max - min).max(1e-12),
        };
        self.start_px + t * (self.end_px - self.start_px)
    }

    fn min(&self) -> Option<f64> { self.min }
    fn max(&self) -> Option<f64> { self.max }
    fn set_min(&mut self, min: f64) { self.min = Some(min); }
    fn set_max(&mut self, max: f64) { self.max = Some(max); }
    fn options(&self) -> &ScaleOptions { &self.options }

    fn determine_data_limits(&mut self) {
        let (data_min, data_max) = match self.data_range {
            Some((lo, hi)) => (Some(lo), Some(hi)),
            None => (None, None),
        };
        let widen = |a: Option<f64>, b: Option<f64>, pick: fn(f64, f64) -> f64| match (a, b) {
            (Some(a), Some(b)) => Some(pick(a, b)),
            (a, b) => a.or(b),
        };
        self.min = self.options.min.or_else(|| widen(data_min, self.options.suggested_min, f64::min));
        self.max = self.options.max.or_else(|| widen(data_max, self.options.suggested_max, f64::max));
        self.handle_tick_range_options();
    }

    fn handle_tick_range_options(&mut self) {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min == max {
                if self.options.min.is_none() { self.min = Some(min - 1.0); }
                if self.options.max.is_none() { self.max = Some(max + 1.0); }
            }
            if self.kind == ScaleKind::Log10 && self.min.is_some_and(|m| m <= 0.0) {
                let hi = self.max.unwrap_or(1.0).max(1e-12);
                self.min = Some((hi / 10.0).min(1.0));
            }
        }
        self.ticks = match (self.min, self.max) {
            (Some(min), Some(max)) => linspace(min, max, self.tick_count),
            _ => Vec::new(),
        };
    }

    fn set_pixel_range(&mut self, start: f64, end: f64) {
        self.start_px = start;
        self.end_px = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn explicit_bounds_beat_data() {
        let mut s = LinearScale::new("y", Axis::Y)
            .with_data_range(3.0, 9.0)
            .with_options(ScaleOptions { min: Some(0.0), suggested_max: Some(20.0), ..Default::default() });
        s.determine_data_limits();
        assert_eq!(s.min(), Some(0.0));
        assert_eq!(s.max(), Some(20.0));
        assert_eq!(s.ticks().len(), 6);
    }

    #[test]
    fn pixel_mapping_follows_range() {
        let mut s = LinearScale::new("x", Axis::X).with_data_range(0.0, 10.0);
        s.determine_data_limits();
        s.set_pixel_range(100.0, 200.0);
        assert_approx_eq!(f64, s.pixel_for_value(5.0), 150.0);
    }

    #[test]
    fn time_scale_parses_dates() {
        let s = LinearScale::new("t", Axis::X).with_kind(ScaleKind::Time);
        assert_eq!(s.parse(&"1970-01-02".into()), 86_400_000.0);
        assert_eq!(s.parse(&"1970-01-01T00:00:01Z".into()), 1_000.0);
        assert!(s.parse(&"soon".into()).is_nan());
    }

    #[test]
    fn no_data_leaves_bounds_unset() {
        let mut s = LinearScale::new("x", Axis::X);
        s.determine_data_limits();
        assert_eq!(s.min(), None);
        assert!(s.pixel_for_value(1.0).is_nan());
    }
}
