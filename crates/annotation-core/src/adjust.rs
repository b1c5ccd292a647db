// File: crates/annotation-core/src/adjust.rs
// Summary: Widens scale bounds so annotation values stay visible.

use log::debug;

use crate::options::AnnotationOptions;
use crate::scale::{DataValue, Scale};

fn references(annotation: &AnnotationOptions, scale: &dyn Scale) -> bool {
    let id = scale.id();
    annotation.scale_id.as_deref() == Some(id) || annotation.axis_scale_id(scale.axis()) == Some(id)
}

/// Min/max over the scale's current bounds and every annotation value bound to it.
///
/// Unset bounds start as an empty range, so the result stays non-finite when neither the
/// scale nor any annotation contributes a value.
pub fn scale_limits(scale: &dyn Scale, annotations: &[AnnotationOptions]) -> (f64, f64) {
    let mut min = scale.min().unwrap_or(f64::INFINITY);
    let mut max = scale.max().unwrap_or(f64::NEG_INFINITY);
    for a in annotations.iter().filter(|a| references(a, scale)) {
        let [lo, hi] = a.axis_bounds(scale.axis());
        let values: [Option<&DataValue>; 4] = [a.value.as_ref(), a.end_value.as_ref(), lo, hi];
        for v in values.into_iter().flatten() {
            let v = scale.parse(v);
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
    }
    (min, max)
}

/// Apply [`scale_limits`] to `scale` unless the user pinned (or suggested) the bound.
/// Re-runs the scale's tick range step when anything changed; returns whether it did.
pub fn adjust_scale_range(scale: &mut dyn Scale, annotations: &[AnnotationOptions]) -> bool {
    let (min, max) = scale_limits(scale, annotations);
    let opts = scale.options();
    let free_min = opts.min.is_none() && opts.suggested_min.is_none();
    let free_max = opts.max.is_none() && opts.suggested_max.is_none();

    let mut changed = false;
    if min.is_finite() && free_min && scale.min() != Some(min) {
        scale.set_min(min);
        changed = true;
    }
    if max.is_finite() && free_max && scale.max() != Some(max) {
        scale.set_max(max);
        changed = true;
    }
    if changed {
        debug!(scale = scale.id(), min, max; "scale range adjusted for annotations");
        scale.handle_tick_range_options();
    }
    changed
}
