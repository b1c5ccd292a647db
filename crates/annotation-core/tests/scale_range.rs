// File: crates/annotation-core/tests/scale_range.rs
// Purpose: Scale bounds widen to fit annotations unless pinned, and the hook is installed once per scale.

use annotation_core::{
    adjust_scale_range, scale_limits, AnnotationOptions, AnnotationState, Axis, Chart, ChartArea, DataLimitsListener,
    LinearScale, PluginOptions, Scale, ScaleKind, ScaleOptions,
};
use float_cmp::assert_approx_eq;

fn chart_with(y: LinearScale) -> Chart {
    let mut chart = Chart::new(ChartArea::new(0.0, 0.0, 128.0, 128.0));
    chart.add_scale(LinearScale::new("x", Axis::X).with_data_range(0.0, 128.0));
    chart.add_scale(y);
    chart
}

fn update(chart: &mut Chart, annotations: Vec<AnnotationOptions>) -> AnnotationState {
    let mut state = AnnotationState::new();
    state.update(chart, &PluginOptions::default().with_annotations(annotations));
    state
}

#[test]
fn empty_scale_takes_annotation_range() {
    let mut chart = chart_with(LinearScale::new("y", Axis::Y));
    update(&mut chart, vec![AnnotationOptions::new(Default::default()).on_scale("y", 5.0, Some(15.0))]);
    let y = chart.scale("y").expect("y scale");
    assert_eq!(y.min(), Some(5.0));
    assert_eq!(y.max(), Some(15.0));
}

#[test]
fn data_range_is_widened_not_narrowed() {
    let mut chart = chart_with(LinearScale::new("y", Axis::Y).with_data_range(0.0, 10.0));
    update(&mut chart, vec![AnnotationOptions::line_at("y", 5.0).on_scale("y", 5.0, Some(15.0))]);
    let y = chart.scale("y").expect("y scale");
    assert!(y.min().is_some_and(|m| m <= 5.0));
    assert!(y.max().is_some_and(|m| m >= 15.0));
    assert_eq!(y.min(), Some(0.0));
}

#[test]
fn explicit_min_is_never_overwritten() {
    let options = ScaleOptions { min: Some(0.0), ..Default::default() };
    let mut chart = chart_with(LinearScale::new("y", Axis::Y).with_options(options).with_data_range(1.0, 10.0));
    update(&mut chart, vec![AnnotationOptions::line_at("y", -20.0), AnnotationOptions::line_at("y", 40.0)]);
    let y = chart.scale("y").expect("y scale");
    assert_eq!(y.min(), Some(0.0));
    assert_eq!(y.max(), Some(40.0));
}

#[test]
fn suggested_bound_blocks_adjustment() {
    let options = ScaleOptions { suggested_max: Some(12.0), ..Default::default() };
    let mut chart = chart_with(LinearScale::new("y", Axis::Y).with_options(options).with_data_range(3.0, 10.0));
    update(&mut chart, vec![AnnotationOptions::line_at("y", 1.0), AnnotationOptions::line_at("y", 50.0)]);
    let y = chart.scale("y").expect("y scale");
    assert_eq!(y.min(), Some(1.0));
    assert_eq!(y.max(), Some(12.0));
}

#[test]
fn dual_axis_bounds_use_axis_specific_scale() {
    let mut chart = chart_with(LinearScale::new("y", Axis::Y).with_data_range(0.0, 10.0));
    update(&mut chart, vec![AnnotationOptions::boxed("x", (10.0, 20.0), "y", (-5.0, 30.0))]);
    let y = chart.scale("y").expect("y scale");
    assert_eq!((y.min(), y.max()), (Some(-5.0), Some(30.0)));
    // x data already covers 10..20
    let x = chart.scale("x").expect("x scale");
    assert_eq!((x.min(), x.max()), (Some(0.0), Some(128.0)));
}

#[test]
fn geometry_uses_adjusted_bounds() {
    let mut chart = chart_with(LinearScale::new("y", Axis::Y));
    let state = update(&mut chart, vec![AnnotationOptions::line_at("y", 5.0).on_scale("y", 5.0, Some(15.0))]);
    let line = state.elements()[0].shape().as_line().expect("line");
    // min maps to the bottom edge, max to the top
    assert_approx_eq!(f64, line.y, 128.0);
    assert_approx_eq!(f64, line.y2, 0.0);
    assert_approx_eq!(f64, line.x, 0.0);
    assert_approx_eq!(f64, line.x2, 128.0);
}

#[test]
fn adjustment_does_not_accumulate_across_updates() {
    let mut chart = chart_with(LinearScale::new("y", Axis::Y).with_data_range(0.0, 10.0));
    let mut state = AnnotationState::new();
    let wide = PluginOptions::default().with_annotations(vec![AnnotationOptions::line_at("y", 50.0)]);
    state.update(&mut chart, &wide);
    assert_eq!(chart.scale("y").and_then(|s| s.max()), Some(50.0));

    state.update(&mut chart, &PluginOptions::default());
    assert_eq!(chart.scale("y").and_then(|s| s.max()), Some(10.0));
}

#[test]
fn each_scale_is_subscribed_once() {
    let mut chart = chart_with(LinearScale::new("y", Axis::Y));
    let mut state = AnnotationState::new();
    let options = PluginOptions::default().with_annotations(vec![AnnotationOptions::line_at("y", 5.0)]);
    state.update(&mut chart, &options);
    state.update(&mut chart, &options);
    assert_eq!(state.registered_scales(), 2);

    let uid = chart.scale("y").expect("y scale").uid();
    assert!(chart.is_subscribed(uid, state.listener_id()));
    assert!(!chart.subscribe(uid, state.listener_id()), "already subscribed");
}

#[test]
fn replaced_scale_gets_a_fresh_subscription() {
    let mut chart = chart_with(LinearScale::new("y", Axis::Y));
    let mut state = AnnotationState::new();
    let options = PluginOptions::default().with_annotations(vec![AnnotationOptions::line_at("y", 5.0)]);
    state.update(&mut chart, &options);
    let old = chart.scale("y").expect("y scale").uid();

    chart.add_scale(LinearScale::new("y", Axis::Y).with_data_range(0.0, 1.0));
    assert!(!chart.is_subscribed(old, state.listener_id()));
    state.update(&mut chart, &options);
    let y = chart.scale("y").expect("y scale");
    assert!(chart.is_subscribed(y.uid(), state.listener_id()));
    assert_eq!(y.max(), Some(5.0));
    // the replaced uid is forgotten rather than kept alongside the new one
    assert_eq!(state.registered_scales(), 2);
}

#[test]
fn unsubscribed_listener_is_not_notified() {
    let mut chart = chart_with(LinearScale::new("y", Axis::Y).with_data_range(0.0, 10.0));
    let mut state = AnnotationState::new();
    // before_update never ran, so no scale is subscribed
    chart.update(&mut [&mut state as &mut dyn DataLimitsListener]);
    assert_eq!(chart.scale("y").and_then(|s| s.max()), Some(10.0));
}

#[test]
fn pinned_scale_reports_no_change() {
    let options = ScaleOptions { min: Some(0.0), max: Some(10.0), ..Default::default() };
    let mut s = LinearScale::new("y", Axis::Y).with_options(options);
    s.determine_data_limits();
    let anns = vec![AnnotationOptions::line_at("y", 100.0)];
    assert_eq!(scale_limits(&s, &anns), (0.0, 100.0));
    assert!(!adjust_scale_range(&mut s, &anns));
    assert_eq!(s.max(), Some(10.0));
}

#[test]
fn adjusted_bounds_refresh_ticks() {
    let mut s = LinearScale::new("y", Axis::Y).with_data_range(0.0, 10.0);
    s.determine_data_limits();
    assert!(adjust_scale_range(&mut s, &[AnnotationOptions::line_at("y", 50.0)]));
    assert_eq!(s.ticks().last().copied(), Some(50.0));
}

#[test]
fn time_scale_parses_annotation_dates() {
    let mut s = LinearScale::new("t", Axis::X).with_kind(ScaleKind::Time);
    let mut ann = AnnotationOptions::line_at("t", 0.0);
    ann.value = Some("2024-01-01".into());
    ann.end_value = Some("2024-01-02T00:00:00Z".into());
    assert!(adjust_scale_range(&mut s, &[ann]));
    assert_eq!(s.min(), Some(1_704_067_200_000.0));
    assert_eq!(s.max(), Some(1_704_153_600_000.0));
}
