// File: crates/annotation-core/tests/interaction.rs
// Purpose: Nearest-element resolution, hover enter/leave ordering and click vs double-click timing.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use annotation_core::{
    AnnotationOptions, AnnotationState, Axis, Chart, ChartArea, EventContext, Hook, LinearScale, PluginOptions,
    PointerEvent,
};

type Log = Rc<RefCell<Vec<String>>>;

// 128px plot over data 0..128 keeps pixel mapping exact: x = v, y = 128 - v.
fn chart() -> Chart {
    let mut chart = Chart::new(ChartArea::new(0.0, 0.0, 128.0, 128.0));
    chart.add_scale(LinearScale::new("x", Axis::X).with_data_range(0.0, 128.0));
    chart.add_scale(LinearScale::new("y", Axis::Y).with_data_range(0.0, 128.0));
    chart
}

fn recorder(log: &Log, tag: &'static str) -> impl Fn(&EventContext<'_>) + 'static {
    let log = log.clone();
    move |ctx: &EventContext<'_>| {
        let id = ctx.element.options().id.clone().unwrap_or_default();
        log.borrow_mut().push(format!("{tag}:{id}"));
    }
}

fn boxed(id: &str, x: (f64, f64), y: (f64, f64)) -> AnnotationOptions {
    AnnotationOptions::boxed("x", x, "y", y).with_id(id)
}

fn setup(options: &PluginOptions) -> (Chart, AnnotationState) {
    let mut chart = chart();
    let mut state = AnnotationState::new();
    state.update(&mut chart, options);
    (chart, state)
}

fn taken(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}

#[test]
fn equal_distance_prefers_smaller_area() {
    let log = Log::default();
    // both centered on pixel (53, 75); the large one comes first
    let options = PluginOptions::default()
        .with_annotations(vec![boxed("large", (43.0, 63.0), (43.0, 63.0)), boxed("small", (48.0, 58.0), (48.0, 58.0))])
        .on(Hook::Click, recorder(&log, "click"));
    let (chart, mut state) = setup(&options);

    state.handle_event(&chart, &PointerEvent::click(53.0, 75.0), Instant::now());
    assert_eq!(taken(&log), ["click:small"]);
}

#[test]
fn equal_distance_and_area_prefers_lower_index() {
    let log = Log::default();
    let options = PluginOptions::default()
        .with_annotations(vec![boxed("first", (10.0, 20.0), (10.0, 20.0)), boxed("second", (10.0, 20.0), (10.0, 20.0))])
        .on(Hook::Click, recorder(&log, "click"));
    let (chart, mut state) = setup(&options);

    state.handle_event(&chart, &PointerEvent::click(15.0, 113.0), Instant::now());
    assert_eq!(taken(&log), ["click:first"]);
}

#[test]
fn nearest_center_wins_over_size() {
    let log = Log::default();
    let options = PluginOptions::default()
        .with_annotations(vec![boxed("wide", (0.0, 100.0), (0.0, 100.0)), boxed("near", (60.0, 70.0), (60.0, 70.0))])
        .on(Hook::Click, recorder(&log, "click"));
    let (chart, mut state) = setup(&options);

    state.handle_event(&chart, &PointerEvent::click(50.0, 78.0), Instant::now());
    assert_eq!(taken(&log), ["click:wide"]);
    state.handle_event(&chart, &PointerEvent::click(65.0, 63.0), Instant::now());
    assert_eq!(taken(&log), ["click:near"]);
}

#[test]
fn hover_fires_leave_before_enter() {
    let log = Log::default();
    let options = PluginOptions::default()
        .with_annotations(vec![boxed("a", (10.0, 20.0), (10.0, 20.0)), boxed("b", (60.0, 70.0), (10.0, 20.0))])
        .on(Hook::Enter, recorder(&log, "enter"))
        .on(Hook::Leave, recorder(&log, "leave"));
    let (chart, mut state) = setup(&options);
    let now = Instant::now();

    state.handle_event(&chart, &PointerEvent::moved(15.0, 113.0), now);
    assert_eq!(taken(&log), ["enter:a"]);
    assert_eq!(state.hovered(), Some(state.elements()[0].id()));

    state.handle_event(&chart, &PointerEvent::moved(16.0, 112.0), now);
    assert!(taken(&log).is_empty(), "same element, no events");

    state.handle_event(&chart, &PointerEvent::moved(65.0, 113.0), now);
    assert_eq!(taken(&log), ["leave:a", "enter:b"]);

    state.handle_event(&chart, &PointerEvent::moved(100.0, 50.0), now);
    assert_eq!(taken(&log), ["leave:b"]);
    assert_eq!(state.hovered(), None);
}

#[test]
fn pointer_out_defers_leave_to_next_move() {
    let log = Log::default();
    let options = PluginOptions::default()
        .with_annotations(vec![boxed("a", (10.0, 20.0), (10.0, 20.0))])
        .on(Hook::Leave, recorder(&log, "leave"));
    let (chart, mut state) = setup(&options);
    let now = Instant::now();

    state.handle_event(&chart, &PointerEvent::moved(15.0, 113.0), now);
    state.handle_event(&chart, &PointerEvent::out(), now);
    assert!(taken(&log).is_empty());
    assert!(state.hovered().is_some());

    state.handle_event(&chart, &PointerEvent::moved(100.0, 50.0), now);
    assert_eq!(taken(&log), ["leave:a"]);
}

#[test]
fn replaced_hovered_element_still_gets_leave() {
    let log = Log::default();
    let with = |annotations| {
        PluginOptions::default()
            .with_annotations(annotations)
            .on(Hook::Enter, recorder(&log, "enter"))
            .on(Hook::Leave, recorder(&log, "leave"))
    };
    let (mut chart, mut state) = setup(&with(vec![boxed("box", (10.0, 20.0), (10.0, 20.0))]));
    let now = Instant::now();

    state.handle_event(&chart, &PointerEvent::moved(15.0, 113.0), now);
    assert_eq!(taken(&log), ["enter:box"]);

    // index 0 becomes a line at pixel y = 28
    state.update(&mut chart, &with(vec![AnnotationOptions::line_at("y", 100.0).with_id("line")]));
    state.handle_event(&chart, &PointerEvent::moved(100.0, 50.0), now);
    assert_eq!(taken(&log), ["leave:box"]);
    assert_eq!(state.hovered(), None);
}

#[test]
fn removed_hovered_element_leaves_before_next_enter() {
    let log = Log::default();
    let with = |annotations| {
        PluginOptions::default()
            .with_annotations(annotations)
            .on(Hook::Enter, recorder(&log, "enter"))
            .on(Hook::Leave, recorder(&log, "leave"))
    };
    let a = || boxed("a", (10.0, 20.0), (10.0, 20.0));
    let (mut chart, mut state) = setup(&with(vec![a(), boxed("b", (60.0, 70.0), (10.0, 20.0))]));
    let now = Instant::now();

    state.handle_event(&chart, &PointerEvent::moved(65.0, 113.0), now);
    assert_eq!(taken(&log), ["enter:b"]);

    state.update(&mut chart, &with(vec![a()]));
    state.handle_event(&chart, &PointerEvent::moved(15.0, 113.0), now);
    assert_eq!(taken(&log), ["leave:b", "enter:a"]);
    assert_eq!(state.hovered(), Some(state.elements()[0].id()));
}

#[test]
fn annotation_handler_overrides_chart_fallback() {
    let log = Log::default();
    let own = boxed("own", (10.0, 20.0), (10.0, 20.0)).on(Hook::Click, recorder(&log, "own-click"));
    let options = PluginOptions::default()
        .with_annotations(vec![own, boxed("plain", (60.0, 70.0), (10.0, 20.0))])
        .on(Hook::Click, recorder(&log, "chart-click"));
    let (chart, mut state) = setup(&options);
    let now = Instant::now();

    state.handle_event(&chart, &PointerEvent::click(15.0, 113.0), now);
    state.handle_event(&chart, &PointerEvent::click(65.0, 113.0), now);
    assert_eq!(taken(&log), ["own-click:own", "chart-click:plain"]);
}

#[test]
fn click_without_dblclick_handler_fires_immediately() {
    let log = Log::default();
    let options = PluginOptions::default()
        .with_annotations(vec![boxed("a", (10.0, 20.0), (10.0, 20.0))])
        .on(Hook::Click, recorder(&log, "click"));
    let (chart, mut state) = setup(&options);

    state.handle_event(&chart, &PointerEvent::click(15.0, 113.0), Instant::now());
    assert_eq!(taken(&log), ["click:a"]);
    assert_eq!(state.next_deadline(), None);
}

#[test]
fn lone_click_fires_after_window() {
    let log = Log::default();
    let options = PluginOptions::default()
        .with_annotations(vec![boxed("a", (10.0, 20.0), (10.0, 20.0))])
        .on(Hook::Click, recorder(&log, "click"))
        .on(Hook::DblClick, recorder(&log, "dblclick"));
    let (chart, mut state) = setup(&options);
    let t0 = Instant::now();

    state.handle_event(&chart, &PointerEvent::click(15.0, 113.0), t0);
    assert!(taken(&log).is_empty());
    assert_eq!(state.next_deadline(), Some(t0 + Duration::from_millis(350)));

    assert_eq!(state.poll_timers(&chart, t0 + Duration::from_millis(349)), 0);
    assert!(taken(&log).is_empty());
    assert_eq!(state.poll_timers(&chart, t0 + Duration::from_millis(350)), 1);
    assert_eq!(taken(&log), ["click:a"]);
    assert_eq!(state.next_deadline(), None);
}

#[test]
fn second_click_within_window_is_double_click() {
    let log = Log::default();
    let options = PluginOptions::default()
        .with_annotations(vec![boxed("a", (10.0, 20.0), (10.0, 20.0))])
        .on(Hook::Click, recorder(&log, "click"))
        .on(Hook::DblClick, recorder(&log, "dblclick"));
    let (chart, mut state) = setup(&options);
    let t0 = Instant::now();

    state.handle_event(&chart, &PointerEvent::click(15.0, 113.0), t0);
    state.handle_event(&chart, &PointerEvent::click(16.0, 114.0), t0 + Duration::from_millis(100));
    assert_eq!(taken(&log), ["dblclick:a"]);
    assert_eq!(state.next_deadline(), None);

    assert_eq!(state.poll_timers(&chart, t0 + Duration::from_secs(2)), 0);
    assert!(taken(&log).is_empty());
}

#[test]
fn late_second_click_flushes_first_and_starts_over() {
    let log = Log::default();
    let options = PluginOptions::default()
        .with_annotations(vec![boxed("a", (10.0, 20.0), (10.0, 20.0))])
        .on(Hook::Click, recorder(&log, "click"))
        .on(Hook::DblClick, recorder(&log, "dblclick"));
    let (chart, mut state) = setup(&options);
    let t0 = Instant::now();

    state.handle_event(&chart, &PointerEvent::click(15.0, 113.0), t0);
    let t1 = t0 + Duration::from_millis(400);
    state.handle_event(&chart, &PointerEvent::click(15.0, 113.0), t1);
    assert_eq!(taken(&log), ["click:a"]);
    assert!(state.elements()[0].has_pending_click());
    assert_eq!(state.next_deadline(), Some(t1 + Duration::from_millis(350)));
}

#[test]
fn custom_double_click_speed() {
    let log = Log::default();
    let mut options = PluginOptions::default()
        .with_annotations(vec![boxed("a", (10.0, 20.0), (10.0, 20.0))])
        .on(Hook::DblClick, recorder(&log, "dblclick"));
    options.dbl_click_speed = 100;
    let (chart, mut state) = setup(&options);
    let t0 = Instant::now();

    state.handle_event(&chart, &PointerEvent::click(15.0, 113.0), t0);
    assert_eq!(state.next_deadline(), Some(t0 + Duration::from_millis(100)));
    // no click handler registered: the window closes silently
    assert_eq!(state.poll_timers(&chart, t0 + Duration::from_millis(100)), 1);
    assert!(taken(&log).is_empty());
}

#[test]
fn pending_clicks_are_tracked_per_element() {
    let log = Log::default();
    let options = PluginOptions::default()
        .with_annotations(vec![boxed("a", (10.0, 20.0), (10.0, 20.0)), boxed("b", (60.0, 70.0), (10.0, 20.0))])
        .on(Hook::Click, recorder(&log, "click"))
        .on(Hook::DblClick, recorder(&log, "dblclick"));
    let (chart, mut state) = setup(&options);
    let t0 = Instant::now();
    let ms = |n: u64| t0 + Duration::from_millis(n);

    state.handle_event(&chart, &PointerEvent::click(15.0, 113.0), t0);
    state.handle_event(&chart, &PointerEvent::click(65.0, 113.0), ms(100));
    state.handle_event(&chart, &PointerEvent::click(15.0, 113.0), ms(200));
    assert_eq!(taken(&log), ["dblclick:a"]);
    assert_eq!(state.next_deadline(), Some(ms(450)));

    assert_eq!(state.poll_timers(&chart, ms(450)), 1);
    assert_eq!(taken(&log), ["click:b"]);
}

#[test]
fn click_outside_every_element_does_nothing() {
    let log = Log::default();
    let options = PluginOptions::default()
        .with_annotations(vec![boxed("a", (10.0, 20.0), (10.0, 20.0))])
        .on(Hook::Click, recorder(&log, "click"))
        .on(Hook::DblClick, recorder(&log, "dblclick"));
    let (chart, mut state) = setup(&options);

    state.handle_event(&chart, &PointerEvent::click(100.0, 10.0), Instant::now());
    assert!(taken(&log).is_empty());
    assert_eq!(state.next_deadline(), None);
}

#[test]
fn listener_flags_gate_event_processing() {
    let (chart, mut state) = setup(&PluginOptions::default().with_annotations(vec![boxed("a", (10.0, 20.0), (10.0, 20.0))]));
    assert!(!state.listened());
    assert!(!state.move_listened());
    state.handle_event(&chart, &PointerEvent::moved(15.0, 113.0), Instant::now());
    assert_eq!(state.hovered(), None);

    let log = Log::default();
    let options = PluginOptions::default()
        .with_annotations(vec![boxed("a", (10.0, 20.0), (10.0, 20.0)).on(Hook::Click, recorder(&log, "click"))]);
    let (chart, mut state) = setup(&options);
    assert!(state.listened());
    assert!(!state.move_listened());
    // clicks are processed, moves are not
    state.handle_event(&chart, &PointerEvent::moved(15.0, 113.0), Instant::now());
    assert_eq!(state.hovered(), None);
    state.handle_event(&chart, &PointerEvent::click(15.0, 113.0), Instant::now());
    assert_eq!(taken(&log), ["click:a"]);
}

#[test]
fn handlers_see_chart_and_element() {
    let seen = Rc::new(RefCell::new(None));
    let sink = seen.clone();
    let options = PluginOptions::default()
        .with_annotations(vec![boxed("a", (10.0, 20.0), (10.0, 20.0))])
        .on(Hook::Enter, move |ctx: &EventContext<'_>| {
            *sink.borrow_mut() = Some((ctx.chart.area.width(), ctx.element.index()));
        });
    let (chart, mut state) = setup(&options);

    state.handle_event(&chart, &PointerEvent::moved(15.0, 113.0), Instant::now());
    assert_eq!(*seen.borrow(), Some((128.0, 0)));
}
