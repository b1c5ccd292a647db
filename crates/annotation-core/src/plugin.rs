// File: crates/annotation-core/src/plugin.rs
// Summary: Per-chart annotation state driven by the host lifecycle (update, draw, pointer events).

use std::collections::HashSet;
use std::time::Instant;

use log::{debug, trace};

use crate::adjust::adjust_scale_range;
use crate::chart::{Chart, DataLimitsListener, ListenerId};
use crate::element::{Element, ShapeId};
use crate::handlers::EventContext;
use crate::interaction::{Dispatcher, PointerEvent};
use crate::options::{AnnotationOptions, Display, DrawTime, PluginOptions};
use crate::scale::{Scale, ScaleUid};
use crate::surface::Surface;
use crate::theme::Theme;

/// Everything the annotation layer keeps for one chart.
///
/// Created once per chart and passed to every lifecycle call; dropping it is teardown.
/// Elements are index-aligned with the configured annotation list and keep their
/// [`ShapeId`] across updates while the annotation at that index keeps its type.
pub struct AnnotationState {
    listener_id: ListenerId,
    elements: Vec<Element>,
    dispatcher: Dispatcher,
    /// Scales this state already subscribed to.
    scales: HashSet<ScaleUid>,
    /// Annotation snapshot used while scales compute their limits.
    annotations: Vec<AnnotationOptions>,
    draw_time: DrawTime,
    theme: Theme,
    next_shape: u64,
}

impl AnnotationState {
    pub fn new() -> Self {
        Self::with_theme(Theme::default())
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self {
            listener_id: ListenerId::next(),
            elements: Vec::new(),
            dispatcher: Dispatcher::new(),
            scales: HashSet::new(),
            annotations: Vec::new(),
            draw_time: DrawTime::default(),
            theme,
            next_shape: 1,
        }
    }

    pub fn elements(&self) -> &[Element] { &self.elements }

    pub fn element(&self, id: ShapeId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn hovered(&self) -> Option<ShapeId> { self.dispatcher.hovered() }
    pub fn listened(&self) -> bool { self.dispatcher.listened() }
    pub fn move_listened(&self) -> bool { self.dispatcher.move_listened() }
    pub fn theme(&self) -> &Theme { &self.theme }

    /// Number of scales this state is subscribed to.
    pub fn registered_scales(&self) -> usize { self.scales.len() }

    /// Full update pass: subscribe to scales, recompute chart limits and layout, then
    /// rebuild elements against the new pixel mapping.
    pub fn update(&mut self, chart: &mut Chart, options: &PluginOptions) {
        self.before_update(chart, options);
        chart.update(&mut [&mut *self as &mut dyn DataLimitsListener]);
        self.after_update(chart, options);
    }

    /// Snapshot the annotations, forget replaced scales and subscribe to scales not seen
    /// before. Must run before the chart computes limits.
    pub fn before_update(&mut self, chart: &mut Chart, options: &PluginOptions) {
        self.annotations = options.annotations.0.clone();
        self.draw_time = options.draw_time;
        let uids: Vec<ScaleUid> = chart.scales().map(|s| s.uid()).collect();
        self.scales.retain(|uid| uids.contains(uid));
        for uid in uids {
            if self.scales.insert(uid) {
                chart.subscribe(uid, self.listener_id);
                trace!(uid:? = uid; "subscribed to scale limits");
            }
        }
    }

    /// Recompute listener flags, resize the element list and resolve every element
    /// against the chart's current scales.
    pub fn after_update(&mut self, chart: &Chart, options: &PluginOptions) {
        self.dispatcher.update_listeners(options);
        let annotations = &options.annotations.0;

        let keep = annotations.len().min(self.elements.len());
        for removed in self.elements.drain(keep..) {
            self.dispatcher.detach(removed);
        }
        for (i, opts) in annotations.iter().enumerate() {
            let replace = self.elements.get(i).map_or(true, |e| e.kind() != opts.kind);
            if replace {
                let el = Element::new(ShapeId(self.next_shape), i, opts.kind);
                self.next_shape += 1;
                if i < self.elements.len() {
                    let old = std::mem::replace(&mut self.elements[i], el);
                    self.dispatcher.detach(old);
                } else {
                    self.elements.push(el);
                }
            }
            let el = &mut self.elements[i];
            el.update(chart, i, opts, &self.theme);
            let display = match &opts.display {
                Display::Static(v) => *v,
                Display::Dynamic(f) => f(&EventContext { chart, element: el }),
            };
            el.set_display(display);
        }
        debug!(elements = self.elements.len(); "annotations updated");
    }

    /// Draw every displayed element bound to `phase`, clipped to the chart area.
    pub fn draw(&mut self, phase: DrawTime, chart: &Chart, surface: &mut dyn Surface) {
        let fallback = self.draw_time;
        surface.save();
        surface.clip_rect(chart.area.rect());
        for el in self.elements.iter_mut().filter(|e| e.draw_time(fallback) == phase) {
            el.draw(surface);
        }
        surface.restore();
    }

    pub fn handle_event(&mut self, chart: &Chart, event: &PointerEvent, now: Instant) {
        self.dispatcher.handle_event(chart, &mut self.elements, event, now);
    }

    /// Fire single clicks whose double-click window has closed. Returns how many fired.
    pub fn poll_timers(&mut self, chart: &Chart, now: Instant) -> usize {
        self.dispatcher.poll_timers(chart, &mut self.elements, now)
    }

    /// When the host should next call [`AnnotationState::poll_timers`].
    pub fn next_deadline(&self) -> Option<Instant> {
        self.dispatcher.next_deadline(&self.elements)
    }
}

impl Default for AnnotationState {
    fn default() -> Self { Self::new() }
}

impl DataLimitsListener for AnnotationState {
    fn listener_id(&self) -> ListenerId { self.listener_id }

    fn after_data_limits(&mut self, scale: &mut dyn Scale) {
        adjust_scale_range(scale, &self.annotations);
    }
}
