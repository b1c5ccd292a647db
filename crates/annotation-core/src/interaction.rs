// File: crates/annotation-core/src/interaction.rs
// Summary: Pointer dispatch: nearest-element resolution, hover enter/leave, click vs double-click.

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use log::{debug, trace};
use serde::Deserialize;

use crate::chart::Chart;
use crate::element::{Element, PendingClick, ShapeId};
use crate::geometry::{distance, Point};
use crate::handlers::{resolve, EventContext, Handler, Handlers, Hook};
use crate::options::PluginOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum PointerEventKind {
    #[serde(rename = "mousemove")]
    Move,
    #[serde(rename = "mouseout")]
    Out,
    #[serde(rename = "click")]
    Click,
}

/// Raw pointer event in chart pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn moved(x: f64, y: f64) -> Self { Self { kind: PointerEventKind::Move, x, y } }
    pub fn out() -> Self { Self { kind: PointerEventKind::Out, x: f64::NAN, y: f64::NAN } }
    pub fn click(x: f64, y: f64) -> Self { Self { kind: PointerEventKind::Click, x, y } }
    pub fn position(&self) -> Point { Point::new(self.x, self.y) }
}

/// Index of the element the pointer at `pos` refers to.
///
/// Candidates are displayed elements that report `in_range`. The closest center wins;
/// equal distances fall back to the smaller area, then the lower index.
pub fn nearest_element(elements: &[Element], pos: Point) -> Option<usize> {
    let mut min_distance = f64::INFINITY;
    let mut nearest: Vec<usize> = Vec::new();
    for (i, el) in elements.iter().enumerate() {
        if !el.in_range(pos.x, pos.y) {
            continue;
        }
        let d = distance(pos, el.center_point());
        if d < min_distance {
            min_distance = d;
            nearest.clear();
            nearest.push(i);
        } else if d == min_distance {
            nearest.push(i);
        }
    }
    nearest.into_iter().min_by(|&a, &b| {
        let (sa, sb) = (elements[a].area(), elements[b].area());
        sa.partial_cmp(&sb)
            .filter(|o| *o != Ordering::Equal)
            .unwrap_or_else(|| elements[a].index().cmp(&elements[b].index()))
    })
}

fn dispatch(chart: &Chart, handler: Option<Handler>, element: &Element) {
    if let Some(h) = handler {
        h(&EventContext { chart, element });
    }
}

/// Per-chart pointer state: chart-level fallback handlers, listening flags and hover.
pub struct Dispatcher {
    listeners: Handlers,
    listened: bool,
    move_listened: bool,
    hovered: Option<ShapeId>,
    /// Hovered element that an update removed; it still owes its `leave`.
    detached: Option<Element>,
    dbl_click_window: Duration,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            listeners: Handlers::default(),
            listened: false,
            move_listened: false,
            hovered: None,
            detached: None,
            dbl_click_window: PluginOptions::default().dbl_click_window(),
        }
    }

    /// Any click or double-click handler registered, chart-wide or per annotation.
    pub fn listened(&self) -> bool { self.listened }
    /// Any enter or leave handler registered.
    pub fn move_listened(&self) -> bool { self.move_listened }
    pub fn hovered(&self) -> Option<ShapeId> { self.hovered }

    /// Recompute fallbacks and listening flags from `options`.
    pub fn update_listeners(&mut self, options: &PluginOptions) {
        self.listeners = options.handlers.clone();
        self.dbl_click_window = options.dbl_click_window();
        let annotations = options.annotations.iter().map(|a| &a.handlers);
        let all: Vec<&Handlers> = std::iter::once(&options.handlers).chain(annotations).collect();
        self.listened = all.iter().any(|h| h.has_any(&Hook::CLICK_HOOKS));
        self.move_listened = all.iter().any(|h| h.has_any(&Hook::MOVE_HOOKS));
        debug!(listened = self.listened, move_listened = self.move_listened; "annotation listeners updated");
    }

    /// Take ownership of an element dropped from the list. Kept only while it is hovered.
    pub(crate) fn detach(&mut self, element: Element) {
        if self.hovered == Some(element.id()) {
            trace!(index = element.index(); "hovered annotation removed");
            self.detached = Some(element);
        }
    }

    pub fn handle_event(&mut self, chart: &Chart, elements: &mut [Element], event: &PointerEvent, now: Instant) {
        if !self.listened && !self.move_listened {
            return;
        }
        trace!(kind:? = event.kind, x = event.x, y = event.y; "annotation pointer event");
        match event.kind {
            PointerEventKind::Move => self.handle_move(chart, elements, event),
            // No shape is resolved on pointer-out; the next move reconciles hover state.
            PointerEventKind::Out => {}
            PointerEventKind::Click => self.handle_click(chart, elements, event, now),
        }
    }

    fn handle_move(&mut self, chart: &Chart, elements: &[Element], event: &PointerEvent) {
        if !self.move_listened {
            return;
        }
        let element = nearest_element(elements, event.position()).map(|i| elements[i].id());
        let previous = std::mem::replace(&mut self.hovered, element);
        if previous == element {
            return;
        }
        let find = |id: Option<ShapeId>| id.and_then(|id| elements.iter().find(|e| e.id() == id));
        let removed = self.detached.take().filter(|e| Some(e.id()) == previous);
        if let Some(prev) = find(previous).or(removed.as_ref()) {
            dispatch(chart, resolve(Hook::Leave, &[&prev.options().handlers, &self.listeners]), prev);
        }
        if let Some(next) = find(element) {
            dispatch(chart, resolve(Hook::Enter, &[&next.options().handlers, &self.listeners]), next);
        }
    }

    fn handle_click(&mut self, chart: &Chart, elements: &mut [Element], event: &PointerEvent, now: Instant) {
        if !self.listened {
            return;
        }
        self.poll_timers(chart, elements, now);
        let Some(i) = nearest_element(elements, event.position()) else { return };

        let el = &mut elements[i];
        let priority = [&el.options().handlers, &self.listeners];
        let dblclick = resolve(Hook::DblClick, &priority);
        let click = resolve(Hook::Click, &priority);

        if el.pending_click.take().is_some() {
            trace!(index = i; "double click");
            dispatch(chart, dblclick, el);
        } else if dblclick.is_some() {
            el.pending_click = Some(PendingClick { deadline: now + self.dbl_click_window, handler: click });
        } else {
            dispatch(chart, click, el);
        }
    }

    /// Fire single clicks whose double-click window closed at or before `now`, oldest first.
    /// Returns how many fired.
    pub fn poll_timers(&self, chart: &Chart, elements: &mut [Element], now: Instant) -> usize {
        let mut due: Vec<(Instant, usize)> = elements
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.pending_click.as_ref().filter(|p| p.deadline <= now).map(|p| (p.deadline, i)))
            .collect();
        due.sort();
        for &(_, i) in &due {
            let handler = elements[i].pending_click.take().and_then(|p| p.handler);
            dispatch(chart, handler, &elements[i]);
        }
        due.len()
    }

    /// Earliest pending single-click deadline; hosts should call `poll_timers` then.
    pub fn next_deadline(&self, elements: &[Element]) -> Option<Instant> {
        elements.iter().filter_map(|e| e.pending_click.as_ref().map(|p| p.deadline)).min()
    }
}

impl Default for Dispatcher {
    fn default() -> Self { Self::new() }
}
