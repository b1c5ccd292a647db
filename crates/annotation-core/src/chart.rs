// File: crates/annotation-core/src/chart.rs
// Summary: Host chart model: named scales, chart area, limit computation with listener notification.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::scale::{Scale, ScaleUid};
use crate::types::ChartArea;

/// Identity of a limits listener registered on a chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Observer notified right after a subscribed scale computed its data limits.
pub trait DataLimitsListener {
    fn listener_id(&self) -> ListenerId;
    fn after_data_limits(&mut self, scale: &mut dyn Scale);
}

pub struct Chart {
    pub area: ChartArea,
    scales: BTreeMap<String, Box<dyn Scale>>,
    subscriptions: HashMap<ScaleUid, HashSet<ListenerId>>,
}

impl Chart {
    pub fn new(area: ChartArea) -> Self {
        Self { area, scales: BTreeMap::new(), subscriptions: HashMap::new() }
    }

    /// Add or replace the scale registered under its id.
    pub fn add_scale(&mut self, scale: impl Scale + 'static) {
        let scale: Box<dyn Scale> = Box::new(scale);
        if let Some(old) = self.scales.insert(scale.id().to_string(), scale) {
            self.subscriptions.remove(&old.uid());
        }
    }

    pub fn scale(&self, id: &str) -> Option<&dyn Scale> {
        self.scales.get(id).map(|s| s.as_ref())
    }

    pub fn scales(&self) -> impl Iterator<Item = &dyn Scale> {
        self.scales.values().map(|s| s.as_ref())
    }

    /// Subscribe `listener` to limit notifications of the scale with `uid`.
    /// Returns false if it was already subscribed.
    pub fn subscribe(&mut self, uid: ScaleUid, listener: ListenerId) -> bool {
        self.subscriptions.entry(uid).or_default().insert(listener)
    }

    pub fn is_subscribed(&self, uid: ScaleUid, listener: ListenerId) -> bool {
        self.subscriptions.get(&uid).is_some_and(|set| set.contains(&listener))
    }

    /// Compute data limits of every scale, notify subscribed listeners, then lay the
    /// scales out over the chart area.
    pub fn update(&mut self, listeners: &mut [&mut dyn DataLimitsListener]) {
        for scale in self.scales.values_mut() {
            scale.determine_data_limits();
            let subscribed = self.subscriptions.get(&scale.uid());
            for listener in listeners.iter_mut() {
                if subscribed.is_some_and(|set| set.contains(&listener.listener_id())) {
                    listener.after_data_limits(scale.as_mut());
                }
            }
        }
        self.layout();
    }

    /// Horizontal scales run left to right, vertical ones bottom to top.
    pub fn layout(&mut self) {
        let area = self.area;
        for scale in self.scales.values_mut() {
            if scale.is_horizontal() {
                scale.set_pixel_range(area.left, area.right);
            } else {
                scale.set_pixel_range(area.bottom, area.top);
            }
        }
    }
}

impl Default for Chart {
    fn default() -> Self { Self::new(ChartArea::default()) }
}
