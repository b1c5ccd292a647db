// File: crates/annotation-core/src/handlers.rs
// Summary: Optional callback slots for pointer hooks, per annotation and chart-wide.

use std::fmt;
use std::rc::Rc;

use crate::chart::Chart;
use crate::element::Element;

/// Pointer hooks an annotation can react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hook {
    Click,
    DblClick,
    Enter,
    Leave,
}

impl Hook {
    pub const CLICK_HOOKS: [Hook; 2] = [Hook::Click, Hook::DblClick];
    pub const MOVE_HOOKS: [Hook; 2] = [Hook::Enter, Hook::Leave];
}

/// What a callback gets to see: the chart and the element it fired for.
pub struct EventContext<'a> {
    pub chart: &'a Chart,
    pub element: &'a Element,
}

pub type Handler = Rc<dyn Fn(&EventContext<'_>)>;

#[derive(Clone, Default)]
pub struct Handlers {
    pub click: Option<Handler>,
    pub dblclick: Option<Handler>,
    pub enter: Option<Handler>,
    pub leave: Option<Handler>,
}

impl Handlers {
    pub fn get(&self, hook: Hook) -> Option<&Handler> {
        match hook {
            Hook::Click => self.click.as_ref(),
            Hook::DblClick => self.dblclick.as_ref(),
            Hook::Enter => self.enter.as_ref(),
            Hook::Leave => self.leave.as_ref(),
        }
    }

    pub fn set(&mut self, hook: Hook, handler: Handler) {
        let slot = match hook {
            Hook::Click => &mut self.click,
            Hook::DblClick => &mut self.dblclick,
            Hook::Enter => &mut self.enter,
            Hook::Leave => &mut self.leave,
        };
        *slot = Some(handler);
    }

    /// Builder form of [`Handlers::set`].
    pub fn on(mut self, hook: Hook, f: impl Fn(&EventContext<'_>) + 'static) -> Self {
        self.set(hook, Rc::new(f));
        self
    }

    pub fn has_any(&self, hooks: &[Hook]) -> bool {
        hooks.iter().any(|&h| self.get(h).is_some())
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("click", &self.click.is_some())
            .field("dblclick", &self.dblclick.is_some())
            .field("enter", &self.enter.is_some())
            .field("leave", &self.leave.is_some())
            .finish()
    }
}

/// First handler for `hook` in priority order (annotation override, then chart fallback).
pub fn resolve(hook: Hook, priority: &[&Handlers]) -> Option<Handler> {
    priority.iter().find_map(|h| h.get(hook)).cloned()
}
