use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

/// Geometry of the tracked element relative to the viewport, as a host reports it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollGeometry {
    /// Distance from the viewport top to the element top; negative once scrolled past.
    pub target_top: f64,
    /// Full height of the element.
    pub target_height: f64,
    /// Height of the viewport.
    pub viewport_height: f64,
}

/// A point on the element meeting a point on the viewport, both as fractions of height.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Intersection {
    /// 0 = element start, 1 = element end.
    pub target: f64,
    /// 0 = viewport start, 1 = viewport end.
    pub viewport: f64,
}

impl Intersection {
    pub const START_START: Self = Self {
        target: 0.0,
        viewport: 0.0,
    };
    pub const END_END: Self = Self {
        target: 1.0,
        viewport: 1.0,
    };
    pub const START_END: Self = Self {
        target: 0.0,
        viewport: 1.0,
    };
    pub const END_START: Self = Self {
        target: 1.0,
        viewport: 0.0,
    };

    /// `target_top` at which this intersection holds.
    fn top_at(self, g: &ScrollGeometry) -> f64 {
        self.viewport * g.viewport_height - self.target * g.target_height
    }
}

/// Where progress is 0 and where it is 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollOffsets {
    pub start: Intersection,
    pub end: Intersection,
}

impl Default for ScrollOffsets {
    fn default() -> Self {
        Self::STICKY
    }
}

impl ScrollOffsets {
    /// Element start at viewport start -> 0, element end at viewport end -> 1.
    ///
    /// This is the range over which a sticky full-viewport child stays pinned.
    pub const STICKY: Self = Self {
        start: Intersection::START_START,
        end: Intersection::END_END,
    };

    /// Element start entering at the viewport bottom -> 0, element end leaving at the top -> 1.
    pub const ENTER_EXIT: Self = Self {
        start: Intersection::START_END,
        end: Intersection::END_START,
    };

    /// Normalized progress for `geometry`, clamped to `[0, 1]`.
    ///
    /// A zero-length travel range yields 0.
    pub fn progress(&self, geometry: &ScrollGeometry) -> f64 {
        let top0 = self.start.top_at(geometry);
        let top1 = self.end.top_at(geometry);
        let travel = top0 - top1;
        if !travel.is_finite() || travel.abs() < f64::EPSILON {
            return 0.0;
        }
        let p = (top0 - geometry.target_top) / travel;
        if p.is_nan() {
            return 0.0;
        }
        p.clamp(0.0, 1.0)
    }

    /// Geometry at which `progress` is reached for an element of `target_height`.
    pub fn geometry_at(
        &self,
        progress: f64,
        target_height: f64,
        viewport_height: f64,
    ) -> ScrollGeometry {
        let mut g = ScrollGeometry {
            target_top: 0.0,
            target_height,
            viewport_height,
        };
        let top0 = self.start.top_at(&g);
        let top1 = self.end.top_at(&g);
        g.target_top = top0 - progress.clamp(0.0, 1.0) * (top0 - top1);
        g
    }
}

type Observer = Box<dyn FnMut(f64)>;

#[derive(Default)]
struct Observers {
    next_id: u64,
    entries: Vec<(u64, Observer)>,
    emitting: bool,
    /// Ids below this were registered when the current emission started.
    emit_horizon: u64,
    removed_while_emitting: Vec<u64>,
}

/// Push-based progress source for one tracked element.
///
/// Every [`ScrollTracker::update`] is delivered to every live observer, in subscription order,
/// with no debouncing. Single-threaded by construction.
pub struct ScrollTracker {
    offsets: ScrollOffsets,
    current: f64,
    observers: Rc<RefCell<Observers>>,
}

impl std::fmt::Debug for ScrollTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollTracker")
            .field("offsets", &self.offsets)
            .field("current", &self.current)
            .field("observers", &self.observer_count())
            .finish()
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(ScrollOffsets::default())
    }
}

impl ScrollTracker {
    pub fn new(offsets: ScrollOffsets) -> Self {
        Self {
            offsets,
            current: 0.0,
            observers: Rc::new(RefCell::new(Observers::default())),
        }
    }

    pub fn offsets(&self) -> ScrollOffsets {
        self.offsets
    }

    /// Last emitted progress (0 before the first update).
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Register `observer`; it stays registered until the returned handle is dropped or
    /// [`Subscription::unsubscribe`] is called.
    pub fn subscribe(&self, observer: impl FnMut(f64) + 'static) -> Subscription {
        register(&self.observers, Box::new(observer))
    }

    /// Recompute progress from `geometry` and push it to every observer.
    pub fn update(&mut self, geometry: &ScrollGeometry) -> f64 {
        let progress = self.offsets.progress(geometry);
        self.emit(progress);
        progress
    }

    /// Push an already-normalized progress value (clamped to `[0, 1]`).
    pub fn set_progress(&mut self, progress: f64) {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        self.emit(progress);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().entries.len()
    }

    fn emit(&mut self, progress: f64) {
        self.current = progress;

        // Observers run without the registry borrowed so they may subscribe or unsubscribe.
        let mut entries = {
            let mut obs = self.observers.borrow_mut();
            obs.emitting = true;
            obs.emit_horizon = obs.next_id;
            std::mem::take(&mut obs.entries)
        };
        for (id, observer) in entries.iter_mut() {
            if self.observers.borrow().removed_while_emitting.contains(id) {
                continue;
            }
            observer(progress);
        }

        let mut obs = self.observers.borrow_mut();
        obs.emitting = false;
        let removed = std::mem::take(&mut obs.removed_while_emitting);
        entries.retain(|(id, _)| !removed.contains(id));
        let added = std::mem::take(&mut obs.entries);
        entries.extend(added);
        obs.entries = entries;
    }
}

fn register(observers: &Rc<RefCell<Observers>>, observer: Observer) -> Subscription {
    let mut obs = observers.borrow_mut();
    let id = obs.next_id;
    obs.next_id += 1;
    obs.entries.push((id, observer));
    Subscription {
        id,
        observers: Rc::downgrade(observers),
    }
}

/// Registration handle returned by [`ScrollTracker::subscribe`]; unsubscribes on drop.
#[must_use = "dropping a Subscription unsubscribes the observer"]
pub struct Subscription {
    id: u64,
    observers: Weak<RefCell<Observers>>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("live", &self.is_live())
            .finish()
    }
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// False once the tracker is gone or this observer was removed.
    pub fn is_live(&self) -> bool {
        let Some(obs) = self.observers.upgrade() else {
            return false;
        };
        let obs = obs.borrow();
        let registered = obs.entries.iter().any(|(id, _)| *id == self.id);
        if obs.emitting {
            // Entries being emitted are held outside the registry until emission ends.
            let in_flight = self.id < obs.emit_horizon;
            (in_flight || registered) && !obs.removed_while_emitting.contains(&self.id)
        } else {
            registered
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(obs) = self.observers.upgrade() else {
            return;
        };
        let mut obs = obs.borrow_mut();
        obs.entries.retain(|(id, _)| *id != self.id);
        if obs.emitting {
            obs.removed_while_emitting.push(self.id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/tracker.rs"]
mod tests;
