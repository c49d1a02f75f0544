use crate::constants::REVEAL_THRESHOLD;
use crate::surface::{Rect, Viewport};
use fnv::FnvHashMap;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The inputs a behavior can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Scroll,
    Pointer,
    Visibility,
}

/// Subscribers are behavior slots in the engine's registry.
pub type Subscribers = SmallVec<[usize; 8]>;

/// A sampled value plus the behaviors listening to it.
#[derive(Clone, Debug, Default)]
pub struct Signal<T> {
    value: T,
    version: u64,
    subscribers: Subscribers,
}

impl<T: Copy + PartialEq> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            version: 0,
            subscribers: Subscribers::new(),
        }
    }

    #[inline]
    pub fn get(&self) -> T {
        self.value
    }

    /// Incremented on every change.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Stores `value`; returns whether it differed from the previous one.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.version = self.version.wrapping_add(1);
        true
    }

    pub fn subscribe(&mut self, slot: usize) {
        if !self.subscribers.contains(&slot) {
            self.subscribers.push(slot);
        }
    }

    pub fn unsubscribe(&mut self, slot: usize) {
        self.subscribers.retain(|s| *s != slot);
    }

    pub fn clear_subscribers(&mut self) {
        self.subscribers.clear();
    }

    #[inline]
    pub fn subscribers(&self) -> &[usize] {
        &self.subscribers
    }
}

// ---------------- Scroll ----------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    #[default]
    Down,
}

/// Where the page is and where it was one sample ago.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub position: f32,
    pub last_position: f32,
    pub direction: ScrollDirection,
}

impl ScrollState {
    pub fn advance(&mut self, position: f32) {
        self.last_position = self.position;
        self.position = position;
        if position > self.last_position {
            self.direction = ScrollDirection::Down;
        } else if position < self.last_position {
            self.direction = ScrollDirection::Up;
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ScrollSource {
    signal: Signal<f32>,
    state: ScrollState,
}

impl ScrollSource {
    /// Records a native scroll offset, clamped to non-negative (overscroll
    /// bounce reports negative values).
    pub fn sample(&mut self, y: f32) -> f32 {
        let y = if y.is_finite() { y.max(0.0) } else { 0.0 };
        self.state.advance(y);
        self.signal.set(y);
        y
    }

    #[inline]
    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    #[inline]
    pub fn signal(&self) -> &Signal<f32> {
        &self.signal
    }

    #[inline]
    pub fn signal_mut(&mut self) -> &mut Signal<f32> {
        &mut self.signal
    }
}

// ---------------- Pointer ----------------

#[derive(Clone, Debug)]
pub struct PointerSource {
    signal: Signal<Vec2>,
}

impl Default for PointerSource {
    fn default() -> Self {
        Self {
            signal: Signal::new(Vec2::splat(0.5)),
        }
    }
}

impl PointerSource {
    /// Records a pointer position in client pixels and returns it as a
    /// viewport fraction in `[0,1]²`.
    pub fn sample(&mut self, client_x: f32, client_y: f32, viewport: Viewport) -> Vec2 {
        let uv = normalize_pointer(client_x, client_y, viewport);
        self.signal.set(uv);
        uv
    }

    #[inline]
    pub fn get(&self) -> Vec2 {
        self.signal.get()
    }

    #[inline]
    pub fn signal(&self) -> &Signal<Vec2> {
        &self.signal
    }

    #[inline]
    pub fn signal_mut(&mut self) -> &mut Signal<Vec2> {
        &mut self.signal
    }
}

#[inline]
pub fn normalize_pointer(client_x: f32, client_y: f32, viewport: Viewport) -> Vec2 {
    if viewport.width > 0.0 && viewport.height > 0.0 {
        let u = (client_x / viewport.width).clamp(0.0, 1.0);
        let v = (client_y / viewport.height).clamp(0.0, 1.0);
        if u.is_finite() && v.is_finite() {
            return Vec2::new(u, v);
        }
    }
    Vec2::splat(0.5)
}

// ---------------- Visibility ----------------

/// `true` once the element's top edge has crossed `threshold` of the viewport
/// height (`0.8` is "top 80%").
#[inline]
pub fn in_viewport(rect: Rect, viewport: Viewport, threshold: f32) -> bool {
    rect.top < viewport.height * threshold
}

#[derive(Clone, Debug)]
struct Watch {
    threshold: f32,
    visible: SmallVec<[bool; 4]>,
}

/// Per-target visibility for every behavior subscribed to
/// [`SignalKind::Visibility`].
#[derive(Clone, Debug, Default)]
pub struct VisibilitySource {
    watches: FnvHashMap<usize, Watch>,
    subscribers: Subscribers,
}

impl VisibilitySource {
    pub fn watch(&mut self, slot: usize, threshold: Option<f32>, targets: usize) {
        let threshold = threshold.unwrap_or(REVEAL_THRESHOLD);
        self.watches.insert(
            slot,
            Watch {
                threshold,
                visible: SmallVec::from_elem(false, targets),
            },
        );
        if !self.subscribers.contains(&slot) {
            self.subscribers.push(slot);
        }
    }

    pub fn unwatch(&mut self, slot: usize) {
        self.watches.remove(&slot);
        self.subscribers.retain(|s| *s != slot);
    }

    pub fn clear(&mut self) {
        self.watches.clear();
        self.subscribers.clear();
    }

    /// Re-measures one target. Returns the new state on a transition only.
    pub fn refresh(
        &mut self,
        slot: usize,
        index: usize,
        rect: Rect,
        viewport: Viewport,
    ) -> Option<bool> {
        let watch = self.watches.get_mut(&slot)?;
        let now = in_viewport(rect, viewport, watch.threshold);
        let was = watch.visible.get_mut(index)?;
        if *was == now {
            return None;
        }
        *was = now;
        Some(now)
    }

    pub fn is_visible(&self, slot: usize, index: usize) -> bool {
        self.watches
            .get(&slot)
            .and_then(|w| w.visible.get(index).copied())
            .unwrap_or(false)
    }

    #[inline]
    pub fn subscribers(&self) -> &[usize] {
        &self.subscribers
    }
}
