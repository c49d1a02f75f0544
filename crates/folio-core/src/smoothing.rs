use crate::constants::WRITE_EPSILON;
use glam::Vec2;

/// Per-frame blend factor for an exponential approach with time constant
/// `tau_sec`. `tau_sec <= 0` snaps.
#[inline]
pub fn smoothing_alpha(dt_sec: f32, tau_sec: f32) -> f32 {
    if tau_sec <= 0.0 {
        return 1.0;
    }
    (1.0 - (-dt_sec.max(0.0) / tau_sec).exp()).clamp(0.0, 1.0)
}

/// A value easing toward a target. Rotations use `x` only.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Smoothed {
    value: Vec2,
    target: Vec2,
    snap_next: bool,
}

impl Smoothed {
    /// Starts at rest at the origin.
    pub fn at_rest() -> Self {
        Self::default()
    }

    /// Jumps straight to the first target it is given, then eases.
    pub fn snapping() -> Self {
        Self {
            snap_next: true,
            ..Self::default()
        }
    }

    pub fn set_target(&mut self, target: Vec2) {
        if self.snap_next {
            self.value = target;
            self.snap_next = false;
        }
        self.target = target;
    }

    pub fn snap(&mut self, target: Vec2) {
        self.value = target;
        self.target = target;
        self.snap_next = false;
    }

    pub fn step(&mut self, dt_sec: f32, tau_sec: f32) -> Vec2 {
        let alpha = smoothing_alpha(dt_sec, tau_sec);
        self.value += (self.target - self.value) * alpha;
        if (self.target - self.value).abs().max_element() < WRITE_EPSILON {
            self.value = self.target;
        }
        self.value
    }

    #[inline]
    pub fn value(&self) -> Vec2 {
        self.value
    }

    #[inline]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.value == self.target
    }
}
