use bevy::math::curve::{Curve, EaseFunction, EasingCurve};

/// Drives a value from 0 to 1 over `duration` seconds along an easing curve.
#[derive(Debug, Clone)]
pub struct Tween {
    curve: EasingCurve<f32>,
    duration: f32,
    elapsed: f32,
}

impl Tween {
    pub fn new(easing: EaseFunction, duration: f32) -> Self {
        Self {
            curve: EasingCurve::new(0.0, 1.0, easing),
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    pub fn advance(&mut self, delta: f32) {
        self.elapsed = (self.elapsed + delta.max(0.0)).min(self.duration);
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current eased value; exactly 1 once finished.
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return 1.0;
        }
        self.curve.sample_clamped(self.elapsed / self.duration)
    }
}
