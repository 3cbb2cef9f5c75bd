//! Ramp-toward-target services consumed by the aim controller.
//!
//! The controller only sees the [`Smoother`] contract; hosts can plug in any
//! curve. Two are provided: a constant-rate [`LinearRamp`] and a critically
//! damped [`SmoothDamp`].

/// Moves a scalar toward a target over time.
pub trait Smoother {
    fn set_target(&mut self, target: f32);

    fn target(&self) -> f32;

    fn value(&self) -> f32;

    /// Jumps straight to `value` and stops any motion.
    fn snap(&mut self, value: f32);

    /// Advances by `dt` seconds and returns the new value.
    fn advance(&mut self, dt: f32) -> f32;

    /// True once the value sits exactly on the target.
    fn is_settled(&self) -> bool {
        self.value() == self.target()
    }
}

/// Constant-speed ramp covering a unit distance in `duration` seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearRamp {
    value: f32,
    target: f32,
    duration: f32,
}

impl LinearRamp {
    pub fn new(duration: f32) -> Self {
        Self {
            value: 0.0,
            target: 0.0,
            duration: duration.max(0.0),
        }
    }
}

impl Smoother for LinearRamp {
    fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    fn target(&self) -> f32 {
        self.target
    }

    fn value(&self) -> f32 {
        self.value
    }

    fn snap(&mut self, value: f32) {
        self.value = value;
        self.target = value;
    }

    fn advance(&mut self, dt: f32) -> f32 {
        let remaining = self.target - self.value;
        if self.duration <= 0.0 {
            self.value = self.target;
            return self.value;
        }

        let step = dt.max(0.0) / self.duration;
        if remaining.abs() <= step {
            self.value = self.target;
        } else {
            self.value += step.copysign(remaining);
        }
        self.value
    }
}

/// Critically damped spring that eases in and out of the target.
///
/// `smooth_time` is roughly the time to reach the target. The value snaps
/// onto the target once within [`SmoothDamp::SETTLE_EPSILON`], so it settles
/// in finite time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothDamp {
    value: f32,
    target: f32,
    velocity: f32,
    smooth_time: f32,
}

impl SmoothDamp {
    pub const SETTLE_EPSILON: f32 = 1e-4;
    const MIN_SMOOTH_TIME: f32 = 1e-4;

    pub fn new(smooth_time: f32) -> Self {
        Self {
            value: 0.0,
            target: 0.0,
            velocity: 0.0,
            smooth_time: smooth_time.max(Self::MIN_SMOOTH_TIME),
        }
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }
}

impl Smoother for SmoothDamp {
    fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    fn target(&self) -> f32 {
        self.target
    }

    fn value(&self) -> f32 {
        self.value
    }

    fn snap(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    fn advance(&mut self, dt: f32) -> f32 {
        if dt <= 0.0 || self.is_settled() {
            return self.value;
        }

        let omega = 2.0 / self.smooth_time;
        let x = omega * dt;
        let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
        let change = self.value - self.target;
        let temp = (self.velocity + omega * change) * dt;
        self.velocity = (self.velocity - omega * temp) * decay;
        let mut next = self.target + (change + temp) * decay;

        // Never overshoot.
        if (self.target > self.value) == (next > self.target) {
            next = self.target;
            self.velocity = 0.0;
        }
        if (next - self.target).abs() <= Self::SETTLE_EPSILON {
            next = self.target;
            self.velocity = 0.0;
        }

        self.value = next;
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_ramp_reaches_target_exactly() {
        let mut ramp = LinearRamp::new(0.5);
        ramp.set_target(1.0);
        assert_eq!(ramp.advance(0.25), 0.5);
        assert!(!ramp.is_settled());
        assert_eq!(ramp.advance(0.25), 1.0);
        assert!(ramp.is_settled());
        assert_eq!(ramp.advance(0.25), 1.0);

        ramp.set_target(0.0);
        assert_eq!(ramp.advance(0.125), 0.75);
    }

    #[test]
    fn zero_duration_ramp_jumps() {
        let mut ramp = LinearRamp::new(0.0);
        ramp.set_target(1.0);
        assert_eq!(ramp.advance(0.0), 1.0);
    }

    #[test]
    fn smooth_damp_settles_without_overshoot() {
        let mut damp = SmoothDamp::new(0.1);
        damp.set_target(1.0);

        let mut previous = 0.0;
        for _ in 0..120 {
            let value = damp.advance(1.0 / 60.0);
            assert!(value >= previous, "ramp must be monotonic");
            assert!(value <= 1.0, "ramp must not overshoot");
            previous = value;
        }
        assert_eq!(damp.value(), 1.0);
        assert!(damp.is_settled());
        assert_eq!(damp.velocity(), 0.0);
    }

    #[test]
    fn smooth_damp_reverses() {
        let mut damp = SmoothDamp::new(0.1);
        damp.set_target(1.0);
        for _ in 0..3 {
            damp.advance(1.0 / 60.0);
        }
        let midway = damp.value();
        assert!(midway > 0.0 && midway < 1.0);

        damp.set_target(0.0);
        for _ in 0..120 {
            damp.advance(1.0 / 60.0);
        }
        assert_eq!(damp.value(), 0.0);
    }
}
