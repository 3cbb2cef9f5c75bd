//! Countdown timer advanced on the fixed simulation cadence.

/// Accumulated steps landing this close to a deadline count as reaching it.
///
/// Tick deltas such as `0.02` or `1/60` are not exact in binary, so summing
/// `n` of them falls a hair short of `n * dt`.
const DEADLINE_TOLERANCE: f64 = 1e-4;

/// Counts down from `max` to zero and reports the end exactly once.
///
/// A fresh timer is already ended; it only runs after [`Timer::reset`]. Once
/// ended it ignores further ticks until it is reset again. A non-positive
/// `max` yields a zero-length run that ends on the very next tick.
///
/// Time is accumulated upward from the reset, so a run of `max` seconds ends
/// after exactly `max / dt` ticks whenever that ratio is whole.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timer {
    elapsed: f64,
    max: f32,
    ended: bool,
}

impl Timer {
    pub const fn new() -> Self {
        Self {
            elapsed: 0.0,
            max: 0.0,
            ended: true,
        }
    }

    /// Restarts the countdown at `max` (clamped to zero).
    pub fn reset(&mut self, max: f32) {
        self.max = max.max(0.0);
        self.elapsed = 0.0;
        self.ended = false;
    }

    /// Advances by `dt` seconds. Returns `true` on the tick that ends the run.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.ended {
            return false;
        }

        self.elapsed += f64::from(dt.max(0.0));
        if self.has_elapsed(self.max) {
            self.elapsed = f64::from(self.max);
            self.ended = true;
            return true;
        }
        false
    }

    /// Whether at least `seconds` have run since the last reset.
    pub fn has_elapsed(&self, seconds: f32) -> bool {
        self.elapsed + DEADLINE_TOLERANCE >= f64::from(seconds)
    }

    /// Remaining time in seconds.
    pub fn current(&self) -> f32 {
        (f64::from(self.max) - self.elapsed).max(0.0) as f32
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Time elapsed since the last reset (count-up view).
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    /// Fraction of the run completed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.max > 0.0 {
            (self.elapsed() / self.max).clamp(0.0, 1.0)
        } else if self.ended {
            1.0
        } else {
            0.0
        }
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_timer_is_idle() {
        let mut timer = Timer::new();
        assert!(timer.is_ended());
        assert!(!timer.tick(1.0));
    }

    #[test]
    fn ends_exactly_once() {
        let mut timer = Timer::new();
        timer.reset(1.0);

        let ended: Vec<bool> = (0..6).map(|_| timer.tick(0.25)).collect();
        assert_eq!(ended, vec![false, false, false, true, false, false]);
        assert_eq!(timer.current(), 0.0);
        assert_eq!(timer.elapsed(), 1.0);
    }

    #[test]
    fn reset_rearms_after_end() {
        let mut timer = Timer::new();
        timer.reset(0.5);
        assert!(timer.tick(1.0));

        timer.reset(0.5);
        assert!(!timer.is_ended());
        assert_eq!(timer.current(), 0.5);
        assert_eq!(timer.progress(), 0.0);
    }

    #[test]
    fn zero_length_ends_on_next_tick() {
        let mut timer = Timer::new();
        timer.reset(-2.0);
        assert_eq!(timer.max(), 0.0);
        assert!(!timer.is_ended());
        assert!(timer.tick(0.02));
        assert_eq!(timer.progress(), 1.0);
    }

    #[test]
    fn inexact_steps_end_on_the_whole_tick() {
        for (max, dt, ticks) in [(3.0, 0.02, 150), (2.0, 0.02, 100), (1.0, 1.0 / 60.0, 60)] {
            let mut timer = Timer::new();
            timer.reset(max);
            for _ in 1..ticks {
                assert!(!timer.tick(dt), "{max}s at {dt} ended early");
            }
            assert!(timer.tick(dt), "{max}s at {dt} missed tick {ticks}");
            assert_eq!(timer.current(), 0.0);
        }
    }

    #[test]
    fn has_elapsed_hits_the_whole_tick() {
        let mut timer = Timer::new();
        timer.reset(3.0);
        for _ in 0..49 {
            timer.tick(0.02);
        }
        assert!(!timer.has_elapsed(1.0));
        timer.tick(0.02);
        assert!(timer.has_elapsed(1.0));
    }
}
