//! Aim-in/aim-out progress and its accuracy/FOV coupling.
//!
//! Progress ramps smoothly through the injected [`Smoother`]; the FOV
//! override flag follows the intent immediately. Spread is derived from
//! progress every frame.

use crate::config::AimConfig;
use crate::smoothing::Smoother;

/// Cosmetic transition request sent when the aim intent flips.
#[derive(Clone, Debug, PartialEq)]
pub struct AimCue {
    pub cue: String,
    /// Where the transition clip should start, in `[0, 1]`.
    pub start_weight: f32,
}

/// Values republished every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AimOutputs {
    pub progress: f32,
    pub spread_multiplier: f32,
    pub fov_active: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct CueIds {
    aim_in: String,
    aim_out: String,
}

pub struct AimController {
    smoother: Box<dyn Smoother>,
    wants_aim: bool,
    progress: f32,
    min_spread_multiplier: f32,
    cues: Option<CueIds>,
}

impl AimController {
    pub fn new(config: &AimConfig, mut smoother: Box<dyn Smoother>) -> Self {
        smoother.snap(0.0);
        let cues = config.use_transition_cues.then(|| CueIds {
            aim_in: config.aim_in_cue.clone(),
            aim_out: config.aim_out_cue.clone(),
        });
        Self {
            smoother,
            wants_aim: false,
            progress: 0.0,
            min_spread_multiplier: config.min_spread_multiplier,
            cues,
        }
    }

    pub fn wants_aim(&self) -> bool {
        self.wants_aim
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Spread multiplier for the current progress.
    pub fn spread_multiplier(&self) -> f32 {
        spread_at(self.progress, self.min_spread_multiplier)
    }

    /// Records the aim intent.
    ///
    /// When the intent flips and `cue_allowed` is set, returns the transition
    /// cue. A ramp still in flight hands over its remaining distance
    /// (`1 - progress`); a settled ramp starts the clip from zero.
    pub fn set_intent(&mut self, wants_aim: bool, cue_allowed: bool) -> Option<AimCue> {
        if wants_aim == self.wants_aim {
            return None;
        }
        self.wants_aim = wants_aim;

        let cues = self.cues.as_ref().filter(|_| cue_allowed)?;
        let start_weight = if self.smoother.is_settled() {
            0.0
        } else {
            1.0 - self.progress
        };
        let cue = if wants_aim {
            cues.aim_in.clone()
        } else {
            cues.aim_out.clone()
        };
        Some(AimCue { cue, start_weight })
    }

    /// Advances the ramp by one frame and returns the derived outputs.
    pub fn update(&mut self, dt: f32) -> AimOutputs {
        self.smoother
            .set_target(if self.wants_aim { 1.0 } else { 0.0 });
        self.progress = self.smoother.advance(dt).clamp(0.0, 1.0);
        self.outputs()
    }

    pub fn outputs(&self) -> AimOutputs {
        AimOutputs {
            progress: self.progress,
            spread_multiplier: self.spread_multiplier(),
            fov_active: self.wants_aim,
        }
    }

    /// Drops any aim and returns to the hip instantly.
    pub fn reset(&mut self) {
        self.wants_aim = false;
        self.progress = 0.0;
        self.smoother.snap(0.0);
    }
}

impl core::fmt::Debug for AimController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AimController")
            .field("wants_aim", &self.wants_aim)
            .field("progress", &self.progress)
            .field("min_spread_multiplier", &self.min_spread_multiplier)
            .field("cues", &self.cues)
            .finish()
    }
}

/// Interpolates from `1.0` at the hip to `min` at full aim.
///
/// Written as a weighted sum so both endpoints are exact.
pub fn spread_at(progress: f32, min: f32) -> f32 {
    let t = progress.clamp(0.0, 1.0);
    (1.0 - t) + min * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smoothing::LinearRamp;

    fn controller(use_cues: bool) -> AimController {
        let config = AimConfig {
            use_transition_cues: use_cues,
            ..AimConfig::default()
        };
        AimController::new(&config, Box::new(LinearRamp::new(0.5)))
    }

    #[test]
    fn spread_endpoints_are_exact() {
        assert_eq!(spread_at(0.0, 0.075), 1.0);
        assert_eq!(spread_at(1.0, 0.075), 0.075);

        let mut previous = spread_at(0.0, 0.075);
        for step in 1..=100 {
            let current = spread_at(step as f32 / 100.0, 0.075);
            assert!(current <= previous);
            previous = current;
        }
    }

    #[test]
    fn ramps_in_and_out() {
        let mut aim = controller(false);
        aim.set_intent(true, true);
        for _ in 0..4 {
            aim.update(0.125);
        }
        let outputs = aim.outputs();
        assert_eq!(outputs.progress, 1.0);
        assert_eq!(outputs.spread_multiplier, 0.075);
        assert!(outputs.fov_active);

        aim.set_intent(false, true);
        let first = aim.update(0.125);
        assert!(!first.fov_active, "FOV follows intent immediately");
        assert_eq!(first.progress, 0.75);
        for _ in 0..3 {
            aim.update(0.125);
        }
        assert_eq!(aim.progress(), 0.0);
        assert_eq!(aim.spread_multiplier(), 1.0);
    }

    #[test]
    fn cue_carries_remaining_progress() {
        let mut aim = controller(true);

        let cue = aim.set_intent(true, true).expect("aim-in cue");
        assert_eq!(cue.cue, "AdsIn");
        assert_eq!(cue.start_weight, 0.0);

        aim.update(0.125);
        assert_eq!(aim.progress(), 0.25);

        let cue = aim.set_intent(false, true).expect("aim-out cue");
        assert_eq!(cue.cue, "AdsOut");
        assert_eq!(cue.start_weight, 0.75);
    }

    #[test]
    fn no_cue_when_disabled_or_gated() {
        let mut aim = controller(false);
        assert_eq!(aim.set_intent(true, true), None);

        let mut aim = controller(true);
        assert_eq!(aim.set_intent(true, false), None);
        assert!(aim.wants_aim(), "intent is recorded even without a cue");
        assert_eq!(aim.set_intent(true, true), None, "no flip, no cue");
    }
}
