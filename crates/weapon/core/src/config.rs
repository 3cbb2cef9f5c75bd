//! Weapon configuration and tunable defaults.
//!
//! Configuration is static: it is validated once when a weapon is built and
//! read-only afterwards. With the `serde` feature every field is optional in
//! data files and falls back to the defaults below.

use crate::env::LocomotionState;
use crate::error::ConfigError;
use crate::reload::{ReloadProfile, ReloadProfileOverride};

/// Who produces the weapon's intents.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ControllerKind {
    /// Intents are polled from the player's input every frame.
    #[default]
    Player,
    /// Input is ignored; the host drives actions through the `try_*` API and
    /// idle weapons reload themselves once empty.
    Automated,
}

/// How many rounds a completed reload puts back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillPolicy {
    /// Top the magazine up to capacity.
    #[default]
    Full,
    /// Add a fixed number of rounds, clamped to capacity (shell-by-shell).
    Partial { rounds: u32 },
}

/// Reload timing: the default profile plus ammo-threshold overrides.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReloadConfig {
    pub default: ReloadProfile,
    /// Any order; sorted by threshold when the weapon is built.
    pub overrides: Vec<ReloadProfileOverride>,
    pub fill_policy: FillPolicy,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            default: ReloadProfile::default(),
            overrides: Vec::new(),
            fill_policy: FillPolicy::Full,
        }
    }
}

/// Aim-in behaviour: accuracy coupling, FOV targets and cosmetic cues.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AimConfig {
    /// Spread multiplier at full aim; `1.0` at no aim.
    pub min_spread_multiplier: f32,
    /// Primary camera FOV while aiming.
    pub camera_fov: f32,
    /// View-model camera FOV while aiming.
    pub view_model_fov: f32,
    /// Approximate time for the aim ramp to reach its target (seconds).
    pub smooth_time: f32,
    /// Emit aim-in/aim-out cues when the intent flips.
    pub use_transition_cues: bool,
    pub aim_in_cue: String,
    pub aim_out_cue: String,
}

impl AimConfig {
    pub const DEFAULT_MIN_SPREAD_MULTIPLIER: f32 = 0.075;
    pub const DEFAULT_CAMERA_FOV: f32 = 70.0;
    pub const DEFAULT_VIEW_MODEL_FOV: f32 = 45.0;
    pub const DEFAULT_SMOOTH_TIME: f32 = 0.1;
    pub const DEFAULT_AIM_IN_CUE: &'static str = "AdsIn";
    pub const DEFAULT_AIM_OUT_CUE: &'static str = "AdsOut";
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            min_spread_multiplier: Self::DEFAULT_MIN_SPREAD_MULTIPLIER,
            camera_fov: Self::DEFAULT_CAMERA_FOV,
            view_model_fov: Self::DEFAULT_VIEW_MODEL_FOV,
            smooth_time: Self::DEFAULT_SMOOTH_TIME,
            use_transition_cues: false,
            aim_in_cue: Self::DEFAULT_AIM_IN_CUE.to_owned(),
            aim_out_cue: Self::DEFAULT_AIM_OUT_CUE.to_owned(),
        }
    }
}

/// Complete static definition of one firearm.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeaponConfig {
    /// Catalog name, used for lookup and logging.
    pub name: String,
    /// Magazine capacity.
    pub max_ammo: u32,
    /// Keep firing while the fire intent is held.
    pub automatic: bool,
    /// Projectiles spawned per shot (reported on every shot event).
    pub bullets_per_shot: u32,
    /// Time spent in the attacking state per shot (seconds).
    pub attack_interval: f32,
    pub controller: ControllerKind,
    /// Locomotion states in which attacking is refused.
    pub busy_locomotion_states: Vec<LocomotionState>,
    pub reload: ReloadConfig,
    pub aim: AimConfig,
}

impl WeaponConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of reload threshold overrides per weapon.
    ///
    /// A product limit: authored weapons use two or three tiers, and the
    /// selector keeps them inline. Longer lists are rejected at build time
    /// with [`ConfigError::TooManyOverrides`].
    pub const MAX_RELOAD_OVERRIDES: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_NAME: &'static str = "firearm";
    pub const DEFAULT_MAX_AMMO: u32 = 10;
    pub const DEFAULT_BULLETS_PER_SHOT: u32 = 1;
    pub const DEFAULT_ATTACK_INTERVAL: f32 = 0.1;
    pub const DEFAULT_BUSY_LOCOMOTION_STATES: [LocomotionState; 1] = [LocomotionState(2)];

    pub fn new() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_owned(),
            max_ammo: Self::DEFAULT_MAX_AMMO,
            automatic: false,
            bullets_per_shot: Self::DEFAULT_BULLETS_PER_SHOT,
            attack_interval: Self::DEFAULT_ATTACK_INTERVAL,
            controller: ControllerKind::Player,
            busy_locomotion_states: Self::DEFAULT_BUSY_LOCOMOTION_STATES.to_vec(),
            reload: ReloadConfig::default(),
            aim: AimConfig::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_max_ammo(mut self, max_ammo: u32) -> Self {
        self.max_ammo = max_ammo;
        self
    }

    pub fn with_automatic(mut self, automatic: bool) -> Self {
        self.automatic = automatic;
        self
    }

    pub fn with_attack_interval(mut self, attack_interval: f32) -> Self {
        self.attack_interval = attack_interval;
        self
    }

    pub fn with_controller(mut self, controller: ControllerKind) -> Self {
        self.controller = controller;
        self
    }

    pub fn with_reload(mut self, reload: ReloadConfig) -> Self {
        self.reload = reload;
        self
    }

    pub fn with_aim(mut self, aim: AimConfig) -> Self {
        self.aim = aim;
        self
    }

    pub fn with_busy_locomotion_states(
        mut self,
        states: impl IntoIterator<Item = LocomotionState>,
    ) -> Self {
        self.busy_locomotion_states = states.into_iter().collect();
        self
    }

    /// Checks every field that would otherwise make the weapon misbehave.
    ///
    /// Zero-length reloads are valid (they complete on the next tick); a fill
    /// time beyond the total time is not, because the magazine would never
    /// be committed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_ammo == 0 {
            return Err(ConfigError::ZeroMagazine);
        }
        if self.bullets_per_shot == 0 {
            return Err(ConfigError::ZeroBulletsPerShot);
        }
        check_duration("attack_interval", self.attack_interval)?;
        check_duration("aim.smooth_time", self.aim.smooth_time)?;

        let spread = self.aim.min_spread_multiplier;
        if !(0.0..=1.0).contains(&spread) {
            return Err(ConfigError::SpreadOutOfRange(spread));
        }

        let count = self.reload.overrides.len();
        if count > Self::MAX_RELOAD_OVERRIDES {
            return Err(ConfigError::TooManyOverrides {
                count,
                max: Self::MAX_RELOAD_OVERRIDES,
            });
        }

        self.reload.default.validate()?;
        for entry in &self.reload.overrides {
            entry.profile().validate()?;
        }
        Ok(())
    }
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Rates for the two host cadences.
///
/// The state machine never assumes a ratio between them; hosts use this to
/// drive the fixed-step accumulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CadenceConfig {
    /// Fixed simulation steps per second.
    pub tick_rate: u32,
    /// Variable-rate frames per second (nominal).
    pub frame_rate: u32,
}

impl CadenceConfig {
    pub const DEFAULT_TICK_RATE: u32 = 50;
    pub const DEFAULT_FRAME_RATE: u32 = 60;

    /// Seconds per simulation tick.
    pub fn tick_delta(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// Seconds per frame at the nominal frame rate.
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            tick_rate: Self::DEFAULT_TICK_RATE,
            frame_rate: Self::DEFAULT_FRAME_RATE,
        }
    }
}

pub(crate) fn check_duration(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDuration { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = WeaponConfig::default();
        assert_eq!(config.max_ammo, 10);
        assert_eq!(config.busy_locomotion_states, vec![LocomotionState(2)]);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_magazine() {
        let config = WeaponConfig::new().with_max_ammo(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroMagazine));
    }

    #[test]
    fn rejects_fill_after_end() {
        let reload = ReloadConfig {
            default: ReloadProfile::new(1.0, 2.0),
            ..ReloadConfig::default()
        };
        let config = WeaponConfig::new().with_reload(reload);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FillAfterEnd { .. })
        ));
    }

    #[test]
    fn zero_length_reload_is_valid() {
        let reload = ReloadConfig {
            default: ReloadProfile::new(0.0, 0.0),
            ..ReloadConfig::default()
        };
        assert_eq!(WeaponConfig::new().with_reload(reload).validate(), Ok(()));
    }

    #[test]
    fn rejects_too_many_overrides() {
        let reload = ReloadConfig {
            overrides: (0..9)
                .map(|threshold| ReloadProfileOverride::new(threshold, 1.0, 0.5))
                .collect(),
            ..ReloadConfig::default()
        };
        assert!(matches!(
            WeaponConfig::new().with_reload(reload).validate(),
            Err(ConfigError::TooManyOverrides { count: 9, max: 8 })
        ));
    }

    #[test]
    fn rejects_negative_interval_and_bad_spread() {
        let config = WeaponConfig::new().with_attack_interval(-0.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDuration {
                field: "attack_interval",
                ..
            })
        ));

        let aim = AimConfig {
            min_spread_multiplier: 1.5,
            ..AimConfig::default()
        };
        assert_eq!(
            WeaponConfig::new().with_aim(aim).validate(),
            Err(ConfigError::SpreadOutOfRange(1.5))
        );
    }

    #[test]
    fn cadence_deltas() {
        let cadence = CadenceConfig::default();
        assert_eq!(cadence.tick_delta(), 1.0 / 50.0);
        assert_eq!(cadence.frame_delta(), 1.0 / 60.0);
        let controller: ControllerKind = "AUTOMATED".parse().unwrap();
        assert_eq!(controller, ControllerKind::Automated);
    }
}
