//! Reload timing profiles and threshold-based selection.
//!
//! A weapon has one default profile and up to
//! [`WeaponConfig::MAX_RELOAD_OVERRIDES`] overrides keyed by an ammo threshold.
//! Overrides are sorted ascending by threshold exactly once, when the
//! selector is built; selection relies on that order.

use arrayvec::ArrayVec;

use crate::config::{WeaponConfig, check_duration};
use crate::error::ConfigError;

/// How long a reload takes and when the magazine counts as filled.
///
/// `fill_time` is measured from the start of the reload; the magazine is
/// filled once that much time has elapsed, possibly before the reload ends.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReloadProfile {
    pub total_time: f32,
    pub fill_time: f32,
}

impl ReloadProfile {
    pub const DEFAULT_TOTAL_TIME: f32 = 3.0;
    pub const DEFAULT_FILL_TIME: f32 = 1.0;

    pub const fn new(total_time: f32, fill_time: f32) -> Self {
        Self {
            total_time,
            fill_time,
        }
    }

    /// Non-positive totals are zero-length reloads; the fill point must not
    /// come after the end.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.total_time.is_finite() {
            return Err(ConfigError::InvalidDuration {
                field: "reload.total_time",
                value: self.total_time,
            });
        }
        check_duration("reload.fill_time", self.fill_time)?;
        if self.fill_time > self.total_time.max(0.0) {
            return Err(ConfigError::FillAfterEnd {
                total_time: self.total_time,
                fill_time: self.fill_time,
            });
        }
        Ok(())
    }
}

impl Default for ReloadProfile {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOTAL_TIME, Self::DEFAULT_FILL_TIME)
    }
}

/// A profile that applies once the magazine holds more than `ammo_threshold`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReloadProfileOverride {
    pub ammo_threshold: u32,
    pub total_time: f32,
    pub fill_time: f32,
}

impl ReloadProfileOverride {
    pub const fn new(ammo_threshold: u32, total_time: f32, fill_time: f32) -> Self {
        Self {
            ammo_threshold,
            total_time,
            fill_time,
        }
    }

    pub const fn profile(&self) -> ReloadProfile {
        ReloadProfile::new(self.total_time, self.fill_time)
    }
}

/// Default profile plus threshold overrides, sorted ascending.
#[derive(Clone, Debug, PartialEq)]
pub struct ReloadProfiles {
    default: ReloadProfile,
    overrides: ArrayVec<ReloadProfileOverride, { WeaponConfig::MAX_RELOAD_OVERRIDES }>,
}

impl ReloadProfiles {
    /// Builds the selector, sorting overrides by threshold.
    ///
    /// The sort is stable, so overrides sharing a threshold keep their
    /// original relative order.
    pub fn new(
        default: ReloadProfile,
        overrides: impl IntoIterator<Item = ReloadProfileOverride>,
    ) -> Result<Self, ConfigError> {
        let mut entries = overrides.into_iter();
        let mut overrides = ArrayVec::<_, { WeaponConfig::MAX_RELOAD_OVERRIDES }>::new();
        while let Some(entry) = entries.next() {
            if overrides.try_push(entry).is_err() {
                return Err(ConfigError::TooManyOverrides {
                    count: overrides.len() + 1 + entries.count(),
                    max: WeaponConfig::MAX_RELOAD_OVERRIDES,
                });
            }
        }
        overrides.sort_by_key(|entry| entry.ammo_threshold);
        Ok(Self { default, overrides })
    }

    pub fn default_profile(&self) -> ReloadProfile {
        self.default
    }

    /// Overrides in ascending threshold order.
    pub fn overrides(&self) -> &[ReloadProfileOverride] {
        &self.overrides
    }

    /// Picks the override with the highest threshold still below
    /// `current_ammo`, or the default when none qualifies.
    pub fn find_profile(&self, current_ammo: u32) -> ReloadProfile {
        let mut profile = self.default;
        for entry in &self.overrides {
            if entry.ammo_threshold >= current_ammo {
                break;
            }
            profile = entry.profile();
        }
        profile
    }
}
