//! Error infrastructure for weapon-core.
//!
//! Nothing on the per-frame or per-tick path is fatal: rejected actions are
//! dropped for the frame and re-evaluated from fresh input next frame. The
//! error types here exist so the explicit `try_*` API and configuration
//! validation can report *why* something was refused.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each concern has its own error enum with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Stable Codes**: Every variant maps to a static error code for logs and tests

use crate::env::LocomotionState;
use crate::states::WeaponStateKind;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The same request may succeed on a later frame
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry on a later frame.
    ///
    /// Examples: weapon busy reloading, magazine empty
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: fill time longer than total reload time
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all weapon-core errors.
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait WeaponError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

// ============================================================================
// Action Admission
// ============================================================================

/// Reasons an attack, reload or unequip request was refused by the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionRejection {
    /// Actions may only start from idle.
    #[error("weapon is {state}, actions start only from idle")]
    NotIdle { state: WeaponStateKind },

    /// No rounds left to fire.
    #[error("magazine is empty")]
    OutOfAmmo,

    /// The owning actor's locomotion state blocks attacking.
    #[error("locomotion state {0} blocks attacking")]
    LocomotionBusy(LocomotionState),

    /// Nothing to reload.
    #[error("magazine is already full")]
    MagazineFull,

    /// A held lock (e.g. an in-flight reload) forbids unequipping.
    #[error("weapon cannot be unequipped while locked")]
    UnequipLocked,

    /// The weapon is not equipped.
    #[error("weapon is not equipped")]
    NotEquipped,
}

impl WeaponError for ActionRejection {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        use ActionRejection::*;
        match self {
            NotIdle { .. } => "ACTION_NOT_IDLE",
            OutOfAmmo => "ACTION_OUT_OF_AMMO",
            LocomotionBusy(_) => "ACTION_LOCOMOTION_BUSY",
            MagazineFull => "ACTION_MAGAZINE_FULL",
            UnequipLocked => "ACTION_UNEQUIP_LOCKED",
            NotEquipped => "ACTION_NOT_EQUIPPED",
        }
    }
}

// ============================================================================
// Ammunition
// ============================================================================

/// Errors raised by checked ammunition mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AmmoError {
    /// Tried to take a round from an empty magazine.
    #[error("cannot consume a round from an empty magazine")]
    Empty,
}

impl WeaponError for AmmoError {
    fn severity(&self) -> ErrorSeverity {
        // Callers gate on ammo before consuming, so reaching this is a bug.
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            AmmoError::Empty => "AMMO_EMPTY",
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Invalid weapon configuration, reported when a weapon is built.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A magazine must hold at least one round.
    #[error("magazine size must be at least 1")]
    ZeroMagazine,

    /// A shot must spawn at least one projectile.
    #[error("bullets per shot must be at least 1")]
    ZeroBulletsPerShot,

    /// A duration is negative or not a number.
    #[error("{field} must be a finite, non-negative duration (got {value})")]
    InvalidDuration { field: &'static str, value: f32 },

    /// A reload profile becomes filled only after its timer already ended.
    #[error("reload fill time {fill_time} exceeds total time {total_time}")]
    FillAfterEnd { total_time: f32, fill_time: f32 },

    /// Too many threshold overrides for the fixed-capacity selector.
    #[error("at most {max} reload overrides are supported (got {count})")]
    TooManyOverrides { count: usize, max: usize },

    /// Spread multiplier at full aim must lie in `[0, 1]`.
    #[error("aim spread multiplier must be within [0, 1] (got {0})")]
    SpreadOutOfRange(f32),
}

impl WeaponError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use ConfigError::*;
        match self {
            ZeroMagazine => "CONFIG_ZERO_MAGAZINE",
            ZeroBulletsPerShot => "CONFIG_ZERO_BULLETS_PER_SHOT",
            InvalidDuration { .. } => "CONFIG_INVALID_DURATION",
            FillAfterEnd { .. } => "CONFIG_FILL_AFTER_END",
            TooManyOverrides { .. } => "CONFIG_TOO_MANY_OVERRIDES",
            SpreadOutOfRange(_) => "CONFIG_SPREAD_OUT_OF_RANGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_are_recoverable() {
        let rejection = ActionRejection::NotIdle {
            state: WeaponStateKind::Reloading,
        };
        assert!(rejection.severity().is_recoverable());
        assert_eq!(rejection.error_code(), "ACTION_NOT_IDLE");
        assert_eq!(
            rejection.to_string(),
            "weapon is reloading, actions start only from idle"
        );
    }

    #[test]
    fn config_errors_are_validation() {
        let err = ConfigError::FillAfterEnd {
            total_time: 1.0,
            fill_time: 2.0,
        };
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert!(!err.severity().is_internal());
    }

    #[test]
    fn ammo_underflow_is_internal() {
        assert!(AmmoError::Empty.severity().is_internal());
    }

    #[test]
    fn rejection_codes_are_distinct_for_logging() {
        let rejections = [
            ActionRejection::NotIdle {
                state: WeaponStateKind::Attacking,
            },
            ActionRejection::OutOfAmmo,
            ActionRejection::LocomotionBusy(LocomotionState(2)),
            ActionRejection::MagazineFull,
            ActionRejection::UnequipLocked,
            ActionRejection::NotEquipped,
        ];
        let mut codes: Vec<_> = rejections.iter().map(|r| r.error_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), rejections.len());
        assert!(codes.iter().all(|code| code.starts_with("ACTION_")));
        assert_eq!(ActionRejection::OutOfAmmo.severity().as_str(), "recoverable");
    }
}
