//! Outbound notifications for presentation collaborators.
//!
//! The state machine never plays animations or sounds itself. It queues
//! these events after each transition or mutation; the host drains them once
//! per frame and routes them to its animation/audio/UI layers.

use crate::states::WeaponStateKind;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum WeaponEvent {
    /// Weapon became active with the given magazine.
    Equipped { ammo: u32, max_ammo: u32 },
    /// Weapon was put away.
    Unequipped,
    /// A state transition finished (`end` and `begin` both ran).
    StateChanged {
        from: WeaponStateKind,
        to: WeaponStateKind,
    },
    /// A shot left the barrel.
    Fired { bullets: u32, ammo_remaining: u32 },
    /// Reload started with the selected timing.
    ReloadStarted { total_time: f32, fill_time: f32 },
    /// The in-flight reload passed its fill point.
    MagazineFilled,
    /// Reload ended before its fill point; nothing was added.
    ReloadCancelled,
    /// Round count changed; hosts persist and display this.
    AmmoChanged { current: u32, max: u32 },
    /// Cosmetic aim transition, starting at `start_weight` in `[0, 1]`.
    AimCue { cue: String, start_weight: f32 },
    /// The player asked to put the weapon away and nothing vetoed it.
    UnequipRequested,
}

impl WeaponEvent {
    /// Short tag for logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Equipped { .. } => "equipped",
            Self::Unequipped => "unequipped",
            Self::StateChanged { .. } => "state_changed",
            Self::Fired { .. } => "fired",
            Self::ReloadStarted { .. } => "reload_started",
            Self::MagazineFilled => "magazine_filled",
            Self::ReloadCancelled => "reload_cancelled",
            Self::AmmoChanged { .. } => "ammo_changed",
            Self::AimCue { .. } => "aim_cue",
            Self::UnequipRequested => "unequip_requested",
        }
    }
}
