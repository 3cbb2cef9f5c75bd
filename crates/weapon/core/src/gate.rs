//! Admission rules for starting an action.
//!
//! A gate is a borrowed view built at request time, so every decision sees
//! the live state, ammo and locomotion. Nothing is cached between requests.

use crate::ammo::AmmoLedger;
use crate::env::LocomotionState;
use crate::error::ActionRejection;
use crate::states::WeaponStateKind;

#[derive(Clone, Copy, Debug)]
pub struct ActionGate<'a> {
    state: WeaponStateKind,
    ammo: &'a AmmoLedger,
    locomotion: Option<LocomotionState>,
    busy: &'a [LocomotionState],
}

impl<'a> ActionGate<'a> {
    pub fn new(
        state: WeaponStateKind,
        ammo: &'a AmmoLedger,
        locomotion: Option<LocomotionState>,
        busy: &'a [LocomotionState],
    ) -> Self {
        Self {
            state,
            ammo,
            locomotion,
            busy,
        }
    }

    /// True when the owner's locomotion state is in the busy set.
    ///
    /// Without a locomotion collaborator nothing is ever busy.
    pub fn is_locomotion_busy(&self) -> bool {
        self.locomotion
            .is_some_and(|state| self.busy.contains(&state))
    }

    /// Idle, at least one round, and not locomotion-busy.
    pub fn check_attack(&self) -> Result<(), ActionRejection> {
        self.check_idle()?;
        if self.ammo.is_empty() {
            return Err(ActionRejection::OutOfAmmo);
        }
        match self.locomotion {
            Some(state) if self.busy.contains(&state) => {
                Err(ActionRejection::LocomotionBusy(state))
            }
            _ => Ok(()),
        }
    }

    /// Idle and the magazine is not full.
    pub fn check_reload(&self) -> Result<(), ActionRejection> {
        self.check_idle()?;
        if self.ammo.is_full() {
            return Err(ActionRejection::MagazineFull);
        }
        Ok(())
    }

    pub fn can_attack(&self) -> bool {
        self.check_attack().is_ok()
    }

    pub fn can_reload(&self) -> bool {
        self.check_reload().is_ok()
    }

    fn check_idle(&self) -> Result<(), ActionRejection> {
        match self.state {
            WeaponStateKind::Idle => Ok(()),
            state => Err(ActionRejection::NotIdle { state }),
        }
    }
}
