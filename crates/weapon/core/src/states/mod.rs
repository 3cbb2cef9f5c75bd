//! The three weapon states and the shared data they act on.
//!
//! States are a closed set. Each exposes the same flat surface
//! ([`WeaponState`]) and is dispatched from one place in
//! [`crate::machine::WeaponStateMachine`]. `begin` and `end` cannot request
//! transitions; `frame` and `tick` return a [`StateRequest`] which the machine
//! executes after the callback has returned.

mod attacking;
mod idle;
mod reloading;

pub use attacking::AttackingState;
pub use idle::IdleState;
pub use reloading::ReloadingState;

use crate::ammo::AmmoLedger;
use crate::config::FillPolicy;
use crate::env::{ItemId, LocomotionState, WeaponEnv};
use crate::error::AmmoError;
use crate::events::WeaponEvent;
use crate::intent::{IntentSource, Intents};
use crate::lock::UnequipLock;

/// Discriminant of the active state.
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
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WeaponStateKind {
    #[default]
    Idle,
    Attacking,
    Reloading,
}

/// Transition a state asks for from `frame` or `tick`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateRequest {
    /// Try to start the given actions from idle, first admitted wins.
    Admit(Intents),
    /// Return to idle, then try to start the queued actions.
    Idle { queued: Intents },
}

impl StateRequest {
    pub const fn idle() -> Self {
        Self::Idle {
            queued: Intents::empty(),
        }
    }
}

/// Weapon data every state reads or mutates.
#[derive(Debug)]
pub struct WeaponCore {
    pub(crate) ammo: AmmoLedger,
    pub(crate) unequip_lock: UnequipLock,
    pub(crate) env: WeaponEnv,
    pub(crate) item: Option<ItemId>,
    pub(crate) busy_locomotion: Vec<LocomotionState>,
    events: Vec<WeaponEvent>,
}

impl WeaponCore {
    pub(crate) fn new(
        ammo: AmmoLedger,
        env: WeaponEnv,
        busy_locomotion: Vec<LocomotionState>,
    ) -> Self {
        Self {
            ammo,
            unequip_lock: UnequipLock::new(),
            env,
            item: None,
            busy_locomotion,
            events: Vec::new(),
        }
    }

    pub fn ammo(&self) -> &AmmoLedger {
        &self.ammo
    }

    pub fn unequip_lock(&self) -> &UnequipLock {
        &self.unequip_lock
    }

    pub(crate) fn emit(&mut self, event: WeaponEvent) {
        self.events.push(event);
    }

    pub(crate) fn drain_events(&mut self) -> Vec<WeaponEvent> {
        std::mem::take(&mut self.events)
    }

    /// Removes one round and publishes the new count.
    pub(crate) fn consume_round(&mut self) -> Result<u32, AmmoError> {
        let remaining = self.ammo.consume()?;
        self.ammo_changed();
        Ok(remaining)
    }

    /// Commits a completed reload and publishes the new count.
    pub(crate) fn fill_magazine(&mut self, policy: FillPolicy) -> u32 {
        let current = self.ammo.fill(policy);
        self.ammo_changed();
        current
    }

    /// Overwrites the count (clamped) and publishes it.
    pub(crate) fn set_ammo(&mut self, current: u32) -> u32 {
        let stored = self.ammo.set(current);
        self.ammo_changed();
        stored
    }

    fn ammo_changed(&mut self) {
        let (current, max) = (self.ammo.current(), self.ammo.max());
        self.emit(WeaponEvent::AmmoChanged { current, max });
        if let Some(item) = self.item {
            self.env.store_ammo(item, current);
        }
    }
}

/// Flat callback surface shared by every state.
pub trait WeaponState {
    fn kind(&self) -> WeaponStateKind;

    /// Runs when the state becomes active.
    fn begin(&mut self, _core: &mut WeaponCore) {}

    /// Runs when the state is left, including forced exits.
    fn end(&mut self, _core: &mut WeaponCore) {}

    /// Variable-rate callback; polls intents.
    fn frame(&mut self, _core: &mut WeaponCore, _intents: &dyn IntentSource) -> Option<StateRequest> {
        None
    }

    /// Fixed-rate callback; advances time.
    fn tick(&mut self, _core: &mut WeaponCore, _dt: f32) -> Option<StateRequest> {
        None
    }
}
