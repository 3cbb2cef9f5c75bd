//! Collaborator contracts injected into a weapon at construction.
//!
//! Every collaborator is optional. A missing one imposes no restriction and
//! absorbs no output: without locomotion nothing is busy, without an ammo
//! store the magazine starts full and nothing is persisted, and so on.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Discrete locomotion/motor state tag published by the owning actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LocomotionState(pub u32);

impl fmt::Display for LocomotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of the inventory item backing an equipped weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Which camera an FOV override targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum FovSlot {
    Primary,
    ViewModel,
}

/// Read-only view of the owning actor's movement controller.
pub trait LocomotionOracle {
    fn state(&self) -> LocomotionState;
}

/// Per-item ammunition persistence.
pub trait AmmoStore {
    /// Previously saved round count for `item`, if any.
    fn load(&self, item: ItemId) -> Option<u32>;

    /// Writes the current round count back for `item`.
    fn store(&mut self, item: ItemId, current: u32);
}

/// Multiplicative modifier registered on the weapon's spread statistic.
pub trait SpreadModifier {
    fn set_multiplier(&mut self, value: f32);
}

/// Camera FOV override stack.
///
/// Targets are registered once at equip; afterwards only the `active` flags
/// change.
pub trait FovOverrides {
    fn register(&mut self, slot: FovSlot, target_fov: f32);

    fn set_active(&mut self, slot: FovSlot, active: bool);
}

// Shared handles let the host keep observing a collaborator it handed over.

impl LocomotionOracle for Rc<Cell<LocomotionState>> {
    fn state(&self) -> LocomotionState {
        self.get()
    }
}

impl<T: AmmoStore> AmmoStore for Rc<RefCell<T>> {
    fn load(&self, item: ItemId) -> Option<u32> {
        self.borrow().load(item)
    }

    fn store(&mut self, item: ItemId, current: u32) {
        self.borrow_mut().store(item, current);
    }
}

impl<T: SpreadModifier> SpreadModifier for Rc<RefCell<T>> {
    fn set_multiplier(&mut self, value: f32) {
        self.borrow_mut().set_multiplier(value);
    }
}

impl<T: FovOverrides> FovOverrides for Rc<RefCell<T>> {
    fn register(&mut self, slot: FovSlot, target_fov: f32) {
        self.borrow_mut().register(slot, target_fov);
    }

    fn set_active(&mut self, slot: FovSlot, active: bool) {
        self.borrow_mut().set_active(slot, active);
    }
}

/// Collaborators owned by one weapon.
#[derive(Default)]
pub struct WeaponEnv {
    locomotion: Option<Box<dyn LocomotionOracle>>,
    ammo_store: Option<Box<dyn AmmoStore>>,
    spread: Option<Box<dyn SpreadModifier>>,
    fov: Option<Box<dyn FovOverrides>>,
}

impl WeaponEnv {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_locomotion(mut self, locomotion: Box<dyn LocomotionOracle>) -> Self {
        self.locomotion = Some(locomotion);
        self
    }

    pub fn with_ammo_store(mut self, store: Box<dyn AmmoStore>) -> Self {
        self.ammo_store = Some(store);
        self
    }

    pub fn with_spread(mut self, spread: Box<dyn SpreadModifier>) -> Self {
        self.spread = Some(spread);
        self
    }

    pub fn with_fov(mut self, fov: Box<dyn FovOverrides>) -> Self {
        self.fov = Some(fov);
        self
    }

    /// Current locomotion state, or `None` when no locomotion is wired.
    pub fn locomotion_state(&self) -> Option<LocomotionState> {
        self.locomotion.as_ref().map(|locomotion| locomotion.state())
    }

    pub fn load_ammo(&self, item: ItemId) -> Option<u32> {
        self.ammo_store.as_deref()?.load(item)
    }

    pub fn store_ammo(&mut self, item: ItemId, current: u32) {
        if let Some(store) = self.ammo_store.as_deref_mut() {
            store.store(item, current);
        }
    }

    pub fn set_spread_multiplier(&mut self, value: f32) {
        if let Some(spread) = self.spread.as_deref_mut() {
            spread.set_multiplier(value);
        }
    }

    pub fn register_fov(&mut self, slot: FovSlot, target_fov: f32) {
        if let Some(fov) = self.fov.as_deref_mut() {
            fov.register(slot, target_fov);
        }
    }

    pub fn set_fov_active(&mut self, active: bool) {
        if let Some(fov) = self.fov.as_deref_mut() {
            fov.set_active(FovSlot::Primary, active);
            fov.set_active(FovSlot::ViewModel, active);
        }
    }
}

impl fmt::Debug for WeaponEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeaponEnv")
            .field("locomotion", &self.locomotion.is_some())
            .field("ammo_store", &self.ammo_store.is_some())
            .field("spread", &self.spread.is_some())
            .field("fov", &self.fov.is_some())
            .finish()
    }
}

/// In-memory [`AmmoStore`], keyed by item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryAmmoStore {
    rounds: HashMap<ItemId, u32>,
}

impl MemoryAmmoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, item: ItemId, current: u32) -> Self {
        self.rounds.insert(item, current);
        self
    }

    pub fn get(&self, item: ItemId) -> Option<u32> {
        self.rounds.get(&item).copied()
    }
}

impl AmmoStore for MemoryAmmoStore {
    fn load(&self, item: ItemId) -> Option<u32> {
        self.get(item)
    }

    fn store(&mut self, item: ItemId, current: u32) {
        self.rounds.insert(item, current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Crouching;

    impl LocomotionOracle for Crouching {
        fn state(&self) -> LocomotionState {
            LocomotionState(2)
        }
    }

    #[test]
    fn empty_env_is_inert() {
        let mut env = WeaponEnv::empty();
        assert_eq!(env.locomotion_state(), None);
        assert_eq!(env.load_ammo(ItemId(1)), None);
        env.store_ammo(ItemId(1), 4);
        env.set_spread_multiplier(0.5);
        env.set_fov_active(true);
    }

    #[test]
    fn wired_env_forwards() {
        let store = MemoryAmmoStore::new().with_entry(ItemId(7), 3);
        let env = WeaponEnv::empty()
            .with_locomotion(Box::new(Crouching))
            .with_ammo_store(Box::new(store));
        assert_eq!(env.locomotion_state(), Some(LocomotionState(2)));
        assert_eq!(env.load_ammo(ItemId(7)), Some(3));
        assert_eq!(env.load_ammo(ItemId(8)), None);
    }
}
