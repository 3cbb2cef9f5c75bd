//! Per-weapon action controller for first-person games.
//!
//! `weapon-core` owns the rules: the `Idle`/`Attacking`/`Reloading` state
//! machine, action admission, ammunition bookkeeping, reload-profile
//! selection and the aim-in ramp with its accuracy and FOV coupling. It has no
//! engine dependency. Hosts inject collaborators through [`env`], feed intents
//! on the frame cadence and time on the tick cadence, and drain
//! [`WeaponEvent`]s for presentation.
pub mod aim;
pub mod ammo;
pub mod config;
pub mod env;
pub mod error;
pub mod events;
pub mod gate;
pub mod intent;
pub mod lock;
pub mod machine;
pub mod reload;
pub mod smoothing;
pub mod states;
pub mod timer;
pub mod weapon;

pub use aim::{AimController, AimCue, AimOutputs};
pub use ammo::AmmoLedger;
pub use config::{
    AimConfig, CadenceConfig, ControllerKind, FillPolicy, ReloadConfig, WeaponConfig,
};
pub use env::{
    AmmoStore, FovOverrides, FovSlot, ItemId, LocomotionOracle, LocomotionState,
    MemoryAmmoStore, SpreadModifier, WeaponEnv,
};
pub use error::{ActionRejection, AmmoError, ConfigError, ErrorSeverity, WeaponError};
pub use events::WeaponEvent;
pub use gate::ActionGate;
pub use intent::{IntentSnapshot, IntentSource, IntentTracker, Intents};
pub use lock::{LockToken, UnequipLock};
pub use machine::WeaponStateMachine;
pub use reload::{ReloadProfile, ReloadProfileOverride, ReloadProfiles};
pub use smoothing::{LinearRamp, SmoothDamp, Smoother};
pub use states::{StateRequest, WeaponState, WeaponStateKind};
pub use timer::Timer;
pub use weapon::{ReloadSnapshot, Weapon, WeaponBuilder, WeaponSnapshot};
