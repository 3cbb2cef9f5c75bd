//! Equipped-weapon aggregate.
//!
//! [`Weapon`] ties the state machine to the aim controller and to the host's
//! collaborators. Hosts call [`Weapon::frame`] every rendered frame and
//! [`Weapon::tick`] every simulation step, then drain the queued
//! [`WeaponEvent`]s.

use crate::aim::AimController;
use crate::ammo::AmmoLedger;
use crate::config::{ControllerKind, WeaponConfig};
use crate::env::{
    AmmoStore, FovOverrides, FovSlot, ItemId, LocomotionOracle, SpreadModifier, WeaponEnv,
};
use crate::error::{ActionRejection, ConfigError};
use crate::events::WeaponEvent;
use crate::gate::ActionGate;
use crate::intent::{IntentSource, Intents};
use crate::machine::WeaponStateMachine;
use crate::smoothing::{SmoothDamp, Smoother};
use crate::states::WeaponStateKind;

/// Read-only view of a weapon for HUDs and logs.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponSnapshot {
    pub equipped: bool,
    pub state: WeaponStateKind,
    pub ammo: AmmoLedger,
    pub aim_progress: f32,
    pub spread_multiplier: f32,
    /// Present only while reloading.
    pub reload: Option<ReloadSnapshot>,
    pub unequip_locked: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReloadSnapshot {
    pub total_time: f32,
    pub remaining: f32,
    pub filled: bool,
}

pub struct Weapon {
    name: String,
    controller: ControllerKind,
    machine: WeaponStateMachine,
    aim: AimController,
    equipped: bool,
    automated_aim: bool,
}

impl Weapon {
    pub fn builder(config: WeaponConfig) -> WeaponBuilder {
        WeaponBuilder::new(config)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn controller(&self) -> ControllerKind {
        self.controller
    }

    pub fn is_equipped(&self) -> bool {
        self.equipped
    }

    pub fn state(&self) -> WeaponStateKind {
        self.machine.current()
    }

    pub fn ammo(&self) -> &AmmoLedger {
        self.machine.ammo()
    }

    pub fn machine(&self) -> &WeaponStateMachine {
        &self.machine
    }

    pub fn aim(&self) -> &AimController {
        &self.aim
    }

    pub fn gate(&self) -> ActionGate<'_> {
        self.machine.gate()
    }

    /// Makes the weapon active.
    ///
    /// Loads the round count saved for `item` (full when nothing is saved)
    /// and writes it back, deactivates both FOV overrides and resets the
    /// spread modifier. Equipping an equipped weapon does nothing.
    pub fn equip(&mut self, item: Option<ItemId>) {
        if self.equipped {
            return;
        }

        let core = self.machine.core_mut();
        core.item = item;
        if let Some(item) = item {
            let max = core.ammo.max();
            match core.env.load_ammo(item) {
                Some(saved) => {
                    if saved > max {
                        tracing::warn!(
                            "{} stored {} rounds, clamping to magazine size {}",
                            item,
                            saved,
                            max
                        );
                    }
                    core.set_ammo(saved);
                }
                None => {
                    core.set_ammo(max);
                }
            }
        }

        core.env.set_fov_active(false);
        core.env.set_spread_multiplier(1.0);

        self.aim.reset();
        self.equipped = true;

        let ammo = *self.machine.ammo();
        tracing::info!(
            "equipped {} with {}/{} rounds",
            self.name,
            ammo.current(),
            ammo.max()
        );
        self.machine.core_mut().emit(WeaponEvent::Equipped {
            ammo: ammo.current(),
            max_ammo: ammo.max(),
        });
    }

    /// Puts the weapon away unless something holds the unequip lock.
    pub fn unequip(&mut self) -> Result<(), ActionRejection> {
        if !self.equipped {
            return Err(ActionRejection::NotEquipped);
        }
        if self.machine.is_unequip_locked() {
            return Err(ActionRejection::UnequipLocked);
        }
        self.teardown();
        Ok(())
    }

    /// Puts the weapon away regardless of the lock.
    ///
    /// The active state's `end` still runs, so an in-flight reload releases
    /// its lock (and commits only if it had already filled).
    pub fn force_unequip(&mut self) {
        if self.equipped {
            self.teardown();
        }
    }

    /// Tears the weapon down and returns the events it produced on the way.
    pub fn destroy(mut self) -> Vec<WeaponEvent> {
        self.force_unequip();
        self.machine.drain_events()
    }

    /// Variable-rate update. Ignored while unequipped.
    pub fn frame(&mut self, dt: f32, intents: &dyn IntentSource) {
        if !self.equipped {
            return;
        }

        self.machine.frame(intents);

        let wants_aim = match self.controller {
            ControllerKind::Player => intents.is_held(Intents::AIM),
            ControllerKind::Automated => self.automated_aim,
        };
        self.update_aim(dt, wants_aim);
    }

    /// Fixed-rate update. Ignored while unequipped.
    pub fn tick(&mut self, dt: f32) {
        if self.equipped {
            self.machine.tick(dt);
        }
    }

    /// Aim intent for automated weapons, applied on the next frame.
    pub fn set_aim_intent(&mut self, wants_aim: bool) {
        self.automated_aim = wants_aim;
    }

    pub fn try_attack(&mut self) -> Result<(), ActionRejection> {
        self.ensure_equipped()?;
        self.machine.try_attack()
    }

    pub fn try_reload(&mut self) -> Result<(), ActionRejection> {
        self.ensure_equipped()?;
        self.machine.try_reload()
    }

    pub fn try_unequip(&mut self) -> Result<(), ActionRejection> {
        self.ensure_equipped()?;
        self.machine.try_unequip()
    }

    pub fn drain_events(&mut self) -> Vec<WeaponEvent> {
        self.machine.drain_events()
    }

    pub fn snapshot(&self) -> WeaponSnapshot {
        let state = self.machine.current();
        let reload = (state == WeaponStateKind::Reloading).then(|| {
            let reloading = self.machine.reloading();
            ReloadSnapshot {
                total_time: reloading.timer().max(),
                remaining: reloading.timer().current(),
                filled: reloading.is_filled(),
            }
        });

        WeaponSnapshot {
            equipped: self.equipped,
            state,
            ammo: *self.machine.ammo(),
            aim_progress: self.aim.progress(),
            spread_multiplier: self.aim.spread_multiplier(),
            reload,
            unequip_locked: self.machine.is_unequip_locked(),
        }
    }

    fn ensure_equipped(&self) -> Result<(), ActionRejection> {
        if self.equipped {
            Ok(())
        } else {
            Err(ActionRejection::NotEquipped)
        }
    }

    fn update_aim(&mut self, dt: f32, wants_aim: bool) {
        let cue_allowed =
            self.machine.current() == WeaponStateKind::Idle && !self.gate().is_locomotion_busy();
        if let Some(cue) = self.aim.set_intent(wants_aim, cue_allowed) {
            self.machine.core_mut().emit(WeaponEvent::AimCue {
                cue: cue.cue,
                start_weight: cue.start_weight,
            });
        }

        let outputs = self.aim.update(dt);
        let env = &mut self.machine.core_mut().env;
        env.set_spread_multiplier(outputs.spread_multiplier);
        env.set_fov_active(outputs.fov_active);
    }

    fn teardown(&mut self) {
        self.machine.force_idle();
        self.aim.reset();
        self.equipped = false;
        self.automated_aim = false;

        let core = self.machine.core_mut();
        core.env.set_fov_active(false);
        core.env.set_spread_multiplier(1.0);
        core.emit(WeaponEvent::Unequipped);
        tracing::info!("unequipped {}", self.name);
    }
}

impl core::fmt::Debug for Weapon {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Weapon")
            .field("name", &self.name)
            .field("controller", &self.controller)
            .field("equipped", &self.equipped)
            .field("machine", &self.machine)
            .field("aim", &self.aim)
            .finish()
    }
}

/// Collects collaborators before the weapon is validated and built.
pub struct WeaponBuilder {
    config: WeaponConfig,
    env: WeaponEnv,
    smoother: Option<Box<dyn Smoother>>,
}

impl WeaponBuilder {
    pub fn new(config: WeaponConfig) -> Self {
        Self {
            config,
            env: WeaponEnv::empty(),
            smoother: None,
        }
    }

    pub fn locomotion(mut self, locomotion: impl LocomotionOracle + 'static) -> Self {
        self.env = self.env.with_locomotion(Box::new(locomotion));
        self
    }

    pub fn ammo_store(mut self, store: impl AmmoStore + 'static) -> Self {
        self.env = self.env.with_ammo_store(Box::new(store));
        self
    }

    pub fn spread_modifier(mut self, spread: impl SpreadModifier + 'static) -> Self {
        self.env = self.env.with_spread(Box::new(spread));
        self
    }

    pub fn fov_overrides(mut self, fov: impl FovOverrides + 'static) -> Self {
        self.env = self.env.with_fov(Box::new(fov));
        self
    }

    /// Replaces the default [`SmoothDamp`] aim ramp.
    pub fn smoother(mut self, smoother: impl Smoother + 'static) -> Self {
        self.smoother = Some(Box::new(smoother));
        self
    }

    pub fn build(self) -> Result<Weapon, ConfigError> {
        let Self {
            config,
            env,
            smoother,
        } = self;

        let mut machine = WeaponStateMachine::new(&config, env)?;
        // FOV targets are registered once per weapon, never per equip.
        let env = &mut machine.core_mut().env;
        env.register_fov(FovSlot::Primary, config.aim.camera_fov);
        env.register_fov(FovSlot::ViewModel, config.aim.view_model_fov);
        env.set_fov_active(false);

        let smoother: Box<dyn Smoother> = match smoother {
            Some(smoother) => smoother,
            None => Box::new(SmoothDamp::new(config.aim.smooth_time)),
        };
        let aim = AimController::new(&config.aim, smoother);

        tracing::debug!("built weapon {} ({})", config.name, config.controller);
        Ok(Weapon {
            name: config.name,
            controller: config.controller,
            machine,
            aim,
            equipped: false,
            automated_aim: false,
        })
    }
}
