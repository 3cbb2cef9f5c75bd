//! Weapon state machine.
//!
//! [`WeaponStateMachine`] owns the three long-lived states and the shared
//! [`WeaponCore`]. Transitions run only through
//! [`WeaponStateMachine::request_transition`]; state callbacks hand back a
//! [`StateRequest`] that is executed after the callback returns, so `begin`
//! and `end` never re-enter the machine.
//!
//! Transition graph: `Idle -> {Attacking, Reloading}` and
//! `{Attacking, Reloading} -> Idle`.

use crate::ammo::AmmoLedger;
use crate::config::WeaponConfig;
use crate::env::WeaponEnv;
use crate::error::{ActionRejection, ConfigError, WeaponError};
use crate::events::WeaponEvent;
use crate::gate::ActionGate;
use crate::intent::{IntentSource, Intents};
use crate::reload::ReloadProfiles;
use crate::states::{
    AttackingState, IdleState, ReloadingState, StateRequest, WeaponCore, WeaponState,
    WeaponStateKind,
};

#[derive(Debug)]
pub struct WeaponStateMachine {
    current: WeaponStateKind,
    idle: IdleState,
    attacking: AttackingState,
    reloading: ReloadingState,
    core: WeaponCore,
}

impl WeaponStateMachine {
    /// Builds a machine in `Idle` with a full magazine.
    pub fn new(config: &WeaponConfig, env: WeaponEnv) -> Result<Self, ConfigError> {
        config.validate()?;
        let profiles = ReloadProfiles::new(config.reload.default, config.reload.overrides.clone())?;

        Ok(Self {
            current: WeaponStateKind::Idle,
            idle: IdleState::new(config),
            attacking: AttackingState::new(config),
            reloading: ReloadingState::new(profiles, config.reload.fill_policy),
            core: WeaponCore::new(
                AmmoLedger::full(config.max_ammo),
                env,
                config.busy_locomotion_states.clone(),
            ),
        })
    }

    pub fn current(&self) -> WeaponStateKind {
        self.current
    }

    pub fn ammo(&self) -> &AmmoLedger {
        self.core.ammo()
    }

    pub fn core(&self) -> &WeaponCore {
        &self.core
    }

    pub(crate) fn core_mut(&mut self) -> &mut WeaponCore {
        &mut self.core
    }

    pub fn reloading(&self) -> &ReloadingState {
        &self.reloading
    }

    pub fn attacking(&self) -> &AttackingState {
        &self.attacking
    }

    pub fn is_unequip_locked(&self) -> bool {
        self.core.unequip_lock.is_locked()
    }

    /// Admission view over the live state.
    pub fn gate(&self) -> ActionGate<'_> {
        ActionGate::new(
            self.current,
            &self.core.ammo,
            self.core.env.locomotion_state(),
            &self.core.busy_locomotion,
        )
    }

    /// Switches to `next`, running `end` on the old state and `begin` on the
    /// new one.
    ///
    /// Requesting the active state is a no-op. Edges outside the transition
    /// graph are refused. Admission rules are not checked here; callers go
    /// through the `try_*` methods for that. Returns whether a switch happened.
    pub fn request_transition(&mut self, next: WeaponStateKind) -> bool {
        let from = self.current;
        if next == from {
            return false;
        }
        if from != WeaponStateKind::Idle && next != WeaponStateKind::Idle {
            tracing::debug!("refused transition {} -> {}", from, next);
            return false;
        }

        self.dispatch(|state, core| state.end(core));
        self.current = next;
        self.dispatch(|state, core| state.begin(core));

        tracing::debug!("weapon state {} -> {}", from, next);
        self.core.emit(WeaponEvent::StateChanged { from, to: next });
        true
    }

    /// Variable-rate update: the active state polls intents.
    pub fn frame(&mut self, intents: &dyn IntentSource) {
        if let Some(request) = self.dispatch(|state, core| state.frame(core, intents)) {
            self.apply(request);
        }
    }

    /// Fixed-rate update: the active state advances its timers.
    pub fn tick(&mut self, dt: f32) {
        if let Some(request) = self.dispatch(|state, core| state.tick(core, dt)) {
            self.apply(request);
        }
    }

    pub fn try_attack(&mut self) -> Result<(), ActionRejection> {
        self.gate().check_attack()?;
        self.request_transition(WeaponStateKind::Attacking);
        Ok(())
    }

    pub fn try_reload(&mut self) -> Result<(), ActionRejection> {
        self.gate().check_reload()?;
        self.request_transition(WeaponStateKind::Reloading);
        Ok(())
    }

    /// Asks to put the weapon away. The host performs the actual unequip when
    /// it sees [`WeaponEvent::UnequipRequested`].
    pub fn try_unequip(&mut self) -> Result<(), ActionRejection> {
        if self.is_unequip_locked() {
            return Err(ActionRejection::UnequipLocked);
        }
        self.core.emit(WeaponEvent::UnequipRequested);
        Ok(())
    }

    /// Returns to idle from any state, running the active state's `end`.
    pub fn force_idle(&mut self) {
        self.request_transition(WeaponStateKind::Idle);
    }

    pub fn drain_events(&mut self) -> Vec<WeaponEvent> {
        self.core.drain_events()
    }

    fn apply(&mut self, request: StateRequest) {
        match request {
            StateRequest::Admit(intents) => self.admit(intents),
            StateRequest::Idle { queued } => {
                self.request_transition(WeaponStateKind::Idle);
                if !queued.is_empty() {
                    self.admit(queued);
                }
            }
        }
    }

    /// Starts the first admissible action in fire, reload, unequip order.
    fn admit(&mut self, intents: Intents) {
        if intents.contains(Intents::FIRE) {
            match self.try_attack() {
                Ok(()) => return,
                Err(reason) => log_rejection("attack", &reason),
            }
        }
        if intents.contains(Intents::RELOAD) {
            match self.try_reload() {
                Ok(()) => return,
                Err(reason) => log_rejection("reload", &reason),
            }
        }
        if intents.contains(Intents::UNEQUIP) {
            if let Err(reason) = self.try_unequip() {
                log_rejection("unequip", &reason);
            }
        }
    }

    fn dispatch<R>(&mut self, f: impl FnOnce(&mut dyn WeaponState, &mut WeaponCore) -> R) -> R {
        let Self {
            current,
            idle,
            attacking,
            reloading,
            core,
        } = self;
        let state: &mut dyn WeaponState = match *current {
            WeaponStateKind::Idle => idle,
            WeaponStateKind::Attacking => attacking,
            WeaponStateKind::Reloading => reloading,
        };
        f(state, core)
    }
}

fn log_rejection(action: &str, reason: &ActionRejection) {
    tracing::debug!(
        "{} rejected [{} {}]: {}",
        action,
        reason.severity().as_str(),
        reason.error_code(),
        reason
    );
}
