use super::{StateRequest, WeaponCore, WeaponState, WeaponStateKind};
use crate::config::{ControllerKind, WeaponConfig};
use crate::events::WeaponEvent;
use crate::intent::{IntentSource, Intents};
use crate::timer::Timer;

/// One shot plus its cooldown.
///
/// Entered only through the gate, so the magazine holds at least one round
/// on `begin`. Follow-up intents collected during the cooldown are handed
/// back to the machine, which re-admits them from idle.
#[derive(Clone, Debug)]
pub struct AttackingState {
    controller: ControllerKind,
    automatic: bool,
    bullets_per_shot: u32,
    interval: f32,
    timer: Timer,
    queued: Intents,
}

impl AttackingState {
    pub fn new(config: &WeaponConfig) -> Self {
        Self {
            controller: config.controller,
            automatic: config.automatic,
            bullets_per_shot: config.bullets_per_shot,
            interval: config.attack_interval,
            timer: Timer::new(),
            queued: Intents::empty(),
        }
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Follow-ups collected so far in this activation.
    pub fn queued(&self) -> Intents {
        self.queued
    }
}

impl WeaponState for AttackingState {
    fn kind(&self) -> WeaponStateKind {
        WeaponStateKind::Attacking
    }

    fn begin(&mut self, core: &mut WeaponCore) {
        self.queued = Intents::empty();
        self.timer.reset(self.interval);

        match core.consume_round() {
            Ok(ammo_remaining) => core.emit(WeaponEvent::Fired {
                bullets: self.bullets_per_shot,
                ammo_remaining,
            }),
            Err(err) => tracing::warn!("attack began without a round: {}", err),
        }
    }

    fn frame(&mut self, _core: &mut WeaponCore, intents: &dyn IntentSource) -> Option<StateRequest> {
        if self.controller == ControllerKind::Automated {
            return None;
        }

        if self.automatic {
            self.queued.set(Intents::FIRE, intents.is_held(Intents::FIRE));
        } else if intents.was_pressed(Intents::FIRE) {
            self.queued.insert(Intents::FIRE);
        }
        if intents.was_pressed(Intents::RELOAD) {
            self.queued.insert(Intents::RELOAD);
        }
        None
    }

    fn tick(&mut self, _core: &mut WeaponCore, dt: f32) -> Option<StateRequest> {
        self.timer.tick(dt).then_some(StateRequest::Idle {
            queued: self.queued,
        })
    }
}
