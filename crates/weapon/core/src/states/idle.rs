use super::{StateRequest, WeaponCore, WeaponState, WeaponStateKind};
use crate::config::{ControllerKind, WeaponConfig};
use crate::intent::{IntentSource, Intents};

/// Resting state; the only one that can start an action.
///
/// Automatic weapons also fire on a held trigger, so a burst keeps going
/// when the attack cooldown ends on a tick that no frame observed.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdleState {
    controller: ControllerKind,
    automatic: bool,
}

impl IdleState {
    pub fn new(config: &WeaponConfig) -> Self {
        Self {
            controller: config.controller,
            automatic: config.automatic,
        }
    }
}

impl WeaponState for IdleState {
    fn kind(&self) -> WeaponStateKind {
        WeaponStateKind::Idle
    }

    fn frame(&mut self, core: &mut WeaponCore, intents: &dyn IntentSource) -> Option<StateRequest> {
        match self.controller {
            ControllerKind::Player => {
                let mut wanted = intents.pressed() & Intents::ACTIONS;
                if self.automatic && intents.is_held(Intents::FIRE) {
                    wanted.insert(Intents::FIRE);
                }
                (!wanted.is_empty()).then_some(StateRequest::Admit(wanted))
            }
            // Automated weapons act through the explicit API and only reload
            // on their own.
            ControllerKind::Automated => core
                .ammo
                .is_empty()
                .then_some(StateRequest::Admit(Intents::RELOAD)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ammo::AmmoLedger;
    use crate::env::WeaponEnv;
    use crate::intent::IntentSnapshot;

    fn core(current: u32) -> WeaponCore {
        WeaponCore::new(AmmoLedger::new(current, 10), WeaponEnv::empty(), Vec::new())
    }

    #[test]
    fn player_admits_pressed_actions_only() {
        let mut idle = IdleState::new(&WeaponConfig::new());
        let mut core = core(5);

        assert_eq!(idle.frame(&mut core, &IntentSnapshot::NONE), None);
        assert_eq!(idle.frame(&mut core, &IntentSnapshot::hold(Intents::FIRE)), None);
        assert_eq!(idle.frame(&mut core, &IntentSnapshot::press(Intents::AIM)), None);
        assert_eq!(
            idle.frame(&mut core, &IntentSnapshot::press(Intents::FIRE | Intents::AIM)),
            Some(StateRequest::Admit(Intents::FIRE))
        );
    }

    #[test]
    fn automated_reloads_when_empty() {
        let mut idle =
            IdleState::new(&WeaponConfig::new().with_controller(ControllerKind::Automated));
        assert_eq!(idle.frame(&mut core(1), &IntentSnapshot::press(Intents::FIRE)), None);
        assert_eq!(
            idle.frame(&mut core(0), &IntentSnapshot::NONE),
            Some(StateRequest::Admit(Intents::RELOAD))
        );
    }

    #[test]
    fn automatic_admits_held_fire() {
        let mut idle = IdleState::new(&WeaponConfig::new().with_automatic(true));
        let mut core = core(5);

        assert_eq!(
            idle.frame(&mut core, &IntentSnapshot::hold(Intents::FIRE)),
            Some(StateRequest::Admit(Intents::FIRE))
        );
        assert_eq!(idle.frame(&mut core, &IntentSnapshot::hold(Intents::RELOAD)), None);
    }
}
