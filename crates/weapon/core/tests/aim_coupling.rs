use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use weapon_core::{
    AimConfig, FovOverrides, FovSlot, IntentSnapshot, Intents, LinearRamp, LocomotionState,
    SpreadModifier, Weapon, WeaponConfig, WeaponEvent,
};

const FRAME: f32 = 0.125;

#[derive(Debug, Default)]
struct SpreadRecorder {
    value: Option<f32>,
}

impl SpreadModifier for SpreadRecorder {
    fn set_multiplier(&mut self, value: f32) {
        self.value = Some(value);
    }
}

#[derive(Debug, Default)]
struct FovRecorder {
    targets: HashMap<FovSlot, f32>,
    active: HashMap<FovSlot, bool>,
    registrations: usize,
}

impl FovOverrides for FovRecorder {
    fn register(&mut self, slot: FovSlot, target_fov: f32) {
        self.targets.insert(slot, target_fov);
        self.registrations += 1;
    }

    fn set_active(&mut self, slot: FovSlot, active: bool) {
        self.active.insert(slot, active);
    }
}

impl FovRecorder {
    fn is_active(&self, slot: FovSlot) -> bool {
        self.active.get(&slot).copied().unwrap_or(false)
    }
}

struct Rig {
    weapon: Weapon,
    spread: Rc<RefCell<SpreadRecorder>>,
    fov: Rc<RefCell<FovRecorder>>,
}

fn rig(aim: AimConfig) -> Rig {
    let spread = Rc::new(RefCell::new(SpreadRecorder::default()));
    let fov = Rc::new(RefCell::new(FovRecorder::default()));
    let mut weapon = Weapon::builder(WeaponConfig::new().with_aim(aim))
        .spread_modifier(Rc::clone(&spread))
        .fov_overrides(Rc::clone(&fov))
        .smoother(LinearRamp::new(0.5))
        .build()
        .expect("valid config");
    weapon.equip(None);
    weapon.drain_events();
    Rig {
        weapon,
        spread,
        fov,
    }
}

#[test]
fn equip_registers_fov_targets_inactive() {
    let rig = rig(AimConfig::default());
    let fov = rig.fov.borrow();
    assert_eq!(fov.targets.get(&FovSlot::Primary), Some(&70.0));
    assert_eq!(fov.targets.get(&FovSlot::ViewModel), Some(&45.0));
    assert!(!fov.is_active(FovSlot::Primary));
    assert!(!fov.is_active(FovSlot::ViewModel));
    assert_eq!(rig.spread.borrow().value, Some(1.0));
}

#[test]
fn fov_targets_register_once_across_equips() {
    let mut rig = rig(AimConfig::default());
    rig.weapon.unequip().expect("unlocked");
    rig.weapon.equip(None);
    rig.weapon.unequip().expect("unlocked");
    rig.weapon.equip(None);

    let fov = rig.fov.borrow();
    assert_eq!(fov.registrations, 2);
    assert!(!fov.is_active(FovSlot::Primary));
}

#[test]
fn aim_settles_to_exact_endpoints() {
    let mut rig = rig(AimConfig::default());
    let held = IntentSnapshot::hold(Intents::AIM);

    let mut previous = 1.0;
    for _ in 0..4 {
        rig.weapon.frame(FRAME, &held);
        let value = rig.spread.borrow().value.expect("spread published");
        assert!(value <= previous);
        previous = value;
    }
    assert_eq!(rig.weapon.snapshot().aim_progress, 1.0);
    assert_eq!(rig.spread.borrow().value, Some(0.075));
    assert!(rig.fov.borrow().is_active(FovSlot::Primary));
    assert!(rig.fov.borrow().is_active(FovSlot::ViewModel));

    rig.weapon.frame(FRAME, &IntentSnapshot::NONE);
    assert!(!rig.fov.borrow().is_active(FovSlot::Primary));
    for _ in 0..3 {
        rig.weapon.frame(FRAME, &IntentSnapshot::NONE);
    }
    assert_eq!(rig.weapon.snapshot().aim_progress, 0.0);
    assert_eq!(rig.spread.borrow().value, Some(1.0));
}

#[test]
fn cues_only_from_idle() {
    let aim = AimConfig {
        use_transition_cues: true,
        ..AimConfig::default()
    };
    let mut rig = rig(aim);

    rig.weapon.frame(FRAME, &IntentSnapshot::press(Intents::AIM));
    let events = rig.weapon.drain_events();
    assert_eq!(
        events,
        vec![WeaponEvent::AimCue {
            cue: "AdsIn".to_string(),
            start_weight: 0.0,
        }]
    );

    rig.weapon.frame(FRAME, &IntentSnapshot::NONE);
    let events = rig.weapon.drain_events();
    assert_eq!(
        events,
        vec![WeaponEvent::AimCue {
            cue: "AdsOut".to_string(),
            start_weight: 0.75,
        }]
    );

    rig.weapon.frame(FRAME, &IntentSnapshot::press(Intents::FIRE | Intents::AIM));
    // Attacking now: the flip is recorded without a cue.
    let events = rig.weapon.drain_events();
    assert!(rig.weapon.aim().wants_aim());
    assert!(!events.iter().any(|event| event.kind() == "aim_cue"));
}

#[test]
fn busy_locomotion_suppresses_cues() {
    let aim = AimConfig {
        use_transition_cues: true,
        ..AimConfig::default()
    };
    let locomotion = Rc::new(std::cell::Cell::new(LocomotionState(2)));
    let mut weapon = Weapon::builder(WeaponConfig::new().with_aim(aim))
        .locomotion(Rc::clone(&locomotion))
        .build()
        .expect("valid config");
    weapon.equip(None);
    weapon.drain_events();

    weapon.frame(FRAME, &IntentSnapshot::press(Intents::AIM));
    assert!(weapon.drain_events().is_empty());
    assert!(weapon.aim().wants_aim());
}

#[test]
fn unequip_clears_aim() {
    let mut rig = rig(AimConfig::default());
    for _ in 0..4 {
        rig.weapon.frame(FRAME, &IntentSnapshot::hold(Intents::AIM));
    }
    rig.weapon.unequip().expect("unlocked");

    assert!(!rig.fov.borrow().is_active(FovSlot::Primary));
    assert_eq!(rig.spread.borrow().value, Some(1.0));
    assert_eq!(rig.weapon.snapshot().aim_progress, 0.0);
}
