//! Glue code tying content, the weapon and the console collaborators together.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Result;
use weapon_content::{CadenceLoader, IntentScript, ScriptLoader, WeaponLoader};
use weapon_core::{
    CadenceConfig, ControllerKind, FovSlot, IntentTracker, Intents, ItemId, LocomotionState,
    MemoryAmmoStore, Weapon, WeaponError, WeaponSnapshot,
};

use crate::config::SimConfig;
use crate::host::{ConsoleFov, ConsoleSpread};
use crate::presentation::{EventImpact, EventTally, SimEventConsumer};

/// Inventory item the simulated weapon is bound to.
const SIM_ITEM: ItemId = ItemId(1);

/// Outcome of one run.
#[derive(Clone, Debug)]
pub struct SimReport {
    pub weapon: String,
    pub frames: u32,
    pub ticks: u32,
    pub elapsed: f32,
    pub tally: EventTally,
    pub snapshot: WeaponSnapshot,
    pub stored_ammo: Option<u32>,
}

impl SimReport {
    pub fn summary(&self) -> String {
        format!(
            "{}: {:.2}s, {} frames, {} ticks | shots {} ({} bullets) | reloads {} started, {} filled, {} cancelled | ammo {}/{} (stored {}) | state {}{}",
            self.weapon,
            self.elapsed,
            self.frames,
            self.ticks,
            self.tally.shots,
            self.tally.bullets,
            self.tally.reloads_started,
            self.tally.reloads_filled,
            self.tally.reloads_cancelled,
            self.snapshot.ammo.current(),
            self.snapshot.ammo.max(),
            self.stored_ammo
                .map_or_else(|| "-".to_string(), |ammo| ammo.to_string()),
            self.snapshot.state,
            if self.snapshot.equipped {
                ""
            } else {
                ", unequipped"
            },
        )
    }
}

pub struct SimApp {
    config: SimConfig,
    weapon: Weapon,
    script: IntentScript,
    cadence: CadenceConfig,
    store: Rc<RefCell<MemoryAmmoStore>>,
    spread: Rc<RefCell<ConsoleSpread>>,
    fov: Rc<RefCell<ConsoleFov>>,
}

pub struct SimAppBuilder {
    config: SimConfig,
}

impl SimAppBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> Result<SimApp> {
        let config = self.config;

        let weapon_config = WeaponLoader::load_one(&config.catalog, &config.weapon)?;
        let script = ScriptLoader::load(&config.script)?;
        let cadence = match &config.cadence {
            Some(path) => CadenceLoader::load(path)?,
            None => CadenceConfig::default(),
        };

        let mut store = MemoryAmmoStore::new();
        if let Some(ammo) = config.initial_ammo {
            store = store.with_entry(SIM_ITEM, ammo);
        }
        let store = Rc::new(RefCell::new(store));
        let spread = Rc::new(RefCell::new(ConsoleSpread::default()));
        let fov = Rc::new(RefCell::new(ConsoleFov::default()));

        let mut builder = Weapon::builder(weapon_config)
            .ammo_store(Rc::clone(&store))
            .spread_modifier(Rc::clone(&spread))
            .fov_overrides(Rc::clone(&fov));
        if let Some(tag) = config.locomotion {
            builder = builder.locomotion(Rc::new(Cell::new(LocomotionState(tag))));
        }
        let weapon = builder
            .build()
            .map_err(|e| {
                anyhow::anyhow!(
                    "Failed to build weapon '{}' ({}): {}",
                    config.weapon,
                    e.error_code(),
                    e
                )
            })?;

        Ok(SimApp {
            config,
            weapon,
            script,
            cadence,
            store,
            spread,
            fov,
        })
    }
}

impl SimApp {
    pub fn builder(config: SimConfig) -> SimAppBuilder {
        SimAppBuilder::new(config)
    }

    /// Runs the weapon on both cadences until the duration elapses or the
    /// weapon is put away.
    ///
    /// Each frame first drains the fixed-step accumulator (ticks), then
    /// samples the script and runs the frame callback.
    pub fn run(self) -> Result<SimReport> {
        let SimApp {
            config,
            mut weapon,
            script,
            cadence,
            store,
            spread,
            fov,
        } = self;

        tracing::info!(
            "Simulating {} for {}s ({} Hz ticks, {} Hz frames)",
            weapon.name(),
            config.duration,
            cadence.tick_rate,
            cadence.frame_rate
        );

        let frame_dt = cadence.frame_delta();
        let tick_dt = cadence.tick_delta();
        let mut consumer = SimEventConsumer::new();
        let mut tracker = IntentTracker::new();
        let (mut frames, mut ticks) = (0u32, 0u32);
        let mut clock = 0.0f32;
        let mut accumulator = 0.0f32;

        weapon.equip(Some(SIM_ITEM));
        dispatch(&mut weapon, &mut consumer, clock);

        while clock < config.duration && weapon.is_equipped() {
            clock += frame_dt;
            accumulator += frame_dt;
            while accumulator >= tick_dt {
                weapon.tick(tick_dt);
                accumulator -= tick_dt;
                ticks += 1;
            }

            let intents = tracker.sample(script.held_at(clock));
            if weapon.controller() == ControllerKind::Automated {
                drive_automated(&mut weapon, intents.held);
            }
            weapon.frame(frame_dt, &intents);
            frames += 1;

            dispatch(&mut weapon, &mut consumer, clock);
        }

        {
            let (spread, fov) = (spread.borrow(), fov.borrow());
            tracing::debug!(
                "spread {:?} after {} updates, primary fov {:?} (active: {})",
                spread.current(),
                spread.updates(),
                fov.target(FovSlot::Primary),
                fov.is_active(FovSlot::Primary)
            );
        }

        let snapshot = weapon.snapshot();
        let stored_ammo = store.borrow().get(SIM_ITEM);
        Ok(SimReport {
            weapon: weapon.name().to_string(),
            frames,
            ticks,
            elapsed: clock,
            tally: consumer.into_tally(),
            snapshot,
            stored_ammo,
        })
    }
}

/// Automated weapons ignore polled input; the script stands in for an AI
/// that fires through the explicit API.
fn drive_automated(weapon: &mut Weapon, held: Intents) {
    weapon.set_aim_intent(held.contains(Intents::AIM));
    if held.contains(Intents::FIRE) && weapon.gate().can_attack() {
        if let Err(e) = weapon.try_attack() {
            tracing::debug!("automated attack rejected ({}): {}", e.error_code(), e);
        }
    }
}

fn dispatch(weapon: &mut Weapon, consumer: &mut SimEventConsumer, clock: f32) {
    for event in weapon.drain_events() {
        if consumer.on_event(clock, &event) == EventImpact::Unequip {
            if let Err(e) = weapon.unequip() {
                tracing::warn!(
                    "unequip refused ({}, {}): {}",
                    e.error_code(),
                    e.severity().as_str(),
                    e
                );
            }
        }
    }
    // Unequipping queues its own events.
    for event in weapon.drain_events() {
        consumer.on_event(clock, &event);
    }
}
