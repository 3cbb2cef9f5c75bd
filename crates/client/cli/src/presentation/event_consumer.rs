//! Logs weapon events and keeps per-run tallies.
use weapon_core::WeaponEvent;

/// What the host has to do after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventImpact {
    None,
    /// The weapon asked to be put away.
    Unequip,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventTally {
    pub shots: u32,
    pub bullets: u32,
    pub reloads_started: u32,
    pub reloads_filled: u32,
    pub reloads_cancelled: u32,
    pub aim_cues: u32,
    pub transitions: u32,
}

#[derive(Debug, Default)]
pub struct SimEventConsumer {
    tally: EventTally,
}

impl SimEventConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_tally(self) -> EventTally {
        self.tally
    }

    pub fn on_event(&mut self, clock: f32, event: &WeaponEvent) -> EventImpact {
        match event {
            WeaponEvent::Equipped { ammo, max_ammo } => {
                tracing::info!("[{:6.3}] equipped ({}/{})", clock, ammo, max_ammo);
            }
            WeaponEvent::Unequipped => {
                tracing::info!("[{:6.3}] unequipped", clock);
            }
            WeaponEvent::StateChanged { from, to } => {
                self.tally.transitions += 1;
                tracing::debug!("[{:6.3}] {} -> {}", clock, from, to);
            }
            WeaponEvent::Fired {
                bullets,
                ammo_remaining,
            } => {
                self.tally.shots += 1;
                self.tally.bullets += bullets;
                tracing::info!(
                    "[{:6.3}] fired {} bullet(s), {} left",
                    clock,
                    bullets,
                    ammo_remaining
                );
            }
            WeaponEvent::ReloadStarted {
                total_time,
                fill_time,
            } => {
                self.tally.reloads_started += 1;
                tracing::info!(
                    "[{:6.3}] reload started ({}s, fill at {}s)",
                    clock,
                    total_time,
                    fill_time
                );
            }
            WeaponEvent::MagazineFilled => {
                self.tally.reloads_filled += 1;
                tracing::info!("[{:6.3}] magazine filled", clock);
            }
            WeaponEvent::ReloadCancelled => {
                self.tally.reloads_cancelled += 1;
                tracing::warn!("[{:6.3}] reload cancelled before the fill point", clock);
            }
            WeaponEvent::AmmoChanged { current, max } => {
                tracing::debug!("[{:6.3}] ammo {}/{}", clock, current, max);
            }
            WeaponEvent::AimCue { cue, start_weight } => {
                self.tally.aim_cues += 1;
                tracing::debug!("[{:6.3}] aim cue {} from {:.2}", clock, cue, start_weight);
            }
            WeaponEvent::UnequipRequested => {
                tracing::info!("[{:6.3}] unequip requested", clock);
                return EventImpact::Unequip;
            }
        }
        EventImpact::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallies_and_reacts() {
        let mut consumer = SimEventConsumer::new();
        let fired = WeaponEvent::Fired {
            bullets: 8,
            ammo_remaining: 5,
        };
        assert_eq!(consumer.on_event(0.0, &fired), EventImpact::None);
        assert_eq!(consumer.on_event(0.1, &fired), EventImpact::None);
        assert_eq!(
            consumer.on_event(0.2, &WeaponEvent::UnequipRequested),
            EventImpact::Unequip
        );

        let tally = consumer.into_tally();
        assert_eq!(tally.shots, 2);
        assert_eq!(tally.bullets, 16);
    }
}
