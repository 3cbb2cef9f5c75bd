//! Console stand-ins for the engine-side collaborators.
//!
//! They record what the weapon publishes and log changes, so a headless run
//! shows the accuracy and FOV coupling without a renderer.
use std::collections::HashMap;

use weapon_core::{FovOverrides, FovSlot, SpreadModifier};

#[derive(Debug, Default)]
pub struct ConsoleSpread {
    current: Option<f32>,
    updates: usize,
}

impl ConsoleSpread {
    pub fn current(&self) -> Option<f32> {
        self.current
    }

    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl SpreadModifier for ConsoleSpread {
    fn set_multiplier(&mut self, value: f32) {
        self.updates += 1;
        if self.current != Some(value) {
            tracing::trace!("spread multiplier {:.3}", value);
            self.current = Some(value);
        }
    }
}

#[derive(Debug, Default)]
pub struct ConsoleFov {
    targets: HashMap<FovSlot, f32>,
    active: HashMap<FovSlot, bool>,
}

impl ConsoleFov {
    pub fn target(&self, slot: FovSlot) -> Option<f32> {
        self.targets.get(&slot).copied()
    }

    pub fn is_active(&self, slot: FovSlot) -> bool {
        self.active.get(&slot).copied().unwrap_or(false)
    }
}

impl FovOverrides for ConsoleFov {
    fn register(&mut self, slot: FovSlot, target_fov: f32) {
        tracing::debug!("{} fov override registered at {}", slot, target_fov);
        self.targets.insert(slot, target_fov);
    }

    fn set_active(&mut self, slot: FovSlot, active: bool) {
        let previous = self.active.insert(slot, active);
        if previous != Some(active) {
            tracing::debug!("{} fov override active={}", slot, active);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_latest_values() {
        let mut spread = ConsoleSpread::default();
        spread.set_multiplier(1.0);
        spread.set_multiplier(0.5);
        assert_eq!(spread.current(), Some(0.5));
        assert_eq!(spread.updates(), 2);

        let mut fov = ConsoleFov::default();
        fov.register(FovSlot::Primary, 70.0);
        fov.set_active(FovSlot::Primary, true);
        assert_eq!(fov.target(FovSlot::Primary), Some(70.0));
        assert!(fov.is_active(FovSlot::Primary));
        assert!(!fov.is_active(FovSlot::ViewModel));
    }
}
