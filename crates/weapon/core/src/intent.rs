//! Polled player intents.
//!
//! Hosts translate their input devices into [`Intents`] once per frame. The
//! weapon asks two questions per intent: is it held (level) and was it
//! pressed this frame (edge).

use bitflags::bitflags;

bitflags! {
    /// Logical requests a weapon understands.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Intents: u8 {
        const FIRE    = 1 << 0;
        const RELOAD  = 1 << 1;
        const AIM     = 1 << 2;
        const UNEQUIP = 1 << 3;
    }
}

impl Intents {
    /// Intents that start a discrete action when pressed.
    pub const ACTIONS: Self = Self::FIRE.union(Self::RELOAD).union(Self::UNEQUIP);
}

/// Level and edge queries the weapon polls inside its frame callback.
pub trait IntentSource {
    /// Intents currently held down.
    fn held(&self) -> Intents;

    /// Intents that went down this frame.
    fn pressed(&self) -> Intents;

    fn is_held(&self, intent: Intents) -> bool {
        self.held().contains(intent)
    }

    fn was_pressed(&self, intent: Intents) -> bool {
        self.pressed().contains(intent)
    }
}

/// One frame's worth of intents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntentSnapshot {
    pub held: Intents,
    pub pressed: Intents,
}

impl IntentSnapshot {
    /// No input at all.
    pub const NONE: Self = Self {
        held: Intents::empty(),
        pressed: Intents::empty(),
    };

    pub fn new(held: Intents, pressed: Intents) -> Self {
        Self { held, pressed }
    }

    /// Held and freshly pressed on the same frame.
    pub fn press(intents: Intents) -> Self {
        Self::new(intents, intents)
    }

    /// Held without a new press.
    pub fn hold(intents: Intents) -> Self {
        Self::new(intents, Intents::empty())
    }
}

impl IntentSource for IntentSnapshot {
    fn held(&self) -> Intents {
        self.held
    }

    fn pressed(&self) -> Intents {
        self.pressed
    }
}

/// Derives edges from level-only input by remembering the previous frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntentTracker {
    previous: Intents,
}

impl IntentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, held: Intents) -> IntentSnapshot {
        let pressed = held.difference(self.previous);
        self.previous = held;
        IntentSnapshot::new(held, pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_reports_edges_once() {
        let mut tracker = IntentTracker::new();

        let first = tracker.sample(Intents::FIRE);
        assert!(first.was_pressed(Intents::FIRE));

        let second = tracker.sample(Intents::FIRE | Intents::AIM);
        assert!(second.is_held(Intents::FIRE));
        assert!(!second.was_pressed(Intents::FIRE));
        assert!(second.was_pressed(Intents::AIM));

        let released = tracker.sample(Intents::empty());
        assert_eq!(released, IntentSnapshot::NONE);

        assert!(tracker.sample(Intents::FIRE).was_pressed(Intents::FIRE));
    }

    #[test]
    fn actions_exclude_aim() {
        assert!(!Intents::ACTIONS.contains(Intents::AIM));
        assert!(Intents::ACTIONS.contains(Intents::FIRE | Intents::RELOAD | Intents::UNEQUIP));
    }
}
