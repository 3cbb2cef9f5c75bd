//! Magazine bookkeeping.

use crate::config::FillPolicy;
use crate::error::AmmoError;

/// Current and maximum round count.
///
/// Every mutator clamps, so `current <= max` holds at every observation
/// point and the count can never underflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmmoLedger {
    current: u32,
    max: u32,
}

impl AmmoLedger {
    /// A full magazine of `max` rounds.
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// A magazine holding `current` rounds, clamped to `max`.
    pub fn new(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn max(&self) -> u32 {
        self.max
    }

    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub const fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Rounds needed to top up.
    pub const fn missing(&self) -> u32 {
        self.max - self.current
    }

    /// Takes one round. Returns the count left.
    pub fn consume(&mut self) -> Result<u32, AmmoError> {
        self.current = self.current.checked_sub(1).ok_or(AmmoError::Empty)?;
        Ok(self.current)
    }

    /// Applies a completed reload. Returns the new count.
    pub fn fill(&mut self, policy: FillPolicy) -> u32 {
        self.current = match policy {
            FillPolicy::Full => self.max,
            FillPolicy::Partial { rounds } => self.current.saturating_add(rounds).min(self.max),
        };
        self.current
    }

    /// Overwrites the count, clamped to `max`. Returns the stored value.
    pub fn set(&mut self, current: u32) -> u32 {
        self.current = current.min(self.max);
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_stops_at_zero() {
        let mut ammo = AmmoLedger::new(2, 10);
        assert_eq!(ammo.consume(), Ok(1));
        assert_eq!(ammo.consume(), Ok(0));
        assert_eq!(ammo.consume(), Err(AmmoError::Empty));
        assert_eq!(ammo.current(), 0);
        assert!(ammo.is_empty());
    }

    #[test]
    fn construction_and_set_clamp() {
        let mut ammo = AmmoLedger::new(40, 30);
        assert_eq!(ammo.current(), 30);
        assert!(ammo.is_full());
        assert_eq!(ammo.set(99), 30);
        assert_eq!(ammo.set(4), 4);
        assert_eq!(ammo.missing(), 26);
    }

    #[test]
    fn fill_policies() {
        let mut ammo = AmmoLedger::new(1, 8);
        assert_eq!(ammo.fill(FillPolicy::Partial { rounds: 3 }), 4);
        assert_eq!(ammo.fill(FillPolicy::Partial { rounds: 10 }), 8);

        ammo.set(0);
        assert_eq!(ammo.fill(FillPolicy::Full), 8);
        assert_eq!(AmmoLedger::full(8), ammo);
    }
}
