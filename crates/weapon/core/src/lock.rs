//! Counting lock that vetoes unequipping.
//!
//! Any number of holders may keep the lock engaged; it is released when the
//! last one lets go. Holding is proven by a [`LockToken`], which can only be
//! obtained from [`UnequipLock::acquire`] and is consumed by
//! [`UnequipLock::release`], so only an acquirer can release its share.

/// Proof of one held share of an [`UnequipLock`].
///
/// Neither `Clone` nor `Copy`: dropping a token without releasing it leaks
/// the share and keeps the lock engaged.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a dropped token keeps the lock engaged forever"]
pub struct LockToken {
    _private: (),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnequipLock {
    holders: u32,
}

impl UnequipLock {
    pub const fn new() -> Self {
        Self { holders: 0 }
    }

    pub fn acquire(&mut self) -> LockToken {
        self.holders += 1;
        LockToken { _private: () }
    }

    pub fn release(&mut self, token: LockToken) {
        let LockToken { _private: () } = token;
        self.holders = self.holders.saturating_sub(1);
    }

    pub const fn is_locked(&self) -> bool {
        self.holders > 0
    }

    pub const fn holders(&self) -> u32 {
        self.holders
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_holders() {
        let mut lock = UnequipLock::new();
        assert!(!lock.is_locked());

        let first = lock.acquire();
        let second = lock.acquire();
        assert_eq!(lock.holders(), 2);

        lock.release(first);
        assert!(lock.is_locked());
        lock.release(second);
        assert!(!lock.is_locked());
    }
}
