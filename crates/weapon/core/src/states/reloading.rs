use super::{StateRequest, WeaponCore, WeaponState, WeaponStateKind};
use crate::config::FillPolicy;
use crate::events::WeaponEvent;
use crate::lock::LockToken;
use crate::reload::{ReloadProfile, ReloadProfiles};
use crate::timer::Timer;

/// Timed reload.
///
/// The magazine is committed in `end`, and only if the timer crossed the
/// fill point. The unequip lock is held for the whole activation.
#[derive(Debug)]
pub struct ReloadingState {
    profiles: ReloadProfiles,
    fill_policy: FillPolicy,
    timer: Timer,
    profile: ReloadProfile,
    fill_remain: f32,
    filled: bool,
    lock: Option<LockToken>,
}

impl ReloadingState {
    pub fn new(profiles: ReloadProfiles, fill_policy: FillPolicy) -> Self {
        let profile = profiles.default_profile();
        Self {
            profiles,
            fill_policy,
            timer: Timer::new(),
            profile,
            fill_remain: 0.0,
            filled: false,
            lock: None,
        }
    }

    pub fn profiles(&self) -> &ReloadProfiles {
        &self.profiles
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Profile chosen by the latest `begin`.
    pub fn active_profile(&self) -> ReloadProfile {
        self.profile
    }

    /// Remaining time at which the magazine counts as filled.
    pub fn fill_remain(&self) -> f32 {
        self.fill_remain
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }
}

impl WeaponState for ReloadingState {
    fn kind(&self) -> WeaponStateKind {
        WeaponStateKind::Reloading
    }

    fn begin(&mut self, core: &mut WeaponCore) {
        self.profile = self.profiles.find_profile(core.ammo.current());
        self.timer.reset(self.profile.total_time);
        self.fill_remain = self.timer.max() - self.profile.fill_time;
        self.filled = false;

        if let Some(stale) = self.lock.take() {
            core.unequip_lock.release(stale);
        }
        self.lock = Some(core.unequip_lock.acquire());

        tracing::debug!(
            "reload from {}/{}: total {}s, fill at {}s",
            core.ammo.current(),
            core.ammo.max(),
            self.profile.total_time,
            self.profile.fill_time
        );
        core.emit(WeaponEvent::ReloadStarted {
            total_time: self.profile.total_time,
            fill_time: self.profile.fill_time,
        });
    }

    fn end(&mut self, core: &mut WeaponCore) {
        if self.filled {
            core.fill_magazine(self.fill_policy);
        } else {
            tracing::debug!(
                "reload interrupted with {}s left, magazine unchanged",
                self.timer.current()
            );
            core.emit(WeaponEvent::ReloadCancelled);
        }

        if let Some(token) = self.lock.take() {
            core.unequip_lock.release(token);
        }
    }

    fn tick(&mut self, core: &mut WeaponCore, dt: f32) -> Option<StateRequest> {
        let ended = self.timer.tick(dt);
        tracing::trace!("reload timer {}/{}", self.timer.current(), self.timer.max());

        if !self.filled && self.timer.has_elapsed(self.profile.fill_time) {
            self.filled = true;
            core.emit(WeaponEvent::MagazineFilled);
        }

        ended.then(StateRequest::idle)
    }
}
