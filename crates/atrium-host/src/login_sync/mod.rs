//! Login-Sync Coordinator.
//!
//! Feeds every landed URL to a per-surface [`LoginTracker`]. When one fires,
//! a host-wide restart is scheduled after a settle delay. A single
//! [`RestartGuard`] is taken at scheduling time and only released a
//! cool-down after the restart finishes, so detections arriving from other
//! surfaces in the meantime are absorbed.
//!
//! Time is passed in explicitly; the event loop calls [`poll`] with the
//! current `Instant` and sleeps until [`next_deadline`].
//!
//! [`poll`]: LoginSyncCoordinator::poll
//! [`next_deadline`]: LoginSyncCoordinator::next_deadline


use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use atrium_config::AtriumConfig;
use atrium_navigation::{LoginPages, LoginState, LoginTracker};

/// Host-wide flag: at most one restart sequence at a time.
#[derive(Debug, Default)]
pub struct RestartGuard {
    held: bool,
}

impl RestartGuard {
    /// Take the guard. Returns `false` if it is already held.
    pub fn try_acquire(&mut self) -> bool {
        if self.held {
            return false;
        }
        self.held = true;
        true
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncTimer {
    /// Settle delay elapsed: run the restart.
    Restart,
    /// Cool-down after a restart elapsed: drop the guard.
    ReleaseGuard,
}

pub struct LoginSyncCoordinator {
    enabled: bool,
    pages: LoginPages,
    settle_delay: Duration,
    cooldown: Duration,
    trackers: HashMap<String, LoginTracker>,
    guard: RestartGuard,
    timers: Vec<(Instant, SyncTimer)>,
}

impl LoginSyncCoordinator {
    pub fn new(pages: LoginPages, settle_delay: Duration, cooldown: Duration) -> Self {
        Self {
            enabled: true,
            pages,
            settle_delay,
            cooldown,
            trackers: HashMap::new(),
            guard: RestartGuard::default(),
            timers: Vec::new(),
        }
    }

    pub fn from_config(config: &AtriumConfig) -> Self {
        let sync = &config.login_sync;
        let mut coordinator = Self::new(
            LoginPages::from_config(config),
            Duration::from_millis(sync.settle_delay_ms),
            Duration::from_millis(sync.cooldown_ms),
        );
        coordinator.enabled = sync.enabled;
        coordinator
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn guard(&self) -> &RestartGuard {
        &self.guard
    }

    pub fn state_of(&self, surface: &str) -> LoginState {
        self.trackers
            .get(surface)
            .map(LoginTracker::state)
            .unwrap_or_default()
    }

    /// Whether a restart is scheduled and has not fired yet.
    pub fn restart_pending(&self) -> bool {
        self.timers.iter().any(|(_, t)| *t == SyncTimer::Restart)
    }

    /// Feed a landed URL for `surface`. Returns `true` when this call
    /// scheduled a restart.
    pub fn observe(&mut self, surface: &str, url: &str, now: Instant) -> bool {
        if !self.enabled {
            return false;
        }
        let kind = self.pages.kind_of(url);
        let tracker = self.trackers.entry(surface.to_string()).or_default();
        let before = tracker.state();
        let fired = tracker.observe(kind);
        if before != tracker.state() {
            debug!(surface = %surface, from = ?before, to = ?tracker.state(), "login state changed");
        }
        if !fired {
            return false;
        }

        if !self.guard.try_acquire() {
            debug!(surface = %surface, "login detected, restart already in progress");
            return false;
        }
        let due = now + self.settle_delay;
        self.timers.push((due, SyncTimer::Restart));
        info!(
            surface = %surface,
            settle_ms = self.settle_delay.as_millis() as u64,
            "login detected, restart scheduled"
        );
        true
    }

    /// Fire every timer due at `now`. Returns `true` if the scheduled
    /// restart should run now.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut restart = false;
        let mut remaining = Vec::with_capacity(self.timers.len());
        for (due, timer) in std::mem::take(&mut self.timers) {
            if due > now {
                remaining.push((due, timer));
                continue;
            }
            match timer {
                SyncTimer::Restart => restart = true,
                SyncTimer::ReleaseGuard => {
                    if self.guard.is_held() {
                        self.guard.release();
                        debug!("restart guard released");
                    }
                }
            }
        }
        self.timers = remaining;
        restart
    }

    /// Record that the restart sequence finished (or was skipped). Trackers
    /// start over and the guard is released after the cool-down.
    pub fn restart_finished(&mut self, now: Instant) {
        self.trackers.clear();
        self.timers.push((now + self.cooldown, SyncTimer::ReleaseGuard));
    }

    /// Drop the tracker of a surface that no longer exists.
    pub fn forget(&mut self, surface: &str) {
        self.trackers.remove(surface);
    }

    /// Drop every tracker (all surfaces were recreated).
    pub fn reset_trackers(&mut self) {
        self.trackers.clear();
    }

    /// Earliest pending timer, for the event loop's wake-up.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|(due, _)| *due).min()
    }
}
