//! Deferred timed effects
//!
//! Side effects that fire on a later frame (the level-transition delay) are
//! stored as pending events keyed by fire time and session epoch. An event
//! whose epoch no longer matches the session was scheduled before a restart
//! and is discarded instead of firing.

/// What a pending timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimedEffect {
    /// End the level-complete rest period and start the next level
    AdvanceLevel,
}

/// A scheduled effect waiting for the game clock to catch up
#[derive(Debug, Clone, Copy)]
pub struct PendingTimer {
    /// Game-clock seconds at which the effect fires
    pub fire_at: f64,
    pub effect: TimedEffect,
    /// Session epoch at scheduling time
    pub epoch: u32,
}

/// Schedule an effect `delay` seconds from `now`
pub fn schedule(timers: &mut Vec<PendingTimer>, effect: TimedEffect, now: f64, delay: f32, epoch: u32) {
    timers.push(PendingTimer {
        fire_at: now + delay as f64,
        effect,
        epoch,
    });
}

/// Remove every timer that is due (or stale) and return the effects that
/// should actually fire. Timers scheduled under a different epoch are
/// dropped silently apart from a debug log line.
pub fn take_due(timers: &mut Vec<PendingTimer>, now: f64, epoch: u32) -> Vec<TimedEffect> {
    let mut due = Vec::new();
    timers.retain(|timer| {
        if timer.epoch != epoch {
            log::debug!("discarding stale timer {:?} (epoch {} != {})", timer.effect, timer.epoch, epoch);
            return false;
        }
        if timer.fire_at <= now {
            due.push(timer.effect);
            return false;
        }
        true
    });
    due
}
