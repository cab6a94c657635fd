//! Enemy and powerup placement
//!
//! Enemy positions are drawn uniformly inside the arena margins and
//! resampled while too close to the player, with a bounded attempt count so
//! a crowded board can never loop forever.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Enemy, GameState, Powerup, PowerupKind};
use crate::consts::*;
use crate::distance;

/// Enemies for a given session level: `min(3 + level/3, 15)`
pub fn enemy_count(level: u32) -> u32 {
    (3 + level / 3).min(15)
}

/// Enemy tier for a given session level: `min(1 + level/5, 10)`
pub fn enemy_level(session_level: u32) -> u32 {
    (1 + session_level / 5).min(ENEMY_MAX_LEVEL)
}

/// Replace the enemy collection with a fresh set for the current level
pub fn spawn_enemies(state: &mut GameState) {
    let count = enemy_count(state.stats.level);
    let tier = enemy_level(state.stats.level);
    let player_pos = state.player.pos;

    state.enemies.clear();
    for _ in 0..count {
        let pos = place_enemy(&mut state.rng, state.width, state.height, player_pos);
        state.enemies.push(Enemy::new(pos, tier));
    }
    log::debug!("spawned {} tier-{} enemies for level {}", count, tier, state.stats.level);
}

/// Sample a spawn position, rejecting anything within the player exclusion
/// radius. After `SPAWN_MAX_ATTEMPTS` failed draws the last sample is
/// accepted regardless, so a small arena degrades instead of hanging.
pub fn place_enemy(rng: &mut Pcg32, width: f32, height: f32, player_pos: Vec2) -> Vec2 {
    let x_hi = (width - SPAWN_MARGIN).max(SPAWN_MARGIN + 1.0);
    let y_hi = (height - SPAWN_MARGIN).max(SPAWN_MARGIN + 1.0);

    let mut pos = Vec2::ZERO;
    for attempt in 0..SPAWN_MAX_ATTEMPTS {
        pos = Vec2::new(
            rng.random_range(SPAWN_MARGIN..x_hi),
            rng.random_range(SPAWN_MARGIN..y_hi),
        );
        if distance(pos, player_pos) >= SPAWN_EXCLUSION_RADIUS {
            return pos;
        }
        if attempt + 1 == SPAWN_MAX_ATTEMPTS {
            log::debug!("spawn rejection exhausted, accepting {:?}", pos);
        }
    }
    pos
}

/// Roll the drop chance for a dead enemy and maybe leave a pickup behind
pub fn maybe_drop_powerup(state: &mut GameState, pos: Vec2) {
    if !state.rng.random_bool(POWERUP_DROP_CHANCE) {
        return;
    }
    let kind = PowerupKind::ALL[state.rng.random_range(0..PowerupKind::ALL.len())];
    state.powerups.push(Powerup::new(pos, kind));
}
