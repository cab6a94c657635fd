//! Collision resolution
//!
//! Runs once per advance cycle, after entity updates. All tests are circle
//! overlaps on center distance vs. summed radii. Nothing is removed here:
//! bullets are marked spent, enemies drop to zero health, powerups are
//! marked collected, and a single compaction pass at end-of-frame prunes
//! them all, so there is no index-shifting during iteration.

use super::spawn;
use super::state::{GameState, ParticleKind, PowerupKind};
use crate::circles_overlap;
use crate::consts::*;

/// Resolve all cross-entity interactions for this frame
pub fn resolve(state: &mut GameState) {
    bullets_vs_enemies(state);
    player_vs_enemies(state);
    player_vs_powerups(state);
}

/// Each live bullet damages the first live enemy it overlaps, then stops
/// scanning: at most one enemy damaged per bullet per frame.
fn bullets_vs_enemies(state: &mut GameState) {
    for bi in 0..state.bullets.len() {
        if state.bullets[bi].expired() {
            continue;
        }
        let (bullet_pos, bullet_radius, bullet_damage) = {
            let b = &state.bullets[bi];
            (b.pos, b.radius, b.damage)
        };

        for ei in 0..state.enemies.len() {
            if state.enemies[ei].dead() {
                continue;
            }
            let (enemy_pos, enemy_radius) = (state.enemies[ei].pos, state.enemies[ei].radius);
            if !circles_overlap(bullet_pos, bullet_radius, enemy_pos, enemy_radius) {
                continue;
            }

            state.enemies[ei].health -= bullet_damage;
            state.bullets[bi].spent = true;
            state.spawn_particles(enemy_pos, ParticleKind::Hit, 3);

            if state.enemies[ei].dead() {
                let level = state.enemies[ei].level;
                state.stats.record_kill(level);
                spawn::maybe_drop_powerup(state, enemy_pos);
                state.spawn_particles(enemy_pos, ParticleKind::Explosion, 8);
            }
            break;
        }
    }
}

/// Every live enemy overlapping the player applies its contact damage
/// independently; there is no per-frame cap on the player side. A hit
/// resets the kill streak. An active shield absorbs the contact entirely.
fn player_vs_enemies(state: &mut GameState) {
    let (player_pos, player_radius) = (state.player.pos, state.player.radius);

    for ei in 0..state.enemies.len() {
        if state.enemies[ei].dead() {
            continue;
        }
        if !circles_overlap(
            player_pos,
            player_radius,
            state.enemies[ei].pos,
            state.enemies[ei].radius,
        ) {
            continue;
        }
        if state.effects.shield_active() {
            continue;
        }

        let damage = state.enemies[ei].contact_damage();
        state.player.take_damage(damage);
        state.stats.current_streak = 0;
        state.spawn_particles(player_pos, ParticleKind::Damage, 5);
        state.emit_shake(8.0, 200.0);
    }
}

/// Collect every uncollected powerup the player overlaps
fn player_vs_powerups(state: &mut GameState) {
    let (player_pos, player_radius) = (state.player.pos, state.player.radius);

    for pi in 0..state.powerups.len() {
        if state.powerups[pi].expired() {
            continue;
        }
        if !circles_overlap(
            player_pos,
            player_radius,
            state.powerups[pi].pos,
            state.powerups[pi].radius,
        ) {
            continue;
        }

        state.powerups[pi].collected = true;
        let (pos, kind) = (state.powerups[pi].pos, state.powerups[pi].kind);
        apply_powerup(state, kind);
        state.spawn_particles(pos, ParticleKind::Pickup, 6);
    }
}

fn apply_powerup(state: &mut GameState, kind: PowerupKind) {
    match kind {
        PowerupKind::Health => state.player.heal(25.0),
        PowerupKind::Energy => state.player.restore_energy(50.0),
        PowerupKind::Weapon => state.effects.weapon_boost = WEAPON_BOOST_DURATION,
        PowerupKind::Shield => state.effects.shield = SHIELD_DURATION,
        PowerupKind::Score => state.stats.score += 250,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bullet, Enemy, Powerup};
    use glam::Vec2;

    fn playing_state() -> GameState {
        let mut state = GameState::new(5);
        state.start_game();
        state.enemies.clear();
        state.bullets.clear();
        state.powerups.clear();
        state
    }

    #[test]
    fn bullet_damages_at_most_one_enemy() {
        let mut state = playing_state();
        let spot = Vec2::new(200.0, 200.0);
        state.enemies.push(Enemy::new(spot, 5));
        state.enemies.push(Enemy::new(spot + Vec2::new(4.0, 0.0), 5));
        state
            .bullets
            .push(Bullet::new(spot, Vec2::ZERO, 3.0, 4.0));

        resolve(&mut state);

        let damaged: Vec<f32> = state.enemies.iter().map(|e| e.health).collect();
        assert_eq!(damaged.iter().filter(|&&h| h < 10.0).count(), 1);
        assert!(state.bullets[0].spent);
    }

    #[test]
    fn kill_awards_score_and_streak() {
        let mut state = playing_state();
        let spot = Vec2::new(200.0, 200.0);
        state.enemies.push(Enemy::new(spot, 2));
        // Enough damage to finish a 4-health enemy in one hit
        state.bullets.push(Bullet::new(spot, Vec2::ZERO, 5.0, 4.0));

        resolve(&mut state);

        assert!(state.enemies[0].dead());
        assert_eq!(state.stats.enemies_killed, 1);
        assert_eq!(state.stats.current_streak, 1);
        assert_eq!(state.stats.best_streak, 1);
        assert_eq!(state.stats.score, 200);
    }

    #[test]
    fn surviving_enemy_awards_nothing() {
        let mut state = playing_state();
        let spot = Vec2::new(200.0, 200.0);
        state.enemies.push(Enemy::new(spot, 5));
        state.bullets.push(Bullet::new(spot, Vec2::ZERO, 1.0, 4.0));

        resolve(&mut state);

        assert!(!state.enemies[0].dead());
        assert_eq!(state.stats.enemies_killed, 0);
        assert_eq!(state.stats.score, 0);
    }

    #[test]
    fn overlapping_enemies_each_damage_the_player() {
        let mut state = playing_state();
        state.player.health = 10.0;
        // Tier 5: contact damage 5 + 2*5 = 15 each
        state.enemies.push(Enemy::new(state.player.pos, 5));
        state.enemies.push(Enemy::new(state.player.pos, 5));

        resolve(&mut state);

        // 10 - 15 - 15 clamps at zero rather than going negative
        assert_eq!(state.player.health, 0.0);
    }

    #[test]
    fn player_hit_resets_streak_and_shakes() {
        let mut state = playing_state();
        state.stats.current_streak = 4;
        state.stats.best_streak = 4;
        state.enemies.push(Enemy::new(state.player.pos, 1));

        resolve(&mut state);

        assert_eq!(state.stats.current_streak, 0);
        assert_eq!(state.stats.best_streak, 4);
        assert!(!state.drain_events().is_empty());
    }

    #[test]
    fn shield_absorbs_contact() {
        let mut state = playing_state();
        state.effects.shield = 2.0;
        state.stats.current_streak = 3;
        state.enemies.push(Enemy::new(state.player.pos, 5));

        resolve(&mut state);

        assert_eq!(state.player.health, 100.0);
        assert_eq!(state.stats.current_streak, 3);
    }

    #[test]
    fn dead_enemy_cannot_hurt_the_player() {
        let mut state = playing_state();
        // Overlaps both the bullet and the player; dies to the bullet first
        state.enemies.push(Enemy::new(state.player.pos, 1));
        state
            .bullets
            .push(Bullet::new(state.player.pos, Vec2::ZERO, 5.0, 4.0));

        resolve(&mut state);

        assert!(state.enemies[0].dead());
        assert_eq!(state.player.health, 100.0);
    }

    #[test]
    fn powerup_effects_apply_on_pickup() {
        let mut state = playing_state();
        state.player.health = 40.0;
        state.player.energy = 10.0;
        state.powerups.push(Powerup::new(state.player.pos, PowerupKind::Health));
        state.powerups.push(Powerup::new(state.player.pos, PowerupKind::Energy));
        state.powerups.push(Powerup::new(state.player.pos, PowerupKind::Score));
        state.powerups.push(Powerup::new(state.player.pos, PowerupKind::Shield));
        state.powerups.push(Powerup::new(state.player.pos, PowerupKind::Weapon));

        resolve(&mut state);

        assert_eq!(state.player.health, 65.0);
        assert_eq!(state.player.energy, 60.0);
        assert_eq!(state.stats.score, 250);
        assert!(state.effects.shield_active());
        assert!(state.effects.weapon_boost_active());
        assert!(state.powerups.iter().all(|p| p.collected));
    }

    #[test]
    fn distant_powerup_stays_uncollected() {
        let mut state = playing_state();
        state
            .powerups
            .push(Powerup::new(state.player.pos + Vec2::new(300.0, 0.0), PowerupKind::Health));

        resolve(&mut state);

        assert!(!state.powerups[0].collected);
    }
}
