//! Per-frame advance-and-resolve cycle
//!
//! One call to [`tick`] is one frame's worth of simulation: apply input,
//! advance every entity, resolve collisions, compact the dead, and evaluate
//! terminal conditions. Outside the advancing phases the cycle is a no-op
//! (LevelComplete still runs the clock so its deferred transition can fire).

use glam::Vec2;

use super::collision;
use super::spawn;
use super::state::{Bullet, GamePhase, GameState, ParticleKind, Weapon};
use super::timer::{self, TimedEffect};
use crate::consts::*;

/// Input intents for a single tick, source-agnostic
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement intent, components in [-1, 1]
    pub move_dir: Vec2,
    /// Aim point in arena coordinates (cursor or touch)
    pub aim: Option<Vec2>,
    /// Fire the current weapon
    pub fire: bool,
    /// Trigger an echo pulse
    pub echo: bool,
    /// Switch weapons
    pub weapon: Option<Weapon>,
    /// Toggle pause
    pub pause: bool,
    /// Start a new run (from the start screen or after a game over)
    pub start: bool,
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.start && matches!(state.phase, GamePhase::Start | GamePhase::GameOver) {
        state.start_game();
        return;
    }

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Start | GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::LevelComplete => {
            // Clock keeps running so the deferred transition comes due;
            // only cosmetic particles animate in the meantime.
            state.stats.time_played += dt as f64;
            for particle in state.particles.iter_mut() {
                particle.update(dt);
            }
            state.particles.retain(|p| p.life > 0.0);
            drain_timers(state);
            return;
        }
        GamePhase::Playing => {}
    }

    state.stats.time_played += dt as f64;

    if let Some(weapon) = input.weapon {
        state.current_weapon = weapon;
    }

    state.player.update(dt, input.move_dir, state.width, state.height);
    if input.echo {
        try_echo(state);
    }
    if input.fire {
        try_fire(state, input.aim);
    }

    let player_pos = state.player.pos;
    let (width, height, difficulty) = (state.width, state.height, state.difficulty);
    for enemy in state.enemies.iter_mut() {
        enemy.update(dt, player_pos, difficulty, width, height);
    }
    for bullet in state.bullets.iter_mut() {
        bullet.update(dt);
    }
    for particle in state.particles.iter_mut() {
        particle.update(dt);
    }
    for powerup in state.powerups.iter_mut() {
        powerup.update(dt);
    }

    collision::resolve(state);
    state.effects.tick(dt);

    // Single end-of-frame compaction of everything marked or expired
    state.bullets.retain(|b| !b.expired());
    state.particles.retain(|p| p.life > 0.0);
    state.powerups.retain(|p| !p.expired());
    state.enemies.retain(|e| !e.dead());

    state.stats.health = state.player.health;
    state.stats.energy = state.player.energy;
    state.stats.recompute_accuracy();

    // An emptied board outranks a dead player in the same cycle
    if state.enemies.is_empty() {
        level_complete(state);
    } else if state.player.health <= 0.0 {
        game_over(state);
    }
}

/// Fire the current weapon if the cooldown has lapsed and energy allows
fn try_fire(state: &mut GameState, aim: Option<Vec2>) {
    if state.player.fire_cooldown > 0.0 {
        return;
    }
    let spec = state.current_weapon.spec();
    if !state.player.spend_energy(spec.energy_cost) {
        return;
    }
    state.player.fire_cooldown = spec.cooldown;

    let dir = aim
        .map(|target| (target - state.player.pos).normalize_or_zero())
        .filter(|d| d.length_squared() > 0.0)
        .unwrap_or(Vec2::X);
    let damage = if state.effects.weapon_boost_active() {
        spec.damage * 2.0
    } else {
        spec.damage
    };
    state
        .bullets
        .push(Bullet::new(state.player.pos, dir * spec.speed, damage, spec.radius));
    state.stats.shots_fired += 1;
}

/// Send an echo pulse: cooldown- and energy-gated, visualization only
fn try_echo(state: &mut GameState) {
    let now = state.stats.time_played;
    let ready = state
        .player
        .last_echo
        .is_none_or(|last| now - last >= ECHO_COOLDOWN as f64);
    if !ready {
        return;
    }
    if !state.player.spend_energy(ECHO_ENERGY_COST) {
        return;
    }
    state.player.last_echo = Some(now);
}

/// Board cleared: award the clear bonus (computed with the completed level)
/// and schedule the deferred transition into the next level.
fn level_complete(state: &mut GameState) {
    state.phase = GamePhase::LevelComplete;
    let level = state.stats.level;
    state.stats.score += 500 + level as u64 * 100;
    if state.stats.accuracy > 80 {
        state.stats.score += 1000;
    }
    timer::schedule(
        &mut state.timers,
        TimedEffect::AdvanceLevel,
        state.stats.time_played,
        LEVEL_COMPLETE_DELAY,
        state.epoch,
    );
    log::info!("level {} complete, score {}", level, state.stats.score);
}

/// The deferred transition: bump the level, partially restore the player,
/// and repopulate the board. Guarded so a stray timer cannot restart a run
/// that has since ended.
fn next_level(state: &mut GameState) {
    if state.phase != GamePhase::LevelComplete {
        return;
    }
    state.stats.level += 1;
    state.player.heal(25.0);
    state.player.energy = 100.0;
    state.stats.health = state.player.health;
    state.stats.energy = state.player.energy;
    spawn::spawn_enemies(state);
    let pos = state.player.pos;
    state.spawn_particles(pos, ParticleKind::LevelUp, 15);
    state.phase = GamePhase::Playing;
    log::info!(
        "level {} starting with {} enemies",
        state.stats.level,
        state.enemies.len()
    );
}

fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    let pos = state.player.pos;
    state.spawn_particles(pos, ParticleKind::Explosion, 20);
    state.emit_shake(10.0, 500.0);
    log::info!(
        "game over: score {}, level {}, accuracy {}%",
        state.stats.score,
        state.stats.level,
        state.stats.accuracy
    );
}

fn drain_timers(state: &mut GameState) {
    let due = timer::take_due(&mut state.timers, state.stats.time_played, state.epoch);
    for effect in due {
        match effect {
            TimedEffect::AdvanceLevel => next_level(state),
        }
    }
}


#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    struct Step {
        move_x: f32,
        move_y: f32,
        fire: bool,
        echo: bool,
        dt: f32,
    }

    fn step_strategy() -> impl Strategy<Value = Step> {
        (
            -1.0f32..1.0,
            -1.0f32..1.0,
            any::<bool>(),
            any::<bool>(),
            0.001f32..0.05,
        )
            .prop_map(|(move_x, move_y, fire, echo, dt)| Step {
                move_x,
                move_y,
                fire,
                echo,
                dt,
            })
    }

    proptest! {
        #[test]
        fn invariants_hold_over_random_play(
            seed in any::<u64>(),
            steps in proptest::collection::vec(step_strategy(), 1..200),
        ) {
            let mut state = GameState::new(seed);
            state.start_game();
            let mut last_best = 0;

            for step in steps {
                let input = TickInput {
                    move_dir: Vec2::new(step.move_x, step.move_y),
                    aim: Some(Vec2::new(700.0, 300.0)),
                    fire: step.fire,
                    echo: step.echo,
                    ..Default::default()
                };
                tick(&mut state, &input, step.dt);

                // Health and energy stay bounded after every cycle
                prop_assert!((0.0..=100.0).contains(&state.player.health));
                prop_assert!((0.0..=100.0).contains(&state.player.energy));

                // Accuracy is the rounded ratio, never NaN or a fault
                let expected = if state.stats.shots_fired > 0 {
                    ((state.stats.enemies_killed as f64
                        / state.stats.shots_fired as f64)
                        * 100.0)
                        .round() as u32
                } else {
                    0
                };
                prop_assert_eq!(state.stats.accuracy, expected);

                // Best streak only ever grows
                prop_assert!(state.stats.best_streak >= last_best);
                prop_assert!(state.stats.best_streak >= state.stats.current_streak);
                last_best = state.stats.best_streak;
            }
        }
    }
}
