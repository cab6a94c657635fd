//! Game state and core simulation types
//!
//! The session aggregate and every entity it owns live here. All gameplay
//! state is reachable from [`GameState`]; subsystems receive it by `&mut`
//! rather than through any ambient global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn;
use super::timer::PendingTimer;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting on the start screen
    Start,
    /// Active gameplay
    Playing,
    /// Game is paused (rendering continues on a static snapshot)
    Paused,
    /// Run ended, terminal until an explicit restart
    GameOver,
    /// All enemies cleared; next level starts after a fixed delay
    LevelComplete,
}

/// Selectable weapons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weapon {
    #[default]
    Pulse,
    Rapid,
    Heavy,
}

/// Static per-weapon tuning
#[derive(Debug, Clone, Copy)]
pub struct WeaponSpec {
    pub damage: f32,
    pub speed: f32,
    pub cooldown: f32,
    pub energy_cost: f32,
    pub radius: f32,
}

impl Weapon {
    pub const fn spec(self) -> WeaponSpec {
        match self {
            Weapon::Pulse => WeaponSpec {
                damage: 2.0,
                speed: 450.0,
                cooldown: 0.28,
                energy_cost: 4.0,
                radius: 4.0,
            },
            Weapon::Rapid => WeaponSpec {
                damage: 1.0,
                speed: 520.0,
                cooldown: 0.12,
                energy_cost: 2.0,
                radius: 3.0,
            },
            Weapon::Heavy => WeaponSpec {
                damage: 5.0,
                speed: 360.0,
                cooldown: 0.6,
                energy_cost: 10.0,
                radius: 6.0,
            },
        }
    }
}

/// The session stat ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    pub level: u32,
    pub score: u64,
    pub health: f32,
    pub energy: f32,
    pub enemies_killed: u32,
    pub shots_fired: u32,
    /// Percentage, `round(enemies_killed / shots_fired * 100)`; 0 with no shots
    pub accuracy: u32,
    /// Seconds spent in advancing phases
    pub time_played: f64,
    pub current_streak: u32,
    pub best_streak: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            level: 1,
            score: 0,
            health: 100.0,
            energy: 100.0,
            enemies_killed: 0,
            shots_fired: 0,
            accuracy: 0,
            time_played: 0.0,
            current_streak: 0,
            best_streak: 0,
        }
    }
}

impl Stats {
    /// Recompute accuracy from the kill/shot counters. Zero shots is 0, not NaN.
    pub fn recompute_accuracy(&mut self) {
        self.accuracy = if self.shots_fired > 0 {
            ((self.enemies_killed as f64 / self.shots_fired as f64) * 100.0).round() as u32
        } else {
            0
        };
    }

    /// Record a kill: bump counters and run the best-streak max
    pub fn record_kill(&mut self, enemy_level: u32) {
        self.enemies_killed += 1;
        self.current_streak += 1;
        self.best_streak = self.best_streak.max(self.current_streak);
        self.score += 100 * enemy_level as u64;
    }
}

/// The player ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub health: f32,
    pub energy: f32,
    pub radius: f32,
    /// Seconds until the current weapon may fire again
    pub fire_cooldown: f32,
    /// Game-clock time of the last echo pulse (None before the first)
    pub last_echo: Option<f64>,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            health: 100.0,
            energy: 100.0,
            radius: PLAYER_RADIUS,
            fire_cooldown: 0.0,
            last_echo: None,
        }
    }

    /// Advance movement, energy regeneration, and the fire cooldown
    pub fn update(&mut self, dt: f32, move_dir: Vec2, width: f32, height: f32) {
        let dir = if move_dir.length_squared() > 1.0 {
            move_dir.normalize()
        } else {
            move_dir
        };
        self.pos += dir * PLAYER_SPEED * dt;
        self.pos.x = self.pos.x.clamp(self.radius, width - self.radius);
        self.pos.y = self.pos.y.clamp(self.radius, height - self.radius);

        self.energy = (self.energy + ENERGY_REGEN_PER_SEC * dt).min(100.0);
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
    }

    /// Apply damage, clamped to [0, 100]
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, 100.0);
    }

    /// Restore health, capped at 100
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).clamp(0.0, 100.0);
    }

    /// Restore energy, capped at 100
    pub fn restore_energy(&mut self, amount: f32) {
        self.energy = (self.energy + amount).clamp(0.0, 100.0);
    }

    /// Spend energy if enough is available
    pub fn spend_energy(&mut self, cost: f32) -> bool {
        if self.energy >= cost {
            self.energy -= cost;
            true
        } else {
            false
        }
    }
}

/// A hostile drone that seeks the player
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    /// Difficulty tier, derived from the session level at spawn time
    pub level: u32,
    pub health: f32,
    pub max_health: f32,
    pub radius: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, level: u32) -> Self {
        let health = (level * 2) as f32;
        Self {
            pos,
            level,
            health,
            max_health: health,
            radius: ENEMY_RADIUS,
        }
    }

    pub fn dead(&self) -> bool {
        self.health <= 0.0
    }

    fn speed(&self, difficulty: f32) -> f32 {
        (ENEMY_BASE_SPEED + ENEMY_SPEED_PER_LEVEL * (self.level - 1) as f32) * difficulty
    }

    /// Damage dealt to the player per overlapping resolution pass
    pub fn contact_damage(&self) -> f32 {
        ENEMY_BASE_DAMAGE + ENEMY_DAMAGE_PER_LEVEL * self.level as f32
    }

    /// Seek the player, staying inside the arena
    pub fn update(&mut self, dt: f32, player_pos: Vec2, difficulty: f32, width: f32, height: f32) {
        let dir = (player_pos - self.pos).normalize_or_zero();
        self.pos += dir * self.speed(difficulty) * dt;
        self.pos.x = self.pos.x.clamp(self.radius, width - self.radius);
        self.pos.y = self.pos.y.clamp(self.radius, height - self.radius);
    }
}

/// A player projectile
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    pub radius: f32,
    /// Remaining lifetime in seconds
    pub life: f32,
    /// Marked by the resolver on its (single) enemy hit; compacted end-of-frame
    pub spent: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2, damage: f32, radius: f32) -> Self {
        Self {
            pos,
            vel,
            damage,
            radius,
            life: BULLET_LIFE,
            spent: false,
        }
    }

    pub fn expired(&self) -> bool {
        self.spent || self.life <= 0.0
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.life -= dt;
    }
}

/// Visual feedback flavors for particle bursts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Hit,
    Explosion,
    Damage,
    Pickup,
    LevelUp,
}

/// A cosmetic particle; no gameplay effect
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ParticleKind,
    pub life: f32,
    pub size: f32,
}

impl Particle {
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.vel *= 0.98;
        self.life -= dt * 1.5;
        self.size *= 0.995;
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    Health,
    Energy,
    Weapon,
    Shield,
    Score,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 5] = [
        PowerupKind::Health,
        PowerupKind::Energy,
        PowerupKind::Weapon,
        PowerupKind::Shield,
        PowerupKind::Score,
    ];
}

/// A collectable pickup left behind by a dead enemy
#[derive(Debug, Clone)]
pub struct Powerup {
    pub pos: Vec2,
    pub kind: PowerupKind,
    /// Remaining lifetime in seconds
    pub life: f32,
    pub radius: f32,
    /// Marked by the resolver; compacted end-of-frame
    pub collected: bool,
}

impl Powerup {
    pub fn new(pos: Vec2, kind: PowerupKind) -> Self {
        Self {
            pos,
            kind,
            life: POWERUP_LIFE,
            radius: POWERUP_RADIUS,
            collected: false,
        }
    }

    pub fn expired(&self) -> bool {
        self.collected || self.life <= 0.0
    }

    pub fn update(&mut self, dt: f32) {
        self.life -= dt;
    }
}

/// Timed powerup effects currently active on the player
#[derive(Debug, Clone, Default)]
pub struct ActiveEffects {
    /// Seconds of contact immunity remaining
    pub shield: f32,
    /// Seconds of doubled weapon damage remaining
    pub weapon_boost: f32,
}

impl ActiveEffects {
    pub fn shield_active(&self) -> bool {
        self.shield > 0.0
    }

    pub fn weapon_boost_active(&self) -> bool {
        self.weapon_boost > 0.0
    }

    pub fn tick(&mut self, dt: f32) {
        self.shield = (self.shield - dt).max(0.0);
        self.weapon_boost = (self.weapon_boost - dt).max(0.0);
    }
}

/// Abstract feedback for the presentation layer; safe to ignore entirely
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ScreenShake { intensity: f32, duration_ms: f32 },
}

/// Complete game session: state machine, stat ledger, and every entity
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub stats: Stats,
    /// Enemy speed multiplier; 1.0 is the baseline
    pub difficulty: f32,
    pub current_weapon: Weapon,
    pub settings: Settings,
    pub effects: ActiveEffects,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    pub powerups: Vec<Powerup>,
    /// Queued feedback events, drained by the embedder
    pub events: Vec<GameEvent>,
    pub(crate) timers: Vec<PendingTimer>,
    /// Bumped on every (re)start; stale deferred events carry the old value
    pub epoch: u32,
    pub width: f32,
    pub height: f32,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a session with the default arena, waiting on the start screen
    pub fn new(seed: u64) -> Self {
        Self::with_arena(seed, ARENA_WIDTH, ARENA_HEIGHT)
    }

    pub fn with_arena(seed: u64, width: f32, height: f32) -> Self {
        Self {
            phase: GamePhase::Start,
            stats: Stats::default(),
            difficulty: 1.0,
            current_weapon: Weapon::Pulse,
            settings: Settings::default(),
            effects: ActiveEffects::default(),
            player: Player::new(Vec2::new(width / 2.0, height / 2.0)),
            enemies: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            powerups: Vec::new(),
            events: Vec::new(),
            timers: Vec::new(),
            epoch: 0,
            width,
            height,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Begin a fresh run: reset the ledger, respawn the player, repopulate
    /// enemies. Bumping the epoch invalidates any deferred events still
    /// pending from the previous run.
    pub fn start_game(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.stats = Stats::default();
        self.effects = ActiveEffects::default();
        self.current_weapon = Weapon::Pulse;
        self.player = Player::new(Vec2::new(self.width / 2.0, self.height / 2.0));
        self.enemies.clear();
        self.bullets.clear();
        self.particles.clear();
        self.powerups.clear();
        self.events.clear();
        self.timers.clear();
        self.phase = GamePhase::Playing;
        spawn::spawn_enemies(self);
        log::info!(
            "game started: epoch {}, {} enemies",
            self.epoch,
            self.enemies.len()
        );
    }

    /// Queue a screen-shake feedback event (respects the settings gate)
    pub(crate) fn emit_shake(&mut self, intensity: f32, duration_ms: f32) {
        if !self.settings.screen_shake {
            return;
        }
        if self.events.len() < MAX_EVENTS {
            self.events.push(GameEvent::ScreenShake {
                intensity,
                duration_ms,
            });
        }
    }

    /// Hand the queued feedback events to the presentation layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn a burst of cosmetic particles at a position
    pub(crate) fn spawn_particles(&mut self, pos: Vec2, kind: ParticleKind, count: usize) {
        if !self.settings.particles_enabled {
            return;
        }
        let (speed_lo, speed_hi, base_life, base_size) = match kind {
            ParticleKind::Hit => (60.0, 140.0, 0.4, 2.5),
            ParticleKind::Explosion => (80.0, 220.0, 0.7, 4.0),
            ParticleKind::Damage => (50.0, 120.0, 0.5, 3.0),
            ParticleKind::Pickup => (40.0, 100.0, 0.6, 3.0),
            ParticleKind::LevelUp => (60.0, 180.0, 1.0, 4.0),
        };
        for _ in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                self.particles.remove(0);
            }
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(speed_lo..speed_hi);
            let jitter = self.rng.random_range(0.8..1.2);
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                kind,
                life: base_life * jitter,
                size: base_size * jitter,
            });
        }
    }

    /// Progress of the echo visualization ring, 0..1 within its window
    pub fn echo_progress(&self) -> Option<f32> {
        let last = self.player.last_echo?;
        let elapsed = (self.stats.time_played - last) as f32;
        (elapsed < ECHO_VIS_DURATION).then_some(elapsed / ECHO_VIS_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_health_clamps_on_both_ends() {
        let mut player = Player::new(Vec2::new(400.0, 300.0));
        player.take_damage(250.0);
        assert_eq!(player.health, 0.0);
        player.heal(500.0);
        assert_eq!(player.health, 100.0);
    }

    #[test]
    fn energy_spend_requires_balance() {
        let mut player = Player::new(Vec2::ZERO);
        player.energy = 5.0;
        assert!(!player.spend_energy(10.0));
        assert_eq!(player.energy, 5.0);
        assert!(player.spend_energy(5.0));
        assert_eq!(player.energy, 0.0);
    }

    #[test]
    fn player_stays_inside_arena() {
        let mut player = Player::new(Vec2::new(20.0, 20.0));
        // Push hard into the corner for a while
        for _ in 0..120 {
            player.update(1.0 / 60.0, Vec2::new(-1.0, -1.0), 800.0, 600.0);
        }
        assert_eq!(player.pos, Vec2::new(PLAYER_RADIUS, PLAYER_RADIUS));
    }

    #[test]
    fn enemy_health_derived_from_level() {
        let enemy = Enemy::new(Vec2::ZERO, 4);
        assert_eq!(enemy.health, 8.0);
        assert_eq!(enemy.max_health, 8.0);
        assert!(!enemy.dead());
    }

    #[test]
    fn enemy_moves_toward_player() {
        let mut enemy = Enemy::new(Vec2::new(100.0, 100.0), 1);
        let player_pos = Vec2::new(400.0, 300.0);
        let before = (player_pos - enemy.pos).length();
        enemy.update(0.5, player_pos, 1.0, 800.0, 600.0);
        let after = (player_pos - enemy.pos).length();
        assert!(after < before);
    }

    #[test]
    fn accuracy_zero_without_shots() {
        let mut stats = Stats::default();
        stats.recompute_accuracy();
        assert_eq!(stats.accuracy, 0);
    }

    #[test]
    fn accuracy_rounds_to_nearest() {
        let mut stats = Stats {
            shots_fired: 3,
            enemies_killed: 2,
            ..Default::default()
        };
        stats.recompute_accuracy();
        assert_eq!(stats.accuracy, 67);
    }

    #[test]
    fn best_streak_runs_max() {
        let mut stats = Stats::default();
        stats.record_kill(1);
        stats.record_kill(1);
        assert_eq!(stats.best_streak, 2);
        stats.current_streak = 0;
        stats.record_kill(1);
        assert_eq!(stats.best_streak, 2);
        assert_eq!(stats.current_streak, 1);
    }

    #[test]
    fn kill_scoring_scales_with_enemy_level() {
        let mut stats = Stats::default();
        stats.record_kill(3);
        assert_eq!(stats.score, 300);
    }

    #[test]
    fn particle_cap_is_enforced() {
        let mut state = GameState::new(7);
        state.spawn_particles(Vec2::new(100.0, 100.0), ParticleKind::Explosion, 1000);
        assert!(state.particles.len() <= MAX_PARTICLES);
    }

    #[test]
    fn particles_respect_settings_gate() {
        let mut state = GameState::new(7);
        state.settings.particles_enabled = false;
        state.spawn_particles(Vec2::new(100.0, 100.0), ParticleKind::Hit, 10);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn shake_respects_settings_gate() {
        let mut state = GameState::new(7);
        state.settings.screen_shake = false;
        state.emit_shake(8.0, 200.0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn start_game_bumps_epoch_and_spawns() {
        let mut state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Start);
        state.start_game();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.epoch, 1);
        assert_eq!(state.enemies.len(), 3);
        state.start_game();
        assert_eq!(state.epoch, 2);
    }
}
