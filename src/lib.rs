//! Echo Pulse - a 2D arcade shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `frame`: Frame driver and renderer sink
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Player-facing preferences
//! - `highscore`: Best-score persistence

pub mod frame;
pub mod highscore;
pub mod platform;
pub mod settings;
pub mod sim;

pub use frame::{FrameDriver, NullRenderer, Renderer};
pub use highscore::BestScore;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default arena dimensions (the original canvas caps at 800x600)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Spawn placement margin from the arena edges
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Enemies never spawn closer than this to the player...
    pub const SPAWN_EXCLUSION_RADIUS: f32 = 150.0;
    /// ...unless this many rejection attempts have been exhausted
    pub const SPAWN_MAX_ATTEMPTS: u32 = 50;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_SPEED: f32 = 220.0;
    /// Energy regained per second while alive
    pub const ENERGY_REGEN_PER_SEC: f32 = 10.0;

    /// Echo pulse
    pub const ECHO_COOLDOWN: f32 = 3.0;
    pub const ECHO_ENERGY_COST: f32 = 20.0;
    /// Visualization window and maximum ring radius
    pub const ECHO_VIS_DURATION: f32 = 2.0;
    pub const ECHO_VIS_RADIUS: f32 = 300.0;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 14.0;
    pub const ENEMY_BASE_SPEED: f32 = 40.0;
    pub const ENEMY_SPEED_PER_LEVEL: f32 = 6.0;
    pub const ENEMY_BASE_DAMAGE: f32 = 5.0;
    pub const ENEMY_DAMAGE_PER_LEVEL: f32 = 2.0;
    /// Enemy tier cap regardless of session level
    pub const ENEMY_MAX_LEVEL: u32 = 10;

    /// Bullet lifetime (seconds); enough to cross the arena diagonally
    pub const BULLET_LIFE: f32 = 1.2;

    /// Powerup lifetime before it fades away (seconds)
    pub const POWERUP_LIFE: f32 = 8.0;
    pub const POWERUP_RADIUS: f32 = 10.0;
    /// Drop chance on enemy death
    pub const POWERUP_DROP_CHANCE: f64 = 0.3;

    /// Timed powerup effects (seconds)
    pub const SHIELD_DURATION: f32 = 5.0;
    pub const WEAPON_BOOST_DURATION: f32 = 10.0;

    /// Delay between clearing a level and the next one starting (seconds)
    pub const LEVEL_COMPLETE_DELAY: f32 = 2.0;

    /// Cosmetic particle cap
    pub const MAX_PARTICLES: usize = 256;
    /// Undrained feedback events are dropped past this point
    pub const MAX_EVENTS: usize = 64;

    /// Longest frame gap the driver will simulate in one pass (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Overlap test between two circles given centers and radii
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    distance(a, b) < ra + rb
}
