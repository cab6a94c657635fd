//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Session state passed explicitly, never ambient
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::resolve;
pub use spawn::{enemy_count, enemy_level, spawn_enemies};
pub use state::{
    ActiveEffects, Bullet, Enemy, GameEvent, GamePhase, GameState, Particle, ParticleKind, Player,
    Powerup, PowerupKind, Stats, Weapon, WeaponSpec,
};
pub use tick::{TickInput, tick};
pub use timer::{PendingTimer, TimedEffect};
