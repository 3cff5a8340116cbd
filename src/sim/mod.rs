//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per simulation step, virtual clock only
//! - Seeded RNG only
//! - Stable iteration order (list order, compacted after each tick)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod input;
pub mod level;
pub mod schedule;
pub mod state;
pub mod tick;

pub use collision::{player_hits_enemy, point_in_rect, projectile_hits_enemy, rects_overlap};
pub use entities::{Enemy, Particle, Player, Projectile, Rect, Star};
pub use input::{InputState, Key};
pub use level::{LEVELS, LevelConfig, Progression, check_progression, level_config};
pub use schedule::{Deferred, Outcome, Schedule};
pub use state::{GameEvent, GamePhase, GameState, Screen, SoundCue};
pub use tick::tick;
