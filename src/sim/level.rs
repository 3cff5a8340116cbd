//! Level table and progression rule
//!
//! Levels are data, not branches: adding a level means adding a row.

use serde::{Deserialize, Serialize};

use crate::{Rgba, hex_rgb};

/// Per-level tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Enemy descent speed (pixels per tick)
    pub enemy_speed: f32,
    /// Spawn one enemy every N ticks
    pub spawn_interval: u64,
    /// Score needed to leave this level
    pub target_score: u32,
    /// Enemy tint
    pub tint: Rgba,
    /// Enemies oscillate horizontally
    pub zigzag: bool,
}

/// Level table, index 0 is level 1
pub const LEVELS: [LevelConfig; 3] = [
    LevelConfig {
        enemy_speed: 1.5,
        spawn_interval: 90,
        target_score: 100,
        tint: hex_rgb(0xff0055),
        zigzag: false,
    },
    LevelConfig {
        enemy_speed: 2.5,
        spawn_interval: 60,
        target_score: 300,
        tint: hex_rgb(0x00ffcc),
        zigzag: false,
    },
    LevelConfig {
        enemy_speed: 3.5,
        spawn_interval: 40,
        target_score: 600,
        tint: hex_rgb(0xffff00),
        zigzag: true,
    },
];

pub const FIRST_LEVEL: u8 = 1;
pub const LAST_LEVEL: u8 = LEVELS.len() as u8;

/// Configuration for a 1-based level number (clamped into the table)
pub fn level_config(level: u8) -> &'static LevelConfig {
    let index = (level.clamp(FIRST_LEVEL, LAST_LEVEL) - 1) as usize;
    &LEVELS[index]
}

/// What a score change means for the active level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progression {
    /// Threshold not reached
    Stay,
    /// Move on to the given level
    Advance(u8),
    /// Last threshold reached
    Victory,
}

/// Compare a score against the active level's threshold
pub fn check_progression(level: u8, score: u32) -> Progression {
    if score < level_config(level).target_score {
        Progression::Stay
    } else if level < LAST_LEVEL {
        Progression::Advance(level + 1)
    } else {
        Progression::Victory
    }
}
