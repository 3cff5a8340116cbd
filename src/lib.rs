//! Star Striker - a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, levels, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `ui`: Screen switching and HUD text
//! - `pacing`: Frame timestamps to fixed simulation steps
//! - `settings`: Player-facing configuration
//! - `audio`: Procedural Web Audio cues (playback on wasm only)

pub mod audio;
pub mod error;
pub mod pacing;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::InitError;
pub use settings::Settings;

/// Straight RGBA color, each channel in 0..=1
pub type Rgba = [f32; 4];

/// Game configuration constants
pub mod consts {
    /// Fixed viewport the simulation runs in (pixels, origin top-left, y down)
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Fixed simulation timestep (60 Hz, one nominal display refresh)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame gap fed to the simulation (tab switches, debugger pauses)
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Player ship
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 6.0;
    /// Gap between the ship and the bottom edge at spawn
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;
    /// Minimum time between shots
    pub const FIRE_COOLDOWN_MS: f64 = 200.0;
    /// Inward inset of the player's hitbox on every side
    pub const PLAYER_HITBOX_INSET: f32 = 10.0;

    /// Projectiles
    pub const PROJECTILE_RADIUS: f32 = 4.0;
    pub const PROJECTILE_SPEED: f32 = 12.0;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 30.0;
    /// Zigzag phase increment per tick (radians)
    pub const ZIGZAG_PHASE_STEP: f32 = 0.1;
    /// Zigzag horizontal amplitude factor (pixels per tick)
    pub const ZIGZAG_AMPLITUDE: f32 = 4.0;

    /// Particles
    pub const PARTICLES_PER_EXPLOSION: usize = 15;
    pub const PARTICLE_FADE: f32 = 0.02;
    pub const PARTICLE_MAX_SPEED: f32 = 4.0;

    /// Background starfield pool size
    pub const STAR_COUNT: usize = 100;

    /// Points per destroyed enemy
    pub const POINTS_PER_KILL: u32 = 10;

    /// Pause between levels
    pub const TRANSITION_MS: f64 = 2500.0;
    /// Delay before the final-score screen appears
    pub const END_SCREEN_DELAY_MS: f64 = 1000.0;
}

/// Build a color from a `0xRRGGBB` literal
pub const fn hex_rgb(hex: u32) -> Rgba {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    [r, g, b, 1.0]
}

/// Same color with a different alpha
#[inline]
pub fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
    [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
}

/// Fixed palette for everything that is not level-tinted
pub mod palette {
    use super::{Rgba, hex_rgb};

    pub const PLAYER: Rgba = hex_rgb(0x2600ff);
    pub const PROJECTILE: Rgba = hex_rgb(0xff00ff);
    pub const STAR: Rgba = hex_rgb(0xffffff);
    pub const BACKGROUND: Rgba = [0.0, 0.0, 0.02, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_rgb() {
        assert_eq!(hex_rgb(0xffffff), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(hex_rgb(0x000000), [0.0, 0.0, 0.0, 1.0]);
        let c = hex_rgb(0xff0055);
        assert_eq!(c[0], 1.0);
        assert_eq!(c[1], 0.0);
        assert!((c[2] - 85.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_with_alpha_clamps() {
        assert_eq!(with_alpha(palette::STAR, 1.5)[3], 1.0);
        assert_eq!(with_alpha(palette::STAR, -0.2)[3], 0.0);
    }
}
