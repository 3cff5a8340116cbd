//! Frame assembly: turns a `GameState` into one triangle list
//!
//! Draw order is back to front: stars, player, projectiles, enemies,
//! particles. Which groups appear depends on the phase.

use glam::Vec2;

use super::shapes::{circle, glow, rect, segments_for, triangle};
use super::vertex::Vertex;
use crate::Settings;
use crate::palette;
use crate::sim::{Enemy, GameState, Particle, Player, Projectile, Star};
use crate::with_alpha;

/// Halo strength at the center of a glow
const GLOW_INTENSITY: f32 = 0.45;

/// Something that can append itself to a frame
pub trait Draw {
    /// Blur radius of the halo drawn behind the shape (0 for none)
    fn glow_radius(&self) -> f32 {
        0.0
    }

    fn draw(&self, out: &mut Vec<Vertex>, glow_enabled: bool);
}

impl Draw for Star {
    fn draw(&self, out: &mut Vec<Vertex>, _glow_enabled: bool) {
        let color = with_alpha(palette::STAR, self.alpha);
        circle(out, self.pos, self.size, color, segments_for(self.size));
    }
}

impl Draw for Player {
    fn glow_radius(&self) -> f32 {
        20.0
    }

    fn draw(&self, out: &mut Vec<Vertex>, glow_enabled: bool) {
        let Vec2 { x, y } = self.pos;
        let Vec2 { x: w, y: h } = self.size;

        if glow_enabled {
            let center = Vec2::new(x + w / 2.0, y + h / 2.0);
            glow(out, center, w / 2.0 + self.glow_radius(), self.color, GLOW_INTENSITY);
        }

        // Arrowhead with a notch in the tail, split at the notch
        let nose = Vec2::new(x + w / 2.0, y);
        let right = Vec2::new(x + w, y + h);
        let notch = Vec2::new(x + w / 2.0, y + h - 10.0);
        let left = Vec2::new(x, y + h);
        triangle(out, nose, notch, left, self.color);
        triangle(out, nose, right, notch, self.color);
    }
}

impl Draw for Projectile {
    fn glow_radius(&self) -> f32 {
        10.0
    }

    fn draw(&self, out: &mut Vec<Vertex>, glow_enabled: bool) {
        if glow_enabled {
            glow(
                out,
                self.pos,
                self.radius + self.glow_radius(),
                self.color,
                GLOW_INTENSITY,
            );
        }
        circle(out, self.pos, self.radius, self.color, segments_for(self.radius));
    }
}

impl Draw for Enemy {
    fn glow_radius(&self) -> f32 {
        15.0
    }

    fn draw(&self, out: &mut Vec<Vertex>, glow_enabled: bool) {
        let Vec2 { x, y } = self.pos;
        let Vec2 { x: w, y: h } = self.size;

        if glow_enabled {
            let center = Vec2::new(x + w / 2.0, y + h / 2.0);
            glow(out, center, w / 2.0 + self.glow_radius(), self.color, GLOW_INTENSITY);
        }

        // Pointing down at the player
        triangle(
            out,
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x + w / 2.0, y + h),
            self.color,
        );
    }
}

impl Draw for Particle {
    fn glow_radius(&self) -> f32 {
        10.0
    }

    fn draw(&self, out: &mut Vec<Vertex>, glow_enabled: bool) {
        let color = with_alpha(self.color, self.alpha);
        if glow_enabled {
            glow(out, self.pos, self.radius + self.glow_radius(), color, GLOW_INTENSITY);
        }
        circle(out, self.pos, self.radius, color, segments_for(self.radius));
    }
}

fn draw_all<'a, T: Draw + 'a>(
    out: &mut Vec<Vertex>,
    items: impl IntoIterator<Item = &'a T>,
    glow_enabled: bool,
) {
    for item in items {
        item.draw(out, glow_enabled);
    }
}

/// Build the full frame for the current state
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let glow_enabled = settings.glow;
    let mut out = Vec::with_capacity(4096);

    // Fills the viewport even when the surface clears to a different color
    rect(
        &mut out,
        Vec2::ZERO,
        Vec2::new(crate::consts::VIEWPORT_WIDTH, crate::consts::VIEWPORT_HEIGHT),
        palette::BACKGROUND,
    );

    draw_all(&mut out, &state.stars, glow_enabled);

    if state.phase.shows_actors() {
        if let Some(player) = &state.player {
            player.draw(&mut out, glow_enabled);
        }
        draw_all(&mut out, &state.projectiles, glow_enabled);
        draw_all(&mut out, &state.enemies, glow_enabled);
    }

    draw_all(&mut out, &state.particles, glow_enabled);

    out
}
