//! Entity models
//!
//! Every entity is a plain mutable record advanced once per tick. Dynamic
//! entities never remove themselves; they raise a deletion flag and the owning
//! list drops them in a single compaction pass after the tick's updates.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::input::InputState;
use crate::consts::*;
use crate::{Rgba, palette};

/// Axis-aligned box in viewport pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Shrink by `by` on every side
    pub fn inset(&self, by: f32) -> Self {
        Self {
            pos: self.pos + Vec2::splat(by),
            size: self.size - Vec2::splat(2.0 * by),
        }
    }
}

/// Anything stored in a compacted entity list
pub trait Expirable {
    fn is_marked(&self) -> bool;
}

/// Drop every flagged entry, keeping the survivors in order
pub fn compact<T: Expirable>(list: &mut Vec<T>) {
    list.retain(|e| !e.is_marked());
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub color: Rgba,
    /// Virtual-clock time of the last shot (None until the first shot)
    pub last_shot_ms: Option<f64>,
    pub fire_cooldown_ms: f64,
}

impl Player {
    /// Spawn centered horizontally, just above the bottom edge
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(
                VIEWPORT_WIDTH / 2.0 - PLAYER_SIZE / 2.0,
                VIEWPORT_HEIGHT - PLAYER_SIZE - PLAYER_BOTTOM_MARGIN,
            ),
            size: Vec2::splat(PLAYER_SIZE),
            speed: PLAYER_SPEED,
            color: palette::PLAYER,
            last_shot_ms: None,
            fire_cooldown_ms: FIRE_COOLDOWN_MS,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Forgiving hitbox used against enemies
    pub fn hitbox(&self) -> Rect {
        self.bounds().inset(PLAYER_HITBOX_INSET)
    }

    /// Muzzle point (top-center of the ship)
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }

    /// Move from held input and fire if the cooldown allows.
    ///
    /// Returns the projectile fired this tick, if any.
    pub fn update(&mut self, input: &InputState, now_ms: f64) -> Option<Projectile> {
        let mut delta = Vec2::ZERO;
        if input.up() {
            delta.y -= self.speed;
        }
        if input.down() {
            delta.y += self.speed;
        }
        if input.left() {
            delta.x -= self.speed;
        }
        if input.right() {
            delta.x += self.speed;
        }

        let max = Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT) - self.size;
        self.pos = (self.pos + delta).clamp(Vec2::ZERO, max);

        if input.fire() && self.can_fire(now_ms) {
            self.last_shot_ms = Some(now_ms);
            return Some(Projectile::new(self.muzzle()));
        }
        None
    }

    pub fn can_fire(&self, now_ms: f64) -> bool {
        match self.last_shot_ms {
            None => true,
            Some(last) => now_ms - last >= self.fire_cooldown_ms,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// A player shot travelling straight up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub color: Rgba,
    pub marked_for_deletion: bool,
}

impl Projectile {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PROJECTILE_RADIUS,
            speed: PROJECTILE_SPEED,
            color: palette::PROJECTILE,
            marked_for_deletion: false,
        }
    }

    pub fn update(&mut self) {
        self.pos.y -= self.speed;
        if self.pos.y + self.radius < 0.0 {
            self.marked_for_deletion = true;
        }
    }
}

impl Expirable for Projectile {
    fn is_marked(&self) -> bool {
        self.marked_for_deletion
    }
}

/// A descending enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub color: Rgba,
    pub zigzag: bool,
    /// Zigzag phase (radians)
    pub angle: f32,
    pub marked_for_deletion: bool,
}

impl Enemy {
    pub fn new(x: f32, speed: f32, color: Rgba, zigzag: bool) -> Self {
        Self {
            pos: Vec2::new(x, -ENEMY_SIZE),
            size: Vec2::splat(ENEMY_SIZE),
            speed,
            color,
            zigzag,
            angle: 0.0,
            marked_for_deletion: false,
        }
    }

    /// Spawn just above the top edge at a random column
    pub fn spawn(rng: &mut impl Rng, speed: f32, color: Rgba, zigzag: bool) -> Self {
        let x = rng.random::<f32>() * (VIEWPORT_WIDTH - ENEMY_SIZE);
        Self::new(x, speed, color, zigzag)
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn update(&mut self) {
        self.pos.y += self.speed;
        if self.zigzag {
            self.pos.x += self.angle.sin() * ZIGZAG_AMPLITUDE;
            self.angle += ZIGZAG_PHASE_STEP;
            self.pos.x = self.pos.x.clamp(0.0, VIEWPORT_WIDTH - self.size.x);
        }
        if self.pos.y > VIEWPORT_HEIGHT {
            self.marked_for_deletion = true;
        }
    }
}

impl Expirable for Enemy {
    fn is_marked(&self) -> bool {
        self.marked_for_deletion
    }
}

/// A fading explosion fragment (visual only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Rgba,
    pub alpha: f32,
    pub marked_for_deletion: bool,
}

impl Particle {
    pub fn new(rng: &mut impl Rng, pos: Vec2, color: Rgba) -> Self {
        let radius = rng.random::<f32>() * 3.0 + 1.0;
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0 * PARTICLE_MAX_SPEED,
            (rng.random::<f32>() - 0.5) * 2.0 * PARTICLE_MAX_SPEED,
        );
        Self {
            pos,
            vel,
            radius,
            color,
            alpha: 1.0,
            marked_for_deletion: false,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.alpha -= PARTICLE_FADE;
        if self.alpha <= 0.0 {
            self.marked_for_deletion = true;
        }
    }
}

impl Expirable for Particle {
    fn is_marked(&self) -> bool {
        self.marked_for_deletion
    }
}

/// A burst of particles at `center`
pub fn explosion(rng: &mut impl Rng, center: Vec2, color: Rgba) -> Vec<Particle> {
    (0..PARTICLES_PER_EXPLOSION)
        .map(|_| Particle::new(rng, center, color))
        .collect()
}

/// Background star, recycled forever
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub alpha: f32,
}

impl Star {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * VIEWPORT_WIDTH,
                rng.random::<f32>() * VIEWPORT_HEIGHT,
            ),
            size: rng.random::<f32>() * 2.0,
            speed: rng.random::<f32>() * 0.5 + 0.1,
            alpha: rng.random::<f32>(),
        }
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        self.pos.y += self.speed;
        if self.pos.y > VIEWPORT_HEIGHT {
            self.pos.y = 0.0;
            self.pos.x = rng.random::<f32>() * VIEWPORT_WIDTH;
        }
    }
}

/// Fresh starfield pool
pub fn starfield(rng: &mut impl Rng) -> Vec<Star> {
    (0..STAR_COUNT).map(|_| Star::random(rng)).collect()
}
