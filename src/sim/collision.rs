//! Collision predicates
//!
//! Both tests are axis-aligned. Projectiles are treated as points (their
//! radius is cosmetic), and the player uses an inset hitbox that is smaller
//! than the drawn ship.

use glam::Vec2;

use super::entities::{Enemy, Player, Projectile, Rect};

/// Point strictly inside a box (touching an edge is a miss)
#[inline]
pub fn point_in_rect(point: Vec2, rect: &Rect) -> bool {
    let min = rect.min();
    let max = rect.max();
    point.x > min.x && point.x < max.x && point.y > min.y && point.y < max.y
}

/// Two boxes overlap with positive area
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

/// Projectile hit test
pub fn projectile_hits_enemy(projectile: &Projectile, enemy: &Enemy) -> bool {
    point_in_rect(projectile.pos, &enemy.bounds())
}

/// Player crash test (uses the forgiving hitbox)
pub fn player_hits_enemy(player: &Player, enemy: &Enemy) -> bool {
    rects_overlap(&player.hitbox(), &enemy.bounds())
}
