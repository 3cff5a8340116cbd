//! Shape generation for 2D primitives
//!
//! Every helper appends triangle-list vertices to `out` so a whole frame can
//! be built into one buffer.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::{Rgba, with_alpha};

/// Segments used for a circle of the given radius (small dots stay cheap)
pub fn segments_for(radius: f32) -> u32 {
    ((radius * 2.0) as u32).clamp(6, 32)
}

/// Single filled triangle
pub fn triangle(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: Rgba) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

/// Axis-aligned filled rectangle
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: Rgba) {
    let max = min + size;
    let tr = Vec2::new(max.x, min.y);
    let bl = Vec2::new(min.x, max.y);
    triangle(out, min, tr, bl, color);
    triangle(out, bl, tr, max, color);
}

/// Filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: Rgba, segments: u32) {
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Soft radial halo: `color` at the center fading to transparent at `radius`
///
/// Stands in for a canvas shadow blur behind bright shapes.
pub fn glow(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: Rgba, intensity: f32) {
    let inner = with_alpha(color, color[3] * intensity);
    let outer = with_alpha(color, 0.0);
    let segments = segments_for(radius);
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        out.push(Vertex::new(center.x, center.y, inner));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            outer,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            outer,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_vertex_count_and_extent() {
        let mut out = Vec::new();
        rect(&mut out, Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), [1.0; 4]);
        assert_eq!(out.len(), 6);
        let xs: Vec<f32> = out.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = out.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let mut out = Vec::new();
        let center = Vec2::new(50.0, 50.0);
        circle(&mut out, center, 4.0, [1.0; 4], 12);
        assert_eq!(out.len(), 36);
        for v in &out {
            let d = Vec2::from(v.position).distance(center);
            assert!(d <= 4.0 + 1e-4);
        }
    }

    #[test]
    fn test_glow_fades_to_transparent() {
        let mut out = Vec::new();
        glow(&mut out, Vec2::ZERO, 20.0, [1.0, 0.0, 1.0, 1.0], 0.5);
        assert_eq!(out[0].color[3], 0.5);
        assert_eq!(out[1].color[3], 0.0);
        assert_eq!(out[2].color[3], 0.0);
    }

    #[test]
    fn test_segments_bounds() {
        assert_eq!(segments_for(0.5), 6);
        assert_eq!(segments_for(100.0), 32);
    }
}
