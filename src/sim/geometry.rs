//! Collision geometry primitives
//!
//! Stateless circle/segment/circle tests and vector reflection. Everything
//! here is pure and works in screen space (y grows downward).

use glam::Vec2;

/// Contact between the ball and a round obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the obstacle toward the ball
    pub normal: Vec2,
    /// Overlap depth
    pub penetration: f32,
}

/// Closest point on segment `p1p2` to `point`. A zero-length segment
/// collapses to `p1`.
pub fn closest_point_on_segment(p1: Vec2, p2: Vec2, point: Vec2) -> Vec2 {
    let line = p2 - p1;
    let len_sq = line.length_squared();
    if len_sq == 0.0 {
        return p1;
    }
    let t = ((point - p1).dot(line) / len_sq).clamp(0.0, 1.0);
    p1 + line * t
}

/// True if the circle overlaps segment `p1p2`
pub fn segment_circle_intersect(p1: Vec2, p2: Vec2, center: Vec2, radius: f32) -> bool {
    let closest = closest_point_on_segment(p1, p2, center);
    center.distance_squared(closest) < radius * radius
}

/// True if two circles overlap (touching does not count)
#[inline]
pub fn circle_circle_intersect(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> bool {
    let reach = r1 + r2;
    c1.distance_squared(c2) < reach * reach
}

/// Contact info for two overlapping circles, normal pointing from `obstacle`
/// toward `ball`. Concentric circles push straight up.
pub fn circle_contact(ball: Vec2, ball_radius: f32, obstacle: Vec2, obstacle_radius: f32) -> Option<Contact> {
    if !circle_circle_intersect(ball, ball_radius, obstacle, obstacle_radius) {
        return None;
    }
    let offset = ball - obstacle;
    let dist = offset.length();
    let normal = if dist > f32::EPSILON { offset / dist } else { Vec2::NEG_Y };
    Some(Contact {
        normal,
        penetration: ball_radius + obstacle_radius - dist,
    })
}

/// Reflect velocity off a surface: v' = v - 2(v·n)n
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Unit normal of edge `p1p2` facing away from `centroid`.
///
/// Falls back to straight up for a degenerate edge.
pub fn outward_edge_normal(p1: Vec2, p2: Vec2, centroid: Vec2) -> Vec2 {
    let edge = p2 - p1;
    let mut normal = Vec2::new(-edge.y, edge.x);
    let mid = (p1 + p2) * 0.5;
    if normal.dot(centroid - mid) > 0.0 {
        normal = -normal;
    }
    let n = normal.normalize_or_zero();
    if n == Vec2::ZERO { Vec2::NEG_Y } else { n }
}
