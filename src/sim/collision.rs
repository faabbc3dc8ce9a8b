//! Hit-tests between the player's circular hitbox and laser geometry
//!
//! These run once per beam per probe every frame, so they stay pure,
//! allocation-free and free of any dispatch.

use glam::Vec2;

use crate::consts::DEGENERATE_SEGMENT_EPSILON;

/// Check a circle against a straight three-segment laser
///
/// The beam starts at `origin` and points along `angle` (radians). Its
/// half-width ramps from 0 to full over the head (`l1`), stays constant over
/// the body (`l2`) and ramps back to 0 over the tail (`l3`). The circle radius
/// is folded into the half-width, so `radius = 0` tests a point.
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn straight_hit(
    point: Vec2,
    radius: f32,
    origin: Vec2,
    angle: f32,
    l1: f32,
    l2: f32,
    l3: f32,
    width: f32,
) -> bool {
    let (sin_a, cos_a) = angle.sin_cos();
    let d = point - origin;

    // Beam-local frame: x runs along the beam, y is the distance off-axis
    let local_x = d.x * cos_a + d.y * sin_a;
    let local_y = (d.y * cos_a - d.x * sin_a).abs();

    let total_length = l1 + l2 + l3;
    if local_x < 0.0 || local_x > total_length {
        return false;
    }

    let half_width = width * 0.5 + radius;

    // local_x < l1 can only hold when l1 > 0, likewise for the tail
    let envelope = if local_x < l1 {
        local_x / l1 * half_width
    } else if local_x < l1 + l2 || l3 <= 0.0 {
        half_width
    } else {
        (total_length - local_x) / l3 * half_width
    };

    local_y < envelope
}

/// Squared distance from `p` to the segment `a`-`b`
#[inline]
pub fn point_segment_distance_sq(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < DEGENERATE_SEGMENT_EPSILON {
        return p.distance_squared(a);
    }

    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_squared(a + ab * t)
}

/// Check a circle against a polyline of trail samples with uniform width
///
/// Every consecutive pair in `trail` is a segment. Stops at the first segment
/// within reach; a trail with fewer than two points never hits.
#[inline]
pub fn bent_hit(point: Vec2, radius: f32, trail: &[Vec2], width: f32) -> bool {
    let reach = width * 0.5 + radius;
    let reach_sq = reach * reach;

    trail
        .windows(2)
        .any(|seg| point_segment_distance_sq(point, seg[0], seg[1]) < reach_sq)
}
