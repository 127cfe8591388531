//! Pure vector and bounding-box helpers used by the race simulation.
//!
//! Every function takes its inputs by value and returns a new value; nothing
//! here mutates a caller's vector.

use bevy::math::{Rect, Vec2};
use rand::Rng;

/// Unit vector along `v`.
///
/// Zero-length and already-unit vectors are returned unchanged, so a zero
/// velocity never produces NaN.
pub fn normalize(v: Vec2) -> Vec2 {
    let magnitude = v.length();
    if magnitude == 0.0 || magnitude == 1.0 {
        v
    } else {
        v / magnitude
    }
}

/// Scalar product of `a` and `b`.
pub fn dot(a: Vec2, b: Vec2) -> f32 {
    a.x * b.x + a.y * b.y
}

/// Component of `v` along `target`.
///
/// Projecting onto the zero vector yields zero.
pub fn project(v: Vec2, target: Vec2) -> Vec2 {
    let axis = normalize(target);
    axis * dot(v, axis)
}

/// Two-sided clamp that tolerates `lo > hi` by preferring `lo`.
pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

/// Clamp each axis of `v` into `[-cap, cap]`.
pub fn clamp_axes(v: Vec2, cap: f32) -> Vec2 {
    Vec2::new(clamp(v.x, -cap, cap), clamp(v.y, -cap, cap))
}

/// True iff the two boxes intersect with positive area.
///
/// Boxes that only share an edge do not overlap.
pub fn bounds_overlap(a: &Rect, b: &Rect) -> bool {
    a.max.x > b.min.x && a.min.x < b.max.x && a.max.y > b.min.y && a.min.y < b.max.y
}

/// Axis-aligned bounds of a `2 * half_size` rectangle centred on `center`
/// and rotated by `rotation` radians.
pub fn rotated_bounds(center: Vec2, half_size: Vec2, rotation: f32) -> Rect {
    let (sin, cos) = rotation.sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    let extent = Vec2::new(
        cos * half_size.x + sin * half_size.y,
        sin * half_size.x + cos * half_size.y,
    );
    Rect::from_center_half_size(center, extent)
}

/// Uniformly random point inside `rect` (edges included).
///
/// A rect with non-finite corners or extent has no samplable range; its
/// centre is returned instead.
pub fn random_point_in<R: Rng + ?Sized>(rect: &Rect, rng: &mut R) -> Vec2 {
    if !rect.min.is_finite() || !rect.size().is_finite() {
        return rect.center();
    }
    Vec2::new(
        rng.gen_range(rect.min.x..=rect.max.x),
        rng.gen_range(rect.min.y..=rect.max.y),
    )
}
