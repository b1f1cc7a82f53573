//! Vector math behind dimension annotations.
//!
//! All functions are pure and work on world-space `Vec3`. Angles and
//! perpendiculars are taken on the working plane (world XY), which is the
//! plane the host projects pointer rays onto.

use bevy::prelude::*;

/// Euclidean distance between two points.
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    (b - a).length()
}

/// In-plane angle of `b - a` in degrees, in (-180, 180].
pub fn angle_degrees(a: Vec3, b: Vec3) -> f32 {
    let delta = b - a;
    delta.y.atan2(delta.x).to_degrees()
}

/// Rounds the length of `start -> end` to the nearest multiple of `increment`.
///
/// When the rounded length is zero the unsnapped `end` is returned, so a short
/// drag never collapses onto `start`. A non-positive or non-finite increment
/// is handled the same way.
pub fn snap_to_increment(start: Vec3, end: Vec3, increment: f32) -> Vec3 {
    if !increment.is_finite() || increment <= 0.0 {
        return end;
    }

    let length = distance(start, end);
    let snapped = (length / increment).round() * increment;
    if snapped == 0.0 {
        return end;
    }

    let direction = (end - start).normalize();
    start + direction * snapped
}

/// Unit vector on the working plane, rotated +90° from `direction`.
///
/// Returns `Vec3::ZERO` when `direction` has no in-plane component.
pub fn perpendicular(direction: Vec3) -> Vec3 {
    Vec3::new(-direction.y, direction.x, 0.0).normalize_or_zero()
}

/// Midpoint of a segment.
pub fn midpoint(a: Vec3, b: Vec3) -> Vec3 {
    (a + b) * 0.5
}
