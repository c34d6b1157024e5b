//! Polar/Cartesian helpers shared by the engine and the renderer.
//!
//! All positions are [`Vec2`] values in the working frame, whose origin is
//! the aggregation target rather than the canvas center.

use crate::cluster::Particle;
use glam::Vec2;

/// Euclidean distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Converts `p` to polar coordinates around `origin`.
///
/// ### Returns
/// `(dist, angle)` where `angle` is in `(-π, π]` as given by `atan2`.
pub fn to_polar(p: Vec2, origin: Vec2) -> (f32, f32) {
    let d = p - origin;
    (d.length(), d.y.atan2(d.x))
}

/// Inverse of [`to_polar`].
pub fn from_polar(origin: Vec2, dist: f32, angle: f32) -> Vec2 {
    origin + Vec2::from_angle(angle) * dist
}

/// Clamps `angle` into the sector `[0, sector]`.
///
/// This is a hard clamp, not a reflection: a particle pushed past either
/// edge ends up exactly on it.
pub fn clamp_angle(angle: f32, sector: f32) -> f32 {
    angle.min(sector).max(0.0)
}

/// Returns `true` if `p` lies strictly closer than `d_min` to any particle.
///
/// Linear scan over `particles`; squared distances avoid the square root.
pub fn is_touching(p: Vec2, particles: &[Particle], d_min: f32) -> bool {
    let d2_min = d_min * d_min;
    particles
        .iter()
        .any(|q| (q.pos - p).length_squared() < d2_min)
}
