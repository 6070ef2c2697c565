//! Per-archetype direction generation.
//!
//! Each archetype maps the shape RNG stream to a fixed-cardinality set of
//! direction vectors; explosions cycle through the set when they need more
//! particles than directions. Keeping this the sole consumer of shape
//! randomness isolates the visual character of each shell from scheduling
//! and physics randomness.

use super::Archetype;
use crate::random::Rng;
use glam::{Mat3, Vec3};
use std::f32::consts::TAU;

/// Directions produced per explosion pattern.
pub const PATTERN_DIRECTIONS: usize = 128;

/// Generate the direction set for one explosion.
pub fn generate_directions(archetype: Archetype, rng: &mut Rng) -> Vec<Vec3> {
    match archetype {
        Archetype::Peony => peony(rng),
        Archetype::Ring => ring(rng),
        Archetype::Willow => willow(rng),
        Archetype::Palm => palm(rng),
        Archetype::Crossette => crossette(),
        Archetype::Comet => comet(rng),
    }
}

/// Uniform point on the unit sphere via inverse CDF.
fn sphere_dir(rng: &mut Rng) -> Vec3 {
    let azimuth = TAU * rng.next();
    let polar = (2.0 * rng.next() - 1.0).clamp(-1.0, 1.0).acos();
    let sin_polar = polar.sin();
    Vec3::new(
        sin_polar * azimuth.cos(),
        polar.cos(),
        sin_polar * azimuth.sin(),
    )
}

fn peony(rng: &mut Rng) -> Vec<Vec3> {
    (0..PATTERN_DIRECTIONS).map(|_| sphere_dir(rng)).collect()
}

fn ring(rng: &mut Rng) -> Vec<Vec3> {
    (0..PATTERN_DIRECTIONS)
        .map(|i| {
            let angle = TAU * i as f32 / PATTERN_DIRECTIONS as f32;
            let jitter = rng.next_range(-0.12, 0.12);
            Vec3::new(angle.cos(), jitter, angle.sin()).normalize()
        })
        .collect()
}

fn willow(rng: &mut Rng) -> Vec<Vec3> {
    (0..PATTERN_DIRECTIONS)
        .map(|_| {
            let mut dir = sphere_dir(rng);
            // Fold upward and attenuate so gravity turns the trails into
            // the droop.
            dir.y = dir.y.abs() * 0.35;
            let reach = rng.next_range(0.6, 1.0);
            dir.normalize_or_zero() * reach
        })
        .collect()
}

fn palm(rng: &mut Rng) -> Vec<Vec3> {
    (0..PATTERN_DIRECTIONS)
        .map(|_| {
            let mut dir = sphere_dir(rng);
            dir.y = dir.y.abs();
            dir.x *= 1.6;
            dir.z *= 1.6;
            dir.normalize_or_zero()
        })
        .collect()
}

fn crossette() -> Vec<Vec3> {
    // Three orthogonal axes stepped around the vertical axis; no shape
    // randomness, the fan layout is the identity of this shell.
    let axes = [Vec3::X, Vec3::Y, Vec3::Z];
    let steps = PATTERN_DIRECTIONS / axes.len() + 1;
    (0..PATTERN_DIRECTIONS)
        .map(|i| {
            let axis = axes[i % axes.len()];
            let yaw = TAU * (i / axes.len()) as f32 / steps as f32;
            Mat3::from_rotation_y(yaw) * axis
        })
        .collect()
}

fn comet(rng: &mut Rng) -> Vec<Vec3> {
    (0..PATTERN_DIRECTIONS)
        .map(|_| {
            let mut dir = sphere_dir(rng);
            dir.y = dir.y.abs();
            dir.normalize_or_zero()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_cardinality() {
        let mut rng = Rng::new(1);
        for archetype in Archetype::all() {
            let dirs = generate_directions(*archetype, &mut rng);
            assert_eq!(dirs.len(), PATTERN_DIRECTIONS, "{:?}", archetype);
        }
    }

    #[test]
    fn test_deterministic_given_stream_position() {
        for archetype in Archetype::all() {
            let mut a = Rng::new(123);
            let mut b = Rng::new(123);
            let da = generate_directions(*archetype, &mut a);
            let db = generate_directions(*archetype, &mut b);
            assert_eq!(da, db, "{:?}", archetype);
        }
    }

    #[test]
    fn test_peony_covers_both_hemispheres() {
        let mut rng = Rng::new(9);
        let dirs = generate_directions(Archetype::Peony, &mut rng);
        assert!(dirs.iter().any(|d| d.y > 0.2));
        assert!(dirs.iter().any(|d| d.y < -0.2));
        for d in &dirs {
            assert!((d.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_ring_stays_near_horizontal() {
        let mut rng = Rng::new(9);
        let dirs = generate_directions(Archetype::Ring, &mut rng);
        for d in &dirs {
            assert!(d.y.abs() < 0.2, "ring direction too vertical: {:?}", d);
            assert!((d.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_willow_never_points_down_hard() {
        let mut rng = Rng::new(9);
        let dirs = generate_directions(Archetype::Willow, &mut rng);
        for d in &dirs {
            assert!(d.y >= 0.0, "willow direction below horizon: {:?}", d);
            let len = d.length();
            assert!((0.5..=1.01).contains(&len), "reach out of range: {}", len);
        }
    }

    #[test]
    fn test_palm_and_comet_fold_upward() {
        let mut rng = Rng::new(9);
        for archetype in [Archetype::Palm, Archetype::Comet] {
            let dirs = generate_directions(archetype, &mut rng);
            for d in &dirs {
                assert!(d.y >= 0.0, "{:?} direction below horizon: {:?}", archetype, d);
            }
        }
    }

    #[test]
    fn test_crossette_is_axis_fans() {
        let mut rng = Rng::new(9);
        let dirs = generate_directions(Archetype::Crossette, &mut rng);
        // Every third direction is the unrotated vertical axis family.
        assert!(dirs[1].abs_diff_eq(Vec3::Y, 1e-5));
        for d in &dirs {
            assert!((d.length() - 1.0).abs() < 1e-4);
        }
        // Rotation about Y leaves the vertical family untouched.
        assert!(dirs[4].abs_diff_eq(Vec3::Y, 1e-5));
    }
}
