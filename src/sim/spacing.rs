//! Spatial sparsity enforcement for burst origins.
//!
//! Autonomous spawns use rejection sampling and may skip a tick; an
//! interactive trigger is corrected into a valid spot instead so user input
//! is never dropped.

use crate::config::SpawnLayout;
use crate::random::Rng;
use glam::{vec3, Vec3};

/// Candidate budget for one autonomous placement.
pub const LAUNCH_ATTEMPTS: usize = 8;

/// Correction passes before accepting an interactive position as-is.
const CORRECTION_PASSES: usize = 8;

/// Direction used when a candidate coincides exactly with a burst.
const DEGENERATE_PUSH: Vec3 = Vec3::X;

/// Sample a ground launch position at least `min_distance` from every
/// existing burst. `None` means the budget ran out; the caller retries on a
/// later tick.
pub fn find_launch_position(
    existing: &[Vec3],
    layout: &SpawnLayout,
    rng: &mut Rng,
) -> Option<Vec3> {
    for _ in 0..LAUNCH_ATTEMPTS {
        let candidate = vec3(
            rng.next_range(layout.x_range.0, layout.x_range.1),
            0.0,
            rng.next_range(layout.z_range.0, layout.z_range.1),
        );
        if existing
            .iter()
            .all(|p| p.distance(candidate) >= layout.min_distance)
        {
            return Some(candidate);
        }
    }
    None
}

/// Push an interactive candidate out of every violating burst's exclusion
/// radius. Each violator relocates the candidate to exactly `min_distance`
/// along the separating direction; passes repeat until no violation
/// remains (bounded).
pub fn resolve_interactive_position(
    mut candidate: Vec3,
    existing: &[Vec3],
    min_distance: f32,
) -> Vec3 {
    for _ in 0..CORRECTION_PASSES {
        let mut moved = false;
        for &other in existing {
            if candidate.distance(other) < min_distance {
                let mut dir = (candidate - other).normalize_or_zero();
                if dir == Vec3::ZERO {
                    dir = DEGENERATE_PUSH;
                }
                candidate = other + dir * min_distance;
                moved = true;
            }
        }
        if !moved {
            break;
        }
    }
    candidate
}
