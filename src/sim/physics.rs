//! Force integration for bursts and pooled particles.
//!
//! Semi-implicit Euler against the frame's clamped delta: forces update
//! velocity first, then velocity carries position. Shell ascent uses the
//! projectile step (no turbulence); pooled sparks get the full force set.

use crate::config::{EnvironmentConfig, GroundPolicy};
use crate::pool::ParticlePool;

/// Upper bound on a single tick's delta, bounding numerical error during
/// host stalls.
pub const MAX_TICK_DT: f32 = 0.05;

/// Remaining-life cap applied when a fading particle crosses the ground.
const GROUND_FADE_LIFE: f32 = 0.25;

/// Advance an ascending shell: gravity, wind and drag only.
pub fn step_projectile(
    position: &mut glam::Vec3,
    velocity: &mut glam::Vec3,
    env: &EnvironmentConfig,
    dt: f32,
) {
    velocity.x += env.wind.x * dt;
    velocity.y += env.gravity * dt;
    velocity.z += env.wind.z * dt;
    *velocity *= (1.0 - env.drag * dt).max(0.0);
    *position += *velocity * dt;
}

/// Advance every active particle by `dt`. Slots whose age reaches their
/// lifespan are collected into `expired`; the caller releases them and
/// scrubs the owning burst's index list.
pub fn integrate(
    pool: &mut ParticlePool,
    env: &EnvironmentConfig,
    sim_clock: f32,
    dt: f32,
    expired: &mut Vec<u32>,
) {
    expired.clear();
    let turbulence = env.turbulence_strength;
    let frequency = env.turbulence_frequency;
    let damping = (1.0 - env.drag * dt).max(0.0);

    for k in 0..pool.active.len() {
        let i = pool.active[k] as usize;
        let age = pool.age[i];

        let velocity = &mut pool.velocities[i];
        velocity.x += env.wind.x * dt;
        velocity.y +=
            env.gravity * dt + ((age + sim_clock) * frequency).sin() * turbulence * dt;
        velocity.z += env.wind.z * dt;
        *velocity *= damping;

        let velocity = pool.velocities[i];
        pool.positions[i] += velocity * dt;
        pool.age[i] = age + dt;

        if pool.positions[i].y < 0.0 {
            match env.ground {
                GroundPolicy::Fade => {
                    let cap = pool.age[i] + GROUND_FADE_LIFE;
                    if pool.life[i] > cap {
                        pool.life[i] = cap;
                    }
                }
                GroundPolicy::Rebound => {
                    pool.positions[i].y = 0.0;
                    if pool.velocities[i].y < 0.0 {
                        pool.velocities[i].y = -pool.velocities[i].y * env.rebound_damping;
                    }
                }
            }
        }

        if pool.age[i] >= pool.life[i] {
            expired.push(pool.active[k]);
        }
    }
}
