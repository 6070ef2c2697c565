//! Simulation engine.
//!
//! Owns the burst collection, particle pool, scheduler state and both RNG
//! streams, and advances everything from a single `tick(dt, &config)` entry
//! point. The host drives the loop; nothing here owns a timer. Within one
//! tick the order is fixed: scheduling, per-burst ascent/explosion, global
//! particle integration — so sparks born in an explosion are integrated in
//! the tick that created them.

mod burst;
mod physics;
mod scheduler;
mod spacing;

pub use burst::{Burst, BurstPhase};
pub use physics::{integrate, step_projectile, MAX_TICK_DT};
pub use scheduler::Scheduler;
pub use spacing::{find_launch_position, resolve_interactive_position, LAUNCH_ATTEMPTS};

use crate::config::SimConfig;
use crate::pool::ParticlePool;
use crate::random::Rng;
use crate::shells::{self, sample_palette, Archetype};
use glam::{vec3, Vec3};

/// Rolling window length for the FPS estimate.
const FPS_WINDOW: f32 = 0.5;

/// Stream separation constant for the shape RNG seed.
const SHAPE_STREAM_SALT: u32 = 0x9e37_79b9;

/// FPS telemetry over rolling windows.
#[derive(Debug, Default)]
struct FpsEstimator {
    elapsed: f32,
    frames: u32,
    value: f32,
}

impl FpsEstimator {
    fn record(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
        self.frames += 1;
        if self.elapsed >= FPS_WINDOW {
            self.value = self.frames as f32 / self.elapsed;
            self.elapsed = 0.0;
            self.frames = 0;
        }
    }

    fn value(&self) -> f32 {
        self.value
    }
}

/// The fireworks simulation core.
pub struct FireworksEngine {
    pool: ParticlePool,
    bursts: Vec<Burst>,
    scheduler: Scheduler,
    /// Scheduling, physics and palette randomness.
    rng: Rng,
    /// Shape randomness, consumed only by the pattern generators so
    /// archetype visuals stay isolated from show pacing.
    shape_rng: Rng,
    next_burst_id: u32,
    viewport: (u32, u32),
    fps: FpsEstimator,
    expired_scratch: Vec<u32>,
    disposed: bool,
}

impl FireworksEngine {
    pub fn new(seed: u32, capacity: usize) -> Self {
        Self {
            pool: ParticlePool::new(capacity),
            bursts: Vec::new(),
            scheduler: Scheduler::new(),
            rng: Rng::new(seed),
            shape_rng: Rng::new(seed ^ SHAPE_STREAM_SALT),
            next_burst_id: 0,
            viewport: (1920, 1080),
            fps: FpsEstimator::default(),
            expired_scratch: Vec::new(),
            disposed: false,
        }
    }

    pub fn with_default_capacity(seed: u32) -> Self {
        Self::new(seed, crate::pool::DEFAULT_CAPACITY)
    }

    /// Restart both random streams. Already-spawned bursts and particles
    /// are unaffected.
    pub fn reseed(&mut self, seed: u32) {
        self.rng.reseed(seed);
        self.shape_rng.reseed(seed ^ SHAPE_STREAM_SALT);
    }

    /// Record the drawable surface size used to map pointer input.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1), height.max(1));
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn bursts(&self) -> &[Burst] {
        &self.bursts
    }

    pub fn visible_burst_count(&self) -> usize {
        self.bursts.iter().filter(|b| b.is_visible()).count()
    }

    pub fn active_particle_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn sim_clock(&self) -> f32 {
        self.scheduler.clock()
    }

    /// Rolling FPS estimate, refreshed roughly twice a second.
    pub fn fps(&self) -> f32 {
        self.fps.value()
    }

    /// Release every resource and latch the engine off; later ticks and
    /// triggers are no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for slot in self.pool.active_slots().to_vec() {
            self.pool.release(slot);
        }
        self.bursts.clear();
        self.disposed = true;
        log::info!("engine disposed");
    }

    /// Advance the whole simulation by one tick.
    pub fn tick(&mut self, dt: f32, config: &SimConfig) {
        if self.disposed {
            return;
        }
        self.fps.record(dt);
        let dt = dt.clamp(0.0, MAX_TICK_DT);
        self.scheduler.advance(dt);

        // Scheduling: hard floor first, then the staggered window.
        self.enforce_floor(config);
        if config.scheduler.playing
            && self.visible_burst_count() < config.scheduler.max_simultaneous
            && self.scheduler.spawn_due()
            && self.spawn_autonomous(config)
        {
            self.scheduler.schedule_next(&config.scheduler, &mut self.rng);
        }

        self.advance_bursts(dt, config);

        physics::integrate(
            &mut self.pool,
            &config.environment,
            self.scheduler.clock(),
            dt,
            &mut self.expired_scratch,
        );
        self.release_expired();

        self.bursts.retain(|b| {
            if b.is_done() {
                log::debug!("burst {} removed", b.id);
                false
            } else {
                true
            }
        });

        // A burst finishing mid-tick may have dropped the count below the
        // floor; top it back up so the invariant holds between ticks too.
        self.enforce_floor(config);
    }

    /// Spawn until the minimum concurrency floor is met, or placement is
    /// abandoned for this tick. Enforced regardless of play state.
    fn enforce_floor(&mut self, config: &SimConfig) {
        while self.visible_burst_count() < config.scheduler.min_simultaneous {
            if !self.spawn_autonomous(config) {
                break;
            }
        }
    }

    /// Spawn a burst from a pointer position in surface pixels. Unlike
    /// autonomous spawns this never drops the request: the position is
    /// corrected into a valid spot instead.
    pub fn trigger_burst_at_screen(&mut self, x: f32, y: f32, config: &SimConfig) -> Option<u32> {
        let (w, h) = self.viewport;
        let fx = (x / w as f32).clamp(0.0, 1.0);
        let fz = (y / h as f32).clamp(0.0, 1.0);
        let layout = &config.layout;
        let target = vec3(
            layout.x_range.0 + (layout.x_range.1 - layout.x_range.0) * fx,
            layout.target_altitude,
            layout.z_range.0 + (layout.z_range.1 - layout.z_range.0) * fz,
        );
        self.trigger_burst_at(target, config)
    }

    /// Spawn a burst at a world position, corrected for sparsity. Returns
    /// the new burst id, or `None` once disposed.
    pub fn trigger_burst_at(&mut self, target: Vec3, config: &SimConfig) -> Option<u32> {
        if self.disposed {
            return None;
        }
        let existing: Vec<Vec3> = self.bursts.iter().map(|b| b.position).collect();
        let position =
            spacing::resolve_interactive_position(target, &existing, config.layout.min_distance);
        let velocity = vec3(
            self.rng.next_range(-0.8, 0.8),
            self.rng.next_range(3.0, 6.0),
            self.rng.next_range(-0.8, 0.8),
        );
        // Short fuse: the shell is already at altitude, it should pop near
        // the pointer.
        let fuse = self.rng.next_range(0.15, 0.35);
        let id = self.spawn_burst(position, velocity, fuse, config);
        log::info!("interactive burst {} at {:?}", id, position);
        Some(id)
    }

    fn spawn_autonomous(&mut self, config: &SimConfig) -> bool {
        let existing: Vec<Vec3> = self.bursts.iter().map(|b| b.position).collect();
        let position =
            match spacing::find_launch_position(&existing, &config.layout, &mut self.rng) {
                Some(p) => p,
                None => {
                    log::debug!("launch placement abandoned this tick");
                    return false;
                }
            };
        let shell = &config.shell;
        let launch_speed = self
            .rng
            .next_range(shell.launch_speed_range.0, shell.launch_speed_range.1);
        let velocity = vec3(
            self.rng.next_range(-1.5, 1.5),
            launch_speed,
            self.rng.next_range(-1.5, 1.5),
        );
        let fuse = self.rng.next_range(shell.fuse_range.0, shell.fuse_range.1);
        self.spawn_burst(position, velocity, fuse, config);
        true
    }

    fn spawn_burst(&mut self, position: Vec3, velocity: Vec3, fuse_time: f32, config: &SimConfig) -> u32 {
        let archetype = shells::pick_archetype(&config.archetypes, &mut self.rng);
        let (color, color_glow) = match sample_palette(&config.palette, &mut self.rng) {
            Some(c) => (c.rgb, c.glow),
            None => (Vec3::ONE, 1.0),
        };
        let id = self.next_burst_id;
        self.next_burst_id = self.next_burst_id.wrapping_add(1);
        log::debug!("spawn burst {} ({}) at {:?}", id, archetype.name(), position);
        self.bursts.push(Burst {
            id,
            archetype,
            position,
            velocity,
            age: 0.0,
            fuse_time,
            exploded: false,
            particle_target: config.shell.particles_per_burst,
            color,
            glow: color_glow * config.glow_multiplier,
            sparkle_chance: config.shell.sparkle_chance,
            fragment_count: config.shell.fragment_count,
            slots: Vec::new(),
            launch_time: self.scheduler.clock(),
        });
        id
    }

    fn advance_bursts(&mut self, dt: f32, config: &SimConfig) {
        for idx in 0..self.bursts.len() {
            let burst = &mut self.bursts[idx];
            if burst.exploded {
                // Dissipating: the integrator ages the owned sparks.
                continue;
            }
            burst.age += dt;
            physics::step_projectile(
                &mut burst.position,
                &mut burst.velocity,
                &config.environment,
                dt,
            );
            if !config.reduced_motion && self.rng.next() < burst.sparkle_chance {
                emit_trail(burst, &mut self.pool, &mut self.rng, config);
            }
            if burst.should_explode(config.layout.max_altitude) {
                explode_burst(
                    burst,
                    &mut self.pool,
                    &mut self.rng,
                    &mut self.shape_rng,
                    config,
                );
            }
        }
    }

    fn release_expired(&mut self) {
        for k in 0..self.expired_scratch.len() {
            let slot = self.expired_scratch[k];
            let owner = self.pool.owner_of(slot);
            if let Some(burst) = self.bursts.iter_mut().find(|b| b.id == owner) {
                burst.forget_slot(slot);
            }
            self.pool.release(slot);
        }
        self.expired_scratch.clear();
    }
}

/// One ascent-trail spark with a short lifespan.
fn emit_trail(burst: &mut Burst, pool: &mut ParticlePool, rng: &mut Rng, config: &SimConfig) {
    // Draws happen before allocation so the random stream is identical
    // under pool pressure.
    let drift = vec3(
        rng.next_range(-0.6, 0.6),
        rng.next_range(-0.6, 0.6),
        rng.next_range(-0.6, 0.6),
    );
    let life = rng.next_range(0.2, 0.4);
    let size = config.shell.spark_size_range.0 * 0.6;
    if let Some(slot) = pool.allocate() {
        pool.write(
            slot,
            burst.position,
            burst.velocity * 0.25 + drift,
            burst.color * 0.8,
            life,
            size,
            burst.glow,
            burst.id,
        );
        burst.slots.push(slot);
    }
}

/// Explosion: runs exactly once per burst, then flips it to dissipating.
fn explode_burst(
    burst: &mut Burst,
    pool: &mut ParticlePool,
    rng: &mut Rng,
    shape_rng: &mut Rng,
    config: &SimConfig,
) {
    let shell = &config.shell;
    let scale = if config.reduced_motion { 0.6 } else { 1.0 };
    // Quarter-capacity ceiling: no single explosion drains the pool.
    let cap = (pool.capacity() / 4) as u32;
    let count = ((burst.particle_target as f32 * scale) as u32).min(cap);
    let pattern = shells::generate_directions(burst.archetype, shape_rng);
    let wind = config.environment.wind;

    for i in 0..count as usize {
        let dir = pattern[i % pattern.len()];
        let speed = shell.base_speed * 0.6 + rng.next() * shell.base_speed * 0.5;
        let spread = rng.next_range(0.85, 1.15);
        let velocity = dir * speed * spread + wind * 0.2;
        let life = shell.spark_lifetime * rng.next_range(0.7, 1.3);
        let color = jitter_color(burst.color, rng);
        let size = rng.next_range(shell.spark_size_range.0, shell.spark_size_range.1);
        if let Some(slot) = pool.allocate() {
            pool.write(
                slot,
                burst.position,
                velocity,
                color,
                life,
                size,
                burst.glow,
                burst.id,
            );
            burst.slots.push(slot);
        }

        // Splitting stars: each crossette spark may burst again into
        // short-lived fragments with damped inherited velocity.
        if burst.archetype == Archetype::Crossette && rng.next() < 0.25 {
            for _ in 0..burst.fragment_count {
                let kick = vec3(
                    rng.next_range(-1.0, 1.0),
                    rng.next_range(-1.0, 1.0),
                    rng.next_range(-1.0, 1.0),
                ) * shell.base_speed
                    * 0.3;
                let child_life = shell.spark_lifetime * 0.4 * rng.next_range(0.7, 1.3);
                if let Some(slot) = pool.allocate() {
                    pool.write(
                        slot,
                        burst.position,
                        velocity * 0.55 + kick,
                        color,
                        child_life,
                        size * 0.7,
                        burst.glow,
                        burst.id,
                    );
                    burst.slots.push(slot);
                }
            }
        }
    }

    burst.exploded = true;
    log::debug!(
        "burst {} ({}) exploded into {} sparks",
        burst.id,
        burst.archetype.name(),
        burst.slots.len()
    );
}

fn jitter_color(base: Vec3, rng: &mut Rng) -> Vec3 {
    // Slightly-over-1 ceiling keeps additive highlights.
    vec3(
        (base.x * rng.next_range(0.9, 1.1)).clamp(0.0, 1.2),
        (base.y * rng.next_range(0.9, 1.1)).clamp(0.0, 1.2),
        (base.z * rng.next_range(0.9, 1.1)).clamp(0.0, 1.2),
    )
}
