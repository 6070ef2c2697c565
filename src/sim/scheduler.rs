//! Spawn pacing.
//!
//! The scheduler owns the simulation clock and the next autonomous spawn
//! timestamp. Pacing parameters arrive fresh each tick inside the config
//! snapshot; only the clock state lives here.

use crate::config::SchedulerConfig;
use crate::random::Rng;

/// Effective floor for the global rate multiplier.
const MIN_GLOBAL_RATE: f32 = 0.2;

#[derive(Debug, Default, Clone)]
pub struct Scheduler {
    clock: f32,
    next_spawn_at: f32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: f32) {
        self.clock += dt;
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Whether the staggered spawn window has been reached.
    pub fn spawn_due(&self) -> bool {
        self.clock >= self.next_spawn_at
    }

    /// Draw the next stagger delay and push the spawn timestamp out from
    /// the current clock.
    pub fn schedule_next(&mut self, config: &SchedulerConfig, rng: &mut Rng) {
        let (min, max) = config.stagger_range;
        let stagger = min + (max - min) * rng.next();
        self.next_spawn_at = self.clock + stagger / config.global_rate.max(MIN_GLOBAL_RATE);
    }

    pub fn reset(&mut self) {
        self.clock = 0.0;
        self.next_spawn_at = 0.0;
    }
}
