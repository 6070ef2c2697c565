//! Pyro Sim Core
//!
//! Deterministic real-time fireworks particle simulation library.
//!
//! # Features
//!
//! - Seeded, reproducible shows (xorshift32 streams, integer-only mixing)
//! - Fixed-capacity particle pool with free-list reuse and SoA columns
//! - Six shell archetypes with pure per-archetype direction generators
//! - Weighted, host-editable color palette
//! - Spatially sparse launch placement and corrected interactive triggers
//! - Semi-implicit Euler integrator (gravity, wind, turbulence, drag,
//!   ground collision)
//! - Concurrency-windowed scheduler with staggered spawn pacing
//!
//! The host owns the frame loop and rendering; it calls
//! [`FireworksEngine::tick`] with a delta time and an immutable
//! [`SimConfig`] snapshot, then reads the pool's columns back for drawing.

pub mod config;
pub mod pool;
pub mod random;
pub mod shells;
pub mod sim;

// Re-export commonly used types
pub use config::{
    ConfigError, EnvironmentConfig, GroundPolicy, SchedulerConfig, ShellConfig, SimConfig,
    SpawnLayout,
};
pub use pool::{ParticlePool, DEFAULT_CAPACITY, FREE_OWNER};
pub use random::Rng;
pub use shells::{
    generate_directions, pick_archetype, sample_palette, Archetype, ArchetypeWeight, PaletteColor,
    PATTERN_DIRECTIONS,
};
pub use sim::{Burst, BurstPhase, FireworksEngine, Scheduler, LAUNCH_ATTEMPTS, MAX_TICK_DT};
