//! Simulation configuration snapshot.
//!
//! Hosts hand the engine an immutable [`SimConfig`] on every tick; the core
//! never reaches out to ambient state. All values are assumed pre-validated
//! upstream — out-of-range numbers will not crash the core but may look
//! wrong. The whole tree serializes to JSON so hosts can persist presets.

use crate::shells::{Archetype, ArchetypeWeight, PaletteColor};
use glam::{vec3, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors raised while loading a configuration snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Spawn pacing parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Autonomous spawning runs only while playing; the minimum floor is
    /// enforced regardless.
    pub playing: bool,
    pub min_simultaneous: usize,
    pub max_simultaneous: usize,
    /// Inter-spawn delay range in seconds (min, max).
    pub stagger_range: (f32, f32),
    /// Global show pacing multiplier; effective floor 0.2.
    pub global_rate: f32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            playing: true,
            min_simultaneous: 3,
            max_simultaneous: 6,
            stagger_range: (0.4, 1.4),
            global_rate: 1.0,
        }
    }
}

/// Per-shell parameters shared by every archetype.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Explosion particle budget before the quarter-capacity cap.
    pub particles_per_burst: u32,
    /// Base spark speed in world units per second.
    pub base_speed: f32,
    /// Spark lifespan in seconds before jitter.
    pub spark_lifetime: f32,
    /// Spark render size range (min, max).
    pub spark_size_range: (f32, f32),
    /// Ascent fuse range in seconds (min, max).
    pub fuse_range: (f32, f32),
    /// Launch speed range in world units per second (min, max).
    pub launch_speed_range: (f32, f32),
    /// Per-tick probability of an ascent trail spark.
    pub sparkle_chance: f32,
    /// Children per splitting crossette star.
    pub fragment_count: u32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            particles_per_burst: 700,
            base_speed: 14.0,
            spark_lifetime: 2.4,
            spark_size_range: (0.5, 1.2),
            fuse_range: (1.2, 1.9),
            launch_speed_range: (22.0, 30.0),
            sparkle_chance: 0.35,
            fragment_count: 6,
        }
    }
}

/// What happens to a particle that crosses the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroundPolicy {
    /// Clamp remaining life to a short cap so the spark vanishes in place.
    #[default]
    Fade,
    /// Clamp to the ground and reflect vertical velocity, damped.
    Rebound,
}

/// Forces and collision environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Vertical acceleration; negative pulls down.
    pub gravity: f32,
    /// Horizontal wind acceleration (x and z components are used).
    pub wind: Vec3,
    /// Velocity damping per second.
    pub drag: f32,
    pub turbulence_frequency: f32,
    pub turbulence_strength: f32,
    pub ground: GroundPolicy,
    /// Vertical velocity retained on rebound.
    pub rebound_damping: f32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            gravity: -9.8,
            wind: vec3(0.6, 0.0, 0.2),
            drag: 0.18,
            turbulence_frequency: 1.7,
            turbulence_strength: 0.9,
            ground: GroundPolicy::Fade,
            rebound_damping: 0.4,
        }
    }
}

/// Where bursts may launch and explode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnLayout {
    /// Ground launch rectangle on the x axis (min, max).
    pub x_range: (f32, f32),
    /// Ground launch rectangle on the z axis (min, max).
    pub z_range: (f32, f32),
    /// Minimum separation between burst origins.
    pub min_distance: f32,
    /// Altitude interactive bursts pop at.
    pub target_altitude: f32,
    /// Ascent ceiling; reaching it forces the explosion.
    pub max_altitude: f32,
}

impl Default for SpawnLayout {
    fn default() -> Self {
        Self {
            x_range: (-30.0, 30.0),
            z_range: (-12.0, 12.0),
            min_distance: 8.0,
            target_altitude: 26.0,
            max_altitude: 38.0,
        }
    }
}

/// Complete per-tick configuration snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub scheduler: SchedulerConfig,
    pub shell: ShellConfig,
    pub environment: EnvironmentConfig,
    pub layout: SpawnLayout,
    pub archetypes: Vec<ArchetypeWeight>,
    pub palette: Vec<PaletteColor>,
    /// Thins explosions and suppresses trail sparkles.
    pub reduced_motion: bool,
    /// Post-processing glow scale handed through to particle glow values.
    pub glow_multiplier: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            shell: ShellConfig::default(),
            environment: EnvironmentConfig::default(),
            layout: SpawnLayout::default(),
            archetypes: Archetype::all()
                .iter()
                .map(|&archetype| ArchetypeWeight {
                    archetype,
                    enabled: true,
                    weight: 1.0,
                })
                .collect(),
            palette: default_palette(),
            reduced_motion: false,
            glow_multiplier: 1.0,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Stock palette loosely keyed to firework compounds.
pub fn default_palette() -> Vec<PaletteColor> {
    vec![
        PaletteColor::new(0, vec3(1.0, 0.12, 0.12), 1.0, 1.0), // strontium red
        PaletteColor::new(1, vec3(1.0, 0.78, 0.2), 1.2, 1.3),  // charcoal gold
        PaletteColor::new(2, vec3(0.0, 1.0, 0.39), 0.9, 1.0),  // barium green
        PaletteColor::new(3, vec3(0.24, 0.47, 1.0), 0.9, 1.1), // copper blue
        PaletteColor::new(4, vec3(0.71, 0.2, 1.0), 0.7, 1.0),  // rubidium violet
        PaletteColor::new(5, vec3(1.0, 1.0, 1.0), 0.6, 1.5),   // magnesium white
    ]
}
