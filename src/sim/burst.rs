//! Burst records.
//!
//! A burst is one shell instance from launch to full dissipation. The
//! engine mutates it every tick; the record itself only knows its state and
//! the pool slots it owns (non-owning indices — the pool owns the storage).

use crate::shells::Archetype;
use glam::Vec3;

/// Observable lifecycle phase. `Exploded` is a transient step inside the
/// tick; between ticks a burst is either ascending or dissipating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstPhase {
    Ascending,
    Dissipating,
}

#[derive(Debug, Clone)]
pub struct Burst {
    pub id: u32,
    pub archetype: Archetype,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Seconds since launch.
    pub age: f32,
    /// Ascent duration before the shell pops.
    pub fuse_time: f32,
    pub exploded: bool,
    /// Requested spark count before the pool-pressure cap.
    pub particle_target: u32,
    /// Color snapshot taken from the palette at spawn.
    pub color: Vec3,
    /// Glow value written into owned slots.
    pub glow: f32,
    pub sparkle_chance: f32,
    pub fragment_count: u32,
    /// Owned pool slots; order is not meaningful.
    pub slots: Vec<u32>,
    /// Simulation clock at launch.
    pub launch_time: f32,
}

impl Burst {
    pub fn phase(&self) -> BurstPhase {
        if self.exploded {
            BurstPhase::Dissipating
        } else {
            BurstPhase::Ascending
        }
    }

    /// Counts toward the scheduler's concurrency window: not yet exploded,
    /// or exploded but still holding live sparks.
    pub fn is_visible(&self) -> bool {
        !self.exploded || !self.slots.is_empty()
    }

    /// Eligible for removal from the active collection.
    pub fn is_done(&self) -> bool {
        self.exploded && self.slots.is_empty()
    }

    /// Fuse elapsed or ceiling reached.
    pub fn should_explode(&self, ceiling: f32) -> bool {
        self.age >= self.fuse_time || self.position.y >= ceiling
    }

    /// Scrub a released slot from the owned list (the burst side of the
    /// two-sided owner/slot update). Unordered, so swap-remove.
    pub fn forget_slot(&mut self, slot: u32) {
        if let Some(pos) = self.slots.iter().position(|&s| s == slot) {
            self.slots.swap_remove(pos);
        }
    }
}
