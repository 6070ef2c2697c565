//! Fixed-capacity particle pool.
//!
//! All particle storage lives here as structure-of-arrays columns sized at
//! construction. Slots cycle through a free stack; an active working set
//! tracks the live slots so the integrator never scans dead storage. The
//! renderer reads the columns between ticks, either as typed slices or as
//! raw `f32` views suitable for buffer upload.

use glam::Vec3;

/// Owner value for a slot that sits on the free stack.
pub const FREE_OWNER: u32 = u32::MAX;

/// Default slot capacity.
pub const DEFAULT_CAPACITY: usize = 24_000;

/// Structure-of-arrays particle arena with free-list reuse.
#[derive(Debug)]
pub struct ParticlePool {
    pub(crate) positions: Vec<Vec3>,
    pub(crate) velocities: Vec<Vec3>,
    pub(crate) colors: Vec<Vec3>,
    pub(crate) life: Vec<f32>,
    pub(crate) age: Vec<f32>,
    pub(crate) size: Vec<f32>,
    pub(crate) glow: Vec<f32>,
    pub(crate) owner: Vec<u32>,
    /// Slot indices awaiting reuse (stack).
    free: Vec<u32>,
    /// Live slot indices, iterated once per tick.
    pub(crate) active: Vec<u32>,
    /// slot index -> position within `active`, or `FREE_OWNER` when free.
    active_pos: Vec<u32>,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: vec![Vec3::ZERO; capacity],
            velocities: vec![Vec3::ZERO; capacity],
            colors: vec![Vec3::ZERO; capacity],
            life: vec![0.0; capacity],
            age: vec![0.0; capacity],
            size: vec![0.0; capacity],
            glow: vec![0.0; capacity],
            owner: vec![FREE_OWNER; capacity],
            // Popping from the tail hands out low indices first.
            free: (0..capacity as u32).rev().collect(),
            active: Vec::with_capacity(capacity),
            active_pos: vec![FREE_OWNER; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Take a slot from the free stack, or `None` when the pool is
    /// exhausted. The caller is expected to `write` the slot next.
    pub fn allocate(&mut self) -> Option<u32> {
        let slot = self.free.pop()?;
        self.active_pos[slot as usize] = self.active.len() as u32;
        self.active.push(slot);
        Some(slot)
    }

    /// Fill every field of a freshly allocated slot.
    #[allow(clippy::too_many_arguments)]
    pub fn write(
        &mut self,
        slot: u32,
        position: Vec3,
        velocity: Vec3,
        color: Vec3,
        life: f32,
        size: f32,
        glow: f32,
        owner: u32,
    ) {
        let i = slot as usize;
        self.positions[i] = position;
        self.velocities[i] = velocity;
        self.colors[i] = color;
        self.life[i] = life;
        self.age[i] = 0.0;
        self.size[i] = size;
        self.glow[i] = glow;
        self.owner[i] = owner;
    }

    /// Return a slot to the free stack. Double release is a caller defect;
    /// the owning burst's index list must be scrubbed by the caller in the
    /// same step (the two-sided update for the owner/slot cycle).
    pub fn release(&mut self, slot: u32) {
        let i = slot as usize;
        debug_assert_ne!(self.owner[i], FREE_OWNER, "double release of slot {}", slot);
        self.owner[i] = FREE_OWNER;

        // Swap-remove from the active set, patching the moved slot's index.
        let pos = self.active_pos[i] as usize;
        let last = *self.active.last().unwrap_or(&slot);
        self.active.swap_remove(pos);
        if pos < self.active.len() {
            self.active_pos[last as usize] = pos as u32;
        }
        self.active_pos[i] = FREE_OWNER;

        self.free.push(slot);
    }

    pub fn owner_of(&self, slot: u32) -> u32 {
        self.owner[slot as usize]
    }

    /// Live slot indices, in iteration order. Order is not meaningful.
    pub fn active_slots(&self) -> &[u32] {
        &self.active
    }

    // Read-only column views for the renderer.

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.size
    }

    pub fn glows(&self) -> &[f32] {
        &self.glow
    }

    pub fn lives(&self) -> &[f32] {
        &self.life
    }

    pub fn ages(&self) -> &[f32] {
        &self.age
    }

    /// Position column as raw floats (xyz interleaved) for buffer upload.
    pub fn position_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Color column as raw floats (rgb interleaved) for buffer upload.
    pub fn color_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }
}
