//! Deterministic pseudo-random number generation.
//!
//! Every random decision in the simulation flows through [`Rng`] so that a
//! fixed seed reproduces the same show bit-for-bit across runs and
//! platforms. The state transition is integer-only (xorshift32); floats are
//! derived from the high mantissa bits, never from platform-dependent
//! rounding.

/// Reproducible xorshift32 generator.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u32,
}

impl Rng {
    /// Create a generator from a seed. Zero is coerced to one since it is
    /// the xorshift fixed point.
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    /// Swap in a new state. Entities spawned from the old stream are
    /// unaffected.
    pub fn reseed(&mut self, seed: u32) {
        self.state = seed.max(1);
    }

    fn next_u32(&mut self) -> u32 {
        // xorshift32
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Uniform float in `[0, 1)`.
    pub fn next(&mut self) -> f32 {
        // Top 24 bits fill the f32 mantissa exactly, so the result is
        // strictly below 1.0.
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform float in `[min, max)`.
    pub fn next_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next() * (max - min)
    }
}
