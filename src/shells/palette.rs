//! Weighted palette sampling.
//!
//! The palette is host-editable mid-session, so the weight sum is
//! recomputed on every draw; nothing here caches across calls.

use crate::random::Rng;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One entry in the show palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub id: u32,
    /// Linear RGB.
    pub rgb: Vec3,
    /// Relative probability mass; weights need not sum to 1.
    pub weight: f32,
    /// Glow multiplier applied to particles drawn in this color.
    pub glow: f32,
}

impl PaletteColor {
    pub fn new(id: u32, rgb: Vec3, weight: f32, glow: f32) -> Self {
        Self {
            id,
            rgb,
            weight,
            glow,
        }
    }
}

/// Weighted random selection over the palette.
///
/// Returns `None` only for an empty set. The running-sum walk falls back to
/// the final color when floating error leaves the draw unconsumed.
pub fn sample_palette<'a>(colors: &'a [PaletteColor], rng: &mut Rng) -> Option<&'a PaletteColor> {
    let last = colors.last()?;
    let total: f32 = colors.iter().map(|c| c.weight.max(0.0)).sum();
    let r = rng.next() * total;
    let mut acc = 0.0;
    for color in colors {
        acc += color.weight.max(0.0);
        if acc >= r {
            return Some(color);
        }
    }
    Some(last)
}
