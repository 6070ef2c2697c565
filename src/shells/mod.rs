//! Shell archetype catalog.
//!
//! The six shell shapes are a closed set: an enum tag plus a pure direction
//! generator per tag (see [`patterns`]). Hosts use the metadata helpers to
//! build selection UIs without hardcoding the list.

mod palette;
mod patterns;

pub use palette::{sample_palette, PaletteColor};
pub use patterns::{generate_directions, PATTERN_DIRECTIONS};

use crate::random::Rng;
use serde::{Deserialize, Serialize};

/// Available shell shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    Peony,
    Ring,
    Willow,
    Palm,
    Crossette,
    Comet,
}

impl Archetype {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "peony" => Some(Self::Peony),
            "ring" => Some(Self::Ring),
            "willow" => Some(Self::Willow),
            "palm" => Some(Self::Palm),
            "crossette" => Some(Self::Crossette),
            "comet" => Some(Self::Comet),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Peony => "peony",
            Self::Ring => "ring",
            Self::Willow => "willow",
            Self::Palm => "palm",
            Self::Crossette => "crossette",
            Self::Comet => "comet",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Peony => "Uniform spherical bloom",
            Self::Ring => "Flat horizontal halo",
            Self::Willow => "Drooping trails with jittered reach",
            Self::Palm => "Broad upward fronds",
            Self::Crossette => "Axis-aligned fans with splitting stars",
            Self::Comet => "Single upward-biased jet",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Peony,
            Self::Ring,
            Self::Willow,
            Self::Palm,
            Self::Crossette,
            Self::Comet,
        ]
    }
}

/// Enable/weight entry for one archetype in the configuration snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchetypeWeight {
    pub archetype: Archetype,
    pub enabled: bool,
    pub weight: f32,
}

/// Weighted pick over the enabled archetypes. Falls back to peony when the
/// table is empty or fully disabled so a spawn never fails on bad config.
pub fn pick_archetype(table: &[ArchetypeWeight], rng: &mut Rng) -> Archetype {
    let total: f32 = table
        .iter()
        .filter(|e| e.enabled)
        .map(|e| e.weight.max(0.0))
        .sum();
    if total <= 0.0 {
        return Archetype::Peony;
    }
    let r = rng.next() * total;
    let mut acc = 0.0;
    let mut last = Archetype::Peony;
    for entry in table.iter().filter(|e| e.enabled) {
        acc += entry.weight.max(0.0);
        last = entry.archetype;
        if acc >= r {
            return entry.archetype;
        }
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_parsing() {
        assert_eq!(Archetype::from_str("peony"), Some(Archetype::Peony));
        assert_eq!(Archetype::from_str("CROSSETTE"), Some(Archetype::Crossette));
        assert_eq!(Archetype::from_str("chrysanthemum"), None);
    }

    #[test]
    fn test_name_round_trip() {
        for archetype in Archetype::all() {
            assert_eq!(Archetype::from_str(archetype.name()), Some(*archetype));
        }
    }

    #[test]
    fn test_pick_respects_disabled_entries() {
        let table = vec![
            ArchetypeWeight {
                archetype: Archetype::Peony,
                enabled: false,
                weight: 100.0,
            },
            ArchetypeWeight {
                archetype: Archetype::Ring,
                enabled: true,
                weight: 1.0,
            },
        ];
        let mut rng = Rng::new(5);
        for _ in 0..100 {
            assert_eq!(pick_archetype(&table, &mut rng), Archetype::Ring);
        }
    }

    #[test]
    fn test_pick_empty_table_falls_back() {
        let mut rng = Rng::new(5);
        assert_eq!(pick_archetype(&[], &mut rng), Archetype::Peony);
    }

    #[test]
    fn test_pick_follows_weights() {
        let table = vec![
            ArchetypeWeight {
                archetype: Archetype::Willow,
                enabled: true,
                weight: 3.0,
            },
            ArchetypeWeight {
                archetype: Archetype::Comet,
                enabled: true,
                weight: 1.0,
            },
        ];
        let mut rng = Rng::new(11);
        let mut willow = 0usize;
        let samples = 20_000;
        for _ in 0..samples {
            if pick_archetype(&table, &mut rng) == Archetype::Willow {
                willow += 1;
            }
        }
        let ratio = willow as f32 / samples as f32;
        assert!((ratio - 0.75).abs() < 0.02, "ratio {}", ratio);
    }
}
