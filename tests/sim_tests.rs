//! Integration tests for the simulation engine.

use pyro_sim::{FireworksEngine, SimConfig};
use std::collections::{HashMap, HashSet};

/// Bitwise snapshot of everything observable about a running show.
fn snapshot(engine: &FireworksEngine) -> (Vec<(u32, &'static str, [u32; 3])>, Vec<u32>) {
    let bursts = engine
        .bursts()
        .iter()
        .map(|b| {
            (
                b.id,
                b.archetype.name(),
                [
                    b.position.x.to_bits(),
                    b.position.y.to_bits(),
                    b.position.z.to_bits(),
                ],
            )
        })
        .collect();
    let particles = engine
        .pool()
        .position_data()
        .iter()
        .map(|v| v.to_bits())
        .collect();
    (bursts, particles)
}

// ==================== Determinism ====================

#[test]
fn test_identical_seed_and_config_replays_bit_for_bit() {
    let config = SimConfig::default();
    let mut a = FireworksEngine::new(1337, 8192);
    let mut b = FireworksEngine::new(1337, 8192);
    for _ in 0..500 {
        a.tick(0.016, &config);
        b.tick(0.016, &config);
    }
    assert_eq!(snapshot(&a), snapshot(&b));
}

#[test]
fn test_different_seeds_diverge() {
    let config = SimConfig::default();
    let mut a = FireworksEngine::new(1, 8192);
    let mut b = FireworksEngine::new(2, 8192);
    for _ in 0..200 {
        a.tick(0.016, &config);
        b.tick(0.016, &config);
    }
    assert_ne!(snapshot(&a), snapshot(&b));
}

// ==================== Pool conservation ====================

#[test]
fn test_pool_conservation_and_exclusive_ownership() {
    let capacity = 8192;
    let mut engine = FireworksEngine::new(99, capacity);
    let config = SimConfig::default();
    for tick in 0..1000 {
        engine.tick(0.016, &config);
        if tick % 50 != 0 {
            continue;
        }
        let pool = engine.pool();
        assert_eq!(pool.active_count() + pool.free_count(), capacity);

        // No slot index may appear in two bursts' lists.
        let mut seen = HashSet::new();
        for burst in engine.bursts() {
            for &slot in &burst.slots {
                assert!(seen.insert(slot), "slot {} owned twice", slot);
            }
        }
        // Every owned slot is live in the pool.
        assert!(seen.len() <= pool.active_count());
    }
}

// ==================== Scheduler window ====================

#[test]
fn test_visible_burst_count_stays_inside_window() {
    let mut engine = FireworksEngine::new(1337, 24_000);
    let config = SimConfig::default();
    assert_eq!(config.scheduler.min_simultaneous, 3);
    assert_eq!(config.scheduler.max_simultaneous, 6);

    for tick in 0..1000 {
        engine.tick(0.016, &config);
        let visible = engine.visible_burst_count();
        assert!(visible <= 6, "tick {}: {} bursts visible", tick, visible);
        if tick >= 1 {
            assert!(visible >= 3, "tick {}: only {} bursts visible", tick, visible);
        }
    }
}

// ==================== Lifecycle ====================

#[test]
fn test_burst_lifecycle_never_regresses() {
    let mut engine = FireworksEngine::new(7, 8192);
    let config = SimConfig::default();
    let mut exploded_ids: HashMap<u32, bool> = HashMap::new();
    let mut removed: HashSet<u32> = HashSet::new();

    for _ in 0..800 {
        let before: HashSet<u32> = engine.bursts().iter().map(|b| b.id).collect();
        engine.tick(0.016, &config);
        let after: HashSet<u32> = engine.bursts().iter().map(|b| b.id).collect();

        for burst in engine.bursts() {
            let was_exploded = exploded_ids.insert(burst.id, burst.exploded);
            if let Some(true) = was_exploded {
                assert!(burst.exploded, "burst {} regressed to ascending", burst.id);
            }
            assert!(!removed.contains(&burst.id), "burst {} came back", burst.id);
        }
        for gone in before.difference(&after) {
            removed.insert(*gone);
        }
    }
    assert!(!removed.is_empty(), "no burst completed in 800 ticks");
}

// ==================== Resource pressure ====================

#[test]
fn test_tiny_pool_never_panics() {
    let mut engine = FireworksEngine::new(5, 100);
    let mut config = SimConfig::default();
    config.shell.particles_per_burst = 1000;
    for _ in 0..500 {
        engine.tick(0.05, &config);
        let pool = engine.pool();
        assert_eq!(pool.active_count() + pool.free_count(), 100);
    }
}

#[test]
fn test_reduced_motion_thins_explosions() {
    let mut full = FireworksEngine::new(42, 24_000);
    let mut thin = FireworksEngine::new(42, 24_000);
    let mut config = SimConfig::default();
    config.shell.sparkle_chance = 0.0;
    let mut reduced = config.clone();
    reduced.reduced_motion = true;

    // Run both shows past several explosions and compare peak load.
    let mut full_peak = 0;
    let mut thin_peak = 0;
    for _ in 0..400 {
        full.tick(0.016, &config);
        thin.tick(0.016, &reduced);
        full_peak = full_peak.max(full.active_particle_count());
        thin_peak = thin_peak.max(thin.active_particle_count());
    }
    assert!(
        thin_peak < full_peak,
        "reduced motion not thinner: {} vs {}",
        thin_peak,
        full_peak
    );
}
