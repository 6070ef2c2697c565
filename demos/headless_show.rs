//! Headless demo: runs a seeded show for 30 simulated seconds and prints
//! rolling stats, then fires one interactive burst as a finale.
//!
//! Run with: cargo run --example headless_show

use anyhow::Result;
use pyro_sim::{FireworksEngine, SimConfig};

fn main() -> Result<()> {
    env_logger::init();

    let mut engine = FireworksEngine::with_default_capacity(2024);
    engine.resize(1280, 720);
    let config = SimConfig::default();
    let dt = 1.0 / 60.0;

    for frame in 0..1800 {
        engine.tick(dt, &config);
        if frame % 120 == 0 {
            println!(
                "t={:6.2}s  bursts={}  sparks={:5}  fps~{:.0}",
                engine.sim_clock(),
                engine.visible_burst_count(),
                engine.active_particle_count(),
                engine.fps()
            );
        }
    }

    // Finale: a pointer-triggered burst near the top of the frame.
    engine.trigger_burst_at_screen(640.0, 120.0, &config);
    for _ in 0..240 {
        engine.tick(dt, &config);
    }
    println!(
        "finale settled with {} sparks still alive",
        engine.active_particle_count()
    );

    engine.dispose();
    Ok(())
}
