// app.rs
// Headless run loop for the binary: fixed timestep, periodic stats
// logging, optional tick count from the command line.

use crate::config::{self, SimConfig};
use crate::simulation::Simulation;

const CONFIG_PATH: &str = "ball_arena.toml";
const DEFAULT_TICKS: u64 = 60_000;
/// Ticks between stats lines (one simulated second).
const REPORT_EVERY: u64 = 100;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = if std::path::Path::new(CONFIG_PATH).exists() {
        log::info!("loading configuration from {CONFIG_PATH}");
        SimConfig::load_from_file(CONFIG_PATH)?
    } else {
        SimConfig::default()
    };

    let ticks: u64 = match std::env::args().nth(1) {
        Some(arg) => arg.parse().map_err(|_| format!("invalid tick count: {arg}"))?,
        None => DEFAULT_TICKS,
    };

    let mut sim = Simulation::new(config)?;
    log::info!(
        "arena {}x{}, {}x{} regions, seed {}",
        sim.config().width,
        sim.config().height,
        sim.config().regions_x,
        sim.config().regions_y,
        sim.config().seed,
    );

    let mut last_winner = sim.last_winner();
    let started = std::time::Instant::now();
    for tick in 0..ticks {
        sim.tick(config::BASE_TICK);

        let winner = sim.last_winner();
        if winner != last_winner {
            if let Some(category) = winner {
                log::info!("round over at t={:.2}s, winner: {}", sim.time(), category.name());
            }
            last_winner = winner;
        }

        if tick % REPORT_EVERY == 0 {
            log::debug!(
                "t={:.2}s live={} created={} counts={:?}",
                sim.time(),
                sim.len(),
                sim.total_created(),
                sim.counts(),
            );
        }
    }

    log::info!(
        "{} ticks in {:.2?}; {} bodies live at exit",
        ticks,
        started.elapsed(),
        sim.len(),
    );

    #[cfg(feature = "profiling")]
    crate::PROFILER.lock().print_and_clear();

    Ok(())
}
