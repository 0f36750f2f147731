//! Conway's Game of Life on finite and toroidal grids
//!
//! This library provides dense grid storage with geometric transforms, a
//! double-buffered simulation world, seed patterns, and ascii/binary
//! persistence for grids.

pub mod config;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use game_of_life::{Cell, Grid, GridError, World};
pub use simulation::{RunSummary, Simulation};

use anyhow::Result;

/// Main entry point for running a configured simulation to completion
pub fn run_simulation(settings: Settings) -> Result<RunSummary> {
    let mut simulation = Simulation::new(settings)?;
    let summary = simulation.run(|_| {});
    if simulation.settings().output.save_final {
        simulation.save_final()?;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_run_simulation_saves_final_state() {
        let temp_dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.output.directory = temp_dir.path().to_path_buf();
        settings.output.save_final = true;

        let summary = run_simulation(settings).unwrap();
        assert_eq!(summary.generations, 20);
        assert_eq!(summary.final_state.alive_cells, 5);

        let saved = game_of_life::load_grid(temp_dir.path().join("final.txt")).unwrap();
        assert_eq!(saved.alive_count(), 5);
    }
}
