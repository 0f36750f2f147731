//! Simulation runs driven by `Settings`

use super::summary::{GridStatistics, RunSummary};
use crate::config::{SeedConfig, Settings};
use crate::game_of_life::{load_grid, save_grid_as, Grid, World};
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

/// A seeded world together with the settings that drive it
pub struct Simulation {
    settings: Settings,
    world: World,
}

impl Simulation {
    /// Build the world described by `settings`, loading the seed pattern or file
    pub fn new(settings: Settings) -> Result<Self> {
        let seed = Self::load_seed(&settings.seed)?;
        Self::with_seed(settings, seed)
    }

    /// Build the world with an explicit seed grid (useful for testing)
    pub fn with_seed(settings: Settings, seed: Grid) -> Result<Self> {
        let seed = seed.rotate(settings.seed.rotation);
        let mut initial = Grid::new(settings.world.width, settings.world.height);
        initial
            .merge(&seed, settings.seed.x, settings.seed.y, true)
            .with_context(|| {
                format!(
                    "Seed of size {}x{} does not fit in the {}x{} world at ({}, {})",
                    seed.width(),
                    seed.height(),
                    initial.width(),
                    initial.height(),
                    settings.seed.x,
                    settings.seed.y
                )
            })?;

        info!(
            "seeded {}x{} world with {} living cells",
            initial.width(),
            initial.height(),
            initial.alive_count()
        );

        Ok(Self {
            settings,
            world: World::from_grid(initial),
        })
    }

    fn load_seed(seed: &SeedConfig) -> Result<Grid> {
        match (&seed.pattern, &seed.file) {
            (Some(pattern), None) => Ok(pattern.grid()),
            (None, Some(file)) => load_grid(file)
                .with_context(|| format!("Failed to load seed file {}", file.display())),
            _ => anyhow::bail!("Seed must name exactly one of a pattern or a file"),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Advance the configured number of generations.
    ///
    /// `observer` sees the world every `print_every` generations (starting
    /// with the seed) and always sees the final state.
    pub fn run<F: FnMut(&World)>(&mut self, mut observer: F) -> RunSummary {
        let start_time = Instant::now();
        let toroidal = self.settings.world.toroidal;
        let every = self.settings.simulation.print_every;
        let initial = GridStatistics::from_grid(self.world.state());

        info!(
            "running {} generation(s), toroidal: {}",
            self.settings.simulation.generations, toroidal
        );

        if every > 0 {
            observer(&self.world);
        }

        let mut remaining = self.settings.simulation.generations;
        while remaining > 0 {
            let batch = if every == 0 { remaining } else { every.min(remaining) };
            self.world.advance(batch, toroidal);
            remaining -= batch;
            if every > 0 {
                observer(&self.world);
            }
        }

        if every == 0 {
            observer(&self.world);
        }

        let summary = RunSummary {
            generations: self.world.generation(),
            toroidal,
            initial,
            final_state: GridStatistics::from_grid(self.world.state()),
            elapsed: start_time.elapsed(),
        };
        info!(
            "finished at generation {} with {} living cells",
            summary.generations, summary.final_state.alive_cells
        );
        summary
    }

    /// Write the current state to `<output dir>/final.<ext>`
    pub fn save_final(&self) -> Result<PathBuf> {
        let format = self.settings.output.format;
        let path = self
            .settings
            .output
            .directory
            .join(format!("final.{}", format.extension()));
        save_grid_as(&path, self.world.state(), format)
            .context("Failed to save final state")?;
        Ok(path)
    }
}
