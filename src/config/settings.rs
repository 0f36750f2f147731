//! Configuration settings for the Game of Life simulator

use crate::game_of_life::{GridFormat, Pattern};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub world: WorldConfig,
    pub simulation: SimulationConfig,
    pub seed: SeedConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
    pub toroidal: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub generations: usize,
    /// Report every N generations; 0 reports only the final state
    pub print_every: usize,
}

/// Where the initial state comes from and where it is placed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub pattern: Option<Pattern>,
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub x: usize,
    #[serde(default)]
    pub y: usize,
    /// Clockwise quarter turns applied before placement
    #[serde(default)]
    pub rotation: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub format: GridFormat,
    pub save_final: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world: WorldConfig {
                width: 32,
                height: 16,
                toroidal: true,
            },
            simulation: SimulationConfig {
                generations: 20,
                print_every: 5,
            },
            seed: SeedConfig {
                pattern: Some(Pattern::Glider),
                file: None,
                x: 1,
                y: 1,
                rotation: 0,
            },
            output: OutputConfig {
                directory: PathBuf::from("output"),
                format: GridFormat::Ascii,
                save_final: false,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.world.width == 0 || self.world.height == 0 {
            anyhow::bail!(
                "World dimensions must be positive, got {}x{}",
                self.world.width,
                self.world.height
            );
        }

        match (&self.seed.pattern, &self.seed.file) {
            (Some(_), Some(_)) => anyhow::bail!("Seed must name either a pattern or a file, not both"),
            (None, None) => anyhow::bail!("Seed must name a pattern or a file"),
            (None, Some(file)) if !file.exists() => {
                anyhow::bail!("Seed file does not exist: {}", file.display())
            }
            _ => {}
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.world.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.world.height = height;
        }
        if let Some(toroidal) = cli_overrides.toroidal {
            self.world.toroidal = toroidal;
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(pattern) = cli_overrides.pattern {
            self.seed.pattern = Some(pattern);
            self.seed.file = None;
        }
        if let Some(ref file) = cli_overrides.seed_file {
            self.seed.file = Some(file.clone());
            self.seed.pattern = None;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub toroidal: Option<bool>,
    pub generations: Option<usize>,
    pub pattern: Option<Pattern>,
    pub seed_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}
