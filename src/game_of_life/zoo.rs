//! Pre-built seed patterns

use super::grid::{Cell, Grid};
use super::io::save_ascii;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Named patterns available as seeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Glider,
    RPentomino,
    LightWeightSpaceship,
    Block,
    Blinker,
}

impl Pattern {
    pub const ALL: [Pattern; 5] = [
        Pattern::Glider,
        Pattern::RPentomino,
        Pattern::LightWeightSpaceship,
        Pattern::Block,
        Pattern::Blinker,
    ];

    pub fn grid(self) -> Grid {
        match self {
            Pattern::Glider => glider(),
            Pattern::RPentomino => r_pentomino(),
            Pattern::LightWeightSpaceship => light_weight_spaceship(),
            Pattern::Block => block(),
            Pattern::Blinker => blinker(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Glider => "glider",
            Pattern::RPentomino => "r_pentomino",
            Pattern::LightWeightSpaceship => "light_weight_spaceship",
            Pattern::Block => "block",
            Pattern::Blinker => "blinker",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn with_alive(width: usize, height: usize, alive: &[(usize, usize)]) -> Grid {
    let mut grid = Grid::new(width, height);
    for &(x, y) in alive {
        grid.set(x, y, Cell::Alive)
            .expect("pattern cell lies outside its bounding box");
    }
    grid
}

/// 3x3 glider heading towards the bottom right
pub fn glider() -> Grid {
    with_alive(3, 3, &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)])
}

/// 3x3 R-pentomino
pub fn r_pentomino() -> Grid {
    with_alive(3, 3, &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)])
}

/// 5x4 light weight spaceship heading left
pub fn light_weight_spaceship() -> Grid {
    with_alive(
        5,
        4,
        &[(1, 0), (4, 0), (0, 1), (0, 2), (4, 2), (0, 3), (1, 3), (2, 3), (3, 3)],
    )
}

/// 2x2 still life
pub fn block() -> Grid {
    with_alive(2, 2, &[(0, 0), (1, 0), (0, 1), (1, 1)])
}

/// 3x1 period-2 oscillator
pub fn blinker() -> Grid {
    with_alive(3, 1, &[(0, 0), (1, 0), (2, 0)])
}

/// Write every pattern to `<dir>/<name>.txt` in the ascii format.
///
/// Existing files are left alone unless `overwrite` is set. Returns the
/// number of files written.
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P, overwrite: bool) -> Result<usize> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let mut written = 0;
    for pattern in Pattern::ALL {
        let path = dir.join(format!("{}.txt", pattern.name()));
        if path.exists() && !overwrite {
            continue;
        }
        save_ascii(&path, &pattern.grid())
            .with_context(|| format!("Failed to write pattern {}", pattern))?;
        written += 1;
    }

    Ok(written)
}
