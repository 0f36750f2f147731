//! Statistics gathered from grids and simulation runs

use crate::game_of_life::Grid;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Population statistics for a single grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridStatistics {
    pub width: usize,
    pub height: usize,
    pub total_cells: usize,
    pub alive_cells: usize,
    pub dead_cells: usize,
    /// Fraction of living cells (0.0 to 1.0)
    pub density: f64,
    /// Smallest `[x0, y0, x1, y1)` window holding every living cell
    pub bounding_box: Option<[usize; 4]>,
}

impl GridStatistics {
    pub fn from_grid(grid: &Grid) -> Self {
        let alive_cells = grid.alive_count();
        let total_cells = grid.total_cells();
        let density = if total_cells > 0 {
            alive_cells as f64 / total_cells as f64
        } else {
            0.0
        };

        let living = grid.living_cells();
        let bounding_box = living.first().map(|&(x, y)| {
            living.iter().fold([x, y, x + 1, y + 1], |[x0, y0, x1, y1], &(cx, cy)| {
                [x0.min(cx), y0.min(cy), x1.max(cx + 1), y1.max(cy + 1)]
            })
        });

        Self {
            width: grid.width(),
            height: grid.height(),
            total_cells,
            alive_cells,
            dead_cells: total_cells - alive_cells,
            density,
            bounding_box,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for GridStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid Statistics:")?;
        writeln!(f, "  Size: {}x{} ({} cells)", self.width, self.height, self.total_cells)?;
        writeln!(f, "  Living cells: {}", self.alive_cells)?;
        writeln!(f, "  Dead cells: {}", self.dead_cells)?;
        writeln!(f, "  Density: {:.1}%", self.density * 100.0)?;
        match self.bounding_box {
            Some([x0, y0, x1, y1]) => writeln!(f, "  Bounding box: [{}, {}) x [{}, {})", x0, x1, y0, y1),
            None => writeln!(f, "  Bounding box: none"),
        }
    }
}

/// Outcome of a completed simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub generations: u64,
    pub toroidal: bool,
    pub initial: GridStatistics,
    pub final_state: GridStatistics,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Ran {} generation(s) on a {}x{} {} world in {:.3}s",
            self.generations,
            self.final_state.width,
            self.final_state.height,
            if self.toroidal { "toroidal" } else { "bounded" },
            self.elapsed.as_secs_f64()
        )?;
        writeln!(
            f,
            "Living cells: {} -> {}",
            self.initial.alive_cells, self.final_state.alive_cells
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics() {
        let grid = Grid::from_rows(&["    ", " #  ", "  # ", "    "]).unwrap();
        let stats = GridStatistics::from_grid(&grid);

        assert_eq!(stats.total_cells, 16);
        assert_eq!(stats.alive_cells, 2);
        assert_eq!(stats.dead_cells, 14);
        assert!((stats.density - 0.125).abs() < f64::EPSILON);
        assert_eq!(stats.bounding_box, Some([1, 1, 3, 3]));
        assert!(stats.to_string().contains("Density: 12.5%"));
    }

    #[test]
    fn test_empty_grid_statistics() {
        let stats = GridStatistics::from_grid(&Grid::default());
        assert_eq!(stats.density, 0.0);
        assert_eq!(stats.bounding_box, None);
    }

    #[test]
    fn test_statistics_json() {
        let stats = GridStatistics::from_grid(&Grid::from_rows(&["#"]).unwrap());
        let json = stats.to_json().unwrap();
        let parsed: GridStatistics = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, stats);
    }
}
