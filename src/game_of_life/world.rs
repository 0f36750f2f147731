//! Double-buffered Game of Life world

use super::grid::{Cell, Grid};
use itertools::iproduct;
use log::debug;

/// Holds the current generation and a scratch buffer of the same size.
///
/// Each step writes the next generation into the scratch buffer and then
/// swaps the two buffers, so no cell data is copied between generations.
#[derive(Debug, Clone, Default)]
pub struct World {
    current: Grid,
    next: Grid,
    generation: u64,
}

impl World {
    /// Create a `width` x `height` world of dead cells
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            current: Grid::new(width, height),
            next: Grid::new(width, height),
            generation: 0,
        }
    }

    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Create a world whose first generation is `initial_state`
    pub fn from_grid(initial_state: Grid) -> Self {
        let next = Grid::new(initial_state.width(), initial_state.height());
        Self {
            current: initial_state,
            next,
            generation: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.current.width()
    }

    pub fn height(&self) -> usize {
        self.current.height()
    }

    pub fn total_cells(&self) -> usize {
        self.current.total_cells()
    }

    pub fn alive_count(&self) -> usize {
        self.current.alive_count()
    }

    pub fn dead_count(&self) -> usize {
        self.current.dead_count()
    }

    /// Number of steps taken since construction
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The current generation
    pub fn state(&self) -> &Grid {
        &self.current
    }

    /// Resize the world, keeping the overlapping region of the current state
    pub fn resize(&mut self, width: usize, height: usize) {
        debug!(
            "resizing world from {}x{} to {}x{}",
            self.width(),
            self.height(),
            width,
            height
        );
        self.current.resize(width, height);
        self.next = Grid::new(width, height);
    }

    pub fn resize_square(&mut self, size: usize) {
        self.resize(size, size);
    }

    /// Count living cells among the eight neighbours of `(x, y)`.
    ///
    /// Off-grid neighbours are dead unless `toroidal` is set, in which case
    /// coordinates wrap to the opposite edge.
    fn count_neighbours(&self, x: usize, y: usize, toroidal: bool) -> u8 {
        let width = self.width() as isize;
        let height = self.height() as isize;
        let cells = self.current.cells();

        let mut count = 0;
        for (dy, dx) in iproduct!(-1isize..=1, -1isize..=1) {
            if dx == 0 && dy == 0 {
                continue;
            }

            let mut nx = x as isize + dx;
            let mut ny = y as isize + dy;
            if toroidal {
                nx = wrap(nx, width);
                ny = wrap(ny, height);
            } else if nx < 0 || ny < 0 || nx >= width || ny >= height {
                continue;
            }

            if cells[(nx + width * ny) as usize].is_alive() {
                count += 1;
            }
        }
        count
    }

    /// Advance one generation
    pub fn step(&mut self, toroidal: bool) {
        let width = self.width();
        for y in 0..self.height() {
            for x in 0..width {
                let idx = x + width * y;
                let cell = match self.count_neighbours(x, y, toroidal) {
                    3 => Cell::Alive,
                    2 => self.current.cells()[idx],
                    _ => Cell::Dead,
                };
                self.next.cells_mut()[idx] = cell;
            }
        }

        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
    }

    /// Advance `steps` generations
    pub fn advance(&mut self, steps: usize, toroidal: bool) {
        for _ in 0..steps {
            self.step(toroidal);
        }
        debug!(
            "advanced {} step(s) to generation {}, {} alive",
            steps,
            self.generation,
            self.alive_count()
        );
    }
}

impl From<Grid> for World {
    fn from(initial_state: Grid) -> Self {
        Self::from_grid(initial_state)
    }
}

/// Wrap a coordinate that is at most one cell past either edge
#[inline]
fn wrap(coord: isize, extent: isize) -> isize {
    if coord < 0 {
        extent + coord
    } else if coord >= extent {
        coord - extent
    } else {
        coord
    }
}
