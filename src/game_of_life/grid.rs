//! Dense grid storage and geometric transforms

use super::error::{GridError, GridResult};
use std::fmt;

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub const ALIVE_CHAR: char = '#';
    pub const DEAD_CHAR: char = ' ';

    #[inline]
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Character used for this cell in text forms
    pub fn as_char(self) -> char {
        match self {
            Cell::Alive => Self::ALIVE_CHAR,
            Cell::Dead => Self::DEAD_CHAR,
        }
    }

    /// Parse a cell from its text form
    pub fn from_char(ch: char) -> GridResult<Self> {
        match ch {
            Self::ALIVE_CHAR => Ok(Cell::Alive),
            Self::DEAD_CHAR => Ok(Cell::Dead),
            other => Err(GridError::format(format!(
                "invalid cell character {:?}, expected '{}' or '{}'",
                other,
                Self::ALIVE_CHAR,
                Self::DEAD_CHAR
            ))),
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

/// A dense, row-major 2D grid of cells.
///
/// `cells.len() == width * height` holds after every public operation, and
/// every fallible operation validates its arguments before touching storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a `width` x `height` grid of dead cells
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        }
    }

    /// Create a square grid of dead cells
    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Build a grid from text rows of `'#'` and `' '`
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> GridResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let mut cells = Vec::with_capacity(width * height);

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != width {
                return Err(GridError::format(format!(
                    "row {} has length {}, expected {}",
                    y, len, width
                )));
            }
            for ch in row.chars() {
                cells.push(Cell::from_char(ch)?);
            }
        }

        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn dead_count(&self) -> usize {
        self.total_cells() - self.alive_count()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> GridResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(GridError::out_of_bounds("cell", x, y, self.width, self.height));
        }
        Ok(x + self.width * y)
    }

    /// Read-only reference to the cell at `(x, y)`
    pub fn cell(&self, x: usize, y: usize) -> GridResult<&Cell> {
        let idx = self.index(x, y)?;
        Ok(&self.cells[idx])
    }

    /// Mutable reference to the cell at `(x, y)`
    pub fn cell_mut(&mut self, x: usize, y: usize) -> GridResult<&mut Cell> {
        let idx = self.index(x, y)?;
        Ok(&mut self.cells[idx])
    }

    pub fn get(&self, x: usize, y: usize) -> GridResult<Cell> {
        self.cell(x, y).copied()
    }

    pub fn set(&mut self, x: usize, y: usize, value: Cell) -> GridResult<()> {
        *self.cell_mut(x, y)? = value;
        Ok(())
    }

    /// Row-major cell storage
    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Iterate over the rows of the grid, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        (0..self.height).map(move |y| &self.cells[y * self.width..(y + 1) * self.width])
    }

    /// Coordinates `(x, y)` of every living cell in row-major order
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(i, _)| (i % self.width, i / self.width))
            .collect()
    }

    /// Resize to `width` x `height`, keeping the overlapping top-left region.
    ///
    /// Newly exposed cells are dead; cells outside the new bounds are dropped.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }

        if width == self.width {
            // Rows keep their offsets, so only the tail changes.
            self.cells.resize(width * height, Cell::Dead);
        } else {
            let keep_w = width.min(self.width);
            let keep_h = height.min(self.height);
            let mut cells = vec![Cell::Dead; width * height];
            for y in 0..keep_h {
                let src = y * self.width;
                let dst = y * width;
                cells[dst..dst + keep_w].copy_from_slice(&self.cells[src..src + keep_w]);
            }
            self.cells = cells;
        }

        self.width = width;
        self.height = height;
    }

    pub fn resize_square(&mut self, size: usize) {
        self.resize(size, size);
    }

    /// Copy out the window `[x0, x1) x [y0, y1)` as a new grid
    pub fn crop(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> GridResult<Grid> {
        if x0 > self.width || y0 > self.height {
            return Err(GridError::out_of_bounds("crop origin", x0, y0, self.width, self.height));
        }
        if x1 > self.width || y1 > self.height {
            return Err(GridError::out_of_bounds("crop end", x1, y1, self.width, self.height));
        }
        if x1 < x0 || y1 < y0 {
            return Err(GridError::out_of_bounds(
                "crop end before origin",
                x1,
                y1,
                self.width,
                self.height,
            ));
        }

        let width = x1 - x0;
        let height = y1 - y0;
        let mut cells = Vec::with_capacity(width * height);
        for y in y0..y1 {
            let start = x0 + self.width * y;
            cells.extend_from_slice(&self.cells[start..start + width]);
        }

        Ok(Grid { width, height, cells })
    }

    /// Overlay `other` with its top-left corner at `(x0, y0)`.
    ///
    /// With `alive_only` set, dead cells in `other` leave the target untouched.
    pub fn merge(&mut self, other: &Grid, x0: usize, y0: usize, alive_only: bool) -> GridResult<()> {
        let fits_x = x0.checked_add(other.width).is_some_and(|end| end <= self.width);
        let fits_y = y0.checked_add(other.height).is_some_and(|end| end <= self.height);
        if !fits_x || !fits_y {
            return Err(GridError::out_of_bounds(
                "merged region placed at",
                x0,
                y0,
                self.width,
                self.height,
            ));
        }

        for (y, row) in other.rows().enumerate() {
            let start = x0 + self.width * (y0 + y);
            let target = &mut self.cells[start..start + other.width];
            if alive_only {
                for (dst, src) in target.iter_mut().zip(row) {
                    if src.is_alive() {
                        *dst = Cell::Alive;
                    }
                }
            } else {
                target.copy_from_slice(row);
            }
        }

        Ok(())
    }

    /// Copy of the grid rotated clockwise by `rotation` quarter turns.
    ///
    /// Any sign is accepted; the amount is reduced modulo 4 first.
    pub fn rotate(&self, rotation: i32) -> Grid {
        let turns = rotation.rem_euclid(4);
        let mut rotated = self.clone();
        for _ in 0..turns {
            rotated = rotated.rotate_quarter();
        }
        rotated
    }

    fn rotate_quarter(&self) -> Grid {
        let mut rotated = Grid::new(self.height, self.width);
        for y in 0..self.height {
            for x in 0..self.width {
                let dst = (self.height - 1 - y) + rotated.width * x;
                rotated.cells[dst] = self.cells[x + self.width * y];
            }
        }
        rotated
    }

    /// Bordered text form, identical to the `Display` output
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = format!("+{}+", "-".repeat(self.width));
        writeln!(f, "{}", border)?;
        for row in self.rows() {
            write!(f, "|")?;
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{}", border)
    }
}
