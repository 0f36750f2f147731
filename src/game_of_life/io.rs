//! File I/O operations for Game of Life grids
//!
//! Two formats are supported:
//! - ascii: a `"<width> <height>"` header line followed by `height` rows of
//!   exactly `width` characters, `'#'` for alive and `' '` for dead.
//! - binary: little-endian `u32` width and height, then one bit per cell in
//!   row-major order, least significant bit first, zero padded to a byte.

use super::error::{GridError, GridResult};
use super::grid::{Cell, Grid};
use anyhow::{Context, Result};
use clap::ValueEnum;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BINARY_HEADER_LEN: usize = 8;

/// On-disk grid encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GridFormat {
    Ascii,
    Binary,
}

impl GridFormat {
    /// Pick a format from a file extension; `.bin` is binary, anything else ascii
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bin") => GridFormat::Binary,
            _ => GridFormat::Ascii,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            GridFormat::Ascii => "txt",
            GridFormat::Binary => "bin",
        }
    }
}

/// Convert a grid to the ascii format
pub fn to_ascii(grid: &Grid) -> String {
    let mut result = format!("{} {}\n", grid.width(), grid.height());
    result.reserve(grid.height() * (grid.width() + 1));

    for row in grid.rows() {
        result.extend(row.iter().map(|cell| cell.as_char()));
        result.push('\n');
    }

    result
}

fn parse_dimension(field: Option<&str>, name: &str) -> GridResult<usize> {
    let field = field.ok_or_else(|| GridError::format(format!("header is missing the {}", name)))?;
    field
        .parse()
        .map_err(|_| GridError::format(format!("{} {:?} is not a non-negative integer", name, field)))
}

/// Parse a grid from the ascii format
pub fn parse_ascii(content: &str) -> GridResult<Grid> {
    let mut lines = content.lines();
    let header = lines
        .next()
        .ok_or_else(|| GridError::format("grid file is empty"))?;

    let mut fields = header.split_whitespace();
    let width = parse_dimension(fields.next(), "width")?;
    let height = parse_dimension(fields.next(), "height")?;
    if fields.next().is_some() {
        return Err(GridError::format(format!("unexpected content in header {:?}", header)));
    }
    if width == 0 || height == 0 {
        return Err(GridError::InvalidDimension {
            width,
            height,
            reason: "width and height must be positive".to_string(),
        });
    }

    let mut rows = Vec::new();
    for y in 0..height {
        let line = lines.next().ok_or_else(|| {
            GridError::format(format!("expected {} rows, found {}", height, y))
        })?;
        let len = line.chars().count();
        if len != width {
            return Err(GridError::format(format!(
                "row {} has length {}, expected {}",
                y, len, width
            )));
        }
        rows.push(line);
    }

    if lines.any(|line| !line.is_empty()) {
        return Err(GridError::format(format!("unexpected content after {} rows", height)));
    }

    Grid::from_rows(&rows)
}

fn write_file<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write grid to file: {}", path.display()))
}

/// Save a grid to an ascii file
pub fn save_ascii<P: AsRef<Path>>(path: P, grid: &Grid) -> Result<()> {
    write_file(&path, to_ascii(grid).as_bytes())?;
    info!(
        "saved {}x{} grid to {}",
        grid.width(),
        grid.height(),
        path.as_ref().display()
    );
    Ok(())
}

/// Load a grid from an ascii file
pub fn load_ascii<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    let grid = parse_ascii(&content)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))?;
    info!(
        "loaded {}x{} grid from {}",
        grid.width(),
        grid.height(),
        path.as_ref().display()
    );
    Ok(grid)
}

/// Convert a grid to the binary format
pub fn encode_binary(grid: &Grid) -> GridResult<Vec<u8>> {
    let too_large = || GridError::InvalidDimension {
        width: grid.width(),
        height: grid.height(),
        reason: "dimensions do not fit in 32 bits".to_string(),
    };
    let width = u32::try_from(grid.width()).map_err(|_| too_large())?;
    let height = u32::try_from(grid.height()).map_err(|_| too_large())?;

    let mut bytes = Vec::with_capacity(BINARY_HEADER_LEN + grid.total_cells().div_ceil(8));
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());

    for chunk in grid.cells().chunks(8) {
        let byte = chunk
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .fold(0u8, |byte, (bit, _)| byte | (1 << bit));
        bytes.push(byte);
    }

    Ok(bytes)
}

/// Parse a grid from the binary format
pub fn decode_binary(bytes: &[u8]) -> GridResult<Grid> {
    if bytes.len() < BINARY_HEADER_LEN {
        return Err(GridError::format(format!(
            "binary grid needs an {} byte header, found {} bytes",
            BINARY_HEADER_LEN,
            bytes.len()
        )));
    }

    let (header, payload) = bytes.split_at(BINARY_HEADER_LEN);
    let width = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
    let height = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
    if width == 0 || height == 0 {
        return Err(GridError::InvalidDimension {
            width,
            height,
            reason: "width and height must be positive".to_string(),
        });
    }

    let total = width.checked_mul(height).ok_or_else(|| GridError::InvalidDimension {
        width,
        height,
        reason: "cell count overflows".to_string(),
    })?;
    let expected = total.div_ceil(8);
    if payload.len() != expected {
        return Err(GridError::format(format!(
            "expected {} bytes of cell data for {}x{} grid, found {}",
            expected,
            width,
            height,
            payload.len()
        )));
    }

    let mut grid = Grid::new(width, height);
    for (i, cell) in grid.cells_mut().iter_mut().enumerate() {
        *cell = Cell::from(payload[i / 8] & (1 << (i % 8)) != 0);
    }

    Ok(grid)
}

/// Save a grid to a binary file
pub fn save_binary<P: AsRef<Path>>(path: P, grid: &Grid) -> Result<()> {
    let bytes = encode_binary(grid)
        .with_context(|| format!("Failed to encode grid for file: {}", path.as_ref().display()))?;
    write_file(&path, &bytes)?;
    info!(
        "saved {}x{} grid to {}",
        grid.width(),
        grid.height(),
        path.as_ref().display()
    );
    Ok(())
}

/// Load a grid from a binary file
pub fn load_binary<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let bytes = std::fs::read(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    let grid = decode_binary(&bytes)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))?;
    info!(
        "loaded {}x{} grid from {}",
        grid.width(),
        grid.height(),
        path.as_ref().display()
    );
    Ok(grid)
}

/// Load a grid, choosing the format from the file extension
pub fn load_grid<P: AsRef<Path>>(path: P) -> Result<Grid> {
    load_grid_as(&path, GridFormat::from_path(&path))
}

pub fn load_grid_as<P: AsRef<Path>>(path: P, format: GridFormat) -> Result<Grid> {
    match format {
        GridFormat::Ascii => load_ascii(path),
        GridFormat::Binary => load_binary(path),
    }
}

/// Save a grid, choosing the format from the file extension
pub fn save_grid<P: AsRef<Path>>(path: P, grid: &Grid) -> Result<()> {
    save_grid_as(&path, grid, GridFormat::from_path(&path))
}

pub fn save_grid_as<P: AsRef<Path>>(path: P, grid: &Grid, format: GridFormat) -> Result<()> {
    match format {
        GridFormat::Ascii => save_ascii(path, grid),
        GridFormat::Binary => save_binary(path, grid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Grid {
        Grid::from_rows(&["# # ", " ## ", "   #"]).unwrap()
    }

    #[test]
    fn test_to_ascii() {
        assert_eq!(to_ascii(&sample()), "4 3\n# # \n ## \n   #\n");
    }

    #[test]
    fn test_parse_ascii() {
        let grid = parse_ascii("3 2\n # \n# #\n").unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.living_cells(), vec![(1, 0), (0, 1), (2, 1)]);

        // CRLF line endings and a missing final newline are tolerated
        let crlf = parse_ascii("3 2\r\n # \r\n# #").unwrap();
        assert_eq!(crlf, grid);
    }

    #[test]
    fn test_parse_ascii_rejects_bad_input() {
        assert!(matches!(parse_ascii(""), Err(GridError::Format(_))));
        assert!(matches!(parse_ascii("3\n###\n"), Err(GridError::Format(_))));
        assert!(matches!(parse_ascii("a 1\n#\n"), Err(GridError::Format(_))));
        assert!(matches!(parse_ascii("-1 1\n#\n"), Err(GridError::Format(_))));
        assert!(matches!(parse_ascii("0 1\n\n"), Err(GridError::InvalidDimension { .. })));
        assert!(matches!(parse_ascii("2 2\n##\n"), Err(GridError::Format(_))));
        assert!(matches!(parse_ascii("2 1\n###\n"), Err(GridError::Format(_))));
        assert!(matches!(parse_ascii("2 1\n#.\n"), Err(GridError::Format(_))));
        assert!(matches!(parse_ascii("2 1\n##\n##\n"), Err(GridError::Format(_))));
        assert!(matches!(parse_ascii("2 1 3\n##\n"), Err(GridError::Format(_))));
    }

    #[test]
    fn test_parse_ascii_huge_header_on_short_body() {
        let result = parse_ascii("1 99999999999999999\n#\n");
        match result {
            Err(GridError::Format(message)) => assert!(message.contains("found 1")),
            other => panic!("expected a format error, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_binary_layout() {
        let bytes = encode_binary(&sample()).unwrap();
        // 12 cells, row-major: 1010 0110 0001
        assert_eq!(bytes, vec![4, 0, 0, 0, 3, 0, 0, 0, 0b0110_0101, 0b0000_1000]);
    }

    #[test]
    fn test_binary_round_trip_across_byte_boundaries() {
        for (w, h) in [(1, 1), (3, 3), (8, 1), (4, 2), (5, 7), (9, 9)] {
            let mut grid = Grid::new(w, h);
            for y in 0..h {
                for x in 0..w {
                    if (x * 7 + y * 3) % 4 == 0 {
                        grid.set(x, y, Cell::Alive).unwrap();
                    }
                }
            }
            let bytes = encode_binary(&grid).unwrap();
            assert_eq!(bytes.len(), 8 + (w * h).div_ceil(8));
            assert_eq!(decode_binary(&bytes).unwrap(), grid);
        }
    }

    #[test]
    fn test_decode_binary_rejects_bad_input() {
        assert!(matches!(decode_binary(&[1, 0, 0]), Err(GridError::Format(_))));
        assert!(matches!(
            decode_binary(&[0, 0, 0, 0, 1, 0, 0, 0]),
            Err(GridError::InvalidDimension { .. })
        ));
        assert!(matches!(decode_binary(&[3, 0, 0, 0, 3, 0, 0, 0, 0xff]), Err(GridError::Format(_))));
        assert!(matches!(decode_binary(&[1, 0, 0, 0, 1, 0, 0, 0, 1, 0]), Err(GridError::Format(_))));
    }

    #[test]
    fn test_decode_binary_ignores_padding_bits() {
        let grid = decode_binary(&[2, 0, 0, 0, 1, 0, 0, 0, 0b1111_1101]).unwrap();
        assert_eq!(grid, Grid::from_rows(&["# "]).unwrap());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(GridFormat::from_path("a/b/world.bin"), GridFormat::Binary);
        assert_eq!(GridFormat::from_path("WORLD.BIN"), GridFormat::Binary);
        assert_eq!(GridFormat::from_path("world.txt"), GridFormat::Ascii);
        assert_eq!(GridFormat::from_path("world"), GridFormat::Ascii);
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let grid = sample();

        for name in ["nested/dir/grid.txt", "grid.bin"] {
            let path = temp_dir.path().join(name);
            save_grid(&path, &grid).unwrap();
            assert_eq!(load_grid(&path).unwrap(), grid);
        }

        let ascii = std::fs::read_to_string(temp_dir.path().join("nested/dir/grid.txt")).unwrap();
        assert_eq!(ascii, to_ascii(&grid));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempdir().unwrap();
        assert!(load_ascii(temp_dir.path().join("missing.txt")).is_err());
        assert!(load_binary(temp_dir.path().join("missing.bin")).is_err());
    }
}
