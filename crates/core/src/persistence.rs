//! Plain-text grid files
//!
//! Row-major, one grid row per line, values separated by single spaces. The
//! number of decimals is chosen by the caller; zero decimals gives the integer
//! layout used by the original tooling.

use crate::grid::Grid;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write `grid` as text with `precision` decimals per value
///
/// # Errors
///
/// Returns `SaveFailed` if the writer fails
pub fn write_grid_text<W: Write>(
    grid: &Grid,
    writer: &mut W,
    precision: usize,
) -> Result<(), PersistenceError> {
    write_rows(grid, writer, precision).map_err(|e| PersistenceError::SaveFailed(e.to_string()))
}

fn write_rows<W: Write>(grid: &Grid, writer: &mut W, precision: usize) -> io::Result<()> {
    for row in grid.rows() {
        let mut values = row.iter();
        if let Some(first) = values.next() {
            write!(writer, "{first:.precision$}")?;
        }
        for value in values {
            write!(writer, " {value:.precision$}")?;
        }
        writeln!(writer)?;
    }
    writer.flush()
}

/// Save `grid` to `path`, replacing any existing file
///
/// # Errors
///
/// Returns `SaveFailed` if the file cannot be created or written
pub fn save_grid_text<P: AsRef<Path>>(
    grid: &Grid,
    path: P,
    precision: usize,
) -> Result<(), PersistenceError> {
    let file =
        fs::File::create(path).map_err(|e| PersistenceError::SaveFailed(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    write_grid_text(grid, &mut writer, precision)
}

/// Parse a grid written by [`write_grid_text`]
///
/// # Errors
///
/// Returns `ParseFailed` if a value is not a number or the rows do not form
/// a square grid
pub fn parse_grid_text(contents: &str) -> Result<Grid, PersistenceError> {
    let mut data = Vec::new();
    let mut size = 0;

    for (line_no, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let before = data.len();
        for token in line.split_whitespace() {
            let value = token.parse::<f64>().map_err(|e| {
                PersistenceError::ParseFailed(format!("line {}: '{token}': {e}", line_no + 1))
            })?;
            data.push(value);
        }
        let width = data.len() - before;
        if size == 0 {
            size = width;
        } else if width != size {
            return Err(PersistenceError::ParseFailed(format!(
                "line {}: expected {size} values, got {width}",
                line_no + 1
            )));
        }
    }

    Grid::from_rows(size, data).map_err(|e| PersistenceError::ParseFailed(e.to_string()))
}

/// Load a grid text file from `path`
///
/// # Errors
///
/// Returns `LoadFailed` if the file cannot be read and `ParseFailed` if its
/// contents are not a square grid
pub fn load_grid_text<P: AsRef<Path>>(path: P) -> Result<Grid, PersistenceError> {
    let contents =
        fs::read_to_string(path).map_err(|e| PersistenceError::LoadFailed(e.to_string()))?;
    parse_grid_text(&contents)
}

/// Errors that can occur with persistence operations
#[derive(Debug)]
pub enum PersistenceError {
    /// Failed to read file
    LoadFailed(String),
    /// Failed to parse file contents
    ParseFailed(String),
    /// Failed to write file
    SaveFailed(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::LoadFailed(msg) => write!(f, "Failed to load: {msg}"),
            PersistenceError::ParseFailed(msg) => write!(f, "Failed to parse: {msg}"),
            PersistenceError::SaveFailed(msg) => write!(f, "Failed to save: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_layout() {
        let grid = Grid::from_rows(2, vec![100.0, 0.0, 49.6, 12.4]).unwrap();
        let mut out = Vec::new();
        write_grid_text(&grid, &mut out, 0).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "100 0\n50 12\n");
    }

    #[test]
    fn test_precision() {
        let grid = Grid::from_rows(1, vec![1.0 / 3.0]).unwrap();
        let mut out = Vec::new();
        write_grid_text(&grid, &mut out, 4).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0.3333\n");
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        assert!(matches!(
            parse_grid_text("1 2\n3\n"),
            Err(PersistenceError::ParseFailed(_))
        ));
        assert!(parse_grid_text("1 x\n3 4\n").is_err());
        // 2 columns but 3 rows is not square
        assert!(parse_grid_text("1 2\n3 4\n5 6\n").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let grid = Grid::from_rows(3, (0..9).map(f64::from).collect()).unwrap();
        let path = std::env::temp_dir().join("heat_diffusion_persistence_test.txt");

        save_grid_text(&grid, &path, 2).unwrap();
        let loaded = load_grid_text(&path).unwrap();
        assert_eq!(loaded, grid);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("heat_diffusion_does_not_exist.txt");
        assert!(matches!(
            load_grid_text(path),
            Err(PersistenceError::LoadFailed(_))
        ));
    }
}
