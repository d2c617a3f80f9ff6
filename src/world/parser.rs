use crate::error::LayoutError;
use crate::position::Position;
use crate::world::terrain::centre_of;
use crate::world::tile::TileType;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One tile of a parsed layout, by grid coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutCell {
    pub row: usize,
    pub col: usize,
    pub tile_type: TileType,
}

impl LayoutCell {
    /// Centre of this cell in world coordinates
    pub fn centre(&self, tile_size: f64) -> Position {
        centre_of((self.col as i64, self.row as i64), tile_size)
    }
}

/// A parsed grid of tiles
///
/// Rows count only grid lines; blank and comment lines do not take a row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    cells: Vec<LayoutCell>,
    rows: usize,
    cols: usize,
}

impl Layout {
    pub fn cells(&self) -> &[LayoutCell] {
        &self.cells
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Width of the widest row
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn count(&self, tile_type: TileType) -> usize {
        self.cells.iter().filter(|c| c.tile_type == tile_type).count()
    }

    fn push_line(&mut self, line_no: usize, line: &str) -> Result<(), LayoutError> {
        let row = self.rows;
        let mut width = 0;
        for (col, symbol) in line.chars().enumerate() {
            width = col + 1;
            if symbol == ' ' {
                continue;
            }
            let tile_type = TileType::from_symbol(symbol).ok_or(LayoutError::UnknownTile {
                line: line_no,
                column: col + 1,
                symbol,
            })?;
            self.cells.push(LayoutCell { row, col, tile_type });
        }
        self.cols = self.cols.max(width);
        self.rows += 1;
        Ok(())
    }
}

/// Lines that carry no tiles
fn is_skipped(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with(';')
}

/// Parse a layout from a file path
pub fn parse_layout<P: AsRef<Path>>(path: P) -> Result<Layout, LayoutError> {
    let file = File::open(path)?;
    parse_lines(BufReader::with_capacity(64 * 1024, file))
}

/// Parse a layout directly from an in-memory string
pub fn parse_layout_str(src: &str) -> Result<Layout, LayoutError> {
    parse_lines(src.as_bytes())
}

fn parse_lines<R: BufRead>(reader: R) -> Result<Layout, LayoutError> {
    let mut layout = Layout::default();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end();
        if is_skipped(line) {
            continue;
        }
        layout.push_line(idx + 1, line)?;
    }

    if layout.cells.is_empty() {
        return Err(LayoutError::Empty);
    }
    Ok(layout)
}
