use serde::{Deserialize, Serialize};

use crate::{CellState, GridError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.width == 0 || self.height == 0 {
            return Err(GridError::EmptyGrid { width: self.width, height: self.height });
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Cell coordinates in drawing order: column by column, top to bottom.
    pub fn positions(&self) -> impl Iterator<Item = (u32, u32)> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| (x, y)))
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self { width: 10, height: 5 }
    }
}

/// A fully populated grid of cell states.
///
/// Every constructor fills every cell, so a grid handed to the planner is
/// never partially initialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: GridSize,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn filled(size: GridSize, state: CellState) -> Result<Self, GridError> {
        size.validate()?;
        Ok(Self { size, cells: vec![state; size.cell_count()] })
    }

    pub fn empty(size: GridSize) -> Result<Self, GridError> {
        Self::filled(size, CellState::Empty)
    }

    pub fn from_fn(
        size: GridSize,
        mut f: impl FnMut(u32, u32) -> CellState,
    ) -> Result<Self, GridError> {
        size.validate()?;
        let mut cells = Vec::with_capacity(size.cell_count());
        for y in 0..size.height {
            for x in 0..size.width {
                cells.push(f(x, y));
            }
        }
        Ok(Self { size, cells })
    }

    /// Builds a grid from row-major cells.
    pub fn from_cells(size: GridSize, cells: Vec<CellState>) -> Result<Self, GridError> {
        size.validate()?;
        if cells.len() != size.cell_count() {
            return Err(GridError::CellCount { expected: size.cell_count(), actual: cells.len() });
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn get(&self, x: u32, y: u32) -> Option<CellState> {
        if !self.size.contains(x, y) {
            return None;
        }
        Some(self.cells[self.size.index(x, y)])
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| **cell == state).count()
    }

    /// Cells in drawing order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, CellState)> + '_ {
        self.size.positions().map(move |(x, y)| (x, y, self.cells[self.size.index(x, y)]))
    }

    /// Renders the grid one text row per grid row.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.size.height as usize);
        for row in self.cells.chunks(self.size.width as usize) {
            out.extend(row.iter().map(|cell| cell.glyph()));
            out.push('\n');
        }
        out
    }
}

/// One brightness sample per grid cell, taken from a downsampled frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleGrid {
    size: GridSize,
    samples: Vec<u8>,
}

impl SampleGrid {
    /// Builds a sample grid from row-major samples.
    pub fn new(size: GridSize, samples: Vec<u8>) -> Result<Self, GridError> {
        size.validate()?;
        if samples.len() != size.cell_count() {
            return Err(GridError::CellCount {
                expected: size.cell_count(),
                actual: samples.len(),
            });
        }
        Ok(Self { size, samples })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if !self.size.contains(x, y) {
            return None;
        }
        Some(self.samples[self.size.index(x, y)])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.samples
    }

    /// Maps every sample to a cell state, keeping the layout.
    pub fn map(&self, mut f: impl FnMut(u8) -> CellState) -> Grid {
        Grid { size: self.size, cells: self.samples.iter().map(|sample| f(*sample)).collect() }
    }
}
