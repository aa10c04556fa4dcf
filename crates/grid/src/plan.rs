use serde::Serialize;

use crate::cell::STATE_COUNT;
use crate::{CellState, Grid, GridError, GridSize};

/// Clicks needed to move a cell from `current` to `goal`.
///
/// Clicks only advance the cycle, so the answer is the forward distance
/// `(goal - current) mod 3`, always in `0..=2`.
pub fn click_count(current: CellState, goal: CellState) -> u8 {
    let clicks = (goal.ordinal() + STATE_COUNT - current.ordinal()) % STATE_COUNT;
    debug_assert!(clicks < STATE_COUNT);
    clicks
}

/// Same as [`click_count`] for raw ordinals; values outside `0..=2` are errors.
pub fn click_count_ordinal(current: u8, goal: u8) -> Result<u8, GridError> {
    let current = CellState::from_ordinal(current)?;
    let goal = CellState::from_ordinal(goal)?;
    Ok(click_count(current, goal))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellClicks {
    pub x: u32,
    pub y: u32,
    pub clicks: u8,
}

/// Per-cell click counts that turn one grid into the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickPlan {
    size: GridSize,
    cells: Vec<CellClicks>,
}

impl ClickPlan {
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Every cell in drawing order, including cells that need no clicks.
    pub fn cells(&self) -> &[CellClicks] {
        &self.cells
    }

    /// Cells that need at least one click, in drawing order.
    pub fn changes(&self) -> impl Iterator<Item = &CellClicks> {
        self.cells.iter().filter(|cell| cell.clicks > 0)
    }

    pub fn total_clicks(&self) -> u32 {
        self.cells.iter().map(|cell| cell.clicks as u32).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_clicks() == 0
    }

    /// Replays the plan against `grid`, returning the grid it produces.
    pub fn apply(&self, grid: &Grid) -> Result<Grid, GridError> {
        ensure_same_size(self.size, grid.size())?;

        let mut next = Vec::with_capacity(self.size.cell_count());
        for y in 0..self.size.height {
            for x in 0..self.size.width {
                let state = grid.get(x, y).unwrap_or_default();
                let clicks = self.clicks_at(x, y).unwrap_or(0);
                next.push(state.toggled_n(clicks));
            }
        }

        Grid::from_cells(self.size, next)
    }

    pub fn clicks_at(&self, x: u32, y: u32) -> Option<u8> {
        if !self.size.contains(x, y) {
            return None;
        }
        // Drawing order is column-major.
        let index = x as usize * self.size.height as usize + y as usize;
        self.cells.get(index).map(|cell| cell.clicks)
    }
}

pub fn plan_transition(previous: &Grid, goal: &Grid) -> Result<ClickPlan, GridError> {
    ensure_same_size(previous.size(), goal.size())?;

    let cells = previous
        .iter()
        .zip(goal.iter())
        .map(|((x, y, current), (_, _, target))| CellClicks {
            x,
            y,
            clicks: click_count(current, target),
        })
        .collect();

    Ok(ClickPlan { size: goal.size(), cells })
}

fn ensure_same_size(left: GridSize, right: GridSize) -> Result<(), GridError> {
    if left != right {
        return Err(GridError::SizeMismatch { left, right });
    }
    Ok(())
}
