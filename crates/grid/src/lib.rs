//! Cell grids for click-driven displays.
//!
//! A target application shows a fixed grid of cells; each left click
//! advances a cell through `Empty -> Half -> Full -> Empty`. This crate turns
//! brightness samples into cell states and works out how many clicks each
//! cell needs to go from one frame to the next.
//!
//! # Example
//!
//! ```
//! use clickframe_grid::{
//!     plan_transition, quantize_samples, Grid, GridSize, SampleGrid, Thresholds,
//! };
//!
//! let size = GridSize::new(2, 1).unwrap();
//! let samples = SampleGrid::new(size, vec![20, 255]).unwrap();
//! let goal = quantize_samples(&samples, Thresholds::default());
//!
//! let plan = plan_transition(&Grid::empty(size).unwrap(), &goal).unwrap();
//! assert_eq!(plan.total_clicks(), 2);
//! ```

mod cell;
mod grid;
mod plan;
mod quantize;

pub use cell::{CellState, STATE_COUNT};
pub use grid::{Grid, GridSize, SampleGrid};
pub use plan::{click_count, click_count_ordinal, plan_transition, CellClicks, ClickPlan};
pub use quantize::{quantize, quantize_samples, Thresholds};

#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("cell ordinal {0} is outside 0..=2")]
    InvalidOrdinal(u8),
    #[error("grid must have at least one cell (got {width}x{height})")]
    EmptyGrid { width: u32, height: u32 },
    #[error("expected {expected} cells, got {actual}")]
    CellCount { expected: usize, actual: usize },
    #[error(
        "grid sizes differ: {}x{} vs {}x{}",
        left.width,
        left.height,
        right.width,
        right.height
    )]
    SizeMismatch { left: GridSize, right: GridSize },
    #[error("thresholds must ascend (low={low}, high={high})")]
    DescendingThresholds { low: u8, high: u8 },
}
