use crate::GridError;

/// Number of distinct states a cell cycles through.
pub const STATE_COUNT: u8 = 3;

/// Visual state of a single grid cell.
///
/// Each left click in the target application advances a cell by one step,
/// wrapping from `Full` back to `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty = 0,
    Half = 1,
    Full = 2,
}

impl CellState {
    pub const ALL: [CellState; 3] = [CellState::Empty, CellState::Half, CellState::Full];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(value: u8) -> Result<Self, GridError> {
        match value {
            0 => Ok(Self::Empty),
            1 => Ok(Self::Half),
            2 => Ok(Self::Full),
            other => Err(GridError::InvalidOrdinal(other)),
        }
    }

    /// State after a single click.
    pub fn toggled(self) -> Self {
        self.toggled_n(1)
    }

    /// State after `clicks` clicks.
    pub fn toggled_n(self, clicks: u8) -> Self {
        let next = (self.ordinal() as u16 + clicks as u16) % STATE_COUNT as u16;
        Self::ALL[next as usize]
    }

    /// Glyph used by text previews.
    pub fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Half => '+',
            Self::Full => '#',
        }
    }
}
