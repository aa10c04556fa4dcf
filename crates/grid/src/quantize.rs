use serde::{Deserialize, Serialize};

use crate::{CellState, Grid, GridError, SampleGrid};

/// Brightness cut points separating the three cell states.
///
/// Samples below `low` are dark and map to `Full`; samples in `low..high`
/// map to `Half`; everything at or above `high` is `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholds")]
pub struct Thresholds {
    low: u8,
    high: u8,
}

#[derive(Deserialize)]
struct RawThresholds {
    low: u8,
    high: u8,
}

impl TryFrom<RawThresholds> for Thresholds {
    type Error = GridError;

    fn try_from(raw: RawThresholds) -> Result<Self, Self::Error> {
        Self::new(raw.low, raw.high)
    }
}

impl Thresholds {
    pub fn new(low: u8, high: u8) -> Result<Self, GridError> {
        if low > high {
            return Err(GridError::DescendingThresholds { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> u8 {
        self.low
    }

    pub fn high(&self) -> u8 {
        self.high
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { low: 100, high: 254 }
    }
}

pub fn quantize(sample: u8, thresholds: Thresholds) -> CellState {
    if sample < thresholds.low {
        CellState::Full
    } else if sample < thresholds.high {
        CellState::Half
    } else {
        CellState::Empty
    }
}

pub fn quantize_samples(samples: &SampleGrid, thresholds: Thresholds) -> Grid {
    samples.map(|sample| quantize(sample, thresholds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridSize;

    fn observed() -> Thresholds {
        Thresholds::new(100, 254).unwrap()
    }

    #[test]
    fn dark_samples_are_full() {
        assert_eq!(quantize(0, observed()), CellState::Full);
        assert_eq!(quantize(99, observed()), CellState::Full);
    }

    #[test]
    fn mid_samples_are_half() {
        assert_eq!(quantize(100, observed()), CellState::Half);
        assert_eq!(quantize(253, observed()), CellState::Half);
    }

    #[test]
    fn bright_samples_are_empty() {
        assert_eq!(quantize(254, observed()), CellState::Empty);
        assert_eq!(quantize(255, observed()), CellState::Empty);
    }

    #[test]
    fn equal_thresholds_skip_half() {
        let thresholds = Thresholds::new(128, 128).unwrap();
        assert_eq!(quantize(127, thresholds), CellState::Full);
        assert_eq!(quantize(128, thresholds), CellState::Empty);
    }

    #[test]
    fn descending_thresholds_are_rejected() {
        let err = Thresholds::new(200, 100).expect_err("low above high");
        assert!(matches!(err, GridError::DescendingThresholds { low: 200, high: 100 }));
    }

    #[test]
    fn deserializing_descending_thresholds_fails() {
        let result: Result<Thresholds, _> = serde_json::from_str(r#"{"low": 9, "high": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn quantize_samples_maps_every_cell() {
        let size = GridSize::new(3, 1).unwrap();
        let samples = SampleGrid::new(size, vec![0, 150, 255]).unwrap();

        let grid = quantize_samples(&samples, observed());

        assert_eq!(grid.get(0, 0), Some(CellState::Full));
        assert_eq!(grid.get(1, 0), Some(CellState::Half));
        assert_eq!(grid.get(2, 0), Some(CellState::Empty));
    }
}
