use clickframe_grid::{quantize_samples, Grid, GridSize, Thresholds};
use image::RgbImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{downsample, Channel, FrameError, FrameLoader, Resample};

/// How a frame is reduced to a grid of cell states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Quantization {
    pub grid: GridSize,
    pub channel: Channel,
    pub resample: Resample,
    pub thresholds: Thresholds,
}

impl Quantization {
    pub fn grid_for(&self, frame: &RgbImage) -> Result<Grid, FrameError> {
        let samples = downsample(frame, self.grid, self.channel, self.resample)?;
        Ok(quantize_samples(&samples, self.thresholds))
    }
}

/// Loads and quantizes every frame in `indices` before anything is drawn.
///
/// `on_frame` is called after each grid is built with the position within
/// `indices` (1-based) and the total count. The first unreadable frame
/// aborts generation.
pub fn generate_grids<L, I>(
    loader: &L,
    indices: I,
    quantization: &Quantization,
    mut on_frame: impl FnMut(usize, usize),
) -> Result<Vec<Grid>, FrameError>
where
    L: FrameLoader + ?Sized,
    I: IntoIterator<Item = u32>,
{
    let indices: Vec<u32> = indices.into_iter().collect();
    let total = indices.len();
    info!(
        frames = total,
        width = quantization.grid.width,
        height = quantization.grid.height,
        "generating grids"
    );

    let mut grids = Vec::with_capacity(total);
    for (position, index) in indices.into_iter().enumerate() {
        let frame = loader.load(index)?;
        let grid = quantization.grid_for(&frame)?;
        debug!(index, position = position + 1, total, "frame quantized");
        grids.push(grid);
        on_frame(position + 1, total);
    }

    Ok(grids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickframe_grid::CellState;
    use image::Rgb;
    use std::collections::HashMap;

    struct MemoryLoader {
        frames: HashMap<u32, RgbImage>,
    }

    impl FrameLoader for MemoryLoader {
        fn load(&self, index: u32) -> Result<RgbImage, FrameError> {
            self.frames.get(&index).cloned().ok_or(FrameError::Unreadable {
                path: format!("memory/{index}").into(),
                source: image::ImageError::IoError(std::io::ErrorKind::NotFound.into()),
            })
        }
    }

    fn solid(value: u8) -> RgbImage {
        RgbImage::from_pixel(20, 10, Rgb([value, value, value]))
    }

    #[test]
    fn builds_one_grid_per_frame_in_order() {
        let loader = MemoryLoader {
            frames: HashMap::from([(1, solid(0)), (2, solid(180)), (3, solid(255))]),
        };
        let quantization = Quantization::default();
        let mut progress = Vec::new();

        let grids = generate_grids(&loader, 1..=3, &quantization, |done, total| {
            progress.push((done, total))
        })
        .expect("all frames exist");

        assert_eq!(grids.len(), 3);
        assert_eq!(grids[0].count(CellState::Full), 50);
        assert_eq!(grids[1].count(CellState::Half), 50);
        assert_eq!(grids[2].count(CellState::Empty), 50);
        assert_eq!(progress, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn missing_frame_stops_generation() {
        let loader = MemoryLoader { frames: HashMap::from([(1, solid(0))]) };

        let err = generate_grids(&loader, 1..=2, &Quantization::default(), |_, _| {})
            .expect_err("frame 2 is missing");

        assert!(matches!(err, FrameError::Unreadable { .. }));
    }
}
