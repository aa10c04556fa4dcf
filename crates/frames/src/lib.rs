//! Frame input for clickframe: numbered image files on disk, decoded and
//! reduced to one brightness sample per grid cell.

mod generate;
mod loader;
mod sample;
mod sequence;

use std::path::PathBuf;

pub use generate::{generate_grids, Quantization};
pub use loader::{FileFrameLoader, FrameLoader};
pub use sample::{downsample, Channel, Resample};
pub use sequence::FrameSequence;

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("failure reading frame {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error(transparent)]
    Grid(#[from] clickframe_grid::GridError),
}
