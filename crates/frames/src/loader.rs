use image::RgbImage;

use crate::{FrameError, FrameSequence};

/// Source of decoded frames, addressed by sequence index.
pub trait FrameLoader {
    fn load(&self, index: u32) -> Result<RgbImage, FrameError>;
}

/// Reads frames from the files named by a [`FrameSequence`].
#[derive(Debug, Clone)]
pub struct FileFrameLoader {
    sequence: FrameSequence,
}

impl FileFrameLoader {
    pub fn new(sequence: FrameSequence) -> Self {
        Self { sequence }
    }

    pub fn sequence(&self) -> &FrameSequence {
        &self.sequence
    }
}

impl FrameLoader for FileFrameLoader {
    fn load(&self, index: u32) -> Result<RgbImage, FrameError> {
        let path = self.sequence.path(index);
        let image = image::open(&path).map_err(|source| FrameError::Unreadable { path, source })?;
        Ok(image.to_rgb8())
    }
}
