use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Numbered frame files on disk, e.g. `frames/output_0001.jpg`.
///
/// Indices are zero padded to the width of `last`, so a sequence ending at
/// 6572 names its first frame `output_0001`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSequence {
    pub dir: PathBuf,
    pub prefix: String,
    pub extension: String,
    pub first: u32,
    pub last: u32,
}

impl Default for FrameSequence {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("frames"),
            prefix: "output_".to_owned(),
            extension: "jpg".to_owned(),
            first: 1,
            last: 6572,
        }
    }
}

impl FrameSequence {
    pub fn new(dir: impl Into<PathBuf>, first: u32, last: u32) -> Self {
        Self { dir: dir.into(), first, last, ..Self::default() }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn len(&self) -> usize {
        if self.last < self.first {
            return 0;
        }
        (self.last - self.first) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn indices(&self) -> impl Iterator<Item = u32> {
        self.first..=self.last
    }

    pub fn file_name(&self, index: u32) -> String {
        let width = self.last.to_string().len();
        format!("{}{:0width$}.{}", self.prefix, index, self.extension, width = width)
    }

    pub fn path(&self, index: u32) -> PathBuf {
        self.dir.join(self.file_name(index))
    }
}
