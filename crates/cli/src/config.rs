use anyhow::{Context, Result};
use clickframe_frames::{FrameSequence, Quantization};
use clickframe_input::{ScreenLayout, Timing};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything tuned to a particular video and screen.
///
/// Every section is optional in the file; missing values fall back to the
/// defaults for a 10x5 grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub quantization: Quantization,
    pub layout: ScreenLayout,
    pub timing: Timing,
    pub frames: FrameSequence,
    pub abort_key: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quantization: Quantization::default(),
            layout: ScreenLayout::default(),
            timing: Timing::default(),
            frames: FrameSequence::default(),
            abort_key: 'q',
        }
    }
}

impl Config {
    /// Loads `explicit` if given, else the user config file if one exists,
    /// else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match user_config_path().filter(|path| path.is_file()) {
                Some(path) => path,
                None => {
                    debug!("no config file; using defaults");
                    return Ok(Self::default());
                }
            },
        };

        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("invalid config {}", path.display()))?;
        config.quantization.grid.validate().context("invalid grid size")?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("dev", "clickframe", "clickframe")?;
    Some(dirs.config_dir().join("config.json"))
}
