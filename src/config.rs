use crate::error::{Error, Result};
use crate::particle::{Color, Palette, DEFAULT_PALETTE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

/// Startup settings for the star field window, read from a RON file.
///
/// Every field is optional in the file; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub palette: Palette,
    pub background: Color,
    /// Draw a still field instead of animating it.
    pub reduced_motion: bool,
    pub max_fps: f32,
    /// Quiet period before a burst of window resizes reaches the field.
    pub resize_debounce_ms: u64,
    /// Fixed RNG seed; `None` picks a fresh field every run.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            palette: DEFAULT_PALETTE,
            background: Color::rgb(0.067, 0.067, 0.067),
            reduced_motion: false,
            max_fps: 60.0,
            resize_debounce_ms: 250,
            seed: None,
        }
    }
}

impl FieldConfig {
    pub fn from_ron(contents: &str) -> Result<Self> {
        let config: Self = ron::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Load `path`, logging and falling back to defaults if it is missing or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                error!("Failed to load config {}: {}", path.display(), e);
                error!("Using default FieldConfig");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.max_fps.is_finite() || self.max_fps <= 0.0 {
            return Err(Error::InvalidParam("max_fps must be finite and > 0".into()));
        }
        let channels = self
            .palette
            .iter()
            .chain(std::iter::once(&self.background))
            .flat_map(|c| [c.r, c.g, c.b]);
        for channel in channels {
            if !(0.0..=1.0).contains(&channel) {
                return Err(Error::InvalidParam(format!(
                    "color channels must lie in [0, 1], got {channel}"
                )));
            }
        }
        Ok(())
    }

    /// Target duration of one frame at `max_fps`.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.max_fps)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}
