use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::data::escape_time::ColouringMode;
use crate::core::fractals::mandelbrot::colour_mapping::gradient::Gradient;
use crate::core::fractals::mandelbrot::colour_mapping::kinds::GradientPreset;
use crate::core::view::view_state::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

pub const DEFAULT_MAX_ITERATIONS: u32 = 5000;
pub const DEFAULT_COLOUR_LOOPS: u32 = 80;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("viewport must be at least 2x2 pixels, got {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("maximum iterations must be greater than zero")]
    ZeroMaxIterations,
    #[error("colour loops must be greater than zero")]
    ZeroColourLoops,
}

/// Everything needed to set up an explorer: viewport, iteration cap and
/// colouring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MandelbrotConfig {
    pub width: u32,
    pub height: u32,
    pub max_iterations: u32,
    pub colour_loops: u32,
    pub smooth: bool,
    pub gradient: GradientPreset,
}

impl Default for MandelbrotConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            colour_loops: DEFAULT_COLOUR_LOOPS,
            smooth: true,
            gradient: GradientPreset::default(),
        }
    }
}

impl MandelbrotConfig {
    /// Reads a JSON config. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let too_large = |value: u32| i32::try_from(value).is_err();

        if self.width < 2 || self.height < 2 || too_large(self.width) || too_large(self.height) {
            return Err(ConfigError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroMaxIterations);
        }
        if self.colour_loops == 0 {
            return Err(ConfigError::ZeroColourLoops);
        }

        Ok(())
    }

    #[must_use]
    pub fn mode(&self) -> ColouringMode {
        ColouringMode::from_smooth(self.smooth)
    }

    #[must_use]
    pub fn gradient(&self) -> Gradient {
        self.gradient.gradient()
    }
}
