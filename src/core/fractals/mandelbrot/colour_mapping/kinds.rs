use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::colour_mapping::gradient::Gradient;

const MILKY_WAY: [Colour; 12] = [
    Colour::new(0, 43, 52),
    Colour::new(0, 51, 103),
    Colour::new(0, 26, 153),
    Colour::new(35, 0, 204),
    Colour::new(128, 0, 255),
    Colour::new(234, 127, 255),
    Colour::new(255, 191, 245),
    Colour::new(234, 127, 255),
    Colour::new(128, 0, 255),
    Colour::new(35, 0, 204),
    Colour::new(0, 26, 153),
    Colour::new(0, 51, 103),
];

const SUNSET: [Colour; 5] = [
    Colour::new(0, 6, 92),
    Colour::new(8, 41, 156),
    Colour::new(243, 255, 247),
    Colour::new(255, 174, 4),
    Colour::new(82, 31, 48),
];

const RADIOACTIVE: [Colour; 14] = [
    Colour::new(0, 18, 26),
    Colour::new(0, 52, 52),
    Colour::new(0, 77, 52),
    Colour::new(0, 153, 0),
    Colour::new(68, 204, 0),
    Colour::new(157, 235, 0),
    Colour::new(255, 255, 0),
    Colour::new(255, 255, 205),
    Colour::new(255, 255, 0),
    Colour::new(157, 235, 0),
    Colour::new(68, 204, 0),
    Colour::new(0, 153, 0),
    Colour::new(0, 77, 52),
    Colour::new(0, 52, 52),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gradient preset '{0}'")]
pub struct UnknownGradientPreset(pub String);

/// Built-in gradients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientPreset {
    #[default]
    MilkyWay,
    Sunset,
    Radioactive,
    Rainbow,
}

impl GradientPreset {
    pub const ALL: &'static [Self] = &[Self::MilkyWay, Self::Sunset, Self::Radioactive, Self::Rainbow];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::MilkyWay => "Milky way",
            Self::Sunset => "Sunset",
            Self::Radioactive => "Radioactive",
            Self::Rainbow => "Rainbow",
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::MilkyWay => "milky-way",
            Self::Sunset => "sunset",
            Self::Radioactive => "radioactive",
            Self::Rainbow => "rainbow",
        }
    }

    #[must_use]
    pub fn gradient(self) -> Gradient {
        let name = self.display_name();
        match self {
            Self::MilkyWay => Gradient::new(name, MILKY_WAY.to_vec()),
            Self::Sunset => Gradient::new(name, SUNSET.to_vec()),
            Self::Radioactive => Gradient::new(name, RADIOACTIVE.to_vec()),
            Self::Rainbow => Gradient::rainbow(name),
        }
    }
}

impl std::fmt::Display for GradientPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}

impl FromStr for GradientPreset {
    type Err = UnknownGradientPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");

        Self::ALL
            .iter()
            .copied()
            .find(|preset| preset.key() == wanted)
            .ok_or_else(|| UnknownGradientPreset(s.to_string()))
    }
}
