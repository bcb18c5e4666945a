/// Selects how the escape-time engine reports a pixel and how the
/// compositor colours it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColouringMode {
    /// Integer iteration count, one palette slot per pixel.
    Discrete,
    /// Renormalised continuous count, blended between neighbouring slots.
    #[default]
    Smooth,
}

impl ColouringMode {
    #[must_use]
    pub const fn from_smooth(smooth: bool) -> Self {
        if smooth { Self::Smooth } else { Self::Discrete }
    }

    #[must_use]
    pub const fn is_smooth(self) -> bool {
        matches!(self, Self::Smooth)
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Discrete => "Discrete",
            Self::Smooth => "Smooth",
        }
    }
}

impl std::fmt::Display for ColouringMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Result of iterating a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EscapeTime {
    Discrete(u32),
    Smooth(f64),
}

impl EscapeTime {
    /// The "nothing computed here" value for a mode.
    #[must_use]
    pub const fn zero(mode: ColouringMode) -> Self {
        match mode {
            ColouringMode::Discrete => Self::Discrete(0),
            ColouringMode::Smooth => Self::Smooth(0.0),
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Discrete(iterations) => f64::from(iterations),
            Self::Smooth(iterations) => iterations,
        }
    }

    #[must_use]
    pub const fn mode(self) -> ColouringMode {
        match self {
            Self::Discrete(_) => ColouringMode::Discrete,
            Self::Smooth(_) => ColouringMode::Smooth,
        }
    }
}
