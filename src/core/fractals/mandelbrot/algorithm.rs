use std::convert::Infallible;

use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::escape_time::{ColouringMode, EscapeTime};
use crate::core::data::point::Point;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;
use crate::core::math::matrix4::Matrix4;
use crate::core::math::vector3h::Vector3h;

/// `|z|²` bound for the integer count.
pub const DISCRETE_BAILOUT: f64 = 4.0;
/// `|z|²` bound for the smoothed count; a larger radius keeps the
/// renormalisation term accurate.
pub const SMOOTH_BAILOUT: f64 = 256.0;

/// Iterates `z <- z² + c` from zero and reports how quickly it escapes.
///
/// Discrete mode counts iterations while `|z|² < 4`. Smooth mode runs to
/// `|z|² < 256` and, on escape, reports `n + 1 - log2(log2(|z|²))`. Points
/// that never escape report `max_iterations` in either mode.
#[must_use]
pub fn escape_time(c: Complex, max_iterations: u32, mode: ColouringMode) -> EscapeTime {
    let bailout = match mode {
        ColouringMode::Discrete => DISCRETE_BAILOUT,
        ColouringMode::Smooth => SMOOTH_BAILOUT,
    };

    let mut z = Complex::ZERO;
    let mut iteration = 0;

    while z.magnitude_squared() < bailout && iteration < max_iterations {
        z = z.square() + c;
        iteration += 1;
    }

    match mode {
        ColouringMode::Discrete => EscapeTime::Discrete(iteration),
        ColouringMode::Smooth if iteration < max_iterations => {
            let log_zn = z.magnitude_squared().ln();
            let nu = (log_zn / std::f64::consts::LN_2).ln() / std::f64::consts::LN_2;
            EscapeTime::Smooth(f64::from(iteration) + 1.0 - nu)
        }
        ColouringMode::Smooth => EscapeTime::Smooth(f64::from(max_iterations)),
    }
}

/// Per-pixel Mandelbrot evaluation under a fixed pixel to complex transform.
#[derive(Debug, Clone, PartialEq)]
pub struct MandelbrotAlgorithm {
    transform: Matrix4,
    max_iterations: u32,
    mode: ColouringMode,
}

impl MandelbrotAlgorithm {
    pub fn new(
        transform: Matrix4,
        max_iterations: u32,
        mode: ColouringMode,
    ) -> Result<Self, MandelbrotError> {
        if max_iterations == 0 {
            return Err(MandelbrotError::ZeroMaxIterations);
        }

        Ok(Self {
            transform,
            max_iterations,
            mode,
        })
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn mode(&self) -> ColouringMode {
        self.mode
    }

    #[must_use]
    pub fn point_for(&self, pixel: Point) -> Complex {
        let v = self.transform * Vector3h::new(f64::from(pixel.x), f64::from(pixel.y), 0.0);
        Complex::new(v.x, v.y)
    }
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    type Success = EscapeTime;
    type Failure = Infallible;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        Ok(escape_time(self.point_for(pixel), self.max_iterations, self.mode))
    }
}
