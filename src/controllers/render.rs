//! The render pipeline shared by the synchronous explorer and the
//! background controller: escape times for every pixel, then compositing.

use std::convert::Infallible;
use std::sync::Arc;

use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::generate_fractal::generate_fractal_parallel_rayon::{
    GenerateFractalError, generate_fractal_parallel_rayon,
};
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::{
    GeneratePixelBufferError, generate_pixel_buffer,
};
use crate::core::data::escape_time::ColouringMode;
use crate::core::data::iteration_buffer::{IterationBuffer, IterationBufferError};
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::data::pixel_rect::PixelRect;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::fractals::mandelbrot::colour_mapping::palette::Palette;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;
use crate::core::math::matrix4::Matrix4;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error("invalid render request: {0}")]
    Mandelbrot(#[from] MandelbrotError),
    #[error("cannot store escape times: {0}")]
    IterationBuffer(#[from] IterationBufferError),
    #[error("cannot composite frame: {0}")]
    PixelBuffer(#[from] PixelBufferError),
}

impl From<GenerateFractalError<Infallible>> for RenderError {
    fn from(err: GenerateFractalError<Infallible>) -> Self {
        match err {
            GenerateFractalError::Cancelled(cancelled) => Self::Cancelled(cancelled),
            GenerateFractalError::Algorithm(never) => match never {},
        }
    }
}

impl From<GeneratePixelBufferError<Infallible>> for RenderError {
    fn from(err: GeneratePixelBufferError<Infallible>) -> Self {
        match err {
            GeneratePixelBufferError::Cancelled(cancelled) => Self::Cancelled(cancelled),
            GeneratePixelBufferError::ColourMap(never) => match never {},
            GeneratePixelBufferError::PixelBuffer(err) => Self::PixelBuffer(err),
        }
    }
}

/// Immutable snapshot of everything one frame needs.
///
/// `PartialEq` lets callers skip a render when nothing has changed.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub pixel_rect: PixelRect,
    /// Pixel to complex-plane transform.
    pub transform: Matrix4,
    pub max_iterations: u32,
    pub mode: ColouringMode,
    pub palette: Arc<Palette>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    pub iterations: IterationBuffer,
    pub pixel_buffer: PixelBuffer,
}

pub fn render_frame<C: CancelToken>(
    request: &RenderRequest,
    cancel: &C,
) -> Result<RenderedFrame, RenderError> {
    let algorithm = MandelbrotAlgorithm::new(request.transform, request.max_iterations, request.mode)?;

    let values = generate_fractal_parallel_rayon(request.pixel_rect, &algorithm, cancel)?;

    if cancel.is_cancelled() {
        return Err(Cancelled.into());
    }

    let pixel_buffer =
        generate_pixel_buffer(&values, request.palette.as_ref(), request.pixel_rect, cancel)?;
    let iterations = IterationBuffer::from_values(request.pixel_rect, request.mode, values)?;

    Ok(RenderedFrame {
        iterations,
        pixel_buffer,
    })
}
