//! Synchronous explorer: owns the view, palette and last frame, and applies
//! one command at a time, re-rendering before returning.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::controllers::coordinate_input::CoordinateInputError;
use crate::controllers::render::{RenderError, RenderRequest, render_frame};
use crate::core::actions::cancellation::NeverCancel;
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::generate_pixel_buffer;
use crate::core::data::colour::Colour;
use crate::core::data::complex::Complex;
use crate::core::data::escape_time::ColouringMode;
use crate::core::data::iteration_buffer::IterationBuffer;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::point::Point;
use crate::core::fractals::mandelbrot::colour_mapping::gradient::Gradient;
use crate::core::fractals::mandelbrot::colour_mapping::palette::Palette;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;
use crate::core::fractals::mandelbrot::mandelbrot_config::{ConfigError, MandelbrotConfig};
use crate::core::view::errors::ViewError;
use crate::core::view::view_state::{ViewState, ZoomDirection, ZoomOutcome};
use crate::storage::zoom_point::{ZoomPoint, ZoomPointError, read_zoom_point, write_zoom_point};

#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    #[error(transparent)]
    View(#[from] ViewError),
    #[error(transparent)]
    ZoomPoint(#[from] ZoomPointError),
    #[error(transparent)]
    CoordinateInput(#[from] CoordinateInputError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Mandelbrot(#[from] MandelbrotError),
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExplorerCommand {
    /// Zoom one level in or out around a viewport pixel.
    RelativeZoom {
        pixel: Point,
        direction: ZoomDirection,
    },
    /// Centre on a complex-plane point at a magnification.
    AbsoluteZoom { x: f64, y: f64, amount: u64 },
    SetMode(ColouringMode),
    RegeneratePalette {
        gradient: Gradient,
        colour_loops: u32,
    },
    SetMaxIterations(u32),
    Reset,
}

/// What a command did to the displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Escape times were recomputed and the image redrawn.
    Rendered,
    /// Only the palette changed; the stored escape times were recoloured.
    Recoloured,
    /// State changed before the first frame; the next render draws it.
    Pending,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerStatus {
    pub center: Complex,
    pub zoom_level: u32,
    pub magnification: String,
}

impl std::fmt::Display for ExplorerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "centre ({}, {}), zoom level {}, {}",
            self.center.real, self.center.imag, self.zoom_level, self.magnification
        )
    }
}

pub struct MandelbrotExplorer {
    view: ViewState,
    mode: ColouringMode,
    max_iterations: u32,
    colour_loops: u32,
    gradient: Gradient,
    palette: Arc<Palette>,
    iterations: Option<IterationBuffer>,
    image: PixelBuffer,
}

impl MandelbrotExplorer {
    /// Sets up the view and palette. Nothing is rendered until the first
    /// [`Self::render`]; commands applied before it only update state.
    pub fn new(config: &MandelbrotConfig) -> Result<Self, ExplorerError> {
        config.validate()?;

        let view = ViewState::new(config.width, config.height)?;
        let gradient = config.gradient();
        let palette = Palette::generate(config.max_iterations as usize, &gradient, config.colour_loops);
        let image = PixelBuffer::new(view.pixel_rect());

        Ok(Self {
            view,
            mode: config.mode(),
            max_iterations: config.max_iterations,
            colour_loops: config.colour_loops,
            gradient,
            palette: Arc::new(palette),
            iterations: None,
            image,
        })
    }

    pub fn apply(&mut self, command: ExplorerCommand) -> Result<CommandOutcome, ExplorerError> {
        match command {
            ExplorerCommand::RelativeZoom { pixel, direction } => {
                let outcome = self.view.relative_zoom(pixel, direction);
                self.render_if(outcome)
            }
            ExplorerCommand::AbsoluteZoom { x, y, amount } => {
                let outcome = self.view.absolute_zoom(x, y, amount)?;
                self.render_if(outcome)
            }
            ExplorerCommand::Reset => {
                let outcome = self.view.reset();
                self.render_if(outcome)
            }
            ExplorerCommand::SetMode(mode) => {
                if mode == self.mode {
                    return Ok(CommandOutcome::Unchanged);
                }

                self.mode = mode;
                self.refresh()
            }
            ExplorerCommand::SetMaxIterations(max_iterations) => {
                if max_iterations == 0 {
                    return Err(MandelbrotError::ZeroMaxIterations.into());
                }
                if max_iterations == self.max_iterations {
                    return Ok(CommandOutcome::Unchanged);
                }

                self.max_iterations = max_iterations;
                self.regenerate_palette();
                self.refresh()
            }
            ExplorerCommand::RegeneratePalette {
                gradient,
                colour_loops,
            } => {
                if colour_loops == 0 {
                    return Err(ConfigError::ZeroColourLoops.into());
                }

                self.gradient = gradient;
                self.colour_loops = colour_loops;
                self.regenerate_palette();

                if self.iterations.is_none() {
                    return Ok(CommandOutcome::Pending);
                }

                self.recolour();
                Ok(CommandOutcome::Recoloured)
            }
        }
    }

    /// Recomputes every pixel under the current view and replaces the image.
    ///
    /// A compositing failure is logged and the previous frame kept.
    #[tracing::instrument(
        skip_all,
        fields(
            zoom_level = self.view.zoom_level(),
            mode = %self.mode,
            max_iterations = self.max_iterations
        )
    )]
    pub fn render(&mut self) -> Result<(), ExplorerError> {
        let request = self.render_request();
        let start = Instant::now();

        match render_frame(&request, &NeverCancel) {
            Ok(frame) => {
                self.iterations = Some(frame.iterations);
                self.image = frame.pixel_buffer;
            }
            Err(RenderError::PixelBuffer(err)) => {
                tracing::warn!(%err, "compositing failed, keeping previous image");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!(
            width = request.pixel_rect.width(),
            height = request.pixel_rect.height(),
            duration = ?start.elapsed(),
            "rendered frame"
        );

        Ok(())
    }

    /// Snapshot of the current view and colouring for one render job.
    #[must_use]
    pub fn render_request(&self) -> RenderRequest {
        RenderRequest {
            pixel_rect: self.view.pixel_rect(),
            transform: self.view.combined_matrix(),
            max_iterations: self.max_iterations,
            mode: self.mode,
            palette: Arc::clone(&self.palette),
        }
    }

    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub fn mode(&self) -> ColouringMode {
        self.mode
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn colour_loops(&self) -> u32 {
        self.colour_loops
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[must_use]
    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    #[must_use]
    pub fn iterations(&self) -> Option<&IterationBuffer> {
        self.iterations.as_ref()
    }

    /// Escape time under a pixel of the last frame; 0 before the first
    /// render and outside the viewport.
    #[must_use]
    pub fn iterations_at(&self, px: i32, py: i32) -> f64 {
        self.iterations
            .as_ref()
            .map_or(0.0, |buffer| buffer.iterations_at(Point { x: px, y: py }))
    }

    #[must_use]
    pub fn colour_at(&self, px: i32, py: i32) -> Colour {
        self.image
            .get_pixel(Point { x: px, y: py })
            .unwrap_or_else(|err| {
                tracing::debug!(%err, "colour lookup outside image");
                Colour::BLACK
            })
    }

    #[must_use]
    pub fn pixel_to_complex(&self, px: f64, py: f64) -> Complex {
        self.view.pixel_to_complex(px, py)
    }

    #[must_use]
    pub fn status(&self) -> ExplorerStatus {
        ExplorerStatus {
            center: self.view.center(),
            zoom_level: self.view.zoom_level(),
            magnification: self.view.magnification_text(),
        }
    }

    /// Writes the current centre and zoom level, returning the path written.
    pub fn save_zoom_point(&self, path: impl AsRef<Path>) -> Result<PathBuf, ExplorerError> {
        let center = self.view.center();
        let point = ZoomPoint {
            x: center.real,
            y: center.imag,
            zoom_level: i32::try_from(self.view.zoom_level()).unwrap_or(i32::MAX),
        };

        Ok(write_zoom_point(path, &point)?)
    }

    /// Jumps to a saved zoom point. The view is untouched if the file cannot
    /// be read.
    pub fn load_zoom_point(&mut self, path: impl AsRef<Path>) -> Result<CommandOutcome, ExplorerError> {
        let point = read_zoom_point(path)?;

        let outcome = self
            .view
            .zoom_to_level(point.x, point.y, i64::from(point.zoom_level));
        self.render_if(outcome)
    }

    fn render_if(&mut self, outcome: ZoomOutcome) -> Result<CommandOutcome, ExplorerError> {
        if !outcome.needs_render() {
            return Ok(CommandOutcome::Unchanged);
        }

        self.refresh()
    }

    fn refresh(&mut self) -> Result<CommandOutcome, ExplorerError> {
        if self.iterations.is_none() {
            return Ok(CommandOutcome::Pending);
        }

        self.render()?;
        Ok(CommandOutcome::Rendered)
    }

    fn regenerate_palette(&mut self) {
        self.palette = Arc::new(Palette::generate(
            self.max_iterations as usize,
            &self.gradient,
            self.colour_loops,
        ));
    }

    fn recolour(&mut self) {
        let Some(iterations) = &self.iterations else {
            return;
        };

        match generate_pixel_buffer(
            iterations.values(),
            self.palette.as_ref(),
            iterations.pixel_rect(),
            &NeverCancel,
        ) {
            Ok(image) => self.image = image,
            Err(err) => tracing::warn!(%err, "recolouring failed, keeping previous image"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::coordinate_input::parse_zoom_target;
    use crate::core::data::escape_time::EscapeTime;
    use crate::core::fractals::mandelbrot::colour_mapping::kinds::GradientPreset;

    const EPSILON: f64 = 1e-9;

    fn config() -> MandelbrotConfig {
        MandelbrotConfig {
            width: 24,
            height: 16,
            max_iterations: 50,
            colour_loops: 2,
            smooth: false,
            gradient: GradientPreset::Sunset,
        }
    }

    fn rendered_explorer() -> MandelbrotExplorer {
        let mut explorer = MandelbrotExplorer::new(&config()).unwrap();
        explorer.render().unwrap();
        explorer
    }

    fn assert_close(actual: Complex, expected: Complex) {
        assert!(
            (actual.real - expected.real).abs() < EPSILON
                && (actual.imag - expected.imag).abs() < EPSILON,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn test_new_is_unrendered() {
        let explorer = MandelbrotExplorer::new(&config()).unwrap();

        assert!(explorer.iterations().is_none());
        assert_eq!(explorer.iterations_at(12, 8), 0.0);
        assert_eq!(explorer.palette().len(), 50 + 50);
        assert!(explorer.image().buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = MandelbrotConfig {
            max_iterations: 0,
            ..config()
        };

        assert!(matches!(
            MandelbrotExplorer::new(&config),
            Err(ExplorerError::Config(ConfigError::ZeroMaxIterations))
        ));
    }

    #[test]
    fn test_commands_before_first_render_are_pending() {
        let mut explorer = MandelbrotExplorer::new(&config()).unwrap();

        let outcome = explorer
            .apply(ExplorerCommand::AbsoluteZoom {
                x: -0.75,
                y: 0.1,
                amount: 2,
            })
            .unwrap();
        let mode = explorer.apply(ExplorerCommand::SetMode(ColouringMode::Smooth)).unwrap();

        assert_eq!(outcome, CommandOutcome::Pending);
        assert_eq!(mode, CommandOutcome::Pending);
        assert!(explorer.iterations().is_none());
        assert_eq!(explorer.status().zoom_level, 2);

        explorer.render().unwrap();
        assert_eq!(explorer.iterations().unwrap().mode(), ColouringMode::Smooth);
    }

    #[test]
    fn test_render_fills_iterations_and_image() {
        let explorer = rendered_explorer();

        // Midpoint maps to (-0.5, 0), inside the set.
        assert_eq!(explorer.iterations_at(12, 8), 50.0);
        // Top-left corner maps to (-2, 1), which escapes immediately.
        assert_eq!(explorer.iterations_at(0, 0), 1.0);
        assert_eq!(explorer.iterations_at(24, 0), 0.0);
        assert_eq!(explorer.colour_at(0, 0), explorer.palette().colour(1));
        assert_eq!(explorer.colour_at(-1, 0), Colour::BLACK);
    }

    #[test]
    fn test_relative_zoom_in_keeps_centre_and_renders() {
        let mut explorer = rendered_explorer();

        let outcome = explorer
            .apply(ExplorerCommand::RelativeZoom {
                pixel: Point { x: 12, y: 8 },
                direction: ZoomDirection::In,
            })
            .unwrap();

        assert_eq!(outcome, CommandOutcome::Rendered);
        assert_eq!(explorer.status().zoom_level, 2);
        assert_eq!(explorer.status().magnification, "Zoomed in by 2");
        assert_close(explorer.status().center, Complex::new(-0.5, 0.0));
    }

    #[test]
    fn test_zoom_out_at_full_size_is_unchanged() {
        let mut explorer = rendered_explorer();
        let before = explorer.image().clone();

        let outcome = explorer
            .apply(ExplorerCommand::RelativeZoom {
                pixel: Point { x: 3, y: 3 },
                direction: ZoomDirection::Out,
            })
            .unwrap();

        assert_eq!(outcome, CommandOutcome::Unchanged);
        assert_eq!(explorer.image(), &before);
        assert_eq!(explorer.status().magnification, "Full size");
    }

    #[test]
    fn test_absolute_zoom_zero_leaves_state() {
        let mut explorer = rendered_explorer();
        let before = explorer.view().clone();

        let result = explorer.apply(ExplorerCommand::AbsoluteZoom {
            x: 0.0,
            y: 0.0,
            amount: 0,
        });

        assert!(matches!(
            result,
            Err(ExplorerError::View(ViewError::InvalidZoomAmount { amount: 0 }))
        ));
        assert_eq!(explorer.view(), &before);
    }

    #[test]
    fn test_typed_coordinates_drive_absolute_zoom() {
        let mut explorer = rendered_explorer();
        let target = parse_zoom_target("-0.75", "0.1", "0.125", true).unwrap();

        explorer.apply(target.into_command()).unwrap();

        assert_eq!(explorer.status().zoom_level, 4);
        assert_close(explorer.status().center, Complex::new(-0.75, 0.1));
    }

    #[test]
    fn test_set_mode_rerenders_with_new_mode() {
        let mut explorer = rendered_explorer();

        assert_eq!(
            explorer.apply(ExplorerCommand::SetMode(ColouringMode::Discrete)).unwrap(),
            CommandOutcome::Unchanged
        );
        assert_eq!(
            explorer.apply(ExplorerCommand::SetMode(ColouringMode::Smooth)).unwrap(),
            CommandOutcome::Rendered
        );

        let iterations = explorer.iterations().unwrap();
        assert_eq!(iterations.mode(), ColouringMode::Smooth);
        assert!(matches!(
            iterations.get(Point { x: 0, y: 0 }),
            EscapeTime::Smooth(_)
        ));
    }

    #[test]
    fn test_regenerate_palette_recolours_stored_frame() {
        let mut explorer = rendered_explorer();
        let iterations_before = explorer.iterations().cloned();

        let outcome = explorer
            .apply(ExplorerCommand::RegeneratePalette {
                gradient: GradientPreset::Rainbow.gradient(),
                colour_loops: 1,
            })
            .unwrap();

        assert_eq!(outcome, CommandOutcome::Recoloured);
        assert_eq!(explorer.iterations().cloned(), iterations_before);
        assert_eq!(explorer.palette().name(), GradientPreset::Rainbow.gradient().name());

        let expected = explorer.palette().colour_for(EscapeTime::Discrete(1));
        assert_eq!(explorer.colour_at(0, 0), expected);
    }

    #[test]
    fn test_regenerate_palette_rejects_zero_loops() {
        let mut explorer = rendered_explorer();

        assert!(matches!(
            explorer.apply(ExplorerCommand::RegeneratePalette {
                gradient: GradientPreset::Sunset.gradient(),
                colour_loops: 0,
            }),
            Err(ExplorerError::Config(ConfigError::ZeroColourLoops))
        ));
        assert_eq!(explorer.colour_loops(), 2);
    }

    #[test]
    fn test_set_max_iterations_resizes_palette() {
        let mut explorer = rendered_explorer();

        assert!(matches!(
            explorer.apply(ExplorerCommand::SetMaxIterations(0)),
            Err(ExplorerError::Mandelbrot(MandelbrotError::ZeroMaxIterations))
        ));
        assert_eq!(explorer.max_iterations(), 50);

        let outcome = explorer.apply(ExplorerCommand::SetMaxIterations(20)).unwrap();

        assert_eq!(outcome, CommandOutcome::Rendered);
        assert_eq!(explorer.palette().num_colours(), 20);
        assert_eq!(explorer.iterations_at(12, 8), 20.0);
    }

    #[test]
    fn test_reset_returns_to_full_size() {
        let mut explorer = rendered_explorer();
        explorer
            .apply(ExplorerCommand::AbsoluteZoom {
                x: 0.3,
                y: 0.5,
                amount: 64,
            })
            .unwrap();

        assert_eq!(explorer.apply(ExplorerCommand::Reset).unwrap(), CommandOutcome::Rendered);
        assert_eq!(explorer.status().zoom_level, 1);
        assert_eq!(explorer.apply(ExplorerCommand::Reset).unwrap(), CommandOutcome::Unchanged);
    }

    #[test]
    fn test_zoom_point_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut explorer = rendered_explorer();
        explorer
            .apply(ExplorerCommand::AbsoluteZoom {
                x: -0.75,
                y: 0.1,
                amount: 8,
            })
            .unwrap();

        let path = explorer.save_zoom_point(dir.path().join("seahorse")).unwrap();
        explorer.apply(ExplorerCommand::Reset).unwrap();

        let outcome = explorer.load_zoom_point(&path).unwrap();

        assert_eq!(path, dir.path().join("seahorse.mbz"));
        assert_eq!(outcome, CommandOutcome::Rendered);
        assert_eq!(explorer.status().zoom_level, 4);
        assert_close(explorer.status().center, Complex::new(-0.75, 0.1));
    }

    #[test]
    fn test_failed_load_leaves_view() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.mbz");
        std::fs::write(&path, [0u8; 10]).unwrap();
        let mut explorer = rendered_explorer();
        let before = explorer.view().clone();

        assert!(matches!(
            explorer.load_zoom_point(&path),
            Err(ExplorerError::ZoomPoint(ZoomPointError::Truncated { len: 10 }))
        ));
        assert_eq!(explorer.view(), &before);
    }

    #[test]
    fn test_render_request_snapshots_state() {
        let explorer = rendered_explorer();

        let request = explorer.render_request();

        assert_eq!(request.transform, explorer.view().combined_matrix());
        assert_eq!(request.max_iterations, 50);
        assert_eq!(request.mode, ColouringMode::Discrete);
        assert_eq!(request.palette.as_ref(), explorer.palette());
        assert_eq!(request, explorer.render_request());
    }

    #[test]
    fn test_pixel_to_complex_readout() {
        let explorer = rendered_explorer();

        assert_close(explorer.pixel_to_complex(0.0, 0.0), Complex::new(-2.0, 1.0));
        assert_close(explorer.pixel_to_complex(24.0, 16.0), Complex::new(1.0, -1.0));
    }

    #[test]
    fn test_status_display() {
        let explorer = rendered_explorer();

        assert_eq!(
            explorer.status().to_string(),
            "centre (-0.5, 0), zoom level 1, Full size"
        );
    }
}
