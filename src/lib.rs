pub mod controllers;
pub mod core;
pub mod presenters;
pub mod storage;

pub use crate::controllers::coordinate_input::{CoordinateInputError, ZoomTarget, parse_zoom_target};
pub use crate::controllers::explorer::{
    CommandOutcome, ExplorerCommand, ExplorerError, ExplorerStatus, MandelbrotExplorer,
};
pub use crate::controllers::interactive::{InteractiveController, RenderEvent, RenderEventSink};
pub use crate::controllers::render::{RenderError, RenderRequest, RenderedFrame, render_frame};
pub use crate::core::data::escape_time::{ColouringMode, EscapeTime};
pub use crate::core::fractals::mandelbrot::colour_mapping::kinds::GradientPreset;
pub use crate::core::fractals::mandelbrot::mandelbrot_config::MandelbrotConfig;
pub use crate::core::view::view_state::{ViewState, ZoomDirection};
pub use crate::presenters::file::{SaveImageError, save_image};
pub use crate::storage::zoom_point::{ZoomPoint, ZoomPointError, read_zoom_point, write_zoom_point};
