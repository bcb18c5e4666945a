//! Background rendering for interactive front-ends.
//!
//! The front-end submits [`RenderRequest`] snapshots; a worker thread renders
//! the newest one and hands the finished frame, or the error, to a
//! [`RenderEventSink`]. Submitting a new request cancels the one in flight.
//!
//! [`RenderRequest`]: crate::controllers::render::RenderRequest

mod controller;
pub mod data;
pub mod errors;
pub mod events;
pub mod ports;

pub use controller::InteractiveController;
pub use data::frame_data::FrameData;
pub use errors::frame_error::FrameError;
pub use events::render_event::RenderEvent;
pub use ports::event_sink::RenderEventSink;
