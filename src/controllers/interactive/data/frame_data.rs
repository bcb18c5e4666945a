use std::time::Duration;

use crate::core::data::iteration_buffer::IterationBuffer;
use crate::core::data::pixel_buffer::PixelBuffer;

#[derive(Debug)]
pub struct FrameData {
    pub generation: u64,
    pub iterations: IterationBuffer,
    pub pixel_buffer: PixelBuffer,
    pub render_duration: Duration,
}
