use std::path::Path;

use crate::core::data::pixel_buffer::PixelBuffer;

/// Writes a finished frame to disk in one image format.
pub trait FilePresenterPort {
    type Error: std::error::Error + Send + Sync + 'static;

    fn present(&self, buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> Result<(), Self::Error>;
}
