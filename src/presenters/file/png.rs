use std::path::Path;

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;

#[derive(Debug, Default, Clone, Copy)]
pub struct PngFilePresenter;

impl PngFilePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FilePresenterPort for PngFilePresenter {
    type Error = image::ImageError;

    fn present(&self, buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> image::ImageResult<()> {
        image::save_buffer_with_format(
            filepath,
            buffer.buffer(),
            buffer.width(),
            buffer.height(),
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )
    }
}
