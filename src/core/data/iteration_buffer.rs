use crate::core::data::escape_time::{ColouringMode, EscapeTime};
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IterationBufferError {
    #[error("pixel rect holds {pixel_rect_size} pixels but {value_count} values were supplied")]
    SizeMismatch {
        pixel_rect_size: usize,
        value_count: usize,
    },
}

/// One escape-time value per pixel of a frame, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationBuffer {
    pixel_rect: PixelRect,
    mode: ColouringMode,
    values: Vec<EscapeTime>,
}

impl IterationBuffer {
    pub fn from_values(
        pixel_rect: PixelRect,
        mode: ColouringMode,
        values: Vec<EscapeTime>,
    ) -> Result<Self, IterationBufferError> {
        if values.len() != pixel_rect.size() {
            return Err(IterationBufferError::SizeMismatch {
                pixel_rect_size: pixel_rect.size(),
                value_count: values.len(),
            });
        }

        Ok(Self {
            pixel_rect,
            mode,
            values,
        })
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn mode(&self) -> ColouringMode {
        self.mode
    }

    #[must_use]
    pub fn values(&self) -> &[EscapeTime] {
        &self.values
    }

    /// The value computed for `pixel`; pixels outside the frame read as zero.
    #[must_use]
    pub fn get(&self, pixel: Point) -> EscapeTime {
        match self.pixel_rect.index_of(pixel) {
            Some(index) => self.values[index],
            None => {
                tracing::debug!(x = pixel.x, y = pixel.y, "iteration lookup outside frame");
                EscapeTime::zero(self.mode)
            }
        }
    }

    #[must_use]
    pub fn iterations_at(&self, pixel: Point) -> f64 {
        self.get(pixel).value()
    }
}
