use rayon::prelude::*;

use crate::core::actions::cancellation::{CANCEL_CHECK_INTERVAL_PIXELS, CancelToken, Cancelled};
use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBuffer, PixelBufferError};
use crate::core::data::pixel_rect::PixelRect;

#[derive(Debug, thiserror::Error)]
pub enum GeneratePixelBufferError<E> {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error("colour map error: {0}")]
    ColourMap(E),
    #[error("pixel buffer error: {0}")]
    PixelBuffer(#[from] PixelBufferError),
}

/// Colours every value of a row-major frame and packs the result into an
/// RGB raster.
///
/// Rows are mapped in parallel. A frame whose length does not match
/// `pixel_rect` is rejected before any work is done.
pub fn generate_pixel_buffer<T, CMap, C>(
    input: &[T],
    mapper: &CMap,
    pixel_rect: PixelRect,
    cancel: &C,
) -> Result<PixelBuffer, GeneratePixelBufferError<CMap::Failure>>
where
    T: Copy + Sync,
    CMap: ColourMap<T> + Sync,
    CMap::Failure: Send,
    C: CancelToken,
{
    if input.len() != pixel_rect.size() {
        return Err(PixelBufferError::BoundsMismatch {
            pixel_rect_size: pixel_rect.size() * BYTES_PER_PIXEL,
            buffer_size: input.len() * BYTES_PER_PIXEL,
        }
        .into());
    }

    let row_width = pixel_rect.width() as usize;

    let rows: Result<Vec<Vec<u8>>, GeneratePixelBufferError<CMap::Failure>> = input
        .par_chunks(row_width)
        .map(|values| {
            let mut row = Vec::with_capacity(values.len() * BYTES_PER_PIXEL);

            for (i, &value) in values.iter().enumerate() {
                if i % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
                    return Err(GeneratePixelBufferError::Cancelled(Cancelled));
                }

                let colour = mapper.map(value).map_err(GeneratePixelBufferError::ColourMap)?;
                row.extend_from_slice(&[colour.r, colour.g, colour.b]);
            }

            Ok(row)
        })
        .collect();

    let buffer = rows?.concat();

    Ok(PixelBuffer::from_data(pixel_rect, buffer)?)
}
