use std::convert::Infallible;

use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::data::escape_time::EscapeTime;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::data::pixel_rect::{PixelRect, PixelRectError};
use crate::core::fractals::mandelbrot::colour_mapping::gradient::Gradient;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaletteError {
    #[error("cannot draw palette: {0}")]
    PixelRect(#[from] PixelRectError),
    #[error("cannot draw palette: {0}")]
    PixelBuffer(#[from] PixelBufferError),
}

/// Black slots appended after the coloured range so that lookups at and just
/// past the iteration cap land on black.
pub const GUARD_SLOTS: usize = 50;

/// Hue of rainbow slot `index`, wrapped into `[0, 1)`.
#[must_use]
pub fn rainbow_hue(index: usize, num_colours: usize, loop_count: u32) -> f64 {
    let hue = f64::from(loop_count) / num_colours as f64 * index as f64;
    hue - hue.floor()
}

/// Colour lookup table indexed by escape time.
///
/// Holds `num_colours + GUARD_SLOTS` entries. Slot 0 is always black, as are
/// the guard slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    name: String,
    num_colours: usize,
    table: Vec<Colour>,
}

impl Palette {
    /// Spreads `gradient` over `num_colours` slots, cycling through it
    /// `loop_count` times.
    #[must_use]
    pub fn generate(num_colours: usize, gradient: &Gradient, loop_count: u32) -> Self {
        let mut table = Vec::with_capacity(num_colours + GUARD_SLOTS);

        if gradient.is_rainbow() {
            table.extend(
                (0..num_colours)
                    .map(|i| Colour::from_hsv(rainbow_hue(i, num_colours, loop_count), 1.0, 1.0)),
            );
        } else if gradient.is_empty() {
            tracing::warn!(gradient = gradient.name(), "empty gradient, palette will be black");
        } else {
            let anchors = gradient.len();
            let step = (anchors as f64 * f64::from(loop_count)) / num_colours as f64;

            table.extend((0..num_colours).map(|i| {
                let cursor = i as f64 * step;
                let first = (cursor.floor() as usize) % anchors;
                let second = (first + 1) % anchors;

                gradient
                    .colour(first)
                    .interpolate(gradient.colour(second), cursor - cursor.floor())
            }));
        }

        let last = table.last().copied().unwrap_or(Colour::BLACK);
        table.resize(num_colours, last);
        table.resize(num_colours + GUARD_SLOTS, Colour::BLACK);
        table[0] = Colour::BLACK;

        Self {
            name: gradient.name().to_string(),
            num_colours,
            table,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn num_colours(&self) -> usize {
        self.num_colours
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    #[must_use]
    pub fn colours(&self) -> &[Colour] {
        &self.table
    }

    /// Slot `index`, black when out of range.
    #[must_use]
    pub fn colour(&self, index: i64) -> Colour {
        match usize::try_from(index).ok().and_then(|i| self.table.get(i)) {
            Some(&colour) => colour,
            None => {
                tracing::debug!(index, len = self.table.len(), "palette index out of range");
                Colour::BLACK
            }
        }
    }

    /// Colour for one escape-time value. Smooth values blend the two slots
    /// either side of them.
    #[must_use]
    pub fn colour_for(&self, value: EscapeTime) -> Colour {
        match value {
            EscapeTime::Discrete(iterations) => self.colour(i64::from(iterations)),
            EscapeTime::Smooth(iterations) => {
                let floor = iterations.floor();
                let index = floor as i64;

                self.colour(index)
                    .interpolate(self.colour(index + 1), iterations - floor)
            }
        }
    }

    /// One vertical line per coloured slot, for previewing a gradient.
    pub fn stripe_image(&self, height: u32) -> Result<PixelBuffer, PaletteError> {
        let width = u32::try_from(self.num_colours).unwrap_or(u32::MAX);
        let pixel_rect = PixelRect::from_size(width, height)?;

        let row: Vec<u8> = self.table[..self.num_colours]
            .iter()
            .flat_map(|colour| [colour.r, colour.g, colour.b])
            .collect();

        Ok(PixelBuffer::from_data(pixel_rect, row.repeat(height as usize))?)
    }
}

impl ColourMap<EscapeTime> for Palette {
    type Failure = Infallible;

    fn map(&self, value: EscapeTime) -> Result<Colour, Self::Failure> {
        Ok(self.colour_for(value))
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
