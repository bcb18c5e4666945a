use std::error::Error;

use crate::core::data::colour::Colour;

/// Turns one computed value into a colour.
pub trait ColourMap<T> {
    type Failure: Error;

    fn map(&self, value: T) -> Result<Colour, Self::Failure>;

    fn display_name(&self) -> &str;
}
