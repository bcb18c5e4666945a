//! Validation for typed-in "go to" coordinates.

use crate::controllers::explorer::ExplorerCommand;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinateInputError {
    #[error("{field} must be a finite number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("zoom must be at least 1, got {zoom}")]
    InvalidZoom { zoom: f64 },
}

/// A validated absolute zoom: complex-plane centre plus magnification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTarget {
    pub x: f64,
    pub y: f64,
    pub amount: u64,
}

impl ZoomTarget {
    #[must_use]
    pub fn into_command(self) -> ExplorerCommand {
        ExplorerCommand::AbsoluteZoom {
            x: self.x,
            y: self.y,
            amount: self.amount,
        }
    }
}

fn parse_number(field: &'static str, text: &str) -> Result<f64, CoordinateInputError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CoordinateInputError::InvalidNumber {
            field,
            value: text.to_string(),
        })
}

/// Parses the three text fields of a coordinate entry.
///
/// With `inverted`, `zoom` is read as a reciprocal, so `0.25` means a
/// magnification of 4. The magnification is truncated to a whole number and
/// must be at least 1.
pub fn parse_zoom_target(
    x: &str,
    y: &str,
    zoom: &str,
    inverted: bool,
) -> Result<ZoomTarget, CoordinateInputError> {
    let x = parse_number("x", x)?;
    let y = parse_number("y", y)?;
    let mut zoom = parse_number("zoom", zoom)?;

    if inverted {
        zoom = 1.0 / zoom;
    }

    if !zoom.is_finite() || zoom < 1.0 {
        return Err(CoordinateInputError::InvalidZoom { zoom });
    }

    Ok(ZoomTarget {
        x,
        y,
        amount: zoom.trunc() as u64,
    })
}
