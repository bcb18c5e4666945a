use crate::core::data::pixel_rect::PixelRectError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("zoom amount must be at least 1, got {amount}")]
    InvalidZoomAmount { amount: u64 },
    #[error("invalid viewport: {0}")]
    Viewport(#[from] PixelRectError),
}
