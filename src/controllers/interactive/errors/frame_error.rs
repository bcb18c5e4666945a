/// A render that failed for a reason other than being superseded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("render {generation} failed: {message}")]
pub struct FrameError {
    pub generation: u64,
    pub message: String,
}
