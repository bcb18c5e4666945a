#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MandelbrotError {
    #[error("maximum iterations must be greater than zero")]
    ZeroMaxIterations,
}
