use thiserror::Error;

/// Contract violations rejected before any numeric work is done.
///
/// Quiet, noisy or degenerate windows are not errors; they produce `Ok(None)`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateError {
    #[error("sample window is empty")]
    EmptyWindow,

    #[error("sample rate must be positive, got {0}")]
    InvalidSampleRate(usize),
}
