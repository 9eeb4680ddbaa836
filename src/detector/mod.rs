use crate::detector::internals::Pitch;
use crate::error::EstimateError;
use crate::float::Float;

pub mod autocorrelation;
pub mod internals;

/// A pitch estimator consumes one sample window per call and keeps nothing between calls.
pub trait PitchEstimator<T>
where
    T: Float,
{
    /// Estimate the fundamental frequency of `signal`, captured at `sample_rate` Hz.
    ///
    /// `Ok(None)` means no reliable pitch was found. `Err` is returned only for an
    /// empty window or a zero sample rate.
    fn estimate(&self, signal: &[T], sample_rate: usize)
        -> Result<Option<Pitch<T>>, EstimateError>;
}
