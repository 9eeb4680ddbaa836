//! Time-domain autocorrelation pitch estimation for live input.
//!
//! Each call runs five phases over the window it is given:
//!
//! 1. An energy gate rejects windows whose RMS amplitude is below [RMS_THRESHOLD].
//! 2. Samples louder than [TRIM_THRESHOLD] are trimmed from both ends, which removes
//!    attack transients and loud tails that would distort the correlation.
//! 3. The autocorrelation $c(i) = \sum_j x_j x_{j+i}$ of the trimmed window is computed.
//! 4. The descent from the lag-0 peak is skipped and the highest remaining lag is taken
//!    as the period.
//! 5. The period is refined by fitting a parabola through the peak and its two neighbours.
//!
//! Windows that are too short, or whose best lag has no neighbour on one side, produce
//! no pitch rather than an error.
//!
//! ## Cost
//! The [Direct][AutocorrelationMethod::Direct] method is $O(M L)$ for a trimmed window of
//! $M$ samples and $L$ lags. For $M = 2048$ that is about four million multiply-adds per
//! call. Use [with_max_lag][AutocorrelationEstimator::with_max_lag] to bound $L$ (a lag of
//! `sample_rate / lowest_frequency` is enough), or [Fft][AutocorrelationMethod::Fft] for
//! $O(M \log M)$.

use crate::detector::internals::{
    autocorrelation_buffer, has_sufficient_energy, pitch_from_autocorrelation, trim_bounds,
};
pub use crate::detector::internals::{AutocorrelationMethod, Pitch, RMS_THRESHOLD, TRIM_THRESHOLD};
use crate::detector::PitchEstimator;
use crate::error::EstimateError;
use crate::float::Float;

/// The smallest trimmed window with an interior lag.
const MIN_TRIMMED_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutocorrelationEstimator {
    max_lag: Option<usize>,
    method: AutocorrelationMethod,
}

impl AutocorrelationEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only examine lags below `max_lag`. Zero removes the bound.
    pub fn with_max_lag(mut self, max_lag: usize) -> Self {
        self.max_lag = match max_lag {
            0 => None,
            lag => Some(lag),
        };
        self
    }

    pub fn with_method(mut self, method: AutocorrelationMethod) -> Self {
        self.method = method;
        self
    }

    pub fn max_lag(&self) -> Option<usize> {
        self.max_lag
    }

    pub fn method(&self) -> AutocorrelationMethod {
        self.method
    }
}

impl<T> PitchEstimator<T> for AutocorrelationEstimator
where
    T: Float,
{
    fn estimate(
        &self,
        signal: &[T],
        sample_rate: usize,
    ) -> Result<Option<Pitch<T>>, EstimateError> {
        if signal.is_empty() {
            return Err(EstimateError::EmptyWindow);
        }
        if sample_rate == 0 {
            return Err(EstimateError::InvalidSampleRate(sample_rate));
        }

        if !has_sufficient_energy(signal) {
            log::trace!("window of {} samples is below the energy gate", signal.len());
            return Ok(None);
        }

        let (start, stop) = trim_bounds(signal);
        let trimmed = &signal[start..stop];
        if trimmed.len() < MIN_TRIMMED_LEN {
            log::trace!("trimmed window [{}, {}) is too short", start, stop);
            return Ok(None);
        }

        let lag_count = self.max_lag.unwrap_or(trimmed.len());
        let autocorr = autocorrelation_buffer(trimmed, lag_count, self.method);

        let pitch = pitch_from_autocorrelation(&autocorr, sample_rate);
        if let Some(pitch) = &pitch {
            log::debug!(
                "pitch {} Hz (clarity {}) from {} samples",
                pitch.frequency,
                pitch.clarity,
                trimmed.len()
            );
        }
        Ok(pitch)
    }
}

/// Estimate the pitch of `signal` with the default [AutocorrelationEstimator].
pub fn estimate<T: Float>(
    signal: &[T],
    sample_rate: usize,
) -> Result<Option<Pitch<T>>, EstimateError> {
    AutocorrelationEstimator::new().estimate(signal, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f64, amplitude: f64, size: usize, sample_rate: usize) -> Vec<f64> {
        let dx = 2.0 * std::f64::consts::PI * freq / sample_rate as f64;
        (0..size).map(|i| amplitude * (i as f64 * dx).sin()).collect()
    }

    #[test]
    fn contract_violations() {
        let estimator = AutocorrelationEstimator::new();
        assert_eq!(
            PitchEstimator::<f64>::estimate(&estimator, &[], 44100),
            Err(EstimateError::EmptyWindow)
        );
        assert_eq!(
            estimator.estimate(&[0.5f64, -0.5][..], 0),
            Err(EstimateError::InvalidSampleRate(0))
        );
    }

    #[test]
    fn short_windows_have_no_pitch() {
        for len in 1..=4 {
            let signal: Vec<f32> = (0..len).map(|i| if i % 2 == 0 { 0.5 } else { -0.5 }).collect();
            assert_eq!(estimate(&signal, 8000), Ok(None), "length {}", len);
        }
    }

    #[test]
    fn builder() {
        let estimator = AutocorrelationEstimator::new()
            .with_max_lag(512)
            .with_method(AutocorrelationMethod::Fft);
        assert_eq!(estimator.max_lag(), Some(512));
        assert_eq!(estimator.method(), AutocorrelationMethod::Fft);
        assert_eq!(estimator.with_max_lag(0).max_lag(), None);
    }

    #[test]
    fn bounded_lags_miss_long_periods() {
        // 100 Hz at 8 kHz has a period of 80 samples.
        let signal = sine(100.0, 0.5, 1024, 8000);
        let estimator = AutocorrelationEstimator::new().with_max_lag(60);
        assert_eq!(estimator.estimate(&signal, 8000), Ok(None));

        let pitch = estimator.with_max_lag(200).estimate(&signal, 8000).unwrap().unwrap();
        assert!((pitch.frequency - 100.0).abs() < 1.0, "{}", pitch.frequency);
    }

    #[test]
    fn shared_between_threads() {
        let estimator = AutocorrelationEstimator::new().with_max_lag(400);
        let signal = sine(220.0, 0.5, 2048, 44100);
        let results: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| estimator.estimate(&signal, 44100)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(results.windows(2).all(|w| w[0] == w[1]));
        assert!(results[0].unwrap().is_some());
    }
}
