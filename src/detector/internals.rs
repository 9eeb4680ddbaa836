use rustfft::FftPlanner;

use crate::float::Float;
use crate::utils::buffer::{copy_complex_to_real, copy_real_to_complex, modulus_squared};
use crate::utils::buffer::{mean_square, new_complex_buffer, new_real_buffer, ComplexComponent};
use crate::utils::peak::{correct_peak, find_max_from, skip_descent, PeakCorrection};

/// Windows whose RMS amplitude falls below this value carry too little signal to analyze.
pub const RMS_THRESHOLD: f64 = 0.005;

/// Amplitude below which a sample is considered quiet enough to start or end the
/// analyzed region. Tuned for audio normalized to `[-1, 1]`.
pub const TRIM_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pitch<T>
where
    T: Float,
{
    pub frequency: T,
    pub clarity: T,
}

impl<T: Float> Pitch<T> {
    /// Frequency of `pitch`, or `-1` when no reliable pitch was found.
    pub fn frequency_or_sentinel(pitch: Option<Self>) -> T {
        pitch.map_or(-T::one(), |p| p.frequency)
    }
}

/// How lags of the autocorrelation are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutocorrelationMethod {
    /// Explicit sum of products for each lag. Exact and deterministic, O(M·L).
    #[default]
    Direct,
    /// Zero-padded FFT, O(M log M). Agrees with `Direct` up to rounding.
    Fft,
}

/// `true` when the RMS amplitude of `signal` reaches [RMS_THRESHOLD].
pub fn has_sufficient_energy<T: Float>(signal: &[T]) -> bool {
    // Compare squares to avoid a square root.
    let threshold = T::from_f64(RMS_THRESHOLD * RMS_THRESHOLD).unwrap_or_else(T::zero);
    !(mean_square(signal) < threshold)
}

/// Bounds `[r1, r2)` of the part of `signal` left after dropping a loud attack at
/// the start and a loud tail at the end. Each side searches only its half of `signal`.
pub fn trim_bounds<T: Float>(signal: &[T]) -> (usize, usize) {
    let n = signal.len();
    let half = (n + 1) / 2;
    let threshold = T::from_f64(TRIM_THRESHOLD).unwrap_or_else(T::zero);
    let quiet = |x: T| x < threshold && x > -threshold;

    let r1 = (0..half).find(|&i| quiet(signal[i])).unwrap_or(0);
    let r2 = (1..half)
        .map(|i| n - i)
        .find(|&i| quiet(signal[i]))
        .unwrap_or_else(|| n.saturating_sub(1));

    (r1, r2.max(r1))
}

/// Compute `result[i] = sum_j signal[j] * signal[j + i]` for every lag `i < result.len()`.
pub fn autocorrelation<T: Float>(signal: &[T], result: &mut [T]) {
    assert!(result.len() <= signal.len());
    result.iter_mut().enumerate().for_each(|(lag, r)| {
        *r = signal
            .iter()
            .zip(&signal[lag..])
            .map(|(&a, &b)| a * b)
            .sum();
    });
}

/// Same values as [autocorrelation], computed with an FFT. The signal is zero padded so
/// the circular correlation of the FFT equals the linear one for every lag.
pub fn fft_autocorrelation<T: Float>(signal: &[T], result: &mut [T]) {
    assert!(result.len() <= signal.len());
    if signal.is_empty() {
        return;
    }

    let fft_size = (2 * signal.len() - 1).next_power_of_two();
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    let inv_fft = planner.plan_fft_inverse(fft_size);

    let scratch_size = fft
        .get_inplace_scratch_len()
        .max(inv_fft.get_inplace_scratch_len());
    let mut signal_complex = new_complex_buffer(fft_size);
    let mut scratch = new_complex_buffer(scratch_size);

    copy_real_to_complex(signal, &mut signal_complex, ComplexComponent::Re);
    fft.process_with_scratch(&mut signal_complex, &mut scratch);
    modulus_squared(&mut signal_complex);
    inv_fft.process_with_scratch(&mut signal_complex, &mut scratch);
    copy_complex_to_real(&signal_complex, result, ComplexComponent::Re);

    // rustfft does not normalize, so fft -> inverse fft scales by `fft_size`.
    if let Some(scale) = T::from_usize(fft_size) {
        result.iter_mut().for_each(|r| *r = *r / scale);
    }
}

/// Allocate and fill the autocorrelation of `signal` for lags `0..lag_count`.
pub fn autocorrelation_buffer<T: Float>(
    signal: &[T],
    lag_count: usize,
    method: AutocorrelationMethod,
) -> Vec<T> {
    let mut result = new_real_buffer(lag_count.min(signal.len()));
    match method {
        AutocorrelationMethod::Direct => autocorrelation(signal, &mut result),
        AutocorrelationMethod::Fft => fft_autocorrelation(signal, &mut result),
    }
    result
}

/// Pick the period from an autocorrelation: skip the descent from the lag-0 peak,
/// take the highest remaining lag and refine it by parabolic interpolation.
pub fn pitch_from_autocorrelation<T: Float>(autocorr: &[T], sample_rate: usize) -> Option<Pitch<T>> {
    let start = skip_descent(autocorr);
    let peak = find_max_from(autocorr, start)?;
    if peak.0 == 0 {
        log::trace!("autocorrelation peak at lag 0");
        return None;
    }

    let Some((period, peak_value)) = correct_peak(peak, autocorr, PeakCorrection::Parabolic)
    else {
        log::trace!("autocorrelation peak at boundary lag {}", peak.0);
        return None;
    };
    if !period.is_finite() || period <= T::zero() {
        log::trace!("refined period {} is not usable", period);
        return None;
    }

    let frequency = T::from_usize(sample_rate)? / period;
    if !frequency.is_finite() {
        return None;
    }

    Some(Pitch {
        frequency,
        clarity: peak_value / autocorr[0],
    })
}
