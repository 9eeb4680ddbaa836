//! # Pitch Autocorrelation
//! *pitch_autocorrelation* estimates the fundamental frequency of a live audio signal
//! from a rolling window of time-domain samples. It is meant to be called once per
//! captured window by whatever drives the audio input; the estimator keeps no state
//! between calls.
//!
//! # Estimators
//! An *estimator* takes one sample window and its sample rate and returns either a
//! [Pitch] or `None` when no reliable pitch is present (silence, noise, or a window
//! too short to contain a period).
//!
//!   * [AutocorrelationEstimator][detector::autocorrelation::AutocorrelationEstimator]
//!
//! # Examples
//! ```
//! use pitch_autocorrelation::detector::autocorrelation::AutocorrelationEstimator;
//! use pitch_autocorrelation::detector::PitchEstimator;
//!
//! fn main() {
//!     const SAMPLE_RATE: usize = 44100;
//!     const SIZE: usize = 2048;
//!
//!     // Signal coming from some source (microphone, generated, etc...)
//!     let dt = 1.0 / SAMPLE_RATE as f64;
//!     let freq = 440.0;
//!     let signal: Vec<f64> = (0..SIZE)
//!         .map(|x| 0.5 * (2.0 * std::f64::consts::PI * x as f64 * dt * freq).sin())
//!         .collect();
//!
//!     let estimator = AutocorrelationEstimator::new();
//!
//!     match estimator.estimate(&signal, SAMPLE_RATE).unwrap() {
//!         Some(pitch) => println!("Frequency: {}, Clarity: {}", pitch.frequency, pitch.clarity),
//!         None => println!("--"),
//!     }
//! }
//! ```

pub use detector::autocorrelation::estimate;
pub use detector::internals::Pitch;
pub use error::EstimateError;

pub mod detector;
pub mod error;
pub mod float;
pub mod utils;
