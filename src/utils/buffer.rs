use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;

use crate::float::Float;

pub enum ComplexComponent {
    Re,
    Im,
}

pub fn new_real_buffer<T: Float>(size: usize) -> Vec<T> {
    vec![T::zero(); size]
}

pub fn new_complex_buffer<T: Float>(size: usize) -> Vec<Complex<T>> {
    vec![Complex::zero(); size]
}

pub fn copy_real_to_complex<T: Float>(
    input: &[T],
    output: &mut [Complex<T>],
    component: ComplexComponent,
) {
    assert!(input.len() <= output.len());
    match component {
        ComplexComponent::Re => input.iter().zip(output.iter_mut()).for_each(|(i, o)| {
            o.re = *i;
            o.im = T::zero();
        }),
        ComplexComponent::Im => input.iter().zip(output.iter_mut()).for_each(|(i, o)| {
            o.im = *i;
            o.re = T::zero();
        }),
    }
    output[input.len()..]
        .iter_mut()
        .for_each(|o| *o = Complex::zero())
}

/// Copy one component of the first `output.len()` values of `input` to `output`.
pub fn copy_complex_to_real<T: Float>(
    input: &[Complex<T>],
    output: &mut [T],
    component: ComplexComponent,
) {
    assert!(output.len() <= input.len());
    let values = input.iter().map(|c| match component {
        ComplexComponent::Re => c.re,
        ComplexComponent::Im => c.im,
    });
    output.iter_mut().zip(values).for_each(|(o, v)| *o = v);
}

/// Computes |x|^2 for each complex value x in `arr`. This function
/// modifies `arr` in place and leaves the complex component zero.
pub fn modulus_squared<T: Float>(arr: &mut [Complex<T>]) {
    for s in arr {
        s.re = s.re * s.re + s.im * s.im;
        s.im = T::zero();
    }
}

/// Compute the sum of the square of each element of `arr`.
pub fn square_sum<T: Float>(arr: &[T]) -> T {
    arr.iter().map(|&s| s * s).sum::<T>()
}

/// Mean of the squared samples, i.e. the square of the RMS amplitude.
/// Returns zero for an empty slice.
pub fn mean_square<T: Float>(arr: &[T]) -> T {
    match T::from_usize(arr.len()) {
        Some(len) if !arr.is_empty() => square_sum(arr) / len,
        _ => T::zero(),
    }
}

/// Iterate over consecutive windows of `size` samples, starting `hop` samples apart.
/// A trailing window shorter than `size` is not produced.
///
/// ```rust
/// use pitch_autocorrelation::utils::buffer::frames;
///
/// let signal = [0.0, 1.0, 2.0, 3.0, 4.0];
/// let windows: Vec<&[f64]> = frames(&signal, 2, 2).collect();
/// assert_eq!(windows, vec![&[0.0, 1.0][..], &[2.0, 3.0][..]]);
/// ```
pub fn frames<T: Float>(signal: &[T], size: usize, hop: usize) -> impl Iterator<Item = &[T]> + '_ {
    assert!(size > 0 && hop > 0, "frame size and hop must be positive");
    let count = match signal.len() >= size {
        true => (signal.len() - size) / hop + 1,
        false => 0,
    };
    (0..count).map(move |i| &signal[i * hop..i * hop + size])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_square_of_constant() {
        assert_eq!(mean_square(&[0.5f64; 8]), 0.25);
        assert_eq!(mean_square::<f32>(&[]), 0.0);
    }

    #[test]
    fn complex_copies() {
        let input = [1.0f64, 2.0, 3.0];
        let mut complex = new_complex_buffer(5);
        complex[4] = Complex::new(9.0, 9.0);
        copy_real_to_complex(&input, &mut complex, ComplexComponent::Re);
        assert_eq!(complex[1], Complex::new(2.0, 0.0));
        assert_eq!(complex[4], Complex::zero());

        modulus_squared(&mut complex);
        let mut output = new_real_buffer(3);
        copy_complex_to_real(&complex, &mut output, ComplexComponent::Re);
        assert_eq!(output, vec![1.0, 4.0, 9.0]);
    }

    #[test]
    fn frames_skip_partial_tail() {
        let signal: Vec<f32> = (0..10).map(|i| i as f32).collect();
        let windows: Vec<_> = frames(&signal, 4, 3).collect();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[2], &[6.0, 7.0, 8.0, 9.0]);
        assert_eq!(frames(&signal, 11, 1).count(), 0);
    }
}
