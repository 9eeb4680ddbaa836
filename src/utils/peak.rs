use crate::float::Float;

pub enum PeakCorrection {
    Parabolic,
    None,
}

/// Index of the end of the initial monotonic descent of `arr`: the first `d`
/// such that `arr[d] <= arr[d + 1]`, or the last index if `arr` never stops falling.
pub fn skip_descent<T: Float>(arr: &[T]) -> usize {
    arr.windows(2)
        .position(|win| !(win[0] > win[1]))
        .unwrap_or_else(|| arr.len().saturating_sub(1))
}

/// First position of the maximum of `arr[start..]`, with its value.
pub fn find_max_from<T: Float>(arr: &[T], start: usize) -> Option<(usize, T)> {
    arr.iter()
        .enumerate()
        .skip(start)
        .fold(None, |best, (i, &v)| match best {
            Some((_, max)) if !(v > max) => best,
            _ => Some((i, v)),
        })
}

/// Refine the position of `peak` using its neighbours in `data`. Returns `None`
/// when the peak sits on either edge of `data` and has no neighbour on one side.
pub fn correct_peak<T: Float>(
    peak: (usize, T),
    data: &[T],
    correction: PeakCorrection,
) -> Option<(T, T)> {
    let (idx, value) = peak;
    match correction {
        PeakCorrection::Parabolic => {
            if idx == 0 || idx + 1 >= data.len() {
                return None;
            }
            let shift = parabolic_shift(data[idx - 1], data[idx], data[idx + 1]);
            Some((T::from_usize(idx)? + shift, value))
        }
        PeakCorrection::None => Some((T::from_usize(idx)?, value)),
    }
}

/// Sub-sample offset of the vertex of the parabola through `(-1, left)`,
/// `(0, center)` and `(1, right)`. Zero when the three points are collinear.
fn parabolic_shift<T: Float>(left: T, center: T, right: T) -> T {
    let two = T::one() + T::one();
    let a = (left + right - two * center) / two;
    let b = (right - left) / two;
    if a != T::zero() {
        -b / (two * a)
    } else {
        T::zero()
    }
}
