use crate::float::Float;

pub fn new_real_buffer<T: Float>(size: usize) -> Vec<T> {
    vec![T::zero(); size]
}

/// Compute the sum of the square of each element of `arr`.
pub fn square_sum<T: Float>(arr: &[T]) -> T {
    arr.iter().map(|&s| s * s).sum::<T>()
}

/// Copy `window` samples of `signal` starting at `start` into `output`.
/// Anything past the end of `signal` is zero padded.
///
/// ```rust
/// use mad_pitch::utils::buffer::get_chunk;
///
/// let signal = [1.0, 2.0, 3.0];
/// let mut chunk = [9.0; 4];
/// get_chunk(&signal, 1, 4, &mut chunk);
/// assert_eq!(chunk, [2.0, 3.0, 0.0, 0.0]);
/// ```
pub fn get_chunk<T: Float>(signal: &[T], start: usize, window: usize, output: &mut [T]) {
    assert!(window <= output.len());

    let start = start.min(signal.len());
    let stop = (start + window).min(signal.len());
    let copied = stop - start;

    output[..copied].copy_from_slice(&signal[start..stop]);
    output[copied..]
        .iter_mut()
        .for_each(|o| *o = T::zero());
}

/// Iterate over every full `window` of `signal`, advancing by `hop` samples.
/// A trailing partial window is not produced; use [get_chunk] to pad it.
pub fn frames<'a, T>(
    signal: &'a [T],
    window: usize,
    hop: usize,
) -> impl Iterator<Item = &'a [T]> + 'a {
    let count = match window > 0 && hop > 0 && signal.len() >= window {
        true => (signal.len() - window) / hop + 1,
        false => 0,
    };
    (0..count).map(move |i| &signal[i * hop..i * hop + window])
}
