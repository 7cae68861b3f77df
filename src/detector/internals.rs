use crate::float::Float;
use crate::utils::buffer::square_sum;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Pitch<T>
where
    T: Float,
{
    pub frequency: T,
    /// Correlation score of the lag the frequency was derived from.
    pub clarity: T,
}

/// Outcome of a correlation sweep over the lags of a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sweep<T> {
    /// A good lag was followed by a worse one; `offset` is the last good lag.
    /// Its neighbours on both sides have been recorded in the profile.
    Peak { offset: usize, correlation: T },
    /// Every lag was scanned without the correlation falling after a good lag.
    /// `best` is the best good lag seen, if any.
    Exhausted { best: Option<(usize, T)> },
}

/// Returns `true` if the energy of `signal` reaches `threshold`.
pub fn has_sufficient_power<T: Float>(signal: &[T], threshold: T) -> bool {
    square_sum(signal) >= threshold
}

/// Similarity of `signal` to itself shifted by `offset`, measured over the
/// first `window` samples:
///
///  > c(offset) = 1 - (1/w) * sum_{i=0}^{w-1} |x_i - x_{i+offset}|
///
/// A score of one means the shifted copy matches exactly. `window + offset`
/// must not exceed `signal.len()`.
pub fn mean_difference_correlation<T: Float>(signal: &[T], window: usize, offset: usize) -> T {
    assert!(
        window + offset <= signal.len(),
        "The shifted window must fit inside the signal"
    );
    let diff = signal[..window]
        .iter()
        .zip(signal[offset..offset + window].iter())
        .map(|(&a, &b)| (a - b).abs())
        .sum::<T>();
    T::one() - diff / T::from_count(window)
}

/// Scan lags `min_lag..profile.len()`, storing `correlation_at(lag)` in `profile`.
///
/// A lag is *good* when its score exceeds `good_correlation` and is higher than
/// the previous lag's score. The sweep stops at the first lag that is not good
/// once a good lag has been seen, so the first peak wins even if a higher one
/// follows later.
pub fn sweep<T, F>(
    profile: &mut [T],
    min_lag: usize,
    good_correlation: T,
    mut correlation_at: F,
) -> Sweep<T>
where
    T: Float,
    F: FnMut(usize) -> T,
{
    let mut best: Option<(usize, T)> = None;
    let mut last_correlation = T::one();

    for offset in min_lag..profile.len() {
        let correlation = correlation_at(offset);
        profile[offset] = correlation;

        if correlation > good_correlation && correlation > last_correlation {
            match best {
                Some((_, best_correlation)) if best_correlation >= correlation => {}
                _ => best = Some((offset, correlation)),
            }
        } else if let Some((offset, correlation)) = best {
            return Sweep::Peak { offset, correlation };
        }
        last_correlation = correlation;
    }

    Sweep::Exhausted { best }
}
