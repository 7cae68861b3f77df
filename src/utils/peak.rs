use crate::float::Float;

/// How to refine an integer lag once a correlation peak has been found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PeakCorrection<T: Float> {
    /// Shift the lag by `factor * (right - left) / center`, using the
    /// correlation scores on either side of the peak.
    Shift(T),
    None,
}

/// Refine the peak at `idx` in `profile`, returning a fractional lag.
///
/// The refined lag falls back to `idx` itself whenever the correction cannot
/// be trusted: the peak has no neighbour on either side, the peak score is
/// zero, or the shifted lag is not positive and finite.
pub fn correct_peak<T: Float>(idx: usize, profile: &[T], correction: PeakCorrection<T>) -> T {
    let lag = T::from_count(idx);
    match correction {
        PeakCorrection::Shift(factor) => {
            if idx == 0 || idx + 1 >= profile.len() {
                return lag;
            }
            match shift(profile[idx - 1], profile[idx], profile[idx + 1]) {
                Some(shift) => {
                    let corrected = lag + factor * shift;
                    match corrected.is_finite() && corrected > T::zero() {
                        true => corrected,
                        false => lag,
                    }
                }
                None => lag,
            }
        }
        PeakCorrection::None => lag,
    }
}

/// Asymmetry of the two neighbours of a peak, relative to the peak itself.
fn shift<T: Float>(left: T, center: T, right: T) -> Option<T> {
    if center == T::zero() {
        return None;
    }
    let shift = (right - left) / center;
    match shift.is_finite() {
        true => Some(shift),
        false => None,
    }
}
