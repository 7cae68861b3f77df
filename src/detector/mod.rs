use crate::detector::internals::Pitch;
use crate::float::Float;

pub mod autocorrelation;
pub mod config;
pub mod internals;

pub trait PitchDetector<T>
where
    T: Float,
{
    /// Estimate the pitch of `signal`, or `None` if no pitch was detected.
    /// Detectors keep no state between calls.
    fn get_pitch(&self, signal: &[T], sample_rate: usize) -> Option<Pitch<T>>;
}
