//! Time domain autocorrelation based on the *mean absolute difference* between a window of the
//! signal and a shifted copy of itself.
//!
//! Let $S=(s_0,s_1,\ldots,s_N)$ be a discrete signal and $w = \lfloor N/2 \rfloor$. For every lag
//! $t < w$ the detector computes the similarity score
//! $$ c(t) = 1 - \frac{1}{w}\sum_{i=0}^{w-1} |s_i-s_{i+t}|, $$
//! which is one when the signal lines up with itself perfectly.
//!
//! ## Peak picking
//! Lags are scanned in increasing order. A lag is *good* when its score exceeds the good
//! correlation threshold and is still rising. As soon as the score stops rising after a good lag,
//! the scan ends: the detector reports the **first** peak, not the highest one. Later peaks are
//! usually multiples of the true period, so stopping early also keeps octave errors down.
//!
//! The peak lag is then refined with the scores on either side of it (see
//! [PeakCorrection::Shift]). If the scan runs out of lags while still rising, the best good lag is
//! used as is, provided it clears the fallback threshold.
//!
//! ## Cost
//! Each lag costs $w$ operations, so a full scan is $O(w^2)$. Periodic input usually stops after
//! the first period; noise that never correlates always pays for the full scan. This dominates
//! for windows much beyond a few thousand samples.

use crate::detector::config::{ConfigError, DetectorConfig};
use crate::detector::internals::{
    has_sufficient_power, mean_difference_correlation, sweep, Pitch, Sweep,
};
use crate::detector::PitchDetector;
use crate::float::Float;
use crate::utils::buffer::new_real_buffer;
use crate::utils::peak::{correct_peak, PeakCorrection};

/// Stateless pitch detector. It holds only its [DetectorConfig], so a single
/// instance can be shared freely between threads and audio callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutocorrelationDetector<T>
where
    T: Float,
{
    config: DetectorConfig<T>,
}

impl<T> AutocorrelationDetector<T>
where
    T: Float,
{
    /// A detector with the default thresholds.
    pub fn new() -> Self {
        AutocorrelationDetector {
            config: DetectorConfig::default(),
        }
    }

    pub fn with_config(config: DetectorConfig<T>) -> Self {
        AutocorrelationDetector { config }
    }

    /// Validate `config` and build a detector from it.
    pub fn try_with_config(config: DetectorConfig<T>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    pub fn config(&self) -> &DetectorConfig<T> {
        &self.config
    }
}

impl<T: Float> Default for AutocorrelationDetector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PitchDetector<T> for AutocorrelationDetector<T>
where
    T: Float,
{
    fn get_pitch(&self, signal: &[T], sample_rate: usize) -> Option<Pitch<T>> {
        let window = signal.len() / 2;
        if window < 1 || sample_rate == 0 {
            return None;
        }

        if !has_sufficient_power(signal, self.config.silence_threshold) {
            log::trace!("frame of {} samples rejected as silent", signal.len());
            return None;
        }

        let mut profile = new_real_buffer(window);
        let result = sweep(
            &mut profile,
            self.config.min_lag,
            self.config.good_correlation,
            |offset| mean_difference_correlation(signal, window, offset),
        );

        let sample_rate = T::from_count(sample_rate);
        match result {
            Sweep::Peak {
                offset,
                correlation,
            } => {
                let period = correct_peak(
                    offset,
                    &profile,
                    PeakCorrection::Shift(self.config.interpolation_factor),
                );
                log::trace!("peak at lag {} refined to {}", offset, period);
                Some(Pitch {
                    frequency: sample_rate / period,
                    clarity: correlation,
                })
            }
            Sweep::Exhausted {
                best: Some((offset, correlation)),
            } if correlation > self.config.fallback_correlation => {
                log::trace!("no falling edge after lag {}, using it as is", offset);
                Some(Pitch {
                    frequency: sample_rate / T::from_count(offset),
                    clarity: correlation,
                })
            }
            Sweep::Exhausted { .. } => None,
        }
    }
}

/// Estimate the fundamental frequency of `signal` with the default thresholds.
/// Returns `None` when no pitch was detected.
///
/// ```rust
/// let sample_rate = 44100;
/// let signal: Vec<f32> = (0..1024)
///     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / sample_rate as f32).sin())
///     .collect();
///
/// let frequency = mad_pitch::estimate(&signal, sample_rate).unwrap();
/// assert!((frequency - 440.0).abs() < 5.0);
///
/// assert_eq!(mad_pitch::estimate(&[0.0f32; 1024], sample_rate), None);
/// ```
pub fn estimate<T: Float>(signal: &[T], sample_rate: usize) -> Option<T> {
    AutocorrelationDetector::new()
        .get_pitch(signal, sample_rate)
        .map(|pitch| pitch.frequency)
}
