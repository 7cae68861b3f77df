//! Tuning constants for the [AutocorrelationDetector][crate::detector::autocorrelation::AutocorrelationDetector].
//!
//! The defaults are empirical. They are exposed so they can be tweaked or tested, but changing
//! them changes the detector's output on real signals.

use thiserror::Error;

use crate::float::Float;

/// Below this sum of squares a frame is treated as silence.
pub const DEFAULT_SILENCE_THRESHOLD: f64 = 0.001;
/// A lag must score above this to start a peak.
pub const DEFAULT_GOOD_CORRELATION: f64 = 0.9;
/// If no peak was closed, the best lag must still score above this.
pub const DEFAULT_FALLBACK_CORRELATION: f64 = 0.01;
/// Scales the sub-lag shift computed around a peak.
pub const DEFAULT_INTERPOLATION_FACTOR: f64 = 8.0;
/// First lag scanned.
pub const DEFAULT_MIN_LAG: usize = 0;

/// Errors returned when building a [DetectorConfig].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A threshold or factor was NaN or infinite.
    #[error("{name} must be finite")]
    NotFinite {
        /// Name of the offending parameter.
        name: &'static str,
    },

    /// The silence threshold was negative.
    #[error("silence threshold must not be negative, got {0}")]
    NegativeSilenceThreshold(f64),

    /// No correlation score (at most 1) could ever exceed the threshold.
    #[error("good correlation threshold must be below 1, got {0}")]
    UnreachableGoodCorrelation(f64),
}

/// Thresholds and factors driving a single estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct DetectorConfig<T: Float> {
    pub silence_threshold: T,
    pub good_correlation: T,
    pub fallback_correlation: T,
    pub interpolation_factor: T,
    pub min_lag: usize,
}

impl<T: Float> DetectorConfig<T> {
    pub fn builder() -> DetectorConfigBuilder<T> {
        DetectorConfigBuilder::new()
    }

    /// Check that every threshold is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("silence_threshold", self.silence_threshold),
            ("good_correlation", self.good_correlation),
            ("fallback_correlation", self.fallback_correlation),
            ("interpolation_factor", self.interpolation_factor),
        ];
        if let Some(&(name, _)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::NotFinite { name });
        }
        if self.silence_threshold < T::zero() {
            return Err(ConfigError::NegativeSilenceThreshold(
                self.silence_threshold.to_f64().unwrap_or(f64::NAN),
            ));
        }
        if self.good_correlation >= T::one() {
            return Err(ConfigError::UnreachableGoodCorrelation(
                self.good_correlation.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }
}

impl<T: Float> Default for DetectorConfig<T> {
    fn default() -> Self {
        DetectorConfig {
            silence_threshold: T::constant(DEFAULT_SILENCE_THRESHOLD),
            good_correlation: T::constant(DEFAULT_GOOD_CORRELATION),
            fallback_correlation: T::constant(DEFAULT_FALLBACK_CORRELATION),
            interpolation_factor: T::constant(DEFAULT_INTERPOLATION_FACTOR),
            min_lag: DEFAULT_MIN_LAG,
        }
    }
}

/// Builder for a [DetectorConfig]. Starts from the defaults.
///
/// ```rust
/// use mad_pitch::detector::config::DetectorConfig;
///
/// let config = DetectorConfig::<f32>::builder()
///     .good_correlation(0.95)
///     .min_lag(20)
///     .build()
///     .unwrap();
/// assert_eq!(config.min_lag, 20);
///
/// assert!(DetectorConfig::<f32>::builder().good_correlation(1.0).build().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DetectorConfigBuilder<T: Float> {
    config: DetectorConfig<T>,
}

impl<T: Float> DetectorConfigBuilder<T> {
    pub fn new() -> Self {
        DetectorConfigBuilder {
            config: DetectorConfig::default(),
        }
    }

    /// Sum of squares below which a frame is rejected as silent.
    pub fn silence_threshold(mut self, threshold: T) -> Self {
        self.config.silence_threshold = threshold;
        self
    }

    /// Score a rising lag must exceed before it can become a peak.
    pub fn good_correlation(mut self, threshold: T) -> Self {
        self.config.good_correlation = threshold;
        self
    }

    /// Score the best lag must exceed when the sweep never closes a peak.
    pub fn fallback_correlation(mut self, threshold: T) -> Self {
        self.config.fallback_correlation = threshold;
        self
    }

    /// Multiplier applied to the sub-lag shift around a peak.
    pub fn interpolation_factor(mut self, factor: T) -> Self {
        self.config.interpolation_factor = factor;
        self
    }

    /// First lag to scan. Lags below it can never be reported.
    pub fn min_lag(mut self, lag: usize) -> Self {
        self.config.min_lag = lag;
        self
    }

    pub fn build(self) -> Result<DetectorConfig<T>, ConfigError> {
        let config = self.config;
        let result = config.validate().map(|_| config);
        if let Err(err) = &result {
            log::debug!("rejected detector config {:?}: {}", config, err);
        }
        result
    }
}

impl<T: Float> Default for DetectorConfigBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
