//! Generic [Float] type which acts as a stand-in for `f32` or `f64`.
use num_traits::Float as NumFloat;
use std::fmt::{Debug, Display};
use std::iter::Sum;

/// Signals are processed as arrays of [Float]s. A [Float] is normally `f32` or `f64`.
pub trait Float: Display + Debug + NumFloat + Sum {
    /// Convert a tuning constant into `Self`. Lossless for `f64`, rounded for `f32`.
    fn constant(value: f64) -> Self;

    /// Convert a lag or sample rate into `Self`.
    fn from_count(value: usize) -> Self;
}

impl Float for f64 {
    fn constant(value: f64) -> Self {
        value
    }

    fn from_count(value: usize) -> Self {
        value as f64
    }
}

impl Float for f32 {
    fn constant(value: f64) -> Self {
        value as f32
    }

    fn from_count(value: usize) -> Self {
        value as f32
    }
}
