//! # Mad Pitch
//! *mad_pitch* estimates the fundamental frequency of a monophonic sound from a single window of
//! samples. It is meant to be called once per captured audio frame, e.g. in a tuner: every call
//! is a pure function of the window and the sample rate, with no state carried between calls.
//!
//! The estimator is a time domain autocorrelation that compares the signal to shifted copies of
//! itself by *mean absolute difference*. See [detector::autocorrelation] for the details.
//!
//! # Examples
//! ```
//! use mad_pitch::detector::autocorrelation::AutocorrelationDetector;
//! use mad_pitch::detector::PitchDetector;
//! use mad_pitch::note::Note;
//!
//! fn main() {
//!     const SAMPLE_RATE: usize = 44100;
//!     const SIZE: usize = 1024;
//!
//!     // Signal coming from some source (microphone, generated, etc...)
//!     let dt = 1.0 / SAMPLE_RATE as f64;
//!     let freq = 220.0;
//!     let signal: Vec<f64> = (0..SIZE)
//!         .map(|x| (2.0 * std::f64::consts::PI * x as f64 * dt * freq).sin())
//!         .collect();
//!
//!     let detector = AutocorrelationDetector::<f64>::new();
//!
//!     let pitch = detector.get_pitch(&signal, SAMPLE_RATE).unwrap();
//!     let note = Note::from_frequency(pitch.frequency).unwrap();
//!
//!     println!("Frequency: {}, Clarity: {}", pitch.frequency, pitch.clarity);
//!     println!("Note: {} ({:+} cents)", note, note.cents);
//!     assert_eq!(note.to_string(), "A3");
//! }
//! ```
//!
//! # Features
//! - `serialization`: `serde` support for [DetectorConfig], [Pitch] and [note::Note].

pub use detector::autocorrelation::{estimate, AutocorrelationDetector};
pub use detector::config::{ConfigError, DetectorConfig};
pub use detector::internals::Pitch;

pub mod detector;
pub mod float;
pub mod note;
pub mod utils;
