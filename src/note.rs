//! Mapping from a detected frequency to the nearest note of the 12 tone equal
//! temperament, with A4 = 440 Hz = note 69 (MIDI numbering).

use std::fmt;

use crate::float::Float;

const A4_FREQUENCY: f64 = 440.0;
const A4_NUMBER: i32 = 69;

const NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Nearest note to a frequency, and how far off the frequency is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Note {
    /// Note number, 69 for A4.
    pub number: i32,
    /// Deviation from the note's standard frequency, rounded down.
    pub cents: i32,
}

impl Note {
    /// Returns `None` unless `frequency` is positive and finite, so a missing
    /// pitch can be passed straight through.
    ///
    /// ```rust
    /// use mad_pitch::note::Note;
    ///
    /// let note = Note::from_frequency(261.63).unwrap();
    /// assert_eq!(note.to_string(), "C4");
    /// assert_eq!(note.cents, 0);
    ///
    /// assert_eq!(Note::from_frequency(-1.0), None);
    /// ```
    pub fn from_frequency<T: Float>(frequency: T) -> Option<Note> {
        let frequency = frequency.to_f64()?;
        if !frequency.is_finite() || frequency <= 0.0 {
            return None;
        }

        let semitones = 12.0 * (frequency / A4_FREQUENCY).log2();
        let number = semitones.round() as i32 + A4_NUMBER;
        let cents = (1200.0 * (frequency / standard_frequency(number)).log2()).floor() as i32;

        Some(Note { number, cents })
    }

    /// Exact frequency of this note, ignoring `cents`.
    pub fn standard_frequency(&self) -> f64 {
        standard_frequency(self.number)
    }

    pub fn name(&self) -> &'static str {
        NAMES[self.number.rem_euclid(12) as usize]
    }

    /// Scientific pitch notation octave; C4 is middle C.
    pub fn octave(&self) -> i32 {
        self.number.div_euclid(12) - 1
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name(), self.octave())
    }
}

/// Frequency in Hz of note `number`.
pub fn standard_frequency(number: i32) -> f64 {
    A4_FREQUENCY * 2f64.powf((number - A4_NUMBER) as f64 / 12.0)
}
