use std::io::Cursor;

use approx::assert_relative_eq;
use mad_pitch::detector::autocorrelation::AutocorrelationDetector;
use mad_pitch::detector::config::DetectorConfig;
use mad_pitch::detector::PitchDetector;
use mad_pitch::estimate;
use mad_pitch::float::Float;
use mad_pitch::note::Note;
use mad_pitch::utils::buffer::{frames, get_chunk, new_real_buffer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug)]
struct Signal<T> {
    sample_rate: usize,
    data: Vec<T>,
}

#[test]
fn sin_signal() {
    pure_frequency(String::from("sin"), 440.0, 0.01);
}

#[test]
fn low_sin_signal() {
    pure_frequency(String::from("sin"), 110.0, 0.01);
}

#[test]
fn square_signal() {
    pure_frequency(String::from("square"), 440.0, 0.03);
}

#[test]
fn triangle_signal() {
    pure_frequency(String::from("triangle"), 440.0, 0.03);
}

#[test]
fn a4_maps_to_note() {
    let signal = sin_wave::<f64>(440.0, 1024, 44100);

    let frequency = estimate(&signal, 44100).unwrap();
    println!("A4 estimated at {} Hz", frequency);
    assert!((435.0..=445.0).contains(&frequency));

    let note = Note::from_frequency(frequency).unwrap();
    assert_eq!(note.number, 69);
    assert_eq!(note.name(), "A");
    assert_eq!(note.to_string(), "A4");
    assert!(note.cents.abs() <= 50);
}

#[test]
fn a3_maps_to_note() {
    let signal = sin_wave::<f64>(220.0, 1024, 44100);

    let frequency = estimate(&signal, 44100).unwrap();
    println!("A3 estimated at {} Hz", frequency);
    assert!((217.0..=223.0).contains(&frequency));

    let note = Note::from_frequency(frequency).unwrap();
    assert_eq!(note.number, 57);
    assert_eq!(note.to_string(), "A3");
    assert!(note.cents.abs() <= 50);
}

#[test]
fn single_precision() {
    let signal = sin_wave::<f32>(440.0, 1024, 48000);
    let frequency = estimate(&signal, 48000).unwrap();
    assert!((frequency - 440.0).abs() < 4.4);
}

#[test]
fn silence() {
    let detector = AutocorrelationDetector::<f64>::new();
    let zeros = new_real_buffer::<f64>(1024);
    assert!(detector.get_pitch(&zeros, 44100).is_none());

    // Sum of squares is about 1.3e-4.
    let quiet: Vec<f64> = sin_wave::<f64>(440.0, 1024, 44100)
        .into_iter()
        .map(|s| s * 0.0005)
        .collect();
    assert!(detector.get_pitch(&quiet, 44100).is_none());
}

#[test]
fn noise() {
    const TRIALS: usize = 200;
    let detector = AutocorrelationDetector::<f64>::new();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    let detected = (0..TRIALS)
        .filter(|_| {
            let signal: Vec<f64> = (0..1024).map(|_| rng.gen_range(-1.0..1.0)).collect();
            detector.get_pitch(&signal, 44100).is_some()
        })
        .count();

    println!("pitch detected in {} of {} noise frames", detected, TRIALS);
    assert!(detected * 20 <= TRIALS);
}

#[test]
fn idempotent() {
    let signal = square_wave::<f64>(330.0, 2048, 48000);
    let detector = AutocorrelationDetector::<f64>::new();

    let first = detector.get_pitch(&signal, 48000);
    let second = detector.get_pitch(&signal, 48000);
    assert!(first.is_some());
    assert_eq!(first, second);
    assert_eq!(estimate(&signal, 48000), estimate(&signal, 48000));
}

#[test]
fn input_is_not_mutated() {
    let signal = triangle_wave::<f64>(440.0, 1024, 44100);
    let copy = signal.clone();
    let _ = estimate(&signal, 44100);
    assert_eq!(signal, copy);
}

#[test]
fn tiny_buffers() {
    assert_eq!(estimate::<f64>(&[], 44100), None);
    assert_eq!(estimate(&[0.7f64], 44100), None);
    assert_eq!(estimate(&[0.7f64, -0.7], 44100), None);
    assert_eq!(estimate(&[0.0f32, 0.0], 44100), None);
    // Odd lengths ignore the last sample when sizing the lags.
    let odd = sin_wave::<f64>(440.0, 1025, 44100);
    assert!(estimate(&odd, 44100).is_some());
}

#[test]
fn falls_back_when_peak_is_not_closed() {
    // The period (515 samples) is longer than the largest lag scanned (511),
    // so the correlation is still rising when the scan ends.
    const SAMPLE_RATE: usize = 44100;
    let freq = SAMPLE_RATE as f64 / 515.0;
    let signal = sin_wave::<f64>(freq, 1024, SAMPLE_RATE);

    let pitch = AutocorrelationDetector::<f64>::new()
        .get_pitch(&signal, SAMPLE_RATE)
        .unwrap();
    assert_relative_eq!(pitch.frequency, SAMPLE_RATE as f64 / 511.0);
    assert!(pitch.clarity > 0.9);

    // Raising the fallback bar above the best score rejects it.
    let strict = AutocorrelationDetector::with_config(
        DetectorConfig::<f64>::builder()
            .fallback_correlation(0.999)
            .build()
            .unwrap(),
    );
    assert!(strict.get_pitch(&signal, SAMPLE_RATE).is_none());
}

#[test]
fn min_lag_excludes_short_periods() {
    // With lags below 150 skipped, a 440 Hz period (~100 samples) can only be
    // found again at twice its length.
    let signal = sin_wave::<f64>(440.0, 1024, 44100);
    let detector = AutocorrelationDetector::with_config(
        DetectorConfig::<f64>::builder().min_lag(150).build().unwrap(),
    );

    let frequency = detector.get_pitch(&signal, 44100).unwrap().frequency;
    assert!((frequency - 220.0).abs() < 3.0);
}

#[test]
fn wav_round_trip() {
    let signal: Signal<f64> = wav_to_signal(&sin_wave::<f64>(261.63, 44100, 44100), 44100);
    let detector = AutocorrelationDetector::<f64>::new();

    let mut detected = 0;
    for frame in frames(&signal.data, 1024, 512) {
        let pitch = detector.get_pitch(frame, signal.sample_rate).unwrap();
        let note = Note::from_frequency(pitch.frequency).unwrap();
        assert_eq!(note.to_string(), "C4");
        detected += 1;
    }
    assert_eq!(detected, (44100 - 1024) / 512 + 1);
}

/// Write `data` as 16 bit PCM and read it back, the way a recording would arrive.
fn wav_to_signal(data: &[f64], sample_rate: usize) -> Signal<f64> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: sample_rate as u32,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for s in data {
            writer
                .write_sample((s * 0.5 * i16::MAX as f64) as i16)
                .unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.set_position(0);

    let mut reader = hound::WavReader::new(cursor).unwrap();
    let sample_rate = reader.spec().sample_rate as usize;
    let data: Vec<f64> = reader
        .samples::<i16>()
        .map(|s| s.unwrap() as f64 / i16::MAX as f64)
        .collect();

    Signal { sample_rate, data }
}

fn sin_wave<T: Float>(freq: f64, size: usize, sample_rate: usize) -> Vec<T> {
    let mut signal = new_real_buffer(size);
    let two_pi = 2.0 * std::f64::consts::PI;
    let dx = two_pi * freq / sample_rate as f64;
    for i in 0..size {
        let x = i as f64 * dx;
        let y = x.sin();
        signal[i] = T::constant(y);
    }
    signal
}

fn square_wave<T: Float>(freq: f64, size: usize, sample_rate: usize) -> Vec<T> {
    let mut signal = new_real_buffer(size);
    let period = sample_rate as f64 / freq;

    for i in 0..size {
        let x = i as f64 / period;
        let frac = x - x.floor();
        let y = match frac >= 0.5 {
            true => -1.0,
            false => 1.0,
        };
        signal[i] = T::constant(y);
    }
    signal
}

fn triangle_wave<T: Float>(freq: f64, size: usize, sample_rate: usize) -> Vec<T> {
    let mut signal = new_real_buffer(size);
    let period = sample_rate as f64 / freq;

    for i in 0..size {
        let x = i as f64 / period;
        let frac = x - x.floor();
        let y = match frac {
            f if f >= 0. && f < 0.25 => 4. * f,
            f if f >= 0.25 && f < 0.75 => 1. - 4. * (f - 0.25),
            f if f >= 0.75 && f < 1. => -1. + 4. * (f - 0.75),
            _ => panic!("Should be between 0 and 1"),
        };
        signal[i] = T::constant(y);
    }
    signal
}

fn signal_factory<T: Float>(name: String, freq: f64, size: usize, sample_rate: usize) -> Vec<T> {
    match name.as_ref() {
        "sin" => {
            return sin_wave(freq, size, sample_rate);
        }
        "square" => {
            return square_wave(freq, size, sample_rate);
        }
        "triangle" => {
            return triangle_wave(freq, size, sample_rate);
        }
        _ => {
            panic!("Unknown wave function {}", name);
        }
    }
}

/// Slide a window over a long signal of `freq_in` and check every estimate
/// is within `tolerance` (relative) of it.
fn pure_frequency(wave_name: String, freq_in: f64, tolerance: f64) {
    const SAMPLE_RATE: usize = 48000;
    const DURATION: f64 = 1.0;
    const SAMPLE_SIZE: usize = (SAMPLE_RATE as f64 * DURATION) as usize;
    const WINDOW: usize = 1024;
    const DELTA_T: usize = WINDOW / 4;
    const N_WINDOWS: usize = (SAMPLE_SIZE - WINDOW) / DELTA_T;

    let signal = signal_factory::<f64>(wave_name, freq_in, SAMPLE_SIZE, SAMPLE_RATE);

    let mut chunk = new_real_buffer::<f64>(WINDOW);

    let detector = AutocorrelationDetector::<f64>::new();

    for i in 0..N_WINDOWS {
        let t: usize = i * DELTA_T;
        get_chunk(&signal, t, WINDOW, &mut chunk);

        let pitch = detector.get_pitch(&chunk, SAMPLE_RATE);

        match pitch {
            Some(pitch) => {
                let frequency = pitch.frequency;
                let clarity = pitch.clarity;
                println!(
                    "Window {}; clarity: {}; freq: {} (expected {})",
                    i, clarity, frequency, freq_in
                );
                assert!((frequency - freq_in).abs() < tolerance * freq_in);
            }
            None => {
                println!("No peaks accepted.");
                assert!(false);
            }
        }
    }
}
