//! Synthetic sound generators — Karplus-Strong plucks and metronome clicks.
//!
//! Each generator produces a mono f32 buffer at the given sample rate.
//! Noise-based generators use a seeded `ChaCha8Rng` for determinism.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::{ChordDefinition, STRING_COUNT};

/// Open-string frequencies in Hz, low E2 to high e4.
pub const STRING_FREQS: [f64; STRING_COUNT] = [82.41, 110.00, 146.83, 196.00, 246.94, 329.63];

/// Seconds between successive string onsets in a strum.
const STRUM_STAGGER_SECS: f64 = 0.03;

/// Ring time of a single plucked string.
const PLUCK_SECS: f64 = 1.5;

/// Peak level a mixed strum is normalized to.
const STRUM_PEAK: f32 = 0.7;

/// Frequency of a note at the given string and fret (12-TET).
pub fn note_freq(string: usize, fret: u8) -> f64 {
    STRING_FREQS[string] * 2.0_f64.powf(fret as f64 / 12.0)
}

/// Generate a plucked string using the Karplus-Strong algorithm.
///
/// A seeded noise burst feeds a delay line with averaging and slight
/// damping, producing a naturally decaying string tone.
pub fn generate_pluck(freq: f64, sample_rate: u32, seed: u64) -> Vec<f32> {
    let delay_len = (sample_rate as f64 / freq).round() as usize;
    if delay_len == 0 {
        return Vec::new();
    }

    let num_samples = (PLUCK_SECS * sample_rate as f64) as usize;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut delay_buf: Vec<f64> = (0..delay_len).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let mut delay_idx = 0;

    let mut output = Vec::with_capacity(num_samples);
    for i in 0..num_samples {
        let sample = delay_buf[delay_idx];

        let next_idx = (delay_idx + 1) % delay_len;
        let avg = (delay_buf[delay_idx] + delay_buf[next_idx]) * 0.5;
        let damping = 0.996;
        delay_buf[delay_idx] = avg * damping;
        delay_idx = next_idx;

        // Short fade at the tail to avoid clicks
        let fade = if i > num_samples.saturating_sub(200) {
            (num_samples - i) as f64 / 200.0
        } else {
            1.0
        };

        output.push((sample * fade) as f32);
    }

    output
}

/// Render a full strum of the chord: one pluck per sounded string with a
/// short stagger between onsets, mixed and normalized.
pub fn generate_strum(chord: &ChordDefinition, sample_rate: u32, seed: u64) -> Vec<f32> {
    let mut mixed: Vec<f32> = Vec::new();

    for (string, fret) in chord.frets.iter().enumerate() {
        let Some(fret) = fret.sounding_fret() else {
            continue;
        };
        let freq = note_freq(string, fret);
        let wave = generate_pluck(freq, sample_rate, seed.wrapping_add(string as u64));
        let offset = (string as f64 * STRUM_STAGGER_SECS * sample_rate as f64) as usize;

        if mixed.len() < offset + wave.len() {
            mixed.resize(offset + wave.len(), 0.0);
        }
        for (i, &s) in wave.iter().enumerate() {
            mixed[offset + i] += s;
        }
    }

    let peak = mixed.iter().fold(0.0_f32, |acc, &s| acc.max(s.abs()));
    if peak > 0.0 {
        let gain = STRUM_PEAK / peak;
        for s in &mut mixed {
            *s *= gain;
        }
    }

    mixed
}

/// Generate a metronome click: a short sine burst with fast decay.
pub fn generate_click(freq: f64, sample_rate: u32) -> Vec<f32> {
    let duration_secs = 0.05;
    let num_samples = (duration_secs * sample_rate as f64) as usize;
    let mut output = Vec::with_capacity(num_samples);

    for i in 0..num_samples {
        let t = i as f64 / sample_rate as f64;
        let envelope = (-30.0 * t).exp();
        let sample = (t * freq * 2.0 * std::f64::consts::PI).sin() * envelope * 0.5;
        output.push(sample as f32);
    }

    output
}
