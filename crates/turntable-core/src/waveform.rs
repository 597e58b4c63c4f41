//! Decorative scrubber waveform, regenerated per track.

use crate::constants::WAVEFORM_FLOOR;
use rand::prelude::*;

/// Deterministic pseudo-waveform peaks in \[`WAVEFORM_FLOOR`, 1\].
pub fn generate_peaks(seed: u64, count: usize) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    // Slow envelope so the shape reads like verses and choruses
    let phase: f32 = rng.gen::<f32>() * std::f32::consts::TAU;
    let raw: Vec<f32> = (0..count)
        .map(|i| {
            let t = i as f32 / count.max(1) as f32;
            let envelope = 0.55 + 0.45 * (t * 5.0 * std::f32::consts::PI + phase).sin().abs();
            envelope * (0.35 + 0.65 * rng.gen::<f32>())
        })
        .collect();
    (0..count)
        .map(|i| {
            let prev = raw[i.saturating_sub(1)];
            let next = raw[(i + 1).min(count - 1)];
            let smoothed = (prev + 2.0 * raw[i] + next) / 4.0;
            smoothed.clamp(WAVEFORM_FLOOR, 1.0)
        })
        .collect()
}
