//! Frequency analysis adapter.
//!
//! Wraps a byte-magnitude frequency source (an `AnalyserNode` in the
//! browser) and reduces each poll to normalized band energies. Until a
//! source is attached, or while playback is inactive, `poll` hands out a
//! zeroed snapshot so callers simply decay toward rest.

use crate::constants::{BASS_BINS, DEFAULT_BIN_COUNT, HIGH_BINS};

/// Anything that can fill a buffer with 0..=255 magnitudes per frequency bin.
pub trait FrequencySource {
    fn bin_count(&self) -> usize;
    fn fill(&mut self, out: &mut [u8]);
}

/// Most recent per-bin magnitudes. Overwritten on every poll.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencySnapshot {
    bins: Vec<u8>,
}

impl FrequencySnapshot {
    pub fn neutral(len: usize) -> Self {
        Self { bins: vec![0; len] }
    }

    pub fn from_bins(bins: Vec<u8>) -> Self {
        Self { bins }
    }

    pub fn bins(&self) -> &[u8] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn is_silent(&self) -> bool {
        self.bins.iter().all(|&b| b == 0)
    }

    fn clear(&mut self) {
        self.bins.iter_mut().for_each(|b| *b = 0);
    }
}

/// Named band energies for one snapshot, each in \[0, 1\].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandEnergy {
    pub bass: f32,
    pub high: f32,
}

impl BandEnergy {
    pub fn from_snapshot(snapshot: &FrequencySnapshot) -> Self {
        Self {
            bass: compute_bass(snapshot),
            high: compute_high(snapshot),
        }
    }
}

pub struct AnalysisAdapter {
    source: Option<Box<dyn FrequencySource>>,
    snapshot: FrequencySnapshot,
}

impl Default for AnalysisAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisAdapter {
    pub fn new() -> Self {
        Self {
            source: None,
            snapshot: FrequencySnapshot::neutral(DEFAULT_BIN_COUNT),
        }
    }

    /// Attach the live source once audio has been unlocked by a user gesture.
    pub fn attach(&mut self, source: Box<dyn FrequencySource>) {
        let bins = source.bin_count();
        log::info!("[analysis] source attached bins={}", bins);
        self.snapshot = FrequencySnapshot::neutral(bins);
        self.source = Some(source);
    }

    pub fn is_attached(&self) -> bool {
        self.source.is_some()
    }

    /// Refresh and return the snapshot. Never blocks and never fails.
    pub fn poll(&mut self, active: bool) -> &FrequencySnapshot {
        match (&mut self.source, active) {
            (Some(source), true) => {
                let bins = source.bin_count();
                if self.snapshot.bins.len() != bins {
                    self.snapshot.bins.resize(bins, 0);
                }
                source.fill(&mut self.snapshot.bins);
            }
            _ => self.snapshot.clear(),
        }
        &self.snapshot
    }
}

/// Bin range scaled from the 128-bin reference layout to `len` bins.
fn scaled_range(len: usize, (start, end): (usize, usize)) -> (usize, usize) {
    if len == DEFAULT_BIN_COUNT {
        return (start, end);
    }
    let s = start * len / DEFAULT_BIN_COUNT;
    let e = (end * len / DEFAULT_BIN_COUNT).max(s + 1);
    (s.min(len), e.min(len))
}

fn band_average(bins: &[u8], range: (usize, usize)) -> f32 {
    let (start, end) = scaled_range(bins.len(), range);
    if start >= end {
        return 0.0;
    }
    let slice = &bins[start..end];
    let sum: u32 = slice.iter().map(|&b| b as u32).sum();
    (sum as f32 / slice.len() as f32 / 255.0).clamp(0.0, 1.0)
}

/// Average of the low bins normalized to \[0, 1\].
pub fn compute_bass(snapshot: &FrequencySnapshot) -> f32 {
    band_average(snapshot.bins(), BASS_BINS)
}

/// Average of the mid/high bins normalized to \[0, 1\].
pub fn compute_high(snapshot: &FrequencySnapshot) -> f32 {
    band_average(snapshot.bins(), HIGH_BINS)
}
