//! Exponential smoothing of band energies.
//!
//! Every visual consumer owns its own [`SmoothedSignal`] with its own `k`
//! and decay; nothing here is shared between consumers.

use smallvec::SmallVec;

/// `current + (target - current) * k`, with non-finite input treated as no-op.
#[inline]
pub fn step(current: f32, target: f32, k: f32) -> f32 {
    let current = if current.is_finite() { current } else { 0.0 };
    if !target.is_finite() || !k.is_finite() {
        return current;
    }
    current + (target - current) * k.clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug)]
pub struct SmoothedSignal {
    value: f32,
    k: f32,
    decay: f32,
}

impl SmoothedSignal {
    pub fn new(k: f32, decay: f32) -> Self {
        Self {
            value: 0.0,
            k,
            decay,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Pull toward a fresh band energy.
    pub fn follow(&mut self, target: f32) -> f32 {
        self.value = step(self.value, target, self.k);
        self.value
    }

    /// Multiplicative relax toward zero while the source is silent.
    pub fn relax(&mut self) -> f32 {
        self.value *= self.decay;
        if self.value < 1e-5 {
            self.value = 0.0;
        }
        self.value
    }
}

/// Per-bar levels with a fast attack and slow release so bars read as
/// percussive.
#[derive(Clone, Debug)]
pub struct BarSmoother {
    levels: SmallVec<[f32; 32]>,
    rise: f32,
    fall: f32,
}

impl BarSmoother {
    pub fn new(count: usize, rise: f32, fall: f32) -> Self {
        Self {
            levels: SmallVec::from_elem(0.0, count),
            rise,
            fall,
        }
    }

    pub fn levels(&self) -> &[f32] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Advance every bar toward its target; missing targets count as zero.
    pub fn update<I: IntoIterator<Item = f32>>(&mut self, targets: I) {
        let mut targets = targets.into_iter();
        for level in self.levels.iter_mut() {
            let target = targets.next().unwrap_or(0.0).clamp(0.0, 1.0);
            let k = if target > *level { self.rise } else { self.fall };
            *level = step(*level, target, k);
        }
    }
}
