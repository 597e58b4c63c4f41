//! Exit → Swap → Enter sequencing for track changes.
//!
//! A [`Transition`] is a plain state machine advanced by elapsed time. It
//! reports the phase boundaries it crosses; the controller applies the side
//! effects (media swap, spin targets, UI events).

use crate::config::PlayerConfig;
use crate::easing::progress;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    Exit,
    Swap,
    Enter,
}

/// Which control started the change; the UI slides titles accordingly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
    Select,
}

/// A phase boundary crossed during [`Transition::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionStep {
    /// Exit finished; swap the track now.
    Swap,
    /// Enter finished; the transition is over.
    Complete,
}

#[derive(Clone, Copy, Debug)]
pub struct Transition {
    pub target_index: usize,
    pub direction: Direction,
    /// Captured once at start and honored through every phase.
    pub was_playing: bool,
    phase: TransitionPhase,
    started_ms: f64,
    exit_ms: f64,
    enter_ms: f64,
}

impl Transition {
    pub fn begin(
        target_index: usize,
        direction: Direction,
        was_playing: bool,
        cfg: &PlayerConfig,
        now_ms: f64,
    ) -> Self {
        Self {
            target_index,
            direction,
            was_playing,
            phase: TransitionPhase::Exit,
            started_ms: now_ms,
            exit_ms: cfg.exit_ms,
            enter_ms: cfg.enter_ms,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn started_ms(&self) -> f64 {
        self.started_ms
    }

    pub fn swap_at_ms(&self) -> f64 {
        self.started_ms + self.exit_ms
    }

    pub fn complete_at_ms(&self) -> f64 {
        self.swap_at_ms() + self.enter_ms
    }

    /// Eased-curve input for the current phase, in \[0, 1\].
    pub fn phase_progress(&self, now_ms: f64) -> f32 {
        match self.phase {
            TransitionPhase::Exit => progress(self.started_ms, self.exit_ms, now_ms),
            TransitionPhase::Swap => 1.0,
            TransitionPhase::Enter => progress(self.swap_at_ms(), self.enter_ms, now_ms),
        }
    }

    /// Move through every boundary `now_ms` has passed, in order. A single
    /// late tick can yield both `Swap` and `Complete`.
    pub fn advance(&mut self, now_ms: f64) -> Vec<TransitionStep> {
        let mut steps = Vec::new();
        loop {
            match self.phase {
                TransitionPhase::Exit if now_ms >= self.swap_at_ms() => {
                    self.phase = TransitionPhase::Swap;
                }
                TransitionPhase::Swap => {
                    steps.push(TransitionStep::Swap);
                    self.phase = TransitionPhase::Enter;
                }
                TransitionPhase::Enter if now_ms >= self.complete_at_ms() => {
                    steps.push(TransitionStep::Complete);
                    return steps;
                }
                _ => return steps,
            }
        }
    }
}

/// Exponential playback-rate ramp toward a floor, the audible pitch drop of
/// a motor stopping.
#[derive(Clone, Copy, Debug)]
pub struct TapeStop {
    start_ms: f64,
    duration_ms: f64,
    floor: f32,
}

impl TapeStop {
    pub fn new(cfg: &PlayerConfig, now_ms: f64) -> Self {
        Self {
            start_ms: now_ms,
            duration_ms: cfg.tape_stop_ms,
            floor: cfg.tape_stop_floor,
        }
    }

    /// `floor^t`: 1.0 at the start, `floor` once the ramp has run.
    pub fn rate(&self, now_ms: f64) -> f32 {
        let t = progress(self.start_ms, self.duration_ms, now_ms);
        self.floor.powf(t)
    }
}

/// Shader glitch intensity: a short linear spike then a quadratic decay.
#[derive(Clone, Copy, Debug)]
pub struct GlitchBurst {
    start_ms: f64,
    duration_ms: f64,
}

impl GlitchBurst {
    pub fn new(cfg: &PlayerConfig, now_ms: f64) -> Self {
        Self {
            start_ms: now_ms,
            duration_ms: cfg.glitch_ms,
        }
    }

    pub fn intensity(&self, now_ms: f64) -> f32 {
        use crate::constants::GLITCH_ATTACK;
        let t = progress(self.start_ms, self.duration_ms, now_ms);
        if t < GLITCH_ATTACK {
            t / GLITCH_ATTACK
        } else {
            let d = (t - GLITCH_ATTACK) / (1.0 - GLITCH_ATTACK);
            (1.0 - d) * (1.0 - d)
        }
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms >= self.duration_ms
    }
}
