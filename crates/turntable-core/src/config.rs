//! Page-overridable tuning for the player.
//!
//! Every field falls back to the matching constant, so a catalog file may
//! carry a partial `config` block or none at all.

use crate::constants::*;
use crate::error::ConfigError;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub cruise_speed: f32,
    pub peak_speed: f32,
    pub spin_up_ms: f64,
    pub spin_down_ms: f64,
    pub exit_ms: f64,
    pub enter_ms: f64,
    pub tape_stop: bool,
    pub tape_stop_ms: f64,
    pub tape_stop_floor: f32,
    pub glitch_ms: f64,
    pub tonearm_travel_ms: f64,
    pub tonearm_bounce_ms: f64,
    pub crossfade_ms: f64,
    pub bar_count: usize,
    pub smoothing: SmoothingConfig,
}

/// Per-consumer smoothing constants. Each visual keeps its own pair.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SmoothingConfig {
    pub shader_bass_k: f32,
    pub shader_bass_decay: f32,
    pub shader_high_k: f32,
    pub shader_high_decay: f32,
    pub vinyl_pulse_k: f32,
    pub vinyl_pulse_decay: f32,
    pub bar_rise: f32,
    pub bar_fall: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            cruise_speed: CRUISE_SPEED,
            peak_speed: PEAK_SPEED,
            spin_up_ms: SPIN_UP_MS,
            spin_down_ms: SPIN_DOWN_MS,
            exit_ms: EXIT_MS,
            enter_ms: ENTER_MS,
            tape_stop: true,
            tape_stop_ms: TAPE_STOP_MS,
            tape_stop_floor: TAPE_STOP_FLOOR,
            glitch_ms: GLITCH_MS,
            tonearm_travel_ms: TONEARM_TRAVEL_MS,
            tonearm_bounce_ms: TONEARM_BOUNCE_MS,
            crossfade_ms: CROSSFADE_MS,
            bar_count: BAR_COUNT,
            smoothing: SmoothingConfig::default(),
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            shader_bass_k: SHADER_BASS_K,
            shader_bass_decay: SHADER_BASS_DECAY,
            shader_high_k: SHADER_HIGH_K,
            shader_high_decay: SHADER_HIGH_DECAY,
            vinyl_pulse_k: VINYL_PULSE_K,
            vinyl_pulse_decay: VINYL_PULSE_DECAY,
            bar_rise: BAR_RISE,
            bar_fall: BAR_FALL,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("spin_up_ms", self.spin_up_ms),
            ("spin_down_ms", self.spin_down_ms),
            ("exit_ms", self.exit_ms),
            ("enter_ms", self.enter_ms),
            ("tape_stop_ms", self.tape_stop_ms),
            ("glitch_ms", self.glitch_ms),
            ("tonearm_travel_ms", self.tonearm_travel_ms),
            ("tonearm_bounce_ms", self.tonearm_bounce_ms),
            ("crossfade_ms", self.crossfade_ms),
        ];
        for (name, value) in durations {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveDuration { name, value });
            }
        }
        if self.spin_down_ms < self.spin_up_ms {
            return Err(ConfigError::SpinDownTooFast {
                up_ms: self.spin_up_ms,
                down_ms: self.spin_down_ms,
            });
        }
        if !(self.cruise_speed > 0.0 && self.peak_speed > self.cruise_speed) {
            return Err(ConfigError::SpeedOrdering {
                cruise: self.cruise_speed,
                peak: self.peak_speed,
            });
        }
        if !(self.tape_stop_floor > 0.0 && self.tape_stop_floor <= 1.0) {
            return Err(ConfigError::OutOfUnitRange {
                name: "tape_stop_floor",
                value: self.tape_stop_floor,
            });
        }
        self.smoothing.validate()
    }
}

impl SmoothingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let coefficients = [
            ("shader_bass_k", self.shader_bass_k),
            ("shader_bass_decay", self.shader_bass_decay),
            ("shader_high_k", self.shader_high_k),
            ("shader_high_decay", self.shader_high_decay),
            ("vinyl_pulse_k", self.vinyl_pulse_k),
            ("vinyl_pulse_decay", self.vinyl_pulse_decay),
            ("bar_rise", self.bar_rise),
            ("bar_fall", self.bar_fall),
        ];
        for (name, value) in coefficients {
            if !(value > 0.0 && value < 1.0) {
                return Err(ConfigError::OutOfUnitRange { name, value });
            }
        }
        Ok(())
    }
}
