// Shared tuning constants for the turntable engine.
//
// Durations are milliseconds, spin speeds are radians per 60 Hz frame.

// Frame timing
pub const FRAME_MS_60HZ: f64 = 1000.0 / 60.0;
pub const MAX_FRAME_DELTA_MS: f64 = 100.0; // clamp after a backgrounded tab resumes

// Spin motor
pub const CRUISE_SPEED: f32 = 0.02; // normal playback
pub const PEAK_SPEED: f32 = 0.15; // track swap, hides the label change
pub const SPIN_UP_MS: f64 = 500.0;
pub const SPIN_DOWN_MS: f64 = 1200.0; // motor cutting off, slower than spin-up
pub const SPIN_EPSILON: f32 = 1e-4;

// Track transition phases
pub const EXIT_MS: f64 = 320.0;
pub const ENTER_MS: f64 = 380.0;

// Tape stop and glitch overlays
pub const TAPE_STOP_MS: f64 = 250.0;
pub const TAPE_STOP_FLOOR: f32 = 0.0625;
pub const GLITCH_MS: f64 = 300.0;
pub const GLITCH_ATTACK: f32 = 0.1; // fraction of the burst spent rising

// Tonearm
pub const TONEARM_TRAVEL_MS: f64 = 800.0;
pub const TONEARM_BOUNCE_MS: f64 = 200.0;
pub const TONEARM_BOUNCE_AMPLITUDE: f32 = 0.035; // radians of overshoot on landing
pub const TONEARM_REST: [f32; 3] = [0.0, 0.0, 0.0]; // rot_y, x, z
pub const TONEARM_GROOVE_START: [f32; 3] = [-0.7, -164.0, -65.0];
pub const TONEARM_GROOVE_END: [f32; 3] = [-0.95, -172.0, -40.0];

// Frequency analysis (bins of a 128-bin snapshot)
pub const DEFAULT_BIN_COUNT: usize = 128;
pub const BASS_BINS: (usize, usize) = (0, 8);
pub const HIGH_BINS: (usize, usize) = (20, 60);

// Smoothing constants; highs react faster than bass
pub const SHADER_BASS_K: f32 = 0.12;
pub const SHADER_BASS_DECAY: f32 = 0.92;
pub const SHADER_HIGH_K: f32 = 0.18;
pub const SHADER_HIGH_DECAY: f32 = 0.9;
pub const VINYL_PULSE_K: f32 = 0.08;
pub const VINYL_PULSE_DECAY: f32 = 0.95;
pub const VINYL_PULSE_SCALE: f32 = 0.015;

// Wobble
pub const WOBBLE_MAX_RAD: f32 = 0.004;
pub const WOBBLE_FREQ_HZ: f32 = 0.55;
pub const WOBBLE_DECAY: f32 = 0.9;

// Background crossfade
pub const CROSSFADE_MS: f64 = 300.0;

// Bar visualizer
pub const BAR_COUNT: usize = 16;
pub const BAR_RISE: f32 = 0.6;
pub const BAR_FALL: f32 = 0.08;
pub const BAR_MIN_PX: f32 = 4.0;
pub const BAR_MAX_PX: f32 = 40.0;

// Waveform scrubber
pub const WAVEFORM_PEAKS: usize = 120;
pub const WAVEFORM_FLOOR: f32 = 0.15;
