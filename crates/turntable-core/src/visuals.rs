//! Visual parameter mappers.
//!
//! Each mapper turns smoothed energies, spin state and elapsed time into a
//! plain number the renderer consumes. They are independent of each other
//! and all fall back to a resting value when fed zeros.

use crate::analysis::FrequencySnapshot;
use crate::catalog::VisualStyle;
use crate::constants::*;
use crate::easing::{Animated, Easing};
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Background shader uniforms, laid out for a 16-byte aligned uniform buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ShaderUniforms {
    pub time: f32,
    pub bass: f32,
    pub high: f32,
    pub opacity: f32,
    pub glitch: f32,
    pub noise_scale: f32,
    pub noise_speed: f32,
    pub reactivity: f32,
    pub color_a: [f32; 4],
    pub color_b: [f32; 4],
    pub blended: [f32; 4],
    pub blend: f32,
    pub _pad: [f32; 3],
}

/// Transforms for the turntable scene.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TurntablePose {
    pub vinyl_rotation: f32,
    pub vinyl_wobble: f32,
    pub vinyl_scale: f32,
    pub spin_speed: f32,
    pub tonearm_rot_y: f32,
    pub tonearm_x: f32,
    pub tonearm_z: f32,
    pub _pad: f32,
}

/// Rotational wobble whose amplitude follows spin speed relative to cruise.
#[derive(Clone, Copy, Debug, Default)]
pub struct Wobble {
    amplitude: f32,
}

impl Wobble {
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn update(&mut self, spin_speed: f32, cruise_speed: f32, time_s: f32) -> f32 {
        let ratio = if cruise_speed > 0.0 && spin_speed.is_finite() {
            (spin_speed / cruise_speed).clamp(0.0, 2.0)
        } else {
            0.0
        };
        if spin_speed > SPIN_EPSILON {
            self.amplitude = WOBBLE_MAX_RAD * ratio;
        } else {
            self.amplitude *= WOBBLE_DECAY;
        }
        self.amplitude * (time_s * WOBBLE_FREQ_HZ * std::f32::consts::TAU).sin()
    }
}

#[inline]
pub fn vinyl_scale(pulse: f32) -> f32 {
    1.0 + VINYL_PULSE_SCALE * pulse.clamp(0.0, 1.0)
}

/// Opacity that eases between 0 and 1 whenever playback flips.
#[derive(Clone, Copy, Debug)]
pub struct Crossfade {
    opacity: Animated,
}

impl Default for Crossfade {
    fn default() -> Self {
        Self {
            opacity: Animated::new(0.0),
        }
    }
}

impl Crossfade {
    pub fn set_playing(&mut self, playing: bool, now_ms: f64, duration_ms: f64) {
        let to = if playing { 1.0 } else { 0.0 };
        if self.opacity.target() != to {
            self.opacity
                .animate_to(to, now_ms, duration_ms, Easing::InOutCubic);
        }
    }

    pub fn advance(&mut self, now_ms: f64) -> f32 {
        self.opacity.advance(now_ms)
    }
}

#[inline]
fn hash2(x: i32, y: i32) -> f32 {
    let mut h = (x as u32).wrapping_mul(0x27d4_eb2d) ^ (y as u32).wrapping_mul(0x1656_67b1);
    h ^= h >> 15;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    (h & 0x00ff_ffff) as f32 / 0x00ff_ffff as f32
}

/// Smooth 2D value noise in \[0, 1\].
pub fn value_noise(x: f32, y: f32) -> f32 {
    let (xi, yi) = (x.floor(), y.floor());
    let (fx, fy) = (x - xi, y - yi);
    let (ux, uy) = (fx * fx * (3.0 - 2.0 * fx), fy * fy * (3.0 - 2.0 * fy));
    let (xi, yi) = (xi as i32, yi as i32);
    let a = hash2(xi, yi);
    let b = hash2(xi + 1, yi);
    let c = hash2(xi, yi + 1);
    let d = hash2(xi + 1, yi + 1);
    let top = a + (b - a) * ux;
    let bottom = c + (d - c) * ux;
    top + (bottom - top) * uy
}

/// Blend factor between the two palette colours at the scene centre.
pub fn palette_blend(style: &VisualStyle, time_s: f32, bass: f32, high: f32) -> f32 {
    let drift = time_s * style.noise_speed;
    let n = value_noise(style.noise_scale + drift, style.noise_scale * 0.5 - drift * 0.7);
    let push = (bass * 0.7 + high * 0.3) * style.reactivity;
    (n * 0.6 + push * 0.4).clamp(0.0, 1.0)
}

fn rgba(v: Vec3) -> [f32; 4] {
    [v.x, v.y, v.z, 1.0]
}

pub struct UniformInputs<'a> {
    pub style: &'a VisualStyle,
    pub time_s: f32,
    pub bass: f32,
    pub high: f32,
    pub opacity: f32,
    pub glitch: f32,
}

pub fn shader_uniforms(inputs: &UniformInputs) -> ShaderUniforms {
    let sanitize = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
    let bass = sanitize(inputs.bass);
    let high = sanitize(inputs.high);
    let style = inputs.style;
    let blend = palette_blend(style, inputs.time_s, bass, high);
    // Highs lift brightness a touch on top of the blend
    let blended = style.palette[0].lerp(style.palette[1], blend) * (1.0 + 0.15 * high);
    ShaderUniforms {
        time: inputs.time_s,
        bass,
        high,
        opacity: sanitize(inputs.opacity),
        glitch: sanitize(inputs.glitch),
        noise_scale: style.noise_scale,
        noise_speed: style.noise_speed,
        reactivity: style.reactivity,
        color_a: rgba(style.palette[0]),
        color_b: rgba(style.palette[1]),
        blended: rgba(blended.min(Vec3::ONE)),
        blend,
        _pad: [0.0; 3],
    }
}

/// One target per bar, sampled at even steps through the snapshot.
pub fn bar_targets(snapshot: &FrequencySnapshot, bars: usize) -> impl Iterator<Item = f32> + '_ {
    let bins = snapshot.bins();
    let step = if bars == 0 { 0 } else { (bins.len() / bars).max(1) };
    (0..bars).map(move |i| {
        bins.get(i * step)
            .map(|&b| b as f32 / 255.0)
            .unwrap_or(0.0)
    })
}

#[inline]
pub fn bar_height_px(level: f32) -> f32 {
    let level = if level.is_finite() { level } else { 0.0 };
    (level.clamp(0.0, 1.0) * BAR_MAX_PX).max(BAR_MIN_PX)
}
