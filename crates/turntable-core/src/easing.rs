//! Easing curves and a clock-driven tween.
//!
//! All animation in the engine goes through [`Tween`], sampled with an
//! explicit `now_ms` so nothing depends on wall-clock timers.

use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    OutQuad,
    OutCubic,
    InOutCubic,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::OutQuad => ease_out_quad(t),
            Easing::OutCubic => ease_out_cubic(t),
            Easing::InOutCubic => ease_in_out_cubic(t),
        }
    }
}

#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Damped landing spring: `sin(t·3π)·e^(−4t)` for `t` in \[0, 1\].
#[inline]
pub fn damped_bounce(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    (t * 3.0 * PI).sin() * (-4.0 * t).exp()
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Fraction of `duration_ms` elapsed since `start_ms`, clamped to \[0, 1\].
#[inline]
pub fn progress(start_ms: f64, duration_ms: f64, now_ms: f64) -> f32 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    ((now_ms - start_ms) / duration_ms).clamp(0.0, 1.0) as f32
}

#[derive(Clone, Copy, Debug)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, start_ms: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            easing,
        }
    }

    pub fn sample(&self, now_ms: f64) -> f32 {
        let t = progress(self.start_ms, self.duration_ms, now_ms);
        lerp(self.from, self.to, self.easing.apply(t))
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms >= self.duration_ms
    }
}

/// A scalar that either sits still or follows a tween to a new value.
///
/// Retargeting mid-flight starts the new tween from the current sample, so
/// there is never a jump.
#[derive(Clone, Copy, Debug)]
pub struct Animated {
    value: f32,
    tween: Option<Tween>,
}

impl Animated {
    pub fn new(value: f32) -> Self {
        Self { value, tween: None }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.tween.map(|t| t.to).unwrap_or(self.value)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn animate_to(&mut self, to: f32, now_ms: f64, duration_ms: f64, easing: Easing) {
        self.advance(now_ms);
        self.tween = Some(Tween::new(self.value, to, now_ms, duration_ms, easing));
    }

    pub fn advance(&mut self, now_ms: f64) -> f32 {
        if let Some(tw) = self.tween {
            self.value = tw.sample(now_ms);
            if tw.is_finished(now_ms) {
                self.value = tw.to;
                self.tween = None;
            }
        }
        self.value
    }
}
