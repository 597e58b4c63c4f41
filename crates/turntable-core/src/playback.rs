//! Playback state, spin motor and tonearm.

use crate::config::PlayerConfig;
use crate::constants::*;
use crate::easing::{damped_bounce, lerp, progress, Animated, Easing};
use bytemuck::{Pod, Zeroable};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Transitioning,
}

/// Angular velocity of the platter in radians per 60 Hz frame.
#[derive(Clone, Copy, Debug)]
pub struct SpinMotor {
    speed: Animated,
    rotation: f32,
}

impl Default for SpinMotor {
    fn default() -> Self {
        Self {
            speed: Animated::new(0.0),
            rotation: 0.0,
        }
    }
}

impl SpinMotor {
    pub fn speed(&self) -> f32 {
        self.speed.value()
    }

    pub fn target(&self) -> f32 {
        self.speed.target()
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn spin_up(&mut self, cfg: &PlayerConfig, now_ms: f64) {
        self.speed
            .animate_to(cfg.cruise_speed, now_ms, cfg.spin_up_ms, Easing::OutCubic);
    }

    pub fn spin_down(&mut self, cfg: &PlayerConfig, now_ms: f64) {
        self.speed
            .animate_to(0.0, now_ms, cfg.spin_down_ms, Easing::OutCubic);
    }

    pub fn rev_to_peak(&mut self, cfg: &PlayerConfig, now_ms: f64) {
        self.speed
            .animate_to(cfg.peak_speed, now_ms, cfg.exit_ms, Easing::OutQuad);
    }

    pub fn settle(&mut self, resting: f32, cfg: &PlayerConfig, now_ms: f64) {
        self.speed
            .animate_to(resting, now_ms, cfg.enter_ms, Easing::OutCubic);
    }

    /// Advance the speed curve and integrate rotation over `dt_ms`.
    pub fn advance(&mut self, now_ms: f64, dt_ms: f64) -> f32 {
        let speed = self.speed.advance(now_ms);
        let frames = (dt_ms / FRAME_MS_60HZ) as f32;
        self.rotation = (self.rotation + speed * frames) % std::f32::consts::TAU;
        speed
    }
}

/// Tonearm rotation and base-plane position.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TonearmPose {
    pub rot_y: f32,
    pub x: f32,
    pub z: f32,
}

impl TonearmPose {
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self {
            rot_y: a[0],
            x: a[1],
            z: a[2],
        }
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            rot_y: lerp(self.rot_y, other.rot_y, t),
            x: lerp(self.x, other.x, t),
            z: lerp(self.z, other.z, t),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum ArmMotion {
    Resting,
    /// Eased travel between two poses, optionally followed by a landing bounce.
    HandOff {
        from: TonearmPose,
        to: TonearmPose,
        start_ms: f64,
        bounce: bool,
    },
    Tracking,
}

#[derive(Clone, Copy, Debug)]
pub struct Tonearm {
    pose: TonearmPose,
    motion: ArmMotion,
    rest: TonearmPose,
    groove_start: TonearmPose,
    groove_end: TonearmPose,
}

impl Default for Tonearm {
    fn default() -> Self {
        Self {
            pose: TonearmPose::from_array(TONEARM_REST),
            motion: ArmMotion::Resting,
            rest: TonearmPose::from_array(TONEARM_REST),
            groove_start: TonearmPose::from_array(TONEARM_GROOVE_START),
            groove_end: TonearmPose::from_array(TONEARM_GROOVE_END),
        }
    }
}

impl Tonearm {
    /// Swing onto the record at the given progress, landing with a bounce.
    /// An in-flight hand-off is retargeted from the current pose.
    pub fn engage(&mut self, progress_fraction: f32, now_ms: f64) {
        let to = self.groove_start.lerp(self.groove_end, progress_fraction);
        self.motion = ArmMotion::HandOff {
            from: self.pose,
            to,
            start_ms: now_ms,
            bounce: true,
        };
    }

    pub fn disengage(&mut self, now_ms: f64) {
        self.motion = ArmMotion::HandOff {
            from: self.pose,
            to: self.rest,
            start_ms: now_ms,
            bounce: false,
        };
    }

    /// Update the pose. While tracking, `groove_progress` of `None` holds
    /// the arm where it is.
    pub fn advance(
        &mut self,
        cfg: &PlayerConfig,
        groove_progress: Option<f32>,
        now_ms: f64,
    ) -> TonearmPose {
        match self.motion {
            ArmMotion::Resting => {}
            ArmMotion::Tracking => {
                if let Some(p) = groove_progress {
                    self.pose = self.groove_start.lerp(self.groove_end, p.clamp(0.0, 1.0));
                }
            }
            ArmMotion::HandOff {
                from,
                to,
                start_ms,
                bounce,
            } => {
                let travel = progress(start_ms, cfg.tonearm_travel_ms, now_ms);
                self.pose = from.lerp(to, Easing::OutCubic.apply(travel));
                if travel >= 1.0 {
                    if !bounce {
                        self.motion = ArmMotion::Resting;
                    } else {
                        let landed_ms = start_ms + cfg.tonearm_travel_ms;
                        let t = progress(landed_ms, cfg.tonearm_bounce_ms, now_ms);
                        self.pose.rot_y += TONEARM_BOUNCE_AMPLITUDE * damped_bounce(t);
                        if t >= 1.0 {
                            self.pose = to;
                            self.motion = ArmMotion::Tracking;
                        }
                    }
                }
            }
        }
        self.pose
    }
}
