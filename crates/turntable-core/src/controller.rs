//! The player controller: one owner for every piece of mutable player state.
//!
//! Transport entry points (`toggle_play`, `next_track`, `prev_track`,
//! `select_track`, `seek`) and the per-frame `tick` are methods here. Time
//! is always passed in as `now_ms`, so the whole controller runs without
//! real timers.

use crate::analysis::{AnalysisAdapter, BandEnergy};
use crate::catalog::{Catalog, TrackDescriptor};
use crate::config::PlayerConfig;
use crate::constants::{MAX_FRAME_DELTA_MS, WAVEFORM_PEAKS};
use crate::media::{MediaElement, SeekState};
use crate::playback::{PlaybackState, SpinMotor, Tonearm};
use crate::smoothing::{BarSmoother, SmoothedSignal};
use crate::transition::{
    Direction, GlitchBurst, TapeStop, Transition, TransitionPhase, TransitionStep,
};
use crate::visuals::{
    shader_uniforms, vinyl_scale, Crossfade, ShaderUniforms, TurntablePose, UniformInputs,
    Wobble,
};
use crate::waveform::generate_peaks;
use smallvec::SmallVec;

/// Notifications for the DOM layer, drained once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    TitleExit(Direction),
    TrackLoaded(usize),
    TitleEnter(Direction),
    PlayingChanged(bool),
    ControlsLocked(bool),
    SelectionClosed,
}

/// Everything the renderer and DOM need for one frame.
#[derive(Clone, Debug)]
pub struct FrameParams {
    pub pose: TurntablePose,
    pub uniforms: ShaderUniforms,
    /// Smoothed bar levels in \[0, 1\].
    pub bars: SmallVec<[f32; 32]>,
    pub progress: f32,
    pub state: PlaybackState,
}

pub struct PlayerController<M: MediaElement> {
    cfg: PlayerConfig,
    catalog: Catalog,
    current: usize,
    state: PlaybackState,
    media: M,
    analysis: AnalysisAdapter,
    seek: SeekState,

    spin: SpinMotor,
    tonearm: Tonearm,
    wobble: Wobble,
    crossfade: Crossfade,

    shader_bass: SmoothedSignal,
    shader_high: SmoothedSignal,
    vinyl_pulse: SmoothedSignal,
    bars: BarSmoother,

    transition: Option<Transition>,
    tape_stop: Option<TapeStop>,
    glitch: Option<GlitchBurst>,
    deferred_toggle: bool,

    waveform: Vec<f32>,
    swap_count: u64,
    events: Vec<UiEvent>,
    epoch_ms: Option<f64>,
    last_tick_ms: Option<f64>,
}

impl<M: MediaElement> PlayerController<M> {
    pub fn new(catalog: Catalog, cfg: PlayerConfig, mut media: M) -> Self {
        let first = &catalog.tracks()[0];
        media.set_source(&first.src);
        let waveform = generate_peaks(first.waveform_seed(), WAVEFORM_PEAKS);
        let s = &cfg.smoothing;
        let shader_bass = SmoothedSignal::new(s.shader_bass_k, s.shader_bass_decay);
        let shader_high = SmoothedSignal::new(s.shader_high_k, s.shader_high_decay);
        let vinyl_pulse = SmoothedSignal::new(s.vinyl_pulse_k, s.vinyl_pulse_decay);
        let bars = BarSmoother::new(cfg.bar_count, s.bar_rise, s.bar_fall);
        Self {
            catalog,
            current: 0,
            state: PlaybackState::Stopped,
            media,
            analysis: AnalysisAdapter::new(),
            seek: SeekState::default(),
            spin: SpinMotor::default(),
            tonearm: Tonearm::default(),
            wobble: Wobble::default(),
            crossfade: Crossfade::default(),
            shader_bass,
            shader_high,
            vinyl_pulse,
            bars,
            transition: None,
            tape_stop: None,
            glitch: None,
            deferred_toggle: false,
            waveform,
            swap_count: 0,
            events: vec![UiEvent::TrackLoaded(0)],
            epoch_ms: None,
            last_tick_ms: None,
            cfg,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_track(&self) -> &TrackDescriptor {
        &self.catalog.tracks()[self.current]
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.cfg
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn analysis_mut(&mut self) -> &mut AnalysisAdapter {
        &mut self.analysis
    }

    pub fn spin_speed(&self) -> f32 {
        self.spin.speed()
    }

    pub fn spin_target(&self) -> f32 {
        self.spin.target()
    }

    pub fn transition_phase(&self) -> Option<TransitionPhase> {
        self.transition.map(|t| t.phase())
    }

    pub fn waveform(&self) -> &[f32] {
        &self.waveform
    }

    /// Number of track swaps performed so far.
    pub fn swap_count(&self) -> u64 {
        self.swap_count
    }

    pub fn is_dragging(&self) -> bool {
        self.seek.is_dragging()
    }

    pub fn drain_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    // ---------------- Transport ----------------

    pub fn toggle_play(&mut self, now_ms: f64) {
        match self.state {
            PlaybackState::Transitioning => {
                self.deferred_toggle = !self.deferred_toggle;
                log::info!(
                    "[player] toggle during transition deferred (pending={})",
                    self.deferred_toggle
                );
            }
            PlaybackState::Stopped => self.start_playing(now_ms),
            PlaybackState::Playing => self.stop_playing(now_ms),
        }
    }

    fn start_playing(&mut self, now_ms: f64) {
        log::info!("[player] play track={}", self.current);
        self.state = PlaybackState::Playing;
        self.spin.spin_up(&self.cfg, now_ms);
        let progress = if self.media.has_ended() {
            0.0
        } else {
            self.seek.displayed_progress(&self.media)
        };
        self.media.play();
        self.tonearm.engage(progress, now_ms);
        self.crossfade
            .set_playing(true, now_ms, self.cfg.crossfade_ms);
        self.events.push(UiEvent::PlayingChanged(true));
    }

    fn stop_playing(&mut self, now_ms: f64) {
        log::info!("[player] pause track={}", self.current);
        self.media.pause();
        self.state = PlaybackState::Stopped;
        self.spin.spin_down(&self.cfg, now_ms);
        self.tonearm.disengage(now_ms);
        self.crossfade
            .set_playing(false, now_ms, self.cfg.crossfade_ms);
        self.events.push(UiEvent::PlayingChanged(false));
    }

    /// Returns `false` when the request was dropped because a transition is
    /// already running.
    pub fn next_track(&mut self, now_ms: f64) -> bool {
        let target = self.catalog.next_index(self.current);
        self.begin_transition(target, Direction::Next, now_ms)
    }

    pub fn prev_track(&mut self, now_ms: f64) -> bool {
        let target = self.catalog.prev_index(self.current);
        self.begin_transition(target, Direction::Prev, now_ms)
    }

    pub fn select_track(&mut self, index: usize, now_ms: f64) -> bool {
        self.events.push(UiEvent::SelectionClosed);
        if index >= self.catalog.len() {
            log::warn!(
                "[player] select_track({}) out of range (len={})",
                index,
                self.catalog.len()
            );
            return false;
        }
        if index == self.current {
            return false;
        }
        self.begin_transition(index, Direction::Select, now_ms)
    }

    fn begin_transition(&mut self, target: usize, direction: Direction, now_ms: f64) -> bool {
        if self.state == PlaybackState::Transitioning {
            log::debug!("[transition] request for {} dropped, already running", target);
            return false;
        }
        let was_playing = self.state == PlaybackState::Playing;
        log::debug!(
            "[transition] exit {} -> {} ({:?}, was_playing={})",
            self.current,
            target,
            direction,
            was_playing
        );
        self.transition = Some(Transition::begin(
            target,
            direction,
            was_playing,
            &self.cfg,
            now_ms,
        ));
        self.state = PlaybackState::Transitioning;
        self.deferred_toggle = false;
        self.spin.rev_to_peak(&self.cfg, now_ms);
        if was_playing && self.cfg.tape_stop {
            self.tape_stop = Some(TapeStop::new(&self.cfg, now_ms));
            self.glitch = Some(GlitchBurst::new(&self.cfg, now_ms));
        }
        self.events.push(UiEvent::ControlsLocked(true));
        self.events.push(UiEvent::TitleExit(direction));
        true
    }

    fn swap_track(&mut self, tr: &Transition, now_ms: f64) {
        self.current = tr.target_index;
        let track = &self.catalog.tracks()[self.current];
        log::debug!("[transition] swap -> {} ({})", self.current, track.id);
        self.tape_stop = None;
        self.media.set_source(&track.src);
        self.media.set_playback_rate(1.0);
        self.seek.clear_pending();
        self.waveform = generate_peaks(track.waveform_seed(), WAVEFORM_PEAKS);
        self.swap_count += 1;
        if tr.was_playing {
            self.media.play();
            self.tonearm.engage(0.0, now_ms);
        }
        let resting = if tr.was_playing {
            self.cfg.cruise_speed
        } else {
            0.0
        };
        self.spin.settle(resting, &self.cfg, now_ms);
        self.events.push(UiEvent::TrackLoaded(self.current));
        self.events.push(UiEvent::TitleEnter(tr.direction));
    }

    fn finish_transition(&mut self, tr: &Transition, now_ms: f64) {
        self.transition = None;
        self.state = if tr.was_playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Stopped
        };
        log::debug!("[transition] complete state={:?}", self.state);
        self.events.push(UiEvent::ControlsLocked(false));
        if std::mem::take(&mut self.deferred_toggle) {
            self.toggle_play(now_ms);
        }
    }

    // ---------------- Media feed ----------------

    pub fn seek(&mut self, fraction: f32) {
        self.seek.seek(&mut self.media, fraction);
    }

    pub fn begin_drag(&mut self, fraction: f32) {
        self.seek.begin_drag(fraction);
    }

    pub fn update_drag(&mut self, fraction: f32) {
        self.seek.update_drag(fraction);
    }

    pub fn end_drag(&mut self, fraction: f32) {
        if let Some(f) = self.seek.end_drag(fraction) {
            self.seek.seek(&mut self.media, f);
        }
    }

    pub fn on_metadata_loaded(&mut self) {
        self.seek.on_metadata(&mut self.media);
    }

    pub fn on_ended(&mut self, now_ms: f64) {
        if self.state == PlaybackState::Playing {
            log::info!("[player] track {} ended", self.current);
            self.stop_playing(now_ms);
        }
    }

    // ---------------- Frame ----------------

    pub fn tick(&mut self, now_ms: f64) -> FrameParams {
        let epoch = *self.epoch_ms.get_or_insert(now_ms);
        let dt_ms = self
            .last_tick_ms
            .map(|last| (now_ms - last).clamp(0.0, MAX_FRAME_DELTA_MS))
            .unwrap_or(0.0);
        self.last_tick_ms = Some(now_ms);
        let time_s = ((now_ms - epoch) / 1000.0) as f32;

        self.advance_transition(now_ms);

        let active = self.state != PlaybackState::Stopped && !self.media.is_paused();
        let snapshot = self.analysis.poll(active);
        if active {
            let energy = BandEnergy::from_snapshot(snapshot);
            self.shader_bass.follow(energy.bass);
            self.shader_high.follow(energy.high);
            self.vinyl_pulse.follow(energy.bass);
        } else {
            self.shader_bass.relax();
            self.shader_high.relax();
            self.vinyl_pulse.relax();
        }
        let bar_count = self.bars.len();
        self.bars
            .update(crate::visuals::bar_targets(snapshot, bar_count));

        let speed = self.spin.advance(now_ms, dt_ms);
        let progress = self.seek.displayed_progress(&self.media);
        let groove = (self.state == PlaybackState::Playing).then_some(progress);
        let arm = self.tonearm.advance(&self.cfg, groove, now_ms);
        let wobble = self.wobble.update(speed, self.cfg.cruise_speed, time_s);
        let opacity = self.crossfade.advance(now_ms);

        let glitch = match self.glitch {
            Some(g) if g.is_finished(now_ms) => {
                self.glitch = None;
                0.0
            }
            Some(g) => g.intensity(now_ms),
            None => 0.0,
        };

        let uniforms = shader_uniforms(&UniformInputs {
            style: &self.catalog.tracks()[self.current].style,
            time_s,
            bass: self.shader_bass.value(),
            high: self.shader_high.value(),
            opacity,
            glitch,
        });

        FrameParams {
            pose: TurntablePose {
                vinyl_rotation: self.spin.rotation(),
                vinyl_wobble: wobble,
                vinyl_scale: vinyl_scale(self.vinyl_pulse.value()),
                spin_speed: speed,
                tonearm_rot_y: arm.rot_y,
                tonearm_x: arm.x,
                tonearm_z: arm.z,
                _pad: 0.0,
            },
            uniforms,
            bars: SmallVec::from_slice(self.bars.levels()),
            progress,
            state: self.state,
        }
    }

    fn advance_transition(&mut self, now_ms: f64) {
        let Some(mut tr) = self.transition else {
            return;
        };
        if let Some(tape) = self.tape_stop {
            self.media.set_playback_rate(tape.rate(now_ms) as f64);
        }
        let steps = tr.advance(now_ms);
        self.transition = Some(tr);
        for step in steps {
            match step {
                TransitionStep::Swap => self.swap_track(&tr, now_ms),
                TransitionStep::Complete => self.finish_transition(&tr, now_ms),
            }
        }
    }
}
