// Host-side tests for the player controller: transport, transitions,
// seeking and the per-frame reactive pipeline. Time is driven by hand.

use turntable_core::{
    time_labels, Catalog, FrequencySource, MediaElement, PlaybackState, PlayerConfig,
    PlayerController, TransitionPhase, UiEvent,
};

const FRAME: f64 = 16.0;

struct MockMedia {
    paused: bool,
    ended: bool,
    time: f64,
    duration: f64,
    rate: f64,
    sources: Vec<String>,
    play_calls: usize,
}

impl MockMedia {
    fn new() -> Self {
        Self {
            paused: true,
            ended: false,
            time: 0.0,
            duration: f64::NAN,
            rate: 1.0,
            sources: Vec::new(),
            play_calls: 0,
        }
    }
}

impl MediaElement for MockMedia {
    fn play(&mut self) {
        if self.ended {
            self.ended = false;
            self.time = 0.0;
        }
        self.paused = false;
        self.play_calls += 1;
    }
    fn pause(&mut self) {
        self.paused = true;
    }
    fn is_paused(&self) -> bool {
        self.paused
    }
    fn has_ended(&self) -> bool {
        self.ended
    }
    fn current_time(&self) -> f64 {
        self.time
    }
    fn set_current_time(&mut self, secs: f64) {
        self.time = secs;
    }
    fn duration(&self) -> f64 {
        self.duration
    }
    fn playback_rate(&self) -> f64 {
        self.rate
    }
    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
    }
    fn set_source(&mut self, src: &str) {
        self.sources.push(src.to_string());
        self.ended = false;
        self.time = 0.0;
        self.duration = f64::NAN;
    }
}

struct LoudSource;

impl FrequencySource for LoudSource {
    fn bin_count(&self) -> usize {
        128
    }
    fn fill(&mut self, out: &mut [u8]) {
        out.fill(255);
    }
}

fn catalog_json(n: usize) -> String {
    let tracks: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r##"{{ "id": "t{i}", "title": "Track {i}", "src": "t{i}.mp3", "accent": "#336699" }}"##
            )
        })
        .collect();
    format!(r#"{{ "tracks": [{}] }}"#, tracks.join(","))
}

fn player_with(n: usize, cfg: PlayerConfig) -> PlayerController<MockMedia> {
    let (catalog, _) = Catalog::from_json(&catalog_json(n)).expect("catalog");
    PlayerController::new(catalog, cfg, MockMedia::new())
}

fn player(n: usize) -> PlayerController<MockMedia> {
    player_with(n, PlayerConfig::default())
}

/// Tick every frame from `from` (exclusive) to `to` (inclusive).
fn run(p: &mut PlayerController<MockMedia>, from: f64, to: f64) -> f64 {
    let mut t = from;
    while t + FRAME <= to {
        t += FRAME;
        p.tick(t);
    }
    if t < to {
        t = to;
        p.tick(t);
    }
    t
}

#[test]
fn loads_first_track_on_construction() {
    let mut p = player(2);
    assert_eq!(p.current_index(), 0);
    assert_eq!(p.state(), PlaybackState::Stopped);
    assert_eq!(p.media().sources, vec!["t0.mp3"]);
    assert_eq!(p.drain_events(), vec![UiEvent::TrackLoaded(0)]);
    assert!(p.drain_events().is_empty());
}

#[test]
fn toggle_play_spins_up_and_down_asymmetrically() {
    let mut p = player(1);
    let cfg = p.config().clone();
    p.tick(0.0);
    p.toggle_play(0.0);
    assert_eq!(p.state(), PlaybackState::Playing);
    assert!(!p.media().is_paused());

    p.tick(cfg.spin_up_ms / 2.0);
    assert!(p.spin_speed() > 0.0 && p.spin_speed() < cfg.cruise_speed);
    p.tick(cfg.spin_up_ms);
    assert_eq!(p.spin_speed(), cfg.cruise_speed);

    let stop_at = 2000.0;
    p.toggle_play(stop_at);
    assert_eq!(p.state(), PlaybackState::Stopped);
    assert!(p.media().is_paused());
    // Still coasting where spin-up would already have finished
    p.tick(stop_at + cfg.spin_up_ms);
    assert!(p.spin_speed() > 0.0, "spin-down must outlast spin-up");
    p.tick(stop_at + cfg.spin_down_ms);
    assert_eq!(p.spin_speed(), 0.0);

    let events = p.drain_events();
    assert!(events.contains(&UiEvent::PlayingChanged(true)));
    assert!(events.contains(&UiEvent::PlayingChanged(false)));
}

#[test]
fn tonearm_lands_with_bounce_then_tracks() {
    let mut p = player(1);
    let cfg = p.config().clone();
    p.tick(0.0);
    p.toggle_play(0.0);

    let mid_travel = p.tick(cfg.tonearm_travel_ms / 2.0).pose.tonearm_rot_y;
    assert!(mid_travel < 0.0 && mid_travel > -0.7);

    let bouncing = p
        .tick(cfg.tonearm_travel_ms + cfg.tonearm_bounce_ms / 4.0)
        .pose
        .tonearm_rot_y;
    assert!((bouncing - -0.7).abs() > 1e-3, "landing should overshoot");

    let settled = p
        .tick(cfg.tonearm_travel_ms + cfg.tonearm_bounce_ms + FRAME)
        .pose
        .tonearm_rot_y;
    assert!((settled - -0.7).abs() < 1e-6);

    // Tracking follows playback progress
    p.media_mut().duration = 100.0;
    p.media_mut().time = 50.0;
    let halfway = p.tick(2000.0).pose.tonearm_rot_y;
    assert!((halfway - -0.825).abs() < 1e-5);
}

#[test]
fn next_track_swaps_once_at_exit_boundary() {
    let mut p = player(2);
    let cfg = p.config().clone();
    p.tick(0.0);
    p.drain_events();
    assert!(p.next_track(0.0));
    assert_eq!(p.state(), PlaybackState::Transitioning);

    let mut t = 0.0;
    let mut swapped_at = None;
    let mut completed_at = None;
    while t < 2000.0 {
        t += FRAME;
        p.tick(t);
        if swapped_at.is_none() && p.swap_count() == 1 {
            swapped_at = Some(t);
            assert_eq!(p.transition_phase(), Some(TransitionPhase::Enter));
        }
        if swapped_at.is_none() {
            assert_eq!(p.current_index(), 0, "index changed before the swap");
        }
        if p.state() != PlaybackState::Transitioning {
            completed_at = Some(t);
            break;
        }
    }
    let swapped_at = swapped_at.expect("swap happened");
    let completed_at = completed_at.expect("transition completed");
    assert!(swapped_at >= cfg.exit_ms && swapped_at < cfg.exit_ms + FRAME);
    assert!((completed_at - (cfg.exit_ms + cfg.enter_ms)).abs() <= 50.0);

    assert_eq!(p.current_index(), 1);
    assert_eq!(p.swap_count(), 1);
    assert_eq!(p.media().sources, vec!["t0.mp3", "t1.mp3"]);
    let loads = p
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, UiEvent::TrackLoaded(_)))
        .count();
    assert_eq!(loads, 1);
}

#[test]
fn spin_peaks_during_swap_and_settles_by_captured_state() {
    let mut p = player(2);
    let cfg = p.config().clone();
    p.tick(0.0);
    p.toggle_play(0.0);
    run(&mut p, 0.0, 1200.0);
    assert!(p.next_track(1200.0));
    run(&mut p, 1200.0, 1200.0 + cfg.exit_ms);
    assert!((p.spin_speed() - cfg.peak_speed).abs() < 1e-6);
    run(&mut p, 1200.0 + cfg.exit_ms, 3000.0);
    assert_eq!(p.state(), PlaybackState::Playing);
    assert_eq!(p.spin_speed(), cfg.cruise_speed);
    assert!(!p.media().is_paused());
}

#[test]
fn transition_from_stopped_stays_stopped() {
    let mut p = player(3);
    p.tick(0.0);
    p.next_track(0.0);
    run(&mut p, 0.0, 1000.0);
    assert_eq!(p.state(), PlaybackState::Stopped);
    assert_eq!(p.spin_speed(), 0.0);
    assert!(p.media().is_paused());
    assert_eq!(p.media().play_calls, 0);
}

#[test]
fn rapid_next_requests_change_index_once() {
    let mut p = player(3);
    p.tick(0.0);
    assert!(p.next_track(0.0));
    assert!(!p.next_track(10.0));
    assert!(!p.prev_track(20.0));
    assert!(!p.select_track(2, 30.0));
    run(&mut p, 0.0, 2000.0);
    assert_eq!(p.current_index(), 1);
    assert_eq!(p.swap_count(), 1);
}

#[test]
fn index_wraps_in_both_directions() {
    let mut p = player(3);
    p.tick(0.0);
    p.prev_track(0.0);
    let t = run(&mut p, 0.0, 1000.0);
    assert_eq!(p.current_index(), 2);

    p.next_track(t);
    run(&mut p, t, t + 1000.0);
    assert_eq!(p.current_index(), 0);
}

#[test]
fn pause_during_transition_is_applied_after_completion() {
    let mut p = player(2);
    let cfg = p.config().clone();
    p.tick(0.0);
    p.toggle_play(0.0);
    run(&mut p, 0.0, 600.0);
    p.next_track(600.0);
    run(&mut p, 600.0, 700.0);
    p.toggle_play(700.0);
    assert_eq!(p.state(), PlaybackState::Transitioning);

    // Captured intent still governs the swap: the new track starts
    run(&mut p, 700.0, 600.0 + cfg.exit_ms + FRAME);
    assert_eq!(p.swap_count(), 1);
    assert!(!p.media().is_paused());
    assert_eq!(p.spin_target(), cfg.cruise_speed);

    run(&mut p, 600.0 + cfg.exit_ms + FRAME, 3000.0);
    assert_eq!(p.state(), PlaybackState::Stopped);
    assert!(p.media().is_paused());
    assert_eq!(p.spin_speed(), 0.0);
}

#[test]
fn double_toggle_during_transition_cancels_out() {
    let mut p = player(2);
    p.tick(0.0);
    p.toggle_play(0.0);
    p.next_track(100.0);
    p.toggle_play(150.0);
    p.toggle_play(200.0);
    run(&mut p, 100.0, 2000.0);
    assert_eq!(p.state(), PlaybackState::Playing);
}

#[test]
fn tape_stop_drops_rate_until_swap() {
    let mut p = player(2);
    let cfg = p.config().clone();
    p.tick(0.0);
    p.toggle_play(0.0);
    p.next_track(0.0);
    p.tick(cfg.tape_stop_ms / 2.0);
    assert!((p.media().playback_rate() - 0.25).abs() < 1e-6);
    let glitch = p.tick(cfg.tape_stop_ms / 2.0 + 1.0).uniforms.glitch;
    assert!(glitch > 0.0);
    p.tick(cfg.exit_ms);
    assert_eq!(p.media().playback_rate(), 1.0);
    let later = p.tick(cfg.exit_ms + cfg.glitch_ms).uniforms.glitch;
    assert_eq!(later, 0.0);
}

#[test]
fn tape_stop_is_skipped_when_disabled_or_stopped() {
    let cfg = PlayerConfig {
        tape_stop: false,
        ..Default::default()
    };
    let mut p = player_with(2, cfg);
    p.tick(0.0);
    p.toggle_play(0.0);
    p.next_track(0.0);
    assert_eq!(p.tick(100.0).uniforms.glitch, 0.0);
    assert_eq!(p.media().playback_rate(), 1.0);

    let mut stopped = player(2);
    stopped.tick(0.0);
    stopped.next_track(0.0);
    assert_eq!(stopped.tick(100.0).uniforms.glitch, 0.0);
    assert_eq!(stopped.media().playback_rate(), 1.0);
}

#[test]
fn selecting_current_track_only_closes_selection() {
    let mut p = player(3);
    p.tick(0.0);
    p.drain_events();
    assert!(!p.select_track(0, 0.0));
    assert_eq!(p.state(), PlaybackState::Stopped);
    assert_eq!(p.drain_events(), vec![UiEvent::SelectionClosed]);

    assert!(!p.select_track(9, 0.0));
    assert_eq!(p.state(), PlaybackState::Stopped);

    assert!(p.select_track(2, 0.0));
    run(&mut p, 0.0, 1000.0);
    assert_eq!(p.current_index(), 2);
}

#[test]
fn controls_unlock_only_when_transition_completes() {
    let mut p = player(2);
    p.tick(0.0);
    p.drain_events();
    p.next_track(0.0);
    let start = p.drain_events();
    assert!(start.contains(&UiEvent::ControlsLocked(true)));
    run(&mut p, 0.0, 500.0);
    assert!(!p.drain_events().contains(&UiEvent::ControlsLocked(false)));
    run(&mut p, 500.0, 1000.0);
    assert!(p.drain_events().contains(&UiEvent::ControlsLocked(false)));
}

#[test]
fn seek_before_metadata_is_deferred() {
    let mut p = player(1);
    p.seek(0.5);
    assert_eq!(p.media().time, 0.0);
    assert!((p.tick(0.0).progress - 0.5).abs() < 1e-6);

    p.media_mut().duration = 240.0;
    p.on_metadata_loaded();
    assert_eq!(p.media().time, 120.0);
    assert!((p.tick(16.0).progress - 0.5).abs() < 1e-6);
}

#[test]
fn seek_with_known_duration_applies_immediately() {
    let mut p = player(1);
    p.media_mut().duration = 100.0;
    p.seek(0.25);
    assert_eq!(p.media().time, 25.0);
    p.seek(3.0);
    assert_eq!(p.media().time, 100.0);
    p.seek(f32::NAN);
    assert_eq!(p.media().time, 0.0);
}

#[test]
fn drag_owns_progress_until_release() {
    let mut p = player(1);
    p.media_mut().duration = 100.0;
    p.media_mut().time = 10.0;
    p.begin_drag(0.3);
    assert!(p.is_dragging());
    assert!((p.tick(0.0).progress - 0.3).abs() < 1e-6);
    p.update_drag(0.7);
    assert!((p.tick(16.0).progress - 0.7).abs() < 1e-6);
    assert_eq!(p.media().time, 10.0, "dragging must not seek");

    p.end_drag(0.6);
    assert!(!p.is_dragging());
    assert_eq!(p.media().time, 60.0);
}

#[test]
fn ended_returns_to_stopped() {
    let mut p = player(1);
    p.tick(0.0);
    p.toggle_play(0.0);
    p.media_mut().paused = true;
    p.on_ended(5000.0);
    assert_eq!(p.state(), PlaybackState::Stopped);
    // A stray ended while already stopped is harmless
    p.on_ended(5100.0);
    assert_eq!(p.state(), PlaybackState::Stopped);
}

#[test]
fn visuals_rest_without_analyser() {
    let mut p = player(1);
    p.tick(0.0);
    p.toggle_play(0.0);
    let frame = p.tick(1000.0);
    assert_eq!(frame.uniforms.bass, 0.0);
    assert_eq!(frame.uniforms.high, 0.0);
    assert!(frame.bars.iter().all(|&b| b == 0.0));
    assert_eq!(frame.pose.vinyl_scale, 1.0);
    assert!(frame.pose.vinyl_rotation.is_finite());
}

#[test]
fn analyser_drives_signals_which_decay_after_pause() {
    let mut p = player(1);
    p.analysis_mut().attach(Box::new(LoudSource));
    p.tick(0.0);
    p.toggle_play(0.0);
    let t = run(&mut p, 0.0, 800.0);
    let loud = p.tick(t + FRAME);
    assert!(loud.uniforms.bass > 0.9);
    assert!(loud.uniforms.high > loud.uniforms.bass * 0.99);
    assert!(loud.bars.iter().all(|&b| b > 0.9));
    assert!(loud.pose.vinyl_scale > 1.0);

    p.toggle_play(t + FRAME);
    let first = p.tick(t + 2.0 * FRAME);
    assert!(first.uniforms.bass < loud.uniforms.bass);
    assert!(first.uniforms.bass > 0.5, "decay is gradual, not a cut");
    run(&mut p, t + 2.0 * FRAME, t + 10_000.0);
    let quiet = p.tick(t + 10_000.0 + FRAME);
    assert_eq!(quiet.uniforms.bass, 0.0);
    assert!(quiet.bars.iter().all(|&b| b < 0.01));
}

#[test]
fn background_fades_in_on_play() {
    let mut p = player(1);
    let cfg = p.config().clone();
    p.tick(0.0);
    assert_eq!(p.tick(FRAME).uniforms.opacity, 0.0);
    p.toggle_play(FRAME);
    let partial = p.tick(FRAME + cfg.crossfade_ms / 2.0).uniforms.opacity;
    assert!(partial > 0.0 && partial < 1.0);
    assert_eq!(p.tick(FRAME + cfg.crossfade_ms).uniforms.opacity, 1.0);
}

#[test]
fn swap_regenerates_waveform() {
    let mut p = player(2);
    let before = p.waveform().to_vec();
    p.tick(0.0);
    p.next_track(0.0);
    run(&mut p, 0.0, 1000.0);
    assert_ne!(p.waveform(), before.as_slice());
    assert_eq!(p.waveform().len(), before.len());
}

fn worst_arm_step(p: &mut PlayerController<MockMedia>, from: f64, to: f64) -> f32 {
    let mut last = p.tick(from).pose.tonearm_rot_y;
    let mut worst = 0.0f32;
    let mut t = from;
    while t < to {
        t += FRAME;
        let rot = p.tick(t).pose.tonearm_rot_y;
        worst = worst.max((rot - last).abs());
        last = rot;
    }
    worst
}

#[test]
fn tonearm_retargets_smoothly_when_swapping_mid_landing() {
    let mut p = player(2);
    p.media_mut().duration = 100.0;
    p.media_mut().time = 50.0;
    p.tick(0.0);
    p.toggle_play(0.0);
    let before = worst_arm_step(&mut p, 0.0, 96.0);
    assert!(p.next_track(96.0));
    let after = worst_arm_step(&mut p, 96.0, 3000.0);
    assert!(before < 0.06 && after < 0.06, "arm jumped {before} / {after} rad");
    assert_eq!(p.state(), PlaybackState::Playing);
    // New track starts at the beginning of the groove
    assert!((p.tick(3016.0).pose.tonearm_rot_y - -0.7).abs() < 1e-6);
}

#[test]
fn replay_after_end_lands_at_groove_start() {
    let mut p = player(1);
    p.media_mut().duration = 100.0;
    p.tick(0.0);
    p.toggle_play(0.0);
    run(&mut p, 0.0, 2000.0);

    {
        let media = p.media_mut();
        media.time = 100.0;
        media.ended = true;
        media.paused = true;
    }
    p.tick(2016.0);
    p.on_ended(2016.0);
    run(&mut p, 2016.0, 3500.0);

    p.toggle_play(3500.0);
    assert_eq!(p.media().time, 0.0);
    let worst = worst_arm_step(&mut p, 3500.0, 5000.0);
    assert!(worst < 0.06, "arm jumped {worst} rad");
    assert!((p.tick(5016.0).pose.tonearm_rot_y - -0.7).abs() < 1e-6);
}

#[test]
fn rotation_integrates_per_frame_with_clamped_delta() {
    use std::f32::consts::TAU;
    use turntable_core::constants::{FRAME_MS_60HZ, MAX_FRAME_DELTA_MS};

    let mut p = player(1);
    let cruise = p.config().cruise_speed;
    p.tick(0.0);
    p.toggle_play(0.0);
    let t = run(&mut p, 0.0, 600.0);
    assert_eq!(p.spin_speed(), cruise);

    let r0 = p.tick(t).pose.vinyl_rotation;
    let r1 = p.tick(t + FRAME_MS_60HZ).pose.vinyl_rotation;
    assert!(((r1 - r0).rem_euclid(TAU) - cruise).abs() < 1e-4);

    // A long stall (background tab) advances at most the clamped delta
    let r2 = p.tick(t + FRAME_MS_60HZ + 10_000.0).pose.vinyl_rotation;
    let max_frames = (MAX_FRAME_DELTA_MS / FRAME_MS_60HZ) as f32;
    assert!(((r2 - r1).rem_euclid(TAU) - max_frames * cruise).abs() < 1e-4);
}

#[test]
fn time_labels_follow_loaded_metadata() {
    let mut p = player(2);
    assert_eq!(
        time_labels(p.media()),
        ("0:00".to_string(), "0:00".to_string())
    );
    // Metadata arriving before the first frame is still shown
    p.media_mut().duration = 200.0;
    p.on_metadata_loaded();
    assert_eq!(p.drain_events(), vec![UiEvent::TrackLoaded(0)]);
    assert_eq!(time_labels(p.media()).1, "3:20");

    p.media_mut().time = 61.0;
    assert_eq!(time_labels(p.media()).0, "1:01");
}
