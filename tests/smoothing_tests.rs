// Host-side tests for exponential smoothing.

use turntable_core::constants::SHADER_BASS_K;
use turntable_core::{step, BarSmoother, SmoothedSignal};

#[test]
fn step_never_overshoots_target() {
    let values = [0.0_f32, 0.1, 0.33, 0.5, 0.9, 1.0];
    let ks = [0.01_f32, 0.08, 0.12, 0.2, 0.5, 0.99];
    for &current in &values {
        for &target in &values {
            for &k in &ks {
                let next = step(current, target, k);
                let (lo, hi) = if current <= target {
                    (current, target)
                } else {
                    (target, current)
                };
                assert!(
                    next >= lo && next <= hi,
                    "step({current}, {target}, {k}) = {next} escaped [{lo}, {hi}]"
                );
            }
        }
    }
}

#[test]
fn step_ignores_non_finite_input() {
    assert_eq!(step(0.4, f32::NAN, 0.1), 0.4);
    assert_eq!(step(0.4, f32::INFINITY, 0.1), 0.4);
    assert_eq!(step(f32::NAN, 1.0, 0.5), 0.5);
    assert_eq!(step(0.4, 1.0, f32::NAN), 0.4);
}

#[test]
fn sustained_bass_converges_at_expected_rate() {
    let mut bass = SmoothedSignal::new(SHADER_BASS_K, 0.92);
    for _ in 0..5 {
        bass.follow(1.0);
    }
    let expected = 1.0 - (1.0 - SHADER_BASS_K).powi(5);
    assert!((bass.value() - expected).abs() < 1e-5);
    assert!(bass.value() > 0.45);

    let mut steps = 5;
    while bass.value() < 0.9 {
        bass.follow(1.0);
        steps += 1;
        assert!(steps < 100, "bass never reached 0.9");
    }
    assert_eq!(steps, 19);
    assert!(bass.value() <= 1.0);
}

#[test]
fn relax_decays_multiplicatively_to_zero() {
    let mut high = SmoothedSignal::new(0.5, 0.9);
    high.follow(1.0);
    let start = high.value();
    let after = high.relax();
    assert!((after - start * 0.9).abs() < 1e-6);
    for _ in 0..500 {
        high.relax();
    }
    assert_eq!(high.value(), 0.0);
}

#[test]
fn independent_signals_keep_their_own_state() {
    let mut fast = SmoothedSignal::new(0.2, 0.9);
    let mut slow = SmoothedSignal::new(0.08, 0.95);
    fast.follow(1.0);
    slow.follow(1.0);
    assert!(fast.value() > slow.value());
}

#[test]
fn bars_rise_fast_and_fall_slowly() {
    let mut bars = BarSmoother::new(2, 0.6, 0.08);
    bars.update([1.0, 1.0]);
    let risen = bars.levels()[0];
    assert!((risen - 0.6).abs() < 1e-6);

    bars.update([0.0, 1.0]);
    let fallen = bars.levels()[0];
    let drop = risen - fallen;
    assert!(drop > 0.0 && drop < 0.1, "fall should be gentle, dropped {drop}");
    assert!(bars.levels()[1] > risen);
}

#[test]
fn bars_treat_missing_and_out_of_range_targets_as_clamped() {
    let mut bars = BarSmoother::new(3, 0.5, 0.1);
    bars.update([5.0]);
    assert!((bars.levels()[0] - 0.5).abs() < 1e-6);
    assert_eq!(bars.levels()[1], 0.0);
    assert_eq!(bars.levels()[2], 0.0);
    assert_eq!(bars.len(), 3);
}
