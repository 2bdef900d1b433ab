// Host-side tests for noise generation and interaction sound parameters.

use rand::rngs::StdRng;
use rand::SeedableRng;
use slowtide_core::noise::{buffer_len, generate, NoiseColor};
use slowtide_core::sound::*;
use slowtide_core::{SoundType, ViewKind};

fn mean_step(samples: &[f32]) -> f32 {
    let total: f32 = samples.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
    total / (samples.len() - 1) as f32
}

#[test]
fn every_colour_is_bounded() {
    for color in [NoiseColor::White, NoiseColor::Pink, NoiseColor::Brown] {
        let buf = generate(color, 20_000, &mut StdRng::seed_from_u64(3));
        assert_eq!(buf.len(), 20_000);
        assert!(buf.iter().all(|s| (-1.0..=1.0).contains(s)), "{:?}", color);
    }
}

#[test]
fn brown_is_smoother_than_white() {
    let white = generate(NoiseColor::White, 10_000, &mut StdRng::seed_from_u64(9));
    let brown = generate(NoiseColor::Brown, 10_000, &mut StdRng::seed_from_u64(9));
    assert!(mean_step(&brown) < mean_step(&white) * 0.5);
}

#[test]
fn sounds_pick_their_noise() {
    assert_eq!(NoiseColor::for_sound(SoundType::Deep), Some(NoiseColor::Brown));
    assert_eq!(NoiseColor::for_sound(SoundType::Waves), Some(NoiseColor::Brown));
    assert_eq!(NoiseColor::for_sound(SoundType::Rain), Some(NoiseColor::Pink));
    assert_eq!(NoiseColor::for_sound(SoundType::Static), Some(NoiseColor::White));
    assert_eq!(NoiseColor::for_sound(SoundType::Off), None);
    assert_eq!(buffer_len(44_100.0), 88_200);
}

#[test]
fn pitch_rises_toward_the_top() {
    assert_eq!(pitch_for_y_ratio(0.0), 800.0);
    assert_eq!(pitch_for_y_ratio(1.0), 200.0);
    assert_eq!(pitch_for_y_ratio(0.5), 500.0);
    assert_eq!(pitch_for_y_ratio(-3.0), 800.0);
}

#[test]
fn each_activity_has_its_voice() {
    let p = synth_voice(ViewKind::Particles, 0.5).unwrap();
    assert_eq!(p.waveform, Waveform::Sine);
    assert_eq!(p.frequency_hz, 500.0);

    let l = synth_voice(ViewKind::Liquid, 0.5).unwrap();
    assert_eq!(l.waveform, Waveform::Triangle);
    assert_eq!(l.frequency_hz, 250.0);
    assert_eq!(retune(&l, 0.0), Some(400.0));

    let s = synth_voice(ViewKind::Sorting, 0.1).unwrap();
    assert_eq!(s.waveform, Waveform::Saw);
    assert_eq!(s.frequency_hz, 60.0);
    assert_eq!(retune(&s, 0.9), None);

    assert!(synth_voice(ViewKind::Bubbles, 0.5).is_none());
    assert!(synth_voice(ViewKind::Forest, 0.5).is_none());
}

#[test]
fn clacks_are_debounced_pops_are_not() {
    let mut gate = SfxGate::default();
    assert!(gate.allow(Sfx::Clack, 0.0));
    assert!(!gate.allow(Sfx::Clack, 50.0));
    assert!(gate.allow(Sfx::Clack, 100.0));
    assert!(gate.allow(Sfx::Pop, 110.0));
    assert!(gate.allow(Sfx::Pop, 111.0));
}

#[test]
fn one_shot_sweeps_down() {
    let pop = Sfx::Pop.one_shot(0.0);
    assert_eq!(pop.waveform, Waveform::Sine);
    assert!(pop.start_hz > pop.end_hz);
    let clack = Sfx::Clack.one_shot(0.5);
    assert_eq!(clack.start_hz, 350.0);
    assert!(clack.end_gain < clack.start_gain);
}
