//! Parameters for interaction sounds.
//!
//! The web audio engine builds nodes from these descriptions; keeping the
//! numbers here lets the mapping be tested without an audio context.

use crate::config::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Saw,
}

/// Sustained tone that follows the pointer while an activity is touched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthVoice {
    pub waveform: Waveform,
    pub frequency_hz: f32,
    pub peak_gain: f32,
    pub attack_sec: f64,
    /// Whether later pointer moves retune the oscillator.
    pub follows_pitch: bool,
}

/// Release time constant and hard stop offset for the continuous synth.
pub const SYNTH_RELEASE_TAU_SEC: f64 = 0.1;
pub const SYNTH_STOP_AFTER_SEC: f64 = 0.15;
pub const SYNTH_GLIDE_TAU_SEC: f64 = 0.1;

/// Map a vertical pointer position (0 = top) to a pitch; higher is brighter.
pub fn pitch_for_y_ratio(y_ratio: f32) -> f32 {
    let y = y_ratio.clamp(0.0, 1.0);
    SYNTH_FREQUENCY_MIN + (1.0 - y) * (SYNTH_FREQUENCY_MAX - SYNTH_FREQUENCY_MIN)
}

/// Voice used by an activity's continuous synth, if it has one.
pub fn synth_voice(view: ViewKind, y_ratio: f32) -> Option<SynthVoice> {
    let freq = pitch_for_y_ratio(y_ratio);
    match view {
        ViewKind::Particles => Some(SynthVoice {
            waveform: Waveform::Sine,
            frequency_hz: freq,
            peak_gain: 0.15,
            attack_sec: 0.1,
            follows_pitch: true,
        }),
        ViewKind::Liquid => Some(SynthVoice {
            waveform: Waveform::Triangle,
            frequency_hz: freq * 0.5,
            peak_gain: 0.1,
            attack_sec: 0.2,
            follows_pitch: true,
        }),
        ViewKind::Sorting => Some(SynthVoice {
            waveform: Waveform::Saw,
            frequency_hz: 60.0,
            peak_gain: 0.05,
            attack_sec: 0.1,
            follows_pitch: false,
        }),
        _ => None,
    }
}

/// Retuned frequency for a voice that follows the pointer.
pub fn retune(voice: &SynthVoice, y_ratio: f32) -> Option<f32> {
    if !voice.follows_pitch {
        return None;
    }
    let freq = pitch_for_y_ratio(y_ratio);
    Some(match voice.waveform {
        Waveform::Triangle => freq * 0.5,
        _ => freq,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sfx {
    Pop,
    Clack,
}

/// Exponential pitch and gain sweep for a one-shot effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OneShot {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    pub start_gain: f32,
    pub end_gain: f32,
    pub duration_sec: f64,
}

impl Sfx {
    /// Sweep for this effect; `jitter` in [0, 1) varies the clack pitch.
    pub fn one_shot(self, jitter: f32) -> OneShot {
        match self {
            Sfx::Pop => OneShot {
                waveform: Waveform::Sine,
                start_hz: 400.0,
                end_hz: 100.0,
                start_gain: 0.4,
                end_gain: 0.01,
                duration_sec: 0.15,
            },
            Sfx::Clack => OneShot {
                waveform: Waveform::Triangle,
                start_hz: 300.0 + jitter.clamp(0.0, 1.0) * 100.0,
                end_hz: 100.0,
                start_gain: 0.3,
                end_gain: 0.001,
                duration_sec: 0.1,
            },
        }
    }
}

/// Drops clacks that arrive faster than the debounce window.
///
/// Marble collisions can fire dozens of clacks in one frame; pops always play.
#[derive(Clone, Debug, Default)]
pub struct SfxGate {
    last_ms: Option<f64>,
}

impl SfxGate {
    pub fn allow(&mut self, sfx: Sfx, now_ms: f64) -> bool {
        if sfx == Sfx::Clack {
            if let Some(last) = self.last_ms {
                if now_ms - last < SFX_DEBOUNCE_MS {
                    return false;
                }
            }
        }
        self.last_ms = Some(now_ms);
        true
    }
}
