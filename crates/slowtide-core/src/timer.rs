//! Session countdown and the sunset fade.
//!
//! Time is supplied by the caller in milliseconds. The timer keeps the time
//! accumulated before the last pause separately from the current run so that
//! pausing freezes the elapsed value exactly.

use crate::config::*;

#[derive(Clone, Debug)]
pub struct SessionTimer {
    duration_secs: f64,
    start_ms: f64,
    elapsed_saved_ms: f64,
    paused: bool,
    running: bool,
    completion_reported: bool,
}

/// What the one-second tick asks the front-end to apply.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimerTick {
    /// Sunset overlay opacity, set once the fade has begun.
    pub overlay_opacity: Option<f64>,
    /// Ambient gain override while fading; `None` leaves the gain alone.
    pub ambient_gain: Option<f32>,
    /// True on the single tick where the session ran out.
    pub completed: bool,
}

impl SessionTimer {
    pub fn new(minutes: u32) -> Self {
        Self {
            duration_secs: minutes as f64 * 60.0,
            start_ms: 0.0,
            elapsed_saved_ms: 0.0,
            paused: false,
            running: false,
            completion_reported: false,
        }
    }

    pub fn set_duration(&mut self, minutes: u32) {
        self.duration_secs = minutes as f64 * 60.0;
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn start(&mut self, now_ms: f64, reset: bool) {
        if reset {
            self.elapsed_saved_ms = 0.0;
            self.completion_reported = false;
        }
        self.start_ms = now_ms;
        self.paused = false;
        self.running = true;
    }

    pub fn pause(&mut self, now_ms: f64) {
        if !self.running || self.paused {
            return;
        }
        self.elapsed_saved_ms += (now_ms - self.start_ms).max(0.0);
        self.paused = true;
        log::debug!("[timer] paused at {:.1}s", self.elapsed_saved_ms / 1000.0);
    }

    pub fn resume(&mut self, now_ms: f64) {
        if !self.running || !self.paused {
            return;
        }
        self.start(now_ms, false);
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
    }

    pub fn elapsed_secs(&self, now_ms: f64) -> f64 {
        if self.paused || !self.running {
            return self.elapsed_saved_ms / 1000.0;
        }
        (self.elapsed_saved_ms + (now_ms - self.start_ms).max(0.0)) / 1000.0
    }

    pub fn remaining_secs(&self, now_ms: f64) -> f64 {
        (self.duration_secs - self.elapsed_secs(now_ms)).max(0.0)
    }

    /// Fraction of the session used, clamped to [0, 1].
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_secs <= 0.0 {
            return 1.0;
        }
        (self.elapsed_secs(now_ms) / self.duration_secs).clamp(0.0, 1.0)
    }

    pub fn display_text(&self, now_ms: f64) -> String {
        let remaining = self.remaining_secs(now_ms);
        let minutes = (remaining / 60.0).floor() as u64;
        let seconds = (remaining % 60.0).floor() as u64;
        let mut text = format!("Time Left: {}m {:02}s", minutes, seconds);
        if self.paused {
            text.push_str(" (PAUSED)");
        }
        text
    }

    /// Advance the sunset fade. `volume_multiplier` comes from the sensory
    /// dimmer; `sound_on` is false when the ambient sound is `off`.
    pub fn tick(&mut self, now_ms: f64, volume_multiplier: f32, sound_on: bool) -> TimerTick {
        let mut tick = TimerTick::default();
        if self.paused || !self.running {
            return tick;
        }
        let raw = if self.duration_secs > 0.0 {
            self.elapsed_secs(now_ms) / self.duration_secs
        } else {
            1.0
        };
        if raw >= 1.0 && !self.completion_reported {
            self.completion_reported = true;
            tick.completed = true;
            log::info!("[timer] session complete");
        }
        let progress = raw.min(1.0);
        if let Some(fade) = sunset_fade(progress) {
            tick.overlay_opacity = Some(fade * SUNSET_OVERLAY_MAX_OPACITY);
            if sound_on {
                tick.ambient_gain =
                    Some((SUNSET_VOLUME_BASE * (1.0 - fade)) as f32 * volume_multiplier);
            }
        }
        tick
    }
}

/// Fade amount in [0, 1] once progress passes the halfway mark.
pub fn sunset_fade(progress: f64) -> Option<f64> {
    if progress > SUNSET_FADE_START_RATIO {
        Some(((progress - SUNSET_FADE_START_RATIO) * 2.0).min(1.0))
    } else {
        None
    }
}
