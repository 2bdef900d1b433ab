//! Sensory dimmer: steps an activities session down from lively to calm.
//!
//! The session is split into high, medium and low engagement phases. In
//! `auto` mode the phase follows elapsed time; entering a phase rewrites the
//! behaviour pattern and emergent-event rate.

use crate::config::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseMultipliers {
    pub volume: f32,
    pub speed: f32,
    pub spawn: f32,
}

impl PhaseMultipliers {
    pub const NEUTRAL: PhaseMultipliers = PhaseMultipliers {
        volume: 1.0,
        speed: 1.0,
        spawn: 1.0,
    };
}

/// Settings applied on entering a phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseChange {
    pub phase: EngagementPhase,
    pub behavior: BehaviorPattern,
    pub emergent: EmergentEvents,
}

#[derive(Clone, Debug)]
pub struct SensoryDimmer {
    mode: DimmerMode,
    phase: EngagementPhase,
    session_ms: f64,
    phase_started_ms: f64,
}

impl SensoryDimmer {
    pub fn new(mode: DimmerMode, session_minutes: u32) -> Self {
        Self {
            mode,
            phase: EngagementPhase::High,
            session_ms: session_minutes as f64 * 60_000.0,
            phase_started_ms: 0.0,
        }
    }

    pub fn mode(&self) -> DimmerMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DimmerMode) {
        self.mode = mode;
    }

    pub fn set_session_minutes(&mut self, minutes: u32) {
        self.session_ms = minutes as f64 * 60_000.0;
    }

    pub fn phase(&self) -> EngagementPhase {
        self.phase
    }

    pub fn phase_started_ms(&self) -> f64 {
        self.phase_started_ms
    }

    pub fn reset(&mut self, now_ms: f64) {
        self.phase = EngagementPhase::High;
        self.phase_started_ms = now_ms;
    }

    /// Boundaries in session milliseconds: end of high, end of medium.
    fn boundaries(&self) -> (f64, f64) {
        let high = self.session_ms * HIGH_ENGAGEMENT_RATIO;
        let medium = self.session_ms * MEDIUM_ENGAGEMENT_RATIO;
        (high, high + medium)
    }

    pub fn phase_for_elapsed(&self, elapsed_ms: f64) -> EngagementPhase {
        let (high_end, medium_end) = self.boundaries();
        if elapsed_ms <= high_end {
            EngagementPhase::High
        } else if elapsed_ms <= medium_end {
            EngagementPhase::Medium
        } else {
            EngagementPhase::Low
        }
    }

    /// Follow elapsed session time in auto mode. Returns the settings to apply
    /// when the phase changed.
    pub fn update(&mut self, elapsed_ms: f64, now_ms: f64) -> Option<PhaseChange> {
        if self.mode != DimmerMode::Auto {
            return None;
        }
        let next = self.phase_for_elapsed(elapsed_ms);
        if next == self.phase {
            return None;
        }
        Some(self.transition(next, now_ms))
    }

    /// Force a phase, as the admin overlay does.
    pub fn set_phase(&mut self, phase: EngagementPhase, now_ms: f64) -> PhaseChange {
        self.transition(phase, now_ms)
    }

    fn transition(&mut self, phase: EngagementPhase, now_ms: f64) -> PhaseChange {
        log::info!("[dimmer] {} -> {}", self.phase, phase);
        self.phase = phase;
        self.phase_started_ms = now_ms;
        phase_settings(phase)
    }

    pub fn multipliers(&self) -> PhaseMultipliers {
        if self.mode == DimmerMode::Off {
            return PhaseMultipliers::NEUTRAL;
        }
        phase_multipliers(self.phase)
    }

    /// High-intensity visuals run only in the first phase with the dimmer on.
    pub fn is_high_intensity(&self) -> bool {
        self.mode != DimmerMode::Off && self.phase == EngagementPhase::High
    }

    /// Progress through the current phase in [0, 1].
    pub fn phase_progress(&self, elapsed_ms: f64) -> f64 {
        if self.mode == DimmerMode::Off || self.session_ms <= 0.0 {
            return 0.0;
        }
        let (high_end, medium_end) = self.boundaries();
        let (start, len) = match self.phase {
            EngagementPhase::High => (0.0, high_end),
            EngagementPhase::Medium => (high_end, medium_end - high_end),
            EngagementPhase::Low => (medium_end, self.session_ms * LOW_ENGAGEMENT_RATIO),
        };
        if len <= 0.0 {
            return 1.0;
        }
        ((elapsed_ms - start) / len).clamp(0.0, 1.0)
    }
}

pub fn phase_settings(phase: EngagementPhase) -> PhaseChange {
    let (behavior, emergent) = match phase {
        EngagementPhase::High => (BehaviorPattern::Chaos, EmergentEvents::Common),
        EngagementPhase::Medium => (BehaviorPattern::Rhythm, EmergentEvents::Rare),
        EngagementPhase::Low => (BehaviorPattern::Calm, EmergentEvents::Off),
    };
    PhaseChange {
        phase,
        behavior,
        emergent,
    }
}

pub fn phase_multipliers(phase: EngagementPhase) -> PhaseMultipliers {
    match phase {
        EngagementPhase::High => PhaseMultipliers {
            volume: HIGH_PHASE_VOLUME_MULTIPLIER,
            speed: HIGH_PHASE_SPEED_MULTIPLIER,
            spawn: HIGH_PHASE_SPAWN_MULTIPLIER,
        },
        EngagementPhase::Medium => PhaseMultipliers {
            volume: MEDIUM_PHASE_VOLUME_MULTIPLIER,
            speed: MEDIUM_PHASE_SPEED_MULTIPLIER,
            spawn: MEDIUM_PHASE_SPAWN_MULTIPLIER,
        },
        EngagementPhase::Low => PhaseMultipliers {
            volume: LOW_PHASE_VOLUME_MULTIPLIER,
            speed: LOW_PHASE_SPEED_MULTIPLIER,
            spawn: LOW_PHASE_SPAWN_MULTIPLIER,
        },
    }
}
