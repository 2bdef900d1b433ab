//! Session-wide application state.
//!
//! One `AppState` exists for the lifetime of the page. It is created from the
//! stored preferences, mutated by the mode manager and reset on quit.

use crate::activities::Tuning;
use crate::config::*;
use crate::dimmer::PhaseChange;
use crate::prefs::Preferences;

#[derive(Clone, Debug)]
pub struct AppState {
    pub prefs: Preferences,
    pub mode: Option<Mode>,
    pub current_view: Option<ViewKind>,
    pub session_running: bool,
    pub paused: bool,
    pub session_identifier: Option<String>,
    pub session_started_ms: Option<f64>,
    pub last_interaction_ms: f64,
    /// Behaviour in effect; starts from the preferences and is rewritten by
    /// dimmer phase changes.
    pub behavior: BehaviorPattern,
    pub emergent: EmergentEvents,
}

impl AppState {
    pub fn new(prefs: Preferences, now_ms: f64) -> Self {
        Self {
            behavior: prefs.behavior_pattern,
            emergent: prefs.emergent_events,
            prefs,
            mode: None,
            current_view: None,
            session_running: false,
            paused: false,
            session_identifier: None,
            session_started_ms: None,
            last_interaction_ms: now_ms,
        }
    }

    /// True while a session is running and not paused.
    pub fn is_live(&self) -> bool {
        self.session_running && !self.paused
    }

    pub fn idle_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.last_interaction_ms).max(0.0)
    }

    pub fn touch(&mut self, now_ms: f64) {
        self.last_interaction_ms = now_ms;
    }

    pub fn apply_phase(&mut self, change: PhaseChange) {
        self.behavior = change.behavior;
        self.emergent = change.emergent;
    }

    /// Re-read the parent-set behaviour after a settings change.
    pub fn sync_behavior_from_prefs(&mut self) {
        self.behavior = self.prefs.behavior_pattern;
        self.emergent = self.prefs.emergent_events;
    }

    pub fn tuning(&self, high_intensity: bool) -> Tuning {
        Tuning {
            behavior: self.behavior,
            emergent: self.emergent,
            density: self.prefs.visual_density,
            high_intensity,
        }
    }

    /// Session length in whole minutes since start, rounded.
    pub fn actual_minutes(&self, now_ms: f64) -> u32 {
        match self.session_started_ms {
            Some(start) => ((now_ms - start).max(0.0) / 60_000.0).round() as u32,
            None => 0,
        }
    }

    /// Back to the start screen, keeping preferences.
    pub fn reset(&mut self, now_ms: f64) {
        let prefs = self.prefs.clone();
        *self = AppState::new(prefs, now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_preferences() {
        let prefs = Preferences {
            duration: 15,
            ..Preferences::default()
        };
        let mut state = AppState::new(prefs, 0.0);
        state.session_running = true;
        state.paused = true;
        state.session_identifier = Some("x".into());
        state.reset(5_000.0);
        assert!(!state.session_running);
        assert!(!state.paused);
        assert_eq!(state.session_identifier, None);
        assert_eq!(state.prefs.duration, 15);
        assert_eq!(state.last_interaction_ms, 5_000.0);
    }

    #[test]
    fn phase_change_overrides_behaviour() {
        let mut state = AppState::new(Preferences::default(), 0.0);
        state.apply_phase(PhaseChange {
            phase: EngagementPhase::Low,
            behavior: BehaviorPattern::Calm,
            emergent: EmergentEvents::Off,
        });
        assert_eq!(state.tuning(false).behavior, BehaviorPattern::Calm);
        state.sync_behavior_from_prefs();
        assert_eq!(state.behavior, BehaviorPattern::Chaos);
    }
}
