//! Mode manager: owns the session and routes input, frames and ticks to the
//! active view.
//!
//! Activities mode runs one interactive activity at a time with a timer, the
//! sensory dimmer and idle handling. Story mode shows one static scene and has
//! none of those. The manager never touches the browser: it returns display
//! lists and queues cues and analytics events for the front-end to drain.

use crate::activities::{new_activity, Activity, Cue, Frame, Surface, Tuning};
use crate::admin::AdminSnapshot;
use crate::analytics::{session_identifier, AnalyticsEvent, DateStamp, Engagement, Transition};
use crate::config::*;
use crate::dimmer::SensoryDimmer;
use crate::draw::DisplayList;
use crate::prefs::{Preferences, Setting};
use crate::scenes::{self, SceneCache};
use crate::sound::SfxGate;
use crate::state::AppState;
use crate::timer::{SessionTimer, TimerTick};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

/// Seconds between `session_active` engagement pings.
const ENGAGEMENT_PING_SECS: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Start,
    Move,
    End,
}

enum ActiveView {
    Activity(Box<dyn Activity>),
    Scene(ViewKind),
}

pub struct ModeManager {
    state: AppState,
    surface: Surface,
    rng: StdRng,
    timer: SessionTimer,
    dimmer: SensoryDimmer,
    view: Option<ActiveView>,
    scenes: SceneCache,
    scroll: f32,
    scene_dirty: bool,
    cues: Vec<Cue>,
    events: Vec<AnalyticsEvent>,
    sfx_gate: SfxGate,
    pause_started_ms: Option<f64>,
    ticks: u32,
}

impl ModeManager {
    pub fn new(prefs: Preferences, surface: Surface, rng: StdRng, now_ms: f64) -> Self {
        Self {
            timer: SessionTimer::new(prefs.duration),
            dimmer: SensoryDimmer::new(prefs.sensory_dimmer_mode, prefs.duration),
            state: AppState::new(prefs, now_ms),
            surface,
            rng,
            view: None,
            scenes: SceneCache::default(),
            scroll: 0.0,
            scene_dirty: false,
            cues: Vec::new(),
            events: Vec::new(),
            sfx_gate: SfxGate::default(),
            pause_started_ms: None,
            ticks: 0,
        }
    }

    pub fn mode(&self) -> Option<Mode> {
        self.state.mode
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn prefs(&self) -> &Preferences {
        &self.state.prefs
    }

    pub fn current_view(&self) -> Option<ViewKind> {
        self.state.current_view
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn dimmer(&self) -> &SensoryDimmer {
        &self.dimmer
    }

    pub fn session_identifier(&self) -> Option<&str> {
        self.state.session_identifier.as_deref()
    }

    pub fn entity_count(&self) -> usize {
        match &self.view {
            Some(ActiveView::Activity(activity)) => activity.entity_count(),
            _ => 0,
        }
    }

    pub fn tuning(&self) -> Tuning {
        self.state.tuning(self.dimmer.is_high_intensity())
    }

    /// Begin a session. `stamp` is the local date used in the session id.
    pub fn start(&mut self, mode: Mode, now_ms: f64, stamp: DateStamp) {
        if self.state.session_running {
            self.end(now_ms);
        }
        self.state.reset(now_ms);
        self.state.mode = Some(mode);
        self.state.session_running = true;
        self.state.session_started_ms = Some(now_ms);
        self.ticks = 0;

        let id = session_identifier(&mut self.rng, stamp);
        log::info!("[mode] {} session {}", mode, id);
        self.state.session_identifier = Some(id.clone());
        self.events.push(AnalyticsEvent::SessionStart {
            session_identifier: id,
            mode,
            duration_selected: self.state.prefs.duration,
            atmosphere: self.state.prefs.sound,
            sfx_enabled: self.state.prefs.sfx_enabled,
            behavior_pattern: self.state.prefs.behavior_pattern,
            auto_switch_mode: self.state.prefs.auto_switch_mode,
            visual_density: self.state.prefs.visual_density,
        });

        match mode {
            Mode::Activities => {
                self.timer = SessionTimer::new(self.state.prefs.duration);
                self.timer.start(now_ms, true);
                self.dimmer = SensoryDimmer::new(
                    self.state.prefs.sensory_dimmer_mode,
                    self.state.prefs.duration,
                );
                self.dimmer.reset(now_ms);
                let first = ViewKind::ACTIVITIES[self.rng.gen_range(0..ViewKind::ACTIVITIES.len())];
                self.activate(first, now_ms, Transition::SessionStart);
            }
            Mode::Story => {
                self.timer.stop();
                self.scroll = 0.0;
                self.activate(ViewKind::Forest, now_ms, Transition::SessionStart);
            }
        }
    }

    /// Stop the session and return to the start screen.
    pub fn end(&mut self, now_ms: f64) {
        if self.state.mode.is_none() {
            return;
        }
        if self.state.session_running {
            self.events.push(AnalyticsEvent::SessionEnd {
                duration_selected: self.state.prefs.duration,
                actual_duration: self.state.actual_minutes(now_ms),
                completed: false,
                atmosphere: self.state.prefs.sound,
            });
        }
        log::info!("[mode] session ended");
        self.cues.push(Cue::SynthStop);
        self.view = None;
        self.timer.stop();
        self.scenes.clear();
        self.scene_dirty = false;
        self.pause_started_ms = None;
        self.state.reset(now_ms);
    }

    pub fn handle_input(&mut self, kind: InputKind, point: Vec2, now_ms: f64) {
        if self.state.mode != Some(Mode::Activities) || !self.state.is_live() {
            return;
        }
        if kind == InputKind::End {
            self.cues.push(Cue::SynthStop);
            self.with_activity(now_ms, |activity, frame| activity.pointer_end(frame));
            return;
        }

        self.state.touch(now_ms);
        let y_ratio = self.surface.y_ratio(point.y);
        match kind {
            InputKind::Start => {
                self.events.push(AnalyticsEvent::UserEngagement {
                    activity: Engagement::UserInteraction,
                });
                self.with_activity(now_ms, |activity, frame| {
                    activity.pointer_start(point, frame)
                });
            }
            InputKind::Move => {
                self.cues.push(Cue::SynthUpdate { y_ratio });
                self.with_activity(now_ms, |activity, frame| activity.pointer_move(point, frame));
            }
            InputKind::End => {}
        }
    }

    /// One animation frame. Returns a display list when the canvas should be
    /// redrawn: every live frame for activities, and only after a change for
    /// story scenes.
    pub fn update(&mut self, now_ms: f64) -> Option<DisplayList> {
        match self.state.mode? {
            Mode::Activities => {
                if !self.state.is_live() {
                    return None;
                }
                let list = self.with_activity(now_ms, |activity, frame| activity.update(frame));
                self.check_idle(now_ms);
                list
            }
            Mode::Story => {
                if !self.scene_dirty {
                    return None;
                }
                let Some(ActiveView::Scene(kind)) = &self.view else {
                    return None;
                };
                let list = self.scenes.get(*kind, self.surface, self.scroll).cloned();
                self.scene_dirty = false;
                list
            }
        }
    }

    fn check_idle(&mut self, now_ms: f64) {
        let idle = self.state.idle_ms(now_ms);
        if idle > GHOST_INTERACTION_TIME_MS && self.rng.gen::<f64>() < IDLE_INTERACTION_CHANCE {
            self.with_activity(now_ms, |activity, frame| activity.ghost(frame));
            self.events.push(AnalyticsEvent::UserEngagement {
                activity: Engagement::GhostInteraction,
            });
        }
        let Some(threshold) = self.state.prefs.auto_switch_mode.idle_switch_ms() else {
            return;
        };
        if idle > threshold {
            self.switch_to_random(now_ms);
            self.state.last_interaction_ms = now_ms - GHOST_INTERACTION_TIME_MS;
            self.events.push(AnalyticsEvent::UserEngagement {
                activity: Engagement::AutoSwitch,
            });
        }
    }

    fn switch_to_random(&mut self, now_ms: f64) {
        let current = self.state.current_view;
        let choices: Vec<ViewKind> = ViewKind::ACTIVITIES
            .iter()
            .copied()
            .filter(|v| Some(*v) != current)
            .collect();
        let next = choices[self.rng.gen_range(0..choices.len())];
        log::debug!("[mode] idle auto-switch to {}", next);
        self.activate(next, now_ms, Transition::AutoSwitch);
    }

    /// Switch within the current mode. Returns false, leaving everything as
    /// it was, when the view belongs to the other mode or no session runs.
    pub fn switch_view(&mut self, view: ViewKind, now_ms: f64) -> bool {
        let Some(mode) = self.state.mode else {
            log::warn!("[mode] no session; ignoring switch to {}", view);
            return false;
        };
        if view.mode() != mode {
            log::warn!("[mode] cannot switch to {} in {} mode", view, mode);
            return false;
        }
        let transition = match mode {
            Mode::Activities => Transition::UserSwitch,
            Mode::Story => Transition::AdminSwitch,
        };
        self.activate(view, now_ms, transition);
        true
    }

    pub fn next_scene(&mut self, now_ms: f64) -> bool {
        match self.state.current_view {
            Some(v) if v.is_scene() => self.switch_view(scenes::next_scene(v), now_ms),
            _ => false,
        }
    }

    pub fn previous_scene(&mut self, now_ms: f64) -> bool {
        match self.state.current_view {
            Some(v) if v.is_scene() => self.switch_view(scenes::previous_scene(v), now_ms),
            _ => false,
        }
    }

    /// Replace the active view with a fresh one; its entities start empty.
    fn activate(&mut self, view: ViewKind, now_ms: f64, transition: Transition) {
        log::info!("[mode] view -> {}", view);
        self.state.current_view = Some(view);
        match new_activity(view) {
            Some(activity) => {
                self.view = Some(ActiveView::Activity(activity));
                self.with_activity(now_ms, |activity, frame| activity.init(frame));
            }
            None => {
                self.view = Some(ActiveView::Scene(view));
                self.scene_dirty = true;
            }
        }
        if !self.state.session_running {
            return;
        }
        if view.is_activity() && transition != Transition::SessionStart {
            self.events.push(AnalyticsEvent::ActivitySwitch { view });
        }
        self.events
            .push(AnalyticsEvent::VirtualPageView { view, transition });
    }

    fn with_activity<T>(
        &mut self,
        now_ms: f64,
        f: impl FnOnce(&mut dyn Activity, &mut Frame<'_>) -> T,
    ) -> Option<T> {
        let tuning = self.tuning();
        let Some(ActiveView::Activity(activity)) = self.view.as_mut() else {
            return None;
        };
        let mut frame = Frame {
            surface: self.surface,
            now_ms,
            tuning,
            rng: &mut self.rng,
            cues: &mut self.cues,
        };
        Some(f(activity.as_mut(), &mut frame))
    }

    /// New canvas size. Story scenes are redrawn at the next frame.
    pub fn resize(&mut self, surface: Surface) {
        if surface == self.surface {
            return;
        }
        self.surface = surface;
        self.scenes.clear();
        if matches!(self.view, Some(ActiveView::Scene(_))) {
            self.scene_dirty = true;
        }
    }

    /// The canvas was cleared without a size change; repaint the story scene.
    pub fn invalidate(&mut self) {
        if matches!(self.view, Some(ActiveView::Scene(_))) {
            self.scene_dirty = true;
        }
    }

    /// Scroll the story world horizontally; wraps every three screens.
    pub fn scroll_by(&mut self, dx: f32) {
        if !matches!(self.view, Some(ActiveView::Scene(_))) {
            return;
        }
        let world = scenes::world_width(self.surface);
        self.scroll = scenes::wrap_x(self.scroll + dx, world);
        self.scene_dirty = true;
    }

    /// The one-second tick: timer, sunset fade and dimmer phase. Only
    /// activities sessions have a timer.
    pub fn tick(&mut self, now_ms: f64) -> Option<TimerTick> {
        if self.state.mode != Some(Mode::Activities) || !self.state.is_live() {
            return None;
        }
        self.ticks += 1;
        if self.ticks % ENGAGEMENT_PING_SECS == 0 {
            self.events.push(AnalyticsEvent::UserEngagement {
                activity: Engagement::SessionActive,
            });
        }

        let elapsed_ms = self.timer.elapsed_secs(now_ms) * 1000.0;
        if let Some(change) = self.dimmer.update(elapsed_ms, now_ms) {
            self.state.apply_phase(change);
        }

        let tick = self.timer.tick(
            now_ms,
            self.dimmer.multipliers().volume,
            self.state.prefs.sound != SoundType::Off,
        );
        if tick.completed {
            self.events.push(AnalyticsEvent::SessionEnd {
                duration_selected: self.state.prefs.duration,
                actual_duration: self.state.actual_minutes(now_ms),
                completed: true,
                atmosphere: self.state.prefs.sound,
            });
            self.state.session_running = false;
            self.cues.push(Cue::SynthStop);
        }
        Some(tick)
    }

    /// Timer label, `None` outside activities sessions.
    pub fn timer_text(&self, now_ms: f64) -> Option<String> {
        if self.state.mode != Some(Mode::Activities) {
            return None;
        }
        Some(self.timer.display_text(now_ms))
    }

    /// Flip pause. Returns the new paused state, or `None` with no session.
    pub fn toggle_pause(&mut self, now_ms: f64) -> Option<bool> {
        if !self.state.session_running {
            return None;
        }
        self.state.paused = !self.state.paused;
        if self.state.paused {
            self.timer.pause(now_ms);
            self.pause_started_ms = Some(now_ms);
            self.cues.push(Cue::SynthStop);
        } else {
            self.timer.resume(now_ms);
            if let Some(started) = self.pause_started_ms.take() {
                self.events.push(AnalyticsEvent::SessionPause {
                    pause_secs: ((now_ms - started).max(0.0) / 1000.0).round() as u32,
                });
            }
        }
        Some(self.state.paused)
    }

    /// Apply a settings change. Returns true when a value changed.
    pub fn apply_setting(&mut self, setting: Setting) -> bool {
        let Some(event) = self.state.prefs.apply(setting) else {
            return false;
        };
        log::info!("[settings] {:?}", setting);
        match setting {
            Setting::Duration(_) => {
                self.timer.set_duration(self.state.prefs.duration);
                self.dimmer.set_session_minutes(self.state.prefs.duration);
            }
            Setting::Behavior(_) | Setting::Emergent(_) => self.state.sync_behavior_from_prefs(),
            Setting::Dimmer(mode) => self.dimmer.set_mode(mode),
            Setting::Sfx(false) => self.cues.push(Cue::SynthStop),
            _ => {}
        }
        self.events.push(event);
        true
    }

    /// Cues for the front-end. Sound cues are dropped while effects are off,
    /// and clacks are debounced.
    pub fn drain_cues(&mut self, now_ms: f64) -> Vec<Cue> {
        let sfx_on = self.state.prefs.sfx_enabled;
        let gate = &mut self.sfx_gate;
        self.cues
            .drain(..)
            .filter(|cue| match cue {
                Cue::Haptic(_) => true,
                Cue::SynthStop => true,
                Cue::Sfx(sfx) => sfx_on && gate.allow(*sfx, now_ms),
                Cue::SynthStart { .. } | Cue::SynthUpdate { .. } => sfx_on,
            })
            .collect()
    }

    pub fn drain_events(&mut self) -> Vec<AnalyticsEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn admin_snapshot(&self, audio_state: Option<String>) -> AdminSnapshot {
        AdminSnapshot {
            session_running: self.state.session_running,
            view: self.state.current_view,
            paused: self.state.paused,
            audio_state,
            entity_count: self.entity_count(),
        }
    }
}
