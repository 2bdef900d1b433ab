//! Browser-side application: binds the mode manager to the DOM, the canvas
//! renderer, the audio engine, storage and analytics.

use crate::analytics::GtagSink;
use crate::audio::AudioEngine;
use crate::canvas::Canvas2d;
use crate::constants::*;
use crate::dom;
use crate::storage::BrowserStore;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use slowtide_core::admin::AdminPanel;
use slowtide_core::analytics::{AnalyticsSink, DateStamp};
use slowtide_core::gate::{MathsChallenge, TitleTapCounter, Verdict};
use slowtide_core::modes::{InputKind, ModeManager};
use slowtide_core::prefs::{PreferenceStore, Setting};
use slowtide_core::{Mode, Preferences, ViewKind};
use web_sys as web;

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

fn date_stamp() -> DateStamp {
    let d = js_sys::Date::new_0();
    DateStamp {
        month: d.get_month() + 1,
        day: d.get_date(),
        hour: d.get_hours(),
        minute: d.get_minutes(),
    }
}

pub struct App {
    document: web::Document,
    manager: ModeManager,
    renderer: Canvas2d,
    audio: AudioEngine,
    store: PreferenceStore<BrowserStore>,
    sink: GtagSink,
    taps: TitleTapCounter,
    challenge: MathsChallenge,
    admin: AdminPanel,
    gate_rng: StdRng,
    shown_view: Option<ViewKind>,
}

impl App {
    pub fn new(document: web::Document, canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let renderer = Canvas2d::new(canvas)?;
        let store = PreferenceStore::new(BrowserStore::open());
        let prefs = store.load();
        log::info!(
            "[prefs] {} min, sound {}, sfx {}",
            prefs.duration,
            prefs.sound,
            prefs.sfx_enabled
        );
        let manager = ModeManager::new(
            prefs,
            renderer.surface(),
            StdRng::from_entropy(),
            now_ms(),
        );
        let app = Self {
            document,
            manager,
            renderer,
            audio: AudioEngine::new(StdRng::from_entropy()),
            store,
            sink: GtagSink,
            taps: TitleTapCounter::default(),
            challenge: MathsChallenge::default(),
            admin: AdminPanel::default(),
            gate_rng: StdRng::from_entropy(),
            shown_view: None,
        };
        app.sync_settings_buttons();
        Ok(app)
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        self.renderer.canvas()
    }

    pub fn mode(&self) -> Option<Mode> {
        self.manager.mode()
    }

    fn prefs(&self) -> &Preferences {
        self.manager.prefs()
    }

    /// Start button: hide the start screen and begin a session.
    pub fn begin(&mut self, mode: Mode) {
        let now = now_ms();
        dom::hide(&self.document, START_SCREEN_ID);
        self.resize();
        match mode {
            Mode::Activities => {
                dom::set_display(&self.document, NAV_BAR_ID, "flex");
                dom::set_display(&self.document, TIMER_DISPLAY_ID, "block");
                let sound = self.prefs().sound;
                self.audio.start_ambient(sound);
            }
            Mode::Story => {
                dom::set_display(&self.document, NAV_BAR_ID, "none");
                dom::set_display(&self.document, TIMER_DISPLAY_ID, "none");
            }
        }
        self.manager.start(mode, now, date_stamp());
        if let Some(id) = self.manager.session_identifier() {
            dom::set_text(&self.document, SESSION_ID_ID, &format!("Session ID: {}", id));
        }
        self.refresh_timer(now);
        self.flush(now);
    }

    /// Called when the nav bar should become visible after its fade delay.
    pub fn reveal_nav(&self) {
        if self.mode() == Some(Mode::Activities) {
            dom::set_opacity(&self.document, NAV_BAR_ID, 1.0);
        }
    }

    /// One animation frame.
    pub fn frame(&mut self, now: f64) {
        if let Some(list) = self.manager.update(now) {
            self.renderer.draw(&list);
        }
        self.flush(now);
    }

    /// The one-second interval: timer, sunset, dimmer, admin overlay.
    pub fn tick(&mut self, now: f64) {
        if let Some(tick) = self.manager.tick(now) {
            if let Some(opacity) = tick.overlay_opacity {
                if !self.admin.sunset_forced() {
                    dom::set_opacity(&self.document, SUNSET_OVERLAY_ID, opacity);
                }
            }
            if let Some(gain) = tick.ambient_gain {
                self.audio.set_ambient_gain(gain);
            }
            if tick.completed {
                log::info!("[timer] session complete");
            }
        }
        self.refresh_timer(now);
        self.refresh_admin();
        self.flush(now);
    }

    fn refresh_timer(&self, now: f64) {
        if let Some(text) = self.manager.timer_text(now) {
            dom::set_text(&self.document, TIMER_DISPLAY_ID, &text);
        }
    }

    /// Play queued cues and forward analytics.
    fn flush(&mut self, now: f64) {
        for cue in self.manager.drain_cues(now) {
            self.audio.play(cue);
        }
        self.sink.send_all(self.manager.drain_events());
        let view = self.manager.current_view();
        if view != self.shown_view {
            self.highlight_nav(view);
            self.shown_view = view;
        }
    }

    fn highlight_nav(&self, view: Option<ViewKind>) {
        for el in dom::query_all(&self.document, &format!(".{}", NAV_BUTTON_CLASS)) {
            let on = view.map_or(false, |v| el.id() == format!("btn-{}", v));
            _ = el.class_list().toggle_with_force(ACTIVE_CLASS, on);
        }
    }

    pub fn resize(&mut self) {
        if let Some(surface) = self.renderer.resize() {
            self.manager.resize(surface);
            self.manager.invalidate();
        }
    }

    pub fn pointer(&mut self, kind: InputKind, point: Vec2) {
        let now = now_ms();
        self.manager.handle_input(kind, point, now);
        self.flush(now);
    }

    pub fn scroll_story(&mut self, dx: f32) {
        self.manager.scroll_by(dx);
    }

    pub fn switch_view(&mut self, view: ViewKind) {
        let now = now_ms();
        if self.manager.switch_view(view, now) {
            self.flush(now);
        }
    }

    // ---- parent gate and settings ----

    pub fn title_tap(&mut self) {
        if !self.taps.tap(now_ms()) {
            return;
        }
        let question = self.challenge.begin(&mut self.gate_rng);
        dom::set_text(&self.document, MATHS_QUESTION_ID, &question.prompt());
        dom::set_text(&self.document, MATHS_FEEDBACK_ID, "");
        dom::set_display(&self.document, MATHS_MODAL_ID, "block");
        dom::focus(&self.document, MATHS_ANSWER_ID);
    }

    pub fn submit_answer(&mut self) {
        let typed = dom::take_input_value(&self.document, MATHS_ANSWER_ID).unwrap_or_default();
        match self.challenge.submit(&typed, &mut self.gate_rng) {
            Ok(Verdict::Correct) => {
                dom::set_display(&self.document, MATHS_MODAL_ID, "none");
                self.sync_settings_buttons();
                dom::set_display(&self.document, SETTINGS_MODAL_ID, "block");
            }
            Ok(Verdict::Wrong) => {
                if let Some(q) = self.challenge.question() {
                    dom::set_text(&self.document, MATHS_QUESTION_ID, &q.prompt());
                }
                dom::set_text(&self.document, MATHS_FEEDBACK_ID, "Not quite. Try this one.");
            }
            Err(e) => {
                log::debug!("[gate] {}", e);
                dom::set_text(&self.document, MATHS_FEEDBACK_ID, "Please enter a number.");
            }
        }
        dom::focus(&self.document, MATHS_ANSWER_ID);
    }

    pub fn cancel_challenge(&mut self) {
        self.challenge.cancel();
        dom::set_display(&self.document, MATHS_MODAL_ID, "none");
    }

    pub fn close_settings(&self) {
        dom::set_display(&self.document, SETTINGS_MODAL_ID, "none");
    }

    /// A settings button was pressed.
    pub fn change_setting(&mut self, name: &str, value: &str) {
        let setting = match Setting::parse(name, value) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("[settings] {}", e);
                return;
            }
        };
        if !self.manager.apply_setting(setting) {
            return;
        }
        self.store.save(self.prefs());
        if let Setting::Sound(sound) = setting {
            let state = self.manager.state();
            if state.session_running && !state.paused {
                self.audio.start_ambient(sound);
            }
        }
        self.sync_settings_buttons();
        let now = now_ms();
        self.refresh_timer(now);
        self.flush(now);
    }

    fn sync_settings_buttons(&self) {
        let p = self.prefs();
        let selected = [
            ("duration", p.duration.to_string()),
            ("sound", p.sound.to_string()),
            ("sfx", if p.sfx_enabled { "on" } else { "off" }.to_string()),
            ("behavior", p.behavior_pattern.to_string()),
            ("autoswitch", p.auto_switch_mode.to_string()),
            ("density", p.visual_density.to_string()),
            ("emergent", p.emergent_events.to_string()),
            ("dimmer", p.sensory_dimmer_mode.to_string()),
        ];
        for (name, value) in selected {
            let selector = format!("{}[data-setting=\"{}\"]", SETTING_BUTTON_SELECTOR, name);
            dom::mark_selected(&self.document, &selector, "data-value", &value);
        }
    }

    pub fn toggle_pause(&mut self) {
        let now = now_ms();
        let Some(paused) = self.manager.toggle_pause(now) else {
            return;
        };
        let (label, class) = if paused {
            self.audio.suspend();
            ("Resume Session", "action-btn resume-btn")
        } else {
            self.audio.resume();
            ("Pause Session", "action-btn pause-btn")
        };
        dom::set_text(&self.document, PAUSE_BUTTON_ID, label);
        if let Some(btn) = self.document.get_element_by_id(PAUSE_BUTTON_ID) {
            btn.set_class_name(class);
        }
        self.refresh_timer(now);
        self.flush(now);
    }

    pub fn show_quit_confirm(&self) {
        dom::set_display(&self.document, SETTINGS_MODAL_ID, "none");
        dom::set_display(&self.document, CONFIRM_MODAL_ID, "block");
    }

    pub fn cancel_quit(&self) {
        dom::set_display(&self.document, CONFIRM_MODAL_ID, "none");
        dom::set_display(&self.document, SETTINGS_MODAL_ID, "block");
    }

    /// Confirmed quit: back to the start screen with preferences kept.
    pub fn reset(&mut self) {
        let now = now_ms();
        dom::set_display(&self.document, CONFIRM_MODAL_ID, "none");
        self.manager.end(now);
        self.flush(now);
        self.audio.stop_all();
        self.renderer.clear();
        dom::set_opacity(&self.document, SUNSET_OVERLAY_ID, 0.0);
        dom::set_display(&self.document, NAV_BAR_ID, "none");
        dom::set_opacity(&self.document, NAV_BAR_ID, 0.0);
        dom::set_display(&self.document, TIMER_DISPLAY_ID, "none");
        dom::set_text(&self.document, SESSION_ID_ID, "");
        dom::set_text(&self.document, PAUSE_BUTTON_ID, "Pause Session");
        if let Some(btn) = self.document.get_element_by_id(PAUSE_BUTTON_ID) {
            btn.set_class_name("action-btn pause-btn");
        }
        dom::show(&self.document, START_SCREEN_ID);
        dom::set_display(&self.document, START_SCREEN_ID, "flex");
        self.refresh_admin();
    }

    // ---- admin overlay ----

    pub fn toggle_admin(&mut self) {
        if self.admin.toggle() {
            dom::show(&self.document, ADMIN_OVERLAY_ID);
            self.refresh_admin();
        } else {
            dom::hide(&self.document, ADMIN_OVERLAY_ID);
        }
    }

    pub fn admin_visible(&self) -> bool {
        self.admin.is_visible()
    }

    fn refresh_admin(&self) {
        if !self.admin.is_visible() {
            return;
        }
        let snapshot = self.manager.admin_snapshot(self.audio.state_label());
        for (id, text) in snapshot.rows() {
            dom::set_text(&self.document, id, &text);
        }
    }

    pub fn admin_force_sunset(&mut self) {
        let opacity = self.admin.toggle_sunset();
        dom::set_opacity(&self.document, SUNSET_OVERLAY_ID, opacity);
        dom::set_text(&self.document, ADMIN_SUNSET_ID, self.admin.sunset_label());
        dom::toggle_class(
            &self.document,
            ADMIN_SUNSET_ID,
            ACTIVE_CLASS,
            self.admin.sunset_forced(),
        );
    }

    pub fn admin_cycle_scene(&mut self, forward: bool) {
        let now = now_ms();
        let moved = if forward {
            self.manager.next_scene(now)
        } else {
            self.manager.previous_scene(now)
        };
        if moved {
            self.flush(now);
            self.refresh_admin();
        }
    }
}
