// Host-side tests for the mode manager: sessions, switching, idle handling
// and the one-second tick.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use slowtide_core::activities::{Cue, Surface};
use slowtide_core::analytics::{AnalyticsEvent, DateStamp, Engagement, Transition};
use slowtide_core::modes::{InputKind, ModeManager};
use slowtide_core::prefs::Setting;
use slowtide_core::*;

const STAMP: DateStamp = DateStamp {
    month: 3,
    day: 14,
    hour: 9,
    minute: 15,
};

fn quiet_prefs() -> Preferences {
    Preferences {
        sensory_dimmer_mode: DimmerMode::Off,
        ..Preferences::default()
    }
}

fn manager(prefs: Preferences) -> ModeManager {
    ModeManager::new(prefs, Surface::new(800.0, 600.0), StdRng::seed_from_u64(1), 0.0)
}

fn engagements(events: &[AnalyticsEvent], kind: Engagement) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, AnalyticsEvent::UserEngagement { activity } if *activity == kind))
        .count()
}

#[test]
fn activities_start_picks_an_activity_and_reports_it() {
    let mut m = manager(quiet_prefs());
    m.start(Mode::Activities, 0.0, STAMP);

    assert_eq!(m.mode(), Some(Mode::Activities));
    assert!(m.current_view().unwrap().is_activity());
    assert!(m.timer().is_running());

    let events = m.drain_events();
    assert!(matches!(events[0], AnalyticsEvent::SessionStart { mode: Mode::Activities, .. }));
    assert!(matches!(
        events[1],
        AnalyticsEvent::VirtualPageView {
            transition: Transition::SessionStart,
            ..
        }
    ));
    assert!(!events
        .iter()
        .any(|e| matches!(e, AnalyticsEvent::ActivitySwitch { .. })));

    let id = m.session_identifier().unwrap();
    let parts: Vec<&str> = id.split('-').collect();
    assert_eq!(parts.len(), 5);
    assert_eq!(parts[3], "0314");
    assert_eq!(parts[4], "0915");
}

#[test]
fn story_starts_in_the_forest_without_a_timer() {
    let mut m = manager(quiet_prefs());
    m.start(Mode::Story, 0.0, STAMP);
    assert_eq!(m.current_view(), Some(ViewKind::Forest));
    assert!(!m.timer().is_running());
    assert!(m.timer_text(0.0).is_none());
    assert!(m.tick(1_000.0).is_none());

    assert!(m.next_scene(10.0));
    assert_eq!(m.current_view(), Some(ViewKind::Beach));
    assert!(m.previous_scene(20.0));
    assert!(m.previous_scene(30.0));
    assert_eq!(m.current_view(), Some(ViewKind::Lake));
}

#[test]
fn views_stay_within_their_mode() {
    let mut m = manager(quiet_prefs());
    assert!(!m.switch_view(ViewKind::Marbles, 0.0));

    m.start(Mode::Story, 0.0, STAMP);
    assert!(!m.switch_view(ViewKind::Marbles, 10.0));
    assert_eq!(m.current_view(), Some(ViewKind::Forest));

    m.start(Mode::Activities, 20.0, STAMP);
    let before = m.current_view();
    assert!(!m.switch_view(ViewKind::Night, 30.0));
    assert_eq!(m.current_view(), before);
    assert!(!m.next_scene(40.0));
}

#[test]
fn user_switch_is_reported() {
    let mut m = manager(quiet_prefs());
    m.start(Mode::Activities, 0.0, STAMP);
    m.drain_events();

    assert!(m.switch_view(ViewKind::Marbles, 100.0));
    assert_eq!(m.entity_count(), MARBLE_COUNT);
    let events = m.drain_events();
    assert!(matches!(
        events[0],
        AnalyticsEvent::ActivitySwitch {
            view: ViewKind::Marbles
        }
    ));
    assert!(matches!(
        events[1],
        AnalyticsEvent::VirtualPageView {
            view: ViewKind::Marbles,
            transition: Transition::UserSwitch
        }
    ));
}

#[test]
fn story_redraws_only_after_a_change() {
    let mut m = manager(quiet_prefs());
    m.start(Mode::Story, 0.0, STAMP);
    assert!(m.update(16.0).is_some());
    assert!(m.update(32.0).is_none());

    m.resize(Surface::new(1024.0, 768.0));
    assert!(m.update(48.0).is_some());
    assert!(m.update(64.0).is_none());

    m.scroll_by(120.0);
    assert!(m.update(80.0).is_some());

    m.next_scene(90.0);
    assert!(m.update(96.0).is_some());
}

#[test]
fn invalidated_story_repaints_at_the_same_size() {
    let mut m = manager(quiet_prefs());
    m.start(Mode::Story, 0.0, STAMP);
    assert!(m.update(16.0).is_some());

    m.resize(Surface::new(800.0, 600.0));
    assert!(m.update(32.0).is_none());

    m.invalidate();
    assert!(m.update(48.0).is_some());
    assert!(m.update(64.0).is_none());
}

#[test]
fn invalidate_outside_story_draws_nothing_extra() {
    let mut m = manager(quiet_prefs());
    m.invalidate();
    assert!(m.update(16.0).is_none());
}

#[test]
fn story_ignores_pointer_input() {
    let mut m = manager(quiet_prefs());
    m.start(Mode::Story, 0.0, STAMP);
    m.drain_events();
    m.handle_input(InputKind::Start, Vec2::new(100.0, 100.0), 10.0);
    assert!(m.drain_events().is_empty());
    assert!(m.drain_cues(10.0).is_empty());
}

#[test]
fn idle_auto_switch_after_thirty_seconds() {
    let mut m = manager(quiet_prefs());
    m.start(Mode::Activities, 0.0, STAMP);
    let first = m.current_view();
    m.drain_events();

    assert!(m.update(31_000.0).is_some());
    assert_ne!(m.current_view(), first);
    let events = m.drain_events();
    assert_eq!(engagements(&events, Engagement::AutoSwitch), 1);
    assert!(events.iter().any(|e| matches!(
        e,
        AnalyticsEvent::VirtualPageView {
            transition: Transition::AutoSwitch,
            ..
        }
    )));
    assert_eq!(m.state().idle_ms(31_000.0), GHOST_INTERACTION_TIME_MS);
}

#[test]
fn auto_switch_off_keeps_the_view() {
    let mut m = manager(Preferences {
        auto_switch_mode: AutoSwitchMode::Off,
        ..quiet_prefs()
    });
    m.start(Mode::Activities, 0.0, STAMP);
    let first = m.current_view();
    m.update(200_000.0);
    assert_eq!(m.current_view(), first);
}

#[test]
fn ghosts_only_appear_after_two_idle_seconds() {
    let mut m = manager(quiet_prefs());
    m.start(Mode::Activities, 0.0, STAMP);
    m.drain_events();

    let mut now = 0.0;
    while now < 1_900.0 {
        now += 16.0;
        m.update(now);
    }
    assert_eq!(engagements(&m.drain_events(), Engagement::GhostInteraction), 0);

    now = 2_100.0;
    while now < 29_000.0 {
        now += 16.0;
        m.update(now);
    }
    assert!(engagements(&m.drain_events(), Engagement::GhostInteraction) > 0);
}

#[test]
fn pointer_drives_the_synth() {
    let mut m = manager(quiet_prefs());
    m.start(Mode::Activities, 0.0, STAMP);
    m.switch_view(ViewKind::Particles, 0.0);
    m.drain_events();
    m.drain_cues(0.0);

    m.handle_input(InputKind::Start, Vec2::new(400.0, 300.0), 10.0);
    assert_eq!(engagements(&m.drain_events(), Engagement::UserInteraction), 1);
    assert_eq!(m.state().idle_ms(10.0), 0.0);

    m.handle_input(InputKind::Move, Vec2::new(400.0, 300.0), 20.0);
    assert!(m
        .drain_cues(20.0)
        .contains(&Cue::SynthUpdate { y_ratio: 0.5 }));

    m.handle_input(InputKind::End, Vec2::new(400.0, 300.0), 30.0);
    assert!(m.drain_cues(30.0).contains(&Cue::SynthStop));
}

#[test]
fn effects_off_silences_sound_cues() {
    let mut m = manager(quiet_prefs());
    m.start(Mode::Activities, 0.0, STAMP);
    m.switch_view(ViewKind::Particles, 0.0);
    assert!(m.apply_setting(Setting::Sfx(false)));
    m.drain_cues(0.0);

    m.handle_input(InputKind::Start, Vec2::new(400.0, 300.0), 10.0);
    m.handle_input(InputKind::Move, Vec2::new(410.0, 310.0), 20.0);
    let cues = m.drain_cues(20.0);
    assert!(cues
        .iter()
        .all(|c| matches!(c, Cue::Haptic(_) | Cue::SynthStop)));
}

#[test]
fn end_returns_to_start_screen() {
    let mut m = manager(quiet_prefs());
    m.start(Mode::Activities, 0.0, STAMP);
    m.drain_events();
    m.end(120_000.0);

    assert_eq!(m.mode(), None);
    assert_eq!(m.current_view(), None);
    assert!(!m.state().session_running);
    assert_eq!(m.entity_count(), 0);
    let events = m.drain_events();
    assert!(matches!(
        events[0],
        AnalyticsEvent::SessionEnd {
            actual_duration: 2,
            completed: false,
            ..
        }
    ));
    assert!(m.drain_cues(120_000.0).contains(&Cue::SynthStop));
}

#[test]
fn one_minute_session_completes() {
    let mut m = manager(Preferences {
        duration: 1,
        auto_switch_mode: AutoSwitchMode::Off,
        ..quiet_prefs()
    });
    m.start(Mode::Activities, 0.0, STAMP);
    m.drain_events();

    assert!(!m.tick(30_000.0).unwrap().completed);
    let tick = m.tick(61_000.0).unwrap();
    assert!(tick.completed);
    assert!(!m.state().session_running);
    assert!(m.drain_events().iter().any(|e| matches!(
        e,
        AnalyticsEvent::SessionEnd {
            completed: true,
            ..
        }
    )));
    assert!(m.tick(62_000.0).is_none());
    assert!(m.update(62_000.0).is_none());
}

#[test]
fn pause_freezes_the_session() {
    let mut m = manager(quiet_prefs());
    m.start(Mode::Activities, 0.0, STAMP);
    m.drain_events();

    assert_eq!(m.toggle_pause(10_000.0), Some(true));
    assert!(m.timer_text(20_000.0).unwrap().ends_with("(PAUSED)"));
    assert!(m.tick(20_000.0).is_none());
    assert!(m.update(20_000.0).is_none());

    assert_eq!(m.toggle_pause(14_000.0), Some(false));
    let events = m.drain_events();
    assert!(matches!(events[0], AnalyticsEvent::SessionPause { pause_secs: 4 }));
    assert_eq!(m.timer().elapsed_secs(14_000.0), 10.0);

    let mut idle = manager(quiet_prefs());
    assert_eq!(idle.toggle_pause(0.0), None);
}

#[test]
fn duration_setting_reaches_the_timer() {
    let mut m = manager(quiet_prefs());
    m.start(Mode::Activities, 0.0, STAMP);
    m.drain_events();

    assert!(m.apply_setting(Setting::Duration(30)));
    assert_eq!(m.timer().duration_secs(), 1_800.0);
    assert!(!m.apply_setting(Setting::Duration(30)));
    let events = m.drain_events();
    assert!(matches!(events[0], AnalyticsEvent::DurationChange { from: 90, to: 30 }));
}

#[test]
fn dimmer_phase_rewrites_behaviour() {
    let mut m = manager(Preferences {
        duration: 3,
        sensory_dimmer_mode: DimmerMode::Auto,
        auto_switch_mode: AutoSwitchMode::Off,
        ..Preferences::default()
    });
    m.start(Mode::Activities, 0.0, STAMP);
    assert!(m.tuning().high_intensity);

    m.tick(70_000.0);
    assert_eq!(m.dimmer().phase(), EngagementPhase::Medium);
    assert_eq!(m.state().behavior, BehaviorPattern::Rhythm);
    assert!(!m.tuning().high_intensity);
}

#[test]
fn ping_every_thirty_ticks() {
    let mut m = manager(Preferences {
        auto_switch_mode: AutoSwitchMode::Off,
        ..quiet_prefs()
    });
    m.start(Mode::Activities, 0.0, STAMP);
    m.drain_events();
    for s in 1..=60 {
        m.tick(s as f64 * 1_000.0);
    }
    assert_eq!(engagements(&m.drain_events(), Engagement::SessionActive), 2);
}

#[test]
fn admin_snapshot_reflects_session() {
    let mut m = manager(quiet_prefs());
    m.start(Mode::Activities, 0.0, STAMP);
    m.switch_view(ViewKind::Marbles, 0.0);
    let snap = m.admin_snapshot(Some("running".into()));
    assert!(snap.session_running);
    assert_eq!(snap.view, Some(ViewKind::Marbles));
    assert_eq!(snap.entity_count, MARBLE_COUNT);
}
