// Host-side tests for the parent gate, analytics events and admin overlay.

use rand::rngs::StdRng;
use rand::SeedableRng;
use slowtide_core::admin::AdminPanel;
use slowtide_core::analytics::*;
use slowtide_core::gate::*;
use slowtide_core::*;

#[test]
fn slow_taps_restart_the_count() {
    let mut taps = TitleTapCounter::default();
    let mut now = 0.0;
    for _ in 0..4 {
        assert!(!taps.tap(now));
        now += 400.0;
    }
    now += 200.0;
    assert!(!taps.tap(now));
    assert_eq!(taps.count(), 1);
    for _ in 0..4 {
        now += 100.0;
        taps.tap(now);
    }
    assert_eq!(taps.count(), 0);
}

#[test]
fn tap_exactly_on_window_still_counts() {
    let mut taps = TitleTapCounter::default();
    taps.tap(0.0);
    taps.tap(500.0);
    assert_eq!(taps.count(), 2);
}

#[test]
fn challenge_operands_are_single_digits() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut gate = MathsChallenge::default();
    for _ in 0..200 {
        let q = gate.begin(&mut rng);
        assert!((1..=9).contains(&q.a));
        assert!((1..=9).contains(&q.b));
        assert_eq!(q.answer(), q.a + q.b);
    }
    assert!(gate.is_active());
}

#[test]
fn correct_answer_opens_settings() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut gate = MathsChallenge::default();
    let q = gate.begin(&mut rng);
    let typed = format!(" {} ", q.answer());
    assert_eq!(gate.submit(&typed, &mut rng).unwrap(), Verdict::Correct);
    assert!(!gate.is_active());
}

#[test]
fn wrong_answer_draws_a_new_question() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut gate = MathsChallenge::default();
    let q = gate.begin(&mut rng);
    let wrong = (q.answer() + 1).to_string();
    assert_eq!(gate.submit(&wrong, &mut rng).unwrap(), Verdict::Wrong);
    assert!(gate.is_active());
}

#[test]
fn non_numeric_answer_is_an_error() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut gate = MathsChallenge::default();
    let q = gate.begin(&mut rng);
    let err = gate.submit("twelve", &mut rng).unwrap_err();
    assert!(matches!(err, SlowtideError::InvalidAnswer(ref s) if s == "twelve"));
    assert_eq!(gate.question(), Some(q));
}

#[test]
fn prompt_reads_naturally() {
    let q = Question { a: 3, b: 4 };
    assert_eq!(q.prompt(), "What is 3 + 4?");
}

#[test]
fn session_identifier_has_words_and_date_anchor() {
    let mut rng = StdRng::seed_from_u64(1);
    let stamp = DateStamp {
        month: 3,
        day: 14,
        hour: 9,
        minute: 5,
    };
    let id = session_identifier(&mut rng, stamp);
    let parts: Vec<&str> = id.split('-').collect();
    assert_eq!(parts.len(), 5);
    for word in &parts[..3] {
        assert!(!word.is_empty());
        assert!(word.chars().all(|c| c.is_ascii_lowercase()));
    }
    assert_eq!(parts[3], "0314");
    assert_eq!(parts[4], "0905");
}

#[test]
fn events_carry_string_params() {
    let e = AnalyticsEvent::SessionEnd {
        duration_selected: 30,
        actual_duration: 15,
        completed: false,
        atmosphere: SoundType::Rain,
    };
    assert_eq!(e.name(), "session_end");
    let p = e.params();
    assert_eq!(p["completion_rate"], "early_exit");
    assert_eq!(p["session_efficiency"], "50%");
    assert_eq!(p["completed"], "false");

    let e = AnalyticsEvent::VirtualPageView {
        view: ViewKind::Night,
        transition: Transition::AdminSwitch,
    };
    let p = e.params();
    assert_eq!(p["virtual_page"], "/screen/night-scene");
    assert_eq!(p["scene_name"], "night");
    assert!(p.get("activity_name").is_none());
}

#[test]
fn vec_sink_collects_events() {
    let mut sink: Vec<AnalyticsEvent> = Vec::new();
    sink.send_all(vec![
        AnalyticsEvent::SfxToggle { enabled: false },
        AnalyticsEvent::SessionPause { pause_secs: 4 },
    ]);
    assert_eq!(sink.len(), 2);
    assert_eq!(sink[1].name(), "session_pause");
}

#[test]
fn admin_sunset_toggles() {
    let mut panel = AdminPanel::default();
    assert!(panel.toggle());
    assert_eq!(panel.toggle_sunset(), 1.0);
    assert_eq!(panel.sunset_label(), "Sunset ON");
    assert_eq!(panel.toggle_sunset(), 0.0);
    assert!(!panel.sunset_forced());
    assert!(!panel.toggle());
}
