// Host-side tests for stored preferences and settings changes.

use slowtide_core::analytics::AnalyticsEvent;
use slowtide_core::prefs::{KeyValueStore, MemoryStore, PreferenceStore, Setting, STORAGE_KEY};
use slowtide_core::*;

#[test]
fn defaults_match_first_launch() {
    let p = Preferences::default();
    assert_eq!(p.duration, 90);
    assert_eq!(p.sound, SoundType::Deep);
    assert!(p.sfx_enabled);
    assert_eq!(p.behavior_pattern, BehaviorPattern::Chaos);
    assert_eq!(p.auto_switch_mode, AutoSwitchMode::On);
    assert_eq!(p.visual_density, VisualDensity::Standard);
    assert_eq!(p.emergent_events, EmergentEvents::Off);
    assert_eq!(p.sensory_dimmer_mode, DimmerMode::Auto);
}

#[test]
fn round_trips_through_store() {
    let store = PreferenceStore::new(MemoryStore::default());
    let prefs = Preferences {
        duration: 30,
        sound: SoundType::Rain,
        sfx_enabled: false,
        visual_density: VisualDensity::Minimal,
        ..Preferences::default()
    };
    store.save(&prefs);
    assert_eq!(store.load(), prefs);
}

#[test]
fn missing_blob_yields_defaults() {
    let store = PreferenceStore::new(MemoryStore::default());
    assert_eq!(store.try_load().unwrap(), None);
    assert_eq!(store.load(), Preferences::default());
}

#[test]
fn corrupt_blob_yields_defaults() {
    let inner = MemoryStore::default();
    inner.set(STORAGE_KEY, "{not json").unwrap();
    let store = PreferenceStore::new(inner);
    assert!(store.try_load().is_err());
    assert_eq!(store.load(), Preferences::default());
}

#[test]
fn unknown_fields_are_ignored_and_missing_fields_default() {
    let p = Preferences::decode(r#"{"duration":45,"sound":"waves","theme":"dark"}"#).unwrap();
    assert_eq!(p.duration, 45);
    assert_eq!(p.sound, SoundType::Waves);
    assert!(p.sfx_enabled);
}

#[test]
fn stored_names_are_camel_case_and_lowercase_values() {
    let raw = Preferences::default().encode().unwrap();
    assert!(raw.contains(r#""sfxEnabled":true"#));
    assert!(raw.contains(r#""sensoryDimmerMode":"auto""#));
    assert!(raw.contains(r#""sound":"deep""#));
}

#[test]
fn duration_is_clamped() {
    assert_eq!(Preferences::decode(r#"{"duration":999}"#).unwrap().duration, 240);
    assert_eq!(Preferences::decode(r#"{"duration":0}"#).unwrap().duration, 1);
}

#[test]
fn clear_removes_blob() {
    let store = PreferenceStore::new(MemoryStore::default());
    store.save(&Preferences::default());
    store.clear();
    assert_eq!(store.inner().get(STORAGE_KEY).unwrap(), None);
}

#[test]
fn sound_off_has_no_ambient_gain() {
    assert_eq!(SoundType::Off.ambient_gain(), 0.0);
    assert!(SoundType::Deep.ambient_gain() > 0.0);
}

#[test]
fn parses_settings_buttons() {
    assert_eq!(Setting::parse("time", "15").unwrap(), Setting::Duration(15));
    assert_eq!(
        Setting::parse("sound", "static").unwrap(),
        Setting::Sound(SoundType::Static)
    );
    assert_eq!(Setting::parse("sfx", "off").unwrap(), Setting::Sfx(false));
    assert_eq!(
        Setting::parse("autoswitch", "long").unwrap(),
        Setting::AutoSwitch(AutoSwitchMode::Long)
    );
    assert!(Setting::parse("sound", "jazz").is_err());
    assert!(Setting::parse("colour", "red").is_err());
}

#[test]
fn applying_settings_reports_changes() {
    let mut p = Preferences::default();
    assert_eq!(
        p.apply(Setting::Duration(30)),
        Some(AnalyticsEvent::DurationChange { from: 90, to: 30 })
    );
    assert_eq!(p.apply(Setting::Duration(30)), None);
    assert_eq!(
        p.apply(Setting::Sound(SoundType::Off)),
        Some(AnalyticsEvent::AtmosphereChange {
            from: SoundType::Deep,
            to: SoundType::Off
        })
    );
    assert_eq!(
        p.apply(Setting::Behavior(BehaviorPattern::Calm)),
        Some(AnalyticsEvent::ParentSettingChange {
            setting: "behavior_pattern",
            from: "chaos".into(),
            to: "calm".into(),
        })
    );
    assert_eq!(p.behavior_pattern, BehaviorPattern::Calm);
}

#[test]
fn enum_names_round_trip_through_strings() {
    for v in ViewKind::ALL {
        assert_eq!(v.as_str().parse::<ViewKind>().unwrap(), *v);
    }
    assert!("volcano".parse::<ViewKind>().is_err());
}
