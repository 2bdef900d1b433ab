//! Anonymous usage events.
//!
//! The core only describes events; the front-end decides where they go. The
//! browser sink forwards them to `gtag` when the page defines it and drops them
//! otherwise. Nothing here identifies a person: session identifiers are random
//! words plus a coarse date anchor.

use crate::config::*;
use rand::Rng;
use serde_json::{json, Map, Value};

const SESSION_WORDS: [&str; 45] = [
    "apple", "ocean", "mountain", "river", "forest", "sunset", "moon", "star", "cloud", "wind",
    "rain", "snow", "fire", "earth", "stone", "crystal", "dream", "whisper", "echo", "shadow",
    "light", "dawn", "dusk", "night", "morning", "spring", "summer", "autumn", "winter", "breeze",
    "thunder", "lightning", "rainbow", "mist", "fog", "valley", "meadow", "garden", "cottage",
    "bridge", "path", "journey", "adventure", "wonder", "magic",
];

/// Why a screen came into view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    SessionStart,
    UserSwitch,
    AutoSwitch,
    AdminSwitch,
}

impl Transition {
    pub fn as_str(self) -> &'static str {
        match self {
            Transition::SessionStart => "session_start",
            Transition::UserSwitch => "user_switch",
            Transition::AutoSwitch => "auto_switch",
            Transition::AdminSwitch => "admin_switch",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Engagement {
    AppLoaded,
    SessionActive,
    UserInteraction,
    GhostInteraction,
    AutoSwitch,
}

impl Engagement {
    pub fn as_str(self) -> &'static str {
        match self {
            Engagement::AppLoaded => "app_loaded",
            Engagement::SessionActive => "session_active",
            Engagement::UserInteraction => "user_interaction",
            Engagement::GhostInteraction => "ghost_interaction",
            Engagement::AutoSwitch => "auto_switch",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AnalyticsEvent {
    SessionStart {
        session_identifier: String,
        mode: Mode,
        duration_selected: u32,
        atmosphere: SoundType,
        sfx_enabled: bool,
        behavior_pattern: BehaviorPattern,
        auto_switch_mode: AutoSwitchMode,
        visual_density: VisualDensity,
    },
    SessionEnd {
        duration_selected: u32,
        actual_duration: u32,
        completed: bool,
        atmosphere: SoundType,
    },
    ActivitySwitch {
        view: ViewKind,
    },
    VirtualPageView {
        view: ViewKind,
        transition: Transition,
    },
    UserEngagement {
        activity: Engagement,
    },
    ParentSettingChange {
        setting: &'static str,
        from: String,
        to: String,
    },
    DurationChange {
        from: u32,
        to: u32,
    },
    SfxToggle {
        enabled: bool,
    },
    AtmosphereChange {
        from: SoundType,
        to: SoundType,
    },
    SessionPause {
        pause_secs: u32,
    },
}

impl AnalyticsEvent {
    /// Event name as sent to `gtag('event', name, ...)`.
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::SessionStart { .. } => "session_start",
            AnalyticsEvent::SessionEnd { .. } => "session_end",
            AnalyticsEvent::ActivitySwitch { .. } => "activity_switch",
            AnalyticsEvent::VirtualPageView { .. } => "virtual_page_view",
            AnalyticsEvent::UserEngagement { .. } => "user_engagement",
            AnalyticsEvent::ParentSettingChange { .. } => "parent_setting_change",
            AnalyticsEvent::DurationChange { .. } => "duration_change",
            AnalyticsEvent::SfxToggle { .. } => "sfx_toggle",
            AnalyticsEvent::AtmosphereChange { .. } => "atmosphere_change",
            AnalyticsEvent::SessionPause { .. } => "session_pause",
        }
    }

    /// Event parameters. Values are strings, matching what the dashboards
    /// already expect.
    pub fn params(&self) -> Map<String, Value> {
        let value = match self {
            AnalyticsEvent::SessionStart {
                session_identifier,
                mode,
                duration_selected,
                atmosphere,
                sfx_enabled,
                behavior_pattern,
                auto_switch_mode,
                visual_density,
            } => json!({
                "session_identifier": session_identifier,
                "mode": mode.as_str(),
                "duration_selected": duration_selected.to_string(),
                "atmosphere": atmosphere.as_str(),
                "sfx_enabled": sfx_enabled.to_string(),
                "behavior_pattern": behavior_pattern.as_str(),
                "auto_switch_mode": auto_switch_mode.as_str(),
                "visual_density": visual_density.as_str(),
            }),
            AnalyticsEvent::SessionEnd {
                duration_selected,
                actual_duration,
                completed,
                atmosphere,
            } => {
                let rate = if actual_duration >= duration_selected {
                    "completed"
                } else {
                    "early_exit"
                };
                let efficiency =
                    (*actual_duration as f64 / (*duration_selected).max(1) as f64 * 100.0).round();
                json!({
                    "duration_selected": duration_selected.to_string(),
                    "actual_duration": actual_duration.to_string(),
                    "completed": completed.to_string(),
                    "atmosphere": atmosphere.as_str(),
                    "completion_rate": rate,
                    "session_efficiency": format!("{}%", efficiency),
                })
            }
            AnalyticsEvent::ActivitySwitch { view } => json!({
                "activity": view.as_str(),
                "activity_title": view.title(),
            }),
            AnalyticsEvent::VirtualPageView { view, transition } => {
                let mut value = json!({
                    "page_title": view.title(),
                    "virtual_page": virtual_page(view.title()),
                    "screen_type": view.title(),
                    "transition_type": transition.as_str(),
                });
                let name_key = if view.is_activity() {
                    "activity_name"
                } else {
                    "scene_name"
                };
                value[name_key] = json!(view.as_str());
                value
            }
            AnalyticsEvent::UserEngagement { activity } => json!({
                "activity": activity.as_str(),
            }),
            AnalyticsEvent::ParentSettingChange { setting, from, to } => json!({
                "setting": setting,
                "from": from,
                "to": to,
            }),
            AnalyticsEvent::DurationChange { from, to } => json!({
                "from": from.to_string(),
                "to": to.to_string(),
            }),
            AnalyticsEvent::SfxToggle { enabled } => json!({
                "enabled": enabled.to_string(),
            }),
            AnalyticsEvent::AtmosphereChange { from, to } => json!({
                "from": from.as_str(),
                "to": to.as_str(),
            }),
            AnalyticsEvent::SessionPause { pause_secs } => json!({
                "pause_duration": pause_secs.to_string(),
            }),
        };
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

/// `/screen/<slug>` path used for virtual page views.
pub fn virtual_page(title: &str) -> String {
    let slug = title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    format!("/screen/{}", slug)
}

/// Where events go. The browser forwards to `gtag`; tests collect into a Vec.
pub trait AnalyticsSink {
    fn send(&mut self, event: &AnalyticsEvent);

    fn send_all(&mut self, events: impl IntoIterator<Item = AnalyticsEvent>)
    where
        Self: Sized,
    {
        for event in events {
            self.send(&event);
        }
    }
}

impl AnalyticsSink for Vec<AnalyticsEvent> {
    fn send(&mut self, event: &AnalyticsEvent) {
        self.push(event.clone());
    }
}

/// Local calendar fields used for the identifier's date anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateStamp {
    /// 1-based month.
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

/// Three random words and an `MMDD-HHMM` anchor, e.g. `moon-river-echo-0314-0915`.
pub fn session_identifier<R: Rng + ?Sized>(rng: &mut R, stamp: DateStamp) -> String {
    let mut word = || SESSION_WORDS[rng.gen_range(0..SESSION_WORDS.len())];
    let (a, b, c) = (word(), word(), word());
    format!(
        "{}-{}-{}-{:02}{:02}-{:02}{:02}",
        a, b, c, stamp.month, stamp.day, stamp.hour, stamp.minute
    )
}

/// Coarse time-of-day bucket for session end reports.
pub fn time_of_day(hour: u32) -> &'static str {
    match hour {
        0..=5 => "night_early",
        6..=11 => "morning",
        12..=16 => "afternoon",
        17..=20 => "evening",
        _ => "night_late",
    }
}

pub fn day_of_week(index: u32) -> &'static str {
    const DAYS: [&str; 7] = [
        "sunday",
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
    ];
    DAYS[(index % 7) as usize]
}
