//! Parent-configurable preferences and their persistence.
//!
//! Preferences are stored as one JSON blob under [`STORAGE_KEY`]. Reading never
//! fails from the caller's point of view: a missing or unreadable blob yields
//! the defaults and a warning in the log.

use crate::analytics::AnalyticsEvent;
use crate::config::*;
use crate::error::{Result, SlowtideError};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;

pub const STORAGE_KEY: &str = "slowtide_preferences";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub duration: u32,
    pub sound: SoundType,
    pub sfx_enabled: bool,
    pub behavior_pattern: BehaviorPattern,
    pub auto_switch_mode: AutoSwitchMode,
    pub visual_density: VisualDensity,
    pub emergent_events: EmergentEvents,
    pub sensory_dimmer_mode: DimmerMode,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            duration: DEFAULT_SESSION_MINUTES,
            sound: SoundType::Deep,
            sfx_enabled: true,
            behavior_pattern: BehaviorPattern::Chaos,
            auto_switch_mode: AutoSwitchMode::On,
            visual_density: VisualDensity::Standard,
            emergent_events: EmergentEvents::Off,
            sensory_dimmer_mode: DimmerMode::Auto,
        }
    }
}

impl Preferences {
    pub fn decode(raw: &str) -> Result<Self> {
        let prefs: Preferences =
            serde_json::from_str(raw).map_err(SlowtideError::PreferencesDecode)?;
        Ok(prefs.sanitized())
    }

    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(SlowtideError::PreferencesEncode)
    }

    pub fn sanitized(mut self) -> Self {
        self.duration = self.duration.clamp(MIN_SESSION_MINUTES, MAX_SESSION_MINUTES);
        self
    }
}

/// One change made in the settings modal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Setting {
    Duration(u32),
    Sound(SoundType),
    Sfx(bool),
    Behavior(BehaviorPattern),
    AutoSwitch(AutoSwitchMode),
    Density(VisualDensity),
    Emergent(EmergentEvents),
    Dimmer(DimmerMode),
}

impl Setting {
    /// Parse a settings button's `data-setting` / `data-value` pair.
    pub fn parse(name: &str, value: &str) -> Result<Setting> {
        let setting = match name {
            "time" | "duration" => Setting::Duration(value.trim().parse().map_err(|_| {
                SlowtideError::UnknownName {
                    kind: "duration",
                    value: value.to_string(),
                }
            })?),
            "sound" => Setting::Sound(value.parse()?),
            "sfx" => match value {
                "on" => Setting::Sfx(true),
                "off" => Setting::Sfx(false),
                other => {
                    return Err(SlowtideError::UnknownName {
                        kind: "sfx",
                        value: other.to_string(),
                    })
                }
            },
            "behavior" => Setting::Behavior(value.parse()?),
            "autoswitch" => Setting::AutoSwitch(value.parse()?),
            "density" => Setting::Density(value.parse()?),
            "emergent" => Setting::Emergent(value.parse()?),
            "dimmer" => Setting::Dimmer(value.parse()?),
            other => {
                return Err(SlowtideError::UnknownName {
                    kind: "setting",
                    value: other.to_string(),
                })
            }
        };
        Ok(setting)
    }
}

impl Preferences {
    /// Apply a settings change. Returns the analytics event describing it, or
    /// `None` when the value did not change.
    pub fn apply(&mut self, setting: Setting) -> Option<AnalyticsEvent> {
        fn parent<T: Copy + PartialEq + std::fmt::Display>(
            slot: &mut T,
            to: T,
            name: &'static str,
        ) -> Option<AnalyticsEvent> {
            if *slot == to {
                return None;
            }
            let from = std::mem::replace(slot, to);
            Some(AnalyticsEvent::ParentSettingChange {
                setting: name,
                from: from.to_string(),
                to: to.to_string(),
            })
        }

        match setting {
            Setting::Duration(minutes) => {
                let to = minutes.clamp(MIN_SESSION_MINUTES, MAX_SESSION_MINUTES);
                if self.duration == to {
                    return None;
                }
                let from = std::mem::replace(&mut self.duration, to);
                Some(AnalyticsEvent::DurationChange { from, to })
            }
            Setting::Sound(to) => {
                if self.sound == to {
                    return None;
                }
                let from = std::mem::replace(&mut self.sound, to);
                Some(AnalyticsEvent::AtmosphereChange { from, to })
            }
            Setting::Sfx(enabled) => {
                if self.sfx_enabled == enabled {
                    return None;
                }
                self.sfx_enabled = enabled;
                Some(AnalyticsEvent::SfxToggle { enabled })
            }
            Setting::Behavior(to) => parent(&mut self.behavior_pattern, to, "behavior_pattern"),
            Setting::AutoSwitch(to) => parent(&mut self.auto_switch_mode, to, "auto_switch_mode"),
            Setting::Density(to) => parent(&mut self.visual_density, to, "visual_density"),
            Setting::Emergent(to) => parent(&mut self.emergent_events, to, "emergent_events"),
            Setting::Dimmer(to) => parent(&mut self.sensory_dimmer_mode, to, "sensory_dimmer_mode"),
        }
    }
}

/// Minimal string key-value store; localStorage in the browser.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store used by tests and as a fallback when storage is blocked.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

pub struct PreferenceStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Stored preferences, or the defaults when nothing usable is stored.
    pub fn load(&self) -> Preferences {
        match self.try_load() {
            Ok(Some(prefs)) => prefs,
            Ok(None) => Preferences::default(),
            Err(e) => {
                log::warn!("[prefs] failed to load preferences: {}", e);
                Preferences::default()
            }
        }
    }

    pub fn try_load(&self) -> Result<Option<Preferences>> {
        match self.store.get(STORAGE_KEY)? {
            Some(raw) => Preferences::decode(&raw).map(Some),
            None => Ok(None),
        }
    }

    pub fn save(&self, prefs: &Preferences) {
        let outcome = prefs
            .encode()
            .and_then(|raw| self.store.set(STORAGE_KEY, &raw));
        if let Err(e) = outcome {
            log::warn!("[prefs] failed to save preferences: {}", e);
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(STORAGE_KEY) {
            log::warn!("[prefs] failed to clear preferences: {}", e);
        }
    }
}
