//! Tuning constants and the string-valued settings shared by the DOM, the
//! stored preferences and analytics.
//!
//! Constants are grouped by the view or system that reads them. Enum names are
//! the lowercase strings used in `data-*` attributes and in the stored JSON.

use crate::error::SlowtideError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Session
pub const DEFAULT_SESSION_MINUTES: u32 = 90;
pub const MIN_SESSION_MINUTES: u32 = 1;
pub const MAX_SESSION_MINUTES: u32 = 240;
pub const SUNSET_FADE_START_RATIO: f64 = 0.5;
pub const SUNSET_OVERLAY_MAX_OPACITY: f64 = 0.98;
pub const SUNSET_VOLUME_BASE: f64 = 0.8;

// Idle handling (milliseconds)
pub const IDLE_INTERACTION_CHANCE: f64 = 0.05;
pub const GHOST_INTERACTION_TIME_MS: f64 = 2_000.0;
pub const IDLE_VIEW_SWITCH_TIME_MS: f64 = 30_000.0;
pub const IDLE_VIEW_SWITCH_TIME_LONG_MS: f64 = 120_000.0;

// Layout
pub const HEADER_HEIGHT: f32 = 80.0;
pub const CANVAS_AREA_DIVISOR: f32 = 8_000.0;
pub const HAPTIC_FEEDBACK_MS: u32 = 10;

// Density / emergent events
pub const DENSITY_MINIMAL_MULTIPLIER: f32 = 0.4;
pub const DENSITY_STANDARD_MULTIPLIER: f32 = 1.0;
pub const DENSITY_RICH_MULTIPLIER: f32 = 1.8;
pub const EMERGENT_EVENT_CHANCE_RARE: f64 = 0.003;
pub const EMERGENT_EVENT_CHANCE_COMMON: f64 = 0.01;

// Behaviour patterns
pub const RHYTHM_MODE_AMPLITUDE: f32 = 0.5;
pub const RHYTHM_MODE_SPEED: f64 = 0.001;
pub const MIX_PATTERN_CYCLE_MS: f64 = 5_000.0;
pub const CHAOS_AMPLITUDE_MULTIPLIER: f32 = 1.5;
pub const CHAOS_SPEED_MULTIPLIER: f64 = 2.0;

// Particles
pub const CANVAS_FADE_ALPHA: f32 = 0.2;
pub const PARTICLE_HUE_MIN: f32 = 200.0;
pub const PARTICLE_HUE_MAX: f32 = 260.0;
pub const PARTICLE_GOLDEN_CHANCE: f64 = 0.15;
pub const PARTICLE_RAINBOW_CHANCE: f64 = 0.1;
pub const PARTICLE_STAR_CHANCE: f64 = 0.05;
pub const PARTICLE_TRAIL_LENGTH: usize = 8;
pub const PARTICLE_CONNECTION_DISTANCE: f32 = 80.0;
pub const PARTICLE_BURST_COUNT: usize = 6;
pub const PARTICLE_GLOW_RADIUS: f32 = 20.0;
pub const PARTICLE_AMBIENT_MIN: usize = 30;
pub const PARTICLE_AMBIENT_SPAWN_CHANCE: f64 = 0.1;
pub const PARTICLE_LIFE_DECAY: f32 = 0.008;

// Bubbles
pub const BUBBLE_MAX_COUNT: usize = 80;
pub const BUBBLE_MIN_COUNT: usize = 25;
pub const BUBBLE_DESPAWN_MARGIN: f32 = 60.0;
pub const BUBBLE_SPAWN_CHANCE: f64 = 0.05;
pub const BUBBLE_MAX_MERGED_SIZE: f32 = 60.0;
pub const POP_PARTICLE_DECAY: f32 = 0.04;
pub const POP_PARTICLE_SIZE: f32 = 3.0;
pub const HIGH_INTENSITY_BUBBLE_MAX_COUNT: usize = 120;
pub const HIGH_INTENSITY_BUBBLE_SPAWN_CHANCE: f64 = 0.15;
pub const HIGH_INTENSITY_BUBBLE_SPEED_MULTIPLIER: f32 = 2.5;
pub const HIGH_INTENSITY_BUBBLE_COLOR_VARIANCE: f32 = 120.0;
pub const HIGH_INTENSITY_BUBBLE_GLOW_CHANCE: f64 = 0.1;

// Marbles
pub const MARBLE_COUNT: usize = 50;
pub const MARBLE_DAMPING: f32 = 0.98;
pub const MARBLE_BOUNCE_DAMPING: f32 = 0.9;
pub const MARBLE_INTERACTION_RADIUS: f32 = 200.0;
pub const MARBLE_INTERACTION_FORCE: f32 = 2.5;
pub const MARBLE_COLLISION_RESOLUTION: f32 = 0.05;
pub const GHOST_IMPULSE_MARBLES: f32 = 15.0;
pub const HIGH_INTENSITY_MARBLE_COUNT: usize = 80;

// Sorting
pub const SORTING_BLOCK_COUNT: usize = 20;
pub const SORTING_DAMPING: f32 = 0.95;
pub const SORTING_FLOAT_AMPLITUDE: f32 = 2.0;
pub const SORTING_ANGULAR_VELOCITY_FACTOR: f32 = 0.005;
pub const SORTING_HIT_MARGIN: f32 = 20.0;
pub const GHOST_IMPULSE_SORTING: f32 = 50.0;
pub const GHOST_ANGLE_IMPULSE: f32 = 0.1;
pub const HIGH_INTENSITY_SORTING_BLOCK_COUNT: usize = 30;
pub const HIGH_INTENSITY_SORTING_SPEED_MULTIPLIER: f32 = 2.5;
pub const HIGH_INTENSITY_SORTING_GLOW_CHANCE: f64 = 0.15;
pub const SORTING_COLORS: [&str; 5] = ["#5D6D7E", "#A9DFBF", "#F5B7B1", "#D7BDE2", "#F9E79F"];
pub const HIGH_INTENSITY_SORTING_COLOR_COUNT: usize = 8;
/// Extra hues mixed into the palette during the high-engagement phase.
pub const HIGH_INTENSITY_SORTING_EXTRA_COLORS: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
];

// Liquid
pub const LIQUID_FADE_ALPHA: f32 = 0.08;
pub const HIGH_INTENSITY_LIQUID_SPONTANEOUS_CHANCE: f64 = 0.02;
pub const HIGH_INTENSITY_LIQUID_RAINBOW_SPEED: f64 = 3.0;
pub const HIGH_INTENSITY_LIQUID_NEARBY_DROPS: usize = 6;
pub const HIGH_INTENSITY_LIQUID_ORBIT_COUNT: usize = 8;
pub const HIGH_INTENSITY_LIQUID_ORBIT_SPEED: f32 = 0.05;
pub const HIGH_INTENSITY_LIQUID_FLASH_CHANCE: f64 = 0.03;
pub const HIGH_INTENSITY_LIQUID_TRAIL_LENGTH: usize = 20;

// Story scenes
pub const SCENE_WORLD_SCREENS: f32 = 3.0;
pub const SCENE_HORIZON_RATIO: f32 = 0.55;
pub const PARALLAX_GROUND: f32 = 1.0;
pub const PARALLAX_TREES: f32 = 0.5;

// Sensory dimmer
pub const HIGH_ENGAGEMENT_RATIO: f64 = 0.33;
pub const MEDIUM_ENGAGEMENT_RATIO: f64 = 0.33;
pub const LOW_ENGAGEMENT_RATIO: f64 = 0.34;
pub const HIGH_PHASE_VOLUME_MULTIPLIER: f32 = 2.5;
pub const HIGH_PHASE_SPEED_MULTIPLIER: f32 = 3.0;
pub const HIGH_PHASE_SPAWN_MULTIPLIER: f32 = 4.0;
pub const MEDIUM_PHASE_VOLUME_MULTIPLIER: f32 = 0.8;
pub const MEDIUM_PHASE_SPEED_MULTIPLIER: f32 = 1.0;
pub const MEDIUM_PHASE_SPAWN_MULTIPLIER: f32 = 1.0;
pub const LOW_PHASE_VOLUME_MULTIPLIER: f32 = 0.4;
pub const LOW_PHASE_SPEED_MULTIPLIER: f32 = 0.6;
pub const LOW_PHASE_SPAWN_MULTIPLIER: f32 = 0.5;

// Audio
pub const ATMOSPHERE_VOLUME: f32 = 0.25;
pub const NOISE_BUFFER_SECONDS: f32 = 2.0;
pub const SYNTH_FREQUENCY_MIN: f32 = 200.0;
pub const SYNTH_FREQUENCY_MAX: f32 = 800.0;
pub const SFX_DEBOUNCE_MS: f64 = 80.0;
pub const WAVES_LFO_HZ: f32 = 0.1;
pub const WAVES_DEPTH: f32 = 0.5;

// Parent gate
pub const TITLE_TAPS_TO_UNLOCK: u32 = 5;
pub const TITLE_TAP_WINDOW_MS: f64 = 500.0;

macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = SlowtideError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($text => Ok($name::$variant),)+
                    other => Err(SlowtideError::UnknownName {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

named_enum! {
    /// Ambient soundscape played for the length of a session.
    SoundType, "sound" {
        Deep => "deep",
        Rain => "rain",
        Static => "static",
        Waves => "waves",
        Off => "off",
    }
}

named_enum! {
    /// The ten screens: five interactive activities and five story scenes.
    ViewKind, "view" {
        Particles => "particles",
        Sorting => "sorting",
        Bubbles => "bubbles",
        Liquid => "liquid",
        Marbles => "marbles",
        Forest => "forest",
        Beach => "beach",
        Meadow => "meadow",
        Night => "night",
        Lake => "lake",
    }
}

named_enum! {
    BehaviorPattern, "behavior pattern" {
        Chaos => "chaos",
        Rhythm => "rhythm",
        Mix => "mix",
        Calm => "calm",
    }
}

named_enum! {
    AutoSwitchMode, "auto switch mode" {
        On => "on",
        Off => "off",
        Long => "long",
    }
}

named_enum! {
    VisualDensity, "visual density" {
        Minimal => "minimal",
        Standard => "standard",
        Rich => "rich",
    }
}

named_enum! {
    EmergentEvents, "emergent events" {
        Off => "off",
        Rare => "rare",
        Common => "common",
    }
}

named_enum! {
    DimmerMode, "sensory dimmer mode" {
        Auto => "auto",
        Off => "off",
        Custom => "custom",
    }
}

named_enum! {
    EngagementPhase, "engagement phase" {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

named_enum! {
    /// Top-level session flavour.
    Mode, "mode" {
        Activities => "activities",
        Story => "story",
    }
}

impl ViewKind {
    pub const ACTIVITIES: [ViewKind; 5] = [
        ViewKind::Particles,
        ViewKind::Sorting,
        ViewKind::Bubbles,
        ViewKind::Liquid,
        ViewKind::Marbles,
    ];

    /// Story scenes in cycling order.
    pub const SCENES: [ViewKind; 5] = [
        ViewKind::Forest,
        ViewKind::Beach,
        ViewKind::Meadow,
        ViewKind::Night,
        ViewKind::Lake,
    ];

    pub fn is_activity(self) -> bool {
        Self::ACTIVITIES.contains(&self)
    }

    pub fn is_scene(self) -> bool {
        Self::SCENES.contains(&self)
    }

    pub fn mode(self) -> Mode {
        if self.is_activity() {
            Mode::Activities
        } else {
            Mode::Story
        }
    }

    /// Screen title used for virtual page views.
    pub fn title(self) -> &'static str {
        match self {
            ViewKind::Particles => "Particles Activity",
            ViewKind::Sorting => "Sorting Activity",
            ViewKind::Bubbles => "Bubbles Activity",
            ViewKind::Liquid => "Liquid Activity",
            ViewKind::Marbles => "Marbles Activity",
            ViewKind::Forest => "Forest Scene",
            ViewKind::Beach => "Beach Scene",
            ViewKind::Meadow => "Meadow Scene",
            ViewKind::Night => "Night Scene",
            ViewKind::Lake => "Lake Scene",
        }
    }
}

impl AutoSwitchMode {
    /// Idle time after which the activity changes on its own.
    pub fn idle_switch_ms(self) -> Option<f64> {
        match self {
            AutoSwitchMode::On => Some(IDLE_VIEW_SWITCH_TIME_MS),
            AutoSwitchMode::Long => Some(IDLE_VIEW_SWITCH_TIME_LONG_MS),
            AutoSwitchMode::Off => None,
        }
    }
}

impl VisualDensity {
    pub fn multiplier(self) -> f32 {
        match self {
            VisualDensity::Minimal => DENSITY_MINIMAL_MULTIPLIER,
            VisualDensity::Standard => DENSITY_STANDARD_MULTIPLIER,
            VisualDensity::Rich => DENSITY_RICH_MULTIPLIER,
        }
    }
}

impl EmergentEvents {
    /// Per-frame probability of an emergent event, `None` when disabled.
    pub fn chance(self) -> Option<f64> {
        match self {
            EmergentEvents::Off => None,
            EmergentEvents::Rare => Some(EMERGENT_EVENT_CHANCE_RARE),
            EmergentEvents::Common => Some(EMERGENT_EVENT_CHANCE_COMMON),
        }
    }
}

impl SoundType {
    /// Gain applied to the ambient bus when this sound is selected.
    pub fn ambient_gain(self) -> f32 {
        match self {
            SoundType::Off => 0.0,
            _ => ATMOSPHERE_VOLUME,
        }
    }
}
