//! Interactive activities.
//!
//! Each activity owns its entities and turns one frame of simulation into a
//! [`DisplayList`]. Side effects the browser has to perform (sounds, haptics)
//! are pushed onto the frame's cue queue instead of being executed here.

use crate::config::*;
use crate::draw::DisplayList;
use crate::sound::Sfx;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

pub mod bubbles;
pub mod liquid;
pub mod marbles;
pub mod particles;
pub mod sorting;

pub use bubbles::Bubbles;
pub use liquid::Liquid;
pub use marbles::Marbles;
pub use particles::Particles;
pub use sorting::Sorting;

/// Drawable area in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn random_point(&self, rng: &mut StdRng) -> Vec2 {
        Vec2::new(
            rng.gen::<f32>() * self.width,
            rng.gen::<f32>() * self.height,
        )
    }

    /// Canvas backing-store size in device pixels.
    pub fn backing_size(&self, dpr: f64) -> (u32, u32) {
        let px = |css: f32| ((css as f64 * dpr) as u32).max(1);
        (px(self.width), px(self.height))
    }

    /// Vertical position as a fraction of the height, used for synth pitch.
    pub fn y_ratio(&self, y: f32) -> f32 {
        (y / self.height).clamp(0.0, 1.0)
    }
}

/// Session-wide settings that shape every activity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tuning {
    pub behavior: BehaviorPattern,
    pub emergent: EmergentEvents,
    pub density: VisualDensity,
    pub high_intensity: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            behavior: BehaviorPattern::Chaos,
            emergent: EmergentEvents::Off,
            density: VisualDensity::Standard,
            high_intensity: false,
        }
    }
}

impl Tuning {
    pub fn density_multiplier(&self) -> f32 {
        self.density.multiplier()
    }

    /// Scale a base count by the density setting, rounding down.
    pub fn scaled(&self, base: usize) -> usize {
        (base as f32 * self.density_multiplier()).floor() as usize
    }

    /// Roll the emergent-event dice for this frame.
    pub fn roll_emergent(&self, rng: &mut StdRng) -> bool {
        match self.emergent.chance() {
            Some(chance) => rng.gen::<f64>() < chance,
            None => false,
        }
    }

    /// Time phase for rhythm-driven motion, `None` unless the pattern uses it.
    pub fn rhythm_phase(&self, now_ms: f64) -> Option<f64> {
        match self.behavior {
            BehaviorPattern::Rhythm | BehaviorPattern::Mix => Some(now_ms * RHYTHM_MODE_SPEED),
            _ => None,
        }
    }
}

/// Side effects requested by a view during one call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cue {
    Sfx(Sfx),
    Haptic(u32),
    SynthStart { view: ViewKind, y_ratio: f32 },
    SynthUpdate { y_ratio: f32 },
    SynthStop,
}

/// Everything a view may read or write during one call.
pub struct Frame<'a> {
    pub surface: Surface,
    pub now_ms: f64,
    pub tuning: Tuning,
    pub rng: &'a mut StdRng,
    pub cues: &'a mut Vec<Cue>,
}

impl<'a> Frame<'a> {
    pub fn cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Uniform value in [-0.5, 0.5) times `scale`.
    pub fn jitter(&mut self, scale: f32) -> f32 {
        (self.rng.gen::<f32>() - 0.5) * scale
    }

    pub fn random_point(&mut self) -> Vec2 {
        self.surface.random_point(self.rng)
    }
}

pub trait Activity {
    fn kind(&self) -> ViewKind;

    /// Populate the initial entities. Called once after the view becomes active.
    fn init(&mut self, _frame: &mut Frame<'_>) {}

    fn pointer_start(&mut self, point: Vec2, frame: &mut Frame<'_>);

    fn pointer_move(&mut self, _point: Vec2, _frame: &mut Frame<'_>) {}

    fn pointer_end(&mut self, _frame: &mut Frame<'_>) {}

    /// Simulated input applied while the user is idle.
    fn ghost(&mut self, frame: &mut Frame<'_>);

    fn update(&mut self, frame: &mut Frame<'_>) -> DisplayList;

    fn entity_count(&self) -> usize;
}

/// Fresh, empty activity for `kind`; `None` for story scenes.
pub fn new_activity(kind: ViewKind) -> Option<Box<dyn Activity>> {
    let view: Box<dyn Activity> = match kind {
        ViewKind::Particles => Box::new(Particles::default()),
        ViewKind::Sorting => Box::new(Sorting::default()),
        ViewKind::Bubbles => Box::new(Bubbles::default()),
        ViewKind::Liquid => Box::new(Liquid::default()),
        ViewKind::Marbles => Box::new(Marbles::default()),
        _ => return None,
    };
    Some(view)
}
