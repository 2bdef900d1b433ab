use super::{Activity, Cue, Frame};
use crate::config::*;
use crate::draw::{Color, DisplayList, DrawCmd, Glow, Paint};
use crate::sound::Sfx;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
pub struct Bubble {
    pub pos: Vec2,
    pub size: f32,
    /// Grows from 0.1 to 1 for freshly spawned bubbles.
    pub scale: f32,
    pub speed: f32,
    pub wobble: f32,
    /// Phase offset for rhythm mode.
    pub rhythm_offset: f32,
    pub hue: f32,
    pub glow: bool,
}

impl Bubble {
    pub fn color(&self) -> Color {
        Color::hsla(self.hue, 70.0, 70.0, 0.3)
    }
}

#[derive(Clone, Debug)]
pub struct PopParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub hue: f32,
}

/// Rising bubbles that pop on tap.
#[derive(Default)]
pub struct Bubbles {
    pub bubbles: Vec<Bubble>,
    pub pops: Vec<PopParticle>,
}

/// Number of bubbles the surface is kept topped up to.
pub fn target_count(surface_area: f32, tuning: &super::Tuning) -> usize {
    let max = if tuning.high_intensity {
        HIGH_INTENSITY_BUBBLE_MAX_COUNT
    } else {
        BUBBLE_MAX_COUNT
    };
    let by_area = (surface_area / CANVAS_AREA_DIVISOR).floor() as usize;
    tuning.scaled(by_area.max(BUBBLE_MIN_COUNT).min(max))
}

impl Bubbles {
    fn make_bubble(frame: &mut Frame<'_>, pos: Vec2, scale: f32, hue_variance: f32) -> Bubble {
        let glow = frame.tuning.high_intensity && frame.chance(HIGH_INTENSITY_BUBBLE_GLOW_CHANCE);
        let rng = &mut *frame.rng;
        Bubble {
            pos,
            size: rng.gen::<f32>() * 40.0 + 15.0,
            scale,
            speed: rng.gen::<f32>() * 1.5 + 0.5,
            wobble: rng.gen::<f32>() * TAU,
            rhythm_offset: rng.gen::<f32>() * TAU,
            hue: rng.gen::<f32>() * hue_variance + 180.0,
            glow,
        }
    }

    /// New bubble entering from below the bottom edge.
    pub fn spawn(&mut self, frame: &mut Frame<'_>) {
        let x = frame.rng.gen::<f32>() * frame.surface.width;
        let pos = Vec2::new(x, frame.surface.height + 50.0);
        let bubble = Self::make_bubble(frame, pos, 0.1, 40.0);
        self.bubbles.push(bubble);
    }

    fn pop_burst(&mut self, at: Vec2, hue: f32, high_intensity: bool) {
        let (count, speed) = if high_intensity { (16, 5.0) } else { (8, 3.0) };
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            self.pops.push(PopParticle {
                pos: at,
                vel: Vec2::from_angle(angle) * speed,
                life: 1.0,
                hue,
            });
        }
    }

    /// Merge the first overlapping pair into one larger bubble.
    pub fn merge_pair(&mut self, high_intensity: bool) -> bool {
        let n = self.bubbles.len();
        for i in 0..n {
            for j in i + 1..n {
                let (a, b) = (&self.bubbles[i], &self.bubbles[j]);
                if a.pos.distance(b.pos) < (a.size + b.size) * 0.8 {
                    let absorbed = self.bubbles.remove(j);
                    let keep = &mut self.bubbles[i];
                    keep.size = (keep.size + absorbed.size * 0.3).min(BUBBLE_MAX_MERGED_SIZE);
                    keep.speed = (keep.speed + absorbed.speed) / 2.0;
                    let (at, hue) = (keep.pos, keep.hue);
                    self.pop_burst(at, hue, high_intensity);
                    return true;
                }
            }
        }
        false
    }
}

impl Activity for Bubbles {
    fn kind(&self) -> ViewKind {
        ViewKind::Bubbles
    }

    fn init(&mut self, frame: &mut Frame<'_>) {
        let count = target_count(frame.surface.area(), &frame.tuning);
        let variance = if frame.tuning.high_intensity {
            HIGH_INTENSITY_BUBBLE_COLOR_VARIANCE
        } else {
            40.0
        };
        self.bubbles.reserve(count);
        for _ in 0..count {
            let pos = frame.random_point();
            let bubble = Self::make_bubble(frame, pos, 1.0, variance);
            self.bubbles.push(bubble);
        }
    }

    fn pointer_start(&mut self, point: Vec2, frame: &mut Frame<'_>) {
        let hit = self
            .bubbles
            .iter()
            .rposition(|b| b.pos.distance(point) < b.size + 20.0);
        if let Some(i) = hit {
            let b = self.bubbles.remove(i);
            self.pop_burst(b.pos, b.hue, frame.tuning.high_intensity);
            frame.cue(Cue::Haptic(HAPTIC_FEEDBACK_MS));
            frame.cue(Cue::Sfx(Sfx::Pop));
        }
    }

    fn ghost(&mut self, frame: &mut Frame<'_>) {
        self.spawn(frame);
    }

    fn update(&mut self, frame: &mut Frame<'_>) -> DisplayList {
        let mut list = DisplayList::with_capacity(self.bubbles.len() * 2 + self.pops.len() + 1);
        list.push(DrawCmd::Clear);

        let high = frame.tuning.high_intensity;
        let spawn_chance = if high {
            HIGH_INTENSITY_BUBBLE_SPAWN_CHANCE
        } else {
            BUBBLE_SPAWN_CHANCE
        };
        if self.bubbles.len() < target_count(frame.surface.area(), &frame.tuning)
            && frame.chance(spawn_chance)
        {
            self.spawn(frame);
        }

        if frame.tuning.roll_emergent(frame.rng) {
            self.merge_pair(high);
        }

        let speed_mult = if high {
            HIGH_INTENSITY_BUBBLE_SPEED_MULTIPLIER
        } else {
            1.0
        };
        let time_phase = frame.tuning.rhythm_phase(frame.now_ms);
        for b in self.bubbles.iter_mut() {
            if b.scale < 1.0 {
                b.scale = (b.scale + 0.05).min(1.0);
            }
            b.pos.y -= b.speed * speed_mult;
            let rhythmic = match frame.tuning.behavior {
                BehaviorPattern::Rhythm => true,
                BehaviorPattern::Mix => frame.rng.gen::<f32>() > 0.3,
                _ => false,
            };
            match time_phase {
                Some(phase) if rhythmic => {
                    b.pos.x += (phase as f32 + b.rhythm_offset).sin()
                        * RHYTHM_MODE_AMPLITUDE
                        * speed_mult;
                }
                _ => {
                    b.pos.x += (b.pos.y * 0.01 + b.wobble).sin() * 0.5 * speed_mult;
                }
            }
        }
        self.bubbles.retain(|b| b.pos.y >= -BUBBLE_DESPAWN_MARGIN);

        for b in &self.bubbles {
            let color = b.color();
            list.push(DrawCmd::FillCircle {
                center: b.pos,
                radius: b.size * b.scale,
                paint: Paint::Solid(color),
                glow: b.glow.then_some(Glow { blur: 20.0, color }),
            });
            list.push(DrawCmd::StrokeCircle {
                center: b.pos,
                radius: b.size * b.scale,
                color: Color::rgba(255, 255, 255, 0.4),
                width: 2.0,
            });
        }

        for p in self.pops.iter_mut() {
            p.life -= POP_PARTICLE_DECAY;
            p.pos += p.vel;
        }
        self.pops.retain(|p| p.life > 0.0);
        for p in &self.pops {
            list.circle(p.pos, POP_PARTICLE_SIZE, Color::hsla(p.hue, 70.0, 70.0, 0.8 * p.life));
        }
        list
    }

    fn entity_count(&self) -> usize {
        self.bubbles.len() + self.pops.len()
    }
}
