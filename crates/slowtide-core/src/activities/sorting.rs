use super::{Activity, Cue, Frame};
use crate::config::*;
use crate::draw::{Color, DisplayList, DrawCmd};
use glam::Vec2;
use rand::Rng;
use std::f64::consts::PI;

#[derive(Clone, Debug)]
pub struct Block {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub angle: f32,
    pub spin: f32,
    /// Per-block phase offsets for the chaos and calm float.
    pub drift: Vec2,
    pub scale: f32,
    pub prev_x: f32,
    /// Phase offset for the rhythm float.
    pub phase: f32,
    pub glow: bool,
}

impl Block {
    pub fn contains(&self, p: Vec2) -> bool {
        let half = self.size * 0.5 + Vec2::splat(SORTING_HIT_MARGIN);
        (p - self.pos).abs().cmple(half).all()
    }
}

/// Rounded blocks floating on the surface; drag one to pick it up.
#[derive(Default)]
pub struct Sorting {
    pub blocks: Vec<Block>,
    /// Grab offset while a block is held. The held block is always last.
    pub grab: Option<Vec2>,
}

fn palette_color(i: usize) -> Color {
    let code = SORTING_COLORS
        .iter()
        .chain(HIGH_INTENSITY_SORTING_EXTRA_COLORS.iter())
        .nth(i)
        .copied()
        .unwrap_or(SORTING_COLORS[0]);
    Color::hex(code).unwrap_or(Color::rgb(0x5D, 0x6D, 0x7E))
}

/// Float offset applied to a resting block.
fn float_offset(block: &Block, behavior: BehaviorPattern, now_ms: f64, speed: f32) -> Vec2 {
    let amp = SORTING_FLOAT_AMPLITUDE * speed;
    let rhythm = |b: &Block| {
        let t = now_ms * RHYTHM_MODE_SPEED + b.phase as f64;
        Vec2::new(t.sin() as f32, t.cos() as f32) * amp
    };
    let calm = |b: &Block| {
        let t = now_ms * 0.0005;
        Vec2::new(
            (t + b.drift.x as f64).sin() as f32,
            (t + b.drift.y as f64).cos() as f32,
        ) * amp
            * 0.3
    };
    match behavior {
        BehaviorPattern::Chaos => {
            let phase = now_ms * 0.002 * CHAOS_SPEED_MULTIPLIER * speed as f64;
            let wander = (now_ms * 0.003 + block.phase as f64).sin() * 0.5 + 0.5;
            Vec2::new(
                (phase + block.drift.x as f64 + wander * PI).sin() as f32,
                (phase * 1.3 + block.drift.y as f64 + wander * PI * 0.7).cos() as f32,
            ) * amp
                * CHAOS_AMPLITUDE_MULTIPLIER
        }
        BehaviorPattern::Rhythm => rhythm(block),
        BehaviorPattern::Mix => {
            let cycle = (now_ms % MIX_PATTERN_CYCLE_MS) / MIX_PATTERN_CYCLE_MS;
            if cycle < 0.6 {
                rhythm(block)
            } else {
                calm(block)
            }
        }
        BehaviorPattern::Calm => calm(block),
    }
}

impl Sorting {
    pub fn held(&self) -> Option<&Block> {
        self.grab.and_then(|_| self.blocks.last())
    }

    /// Nudge the first nearby resting pair toward each other.
    pub fn attract_pair(&mut self) {
        let resting = if self.grab.is_some() {
            self.blocks.len().saturating_sub(1)
        } else {
            self.blocks.len()
        };
        for i in 0..resting {
            for j in i + 1..resting {
                let delta = self.blocks[j].pos - self.blocks[i].pos;
                let d = delta.length();
                if d < 150.0 && d > 20.0 {
                    let pull = delta / d * 3.0;
                    self.blocks[i].drift += pull;
                    self.blocks[j].drift -= pull;
                    return;
                }
            }
        }
    }
}

impl Activity for Sorting {
    fn kind(&self) -> ViewKind {
        ViewKind::Sorting
    }

    fn init(&mut self, frame: &mut Frame<'_>) {
        let high = frame.tuning.high_intensity;
        let base = if high {
            HIGH_INTENSITY_SORTING_BLOCK_COUNT
        } else {
            SORTING_BLOCK_COUNT
        };
        let colors = if high {
            HIGH_INTENSITY_SORTING_COLOR_COUNT
        } else {
            SORTING_COLORS.len()
        };
        let (w, h) = (frame.surface.width, frame.surface.height);
        let count = frame.tuning.scaled(base);
        self.blocks.reserve(count);
        for _ in 0..count {
            let glow = high && frame.chance(HIGH_INTENSITY_SORTING_GLOW_CHANCE);
            let rng = &mut *frame.rng;
            let pos = Vec2::new(
                rng.gen::<f32>() * (w - 100.0).max(0.0) + 50.0,
                rng.gen::<f32>() * (h - 200.0).max(0.0) + 100.0,
            );
            let size = Vec2::new(rng.gen::<f32>() * 60.0 + 40.0, rng.gen::<f32>() * 40.0 + 30.0);
            let color = palette_color(rng.gen_range(0..colors));
            self.blocks.push(Block {
                pos,
                size,
                color,
                angle: rng.gen::<f32>() * std::f32::consts::PI,
                spin: (rng.gen::<f32>() - 0.5) * 0.02,
                drift: Vec2::new(rng.gen::<f32>() * 100.0, rng.gen::<f32>() * 100.0),
                scale: 1.0,
                prev_x: 0.0,
                phase: rng.gen::<f32>() * std::f32::consts::TAU,
                glow,
            });
        }
    }

    fn pointer_start(&mut self, point: Vec2, frame: &mut Frame<'_>) {
        let Some(i) = self.blocks.iter().rposition(|b| b.contains(point)) else {
            return;
        };
        let mut block = self.blocks.remove(i);
        block.prev_x = point.x;
        self.grab = Some(point - block.pos);
        self.blocks.push(block);
        frame.cue(Cue::Haptic(HAPTIC_FEEDBACK_MS));
        frame.cue(Cue::SynthStart {
            view: ViewKind::Sorting,
            y_ratio: 0.5,
        });
    }

    fn pointer_move(&mut self, point: Vec2, _frame: &mut Frame<'_>) {
        let Some(offset) = self.grab else {
            return;
        };
        if let Some(block) = self.blocks.last_mut() {
            block.spin = (point.x - block.prev_x) * SORTING_ANGULAR_VELOCITY_FACTOR;
            block.prev_x = point.x;
            block.pos = point - offset;
        }
    }

    fn pointer_end(&mut self, _frame: &mut Frame<'_>) {
        self.grab = None;
    }

    fn ghost(&mut self, frame: &mut Frame<'_>) {
        if self.blocks.is_empty() {
            return;
        }
        let i = frame.rng.gen_range(0..self.blocks.len());
        let kick = Vec2::new(
            frame.jitter(GHOST_IMPULSE_SORTING),
            frame.jitter(GHOST_IMPULSE_SORTING),
        );
        let turn = frame.jitter(GHOST_ANGLE_IMPULSE);
        let block = &mut self.blocks[i];
        block.drift += kick;
        block.spin += turn;
    }

    fn update(&mut self, frame: &mut Frame<'_>) -> DisplayList {
        let mut list = DisplayList::with_capacity(self.blocks.len() + 1);
        list.push(DrawCmd::Fade(Color::rgba(5, 5, 5, 0.3)));

        if frame.tuning.roll_emergent(frame.rng) {
            self.attract_pair();
        }

        let speed = if frame.tuning.high_intensity {
            HIGH_INTENSITY_SORTING_SPEED_MULTIPLIER
        } else {
            1.0
        };
        let held = self.grab.map(|_| self.blocks.len().saturating_sub(1));
        let behavior = frame.tuning.behavior;
        let now = frame.now_ms;

        for (i, b) in self.blocks.iter_mut().enumerate() {
            let is_held = held == Some(i);
            if b.pos.y < HEADER_HEIGHT + 20.0 && !is_held {
                b.pos.y += 1.0;
            }
            b.angle += b.spin;
            b.spin *= SORTING_DAMPING;

            let mut at = b.pos;
            if is_held {
                b.scale += (1.2 - b.scale) * 0.2;
            } else {
                at += float_offset(b, behavior, now, speed);
                b.scale += (1.0 - b.scale) * 0.2;
            }
            list.push(DrawCmd::Block {
                center: at,
                size: b.size,
                angle: b.angle,
                scale: b.scale,
                color: b.color,
                glow: b.glow,
            });
        }
        list
    }

    fn entity_count(&self) -> usize {
        self.blocks.len()
    }
}
