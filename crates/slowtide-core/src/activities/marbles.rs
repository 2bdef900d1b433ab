use super::{Activity, Cue, Frame};
use crate::config::*;
use crate::draw::{Color, DisplayList, DrawCmd};
use crate::sound::Sfx;
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Debug)]
pub struct Marble {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub hue: f32,
}

/// Colliding marbles pushed away from the pointer.
#[derive(Default)]
pub struct Marbles {
    pub marbles: Vec<Marble>,
}

impl Marbles {
    /// Push every marble within the interaction radius away from `at`.
    pub fn push_from(&mut self, at: Vec2) {
        for m in self.marbles.iter_mut() {
            let delta = m.pos - at;
            let d = delta.length();
            if d < MARBLE_INTERACTION_RADIUS {
                let f = (MARBLE_INTERACTION_RADIUS - d) / MARBLE_INTERACTION_RADIUS;
                let angle = delta.y.atan2(delta.x);
                m.vel += Vec2::from_angle(angle) * f * MARBLE_INTERACTION_FORCE;
            }
        }
    }

    pub fn pull_to_center(&mut self, center: Vec2) {
        for m in self.marbles.iter_mut() {
            let delta = center - m.pos;
            let d = delta.length();
            if d > 50.0 {
                m.vel += delta / d * 0.3;
            }
        }
    }

    /// Integrate one frame. Returns true when anything hit a wall or another marble.
    pub fn step(&mut self, width: f32, height: f32) -> bool {
        let mut hit = false;
        let n = self.marbles.len();
        for i in 0..n {
            let (head, tail) = self.marbles.split_at_mut(i + 1);
            let m = &mut head[i];
            m.pos += m.vel;
            m.vel *= MARBLE_DAMPING;

            let top = m.radius + HEADER_HEIGHT;
            if m.pos.x < m.radius || m.pos.x > width - m.radius {
                m.vel.x *= -MARBLE_BOUNCE_DAMPING;
                hit = true;
            }
            if m.pos.y < top || m.pos.y > height - m.radius {
                m.vel.y *= -MARBLE_BOUNCE_DAMPING;
                hit = true;
            }
            m.pos.x = m.pos.x.max(m.radius).min(width - m.radius);
            m.pos.y = m.pos.y.max(top).min(height - m.radius);

            for other in tail.iter_mut() {
                let delta = other.pos - m.pos;
                let d = delta.length();
                let min_d = m.radius + other.radius;
                if d < min_d {
                    let angle = delta.y.atan2(delta.x);
                    let target = m.pos + Vec2::from_angle(angle) * min_d;
                    let push = (target - other.pos) * MARBLE_COLLISION_RESOLUTION;
                    m.vel -= push;
                    other.vel += push;
                    hit = true;
                }
            }
        }
        hit
    }
}

impl Activity for Marbles {
    fn kind(&self) -> ViewKind {
        ViewKind::Marbles
    }

    fn init(&mut self, frame: &mut Frame<'_>) {
        let base = if frame.tuning.high_intensity {
            HIGH_INTENSITY_MARBLE_COUNT
        } else {
            MARBLE_COUNT
        };
        let count = frame.tuning.scaled(base);
        self.marbles.reserve(count);
        for _ in 0..count {
            let pos = frame.random_point();
            let vel = Vec2::new(frame.jitter(2.0), frame.jitter(2.0));
            self.marbles.push(Marble {
                pos,
                vel,
                radius: frame.rng.gen::<f32>() * 15.0 + 15.0,
                hue: frame.rng.gen::<f32>() * 360.0,
            });
        }
    }

    fn pointer_start(&mut self, point: Vec2, _frame: &mut Frame<'_>) {
        self.push_from(point);
    }

    fn pointer_move(&mut self, point: Vec2, _frame: &mut Frame<'_>) {
        self.push_from(point);
    }

    fn ghost(&mut self, frame: &mut Frame<'_>) {
        if self.marbles.is_empty() {
            return;
        }
        let i = frame.rng.gen_range(0..self.marbles.len());
        let kick = Vec2::new(
            frame.jitter(GHOST_IMPULSE_MARBLES),
            frame.jitter(GHOST_IMPULSE_MARBLES),
        );
        self.marbles[i].vel += kick;
    }

    fn update(&mut self, frame: &mut Frame<'_>) -> DisplayList {
        let mut list = DisplayList::with_capacity(self.marbles.len() * 2 + 1);
        list.push(DrawCmd::Fade(Color::rgba(5, 5, 5, 0.3)));

        if frame.tuning.roll_emergent(frame.rng) {
            let s = frame.surface;
            self.pull_to_center(Vec2::new(s.width / 2.0, (s.height + HEADER_HEIGHT) / 2.0));
        }

        if self.step(frame.surface.width, frame.surface.height) {
            frame.cue(Cue::Sfx(Sfx::Clack));
        }

        for m in &self.marbles {
            list.circle(m.pos, m.radius, Color::hsl(m.hue, 60.0, 60.0));
            list.push(DrawCmd::StrokeCircle {
                center: m.pos,
                radius: m.radius,
                color: Color::rgba(255, 255, 255, 0.2),
                width: 2.0,
            });
        }
        list
    }

    fn entity_count(&self) -> usize {
        self.marbles.len()
    }
}
