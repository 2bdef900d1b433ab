use super::{Activity, Cue, Frame};
use crate::config::*;
use crate::draw::{radial_gradient, Color, DisplayList, DrawCmd, Glow};
use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Normal,
    Golden,
    Rainbow,
    Star,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub hue: f32,
    pub size: f32,
    pub trail: SmallVec<[Vec2; PARTICLE_TRAIL_LENGTH]>,
}

/// Drifting glowing motes spawned wherever the pointer goes.
#[derive(Default)]
pub struct Particles {
    pub particles: Vec<Particle>,
}

impl Particles {
    pub fn spawn(&mut self, at: Vec2, frame: &mut Frame<'_>) {
        let roll: f64 = frame.rng.gen();
        let kind = if roll < PARTICLE_STAR_CHANCE {
            ParticleKind::Star
        } else if roll < PARTICLE_STAR_CHANCE + PARTICLE_RAINBOW_CHANCE {
            ParticleKind::Rainbow
        } else if roll < PARTICLE_STAR_CHANCE + PARTICLE_RAINBOW_CHANCE + PARTICLE_GOLDEN_CHANCE {
            ParticleKind::Golden
        } else {
            ParticleKind::Normal
        };
        let vel = Vec2::new(frame.jitter(3.0), frame.jitter(3.0));
        let hue = PARTICLE_HUE_MIN + frame.rng.gen::<f32>() * (PARTICLE_HUE_MAX - PARTICLE_HUE_MIN);
        let size = frame.rng.gen::<f32>() * 10.0 + 5.0;
        self.particles.push(Particle {
            kind,
            pos: at,
            vel,
            life: 1.0,
            hue,
            size,
            trail: SmallVec::new(),
        });
        if matches!(kind, ParticleKind::Golden | ParticleKind::Star) {
            self.burst(at, frame);
        }
    }

    fn burst(&mut self, at: Vec2, frame: &mut Frame<'_>) {
        for i in 0..PARTICLE_BURST_COUNT {
            let angle = TAU * i as f32 / PARTICLE_BURST_COUNT as f32;
            let hue = frame.rng.gen::<f32>() * 60.0 + 180.0;
            let size = frame.rng.gen::<f32>() * 3.0 + 2.0;
            self.particles.push(Particle {
                kind: ParticleKind::Normal,
                pos: at,
                vel: Vec2::from_angle(angle) * 2.0,
                life: 0.5,
                hue,
                size,
                trail: SmallVec::new(),
            });
        }
    }

    /// One faint line between the first close pair found.
    fn connection(&self, list: &mut DisplayList) {
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let d = a.pos.distance(b.pos);
                if d < PARTICLE_CONNECTION_DISTANCE && d > 20.0 {
                    list.line(a.pos, b.pos, Color::rgba(255, 255, 255, a.life * 0.3), 1.0);
                    return;
                }
            }
        }
    }

    fn step(p: &mut Particle, frame: &mut Frame<'_>) {
        if p.trail.len() == PARTICLE_TRAIL_LENGTH {
            p.trail.remove(0);
        }
        p.trail.push(p.pos);

        p.vel += Vec2::new(frame.jitter(0.4), frame.jitter(0.4));
        if frame.chance(0.02) {
            p.vel = Vec2::new(frame.jitter(5.0), frame.jitter(5.0));
        }
        p.pos += p.vel;
        p.life -= PARTICLE_LIFE_DECAY;
        p.vel *= 0.98;

        let (w, h) = (frame.surface.width, frame.surface.height);
        if p.pos.x < p.size || p.pos.x > w - p.size {
            p.vel.x *= -0.8;
            p.pos.x = if p.pos.x < p.size { p.size } else { w - p.size };
        }
        let top = HEADER_HEIGHT + p.size;
        if p.pos.y < top || p.pos.y > h - p.size {
            p.vel.y *= -0.8;
            p.pos.y = if p.pos.y < top { top } else { h - p.size };
        }
    }

    fn draw(p: &Particle, now_ms: f64, list: &mut DisplayList) {
        let n = p.trail.len() as f32;
        for (i, pos) in p.trail.iter().enumerate() {
            let alpha = (i as f32 / n) * p.life * 0.3;
            list.circle(*pos, p.size * 0.5, Color::hsla(p.hue, 80.0, 60.0, alpha));
        }
        match p.kind {
            ParticleKind::Star => {
                let spin = (now_ms * 0.001) as f32;
                let color = Color::hsla((now_ms / 10.0 % 360.0) as f32, 80.0, 70.0, p.life);
                list.push(DrawCmd::Polygon {
                    points: star_points(p.pos, p.size, spin),
                    paint: color.into(),
                    glow: Some(Glow {
                        blur: PARTICLE_GLOW_RADIUS,
                        color,
                    }),
                });
            }
            ParticleKind::Golden => {
                let halo = radial_gradient(
                    p.pos,
                    0.0,
                    p.size * 2.0,
                    &[
                        (0.0, Color::hsla(45.0, 100.0, 70.0, p.life)),
                        (0.5, Color::hsla(45.0, 80.0, 50.0, p.life * 0.5)),
                        (1.0, Color::hsla(45.0, 60.0, 30.0, 0.0)),
                    ],
                );
                list.push(DrawCmd::FillCircle {
                    center: p.pos,
                    radius: p.size * 2.0,
                    paint: halo,
                    glow: None,
                });
                list.circle(p.pos, p.size * 0.7, Color::hsla(45.0, 100.0, 90.0, p.life));
            }
            ParticleKind::Rainbow => {
                let hue = (now_ms / 20.0 % 360.0) as f32 + p.hue;
                let paint = radial_gradient(
                    p.pos,
                    0.0,
                    p.size,
                    &[
                        (0.0, Color::hsla(hue, 80.0, 70.0, p.life)),
                        (1.0, Color::hsla(hue + 60.0, 70.0, 50.0, p.life * 0.5)),
                    ],
                );
                list.push(DrawCmd::FillCircle {
                    center: p.pos,
                    radius: p.size,
                    paint,
                    glow: Some(Glow {
                        blur: PARTICLE_GLOW_RADIUS,
                        color: Color::hsla(hue, 80.0, 60.0, p.life),
                    }),
                });
            }
            ParticleKind::Normal => {
                list.circle(p.pos, p.size, Color::hsla(p.hue, 80.0, 60.0, p.life));
            }
        }
    }
}

/// Five-pointed star outline, inner radius half the outer.
fn star_points(center: Vec2, size: f32, spin: f32) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(10);
    for i in 0..5 {
        let angle = TAU * i as f32 / 5.0 - PI / 2.0 + spin;
        points.push(center + Vec2::from_angle(angle) * size);
        points.push(center + Vec2::from_angle(angle + PI / 5.0) * size * 0.5);
    }
    points
}

impl Activity for Particles {
    fn kind(&self) -> ViewKind {
        ViewKind::Particles
    }

    fn pointer_start(&mut self, point: Vec2, frame: &mut Frame<'_>) {
        self.spawn(point, frame);
        let y_ratio = frame.surface.y_ratio(point.y);
        frame.cue(Cue::SynthStart {
            view: ViewKind::Particles,
            y_ratio,
        });
    }

    fn pointer_move(&mut self, point: Vec2, frame: &mut Frame<'_>) {
        self.spawn(point, frame);
    }

    fn ghost(&mut self, frame: &mut Frame<'_>) {
        let at = frame.random_point();
        self.spawn(at, frame);
    }

    fn update(&mut self, frame: &mut Frame<'_>) -> DisplayList {
        let mut list = DisplayList::with_capacity(self.particles.len() * 4 + 2);
        list.push(DrawCmd::Fade(Color::rgba(5, 5, 5, CANVAS_FADE_ALPHA)));

        if self.particles.len() < PARTICLE_AMBIENT_MIN && frame.chance(PARTICLE_AMBIENT_SPAWN_CHANCE) {
            let at = frame.random_point();
            self.spawn(at, frame);
        }

        if frame.chance(EMERGENT_EVENT_CHANCE_COMMON) {
            self.connection(&mut list);
        }

        for p in self.particles.iter_mut() {
            Self::step(p, frame);
        }
        self.particles.retain(|p| p.life > 0.0);
        for p in &self.particles {
            Self::draw(p, frame.now_ms, &mut list);
        }
        list
    }

    fn entity_count(&self) -> usize {
        self.particles.len()
    }
}
