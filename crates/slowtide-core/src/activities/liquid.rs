use super::{Activity, Cue, Frame};
use crate::config::*;
use crate::draw::{Color, DisplayList, DrawCmd, Glow, Paint};
use glam::Vec2;
use std::collections::VecDeque;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RingStyle {
    /// Ring from a touch; `rainbow_speed` spreads the hues.
    Splash { rainbow_speed: f32 },
    /// Outer rings added during the high-engagement phase.
    Halo,
    /// Spontaneous ripple.
    Ripple,
}

/// A ring that is stroked once, on the first frame at or after `at_ms`.
#[derive(Clone, Debug)]
pub struct Ring {
    pub center: Vec2,
    pub radius: f32,
    pub at_ms: f64,
    pub style: RingStyle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pending {
    /// Delayed splash near a touch.
    Drop(Vec2),
    Ripple(Vec2),
}

/// Glowing drops on slow orbits; touches leave rings behind.
#[derive(Default)]
pub struct Liquid {
    pub rings: Vec<Ring>,
    pub pending: Vec<(f64, Pending)>,
    pub orbit_phase: f32,
    pub trails: Vec<VecDeque<Vec2>>,
}

impl Liquid {
    /// Schedule the expanding rings of one splash.
    pub fn splash(&mut self, at: Vec2, now_ms: f64, high_intensity: bool) {
        let rainbow_speed = if high_intensity {
            HIGH_INTENSITY_LIQUID_RAINBOW_SPEED as f32
        } else {
            1.0
        };
        for r in (5..=30).step_by(5) {
            self.rings.push(Ring {
                center: at,
                radius: r as f32,
                at_ms: now_ms + (r - 5) as f64 * 30.0,
                style: RingStyle::Splash { rainbow_speed },
            });
        }
        if high_intensity {
            for r in (35..=60).step_by(5) {
                self.rings.push(Ring {
                    center: at,
                    radius: r as f32,
                    at_ms: now_ms + (r - 5) as f64 * 25.0,
                    style: RingStyle::Halo,
                });
            }
        }
    }

    pub fn ripple(&mut self, at: Vec2, now_ms: f64) {
        for r in (10..=50).step_by(10) {
            self.rings.push(Ring {
                center: at,
                radius: r as f32,
                at_ms: now_ms + (r - 10) as f64 * 40.0,
                style: RingStyle::Ripple,
            });
        }
    }

    /// A splash at the point followed by a few delayed splashes nearby.
    pub fn touch(&mut self, at: Vec2, frame: &mut Frame<'_>) {
        let high = frame.tuning.high_intensity;
        self.splash(at, frame.now_ms, high);
        let drops = if high {
            HIGH_INTENSITY_LIQUID_NEARBY_DROPS
        } else {
            3
        };
        for i in 0..drops {
            let offset = Vec2::new(frame.jitter(100.0), frame.jitter(100.0));
            self.pending
                .push((frame.now_ms + i as f64 * 100.0, Pending::Drop(at + offset)));
        }
    }

    fn flash(&mut self, frame: &mut Frame<'_>, list: &mut DisplayList) {
        list.push(DrawCmd::Fade(Color::rgba(255, 255, 255, 0.2)));
        for i in 0..3 {
            let at = frame.random_point();
            self.pending
                .push((frame.now_ms + i as f64 * 100.0, Pending::Ripple(at)));
        }
    }

    fn run_pending(&mut self, now_ms: f64, high_intensity: bool) {
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(at, _)| *at <= now_ms);
        self.pending = waiting;
        for (_, job) in due {
            match job {
                Pending::Drop(at) => self.splash(at, now_ms, high_intensity),
                Pending::Ripple(at) => self.ripple(at, now_ms),
            }
        }
    }

    fn draw_due_rings(&mut self, now_ms: f64, list: &mut DisplayList) {
        let t = (now_ms % 360.0) as f32;
        self.rings.retain(|ring| {
            if ring.at_ms > now_ms {
                return true;
            }
            let r = ring.radius;
            let (color, width) = match ring.style {
                RingStyle::Splash { rainbow_speed } => (
                    Color::hsla(t + r * 10.0 * rainbow_speed, 70.0, 60.0, 1.0 - r / 30.0),
                    2.0,
                ),
                RingStyle::Halo => (Color::hsla(t + r * 15.0, 80.0, 70.0, 1.0 - r / 60.0), 3.0),
                RingStyle::Ripple => (Color::hsla(t + r * 5.0, 70.0, 60.0, 0.8 - r / 60.0), 3.0),
            };
            list.push(DrawCmd::StrokeCircle {
                center: ring.center,
                radius: r,
                color,
                width,
            });
            false
        });
    }
}

impl Activity for Liquid {
    fn kind(&self) -> ViewKind {
        ViewKind::Liquid
    }

    fn pointer_start(&mut self, point: Vec2, frame: &mut Frame<'_>) {
        self.touch(point, frame);
        let y_ratio = frame.surface.y_ratio(point.y);
        frame.cue(Cue::SynthStart {
            view: ViewKind::Liquid,
            y_ratio,
        });
    }

    fn pointer_move(&mut self, point: Vec2, frame: &mut Frame<'_>) {
        self.touch(point, frame);
    }

    fn ghost(&mut self, frame: &mut Frame<'_>) {
        let at = frame.random_point();
        self.touch(at, frame);
    }

    fn update(&mut self, frame: &mut Frame<'_>) -> DisplayList {
        let mut list = DisplayList::new();
        list.push(DrawCmd::Fade(Color::rgba(5, 5, 5, LIQUID_FADE_ALPHA)));

        let high = frame.tuning.high_intensity;
        let now = frame.now_ms;

        let mut chance = frame.tuning.emergent.chance();
        if high {
            chance = Some(chance.unwrap_or(0.0).max(HIGH_INTENSITY_LIQUID_SPONTANEOUS_CHANCE));
        }
        if let Some(p) = chance {
            if frame.chance(p) {
                let at = frame.random_point();
                self.ripple(at, now);
            }
        }

        if high && frame.chance(HIGH_INTENSITY_LIQUID_FLASH_CHANCE) {
            self.flash(frame, &mut list);
        }

        let (speed, count) = if high {
            (
                HIGH_INTENSITY_LIQUID_ORBIT_SPEED,
                HIGH_INTENSITY_LIQUID_ORBIT_COUNT,
            )
        } else {
            (0.01, 3)
        };
        self.orbit_phase += speed;
        if high {
            self.trails.resize_with(count, VecDeque::new);
        } else {
            self.trails.clear();
        }

        let s = frame.surface;
        let t = (now % 360.0) as f32;
        let t_slow = (now / 10.0 % 360.0) as f32;
        for i in 0..count {
            let fi = i as f32;
            let phase = self.orbit_phase + fi * TAU / count as f32;
            let radius = Vec2::new(s.width / 3.0, s.height / 4.0) * (1.0 + fi * 0.1);
            let drop = s.center() + Vec2::new(phase.sin() * radius.x, (phase * 1.3).cos() * radius.y);
            let size = if high { 20.0 + fi * 3.0 } else { 25.0 - fi * 5.0 };

            if let Some(trail) = self.trails.get_mut(i) {
                trail.push_back(drop);
                if trail.len() > HIGH_INTENSITY_LIQUID_TRAIL_LENGTH {
                    trail.pop_front();
                }
                let n = trail.len() as f32;
                for (k, pos) in trail.iter().enumerate() {
                    let f = k as f32 / n;
                    list.circle(*pos, size * f * 0.5, Color::hsla(t + fi * 100.0, 80.0, 70.0, f * 0.3));
                }
            }

            let (color, blur) = if high {
                (Color::hsl(t_slow + fi * 100.0, 80.0, 70.0), 40.0)
            } else {
                (Color::hsl(t + fi * 100.0, 70.0, 60.0), 30.0)
            };
            list.push(DrawCmd::FillCircle {
                center: drop,
                radius: size.max(0.0),
                paint: Paint::Solid(color),
                glow: Some(Glow { blur, color }),
            });

            if high && frame.chance(0.02) {
                self.ripple(drop, now);
            }
        }

        self.run_pending(now, high);
        self.draw_due_rings(now, &mut list);
        list
    }

    fn entity_count(&self) -> usize {
        self.rings.len() + self.pending.len()
    }
}
