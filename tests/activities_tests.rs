// Host-side tests for the interactive activities.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use slowtide_core::activities::bubbles::{target_count, Bubble};
use slowtide_core::activities::liquid::RingStyle;
use slowtide_core::activities::marbles::Marble;
use slowtide_core::activities::particles::{Particle, ParticleKind};
use slowtide_core::activities::sorting::Block;
use slowtide_core::activities::*;
use slowtide_core::draw::{Color, DrawCmd};
use slowtide_core::sound::Sfx;
use slowtide_core::*;

struct Harness {
    rng: StdRng,
    cues: Vec<Cue>,
    surface: Surface,
    tuning: Tuning,
    now: f64,
}

impl Harness {
    fn new() -> Self {
        Self {
            rng: StdRng::seed_from_u64(11),
            cues: Vec::new(),
            surface: Surface::new(800.0, 600.0),
            tuning: Tuning::default(),
            now: 1_000.0,
        }
    }

    fn frame(&mut self) -> Frame<'_> {
        Frame {
            surface: self.surface,
            now_ms: self.now,
            tuning: self.tuning,
            rng: &mut self.rng,
            cues: &mut self.cues,
        }
    }
}

fn bubble_at(x: f32, y: f32, size: f32) -> Bubble {
    Bubble {
        pos: Vec2::new(x, y),
        size,
        scale: 1.0,
        speed: 2.0,
        wobble: 0.0,
        rhythm_offset: 0.0,
        hue: 200.0,
        glow: false,
    }
}

fn marble_at(x: f32, y: f32) -> Marble {
    Marble {
        pos: Vec2::new(x, y),
        vel: Vec2::ZERO,
        radius: 20.0,
        hue: 10.0,
    }
}

fn block_at(x: f32, y: f32) -> Block {
    Block {
        pos: Vec2::new(x, y),
        size: Vec2::new(60.0, 40.0),
        color: Color::rgb(1, 2, 3),
        angle: 0.0,
        spin: 0.0,
        drift: Vec2::ZERO,
        scale: 1.0,
        prev_x: 0.0,
        phase: 0.0,
        glow: false,
    }
}

#[test]
fn every_activity_starts_empty_and_reports_its_kind() {
    for kind in ViewKind::ACTIVITIES {
        let view = new_activity(kind).unwrap();
        assert_eq!(view.kind(), kind);
        assert_eq!(view.entity_count(), 0);
    }
    assert!(new_activity(ViewKind::Lake).is_none());
}

#[test]
fn bubble_target_scales_with_area_and_density() {
    let t = Tuning::default();
    assert_eq!(target_count(800.0 * 600.0, &t), 60);
    assert_eq!(target_count(100.0 * 100.0, &t), 25);
    assert_eq!(target_count(4000.0 * 4000.0, &t), 80);
    let high = Tuning {
        high_intensity: true,
        ..t
    };
    assert_eq!(target_count(4000.0 * 4000.0, &high), 120);
}

#[test]
fn bubbles_fill_surface_on_init() {
    let mut h = Harness::new();
    let mut b = Bubbles::default();
    b.init(&mut h.frame());
    assert_eq!(b.bubbles.len(), 60);
}

#[test]
fn tap_pops_topmost_bubble() {
    let mut h = Harness::new();
    let mut b = Bubbles::default();
    b.bubbles.push(bubble_at(100.0, 300.0, 20.0));
    b.bubbles.push(bubble_at(105.0, 300.0, 20.0));
    b.pointer_start(Vec2::new(110.0, 300.0), &mut h.frame());
    assert_eq!(b.bubbles.len(), 1);
    assert_eq!(b.bubbles[0].pos.x, 100.0);
    assert_eq!(b.pops.len(), 8);
    assert!(h.cues.contains(&Cue::Haptic(10)));
    assert!(h.cues.contains(&Cue::Sfx(Sfx::Pop)));
}

#[test]
fn high_intensity_pop_doubles_particles() {
    let mut h = Harness::new();
    h.tuning.high_intensity = true;
    let mut b = Bubbles::default();
    b.bubbles.push(bubble_at(100.0, 300.0, 20.0));
    b.pointer_start(Vec2::new(100.0, 300.0), &mut h.frame());
    assert_eq!(b.pops.len(), 16);
}

#[test]
fn tap_outside_hit_radius_does_nothing() {
    let mut h = Harness::new();
    let mut b = Bubbles::default();
    b.bubbles.push(bubble_at(100.0, 300.0, 20.0));
    b.pointer_start(Vec2::new(141.0, 300.0), &mut h.frame());
    assert_eq!(b.bubbles.len(), 1);
    assert!(h.cues.is_empty());
}

#[test]
fn pop_particles_fade_out() {
    let mut h = Harness::new();
    let mut b = Bubbles::default();
    b.bubbles.push(bubble_at(100.0, 300.0, 20.0));
    b.pointer_start(Vec2::new(100.0, 300.0), &mut h.frame());
    for _ in 0..26 {
        b.update(&mut h.frame());
    }
    assert!(b.pops.is_empty());
}

#[test]
fn bubbles_leave_through_the_top() {
    let mut h = Harness::new();
    let mut b = Bubbles::default();
    b.bubbles.push(bubble_at(400.0, -59.0, 20.0));
    b.update(&mut h.frame());
    assert!(b.bubbles.iter().all(|bubble| bubble.pos.y > 0.0));
}

#[test]
fn ghost_adds_a_bubble_below_the_surface() {
    let mut h = Harness::new();
    let mut b = Bubbles::default();
    b.ghost(&mut h.frame());
    assert_eq!(b.bubbles.len(), 1);
    assert!(b.bubbles[0].pos.y > 600.0);
}

#[test]
fn marble_count_follows_density_and_intensity() {
    let mut h = Harness::new();
    let mut m = Marbles::default();
    m.init(&mut h.frame());
    assert_eq!(m.marbles.len(), 50);

    h.tuning.density = VisualDensity::Minimal;
    let mut m = Marbles::default();
    m.init(&mut h.frame());
    assert_eq!(m.marbles.len(), 20);

    h.tuning.density = VisualDensity::Standard;
    h.tuning.high_intensity = true;
    let mut m = Marbles::default();
    m.init(&mut h.frame());
    assert_eq!(m.marbles.len(), 80);
}

#[test]
fn push_moves_only_nearby_marbles_away() {
    let mut m = Marbles::default();
    m.marbles.push(marble_at(300.0, 300.0));
    m.marbles.push(marble_at(700.0, 300.0));
    m.push_from(Vec2::new(250.0, 300.0));
    assert!(m.marbles[0].vel.x > 0.0);
    assert!(m.marbles[0].vel.y.abs() < 1e-4);
    assert_eq!(m.marbles[1].vel, Vec2::ZERO);
}

#[test]
fn walls_bounce_and_clamp() {
    let mut m = Marbles::default();
    let mut marble = marble_at(25.0, 300.0);
    marble.vel = Vec2::new(-10.0, 0.0);
    m.marbles.push(marble);
    assert!(m.step(800.0, 600.0));
    assert!(m.marbles[0].vel.x > 0.0);
    assert!(m.marbles[0].pos.x >= 20.0);
}

#[test]
fn marbles_stay_below_header() {
    let mut m = Marbles::default();
    let mut marble = marble_at(400.0, 90.0);
    marble.vel = Vec2::new(0.0, -30.0);
    m.marbles.push(marble);
    m.step(800.0, 600.0);
    assert!(m.marbles[0].pos.y >= 100.0);
}

#[test]
fn colliding_marbles_separate_with_one_clack() {
    let mut h = Harness::new();
    let mut m = Marbles::default();
    m.marbles.push(marble_at(400.0, 300.0));
    m.marbles.push(marble_at(410.0, 300.0));
    m.update(&mut h.frame());
    assert!(m.marbles[0].vel.x < 0.0);
    assert!(m.marbles[1].vel.x > 0.0);
    let clacks = h.cues.iter().filter(|c| **c == Cue::Sfx(Sfx::Clack)).count();
    assert_eq!(clacks, 1);
}

#[test]
fn marble_ghost_kicks_one_marble() {
    let mut h = Harness::new();
    let mut m = Marbles::default();
    m.marbles.push(marble_at(400.0, 300.0));
    m.ghost(&mut h.frame());
    assert_ne!(m.marbles[0].vel, Vec2::ZERO);
}

#[test]
fn sorting_fills_surface_on_init() {
    let mut h = Harness::new();
    let mut s = Sorting::default();
    s.init(&mut h.frame());
    assert_eq!(s.blocks.len(), 20);

    h.tuning.high_intensity = true;
    let mut s = Sorting::default();
    s.init(&mut h.frame());
    assert_eq!(s.blocks.len(), 30);
}

#[test]
fn drag_picks_topmost_block_and_follows_pointer() {
    let mut h = Harness::new();
    let mut s = Sorting::default();
    s.blocks.push(block_at(200.0, 300.0));
    s.blocks.push(block_at(210.0, 300.0));
    s.blocks.push(block_at(600.0, 300.0));

    s.pointer_start(Vec2::new(205.0, 300.0), &mut h.frame());
    let held = s.held().unwrap();
    assert_eq!(held.pos.x, 210.0);
    assert_eq!(s.blocks.len(), 3);
    assert!(h.cues.contains(&Cue::Haptic(10)));
    assert!(h.cues.contains(&Cue::SynthStart {
        view: ViewKind::Sorting,
        y_ratio: 0.5
    }));

    s.pointer_move(Vec2::new(235.0, 320.0), &mut h.frame());
    let held = s.held().unwrap();
    assert_eq!(held.pos, Vec2::new(240.0, 320.0));
    assert!((held.spin - 0.15).abs() < 1e-6);

    s.pointer_end(&mut h.frame());
    assert!(s.held().is_none());
}

#[test]
fn hit_box_has_margin() {
    let b = block_at(200.0, 300.0);
    assert!(b.contains(Vec2::new(249.0, 300.0)));
    assert!(!b.contains(Vec2::new(251.0, 300.0)));
}

#[test]
fn press_on_empty_space_grabs_nothing() {
    let mut h = Harness::new();
    let mut s = Sorting::default();
    s.blocks.push(block_at(200.0, 300.0));
    s.pointer_start(Vec2::new(700.0, 500.0), &mut h.frame());
    assert!(s.held().is_none());
    assert!(h.cues.is_empty());
}

#[test]
fn sorting_draws_one_block_each() {
    let mut h = Harness::new();
    let mut s = Sorting::default();
    s.init(&mut h.frame());
    let list = s.update(&mut h.frame());
    let blocks = list
        .iter()
        .filter(|c| matches!(c, DrawCmd::Block { .. }))
        .count();
    assert_eq!(blocks, 20);
}

#[test]
fn particle_spawn_and_synth_cue() {
    let mut h = Harness::new();
    let mut p = Particles::default();
    p.pointer_start(Vec2::new(100.0, 150.0), &mut h.frame());
    let n = p.entity_count();
    assert!(n == 1 || n == 7);
    assert_eq!(
        h.cues[0],
        Cue::SynthStart {
            view: ViewKind::Particles,
            y_ratio: 0.25
        }
    );
}

#[test]
fn spent_particles_are_removed() {
    let mut h = Harness::new();
    let mut p = Particles::default();
    for i in 0..40 {
        p.particles.push(Particle {
            kind: ParticleKind::Normal,
            pos: Vec2::new(100.0 + i as f32 * 10.0, 300.0),
            vel: Vec2::ZERO,
            life: 0.005,
            hue: 220.0,
            size: 5.0,
            trail: Default::default(),
        });
    }
    p.update(&mut h.frame());
    assert_eq!(p.entity_count(), 0);
}

#[test]
fn particles_stay_on_surface() {
    let mut h = Harness::new();
    let mut p = Particles::default();
    for _ in 0..20 {
        p.ghost(&mut h.frame());
    }
    for _ in 0..60 {
        p.update(&mut h.frame());
        h.now += 16.0;
    }
    for particle in &p.particles {
        assert!(particle.pos.x >= particle.size && particle.pos.x <= 800.0 - particle.size);
        assert!(particle.pos.y >= 80.0 + particle.size && particle.pos.y <= 600.0 - particle.size);
        assert!(particle.trail.len() <= 8);
    }
}

#[test]
fn liquid_touch_schedules_rings_and_drops() {
    let mut h = Harness::new();
    let mut l = Liquid::default();
    l.pointer_start(Vec2::new(400.0, 300.0), &mut h.frame());
    assert_eq!(l.rings.len(), 6);
    assert_eq!(l.pending.len(), 3);
    assert!(matches!(h.cues[0], Cue::SynthStart { view: ViewKind::Liquid, .. }));
}

#[test]
fn liquid_rings_are_drawn_once_when_due() {
    let mut h = Harness::new();
    let mut l = Liquid::default();
    l.touch(Vec2::new(400.0, 300.0), &mut h.frame());

    h.now = 10_000.0;
    l.update(&mut h.frame());
    assert!(l.pending.is_empty());
    let waiting = l.rings.len();
    assert!(waiting > 0);

    h.now = 20_000.0;
    let list = l.update(&mut h.frame());
    let strokes = list
        .iter()
        .filter(|c| matches!(c, DrawCmd::StrokeCircle { .. }))
        .count();
    assert_eq!(strokes, waiting);
    assert_eq!(l.entity_count(), 0);

    h.now = 30_000.0;
    let list = l.update(&mut h.frame());
    assert!(!list
        .iter()
        .any(|c| matches!(c, DrawCmd::StrokeCircle { .. })));
}

#[test]
fn high_intensity_liquid_splashes_wider() {
    let mut h = Harness::new();
    h.tuning.high_intensity = true;
    let mut l = Liquid::default();
    l.touch(Vec2::new(400.0, 300.0), &mut h.frame());
    assert_eq!(l.rings.len(), 12);
    assert_eq!(l.pending.len(), 6);
}

#[test]
fn emergent_roll_never_fires_when_off() {
    let mut rng = StdRng::seed_from_u64(3);
    let t = Tuning::default();
    assert_eq!(t.emergent, EmergentEvents::Off);
    assert!((0..5_000).all(|_| !t.roll_emergent(&mut rng)));

    let common = Tuning {
        emergent: EmergentEvents::Common,
        ..Tuning::default()
    };
    let fired = (0..5_000).filter(|_| common.roll_emergent(&mut rng)).count();
    assert!(fired > 0 && fired < 500, "fired {} times", fired);
}

#[test]
fn overlapping_bubbles_merge_into_one() {
    let mut b = Bubbles::default();
    b.bubbles.push(bubble_at(300.0, 300.0, 20.0));
    b.bubbles.push(bubble_at(310.0, 300.0, 20.0));
    b.bubbles[1].speed = 4.0;

    assert!(b.merge_pair(false));
    assert_eq!(b.bubbles.len(), 1);
    assert!((b.bubbles[0].size - 26.0).abs() < 1e-4);
    assert!((b.bubbles[0].speed - 3.0).abs() < 1e-4);
    assert_eq!(b.pops.len(), 8);
}

#[test]
fn merged_bubble_size_is_capped() {
    let mut b = Bubbles::default();
    b.bubbles.push(bubble_at(300.0, 300.0, 58.0));
    b.bubbles.push(bubble_at(300.0, 300.0, 50.0));
    assert!(b.merge_pair(true));
    assert_eq!(b.bubbles[0].size, BUBBLE_MAX_MERGED_SIZE);
    assert_eq!(b.pops.len(), 16);
}

#[test]
fn distant_bubbles_do_not_merge() {
    let mut b = Bubbles::default();
    b.bubbles.push(bubble_at(100.0, 300.0, 20.0));
    b.bubbles.push(bubble_at(500.0, 300.0, 20.0));
    assert!(!b.merge_pair(false));
    assert_eq!(b.bubbles.len(), 2);
    assert!(b.pops.is_empty());
}

#[test]
fn marbles_pull_toward_center() {
    let center = Vec2::new(400.0, (600.0 + HEADER_HEIGHT) / 2.0);
    let mut m = Marbles::default();
    m.marbles.push(marble_at(100.0, 150.0));
    m.marbles.push(marble_at(center.x + 10.0, center.y));
    m.pull_to_center(center);

    let pulled = m.marbles[0].vel;
    assert!((pulled.length() - 0.3).abs() < 1e-4);
    let before = m.marbles[0].pos.distance(center);
    m.step(800.0, 600.0);
    assert!(m.marbles[0].pos.distance(center) < before);
    // Marbles already near the centre are left alone.
    assert_eq!(m.marbles[1].vel, Vec2::ZERO);
}

#[test]
fn common_emergent_events_draw_marbles_inward() {
    let center = Vec2::new(400.0, (600.0 + HEADER_HEIGHT) / 2.0);
    let start = [Vec2::new(100.0, 150.0), Vec2::new(700.0, 550.0)];
    let run = |emergent| {
        let mut h = Harness::new();
        h.tuning.emergent = emergent;
        let mut m = Marbles::default();
        for p in start {
            m.marbles.push(marble_at(p.x, p.y));
        }
        for _ in 0..1_000 {
            m.update(&mut h.frame());
        }
        m.marbles.iter().map(|mb| mb.pos).collect::<Vec<_>>()
    };

    let still = run(EmergentEvents::Off);
    assert_eq!(still, start.to_vec());

    let moved = run(EmergentEvents::Common);
    let total = |ps: &[Vec2]| ps.iter().map(|p| p.distance(center)).sum::<f32>();
    assert!(total(&moved) < total(&start));
}

#[test]
fn nearby_blocks_attract_each_other() {
    let mut s = Sorting::default();
    s.blocks.push(block_at(100.0, 200.0));
    s.blocks.push(block_at(200.0, 200.0));
    s.blocks.push(block_at(700.0, 500.0));
    s.attract_pair();

    assert_eq!(s.blocks[0].drift, Vec2::new(3.0, 0.0));
    assert_eq!(s.blocks[1].drift, Vec2::new(-3.0, 0.0));
    assert_eq!(s.blocks[2].drift, Vec2::ZERO);
}

#[test]
fn held_block_is_not_attracted() {
    let mut s = Sorting::default();
    s.blocks.push(block_at(100.0, 200.0));
    s.blocks.push(block_at(200.0, 200.0));
    s.grab = Some(Vec2::ZERO);
    s.attract_pair();
    assert!(s.blocks.iter().all(|b| b.drift == Vec2::ZERO));
}

#[test]
fn liquid_ripples_appear_only_with_emergent_events() {
    let run = |emergent| {
        let mut h = Harness::new();
        h.tuning.emergent = emergent;
        let mut l = Liquid::default();
        let mut ripples = 0;
        for i in 0..2_000 {
            h.now = 1_000.0 + i as f64 * 16.0;
            l.update(&mut h.frame());
            ripples += l
                .rings
                .iter()
                .filter(|r| r.style == RingStyle::Ripple)
                .count();
        }
        ripples
    };
    assert_eq!(run(EmergentEvents::Off), 0);
    assert!(run(EmergentEvents::Common) > 0);
}

#[test]
fn common_emergent_events_pull_blocks_together() {
    let run = |emergent| {
        let mut h = Harness::new();
        h.tuning.emergent = emergent;
        let mut s = Sorting::default();
        s.blocks.push(block_at(100.0, 200.0));
        s.blocks.push(block_at(200.0, 200.0));
        for _ in 0..1_000 {
            s.update(&mut h.frame());
        }
        s.blocks[0].drift
    };
    assert_eq!(run(EmergentEvents::Off), Vec2::ZERO);
    let drift = run(EmergentEvents::Common);
    assert!(drift.x > 0.0, "drift {:?}", drift);
}
