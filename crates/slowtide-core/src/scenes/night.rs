use super::*;
use crate::draw::DrawCmd;

const SKY: [(f32, &str); 4] = [
    (0.0, "#1E1E38"),
    (0.3, "#16162C"),
    (0.6, "#1A1A30"),
    (1.0, "#222240"),
];
const GROUND: [(f32, &str); 3] = [(0.0, "#222235"), (0.3, "#1A1A28"), (1.0, "#141420")];
const CRATERS: [(f32, f32, f32); 5] = [
    (-10.0, -8.0, 6.0),
    (15.0, 10.0, 5.0),
    (-8.0, 15.0, 4.0),
    (10.0, -12.0, 4.0),
    (18.0, 5.0, 3.0),
];
const MOON_RADIUS: f32 = 50.0;

pub(super) fn render(s: Surface, scroll: f32) -> DisplayList {
    let mut list = DisplayList::with_capacity(520);
    list.push(DrawCmd::Clear);
    sky(&mut list, s, 0.7, &SKY, &[]);
    stars(&mut list, s);
    moon(&mut list, s);
    trees(&mut list, s, scroll * PARALLAX_TREES);
    ground(&mut list, s, scroll * PARALLAX_GROUND);
    list
}

fn stars(list: &mut DisplayList, s: Surface) {
    let mut bright = Vec::new();
    for i in 0..145 {
        let seed = i as f64 * 100.0 + 1.0;
        let at = Vec2::new(
            seeded_random(seed) * s.width,
            seeded_random(seed + 1.0) * s.height * 0.6,
        );
        let size = 0.5 + seeded_random(seed + 2.0) * 1.5;
        let brightness = 0.5 + seeded_random(seed + 3.0) * 0.5;
        list.circle(at, size, Color::rgba(255, 255, 240, brightness));
        if seeded_random(seed + 4.0) > 0.8 {
            bright.push((at, size));
        }
    }
    for (at, size) in bright {
        let r = size * 5.0;
        list.rect(
            at.x - r,
            at.y - r,
            r * 2.0,
            r * 2.0,
            radial_gradient(
                at,
                0.0,
                r,
                &[
                    (0.0, Color::rgba(255, 255, 250, 0.6)),
                    (0.5, Color::rgba(255, 255, 240, 0.2)),
                    (1.0, Color::rgba(255, 255, 230, 0.0)),
                ],
            ),
        );
        list.circle(at, size, Color::rgba(255, 255, 250, 0.95));
    }
}

fn moon(list: &mut DisplayList, s: Surface) {
    let c = Vec2::new(s.width * 0.78, s.height * 0.18);
    let halo = |list: &mut DisplayList, scale: f32, stops: &[(f32, Color)]| {
        let r = MOON_RADIUS * scale;
        list.rect(c.x - r, c.y - r, r * 2.0, r * 2.0, radial_gradient(c, 0.0, r, stops));
    };
    halo(
        list,
        6.0,
        &[
            (0.0, Color::rgba(255, 250, 230, 0.7)),
            (0.3, Color::rgba(255, 245, 220, 0.4)),
            (0.6, Color::rgba(255, 240, 210, 0.2)),
            (1.0, Color::rgba(255, 235, 200, 0.0)),
        ],
    );
    halo(
        list,
        3.0,
        &[
            (0.0, Color::rgba(255, 252, 245, 0.85)),
            (0.5, Color::rgba(255, 248, 235, 0.5)),
            (1.0, Color::rgba(255, 245, 225, 0.0)),
        ],
    );
    list.circle(c, MOON_RADIUS, Color::rgba(255, 252, 245, 0.95));
    for (dx, dy, r) in CRATERS {
        list.circle(c + Vec2::new(dx, dy), r, Color::rgba(230, 220, 200, 0.2));
    }
}

fn trees(list: &mut DisplayList, s: Surface, offset: f32) {
    let horizon = s.height * SCENE_HORIZON_RATIO;
    let world = world_width(s);
    for i in 0..50 {
        let seed = i as f64 * 100.0 + 1000.0;
        let base_x = (i as f32 / 50.0) * world * 1.1;
        let Some(x) = visible_x(base_x, offset, s, 100.0) else {
            continue;
        };
        let h = 40.0 + seeded_random(seed + 1.0) * 40.0;
        let w = 25.0 + seeded_random(seed + 2.0) * 20.0;
        let shade = if seeded_random(seed + 3.0) > 0.5 {
            "#1A1A28"
        } else {
            "#161622"
        };
        pine(list, x, horizon, w, h, hex(shade));
    }
    for i in 0..30 {
        let seed = i as f64 * 100.0 + 2000.0;
        let base_x = (i as f32 / 30.0) * world * 1.08;
        let Some(x) = visible_x(base_x, offset, s, 150.0) else {
            continue;
        };
        let h = 70.0 + seeded_random(seed + 1.0) * 50.0;
        let w = 45.0 + seeded_random(seed + 2.0) * 30.0;
        let dy = seeded_random(seed + 3.0) * 20.0;
        pine(list, x, horizon + dy, w, h, hex("#1E1E2C"));
    }
}

fn ground(list: &mut DisplayList, s: Surface, offset: f32) {
    let ground_y = s.height * SCENE_HORIZON_RATIO;
    let band = s.height - ground_y;
    list.rect(
        0.0,
        ground_y,
        s.width,
        band,
        radial_gradient(
            Vec2::new(s.width * 0.78, s.height * 0.3),
            0.0,
            s.width * 1.5,
            &[
                (0.0, Color::rgba(100, 100, 120, 0.5)),
                (0.25, Color::rgba(80, 80, 100, 0.35)),
                (0.5, Color::rgba(60, 60, 80, 0.25)),
                (0.75, Color::rgba(45, 45, 60, 0.12)),
                (1.0, Color::rgba(30, 30, 45, 0.05)),
            ],
        ),
    );
    list.rect(
        0.0,
        ground_y,
        s.width,
        band,
        vertical_gradient(ground_y, s.height, &stops(&GROUND)),
    );
    wavy_band(list, s, offset, 40.0, ground_y, hex("#1E1E30"), |x| {
        ground_y + (x * 0.01).sin() * 5.0
    });
}
