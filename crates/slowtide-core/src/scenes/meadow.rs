use super::*;
use crate::draw::DrawCmd;

const SKY: [(f32, &str); 4] = [
    (0.0, "#8BA5B5"),
    (0.4, "#9FB5C5"),
    (0.7, "#B0C5CF"),
    (1.0, "#C5D5DF"),
];
const MEADOW: [(f32, &str); 4] = [
    (0.0, "#4D5A42"),
    (0.3, "#3D4A35"),
    (0.7, "#2D3A28"),
    (1.0, "#1D2A1B"),
];

/// One rolling ridge: vertical anchor, gradient colors, bottom, parallax and shape.
struct Ridge {
    top: f32,
    spread: f32,
    colors: [&'static str; 2],
    bottom: f32,
    parallax: f32,
    shape: fn(f32) -> f32,
}

pub(super) fn render(s: Surface, scroll: f32) -> DisplayList {
    let mut list = DisplayList::with_capacity(340);
    list.push(DrawCmd::Clear);
    sky(&mut list, s, 0.5, &SKY, &warm_glow(0.06));

    let ridges = [
        Ridge {
            top: 0.35,
            spread: 50.0,
            colors: ["#5D7050", "#4D5A42"],
            bottom: 0.5,
            parallax: 0.3,
            shape: |x| (x * 0.008).sin() * 30.0 + (x * 0.015).sin() * 15.0,
        },
        Ridge {
            top: 0.42,
            spread: 40.0,
            colors: ["#506048", "#405038"],
            bottom: 0.6,
            parallax: 0.5,
            shape: |x| (x * 0.01 + 1.0).sin() * 25.0 + (x * 0.02).sin() * 12.0,
        },
        Ridge {
            top: 0.5,
            spread: 30.0,
            colors: ["#455040", "#354030"],
            bottom: 1.0,
            parallax: 0.7,
            shape: |x| (x * 0.012 + 2.0).sin() * 20.0 + (x * 0.025).sin() * 10.0,
        },
    ];
    for ridge in &ridges {
        let y = s.height * ridge.top;
        let paint = vertical_gradient(
            y - ridge.spread,
            y + ridge.spread,
            &[(0.0, hex(ridge.colors[0])), (1.0, hex(ridge.colors[1]))],
        );
        let shape = ridge.shape;
        wavy_band(
            &mut list,
            s,
            scroll * ridge.parallax,
            20.0,
            s.height * ridge.bottom,
            paint,
            move |x| y + shape(x),
        );
    }

    let horizon = s.height * SCENE_HORIZON_RATIO;
    list.rect(
        0.0,
        horizon,
        s.width,
        s.height - horizon,
        vertical_gradient(horizon, s.height, &stops(&MEADOW)),
    );
    grass(&mut list, s, scroll * PARALLAX_GROUND, horizon);
    list
}

fn grass(list: &mut DisplayList, s: Surface, offset: f32, horizon: f32) {
    let world = world_width(s);
    for i in 0..150 {
        let seed = i as f64 * 100.0 + 1.0;
        let base_x = seeded_random(seed) * world;
        let Some(x) = visible_x(base_x, offset, s, 50.0) else {
            continue;
        };
        let y = horizon + 20.0 + seeded_random(seed + 1.0) * (s.height - horizon - 40.0).max(0.0);
        let height = 10.0 + seeded_random(seed + 2.0) * 20.0;
        let color = Color::hsl(
            80.0 + seeded_random(seed + 3.0) * 20.0,
            20.0 + seeded_random(seed + 4.0) * 15.0,
            20.0 + seeded_random(seed + 5.0) * 15.0,
        );
        let bend = (seeded_random(seed + 6.0) - 0.5) * 8.0;
        let tip = (seeded_random(seed + 7.0) - 0.5) * 5.0;
        list.push(DrawCmd::Curve {
            from: Vec2::new(x, y),
            control: Vec2::new(x + bend, y - height * 0.5),
            to: Vec2::new(x + tip, y - height),
            color,
            width: 1.5,
        });
        list.push(DrawCmd::Curve {
            from: Vec2::new(x + 2.0, y),
            control: Vec2::new(x + 2.0 + bend * 0.7, y - height * 0.6),
            to: Vec2::new(x + 2.0 + tip * 0.8, y - height * 0.8),
            color,
            width: 1.5,
        });
    }
}
