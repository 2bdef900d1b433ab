use super::*;
use crate::draw::DrawCmd;

const SKY: [(f32, &str); 4] = [
    (0.0, "#5A4A6A"),
    (0.4, "#8A6A7A"),
    (0.7, "#C4856A"),
    (1.0, "#E8A080"),
];
const WATER: [(f32, &str); 4] = [
    (0.0, "#5A6A75"),
    (0.3, "#4A5A65"),
    (0.7, "#3A4A55"),
    (1.0, "#2A3A45"),
];
const GROUND: [(f32, &str); 4] = [
    (0.0, "#3A4530"),
    (0.3, "#2A3525"),
    (0.7, "#1A2518"),
    (1.0, "#0A1508"),
];

/// Sunset lake with trees bunched along both shores.
pub(super) fn render(s: Surface, scroll: f32) -> DisplayList {
    let mut list = DisplayList::with_capacity(200);
    list.push(DrawCmd::Clear);
    sky(
        &mut list,
        s,
        0.5,
        &SKY,
        &[
            (0.0, Color::rgba(220, 160, 120, 0.15)),
            (0.4, Color::rgba(200, 140, 100, 0.08)),
            (0.7, Color::rgba(180, 120, 80, 0.04)),
            (1.0, Color::rgba(160, 100, 60, 0.0)),
        ],
    );
    water(&mut list, s, scroll * PARALLAX_GROUND);
    trees(&mut list, s, scroll * PARALLAX_TREES);
    ground(&mut list, s, scroll * PARALLAX_GROUND);
    list
}

fn water(list: &mut DisplayList, s: Surface, offset: f32) {
    let top = s.height * 0.42;
    list.rect(
        0.0,
        top,
        s.width,
        s.height * 0.13,
        vertical_gradient(top, s.height * 0.55, &stops(&WATER)),
    );
    list.rect(
        0.0,
        top,
        s.width,
        50.0,
        vertical_gradient(
            top,
            top + 50.0,
            &[
                (0.0, Color::rgba(180, 110, 80, 0.2)),
                (0.5, Color::rgba(140, 90, 70, 0.08)),
                (1.0, Color::rgba(100, 70, 60, 0.0)),
            ],
        ),
    );
    wavy_band(list, s, offset, 20.0, top + 15.0, hex("#4A5A65"), |x| {
        top + (x * 0.015).sin() * 3.0 + (x * 0.03).sin() * 2.0
    });
}

/// Tree x positions in world space: dense at both edges, sparse in the middle.
fn tree_positions(world: f32) -> impl Iterator<Item = (f64, f32)> {
    (0..40).map(move |i| {
        let seed = i as f64 * 100.0 + 1.0;
        let r = seeded_random(seed);
        let x = match i {
            0..=14 => r * world * 0.2,
            15..=29 => world * 0.8 + r * world * 0.2,
            _ => world * 0.3 + r * world * 0.4,
        };
        (seed, x)
    })
}

fn trees(list: &mut DisplayList, s: Surface, offset: f32) {
    let edge = s.height * SCENE_HORIZON_RATIO;
    let shade = hex("#0A0A0A");
    for (seed, base_x) in tree_positions(world_width(s)) {
        let Some(x) = visible_x(base_x, offset, s, 100.0) else {
            continue;
        };
        let h = 80.0 + seeded_random(seed + 1.0) * 60.0;
        let w = 50.0 + seeded_random(seed + 2.0) * 35.0;
        pine(list, x, edge, w, h, shade);
    }
}

fn ground(list: &mut DisplayList, s: Surface, offset: f32) {
    let ground_y = s.height * SCENE_HORIZON_RATIO;
    list.rect(
        0.0,
        ground_y,
        s.width,
        s.height - ground_y,
        vertical_gradient(ground_y, s.height, &stops(&GROUND)),
    );
    wavy_band(list, s, offset, 30.0, ground_y, hex("#3A4535"), |x| {
        ground_y + (x * 0.01).sin() * 4.0 + (x * 0.025).sin() * 2.0
    });
}
