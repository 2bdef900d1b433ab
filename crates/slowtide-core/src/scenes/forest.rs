use super::*;
use crate::draw::DrawCmd;

const SKY: [(f32, &str); 4] = [
    (0.0, "#7BA3B8"),
    (0.4, "#8FB5C4"),
    (0.7, "#A8C4CE"),
    (1.0, "#B8CDD4"),
];
const GROUND: [(f32, &str); 4] = [
    (0.0, "#6B7D5E"),
    (0.3, "#5D7050"),
    (0.7, "#4D5A42"),
    (1.0, "#3D4A35"),
];
const TRUNK: &str = "#4A3D2E";
const SILHOUETTE: &str = "#1A2515";

/// Woodland clearing. The forest does not scroll.
pub(super) fn render(s: Surface) -> DisplayList {
    let mut list = DisplayList::with_capacity(700);
    list.push(DrawCmd::Clear);
    sky(&mut list, s, 0.5, &SKY, &warm_glow(0.08));

    let ground_y = s.height * 0.55;
    list.rect(
        0.0,
        ground_y,
        s.width,
        s.height - ground_y,
        vertical_gradient(ground_y, s.height, &stops(&GROUND)),
    );
    wavy_band(&mut list, s, 0.0, 40.0, ground_y, hex("#5D7050"), |x| {
        ground_y + (x * 0.01).sin() * 5.0
    });

    grass(&mut list, s);
    far_trees(&mut list, s);
    side_trees(&mut list, s);
    list
}

fn grass(list: &mut DisplayList, s: Surface) {
    let grass_y = s.height * 0.57;
    let count = 60;
    for i in 0..count {
        let seed = i as f64 * 100.0 + 7.0;
        let x = s.width * 0.25 + (i as f32 / count as f32) * s.width * 0.5;
        let y = grass_y + seeded_random(seed) * 30.0;
        let height = 8.0 + seeded_random(seed + 1.0) * 15.0;
        let color = Color::hsl(
            85.0 + seeded_random(seed + 2.0) * 20.0,
            15.0 + seeded_random(seed + 3.0) * 15.0,
            30.0 + seeded_random(seed + 4.0) * 15.0,
        );
        list.push(DrawCmd::Curve {
            from: Vec2::new(x, y),
            control: Vec2::new(x + (seeded_random(seed + 5.0) - 0.5) * 6.0, y - height * 0.5),
            to: Vec2::new(x + (seeded_random(seed + 6.0) - 0.5) * 3.0, y - height),
            color,
            width: 1.5,
        });
    }
}

fn far_trees(list: &mut DisplayList, s: Surface) {
    let horizon = s.height * 0.55;
    let shade = hex(SILHOUETTE);
    for i in 0..50 {
        let seed = i as f64 * 100.0 + 1000.0;
        let x = (i as f32 / 50.0) * s.width * 1.1 - s.width * 0.05;
        let h = 40.0 + seeded_random(seed) * 40.0;
        let w = 25.0 + seeded_random(seed + 1.0) * 20.0;
        pine(list, x, horizon, w, h, shade);
    }
    for i in 0..20 {
        let seed = i as f64 * 100.0 + 3000.0;
        let x = seeded_random(seed) * s.width;
        let h = 30.0 + seeded_random(seed + 1.0) * 30.0;
        let w = 18.0 + seeded_random(seed + 2.0) * 15.0;
        pine(list, x, horizon + seeded_random(seed + 3.0) * 20.0, w, h, shade);
    }
    for i in 0..30 {
        let seed = i as f64 * 100.0 + 5000.0;
        let x = (i as f32 / 30.0) * s.width * 1.08 - s.width * 0.04;
        let h = 60.0 + seeded_random(seed) * 40.0;
        let w = 35.0 + seeded_random(seed + 1.0) * 25.0;
        pine(list, x, horizon + 5.0, w, h, shade);
    }
}

/// Ten trees down each edge, growing as they come forward.
fn side_trees(list: &mut DisplayList, s: Surface) {
    for (side, left) in [(7000.0, 0.02), (8000.0, 0.83)] {
        for i in 0..10 {
            let progress = i as f32 / 9.0;
            let x = s.width * left + seeded_random(side + i as f64 * 10.0) * s.width * 0.15;
            let y = s.height * (0.55 + progress * 0.15);
            side_tree(list, x, y, 0.5 + progress * 0.5);
        }
    }
}

fn side_tree(list: &mut DisplayList, x: f32, base_y: f32, scale: f32) {
    let width = 80.0 * scale;
    let height = 180.0 * scale;
    let trunk_w = width * 0.12;
    let trunk_h = height * 0.35;
    list.rect(x - trunk_w / 2.0, base_y - trunk_h, trunk_w, trunk_h, hex(TRUNK));

    let canopy_base = base_y - trunk_h * 0.8;
    for i in 0..5 {
        let fi = i as f32;
        let layer_y = canopy_base - fi * height * 0.14;
        let layer_w = width * (1.0 - fi * 0.18);
        let layer_h = height * 0.25;
        list.polygon(
            vec![
                Vec2::new(x, layer_y - layer_h),
                Vec2::new(x - layer_w / 2.0, layer_y),
                Vec2::new(x + layer_w / 2.0, layer_y),
            ],
            Color::hsl(95.0, 18.0, 22.0 + fi * 2.0),
        );
    }
}
