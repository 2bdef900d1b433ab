use super::*;
use crate::draw::DrawCmd;

const SKY: [(f32, &str); 4] = [
    (0.0, "#8BA5B5"),
    (0.4, "#9FB5C5"),
    (0.7, "#B0C5CF"),
    (1.0, "#C5D5DF"),
];
const OCEAN: [(f32, &str); 4] = [
    (0.0, "#5D8A9A"),
    (0.3, "#4A7A8A"),
    (0.7, "#3D6A7A"),
    (1.0, "#305A6A"),
];
const SAND: [(f32, &str); 4] = [
    (0.0, "#C4B59D"),
    (0.3, "#B5A58D"),
    (0.7, "#A6957D"),
    (1.0, "#978568"),
];

struct Rock {
    x: f32,
    y: f32,
    size: f32,
    shade: f32,
}

struct Pebble {
    x: f32,
    y: f32,
    radii: Vec2,
    rotation: f32,
    shade: f32,
    hue: f32,
}

pub(super) fn render(s: Surface, scroll: f32) -> DisplayList {
    let offset = scroll * PARALLAX_GROUND;
    let horizon = s.height * SCENE_HORIZON_RATIO;
    let world = world_width(s);

    let mut list = DisplayList::with_capacity(220);
    list.push(DrawCmd::Clear);
    sky(&mut list, s, 0.5, &SKY, &warm_glow(0.06));

    let ocean_top = s.height * 0.45;
    list.rect(
        0.0,
        ocean_top,
        s.width,
        s.height * 0.15,
        vertical_gradient(ocean_top, s.height * 0.6, &stops(&OCEAN)),
    );
    // Swell line hanging below the ocean's top edge.
    wavy_band(&mut list, s, offset, 20.0, ocean_top, hex("#4D7A8A"), |x| {
        ocean_top + 15.0 + (x * 0.02).sin() * 3.0 + (x * 0.05).sin() * 2.0
    });

    list.rect(
        0.0,
        horizon,
        s.width,
        s.height - horizon,
        vertical_gradient(horizon, s.height, &stops(&SAND)),
    );
    wavy_band(&mut list, s, offset, 20.0, horizon, hex("#B5A58D"), |x| {
        horizon + (x * 0.015).sin() * 4.0 + (x * 0.03).sin() * 2.0
    });

    for i in 0..25 {
        let seed = i as f64 * 100.0 + 100.0;
        let rock = Rock {
            x: seeded_random(seed) * world,
            y: horizon + seeded_random(seed + 1.0) * (s.height - horizon),
            size: 5.0 + seeded_random(seed + 2.0) * 15.0,
            shade: 40.0 + seeded_random(seed + 3.0) * 20.0,
        };
        if let Some(x) = visible_x(rock.x, offset, s, 50.0) {
            draw_rock(&mut list, Vec2::new(x, rock.y), &rock);
        }
    }

    for i in 0..50 {
        let seed = i as f64 * 100.0 + 2000.0;
        let pebble = Pebble {
            x: seeded_random(seed) * world,
            y: horizon + seeded_random(seed + 1.0) * (s.height - horizon),
            radii: Vec2::new(
                2.0 + seeded_random(seed + 2.0) * 6.0,
                1.5 + seeded_random(seed + 3.0) * 4.0,
            ),
            rotation: seeded_random(seed + 4.0) * std::f32::consts::TAU,
            shade: 50.0 + seeded_random(seed + 5.0) * 25.0,
            hue: 30.0 + seeded_random(seed + 6.0) * 20.0,
        };
        if let Some(x) = visible_x(pebble.x, offset, s, 30.0) {
            draw_pebble(&mut list, Vec2::new(x, pebble.y), &pebble);
        }
    }
    list
}

fn draw_rock(list: &mut DisplayList, at: Vec2, rock: &Rock) {
    list.push(DrawCmd::Ellipse {
        center: at,
        radii: Vec2::new(rock.size, rock.size * 0.7),
        rotation: 0.0,
        paint: Color::hsl(30.0, 10.0, rock.shade).into(),
    });
    list.push(DrawCmd::Ellipse {
        center: at - Vec2::splat(rock.size * 0.2),
        radii: Vec2::new(rock.size * 0.5, rock.size * 0.35),
        rotation: 0.0,
        paint: Color::hsl(30.0, 10.0, rock.shade + 5.0).into(),
    });
}

fn draw_pebble(list: &mut DisplayList, at: Vec2, p: &Pebble) {
    list.push(DrawCmd::Ellipse {
        center: at,
        radii: p.radii,
        rotation: p.rotation,
        paint: Color::hsl(p.hue, 10.0, p.shade).into(),
    });
    // Highlight offset in the pebble's rotated frame.
    let local = -p.radii * 0.2;
    let (sin, cos) = p.rotation.sin_cos();
    let highlight = at + Vec2::new(local.x * cos - local.y * sin, local.x * sin + local.y * cos);
    list.push(DrawCmd::Ellipse {
        center: highlight,
        radii: p.radii * 0.4,
        rotation: p.rotation,
        paint: Color::hsl(p.hue, 10.0, p.shade + 8.0).into(),
    });
}
