// Host-side tests for the static story scenes.

use slowtide_core::activities::Surface;
use slowtide_core::draw::DrawCmd;
use slowtide_core::scenes::*;
use slowtide_core::ViewKind;

#[test]
fn every_scene_renders_and_starts_with_clear() {
    let s = Surface::new(1024.0, 768.0);
    for kind in ViewKind::SCENES {
        let list = render(kind, s, 0.0).unwrap();
        assert!(list.len() > 10, "{} too sparse", kind);
        assert_eq!(list.iter().next(), Some(&DrawCmd::Clear));
    }
}

#[test]
fn activities_have_no_scene() {
    for kind in ViewKind::ACTIVITIES {
        assert!(render(kind, Surface::new(800.0, 600.0), 0.0).is_none());
    }
}

#[test]
fn redraw_is_stable() {
    let s = Surface::new(900.0, 700.0);
    for kind in ViewKind::SCENES {
        assert_eq!(render(kind, s, 120.0), render(kind, s, 120.0));
    }
}

#[test]
fn world_is_three_screens_wide() {
    assert_eq!(world_width(Surface::new(800.0, 600.0)), 2400.0);
}

#[test]
fn scroll_moves_scrolling_scenes_only() {
    let s = Surface::new(800.0, 600.0);
    assert_ne!(render(ViewKind::Beach, s, 0.0), render(ViewKind::Beach, s, 300.0));
    assert_ne!(render(ViewKind::Night, s, 0.0), render(ViewKind::Night, s, 300.0));
    assert_eq!(render(ViewKind::Forest, s, 0.0), render(ViewKind::Forest, s, 300.0));
}

#[test]
fn scenes_cycle_in_order() {
    assert_eq!(next_scene(ViewKind::Forest), ViewKind::Beach);
    assert_eq!(next_scene(ViewKind::Lake), ViewKind::Forest);
    assert_eq!(previous_scene(ViewKind::Forest), ViewKind::Lake);
    assert_eq!(previous_scene(ViewKind::Meadow), ViewKind::Beach);
}

#[test]
fn cache_reuses_rendered_lists() {
    let mut cache = SceneCache::default();
    let s = Surface::new(800.0, 600.0);
    let first = cache.get(ViewKind::Beach, s, 0.0).cloned();
    assert!(first.is_some());
    assert_eq!(cache.get(ViewKind::Beach, s, 0.0).cloned(), first);
    assert_eq!(cache.len(), 1);
    assert!(cache.get(ViewKind::Bubbles, s, 0.0).is_none());
    assert_eq!(cache.len(), 1);
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn seeded_values_repeat() {
    assert_eq!(seeded_random(42.0), seeded_random(42.0));
    assert_ne!(seeded_random(1.0), seeded_random(2.0));
    assert_eq!(wrap_x(2500.0, 2400.0), 100.0);
}

#[test]
fn backing_size_scales_by_pixel_ratio() {
    let s = Surface::new(800.0, 600.0);
    assert_eq!(s.backing_size(1.0), (800, 600));
    assert_eq!(s.backing_size(2.0), (1600, 1200));
    assert_eq!(s.backing_size(1.5), (1200, 900));
    // Same CSS size and ratio give the same backing size, so nothing is reassigned.
    assert_eq!(s.backing_size(2.0), Surface::new(800.0, 600.0).backing_size(2.0));
}

#[test]
fn backing_size_is_never_zero() {
    let s = Surface::new(0.0, 0.0);
    assert_eq!(s.backing_size(0.5), (1, 1));
}
