// Tests for the entity model and proximity picking.

use app_core::{
    figure_local_position, find_nearest, EntityId, SceneEntities, CAPTURE_RADIUS, FIGURE_COUNT,
    FIGURE_HEIGHT, PLATFORM_POSITION,
};
use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

fn platform_position() -> Vec3 {
    Vec3::from_array(PLATFORM_POSITION)
}

#[test]
fn default_layout_matches_creation_constants() {
    let scene = SceneEntities::with_default_layout();

    assert_eq!(scene.figures.len(), FIGURE_COUNT);
    assert_eq!(scene.platform.position, platform_position());
    assert_eq!(scene.platform.original_position, platform_position());
    assert_eq!(scene.platform.scale, Vec3::ONE);

    for (i, figure) in scene.figures.iter().enumerate() {
        assert_eq!(figure.position, figure_local_position(i));
        assert_eq!(figure.position.y, FIGURE_HEIGHT);
        assert!(!figure.highlighted);
    }
}

#[test]
fn ids_iterate_platform_first_then_figures_in_order() {
    let scene = SceneEntities::with_default_layout();
    let ids: Vec<_> = scene.ids().collect();

    assert_eq!(ids[0], EntityId::Platform);
    for (i, id) in ids[1..].iter().enumerate() {
        assert_eq!(*id, EntityId::Figure(i));
    }
}

#[test]
fn figure_world_position_composes_through_the_platform() {
    let mut scene = SceneEntities::with_default_layout();

    // Identity platform orientation: world = platform + local.
    let expected = platform_position() + figure_local_position(0);
    assert!((scene.world_position(EntityId::Figure(0)).unwrap() - expected).length() < 1e-6);

    // Translating the platform carries the figures along.
    let delta = Vec3::new(0.3, 0.1, -0.2);
    scene.platform.position += delta;
    let moved = scene.world_position(EntityId::Figure(0)).unwrap();
    assert!((moved - (expected + delta)).length() < 1e-6);
}

#[test]
fn figure_world_position_follows_platform_yaw() {
    let mut scene = SceneEntities::with_default_layout();
    scene.platform.rotation.y = FRAC_PI_2;

    // Local (-0.1, h, -0.05) rotated a quarter turn about Y becomes
    // (-0.05, h, 0.1).
    let expected = platform_position() + Vec3::new(-0.05, FIGURE_HEIGHT, 0.1);
    let world = scene.world_position(EntityId::Figure(0)).unwrap();
    assert!((world - expected).length() < 1e-6, "got {world:?}");
}

#[test]
fn figure_world_position_follows_platform_scale() {
    let mut scene = SceneEntities::with_default_layout();
    scene.platform.scale = Vec3::splat(2.0);

    let expected = platform_position() + figure_local_position(2) * 2.0;
    let world = scene.world_position(EntityId::Figure(2)).unwrap();
    assert!((world - expected).length() < 1e-6);
}

#[test]
fn world_to_platform_local_round_trips() {
    let mut scene = SceneEntities::with_default_layout();
    scene.platform.rotation.y = 0.7;
    scene.platform.scale = Vec3::splat(1.5);
    scene.platform.position = Vec3::new(0.2, -0.3, -0.8);

    let point = Vec3::new(0.15, 0.05, -0.6);
    let local = scene.world_to_platform_local(point);
    let back = scene.platform_transform().transform_point3(local);
    assert!((back - point).length() < 1e-5);
}

#[test]
fn entity_lookup_rejects_out_of_range_figures() {
    let mut scene = SceneEntities::with_default_layout();
    assert!(scene.entity(EntityId::Figure(99)).is_none());
    assert!(scene.entity_mut(EntityId::Figure(99)).is_none());
    assert!(scene.world_position(EntityId::Figure(99)).is_none());
}

#[test]
fn set_highlight_targets_one_entity() {
    let mut scene = SceneEntities::with_default_layout();
    scene.set_highlight(EntityId::Figure(1), true);

    assert!(scene.figures[1].highlighted);
    assert!(!scene.figures[0].highlighted);
    assert!(!scene.platform.highlighted);

    scene.set_highlight(EntityId::Figure(1), false);
    assert!(!scene.figures[1].highlighted);
}

#[test]
fn find_nearest_returns_closest_hit() {
    let scene = SceneEntities::with_default_layout();

    let at_platform = find_nearest(&scene, scene.platform.position);
    assert_eq!(at_platform, Some(EntityId::Platform));

    let fig3 = scene.world_position(EntityId::Figure(3)).unwrap();
    assert_eq!(find_nearest(&scene, fig3), Some(EntityId::Figure(3)));
}

#[test]
fn find_nearest_requires_strictly_within_radius() {
    let scene = SceneEntities::with_default_layout();

    // Just past the capture sphere around the platform, and farther than
    // the radius from every figure: no hit.
    let boundary = scene.platform.position + Vec3::new(0.0, CAPTURE_RADIUS + 0.001, 0.0);
    assert_eq!(find_nearest(&scene, boundary), None);

    // Well outside everything.
    let outside = scene.platform.position + Vec3::new(0.0, CAPTURE_RADIUS + 0.1, 0.0);
    assert_eq!(find_nearest(&scene, outside), None);
}

#[test]
fn find_nearest_has_no_side_effects() {
    let scene = SceneEntities::with_default_layout();
    let before = scene.clone();
    let _ = find_nearest(&scene, scene.platform.position);

    assert_eq!(scene.platform.position, before.platform.position);
    for (a, b) in scene.figures.iter().zip(before.figures.iter()) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.highlighted, b.highlighted);
    }
}
