//! Proximity picking: which entity, if any, is under a hand.

use glam::Vec3;

use crate::constants::CAPTURE_RADIUS;
use crate::scene::{EntityId, SceneEntities};

/// Find the interactable entity closest to `point`, if one lies strictly
/// within the capture radius. The platform is tested before the figures, and
/// figures in creation order, so the first entity encountered wins a tie.
pub fn find_nearest(scene: &SceneEntities, point: Vec3) -> Option<EntityId> {
    let mut closest = None;
    let mut closest_distance = CAPTURE_RADIUS;
    for id in scene.ids() {
        let Some(world) = scene.world_position(id) else {
            continue;
        };
        let distance = point.distance(world);
        if distance < closest_distance {
            closest_distance = distance;
            closest = Some(id);
        }
    }
    closest
}
