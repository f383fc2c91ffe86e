//! Entity model for the AR scene: one floating platform and the figures
//! standing on it.
//!
//! These types intentionally avoid referencing platform-specific APIs and are
//! suitable for native tests as well as the wasm frontend. The platform lives
//! in world space; each figure lives in the platform's local space, so moving
//! or rotating the platform carries its figures along, exactly like a scene
//! graph parent/child pair.

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::constants::{FIGURE_COUNT, FIGURE_HEIGHT, PLATFORM_POSITION};

/// Identity of a manipulable object. The variant is also the capability tag:
/// platform motion is expressed in world space, figure motion in the
/// platform's local space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityId {
    Platform,
    Figure(usize),
}

/// A manipulable object. `position`/`rotation`/`scale` are live and mutable;
/// the `original_*` fields are captured at creation and never change. They
/// are the baseline for rotation composition and figure height pinning.
#[derive(Clone, Debug)]
pub struct Entity {
    pub position: Vec3,
    pub rotation: Vec3, // Euler radians, XYZ order
    pub scale: Vec3,
    pub original_position: Vec3,
    pub original_rotation: Vec3,
    pub highlighted: bool,
}

impl Entity {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            original_position: position,
            original_rotation: Vec3::ZERO,
            highlighted: false,
        }
    }
}

/// The ordered collection of interactable entities for one AR session.
#[derive(Clone, Debug)]
pub struct SceneEntities {
    pub platform: Entity,
    pub figures: Vec<Entity>,
}

impl SceneEntities {
    /// Build the default session layout: the platform floating in front of
    /// the viewer, four figures on a small grid on top of it.
    pub fn with_default_layout() -> Self {
        let platform = Entity::at(Vec3::from_array(PLATFORM_POSITION));
        let figures = (0..FIGURE_COUNT)
            .map(|i| Entity::at(figure_local_position(i)))
            .collect();
        Self { platform, figures }
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        match id {
            EntityId::Platform => Some(&self.platform),
            EntityId::Figure(i) => self.figures.get(i),
        }
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        match id {
            EntityId::Platform => Some(&mut self.platform),
            EntityId::Figure(i) => self.figures.get_mut(i),
        }
    }

    /// All ids in pick order: platform first, then figures in creation order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> {
        std::iter::once(EntityId::Platform).chain((0..self.figures.len()).map(EntityId::Figure))
    }

    /// World transform of the platform, including its scale.
    pub fn platform_transform(&self) -> Mat4 {
        let p = &self.platform;
        let rotation = Quat::from_euler(EulerRot::XYZ, p.rotation.x, p.rotation.y, p.rotation.z);
        Mat4::from_scale_rotation_translation(p.scale, rotation, p.position)
    }

    /// World-space position of any entity. Figures are composed through the
    /// platform transform.
    pub fn world_position(&self, id: EntityId) -> Option<Vec3> {
        match id {
            EntityId::Platform => Some(self.platform.position),
            EntityId::Figure(i) => {
                let figure = self.figures.get(i)?;
                Some(self.platform_transform().transform_point3(figure.position))
            }
        }
    }

    /// Convert a world-space point into the platform's local frame.
    pub fn world_to_platform_local(&self, point: Vec3) -> Vec3 {
        self.platform_transform().inverse().transform_point3(point)
    }

    /// Apply or remove the emissive highlight flag. The frontend renderer
    /// maps the flag to material emissive.
    pub fn set_highlight(&mut self, id: EntityId, on: bool) {
        if let Some(entity) = self.entity_mut(id) {
            entity.highlighted = on;
        }
    }
}

/// Creation-time platform-local position for figure `i`: a 2x2 grid,
/// alternating left/right and front/back.
pub fn figure_local_position(i: usize) -> Vec3 {
    let x = if i % 2 == 0 { -0.1 } else { 0.1 };
    let z = if i < 2 { -0.05 } else { 0.05 };
    Vec3::new(x, FIGURE_HEIGHT, z)
}
