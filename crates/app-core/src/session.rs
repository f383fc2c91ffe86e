//! The interaction state machine for one AR session.
//!
//! Two independent press/release streams (one per hand) are classified into
//! taps (toggle marking) and holds (begin a grab), and the per-frame updater
//! maps live hand poses onto the selected entity's transform. All state for
//! a session lives in [`InteractionSession`]; it is created at session start
//! and fully reset at session end.

use glam::{Quat, Vec3};

use crate::constants::{DEVICE_COUNT, FIGURE_IDLE_SPIN};
use crate::hold::{HoldHandle, HoldSlot};
use crate::pick;
use crate::scene::{EntityId, SceneEntities};

/// Live world-space hand positions, sampled on demand.
pub trait PoseSource {
    fn world_position(&self, device: usize) -> Vec3;
}

/// Receives human-readable status lines for display. Fire and forget.
pub trait StatusSink {
    fn show(&mut self, message: &str);
}

/// Sink that drops every message; used by tests and headless callers.
pub struct NullStatus;

impl StatusSink for NullStatus {
    fn show(&mut self, _message: &str) {}
}

/// Current manipulation mode. Each variant carries only the baselines valid
/// in that mode; they are captured on entry and never mutated mid-mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    Idle,
    Moving {
        /// World-space offset from the grabbing hand to the entity, captured
        /// at grab time and re-derived when falling back from two hands.
        grab_offset: Vec3,
    },
    Transforming {
        initial_distance: f32,
        initial_scale: Vec3,
        initial_rotation_angle: f32,
    },
}

/// All mutable interaction state for one AR session.
pub struct InteractionSession {
    pub mode: Mode,
    /// Sticky selection toggled by taps; persists across grabs.
    pub marked: Option<EntityId>,
    /// Entity currently being manipulated; `Some` exactly while `mode` is
    /// not [`Mode::Idle`].
    pub selected: Option<EntityId>,
    engaged: [bool; DEVICE_COUNT],
    hold: [HoldSlot; DEVICE_COUNT],
}

impl Default for InteractionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionSession {
    pub fn new() -> Self {
        Self {
            mode: Mode::Idle,
            marked: None,
            selected: None,
            engaged: [false; DEVICE_COUNT],
            hold: [HoldSlot::default(); DEVICE_COUNT],
        }
    }

    pub fn engaged_count(&self) -> usize {
        self.engaged.iter().filter(|&&e| e).count()
    }

    pub fn is_engaged(&self, device: usize) -> bool {
        self.engaged.get(device).copied().unwrap_or(false)
    }

    /// Trigger pressed on `device` at world position `pose`. Engages the
    /// device and arms its hold timer; the caller schedules the returned
    /// handle and feeds it back through [`Self::hold_fired`] on expiry.
    pub fn press(&mut self, device: usize, pose: Vec3) -> Option<HoldHandle> {
        if device >= DEVICE_COUNT {
            return None;
        }
        self.engaged[device] = true;
        let handle = self.hold[device].arm(device, pose);
        log::debug!("[interact] press device={device} engaged={}", self.engaged_count());
        Some(handle)
    }

    /// A scheduled hold timeout expired. Stale, cancelled, or post-teardown
    /// handles are rejected by the slot's generation check. A hold that
    /// survives the check begins a grab: on the marked entity if there is
    /// one, regardless of where the press pointed, else on whatever the
    /// press-time pose resolves to. Only an idle session can start a grab;
    /// a second hand's expiring hold never disturbs a manipulation already
    /// in progress.
    pub fn hold_fired(
        &mut self,
        handle: HoldHandle,
        scene: &mut SceneEntities,
        status: &mut impl StatusSink,
    ) {
        let Some(slot) = self.hold.get_mut(handle.device) else {
            return;
        };
        let Some(press_pose) = slot.take_if_current(handle) else {
            return;
        };
        if self.mode != Mode::Idle {
            return;
        }
        let target = self.marked.or_else(|| pick::find_nearest(scene, press_pose));
        if let Some(entity) = target {
            self.begin_grab(entity, press_pose, scene, status);
        }
    }

    /// Trigger released on `device`. Cancels the pending hold timer; a
    /// release quick enough to still find it, while nothing is grabbed, is a
    /// tap and toggles marking at the release-time pose. Then the engaged
    /// set shrinks and the mode falls out accordingly. A release for a
    /// device that is not engaged is a no-op.
    pub fn release(
        &mut self,
        device: usize,
        poses: &impl PoseSource,
        scene: &mut SceneEntities,
        status: &mut impl StatusSink,
    ) {
        if device >= DEVICE_COUNT {
            return;
        }
        let was_pending = self.hold[device].cancel();
        if !self.engaged[device] {
            return;
        }
        self.engaged[device] = false;
        log::debug!("[interact] release device={device} engaged={}", self.engaged_count());
        if was_pending && self.mode == Mode::Idle {
            self.toggle_mark(poses.world_position(device), scene, status);
        }
        self.on_device_disengaged(poses, scene, status);
    }

    /// Per-frame update, driven by the host render loop: promote to the
    /// two-hand transform when a second device engages mid-move, apply the
    /// mode's continuous pose-to-transform mapping, and advance the idle
    /// animation of unattended figures.
    pub fn update(
        &mut self,
        scene: &mut SceneEntities,
        poses: &impl PoseSource,
        camera_rotation: Quat,
        dt: f32,
        status: &mut impl StatusSink,
    ) {
        self.promote_to_transform(scene, poses, status);
        self.apply_continuous(scene, poses, camera_rotation);
        self.animate_idle(scene, dt);
    }

    /// Tear down the session: cancel any in-flight hold timers and reset
    /// every field, clearing marking as well as selection.
    pub fn end_session(&mut self, scene: &mut SceneEntities) {
        for slot in &mut self.hold {
            slot.cancel();
        }
        if let Some(selected) = self.selected.take() {
            scene.set_highlight(selected, false);
        }
        if let Some(marked) = self.marked.take() {
            scene.set_highlight(marked, false);
        }
        self.mode = Mode::Idle;
        self.engaged = [false; DEVICE_COUNT];
        log::info!("[interact] session state cleared");
    }

    fn begin_grab(
        &mut self,
        entity: EntityId,
        press_pose: Vec3,
        scene: &mut SceneEntities,
        status: &mut impl StatusSink,
    ) {
        let Some(initial_position) = scene.world_position(entity) else {
            return;
        };
        self.selected = Some(entity);
        if self.marked != Some(entity) {
            scene.set_highlight(entity, true);
        }
        self.mode = Mode::Moving {
            grab_offset: initial_position - press_pose,
        };
        log::debug!("[interact] grab {entity:?}");
        status.show("Moving object. Use both hands to resize/rotate.");
    }

    fn toggle_mark(&mut self, pose: Vec3, scene: &mut SceneEntities, status: &mut impl StatusSink) {
        let Some(hit) = pick::find_nearest(scene, pose) else {
            return;
        };
        if let Some(previous) = self.marked {
            scene.set_highlight(previous, false);
        }
        if self.marked == Some(hit) {
            self.marked = None;
            log::debug!("[interact] unmark {hit:?}");
            status.show("Object unmarked.");
        } else {
            self.marked = Some(hit);
            scene.set_highlight(hit, true);
            log::debug!("[interact] mark {hit:?}");
            status.show("Object marked. Hold select to grab it.");
        }
    }

    /// Resolve mode fallout after the engaged set shrank. Dropping from two
    /// hands to one falls back to moving with a freshly derived grab offset,
    /// so the entity does not jump; dropping to zero resets. Releases in a
    /// strictly simultaneous pair behave as sequential releases in either
    /// order.
    fn on_device_disengaged(
        &mut self,
        poses: &impl PoseSource,
        scene: &mut SceneEntities,
        status: &mut impl StatusSink,
    ) {
        let remaining = self.engaged_count();
        match self.mode {
            Mode::Transforming { .. } => {
                if remaining == 1 {
                    let held = self
                        .selected
                        .and_then(|entity| scene.world_position(entity));
                    let device = self.engaged.iter().position(|&e| e);
                    if let (Some(position), Some(device)) = (held, device) {
                        self.mode = Mode::Moving {
                            grab_offset: position - poses.world_position(device),
                        };
                        log::debug!("[interact] transform -> move, device={device}");
                        status.show("Transform complete. Still moving object.");
                    } else {
                        self.reset(scene, status);
                    }
                } else if remaining == 0 {
                    self.reset(scene, status);
                }
            }
            Mode::Moving { .. } => {
                if remaining == 0 {
                    self.reset(scene, status);
                }
            }
            Mode::Idle => {}
        }
    }

    /// Drop the active manipulation and return to idle. Marked entities keep
    /// their highlight; a selected-but-unmarked entity loses it.
    pub fn reset(&mut self, scene: &mut SceneEntities, status: &mut impl StatusSink) {
        if let Some(selected) = self.selected {
            if self.marked != Some(selected) {
                scene.set_highlight(selected, false);
            }
        }
        if let Some(marked) = self.marked {
            scene.set_highlight(marked, true);
        }
        self.selected = None;
        self.mode = Mode::Idle;
        self.engaged = [false; DEVICE_COUNT];
        log::debug!("[interact] reset");
        status.show(if self.marked.is_some() {
            "Object still marked. Hold select to grab it."
        } else {
            "Tap objects to mark them."
        });
    }

    fn promote_to_transform(
        &mut self,
        scene: &SceneEntities,
        poses: &impl PoseSource,
        status: &mut impl StatusSink,
    ) {
        if !matches!(self.mode, Mode::Moving { .. }) || self.engaged_count() != 2 {
            return;
        }
        let Some(entity) = self.selected.and_then(|id| scene.entity(id)) else {
            return;
        };
        let a = poses.world_position(0);
        let b = poses.world_position(1);
        self.mode = Mode::Transforming {
            initial_distance: a.distance(b),
            initial_scale: entity.scale,
            initial_rotation_angle: crate::motion::yaw_between(a, b),
        };
        log::debug!("[interact] move -> transform");
        status.show("Transforming object (scale/rotate)");
    }

    fn apply_continuous(
        &mut self,
        scene: &mut SceneEntities,
        poses: &impl PoseSource,
        camera_rotation: Quat,
    ) {
        let Some(id) = self.selected else {
            return;
        };
        match self.mode {
            Mode::Moving { grab_offset } => {
                if self.engaged_count() != 1 {
                    return;
                }
                let Some(device) = self.engaged.iter().position(|&e| e) else {
                    return;
                };
                let target = poses.world_position(device) + grab_offset;
                place(scene, id, target);
            }
            Mode::Transforming {
                initial_distance,
                initial_scale,
                initial_rotation_angle,
            } => {
                let a = poses.world_position(0);
                let b = poses.world_position(1);

                let factor = crate::motion::clamped_scale_factor(initial_distance, a.distance(b));
                if let Some(entity) = scene.entity_mut(id) {
                    entity.scale = initial_scale * factor;
                    // Rotation composes from the creation-time orientation so
                    // repeated transform sessions cannot accumulate drift.
                    let delta = crate::motion::yaw_between(a, b) - initial_rotation_angle;
                    entity.rotation.y = entity.original_rotation.y + delta;
                }

                let midpoint = crate::motion::midpoint_with_forward_bias(a, b, camera_rotation);
                place(scene, id, midpoint);
            }
            Mode::Idle => {}
        }
    }

    /// Figures nobody is holding or marking keep a slow autonomous spin.
    fn animate_idle(&self, scene: &mut SceneEntities, dt: f32) {
        for i in 0..scene.figures.len() {
            let id = EntityId::Figure(i);
            if self.selected == Some(id) || self.marked == Some(id) {
                continue;
            }
            scene.figures[i].rotation.y += FIGURE_IDLE_SPIN * dt;
        }
    }
}

/// Put `id` at a world-space target, dispatching on the entity kind: the
/// platform is placed directly in world space; a figure is converted into
/// the platform's local frame with its local height pinned to the
/// creation-time value, preventing vertical drift.
fn place(scene: &mut SceneEntities, id: EntityId, world_target: Vec3) {
    match id {
        EntityId::Platform => scene.platform.position = world_target,
        EntityId::Figure(_) => {
            let mut local = scene.world_to_platform_local(world_target);
            if let Some(figure) = scene.entity_mut(id) {
                local.y = figure.original_position.y;
                figure.position = local;
            }
        }
    }
}
