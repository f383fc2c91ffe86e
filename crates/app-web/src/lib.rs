#![cfg(target_arch = "wasm32")]
//! WASM glue between the host XR runtime and the interaction core.
//!
//! The host page owns WebXR session negotiation and rendering. It drives this
//! module through [`ArApp`]: select events from the two controllers go into
//! `on_select_start`/`on_select_end`, the render loop calls `on_frame` once
//! per frame with live controller poses and the camera orientation, and the
//! snapshot accessors expose entity transforms plus highlight flags for the
//! host renderer to draw.

use app_core::{
    EntityId, HoldHandle, InteractionSession, SceneEntities, DEVICE_COUNT, DOME_IDLE_SPIN,
    FIGURE_COLORS, HOLD_DURATION_MS,
};
use glam::{Quat, Vec3};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod dom;
mod overlay;
mod video;

use app_core::PoseSource;
use overlay::OverlayStatus;
use video::VideoPlayer;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("app-web starting");
    Ok(())
}

/// Latest world-space controller positions, refreshed by the host with every
/// event and frame call.
#[derive(Default)]
struct SampledPoses {
    positions: [Vec3; DEVICE_COUNT],
}

impl SampledPoses {
    fn set(&mut self, device: usize, pose: Vec3) {
        if let Some(p) = self.positions.get_mut(device) {
            *p = pose;
        }
    }
}

impl PoseSource for SampledPoses {
    fn world_position(&self, device: usize) -> Vec3 {
        self.positions.get(device).copied().unwrap_or(Vec3::ZERO)
    }
}

struct AppState {
    session: InteractionSession,
    scene: SceneEntities,
    poses: SampledPoses,
    dome_yaw: f32,
    last_frame: Option<Instant>,
    video: Option<VideoPlayer>,
}

impl AppState {
    fn fresh() -> anyhow::Result<Self> {
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        Ok(Self {
            session: InteractionSession::new(),
            scene: SceneEntities::with_default_layout(),
            poses: SampledPoses::default(),
            dome_yaw: 0.0,
            last_frame: None,
            video: VideoPlayer::attach(&document),
        })
    }
}

/// Application handle exported to the host page.
#[wasm_bindgen]
pub struct ArApp {
    state: Rc<RefCell<AppState>>,
}

#[wasm_bindgen]
impl ArApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ArApp, JsValue> {
        let state = AppState::fresh().map_err(|e| JsValue::from_str(&format!("{e:?}")))?;
        Ok(ArApp {
            state: Rc::new(RefCell::new(state)),
        })
    }

    /// The host XR session started: rebuild the entities for a fresh
    /// session, start the dome video and greet the user.
    pub fn begin_session(&self) {
        log::info!("[session] started");
        {
            let mut state = self.state.borrow_mut();
            state.scene = SceneEntities::with_default_layout();
            state.session = InteractionSession::new();
            state.dome_yaw = 0.0;
            state.last_frame = None;
            if let Some(video) = &state.video {
                video.play();
            }
        }
        dom::set_xr_active(true);
        overlay::show_status("AR experience loaded. Tap objects to interact.");
    }

    /// The host XR session ended: cancel pending hold timers, reset all
    /// interaction state and pause the video.
    pub fn end_session(&self) {
        log::info!("[session] ended");
        {
            let mut state = self.state.borrow_mut();
            let AppState { session, scene, .. } = &mut *state;
            session.end_session(scene);
            if let Some(video) = &state.video {
                video.pause();
            }
        }
        dom::set_xr_active(false);
        overlay::show_status("AR session ended");
    }

    /// Select (trigger) pressed on a controller, with its world position.
    pub fn on_select_start(&self, device: usize, x: f32, y: f32, z: f32) {
        let pose = Vec3::new(x, y, z);
        let handle = {
            let mut state = self.state.borrow_mut();
            state.poses.set(device, pose);
            state.session.press(device, pose)
        };
        if let Some(handle) = handle {
            schedule_hold(self.state.clone(), handle);
        }
    }

    /// Select (trigger) released on a controller, with its world position.
    pub fn on_select_end(&self, device: usize, x: f32, y: f32, z: f32) {
        let mut state = self.state.borrow_mut();
        state.poses.set(device, Vec3::new(x, y, z));
        let AppState {
            session,
            scene,
            poses,
            ..
        } = &mut *state;
        session.release(device, &*poses, scene, &mut OverlayStatus);
    }

    /// Once-per-frame update: live controller poses and the camera
    /// orientation quaternion (xyzw).
    #[allow(clippy::too_many_arguments)]
    pub fn on_frame(
        &self,
        lx: f32,
        ly: f32,
        lz: f32,
        rx: f32,
        ry: f32,
        rz: f32,
        qx: f32,
        qy: f32,
        qz: f32,
        qw: f32,
    ) {
        let mut state = self.state.borrow_mut();
        let now = Instant::now();
        let dt = state
            .last_frame
            .map(|prev| (now - prev).as_secs_f32())
            .unwrap_or(0.0);
        state.last_frame = Some(now);

        state.poses.set(0, Vec3::new(lx, ly, lz));
        state.poses.set(1, Vec3::new(rx, ry, rz));
        state.dome_yaw += DOME_IDLE_SPIN * dt;

        let AppState {
            session,
            scene,
            poses,
            ..
        } = &mut *state;
        let camera_rotation = Quat::from_xyzw(qx, qy, qz, qw).normalize();
        session.update(scene, &*poses, camera_rotation, dt, &mut OverlayStatus);
    }

    /// Number of interactable entities (platform + figures).
    pub fn entity_count(&self) -> usize {
        1 + self.state.borrow().scene.figures.len()
    }

    /// Transform snapshot for entity `index` (0 = platform in world space,
    /// 1.. = figures in the platform's local space, matching the host scene
    /// graph parenting): `[pos3, euler3, scale3, highlighted]`.
    pub fn entity_state(&self, index: usize) -> Vec<f32> {
        let state = self.state.borrow();
        let id = if index == 0 {
            EntityId::Platform
        } else {
            EntityId::Figure(index - 1)
        };
        let Some(entity) = state.scene.entity(id) else {
            return Vec::new();
        };
        vec![
            entity.position.x,
            entity.position.y,
            entity.position.z,
            entity.rotation.x,
            entity.rotation.y,
            entity.rotation.z,
            entity.scale.x,
            entity.scale.y,
            entity.scale.z,
            if entity.highlighted { 1.0 } else { 0.0 },
        ]
    }

    /// Tint for figure `index`, for the host renderer.
    pub fn figure_color(&self, index: usize) -> Vec<f32> {
        FIGURE_COLORS
            .get(index)
            .map(|c| c.to_vec())
            .unwrap_or_default()
    }

    /// Accumulated idle spin of the video dome, radians around Y.
    pub fn dome_yaw(&self) -> f32 {
        self.state.borrow().dome_yaw
    }
}

/// Schedule a hold timeout for a freshly armed press. The core rejects the
/// callback if the press was released or superseded in the meantime.
fn schedule_hold(state: Rc<RefCell<AppState>>, handle: HoldHandle) {
    let callback = Closure::once_into_js(move || {
        let mut state = state.borrow_mut();
        let AppState { session, scene, .. } = &mut *state;
        session.hold_fired(handle, scene, &mut OverlayStatus);
    });
    if let Some(window) = web::window() {
        _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            HOLD_DURATION_MS as i32,
        );
    }
}
