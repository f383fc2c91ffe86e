//! Continuous transform math applied by the frame updater.

use glam::{Quat, Vec3};

use crate::constants::{FORWARD_BIAS, SCALE_FACTOR_MAX, SCALE_FACTOR_MIN};

/// Yaw of the line from `a` to `b` around the world Y axis.
#[inline]
pub fn yaw_between(a: Vec3, b: Vec3) -> f32 {
    let v = b - a;
    v.x.atan2(v.z)
}

/// Uniform scale factor from the hand-separation ratio, clamped so the
/// geometry can neither collapse nor explode. A degenerate zero baseline
/// (coincident hands at promotion time) leaves the scale untouched.
#[inline]
pub fn clamped_scale_factor(initial_distance: f32, current_distance: f32) -> f32 {
    if initial_distance <= 0.0 {
        return 1.0;
    }
    (current_distance / initial_distance).clamp(SCALE_FACTOR_MIN, SCALE_FACTOR_MAX)
}

/// Midpoint of the two hand poses, nudged along the camera's forward axis so
/// the held object does not sit inside the hands.
#[inline]
pub fn midpoint_with_forward_bias(a: Vec3, b: Vec3, camera_rotation: Quat) -> Vec3 {
    (a + b) * 0.5 + camera_rotation * Vec3::new(0.0, 0.0, -FORWARD_BIAS)
}
