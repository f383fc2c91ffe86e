// Tests for the pure transform math used by the frame updater.

use app_core::motion::{clamped_scale_factor, midpoint_with_forward_bias, yaw_between};
use app_core::{FORWARD_BIAS, SCALE_FACTOR_MAX, SCALE_FACTOR_MIN};
use glam::{Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

#[test]
fn yaw_between_cardinal_directions() {
    let origin = Vec3::ZERO;
    assert!((yaw_between(origin, Vec3::new(0.0, 0.0, 1.0)) - 0.0).abs() < 1e-6);
    assert!((yaw_between(origin, Vec3::new(1.0, 0.0, 0.0)) - FRAC_PI_2).abs() < 1e-6);
    assert!((yaw_between(origin, Vec3::new(-1.0, 0.0, 0.0)) + FRAC_PI_2).abs() < 1e-6);
    assert!((yaw_between(origin, Vec3::new(0.0, 0.0, -1.0)).abs() - PI).abs() < 1e-6);
}

#[test]
fn yaw_between_ignores_height_difference() {
    let a = Vec3::new(0.0, 0.2, 0.0);
    let b = Vec3::new(1.0, -0.5, 0.0);
    assert!((yaw_between(a, b) - FRAC_PI_2).abs() < 1e-6);
}

#[test]
fn scale_factor_tracks_hand_separation() {
    assert!((clamped_scale_factor(0.2, 0.2) - 1.0).abs() < 1e-6);
    assert!((clamped_scale_factor(0.2, 0.4) - 2.0).abs() < 1e-6);
    assert!((clamped_scale_factor(0.2, 0.15) - 0.75).abs() < 1e-6);
}

#[test]
fn scale_factor_is_clamped() {
    assert_eq!(clamped_scale_factor(0.1, 1.0), SCALE_FACTOR_MAX);
    assert_eq!(clamped_scale_factor(0.1, 0.001), SCALE_FACTOR_MIN);
}

#[test]
fn zero_baseline_distance_keeps_scale() {
    assert_eq!(clamped_scale_factor(0.0, 0.5), 1.0);
    assert_eq!(clamped_scale_factor(-1.0, 0.5), 1.0);
}

#[test]
fn midpoint_bias_points_down_the_camera_forward_axis() {
    let a = Vec3::ZERO;
    let b = Vec3::new(2.0, 0.0, 0.0);

    let level = midpoint_with_forward_bias(a, b, Quat::IDENTITY);
    assert!((level - Vec3::new(1.0, 0.0, -FORWARD_BIAS)).length() < 1e-6);

    // Camera yawed a quarter turn: forward is now -X.
    let yawed = midpoint_with_forward_bias(a, b, Quat::from_rotation_y(FRAC_PI_2));
    assert!((yawed - Vec3::new(1.0 - FORWARD_BIAS, 0.0, 0.0)).length() < 1e-6);
}
