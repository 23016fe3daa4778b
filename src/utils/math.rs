use nalgebra::{UnitQuaternion, Vector3};
use std::f64::consts::PI;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor.clamp(0.0, 1.0)
}

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Express an angle in degrees as a signed value in `(-180, 180]`.
#[inline]
pub fn signed_angle(angle: f64) -> f64 {
    let normalized = normalize_angle(angle);
    if normalized > 180.0 {
        normalized - 360.0
    } else {
        normalized
    }
}

/// Clamp an angle in degrees to `[from, to]` where `from < 0 < to`, honouring
/// wraparound through 0°/360°.
///
/// The input is first wrapped into `[0, 360)`. Values past 180° stand for
/// negative angles and are held above `360 + from`; everything else is held
/// below `to`. The result stays in `[0, 360)`.
pub fn clamp_angle(angle: f64, from: f64, to: f64) -> f64 {
    let angle = normalize_angle(angle);
    if angle > 180.0 {
        angle.max(360.0 + from)
    } else {
        angle.min(to)
    }
}

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
#[inline]
pub fn move_toward(current: f64, target: f64, max_delta: f64) -> f64 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Build an attitude quaternion from pitch, yaw and roll in degrees.
///
/// Frame: +X right, +Y up, -Z forward. Positive pitch raises the nose,
/// positive yaw turns right (clockwise seen from above), positive roll lifts
/// the right wing. Roll is applied first, then pitch, then yaw.
pub fn attitude_from_euler(pitch: f64, yaw: f64, roll: f64) -> UnitQuaternion<f64> {
    let yaw_rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -deg_to_rad(yaw));
    let pitch_rotation = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), deg_to_rad(pitch));
    let roll_rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), deg_to_rad(roll));
    yaw_rotation * pitch_rotation * roll_rotation
}

/// Recover pitch, yaw and roll in degrees (each in `[0, 360)`) from an
/// attitude built with [`attitude_from_euler`].
pub fn euler_from_attitude(attitude: &UnitQuaternion<f64>) -> (f64, f64, f64) {
    let forward = attitude * forward_axis();
    let up = attitude * Vector3::y();

    let pitch = forward.y.clamp(-1.0, 1.0).asin();
    let yaw = forward.x.atan2(-forward.z);

    // Roll is measured against the axes the aircraft would have without it.
    let level = attitude_from_euler(rad_to_deg(pitch), rad_to_deg(yaw), 0.0);
    let level_up = level * Vector3::y();
    let level_right = level * Vector3::x();
    let roll = (-up.dot(&level_right)).atan2(up.dot(&level_up));

    (
        normalize_angle(rad_to_deg(pitch)),
        normalize_angle(rad_to_deg(yaw)),
        normalize_angle(rad_to_deg(roll)),
    )
}

/// Body-frame forward axis.
#[inline]
pub fn forward_axis() -> Vector3<f64> {
    -Vector3::z()
}

/// Body-frame right axis.
#[inline]
pub fn right_axis() -> Vector3<f64> {
    Vector3::x()
}
