//! Launch velocity and trajectory preview
//!
//! Pure functions: same inputs, same outputs, no simulation state touched.

use glam::Vec3;

use crate::tuning::LaunchTuning;

/// Launch speed for a power percentage (linear between min and max speed)
#[inline]
pub fn launch_speed(power_percent: f32, launch: &LaunchTuning) -> f32 {
    launch.min_speed + (launch.max_speed - launch.min_speed) * (power_percent / 100.0)
}

/// Horizontal bearing from the ball to the target, in radians (atan2 of dz, dx)
#[inline]
pub fn auto_aim_bearing(ball_pos: Vec3, target: Vec3) -> f32 {
    (target.z - ball_pos.z).atan2(target.x - ball_pos.x)
}

/// Same as [`auto_aim_bearing`], in degrees
#[inline]
pub fn auto_aim_bearing_deg(ball_pos: Vec3, target: Vec3) -> f32 {
    auto_aim_bearing(ball_pos, target).to_degrees()
}

/// Initial velocity for a shot aimed straight at `target`
pub fn compute_initial_velocity(
    ball_pos: Vec3,
    target: Vec3,
    power_percent: f32,
    vertical_angle_deg: f32,
    launch: &LaunchTuning,
) -> Vec3 {
    compute_initial_velocity_with_offset(
        ball_pos,
        target,
        power_percent,
        vertical_angle_deg,
        0.0,
        launch,
    )
}

/// Initial velocity with a manual bearing offset (degrees) added to auto-aim
pub fn compute_initial_velocity_with_offset(
    ball_pos: Vec3,
    target: Vec3,
    power_percent: f32,
    vertical_angle_deg: f32,
    aim_offset_deg: f32,
    launch: &LaunchTuning,
) -> Vec3 {
    let speed = launch_speed(power_percent, launch);
    let vert = vertical_angle_deg.to_radians();
    let horiz = auto_aim_bearing(ball_pos, target) + aim_offset_deg.to_radians();

    Vec3::new(
        speed * vert.cos() * horiz.cos(),
        speed * vert.sin(),
        speed * vert.cos() * horiz.sin(),
    )
}

/// Sample the ballistic arc for preview rendering.
///
/// Points are spaced `step_seconds` apart. Sampling stops after the first
/// point below `ground_y` (that point is included).
pub fn sample_trajectory(
    ball_pos: Vec3,
    v0: Vec3,
    gravity: f32,
    ground_y: f32,
    step_seconds: f32,
    max_samples: usize,
) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(max_samples);
    for i in 0..max_samples {
        let t = i as f32 * step_seconds;
        let p = Vec3::new(
            ball_pos.x + v0.x * t,
            ball_pos.y + v0.y * t + 0.5 * gravity * t * t,
            ball_pos.z + v0.z * t,
        );
        points.push(p);
        if p.y < ground_y {
            break;
        }
    }
    points
}
