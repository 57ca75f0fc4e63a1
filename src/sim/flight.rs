//! Ball flight integration
//!
//! Semi-implicit Euler under gravity with a hard ground plane, bounce
//! restitution and horizontal friction on each bounce.

use glam::{Quat, Vec2, Vec3};

use super::court::CourtBounds;
use super::state::Ball;
use crate::tuning::FlightTuning;

/// What happened during one flight step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightStep {
    /// Ball came to rest this step (flight over)
    pub landed: bool,
    /// First time this flight touched the ground
    pub first_ground_contact: bool,
}

/// Advance a ball in flight by `dt`. Does nothing for a grounded ball.
pub fn step(ball: &mut Ball, tuning: &FlightTuning, bounds: &CourtBounds, dt: f32) -> FlightStep {
    let mut result = FlightStep::default();
    if !ball.in_flight {
        return result;
    }

    ball.vel.y += tuning.gravity * dt;
    ball.pos += ball.vel * dt;
    spin(ball, ball.vel, tuning.ball_radius, dt);

    let ground_y = tuning.ground_y();
    if ball.pos.y <= ground_y {
        if !ball.ground_contact {
            ball.ground_contact = true;
            result.first_ground_contact = true;
        }
        ball.pos.y = ground_y;

        if ball.vel.y.abs() > tuning.bounce_min_speed {
            ball.vel.y = -ball.vel.y * tuning.bounce_restitution;
            ball.vel.x *= tuning.ground_friction;
            ball.vel.z *= tuning.ground_friction;
        } else {
            ball.vel = Vec3::ZERO;
            ball.in_flight = false;
            result.landed = true;
        }
    }

    ball.pos = bounds.clamp(ball.pos);
    result
}

/// Roll a grounded ball by per-axis input (each component in -1..=1).
/// Ignored while the ball is in flight.
pub fn roll(
    ball: &mut Ball,
    input: Vec2,
    move_speed: f32,
    ball_radius: f32,
    bounds: &CourtBounds,
    dt: f32,
) {
    if ball.in_flight || input == Vec2::ZERO {
        return;
    }
    let input = input.clamp(Vec2::NEG_ONE, Vec2::ONE);
    let delta = Vec3::new(input.x, 0.0, input.y) * move_speed * dt;
    ball.pos = bounds.clamp(ball.pos + delta);

    let roll_vel = Vec3::new(input.x, 0.0, input.y).normalize_or_zero() * move_speed;
    spin(ball, roll_vel, ball_radius, dt);
}

/// Cosmetic rotation: axis perpendicular to horizontal motion,
/// angular speed = linear speed / radius
pub fn spin(ball: &mut Ball, vel: Vec3, ball_radius: f32, dt: f32) {
    let speed = vel.length();
    if speed <= 0.01 {
        return;
    }
    let axis = Vec3::new(-vel.z, 0.0, vel.x).normalize_or_zero();
    if axis == Vec3::ZERO {
        return;
    }
    let angle = speed / ball_radius * dt;
    ball.rotation = (ball.rotation * Quat::from_axis_angle(axis, angle)).normalize();
}
