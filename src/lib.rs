//! Hoop Shot - arcade basketball shot simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flight, rim collision, scoring)
//! - `tuning`: Data-driven physics and control constants
//! - `feedback`: Maps simulation events to sound cues and status text

pub mod feedback;
pub mod sim;
pub mod tuning;

pub use feedback::{Feedback, FeedbackPlanner, SoundCue, StatusMessage};
pub use tuning::{Tuning, TuningError};

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta fed into the accumulator (caps catch-up after a stall)
    pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

    /// Gravity along Y (m/s²)
    pub const GRAVITY: f32 = -9.8;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.12;
    /// Ball rests this far above the court surface
    pub const BALL_GROUND_OFFSET: f32 = 0.15;
    /// Energy kept on a ground bounce
    pub const BOUNCE_RESTITUTION: f32 = 0.65;
    /// Below this vertical speed a ground contact stops the ball
    pub const BOUNCE_MIN_SPEED: f32 = 0.5;
    /// Horizontal damping applied on each bounce
    pub const GROUND_FRICTION: f32 = 0.85;

    /// Court dimensions (meters)
    pub const COURT_LENGTH: f32 = 28.65;
    pub const COURT_WIDTH: f32 = 15.24;
    /// Keep-out band between the ball and the court edge
    pub const COURT_MARGIN: f32 = 0.2;

    /// Hoop geometry
    pub const RIM_RADIUS: f32 = 0.225;
    pub const RIM_HEIGHT: f32 = 3.05;
    pub const BACKBOARD_THICKNESS: f32 = 0.05;
    pub const RIM_COLLIDER_COUNT: usize = 48;
    pub const RIM_COLLIDER_RADIUS: f32 = 0.015;

    /// Three-point line
    pub const THREE_POINT_ARC_RADIUS: f32 = 7.24;
    /// Distance from the sideline to the corner three segment
    pub const THREE_POINT_SIDELINE_INSET: f32 = 0.91;
    /// Arc center sits this far in front of the rim center
    pub const THREE_POINT_ARC_CENTER_OFFSET: f32 = 1.0;

    /// Launch speed range mapped from shot power
    pub const MIN_LAUNCH_SPEED: f32 = 6.5;
    pub const MAX_LAUNCH_SPEED: f32 = 13.0;

    /// Shot controls
    pub const POWER_MIN: f32 = 0.0;
    pub const POWER_MAX: f32 = 100.0;
    pub const POWER_STEP: f32 = 2.0;
    pub const POWER_DEFAULT: f32 = 50.0;
    pub const VERTICAL_ANGLE_MIN: f32 = 0.0;
    pub const VERTICAL_ANGLE_MAX: f32 = 180.0;
    pub const ANGLE_STEP: f32 = 5.0;
    pub const VERTICAL_ANGLE_DEFAULT: f32 = 50.0;

    /// Ground movement speed before a shot (m/s)
    pub const BALL_MOVE_SPEED: f32 = 6.0;

    /// Trajectory preview sampling
    pub const PREVIEW_STEP_SECONDS: f32 = 0.05;
    pub const PREVIEW_MAX_SAMPLES: usize = 60;
}

/// Ground plane height for the ball center
#[inline]
pub fn ground_y(ball_radius: f32, ground_offset: f32) -> f32 {
    ball_radius + ground_offset
}

/// Horizontal (XZ) projection of a world position
#[inline]
pub fn horizontal(p: Vec3) -> Vec2 {
    Vec2::new(p.x, p.z)
}

/// Horizontal distance between two world positions, ignoring height
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    horizontal(a).distance(horizontal(b))
}
