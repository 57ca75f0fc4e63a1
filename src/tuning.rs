//! Data-driven physics and control tuning
//!
//! Every number the simulation reads lives here so it can be tuned from JSON
//! without touching logic. Defaults are the canonical constants in `consts`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading tuning data
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("Tuning JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid tuning value: {field} = {value} ({reason})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}

/// Launch speed mapping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LaunchTuning {
    /// Speed at 0% power (m/s)
    pub min_speed: f32,
    /// Speed at 100% power (m/s)
    pub max_speed: f32,
}

impl Default for LaunchTuning {
    fn default() -> Self {
        Self {
            min_speed: MIN_LAUNCH_SPEED,
            max_speed: MAX_LAUNCH_SPEED,
        }
    }
}

/// Ball flight and ground response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlightTuning {
    pub gravity: f32,
    pub ball_radius: f32,
    pub ground_offset: f32,
    pub bounce_restitution: f32,
    /// Minimum vertical speed that still bounces
    pub bounce_min_speed: f32,
    /// Horizontal velocity kept per bounce
    pub ground_friction: f32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            ball_radius: BALL_RADIUS,
            ground_offset: BALL_GROUND_OFFSET,
            bounce_restitution: BOUNCE_RESTITUTION,
            bounce_min_speed: BOUNCE_MIN_SPEED,
            ground_friction: GROUND_FRICTION,
        }
    }
}

impl FlightTuning {
    /// Height of the ball center when resting on the court
    #[inline]
    pub fn ground_y(&self) -> f32 {
        crate::ground_y(self.ball_radius, self.ground_offset)
    }
}

/// Rim contact response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RimTuning {
    /// Radius of the ball sphere used against rim colliders
    pub ball_radius: f32,
    /// Velocity kept after a discrete rim contact
    pub energy_loss: f32,
    /// Velocity kept after a swept (tunneling) contact
    pub swept_energy_loss: f32,
    /// Speed above which the swept check runs (m/s)
    pub swept_speed_threshold: f32,
    /// Extra separation left after push-out
    pub push_epsilon: f32,
    /// Ball must be within this height band of the rim to collide
    pub height_window: f32,
}

impl Default for RimTuning {
    fn default() -> Self {
        Self {
            ball_radius: BALL_RADIUS,
            energy_loss: 0.6,
            swept_energy_loss: 0.5,
            swept_speed_threshold: 8.0,
            push_epsilon: 0.01,
            height_window: 0.2,
        }
    }
}

/// Hoop-through and combo rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringTuning {
    pub ball_radius: f32,
    /// Fraction of the ball radius subtracted from the rim radius
    pub ball_radius_fraction: f32,
    /// Generosity multiplier on the effective scoring radius.
    /// Empirically tuned; not derived from geometry.
    pub radius_scale: f32,
    /// Consecutive makes at which a combo bonus starts paying
    pub combo_start: u32,
    /// Streak multiple that triggers a milestone celebration
    pub milestone_interval: u32,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            ball_radius: BALL_RADIUS,
            ball_radius_fraction: 0.8,
            radius_scale: 1.5,
            combo_start: 3,
            milestone_interval: 5,
        }
    }
}

impl ScoringTuning {
    /// Effective radius a rim-plane crossing must fall inside to count
    pub fn effective_radius(&self, rim_radius: f32) -> f32 {
        (rim_radius - self.ball_radius * self.ball_radius_fraction) * self.radius_scale
    }
}

/// Player control steps and limits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlTuning {
    pub power_step: f32,
    pub angle_step: f32,
    pub default_power: f32,
    pub default_vertical_angle: f32,
    /// Ground movement speed (m/s)
    pub move_speed: f32,
    /// Keep-out band from the court edges
    pub court_margin: f32,
}

impl Default for ControlTuning {
    fn default() -> Self {
        Self {
            power_step: POWER_STEP,
            angle_step: ANGLE_STEP,
            default_power: POWER_DEFAULT,
            default_vertical_angle: VERTICAL_ANGLE_DEFAULT,
            move_speed: BALL_MOVE_SPEED,
            court_margin: COURT_MARGIN,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Tuning {
    pub launch: LaunchTuning,
    pub flight: FlightTuning,
    pub rim: RimTuning,
    pub scoring: ScoringTuning,
    pub controls: ControlTuning,
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning from JSON");
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn check(
            field: &'static str,
            value: f32,
            ok: bool,
            reason: &'static str,
        ) -> Result<(), TuningError> {
            if ok && value.is_finite() {
                Ok(())
            } else {
                log::warn!("Rejected tuning {field} = {value}: {reason}");
                Err(TuningError::OutOfRange {
                    field,
                    value,
                    reason,
                })
            }
        }

        let l = &self.launch;
        check("launch.min_speed", l.min_speed, l.min_speed >= 0.0, "must be >= 0")?;
        check(
            "launch.max_speed",
            l.max_speed,
            l.max_speed >= l.min_speed,
            "must be >= min_speed",
        )?;

        let f = &self.flight;
        check("flight.gravity", f.gravity, f.gravity < 0.0, "must point down")?;
        check("flight.ball_radius", f.ball_radius, f.ball_radius > 0.0, "must be > 0")?;
        check(
            "flight.ground_offset",
            f.ground_offset,
            f.ground_offset >= 0.0,
            "must be >= 0",
        )?;
        check(
            "flight.bounce_restitution",
            f.bounce_restitution,
            (0.0..1.0).contains(&f.bounce_restitution),
            "must be in [0, 1)",
        )?;
        check(
            "flight.bounce_min_speed",
            f.bounce_min_speed,
            f.bounce_min_speed > 0.0,
            "must be > 0",
        )?;
        check(
            "flight.ground_friction",
            f.ground_friction,
            (0.0..=1.0).contains(&f.ground_friction),
            "must be in [0, 1]",
        )?;

        let r = &self.rim;
        check("rim.ball_radius", r.ball_radius, r.ball_radius > 0.0, "must be > 0")?;
        check(
            "rim.energy_loss",
            r.energy_loss,
            (0.0..=1.0).contains(&r.energy_loss),
            "must be in [0, 1]",
        )?;
        check(
            "rim.swept_energy_loss",
            r.swept_energy_loss,
            (0.0..=1.0).contains(&r.swept_energy_loss),
            "must be in [0, 1]",
        )?;
        check(
            "rim.push_epsilon",
            r.push_epsilon,
            r.push_epsilon >= 0.0,
            "must be >= 0",
        )?;

        let s = &self.scoring;
        check(
            "scoring.radius_scale",
            s.radius_scale,
            s.radius_scale > 0.0,
            "must be > 0",
        )?;
        check(
            "scoring.milestone_interval",
            s.milestone_interval as f32,
            s.milestone_interval > 0,
            "must be > 0",
        )?;

        let c = &self.controls;
        check("controls.power_step", c.power_step, c.power_step > 0.0, "must be > 0")?;
        check("controls.angle_step", c.angle_step, c.angle_step > 0.0, "must be > 0")?;
        check(
            "controls.court_margin",
            c.court_margin,
            c.court_margin >= 0.0,
            "must be >= 0",
        )?;
        Ok(())
    }
}
