//! Game session state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameSession`]; there are no
//! hidden statics.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::court::{CourtBounds, CourtGeometry, HoopGeometry};
use super::rim::RimContact;
use super::scoring::{MadeShot, ScoringState};
use super::three_point::{ShotZone, ThreePointLine};
use super::trajectory;
use crate::consts::*;
use crate::tuning::{ControlTuning, Tuning, TuningError};

/// The basketball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center of the ball sphere (world space)
    pub pos: Vec3,
    pub vel: Vec3,
    /// True from launch until the ball comes to rest
    pub in_flight: bool,
    /// Whether this flight has reached the ground yet
    #[serde(default)]
    pub ground_contact: bool,
    /// Visual spin only, never read by physics
    #[serde(skip)]
    pub rotation: Quat,
}

impl Ball {
    /// Ball resting at center court
    pub fn at_rest(ground_y: f32) -> Self {
        Self {
            pos: Vec3::new(0.0, ground_y, 0.0),
            vel: Vec3::ZERO,
            in_flight: false,
            ground_contact: false,
            rotation: Quat::IDENTITY,
        }
    }

    /// Start a flight with the given velocity
    pub fn launch(&mut self, velocity: Vec3) {
        self.vel = velocity;
        self.in_flight = true;
        self.ground_contact = false;
    }

    /// Put the ball back at center court, stopped
    pub fn reset(&mut self, ground_y: f32) {
        self.pos = Vec3::new(0.0, ground_y, 0.0);
        self.vel = Vec3::ZERO;
        self.in_flight = false;
        self.ground_contact = false;
    }
}

/// Player-adjustable shot parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aim {
    /// Shot power percentage [0, 100]
    pub power: f32,
    /// Launch elevation in degrees [0, 180]
    pub vertical_angle: f32,
    /// Bearing to the target hoop in degrees (recomputed every frame)
    pub horizontal_angle: f32,
    /// Manual bearing adjustment added on top of auto-aim (degrees)
    #[serde(default)]
    pub aim_offset: f32,
}

impl Aim {
    pub fn new(controls: &ControlTuning) -> Self {
        Self {
            power: controls.default_power.clamp(POWER_MIN, POWER_MAX),
            vertical_angle: controls
                .default_vertical_angle
                .clamp(VERTICAL_ANGLE_MIN, VERTICAL_ANGLE_MAX),
            horizontal_angle: 0.0,
            aim_offset: 0.0,
        }
    }

    /// Move power by whole steps, clamped to [0, 100]
    pub fn adjust_power(&mut self, steps: i32, step: f32) {
        self.power = (self.power + steps as f32 * step).clamp(POWER_MIN, POWER_MAX);
    }

    /// Move elevation by whole steps, clamped to [0, 180]
    pub fn adjust_vertical_angle(&mut self, steps: i32, step: f32) {
        self.vertical_angle = (self.vertical_angle + steps as f32 * step)
            .clamp(VERTICAL_ANGLE_MIN, VERTICAL_ANGLE_MAX);
    }

    /// Set the manual bearing offset, wrapped to [-180, 180)
    pub fn set_aim_offset(&mut self, degrees: f32) {
        self.aim_offset = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    }
}

/// Events emitted by the simulation for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A shot left the player's hands
    ShotLaunched {
        origin: Vec3,
        velocity: Vec3,
        zone: ShotZone,
    },
    /// First rim touch of the current flight
    RimContact { point: Vec3, swept: bool },
    /// Ball reached the floor for the first time this flight
    FirstGroundContact { after_make: bool },
    ShotMade(MadeShot),
    /// Ball came to rest without scoring
    ShotMissed { broken_streak: u32 },
    /// Ball came to rest after a make
    ShotResolved,
    /// Ball returned to center court
    BallReset,
    /// Scores cleared
    GameReset,
}

/// Read-only view for the HUD and renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u32,
    pub attempts: u32,
    pub shots_made: u32,
    pub accuracy: u32,
    pub streak: u32,
    pub power: f32,
    pub vertical_angle: f32,
    pub horizontal_angle: f32,
    pub zone: ShotZone,
    pub zone_label: String,
    pub ball_pos: Vec3,
    pub ball_rotation: [f32; 4],
    pub in_flight: bool,
}

/// One player's shooting session
#[derive(Debug, Clone)]
pub struct GameSession {
    pub tuning: Tuning,
    pub court: CourtGeometry,
    pub three_point: ThreePointLine,
    pub bounds: CourtBounds,
    pub ball: Ball,
    pub aim: Aim,
    pub scoring: ScoringState,
    /// Ball position at the end of the previous step
    pub prev_pos: Vec3,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(CourtGeometry::standard(), Tuning::default())
    }
}

impl GameSession {
    /// Create a session on `court` with already-validated tuning
    pub fn new(court: CourtGeometry, tuning: Tuning) -> Self {
        let ground_y = tuning.flight.ground_y();
        let ball = Ball::at_rest(ground_y);
        let mut session = Self {
            three_point: ThreePointLine::for_court(&court),
            bounds: court.bounds(tuning.controls.court_margin),
            prev_pos: ball.pos,
            ball,
            aim: Aim::new(&tuning.controls),
            scoring: ScoringState::new(),
            court,
            tuning,
        };
        session.update_auto_aim();
        log::info!("New shooting session");
        session
    }

    /// Create a session, validating `tuning` first
    pub fn with_tuning(court: CourtGeometry, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::new(court, tuning))
    }

    /// Swap in new tuning mid-session. Score, attempts and streak are kept;
    /// the current tuning stays in place on error.
    pub fn set_tuning(&mut self, tuning: Tuning) -> Result<(), TuningError> {
        tuning.validate()?;
        self.bounds = self.court.bounds(tuning.controls.court_margin);
        self.tuning = tuning;
        if !self.ball.in_flight {
            self.ball.pos.y = self.tuning.flight.ground_y();
            self.ball.pos = self.bounds.clamp(self.ball.pos);
            self.prev_pos = self.ball.pos;
        }
        self.update_auto_aim();
        log::info!("Tuning replaced");
        Ok(())
    }

    /// Hoop the ball is currently aimed at
    pub fn target_hoop(&self) -> &HoopGeometry {
        self.court.nearest_hoop(self.ball.pos)
    }

    /// Refresh the derived horizontal angle toward the nearest hoop
    pub fn update_auto_aim(&mut self) {
        let target = self.target_hoop().rim_center;
        self.aim.horizontal_angle =
            trajectory::auto_aim_bearing_deg(self.ball.pos, target) + self.aim.aim_offset;
    }

    /// Zone for a shot taken from the ball's current position
    pub fn current_zone(&self) -> ShotZone {
        self.three_point.zone(self.ball.pos, self.target_hoop())
    }

    /// Launch velocity the current aim would produce
    pub fn launch_velocity(&self) -> Vec3 {
        trajectory::compute_initial_velocity_with_offset(
            self.ball.pos,
            self.target_hoop().rim_center,
            self.aim.power,
            self.aim.vertical_angle,
            self.aim.aim_offset,
            &self.tuning.launch,
        )
    }

    /// Take a shot. Ignored (returns `None`) while the ball is in flight.
    pub fn shoot(&mut self) -> Option<GameEvent> {
        if self.ball.in_flight {
            return None;
        }
        let origin = self.ball.pos;
        let zone = self.current_zone();
        let velocity = self.launch_velocity();

        self.scoring.launch(origin);
        self.ball.launch(velocity);
        self.prev_pos = origin;
        log::debug!(
            "Shot launched from {origin} ({}) at {:.1} m/s",
            zone.label(),
            velocity.length()
        );
        Some(GameEvent::ShotLaunched {
            origin,
            velocity,
            zone,
        })
    }

    /// Preview of the arc the current aim would produce (none during flight)
    pub fn trajectory_preview(&self) -> Option<Vec<Vec3>> {
        if self.ball.in_flight {
            return None;
        }
        Some(trajectory::sample_trajectory(
            self.ball.pos,
            self.launch_velocity(),
            self.tuning.flight.gravity,
            self.tuning.flight.ground_y(),
            PREVIEW_STEP_SECONDS,
            PREVIEW_MAX_SAMPLES,
        ))
    }

    /// Abort any flight and return the ball to center court.
    ///
    /// Velocity, flight and in-progress scoring flags clear together; counters
    /// and the streak survive.
    pub fn reset_ball(&mut self) -> GameEvent {
        let ground_y = self.tuning.flight.ground_y();
        self.ball.reset(ground_y);
        self.prev_pos = self.ball.pos;
        self.scoring.abort_shot();
        self.aim = Aim::new(&self.tuning.controls);
        self.update_auto_aim();
        log::info!("Ball reset");
        GameEvent::BallReset
    }

    /// Reset ball and all statistics
    pub fn new_game(&mut self) -> GameEvent {
        self.reset_ball();
        self.scoring.reset();
        log::info!("New game");
        GameEvent::GameReset
    }

    /// Record a rim contact; only the first one per flight produces an event
    pub(crate) fn note_rim_contact(&mut self, contact: RimContact) -> Option<GameEvent> {
        if self.scoring.touch_rim() {
            log::debug!("Rim touched at {} (swept: {})", contact.point, contact.swept);
            Some(GameEvent::RimContact {
                point: contact.point,
                swept: contact.swept,
            })
        } else {
            None
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let zone = self.current_zone();
        Snapshot {
            score: self.scoring.score,
            attempts: self.scoring.attempts,
            shots_made: self.scoring.shots_made,
            accuracy: self.scoring.accuracy_percent(),
            streak: self.scoring.consecutive_hits,
            power: self.aim.power,
            vertical_angle: self.aim.vertical_angle,
            horizontal_angle: self.aim.horizontal_angle,
            zone,
            zone_label: zone.label().to_string(),
            ball_pos: self.ball.pos,
            ball_rotation: self.ball.rotation.to_array(),
            in_flight: self.ball.in_flight,
        }
    }
}
