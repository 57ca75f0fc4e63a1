//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No wall clock, no unseeded randomness
//! - Stable iteration order over rim collider points
//! - No rendering, audio or platform dependencies

pub mod court;
pub mod flight;
pub mod hoop;
pub mod rim;
pub mod scoring;
pub mod state;
pub mod three_point;
pub mod tick;
pub mod trajectory;

pub use court::{CourtBounds, CourtGeometry, HoopGeometry, HoopSide};
pub use flight::FlightStep;
pub use hoop::{is_scoring_pass, passes_through};
pub use rim::{PointRim, RimCollider, RimContact};
pub use scoring::{MadeShot, ScoringState, ShotOutcome, ShotPhase, combo_bonus};
pub use state::{Aim, Ball, GameEvent, GameSession, Snapshot};
pub use three_point::{ShotZone, ThreePointLine};
pub use tick::{FixedStep, TickInput, run_frame, tick};
pub use trajectory::{compute_initial_velocity, sample_trajectory};
