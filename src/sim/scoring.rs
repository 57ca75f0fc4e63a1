//! Shot scoring and combo tracking
//!
//! Lifecycle per shot: `Idle` → `Attempted` on launch → `Made` when the ball
//! drops through the hoop → back to `Idle` once it comes to rest. Landing
//! while still `Attempted` is a miss.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::three_point::ShotZone;
use crate::tuning::ScoringTuning;

/// Where the current shot is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShotPhase {
    /// No shot airborne
    #[default]
    Idle,
    /// Shot launched, not scored yet
    Attempted,
    /// Scored; waiting for the ball to settle
    Made,
}

/// Details of a made basket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MadeShot {
    /// Base value (2 or 3)
    pub points: u32,
    /// Combo bonus added on top
    pub bonus: u32,
    /// No rim contact during the flight
    pub is_swoosh: bool,
    /// Consecutive makes including this one
    pub combo_count: u32,
    /// Streak hit a celebration multiple
    pub is_milestone: bool,
}

impl MadeShot {
    pub fn total(&self) -> u32 {
        self.points + self.bonus
    }
}

/// How a flight ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    /// Ball settled without scoring
    Missed { broken_streak: u32 },
    /// Ball settled after a make
    Resolved,
    /// Landing with no shot pending (e.g. after a reset)
    Nothing,
}

/// Session statistics and combo bookkeeping
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringState {
    pub score: u32,
    pub attempts: u32,
    pub shots_made: u32,
    pub consecutive_hits: u32,
    pub phase: ShotPhase,
    /// Ball position at launch, used for 2/3 classification
    pub shot_start: Option<Vec3>,
    /// Rim touched at least once this flight
    pub rim_touched: bool,
}

impl ScoringState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A make has been registered for the current flight
    #[inline]
    pub fn shot_in_progress(&self) -> bool {
        self.phase == ShotPhase::Made
    }

    /// Start a new attempt from `origin`
    pub fn launch(&mut self, origin: Vec3) {
        self.attempts += 1;
        self.shot_start = Some(origin);
        self.rim_touched = false;
        self.phase = ShotPhase::Attempted;
    }

    /// Mark rim contact. Returns true only the first time per flight.
    pub fn touch_rim(&mut self) -> bool {
        if self.rim_touched {
            return false;
        }
        self.rim_touched = true;
        true
    }

    /// Credit a basket worth `zone`. At most one per flight: returns `None`
    /// unless a shot is pending.
    pub fn register_make(&mut self, zone: ShotZone, tuning: &ScoringTuning) -> Option<MadeShot> {
        if self.phase != ShotPhase::Attempted {
            return None;
        }
        self.consecutive_hits += 1;
        let points = zone.points();
        let bonus = combo_bonus(self.consecutive_hits, tuning.combo_start);

        self.score += points + bonus;
        self.shots_made += 1;
        self.phase = ShotPhase::Made;

        let made = MadeShot {
            points,
            bonus,
            is_swoosh: !self.rim_touched,
            combo_count: self.consecutive_hits,
            is_milestone: self.consecutive_hits % tuning.milestone_interval.max(1) == 0,
        };
        log::info!(
            "{}-point shot made (+{} bonus, streak {}{})",
            made.points,
            made.bonus,
            made.combo_count,
            if made.is_swoosh { ", swoosh" } else { "" }
        );
        Some(made)
    }

    /// The ball came to rest; settle the pending shot
    pub fn resolve_landing(&mut self) -> ShotOutcome {
        let outcome = match self.phase {
            ShotPhase::Attempted => {
                let broken_streak = self.consecutive_hits;
                self.consecutive_hits = 0;
                log::info!("Shot missed (streak {broken_streak} broken)");
                ShotOutcome::Missed { broken_streak }
            }
            ShotPhase::Made => ShotOutcome::Resolved,
            ShotPhase::Idle => ShotOutcome::Nothing,
        };
        self.phase = ShotPhase::Idle;
        outcome
    }

    /// Drop the pending shot without counting a miss
    pub fn abort_shot(&mut self) {
        self.phase = ShotPhase::Idle;
        self.shot_start = None;
        self.rim_touched = false;
    }

    /// Clear everything for a new game
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Made/attempted as a rounded percentage
    pub fn accuracy_percent(&self) -> u32 {
        if self.attempts == 0 {
            0
        } else {
            (self.shots_made as f32 / self.attempts as f32 * 100.0).round() as u32
        }
    }
}

/// Bonus for the `streak`-th consecutive make: +1 at `combo_start`, growing by one per make
#[inline]
pub fn combo_bonus(streak: u32, combo_start: u32) -> u32 {
    (streak + 1).saturating_sub(combo_start.max(1))
}
