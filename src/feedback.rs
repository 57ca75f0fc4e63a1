//! Presentation feedback
//!
//! Turns simulation events into sound cues and status text. Nothing is
//! played or drawn here; the host decides how to present them.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::sim::{GameEvent, MadeShot};

/// Number of interchangeable crowd cheer recordings
pub const CHEER_VARIANTS: u8 = 3;

/// Status text colors (0xRRGGBB)
pub const COLOR_COMBO: u32 = 0xFFD700;
pub const COLOR_MADE: u32 = 0x00FF00;
pub const COLOR_MISSED: u32 = 0xFF3333;
pub const COLOR_SWOOSH: u32 = 0xFFFFFF;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cue", content = "variant", rename_all = "snake_case")]
pub enum SoundCue {
    /// Crowd cheer, one of [`CHEER_VARIANTS`] recordings
    Cheer(u8),
    /// Net swish call, only after a swoosh
    RakReshet,
    /// Chanting crowd on streak milestones
    RhythmicCheering,
    /// A streak was broken
    SadTrombone,
    /// Plain miss
    CrowdDisappointment,
}

/// A line of HUD text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub color: u32,
}

impl StatusMessage {
    fn new(text: impl Into<String>, color: u32) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// Cues and messages produced for one event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub cues: Vec<SoundCue>,
    pub messages: Vec<StatusMessage>,
}

impl Feedback {
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty() && self.messages.is_empty()
    }

    fn extend(&mut self, other: Feedback) {
        self.cues.extend(other.cues);
        self.messages.extend(other.messages);
    }
}

/// Chooses feedback for simulation events. Variant picks come from a seeded
/// RNG so a replay with the same seed sounds the same.
#[derive(Debug, Clone)]
pub struct FeedbackPlanner {
    rng: Pcg32,
}

impl FeedbackPlanner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Feedback for a single event
    pub fn plan(&mut self, event: &GameEvent) -> Feedback {
        match event {
            GameEvent::ShotMade(made) => self.plan_make(made),
            GameEvent::ShotMissed { broken_streak } => Feedback {
                cues: vec![miss_cue(*broken_streak)],
                messages: vec![StatusMessage::new("MISSED SHOT", COLOR_MISSED)],
            },
            _ => Feedback::default(),
        }
    }

    /// Feedback for a batch of events, in order
    pub fn plan_all(&mut self, events: &[GameEvent]) -> Feedback {
        let mut out = Feedback::default();
        for event in events {
            out.extend(self.plan(event));
        }
        out
    }

    fn plan_make(&mut self, made: &MadeShot) -> Feedback {
        let mut out = Feedback::default();

        let cue = if made.is_milestone {
            SoundCue::RhythmicCheering
        } else if made.is_swoosh {
            self.swoosh_cue()
        } else {
            self.cheer()
        };
        out.cues.push(cue);

        if made.is_swoosh {
            out.messages.push(StatusMessage::new("SWOOOOOSH!", COLOR_SWOOSH));
        }
        if made.bonus > 0 {
            out.messages.push(StatusMessage::new(
                format!("COMBO x{} +{} BONUS!", made.combo_count, made.bonus),
                COLOR_COMBO,
            ));
            out.messages.push(StatusMessage::new(
                format!("{}+{}-POINT COMBO SHOT MADE!", made.points, made.bonus),
                COLOR_COMBO,
            ));
        } else {
            out.messages.push(StatusMessage::new(
                format!("{}-POINT SHOT MADE!", made.points),
                COLOR_MADE,
            ));
        }
        out
    }

    fn cheer(&mut self) -> SoundCue {
        SoundCue::Cheer(self.rng.random_range(0..CHEER_VARIANTS))
    }

    fn swoosh_cue(&mut self) -> SoundCue {
        if self.rng.random_bool(0.5) {
            SoundCue::RakReshet
        } else {
            self.cheer()
        }
    }
}

impl Default for FeedbackPlanner {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Sad trombone when a streak was lost, crowd groan otherwise
pub fn miss_cue(broken_streak: u32) -> SoundCue {
    if broken_streak >= 1 {
        SoundCue::SadTrombone
    } else {
        SoundCue::CrowdDisappointment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn made(points: u32, bonus: u32, is_swoosh: bool, combo_count: u32) -> GameEvent {
        GameEvent::ShotMade(MadeShot {
            points,
            bonus,
            is_swoosh,
            combo_count,
            is_milestone: combo_count % 5 == 0,
        })
    }

    #[test]
    fn test_plain_make_cheers() {
        let mut p = FeedbackPlanner::new(7);
        let f = p.plan(&made(2, 0, false, 1));
        assert!(matches!(f.cues.as_slice(), [SoundCue::Cheer(v)] if *v < CHEER_VARIANTS));
        assert_eq!(f.messages, vec![StatusMessage::new("2-POINT SHOT MADE!", COLOR_MADE)]);
    }

    #[test]
    fn test_combo_make_messages() {
        let mut p = FeedbackPlanner::new(7);
        let f = p.plan(&made(3, 2, false, 4));
        let texts: Vec<_> = f.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["COMBO x4 +2 BONUS!", "3+2-POINT COMBO SHOT MADE!"]);
        assert!(f.messages.iter().all(|m| m.color == COLOR_COMBO));
    }

    #[test]
    fn test_swoosh_cue_choice() {
        let mut p = FeedbackPlanner::new(1);
        let mut rak = 0;
        let mut cheers = 0;
        for _ in 0..200 {
            let f = p.plan(&made(2, 0, true, 1));
            assert_eq!(f.messages[0].text, "SWOOOOOSH!");
            match f.cues[0] {
                SoundCue::RakReshet => rak += 1,
                SoundCue::Cheer(_) => cheers += 1,
                other => panic!("unexpected cue {other:?}"),
            }
        }
        assert!(rak > 0 && cheers > 0);
    }

    #[test]
    fn test_milestone_chants() {
        let mut p = FeedbackPlanner::new(3);
        let f = p.plan(&made(2, 3, true, 5));
        assert_eq!(f.cues, vec![SoundCue::RhythmicCheering]);
    }

    #[test]
    fn test_miss_cues() {
        let mut p = FeedbackPlanner::default();
        let broken = p.plan(&GameEvent::ShotMissed { broken_streak: 3 });
        assert_eq!(broken.cues, vec![SoundCue::SadTrombone]);
        assert_eq!(broken.messages[0], StatusMessage::new("MISSED SHOT", COLOR_MISSED));

        let plain = p.plan(&GameEvent::ShotMissed { broken_streak: 0 });
        assert_eq!(plain.cues, vec![SoundCue::CrowdDisappointment]);
    }

    #[test]
    fn test_quiet_events() {
        let mut p = FeedbackPlanner::default();
        assert!(p.plan(&GameEvent::ShotResolved).is_empty());
        assert!(p.plan(&GameEvent::BallReset).is_empty());
    }

    #[test]
    fn test_same_seed_same_cues() {
        let events: Vec<_> = (1..=20).map(|n| made(2, 0, n % 2 == 0, 1)).collect();
        let a = FeedbackPlanner::new(42).plan_all(&events);
        let b = FeedbackPlanner::new(42).plan_all(&events);
        assert_eq!(a, b);
        assert_eq!(a.cues.len(), 20);
    }
}
