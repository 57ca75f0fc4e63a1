//! Hoop-through detection
//!
//! A basket counts when the ball center crosses the rim plane moving down
//! and the crossing point lies inside the effective scoring radius.

use glam::Vec3;

use super::court::HoopGeometry;
use crate::tuning::ScoringTuning;

/// Vertical deltas smaller than this cannot give a meaningful crossing point
const MIN_VERTICAL_DELTA: f32 = 1e-6;

/// Point where the segment `previous`→`current` crosses the plane `y = rim_height`
/// from above, if it does
pub fn rim_plane_crossing(current: Vec3, previous: Vec3, rim_height: f32) -> Option<Vec3> {
    if !(previous.y > rim_height && current.y <= rim_height) {
        return None;
    }
    let delta = current - previous;
    if delta.y.abs() < MIN_VERTICAL_DELTA {
        return None;
    }
    let t = (rim_height - previous.y) / delta.y;
    Some(previous + delta * t)
}

/// Whether the step `previous`→`current` is a scoring pass through the rim
pub fn is_scoring_pass(
    current: Vec3,
    previous: Vec3,
    rim_center: Vec3,
    rim_radius: f32,
    rim_height: f32,
    tuning: &ScoringTuning,
) -> bool {
    let Some(crossing) = rim_plane_crossing(current, previous, rim_height) else {
        return false;
    };
    let dist = crate::horizontal_distance(crossing, rim_center);
    dist <= tuning.effective_radius(rim_radius)
}

/// [`is_scoring_pass`] against a hoop's geometry
pub fn passes_through(
    hoop: &HoopGeometry,
    current: Vec3,
    previous: Vec3,
    tuning: &ScoringTuning,
) -> bool {
    is_scoring_pass(
        current,
        previous,
        hoop.rim_center,
        hoop.rim_radius,
        hoop.rim_height,
        tuning,
    )
}
