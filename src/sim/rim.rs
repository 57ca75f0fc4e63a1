//! Rim collision detection and response
//!
//! The rim torus is approximated by a ring of small collider spheres. A ball
//! overlapping one is pushed out along the separation normal and its velocity
//! reflected with heavy damping, so the rim feels soft.

use glam::Vec3;

use super::court::HoopGeometry;
use super::state::Ball;
use crate::horizontal_distance;
use crate::tuning::RimTuning;

/// A resolved rim contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RimContact {
    /// Collider point that was hit
    pub point: Vec3,
    /// Separation normal (collider → ball), unit length
    pub normal: Vec3,
    /// Found by the swept (tunneling) check rather than overlap
    pub swept: bool,
}

/// Anything that can push a ball off a rim.
///
/// Implementations mutate the ball in place and report at most one contact
/// per call.
pub trait RimCollider {
    fn resolve(&self, ball: &mut Ball, previous: Vec3, tuning: &RimTuning) -> Option<RimContact>;
}

/// Rim made of discrete collider points
#[derive(Debug, Clone, Copy)]
pub struct PointRim<'a> {
    pub hoop: &'a HoopGeometry,
}

impl<'a> PointRim<'a> {
    pub fn new(hoop: &'a HoopGeometry) -> Self {
        Self { hoop }
    }

    /// Broad phase: only balls near rim height and over the hoop footprint
    pub fn in_range(&self, pos: Vec3, tuning: &RimTuning) -> bool {
        let dy = (pos.y - self.hoop.rim_height).abs();
        if dy > tuning.height_window {
            return false;
        }
        horizontal_distance(pos, self.hoop.rim_center)
            <= self.hoop.rim_radius + tuning.ball_radius * 2.0
    }

    fn contact_distance(&self, tuning: &RimTuning) -> f32 {
        self.hoop.collider_radius + tuning.ball_radius
    }
}

impl RimCollider for PointRim<'_> {
    fn resolve(&self, ball: &mut Ball, previous: Vec3, tuning: &RimTuning) -> Option<RimContact> {
        if self.hoop.collider_points.is_empty() || !self.in_range(ball.pos, tuning) {
            return None;
        }
        let contact_dist = self.contact_distance(tuning);

        // Only the first overlapping collider is resolved per step
        if let Some(&c) = self
            .hoop
            .collider_points
            .iter()
            .find(|c| ball.pos.distance(**c) < contact_dist)
        {
            let normal = separation_normal(ball.pos, c, ball.vel);
            push_out_and_reflect(
                ball,
                c,
                normal,
                contact_dist + tuning.push_epsilon,
                tuning.energy_loss,
            );
            return Some(RimContact {
                point: c,
                normal,
                swept: false,
            });
        }

        // Fast balls can skip over a thin rim between steps
        if ball.vel.length() > tuning.swept_speed_threshold {
            for &c in &self.hoop.collider_points {
                let closest = closest_point_on_segment(previous, ball.pos, c);
                if closest.distance(c) < contact_dist {
                    let normal = separation_normal(closest, c, ball.vel);
                    push_out_and_reflect(
                        ball,
                        c,
                        normal,
                        contact_dist + tuning.push_epsilon,
                        tuning.swept_energy_loss,
                    );
                    return Some(RimContact {
                        point: c,
                        normal,
                        swept: true,
                    });
                }
            }
        }

        None
    }
}

/// Unit normal from collider to ball. Falls back to opposing the velocity
/// (then straight up) when the centers coincide.
fn separation_normal(ball_pos: Vec3, collider: Vec3, vel: Vec3) -> Vec3 {
    let n = (ball_pos - collider).normalize_or_zero();
    if n != Vec3::ZERO {
        return n;
    }
    let back = (-vel).normalize_or_zero();
    if back != Vec3::ZERO { back } else { Vec3::Y }
}

/// Place the ball `distance` from the collider along `normal`, then reflect
/// any velocity heading into the collider and scale by `energy_kept`
fn push_out_and_reflect(
    ball: &mut Ball,
    collider: Vec3,
    normal: Vec3,
    distance: f32,
    energy_kept: f32,
) {
    ball.pos = collider + normal * distance;
    let v_dot_n = ball.vel.dot(normal);
    if v_dot_n < 0.0 {
        ball.vel = reflect_velocity(ball.vel, normal) * energy_kept;
    }
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec3, normal: Vec3) -> Vec3 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Closest point to `p` on the segment `a`-`b`
pub fn closest_point_on_segment(a: Vec3, b: Vec3, p: Vec3) -> Vec3 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-12 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::court::CourtGeometry;

    fn flying_ball(pos: Vec3, vel: Vec3) -> Ball {
        let mut ball = Ball::at_rest(BALL_RADIUS + BALL_GROUND_OFFSET);
        ball.pos = pos;
        ball.vel = vel;
        ball.in_flight = true;
        ball
    }

    #[test]
    fn test_push_out_leaves_no_penetration() {
        let court = CourtGeometry::standard();
        let hoop = &court.right;
        let tuning = RimTuning::default();
        let c = hoop.collider_points[0];

        // Ball just outside the rim, overlapping the first collider, moving inward
        let start = c + Vec3::new(0.08, 0.03, 0.0);
        let mut ball = flying_ball(start, Vec3::new(-2.0, -3.0, 0.0));
        let contact = PointRim::new(hoop)
            .resolve(&mut ball, start, &tuning)
            .expect("overlap should collide");

        assert!(!contact.swept);
        assert_eq!(contact.point, c);
        let expected = hoop.collider_radius + tuning.ball_radius + tuning.push_epsilon;
        assert!((ball.pos.distance(c) - expected).abs() < 1e-4);
        assert!(ball.vel.dot(contact.normal) >= 0.0);
    }

    #[test]
    fn test_reflection_loses_energy() {
        let court = CourtGeometry::standard();
        let hoop = &court.right;
        let tuning = RimTuning::default();
        let c = hoop.collider_points[0];

        let start = c + Vec3::new(0.0, 0.1, 0.0);
        let mut ball = flying_ball(start, Vec3::new(0.0, -4.0, 0.0));
        PointRim::new(hoop).resolve(&mut ball, start, &tuning).unwrap();

        // Straight down onto the top of the collider bounces straight up at 60%
        assert!((ball.vel.y - 4.0 * tuning.energy_loss).abs() < 1e-4);
    }

    #[test]
    fn test_moving_away_keeps_velocity() {
        let court = CourtGeometry::standard();
        let hoop = &court.right;
        let tuning = RimTuning::default();
        let c = hoop.collider_points[0];

        let start = c + Vec3::new(0.0, 0.1, 0.0);
        let vel = Vec3::new(0.5, 2.0, 0.0);
        let mut ball = flying_ball(start, vel);
        assert!(PointRim::new(hoop).resolve(&mut ball, start, &tuning).is_some());
        assert_eq!(ball.vel, vel);
    }

    #[test]
    fn test_center_of_rim_is_clear() {
        let court = CourtGeometry::standard();
        let hoop = &court.left;
        let tuning = RimTuning::default();
        let mut ball = flying_ball(hoop.rim_center, Vec3::new(0.0, -5.0, 0.0));
        assert!(PointRim::new(hoop).resolve(&mut ball, hoop.rim_center, &tuning).is_none());
    }

    #[test]
    fn test_far_from_rim_height_is_skipped() {
        let court = CourtGeometry::standard();
        let hoop = &court.right;
        let tuning = RimTuning::default();
        // Directly on a collider but well below the rim band is impossible;
        // lift the ball 0.3 m and it must be ignored by the broad phase
        let pos = hoop.collider_points[0] + Vec3::new(0.0, 0.3, 0.0);
        let mut ball = flying_ball(pos, Vec3::new(0.0, -1.0, 0.0));
        assert!(PointRim::new(hoop).resolve(&mut ball, pos, &tuning).is_none());
    }

    #[test]
    fn test_swept_catches_tunneling() {
        let court = CourtGeometry::standard();
        let hoop = &court.right;
        let tuning = RimTuning::default();
        let c = hoop.collider_points[0];

        // Step jumps across the collider: before and after are both clear of it
        let previous = c + Vec3::new(0.0, 0.19, 0.0);
        let current = c + Vec3::new(0.0, -0.19, 0.0);
        let mut ball = flying_ball(current, Vec3::new(0.0, -12.0, 0.0));
        let contact = PointRim::new(hoop)
            .resolve(&mut ball, previous, &tuning)
            .expect("swept check should catch the pass");

        assert!(contact.swept);
        assert!((ball.vel.length() - 12.0 * tuning.swept_energy_loss).abs() < 1e-3);
        assert!(ball.vel.dot(contact.normal) >= 0.0);
    }

    #[test]
    fn test_slow_ball_skips_swept() {
        let court = CourtGeometry::standard();
        let hoop = &court.right;
        let tuning = RimTuning::default();
        let c = hoop.collider_points[0];

        let previous = c + Vec3::new(0.0, 0.19, 0.0);
        let current = c + Vec3::new(0.0, -0.19, 0.0);
        let mut ball = flying_ball(current, Vec3::new(0.0, -3.0, 0.0));
        assert!(PointRim::new(hoop).resolve(&mut ball, previous, &tuning).is_none());
    }

    #[test]
    fn test_closest_point_on_segment() {
        let a = Vec3::ZERO;
        let b = Vec3::new(2.0, 0.0, 0.0);
        assert_eq!(
            closest_point_on_segment(a, b, Vec3::new(1.0, 1.0, 0.0)),
            Vec3::new(1.0, 0.0, 0.0)
        );
        assert_eq!(closest_point_on_segment(a, b, Vec3::new(-1.0, 1.0, 0.0)), a);
        assert_eq!(closest_point_on_segment(a, a, Vec3::ONE), a);
    }

    #[test]
    fn test_reflect_velocity() {
        let r = reflect_velocity(Vec3::new(1.0, -1.0, 0.0), Vec3::Y);
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
    }
}
