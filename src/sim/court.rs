//! Court and hoop geometry
//!
//! Static facts the physics core reads: court extents, rim placement and the
//! ring of collider points that stands in for the rim torus.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::consts::*;

/// Which end of the court a hoop stands at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoopSide {
    /// Negative X end
    Left,
    /// Positive X end
    Right,
}

impl HoopSide {
    /// Hoop serving the half-court containing `pos` (x < 0 is the left half)
    pub fn for_position(pos: Vec3) -> Self {
        if pos.x < 0.0 { HoopSide::Left } else { HoopSide::Right }
    }

    /// Unit X direction from this hoop toward mid-court
    #[inline]
    pub fn toward_center(self) -> f32 {
        match self {
            HoopSide::Left => 1.0,
            HoopSide::Right => -1.0,
        }
    }
}

/// One hoop: rim placement plus discrete rim colliders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoopGeometry {
    pub side: HoopSide,
    /// Rim center in world space (y = rim height)
    pub rim_center: Vec3,
    pub rim_radius: f32,
    pub rim_height: f32,
    /// Points sampled around the rim circle
    pub collider_points: Vec<Vec3>,
    /// Radius of each collider sphere
    pub collider_radius: f32,
}

impl HoopGeometry {
    pub fn new(
        side: HoopSide,
        rim_center: Vec3,
        rim_radius: f32,
        collider_count: usize,
        collider_radius: f32,
    ) -> Self {
        Self {
            side,
            rim_center,
            rim_radius,
            rim_height: rim_center.y,
            collider_points: sample_rim(rim_center, rim_radius, collider_count),
            collider_radius,
        }
    }
}

/// Evenly spaced points around a horizontal circle
pub fn sample_rim(center: Vec3, radius: f32, count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let theta = i as f32 / count as f32 * TAU;
            center + Vec3::new(radius * theta.cos(), 0.0, radius * theta.sin())
        })
        .collect()
}

/// Axis-aligned playable area for the ball center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourtBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl CourtBounds {
    pub fn new(length: f32, width: f32, margin: f32) -> Self {
        Self {
            min_x: -length / 2.0 + margin,
            max_x: length / 2.0 - margin,
            min_z: -width / 2.0 + margin,
            max_z: width / 2.0 - margin,
        }
    }

    /// Clamp X/Z into bounds, leaving Y untouched
    #[inline]
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(self.min_x, self.max_x),
            p.y,
            p.z.clamp(self.min_z, self.max_z),
        )
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.z >= self.min_z && p.z <= self.max_z
    }
}

/// Full court description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourtGeometry {
    pub length: f32,
    pub width: f32,
    pub backboard_thickness: f32,
    pub left: HoopGeometry,
    pub right: HoopGeometry,
}

impl Default for CourtGeometry {
    fn default() -> Self {
        Self::standard()
    }
}

impl CourtGeometry {
    /// NBA-sized court with regulation rims
    pub fn standard() -> Self {
        Self::new(COURT_LENGTH, COURT_WIDTH)
    }

    /// Court of the given size; rims sit in front of the backboards at each baseline
    pub fn new(length: f32, width: f32) -> Self {
        let rim_x = length / 2.0 - BACKBOARD_THICKNESS - RIM_RADIUS;
        let hoop = |side: HoopSide, x: f32| {
            HoopGeometry::new(
                side,
                Vec3::new(x, RIM_HEIGHT, 0.0),
                RIM_RADIUS,
                RIM_COLLIDER_COUNT,
                RIM_COLLIDER_RADIUS,
            )
        };
        Self {
            length,
            width,
            backboard_thickness: BACKBOARD_THICKNESS,
            left: hoop(HoopSide::Left, -rim_x),
            right: hoop(HoopSide::Right, rim_x),
        }
    }

    pub fn hoop(&self, side: HoopSide) -> &HoopGeometry {
        match side {
            HoopSide::Left => &self.left,
            HoopSide::Right => &self.right,
        }
    }

    /// Hoop on the same half-court as `pos`
    pub fn nearest_hoop(&self, pos: Vec3) -> &HoopGeometry {
        self.hoop(HoopSide::for_position(pos))
    }

    pub fn bounds(&self, margin: f32) -> CourtBounds {
        CourtBounds::new(self.length, self.width, margin)
    }
}
