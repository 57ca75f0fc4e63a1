//! Three-point line geometry
//!
//! Per hoop the line is two straight corner segments parallel to the
//! sidelines, joined by an arc around a basket center that sits slightly in
//! front of the rim. Classification always uses the launch position.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::court::{CourtGeometry, HoopGeometry};
use crate::consts::*;

/// Point value zone of a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotZone {
    TwoPoint,
    ThreePoint,
}

impl ShotZone {
    pub fn points(self) -> u32 {
        match self {
            ShotZone::TwoPoint => 2,
            ShotZone::ThreePoint => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShotZone::TwoPoint => "2-POINT",
            ShotZone::ThreePoint => "3-POINT",
        }
    }
}

/// Three-point boundary shared by both hoops
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreePointLine {
    /// Arc radius around the basket center
    pub arc_radius: f32,
    /// |z| at which the corner straight segments run
    pub side_z: f32,
    /// Basket center offset from the rim center toward mid-court
    pub arc_center_offset: f32,
}

impl ThreePointLine {
    pub fn for_court(court: &CourtGeometry) -> Self {
        Self {
            arc_radius: THREE_POINT_ARC_RADIUS,
            side_z: court.width / 2.0 - THREE_POINT_SIDELINE_INSET,
            arc_center_offset: THREE_POINT_ARC_CENTER_OFFSET,
        }
    }

    /// Where the basket center for `hoop` sits (XZ)
    pub fn basket_center(&self, hoop: &HoopGeometry) -> Vec2 {
        Vec2::new(
            hoop.rim_center.x + hoop.side.toward_center() * self.arc_center_offset,
            hoop.rim_center.z,
        )
    }

    /// Distance from the basket center, along X, at which a corner segment meets the arc
    pub fn corner_x_offset(&self) -> f32 {
        (self.arc_radius * self.arc_radius - self.side_z * self.side_z)
            .max(0.0)
            .sqrt()
    }

    /// Whether a shot launched from `origin` toward `hoop` is worth three
    pub fn is_three_point(&self, origin: Vec3, hoop: &HoopGeometry) -> bool {
        let basket = self.basket_center(hoop);
        let rel = Vec2::new(origin.x, origin.z) - basket;

        if rel.y.abs() >= self.side_z {
            // Corner: compare how far out toward mid-court the shot is
            let out = rel.x * hoop.side.toward_center();
            out > self.corner_x_offset()
        } else {
            rel.length() > self.arc_radius
        }
    }

    pub fn zone(&self, origin: Vec3, hoop: &HoopGeometry) -> ShotZone {
        if self.is_three_point(origin, hoop) {
            ShotZone::ThreePoint
        } else {
            ShotZone::TwoPoint
        }
    }
}
