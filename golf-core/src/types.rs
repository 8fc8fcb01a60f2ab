//! Core types for the shot physics.
//!
//! World units are whatever the course model uses (the demo course is
//! modelled roughly in meters). Time is in seconds.
//!
//! Coordinate system:
//! - X: horizontal
//! - Y: vertical (positive upward)
//! - Z: horizontal
//!
//! The ground plane is the XZ plane. Everything that "lies in the ground
//! plane" has `y == 0` as a direction, or a fixed `y` as a point.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

// =============================================================================
// Planar helpers
// =============================================================================

/// Ground-plane operations on `DVec3`.
pub trait Planar {
    /// Copy with the vertical component zeroed.
    fn flatten(self) -> DVec3;

    /// Length of the XZ part only.
    fn planar_length(self) -> f64;

    /// Distance to `other` ignoring height.
    fn planar_distance(self, other: DVec3) -> f64;
}

impl Planar for DVec3 {
    fn flatten(self) -> DVec3 {
        DVec3::new(self.x, 0.0, self.z)
    }

    fn planar_length(self) -> f64 {
        DVec2::new(self.x, self.z).length()
    }

    fn planar_distance(self, other: DVec3) -> f64 {
        (self - other).planar_length()
    }
}

// =============================================================================
// Ball State
// =============================================================================

/// Complete state of the ball at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub pos: DVec3,
    pub vel: DVec3,
    pub radius: f64,
}

impl BallState {
    pub fn new(pos: DVec3, vel: DVec3, radius: f64) -> Self {
        Self { pos, vel, radius }
    }

    /// Ball at rest at a given position
    pub fn at_rest(pos: DVec3, radius: f64) -> Self {
        Self {
            pos,
            vel: DVec3::ZERO,
            radius,
        }
    }

    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    pub fn is_moving(&self) -> bool {
        self.vel != DVec3::ZERO
    }
}

// =============================================================================
// Bounds / Hole
// =============================================================================

/// Axis-aligned bounding box, as reported by the scene for a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Half of the larger horizontal extent. Treats the box as a disc in XZ.
    pub fn planar_radius(&self) -> f64 {
        let size = self.size();
        size.x.max(size.z) / 2.0
    }
}

/// The cup, approximated as a disc in the ground plane.
///
/// Computed once after the course has loaded and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoleRegion {
    pub center: DVec3,
    pub radius: f64,
}

impl HoleRegion {
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn from_bounds(bounds: &Aabb) -> Self {
        Self {
            center: bounds.center(),
            radius: bounds.planar_radius(),
        }
    }
}

// =============================================================================
// Events
// =============================================================================

/// A released drag, converted into the ball's launch velocity.
///
/// Produced at most once per pointer release and consumed once.
/// The velocity always lies in the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotEvent {
    pub velocity: DVec3,
}

impl ShotEvent {
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}

/// Result of one hole check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollisionStatus {
    /// Ball currently overlaps the hole.
    pub colliding: bool,
    /// Rising edge: overlapping now, not overlapping on the previous check.
    pub entered: bool,
}

// =============================================================================
// Constants
// =============================================================================

/// Default tuning values. Overridable through [`crate::tuning::Tuning`].
pub mod constants {
    /// Drags shorter than this (world units) never fire a shot
    pub const MIN_DRAG: f64 = 0.05;

    /// Launch speed per world unit of drag
    pub const POWER_SCALE: f64 = 21.0;

    /// Longest aim line shown to the player. Does not limit shot speed.
    pub const MAX_DRAG: f64 = 2.5;

    /// Below this speed the ball counts as at rest and accepts a new shot
    pub const REST_EPS: f64 = 0.01;

    /// Rolling friction decay rate (1/s)
    pub const FRICTION_K: f64 = 2.0;

    /// Below this speed, after friction, the ball is snapped to zero velocity
    pub const STOP_EPS: f64 = 0.05;

    /// Slack subtracted from the hole overlap test for mesh pivot offsets
    pub const HOLE_MARGIN: f64 = 0.01;

    /// Fastest entry that still drops into the cup
    pub const MAX_ENTRY_SPEED: f64 = 35.0;

    /// Longest frame the driver will integrate (e.g. after a background tab resumes)
    pub const MAX_FRAME_DT: f64 = 0.1;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_drops_height() {
        let v = DVec3::new(1.0, 5.0, -2.0);
        assert_eq!(v.flatten(), DVec3::new(1.0, 0.0, -2.0));
    }

    #[test]
    fn test_planar_distance_ignores_height() {
        let a = DVec3::new(0.0, 10.0, 0.0);
        let b = DVec3::new(3.0, -4.0, 4.0);
        assert!((a.planar_distance(b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_hole_from_bounds_uses_larger_planar_extent() {
        let bounds = Aabb::new(DVec3::new(1.0, 0.0, 1.0), DVec3::new(1.2, 3.0, 1.3));
        let hole = HoleRegion::from_bounds(&bounds);

        assert!((hole.center.x - 1.1).abs() < 1e-10);
        assert!((hole.center.y - 1.5).abs() < 1e-10);
        assert!((hole.center.z - 1.15).abs() < 1e-10);
        // Height (3.0) must not leak into the radius
        assert!((hole.radius - 0.15).abs() < 1e-10);
    }

    #[test]
    fn test_ball_at_rest() {
        let ball = BallState::at_rest(DVec3::new(1.0, 0.0, 2.0), 0.05);
        assert_eq!(ball.speed(), 0.0);
        assert!(!ball.is_moving());
    }
}
