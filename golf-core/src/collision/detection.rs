//! Planar overlap detection against the cup, with entry edge-triggering.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::course::HoleLookupError;
use crate::tuning::HoleTuning;
use crate::types::{CollisionStatus, HoleRegion, Planar};

/// Memory between checks, needed to report each entry once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollisionState {
    pub previously_colliding: bool,
}

/// Whether a ball at `pos` overlaps `hole`. Boundary-inclusive.
pub fn overlaps(hole: &HoleRegion, pos: DVec3, ball_radius: f64, margin: f64) -> bool {
    pos.planar_distance(hole.center) <= hole.radius + ball_radius - margin
}

/// One detection step as a pure function: current overlap plus the rising
/// edge relative to `state`.
pub fn check_hole(
    hole: &HoleRegion,
    pos: DVec3,
    ball_radius: f64,
    margin: f64,
    state: CollisionState,
) -> (CollisionStatus, CollisionState) {
    let colliding = overlaps(hole, pos, ball_radius, margin);
    let status = CollisionStatus {
        colliding,
        entered: colliding && !state.previously_colliding,
    };
    (
        status,
        CollisionState {
            previously_colliding: colliding,
        },
    )
}

/// Hole detector for one course.
///
/// Built from the hole found once after the course loads. Without a hole it
/// stays inert and never reports a collision.
#[derive(Debug, Clone)]
pub struct HoleDetector {
    hole: Option<HoleRegion>,
    margin: f64,
    state: CollisionState,
}

impl HoleDetector {
    pub fn new(hole: HoleRegion, tuning: &HoleTuning) -> Self {
        Self {
            hole: Some(hole),
            margin: tuning.margin,
            state: CollisionState::default(),
        }
    }

    /// A detector with no hole.
    pub fn inert(tuning: &HoleTuning) -> Self {
        Self {
            hole: None,
            margin: tuning.margin,
            state: CollisionState::default(),
        }
    }

    /// Build from a hole lookup. A failed lookup is logged here, once, and
    /// yields an inert detector.
    pub fn from_lookup(lookup: Result<HoleRegion, HoleLookupError>, tuning: &HoleTuning) -> Self {
        match lookup {
            Ok(hole) => Self::new(hole, tuning),
            Err(e) => {
                log::warn!("hole detection disabled: {}", e);
                Self::inert(tuning)
            }
        }
    }

    pub fn hole(&self) -> Option<&HoleRegion> {
        self.hole.as_ref()
    }

    pub fn state(&self) -> CollisionState {
        self.state
    }

    /// Check the ball against the cup. Call once per frame with the
    /// post-integration position.
    pub fn check(&mut self, pos: DVec3, ball_radius: f64) -> CollisionStatus {
        let Some(hole) = self.hole else {
            self.state = CollisionState::default();
            return CollisionStatus::default();
        };

        let (status, state) = check_hole(&hole, pos, ball_radius, self.margin, self.state);
        self.state = state;

        if status.entered {
            log::info!(
                "ball entered hole (dist={:.3}, holeRadius={:.3}, ballRadius={:.3})",
                pos.planar_distance(hole.center),
                hole.radius,
                ball_radius
            );
        }
        status
    }

    /// Forget the previous overlap so the next entry fires again.
    pub fn reset(&mut self) {
        self.state = CollisionState::default();
    }
}

// =============================================================================
// Tests
// =============================================================================
