//! Per-frame driver for one hole.
//!
//! Wires shot input, ball integration and hole detection together, keeps the
//! stroke count, and decides when the hole is finished.
//!
//! ## Frame Order
//!
//! ```text
//! 1. consume pending shot -> apply impulse (stroke += 1 if accepted)
//! 2. advance ball position
//! 3. check hole against the new position -> judge entry speed
//! 4. apply friction / stop threshold
//! ```
//!
//! Pointer events may arrive at any time between frames; they only touch the
//! gesture and the pending shot, which step 1 picks up.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::collision::{judge_entry, EntryVerdict, HoleDetector};
use crate::course::{
    ball_radius_from_bounds, locate_ball, locate_hole, HoleLookupError, SceneNode,
};
use crate::input::{AimPreview, ShotInput};
use crate::integrator::BallIntegrator;
use crate::tuning::Tuning;
use crate::types::{BallState, CollisionStatus, HoleRegion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Ball in play.
    Playing,
    /// Ball dropped. Frozen until reset.
    Won,
}

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// A shot was accepted and counted this frame.
    pub shot_fired: bool,
    pub collision: CollisionStatus,
    /// Set on the frame the ball entered the cup.
    pub verdict: Option<EntryVerdict>,
    pub phase: RoundPhase,
    pub strokes: u32,
}

/// One hole being played.
#[derive(Debug, Clone)]
pub struct Round {
    tuning: Tuning,
    start: DVec3,
    input: ShotInput,
    ball: BallIntegrator,
    detector: HoleDetector,
    strokes: u32,
    phase: RoundPhase,
}

impl Round {
    pub fn new(
        tuning: Tuning,
        ball_start: DVec3,
        ball_radius: f64,
        hole: Result<HoleRegion, HoleLookupError>,
    ) -> Self {
        Self {
            input: ShotInput::new(tuning.shot),
            ball: BallIntegrator::new(ball_start, ball_radius, &tuning.physics),
            detector: HoleDetector::from_lookup(hole, &tuning.hole),
            tuning,
            start: ball_start,
            strokes: 0,
            phase: RoundPhase::Playing,
        }
    }

    /// Build from a loaded course: the ball starts at the center of the node
    /// named "Ball". Returns `None` when the course has no ball.
    pub fn from_course(tuning: Tuning, nodes: &[SceneNode]) -> Option<Self> {
        let Some(ball) = locate_ball(nodes) else {
            log::warn!("course has no Ball node");
            return None;
        };
        Some(Self::new(
            tuning,
            ball.bounds.center(),
            ball_radius_from_bounds(&ball.bounds),
            locate_hole(nodes),
        ))
    }

    /// Swap in the hole once it has been resolved. Entry tracking starts over.
    pub fn set_hole(&mut self, hole: Result<HoleRegion, HoleLookupError>) {
        self.detector = HoleDetector::from_lookup(hole, &self.tuning.hole);
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn ball(&self) -> &BallState {
        self.ball.state()
    }

    pub fn hole(&self) -> Option<&HoleRegion> {
        self.detector.hole()
    }

    pub fn strokes(&self) -> u32 {
        self.strokes
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_won(&self) -> bool {
        self.phase == RoundPhase::Won
    }

    pub fn is_aiming(&self) -> bool {
        self.input.is_aiming()
    }

    pub fn aim_preview(&self) -> Option<AimPreview> {
        self.input.aim_preview()
    }

    pub fn pointer_down(&mut self, hit: Option<DVec3>, pan_modifier: bool) {
        self.input.on_drag_start(hit, pan_modifier);
    }

    pub fn pointer_move(&mut self, hit: Option<DVec3>) {
        self.input.on_drag_move(hit);
    }

    pub fn pointer_up(&mut self, hit: Option<DVec3>) {
        self.input.on_drag_end(hit);
    }

    /// Advance one frame of `dt` seconds.
    ///
    /// `dt` is clamped to `[0, max_frame_dt]`; a non-finite value counts as 0.
    pub fn frame(&mut self, dt: f64) -> FrameReport {
        let dt = self.clamp_dt(dt);
        let shot_fired = self.take_shot();

        if self.phase == RoundPhase::Won {
            return self.report(shot_fired, CollisionStatus::default(), None);
        }

        self.ball.advance(dt);

        let collision = self.detector.check(self.ball.position(), self.ball.radius());
        let verdict = collision.entered.then(|| self.judge());

        self.ball.apply_friction(dt);

        self.report(shot_fired, collision, verdict)
    }

    /// Restart the hole: ball back to the tee, entry tracking re-armed,
    /// strokes cleared, any gesture or queued shot dropped.
    pub fn reset(&mut self) {
        self.ball.reset(self.start);
        self.detector.reset();
        self.input.cancel();
        self.strokes = 0;
        self.phase = RoundPhase::Playing;
        log::info!("round reset");
    }

    fn clamp_dt(&self, dt: f64) -> f64 {
        if !dt.is_finite() {
            return 0.0;
        }
        dt.clamp(0.0, self.tuning.physics.max_frame_dt)
    }

    fn take_shot(&mut self) -> bool {
        let Some(shot) = self.input.consume_shot() else {
            return false;
        };

        if self.phase == RoundPhase::Won {
            log::debug!("hole finished, shot ignored");
            return false;
        }
        if !self.ball.apply_impulse(shot.velocity) {
            return false;
        }

        self.strokes += 1;
        log::info!(
            "stroke {}: velocity=({:.3}, {:.3}, {:.3})",
            self.strokes,
            shot.velocity.x,
            shot.velocity.y,
            shot.velocity.z
        );
        true
    }

    fn judge(&mut self) -> EntryVerdict {
        let verdict = judge_entry(self.ball.speed(), self.tuning.hole.max_entry_speed);
        match verdict {
            EntryVerdict::Holed { speed } => {
                self.ball.stop();
                self.phase = RoundPhase::Won;
                log::info!("holed in {} strokes, entry speed {:.3}", self.strokes, speed);
            }
            EntryVerdict::TooFast { speed, limit } => {
                log::info!(
                    "ball skipped over hole at speed {:.3} (limit {:.3})",
                    speed,
                    limit
                );
            }
        }
        verdict
    }

    fn report(
        &self,
        shot_fired: bool,
        collision: CollisionStatus,
        verdict: Option<EntryVerdict>,
    ) -> FrameReport {
        FrameReport {
            shot_fired,
            collision,
            verdict,
            phase: self.phase,
            strokes: self.strokes,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn round() -> Round {
        Round::new(
            Tuning::default(),
            DVec3::ZERO,
            0.05,
            Ok(HoleRegion::new(DVec3::new(5.0, 0.0, 0.0), 0.1)),
        )
    }

    #[test]
    fn test_dt_is_clamped() {
        let round = round();
        assert_eq!(round.clamp_dt(-1.0), 0.0);
        assert_eq!(round.clamp_dt(f64::NAN), 0.0);
        assert_eq!(round.clamp_dt(f64::INFINITY), 0.0);
        assert_eq!(round.clamp_dt(5.0), 0.1);
        assert_eq!(round.clamp_dt(0.016), 0.016);
    }

    #[test]
    fn test_pointer_events_wait_for_frame() {
        let mut round = round();
        round.pointer_down(Some(DVec3::ZERO), false);
        round.pointer_move(Some(DVec3::new(-1.0, 0.0, 0.0)));
        assert!(round.is_aiming());
        round.pointer_up(None);

        assert_eq!(round.ball().vel, DVec3::ZERO);
        assert_eq!(round.strokes(), 0);

        let report = round.frame(1.0 / 60.0);
        assert!(report.shot_fired);
        assert_eq!(report.strokes, 1);
        assert!(round.ball().pos.x > 0.0);
    }

    #[test]
    fn test_shot_while_rolling_is_not_counted() {
        let mut round = round();
        for _ in 0..2 {
            round.pointer_down(Some(DVec3::ZERO), false);
            round.pointer_move(Some(DVec3::new(0.0, 0.0, 1.0)));
            round.pointer_up(None);
            round.frame(1.0 / 60.0);
        }
        assert_eq!(round.strokes(), 1);
    }

    #[test]
    fn test_click_without_drag_costs_no_stroke() {
        let mut round = round();
        round.pointer_down(Some(DVec3::ZERO), false);
        round.pointer_up(Some(DVec3::new(-1.0, 0.0, 0.0)));

        let report = round.frame(1.0 / 60.0);
        assert!(!report.shot_fired);
        assert_eq!(round.strokes(), 0);
        assert_eq!(round.ball().pos, DVec3::ZERO);
    }

    #[test]
    fn test_missing_hole_never_wins() {
        let mut round = Round::new(
            Tuning::default(),
            DVec3::ZERO,
            0.05,
            Err(HoleLookupError::NotFound),
        );
        assert!(round.hole().is_none());

        let report = round.frame(1.0 / 60.0);
        assert!(!report.collision.colliding);
        assert_eq!(report.phase, RoundPhase::Playing);
    }

    #[test]
    fn test_set_hole_later() {
        let mut round = Round::new(
            Tuning::default(),
            DVec3::ZERO,
            0.05,
            Err(HoleLookupError::NotFound),
        );
        round.set_hole(Ok(HoleRegion::new(DVec3::ZERO, 0.1)));

        // Resting on the cup counts as a zero-speed entry
        let report = round.frame(1.0 / 60.0);
        assert!(report.collision.entered);
        assert_eq!(report.phase, RoundPhase::Won);
    }

    #[test]
    fn test_from_course() {
        use crate::types::Aabb;

        let nodes = vec![
            SceneNode::new(
                "Ball",
                Aabb::new(DVec3::new(-0.05, 0.0, -0.05), DVec3::new(0.05, 0.1, 0.05)),
                true,
            ),
            SceneNode::new(
                "Hole",
                Aabb::new(DVec3::new(2.9, -0.1, -0.1), DVec3::new(3.1, 0.0, 0.1)),
                true,
            ),
        ];

        let round = Round::from_course(Tuning::default(), &nodes).unwrap();
        assert!((round.ball().radius - 0.05).abs() < 1e-12);
        assert!((round.ball().pos.y - 0.05).abs() < 1e-12);
        assert!((round.hole().unwrap().center.x - 3.0).abs() < 1e-12);

        assert!(Round::from_course(Tuning::default(), &nodes[1..]).is_none());
    }
}
