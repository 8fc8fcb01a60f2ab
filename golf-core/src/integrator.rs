//! Ball integration on the green.
//!
//! The ball rolls on a flat course: no gravity, no bounces. Each frame:
//!
//! ```text
//! 1. pos_new = pos + vel * dt              (advance)
//! 2. vel_new = vel * friction(dt)          (apply_friction)
//! 3. |vel_new| < stop_eps  =>  vel_new = 0
//! ```
//!
//! Position is integrated with the velocity from *before* friction. The
//! driver runs the hole check between steps 1 and 2, so the entry speed it
//! sees is the speed the ball actually crossed the rim with.
//!
//! The integrator is the only writer of the ball position; the host copies it
//! into the rendered mesh after every frame.

use glam::DVec3;

use crate::friction::{EulerDecay, FrictionModel};
use crate::tuning::PhysicsTuning;
use crate::types::BallState;

/// Owns the ball's position and velocity.
#[derive(Debug, Clone)]
pub struct BallIntegrator<F: FrictionModel = EulerDecay> {
    state: BallState,
    friction: F,
    rest_eps: f64,
    stop_eps: f64,
}

impl BallIntegrator<EulerDecay> {
    /// Ball at rest at `pos` with the in-game friction model.
    pub fn new(pos: DVec3, radius: f64, tuning: &PhysicsTuning) -> Self {
        Self::with_friction(pos, radius, EulerDecay::new(tuning.friction_k), tuning)
    }
}

impl<F: FrictionModel> BallIntegrator<F> {
    pub fn with_friction(pos: DVec3, radius: f64, friction: F, tuning: &PhysicsTuning) -> Self {
        Self {
            state: BallState::at_rest(pos, radius),
            friction,
            rest_eps: tuning.rest_eps,
            stop_eps: tuning.stop_eps,
        }
    }

    pub fn state(&self) -> &BallState {
        &self.state
    }

    pub fn position(&self) -> DVec3 {
        self.state.pos
    }

    pub fn velocity(&self) -> DVec3 {
        self.state.vel
    }

    pub fn speed(&self) -> f64 {
        self.state.speed()
    }

    pub fn radius(&self) -> f64 {
        self.state.radius
    }

    /// Slow enough to take a new shot.
    pub fn is_at_rest(&self) -> bool {
        self.state.speed() < self.rest_eps
    }

    /// Launch the ball. Ignored (returns `false`) while it is still rolling.
    ///
    /// Callers count a stroke only when this returns `true`.
    pub fn apply_impulse(&mut self, velocity: DVec3) -> bool {
        if !self.is_at_rest() {
            log::debug!(
                "impulse rejected, ball still rolling at {:.3}",
                self.state.speed()
            );
            return false;
        }
        self.state.vel = velocity;
        true
    }

    /// Move the ball along its current velocity. `dt` must be finite and >= 0.
    pub fn advance(&mut self, dt: f64) {
        self.state.pos += self.state.vel * dt;
    }

    /// Decay the velocity and snap it to exactly zero once it is slow enough.
    pub fn apply_friction(&mut self, dt: f64) {
        self.state.vel *= self.friction.decay_factor(dt);
        if self.state.speed() < self.stop_eps {
            self.state.vel = DVec3::ZERO;
        }
    }

    /// One full frame: [`advance`](Self::advance) then
    /// [`apply_friction`](Self::apply_friction).
    pub fn step(&mut self, dt: f64) {
        self.advance(dt);
        self.apply_friction(dt);
    }

    /// Halt the ball where it is.
    pub fn stop(&mut self) {
        self.state.vel = DVec3::ZERO;
    }

    /// Teleport the ball to `pos` and stop it.
    pub fn reset(&mut self, pos: DVec3) {
        self.state.pos = pos;
        self.state.vel = DVec3::ZERO;
    }
}

// =============================================================================
// Tests
// =============================================================================
