//! Rolling friction on the green.
//!
//! The ball decelerates in proportion to its velocity, i.e. it decays
//! exponentially:
//!
//! ```text
//! dv/dt = -k * v    =>    v(t) = v0 * exp(-k * t)
//! ```
//!
//! The game uses one explicit Euler step per frame, `v *= 1 - k*dt`, floored
//! at zero so a long frame cannot reverse the ball. No sub-stepping: at
//! typical frame rates the ball stops a few percent sooner than the exact
//! solution would.

/// Per-frame velocity scale factor.
pub trait FrictionModel {
    /// Factor in `[0, 1]` to multiply the velocity by after `dt` seconds.
    fn decay_factor(&self, dt: f64) -> f64;
}

/// `max(0, 1 - k*dt)`: the in-game model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerDecay {
    pub k: f64,
}

impl EulerDecay {
    pub fn new(k: f64) -> Self {
        Self { k }
    }
}

impl FrictionModel for EulerDecay {
    fn decay_factor(&self, dt: f64) -> f64 {
        (1.0 - self.k * dt).max(0.0)
    }
}

/// `exp(-k*dt)`: closed form, frame-rate independent. Reference for tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExactDecay {
    pub k: f64,
}

impl ExactDecay {
    pub fn new(k: f64) -> Self {
        Self { k }
    }
}

impl FrictionModel for ExactDecay {
    fn decay_factor(&self, dt: f64) -> f64 {
        (-self.k * dt).exp()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euler_factor() {
        let friction = EulerDecay::new(2.0);
        assert!((friction.decay_factor(0.1) - 0.8).abs() < 1e-12);
        assert_eq!(friction.decay_factor(0.0), 1.0);
    }

    #[test]
    fn test_euler_never_reverses() {
        let friction = EulerDecay::new(2.0);
        assert_eq!(friction.decay_factor(0.5), 0.0);
        assert_eq!(friction.decay_factor(3.0), 0.0);
    }

    #[test]
    fn test_euler_close_to_exact_at_60fps() {
        let euler = EulerDecay::new(2.0);
        let exact = ExactDecay::new(2.0);
        let dt = 1.0 / 60.0;

        let mut v_euler = 20.0;
        let mut v_exact = 20.0;
        for _ in 0..60 {
            v_euler *= euler.decay_factor(dt);
            v_exact *= exact.decay_factor(dt);
        }

        // One second in, both should be near 20 * e^-2 ≈ 2.707
        assert!((v_exact - 20.0 * (-2.0f64).exp()).abs() < 1e-9);
        assert!(
            (v_euler - v_exact).abs() / v_exact < 0.05,
            "Euler {} drifted from exact {}",
            v_euler,
            v_exact
        );
    }
}
