//! Hole detection for the mini-golf ball.
//!
//! This module handles:
//! - **Detection**: whether the ball overlaps the cup, and the rising edge
//!   when it first drops in
//! - **Acceptance**: whether an entry counts, based on how fast the ball was
//!   rolling
//!
//! ## Overlap Test
//!
//! Ball and cup are both treated as discs in the ground plane:
//!
//! ```text
//!        cup            ball
//!    (    +    )      ( + )
//!         |<---- d ---->|
//!
//!    colliding  <=>  d <= r_cup + r_ball - margin
//! ```
//!
//! Detection is purely observational. The ball is never deflected; a ball
//! that is too fast simply rolls over the cup.

pub mod acceptance;
pub mod detection;

pub use acceptance::*;
pub use detection::*;
