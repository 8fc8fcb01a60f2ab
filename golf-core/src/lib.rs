//! # Golf Core
//!
//! Shot physics for a browser mini-golf demo: pointer drag to launch
//! velocity, rolling friction, and hole detection. Rendering, asset loading
//! and the camera stay in the host; it feeds in ground-plane pointer hits and
//! frame times, and reads back the ball position.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (ball state, hole region, bounds, events)
//! - `input`: Pointer drag gesture to shot conversion
//! - `friction`: Rolling friction models
//! - `integrator`: Ball integration with rest/stop thresholds
//! - `collision`: Hole detection and entry acceptance
//! - `course`: Locating the hole and ball in a loaded course
//! - `tuning`: YAML tuning presets
//! - `round`: Per-frame driver (strokes, win state, reset)

pub mod collision;
pub mod course;
pub mod friction;
pub mod input;
pub mod integrator;
pub mod round;
pub mod tuning;
pub mod types;

pub use round::{FrameReport, Round, RoundPhase};
pub use tuning::Tuning;
