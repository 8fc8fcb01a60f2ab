//! Browser bindings for the golf-core shot physics.
//!
//! The page owns rendering and the ground-plane ray cast; it forwards pointer
//! hits and frame times and copies the ball position back onto its mesh:
//!
//! ```js
//! import init, { GolfGame, Vec3 } from "./pkg/golf_wasm.js";
//!
//! await init();
//! const game = new GolfGame(new Vec3(0, 0.05, 0), 0.05, new Vec3(3, 0, 1), 0.1);
//!
//! canvas.addEventListener("pointerdown", (e) => {
//!   const hit = groundHit(e);
//!   game.pointer_down(!!hit, hit?.x ?? 0, hit?.y ?? 0, hit?.z ?? 0, e.metaKey);
//! });
//!
//! function animate() {
//!   const result = game.frame(clock.getDelta());
//!   const p = game.ball_position();
//!   ballMesh.position.set(p.x, p.y, p.z);
//!   if (result.won) showBanner(`Holed in ${result.strokes}!`);
//!   requestAnimationFrame(animate);
//! }
//! ```

#[cfg(target_arch = "wasm32")]
mod logger;

use glam::DVec3;
use wasm_bindgen::prelude::*;

use golf_core::collision::EntryVerdict;
use golf_core::course::HoleLookupError;
use golf_core::types::HoleRegion;
use golf_core::{FrameReport, Round, RoundPhase, Tuning};

/// Module start: panic messages and `log` output go to the browser console.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

/// 3D vector for positions and velocities.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[wasm_bindgen]
impl Vec3 {
    #[wasm_bindgen(constructor)]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        DVec3::from(*self).length()
    }
}

impl From<DVec3> for Vec3 {
    fn from(v: DVec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vec3> for DVec3 {
    fn from(v: Vec3) -> Self {
        DVec3::new(v.x, v.y, v.z)
    }
}

/// Aim line endpoints while the player is dragging.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct AimLine {
    pub start: Vec3,
    pub tip: Vec3,
    /// Clamped to the tuning's `max_drag`.
    pub length: f64,
}

/// Outcome of one frame, flattened for JS.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameResult {
    pub shot_fired: bool,
    pub colliding: bool,
    pub entered: bool,
    /// Entered slow enough to drop.
    pub holed: bool,
    /// Entered too fast and kept rolling.
    pub rolled_over: bool,
    /// Speed at entry, 0 when nothing entered this frame.
    pub entry_speed: f64,
    pub won: bool,
    pub strokes: u32,
}

impl From<FrameReport> for FrameResult {
    fn from(report: FrameReport) -> Self {
        let (holed, rolled_over, entry_speed) = match report.verdict {
            Some(EntryVerdict::Holed { speed }) => (true, false, speed),
            Some(EntryVerdict::TooFast { speed, .. }) => (false, true, speed),
            None => (false, false, 0.0),
        };
        Self {
            shot_fired: report.shot_fired,
            colliding: report.collision.colliding,
            entered: report.collision.entered,
            holed,
            rolled_over,
            entry_speed,
            won: report.phase == RoundPhase::Won,
            strokes: report.strokes,
        }
    }
}

fn ground_hit(hit: bool, x: f64, y: f64, z: f64) -> Option<DVec3> {
    hit.then(|| DVec3::new(x, y, z))
}

fn hole_lookup(center: Option<Vec3>, radius: f64) -> Result<HoleRegion, HoleLookupError> {
    center
        .map(|c| HoleRegion::new(c.into(), radius))
        .ok_or(HoleLookupError::NotFound)
}

/// One hole of mini-golf.
#[wasm_bindgen]
pub struct GolfGame {
    round: Round,
}

#[wasm_bindgen]
impl GolfGame {
    /// New game with default tuning. Pass `undefined` as the hole center when
    /// the course has no hole.
    #[wasm_bindgen(constructor)]
    pub fn new(
        ball: Vec3,
        ball_radius: f64,
        hole_center: Option<Vec3>,
        hole_radius: f64,
    ) -> Self {
        Self::with_tuning(Tuning::default(), ball, ball_radius, hole_center, hole_radius)
    }

    /// New game from a YAML tuning preset.
    #[wasm_bindgen(js_name = withTuningYaml)]
    pub fn with_tuning_yaml(
        yaml: &str,
        ball: Vec3,
        ball_radius: f64,
        hole_center: Option<Vec3>,
        hole_radius: f64,
    ) -> Result<GolfGame, JsError> {
        let tuning = Tuning::from_yaml_str(yaml).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self::with_tuning(tuning, ball, ball_radius, hole_center, hole_radius))
    }

    /// Replace the hole, e.g. after the course model has reloaded.
    pub fn set_hole(&mut self, center: Vec3, radius: f64) {
        self.round.set_hole(hole_lookup(Some(center), radius));
    }

    pub fn clear_hole(&mut self) {
        self.round.set_hole(hole_lookup(None, 0.0));
    }

    /// `hit` is false when the pointer ray missed the ground plane.
    pub fn pointer_down(&mut self, hit: bool, x: f64, y: f64, z: f64, pan_modifier: bool) {
        self.round.pointer_down(ground_hit(hit, x, y, z), pan_modifier);
    }

    pub fn pointer_move(&mut self, hit: bool, x: f64, y: f64, z: f64) {
        self.round.pointer_move(ground_hit(hit, x, y, z));
    }

    pub fn pointer_up(&mut self, hit: bool, x: f64, y: f64, z: f64) {
        self.round.pointer_up(ground_hit(hit, x, y, z));
    }

    /// Advance by `dt` seconds.
    pub fn frame(&mut self, dt: f64) -> FrameResult {
        self.round.frame(dt).into()
    }

    pub fn reset(&mut self) {
        self.round.reset();
    }

    pub fn ball_position(&self) -> Vec3 {
        self.round.ball().pos.into()
    }

    pub fn ball_velocity(&self) -> Vec3 {
        self.round.ball().vel.into()
    }

    pub fn ball_speed(&self) -> f64 {
        self.round.ball().speed()
    }

    #[wasm_bindgen(getter)]
    pub fn strokes(&self) -> u32 {
        self.round.strokes()
    }

    #[wasm_bindgen(getter)]
    pub fn won(&self) -> bool {
        self.round.is_won()
    }

    #[wasm_bindgen(getter)]
    pub fn aiming(&self) -> bool {
        self.round.is_aiming()
    }

    /// Aim line to draw, or `undefined` when not aiming.
    pub fn aim_line(&self) -> Option<AimLine> {
        self.round.aim_preview().map(|aim| AimLine {
            start: aim.start.into(),
            tip: aim.tip().into(),
            length: aim.length,
        })
    }
}

impl GolfGame {
    fn with_tuning(
        tuning: Tuning,
        ball: Vec3,
        ball_radius: f64,
        hole_center: Option<Vec3>,
        hole_radius: f64,
    ) -> Self {
        Self {
            round: Round::new(
                tuning,
                ball.into(),
                ball_radius,
                hole_lookup(hole_center, hole_radius),
            ),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
