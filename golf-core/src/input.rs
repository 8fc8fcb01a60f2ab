//! Pointer drag to shot conversion.
//!
//! The player presses on the ground, pulls back, and releases. The ball is
//! launched *away* from the pull, like a slingshot:
//!
//! ```text
//!   current ●<─────────● start          ball goes ──────>
//!             pull back
//! ```
//!
//! Pointer coordinates arrive already projected onto the ground plane by the
//! host's ray cast. A ray that misses the plane arrives as `None`.
//!
//! Gesture state machine: `Idle -> Aiming` on a successful press,
//! `Aiming -> Idle` on release (with or without a shot).

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::tuning::ShotTuning;
use crate::types::{Planar, ShotEvent};

/// One press-drag-release gesture on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DragGesture {
    pub active: bool,
    pub start: DVec3,
    pub current: DVec3,
}

impl DragGesture {
    /// Pull-back vector (start - current) in the ground plane.
    pub fn drag(&self) -> DVec3 {
        (self.start - self.current).flatten()
    }
}

/// What the host needs to draw the aim line while the player is dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimPreview {
    pub start: DVec3,
    pub current: DVec3,
    /// Unit launch direction, or zero when the pointer has not moved.
    pub direction: DVec3,
    /// Drag length clamped to `max_drag`.
    pub length: f64,
}

impl AimPreview {
    /// Tip of the aim line, drawn from `start` along the launch direction.
    pub fn tip(&self) -> DVec3 {
        self.start + self.direction * self.length
    }
}

/// Convert a pull-back vector into a launch velocity.
///
/// Returns `None` for drags shorter than `min_drag`. Speed is *not* limited by
/// `max_drag`; only the aim preview is.
pub fn shot_from_drag(start: DVec3, current: DVec3, tuning: &ShotTuning) -> Option<ShotEvent> {
    let drag = (start - current).flatten();
    let drag_len = drag.length();
    if drag_len < tuning.min_drag || drag_len == 0.0 {
        return None;
    }

    let direction = drag / drag_len;
    let speed = drag_len * tuning.power_scale;

    Some(ShotEvent {
        velocity: direction * speed,
    })
}

/// Turns pointer gestures into at most one pending [`ShotEvent`].
#[derive(Debug, Clone)]
pub struct ShotInput {
    tuning: ShotTuning,
    gesture: DragGesture,
    pending: Option<ShotEvent>,
}

impl Default for ShotInput {
    fn default() -> Self {
        Self::new(ShotTuning::default())
    }
}

impl ShotInput {
    pub fn new(tuning: ShotTuning) -> Self {
        Self {
            tuning,
            gesture: DragGesture::default(),
            pending: None,
        }
    }

    pub fn tuning(&self) -> &ShotTuning {
        &self.tuning
    }

    pub fn gesture(&self) -> &DragGesture {
        &self.gesture
    }

    pub fn is_aiming(&self) -> bool {
        self.gesture.active
    }

    /// Pointer pressed.
    ///
    /// With the pan modifier held the press belongs to the camera, and any
    /// gesture in progress is abandoned. A press whose ray misses the ground is
    /// ignored.
    pub fn on_drag_start(&mut self, hit: Option<DVec3>, pan_modifier: bool) {
        if pan_modifier {
            self.gesture.active = false;
            return;
        }

        let Some(point) = hit else {
            return;
        };

        self.gesture = DragGesture {
            active: true,
            start: point,
            current: point,
        };
    }

    /// Pointer moved. Misses keep the last good point.
    pub fn on_drag_move(&mut self, hit: Option<DVec3>) {
        if !self.gesture.active {
            return;
        }
        if let Some(point) = hit {
            self.gesture.current = point;
        }
    }

    /// Pointer released. Ends the gesture and, for a long enough drag, queues a
    /// shot (replacing any shot not yet consumed).
    ///
    /// The drag is measured to the last move point; the release point itself is
    /// not read. Returns the queued shot for convenience; it stays pending until
    /// [`ShotInput::consume_shot`].
    pub fn on_drag_end(&mut self, _hit: Option<DVec3>) -> Option<ShotEvent> {
        if !self.gesture.active {
            return None;
        }
        self.gesture.active = false;

        let shot = shot_from_drag(self.gesture.start, self.gesture.current, &self.tuning);
        match shot {
            Some(event) => self.pending = Some(event),
            None => log::debug!(
                "drag of {:.3} below minimum {:.3}, no shot",
                self.gesture.drag().length(),
                self.tuning.min_drag
            ),
        }
        shot
    }

    /// Take the pending shot, if any. A second call returns `None`.
    pub fn consume_shot(&mut self) -> Option<ShotEvent> {
        self.pending.take()
    }

    pub fn has_pending_shot(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the gesture and any pending shot.
    pub fn cancel(&mut self) {
        self.gesture.active = false;
        self.pending = None;
    }

    /// Aim line for the gesture in progress.
    pub fn aim_preview(&self) -> Option<AimPreview> {
        if !self.gesture.active {
            return None;
        }

        let drag = self.gesture.drag();
        Some(AimPreview {
            start: self.gesture.start,
            current: self.gesture.current,
            direction: drag.normalize_or_zero(),
            length: drag.length().min(self.tuning.max_drag),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
