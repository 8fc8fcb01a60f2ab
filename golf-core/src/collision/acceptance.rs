//! Whether a ball entering the cup actually drops.
//!
//! A ball that reaches the cup too fast skims over the rim. The judgement uses
//! the speed at the moment of entry, before that frame's friction is applied.

use serde::{Deserialize, Serialize};

/// Outcome of a hole entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntryVerdict {
    /// Slow enough: the ball drops and the hole is finished.
    Holed { speed: f64 },
    /// Too fast: the ball keeps rolling.
    TooFast { speed: f64, limit: f64 },
}

impl EntryVerdict {
    pub fn is_holed(&self) -> bool {
        matches!(self, EntryVerdict::Holed { .. })
    }
}

/// Judge an entry at `speed` against `max_entry_speed` (inclusive).
pub fn judge_entry(speed: f64, max_entry_speed: f64) -> EntryVerdict {
    if speed <= max_entry_speed {
        EntryVerdict::Holed { speed }
    } else {
        EntryVerdict::TooFast {
            speed,
            limit: max_entry_speed,
        }
    }
}
