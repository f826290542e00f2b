//! Tool access status: the derived lock state of each gated tool.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tool::ToolId;

/// Partial progress toward a gate requirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateProgress {
    /// Qualifying completions counted so far.
    pub completed: u32,
    /// Qualifying completions needed to unlock.
    pub required: u32,
}

impl GateProgress {
    pub fn new(completed: u32, required: u32) -> Self {
        Self {
            completed,
            required,
        }
    }

    /// Progress as a rounded percentage, clamped to 100.
    ///
    /// `required == 0` means ungated and reads as 100%.
    pub fn percent(&self) -> u8 {
        if self.required == 0 {
            return 100;
        }
        let pct = (self.completed as f64 / self.required as f64) * 100.0;
        pct.round().min(100.0) as u8
    }

    #[inline]
    pub fn is_met(&self) -> bool {
        self.completed >= self.required
    }
}

/// Access state of one tool, recomputed from history each evaluation cycle.
///
/// `unlocked_at` is write-once: the caller persists it the first time
/// `has_access` flips true and must never clear it ([`merge_unlocked_at`]
/// carries it forward across recomputations).
///
/// [`merge_unlocked_at`]: ToolAccessStatus::merge_unlocked_at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolAccessStatus {
    pub tool: ToolId,
    pub has_access: bool,
    pub progress: GateProgress,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl ToolAccessStatus {
    /// An ungated, always-available tool.
    pub fn open(tool: ToolId) -> Self {
        Self {
            tool,
            has_access: true,
            progress: GateProgress::new(0, 0),
            unlocked_at: None,
        }
    }

    /// Carry a previously persisted `unlocked_at` into a freshly computed
    /// status. Once set the timestamp is immutable, and a persisted unlock
    /// keeps the tool accessible even if the recomputed gate result says
    /// otherwise (unlocks never revoke).
    pub fn merge_unlocked_at(mut self, previous: Option<&ToolAccessStatus>) -> Self {
        if let Some(prev) = previous {
            if let Some(at) = prev.unlocked_at {
                self.unlocked_at = Some(at);
                self.has_access = true;
            }
        }
        self
    }
}
