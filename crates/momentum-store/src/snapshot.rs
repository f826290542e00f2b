//! Customer-state snapshot and patch records exchanged with the store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use momentum_core::engine::CycleInput;
use momentum_core::types::{ActionEvent, CompetencyState, MilestoneProgress, ToolAccessStatus, ToolId};

/// Full customer state as read from the store, with the version used for
/// optimistic concurrency on the following write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerSnapshot {
    pub history: Vec<ActionEvent>,
    pub competency: CompetencyState,
    pub tool_access: BTreeMap<ToolId, ToolAccessStatus>,
    pub milestone_progress: BTreeMap<String, MilestoneProgress>,
    /// Monotonic record version. Incremented by every successful write.
    pub version: u64,
}

impl CustomerSnapshot {
    /// The engine-facing view of this snapshot.
    pub fn cycle_input(&self) -> CycleInput {
        CycleInput {
            history: self.history.clone(),
            competency: self.competency.clone(),
            tool_access: self.tool_access.clone(),
            milestone_progress: self.milestone_progress.clone(),
        }
    }
}

/// Partial write: only populated fields are persisted. The caller decides
/// what to save after a cycle; untouched fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerPatch {
    /// Events to append to the stored history.
    pub append_history: Vec<ActionEvent>,
    pub competency: Option<CompetencyState>,
    pub tool_access: Option<BTreeMap<ToolId, ToolAccessStatus>>,
    /// Milestone records to upsert by id.
    pub milestone_progress: BTreeMap<String, MilestoneProgress>,
}

impl CustomerPatch {
    /// Patch covering everything a completed cycle produced.
    pub fn from_outcome(outcome: &momentum_core::engine::CycleOutcome) -> Self {
        Self {
            append_history: vec![outcome.event.clone()],
            competency: Some(outcome.competency.clone()),
            tool_access: Some(outcome.tool_access.clone()),
            milestone_progress: outcome
                .milestones
                .updated
                .iter()
                .map(|p| (p.milestone_id.clone(), p.clone()))
                .collect(),
        }
    }

    /// True when applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.append_history.is_empty()
            && self.competency.is_none()
            && self.tool_access.is_none()
            && self.milestone_progress.is_empty()
    }
}
