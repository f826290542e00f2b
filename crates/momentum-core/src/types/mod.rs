//! Domain types for the momentum progression engine.

mod access;
mod action;
mod competency;
mod milestone;
mod repair;
mod tool;

pub use access::{GateProgress, ToolAccessStatus};
pub use action::{ActionEvent, ActionMetrics};
pub use competency::{CompetencyCategory, CompetencyState, HiddenRank, OverallLevel};
pub use milestone::{
    CompetencyReward, MilestoneCategory, MilestoneDefinition, MilestoneProgress, Requirement,
};
pub use repair::{FieldRepair, RepairReport};
pub use tool::ToolId;
