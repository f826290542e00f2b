//! Milestone definitions and per-customer milestone progress.
//!
//! Definitions are static configuration loaded once at startup; progress is
//! per customer and persisted by the caller. A milestone is a one-time
//! achievement with its own requirement predicate, distinct from the
//! continuous tool-unlock gates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::competency::CompetencyCategory;
use super::tool::ToolId;

/// Grouping used by the dashboard to section the milestone list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneCategory {
    Onboarding,
    Analysis,
    Value,
    Consistency,
    Mastery,
}

/// Typed requirement predicate for one milestone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Requirement {
    /// N completions of one tool, regardless of quality.
    ToolCompletions { tool: ToolId, count: u32 },
    /// N completions of one tool meeting a minimum ICP score.
    QualifyingCompletions {
        tool: ToolId,
        count: u32,
        min_score: f64,
    },
    /// Cumulative progress points reaching a threshold.
    TotalPoints { points: u64 },
    /// Daily consistency streak reaching a length. Read from the
    /// caller-supplied competency state, never recomputed here.
    Streak { days: u32 },
    /// Every competency category at or above a score. Boolean snap:
    /// progress is 0 or 1 out of 1.
    AllCategoriesAtLeast { score: u8 },
}

impl Requirement {
    /// The target value shown as `required` in progress records.
    pub fn required(&self) -> u64 {
        match self {
            Self::ToolCompletions { count, .. } => u64::from(*count),
            Self::QualifyingCompletions { count, .. } => u64::from(*count),
            Self::TotalPoints { points } => *points,
            Self::Streak { days } => u64::from(*days),
            Self::AllCategoriesAtLeast { .. } => 1,
        }
    }
}

/// Competency gain granted when a milestone is achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyReward {
    pub category: CompetencyCategory,
    pub amount: i32,
}

/// Static milestone configuration. Immutable after registry construction.
///
/// Serializes for diagnostics but is never deserialized: definitions are
/// compiled in, not loaded from data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneDefinition {
    /// Stable snake_case identifier, e.g. `"icp_specialist"`.
    pub id: &'static str,
    pub name: &'static str,
    pub category: MilestoneCategory,
    pub requirement: Requirement,
    pub reward_points: u64,
    pub reward_competency: Option<CompetencyReward>,
    /// Badge asset key for the dashboard.
    pub badge: &'static str,
}

/// Per-customer progress toward one milestone.
///
/// `achieved` is a one-way latch: once true, later events must not alter
/// `current` or `required` (idempotence after achievement).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneProgress {
    pub milestone_id: String,
    pub current: u64,
    pub required: u64,
    pub achieved: bool,
    pub achieved_at: Option<DateTime<Utc>>,
    pub last_update: DateTime<Utc>,
}

impl MilestoneProgress {
    /// Fresh, zero-progress record for a definition. Created lazily on the
    /// first contributing event.
    pub fn start(definition: &MilestoneDefinition, now: DateTime<Utc>) -> Self {
        Self {
            milestone_id: definition.id.to_string(),
            current: 0,
            required: definition.requirement.required(),
            achieved: false,
            achieved_at: None,
            last_update: now,
        }
    }
}
