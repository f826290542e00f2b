//! Milestone progress evaluator.
//!
//! The registry is an immutable configuration table built once at startup and
//! passed by reference; there is no mutable singleton holding per-customer
//! progress. Evaluation is a pure function over the incoming event, the
//! cumulative history and the existing progress map; rewards are returned to
//! the caller for application through the progress manager, never applied
//! here.

pub mod catalogue;

mod evaluator;

pub use evaluator::{check_milestones, AchievedMilestone, MilestoneOutcome};

use std::collections::BTreeMap;

use crate::error::{MomentumError, Result};
use crate::types::MilestoneDefinition;

/// Immutable milestone registry, keyed by milestone id.
#[derive(Debug, Clone)]
pub struct MilestoneRegistry {
    definitions: BTreeMap<&'static str, MilestoneDefinition>,
}

impl MilestoneRegistry {
    /// Registry holding the built-in catalogue.
    pub fn builtin() -> Self {
        Self::from_definitions(catalogue::all_definitions())
    }

    /// Registry from an explicit definition list (tests, partial rollouts).
    pub fn from_definitions(definitions: Vec<MilestoneDefinition>) -> Self {
        Self {
            definitions: definitions.into_iter().map(|d| (d.id, d)).collect(),
        }
    }

    /// Look up a definition, failing fast on unknown ids.
    pub fn get(&self, id: &str) -> Result<&MilestoneDefinition> {
        self.definitions
            .get(id)
            .ok_or_else(|| MomentumError::UnknownMilestone(id.to_string()))
    }

    /// All definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &MilestoneDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
