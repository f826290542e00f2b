//! One-cycle orchestration of the five evaluation components.
//!
//! The engine owns no customer state. The caller loads a snapshot from the
//! store, hands it in with the new action, and persists whatever parts of the
//! outcome it chooses. Per-customer serialization (one cycle at a time
//! against one snapshot) and write-conflict detection are the store layer's
//! concern; a cycle itself is synchronous, deterministic and lock-free.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::gates;
use crate::milestones::{check_milestones, MilestoneOutcome, MilestoneRegistry};
use crate::progress;
use crate::scoring::{self, PointAward, ScoringContext};
use crate::types::{
    ActionEvent, ActionMetrics, CompetencyCategory, CompetencyState, MilestoneProgress,
    OverallLevel, RepairReport, ToolAccessStatus, ToolId,
};
use crate::unlocks::{self, UnlockEvent};

/// Immutable customer snapshot a cycle evaluates against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleInput {
    /// Prior action history, oldest first. Does not include the incoming
    /// action.
    pub history: Vec<ActionEvent>,
    pub competency: CompetencyState,
    pub tool_access: BTreeMap<ToolId, ToolAccessStatus>,
    pub milestone_progress: BTreeMap<String, MilestoneProgress>,
}

/// Everything one completed action produced. The caller persists the new
/// state and announces the events; nothing here has been written anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleOutcome {
    /// The recorded action, ready to append to the history.
    pub event: ActionEvent,
    pub award: PointAward,
    pub competency: CompetencyState,
    pub tool_access: BTreeMap<ToolId, ToolAccessStatus>,
    pub unlocks: Vec<UnlockEvent>,
    pub milestones: MilestoneOutcome,
    /// Level transition over the whole cycle (action points plus milestone
    /// rewards), if one happened.
    pub level_change: Option<(OverallLevel, OverallLevel)>,
    /// Categories that reached 100 during this cycle.
    pub mastery_achieved: Vec<CompetencyCategory>,
    /// Every repair applied anywhere in the cycle.
    pub repairs: RepairReport,
}

/// Stateless evaluation engine: fixed configuration plus the milestone
/// registry, shared by reference across customers.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    registry: MilestoneRegistry,
}

impl Engine {
    pub fn new(config: EngineConfig, registry: MilestoneRegistry) -> Self {
        Self { config, registry }
    }

    /// Engine with default configuration and the built-in catalogue.
    pub fn builtin() -> Self {
        Self::new(EngineConfig::default(), MilestoneRegistry::builtin())
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn registry(&self) -> &MilestoneRegistry {
        &self.registry
    }

    /// Run one full completion cycle: score the action, advance streak and
    /// totals, apply milestone rewards, re-evaluate gates and diff them
    /// against the previous access snapshot.
    ///
    /// `now` drives the streak day, all timestamps and nothing else; two
    /// calls with identical inputs and `now` produce identical outcomes.
    pub fn complete_action(
        &self,
        input: &CycleInput,
        metrics: ActionMetrics,
        now: DateTime<Utc>,
    ) -> Result<CycleOutcome> {
        let mut repairs = RepairReport::new();

        let (event, event_repairs) = ActionEvent::new(metrics, now);
        repairs.merge(event_repairs);

        // Loaded state is repaired before anything reads it.
        let (competency, sanitize_repairs) = input.competency.clone().sanitize();
        repairs.merge(sanitize_repairs);

        // Streak first: today's activity counts toward today's multiplier.
        let competency = progress::update_streak(&competency, now.date_naive());
        let ctx = ScoringContext {
            streak_multiplier: self
                .config
                .streak
                .multiplier_for(competency.consistency_streak),
        };
        let award = scoring::compute_points(&event, &ctx, &self.config.scoring);
        repairs.merge(award.repairs.clone());

        let applied = progress::apply_event(
            &competency,
            &event,
            award.points as i64,
            &[],
            &self.config.levels,
        );
        repairs.merge(applied.repairs.clone());
        let level_before_cycle = input.competency.overall_level(&self.config.levels);
        let mut competency = applied.state;
        let mut mastery = applied.mastery_achieved;

        // Milestones see the post-award totals; their rewards land through
        // the same manager, never directly.
        let milestones = check_milestones(
            &self.registry,
            &event,
            &input.history,
            &competency,
            &input.milestone_progress,
            now,
        )?;
        for achieved in &milestones.achieved {
            let deltas: Vec<_> = achieved.reward_competency.into_iter().collect();
            let rewarded = progress::apply_event(
                &competency,
                &event,
                achieved.reward_points as i64,
                &deltas,
                &self.config.levels,
            );
            repairs.merge(rewarded.repairs.clone());
            competency = rewarded.state;
            mastery.extend(rewarded.mastery_achieved);
        }

        let level_after_cycle = competency.overall_level(&self.config.levels);
        let level_change =
            (level_before_cycle != level_after_cycle).then_some((level_before_cycle, level_after_cycle));

        // Gates run over the full history including the new event.
        let mut full_history = input.history.clone();
        full_history.push(event.clone());
        let fresh = gates::evaluate_all(&full_history, &self.config.gates)?;
        let mut tool_access: BTreeMap<ToolId, ToolAccessStatus> = fresh
            .into_iter()
            .map(|(tool, status)| (tool, status.merge_unlocked_at(input.tool_access.get(&tool))))
            .collect();

        let unlocks = unlocks::detect_new_unlocks(&input.tool_access, &tool_access, now);
        // Stamp the write-once unlock time on freshly opened gates.
        for unlock in &unlocks {
            if let Some(status) = tool_access.get_mut(&unlock.tool) {
                if status.unlocked_at.is_none() {
                    status.unlocked_at = Some(now);
                }
            }
        }

        Ok(CycleOutcome {
            event,
            award,
            competency,
            tool_access,
            unlocks,
            milestones,
            level_change,
            mastery_achieved: mastery,
            repairs,
        })
    }
}
