//! Milestone evaluation against an action event and cumulative state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;
use crate::types::{
    ActionEvent, ActionMetrics, CompetencyReward, CompetencyState, MilestoneDefinition,
    MilestoneProgress, Requirement, ToolId,
};

use super::MilestoneRegistry;

/// A milestone achieved in this evaluation, with the rewards the caller must
/// apply through the progress manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievedMilestone {
    pub progress: MilestoneProgress,
    pub name: String,
    pub badge: String,
    pub reward_points: u64,
    pub reward_competency: Option<CompetencyReward>,
}

/// Result of one milestone evaluation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MilestoneOutcome {
    /// Every progress record that changed, including the newly achieved
    /// ones. Records the event did not touch are absent.
    pub updated: Vec<MilestoneProgress>,
    /// Milestones whose latch flipped in this pass.
    pub achieved: Vec<AchievedMilestone>,
}

/// True when an event counts toward a qualifying-completion requirement.
fn qualifies(event: &ActionEvent, tool: ToolId, min_score: f64) -> bool {
    event.tool == tool
        && matches!(&event.metrics, ActionMetrics::Icp { score } if *score >= min_score)
}

/// How many events in the prior history would have counted toward a
/// requirement. Used to backfill a lazily created record when a milestone is
/// introduced after the customer already has history.
fn backfill_count(history: &[ActionEvent], requirement: &Requirement) -> u64 {
    match requirement {
        Requirement::ToolCompletions { tool, .. } => {
            history.iter().filter(|e| e.tool == *tool).count() as u64
        }
        Requirement::QualifyingCompletions {
            tool, min_score, ..
        } => history
            .iter()
            .filter(|e| qualifies(e, *tool, *min_score))
            .count() as u64,
        _ => 0,
    }
}

/// Evaluate every registered milestone against one action event.
///
/// `history` is the customer's prior events, excluding `event` itself.
/// `existing` maps milestone id to persisted progress; ids not present in the
/// registry fail fast (the registry is fixed configuration, so an orphaned id
/// is a programmer error).
///
/// Rules:
/// - achieved records are skipped entirely; the latch is one-way and later
///   events change nothing;
/// - count requirements advance only when the event's tool matches, and an
///   untouched record is not reported as updated;
/// - streak and point requirements snap to the caller-supplied
///   [`CompetencyState`] values, never recomputed here;
/// - composite requirements snap to 0 or 1 out of 1;
/// - rewards ride back on [`MilestoneOutcome::achieved`] for the caller to
///   apply.
pub fn check_milestones(
    registry: &MilestoneRegistry,
    event: &ActionEvent,
    history: &[ActionEvent],
    competency: &CompetencyState,
    existing: &BTreeMap<String, MilestoneProgress>,
    now: DateTime<Utc>,
) -> Result<MilestoneOutcome> {
    // Orphaned progress ids mean the registry and the store disagree.
    for id in existing.keys() {
        registry.get(id)?;
    }

    let mut outcome = MilestoneOutcome::default();

    for definition in registry.iter() {
        let prior = existing.get(definition.id);
        if prior.map(|p| p.achieved).unwrap_or(false) {
            continue;
        }

        let Some(current) = next_current(definition, event, history, competency, prior) else {
            continue;
        };

        let required = definition.requirement.required();
        let achieved = current >= required;
        let mut progress = prior
            .cloned()
            .unwrap_or_else(|| MilestoneProgress::start(definition, now));
        progress.current = current.min(required);
        progress.required = required;
        progress.last_update = now;
        if achieved {
            progress.achieved = true;
            progress.achieved_at = Some(now);
            tracing::info!(milestone = definition.id, "milestone achieved");
            outcome.achieved.push(AchievedMilestone {
                progress: progress.clone(),
                name: definition.name.to_string(),
                badge: definition.badge.to_string(),
                reward_points: definition.reward_points,
                reward_competency: definition.reward_competency,
            });
        }
        outcome.updated.push(progress);
    }

    Ok(outcome)
}

/// The new `current` value for a definition, or `None` when the event does
/// not touch it.
fn next_current(
    definition: &MilestoneDefinition,
    event: &ActionEvent,
    history: &[ActionEvent],
    competency: &CompetencyState,
    prior: Option<&MilestoneProgress>,
) -> Option<u64> {
    match &definition.requirement {
        Requirement::ToolCompletions { tool, .. } => {
            if event.tool != *tool {
                return None;
            }
            let base = prior
                .map(|p| p.current)
                .unwrap_or_else(|| backfill_count(history, &definition.requirement));
            Some(base + 1)
        }
        Requirement::QualifyingCompletions {
            tool, min_score, ..
        } => {
            if !qualifies(event, *tool, *min_score) {
                return None;
            }
            let base = prior
                .map(|p| p.current)
                .unwrap_or_else(|| backfill_count(history, &definition.requirement));
            Some(base + 1)
        }
        Requirement::TotalPoints { .. } => {
            let current = competency.total_progress_points;
            changed_snap(current, prior)
        }
        Requirement::Streak { .. } => {
            let current = u64::from(competency.consistency_streak);
            changed_snap(current, prior)
        }
        Requirement::AllCategoriesAtLeast { score } => {
            let satisfied = crate::types::CompetencyCategory::all()
                .iter()
                .all(|c| competency.score(*c) >= *score);
            changed_snap(u64::from(satisfied), prior)
        }
    }
}

/// Snap-style requirements only report when the value moved; a zero snap with
/// no prior record stays uncreated (no contributing event yet).
fn changed_snap(current: u64, prior: Option<&MilestoneProgress>) -> Option<u64> {
    match prior {
        Some(p) if p.current == current => None,
        Some(_) => Some(current),
        None if current > 0 => Some(current),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milestones::catalogue;
    use crate::types::CompetencyCategory;

    fn now() -> DateTime<Utc> {
        "2026-03-05T09:00:00Z".parse().unwrap()
    }

    fn icp(score: f64) -> ActionEvent {
        ActionEvent::new(ActionMetrics::Icp { score }, now()).0
    }

    fn export() -> ActionEvent {
        ActionEvent::new(
            ActionMetrics::Export {
                format: "pdf".into(),
            },
            now(),
        )
        .0
    }

    fn check(
        event: &ActionEvent,
        history: &[ActionEvent],
        competency: &CompetencyState,
        existing: &BTreeMap<String, MilestoneProgress>,
    ) -> MilestoneOutcome {
        check_milestones(
            &MilestoneRegistry::builtin(),
            event,
            history,
            competency,
            existing,
            now(),
        )
        .unwrap()
    }

    #[test]
    fn first_icp_completion_achieves_first_analysis() {
        let outcome = check(&icp(60.0), &[], &CompetencyState::new(), &BTreeMap::new());

        let achieved: Vec<&str> = outcome
            .achieved
            .iter()
            .map(|a| a.progress.milestone_id.as_str())
            .collect();
        assert!(achieved.contains(&catalogue::FIRST_ANALYSIS));

        let first = outcome
            .achieved
            .iter()
            .find(|a| a.progress.milestone_id == catalogue::FIRST_ANALYSIS)
            .unwrap();
        assert_eq!(first.reward_points, 10);
        assert!(first.reward_competency.is_some());
    }

    #[test]
    fn unrelated_events_leave_count_milestones_untouched() {
        let mut existing = BTreeMap::new();
        let registry = MilestoneRegistry::builtin();
        let mut progress =
            MilestoneProgress::start(registry.get(catalogue::ANALYSIS_VETERAN).unwrap(), now());
        progress.current = 4;
        existing.insert(catalogue::ANALYSIS_VETERAN.to_string(), progress);

        let outcome = check(&export(), &[], &CompetencyState::new(), &existing);
        assert!(!outcome
            .updated
            .iter()
            .any(|p| p.milestone_id == catalogue::ANALYSIS_VETERAN));
    }

    #[test]
    fn qualifying_requirement_ignores_low_scores() {
        let outcome = check(&icp(50.0), &[], &CompetencyState::new(), &BTreeMap::new());
        assert!(!outcome
            .updated
            .iter()
            .any(|p| p.milestone_id == catalogue::ICP_SPECIALIST));

        let outcome = check(&icp(70.0), &[], &CompetencyState::new(), &BTreeMap::new());
        let specialist = outcome
            .updated
            .iter()
            .find(|p| p.milestone_id == catalogue::ICP_SPECIALIST)
            .unwrap();
        assert_eq!(specialist.current, 1);
        assert!(!specialist.achieved);
    }

    #[test]
    fn lazily_created_record_backfills_from_history() {
        // Four prior ICP events, fifth arriving now: veteran count reaches 5.
        let history: Vec<ActionEvent> = (0..4).map(|_| icp(80.0)).collect();
        let outcome = check(&icp(80.0), &history, &CompetencyState::new(), &BTreeMap::new());

        let specialist = outcome
            .updated
            .iter()
            .find(|p| p.milestone_id == catalogue::ICP_SPECIALIST)
            .unwrap();
        assert_eq!(specialist.current, 5);
        assert!(specialist.achieved);
    }

    #[test]
    fn achieved_latch_is_one_way() {
        let registry = MilestoneRegistry::builtin();
        let mut progress =
            MilestoneProgress::start(registry.get(catalogue::FIRST_ANALYSIS).unwrap(), now());
        progress.current = 1;
        progress.achieved = true;
        progress.achieved_at = Some(now());
        let mut existing = BTreeMap::new();
        existing.insert(catalogue::FIRST_ANALYSIS.to_string(), progress.clone());

        let outcome = check(&icp(90.0), &[], &CompetencyState::new(), &existing);
        assert!(!outcome
            .updated
            .iter()
            .any(|p| p.milestone_id == catalogue::FIRST_ANALYSIS));
        // Caller's map is untouched by evaluation.
        assert_eq!(existing[catalogue::FIRST_ANALYSIS], progress);
    }

    #[test]
    fn streak_requirement_reads_supplied_state() {
        let mut competency = CompetencyState::new();
        competency.consistency_streak = 3;

        let outcome = check(&export(), &[], &competency, &BTreeMap::new());
        let cadence = outcome
            .achieved
            .iter()
            .find(|a| a.progress.milestone_id == catalogue::STEADY_CADENCE)
            .unwrap();
        assert_eq!(cadence.progress.current, 3);
    }

    #[test]
    fn composite_requirement_snaps_boolean() {
        let mut competency = CompetencyState::new();
        for category in CompetencyCategory::all() {
            competency.category_scores.insert(category, 85);
        }

        let outcome = check(&export(), &[], &competency, &BTreeMap::new());
        let rounded = outcome
            .achieved
            .iter()
            .find(|a| a.progress.milestone_id == catalogue::WELL_ROUNDED)
            .unwrap();
        assert_eq!(rounded.progress.current, 1);
        assert_eq!(rounded.progress.required, 1);
    }

    #[test]
    fn orphaned_progress_id_fails_fast() {
        let registry = MilestoneRegistry::builtin();
        let mut existing = BTreeMap::new();
        existing.insert(
            "retired_milestone".to_string(),
            MilestoneProgress {
                milestone_id: "retired_milestone".into(),
                current: 1,
                required: 3,
                achieved: false,
                achieved_at: None,
                last_update: now(),
            },
        );

        let err = check_milestones(
            &registry,
            &icp(80.0),
            &[],
            &CompetencyState::new(),
            &existing,
            now(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            crate::error::MomentumError::UnknownMilestone(_)
        ));
    }
}
