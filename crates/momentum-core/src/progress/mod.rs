//! Progress and streak state manager.
//!
//! The only component that produces new [`CompetencyState`] values. Takes an
//! immutable snapshot and returns a fresh state; persistence belongs to the
//! caller. "Today" is an explicit parameter so streak logic is deterministic
//! under test.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::LevelThresholds;
use crate::types::{
    ActionEvent, CompetencyCategory, CompetencyReward, CompetencyState, OverallLevel, RepairReport,
};

/// Result of applying one event's rewards to a competency state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyOutcome {
    pub state: CompetencyState,
    /// Categories that reached 100 in this application. Informational; the
    /// score itself stays clamped at 100.
    pub mastery_achieved: Vec<CompetencyCategory>,
    /// Level transition caused by the point award, if any.
    pub level_change: Option<(OverallLevel, OverallLevel)>,
    pub repairs: RepairReport,
}

/// Apply awarded points and competency deltas to a state snapshot.
///
/// Total points never decrease: a negative award is clamped to zero and
/// reported. Category scores clamp to [0, 100] in both directions; a category
/// hitting 100 is flagged as mastery in the outcome.
pub fn apply_event(
    state: &CompetencyState,
    event: &ActionEvent,
    points_awarded: i64,
    deltas: &[CompetencyReward],
    levels: &LevelThresholds,
) -> ApplyOutcome {
    let mut next = state.clone();
    let mut repairs = RepairReport::new();
    let mut mastery = Vec::new();

    let awarded = if points_awarded < 0 {
        repairs.record(
            "points_awarded",
            format!("negative award {points_awarded} clamped to 0"),
        );
        0
    } else {
        points_awarded as u64
    };

    let level_before = state.overall_level(levels);
    next.total_progress_points = state.total_progress_points.saturating_add(awarded);
    let level_after = next.overall_level(levels);

    for delta in deltas {
        let before = i32::from(next.score(delta.category));
        let after = (before + delta.amount).clamp(0, 100) as u8;
        next.category_scores.insert(delta.category, after);
        if after == 100 && before < 100 {
            tracing::info!(category = %delta.category, "competency mastery reached");
            mastery.push(delta.category);
        }
    }

    let level_change = (level_before != level_after).then(|| {
        tracing::info!(tool = %event.tool, previous = %level_before, next = %level_after, "level advanced");
        (level_before, level_after)
    });

    ApplyOutcome {
        state: next,
        mastery_achieved: mastery,
        level_change,
        repairs,
    }
}

/// Update the daily consistency streak for activity on `today`.
///
/// - last activity yesterday: streak increments;
/// - last activity today: no change (idempotent for same-day calls);
/// - gap of two or more days, or no prior activity: streak resets to 1.
///
/// `last_activity_date` always ends up as `today`.
pub fn update_streak(state: &CompetencyState, today: NaiveDate) -> CompetencyState {
    let mut next = state.clone();
    next.consistency_streak = match state.last_activity_date {
        Some(last) if last == today => state.consistency_streak,
        Some(last) if last.succ_opt() == Some(today) => state.consistency_streak + 1,
        _ => 1,
    };
    next.last_activity_date = Some(today);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActionMetrics;
    use chrono::{DateTime, Utc};

    fn event() -> ActionEvent {
        let at: DateTime<Utc> = "2026-03-01T10:00:00Z".parse().unwrap();
        ActionEvent::new(ActionMetrics::Icp { score: 80.0 }, at).0
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn points_accumulate_and_levels_advance() {
        let levels = LevelThresholds::default();
        let mut state = CompetencyState::new();
        state.total_progress_points = 95;

        let outcome = apply_event(&state, &event(), 10, &[], &levels);
        assert_eq!(outcome.state.total_progress_points, 105);
        assert_eq!(
            outcome.level_change,
            Some((OverallLevel::Foundation, OverallLevel::Developing))
        );
    }

    #[test]
    fn negative_award_clamps_to_zero() {
        let levels = LevelThresholds::default();
        let state = CompetencyState::new();

        let outcome = apply_event(&state, &event(), -25, &[], &levels);
        assert_eq!(outcome.state.total_progress_points, 0);
        assert!(!outcome.repairs.is_clean());
    }

    #[test]
    fn category_scores_clamp_both_directions() {
        let levels = LevelThresholds::default();
        let mut state = CompetencyState::new();
        state
            .category_scores
            .insert(CompetencyCategory::CustomerAnalysis, 95);

        let up = apply_event(
            &state,
            &event(),
            0,
            &[CompetencyReward {
                category: CompetencyCategory::CustomerAnalysis,
                amount: 20,
            }],
            &levels,
        );
        assert_eq!(up.state.score(CompetencyCategory::CustomerAnalysis), 100);
        assert_eq!(
            up.mastery_achieved,
            vec![CompetencyCategory::CustomerAnalysis]
        );

        let down = apply_event(
            &state,
            &event(),
            0,
            &[CompetencyReward {
                category: CompetencyCategory::ValueArticulation,
                amount: -10,
            }],
            &levels,
        );
        assert_eq!(down.state.score(CompetencyCategory::ValueArticulation), 0);
    }

    #[test]
    fn mastery_not_reflagged_when_already_at_100() {
        let levels = LevelThresholds::default();
        let mut state = CompetencyState::new();
        state
            .category_scores
            .insert(CompetencyCategory::CustomerAnalysis, 100);

        let outcome = apply_event(
            &state,
            &event(),
            0,
            &[CompetencyReward {
                category: CompetencyCategory::CustomerAnalysis,
                amount: 5,
            }],
            &levels,
        );
        assert!(outcome.mastery_achieved.is_empty());
    }

    #[test]
    fn streak_increments_on_consecutive_day() {
        let mut state = CompetencyState::new();
        state.consistency_streak = 5;
        state.last_activity_date = Some(day("2026-02-28"));

        let next = update_streak(&state, day("2026-03-01"));
        assert_eq!(next.consistency_streak, 6);
        assert_eq!(next.last_activity_date, Some(day("2026-03-01")));
    }

    #[test]
    fn same_day_update_is_idempotent() {
        let mut state = CompetencyState::new();
        state.consistency_streak = 4;
        state.last_activity_date = Some(day("2026-03-01"));

        let next = update_streak(&state, day("2026-03-01"));
        assert_eq!(next.consistency_streak, 4);
    }

    #[test]
    fn gap_resets_streak_to_one() {
        let mut state = CompetencyState::new();
        state.consistency_streak = 8;
        state.last_activity_date = Some(day("2026-02-26"));

        let next = update_streak(&state, day("2026-03-01"));
        assert_eq!(next.consistency_streak, 1);
    }

    #[test]
    fn first_activity_starts_streak_at_one() {
        let state = CompetencyState::new();
        let next = update_streak(&state, day("2026-03-01"));
        assert_eq!(next.consistency_streak, 1);
    }

    #[test]
    fn month_boundary_counts_as_consecutive() {
        let mut state = CompetencyState::new();
        state.consistency_streak = 2;
        state.last_activity_date = Some(day("2026-01-31"));

        let next = update_streak(&state, day("2026-02-01"));
        assert_eq!(next.consistency_streak, 3);
    }
}
