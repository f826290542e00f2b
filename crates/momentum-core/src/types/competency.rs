//! Customer competency aggregate: points, per-category scores, streak, and
//! the levels/ranks derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::repair::RepairReport;
use crate::config::LevelThresholds;

/// A named skill dimension scored 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetencyCategory {
    CustomerAnalysis,
    ValueQuantification,
    ValueArticulation,
    StrategicCommunication,
    ProcessDiscipline,
}

impl CompetencyCategory {
    /// All categories, in display order.
    pub fn all() -> [CompetencyCategory; 5] {
        [
            Self::CustomerAnalysis,
            Self::ValueQuantification,
            Self::ValueArticulation,
            Self::StrategicCommunication,
            Self::ProcessDiscipline,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CustomerAnalysis => "Customer Analysis",
            Self::ValueQuantification => "Value Quantification",
            Self::ValueArticulation => "Value Articulation",
            Self::StrategicCommunication => "Strategic Communication",
            Self::ProcessDiscipline => "Process Discipline",
        }
    }
}

impl fmt::Display for CompetencyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Professional-language proficiency level shown to the customer.
///
/// Derived from total progress points via [`LevelThresholds`]; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallLevel {
    Foundation,
    Developing,
    Proficient,
    Advanced,
    Expert,
}

impl fmt::Display for OverallLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Foundation => "Foundation",
            Self::Developing => "Developing",
            Self::Proficient => "Proficient",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        };
        f.write_str(s)
    }
}

/// Internal rank letter, never surfaced in customer-facing copy.
///
/// Same point scale as [`OverallLevel`] but with two extra tiers at the top
/// so internal reporting can distinguish very heavy users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HiddenRank {
    E,
    D,
    C,
    B,
    A,
    S,
}

impl fmt::Display for HiddenRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::E => "E",
            Self::D => "D",
            Self::C => "C",
            Self::B => "B",
            Self::A => "A",
            Self::S => "S",
        };
        f.write_str(s)
    }
}

/// Per-customer progression aggregate.
///
/// Invariants (enforced by [`CompetencyState::sanitize`] on load and by the
/// progress manager on every update):
/// - every category score lies in [0, 100];
/// - `total_progress_points` only decreases through an explicit repair pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetencyState {
    pub total_progress_points: u64,
    /// Scores keyed by category; absent categories read as 0.
    pub category_scores: BTreeMap<CompetencyCategory, u8>,
    /// Consecutive calendar days with at least one activity.
    pub consistency_streak: u32,
    pub last_activity_date: Option<NaiveDate>,
}

impl CompetencyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score for one category, 0 when never touched.
    #[inline]
    pub fn score(&self, category: CompetencyCategory) -> u8 {
        self.category_scores.get(&category).copied().unwrap_or(0)
    }

    /// Customer-facing level derived from total points.
    #[inline]
    pub fn overall_level(&self, thresholds: &LevelThresholds) -> OverallLevel {
        thresholds.level_for(self.total_progress_points)
    }

    /// Internal rank derived from total points.
    #[inline]
    pub fn hidden_rank(&self, thresholds: &LevelThresholds) -> HiddenRank {
        thresholds.rank_for(self.total_progress_points)
    }

    /// Points still needed to reach the next level, `None` at the top.
    pub fn points_to_next_level(&self, thresholds: &LevelThresholds) -> Option<u64> {
        thresholds
            .next_level_floor(self.total_progress_points)
            .map(|floor| floor - self.total_progress_points)
    }

    /// Repair a state loaded from the external store.
    ///
    /// The store is the system of record but not trusted to be well-formed:
    /// a manual edit or partial migration can leave scores outside [0, 100].
    /// Out-of-range scores are clamped and reported. Missing data is already
    /// unrepresentable here (absent categories are 0, `Default` is the safe
    /// zero state), so corrupt loads degrade to safe values instead of
    /// failing the evaluation pipeline.
    pub fn sanitize(mut self) -> (Self, RepairReport) {
        let mut report = RepairReport::new();
        for (category, score) in self.category_scores.iter_mut() {
            if *score > 100 {
                report.record(
                    format!("category_scores.{category}"),
                    format!("score {score} above 100, clamped"),
                );
                *score = 100;
            }
        }
        (self, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelThresholds;

    #[test]
    fn absent_category_reads_zero() {
        let state = CompetencyState::new();
        assert_eq!(state.score(CompetencyCategory::CustomerAnalysis), 0);
    }

    #[test]
    fn levels_follow_default_breakpoints() {
        let thresholds = LevelThresholds::default();
        let mut state = CompetencyState::new();

        let cases = [
            (0, OverallLevel::Foundation),
            (99, OverallLevel::Foundation),
            (100, OverallLevel::Developing),
            (299, OverallLevel::Developing),
            (300, OverallLevel::Proficient),
            (599, OverallLevel::Proficient),
            (600, OverallLevel::Advanced),
            (999, OverallLevel::Advanced),
            (1000, OverallLevel::Expert),
        ];
        for (points, expected) in cases {
            state.total_progress_points = points;
            assert_eq!(
                state.overall_level(&thresholds),
                expected,
                "at {points} points"
            );
        }
    }

    #[test]
    fn hidden_rank_extends_past_expert() {
        let thresholds = LevelThresholds::default();
        let mut state = CompetencyState::new();

        state.total_progress_points = 50;
        assert_eq!(state.hidden_rank(&thresholds), HiddenRank::E);
        state.total_progress_points = 1000;
        assert_eq!(state.hidden_rank(&thresholds), HiddenRank::A);
        state.total_progress_points = 1500;
        assert_eq!(state.hidden_rank(&thresholds), HiddenRank::S);
    }

    #[test]
    fn points_to_next_level_counts_down() {
        let thresholds = LevelThresholds::default();
        let mut state = CompetencyState::new();
        state.total_progress_points = 95;
        assert_eq!(state.points_to_next_level(&thresholds), Some(5));

        state.total_progress_points = 2000;
        assert_eq!(state.points_to_next_level(&thresholds), None);
    }

    #[test]
    fn sanitize_clamps_overflowing_scores() {
        let mut state = CompetencyState::new();
        state
            .category_scores
            .insert(CompetencyCategory::ValueArticulation, 180);
        state
            .category_scores
            .insert(CompetencyCategory::CustomerAnalysis, 60);

        let (repaired, report) = state.sanitize();
        assert_eq!(repaired.score(CompetencyCategory::ValueArticulation), 100);
        assert_eq!(repaired.score(CompetencyCategory::CustomerAnalysis), 60);
        assert_eq!(report.repairs.len(), 1);
    }
}
