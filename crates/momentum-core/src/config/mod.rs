//! Engine configuration.
//!
//! All tunable thresholds live in one immutable [`EngineConfig`] built at
//! process start and passed by reference into the evaluators. Defaults come
//! from [`constants`]; deployments override individual fields before
//! constructing the engine.

pub mod constants;

use serde::{Deserialize, Serialize};

use crate::types::{HiddenRank, OverallLevel, ToolId};

/// Base and bonus point parameters for the scoring calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub icp_base: u64,
    pub cost_base: u64,
    pub business_case_base: u64,
    pub workflow_base: u64,
    pub export_base: u64,
    /// `round(score * factor)` added for ICP completions.
    pub icp_score_bonus_factor: f64,
    pub cost_efficiency_bonus: u64,
    /// Seconds under which a cost completion earns the efficiency bonus.
    pub efficient_cost_secs: u32,
    pub comprehensive_template_bonus: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            icp_base: constants::points::ICP_BASE,
            cost_base: constants::points::COST_BASE,
            business_case_base: constants::points::BUSINESS_CASE_BASE,
            workflow_base: constants::points::WORKFLOW_BASE,
            export_base: constants::points::EXPORT_BASE,
            icp_score_bonus_factor: constants::points::ICP_SCORE_BONUS_FACTOR,
            cost_efficiency_bonus: constants::points::COST_EFFICIENCY_BONUS,
            efficient_cost_secs: constants::gates::EFFICIENT_COST_SECS,
            comprehensive_template_bonus: constants::points::COMPREHENSIVE_TEMPLATE_BONUS,
        }
    }
}

impl ScoringConfig {
    /// Base points for a tool. `DailyObjective` has no fixed base; its value
    /// is caller-supplied in the event metrics.
    pub fn base_points(&self, tool: ToolId) -> u64 {
        match tool {
            ToolId::Icp => self.icp_base,
            ToolId::CostCalculator => self.cost_base,
            ToolId::BusinessCase => self.business_case_base,
            ToolId::WorkflowComplete => self.workflow_base,
            ToolId::Export => self.export_base,
            ToolId::DailyObjective => 0,
        }
    }
}

/// One streak multiplier tier: streaks of at least `min_days` earn
/// `multiplier`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreakTier {
    pub min_days: u32,
    pub multiplier: f64,
}

/// Streak multiplier schedule, sorted ascending by `min_days`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakConfig {
    pub tiers: Vec<StreakTier>,
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            tiers: vec![
                StreakTier {
                    min_days: constants::streak::TIER_1_DAYS,
                    multiplier: constants::streak::TIER_1_MULTIPLIER,
                },
                StreakTier {
                    min_days: constants::streak::TIER_2_DAYS,
                    multiplier: constants::streak::TIER_2_MULTIPLIER,
                },
            ],
        }
    }
}

impl StreakConfig {
    /// Multiplier for a streak length; 1.0 below the first tier.
    pub fn multiplier_for(&self, streak_days: u32) -> f64 {
        self.tiers
            .iter()
            .rev()
            .find(|tier| streak_days >= tier.min_days)
            .map(|tier| tier.multiplier)
            .unwrap_or(1.0)
    }
}

/// Requirements for the two gated tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Inclusive minimum ICP score for a qualifying completion.
    pub qualifying_icp_score: f64,
    /// Qualifying ICP completions needed for the cost calculator.
    pub cost_calculator_required: u32,
    /// Inclusive minimum seconds for a comprehensive cost analysis.
    pub comprehensive_cost_secs: u32,
    /// Comprehensive cost analyses needed for the business case builder.
    pub business_case_required: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            qualifying_icp_score: constants::gates::QUALIFYING_ICP_SCORE,
            cost_calculator_required: constants::gates::COST_CALCULATOR_REQUIRED,
            comprehensive_cost_secs: constants::gates::COMPREHENSIVE_COST_SECS,
            business_case_required: constants::gates::BUSINESS_CASE_REQUIRED,
        }
    }
}

/// Point floors for derived levels and ranks. Floors, not ceilings: a level
/// starts at its floor and runs to the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelThresholds {
    pub developing: u64,
    pub proficient: u64,
    pub advanced: u64,
    pub expert: u64,
    /// Extra rank floor above Expert; ranks below reuse the level floors.
    pub rank_s: u64,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            developing: constants::levels::DEVELOPING,
            proficient: constants::levels::PROFICIENT,
            advanced: constants::levels::ADVANCED,
            expert: constants::levels::EXPERT,
            rank_s: constants::levels::RANK_S,
        }
    }
}

impl LevelThresholds {
    pub fn level_for(&self, points: u64) -> OverallLevel {
        match points {
            p if p >= self.expert => OverallLevel::Expert,
            p if p >= self.advanced => OverallLevel::Advanced,
            p if p >= self.proficient => OverallLevel::Proficient,
            p if p >= self.developing => OverallLevel::Developing,
            _ => OverallLevel::Foundation,
        }
    }

    pub fn rank_for(&self, points: u64) -> HiddenRank {
        match points {
            p if p >= self.rank_s => HiddenRank::S,
            p if p >= self.expert => HiddenRank::A,
            p if p >= self.advanced => HiddenRank::B,
            p if p >= self.proficient => HiddenRank::C,
            p if p >= self.developing => HiddenRank::D,
            _ => HiddenRank::E,
        }
    }

    /// Floor of the next level up, `None` once at Expert.
    pub fn next_level_floor(&self, points: u64) -> Option<u64> {
        [self.developing, self.proficient, self.advanced, self.expert]
            .into_iter()
            .find(|floor| points < *floor)
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub streak: StreakConfig,
    pub gates: GateConfig,
    pub levels: LevelThresholds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streak_multiplier_tiers() {
        let cfg = StreakConfig::default();
        assert_eq!(cfg.multiplier_for(0), 1.0);
        assert_eq!(cfg.multiplier_for(2), 1.0);
        assert_eq!(cfg.multiplier_for(3), 1.15);
        assert_eq!(cfg.multiplier_for(6), 1.15);
        assert_eq!(cfg.multiplier_for(7), 1.20);
        assert_eq!(cfg.multiplier_for(30), 1.20);
    }

    #[test]
    fn daily_objective_has_no_fixed_base() {
        let cfg = ScoringConfig::default();
        assert_eq!(cfg.base_points(ToolId::DailyObjective), 0);
        assert_eq!(cfg.base_points(ToolId::Icp), 25);
    }

    #[test]
    fn level_floors_are_inclusive() {
        let t = LevelThresholds::default();
        assert_eq!(t.level_for(99), OverallLevel::Foundation);
        assert_eq!(t.level_for(100), OverallLevel::Developing);
        assert_eq!(t.next_level_floor(99), Some(100));
        assert_eq!(t.next_level_floor(1000), None);
    }
}
