//! Scoring calculator: maps a completed action to a point award.
//!
//! Pure arithmetic over the event metrics and a caller-supplied streak
//! multiplier. Additive bonuses are applied first, the streak multiplier
//! last and exactly once. Point math is deliberately independent of gate
//! qualification: a quick cost analysis can earn the efficiency bonus and
//! still not count toward the business case gate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::ScoringConfig;
use crate::types::{ActionEvent, ActionMetrics, RepairReport};

/// Breakdown keys used in [`PointAward::breakdown`]. Stable across versions;
/// dashboard callers key on them.
pub mod breakdown_keys {
    pub const BASE: &str = "base";
    pub const SCORE_BONUS: &str = "score_bonus";
    pub const EFFICIENCY_BONUS: &str = "efficiency_bonus";
    pub const COMPREHENSIVE_BONUS: &str = "comprehensive_bonus";
    pub const STREAK_ADJUSTMENT: &str = "streak_adjustment";
    pub const INVALID_AWARD: &str = "invalid_award";
}

/// Caller-supplied context for one scoring call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringContext {
    /// Streak multiplier already resolved from the customer's streak via
    /// [`crate::config::StreakConfig::multiplier_for`].
    pub streak_multiplier: f64,
}

impl Default for ScoringContext {
    fn default() -> Self {
        Self {
            streak_multiplier: 1.0,
        }
    }
}

/// Result of scoring one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointAward {
    /// Final points, never negative.
    pub points: u64,
    /// Per-component contributions. The streak adjustment entry holds the
    /// delta the multiplier added on top of the additive subtotal.
    pub breakdown: BTreeMap<String, i64>,
    /// Repairs applied to malformed inputs (negative manual awards and the
    /// like).
    pub repairs: RepairReport,
}

/// Compute the point award for one completed action.
///
/// Base points by tool (ICP 25, cost 35, business case 50, workflow 100,
/// export 10; daily objectives carry their own value), plus:
/// - ICP: `round(score * 0.25)` quality bonus, skipped when the score is
///   absent or negative;
/// - cost calculator: flat efficiency bonus when finished under the
///   configured time;
/// - business case: flat bonus when built on a comprehensive template.
///
/// The streak multiplier is applied once, after all additive bonuses, and
/// the result rounded.
pub fn compute_points(
    event: &ActionEvent,
    ctx: &ScoringContext,
    cfg: &ScoringConfig,
) -> PointAward {
    let mut breakdown: BTreeMap<String, i64> = BTreeMap::new();
    let mut repairs = RepairReport::new();

    let base = match &event.metrics {
        ActionMetrics::DailyObjective { points } => {
            if *points < 0 {
                // Defense in depth: ActionEvent::new already clamps this,
                // but events may arrive from older persisted history.
                repairs.record(
                    "metrics.points",
                    format!("negative objective value {points} clamped to 0"),
                );
                breakdown.insert(breakdown_keys::INVALID_AWARD.into(), *points);
                0
            } else {
                *points as u64
            }
        }
        _ => cfg.base_points(event.tool),
    };
    breakdown.insert(breakdown_keys::BASE.into(), base as i64);

    let mut subtotal = base;

    match &event.metrics {
        ActionMetrics::Icp { score } if *score >= 0.0 => {
            let bonus = (score * cfg.icp_score_bonus_factor).round() as u64;
            if bonus > 0 {
                breakdown.insert(breakdown_keys::SCORE_BONUS.into(), bonus as i64);
                subtotal += bonus;
            }
        }
        ActionMetrics::CostCalculator {
            time_spent_secs, ..
        } if *time_spent_secs < cfg.efficient_cost_secs => {
            breakdown.insert(
                breakdown_keys::EFFICIENCY_BONUS.into(),
                cfg.cost_efficiency_bonus as i64,
            );
            subtotal += cfg.cost_efficiency_bonus;
        }
        ActionMetrics::BusinessCase {
            is_comprehensive: true,
            ..
        } => {
            breakdown.insert(
                breakdown_keys::COMPREHENSIVE_BONUS.into(),
                cfg.comprehensive_template_bonus as i64,
            );
            subtotal += cfg.comprehensive_template_bonus;
        }
        _ => {}
    }

    let multiplier = if ctx.streak_multiplier.is_finite() && ctx.streak_multiplier > 0.0 {
        ctx.streak_multiplier
    } else {
        repairs.record(
            "context.streak_multiplier",
            format!(
                "multiplier {} not a positive finite number, using 1.0",
                ctx.streak_multiplier
            ),
        );
        1.0
    };

    let total = (subtotal as f64 * multiplier).round() as u64;
    if total != subtotal {
        breakdown.insert(
            breakdown_keys::STREAK_ADJUSTMENT.into(),
            total as i64 - subtotal as i64,
        );
    }

    tracing::debug!(tool = %event.tool, points = total, "scored action");
    PointAward {
        points: total,
        breakdown,
        repairs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at() -> DateTime<Utc> {
        "2026-03-01T10:00:00Z".parse().unwrap()
    }

    fn event(metrics: ActionMetrics) -> ActionEvent {
        ActionEvent::new(metrics, at()).0
    }

    fn score(metrics: ActionMetrics) -> PointAward {
        compute_points(
            &event(metrics),
            &ScoringContext::default(),
            &ScoringConfig::default(),
        )
    }

    #[test]
    fn icp_score_bonus_rounds() {
        // round(85 * 0.25) = 21, on top of the 25 base.
        let award = score(ActionMetrics::Icp { score: 85.0 });
        assert_eq!(award.points, 46);
        assert_eq!(award.breakdown[breakdown_keys::BASE], 25);
        assert_eq!(award.breakdown[breakdown_keys::SCORE_BONUS], 21);
    }

    #[test]
    fn zero_score_earns_base_only() {
        let award = score(ActionMetrics::Icp { score: 0.0 });
        assert_eq!(award.points, 25);
        assert!(!award.breakdown.contains_key(breakdown_keys::SCORE_BONUS));
    }

    #[test]
    fn quick_cost_completion_earns_efficiency_bonus() {
        let award = score(ActionMetrics::CostCalculator {
            time_spent_secs: 300,
            annual_cost: Some(80_000.0),
        });
        assert_eq!(award.points, 40);
        assert_eq!(award.breakdown[breakdown_keys::EFFICIENCY_BONUS], 5);
    }

    #[test]
    fn slow_cost_completion_earns_base_only() {
        let award = score(ActionMetrics::CostCalculator {
            time_spent_secs: 1200,
            annual_cost: None,
        });
        assert_eq!(award.points, 35);
        assert!(!award
            .breakdown
            .contains_key(breakdown_keys::EFFICIENCY_BONUS));
    }

    #[test]
    fn comprehensive_template_bonus_is_flag_driven() {
        let full = score(ActionMetrics::BusinessCase {
            template: "enterprise_full".into(),
            is_comprehensive: true,
        });
        assert_eq!(full.points, 75);

        let basic = score(ActionMetrics::BusinessCase {
            template: "one_pager".into(),
            is_comprehensive: false,
        });
        assert_eq!(basic.points, 50);
    }

    #[test]
    fn streak_multiplier_applies_after_bonuses() {
        let award = compute_points(
            &event(ActionMetrics::Icp { score: 85.0 }),
            &ScoringContext {
                streak_multiplier: 1.15,
            },
            &ScoringConfig::default(),
        );
        // round((25 + 21) * 1.15) = round(52.9) = 53
        assert_eq!(award.points, 53);
        assert_eq!(award.breakdown[breakdown_keys::STREAK_ADJUSTMENT], 7);
    }

    #[test]
    fn daily_objective_uses_caller_value() {
        let award = score(ActionMetrics::DailyObjective { points: 15 });
        assert_eq!(award.points, 15);
    }

    #[test]
    fn negative_manual_award_clamps_to_zero_and_flags() {
        // Bypass ActionEvent::new to simulate a bad record loaded from the
        // store.
        let event = ActionEvent {
            id: uuid::Uuid::new_v4(),
            tool: crate::types::ToolId::DailyObjective,
            timestamp: at(),
            metrics: ActionMetrics::DailyObjective { points: -40 },
        };
        let award = compute_points(
            &event,
            &ScoringContext::default(),
            &ScoringConfig::default(),
        );
        assert_eq!(award.points, 0);
        assert_eq!(award.breakdown[breakdown_keys::INVALID_AWARD], -40);
        assert!(!award.repairs.is_clean());
    }

    #[test]
    fn bad_multiplier_is_repaired_to_identity() {
        let award = compute_points(
            &event(ActionMetrics::Export {
                format: "pdf".into(),
            }),
            &ScoringContext {
                streak_multiplier: f64::NAN,
            },
            &ScoringConfig::default(),
        );
        assert_eq!(award.points, 10);
        assert!(!award.repairs.is_clean());
    }
}
