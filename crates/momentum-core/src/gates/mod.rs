//! Competency gate evaluator.
//!
//! Decides, from a customer's action history, whether each gated tool's
//! unlock requirement is currently satisfied. Pure function of its inputs:
//! no clocks, no randomness, no ambient state. Identical history and
//! configuration always produce identical output.
//!
//! Gates count *qualifying* completions, not raw ones. Three low-score ICP
//! runs do not open the cost calculator, and a rushed cost analysis never
//! counts toward the business case gate even though it scored points.

use std::collections::BTreeMap;

use crate::config::GateConfig;
use crate::error::{MomentumError, Result};
use crate::types::{ActionEvent, ActionMetrics, GateProgress, ToolAccessStatus, ToolId};

/// True when an ICP completion meets the quality bar for the cost calculator
/// gate. The threshold is inclusive: exactly the minimum score qualifies.
fn is_qualifying_icp(event: &ActionEvent, cfg: &GateConfig) -> bool {
    matches!(&event.metrics, ActionMetrics::Icp { score } if *score >= cfg.qualifying_icp_score)
}

/// True when a cost-calculator completion is comprehensive enough to count
/// toward the business case gate. Time-based: quick completions are shallow
/// by definition regardless of the figures they produced.
fn is_comprehensive_cost(event: &ActionEvent, cfg: &GateConfig) -> bool {
    matches!(
        &event.metrics,
        ActionMetrics::CostCalculator { time_spent_secs, .. }
            if *time_spent_secs >= cfg.comprehensive_cost_secs
    )
}

/// Evaluate the access status of one tool against the action history.
///
/// An empty history is not an error: it reads as zero qualifying completions
/// and a locked gate. Unknown (ungateable) tools fail fast, since asking for
/// their access status is a programmer error.
///
/// The returned `unlocked_at` is always `None` here; the caller merges the
/// persisted write-once timestamp via
/// [`ToolAccessStatus::merge_unlocked_at`].
pub fn evaluate_access(
    tool: ToolId,
    history: &[ActionEvent],
    cfg: &GateConfig,
) -> Result<ToolAccessStatus> {
    match tool {
        ToolId::Icp => Ok(ToolAccessStatus::open(ToolId::Icp)),
        ToolId::CostCalculator => {
            let qualifying = history
                .iter()
                .filter(|e| is_qualifying_icp(e, cfg))
                .count() as u32;
            Ok(gated_status(
                tool,
                qualifying,
                cfg.cost_calculator_required,
            ))
        }
        ToolId::BusinessCase => {
            let comprehensive = history
                .iter()
                .filter(|e| is_comprehensive_cost(e, cfg))
                .count() as u32;
            Ok(gated_status(tool, comprehensive, cfg.business_case_required))
        }
        other => Err(MomentumError::UnknownTool(other)),
    }
}

/// Evaluate all gateable tools at once, keyed by tool.
pub fn evaluate_all(
    history: &[ActionEvent],
    cfg: &GateConfig,
) -> Result<BTreeMap<ToolId, ToolAccessStatus>> {
    ToolId::EVALUATED
        .iter()
        .map(|tool| Ok((*tool, evaluate_access(*tool, history, cfg)?)))
        .collect()
}

fn gated_status(tool: ToolId, completed: u32, required: u32) -> ToolAccessStatus {
    let progress = GateProgress::new(completed, required);
    ToolAccessStatus {
        tool,
        has_access: progress.is_met(),
        progress,
        unlocked_at: None,
    }
}
