//! Action events: the immutable record of one completed user action.
//!
//! Metrics are a tagged union per tool rather than an ad hoc field bag, so an
//! unknown tool or a metric on the wrong tool is unrepresentable. Events are
//! created once at the boundary and appended to the customer's history; they
//! are never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repair::RepairReport;
use super::tool::ToolId;

/// Per-tool completion metrics.
///
/// Each variant carries exactly the fields that tool produces. The
/// `is_comprehensive` flag on [`ActionMetrics::BusinessCase`] is supplied by
/// the caller (template vocabulary is a presentation concern, not matched on
/// strings here).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ActionMetrics {
    /// ICP analysis completion with its fit score (0–100).
    Icp { score: f64 },
    /// Cost calculator completion.
    CostCalculator {
        time_spent_secs: u32,
        /// Annual cost-of-inaction figure, when the analysis produced one.
        annual_cost: Option<f64>,
    },
    /// Business case built from a template.
    BusinessCase {
        template: String,
        /// Whether the template is a full/comprehensive one. Caller-defined
        /// vocabulary; decided at event-creation time.
        is_comprehensive: bool,
    },
    /// Artifact export.
    Export { format: String },
    /// Daily objective with a caller-supplied point value.
    DailyObjective { points: i64 },
    /// Full workflow completed end to end.
    WorkflowComplete,
}

impl ActionMetrics {
    /// The tool these metrics belong to.
    #[inline]
    pub fn tool(&self) -> ToolId {
        match self {
            Self::Icp { .. } => ToolId::Icp,
            Self::CostCalculator { .. } => ToolId::CostCalculator,
            Self::BusinessCase { .. } => ToolId::BusinessCase,
            Self::Export { .. } => ToolId::Export,
            Self::DailyObjective { .. } => ToolId::DailyObjective,
            Self::WorkflowComplete => ToolId::WorkflowComplete,
        }
    }
}

/// An immutable record of one user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEvent {
    pub id: Uuid,
    pub tool: ToolId,
    pub timestamp: DateTime<Utc>,
    pub metrics: ActionMetrics,
}

impl ActionEvent {
    /// Build an event, repairing out-of-range metrics to safe values.
    ///
    /// Repairs applied (reported, never fatal):
    /// - ICP score outside [0, 100] is clamped into range; NaN becomes 0.
    /// - A negative daily-objective point value is clamped to 0.
    ///
    /// The tool is taken from the metrics variant, so tool/metrics mismatch
    /// cannot occur.
    pub fn new(metrics: ActionMetrics, timestamp: DateTime<Utc>) -> (Self, RepairReport) {
        let mut report = RepairReport::new();
        let metrics = match metrics {
            ActionMetrics::Icp { score } if !(0.0..=100.0).contains(&score) => {
                let clamped = if score.is_nan() {
                    0.0
                } else {
                    score.clamp(0.0, 100.0)
                };
                report.record(
                    "metrics.score",
                    format!("score {score} outside [0, 100], clamped to {clamped}"),
                );
                ActionMetrics::Icp { score: clamped }
            }
            ActionMetrics::DailyObjective { points } if points < 0 => {
                report.record(
                    "metrics.points",
                    format!("negative objective value {points} clamped to 0"),
                );
                ActionMetrics::DailyObjective { points: 0 }
            }
            other => other,
        };

        let event = Self {
            id: Uuid::new_v4(),
            tool: metrics.tool(),
            timestamp,
            metrics,
        };
        (event, report)
    }

    /// ICP fit score, when this is an ICP completion.
    #[inline]
    pub fn icp_score(&self) -> Option<f64> {
        match &self.metrics {
            ActionMetrics::Icp { score } => Some(*score),
            _ => None,
        }
    }

    /// Seconds spent, when this is a cost-calculator completion.
    #[inline]
    pub fn time_spent_secs(&self) -> Option<u32> {
        match &self.metrics {
            ActionMetrics::CostCalculator {
                time_spent_secs, ..
            } => Some(*time_spent_secs),
            _ => None,
        }
    }
}
