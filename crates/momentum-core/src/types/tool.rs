//! Tool identifiers and their fixed dependency ordering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one of the analysis tools (or auxiliary activities) a customer
/// can complete.
///
/// The declaration order of the first three variants is the tool dependency
/// order (`Icp < CostCalculator < BusinessCase`); unlock announcements are
/// sorted by it via the derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolId {
    /// Ideal Customer Profile analysis. Always available.
    Icp,
    /// Cost-of-inaction calculator. Gated on qualifying ICP work.
    CostCalculator,
    /// Business case builder. Gated on comprehensive cost analyses.
    BusinessCase,
    /// Export of an analysis artifact.
    Export,
    /// A completed daily objective (variable point value).
    DailyObjective,
    /// Full ICP → Cost → Business Case workflow completed end to end.
    WorkflowComplete,
}

impl ToolId {
    /// The gated tools, in dependency order.
    pub const GATED: [ToolId; 2] = [ToolId::CostCalculator, ToolId::BusinessCase];

    /// All tools that can be evaluated for access, in dependency order.
    pub const EVALUATED: [ToolId; 3] = [ToolId::Icp, ToolId::CostCalculator, ToolId::BusinessCase];

    /// True for tools whose access is gated behind a competency requirement.
    #[inline]
    pub fn is_gated(&self) -> bool {
        matches!(self, Self::CostCalculator | Self::BusinessCase)
    }

    /// Professional-language label shown by dashboard callers.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Icp => "ICP Analysis",
            Self::CostCalculator => "Cost Calculator",
            Self::BusinessCase => "Business Case Builder",
            Self::Export => "Report Export",
            Self::DailyObjective => "Daily Objective",
            Self::WorkflowComplete => "Complete Workflow",
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Icp => "icp",
            Self::CostCalculator => "cost_calculator",
            Self::BusinessCase => "business_case",
            Self::Export => "export",
            Self::DailyObjective => "daily_objective",
            Self::WorkflowComplete => "workflow_complete",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ToolId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "icp" => Ok(Self::Icp),
            "cost_calculator" => Ok(Self::CostCalculator),
            "business_case" => Ok(Self::BusinessCase),
            "export" => Ok(Self::Export),
            "daily_objective" => Ok(Self::DailyObjective),
            "workflow_complete" => Ok(Self::WorkflowComplete),
            _ => Err(format!(
                "unknown tool id: '{s}' (expected icp, cost_calculator, business_case, \
                 export, daily_objective or workflow_complete)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_order_matches_declaration() {
        assert!(ToolId::Icp < ToolId::CostCalculator);
        assert!(ToolId::CostCalculator < ToolId::BusinessCase);
    }

    #[test]
    fn round_trips_through_str() {
        for tool in [
            ToolId::Icp,
            ToolId::CostCalculator,
            ToolId::BusinessCase,
            ToolId::Export,
            ToolId::DailyObjective,
            ToolId::WorkflowComplete,
        ] {
            let parsed: ToolId = tool.to_string().parse().unwrap();
            assert_eq!(parsed, tool);
        }
    }

    #[test]
    fn only_downstream_tools_are_gated() {
        assert!(!ToolId::Icp.is_gated());
        assert!(ToolId::CostCalculator.is_gated());
        assert!(ToolId::BusinessCase.is_gated());
        assert!(!ToolId::Export.is_gated());
    }
}
