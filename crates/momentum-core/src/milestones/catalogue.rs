//! Built-in milestone catalogue.
//!
//! Canonical source of truth for the milestone list. Ids are stable
//! snake_case strings; the dashboard keys its badge assets on them and they
//! must not change across versions.

use crate::types::{
    CompetencyCategory, CompetencyReward, MilestoneCategory, MilestoneDefinition, Requirement,
    ToolId,
};

// Milestone id constants, usable by callers and tests.
pub const FIRST_ANALYSIS: &str = "first_analysis";
pub const ICP_SPECIALIST: &str = "icp_specialist";
pub const ANALYSIS_VETERAN: &str = "analysis_veteran";
pub const COST_EXPLORER: &str = "cost_explorer";
pub const VALUE_QUANTIFIER: &str = "value_quantifier";
pub const CASE_BUILDER: &str = "case_builder";
pub const FULL_WORKFLOW: &str = "full_workflow";
pub const STEADY_CADENCE: &str = "steady_cadence";
pub const WEEK_OF_MOMENTUM: &str = "week_of_momentum";
pub const HALF_K_CLUB: &str = "half_k_club";
pub const WELL_ROUNDED: &str = "well_rounded";

/// All built-in milestone definitions.
pub fn all_definitions() -> Vec<MilestoneDefinition> {
    vec![
        MilestoneDefinition {
            id: FIRST_ANALYSIS,
            name: "First Analysis",
            category: MilestoneCategory::Onboarding,
            requirement: Requirement::ToolCompletions {
                tool: ToolId::Icp,
                count: 1,
            },
            reward_points: 10,
            reward_competency: Some(CompetencyReward {
                category: CompetencyCategory::CustomerAnalysis,
                amount: 5,
            }),
            badge: "first_analysis",
        },
        MilestoneDefinition {
            id: ICP_SPECIALIST,
            name: "ICP Specialist",
            category: MilestoneCategory::Analysis,
            requirement: Requirement::QualifyingCompletions {
                tool: ToolId::Icp,
                count: 5,
                min_score: 70.0,
            },
            reward_points: 50,
            reward_competency: Some(CompetencyReward {
                category: CompetencyCategory::CustomerAnalysis,
                amount: 10,
            }),
            badge: "icp_specialist",
        },
        MilestoneDefinition {
            id: ANALYSIS_VETERAN,
            name: "Analysis Veteran",
            category: MilestoneCategory::Analysis,
            requirement: Requirement::ToolCompletions {
                tool: ToolId::Icp,
                count: 10,
            },
            reward_points: 75,
            reward_competency: None,
            badge: "analysis_veteran",
        },
        MilestoneDefinition {
            id: COST_EXPLORER,
            name: "Cost Explorer",
            category: MilestoneCategory::Value,
            requirement: Requirement::ToolCompletions {
                tool: ToolId::CostCalculator,
                count: 1,
            },
            reward_points: 15,
            reward_competency: Some(CompetencyReward {
                category: CompetencyCategory::ValueQuantification,
                amount: 5,
            }),
            badge: "cost_explorer",
        },
        MilestoneDefinition {
            id: VALUE_QUANTIFIER,
            name: "Value Quantifier",
            category: MilestoneCategory::Value,
            requirement: Requirement::ToolCompletions {
                tool: ToolId::CostCalculator,
                count: 5,
            },
            reward_points: 50,
            reward_competency: Some(CompetencyReward {
                category: CompetencyCategory::ValueQuantification,
                amount: 10,
            }),
            badge: "value_quantifier",
        },
        MilestoneDefinition {
            id: CASE_BUILDER,
            name: "Case Builder",
            category: MilestoneCategory::Value,
            requirement: Requirement::ToolCompletions {
                tool: ToolId::BusinessCase,
                count: 1,
            },
            reward_points: 25,
            reward_competency: Some(CompetencyReward {
                category: CompetencyCategory::ValueArticulation,
                amount: 5,
            }),
            badge: "case_builder",
        },
        MilestoneDefinition {
            id: FULL_WORKFLOW,
            name: "End-to-End Operator",
            category: MilestoneCategory::Mastery,
            requirement: Requirement::ToolCompletions {
                tool: ToolId::WorkflowComplete,
                count: 1,
            },
            reward_points: 100,
            reward_competency: Some(CompetencyReward {
                category: CompetencyCategory::StrategicCommunication,
                amount: 10,
            }),
            badge: "full_workflow",
        },
        MilestoneDefinition {
            id: STEADY_CADENCE,
            name: "Steady Cadence",
            category: MilestoneCategory::Consistency,
            requirement: Requirement::Streak { days: 3 },
            reward_points: 20,
            reward_competency: Some(CompetencyReward {
                category: CompetencyCategory::ProcessDiscipline,
                amount: 5,
            }),
            badge: "steady_cadence",
        },
        MilestoneDefinition {
            id: WEEK_OF_MOMENTUM,
            name: "Week of Momentum",
            category: MilestoneCategory::Consistency,
            requirement: Requirement::Streak { days: 7 },
            reward_points: 50,
            reward_competency: Some(CompetencyReward {
                category: CompetencyCategory::ProcessDiscipline,
                amount: 10,
            }),
            badge: "week_of_momentum",
        },
        MilestoneDefinition {
            id: HALF_K_CLUB,
            name: "500 Club",
            category: MilestoneCategory::Mastery,
            requirement: Requirement::TotalPoints { points: 500 },
            reward_points: 50,
            reward_competency: None,
            badge: "half_k_club",
        },
        MilestoneDefinition {
            id: WELL_ROUNDED,
            name: "Well-Rounded Strategist",
            category: MilestoneCategory::Mastery,
            requirement: Requirement::AllCategoriesAtLeast { score: 80 },
            reward_points: 150,
            reward_competency: None,
            badge: "well_rounded",
        },
    ]
}
