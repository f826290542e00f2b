//! Centralized engine constants.
//!
//! Every threshold the evaluators use is named here rather than inlined at
//! the use site, so product can retune breakpoints without touching logic and
//! tests reference a single source of truth. [`super::EngineConfig`] defaults
//! are built from these values.

/// Base point awards per completed tool.
pub mod points {
    /// ICP analysis completion.
    pub const ICP_BASE: u64 = 25;
    /// Cost calculator completion.
    pub const COST_BASE: u64 = 35;
    /// Business case completion.
    pub const BUSINESS_CASE_BASE: u64 = 50;
    /// Full workflow completed end to end.
    pub const WORKFLOW_BASE: u64 = 100;
    /// Artifact export.
    pub const EXPORT_BASE: u64 = 10;

    /// Multiplier applied to the ICP fit score to produce the quality bonus:
    /// `round(score * ICP_SCORE_BONUS_FACTOR)`.
    pub const ICP_SCORE_BONUS_FACTOR: f64 = 0.25;
    /// Flat efficiency bonus for cost analyses finished under
    /// [`gates::EFFICIENT_COST_SECS`].
    ///
    /// [`gates::EFFICIENT_COST_SECS`]: super::gates::EFFICIENT_COST_SECS
    pub const COST_EFFICIENCY_BONUS: u64 = 5;
    /// Flat bonus for business cases built on a comprehensive template.
    pub const COMPREHENSIVE_TEMPLATE_BONUS: u64 = 25;
}

/// Streak multiplier tiers. Applied once, after all additive bonuses.
pub mod streak {
    /// Streak length at which the first multiplier tier starts.
    pub const TIER_1_DAYS: u32 = 3;
    pub const TIER_1_MULTIPLIER: f64 = 1.15;
    /// Streak length at which the second tier starts.
    pub const TIER_2_DAYS: u32 = 7;
    pub const TIER_2_MULTIPLIER: f64 = 1.20;
}

/// Gate requirements for the locked tools.
pub mod gates {
    /// Minimum ICP score for a completion to qualify toward the cost
    /// calculator gate. Inclusive: exactly 70 qualifies.
    pub const QUALIFYING_ICP_SCORE: f64 = 70.0;
    /// Qualifying ICP completions required to unlock the cost calculator.
    pub const COST_CALCULATOR_REQUIRED: u32 = 3;

    /// Minimum seconds spent for a cost analysis to count as comprehensive.
    /// Quick completions below this still score points but never count
    /// toward the business case gate.
    pub const COMPREHENSIVE_COST_SECS: u32 = 600;
    /// Comprehensive cost analyses required to unlock the business case
    /// builder.
    pub const BUSINESS_CASE_REQUIRED: u32 = 2;

    /// Upper bound (exclusive) on seconds spent for the efficiency bonus.
    /// Independent of the comprehensive flag above: a 300s completion earns
    /// the bonus yet does not qualify for the gate.
    pub const EFFICIENT_COST_SECS: u32 = 1000;
}

/// Point floors for each derived level and rank.
pub mod levels {
    /// Developing starts here; below is Foundation.
    pub const DEVELOPING: u64 = 100;
    pub const PROFICIENT: u64 = 300;
    pub const ADVANCED: u64 = 600;
    pub const EXPERT: u64 = 1000;

    /// Rank floors extend the same scale with two extra tiers at the top.
    pub const RANK_D: u64 = DEVELOPING;
    pub const RANK_C: u64 = PROFICIENT;
    pub const RANK_B: u64 = ADVANCED;
    pub const RANK_A: u64 = EXPERT;
    pub const RANK_S: u64 = 1500;
}
