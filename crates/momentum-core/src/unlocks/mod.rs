//! Unlock transition detector.
//!
//! Diffs the previous access snapshot against a freshly computed one and
//! emits one event per tool that transitioned locked → unlocked in this
//! evaluation cycle. Side-effect free and idempotent: once the caller has
//! updated its previous snapshot, re-running the diff produces nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{ToolAccessStatus, ToolId};

/// Announcement that a tool became available this cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockEvent {
    pub tool: ToolId,
    /// Professional-language description of the competency demonstrated,
    /// used verbatim in the notification copy.
    pub competency_achieved: String,
    pub timestamp: DateTime<Utc>,
}

/// Copy for the competency that earned each unlock.
fn competency_achieved(tool: ToolId) -> &'static str {
    match tool {
        ToolId::CostCalculator => "Customer analysis fundamentals demonstrated",
        ToolId::BusinessCase => "Value quantification proficiency demonstrated",
        _ => "Requirements met",
    }
}

/// Compare two access snapshots and report the tools that flipped
/// locked → unlocked.
///
/// - A tool already unlocked in `previous` is never re-announced.
/// - A tool absent from `previous` counts as previously locked (first
///   evaluation for a new customer).
/// - Events come back sorted in tool dependency order regardless of map
///   iteration order.
pub fn detect_new_unlocks(
    previous: &BTreeMap<ToolId, ToolAccessStatus>,
    current: &BTreeMap<ToolId, ToolAccessStatus>,
    now: DateTime<Utc>,
) -> Vec<UnlockEvent> {
    let mut events: Vec<UnlockEvent> = current
        .values()
        .filter(|status| status.has_access)
        .filter(|status| {
            previous
                .get(&status.tool)
                .map(|prev| !prev.has_access)
                .unwrap_or(true)
        })
        // Ungated tools are born unlocked; their first appearance is not a
        // transition worth announcing.
        .filter(|status| status.tool.is_gated())
        .map(|status| {
            tracing::info!(tool = %status.tool, "tool unlocked");
            UnlockEvent {
                tool: status.tool,
                competency_achieved: competency_achieved(status.tool).to_string(),
                timestamp: now,
            }
        })
        .collect();

    events.sort_by_key(|e| e.tool);
    events
}
