use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lineup synthesized for a team that missed the deadline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CarryoverEntry {
    pub team_id: i32,
    pub team_name: String,
    pub slots: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CarryoverReport {
    pub tournament_id: String,
    /// Tournament the lineups were carried from, if there was one.
    pub previous_tournament_id: Option<String>,
    pub carryovers: Vec<CarryoverEntry>,
    /// Teams left alone because they already had a lineup.
    pub already_submitted: Vec<i32>,
}

impl CarryoverReport {
    pub fn message(&self) -> String {
        if self.carryovers.is_empty() && !self.already_submitted.is_empty() {
            "All teams already have lineups".to_string()
        } else {
            format!(
                "Applied carryover lineups for {} team(s)",
                self.carryovers.len()
            )
        }
    }
}
