use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::standings::StandingRow;

/// Points earned by one lineup slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ScoreInput {
    pub team_id: i32,
    pub slot: i32,

    #[validate(range(min = 0, message = "FedEx points cannot be negative"))]
    pub fedex_points: i32,
}

/// Request payload for entering a tournament's results
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct EnterResultsRequest {
    #[validate(length(min = 1, max = 64))]
    pub tournament_id: String,

    /// Matched against the commissioner allow-list ignoring case and padding.
    pub admin_email: String,

    #[validate(length(min = 1, message = "At least one result is required"))]
    #[validate(nested)]
    pub results: Vec<ScoreInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResultsOutcome {
    pub tournament_id: String,
    /// Rows scored for the first time; each bumped its slot's usage.
    pub first_time_scored: usize,
    /// Rows that already had points and were corrected.
    pub rescored: usize,
    /// Input rows with no matching lineup entry.
    pub skipped: Vec<ScoreInput>,
    pub standings: Vec<StandingRow>,
}
