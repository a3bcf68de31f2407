use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Tournament, TournamentStatus};

/// Request payload for creating a tournament
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTournamentRequest {
    pub admin_email: String,

    #[validate(length(min = 1, max = 64, message = "Tournament id must be 1-64 characters"))]
    pub tournament_id: String,

    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    /// Eastern wall-clock time, `YYYY-MM-DDTHH:MM[:SS]`.
    #[validate(length(min = 1))]
    pub deadline: String,

    pub status: Option<TournamentStatus>,
}

/// Request payload for editing a tournament; absent fields are kept
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTournamentRequest {
    pub admin_email: String,

    #[validate(length(min = 1, max = 64))]
    pub tournament_id: String,

    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub deadline: Option<String>,

    pub status: Option<TournamentStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TournamentSummary {
    pub tournament: Tournament,
    pub is_locked: bool,
}

/// One lineup row with the golfer currently rostered in its slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SlotResult {
    pub slot: i32,
    pub golfer_name: String,
    pub fedex_points: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeamResults {
    pub team_id: i32,
    pub team_name: String,
    pub lineup: Vec<SlotResult>,
    /// Sum of this tournament's points only.
    pub total_points: i32,
}

/// Every team's lineup and points for one tournament
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TournamentResults {
    pub tournament: Tournament,
    pub lineups: Vec<TeamResults>,
}
