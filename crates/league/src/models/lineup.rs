use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One selected slot in a team's lineup for a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LineupEntry {
    pub tournament_id: String,
    pub team_id: i32,
    pub slot: i32,
    /// `None` until results are entered.
    pub fedex_points: Option<i32>,
    pub admin_note: Option<String>,
}

impl LineupEntry {
    pub fn unscored(tournament_id: impl Into<String>, team_id: i32, slot: i32) -> Self {
        Self {
            tournament_id: tournament_id.into(),
            team_id,
            slot,
            fedex_points: None,
            admin_note: None,
        }
    }

    pub fn points(&self) -> i32 {
        self.fedex_points.unwrap_or(0)
    }
}
