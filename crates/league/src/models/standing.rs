use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Cached sum of a team's lineup points across all tournaments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Standing {
    pub team_id: i32,
    pub total_points: i32,
}
