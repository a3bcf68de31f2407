use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StandingRow {
    pub team_id: i32,
    pub team_name: String,
    pub owner_email: String,
    pub total_points: i32,
}
