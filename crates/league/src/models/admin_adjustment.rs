use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Audit record of a commissioner swapping one lineup slot for another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AdminAdjustment {
    pub timestamp: DateTime<Utc>,
    pub tournament_id: String,
    pub team_id: i32,
    pub old_slot: i32,
    pub new_slot: i32,
    pub old_points: Option<i32>,
    pub new_points: i32,
    pub note: Option<String>,
    pub admin_email: String,
}
