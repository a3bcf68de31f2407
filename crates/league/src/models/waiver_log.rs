use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WaiverLogEntry {
    pub timestamp: DateTime<Utc>,
    pub team_id: i32,
    pub dropped_golfer: String,
    pub added_golfer: String,
    pub slot: i32,
}
