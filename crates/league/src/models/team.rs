use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub team_id: i32,
    pub team_name: String,
    /// Login key, compared case-insensitively.
    pub owner_email: String,
}

impl Team {
    pub fn owned_by(&self, email: &str) -> bool {
        self.owner_email.trim().eq_ignore_ascii_case(email.trim())
    }
}
