use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Team;

/// Who an email belongs to
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub team: Team,
    pub is_commissioner: bool,
}
