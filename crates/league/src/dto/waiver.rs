use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::WaiverLogEntry;

/// Request payload for dropping one golfer and adding a free agent in the same slot
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct WaiverClaimRequest {
    pub team_id: i32,
    pub drop_golfer_id: i32,
    pub add_golfer_id: i32,

    #[validate(range(min = 1))]
    pub slot: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WaiverOutcome {
    pub entry: WaiverLogEntry,
}
