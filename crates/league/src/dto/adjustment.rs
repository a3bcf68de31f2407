use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::AdminAdjustment;

/// Request payload for a commissioner swapping one lineup slot for another
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AdjustLineupRequest {
    #[validate(length(min = 1, max = 64))]
    pub tournament_id: String,

    pub team_id: i32,

    #[validate(range(min = 1))]
    pub old_slot: i32,

    #[validate(range(min = 1))]
    pub new_slot: i32,

    #[validate(range(min = 0, message = "FedEx points cannot be negative"))]
    pub new_points: i32,

    #[validate(length(max = 500))]
    pub note: Option<String>,

    /// Matched against the commissioner allow-list ignoring case and padding.
    pub admin_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdjustmentOutcome {
    pub adjustment: AdminAdjustment,
    pub team_total: i32,
}

impl AdjustmentOutcome {
    pub fn message(&self) -> String {
        format!(
            "Lineup adjusted: slot {} -> slot {} with {} points",
            self.adjustment.old_slot, self.adjustment.new_slot, self.adjustment.new_points
        )
    }
}
