use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{LineupEntry, Tournament};

/// Request payload for submitting (or resubmitting) a lineup
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitLineupRequest {
    pub team_id: i32,

    #[validate(length(min = 1, max = 64, message = "Tournament id must be 1-64 characters"))]
    pub tournament_id: String,

    pub slots: Vec<i32>,
}

/// One roster slot as the lineup page shows it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RosterSlotState {
    pub slot: i32,
    pub golfer_id: i32,
    pub golfer_name: String,
    pub times_used: i32,
    pub is_selected: bool,
    pub is_default: bool,
    pub can_select: bool,
}

/// Everything needed to render a team's lineup for a tournament
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LineupState {
    pub tournament: Tournament,
    pub roster: Vec<RosterSlotState>,
    pub current_lineup: Vec<LineupEntry>,
    pub default_slots: Vec<i32>,
    pub is_locked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionOutcome {
    pub team_id: i32,
    pub tournament_id: String,
    pub slots: Vec<i32>,
    /// Number of rows the submission replaced.
    pub replaced: usize,
    pub warning: Option<String>,
}
