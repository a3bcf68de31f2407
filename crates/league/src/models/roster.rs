use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Number of scored tournaments a slot may take part in.
pub const MAX_USES: i32 = 8;

/// Number of slots in a full lineup.
pub const LINEUP_SIZE: usize = 4;

/// One fixed draft position on a team's roster.
///
/// `times_used` counts scored lineups that used the slot, whichever golfer
/// held it at the time. A waiver swap resets it to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RosterSlot {
    pub team_id: i32,
    pub slot: i32,
    pub golfer_id: i32,
    pub times_used: i32,
}

impl RosterSlot {
    /// A slot below the usage cap may be picked for a new lineup.
    pub fn can_use(&self) -> bool {
        self.times_used < MAX_USES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(times_used: i32) -> RosterSlot {
        RosterSlot {
            team_id: 1,
            slot: 1,
            golfer_id: 10,
            times_used,
        }
    }

    #[test]
    fn test_unused_slot_is_usable() {
        assert!(slot(0).can_use());
    }

    #[test]
    fn test_slot_one_below_cap_is_usable() {
        assert!(slot(MAX_USES - 1).can_use());
    }

    #[test]
    fn test_slot_at_or_above_cap_is_not_usable() {
        assert!(!slot(MAX_USES).can_use());
        assert!(!slot(MAX_USES + 1).can_use());
    }
}
