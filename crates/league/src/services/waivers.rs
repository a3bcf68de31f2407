use std::collections::HashSet;

use tracing::info;
use validator::Validate;

use super::deadline::Clock;
use crate::dto::waiver::{WaiverClaimRequest, WaiverOutcome};
use crate::error::{LeagueError, LeagueResult};
use crate::models::{Golfer, WaiverLogEntry};
use crate::repository::{LeagueStore, LeagueWrite};

/// Golfers on nobody's roster, by name.
pub async fn available_golfers(store: &dyn LeagueStore) -> LeagueResult<Vec<Golfer>> {
    let rostered: HashSet<i32> = store
        .all_roster_slots()
        .await?
        .into_iter()
        .map(|slot| slot.golfer_id)
        .collect();

    let mut golfers: Vec<Golfer> = store
        .list_golfers()
        .await?
        .into_iter()
        .filter(|golfer| !rostered.contains(&golfer.golfer_id))
        .collect();
    golfers.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.golfer_id.cmp(&b.golfer_id)));

    Ok(golfers)
}

/// Waiver history, newest first.
pub async fn waiver_log(store: &dyn LeagueStore) -> LeagueResult<Vec<WaiverLogEntry>> {
    Ok(store.waiver_log().await?)
}

/// Swaps the golfer in one of a team's slots for a free agent.
///
/// The slot starts over at zero uses with its new golfer.
pub async fn claim_waiver(
    store: &dyn LeagueStore,
    clock: &dyn Clock,
    request: &WaiverClaimRequest,
) -> LeagueResult<WaiverOutcome> {
    request.validate()?;

    let holds_drop_golfer = store
        .roster(request.team_id)
        .await?
        .iter()
        .any(|r| r.slot == request.slot && r.golfer_id == request.drop_golfer_id);
    if !holds_drop_golfer {
        return Err(LeagueError::Invalid(format!(
            "Golfer {} is not on team {} at slot {}",
            request.drop_golfer_id, request.team_id, request.slot
        )));
    }

    let added = store
        .find_golfer(request.add_golfer_id)
        .await?
        .ok_or_else(|| LeagueError::NotFound(format!("Golfer {}", request.add_golfer_id)))?;

    let already_rostered = store
        .all_roster_slots()
        .await?
        .iter()
        .any(|r| r.golfer_id == added.golfer_id);
    if already_rostered {
        return Err(LeagueError::Conflict(format!(
            "{} is already on a roster",
            added.name
        )));
    }

    let dropped_name = store
        .find_golfer(request.drop_golfer_id)
        .await?
        .map_or_else(|| "Unknown".to_string(), |g| g.name);

    let entry = WaiverLogEntry {
        timestamp: clock.now(),
        team_id: request.team_id,
        dropped_golfer: dropped_name,
        added_golfer: added.name,
        slot: request.slot,
    };

    store
        .apply(vec![
            LeagueWrite::SwapGolfer {
                team_id: request.team_id,
                slot: request.slot,
                golfer_id: added.golfer_id,
            },
            LeagueWrite::AppendWaiver(entry.clone()),
        ])
        .await?;

    info!(
        team_id = entry.team_id,
        slot = entry.slot,
        dropped = %entry.dropped_golfer,
        added = %entry.added_golfer,
        "Waiver claimed"
    );

    Ok(WaiverOutcome { entry })
}
