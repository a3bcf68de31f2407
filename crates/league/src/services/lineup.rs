use std::collections::HashMap;

use tracing::{debug, info, warn};
use validator::Validate;

use super::deadline::{Clock, is_locked};
use super::eligibility::{can_use_slot, default_lineup, validate_lineup_selection};
use crate::dto::lineup::{LineupState, RosterSlotState, SubmissionOutcome, SubmitLineupRequest};
use crate::error::{LeagueError, LeagueResult};
use crate::models::{LineupEntry, Tournament};
use crate::repository::{LeagueStore, LeagueWrite};

/// The tournament whose deadline comes last among those strictly before
/// `current`'s. Ties on deadline go to the higher id.
pub fn preceding_tournament<'a>(
    tournaments: &'a [Tournament],
    current: &Tournament,
) -> Option<&'a Tournament> {
    tournaments
        .iter()
        .filter(|t| t.deadline < current.deadline)
        .max_by(|a, b| {
            a.deadline
                .cmp(&b.deadline)
                .then_with(|| a.tournament_id.cmp(&b.tournament_id))
        })
}

pub(crate) async fn find_tournament(
    store: &dyn LeagueStore,
    tournament_id: &str,
) -> LeagueResult<Tournament> {
    store
        .find_tournament(tournament_id)
        .await?
        .ok_or_else(|| LeagueError::NotFound(format!("Tournament {tournament_id}")))
}

/// Slots the team used in the tournament before `current`, if any.
pub(crate) async fn previous_lineup_slots(
    store: &dyn LeagueStore,
    current: &Tournament,
    team_id: i32,
) -> LeagueResult<Vec<i32>> {
    let tournaments = store.list_tournaments().await?;
    let Some(previous) = preceding_tournament(&tournaments, current) else {
        return Ok(Vec::new());
    };

    let slots = store
        .lineup(&previous.tournament_id, team_id)
        .await?
        .into_iter()
        .map(|entry| entry.slot)
        .collect();

    Ok(slots)
}

/// Read path of the lineup page.
pub async fn get_lineup_state(
    store: &dyn LeagueStore,
    clock: &dyn Clock,
    team_id: i32,
    tournament_id: &str,
) -> LeagueResult<LineupState> {
    let tournament = find_tournament(store, tournament_id).await?;
    store
        .find_team(team_id)
        .await?
        .ok_or_else(|| LeagueError::NotFound(format!("Team {team_id}")))?;

    let mut roster = store.roster(team_id).await?;
    roster.sort_by_key(|slot| slot.slot);

    let current_lineup = store.lineup(tournament_id, team_id).await?;
    let previous = previous_lineup_slots(store, &tournament, team_id).await?;
    let default_slots = default_lineup(&roster, &previous);
    debug!(team_id, tournament_id, ?previous, ?default_slots, "Computed default lineup");

    let golfer_names: HashMap<i32, String> = store
        .list_golfers()
        .await?
        .into_iter()
        .map(|g| (g.golfer_id, g.name))
        .collect();

    let roster = roster
        .iter()
        .map(|slot| RosterSlotState {
            slot: slot.slot,
            golfer_id: slot.golfer_id,
            golfer_name: golfer_names
                .get(&slot.golfer_id)
                .cloned()
                .unwrap_or_else(|| "Unknown".to_string()),
            times_used: slot.times_used,
            is_selected: current_lineup.iter().any(|l| l.slot == slot.slot),
            is_default: default_slots.contains(&slot.slot),
            can_select: can_use_slot(slot),
        })
        .collect();

    Ok(LineupState {
        is_locked: is_locked(&tournament, clock.now()),
        tournament,
        roster,
        current_lineup,
        default_slots,
    })
}

/// Replaces a team's lineup for a tournament with `request.slots`.
///
/// Usage counters are left alone: a slot only counts as used once it has
/// been scored.
pub async fn submit_lineup(
    store: &dyn LeagueStore,
    clock: &dyn Clock,
    request: &SubmitLineupRequest,
) -> LeagueResult<SubmissionOutcome> {
    request.validate()?;

    let tournament = find_tournament(store, &request.tournament_id).await?;
    store
        .find_team(request.team_id)
        .await?
        .ok_or_else(|| LeagueError::NotFound(format!("Team {}", request.team_id)))?;

    if is_locked(&tournament, clock.now()) {
        warn!(
            team_id = request.team_id,
            tournament_id = %tournament.tournament_id,
            "Lineup submitted after lock"
        );
        return Err(LeagueError::Locked(tournament.tournament_id));
    }

    let roster = store.roster(request.team_id).await?;
    let check = validate_lineup_selection(&request.slots, &roster)?;

    let replaced = store
        .lineup(&tournament.tournament_id, request.team_id)
        .await?
        .len();

    let mut writes = vec![LeagueWrite::ClearLineup {
        tournament_id: tournament.tournament_id.clone(),
        team_id: request.team_id,
    }];
    writes.extend(request.slots.iter().map(|slot| {
        LeagueWrite::InsertLineupEntry(LineupEntry::unscored(
            tournament.tournament_id.clone(),
            request.team_id,
            *slot,
        ))
    }));
    store.apply(writes).await?;

    let mut slots = request.slots.clone();
    slots.sort_unstable();
    info!(
        team_id = request.team_id,
        tournament_id = %tournament.tournament_id,
        ?slots,
        replaced,
        "Lineup submitted"
    );

    Ok(SubmissionOutcome {
        team_id: request.team_id,
        tournament_id: tournament.tournament_id,
        slots,
        replaced,
        warning: check.warning(),
    })
}
