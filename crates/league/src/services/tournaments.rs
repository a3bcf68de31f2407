use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::info;
use validator::Validate;

use super::auth::require_commissioner;
use super::deadline::{Clock, is_locked};
use super::lineup::find_tournament;
use crate::dto::tournament::{
    CreateTournamentRequest, SlotResult, TeamResults, TournamentResults, TournamentSummary,
    UpdateTournamentRequest,
};
use crate::error::{LeagueError, LeagueResult};
use crate::models::{Tournament, TournamentStatus, parse_deadline};
use crate::repository::{LeagueStore, LeagueWrite};

fn deadline_from(input: &str) -> LeagueResult<NaiveDateTime> {
    parse_deadline(input).ok_or_else(|| {
        LeagueError::Invalid(format!(
            "Deadline '{input}' must look like YYYY-MM-DDTHH:MM[:SS]"
        ))
    })
}

pub async fn create_tournament(
    store: &dyn LeagueStore,
    request: &CreateTournamentRequest,
) -> LeagueResult<Tournament> {
    request.validate()?;
    require_commissioner(store, &request.admin_email).await?;

    let tournament_id = request.tournament_id.trim().to_string();
    if store.find_tournament(&tournament_id).await?.is_some() {
        return Err(LeagueError::Conflict(format!(
            "Tournament {tournament_id} already exists"
        )));
    }

    let tournament = Tournament {
        tournament_id,
        name: request.name.trim().to_string(),
        deadline: deadline_from(&request.deadline)?,
        status: request.status.unwrap_or(TournamentStatus::Open),
    };

    store
        .apply(vec![LeagueWrite::InsertTournament(tournament.clone())])
        .await?;

    info!(
        tournament_id = %tournament.tournament_id,
        deadline = %tournament.deadline,
        status = %tournament.status,
        "Tournament created"
    );

    Ok(tournament)
}

/// Changes whichever of name, deadline and status the request carries.
pub async fn update_tournament(
    store: &dyn LeagueStore,
    request: &UpdateTournamentRequest,
) -> LeagueResult<Tournament> {
    request.validate()?;
    require_commissioner(store, &request.admin_email).await?;

    let mut tournament = find_tournament(store, request.tournament_id.trim()).await?;

    if let Some(name) = &request.name {
        tournament.name = name.trim().to_string();
    }
    if let Some(deadline) = &request.deadline {
        tournament.deadline = deadline_from(deadline)?;
    }
    if let Some(status) = request.status {
        tournament.status = status;
    }

    store
        .apply(vec![LeagueWrite::UpdateTournament(tournament.clone())])
        .await?;

    info!(
        tournament_id = %tournament.tournament_id,
        deadline = %tournament.deadline,
        status = %tournament.status,
        "Tournament updated"
    );

    Ok(tournament)
}

/// Every tournament, latest deadline first.
pub async fn list_tournaments(
    store: &dyn LeagueStore,
    clock: &dyn Clock,
) -> LeagueResult<Vec<TournamentSummary>> {
    let now = clock.now();
    let mut tournaments = store.list_tournaments().await?;
    tournaments.reverse();

    Ok(tournaments
        .into_iter()
        .map(|tournament| TournamentSummary {
            is_locked: is_locked(&tournament, now),
            tournament,
        })
        .collect())
}

/// Every team's lineup for one tournament, with golfer names and the
/// tournament's point total per team. Teams without a lineup appear empty.
pub async fn tournament_results(
    store: &dyn LeagueStore,
    tournament_id: &str,
) -> LeagueResult<TournamentResults> {
    let tournament = find_tournament(store, tournament_id.trim()).await?;

    let golfer_names: HashMap<i32, String> = store
        .list_golfers()
        .await?
        .into_iter()
        .map(|g| (g.golfer_id, g.name))
        .collect();
    let rostered: HashMap<(i32, i32), i32> = store
        .all_roster_slots()
        .await?
        .into_iter()
        .map(|r| ((r.team_id, r.slot), r.golfer_id))
        .collect();

    let mut entries = store.tournament_lineups(&tournament.tournament_id).await?;
    entries.sort_by_key(|e| (e.team_id, e.slot));

    let mut teams = store.list_teams().await?;
    teams.sort_by_key(|t| t.team_id);

    let lineups = teams
        .into_iter()
        .map(|team| {
            let lineup: Vec<SlotResult> = entries
                .iter()
                .filter(|e| e.team_id == team.team_id)
                .map(|e| SlotResult {
                    slot: e.slot,
                    golfer_name: rostered
                        .get(&(team.team_id, e.slot))
                        .and_then(|golfer_id| golfer_names.get(golfer_id))
                        .cloned()
                        .unwrap_or_else(|| "Unknown".to_string()),
                    fedex_points: e.fedex_points,
                })
                .collect();

            TeamResults {
                team_id: team.team_id,
                team_name: team.team_name,
                total_points: lineup.iter().filter_map(|s| s.fedex_points).sum(),
                lineup,
            }
        })
        .collect();

    Ok(TournamentResults {
        tournament,
        lineups,
    })
}
