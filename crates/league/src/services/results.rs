use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};
use validator::Validate;

use super::auth::require_commissioner;
use super::lineup::find_tournament;
use super::standings::list_standings;
use crate::dto::results::{EnterResultsRequest, ResultsOutcome, ScoreInput};
use crate::error::LeagueResult;
use crate::repository::{LeagueStore, LeagueWrite};

/// Records FedEx points for a tournament's lineup slots.
///
/// A slot scored for the first time gets its usage bumped once; a slot
/// that already had points is just corrected. Points, usage counters and
/// the recomputed standings are committed together or not at all. Each
/// points write is guarded by the value read here, so a concurrent scorer
/// turns into a conflict instead of a double count.
pub async fn enter_results(
    store: &dyn LeagueStore,
    request: &EnterResultsRequest,
) -> LeagueResult<ResultsOutcome> {
    request.validate()?;
    require_commissioner(store, &request.admin_email).await?;

    let tournament = find_tournament(store, &request.tournament_id).await?;

    let existing: HashMap<(i32, i32), Option<i32>> = store
        .tournament_lineups(&tournament.tournament_id)
        .await?
        .into_iter()
        .map(|entry| ((entry.team_id, entry.slot), entry.fedex_points))
        .collect();

    // Last row wins when the same slot is listed twice.
    let scores: BTreeMap<(i32, i32), i32> = request
        .results
        .iter()
        .map(|r| ((r.team_id, r.slot), r.fedex_points))
        .collect();

    let mut point_writes = Vec::new();
    let mut usage_writes = Vec::new();
    let mut skipped = Vec::new();
    let mut rescored = 0;

    for ((team_id, slot), points) in scores {
        let Some(previous) = existing.get(&(team_id, slot)).copied() else {
            skipped.push(ScoreInput {
                team_id,
                slot,
                fedex_points: points,
            });
            continue;
        };

        point_writes.push(LeagueWrite::SetPoints {
            tournament_id: tournament.tournament_id.clone(),
            team_id,
            slot,
            previous,
            points,
        });

        if previous.is_none() {
            usage_writes.push(LeagueWrite::IncrementUsage { team_id, slot });
        } else {
            rescored += 1;
        }
    }

    let first_time_scored = usage_writes.len();
    debug!(
        tournament_id = %tournament.tournament_id,
        first_time_scored,
        rescored,
        skipped = skipped.len(),
        "Planned result entry"
    );

    let mut writes = point_writes;
    writes.extend(usage_writes);
    writes.push(LeagueWrite::RecomputeStandings);
    store.apply(writes).await?;

    info!(
        tournament_id = %tournament.tournament_id,
        first_time_scored,
        rescored,
        "Results entered"
    );

    Ok(ResultsOutcome {
        tournament_id: tournament.tournament_id,
        first_time_scored,
        rescored,
        skipped,
        standings: list_standings(store).await?,
    })
}
