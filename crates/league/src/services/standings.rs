use std::collections::HashMap;

use tracing::info;

use super::auth::require_commissioner;
use crate::dto::standings::StandingRow;
use crate::error::LeagueResult;
use crate::repository::{LeagueStore, LeagueWrite};

/// Teams ordered by cached total, best first. Ties keep team order.
pub async fn list_standings(store: &dyn LeagueStore) -> LeagueResult<Vec<StandingRow>> {
    let totals: HashMap<i32, i32> = store
        .standings()
        .await?
        .into_iter()
        .map(|s| (s.team_id, s.total_points))
        .collect();

    let mut rows: Vec<StandingRow> = store
        .list_teams()
        .await?
        .into_iter()
        .map(|team| StandingRow {
            total_points: totals.get(&team.team_id).copied().unwrap_or(0),
            team_id: team.team_id,
            team_name: team.team_name,
            owner_email: team.owner_email,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| a.team_id.cmp(&b.team_id))
    });

    Ok(rows)
}

/// Commissioner command that rebuilds every standing from lineup points.
pub async fn recalculate_standings(
    store: &dyn LeagueStore,
    admin_email: &str,
) -> LeagueResult<Vec<StandingRow>> {
    require_commissioner(store, admin_email).await?;

    store.apply(vec![LeagueWrite::RecomputeStandings]).await?;
    info!("Standings recalculated");

    list_standings(store).await
}
