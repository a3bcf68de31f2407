use std::path::Path;

use anyhow::{Context, Result};
use league::dto::adjustment::AdjustLineupRequest;
use league::dto::lineup::SubmitLineupRequest;
use league::dto::results::{EnterResultsRequest, ScoreInput};
use league::dto::tournament::{CreateTournamentRequest, UpdateTournamentRequest};
use league::dto::waiver::WaiverClaimRequest;
use league::services::{
    adjustment, auth, carryover, lineup, results, standings, tournaments, waivers,
};
use league::{Clock, LeagueStore};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn handle_identify(store: &dyn LeagueStore, email: &str) -> Result<()> {
    let identity = auth::identify(store, email).await?;
    tracing::info!(
        "{} owns team {} ({})",
        email.trim(),
        identity.team.team_name,
        identity.team.team_id
    );
    print_json(&identity)
}

pub async fn handle_lineup_show(
    store: &dyn LeagueStore,
    clock: &dyn Clock,
    team_id: i32,
    tournament_id: &str,
) -> Result<()> {
    let state = lineup::get_lineup_state(store, clock, team_id, tournament_id).await?;
    if state.is_locked {
        tracing::info!("Tournament {} is locked", tournament_id);
    }
    print_json(&state)
}

pub async fn handle_lineup_submit(
    store: &dyn LeagueStore,
    clock: &dyn Clock,
    request: SubmitLineupRequest,
) -> Result<()> {
    let outcome = lineup::submit_lineup(store, clock, &request).await?;
    if let Some(warning) = &outcome.warning {
        tracing::warn!("{}", warning);
    }
    print_json(&outcome)
}

/// Reads a JSON array of `{team_id, slot, fedex_points}` rows and scores them.
pub async fn handle_results(
    store: &dyn LeagueStore,
    admin_email: String,
    tournament_id: String,
    file: &Path,
) -> Result<()> {
    tracing::info!("Loading results from: {}", file.display());

    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let rows: Vec<ScoreInput> =
        serde_json::from_str(&content).context("Results file is not a list of score rows")?;
    tracing::info!("Loaded {} result rows", rows.len());

    let outcome = results::enter_results(
        store,
        &EnterResultsRequest {
            tournament_id,
            admin_email,
            results: rows,
        },
    )
    .await?;

    for skipped in &outcome.skipped {
        tracing::warn!(
            "Skipped team {} slot {}: no lineup entry",
            skipped.team_id,
            skipped.slot
        );
    }
    print_json(&outcome)
}

pub async fn handle_carryover(store: &dyn LeagueStore, tournament_id: &str) -> Result<()> {
    let report = carryover::generate_carryover(store, tournament_id).await?;
    tracing::info!("{}", report.message());
    print_json(&report)
}

pub async fn handle_adjust(
    store: &dyn LeagueStore,
    clock: &dyn Clock,
    request: AdjustLineupRequest,
) -> Result<()> {
    let outcome = adjustment::adjust_lineup(store, clock, &request).await?;
    tracing::info!("{}", outcome.message());
    print_json(&outcome)
}

pub async fn handle_history(store: &dyn LeagueStore, tournament_id: &str) -> Result<()> {
    print_json(&adjustment::adjustment_history(store, tournament_id).await?)
}

pub async fn handle_standings(store: &dyn LeagueStore) -> Result<()> {
    print_json(&standings::list_standings(store).await?)
}

pub async fn handle_recalculate(store: &dyn LeagueStore, admin_email: &str) -> Result<()> {
    print_json(&standings::recalculate_standings(store, admin_email).await?)
}

pub async fn handle_tournament_create(
    store: &dyn LeagueStore,
    request: CreateTournamentRequest,
) -> Result<()> {
    print_json(&tournaments::create_tournament(store, &request).await?)
}

pub async fn handle_tournament_update(
    store: &dyn LeagueStore,
    request: UpdateTournamentRequest,
) -> Result<()> {
    print_json(&tournaments::update_tournament(store, &request).await?)
}

pub async fn handle_tournament_list(store: &dyn LeagueStore, clock: &dyn Clock) -> Result<()> {
    print_json(&tournaments::list_tournaments(store, clock).await?)
}

pub async fn handle_tournament_show(store: &dyn LeagueStore, tournament_id: &str) -> Result<()> {
    let results = tournaments::tournament_results(store, tournament_id).await?;
    for team in &results.lineups {
        tracing::debug!(
            "{}: {} slot(s), {} points",
            team.team_name,
            team.lineup.len(),
            team.total_points
        );
    }
    print_json(&results)
}

pub async fn handle_waiver_claim(
    store: &dyn LeagueStore,
    clock: &dyn Clock,
    request: WaiverClaimRequest,
) -> Result<()> {
    let outcome = waivers::claim_waiver(store, clock, &request).await?;
    tracing::info!(
        "✓ Dropped {} for {} in slot {}",
        outcome.entry.dropped_golfer,
        outcome.entry.added_golfer,
        outcome.entry.slot
    );
    print_json(&outcome)
}

pub async fn handle_waiver_available(store: &dyn LeagueStore) -> Result<()> {
    print_json(&waivers::available_golfers(store).await?)
}

pub async fn handle_waiver_log(store: &dyn LeagueStore) -> Result<()> {
    print_json(&waivers::waiver_log(store).await?)
}
