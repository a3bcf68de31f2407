use std::collections::HashSet;

use tracing::{debug, info};

use super::eligibility::default_lineup;
use super::lineup::{find_tournament, preceding_tournament};
use crate::dto::carryover::{CarryoverEntry, CarryoverReport};
use crate::error::LeagueResult;
use crate::models::LineupEntry;
use crate::repository::{LeagueStore, LeagueWrite};

/// Fills in lineups for teams that never submitted one for `tournament_id`.
///
/// Each such team gets its lineup from the preceding tournament (by
/// deadline), run back through [`default_lineup`] so slots that have since
/// hit the usage cap are replaced. Teams with any lineup row are left
/// untouched, which makes a second run a no-op. All inserts for all teams
/// share one transaction.
pub async fn generate_carryover(
    store: &dyn LeagueStore,
    tournament_id: &str,
) -> LeagueResult<CarryoverReport> {
    let tournament = find_tournament(store, tournament_id).await?;

    let submitted: HashSet<i32> = store
        .tournament_lineups(&tournament.tournament_id)
        .await?
        .into_iter()
        .map(|entry| entry.team_id)
        .collect();

    let tournaments = store.list_tournaments().await?;
    let previous = preceding_tournament(&tournaments, &tournament);
    let previous_tournament_id = previous.map(|t| t.tournament_id.clone());

    let mut writes = Vec::new();
    let mut carryovers = Vec::new();
    let mut already_submitted = Vec::new();

    for team in store.list_teams().await? {
        if submitted.contains(&team.team_id) {
            already_submitted.push(team.team_id);
            continue;
        }

        let roster = store.roster(team.team_id).await?;
        let previous_slots: Vec<i32> = match previous {
            Some(previous) => store
                .lineup(&previous.tournament_id, team.team_id)
                .await?
                .into_iter()
                .map(|entry| entry.slot)
                .collect(),
            None => Vec::new(),
        };

        let slots = default_lineup(&roster, &previous_slots);
        debug!(team_id = team.team_id, ?previous_slots, ?slots, "Carryover lineup");
        if slots.is_empty() {
            continue;
        }

        writes.extend(slots.iter().map(|slot| {
            LeagueWrite::InsertLineupEntry(LineupEntry::unscored(
                tournament.tournament_id.clone(),
                team.team_id,
                *slot,
            ))
        }));
        carryovers.push(CarryoverEntry {
            team_id: team.team_id,
            team_name: team.team_name,
            slots,
        });
    }

    if !writes.is_empty() {
        store.apply(writes).await?;
    }

    info!(
        tournament_id = %tournament.tournament_id,
        previous = ?previous_tournament_id,
        teams = carryovers.len(),
        "Carryover applied"
    );

    Ok(CarryoverReport {
        tournament_id: tournament.tournament_id,
        previous_tournament_id,
        carryovers,
        already_submitted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LeagueError;
    use crate::models::{RosterSlot, Team};
    use crate::services::fixtures::{league, scored};

    #[tokio::test]
    async fn test_capped_slot_is_replaced_by_backfill() {
        // Team 1's slot 2 is at the cap; slot 3 is the lowest eligible free slot.
        let store = league()
            .with_lineup_entry(scored("T001", 1, 1, 10))
            .with_lineup_entry(scored("T001", 1, 2, 10));

        let report = generate_carryover(&store, "T002").await.unwrap();

        assert_eq!(report.previous_tournament_id.as_deref(), Some("T001"));
        let team_one = report.carryovers.iter().find(|c| c.team_id == 1).unwrap();
        assert_eq!(team_one.slots, vec![1, 3, 4, 5]);
        assert_eq!(team_one.team_name, "Birdies");

        let state = store.snapshot().await;
        assert_eq!(state.lineup_slots("T002", 1), vec![1, 3, 4, 5]);
        assert!(
            state
                .lineups
                .values()
                .filter(|l| l.tournament_id == "T002")
                .all(|l| l.fedex_points.is_none())
        );
    }

    #[tokio::test]
    async fn test_small_roster_gets_previous_plus_one_backfill() {
        // Team 3 has three slots; its prior lineup [1, 2] lost slot 2 to the cap.
        let mut store = league()
            .with_team(Team {
                team_id: 3,
                team_name: "Eagles".into(),
                owner_email: "three@example.com".into(),
            })
            .with_lineup_entry(scored("T001", 3, 1, 4))
            .with_lineup_entry(scored("T001", 3, 2, 4))
            .with_lineup_entry(scored("T002", 1, 1, 0))
            .with_lineup_entry(scored("T002", 2, 1, 0));
        for (slot, times_used) in [(1, 1), (2, 8), (3, 0)] {
            store = store.with_roster_slot(RosterSlot {
                team_id: 3,
                slot,
                golfer_id: 300 + slot,
                times_used,
            });
        }

        let report = generate_carryover(&store, "T002").await.unwrap();

        assert_eq!(report.already_submitted, vec![1, 2]);
        assert_eq!(
            report.carryovers,
            vec![CarryoverEntry {
                team_id: 3,
                team_name: "Eagles".into(),
                slots: vec![1, 3],
            }]
        );
        assert_eq!(store.snapshot().await.lineup_slots("T002", 3), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_team_with_lineup_is_never_overwritten() {
        let store = league().with_lineup_entry(LineupEntry::unscored("T002", 1, 6));

        let report = generate_carryover(&store, "T002").await.unwrap();

        assert_eq!(report.already_submitted, vec![1]);
        assert_eq!(store.snapshot().await.lineup_slots("T002", 1), vec![6]);
        assert_eq!(store.snapshot().await.lineup_slots("T002", 2), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_second_run_is_a_no_op() {
        let store = league();
        let first = generate_carryover(&store, "T002").await.unwrap();
        assert_eq!(first.carryovers.len(), 2);

        let before = store.snapshot().await.lineups;
        let second = generate_carryover(&store, "T002").await.unwrap();

        assert!(second.carryovers.is_empty());
        assert_eq!(second.already_submitted, vec![1, 2]);
        assert_eq!(second.message(), "All teams already have lineups");
        assert_eq!(store.snapshot().await.lineups, before);
    }

    #[tokio::test]
    async fn test_first_tournament_has_no_previous() {
        let store = league();
        let report = generate_carryover(&store, "T010").await.unwrap();
        assert!(report.previous_tournament_id.is_none());
        assert_eq!(store.snapshot().await.lineup_slots("T010", 2), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_failure_inserts_nothing() {
        let store = league();
        // Team 1 gets four rows first; fail on team 2's second row.
        store.fail_on_write(5).await;

        assert!(matches!(
            generate_carryover(&store, "T002").await,
            Err(LeagueError::Storage(_))
        ));
        let state = store.snapshot().await;
        assert!(state.lineup_slots("T002", 1).is_empty());
        assert!(state.lineup_slots("T002", 2).is_empty());
    }

    #[tokio::test]
    async fn test_unknown_tournament_is_not_found() {
        assert!(matches!(
            generate_carryover(&league(), "T404").await,
            Err(LeagueError::NotFound(_))
        ));
    }
}
