use tracing::{info, warn};
use validator::Validate;

use super::auth::require_commissioner;
use super::deadline::Clock;
use super::lineup::find_tournament;
use crate::dto::adjustment::{AdjustLineupRequest, AdjustmentOutcome};
use crate::error::{LeagueError, LeagueResult, SelectionError};
use crate::models::{AdminAdjustment, LineupEntry, MAX_USES, commissioner::normalize_email};
use crate::repository::{LeagueStore, LeagueWrite};

fn admin_note(note: Option<&str>) -> String {
    match note.map(str::trim).filter(|n| !n.is_empty()) {
        Some(note) => format!("Admin adjustment: {note}"),
        None => "Admin adjustment".to_string(),
    }
}

/// Commissioner override moving one lineup row from `old_slot` to
/// `new_slot` with fresh points.
///
/// The new slot is charged one use. The old slot gets its use back only if
/// its row had been scored, since unscored rows never cost a use. The
/// audit record and a full standings recompute ride in the same
/// transaction.
pub async fn adjust_lineup(
    store: &dyn LeagueStore,
    clock: &dyn Clock,
    request: &AdjustLineupRequest,
) -> LeagueResult<AdjustmentOutcome> {
    request.validate()?;
    require_commissioner(store, &request.admin_email).await?;

    let roster = store.roster(request.team_id).await?;
    let new_slot = roster
        .iter()
        .find(|r| r.slot == request.new_slot)
        .ok_or(SelectionError::SlotNotOnRoster(request.new_slot))?;

    if new_slot.times_used >= MAX_USES {
        return Err(LeagueError::SlotExhausted {
            slot: new_slot.slot,
            times_used: new_slot.times_used,
        });
    }

    let lineup = store.lineup(&request.tournament_id, request.team_id).await?;
    let old_entry = lineup
        .iter()
        .find(|entry| entry.slot == request.old_slot)
        .ok_or_else(|| {
            LeagueError::NotFound(format!(
                "Lineup entry for slot {} in tournament {}",
                request.old_slot, request.tournament_id
            ))
        })?;

    if request.new_slot != request.old_slot
        && lineup.iter().any(|entry| entry.slot == request.new_slot)
    {
        return Err(SelectionError::DuplicateSlot(request.new_slot).into());
    }

    let note = request
        .note
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);
    let adjustment = AdminAdjustment {
        timestamp: clock.now(),
        tournament_id: request.tournament_id.clone(),
        team_id: request.team_id,
        old_slot: request.old_slot,
        new_slot: request.new_slot,
        old_points: old_entry.fedex_points,
        new_points: request.new_points,
        note: note.clone(),
        admin_email: normalize_email(&request.admin_email),
    };

    let mut writes = vec![
        LeagueWrite::DeleteLineupEntry {
            tournament_id: request.tournament_id.clone(),
            team_id: request.team_id,
            slot: request.old_slot,
        },
        LeagueWrite::InsertLineupEntry(LineupEntry {
            fedex_points: Some(request.new_points),
            admin_note: Some(admin_note(note.as_deref())),
            ..LineupEntry::unscored(request.tournament_id.clone(), request.team_id, request.new_slot)
        }),
    ];
    if old_entry.fedex_points.is_some() {
        writes.push(LeagueWrite::DecrementUsage {
            team_id: request.team_id,
            slot: request.old_slot,
        });
    } else {
        warn!(
            team_id = request.team_id,
            slot = request.old_slot,
            "Adjusting an unscored lineup row; usage of the old slot is unchanged"
        );
    }
    writes.push(LeagueWrite::IncrementUsage {
        team_id: request.team_id,
        slot: request.new_slot,
    });
    writes.push(LeagueWrite::AppendAdjustment(adjustment.clone()));
    writes.push(LeagueWrite::RecomputeStandings);

    store.apply(writes).await?;

    let team_total = store
        .standings()
        .await?
        .into_iter()
        .find(|s| s.team_id == request.team_id)
        .map_or(0, |s| s.total_points);

    info!(
        tournament_id = %request.tournament_id,
        team_id = request.team_id,
        old_slot = request.old_slot,
        new_slot = request.new_slot,
        new_points = request.new_points,
        admin = %adjustment.admin_email,
        "Lineup adjusted"
    );

    Ok(AdjustmentOutcome {
        adjustment,
        team_total,
    })
}

/// Audit trail of adjustments made to a tournament, oldest first.
pub async fn adjustment_history(
    store: &dyn LeagueStore,
    tournament_id: &str,
) -> LeagueResult<Vec<AdminAdjustment>> {
    let tournament = find_tournament(store, tournament_id).await?;
    Ok(store.adjustments(&tournament.tournament_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::waiver::WaiverClaimRequest;
    use crate::models::RosterSlot;
    use crate::repository::MemoryStore;
    use crate::services::waivers::claim_waiver;
    use crate::services::fixtures::{
        COMMISSIONER, OWNER, assert_standings_consistent, clock, league, scored,
    };

    fn request(old_slot: i32, new_slot: i32, new_points: i32) -> AdjustLineupRequest {
        AdjustLineupRequest {
            tournament_id: "T001".into(),
            team_id: 1,
            old_slot,
            new_slot,
            new_points,
            note: Some("Withdrew before round one".into()),
            admin_email: "Boss@League.org".into(),
        }
    }

    /// Team 1 played slots 1 and 3 in T001, both scored and both charged a use.
    fn scored_lineup() -> MemoryStore {
        league()
            .with_roster_slot(RosterSlot {
                team_id: 1,
                slot: 3,
                golfer_id: 103,
                times_used: 1,
            })
            .with_lineup_entry(scored("T001", 1, 1, 10))
            .with_lineup_entry(scored("T001", 1, 3, 2))
    }

    #[tokio::test]
    async fn test_swap_moves_usage_and_points() {
        let store = scored_lineup();
        let outcome = adjust_lineup(&store, &clock(), &request(3, 6, 5))
            .await
            .unwrap();

        let state = store.snapshot().await;
        assert_eq!(state.roster_slot(1, 3).unwrap().times_used, 0);
        assert_eq!(state.roster_slot(1, 6).unwrap().times_used, 5);
        assert_eq!(state.lineup_slots("T001", 1), vec![1, 6]);

        // 10 + 2 before, 10 + 5 after.
        assert_eq!(outcome.team_total, 15);
        assert_eq!(state.standing(1), Some(15));
        assert_standings_consistent(&store).await;

        let moved = &state.lineups[&("T001".to_string(), 1, 6)];
        assert_eq!(moved.fedex_points, Some(5));
        assert_eq!(
            moved.admin_note.as_deref(),
            Some("Admin adjustment: Withdrew before round one")
        );

        assert_eq!(state.adjustments.len(), 1);
        let audit = &state.adjustments[0];
        assert_eq!(audit.old_points, Some(2));
        assert_eq!(audit.new_points, 5);
        assert_eq!(audit.admin_email, COMMISSIONER);
        assert_eq!(audit.timestamp, clock().now());
        assert_eq!(outcome.message(), "Lineup adjusted: slot 3 -> slot 6 with 5 points");
    }

    #[tokio::test]
    async fn test_adjusting_slot_reset_by_waiver() {
        let store = scored_lineup();
        claim_waiver(
            &store,
            &clock(),
            &WaiverClaimRequest {
                team_id: 1,
                drop_golfer_id: 103,
                add_golfer_id: 900,
                slot: 3,
            },
        )
        .await
        .unwrap();
        assert_eq!(store.snapshot().await.roster_slot(1, 3).unwrap().times_used, 0);

        let outcome = adjust_lineup(&store, &clock(), &request(3, 6, 5))
            .await
            .unwrap();

        let state = store.snapshot().await;
        assert_eq!(state.roster_slot(1, 3).unwrap().times_used, 0);
        assert_eq!(state.roster_slot(1, 6).unwrap().times_used, 5);
        assert_eq!(outcome.team_total, 15);
        assert_standings_consistent(&store).await;
    }

    #[tokio::test]
    async fn test_padded_admin_email_is_accepted() {
        let store = scored_lineup();
        let mut req = request(3, 6, 5);
        req.admin_email = "  Boss@League.org ".into();

        let outcome = adjust_lineup(&store, &clock(), &req).await.unwrap();
        assert_eq!(outcome.adjustment.admin_email, COMMISSIONER);
    }

    #[tokio::test]
    async fn test_unscored_row_keeps_old_usage() {
        let store = league().with_lineup_entry(LineupEntry::unscored("T001", 1, 1));
        adjust_lineup(&store, &clock(), &request(1, 5, 9))
            .await
            .unwrap();

        let state = store.snapshot().await;
        assert_eq!(state.roster_slot(1, 1).unwrap().times_used, 3);
        assert_eq!(state.roster_slot(1, 5).unwrap().times_used, 3);
        assert_eq!(state.adjustments[0].old_points, None);
        assert_standings_consistent(&store).await;
    }

    #[tokio::test]
    async fn test_requires_commissioner() {
        let store = scored_lineup();
        let mut req = request(3, 6, 5);
        req.admin_email = OWNER.into();
        assert!(matches!(
            adjust_lineup(&store, &clock(), &req).await,
            Err(LeagueError::Unauthorized(_))
        ));
        assert!(store.snapshot().await.adjustments.is_empty());
    }

    #[tokio::test]
    async fn test_new_slot_must_be_on_roster() {
        let store = scored_lineup();
        assert!(matches!(
            adjust_lineup(&store, &clock(), &request(3, 9, 5)).await,
            Err(LeagueError::InvalidSelection(SelectionError::SlotNotOnRoster(9)))
        ));
    }

    #[tokio::test]
    async fn test_new_slot_at_cap_is_rejected() {
        let store = scored_lineup();
        let err = adjust_lineup(&store, &clock(), &request(3, 2, 5))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LeagueError::SlotExhausted {
                slot: 2,
                times_used: 8
            }
        ));
        assert!(err.to_string().contains("maximum 8 uses"));
    }

    #[tokio::test]
    async fn test_missing_old_entry_is_not_found() {
        let store = scored_lineup();
        assert!(matches!(
            adjust_lineup(&store, &clock(), &request(4, 6, 5)).await,
            Err(LeagueError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_new_slot_already_in_lineup_is_rejected() {
        let store = scored_lineup();
        assert!(matches!(
            adjust_lineup(&store, &clock(), &request(3, 1, 5)).await,
            Err(LeagueError::InvalidSelection(SelectionError::DuplicateSlot(1)))
        ));
    }

    #[tokio::test]
    async fn test_failure_after_usage_changes_rolls_back() {
        let store = scored_lineup();
        // Delete, insert, decrement, increment, then fail on the audit row.
        store.fail_on_write(4).await;

        assert!(matches!(
            adjust_lineup(&store, &clock(), &request(3, 6, 5)).await,
            Err(LeagueError::Storage(_))
        ));

        let state = store.snapshot().await;
        assert_eq!(state.lineup_slots("T001", 1), vec![1, 3]);
        assert_eq!(state.roster_slot(1, 3).unwrap().times_used, 1);
        assert_eq!(state.roster_slot(1, 6).unwrap().times_used, 4);
        assert!(state.adjustments.is_empty());
    }

    #[tokio::test]
    async fn test_history_lists_adjustments_for_tournament() {
        let store = scored_lineup();
        adjust_lineup(&store, &clock(), &request(3, 6, 5))
            .await
            .unwrap();
        adjust_lineup(&store, &clock(), &request(6, 4, 7))
            .await
            .unwrap();

        let history = adjustment_history(&store, "T001").await.unwrap();
        assert_eq!(
            history
                .iter()
                .map(|a| (a.old_slot, a.new_slot))
                .collect::<Vec<_>>(),
            vec![(3, 6), (6, 4)]
        );
        assert!(adjustment_history(&store, "T002").await.unwrap().is_empty());
        assert!(matches!(
            adjustment_history(&store, "T404").await,
            Err(LeagueError::NotFound(_))
        ));
    }
}
