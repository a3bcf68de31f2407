use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::models::{
    COMMISSIONER_EMAILS_KEY, Golfer, LineupEntry, RosterSlot, Team, Tournament, TournamentStatus,
};
use crate::repository::MemoryStore;
use crate::services::FixedClock;

pub const COMMISSIONER: &str = "boss@league.org";
pub const OWNER: &str = "one@example.com";

pub fn deadline(month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, month, day)
        .and_then(|d| d.and_hms_opt(23, 59, 0))
        .unwrap()
}

pub fn utc(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, month, day, hour, 0, 0).unwrap()
}

/// Monday 2026-01-12, before the T002 deadline.
pub fn clock() -> FixedClock {
    FixedClock(utc(1, 12, 12))
}

fn tournament(id: &str, name: &str, deadline: NaiveDateTime, status: TournamentStatus) -> Tournament {
    Tournament {
        tournament_id: id.to_string(),
        name: name.to_string(),
        deadline,
        status,
    }
}

/// Two teams, a commissioner, and four tournaments whose id order differs
/// from their deadline order.
///
/// Team 1 slots 1..=6 have `times_used` 3, 8, 0, 5, 2, 4. Team 2 slots
/// 1..=5 are unused. Golfers 900 and 901 are free agents.
pub fn league() -> MemoryStore {
    let mut store = MemoryStore::default()
        .with_config(COMMISSIONER_EMAILS_KEY, "Boss@League.org, deputy@league.org")
        .with_team(Team {
            team_id: 1,
            team_name: "Birdies".into(),
            owner_email: "One@Example.com".into(),
        })
        .with_team(Team {
            team_id: 2,
            team_name: "Bogeys".into(),
            owner_email: "two@example.com".into(),
        })
        .with_tournament(tournament("T010", "Sentry", deadline(1, 1), TournamentStatus::Closed))
        .with_tournament(tournament("T001", "Sony Open", deadline(1, 8), TournamentStatus::Closed))
        .with_tournament(tournament("T002", "American Express", deadline(1, 15), TournamentStatus::Open))
        .with_tournament(tournament("T003", "Farmers", deadline(1, 22), TournamentStatus::Open));

    for (golfer_id, name) in [
        (101, "Scheffler"),
        (102, "McIlroy"),
        (103, "Schauffele"),
        (104, "Morikawa"),
        (105, "Aberg"),
        (106, "Fleetwood"),
        (201, "Rahm"),
        (202, "Hovland"),
        (203, "Cantlay"),
        (204, "Homa"),
        (205, "Burns"),
        (900, "Bhatia"),
        (901, "Young"),
    ] {
        store = store.with_golfer(Golfer {
            golfer_id,
            name: name.into(),
        });
    }

    for (slot, times_used) in [3, 8, 0, 5, 2, 4].into_iter().enumerate() {
        let slot = slot as i32 + 1;
        store = store.with_roster_slot(RosterSlot {
            team_id: 1,
            slot,
            golfer_id: 100 + slot,
            times_used,
        });
    }

    for slot in 1..=5 {
        store = store.with_roster_slot(RosterSlot {
            team_id: 2,
            slot,
            golfer_id: 200 + slot,
            times_used: 0,
        });
    }

    store
}

pub fn scored(tournament_id: &str, team_id: i32, slot: i32, points: i32) -> LineupEntry {
    LineupEntry {
        fedex_points: Some(points),
        ..LineupEntry::unscored(tournament_id, team_id, slot)
    }
}

/// Cached standings must match the live lineup sums for every team.
pub async fn assert_standings_consistent(store: &MemoryStore) {
    let state = store.snapshot().await;
    for team_id in state.teams.keys() {
        assert_eq!(
            state.standing(*team_id).unwrap_or(0),
            state.live_total(*team_id),
            "standing for team {team_id} is stale"
        );
    }
}
