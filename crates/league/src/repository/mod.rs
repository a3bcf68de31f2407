pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::{Result, StorageError};
use crate::models::{
    AdminAdjustment, Golfer, LineupEntry, RosterSlot, Standing, Team, Tournament, WaiverLogEntry,
};

pub use memory::{LeagueState, MemoryStore};
pub use postgres::{Database, PgLeagueStore};

/// Persistence interface the league services run against.
///
/// Reads are plain point or range lookups. Every mutation goes through
/// [`LeagueStore::apply`], which runs an ordered list of writes as a single
/// transaction: either all of them are visible afterwards or none are.
#[async_trait]
pub trait LeagueStore: Send + Sync {
    async fn find_team(&self, team_id: i32) -> Result<Option<Team>>;

    async fn list_teams(&self) -> Result<Vec<Team>>;

    async fn find_golfer(&self, golfer_id: i32) -> Result<Option<Golfer>>;

    async fn list_golfers(&self) -> Result<Vec<Golfer>>;

    /// A team's roster ordered by slot.
    async fn roster(&self, team_id: i32) -> Result<Vec<RosterSlot>>;

    /// Every roster slot in the league.
    async fn all_roster_slots(&self) -> Result<Vec<RosterSlot>>;

    async fn find_tournament(&self, tournament_id: &str) -> Result<Option<Tournament>>;

    /// All tournaments ordered by deadline, then id.
    async fn list_tournaments(&self) -> Result<Vec<Tournament>>;

    /// A team's lineup for one tournament ordered by slot.
    async fn lineup(&self, tournament_id: &str, team_id: i32) -> Result<Vec<LineupEntry>>;

    /// Every team's lineup rows for one tournament.
    async fn tournament_lineups(&self, tournament_id: &str) -> Result<Vec<LineupEntry>>;

    async fn standings(&self) -> Result<Vec<Standing>>;

    async fn config_value(&self, key: &str) -> Result<Option<String>>;

    async fn waiver_log(&self) -> Result<Vec<WaiverLogEntry>>;

    async fn adjustments(&self, tournament_id: &str) -> Result<Vec<AdminAdjustment>>;

    /// Runs `writes` in order inside one transaction.
    async fn apply(&self, writes: Vec<LeagueWrite>) -> Result<()>;
}

/// One statement of a [`LeagueStore::apply`] transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeagueWrite {
    /// Drops a team's whole lineup for a tournament.
    ClearLineup { tournament_id: String, team_id: i32 },
    InsertLineupEntry(LineupEntry),
    DeleteLineupEntry {
        tournament_id: String,
        team_id: i32,
        slot: i32,
    },
    /// Sets points on a lineup row, provided it still holds `previous`.
    SetPoints {
        tournament_id: String,
        team_id: i32,
        slot: i32,
        previous: Option<i32>,
        points: i32,
    },
    IncrementUsage { team_id: i32, slot: i32 },
    /// Clamps at zero, since a waiver swap resets the counter.
    DecrementUsage { team_id: i32, slot: i32 },
    AppendAdjustment(AdminAdjustment),
    /// Puts a new golfer in a slot and resets its usage to 0.
    SwapGolfer {
        team_id: i32,
        slot: i32,
        golfer_id: i32,
    },
    AppendWaiver(WaiverLogEntry),
    InsertTournament(Tournament),
    UpdateTournament(Tournament),
    /// Rewrites every team's standing from the live lineup points.
    RecomputeStandings,
}

/// How many rows a write has to touch to count as successful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowExpectation {
    Exactly(u64),
    Any,
}

impl LeagueWrite {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::ClearLineup { .. } => "clear lineup",
            Self::InsertLineupEntry(_) => "insert lineup entry",
            Self::DeleteLineupEntry { .. } => "delete lineup entry",
            Self::SetPoints { .. } => "set points",
            Self::IncrementUsage { .. } => "increment usage",
            Self::DecrementUsage { .. } => "decrement usage",
            Self::AppendAdjustment(_) => "append adjustment",
            Self::SwapGolfer { .. } => "swap golfer",
            Self::AppendWaiver(_) => "append waiver",
            Self::InsertTournament(_) => "insert tournament",
            Self::UpdateTournament(_) => "update tournament",
            Self::RecomputeStandings => "recompute standings",
        }
    }

    pub fn expected_rows(&self) -> RowExpectation {
        match self {
            Self::ClearLineup { .. } | Self::RecomputeStandings => RowExpectation::Any,
            _ => RowExpectation::Exactly(1),
        }
    }

    /// Fails with [`StorageError::RowCountMismatch`] when `actual` is off.
    pub fn verify(&self, actual: u64) -> Result<()> {
        match self.expected_rows() {
            RowExpectation::Exactly(expected) if expected != actual => {
                Err(StorageError::RowCountMismatch {
                    operation: self.operation(),
                    expected,
                    actual,
                })
            }
            _ => Ok(()),
        }
    }
}
