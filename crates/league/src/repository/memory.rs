use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{LeagueStore, LeagueWrite};
use crate::error::{Result, StorageError};
use crate::models::{
    AdminAdjustment, Golfer, LineupEntry, RosterSlot, Standing, Team, Tournament, WaiverLogEntry,
};

/// Everything a league keeps, held in plain maps.
#[derive(Debug, Clone, Default)]
pub struct LeagueState {
    pub teams: BTreeMap<i32, Team>,
    pub golfers: BTreeMap<i32, Golfer>,
    pub rosters: BTreeMap<(i32, i32), RosterSlot>,
    pub tournaments: BTreeMap<String, Tournament>,
    pub lineups: BTreeMap<(String, i32, i32), LineupEntry>,
    pub standings: BTreeMap<i32, i32>,
    pub waiver_log: Vec<WaiverLogEntry>,
    pub adjustments: Vec<AdminAdjustment>,
    pub config: HashMap<String, String>,
}

impl LeagueState {
    pub fn roster_slot(&self, team_id: i32, slot: i32) -> Option<&RosterSlot> {
        self.rosters.get(&(team_id, slot))
    }

    pub fn lineup_slots(&self, tournament_id: &str, team_id: i32) -> Vec<i32> {
        self.lineups
            .values()
            .filter(|l| l.tournament_id == tournament_id && l.team_id == team_id)
            .map(|l| l.slot)
            .collect()
    }

    /// Live sum of a team's points across every tournament.
    pub fn live_total(&self, team_id: i32) -> i32 {
        self.lineups
            .values()
            .filter(|l| l.team_id == team_id)
            .map(LineupEntry::points)
            .sum()
    }

    pub fn standing(&self, team_id: i32) -> Option<i32> {
        self.standings.get(&team_id).copied()
    }

    fn execute(&mut self, write: &LeagueWrite) -> Result<u64> {
        let affected = match write {
            LeagueWrite::ClearLineup {
                tournament_id,
                team_id,
            } => {
                let before = self.lineups.len();
                self.lineups
                    .retain(|(t, team, _), _| !(t == tournament_id && team == team_id));
                (before - self.lineups.len()) as u64
            }
            LeagueWrite::InsertLineupEntry(entry) => {
                let key = (entry.tournament_id.clone(), entry.team_id, entry.slot);
                if self.lineups.contains_key(&key) {
                    return Err(StorageError::ConstraintViolation(
                        "Lineup slot already taken or not on roster".to_string(),
                    ));
                }
                if !self.rosters.contains_key(&(entry.team_id, entry.slot))
                    || !self.tournaments.contains_key(&entry.tournament_id)
                {
                    return Err(StorageError::ConstraintViolation(
                        "Lineup slot already taken or not on roster".to_string(),
                    ));
                }
                self.lineups.insert(key, entry.clone());
                1
            }
            LeagueWrite::DeleteLineupEntry {
                tournament_id,
                team_id,
                slot,
            } => self
                .lineups
                .remove(&(tournament_id.clone(), *team_id, *slot))
                .map_or(0, |_| 1),
            LeagueWrite::SetPoints {
                tournament_id,
                team_id,
                slot,
                previous,
                points,
            } => match self.lineups.get_mut(&(tournament_id.clone(), *team_id, *slot)) {
                Some(entry) if entry.fedex_points == *previous => {
                    entry.fedex_points = Some(*points);
                    1
                }
                _ => 0,
            },
            LeagueWrite::IncrementUsage { team_id, slot } => {
                match self.rosters.get_mut(&(*team_id, *slot)) {
                    Some(roster_slot) => {
                        roster_slot.times_used += 1;
                        1
                    }
                    None => 0,
                }
            }
            LeagueWrite::DecrementUsage { team_id, slot } => {
                match self.rosters.get_mut(&(*team_id, *slot)) {
                    Some(roster_slot) => {
                        roster_slot.times_used = (roster_slot.times_used - 1).max(0);
                        1
                    }
                    None => 0,
                }
            }
            LeagueWrite::AppendAdjustment(adjustment) => {
                self.adjustments.push(adjustment.clone());
                1
            }
            LeagueWrite::SwapGolfer {
                team_id,
                slot,
                golfer_id,
            } => {
                if !self.golfers.contains_key(golfer_id) {
                    return Err(StorageError::ConstraintViolation(
                        "Golfer does not exist".to_string(),
                    ));
                }
                match self.rosters.get_mut(&(*team_id, *slot)) {
                    Some(roster_slot) => {
                        roster_slot.golfer_id = *golfer_id;
                        roster_slot.times_used = 0;
                        1
                    }
                    None => 0,
                }
            }
            LeagueWrite::AppendWaiver(entry) => {
                self.waiver_log.push(entry.clone());
                1
            }
            LeagueWrite::InsertTournament(tournament) => {
                if self.tournaments.contains_key(&tournament.tournament_id) {
                    return Err(StorageError::ConstraintViolation(
                        "Tournament id already exists".to_string(),
                    ));
                }
                self.tournaments
                    .insert(tournament.tournament_id.clone(), tournament.clone());
                1
            }
            LeagueWrite::UpdateTournament(tournament) => {
                match self.tournaments.get_mut(&tournament.tournament_id) {
                    Some(existing) => {
                        *existing = tournament.clone();
                        1
                    }
                    None => 0,
                }
            }
            LeagueWrite::RecomputeStandings => {
                let totals: Vec<(i32, i32)> = self
                    .teams
                    .keys()
                    .map(|team_id| (*team_id, self.live_total(*team_id)))
                    .collect();
                let count = totals.len() as u64;
                self.standings.extend(totals);
                count
            }
        };

        Ok(affected)
    }
}

struct Inner {
    state: LeagueState,
    fail_on_write: Option<usize>,
}

/// [`LeagueStore`] kept in process memory.
///
/// A transaction runs against a copy of the state, which is kept only
/// once every write has succeeded. [`MemoryStore::fail_on_write`]
/// arms a one-shot fault for the next transaction.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(LeagueState::default())
    }
}

impl MemoryStore {
    pub fn new(state: LeagueState) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state,
                fail_on_write: None,
            }),
        }
    }

    pub fn with_team(mut self, team: Team) -> Self {
        let state = &mut self.inner.get_mut().state;
        state.standings.entry(team.team_id).or_insert(0);
        state.teams.insert(team.team_id, team);
        self
    }

    pub fn with_golfer(mut self, golfer: Golfer) -> Self {
        self.inner
            .get_mut()
            .state
            .golfers
            .insert(golfer.golfer_id, golfer);
        self
    }

    pub fn with_roster_slot(mut self, slot: RosterSlot) -> Self {
        self.inner
            .get_mut()
            .state
            .rosters
            .insert((slot.team_id, slot.slot), slot);
        self
    }

    pub fn with_tournament(mut self, tournament: Tournament) -> Self {
        self.inner
            .get_mut()
            .state
            .tournaments
            .insert(tournament.tournament_id.clone(), tournament);
        self
    }

    pub fn with_lineup_entry(mut self, entry: LineupEntry) -> Self {
        self.inner.get_mut().state.lineups.insert(
            (entry.tournament_id.clone(), entry.team_id, entry.slot),
            entry,
        );
        self
    }

    pub fn with_config(mut self, key: &str, value: &str) -> Self {
        self.inner
            .get_mut()
            .state
            .config
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Makes the write at `index` of the next transaction fail.
    pub async fn fail_on_write(&self, index: usize) {
        self.inner.lock().await.fail_on_write = Some(index);
    }

    pub async fn snapshot(&self) -> LeagueState {
        self.inner.lock().await.state.clone()
    }
}

#[async_trait]
impl LeagueStore for MemoryStore {
    async fn find_team(&self, team_id: i32) -> Result<Option<Team>> {
        Ok(self.inner.lock().await.state.teams.get(&team_id).cloned())
    }

    async fn list_teams(&self) -> Result<Vec<Team>> {
        Ok(self.inner.lock().await.state.teams.values().cloned().collect())
    }

    async fn find_golfer(&self, golfer_id: i32) -> Result<Option<Golfer>> {
        Ok(self.inner.lock().await.state.golfers.get(&golfer_id).cloned())
    }

    async fn list_golfers(&self) -> Result<Vec<Golfer>> {
        Ok(self.inner.lock().await.state.golfers.values().cloned().collect())
    }

    async fn roster(&self, team_id: i32) -> Result<Vec<RosterSlot>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .state
            .rosters
            .range((team_id, i32::MIN)..=(team_id, i32::MAX))
            .map(|(_, slot)| slot.clone())
            .collect())
    }

    async fn all_roster_slots(&self) -> Result<Vec<RosterSlot>> {
        Ok(self.inner.lock().await.state.rosters.values().cloned().collect())
    }

    async fn find_tournament(&self, tournament_id: &str) -> Result<Option<Tournament>> {
        Ok(self
            .inner
            .lock()
            .await
            .state
            .tournaments
            .get(tournament_id)
            .cloned())
    }

    async fn list_tournaments(&self) -> Result<Vec<Tournament>> {
        let inner = self.inner.lock().await;
        let mut tournaments: Vec<Tournament> = inner.state.tournaments.values().cloned().collect();
        tournaments.sort_by(|a, b| {
            a.deadline
                .cmp(&b.deadline)
                .then_with(|| a.tournament_id.cmp(&b.tournament_id))
        });
        Ok(tournaments)
    }

    async fn lineup(&self, tournament_id: &str, team_id: i32) -> Result<Vec<LineupEntry>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .state
            .lineups
            .values()
            .filter(|l| l.tournament_id == tournament_id && l.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn tournament_lineups(&self, tournament_id: &str) -> Result<Vec<LineupEntry>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .state
            .lineups
            .values()
            .filter(|l| l.tournament_id == tournament_id)
            .cloned()
            .collect())
    }

    async fn standings(&self) -> Result<Vec<Standing>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .state
            .standings
            .iter()
            .map(|(team_id, total_points)| Standing {
                team_id: *team_id,
                total_points: *total_points,
            })
            .collect())
    }

    async fn config_value(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.lock().await.state.config.get(key).cloned())
    }

    async fn waiver_log(&self) -> Result<Vec<WaiverLogEntry>> {
        let inner = self.inner.lock().await;
        Ok(inner.state.waiver_log.iter().rev().cloned().collect())
    }

    async fn adjustments(&self, tournament_id: &str) -> Result<Vec<AdminAdjustment>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .state
            .adjustments
            .iter()
            .filter(|a| a.tournament_id == tournament_id)
            .cloned()
            .collect())
    }

    async fn apply(&self, writes: Vec<LeagueWrite>) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let fail_on_write = inner.fail_on_write.take();
        let mut draft = inner.state.clone();

        for (index, write) in writes.iter().enumerate() {
            if fail_on_write == Some(index) {
                return Err(StorageError::Unavailable(format!(
                    "injected failure at write {index} ({})",
                    write.operation()
                )));
            }
            let affected = draft.execute(write)?;
            write.verify(affected)?;
        }

        inner.state = draft;
        Ok(())
    }
}
