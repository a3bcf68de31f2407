use async_trait::async_trait;
use sqlx::postgres::{PgConnection, PgPoolOptions};
use sqlx::PgPool;

use super::{LeagueStore, LeagueWrite};
use crate::error::{Result, StorageError};
use crate::models::{
    AdminAdjustment, Golfer, LineupEntry, RosterSlot, Standing, Team, Tournament, TournamentRow,
    WaiverLogEntry,
};

/// Owns the connection pool and the schema migrations.
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn store(&self) -> PgLeagueStore<'_> {
        PgLeagueStore::new(&self.pool)
    }
}

/// [`LeagueStore`] backed by Postgres.
pub struct PgLeagueStore<'a> {
    pool: &'a PgPool,
}

impl<'a> PgLeagueStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeagueStore for PgLeagueStore<'_> {
    async fn find_team(&self, team_id: i32) -> Result<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, team_name, owner_email
            FROM teams
            WHERE team_id = $1
            "#,
        )
        .bind(team_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(team)
    }

    async fn list_teams(&self) -> Result<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, team_name, owner_email
            FROM teams
            ORDER BY team_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(teams)
    }

    async fn find_golfer(&self, golfer_id: i32) -> Result<Option<Golfer>> {
        let golfer = sqlx::query_as::<_, Golfer>(
            "SELECT golfer_id, name FROM golfers WHERE golfer_id = $1",
        )
        .bind(golfer_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(golfer)
    }

    async fn list_golfers(&self) -> Result<Vec<Golfer>> {
        let golfers =
            sqlx::query_as::<_, Golfer>("SELECT golfer_id, name FROM golfers ORDER BY golfer_id")
                .fetch_all(self.pool)
                .await?;

        Ok(golfers)
    }

    async fn roster(&self, team_id: i32) -> Result<Vec<RosterSlot>> {
        let roster = sqlx::query_as::<_, RosterSlot>(
            r#"
            SELECT team_id, slot, golfer_id, times_used
            FROM rosters
            WHERE team_id = $1
            ORDER BY slot
            "#,
        )
        .bind(team_id)
        .fetch_all(self.pool)
        .await?;

        Ok(roster)
    }

    async fn all_roster_slots(&self) -> Result<Vec<RosterSlot>> {
        let slots = sqlx::query_as::<_, RosterSlot>(
            r#"
            SELECT team_id, slot, golfer_id, times_used
            FROM rosters
            ORDER BY team_id, slot
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(slots)
    }

    async fn find_tournament(&self, tournament_id: &str) -> Result<Option<Tournament>> {
        sqlx::query_as::<_, TournamentRow>(
            r#"
            SELECT tournament_id, name, deadline, status
            FROM tournaments
            WHERE tournament_id = $1
            "#,
        )
        .bind(tournament_id)
        .fetch_optional(self.pool)
        .await?
        .map(Tournament::try_from)
        .transpose()
    }

    async fn list_tournaments(&self) -> Result<Vec<Tournament>> {
        let rows = sqlx::query_as::<_, TournamentRow>(
            r#"
            SELECT tournament_id, name, deadline, status
            FROM tournaments
            ORDER BY deadline, tournament_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Tournament::try_from).collect()
    }

    async fn lineup(&self, tournament_id: &str, team_id: i32) -> Result<Vec<LineupEntry>> {
        let entries = sqlx::query_as::<_, LineupEntry>(
            r#"
            SELECT tournament_id, team_id, slot, fedex_points, admin_note
            FROM lineups
            WHERE tournament_id = $1 AND team_id = $2
            ORDER BY slot
            "#,
        )
        .bind(tournament_id)
        .bind(team_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    async fn tournament_lineups(&self, tournament_id: &str) -> Result<Vec<LineupEntry>> {
        let entries = sqlx::query_as::<_, LineupEntry>(
            r#"
            SELECT tournament_id, team_id, slot, fedex_points, admin_note
            FROM lineups
            WHERE tournament_id = $1
            ORDER BY team_id, slot
            "#,
        )
        .bind(tournament_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    async fn standings(&self) -> Result<Vec<Standing>> {
        let standings = sqlx::query_as::<_, Standing>(
            "SELECT team_id, total_points FROM standings ORDER BY team_id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(standings)
    }

    async fn config_value(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM config WHERE key = $1")
            .bind(key)
            .fetch_optional(self.pool)
            .await?;

        Ok(value)
    }

    async fn waiver_log(&self) -> Result<Vec<WaiverLogEntry>> {
        let entries = sqlx::query_as::<_, WaiverLogEntry>(
            r#"
            SELECT timestamp, team_id, dropped_golfer, added_golfer, slot
            FROM waiver_log
            ORDER BY timestamp DESC, waiver_id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    async fn adjustments(&self, tournament_id: &str) -> Result<Vec<AdminAdjustment>> {
        let adjustments = sqlx::query_as::<_, AdminAdjustment>(
            r#"
            SELECT timestamp, tournament_id, team_id, old_slot, new_slot,
                   old_points, new_points, note, admin_email
            FROM admin_adjustments
            WHERE tournament_id = $1
            ORDER BY timestamp, adjustment_id
            "#,
        )
        .bind(tournament_id)
        .fetch_all(self.pool)
        .await?;

        Ok(adjustments)
    }

    async fn apply(&self, writes: Vec<LeagueWrite>) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for write in &writes {
            let affected = execute_write(&mut *tx, write).await?;
            write.verify(affected)?;
        }

        // An early return above drops `tx`, which rolls it back.
        tx.commit().await?;
        Ok(())
    }
}

async fn execute_write(conn: &mut PgConnection, write: &LeagueWrite) -> Result<u64> {
    let result = match write {
        LeagueWrite::ClearLineup {
            tournament_id,
            team_id,
        } => {
            sqlx::query("DELETE FROM lineups WHERE tournament_id = $1 AND team_id = $2")
                .bind(tournament_id)
                .bind(team_id)
                .execute(&mut *conn)
                .await?
        }
        LeagueWrite::InsertLineupEntry(entry) => sqlx::query(
            r#"
            INSERT INTO lineups (tournament_id, team_id, slot, fedex_points, admin_note)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&entry.tournament_id)
        .bind(entry.team_id)
        .bind(entry.slot)
        .bind(entry.fedex_points)
        .bind(&entry.admin_note)
        .execute(&mut *conn)
        .await
        .map_err(|e| constraint_violation(e, "Lineup slot already taken or not on roster"))?,
        LeagueWrite::DeleteLineupEntry {
            tournament_id,
            team_id,
            slot,
        } => {
            sqlx::query(
                "DELETE FROM lineups WHERE tournament_id = $1 AND team_id = $2 AND slot = $3",
            )
            .bind(tournament_id)
            .bind(team_id)
            .bind(slot)
            .execute(&mut *conn)
            .await?
        }
        LeagueWrite::SetPoints {
            tournament_id,
            team_id,
            slot,
            previous,
            points,
        } => {
            sqlx::query(
                r#"
                UPDATE lineups
                SET fedex_points = $4
                WHERE tournament_id = $1 AND team_id = $2 AND slot = $3
                  AND fedex_points IS NOT DISTINCT FROM $5
                "#,
            )
            .bind(tournament_id)
            .bind(team_id)
            .bind(slot)
            .bind(points)
            .bind(previous)
            .execute(&mut *conn)
            .await?
        }
        LeagueWrite::IncrementUsage { team_id, slot } => {
            sqlx::query(
                "UPDATE rosters SET times_used = times_used + 1 WHERE team_id = $1 AND slot = $2",
            )
            .bind(team_id)
            .bind(slot)
            .execute(&mut *conn)
            .await?
        }
        LeagueWrite::DecrementUsage { team_id, slot } => {
            sqlx::query(
                r#"
                UPDATE rosters
                SET times_used = GREATEST(times_used - 1, 0)
                WHERE team_id = $1 AND slot = $2
                "#,
            )
            .bind(team_id)
            .bind(slot)
            .execute(&mut *conn)
            .await?
        }
        LeagueWrite::AppendAdjustment(adjustment) => {
            sqlx::query(
                r#"
                INSERT INTO admin_adjustments (
                    timestamp, tournament_id, team_id, old_slot, new_slot,
                    old_points, new_points, note, admin_email
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(adjustment.timestamp)
            .bind(&adjustment.tournament_id)
            .bind(adjustment.team_id)
            .bind(adjustment.old_slot)
            .bind(adjustment.new_slot)
            .bind(adjustment.old_points)
            .bind(adjustment.new_points)
            .bind(&adjustment.note)
            .bind(&adjustment.admin_email)
            .execute(&mut *conn)
            .await?
        }
        LeagueWrite::SwapGolfer {
            team_id,
            slot,
            golfer_id,
        } => sqlx::query(
            r#"
            UPDATE rosters
            SET golfer_id = $3, times_used = 0
            WHERE team_id = $1 AND slot = $2
            "#,
        )
        .bind(team_id)
        .bind(slot)
        .bind(golfer_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| constraint_violation(e, "Golfer does not exist"))?,
        LeagueWrite::AppendWaiver(entry) => {
            sqlx::query(
                r#"
                INSERT INTO waiver_log (timestamp, team_id, dropped_golfer, added_golfer, slot)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(entry.timestamp)
            .bind(entry.team_id)
            .bind(&entry.dropped_golfer)
            .bind(&entry.added_golfer)
            .bind(entry.slot)
            .execute(&mut *conn)
            .await?
        }
        LeagueWrite::InsertTournament(tournament) => sqlx::query(
            r#"
            INSERT INTO tournaments (tournament_id, name, deadline, status)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&tournament.tournament_id)
        .bind(&tournament.name)
        .bind(tournament.deadline)
        .bind(tournament.status.as_str())
        .execute(&mut *conn)
        .await
        .map_err(|e| constraint_violation(e, "Tournament id already exists"))?,
        LeagueWrite::UpdateTournament(tournament) => {
            sqlx::query(
                r#"
                UPDATE tournaments
                SET name = $2, deadline = $3, status = $4
                WHERE tournament_id = $1
                "#,
            )
            .bind(&tournament.tournament_id)
            .bind(&tournament.name)
            .bind(tournament.deadline)
            .bind(tournament.status.as_str())
            .execute(&mut *conn)
            .await?
        }
        LeagueWrite::RecomputeStandings => {
            sqlx::query(
                r#"
                INSERT INTO standings (team_id, total_points)
                SELECT t.team_id, COALESCE(SUM(l.fedex_points), 0)::INTEGER
                FROM teams t
                LEFT JOIN lineups l ON l.team_id = t.team_id
                GROUP BY t.team_id
                ON CONFLICT (team_id) DO UPDATE SET total_points = EXCLUDED.total_points
                "#,
            )
            .execute(&mut *conn)
            .await?
        }
    };

    Ok(result.rows_affected())
}

fn constraint_violation(error: sqlx::Error, message: &str) -> StorageError {
    let error = StorageError::from(error);
    if error.is_unique_violation() || error.is_foreign_key_violation() {
        StorageError::ConstraintViolation(message.to_string())
    } else {
        error
    }
}
