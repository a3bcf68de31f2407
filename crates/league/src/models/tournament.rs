use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::StorageError;

/// Commissioner-set lifecycle state of a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    Open,
    Locked,
    Closed,
}

impl TournamentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Locked => "locked",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TournamentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "locked" => Ok(Self::Locked),
            "closed" => Ok(Self::Closed),
            other => Err(format!("unknown tournament status '{other}'")),
        }
    }
}

/// A tournament as the league services see it.
///
/// `deadline` is a naive wall-clock time in the league's home timezone
/// (US Eastern). It carries no offset on purpose: see
/// [`crate::services::deadline`] for how it is compared against "now".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Tournament {
    pub tournament_id: String,
    pub name: String,
    pub deadline: NaiveDateTime,
    pub status: TournamentStatus,
}

/// Raw `tournaments` row, validated into a [`Tournament`] at the store boundary.
#[derive(Debug, Clone, FromRow)]
pub struct TournamentRow {
    pub tournament_id: String,
    pub name: String,
    pub deadline: NaiveDateTime,
    pub status: String,
}

impl TryFrom<TournamentRow> for Tournament {
    type Error = StorageError;

    fn try_from(row: TournamentRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|e| {
            StorageError::Corrupt(format!("tournament {}: {}", row.tournament_id, e))
        })?;

        Ok(Self {
            tournament_id: row.tournament_id,
            name: row.name,
            deadline: row.deadline,
            status,
        })
    }
}

/// Parses a deadline as typed by a commissioner.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS]`, with either `T` or a space between
/// date and time. Anything after the seconds (fractions, offsets) is
/// ignored: deadlines are always Eastern wall-clock times.
pub fn parse_deadline(input: &str) -> Option<NaiveDateTime> {
    let normalized = input.trim().replacen(' ', "T", 1);
    let head = normalized.get(..19).unwrap_or(&normalized);

    NaiveDateTime::parse_from_str(head, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(head, "%Y-%m-%dT%H:%M"))
        .ok()
}
