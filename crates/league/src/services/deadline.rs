//! When a tournament stops taking lineups.
//!
//! Deadlines are stored as naive wall-clock times that mean US Eastern.
//! Rather than guessing an offset for the stored value, "now" is converted
//! into Eastern local time (daylight saving included) and the two naive
//! values are compared directly.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::models::{Tournament, TournamentStatus};

/// The league's home timezone.
pub const LEAGUE_TIMEZONE: Tz = chrono_tz::America::New_York;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// `now` as an Eastern wall-clock time, truncated to whole seconds.
pub fn league_local(now: DateTime<Utc>) -> NaiveDateTime {
    let local = now.with_timezone(&LEAGUE_TIMEZONE).naive_local();
    local.with_nanosecond(0).unwrap_or(local)
}

pub fn is_deadline_passed(deadline: NaiveDateTime, now: DateTime<Utc>) -> bool {
    deadline < league_local(now)
}

/// A tournament refuses submissions once it is no longer open or its
/// deadline has passed, whichever comes first.
pub fn is_locked(tournament: &Tournament, now: DateTime<Utc>) -> bool {
    tournament.status != TournamentStatus::Open || is_deadline_passed(tournament.deadline, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, mi, s))
            .unwrap()
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn tournament(status: TournamentStatus) -> Tournament {
        Tournament {
            tournament_id: "T001".into(),
            name: "Genesis".into(),
            deadline: naive(2026, 2, 18, 23, 59, 0),
            status,
        }
    }

    #[test]
    fn test_winter_deadline_uses_eastern_standard_time() {
        // 23:59 EST is 04:59 UTC the next day.
        let deadline = naive(2026, 2, 18, 23, 59, 0);
        assert!(!is_deadline_passed(deadline, utc(2026, 2, 19, 4, 58, 59)));
        assert!(is_deadline_passed(deadline, utc(2026, 2, 19, 4, 59, 1)));
    }

    #[test]
    fn test_summer_deadline_uses_eastern_daylight_time() {
        // 23:59 EDT is 03:59 UTC the next day.
        let deadline = naive(2026, 7, 15, 23, 59, 0);
        assert!(!is_deadline_passed(deadline, utc(2026, 7, 16, 3, 58, 0)));
        assert!(is_deadline_passed(deadline, utc(2026, 7, 16, 3, 59, 30)));
    }

    #[test]
    fn test_deadline_is_not_read_as_utc() {
        // Five hours after a naive-UTC reading would already have locked.
        let deadline = naive(2026, 2, 18, 23, 59, 0);
        assert!(!is_deadline_passed(deadline, utc(2026, 2, 19, 0, 30, 0)));
    }

    #[test]
    fn test_exact_deadline_second_is_still_open() {
        let deadline = naive(2026, 2, 18, 23, 59, 0);
        let at_deadline = utc(2026, 2, 19, 4, 59, 0) + chrono::Duration::milliseconds(500);
        assert!(!is_deadline_passed(deadline, at_deadline));
    }

    #[test]
    fn test_status_locks_before_deadline() {
        let before = utc(2026, 2, 18, 12, 0, 0);
        assert!(!is_locked(&tournament(TournamentStatus::Open), before));
        assert!(is_locked(&tournament(TournamentStatus::Locked), before));
        assert!(is_locked(&tournament(TournamentStatus::Closed), before));
    }

    #[test]
    fn test_open_tournament_locks_after_deadline() {
        let after = utc(2026, 2, 20, 12, 0, 0);
        assert!(is_locked(&tournament(TournamentStatus::Open), after));
    }

    #[test]
    fn test_fixed_clock_returns_its_instant() {
        let instant = utc(2026, 3, 1, 9, 0, 0);
        assert_eq!(FixedClock(instant).now(), instant);
    }
}
