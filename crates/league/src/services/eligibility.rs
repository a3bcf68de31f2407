//! Which roster slots a team may pick, and what it gets when it picks nothing.

use std::collections::{BTreeSet, HashSet};

use crate::error::SelectionError;
use crate::models::{LINEUP_SIZE, RosterSlot};

pub fn can_use_slot(slot: &RosterSlot) -> bool {
    slot.can_use()
}

/// An accepted selection. Fewer than [`LINEUP_SIZE`] slots is allowed but
/// worth telling the owner about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCheck {
    Complete,
    UnderFilled { selected: usize },
}

impl SelectionCheck {
    pub fn warning(&self) -> Option<String> {
        match self {
            Self::Complete => None,
            Self::UnderFilled { selected } => Some(format!(
                "You have only selected {selected} golfer{}. You can select up to {LINEUP_SIZE}.",
                if *selected == 1 { "" } else { "s" }
            )),
        }
    }
}

/// Checks a team's slot selection against its roster.
///
/// The first failing rule wins: empty, too many, duplicate, then for each
/// slot in the order given, not on roster and usage cap.
pub fn validate_lineup_selection(
    selected: &[i32],
    roster: &[RosterSlot],
) -> Result<SelectionCheck, SelectionError> {
    if selected.is_empty() {
        return Err(SelectionError::EmptySelection);
    }

    if selected.len() > LINEUP_SIZE {
        return Err(SelectionError::TooManySelected(selected.len()));
    }

    let mut seen = HashSet::with_capacity(selected.len());
    if let Some(duplicate) = selected.iter().find(|slot| !seen.insert(**slot)) {
        return Err(SelectionError::DuplicateSlot(*duplicate));
    }

    for &slot in selected {
        let roster_slot = roster
            .iter()
            .find(|r| r.slot == slot)
            .ok_or(SelectionError::SlotNotOnRoster(slot))?;

        if !can_use_slot(roster_slot) {
            return Err(SelectionError::SlotExhausted(slot));
        }
    }

    if selected.len() < LINEUP_SIZE {
        Ok(SelectionCheck::UnderFilled {
            selected: selected.len(),
        })
    } else {
        Ok(SelectionCheck::Complete)
    }
}

/// Suggested lineup, ascending by slot.
///
/// Keeps whatever of `previous` is still eligible, then fills up to
/// [`LINEUP_SIZE`] with the lowest-numbered eligible slots not yet taken.
/// With no previous lineup that is simply the lowest eligible slots.
pub fn default_lineup(roster: &[RosterSlot], previous: &[i32]) -> Vec<i32> {
    let eligible: BTreeSet<i32> = roster
        .iter()
        .filter(|slot| can_use_slot(slot))
        .map(|slot| slot.slot)
        .collect();

    let mut selected = BTreeSet::new();
    for slot in previous.iter().filter(|slot| eligible.contains(*slot)) {
        if selected.len() >= LINEUP_SIZE {
            break;
        }
        selected.insert(*slot);
    }

    for slot in &eligible {
        if selected.len() >= LINEUP_SIZE {
            break;
        }
        selected.insert(*slot);
    }

    selected.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAX_USES;

    fn roster(times_used: &[i32]) -> Vec<RosterSlot> {
        times_used
            .iter()
            .enumerate()
            .map(|(i, used)| RosterSlot {
                team_id: 1,
                slot: i as i32 + 1,
                golfer_id: 100 + i as i32,
                times_used: *used,
            })
            .collect()
    }

    fn sample_roster() -> Vec<RosterSlot> {
        roster(&[3, 8, 0, 5, 2])
    }

    #[test]
    fn test_empty_selection_rejected() {
        assert_eq!(
            validate_lineup_selection(&[], &sample_roster()),
            Err(SelectionError::EmptySelection)
        );
    }

    #[test]
    fn test_too_many_selected_rejected() {
        assert_eq!(
            validate_lineup_selection(&[1, 3, 4, 5, 6], &roster(&[0; 6])),
            Err(SelectionError::TooManySelected(5))
        );
    }

    #[test]
    fn test_duplicate_slot_rejected() {
        assert_eq!(
            validate_lineup_selection(&[1, 3, 1], &sample_roster()),
            Err(SelectionError::DuplicateSlot(1))
        );
    }

    #[test]
    fn test_slot_not_on_roster_rejected() {
        assert_eq!(
            validate_lineup_selection(&[1, 9], &sample_roster()),
            Err(SelectionError::SlotNotOnRoster(9))
        );
    }

    #[test]
    fn test_exhausted_slot_rejected() {
        let result = validate_lineup_selection(&[1, 2, 3, 4], &sample_roster());
        assert_eq!(result, Err(SelectionError::SlotExhausted(2)));
        assert!(result.unwrap_err().to_string().contains("Slot 2"));
    }

    #[test]
    fn test_full_valid_selection() {
        assert_eq!(
            validate_lineup_selection(&[1, 3, 4, 5], &sample_roster()),
            Ok(SelectionCheck::Complete)
        );
    }

    #[test]
    fn test_under_filled_selection_warns() {
        let check = validate_lineup_selection(&[3], &sample_roster()).unwrap();
        assert_eq!(check, SelectionCheck::UnderFilled { selected: 1 });
        assert_eq!(
            check.warning().as_deref(),
            Some("You have only selected 1 golfer. You can select up to 4.")
        );
        assert!(SelectionCheck::UnderFilled { selected: 2 }
            .warning()
            .unwrap()
            .contains("2 golfers"));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let roster = sample_roster();
        for selection in [vec![1, 2, 3, 4], vec![1, 3, 4, 5], vec![], vec![3, 3]] {
            assert_eq!(
                validate_lineup_selection(&selection, &roster),
                validate_lineup_selection(&selection, &roster)
            );
        }
    }

    #[test]
    fn test_default_without_previous_skips_capped_slot() {
        assert_eq!(default_lineup(&sample_roster(), &[]), vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_default_carries_previous_and_backfills() {
        assert_eq!(default_lineup(&sample_roster(), &[1, 2, 4, 5]), vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_default_keeps_previous_over_lower_slots() {
        let roster = roster(&[0; 8]);
        assert_eq!(default_lineup(&roster, &[5, 6, 7, 8]), vec![5, 6, 7, 8]);
        assert_eq!(default_lineup(&roster, &[7, 8]), vec![1, 2, 7, 8]);
    }

    #[test]
    fn test_default_ignores_previous_slots_off_roster() {
        assert_eq!(default_lineup(&sample_roster(), &[9, 5]), vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_default_with_small_roster() {
        assert_eq!(default_lineup(&roster(&[0, MAX_USES]), &[]), vec![1]);
        assert!(default_lineup(&[], &[1, 2]).is_empty());
    }

    #[test]
    fn test_default_is_sorted_unique_capped_and_eligible() {
        let rosters = [
            roster(&[0; 10]),
            roster(&[8, 8, 8, 0, 0, 8, 1, 7, 8, 0]),
            roster(&[9, 8]),
            sample_roster(),
        ];
        let previous_lineups: [&[i32]; 5] =
            [&[], &[10, 1], &[2, 2, 3], &[1, 2, 3, 4, 5, 6], &[7, 4]];

        for roster in &rosters {
            for previous in previous_lineups {
                let lineup = default_lineup(roster, previous);
                assert!(lineup.len() <= LINEUP_SIZE);
                assert!(lineup.windows(2).all(|w| w[0] < w[1]));
                for slot in &lineup {
                    let roster_slot = roster.iter().find(|r| r.slot == *slot).unwrap();
                    assert!(can_use_slot(roster_slot));
                }
            }
        }
    }

    #[test]
    fn test_default_without_previous_is_lowest_eligible() {
        let roster = roster(&[8, 0, 8, 0, 0, 0, 0]);
        assert_eq!(default_lineup(&roster, &[]), vec![2, 4, 5, 6]);
    }
}
