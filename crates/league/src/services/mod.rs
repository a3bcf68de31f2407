pub mod adjustment;
pub mod auth;
pub mod carryover;
pub mod deadline;
pub mod eligibility;
pub mod lineup;
pub mod results;
pub mod standings;
pub mod tournaments;
pub mod waivers;

#[cfg(test)]
pub(crate) mod fixtures;

pub use deadline::{Clock, FixedClock, SystemClock};
pub use eligibility::{SelectionCheck, can_use_slot, default_lineup, validate_lineup_selection};
