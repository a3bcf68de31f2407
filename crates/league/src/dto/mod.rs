pub mod adjustment;
pub mod carryover;
pub mod lineup;
pub mod results;
pub mod standings;
pub mod team;
pub mod tournament;
pub mod waiver;
