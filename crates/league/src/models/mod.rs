pub mod admin_adjustment;
pub mod commissioner;
pub mod golfer;
pub mod lineup;
pub mod roster;
pub mod standing;
pub mod team;
pub mod tournament;
pub mod waiver_log;

pub use admin_adjustment::AdminAdjustment;
pub use commissioner::{COMMISSIONER_EMAILS_KEY, Commissioners};
pub use golfer::Golfer;
pub use lineup::LineupEntry;
pub use roster::{LINEUP_SIZE, MAX_USES, RosterSlot};
pub use standing::Standing;
pub use team::Team;
pub use tournament::{Tournament, TournamentRow, TournamentStatus, parse_deadline};
pub use waiver_log::WaiverLogEntry;
