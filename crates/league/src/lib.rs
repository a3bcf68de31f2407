pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use error::{LeagueError, LeagueResult, SelectionError, StorageError};
pub use repository::{Database, LeagueStore, LeagueWrite, MemoryStore, PgLeagueStore};
pub use services::{Clock, FixedClock, SystemClock};
