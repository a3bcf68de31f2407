use tracing::warn;

use crate::dto::team::Identity;
use crate::error::{LeagueError, LeagueResult};
use crate::models::{COMMISSIONER_EMAILS_KEY, Commissioners, commissioner::normalize_email};
use crate::repository::LeagueStore;

/// Loads the commissioner allow-list from the league config.
pub async fn commissioners(store: &dyn LeagueStore) -> LeagueResult<Commissioners> {
    let emails = store
        .config_value(COMMISSIONER_EMAILS_KEY)
        .await?
        .unwrap_or_default();

    Ok(Commissioners::from_comma_separated(&emails))
}

pub async fn is_commissioner(store: &dyn LeagueStore, email: &str) -> LeagueResult<bool> {
    Ok(commissioners(store).await?.contains(email))
}

pub async fn require_commissioner(store: &dyn LeagueStore, email: &str) -> LeagueResult<()> {
    if is_commissioner(store, email).await? {
        Ok(())
    } else {
        warn!(email = %normalize_email(email), "Rejected commissioner-only operation");
        Err(LeagueError::Unauthorized(normalize_email(email)))
    }
}

/// Finds the team owned by `email` and whether it is a commissioner's.
pub async fn identify(store: &dyn LeagueStore, email: &str) -> LeagueResult<Identity> {
    if email.trim().is_empty() {
        return Err(LeagueError::Invalid("Email is required".to_string()));
    }

    let team = store
        .list_teams()
        .await?
        .into_iter()
        .find(|team| team.owned_by(email))
        .ok_or_else(|| LeagueError::NotFound(format!("Team for {}", normalize_email(email))))?;

    let is_commissioner = is_commissioner(store, email).await?;

    Ok(Identity {
        team,
        is_commissioner,
    })
}
