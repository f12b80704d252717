//! Archive loader.
//!
//! Resolves the team manifest into channel and user records. Every record of a
//! set is fetched concurrently and collected in manifest order; the first
//! failure aborts the whole set.

mod source;

pub use source::*;

use futures::future::try_join_all;

use crate::errors::AppError;
use crate::models::{Channel, Team, User};

/// Load and parse the team manifest.
pub async fn load_team<S: DataSource + ?Sized>(source: &S) -> Result<Team, AppError> {
    let raw = source.fetch_team().await?;
    let team: Team = serde_json::from_value(raw)
        .map_err(|e| AppError::MalformedRecord(format!("Team manifest is invalid: {}", e)))?;

    tracing::info!(
        "Team manifest lists {} channels and {} users",
        team.channels.len(),
        team.users.len()
    );
    Ok(team)
}

/// Load every channel listed in the manifest.
pub async fn load_channels<S: DataSource + ?Sized>(
    source: &S,
    team: &Team,
) -> Result<Vec<Channel>, AppError> {
    let channels = try_join_all(team.channels.iter().map(|id| async move {
        let raw = source.fetch_channel(id).await?;
        let channel = Channel::from_value(raw).map_err(|e| with_context(e, "channel", id))?;
        if channel.id() != id {
            tracing::warn!(
                "Channel file {} contains record with id {}; keeping the record id",
                id,
                channel.id()
            );
        }
        tracing::debug!("Loaded channel {}", id);
        Ok::<_, AppError>(channel)
    }))
    .await?;

    tracing::info!("Loaded {} channels", channels.len());
    Ok(channels)
}

/// Load and normalize every user listed in the manifest.
pub async fn load_users<S: DataSource + ?Sized>(
    source: &S,
    team: &Team,
) -> Result<Vec<User>, AppError> {
    let users = try_join_all(team.users.iter().map(|id| async move {
        let raw = source.fetch_user(id).await?;
        let user = User::normalize(raw).map_err(|e| with_context(e, "user", id))?;
        tracing::debug!("Loaded user {} ({})", id, user.display_name);
        Ok::<_, AppError>(user)
    }))
    .await?;

    tracing::info!("Loaded {} users", users.len());
    Ok(users)
}

fn with_context(err: AppError, kind: &str, id: &str) -> AppError {
    match err {
        AppError::MalformedRecord(msg) => {
            AppError::MalformedRecord(format!("{} file {}: {}", kind, id, msg))
        }
        other => other,
    }
}
