//! Archive bootstrap.
//!
//! Runs the channel and user loads as two tasks, joins both and populates the
//! store according to the configured [`LoadPolicy`]. Pages stay gated on the
//! resulting [`LoadStatus`].

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::config::LoadPolicy;
use crate::errors::AppError;
use crate::loader::{self, DataSource};
use crate::models::{Channel, User};
use crate::AppState;

/// Progress of the initial archive load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum LoadStatus {
    Loading,
    Ready {
        loaded_at: String,
    },
    /// Partial policy only: some lists failed and stay empty
    Degraded {
        loaded_at: String,
        failures: Vec<String>,
    },
    Failed {
        error: String,
    },
}

impl LoadStatus {
    /// Warnings to show alongside store data, or the error state if nothing can be shown.
    pub fn ensure_viewable(&self) -> Result<&[String], AppError> {
        match self {
            LoadStatus::Loading => Err(AppError::NotReady(
                "Archive is still loading".to_string(),
            )),
            LoadStatus::Ready { .. } => Ok(&[]),
            LoadStatus::Degraded { failures, .. } => Ok(failures),
            LoadStatus::Failed { error } => Err(AppError::LoadFailed(error.clone())),
        }
    }
}

/// Load the archive into the store of `state`.
///
/// Under the strict policy the first failure is returned and the store is left
/// untouched. Under the partial policy an error is returned only when both loads fail.
pub async fn load_archive(source: Arc<dyn DataSource>, state: &AppState) -> Result<(), AppError> {
    let team = state.store.read().await.team().clone();
    tracing::info!(
        "Loading archive: {} channels, {} users",
        team.channels.len(),
        team.users.len()
    );

    let channels_task = tokio::spawn({
        let source = Arc::clone(&source);
        let team = team.clone();
        async move { loader::load_channels(source.as_ref(), &team).await }
    });
    let users_task = tokio::spawn({
        let source = Arc::clone(&source);
        async move { loader::load_users(source.as_ref(), &team).await }
    });

    let (channels, users) = tokio::join!(channels_task, users_task);
    let channels = channels.map_err(AppError::from).and_then(|result| result);
    let users = users.map_err(AppError::from).and_then(|result| result);

    populate(state, state.config.load_policy, channels, users).await
}

async fn populate(
    state: &AppState,
    policy: LoadPolicy,
    channels: Result<Vec<Channel>, AppError>,
    users: Result<Vec<User>, AppError>,
) -> Result<(), AppError> {
    match policy {
        LoadPolicy::Strict => match (channels, users) {
            (Ok(channels), Ok(users)) => {
                {
                    let mut store = state.store.write().await;
                    store.set_channels(channels);
                    store.set_users(users);
                }
                mark_ready(state, Vec::new()).await;
                Ok(())
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!("Archive load failed: {}", e);
                *state.status.write().await = LoadStatus::Failed {
                    error: e.to_string(),
                };
                Err(e)
            }
        },
        LoadPolicy::Partial => {
            let mut failures = Vec::new();
            {
                let mut store = state.store.write().await;
                match channels {
                    Ok(channels) => store.set_channels(channels),
                    Err(e) => failures.push(e),
                }
                match users {
                    Ok(users) => store.set_users(users),
                    Err(e) => failures.push(e),
                }
            }

            for failure in &failures {
                tracing::warn!("Archive partially loaded: {}", failure);
            }

            if failures.len() == 2 {
                let error = failures
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                *state.status.write().await = LoadStatus::Failed { error };
                return Err(failures.swap_remove(0));
            }

            mark_ready(state, failures.iter().map(ToString::to_string).collect()).await;
            Ok(())
        }
    }
}

async fn mark_ready(state: &AppState, failures: Vec<String>) {
    let loaded_at = Utc::now().to_rfc3339();
    {
        let store = state.store.read().await;
        tracing::info!(
            "Archive ready: {} channels, {} users",
            store.channels().len(),
            store.users().len()
        );
    }

    *state.status.write().await = if failures.is_empty() {
        LoadStatus::Ready { loaded_at }
    } else {
        LoadStatus::Degraded {
            loaded_at,
            failures,
        }
    };
}
