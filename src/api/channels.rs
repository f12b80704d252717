//! Channel API endpoints.

use axum::extract::{Path, State};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::Channel;
use crate::AppState;

/// GET /api/channels - List all loaded channels.
pub async fn list_channels(State(state): State<AppState>) -> ApiResult<Vec<Channel>> {
    let (store, _warnings) = state.viewable_store().await?;
    success(store.channels().to_vec())
}

/// GET /api/channels/:id - Get a single channel.
pub async fn get_channel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Channel> {
    let (store, _warnings) = state.viewable_store().await?;

    match store.get_channel_by_id(&id) {
        Some(channel) => success(channel.clone()),
        None => Err(AppError::NotFound(format!("Channel {} not found", id))),
    }
}
