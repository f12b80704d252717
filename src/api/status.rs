//! Load status and team manifest endpoints.

use axum::extract::State;

use super::{success, ApiResult};
use crate::bootstrap::LoadStatus;
use crate::models::Team;
use crate::AppState;

/// GET /api/status - Current load status. Available while loading.
pub async fn get_status(State(state): State<AppState>) -> ApiResult<LoadStatus> {
    let status = state.status.read().await.clone();
    success(status)
}

/// GET /api/team - The team manifest.
pub async fn get_team(State(state): State<AppState>) -> ApiResult<Team> {
    let (store, _warnings) = state.viewable_store().await?;
    success(store.team().clone())
}
