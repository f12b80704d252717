//! User API endpoints.

use axum::extract::{Path, State};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::User;
use crate::AppState;

/// GET /api/users - List all loaded users.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let (store, _warnings) = state.viewable_store().await?;
    success(store.users().to_vec())
}

/// GET /api/users/:id - Get a single user.
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<User> {
    let (store, _warnings) = state.viewable_store().await?;

    match store.get_user_by_id(&id) {
        Some(user) => success(user.clone()),
        None => Err(AppError::NotFound(format!("User {} not found", id))),
    }
}
