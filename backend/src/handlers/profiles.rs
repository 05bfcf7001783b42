//! HTTP handlers for profile and navigation-gate endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use shared::Profile;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::account::{AccountDetailsInput, ChangePasswordInput};
use crate::services::profile::{self, DashboardView, ViewAccess};
use crate::AppState;

/// Get a profile by ID
pub async fn get_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> AppResult<Json<Profile>> {
    let profile = state.profiles.get(profile_id).await?;
    Ok(Json(profile))
}

/// Update account details via the persistence collaborator
pub async fn update_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Json(input): Json<AccountDetailsInput>,
) -> AppResult<Json<Profile>> {
    let profile = state
        .accounts
        .update_account_details(profile_id, input)
        .await?;
    Ok(Json(profile))
}

/// Completion summary for the profile progress bar
#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub complete: bool,
    pub percentage: u8,
}

/// Report profile completeness
pub async fn get_completion(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> AppResult<Json<CompletionResponse>> {
    let profile = state.profiles.get(profile_id).await?;
    Ok(Json(CompletionResponse {
        complete: profile::is_complete(&profile),
        percentage: profile::completion_percentage(&profile),
    }))
}

/// Resolve a navigation request against the completeness gate
pub async fn guard_view(
    State(state): State<AppState>,
    Path((profile_id, view)): Path<(Uuid, String)>,
) -> AppResult<Json<ViewAccess>> {
    let requested = DashboardView::from_str(&view).ok_or_else(|| AppError::Validation {
        field: "view".to_string(),
        message: format!("Unknown view: {}", view),
    })?;

    let profile = state.profiles.get(profile_id).await?;
    Ok(Json(profile::guard(requested, &profile)))
}

/// Change the account password
pub async fn change_password(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Json(input): Json<ChangePasswordInput>,
) -> AppResult<Json<Value>> {
    state.accounts.change_password(profile_id, input).await?;
    Ok(Json(json!({ "message": "Password changed" })))
}
