use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::instrument;

use super::api::{parse_param, ApiError, ApiResult, ApiState};
use crate::models::{
    Account, AccountType, DashboardResponse, Profile, ProfileSettings, ProfileSettingsPage,
    RegistrationForm,
};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    #[serde(alias = "accountType")]
    pub account_type: Option<String>,
}

/// Sign-up; the password never appears in the response
#[instrument(name = "register", skip(state, form), fields(user_type = %form.user_type))]
pub async fn register(
    State(state): State<ApiState>,
    Json(form): Json<RegistrationForm>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    state
        .traced("registration", state.account_service.register(form))
        .await
        .map(|account| (StatusCode::CREATED, account))
}

#[instrument(name = "get_profile", skip(state), fields(profile_id = %profile_id))]
pub async fn get_profile(
    State(state): State<ApiState>,
    Path(profile_id): Path<String>,
) -> ApiResult<Profile> {
    state
        .traced("get_profile", state.account_service.get_profile(&profile_id))
        .await
}

#[instrument(name = "dashboard", skip(state), fields(account_type = query.account_type.as_deref()))]
pub async fn dashboard(
    State(state): State<ApiState>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<DashboardResponse> {
    let account_type: AccountType = parse_param(query.account_type.as_deref())?;

    state
        .traced("dashboard", state.account_service.dashboard(account_type))
        .await
}

#[instrument(name = "get_settings", skip(state))]
pub async fn get_settings(State(state): State<ApiState>) -> ApiResult<ProfileSettingsPage> {
    state
        .traced("profile_settings", state.account_service.settings())
        .await
}

#[instrument(name = "update_settings", skip(state, settings))]
pub async fn update_settings(
    State(state): State<ApiState>,
    Json(settings): Json<ProfileSettings>,
) -> ApiResult<ProfileSettings> {
    state
        .traced("profile_settings_update", state.account_service.update_settings(settings))
        .await
}
