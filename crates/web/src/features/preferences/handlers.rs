use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::preferences::{PreferencesOptionsResponse, PreferencesRequest, PreferencesResponse},
};
use validator::Validate;

use crate::error::{WebError, WebResult};

use super::services;

fn check_user_id(user_id: i64) -> WebResult<()> {
    if user_id < 1 {
        return Err(WebError::InvalidUserId(user_id));
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/preferences/options",
    responses(
        (status = 200, description = "Allowed values and defaults for every preference", body = PreferencesOptionsResponse)
    ),
    tag = "preferences"
)]
pub async fn get_options() -> Response {
    Json(PreferencesOptionsResponse::default()).into_response()
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/preferences",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Saved preferences, or defaults with persisted = false", body = PreferencesResponse),
        (status = 400, description = "Invalid user ID")
    ),
    tag = "preferences"
)]
pub async fn get_preferences(
    State(db): State<Database>,
    Path(user_id): Path<i64>,
) -> WebResult<Response> {
    check_user_id(user_id)?;

    let response = services::get_preferences(db.pool(), user_id).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/users/{user_id}/preferences",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    request_body = PreferencesRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Preferences created", body = PreferencesResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Preferences already exist for this user")
    ),
    tag = "preferences"
)]
pub async fn create_preferences(
    State(db): State<Database>,
    Path(user_id): Path<i64>,
    Json(req): Json<PreferencesRequest>,
) -> WebResult<Response> {
    check_user_id(user_id)?;
    req.validate()?;

    let prefs = services::create_preferences(db.pool(), user_id, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(PreferencesResponse::new(prefs, true)),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}/preferences",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    request_body = PreferencesRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Preferences updated", body = PreferencesResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No preferences saved for this user")
    ),
    tag = "preferences"
)]
pub async fn update_preferences(
    State(db): State<Database>,
    Path(user_id): Path<i64>,
    Json(req): Json<PreferencesRequest>,
) -> WebResult<Response> {
    check_user_id(user_id)?;
    req.validate()?;

    let prefs = services::update_preferences(db.pool(), user_id, req).await?;

    Ok(Json(PreferencesResponse::new(prefs, true)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}/preferences/upsert",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    request_body = PreferencesRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Preferences created or updated", body = PreferencesResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "preferences"
)]
pub async fn upsert_preferences(
    State(db): State<Database>,
    Path(user_id): Path<i64>,
    Json(req): Json<PreferencesRequest>,
) -> WebResult<Response> {
    check_user_id(user_id)?;
    req.validate()?;

    let prefs = services::upsert_preferences(db.pool(), user_id, req).await?;

    Ok(Json(PreferencesResponse::new(prefs, true)).into_response())
}
