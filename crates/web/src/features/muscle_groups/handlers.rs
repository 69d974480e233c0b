use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{Database, dto::muscle_group::MuscleGroupResponse};

use crate::error::WebResult;

use super::services;

#[utoipa::path(
    get,
    path = "/api/muscle-groups",
    responses(
        (status = 200, description = "List the muscle group catalog", body = Vec<MuscleGroupResponse>)
    ),
    tag = "muscle-groups"
)]
pub async fn list_muscle_groups(State(db): State<Database>) -> WebResult<Response> {
    let groups = services::list_muscle_groups(db.pool()).await?;

    let response: Vec<MuscleGroupResponse> =
        groups.into_iter().map(MuscleGroupResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/muscle-groups/{id}",
    params(
        ("id" = i64, Path, description = "Muscle group ID")
    ),
    responses(
        (status = 200, description = "Muscle group found", body = MuscleGroupResponse),
        (status = 404, description = "Muscle group not found")
    ),
    tag = "muscle-groups"
)]
pub async fn get_muscle_group(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> WebResult<Response> {
    let group = services::get_muscle_group(db.pool(), id).await?;

    Ok(Json(MuscleGroupResponse::from(group)).into_response())
}
