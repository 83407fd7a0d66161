//! User-permissions management handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use sitereport_core::error::AppError;
use sitereport_entity::UserPermissions;

use crate::dto::request::{ActorQuery, UpsertUserRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/users?user_id
pub async fn list_users(
    State(state): State<AppState>,
    Query(actor): Query<ActorQuery>,
) -> Result<Json<ApiResponse<Vec<UserPermissions>>>, ApiError> {
    let users = state.user_service.list(actor.user_id).await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// GET /api/users/{id}?user_id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
) -> Result<Json<ApiResponse<UserPermissions>>, ApiError> {
    let user = state.user_service.get(actor.user_id, id).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/users/{id}?user_id
pub async fn upsert_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
    Json(req): Json<UpsertUserRequest>,
) -> Result<Json<ApiResponse<UserPermissions>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .user_service
        .upsert(
            actor.user_id,
            id,
            sitereport_service::user::UpsertUserRequest {
                user_name: req.user_name,
                role: req.role,
                project_ids: req.project_ids,
                construction_ids: req.construction_ids,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}
