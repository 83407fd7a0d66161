//! Share CRUD and token access handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use sitereport_entity::ShareSettings;

use crate::dto::request::{ActorQuery, CreateShareRequest, ShareListQuery, UpdateShareRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/shares?report_id&user_id
pub async fn list_shares(
    State(state): State<AppState>,
    Query(query): Query<ShareListQuery>,
) -> Result<Json<ApiResponse<Vec<ShareSettings>>>, ApiError> {
    let shares = state
        .share_service
        .list_for_report(query.report_id, query.user_id)
        .await?;
    Ok(Json(ApiResponse::ok(shares)))
}

/// POST /api/shares
pub async fn create_share(
    State(state): State<AppState>,
    Json(req): Json<CreateShareRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ShareSettings>>), ApiError> {
    let share = state
        .share_service
        .create(sitereport_service::share::CreateShareRequest {
            report_id: req.report_id,
            shared_by: req.user_id,
            shared_with: req.shared_with,
            permissions: req.permissions,
            expires_at: req.expires_at,
            is_public: req.is_public,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(share))))
}

/// GET /api/shares/token/{token} — the token alone is the credential.
pub async fn access_shared(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<ShareSettings>>, ApiError> {
    let share = state.share_service.get_by_token(&token).await?;
    Ok(Json(ApiResponse::ok(share)))
}

/// PUT /api/shares/{id}
pub async fn update_share(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateShareRequest>,
) -> Result<Json<ApiResponse<ShareSettings>>, ApiError> {
    let share = state
        .share_service
        .update(
            id,
            req.user_id,
            sitereport_service::share::UpdateShareRequest {
                shared_with: req.shared_with,
                permissions: req.permissions,
                expires_at: req.expires_at,
                is_public: req.is_public,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(share)))
}

/// DELETE /api/shares/{id}
pub async fn delete_share(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.share_service.delete(id, actor.user_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Share deleted"))))
}
