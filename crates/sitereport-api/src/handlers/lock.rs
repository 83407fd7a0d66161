//! Page-lock handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use sitereport_core::error::AppError;
use sitereport_entity::LockFilter;
use sitereport_service::lock::{AcquireLockRequest, LockView};

use crate::dto::request::{ActorQuery, CreateLockRequest, LockAction, LockActionRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/locks
pub async fn list_locks(
    State(state): State<AppState>,
    Query(filter): Query<LockFilter>,
) -> Result<Json<ApiResponse<Vec<LockView>>>, ApiError> {
    let locks = state.lock_service.list(filter).await?;
    Ok(Json(ApiResponse::ok(locks)))
}

/// POST /api/locks
pub async fn acquire_lock(
    State(state): State<AppState>,
    Json(req): Json<CreateLockRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LockView>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let lock = state
        .lock_service
        .acquire(AcquireLockRequest {
            page_id: req.page_id,
            report_id: req.report_id,
            user_id: req.user_id,
            user_name: req.user_name,
            reason: req.reason,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(lock))))
}

/// PUT /api/locks/{id} — extend, release, or force-unlock.
pub async fn act_on_lock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<LockActionRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let data = match req.action {
        LockAction::Extend => {
            let lock = state
                .lock_service
                .extend(id, req.user_id, req.additional_minutes)
                .await?;
            serde_json::to_value(lock).map_err(AppError::from)?
        }
        LockAction::Release => {
            state.lock_service.release(id, req.user_id).await?;
            serde_json::to_value(MessageResponse::new("Lock released"))
                .map_err(AppError::from)?
        }
        LockAction::ForceUnlock => {
            state.lock_service.force_unlock(id, req.user_id).await?;
            serde_json::to_value(MessageResponse::new("Lock force-released"))
                .map_err(AppError::from)?
        }
    };
    Ok(Json(ApiResponse::ok(data)))
}

/// DELETE /api/locks/{id}
pub async fn release_lock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.lock_service.release(id, actor.user_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Lock released"))))
}
