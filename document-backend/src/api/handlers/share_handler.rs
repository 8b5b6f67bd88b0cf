// document-backend/src/api/handlers/share_handler.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use uuid::Uuid;

use crate::api::dto::document_dto::DocumentDto;
use crate::api::dto::share_dto::{
    AccessSharedRequest, ShareDocumentRequest, ShareDto, SharedDocumentDto,
};
use crate::api::AppState;
use crate::domain::document_access_log_model::Model as DocumentAccessLog;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::types::ApiResponse;

pub async fn share_document_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(document_id): Path<Uuid>,
    Json(payload): Json<ShareDocumentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ShareDto>>)> {
    let share = app_state
        .access_service
        .share(document_id, payload, user.user_id())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Document shared successfully",
            ShareDto::from(share),
        )),
    ))
}

pub async fn revoke_share_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(share_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ShareDto>>> {
    let share = app_state
        .access_service
        .revoke_share(share_id, user.user_id())
        .await?;

    Ok(Json(ApiResponse::success(
        "Share revoked successfully",
        ShareDto::from(share),
    )))
}

/// 共有リンクからのアクセス（認証なし、パスワードは任意のJSONボディ）
pub async fn access_shared_document_handler(
    State(app_state): State<AppState>,
    Path((document_id, token)): Path<(Uuid, String)>,
    payload: Option<Json<AccessSharedRequest>>,
) -> AppResult<Json<ApiResponse<SharedDocumentDto>>> {
    let password = payload.and_then(|Json(request)| request.password);

    let shared = app_state
        .access_service
        .access_shared(document_id, &token, password.as_deref())
        .await?;

    let dto = SharedDocumentDto {
        access_level: shared.share.access_level(),
        expiration_date: shared.share.expiration_date,
        document_version: shared.share.document_version.clone(),
        document: DocumentDto::from(shared.document),
    };

    Ok(Json(ApiResponse::success(
        "Shared document retrieved successfully",
        dto,
    )))
}

pub async fn list_access_logs_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(document_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<DocumentAccessLog>>>> {
    let logs = app_state
        .access_service
        .list_access_logs(document_id)
        .await?;
    let count = logs.len();

    Ok(Json(ApiResponse::success_with_metadata(
        "Access logs retrieved successfully",
        logs,
        json!({ "count": count }),
    )))
}

pub fn share_router(app_state: AppState) -> Router {
    Router::new()
        .route("/documents/{id}/shares", post(share_document_handler))
        .route("/documents/{id}/access-logs", get(list_access_logs_handler))
        .route("/shares/{id}", delete(revoke_share_handler))
        .route(
            "/share/{document_id}/{token}",
            post(access_shared_document_handler),
        )
        .with_state(app_state)
}
