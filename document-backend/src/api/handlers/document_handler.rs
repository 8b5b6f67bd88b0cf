// document-backend/src/api/handlers/document_handler.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::document_dto::{
    CreateDocumentRequest, DocumentDto, FilePayload, UpdateDocumentRequest,
};
use crate::api::AppState;
use crate::domain::document_version_model::Model as DocumentVersion;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::types::ApiResponse;

/// ドキュメント作成（ファイルは任意、base64）
pub async fn create_document_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(mut payload): Json<CreateDocumentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<DocumentDto>>)> {
    // ファイルを取り出す前にネストした検証も済ませる
    payload.validate()?;
    let file = payload.file.take().map(FilePayload::decode).transpose()?;

    let document = app_state
        .document_service
        .create_document(payload, file, user.user_id())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Document created successfully",
            DocumentDto::from(document),
        )),
    ))
}

pub async fn get_document_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(document_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<DocumentDto>>> {
    let document = app_state
        .document_service
        .get_document(document_id, user.user_id())
        .await?;

    Ok(Json(ApiResponse::success(
        "Document retrieved successfully",
        DocumentDto::from(document),
    )))
}

/// 部分更新。ファイル付きまたは is_new_version=true で新バージョン
pub async fn update_document_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(document_id): Path<Uuid>,
    Json(mut payload): Json<UpdateDocumentRequest>,
) -> AppResult<Json<ApiResponse<DocumentDto>>> {
    payload.validate()?;
    let file = payload.file.take().map(FilePayload::decode).transpose()?;

    let document = app_state
        .document_service
        .update_document(document_id, payload, file, user.user_id())
        .await?;

    Ok(Json(ApiResponse::success(
        "Document updated successfully",
        DocumentDto::from(document),
    )))
}

pub async fn archive_document_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(document_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<DocumentDto>>> {
    let document = app_state
        .document_service
        .archive_document(document_id, user.user_id())
        .await?;

    Ok(Json(ApiResponse::success(
        "Document archived successfully",
        DocumentDto::from(document),
    )))
}

pub async fn list_versions_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(document_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<DocumentVersion>>>> {
    let versions = app_state
        .document_service
        .list_versions(document_id)
        .await?;
    let count = versions.len();

    Ok(Json(ApiResponse::success_with_metadata(
        "Document versions retrieved successfully",
        versions,
        json!({ "count": count }),
    )))
}

pub fn document_router(app_state: AppState) -> Router {
    Router::new()
        .route("/documents", post(create_document_handler))
        .route(
            "/documents/{id}",
            get(get_document_handler).patch(update_document_handler),
        )
        .route("/documents/{id}/archive", post(archive_document_handler))
        .route("/documents/{id}/versions", get(list_versions_handler))
        .with_state(app_state)
}
