// document-backend/src/api/handlers/folder_handler.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::api::dto::folder_dto::CreateFolderRequest;
use crate::api::AppState;
use crate::domain::document_folder_model::Model as DocumentFolder;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::types::ApiResponse;

pub async fn create_folder_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateFolderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<DocumentFolder>>)> {
    let folder = app_state
        .folder_service
        .create_folder(payload, user.user_id())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Folder created successfully", folder)),
    ))
}

pub async fn get_folder_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(folder_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<DocumentFolder>>> {
    let folder = app_state.folder_service.get_folder(folder_id).await?;

    Ok(Json(ApiResponse::success(
        "Folder retrieved successfully",
        folder,
    )))
}

pub fn folder_router(app_state: AppState) -> Router {
    Router::new()
        .route("/folders", post(create_folder_handler))
        .route("/folders/{id}", get(get_folder_handler))
        .with_state(app_state)
}
