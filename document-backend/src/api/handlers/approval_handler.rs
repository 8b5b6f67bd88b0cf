// document-backend/src/api/handlers/approval_handler.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::approval_dto::{
    ApprovalDto, CreateWorkflowRequest, DecideStepRequest, StartApprovalRequest, WorkflowDto,
};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::types::ApiResponse;
use crate::utils::error_helper::convert_validation_errors;

/// ドキュメントの現在バージョンに対する承認を開始
pub async fn start_approval_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(document_id): Path<Uuid>,
    Json(payload): Json<StartApprovalRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ApprovalDto>>)> {
    let approval = app_state
        .approval_service
        .start(document_id, payload.workflow_id, user.user_id())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Approval started successfully",
            ApprovalDto::from(approval),
        )),
    ))
}

/// ステップの承認・却下
pub async fn decide_step_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path((approval_id, step)): Path<(Uuid, usize)>,
    Json(payload): Json<DecideStepRequest>,
) -> AppResult<Json<ApiResponse<ApprovalDto>>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "approval_handler::decide_step"))?;

    let approval = app_state
        .approval_service
        .decide(
            approval_id,
            step,
            user.user_id(),
            payload.decision,
            payload.comments,
        )
        .await?;

    Ok(Json(ApiResponse::success(
        "Approval step decided successfully",
        ApprovalDto::from(approval),
    )))
}

pub async fn cancel_approval_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(approval_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ApprovalDto>>> {
    let approval = app_state
        .approval_service
        .cancel(approval_id, user.user_id())
        .await?;

    Ok(Json(ApiResponse::success(
        "Approval cancelled successfully",
        ApprovalDto::from(approval),
    )))
}

pub async fn get_approval_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(approval_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ApprovalDto>>> {
    let approval = app_state.approval_service.get(approval_id).await?;

    Ok(Json(ApiResponse::success(
        "Approval retrieved successfully",
        ApprovalDto::from(approval),
    )))
}

pub async fn create_workflow_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateWorkflowRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<WorkflowDto>>)> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "approval_handler::create_workflow"))?;

    let workflow = app_state
        .approval_service
        .create_workflow(payload, user.user_id())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Workflow created successfully",
            WorkflowDto::from(workflow),
        )),
    ))
}

pub fn approval_router(app_state: AppState) -> Router {
    Router::new()
        .route("/documents/{id}/approvals", post(start_approval_handler))
        .route("/approvals/{id}", get(get_approval_handler))
        .route("/approvals/{id}/steps/{step}", post(decide_step_handler))
        .route("/approvals/{id}/cancel", post(cancel_approval_handler))
        .route("/workflows", post(create_workflow_handler))
        .with_state(app_state)
}
