// document-backend/src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::domain::approval_status::ApprovalStatus;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Referenced {entity} {id} does not exist")]
    ReferenceNotFound { entity: &'static str, id: Uuid },

    #[error("Document {document_id} version {version} already has an active approval")]
    ApprovalAlreadyActive { document_id: Uuid, version: String },

    #[error("Approval {approval_id} is already {status}")]
    ApprovalClosed {
        approval_id: Uuid,
        status: ApprovalStatus,
    },

    #[error("Invalid step {step} for approval {approval_id}: {reason}")]
    InvalidStep {
        approval_id: Uuid,
        step: usize,
        reason: String,
    },

    #[error("User {user_id} is not the approver of step {step} in approval {approval_id}")]
    NotAuthorizedApprover {
        approval_id: Uuid,
        step: usize,
        user_id: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Multiple validation errors")]
    ValidationErrors(Vec<String>),

    #[error("Validation failed")]
    ValidationFailure(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DbErr(DbErr::RecordNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::DbErr(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::NotFound(_) | AppError::ReferenceNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::ApprovalAlreadyActive { .. }
            | AppError::ApprovalClosed { .. }
            | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidStep { .. }
            | AppError::ValidationError(_)
            | AppError::ValidationErrors(_)
            | AppError::ValidationFailure(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotAuthorizedApprover { .. } | AppError::Forbidden(_) => {
                StatusCode::FORBIDDEN
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::ExternalServiceError(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::DbErr(_) => "database_error",
            AppError::NotFound(_) => "not_found",
            AppError::ReferenceNotFound { .. } => "reference_not_found",
            AppError::ApprovalAlreadyActive { .. } => "approval_already_active",
            AppError::ApprovalClosed { .. } => "approval_closed",
            AppError::InvalidStep { .. } => "invalid_step",
            AppError::NotAuthorizedApprover { .. } => "not_authorized_approver",
            AppError::ValidationError(_) => "validation_error",
            AppError::ValidationErrors(_) | AppError::ValidationFailure(_) => "validation_errors",
            AppError::BadRequest(_) => "bad_request",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
            AppError::Conflict(_) => "conflict",
            AppError::InternalServerError(_) => "internal_server_error",
            AppError::ExternalServiceError(_) => "external_service_error",
        }
    }

    /// 呼び出し側がリトライを判断するための付帯情報
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::DbErr(DbErr::RecordNotFound(entity)) => Some(json!({ "entity": entity })),
            AppError::DbErr(DbErr::Exec(_)) => {
                Some(json!({ "operation": "exec", "retryable": true }))
            }
            AppError::DbErr(DbErr::Query(_)) => {
                Some(json!({ "operation": "query", "retryable": true }))
            }
            AppError::ReferenceNotFound { entity, id } => {
                Some(json!({ "entity": entity, "id": id, "retryable": false }))
            }
            AppError::ApprovalAlreadyActive {
                document_id,
                version,
            } => Some(json!({ "document_id": document_id, "version": version })),
            AppError::ApprovalClosed {
                approval_id,
                status,
            } => Some(json!({ "approval_id": approval_id, "status": status })),
            AppError::InvalidStep {
                approval_id, step, ..
            } => Some(json!({ "approval_id": approval_id, "step": step })),
            AppError::NotAuthorizedApprover {
                approval_id,
                step,
                user_id,
            } => Some(json!({ "approval_id": approval_id, "step": step, "user_id": user_id })),
            _ => None,
        }
    }
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_type = self.error_type();
        let details = self.details();

        let error_response = match self {
            AppError::DbErr(db_err) => {
                // サーバーログには詳細を出す
                tracing::error!(error = ?db_err, "Database error");
                let message = match db_err {
                    DbErr::RecordNotFound(_) => "The requested resource was not found",
                    DbErr::Exec(_) => "A database operation failed",
                    DbErr::Query(_) => "A database query failed",
                    _ => "A database error occurred",
                };
                ErrorResponse::new(message, error_type).with_details(details)
            }
            AppError::ValidationErrors(errors) => {
                let mut field_errors: HashMap<String, Vec<String>> = HashMap::new();
                for error in &errors {
                    if let Some((field, message)) = error.split_once(": ") {
                        field_errors
                            .entry(field.to_string())
                            .or_default()
                            .push(message.to_string());
                    }
                }
                let errors_array = errors.iter().map(|e| json!({ "message": e })).collect();
                ErrorResponse::new("Validation failed", error_type)
                    .with_validation(field_errors, errors_array)
            }
            AppError::ValidationFailure(errors) => {
                let field_errors: HashMap<String, Vec<String>> = errors
                    .field_errors()
                    .into_iter()
                    .map(|(field, errors)| {
                        let messages = errors
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map_or_else(|| "Invalid value".to_string(), |m| m.to_string())
                            })
                            .collect();
                        (field.to_string(), messages)
                    })
                    .collect();
                let errors_array = field_errors
                    .iter()
                    .flat_map(|(field, messages)| {
                        messages
                            .iter()
                            .map(move |msg| json!({ "message": format!("{}: {}", field, msg) }))
                    })
                    .collect();
                ErrorResponse::new("Validation failed", error_type)
                    .with_validation(field_errors, errors_array)
            }
            AppError::InternalServerError(message) => {
                tracing::error!(message = %message, "Internal server error");
                ErrorResponse::new("An internal server error occurred", error_type)
            }
            AppError::ExternalServiceError(message) => {
                tracing::error!(message = %message, "External service error");
                let mut response = ErrorResponse::new(&message, error_type);
                response.error = "External service error".to_string();
                response
            }
            other => ErrorResponse::new(&other.to_string(), error_type).with_details(details),
        };

        (status, Json(error_response)).into_response()
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;

/// 統一的なエラーレスポンス構造
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<HashMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<serde_json::Value>>,
    pub error_type: String,
}

impl ErrorResponse {
    fn new(message: &str, error_type: &str) -> Self {
        Self {
            success: false,
            error: message.to_string(),
            message: message.to_string(),
            details: None,
            validation_errors: None,
            errors: None,
            error_type: error_type.to_string(),
        }
    }

    fn with_details(mut self, details: Option<serde_json::Value>) -> Self {
        self.details = details;
        self
    }

    fn with_validation(
        mut self,
        field_errors: HashMap<String, Vec<String>>,
        errors: Vec<serde_json::Value>,
    ) -> Self {
        self.validation_errors = Some(field_errors);
        self.errors = Some(errors);
        self
    }
}
