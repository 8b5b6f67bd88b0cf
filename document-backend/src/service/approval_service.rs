// document-backend/src/service/approval_service.rs

use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::approval_dto::CreateWorkflowRequest;
use crate::config::app::ApprovalConfig;
use crate::domain::approval_process::{ApprovalProcess, ProcessError};
use crate::domain::approval_status::ApprovalDecision;
use crate::domain::approval_workflow_model::Model as ApprovalWorkflow;
use crate::domain::document_approval_model::Model as DocumentApproval;
use crate::domain::document_status::DocumentStatus;
use crate::domain::share_types::AccessAction;
use crate::error::{AppError, AppResult};
use crate::log_with_context;
use crate::service::access_service::AccessService;
use crate::store::DocumentStore;
use crate::utils::error_helper::{internal_server_error, not_found_error, validation_error};

pub struct ApprovalService {
    store: Arc<dyn DocumentStore>,
    access: Arc<AccessService>,
    strict_sequential: bool,
}

impl ApprovalService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        access: Arc<AccessService>,
        config: &ApprovalConfig,
    ) -> Self {
        Self {
            store,
            access,
            strict_sequential: config.strict_sequential,
        }
    }

    /// ドキュメントの現在のバージョンに対して承認プロセスを開始する
    pub async fn start(
        &self,
        document_id: Uuid,
        workflow_id: Uuid,
        initiated_by: &str,
    ) -> AppResult<DocumentApproval> {
        let document = self.store.find_document(document_id).await?.ok_or_else(|| {
            not_found_error("Document", &document_id.to_string(), "approval_service::start")
        })?;
        let workflow = self.find_workflow(workflow_id).await?;

        let steps = workflow.steps().map_err(|e| {
            internal_server_error(e, "approval_service::start", "Workflow steps are corrupted")
        })?;
        let process = ApprovalProcess::start(&steps)
            .map_err(|e| validation_error("workflow", &e.to_string()))?;

        let now = Utc::now();
        let due_date = workflow
            .default_due_days
            .filter(|days| *days > 0)
            .map(|days| now + Duration::days(i64::from(days)));

        let mut approval = DocumentApproval {
            id: Uuid::new_v4(),
            document_id: document.id,
            document_version: document.version.clone(),
            workflow_id: workflow.id,
            approvers: serde_json::Value::Null,
            current_step: 0,
            status: process.status.as_str().to_string(),
            is_sequential: workflow.is_sequential,
            initiated_by: initiated_by.to_string(),
            start_date: now,
            due_date,
            completion_date: None,
            created_at: now,
            updated_at: now,
        };
        approval.set_approvers(&process.approvers).map_err(|e| {
            internal_server_error(e, "approval_service::start", "Failed to build approvers")
        })?;

        let created = self.store.create_approval(approval, initiated_by).await?;

        log_with_context!(
            tracing::Level::INFO,
            "Approval started",
            "approval_id" => created.id,
            "document_id" => created.document_id,
            "version" => &created.document_version,
            "workflow_id" => workflow.id,
        );

        let _ = self
            .access
            .log_access(
                created.document_id,
                &created.document_version,
                AccessAction::SubmitForApproval,
                Some(initiated_by),
                Some(json!({ "approval_id": created.id, "workflow_id": workflow.id })),
            )
            .await;

        Ok(created)
    }

    /// ステップに判断を記録する
    ///
    /// 却下は即座に確定し、全ステップが承認されると APPROVED になる。
    /// 終端に達した場合はドキュメントの状態も同じトランザクションで更新する。
    pub async fn decide(
        &self,
        approval_id: Uuid,
        step_index: usize,
        user_id: &str,
        decision: ApprovalDecision,
        comments: Option<String>,
    ) -> AppResult<DocumentApproval> {
        let approval = self.get(approval_id).await?;
        let mut process = self.restore_process(&approval)?;

        let strict = self.strict_sequential && approval.is_sequential;

        let now = Utc::now();
        let outcome = process
            .apply_decision(step_index, user_id, decision, comments, now, strict)
            .map_err(|e| map_process_error(approval_id, e))?;

        let expected_updated_at = approval.updated_at;
        let mut updated = approval;
        updated.set_approvers(&process.approvers).map_err(|e| {
            internal_server_error(e, "approval_service::decide", "Failed to store approvers")
        })?;
        updated.current_step = i32::try_from(process.current_step).unwrap_or(i32::MAX);
        updated.status = process.status.as_str().to_string();
        updated.completion_date = process.completion_date;
        updated.updated_at = now;

        let saved = self
            .store
            .update_approval(
                updated,
                expected_updated_at,
                outcome.document_status(),
                user_id,
            )
            .await?;

        log_with_context!(
            tracing::Level::INFO,
            "Approval step decided",
            "approval_id" => saved.id,
            "step" => step_index,
            "decision" => decision.as_str(),
            "status" => &saved.status,
        );

        let action = match decision {
            ApprovalDecision::Approved => AccessAction::Approve,
            ApprovalDecision::Rejected => AccessAction::Reject,
        };
        let _ = self
            .access
            .log_access(
                saved.document_id,
                &saved.document_version,
                action,
                Some(user_id),
                Some(json!({
                    "approval_id": saved.id,
                    "step": step_index,
                    "status": saved.status,
                })),
            )
            .await;

        Ok(saved)
    }

    /// 進行中の承認を取り消し、ドキュメントを DRAFT に戻す（開始者のみ）
    pub async fn cancel(&self, approval_id: Uuid, user_id: &str) -> AppResult<DocumentApproval> {
        let approval = self.get(approval_id).await?;
        let mut process = self.restore_process(&approval)?;

        if approval.initiated_by != user_id {
            return Err(AppError::Forbidden(
                "Only the initiator can cancel an approval".to_string(),
            ));
        }

        let now = Utc::now();
        process
            .cancel(now)
            .map_err(|e| map_process_error(approval_id, e))?;

        let expected_updated_at = approval.updated_at;
        let mut updated = approval;
        updated.status = process.status.as_str().to_string();
        updated.completion_date = process.completion_date;
        updated.updated_at = now;

        let saved = self
            .store
            .update_approval(
                updated,
                expected_updated_at,
                Some(DocumentStatus::Draft),
                user_id,
            )
            .await?;

        let _ = self
            .access
            .log_access(
                saved.document_id,
                &saved.document_version,
                AccessAction::CancelApproval,
                Some(user_id),
                Some(json!({ "approval_id": saved.id })),
            )
            .await;

        Ok(saved)
    }

    pub async fn get(&self, approval_id: Uuid) -> AppResult<DocumentApproval> {
        self.store.find_approval(approval_id).await?.ok_or_else(|| {
            not_found_error("Approval", &approval_id.to_string(), "approval_service::get")
        })
    }

    /// ワークフローのテンプレートを登録する
    pub async fn create_workflow(
        &self,
        request: CreateWorkflowRequest,
        user_id: &str,
    ) -> AppResult<ApprovalWorkflow> {
        request.validate()?;
        let steps = request.to_steps().map_err(|e| validation_error("steps", &e.code))?;

        let now = Utc::now();
        let workflow = ApprovalWorkflow {
            id: Uuid::new_v4(),
            name: request.name,
            description: request.description,
            steps: serde_json::to_value(&steps).map_err(|e| {
                internal_server_error(e, "approval_service::create_workflow", "Invalid steps")
            })?,
            is_sequential: request.is_sequential,
            default_due_days: request.default_due_days,
            document_types: json!(request.document_types),
            created_by: user_id.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.store.create_workflow(workflow).await
    }

    async fn find_workflow(&self, workflow_id: Uuid) -> AppResult<ApprovalWorkflow> {
        self.store.find_workflow(workflow_id).await?.ok_or_else(|| {
            not_found_error(
                "Workflow",
                &workflow_id.to_string(),
                "approval_service::find_workflow",
            )
        })
    }

    fn restore_process(&self, approval: &DocumentApproval) -> AppResult<ApprovalProcess> {
        let status = approval.status().ok_or_else(|| {
            internal_server_error(
                &approval.status,
                "approval_service::restore_process",
                "Approval status is corrupted",
            )
        })?;
        let approvers = approval.approvers().map_err(|e| {
            internal_server_error(
                e,
                "approval_service::restore_process",
                "Approval approvers are corrupted",
            )
        })?;
        let current_step = usize::try_from(approval.current_step).unwrap_or(0);

        Ok(ApprovalProcess::restore(
            approvers,
            current_step,
            status,
            approval.completion_date,
        ))
    }
}

fn map_process_error(approval_id: Uuid, error: ProcessError) -> AppError {
    match error {
        ProcessError::Closed(status) => AppError::ApprovalClosed {
            approval_id,
            status,
        },
        ProcessError::StepOutOfRange { step, .. } | ProcessError::OutOfSequence { step, .. } => {
            AppError::InvalidStep {
                approval_id,
                step,
                reason: error.to_string(),
            }
        }
        ProcessError::NotApprover { step, user_id } => AppError::NotAuthorizedApprover {
            approval_id,
            step,
            user_id,
        },
        ProcessError::EmptyWorkflow | ProcessError::StepWithoutApprover { .. } => {
            validation_error("workflow", &error.to_string())
        }
    }
}
