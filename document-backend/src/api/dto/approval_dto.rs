// document-backend/src/api/dto/approval_dto.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::approval_status::{ApprovalDecision, ApprovalStatus};
use crate::domain::approval_workflow_model::{self, WorkflowStep};
use crate::domain::document_approval_model::{self, ApproverEntry};

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct StartApprovalRequest {
    pub workflow_id: Uuid,
}

#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct DecideStepRequest {
    pub decision: ApprovalDecision,
    #[validate(length(max = 2000, message = "Comments must not exceed 2000 characters"))]
    pub comments: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct WorkflowStepRequest {
    /// 省略時は "step-{n}" を割り当てる
    pub id: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Step name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "Each step needs at least one approver"))]
    pub approver_ids: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct CreateWorkflowRequest {
    #[validate(length(min = 1, max = 255, message = "Workflow name must be between 1 and 255 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(
        length(min = 1, message = "Workflow must have at least one step"),
        nested
    )]
    pub steps: Vec<WorkflowStepRequest>,
    #[serde(default)]
    pub is_sequential: bool,
    #[validate(range(min = 1, max = 365, message = "Default due days must be between 1 and 365"))]
    pub default_due_days: Option<i32>,
    #[serde(default)]
    pub document_types: Vec<String>,
}

impl CreateWorkflowRequest {
    /// 宣言順のステップ。IDの重複はエラー
    pub fn to_steps(&self) -> Result<Vec<WorkflowStep>, ValidationError> {
        let steps: Vec<WorkflowStep> = self
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| WorkflowStep {
                id: step
                    .id
                    .clone()
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(|| format!("step-{}", index + 1)),
                name: step.name.clone(),
                approver_ids: step
                    .approver_ids
                    .iter()
                    .map(|id| id.trim().to_string())
                    .filter(|id| !id.is_empty())
                    .collect(),
            })
            .collect();

        let mut seen = std::collections::HashSet::new();
        for step in &steps {
            if step.approver_ids.is_empty() {
                return Err(ValidationError::new("step_without_approver"));
            }
            if !seen.insert(step.id.as_str()) {
                return Err(ValidationError::new("duplicate_step_id"));
            }
        }
        Ok(steps)
    }
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApprovalDto {
    pub id: Uuid,
    pub document_id: Uuid,
    pub document_version: String,
    pub workflow_id: Uuid,
    pub approvers: Vec<ApproverEntry>,
    pub current_step: i32,
    pub status: Option<ApprovalStatus>,
    pub is_sequential: bool,
    pub initiated_by: String,
    pub start_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub completion_date: Option<DateTime<Utc>>,
}

impl From<document_approval_model::Model> for ApprovalDto {
    fn from(model: document_approval_model::Model) -> Self {
        Self {
            approvers: model.approvers().unwrap_or_default(),
            status: model.status(),
            id: model.id,
            document_id: model.document_id,
            document_version: model.document_version,
            workflow_id: model.workflow_id,
            current_step: model.current_step,
            is_sequential: model.is_sequential,
            initiated_by: model.initiated_by,
            start_date: model.start_date,
            due_date: model.due_date,
            completion_date: model.completion_date,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WorkflowDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub steps: Vec<WorkflowStep>,
    pub is_sequential: bool,
    pub default_due_days: Option<i32>,
    pub document_types: Vec<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl From<approval_workflow_model::Model> for WorkflowDto {
    fn from(model: approval_workflow_model::Model) -> Self {
        Self {
            steps: model.steps().unwrap_or_default(),
            document_types: model.document_types(),
            id: model.id,
            name: model.name,
            description: model.description,
            is_sequential: model.is_sequential,
            default_due_days: model.default_due_days,
            created_by: model.created_by,
            created_at: model.created_at,
        }
    }
}
