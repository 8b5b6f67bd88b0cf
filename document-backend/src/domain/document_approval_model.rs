// document-backend/src/domain/document_approval_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::approval_status::{ApprovalStatus, StepStatus};

/// 1つのドキュメントバージョンに対する承認プロセス
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document_approvals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub document_id: Uuid,
    pub document_version: String,
    pub workflow_id: Uuid,
    #[sea_orm(column_type = "JsonBinary")]
    pub approvers: Json,
    pub current_step: i32,
    pub status: String,
    /// 開始時点のワークフロー設定
    pub is_sequential: bool,
    pub initiated_by: String,
    pub start_date: DateTime<Utc>,
    #[sea_orm(nullable)]
    pub due_date: Option<DateTime<Utc>>,
    #[sea_orm(nullable)]
    pub completion_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::document_model::Entity",
        from = "Column::DocumentId",
        to = "super::document_model::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Document,

    #[sea_orm(
        belongs_to = "super::approval_workflow_model::Entity",
        from = "Column::WorkflowId",
        to = "super::approval_workflow_model::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Workflow,
}

impl Related<super::document_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Document.def()
    }
}

impl Related<super::approval_workflow_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workflow.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 承認者スロット（ワークフローの1ステップに対応）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproverEntry {
    pub user_id: String,
    pub step_id: String,
    pub step_name: String,
    #[serde(default)]
    pub status: StepStatus,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Option<String>,
}

impl Model {
    pub fn status(&self) -> Option<ApprovalStatus> {
        ApprovalStatus::from_str(&self.status)
    }

    pub fn is_open(&self) -> bool {
        self.status().is_some_and(|status| status.is_open())
    }

    pub fn approvers(&self) -> Result<Vec<ApproverEntry>, serde_json::Error> {
        serde_json::from_value(self.approvers.clone())
    }

    pub fn set_approvers(&mut self, approvers: &[ApproverEntry]) -> Result<(), serde_json::Error> {
        self.approvers = serde_json::to_value(approvers)?;
        Ok(())
    }
}
