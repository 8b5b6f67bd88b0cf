// document-backend/src/domain/approval_workflow_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document_model::string_list;

/// 承認ワークフローのテンプレート
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "approval_workflows")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub steps: Json,
    pub is_sequential: bool,
    #[sea_orm(nullable)]
    pub default_due_days: Option<i32>,
    #[sea_orm(column_type = "JsonBinary")]
    pub document_types: Json,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::document_approval_model::Entity")]
    Approvals,
}

impl Related<super::document_approval_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Approvals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// ワークフローの1ステップ（宣言順に並ぶ承認者スロット）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub approver_ids: Vec<String>,
}

impl WorkflowStep {
    /// このステップの既定の承認者（先頭の承認者ID）
    pub fn default_approver(&self) -> Option<&str> {
        self.approver_ids.first().map(String::as_str)
    }
}

impl Model {
    pub fn steps(&self) -> Result<Vec<WorkflowStep>, serde_json::Error> {
        serde_json::from_value(self.steps.clone())
    }

    pub fn document_types(&self) -> Vec<String> {
        string_list(&self.document_types)
    }
}
