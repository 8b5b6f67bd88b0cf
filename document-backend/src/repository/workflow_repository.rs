// document-backend/src/repository/workflow_repository.rs

use sea_orm::{ActiveModelTrait, EntityTrait};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::approval_workflow_model::{self, ActiveModel, Entity as ApprovalWorkflow};
use crate::error::AppResult;

pub struct WorkflowRepository {
    db: DbPool,
}

impl WorkflowRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<approval_workflow_model::Model>> {
        Ok(ApprovalWorkflow::find_by_id(id).one(&self.db).await?)
    }

    pub async fn create(
        &self,
        workflow: approval_workflow_model::Model,
    ) -> AppResult<approval_workflow_model::Model> {
        Ok(ActiveModel::from(workflow)
            .reset_all()
            .insert(&self.db)
            .await?)
    }
}
