// document-backend/src/repository/access_log_repository.rs

use sea_orm::{entity::*, query::*, ActiveModelTrait, EntityTrait};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::document_access_log_model::{self, ActiveModel, Entity as DocumentAccessLog};
use crate::error::AppResult;

/// 追記専用。更新・削除のメソッドは持たない
pub struct AccessLogRepository {
    db: DbPool,
}

impl AccessLogRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, log: document_access_log_model::Model) -> AppResult<()> {
        ActiveModel::from(log).reset_all().insert(&self.db).await?;
        Ok(())
    }

    pub async fn find_by_document(
        &self,
        document_id: Uuid,
    ) -> AppResult<Vec<document_access_log_model::Model>> {
        Ok(DocumentAccessLog::find()
            .filter(document_access_log_model::Column::DocumentId.eq(document_id))
            .order_by_desc(document_access_log_model::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}
