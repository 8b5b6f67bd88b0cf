// document-backend/src/repository/document_version_repository.rs

use sea_orm::{entity::*, query::*, EntityTrait};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::document_status::VersionStatus;
use crate::domain::document_version_model::{self, Entity as DocumentVersion};
use crate::error::AppResult;

pub struct DocumentVersionRepository {
    db: DbPool,
}

impl DocumentVersionRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// 作成日時の降順で取得
    pub async fn find_by_document(
        &self,
        document_id: Uuid,
        status: Option<VersionStatus>,
    ) -> AppResult<Vec<document_version_model::Model>> {
        let mut query = DocumentVersion::find()
            .filter(document_version_model::Column::DocumentId.eq(document_id));

        if let Some(status) = status {
            query = query.filter(document_version_model::Column::Status.eq(status.as_str()));
        }

        Ok(query
            .order_by_desc(document_version_model::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}
