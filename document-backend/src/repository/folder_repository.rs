// document-backend/src/repository/folder_repository.rs

use sea_orm::{ActiveModelTrait, EntityTrait};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::document_folder_model::{self, ActiveModel, Entity as DocumentFolder};
use crate::error::AppResult;

pub struct FolderRepository {
    db: DbPool,
}

impl FolderRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<document_folder_model::Model>> {
        Ok(DocumentFolder::find_by_id(id).one(&self.db).await?)
    }

    pub async fn create(
        &self,
        folder: document_folder_model::Model,
    ) -> AppResult<document_folder_model::Model> {
        Ok(ActiveModel::from(folder).reset_all().insert(&self.db).await?)
    }
}
