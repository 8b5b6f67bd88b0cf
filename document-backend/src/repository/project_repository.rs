// document-backend/src/repository/project_repository.rs

use sea_orm::{ActiveModelTrait, EntityTrait};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::project_model::{self, ActiveModel, Entity as Project};
use crate::error::AppResult;

pub struct ProjectRepository {
    db: DbPool,
}

impl ProjectRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<project_model::Model>> {
        Ok(Project::find_by_id(id).one(&self.db).await?)
    }

    pub async fn create(&self, project: project_model::Model) -> AppResult<project_model::Model> {
        Ok(ActiveModel::from(project).reset_all().insert(&self.db).await?)
    }
}
