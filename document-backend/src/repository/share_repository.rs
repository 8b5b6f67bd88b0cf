// document-backend/src/repository/share_repository.rs

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*, ActiveModelTrait, EntityTrait};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::document_share_model::{self, ActiveModel, Entity as DocumentShare};
use crate::domain::share_types::ShareStatus;
use crate::error::AppResult;

pub struct ShareRepository {
    db: DbPool,
}

impl ShareRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        share: document_share_model::Model,
    ) -> AppResult<document_share_model::Model> {
        Ok(ActiveModel::from(share).reset_all().insert(&self.db).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<document_share_model::Model>> {
        Ok(DocumentShare::find_by_id(id).one(&self.db).await?)
    }

    pub async fn find_by_token(
        &self,
        token: &str,
    ) -> AppResult<Option<document_share_model::Model>> {
        Ok(DocumentShare::find()
            .filter(document_share_model::Column::ShareToken.eq(token))
            .one(&self.db)
            .await?)
    }

    pub async fn update(
        &self,
        share: document_share_model::Model,
    ) -> AppResult<document_share_model::Model> {
        Ok(ActiveModel::from(share).reset_all().update(&self.db).await?)
    }

    /// (document_id, version) のACTIVEな共有すべてのアクセス数を加算
    ///
    /// SQL側で加算するため読み取りと書き込みの間の競合で数が失われることはない。
    pub async fn increment_access_count(&self, document_id: Uuid, version: &str) -> AppResult<u64> {
        let result = DocumentShare::update_many()
            .col_expr(
                document_share_model::Column::AccessCount,
                Expr::col(document_share_model::Column::AccessCount).add(1),
            )
            .col_expr(
                document_share_model::Column::LastAccessed,
                Expr::value(Some(Utc::now())),
            )
            .filter(document_share_model::Column::DocumentId.eq(document_id))
            .filter(document_share_model::Column::DocumentVersion.eq(version))
            .filter(document_share_model::Column::Status.eq(ShareStatus::Active.as_str()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
