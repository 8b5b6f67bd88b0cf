// document-backend/src/repository/approval_repository.rs

use chrono::{DateTime, Utc};
use sea_orm::{
    entity::*, query::*, ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, SqlErr,
    TransactionTrait,
};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::approval_status::ApprovalStatus;
use crate::domain::document_approval_model::{
    self, ActiveModel as ApprovalActiveModel, Entity as DocumentApproval,
};
use crate::domain::document_status::DocumentStatus;
use crate::error::{AppError, AppResult};
use crate::repository::document_repository::set_status_for_version_in;

pub struct ApprovalRepository {
    db: DbPool,
}

impl ApprovalRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<document_approval_model::Model>> {
        Ok(DocumentApproval::find_by_id(id).one(&self.db).await?)
    }

    /// (document_id, version) の進行中の承認
    pub async fn find_active(
        &self,
        document_id: Uuid,
        version: &str,
    ) -> AppResult<Option<document_approval_model::Model>> {
        Ok(find_active_in(&self.db, document_id, version).await?)
    }

    /// 承認を作成し、ドキュメントを PENDING_APPROVAL にする
    ///
    /// 同時に2件作られないことは部分ユニークインデックス
    /// `uq_document_approvals_active` が保証する。
    pub async fn create_and_mark_pending(
        &self,
        approval: document_approval_model::Model,
        updated_by: &str,
    ) -> AppResult<document_approval_model::Model> {
        let document_id = approval.document_id;
        let version = approval.document_version.clone();
        let already_active = || AppError::ApprovalAlreadyActive {
            document_id,
            version: version.clone(),
        };

        let txn = self.db.begin().await?;

        if find_active_in(&txn, document_id, &version).await?.is_some() {
            return Err(already_active());
        }

        // 先にドキュメント行を更新してロックを取る（新バージョン反映と同じ順序）
        let marked = set_status_for_version_in(
            &txn,
            document_id,
            &version,
            DocumentStatus::PendingApproval,
            updated_by,
        )
        .await?;
        if !marked {
            return Err(AppError::Conflict(format!(
                "Document {} is no longer at version {}",
                document_id, version
            )));
        }

        let created = ApprovalActiveModel::from(approval)
            .reset_all()
            .insert(&txn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => already_active(),
                _ => AppError::DbErr(e),
            })?;

        txn.commit().await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => already_active(),
            _ => AppError::DbErr(e),
        })?;
        Ok(created)
    }

    /// 承認の状態を保存し、必要ならドキュメントの状態も同じトランザクションで書き戻す
    ///
    /// `expected_updated_at` が一致しない場合は他の判断と競合したとみなす。
    /// ドキュメントが承認対象より新しいバージョンに進んでいれば状態は書き戻さない。
    pub async fn save(
        &self,
        approval: document_approval_model::Model,
        expected_updated_at: DateTime<Utc>,
        document_status: Option<DocumentStatus>,
        updated_by: &str,
    ) -> AppResult<document_approval_model::Model> {
        let approval_id = approval.id;
        let document_id = approval.document_id;
        let version = approval.document_version.clone();

        let txn = self.db.begin().await?;

        let saved = DocumentApproval::update(ApprovalActiveModel::from(approval).reset_all())
            .filter(document_approval_model::Column::UpdatedAt.eq(expected_updated_at))
            .exec(&txn)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => AppError::Conflict(format!(
                    "Approval {} was modified concurrently",
                    approval_id
                )),
                other => AppError::DbErr(other),
            })?;

        if let Some(status) = document_status {
            let written =
                set_status_for_version_in(&txn, document_id, &version, status, updated_by).await?;
            if !written {
                tracing::debug!(
                    approval_id = %approval_id,
                    version = %version,
                    "Document moved past the approved version; status left unchanged"
                );
            }
        }

        txn.commit().await?;
        Ok(saved)
    }
}

async fn find_active_in<C>(
    conn: &C,
    document_id: Uuid,
    version: &str,
) -> Result<Option<document_approval_model::Model>, DbErr>
where
    C: ConnectionTrait,
{
    DocumentApproval::find()
        .filter(document_approval_model::Column::DocumentId.eq(document_id))
        .filter(document_approval_model::Column::DocumentVersion.eq(version))
        .filter(
            document_approval_model::Column::Status.is_in(
                ApprovalStatus::open_states()
                    .iter()
                    .map(|status| status.as_str()),
            ),
        )
        .one(conn)
        .await
}
