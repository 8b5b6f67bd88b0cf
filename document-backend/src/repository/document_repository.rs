// document-backend/src/repository/document_repository.rs

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    entity::*, query::*, ActiveModelTrait, ActiveValue, ConnectionTrait, EntityTrait, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::approval_status::ApprovalStatus;
use crate::domain::document_approval_model::{self, Entity as DocumentApprovalEntity};
use crate::domain::document_model::{self, ActiveModel as DocumentActiveModel, Entity as Document};
use crate::domain::document_status::{DocumentStatus, VersionStatus};
use crate::domain::document_version_model::{
    self, ActiveModel as VersionActiveModel, Entity as DocumentVersion,
};
use crate::error::{AppError, AppResult};

pub struct DocumentRepository {
    db: DbPool,
}

impl DocumentRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<document_model::Model>> {
        Ok(Document::find_by_id(id).one(&self.db).await?)
    }

    /// ドキュメントと最初のバージョン行を1トランザクションで作成
    pub async fn create_with_initial_version(
        &self,
        document: document_model::Model,
        version: document_version_model::Model,
    ) -> AppResult<document_model::Model> {
        let txn = self.db.begin().await?;

        let created = DocumentActiveModel::from(document)
            .reset_all()
            .insert(&txn)
            .await?;
        VersionActiveModel::from(version)
            .reset_all()
            .insert(&txn)
            .await?;

        txn.commit().await?;
        Ok(created)
    }

    /// メタデータのみの更新
    ///
    /// status は承認トランザクションだけが、version は新バージョン反映だけが書く。
    /// 読み込み後に他の書き込みがコミットしていても古い値で上書きしない。
    pub async fn update(&self, document: document_model::Model) -> AppResult<document_model::Model> {
        let mut active = without_status(document);
        active.version = ActiveValue::NotSet;
        Ok(active.update(&self.db).await?)
    }

    /// 新バージョンの反映
    ///
    /// ドキュメント更新、既存ACTIVE行のSUPERSEDED化、新しいACTIVE行の追加を
    /// 同一トランザクションで行う。読み手からACTIVEが0件や2件に見えることはない。
    ///
    /// 旧バージョンに進行中の承認があれば取り消し、PENDING_APPROVAL の
    /// ドキュメントは DRAFT に戻す。新バージョンにはまだ承認が存在しない。
    pub async fn apply_new_version(
        &self,
        document: document_model::Model,
        version: document_version_model::Model,
    ) -> AppResult<document_model::Model> {
        if version.document_id != document.id {
            return Err(AppError::InternalServerError(
                "Version row does not belong to the document".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        // 並行する start / decide と直列化するため行ロックを取る
        let stored = Document::find_by_id(document.id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Document {} not found", document.id)))?;

        let now = Utc::now();
        let cancelled = DocumentApprovalEntity::update_many()
            .col_expr(
                document_approval_model::Column::Status,
                Expr::value(ApprovalStatus::Cancelled.as_str()),
            )
            .col_expr(document_approval_model::Column::CompletionDate, Expr::value(now))
            .col_expr(document_approval_model::Column::UpdatedAt, Expr::value(now))
            .filter(document_approval_model::Column::DocumentId.eq(stored.id))
            .filter(document_approval_model::Column::DocumentVersion.eq(stored.version.as_str()))
            .filter(
                document_approval_model::Column::Status.is_in(
                    ApprovalStatus::open_states()
                        .iter()
                        .map(|status| status.as_str()),
                ),
            )
            .exec(&txn)
            .await?;
        if cancelled.rows_affected > 0 {
            tracing::info!(
                document_id = %stored.id,
                version = %stored.version,
                "Open approval cancelled by new version"
            );
        }

        let mut active = without_status(document);
        if stored.status() == DocumentStatus::PendingApproval {
            active.status = Set(DocumentStatus::Draft.as_str().to_string());
        }
        let updated = active.update(&txn).await?;

        DocumentVersion::update_many()
            .col_expr(
                document_version_model::Column::Status,
                Expr::value(VersionStatus::Superseded.as_str()),
            )
            .filter(document_version_model::Column::DocumentId.eq(updated.id))
            .filter(document_version_model::Column::Status.eq(VersionStatus::Active.as_str()))
            .exec(&txn)
            .await?;

        VersionActiveModel::from(version)
            .reset_all()
            .insert(&txn)
            .await?;

        txn.commit().await?;
        Ok(updated)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: DocumentStatus,
        updated_by: &str,
    ) -> AppResult<document_model::Model> {
        let active_model = DocumentActiveModel {
            id: ActiveValue::Unchanged(id),
            status: Set(status.as_str().to_string()),
            updated_by: Set(updated_by.to_string()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model.update(&self.db).await.map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => {
                AppError::NotFound(format!("Document {} not found", id))
            }
            other => AppError::DbErr(other),
        })
    }
}

fn without_status(document: document_model::Model) -> DocumentActiveModel {
    let mut active = DocumentActiveModel::from(document).reset_all();
    active.status = ActiveValue::NotSet;
    active
}

/// 承認トランザクションからドキュメント状態を更新するヘルパー
///
/// ドキュメントがまだ `version` のときだけ書き戻し、書き込んだかどうかを返す。
/// 新しいバージョンに移った後の承認結果は現在のバージョンに影響しない。
pub(crate) async fn set_status_for_version_in<C>(
    conn: &C,
    id: Uuid,
    version: &str,
    status: DocumentStatus,
    updated_by: &str,
) -> AppResult<bool>
where
    C: ConnectionTrait,
{
    let result = Document::update_many()
        .col_expr(document_model::Column::Status, Expr::value(status.as_str()))
        .col_expr(document_model::Column::UpdatedBy, Expr::value(updated_by))
        .col_expr(document_model::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(document_model::Column::Id.eq(id))
        .filter(document_model::Column::Version.eq(version))
        .exec(conn)
        .await?;

    Ok(result.rows_affected > 0)
}
