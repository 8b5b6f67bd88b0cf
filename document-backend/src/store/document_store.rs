// document-backend/src/store/document_store.rs

//! ドキュメント関連レコードの永続化境界
//!
//! サービス層はこのトレイト越しにのみ保存先へアクセスする。
//! 複数レコードにまたがる更新（バージョンの切り替え、承認とドキュメント状態の
//! 同期）は1回の呼び出しで原子的に行われる。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::approval_workflow_model::Model as ApprovalWorkflow;
use crate::domain::document_access_log_model::Model as DocumentAccessLog;
use crate::domain::document_approval_model::Model as DocumentApproval;
use crate::domain::document_folder_model::Model as DocumentFolder;
use crate::domain::document_model::Model as Document;
use crate::domain::document_share_model::Model as DocumentShare;
use crate::domain::document_status::{DocumentStatus, VersionStatus};
use crate::domain::document_version_model::Model as DocumentVersion;
use crate::domain::project_model::Model as Project;
use crate::error::AppResult;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    // --- documents / versions ---

    async fn find_document(&self, id: Uuid) -> AppResult<Option<Document>>;

    /// ドキュメントと最初のACTIVEバージョンを同時に作成
    async fn create_document(
        &self,
        document: Document,
        initial_version: DocumentVersion,
    ) -> AppResult<Document>;

    /// バージョンを変えないメタデータ更新（status と version は書かない）
    async fn update_document(&self, document: Document) -> AppResult<Document>;

    /// ドキュメント更新、既存ACTIVEのSUPERSEDED化、新ACTIVEの追加を原子的に行う
    ///
    /// 旧バージョンの進行中の承認は CANCELLED になり、PENDING_APPROVAL は DRAFT に戻る。
    async fn apply_new_version(
        &self,
        document: Document,
        version: DocumentVersion,
    ) -> AppResult<Document>;

    async fn set_document_status(
        &self,
        id: Uuid,
        status: DocumentStatus,
        updated_by: &str,
    ) -> AppResult<Document>;

    /// 作成日時の降順
    async fn find_versions(
        &self,
        document_id: Uuid,
        status: Option<VersionStatus>,
    ) -> AppResult<Vec<DocumentVersion>>;

    // --- workflows / approvals ---

    async fn find_workflow(&self, id: Uuid) -> AppResult<Option<ApprovalWorkflow>>;

    async fn create_workflow(&self, workflow: ApprovalWorkflow) -> AppResult<ApprovalWorkflow>;

    async fn find_approval(&self, id: Uuid) -> AppResult<Option<DocumentApproval>>;

    async fn find_active_approval(
        &self,
        document_id: Uuid,
        version: &str,
    ) -> AppResult<Option<DocumentApproval>>;

    /// 承認の作成とドキュメントの PENDING_APPROVAL 化
    ///
    /// 同じ (document_id, version) に進行中の承認があれば `ApprovalAlreadyActive`、
    /// ドキュメントが既に別バージョンなら `Conflict`。
    async fn create_approval(
        &self,
        approval: DocumentApproval,
        updated_by: &str,
    ) -> AppResult<DocumentApproval>;

    /// 承認の保存（楽観的排他）と、必要ならドキュメント状態の書き戻し
    ///
    /// 書き戻しはドキュメントがまだ承認対象のバージョンのときだけ行う。
    async fn update_approval(
        &self,
        approval: DocumentApproval,
        expected_updated_at: DateTime<Utc>,
        document_status: Option<DocumentStatus>,
        updated_by: &str,
    ) -> AppResult<DocumentApproval>;

    // --- sharing / access logs ---

    async fn create_share(&self, share: DocumentShare) -> AppResult<DocumentShare>;

    async fn find_share(&self, id: Uuid) -> AppResult<Option<DocumentShare>>;

    async fn find_share_by_token(&self, token: &str) -> AppResult<Option<DocumentShare>>;

    async fn update_share(&self, share: DocumentShare) -> AppResult<DocumentShare>;

    /// 更新した共有の件数を返す
    async fn increment_share_access_count(&self, document_id: Uuid, version: &str)
        -> AppResult<u64>;

    async fn create_access_log(&self, log: DocumentAccessLog) -> AppResult<()>;

    async fn find_access_logs(&self, document_id: Uuid) -> AppResult<Vec<DocumentAccessLog>>;

    // --- folders / projects ---

    async fn find_folder(&self, id: Uuid) -> AppResult<Option<DocumentFolder>>;

    async fn create_folder(&self, folder: DocumentFolder) -> AppResult<DocumentFolder>;

    async fn find_project(&self, id: Uuid) -> AppResult<Option<Project>>;

    async fn create_project(&self, project: Project) -> AppResult<Project>;
}
