// document-backend/src/store/sea_orm_store.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::document_store::DocumentStore;
use crate::db::DbPool;
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
use crate::repository::{
    access_log_repository::AccessLogRepository, approval_repository::ApprovalRepository,
    document_repository::DocumentRepository,
    document_version_repository::DocumentVersionRepository, folder_repository::FolderRepository,
    project_repository::ProjectRepository, share_repository::ShareRepository,
    workflow_repository::WorkflowRepository,
};

/// PostgreSQL（SeaORM）による DocumentStore 実装
pub struct SeaOrmDocumentStore {
    documents: DocumentRepository,
    versions: DocumentVersionRepository,
    folders: FolderRepository,
    projects: ProjectRepository,
    workflows: WorkflowRepository,
    approvals: ApprovalRepository,
    shares: ShareRepository,
    access_logs: AccessLogRepository,
}

impl SeaOrmDocumentStore {
    pub fn new(db: DbPool) -> Self {
        Self {
            documents: DocumentRepository::new(db.clone()),
            versions: DocumentVersionRepository::new(db.clone()),
            folders: FolderRepository::new(db.clone()),
            projects: ProjectRepository::new(db.clone()),
            workflows: WorkflowRepository::new(db.clone()),
            approvals: ApprovalRepository::new(db.clone()),
            shares: ShareRepository::new(db.clone()),
            access_logs: AccessLogRepository::new(db),
        }
    }
}

#[async_trait]
impl DocumentStore for SeaOrmDocumentStore {
    async fn find_document(&self, id: Uuid) -> AppResult<Option<Document>> {
        self.documents.find_by_id(id).await
    }

    async fn create_document(
        &self,
        document: Document,
        initial_version: DocumentVersion,
    ) -> AppResult<Document> {
        self.documents
            .create_with_initial_version(document, initial_version)
            .await
    }

    async fn update_document(&self, document: Document) -> AppResult<Document> {
        self.documents.update(document).await
    }

    async fn apply_new_version(
        &self,
        document: Document,
        version: DocumentVersion,
    ) -> AppResult<Document> {
        self.documents.apply_new_version(document, version).await
    }

    async fn set_document_status(
        &self,
        id: Uuid,
        status: DocumentStatus,
        updated_by: &str,
    ) -> AppResult<Document> {
        self.documents.update_status(id, status, updated_by).await
    }

    async fn find_versions(
        &self,
        document_id: Uuid,
        status: Option<VersionStatus>,
    ) -> AppResult<Vec<DocumentVersion>> {
        self.versions.find_by_document(document_id, status).await
    }

    async fn find_workflow(&self, id: Uuid) -> AppResult<Option<ApprovalWorkflow>> {
        self.workflows.find_by_id(id).await
    }

    async fn create_workflow(&self, workflow: ApprovalWorkflow) -> AppResult<ApprovalWorkflow> {
        self.workflows.create(workflow).await
    }

    async fn find_approval(&self, id: Uuid) -> AppResult<Option<DocumentApproval>> {
        self.approvals.find_by_id(id).await
    }

    async fn find_active_approval(
        &self,
        document_id: Uuid,
        version: &str,
    ) -> AppResult<Option<DocumentApproval>> {
        self.approvals.find_active(document_id, version).await
    }

    async fn create_approval(
        &self,
        approval: DocumentApproval,
        updated_by: &str,
    ) -> AppResult<DocumentApproval> {
        self.approvals
            .create_and_mark_pending(approval, updated_by)
            .await
    }

    async fn update_approval(
        &self,
        approval: DocumentApproval,
        expected_updated_at: DateTime<Utc>,
        document_status: Option<DocumentStatus>,
        updated_by: &str,
    ) -> AppResult<DocumentApproval> {
        self.approvals
            .save(approval, expected_updated_at, document_status, updated_by)
            .await
    }

    async fn create_share(&self, share: DocumentShare) -> AppResult<DocumentShare> {
        self.shares.create(share).await
    }

    async fn find_share(&self, id: Uuid) -> AppResult<Option<DocumentShare>> {
        self.shares.find_by_id(id).await
    }

    async fn find_share_by_token(&self, token: &str) -> AppResult<Option<DocumentShare>> {
        self.shares.find_by_token(token).await
    }

    async fn update_share(&self, share: DocumentShare) -> AppResult<DocumentShare> {
        self.shares.update(share).await
    }

    async fn increment_share_access_count(
        &self,
        document_id: Uuid,
        version: &str,
    ) -> AppResult<u64> {
        self.shares
            .increment_access_count(document_id, version)
            .await
    }

    async fn create_access_log(&self, log: DocumentAccessLog) -> AppResult<()> {
        self.access_logs.create(log).await
    }

    async fn find_access_logs(&self, document_id: Uuid) -> AppResult<Vec<DocumentAccessLog>> {
        self.access_logs.find_by_document(document_id).await
    }

    async fn find_folder(&self, id: Uuid) -> AppResult<Option<DocumentFolder>> {
        self.folders.find_by_id(id).await
    }

    async fn create_folder(&self, folder: DocumentFolder) -> AppResult<DocumentFolder> {
        self.folders.create(folder).await
    }

    async fn find_project(&self, id: Uuid) -> AppResult<Option<Project>> {
        self.projects.find_by_id(id).await
    }

    async fn create_project(&self, project: Project) -> AppResult<Project> {
        self.projects.create(project).await
    }
}
