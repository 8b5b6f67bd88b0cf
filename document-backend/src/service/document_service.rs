// document-backend/src/service/document_service.rs

use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::document_dto::{CreateDocumentRequest, UpdateDocumentRequest};
use crate::domain::document_model::{FilePointer, Model as Document};
use crate::domain::document_status::DocumentStatus;
use crate::domain::document_version_model::Model as DocumentVersion;
use crate::domain::share_types::AccessAction;
use crate::domain::version_number::VersionNumber;
use crate::error::AppResult;
use crate::log_with_context;
use crate::service::access_service::AccessService;
use crate::service::approval_service::ApprovalService;
use crate::store::{DocumentStore, FileStorage, FileUpload};
use crate::utils::error_helper::{
    conflict_error, not_found_error, reference_not_found, validation_error,
};

pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
    files: Arc<dyn FileStorage>,
    approvals: Arc<ApprovalService>,
    access: Arc<AccessService>,
}

impl DocumentService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        files: Arc<dyn FileStorage>,
        approvals: Arc<ApprovalService>,
        access: Arc<AccessService>,
    ) -> Self {
        Self {
            store,
            files,
            approvals,
            access,
        }
    }

    /// ドキュメントを作成する（バージョン 1.0）
    pub async fn create_document(
        &self,
        request: CreateDocumentRequest,
        file: Option<FileUpload>,
        user_id: &str,
    ) -> AppResult<Document> {
        request.validate()?;

        let status = request.status.unwrap_or_default();
        if !status.is_valid_initial() {
            return Err(validation_error(
                "status",
                "Initial status must be DRAFT or ACTIVE",
            ));
        }

        self.ensure_references(request.folder_id, request.project_id)
            .await?;

        let file_pointer = match &file {
            Some(upload) => self.upload(upload).await?,
            None => FilePointer::default(),
        };

        let now = Utc::now();
        let version = VersionNumber::INITIAL.to_string();
        let mut document = Document {
            id: Uuid::new_v4(),
            title: request.title,
            description: request.description,
            document_type: request.document_type,
            category: request.category,
            tags: json!(request.tags),
            access_level: request
                .access_level
                .unwrap_or_default()
                .as_str()
                .to_string(),
            access_groups: json!(request.access_groups),
            related_entities: json!(request.related_entities),
            custom_fields: request.custom_fields.unwrap_or_else(|| json!({})),
            file_url: None,
            file_name: None,
            file_size: None,
            file_type: None,
            version: version.clone(),
            status: status.as_str().to_string(),
            project_id: request.project_id,
            folder_id: request.folder_id,
            created_by: user_id.to_string(),
            created_at: now,
            updated_by: user_id.to_string(),
            updated_at: now,
            expiration_date: request.expiration_date,
        };
        document.set_file_pointer(file_pointer.clone());

        let initial_version = DocumentVersion::new_active(
            document.id,
            version,
            file_pointer,
            request
                .change_description
                .or_else(|| Some("Initial version".to_string())),
            user_id.to_string(),
            now,
        );

        let created = self.store.create_document(document, initial_version).await?;

        log_with_context!(
            tracing::Level::INFO,
            "Document created",
            "document_id" => created.id,
            "version" => &created.version,
            "user_id" => user_id,
        );

        let _ = self
            .access
            .log_access(
                created.id,
                &created.version,
                AccessAction::Create,
                Some(user_id),
                None,
            )
            .await;

        match request.approval_workflow_id {
            Some(workflow_id) => self.start_approval_and_reload(&created, workflow_id, user_id).await,
            None => Ok(created),
        }
    }

    /// 部分更新。ファイルか `is_new_version` があれば新しいバージョンを作る
    pub async fn update_document(
        &self,
        id: Uuid,
        patch: UpdateDocumentRequest,
        file: Option<FileUpload>,
        user_id: &str,
    ) -> AppResult<Document> {
        patch.validate()?;

        let current = self.find_document(id, "document_service::update_document").await?;

        self.ensure_references(patch.folder_id, patch.project_id)
            .await?;

        let new_version = patch.creates_new_version(file.is_some());
        let file_pointer = match &file {
            Some(upload) => Some(self.upload(upload).await?),
            None => None,
        };

        let now = Utc::now();
        let approval_workflow_id = patch.approval_workflow_id;
        let change_description = patch.change_description.clone();
        let mut document = apply_patch(current.clone(), patch, user_id, now);

        let updated = if new_version {
            let next = next_version(&current);
            let pointer = file_pointer.unwrap_or_else(|| current.file_pointer());
            document.version = next.to_string();
            document.set_file_pointer(pointer.clone());

            let version_row = DocumentVersion::new_active(
                document.id,
                document.version.clone(),
                pointer,
                change_description,
                user_id.to_string(),
                now,
            );
            self.store.apply_new_version(document, version_row).await?
        } else {
            self.store.update_document(document).await?
        };

        log_with_context!(
            tracing::Level::INFO,
            "Document updated",
            "document_id" => updated.id,
            "version" => &updated.version,
            "new_version" => new_version,
            "user_id" => user_id,
        );

        let (action, details) = if new_version {
            (
                AccessAction::NewVersion,
                Some(json!({ "previous_version": current.version })),
            )
        } else {
            (AccessAction::Update, None)
        };
        let _ = self
            .access
            .log_access(updated.id, &updated.version, action, Some(user_id), details)
            .await;

        match approval_workflow_id {
            Some(workflow_id) => self.start_approval_and_reload(&updated, workflow_id, user_id).await,
            None => Ok(updated),
        }
    }

    pub async fn get_document(&self, id: Uuid, user_id: &str) -> AppResult<Document> {
        let document = self.find_document(id, "document_service::get_document").await?;

        let _ = self
            .access
            .log_access(
                document.id,
                &document.version,
                AccessAction::View,
                Some(user_id),
                None,
            )
            .await;

        Ok(document)
    }

    /// 新しい順
    pub async fn list_versions(&self, document_id: Uuid) -> AppResult<Vec<DocumentVersion>> {
        self.find_document(document_id, "document_service::list_versions")
            .await?;
        self.store.find_versions(document_id, None).await
    }

    /// 進行中の承認があるドキュメントはアーカイブできない
    pub async fn archive_document(&self, id: Uuid, user_id: &str) -> AppResult<Document> {
        let document = self.find_document(id, "document_service::archive_document").await?;

        if document.status() == DocumentStatus::Archived {
            return Ok(document);
        }

        if self
            .store
            .find_active_approval(document.id, &document.version)
            .await?
            .is_some()
        {
            return Err(conflict_error(
                "Document has an active approval",
                "document_service::archive_document",
            ));
        }

        let archived = self
            .store
            .set_document_status(document.id, DocumentStatus::Archived, user_id)
            .await?;

        let _ = self
            .access
            .log_access(
                archived.id,
                &archived.version,
                AccessAction::Archive,
                Some(user_id),
                None,
            )
            .await;

        Ok(archived)
    }

    async fn start_approval_and_reload(
        &self,
        document: &Document,
        workflow_id: Uuid,
        user_id: &str,
    ) -> AppResult<Document> {
        self.approvals
            .start(document.id, workflow_id, user_id)
            .await?;
        self.find_document(document.id, "document_service::start_approval")
            .await
    }

    /// 書き込み前にフォルダとプロジェクトの存在を確認する
    async fn ensure_references(
        &self,
        folder_id: Option<Uuid>,
        project_id: Option<Uuid>,
    ) -> AppResult<()> {
        const CONTEXT: &str = "document_service::ensure_references";
        if let Some(folder_id) = folder_id {
            if self.store.find_folder(folder_id).await?.is_none() {
                return Err(reference_not_found("folder", folder_id, CONTEXT));
            }
        }
        if let Some(project_id) = project_id {
            if self.store.find_project(project_id).await?.is_none() {
                return Err(reference_not_found("project", project_id, CONTEXT));
            }
        }
        Ok(())
    }

    async fn upload(&self, file: &FileUpload) -> AppResult<FilePointer> {
        let url = self.files.put(file).await?;
        Ok(FilePointer {
            file_url: Some(url),
            file_name: Some(file.file_name.clone()),
            file_size: Some(file.size()),
            file_type: Some(file.content_type.clone()),
        })
    }

    async fn find_document(&self, id: Uuid, context: &str) -> AppResult<Document> {
        self.store
            .find_document(id)
            .await?
            .ok_or_else(|| not_found_error("Document", &id.to_string(), context))
    }
}

/// 保存済みバージョンの次。解釈できない値は 1.0 とみなす
fn next_version(document: &Document) -> VersionNumber {
    let current = VersionNumber::parse(&document.version).unwrap_or_else(|| {
        log_with_context!(
            tracing::Level::WARN,
            "Stored document version is malformed",
            "document_id" => document.id,
            "version" => &document.version,
        );
        VersionNumber::INITIAL
    });
    current.next()
}

/// パッチのメタデータ項目を反映する（ファイルとバージョンは触らない）
fn apply_patch(
    mut document: Document,
    patch: UpdateDocumentRequest,
    user_id: &str,
    now: chrono::DateTime<Utc>,
) -> Document {
    if let Some(title) = patch.title {
        document.title = title;
    }
    if let Some(description) = patch.description {
        document.description = Some(description);
    }
    if let Some(document_type) = patch.document_type {
        document.document_type = document_type;
    }
    if let Some(category) = patch.category {
        document.category = Some(category);
    }
    if let Some(tags) = patch.tags {
        document.tags = json!(tags);
    }
    if let Some(access_level) = patch.access_level {
        document.access_level = access_level.as_str().to_string();
    }
    if let Some(access_groups) = patch.access_groups {
        document.access_groups = json!(access_groups);
    }
    if let Some(related_entities) = patch.related_entities {
        document.related_entities = json!(related_entities);
    }
    if let Some(custom_fields) = patch.custom_fields {
        document.custom_fields = custom_fields;
    }
    if let Some(project_id) = patch.project_id {
        document.project_id = Some(project_id);
    }
    if let Some(folder_id) = patch.folder_id {
        document.folder_id = Some(folder_id);
    }
    if let Some(expiration_date) = patch.expiration_date {
        document.expiration_date = Some(expiration_date);
    }
    document.updated_by = user_id.to_string();
    document.updated_at = now;
    document
}
