// document-backend/src/api/dto/document_dto.rs

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::domain::document_model;
use crate::domain::document_status::{DocumentAccessLevel, DocumentStatus};
use crate::error::{AppError, AppResult};
use crate::store::FileUpload;

pub const TITLE_MAX_LENGTH: u64 = 255;
pub const DOCUMENT_TYPE_MAX_LENGTH: u64 = 100;
pub const FILE_NAME_MAX_LENGTH: u64 = 255;

// --- Request DTOs ---

/// JSONで送られるファイル本体（base64）
#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct FilePayload {
    #[validate(length(
        min = 1,
        max = FILE_NAME_MAX_LENGTH,
        message = "File name must be between 1 and 255 characters"
    ))]
    pub file_name: String,
    pub content_type: Option<String>,
    #[validate(length(min = 1, message = "File content must not be empty"))]
    pub content_base64: String,
}

impl FilePayload {
    pub fn decode(self) -> AppResult<FileUpload> {
        let data = STANDARD
            .decode(self.content_base64.trim())
            .map_err(|_| AppError::BadRequest("File content is not valid base64".to_string()))?;
        Ok(FileUpload::new(
            self.file_name,
            self.content_type.as_deref(),
            data,
        ))
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, Validate)]
pub struct CreateDocumentRequest {
    #[validate(length(
        min = 1,
        max = TITLE_MAX_LENGTH,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,

    pub description: Option<String>,

    #[validate(length(
        min = 1,
        max = DOCUMENT_TYPE_MAX_LENGTH,
        message = "Document type must be between 1 and 100 characters"
    ))]
    pub document_type: String,

    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub access_level: Option<DocumentAccessLevel>,
    #[serde(default)]
    pub access_groups: Vec<String>,
    #[serde(default)]
    pub related_entities: Vec<Value>,
    pub custom_fields: Option<Value>,
    pub project_id: Option<Uuid>,
    pub folder_id: Option<Uuid>,
    pub expiration_date: Option<DateTime<Utc>>,
    /// 初期状態（DRAFT または ACTIVE、省略時 DRAFT）
    pub status: Option<DocumentStatus>,
    pub change_description: Option<String>,
    pub approval_workflow_id: Option<Uuid>,

    #[validate(nested)]
    pub file: Option<FilePayload>,
}

/// 部分更新。None のフィールドは変更しない
///
/// `file` があるか `is_new_version` が true のとき新しいバージョンになる。
/// それ以外はメタデータのみの更新でバージョンとファイルは変わらない。
#[derive(Deserialize, Serialize, Debug, Clone, Default, Validate)]
pub struct UpdateDocumentRequest {
    #[validate(length(
        min = 1,
        max = TITLE_MAX_LENGTH,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(
        min = 1,
        max = DOCUMENT_TYPE_MAX_LENGTH,
        message = "Document type must be between 1 and 100 characters"
    ))]
    pub document_type: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub access_level: Option<DocumentAccessLevel>,
    pub access_groups: Option<Vec<String>>,
    pub related_entities: Option<Vec<Value>>,
    pub custom_fields: Option<Value>,
    pub project_id: Option<Uuid>,
    pub folder_id: Option<Uuid>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub change_description: Option<String>,
    pub is_new_version: Option<bool>,
    pub approval_workflow_id: Option<Uuid>,

    #[validate(nested)]
    pub file: Option<FilePayload>,
}

impl UpdateDocumentRequest {
    /// この更新で新しいバージョンを作るか
    pub fn creates_new_version(&self, has_file: bool) -> bool {
        has_file || self.is_new_version == Some(true)
    }
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DocumentDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub document_type: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub access_level: DocumentAccessLevel,
    pub access_groups: Vec<String>,
    pub related_entities: Value,
    pub custom_fields: Value,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub file_type: Option<String>,
    pub version: String,
    pub status: DocumentStatus,
    pub project_id: Option<Uuid>,
    pub folder_id: Option<Uuid>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
    pub expiration_date: Option<DateTime<Utc>>,
}

impl From<document_model::Model> for DocumentDto {
    fn from(model: document_model::Model) -> Self {
        Self {
            tags: model.tags(),
            access_level: model.access_level(),
            access_groups: model.access_groups(),
            status: model.status(),
            id: model.id,
            title: model.title,
            description: model.description,
            document_type: model.document_type,
            category: model.category,
            related_entities: model.related_entities,
            custom_fields: model.custom_fields,
            file_url: model.file_url,
            file_name: model.file_name,
            file_size: model.file_size,
            file_type: model.file_type,
            version: model.version,
            project_id: model.project_id,
            folder_id: model.folder_id,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_by: model.updated_by,
            updated_at: model.updated_at,
            expiration_date: model.expiration_date,
        }
    }
}
