// document-backend/src/api/dto/share_dto.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::document_share_model;
use crate::domain::share_types::{RecipientType, ShareAccessLevel, ShareType};

use super::document_dto::DocumentDto;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct ShareDocumentRequest {
    pub share_type: ShareType,
    pub recipient_type: RecipientType,
    #[validate(length(min = 1, max = 255, message = "Recipient must be between 1 and 255 characters"))]
    pub recipient_id: Option<String>,
    pub access_level: ShareAccessLevel,
    pub expiration_date: Option<DateTime<Utc>>,
    #[validate(length(min = 8, max = 128, message = "Share password must be between 8 and 128 characters"))]
    pub password: Option<String>,
}

impl ShareDocumentRequest {
    /// 共有リンク（トークン）を発行する共有か
    pub fn issues_link(&self) -> bool {
        self.share_type == ShareType::Public || self.recipient_type == RecipientType::Link
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct AccessSharedRequest {
    pub password: Option<String>,
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ShareDto {
    pub id: Uuid,
    pub document_id: Uuid,
    pub document_version: String,
    pub share_type: String,
    pub recipient_type: String,
    pub recipient_id: Option<String>,
    pub access_level: String,
    pub share_token: Option<String>,
    pub share_link: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub password_protected: bool,
    pub status: String,
    pub access_count: i32,
    pub last_accessed: Option<DateTime<Utc>>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl From<document_share_model::Model> for ShareDto {
    fn from(model: document_share_model::Model) -> Self {
        Self {
            password_protected: model.requires_password(),
            id: model.id,
            document_id: model.document_id,
            document_version: model.document_version,
            share_type: model.share_type,
            recipient_type: model.recipient_type,
            recipient_id: model.recipient_id,
            access_level: model.access_level,
            share_token: model.share_token,
            share_link: model.share_link,
            expiration_date: model.expiration_date,
            status: model.status,
            access_count: model.access_count,
            last_accessed: model.last_accessed,
            created_by: model.created_by,
            created_at: model.created_at,
        }
    }
}

/// 共有リンク経由で取得したドキュメント
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SharedDocumentDto {
    pub document: DocumentDto,
    pub document_version: String,
    pub access_level: Option<ShareAccessLevel>,
    pub expiration_date: Option<DateTime<Utc>>,
}
