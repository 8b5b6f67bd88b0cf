// document-backend/src/domain/document_share_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::share_types::{ShareAccessLevel, ShareStatus, ShareType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document_shares")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub document_id: Uuid,
    pub document_version: String,
    pub share_type: String,
    pub recipient_type: String,
    #[sea_orm(nullable)]
    pub recipient_id: Option<String>,
    pub access_level: String,
    #[sea_orm(unique, nullable)]
    pub share_token: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub share_link: Option<String>,
    #[sea_orm(nullable)]
    pub expiration_date: Option<DateTime<Utc>>,
    // パスワードはハッシュのみを保持し、レスポンスには含めない
    #[serde(skip_serializing)]
    #[sea_orm(nullable)]
    pub password_hash: Option<String>,
    pub status: String,
    pub access_count: i32,
    #[sea_orm(nullable)]
    pub last_accessed: Option<DateTime<Utc>>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::document_model::Entity",
        from = "Column::DocumentId",
        to = "super::document_model::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Document,
}

impl Related<super::document_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Document.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_active(&self) -> bool {
        self.status == ShareStatus::Active.as_str()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date.is_some_and(|expires| expires <= now)
    }

    pub fn share_type(&self) -> Option<ShareType> {
        ShareType::from_str(&self.share_type)
    }

    pub fn access_level(&self) -> Option<ShareAccessLevel> {
        ShareAccessLevel::from_str(&self.access_level)
    }

    pub fn requires_password(&self) -> bool {
        self.password_hash.is_some()
    }
}
