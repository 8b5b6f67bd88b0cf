// document-backend/src/domain/document_version_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document_model::FilePointer;
use super::document_status::VersionStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document_versions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub document_id: Uuid,
    pub version: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub file_url: Option<String>,
    #[sea_orm(nullable)]
    pub file_name: Option<String>,
    #[sea_orm(nullable)]
    pub file_size: Option<i64>,
    #[sea_orm(nullable)]
    pub file_type: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub change_description: Option<String>,
    pub status: String,
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
    /// 新しいACTIVEなバージョン行を組み立てる
    pub fn new_active(
        document_id: Uuid,
        version: String,
        file: FilePointer,
        change_description: Option<String>,
        created_by: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            version,
            file_url: file.file_url,
            file_name: file.file_name,
            file_size: file.file_size,
            file_type: file.file_type,
            change_description,
            status: VersionStatus::Active.as_str().to_string(),
            created_by,
            created_at,
        }
    }

    pub fn is_active(&self) -> bool {
        VersionStatus::from_str(&self.status) == Some(VersionStatus::Active)
    }
}
