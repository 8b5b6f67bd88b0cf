// document-backend/src/domain/document_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document_status::{DocumentAccessLevel, DocumentStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub document_type: String,
    #[sea_orm(nullable)]
    pub category: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub access_level: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub access_groups: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub related_entities: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub custom_fields: Json,
    #[sea_orm(column_type = "Text", nullable)]
    pub file_url: Option<String>,
    #[sea_orm(nullable)]
    pub file_name: Option<String>,
    #[sea_orm(nullable)]
    pub file_size: Option<i64>,
    #[sea_orm(nullable)]
    pub file_type: Option<String>,
    pub version: String,
    pub status: String,
    #[sea_orm(nullable)]
    pub project_id: Option<Uuid>,
    #[sea_orm(nullable)]
    pub folder_id: Option<Uuid>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
    #[sea_orm(nullable)]
    pub expiration_date: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::document_folder_model::Entity",
        from = "Column::FolderId",
        to = "super::document_folder_model::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Folder,

    #[sea_orm(
        belongs_to = "super::project_model::Entity",
        from = "Column::ProjectId",
        to = "super::project_model::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Project,

    #[sea_orm(has_many = "super::document_version_model::Entity")]
    Versions,

    #[sea_orm(has_many = "super::document_approval_model::Entity")]
    Approvals,
}

impl Related<super::document_folder_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Folder.def()
    }
}

impl Related<super::project_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::document_version_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Versions.def()
    }
}

impl Related<super::document_approval_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Approvals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 現在のファイルへのポインタ
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilePointer {
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub file_type: Option<String>,
}

impl Model {
    /// 保存されている文字列を状態に変換（不明な値はDRAFT扱い）
    pub fn status(&self) -> DocumentStatus {
        DocumentStatus::from_str(&self.status).unwrap_or_default()
    }

    pub fn access_level(&self) -> DocumentAccessLevel {
        DocumentAccessLevel::from_str(&self.access_level).unwrap_or_default()
    }

    pub fn tags(&self) -> Vec<String> {
        string_list(&self.tags)
    }

    pub fn access_groups(&self) -> Vec<String> {
        string_list(&self.access_groups)
    }

    pub fn file_pointer(&self) -> FilePointer {
        FilePointer {
            file_url: self.file_url.clone(),
            file_name: self.file_name.clone(),
            file_size: self.file_size,
            file_type: self.file_type.clone(),
        }
    }

    pub fn set_file_pointer(&mut self, file: FilePointer) {
        self.file_url = file.file_url;
        self.file_name = file.file_name;
        self.file_size = file.file_size;
        self.file_type = file.file_type;
    }
}

/// JSON配列のうち文字列要素のみを取り出す
pub fn string_list(value: &Json) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
