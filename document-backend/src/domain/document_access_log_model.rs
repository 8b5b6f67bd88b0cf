// document-backend/src/domain/document_access_log_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::share_types::AccessAction;

/// 追記専用のアクセスログ
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document_access_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub document_id: Uuid,
    pub document_version: String,
    #[sea_orm(nullable)]
    pub user_id: Option<String>,
    pub action: String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub details: Option<Json>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(
        document_id: Uuid,
        document_version: &str,
        action: AccessAction,
        user_id: Option<String>,
        details: Option<Json>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            document_version: document_version.to_string(),
            user_id,
            action: action.as_str().to_string(),
            details,
            created_at: Utc::now(),
        }
    }
}
