// document-backend/src/service/access_service.rs

use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::share_dto::ShareDocumentRequest;
use crate::config::app::ShareConfig;
use crate::domain::document_access_log_model::{self, Model as DocumentAccessLog};
use crate::domain::document_model::Model as Document;
use crate::domain::document_share_model::Model as DocumentShare;
use crate::domain::share_types::{AccessAction, ShareStatus};
use crate::error::{AppError, AppResult};
use crate::log_with_context;
use crate::store::DocumentStore;
use crate::utils::error_helper::{internal_server_error, not_found_error, validation_error};
use crate::utils::password::{hash_share_password, verify_share_password};
use crate::utils::token::{build_share_link, generate_share_token};

/// アクセスログ記録の結果
///
/// 記録に失敗しても呼び出し元の処理は失敗させない。
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLogOutcome {
    Recorded,
    Dropped,
}

impl AccessLogOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded)
    }
}

/// 共有リンク経由で解決されたドキュメント
#[derive(Debug, Clone)]
pub struct SharedDocument {
    pub document: Document,
    pub share: DocumentShare,
}

pub struct AccessService {
    store: Arc<dyn DocumentStore>,
    share_link_base_path: String,
}

impl AccessService {
    pub fn new(store: Arc<dyn DocumentStore>, config: &ShareConfig) -> Self {
        Self {
            store,
            share_link_base_path: config.link_base_path.clone(),
        }
    }

    /// アクセスログを追記する（失敗はWARNログと `Dropped` で報告）
    ///
    /// SHARE_ACCESS の場合は対象バージョンのACTIVEな共有のアクセス数も加算する。
    /// 加算は少なくとも1回行われればよい。
    pub async fn log_access(
        &self,
        document_id: Uuid,
        version: &str,
        action: AccessAction,
        user_id: Option<&str>,
        details: Option<Value>,
    ) -> AccessLogOutcome {
        let log = DocumentAccessLog::new(
            document_id,
            version,
            action,
            user_id.map(str::to_string),
            details,
        );

        if let Err(e) = self.store.create_access_log(log).await {
            log_with_context!(
                tracing::Level::WARN,
                "Failed to record document access",
                "document_id" => document_id,
                "version" => version,
                "action" => action.as_str(),
                "error" => e.to_string(),
            );
            return AccessLogOutcome::Dropped;
        }

        if action.counts_share_access() {
            if let Err(e) = self
                .store
                .increment_share_access_count(document_id, version)
                .await
            {
                log_with_context!(
                    tracing::Level::WARN,
                    "Failed to update share access count",
                    "document_id" => document_id,
                    "version" => version,
                    "error" => e.to_string(),
                );
            }
        }

        AccessLogOutcome::Recorded
    }

    /// ドキュメントの現在のバージョンを共有する
    pub async fn share(
        &self,
        document_id: Uuid,
        request: ShareDocumentRequest,
        user_id: &str,
    ) -> AppResult<DocumentShare> {
        request.validate()?;

        let now = Utc::now();
        if request.expiration_date.is_some_and(|expires| expires <= now) {
            return Err(validation_error(
                "expiration_date",
                "Expiration date must be in the future",
            ));
        }

        let document = self.find_document(document_id, "access_service::share").await?;

        let (share_token, share_link) = if request.issues_link() {
            let token = generate_share_token();
            let link = build_share_link(&self.share_link_base_path, &document.id, &token);
            (Some(token), Some(link))
        } else {
            (None, None)
        };

        let password_hash = request
            .password
            .as_deref()
            .map(hash_share_password)
            .transpose()
            .map_err(|e| {
                internal_server_error(e, "access_service::share", "Failed to protect share")
            })?;

        let share = DocumentShare {
            id: Uuid::new_v4(),
            document_id: document.id,
            document_version: document.version.clone(),
            share_type: request.share_type.as_str().to_string(),
            recipient_type: request.recipient_type.as_str().to_string(),
            recipient_id: request.recipient_id,
            access_level: request.access_level.as_str().to_string(),
            share_token,
            share_link,
            expiration_date: request.expiration_date,
            password_hash,
            status: ShareStatus::Active.as_str().to_string(),
            access_count: 0,
            last_accessed: None,
            created_by: user_id.to_string(),
            created_at: now,
        };

        let created = self.store.create_share(share).await?;

        let _ = self
            .log_access(
                document.id,
                &document.version,
                AccessAction::Share,
                Some(user_id),
                Some(json!({
                    "share_id": created.id,
                    "share_type": created.share_type,
                    "access_level": created.access_level,
                })),
            )
            .await;

        Ok(created)
    }

    /// 共有トークンでドキュメントを取得する（認証なし）
    pub async fn access_shared(
        &self,
        document_id: Uuid,
        token: &str,
        password: Option<&str>,
    ) -> AppResult<SharedDocument> {
        let share = self
            .store
            .find_share_by_token(token)
            .await?
            .filter(|share| share.document_id == document_id)
            .ok_or_else(|| {
                not_found_error("Share", &document_id.to_string(), "access_service::access_shared")
            })?;

        if !share.is_active() {
            return Err(AppError::Forbidden("Share has been revoked".to_string()));
        }
        if share.is_expired(Utc::now()) {
            return Err(AppError::Forbidden("Share has expired".to_string()));
        }

        if let Some(hash) = &share.password_hash {
            let password = password
                .ok_or_else(|| AppError::Unauthorized("Share password required".to_string()))?;
            let valid = verify_share_password(password, hash).map_err(|e| {
                internal_server_error(e, "access_service::access_shared", "Failed to verify share")
            })?;
            if !valid {
                return Err(AppError::Unauthorized("Invalid share password".to_string()));
            }
        }

        let document = self
            .find_document(document_id, "access_service::access_shared")
            .await?;

        let _ = self
            .log_access(
                document.id,
                &share.document_version,
                AccessAction::ShareAccess,
                None,
                Some(json!({ "share_id": share.id })),
            )
            .await;

        Ok(SharedDocument { document, share })
    }

    /// 共有を無効化する（作成者のみ）
    pub async fn revoke_share(&self, share_id: Uuid, user_id: &str) -> AppResult<DocumentShare> {
        let mut share = self.store.find_share(share_id).await?.ok_or_else(|| {
            not_found_error("Share", &share_id.to_string(), "access_service::revoke_share")
        })?;

        if share.created_by != user_id {
            return Err(AppError::Forbidden(
                "Only the creator can revoke a share".to_string(),
            ));
        }
        if !share.is_active() {
            return Ok(share);
        }

        share.status = ShareStatus::Revoked.as_str().to_string();
        let revoked = self.store.update_share(share).await?;

        log_with_context!(
            tracing::Level::INFO,
            "Share revoked",
            "share_id" => revoked.id,
            "document_id" => revoked.document_id,
            "user_id" => user_id,
        );

        Ok(revoked)
    }

    /// 新しい順
    pub async fn list_access_logs(
        &self,
        document_id: Uuid,
    ) -> AppResult<Vec<document_access_log_model::Model>> {
        self.find_document(document_id, "access_service::list_access_logs")
            .await?;
        self.store.find_access_logs(document_id).await
    }

    async fn find_document(&self, document_id: Uuid, context: &str) -> AppResult<Document> {
        self.store
            .find_document(document_id)
            .await?
            .ok_or_else(|| not_found_error("Document", &document_id.to_string(), context))
    }
}
