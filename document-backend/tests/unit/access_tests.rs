// tests/unit/access_tests.rs

use chrono::{Duration, Utc};
use document_backend::api::dto::document_dto::UpdateDocumentRequest;
use document_backend::api::dto::share_dto::ShareDocumentRequest;
use document_backend::domain::share_types::{
    AccessAction, RecipientType, ShareAccessLevel, ShareType,
};
use document_backend::error::AppError;
use document_backend::store::DocumentStore;
use serde_json::json;
use uuid::Uuid;

use crate::common::{pdf, TestContext};

fn public_share() -> ShareDocumentRequest {
    ShareDocumentRequest {
        share_type: ShareType::Public,
        recipient_type: RecipientType::Link,
        recipient_id: None,
        access_level: ShareAccessLevel::View,
        expiration_date: None,
        password: None,
    }
}

#[tokio::test]
async fn test_log_access_failure_is_reported_not_raised() {
    let ctx = TestContext::new();
    let document = ctx.create_document("D1").await;
    ctx.store.fail_access_logs(true);

    let outcome = ctx
        .state
        .access_service
        .log_access(
            document.id,
            &document.version,
            AccessAction::View,
            Some("alice"),
            None,
        )
        .await;
    assert!(!outcome.is_recorded());

    // 記録に失敗しても主処理は成功する
    let updated = ctx
        .state
        .document_service
        .update_document(
            document.id,
            UpdateDocumentRequest::default(),
            Some(pdf("v2.pdf")),
            "alice",
        )
        .await
        .unwrap();
    assert_eq!(updated.version, "1.1");
    assert_eq!(ctx.store.document(document.id).unwrap().version, "1.1");
    assert_eq!(ctx.store.access_logs().len(), 1); // CREATE のみ
}

#[tokio::test]
async fn test_log_access_records_entry() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Logged").await;

    let outcome = ctx
        .state
        .access_service
        .log_access(
            document.id,
            "1.0",
            AccessAction::Download,
            None,
            Some(json!({ "ip": "10.0.0.1" })),
        )
        .await;
    assert!(outcome.is_recorded());

    let last = ctx.store.access_logs().pop().unwrap();
    assert_eq!(last.action, "DOWNLOAD");
    assert_eq!(last.document_version, "1.0");
    assert!(last.user_id.is_none());
    assert_eq!(last.details, Some(json!({ "ip": "10.0.0.1" })));
}

#[tokio::test]
async fn test_share_access_increments_active_shares_of_version() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Shared").await;
    let access = &ctx.state.access_service;
    let first = access.share(document.id, public_share(), "alice").await.unwrap();
    let second = access.share(document.id, public_share(), "alice").await.unwrap();
    access.revoke_share(second.id, "alice").await.unwrap();

    let outcome = access
        .log_access(document.id, "1.0", AccessAction::ShareAccess, None, None)
        .await;
    assert!(outcome.is_recorded());

    let first = ctx.store.find_share(first.id).await.unwrap().unwrap();
    let second = ctx.store.find_share(second.id).await.unwrap().unwrap();
    assert_eq!(first.access_count, 1);
    assert!(first.last_accessed.is_some());
    assert_eq!(second.access_count, 0);
}

#[tokio::test]
async fn test_public_share_issues_unguessable_link() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Brochure").await;
    let access = &ctx.state.access_service;

    let first = access.share(document.id, public_share(), "alice").await.unwrap();
    let second = access.share(document.id, public_share(), "alice").await.unwrap();

    let token = first.share_token.clone().unwrap();
    assert_eq!(token.len(), 43); // 256 bit, URL-safe base64
    assert!(token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    assert_eq!(
        first.share_link.as_deref(),
        Some(format!("/share/{}/{}", document.id, token).as_str())
    );
    assert_ne!(first.share_token, second.share_token);
    assert_eq!(first.document_version, "1.0");
    assert_eq!(first.status, "ACTIVE");
}

#[tokio::test]
async fn test_direct_user_share_has_no_token() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Internal memo").await;
    let request = ShareDocumentRequest {
        share_type: ShareType::Internal,
        recipient_type: RecipientType::User,
        recipient_id: Some("bob".to_string()),
        access_level: ShareAccessLevel::Comment,
        ..public_share()
    };

    let share = ctx
        .state
        .access_service
        .share(document.id, request, "alice")
        .await
        .unwrap();
    assert!(share.share_token.is_none());
    assert!(share.share_link.is_none());
    assert_eq!(share.recipient_id.as_deref(), Some("bob"));
    assert_eq!(share.access_level(), Some(ShareAccessLevel::Comment));
}

#[tokio::test]
async fn test_share_missing_document_is_not_found() {
    let ctx = TestContext::new();
    let result = ctx
        .state
        .access_service
        .share(Uuid::new_v4(), public_share(), "alice")
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_share_expiration_must_be_in_future() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Stale").await;
    let request = ShareDocumentRequest {
        expiration_date: Some(Utc::now() - Duration::hours(1)),
        ..public_share()
    };
    let result = ctx
        .state
        .access_service
        .share(document.id, request, "alice")
        .await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn test_password_protected_share() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Confidential").await;
    let access = &ctx.state.access_service;
    let request = ShareDocumentRequest {
        password: Some("correct horse battery".to_string()),
        ..public_share()
    };
    let share = access.share(document.id, request, "alice").await.unwrap();
    let token = share.share_token.clone().unwrap();

    let hash = share.password_hash.clone().unwrap();
    assert_ne!(hash, "correct horse battery");
    assert!(hash.starts_with("$argon2"));

    let missing = access.access_shared(document.id, &token, None).await;
    assert!(matches!(missing, Err(AppError::Unauthorized(_))));

    let wrong = access
        .access_shared(document.id, &token, Some("wrong password"))
        .await;
    assert!(matches!(wrong, Err(AppError::Unauthorized(_))));

    let shared = access
        .access_shared(document.id, &token, Some("correct horse battery"))
        .await
        .unwrap();
    assert_eq!(shared.document.id, document.id);
}

#[tokio::test]
async fn test_access_shared_logs_and_counts() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Flyer").await;
    let access = &ctx.state.access_service;
    let share = access.share(document.id, public_share(), "alice").await.unwrap();
    let token = share.share_token.clone().unwrap();

    access.access_shared(document.id, &token, None).await.unwrap();
    access.access_shared(document.id, &token, None).await.unwrap();

    let stored = ctx.store.find_share(share.id).await.unwrap().unwrap();
    assert_eq!(stored.access_count, 2);
    let share_accesses = ctx
        .store
        .access_logs()
        .into_iter()
        .filter(|log| log.action == "SHARE_ACCESS")
        .count();
    assert_eq!(share_accesses, 2);
}

#[tokio::test]
async fn test_shared_link_keeps_pointing_at_shared_version() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Evolving").await;
    let access = &ctx.state.access_service;
    let share = access.share(document.id, public_share(), "alice").await.unwrap();
    ctx.state
        .document_service
        .update_document(document.id, UpdateDocumentRequest::default(), Some(pdf("v2.pdf")), "alice")
        .await
        .unwrap();

    let token = share.share_token.clone().unwrap();
    let shared = access.access_shared(document.id, &token, None).await.unwrap();
    assert_eq!(shared.share.document_version, "1.0");
    assert_eq!(shared.document.version, "1.1");

    let last = ctx.store.access_logs().pop().unwrap();
    assert_eq!(last.action, "SHARE_ACCESS");
    assert_eq!(last.document_version, "1.0");
    let stored = ctx.store.find_share(share.id).await.unwrap().unwrap();
    assert_eq!(stored.access_count, 1);
}

#[tokio::test]
async fn test_revoked_and_expired_shares_are_forbidden() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Temporary").await;
    let access = &ctx.state.access_service;

    let revoked = access.share(document.id, public_share(), "alice").await.unwrap();
    let other_user = access.revoke_share(revoked.id, "mallory").await;
    assert!(matches!(other_user, Err(AppError::Forbidden(_))));
    access.revoke_share(revoked.id, "alice").await.unwrap();
    // 二度目の取り消しはそのまま成功する
    let again = access.revoke_share(revoked.id, "alice").await.unwrap();
    assert_eq!(again.status, "REVOKED");

    let result = access
        .access_shared(document.id, revoked.share_token.as_deref().unwrap(), None)
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    let mut expiring = access.share(document.id, public_share(), "alice").await.unwrap();
    expiring.expiration_date = Some(Utc::now() - Duration::minutes(1));
    let expiring = ctx.store.update_share(expiring).await.unwrap();
    let result = access
        .access_shared(document.id, expiring.share_token.as_deref().unwrap(), None)
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn test_token_of_other_document_is_not_found() {
    let ctx = TestContext::new();
    let first = ctx.create_document("First").await;
    let second = ctx.create_document("Second").await;
    let access = &ctx.state.access_service;
    let share = access.share(first.id, public_share(), "alice").await.unwrap();

    let result = access
        .access_shared(second.id, share.share_token.as_deref().unwrap(), None)
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let result = access.access_shared(first.id, "not-a-token", None).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_access_logs_are_listed_newest_first() {
    let ctx = TestContext::new();
    let document = ctx.create_document("History").await;
    ctx.state
        .document_service
        .get_document(document.id, "bob")
        .await
        .unwrap();

    let logs = ctx
        .state
        .access_service
        .list_access_logs(document.id)
        .await
        .unwrap();
    let actions: Vec<&str> = logs.iter().map(|log| log.action.as_str()).collect();
    assert_eq!(actions, vec!["VIEW", "CREATE"]);

    let missing = ctx
        .state
        .access_service
        .list_access_logs(Uuid::new_v4())
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}
