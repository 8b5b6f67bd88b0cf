// tests/unit/versioning_tests.rs

use document_backend::api::dto::document_dto::UpdateDocumentRequest;
use document_backend::domain::document_model::Model as Document;
use document_backend::domain::document_status::{DocumentStatus, VersionStatus};
use document_backend::error::AppError;
use document_backend::store::DocumentStore;
use uuid::Uuid;

use crate::common::{document_request, pdf, TestContext};

fn title_patch(title: &str) -> UpdateDocumentRequest {
    UpdateDocumentRequest {
        title: Some(title.to_string()),
        ..Default::default()
    }
}

fn new_version_patch() -> UpdateDocumentRequest {
    UpdateDocumentRequest {
        is_new_version: Some(true),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_document_starts_at_initial_version() {
    let ctx = TestContext::new();
    let document = ctx
        .state
        .document_service
        .create_document(document_request("D1"), Some(pdf("plan.pdf")), "alice")
        .await
        .unwrap();

    assert_eq!(document.version, "1.0");
    assert_eq!(document.status(), DocumentStatus::Draft);
    assert_eq!(document.file_name.as_deref(), Some("plan.pdf"));
    assert_eq!(document.file_type.as_deref(), Some("application/pdf"));
    assert!(document.file_url.is_some());

    let versions = ctx.store.versions_of(document.id);
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].version, "1.0");
    assert!(versions[0].is_active());
    assert_eq!(versions[0].file_url, document.file_url);
}

#[tokio::test]
async fn test_scenario_metadata_update_then_file_update() {
    let ctx = TestContext::new();
    let service = &ctx.state.document_service;
    let d1 = ctx.create_document("D1").await;
    assert_eq!(d1.version, "1.0");

    let updated = service
        .update_document(d1.id, title_patch("x"), None, "alice")
        .await
        .unwrap();
    assert_eq!(updated.title, "x");
    assert_eq!(updated.version, "1.0");

    let updated = service
        .update_document(d1.id, UpdateDocumentRequest::default(), Some(pdf("f.pdf")), "alice")
        .await
        .unwrap();
    assert_eq!(updated.version, "1.1");

    let versions = ctx.store.versions_of(d1.id);
    let v1_0 = versions.iter().find(|v| v.version == "1.0").unwrap();
    let v1_1 = versions.iter().find(|v| v.version == "1.1").unwrap();
    assert_eq!(v1_0.status, VersionStatus::Superseded.as_str());
    assert_eq!(v1_1.status, VersionStatus::Active.as_str());
    assert_eq!(v1_1.file_name.as_deref(), Some("f.pdf"));
}

#[tokio::test]
async fn test_exactly_one_active_version_after_any_update_sequence() {
    let ctx = TestContext::new();
    let service = &ctx.state.document_service;
    let document = ctx.create_document("Site plan").await;

    let steps: Vec<(UpdateDocumentRequest, bool)> = vec![
        (title_patch("rev a"), false),
        (UpdateDocumentRequest::default(), true),
        (new_version_patch(), false),
        (title_patch("rev b"), false),
        (new_version_patch(), true),
        (
            UpdateDocumentRequest {
                is_new_version: Some(false),
                ..Default::default()
            },
            false,
        ),
    ];

    for (patch, with_file) in steps {
        let file = with_file.then(|| pdf("rev.pdf"));
        service
            .update_document(document.id, patch, file, "alice")
            .await
            .unwrap();

        let active = ctx
            .store
            .versions_of(document.id)
            .into_iter()
            .filter(|v| v.is_active())
            .count();
        assert_eq!(active, 1);
    }

    let current = ctx.store.document(document.id).unwrap();
    assert_eq!(current.version, "1.3");
    assert_eq!(ctx.store.versions_of(document.id).len(), 4);
}

#[tokio::test]
async fn test_new_version_bumps_minor_only() {
    let ctx = TestContext::new();
    let service = &ctx.state.document_service;
    let document = ctx.create_document("Site survey").await;

    for _ in 0..3 {
        service
            .update_document(document.id, new_version_patch(), None, "alice")
            .await
            .unwrap();
    }
    assert_eq!(ctx.store.document(document.id).unwrap().version, "1.3");

    // パッチの内容に関係なく 1.4 になる
    let patch = UpdateDocumentRequest {
        title: Some("Site survey v2".to_string()),
        document_type: Some("SURVEY".to_string()),
        is_new_version: Some(true),
        ..Default::default()
    };
    let updated = service
        .update_document(document.id, patch, Some(pdf("v2.pdf")), "alice")
        .await
        .unwrap();
    assert_eq!(updated.version, "1.4");
}

#[tokio::test]
async fn test_metadata_only_update_leaves_file_and_versions_untouched() {
    let ctx = TestContext::new();
    let service = &ctx.state.document_service;
    let document = service
        .create_document(document_request("Report"), Some(pdf("report.pdf")), "alice")
        .await
        .unwrap();
    let versions_before = ctx.store.versions_of(document.id);

    let updated = service
        .update_document(document.id, title_patch("Report (final)"), None, "bob")
        .await
        .unwrap();

    assert_eq!(updated.title, "Report (final)");
    assert_eq!(updated.version, document.version);
    assert_eq!(updated.file_url, document.file_url);
    assert_eq!(updated.file_pointer(), document.file_pointer());
    assert_eq!(updated.updated_by, "bob");
    assert_eq!(ctx.store.versions_of(document.id), versions_before);
}

#[tokio::test]
async fn test_new_version_without_file_reuses_current_file() {
    let ctx = TestContext::new();
    let service = &ctx.state.document_service;
    let document = service
        .create_document(document_request("Manual"), Some(pdf("manual.pdf")), "alice")
        .await
        .unwrap();

    let updated = service
        .update_document(document.id, new_version_patch(), None, "alice")
        .await
        .unwrap();

    assert_eq!(updated.version, "1.1");
    assert_eq!(updated.file_pointer(), document.file_pointer());
    let active = ctx
        .store
        .versions_of(document.id)
        .into_iter()
        .find(|v| v.is_active())
        .unwrap();
    assert_eq!(active.version, "1.1");
    assert_eq!(active.file_url, document.file_url);
}

#[tokio::test]
async fn test_missing_folder_fails_before_any_write() {
    let ctx = TestContext::new();
    let mut request = document_request("Orphan");
    request.folder_id = Some(Uuid::new_v4());

    let result = ctx
        .state
        .document_service
        .create_document(request, Some(pdf("orphan.pdf")), "alice")
        .await;

    assert!(matches!(
        result,
        Err(AppError::ReferenceNotFound { entity: "folder", .. })
    ));
    assert_eq!(ctx.store.document_count(), 0);
    assert_eq!(ctx.files.stored_count(), 0);
    assert_eq!(ctx.store.write_count(), 0);
}

#[tokio::test]
async fn test_update_with_missing_project_fails_before_any_write() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Budget").await;
    let writes_before = ctx.store.write_count();
    let missing_project = Uuid::new_v4();

    let patch = UpdateDocumentRequest {
        title: Some("Budget 2026".to_string()),
        project_id: Some(missing_project),
        ..Default::default()
    };
    let result = ctx
        .state
        .document_service
        .update_document(document.id, patch, Some(pdf("budget.pdf")), "alice")
        .await;

    match result {
        Err(AppError::ReferenceNotFound { entity, id }) => {
            assert_eq!(entity, "project");
            assert_eq!(id, missing_project);
        }
        other => panic!("expected ReferenceNotFound, got {:?}", other),
    }
    assert_eq!(ctx.store.write_count(), writes_before);
    assert_eq!(ctx.store.document(document.id).unwrap(), document);
    assert_eq!(ctx.files.stored_count(), 0);
}

#[tokio::test]
async fn test_update_missing_document_is_not_found() {
    let ctx = TestContext::new();
    let result = ctx
        .state
        .document_service
        .update_document(Uuid::new_v4(), title_patch("x"), None, "alice")
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_initial_status_must_be_draft_or_active() {
    let ctx = TestContext::new();
    let mut request = document_request("Released");
    request.status = Some(DocumentStatus::Active);
    let document = ctx
        .state
        .document_service
        .create_document(request, None, "alice")
        .await
        .unwrap();
    assert_eq!(document.status(), DocumentStatus::Active);

    let mut request = document_request("Sneaky");
    request.status = Some(DocumentStatus::PendingApproval);
    let result = ctx
        .state
        .document_service
        .create_document(request, None, "alice")
        .await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn test_stale_metadata_write_keeps_approval_status() {
    let ctx = TestContext::new();
    let workflow = ctx.create_workflow(&["bob"], false).await;
    let document = ctx.create_document("Interleaved").await;
    let stale = ctx.store.find_document(document.id).await.unwrap().unwrap();

    ctx.state
        .approval_service
        .start(document.id, workflow.id, "alice")
        .await
        .unwrap();

    // 承認開始より前に読み込んだ行で書き込む
    let written = ctx
        .store
        .update_document(Document {
            title: "Interleaved 2".to_string(),
            ..stale
        })
        .await
        .unwrap();

    assert_eq!(written.title, "Interleaved 2");
    assert_eq!(written.status(), DocumentStatus::PendingApproval);
    let stored = ctx.store.document(document.id).unwrap();
    assert_eq!(stored.status(), DocumentStatus::PendingApproval);
    assert_eq!(stored.title, "Interleaved 2");
}

#[tokio::test]
async fn test_new_version_during_approval_returns_to_draft() {
    let ctx = TestContext::new();
    let workflow = ctx.create_workflow(&["bob"], false).await;
    let document = ctx.create_document("Reworked").await;
    ctx.state
        .approval_service
        .start(document.id, workflow.id, "alice")
        .await
        .unwrap();

    let updated = ctx
        .state
        .document_service
        .update_document(document.id, new_version_patch(), None, "alice")
        .await
        .unwrap();

    assert_eq!(updated.version, "1.1");
    assert_eq!(updated.status(), DocumentStatus::Draft);
    let approvals = ctx.store.approvals_of(document.id);
    assert_eq!(approvals.len(), 1);
    assert!(!approvals[0].is_open());
}

#[tokio::test]
async fn test_list_versions_newest_first() {
    let ctx = TestContext::new();
    let service = &ctx.state.document_service;
    let document = ctx.create_document("Drawing").await;
    service
        .update_document(document.id, new_version_patch(), None, "alice")
        .await
        .unwrap();
    service
        .update_document(document.id, new_version_patch(), None, "alice")
        .await
        .unwrap();

    let versions = service.list_versions(document.id).await.unwrap();
    let numbers: Vec<&str> = versions.iter().map(|v| v.version.as_str()).collect();
    assert_eq!(numbers, vec!["1.2", "1.1", "1.0"]);
}

#[tokio::test]
async fn test_mutations_are_logged() {
    let ctx = TestContext::new();
    let service = &ctx.state.document_service;
    let document = ctx.create_document("Logged").await;
    service
        .update_document(document.id, title_patch("Logged 2"), None, "bob")
        .await
        .unwrap();
    service
        .update_document(document.id, new_version_patch(), None, "bob")
        .await
        .unwrap();
    service.get_document(document.id, "carol").await.unwrap();

    let actions: Vec<(String, String)> = ctx
        .store
        .access_logs()
        .into_iter()
        .map(|log| (log.action, log.document_version))
        .collect();
    assert_eq!(
        actions,
        vec![
            ("CREATE".to_string(), "1.0".to_string()),
            ("UPDATE".to_string(), "1.0".to_string()),
            ("NEW_VERSION".to_string(), "1.1".to_string()),
            ("VIEW".to_string(), "1.1".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_update_with_workflow_starts_approval_for_new_version() {
    let ctx = TestContext::new();
    let workflow = ctx.create_workflow(&["bob"], false).await;
    let document = ctx.create_document("Contract").await;

    let patch = UpdateDocumentRequest {
        approval_workflow_id: Some(workflow.id),
        ..Default::default()
    };
    let updated = ctx
        .state
        .document_service
        .update_document(document.id, patch, Some(pdf("contract.pdf")), "alice")
        .await
        .unwrap();

    assert_eq!(updated.version, "1.1");
    assert_eq!(updated.status(), DocumentStatus::PendingApproval);
    let approvals = ctx.store.approvals_of(document.id);
    assert_eq!(approvals.len(), 1);
    assert_eq!(approvals[0].document_version, "1.1");
}

#[tokio::test]
async fn test_create_with_workflow_returns_pending_document() {
    let ctx = TestContext::new();
    let workflow = ctx.create_workflow(&["bob", "carol"], true).await;
    let mut request = document_request("Permit");
    request.approval_workflow_id = Some(workflow.id);

    let document = ctx
        .state
        .document_service
        .create_document(request, None, "alice")
        .await
        .unwrap();

    assert_eq!(document.status(), DocumentStatus::PendingApproval);
    assert_eq!(ctx.store.approvals_of(document.id).len(), 1);
}

#[tokio::test]
async fn test_archive_document() {
    let ctx = TestContext::new();
    let workflow = ctx.create_workflow(&["bob"], false).await;
    let document = ctx.create_document("Old memo").await;

    let approval = ctx
        .state
        .approval_service
        .start(document.id, workflow.id, "alice")
        .await
        .unwrap();
    let result = ctx
        .state
        .document_service
        .archive_document(document.id, "alice")
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    ctx.state
        .approval_service
        .cancel(approval.id, "alice")
        .await
        .unwrap();
    let archived = ctx
        .state
        .document_service
        .archive_document(document.id, "alice")
        .await
        .unwrap();
    assert_eq!(archived.status(), DocumentStatus::Archived);
    assert!(ctx
        .store
        .access_logs()
        .iter()
        .any(|log| log.action == "ARCHIVE"));
}

#[tokio::test]
async fn test_upload_failure_leaves_document_unchanged() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Fragile").await;
    ctx.files.fail_uploads(true);

    let result = ctx
        .state
        .document_service
        .update_document(document.id, title_patch("x"), Some(pdf("x.pdf")), "alice")
        .await;

    assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    assert_eq!(ctx.store.document(document.id).unwrap(), document);
    assert_eq!(ctx.store.versions_of(document.id).len(), 1);
}
