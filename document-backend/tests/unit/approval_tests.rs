// tests/unit/approval_tests.rs

use chrono::Duration;
use document_backend::api::dto::approval_dto::CreateWorkflowRequest;
use document_backend::api::dto::document_dto::UpdateDocumentRequest;
use document_backend::domain::approval_status::{ApprovalDecision, ApprovalStatus, StepStatus};
use document_backend::domain::document_approval_model::Model as DocumentApproval;
use document_backend::domain::document_status::DocumentStatus;
use document_backend::error::AppError;
use document_backend::store::DocumentStore;
use uuid::Uuid;

use crate::common::{workflow_request, TestContext};

use ApprovalDecision::{Approved, Rejected};

#[tokio::test]
async fn test_start_creates_pending_approval_for_current_version() {
    let ctx = TestContext::new();
    let d1 = ctx.create_document("D1").await;
    let w1 = ctx.create_workflow(&["bob", "carol"], true).await;

    let approval = ctx
        .state
        .approval_service
        .start(d1.id, w1.id, "alice")
        .await
        .unwrap();

    let approvers = approval.approvers().unwrap();
    assert_eq!(approvers.len(), 2);
    assert_eq!(approvers[0].user_id, "bob");
    assert_eq!(approvers[0].status, StepStatus::Pending);
    assert_eq!(approvers[1].user_id, "carol");
    assert_eq!(approvers[1].status, StepStatus::Pending);
    assert_eq!(approval.current_step, 0);
    assert_eq!(approval.status(), Some(ApprovalStatus::Pending));
    assert_eq!(approval.document_version, "1.0");
    assert_eq!(approval.initiated_by, "alice");
    assert_eq!(approval.due_date, Some(approval.start_date + Duration::days(7)));

    let document = ctx.store.document(d1.id).unwrap();
    assert_eq!(document.status(), DocumentStatus::PendingApproval);
}

#[tokio::test]
async fn test_scenario_out_of_order_decision_is_accepted() {
    let ctx = TestContext::new();
    let d1 = ctx.create_document("D1").await;
    let w1 = ctx.create_workflow(&["bob", "carol"], true).await;
    let service = &ctx.state.approval_service;
    let approval = service.start(d1.id, w1.id, "alice").await.unwrap();

    let decided = service
        .decide(approval.id, 1, "carol", Approved, None)
        .await
        .unwrap();

    let approvers = decided.approvers().unwrap();
    assert_eq!(approvers[0].status, StepStatus::Pending);
    assert_eq!(approvers[1].status, StepStatus::Approved);
    assert!(approvers[1].date.is_some());
    assert_eq!(decided.status(), Some(ApprovalStatus::InProgress));
    assert!(decided.completion_date.is_none());
    assert_eq!(
        ctx.store.document(d1.id).unwrap().status(),
        DocumentStatus::PendingApproval
    );
}

#[tokio::test]
async fn test_second_start_on_same_version_fails_without_new_row() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Contract").await;
    let workflow = ctx.create_workflow(&["bob"], false).await;
    let service = &ctx.state.approval_service;

    service.start(document.id, workflow.id, "alice").await.unwrap();
    let result = service.start(document.id, workflow.id, "alice").await;

    match result {
        Err(AppError::ApprovalAlreadyActive {
            document_id,
            version,
        }) => {
            assert_eq!(document_id, document.id);
            assert_eq!(version, "1.0");
        }
        other => panic!("expected ApprovalAlreadyActive, got {:?}", other),
    }
    assert_eq!(ctx.store.approvals_of(document.id).len(), 1);
}

#[tokio::test]
async fn test_rejection_is_final() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Design review").await;
    let workflow = ctx.create_workflow(&["bob", "carol", "dave"], true).await;
    let service = &ctx.state.approval_service;
    let approval = service.start(document.id, workflow.id, "alice").await.unwrap();

    let step1 = service
        .decide(approval.id, 0, "bob", Approved, None)
        .await
        .unwrap();
    assert_eq!(step1.status(), Some(ApprovalStatus::InProgress));
    assert_eq!(step1.current_step, 1);

    let step2 = service
        .decide(
            approval.id,
            1,
            "carol",
            Rejected,
            Some("Missing load calculations".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(step2.status(), Some(ApprovalStatus::Rejected));
    assert!(step2.completion_date.is_some());
    let approvers = step2.approvers().unwrap();
    assert_eq!(approvers[1].status, StepStatus::Rejected);
    assert_eq!(
        approvers[1].comments.as_deref(),
        Some("Missing load calculations")
    );
    assert_eq!(approvers[2].status, StepStatus::Pending);
    assert_eq!(
        ctx.store.document(document.id).unwrap().status(),
        DocumentStatus::Rejected
    );

    // 残りのステップはもう判断できない
    let result = service.decide(approval.id, 2, "dave", Approved, None).await;
    assert!(matches!(
        result,
        Err(AppError::ApprovalClosed {
            status: ApprovalStatus::Rejected,
            ..
        })
    ));
}

#[tokio::test]
async fn test_all_approved_in_either_order_activates_document() {
    for order in [[0usize, 1], [1, 0]] {
        let ctx = TestContext::new();
        let document = ctx.create_document("Two step").await;
        let workflow = ctx.create_workflow(&["bob", "carol"], false).await;
        let service = &ctx.state.approval_service;
        let approval = service.start(document.id, workflow.id, "alice").await.unwrap();

        let users = ["bob", "carol"];
        let mut last = None;
        for step in order {
            last = Some(
                service
                    .decide(approval.id, step, users[step], Approved, None)
                    .await
                    .unwrap(),
            );
        }

        let last = last.unwrap();
        assert_eq!(last.status(), Some(ApprovalStatus::Approved));
        assert!(last.completion_date.is_some());
        assert_eq!(
            ctx.store.document(document.id).unwrap().status(),
            DocumentStatus::Active
        );
    }
}

#[tokio::test]
async fn test_step_out_of_range_is_invalid() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Range").await;
    let workflow = ctx.create_workflow(&["bob", "carol"], false).await;
    let service = &ctx.state.approval_service;
    let approval = service.start(document.id, workflow.id, "alice").await.unwrap();

    let result = service.decide(approval.id, 2, "bob", Approved, None).await;
    assert!(matches!(result, Err(AppError::InvalidStep { step: 2, .. })));
}

#[tokio::test]
async fn test_wrong_approver_is_rejected_without_changes() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Auth").await;
    let workflow = ctx.create_workflow(&["bob", "carol"], false).await;
    let service = &ctx.state.approval_service;
    let approval = service.start(document.id, workflow.id, "alice").await.unwrap();

    let result = service
        .decide(approval.id, 0, "carol", Approved, None)
        .await;
    match result {
        Err(AppError::NotAuthorizedApprover { step, user_id, .. }) => {
            assert_eq!(step, 0);
            assert_eq!(user_id, "carol");
        }
        other => panic!("expected NotAuthorizedApprover, got {:?}", other),
    }

    assert_eq!(service.get(approval.id).await.unwrap(), approval);
    assert_eq!(
        ctx.store.document(document.id).unwrap().status(),
        DocumentStatus::PendingApproval
    );
}

#[tokio::test]
async fn test_closed_check_precedes_step_range() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Order").await;
    let workflow = ctx.create_workflow(&["bob"], false).await;
    let service = &ctx.state.approval_service;
    let approval = service.start(document.id, workflow.id, "alice").await.unwrap();
    service
        .decide(approval.id, 0, "bob", Approved, None)
        .await
        .unwrap();

    let result = service.decide(approval.id, 9, "mallory", Approved, None).await;
    assert!(matches!(result, Err(AppError::ApprovalClosed { .. })));
}

#[tokio::test]
async fn test_unknown_approval_is_not_found() {
    let ctx = TestContext::new();
    let result = ctx
        .state
        .approval_service
        .decide(Uuid::new_v4(), 0, "bob", Approved, None)
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_start_requires_document_and_workflow() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Refs").await;
    let workflow = ctx.create_workflow(&["bob"], false).await;
    let service = &ctx.state.approval_service;

    let missing_document = service.start(Uuid::new_v4(), workflow.id, "alice").await;
    assert!(matches!(missing_document, Err(AppError::NotFound(_))));

    let missing_workflow = service.start(document.id, Uuid::new_v4(), "alice").await;
    assert!(matches!(missing_workflow, Err(AppError::NotFound(_))));
    assert!(ctx.store.approvals_of(document.id).is_empty());
}

#[tokio::test]
async fn test_cancel_restores_draft_and_allows_restart() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Cancel me").await;
    let workflow = ctx.create_workflow(&["bob"], false).await;
    let service = &ctx.state.approval_service;
    let approval = service.start(document.id, workflow.id, "alice").await.unwrap();

    let forbidden = service.cancel(approval.id, "bob").await;
    assert!(matches!(forbidden, Err(AppError::Forbidden(_))));

    let cancelled = service.cancel(approval.id, "alice").await.unwrap();
    assert_eq!(cancelled.status(), Some(ApprovalStatus::Cancelled));
    assert!(cancelled.completion_date.is_some());
    assert_eq!(
        ctx.store.document(document.id).unwrap().status(),
        DocumentStatus::Draft
    );

    let again = service.cancel(approval.id, "alice").await;
    assert!(matches!(
        again,
        Err(AppError::ApprovalClosed {
            status: ApprovalStatus::Cancelled,
            ..
        })
    ));

    service.start(document.id, workflow.id, "alice").await.unwrap();
    assert_eq!(ctx.store.approvals_of(document.id).len(), 2);
}

#[tokio::test]
async fn test_new_version_can_be_approved_separately() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Versioned").await;
    let workflow = ctx.create_workflow(&["bob"], false).await;
    let approvals = &ctx.state.approval_service;
    let first = approvals.start(document.id, workflow.id, "alice").await.unwrap();

    ctx.state
        .document_service
        .update_document(
            document.id,
            UpdateDocumentRequest {
                is_new_version: Some(true),
                ..Default::default()
            },
            None,
            "alice",
        )
        .await
        .unwrap();

    // 旧バージョンの承認は取り消され、ドキュメントは DRAFT に戻る
    let bumped = ctx.store.document(document.id).unwrap();
    assert_eq!(bumped.version, "1.1");
    assert_eq!(bumped.status(), DocumentStatus::Draft);
    let first = approvals.get(first.id).await.unwrap();
    assert_eq!(first.status(), Some(ApprovalStatus::Cancelled));
    assert!(first.completion_date.is_some());

    let second = approvals.start(document.id, workflow.id, "alice").await.unwrap();
    assert_eq!(second.document_version, "1.1");

    let result = approvals.decide(first.id, 0, "bob", Rejected, None).await;
    assert!(matches!(result, Err(AppError::ApprovalClosed { .. })));

    let current = ctx.store.document(document.id).unwrap();
    assert_eq!(current.version, "1.1");
    assert_eq!(current.status(), DocumentStatus::PendingApproval);
    let second = approvals.get(second.id).await.unwrap();
    assert_eq!(second.status(), Some(ApprovalStatus::Pending));
}

#[tokio::test]
async fn test_outcome_of_older_version_does_not_touch_document_status() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Moved on").await;
    let workflow = ctx.create_workflow(&["bob"], false).await;
    let approvals = &ctx.state.approval_service;
    let first = approvals.start(document.id, workflow.id, "alice").await.unwrap();

    ctx.state
        .document_service
        .update_document(
            document.id,
            UpdateDocumentRequest {
                is_new_version: Some(true),
                ..Default::default()
            },
            None,
            "alice",
        )
        .await
        .unwrap();
    approvals.start(document.id, workflow.id, "alice").await.unwrap();

    // 1.0 の承認結果が遅れて保存されても 1.1 の状態は変わらない
    let cancelled = approvals.get(first.id).await.unwrap();
    let late = DocumentApproval {
        status: ApprovalStatus::Rejected.as_str().to_string(),
        ..cancelled.clone()
    };
    ctx.store
        .update_approval(
            late,
            cancelled.updated_at,
            Some(DocumentStatus::Rejected),
            "bob",
        )
        .await
        .unwrap();

    let current = ctx.store.document(document.id).unwrap();
    assert_eq!(current.version, "1.1");
    assert_eq!(current.status(), DocumentStatus::PendingApproval);
}

#[tokio::test]
async fn test_start_for_superseded_version_is_a_conflict() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Raced").await;
    let workflow = ctx.create_workflow(&["bob"], false).await;
    let approval = ctx
        .state
        .approval_service
        .start(document.id, workflow.id, "alice")
        .await
        .unwrap();

    ctx.state
        .document_service
        .update_document(
            document.id,
            UpdateDocumentRequest {
                is_new_version: Some(true),
                ..Default::default()
            },
            None,
            "alice",
        )
        .await
        .unwrap();

    // start が 1.0 を読んだ直後に新バージョンが反映された状況
    let stale = DocumentApproval {
        id: Uuid::new_v4(),
        status: ApprovalStatus::Pending.as_str().to_string(),
        completion_date: None,
        ..approval
    };
    let err = ctx.store.create_approval(stale, "alice").await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(
        ctx.store.document(document.id).unwrap().status(),
        DocumentStatus::Draft
    );
}

#[tokio::test]
async fn test_strict_sequential_rejects_out_of_order_steps() {
    let ctx = TestContext::strict_sequential();
    let document = ctx.create_document("Strict").await;
    let workflow = ctx.create_workflow(&["bob", "carol"], true).await;
    let service = &ctx.state.approval_service;
    let approval = service.start(document.id, workflow.id, "alice").await.unwrap();

    let result = service.decide(approval.id, 1, "carol", Approved, None).await;
    assert!(matches!(result, Err(AppError::InvalidStep { step: 1, .. })));

    service
        .decide(approval.id, 0, "bob", Approved, None)
        .await
        .unwrap();
    let done = service
        .decide(approval.id, 1, "carol", Approved, None)
        .await
        .unwrap();
    assert_eq!(done.status(), Some(ApprovalStatus::Approved));
}

#[tokio::test]
async fn test_strict_order_uses_setting_captured_at_start() {
    let ctx = TestContext::strict_sequential();
    let document = ctx.create_document("Captured").await;
    let workflow = ctx.create_workflow(&["bob", "carol"], true).await;
    let service = &ctx.state.approval_service;
    let approval = service.start(document.id, workflow.id, "alice").await.unwrap();
    assert!(approval.is_sequential);

    // 判断時にワークフローを参照できなくても順序は守られる
    ctx.store.remove_workflow(workflow.id);

    let result = service.decide(approval.id, 1, "carol", Approved, None).await;
    assert!(matches!(result, Err(AppError::InvalidStep { step: 1, .. })));
    service
        .decide(approval.id, 0, "bob", Approved, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_strict_mode_ignores_non_sequential_workflows() {
    let ctx = TestContext::strict_sequential();
    let document = ctx.create_document("Parallel").await;
    let workflow = ctx.create_workflow(&["bob", "carol"], false).await;
    let service = &ctx.state.approval_service;
    let approval = service.start(document.id, workflow.id, "alice").await.unwrap();

    let decided = service
        .decide(approval.id, 1, "carol", Approved, None)
        .await
        .unwrap();
    assert_eq!(decided.status(), Some(ApprovalStatus::InProgress));
}

#[tokio::test]
async fn test_decisions_are_logged() {
    let ctx = TestContext::new();
    let document = ctx.create_document("Audit").await;
    let workflow = ctx.create_workflow(&["bob", "carol"], false).await;
    let service = &ctx.state.approval_service;
    let approval = service.start(document.id, workflow.id, "alice").await.unwrap();
    service
        .decide(approval.id, 0, "bob", Approved, None)
        .await
        .unwrap();
    service
        .decide(approval.id, 1, "carol", Rejected, None)
        .await
        .unwrap();

    let actions: Vec<String> = ctx
        .store
        .access_logs()
        .into_iter()
        .map(|log| log.action)
        .collect();
    assert_eq!(
        actions,
        vec!["CREATE", "SUBMIT_FOR_APPROVAL", "APPROVE", "REJECT"]
    );
}

#[tokio::test]
async fn test_workflow_without_steps_is_rejected() {
    let ctx = TestContext::new();
    let request = CreateWorkflowRequest {
        steps: Vec::new(),
        ..workflow_request(&[], false)
    };

    let result = ctx
        .state
        .approval_service
        .create_workflow(request, "alice")
        .await;
    assert!(matches!(result, Err(AppError::ValidationFailure(_))));
}

#[tokio::test]
async fn test_workflow_step_ids_are_assigned_in_order() {
    let ctx = TestContext::new();
    let workflow = ctx.create_workflow(&["bob", "carol", "dave"], true).await;

    let steps = workflow.steps().unwrap();
    let ids: Vec<&str> = steps.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["step-1", "step-2", "step-3"]);
    assert_eq!(steps[2].default_approver(), Some("dave"));
}
