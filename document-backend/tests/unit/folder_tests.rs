// tests/unit/folder_tests.rs

use chrono::Utc;
use document_backend::api::dto::folder_dto::CreateFolderRequest;
use document_backend::domain::project_model::Model as Project;
use document_backend::error::AppError;
use document_backend::store::DocumentStore;
use uuid::Uuid;

use crate::common::{document_request, TestContext};

fn folder(name: &str, parent_id: Option<Uuid>) -> CreateFolderRequest {
    CreateFolderRequest {
        name: name.to_string(),
        description: None,
        parent_id,
        project_id: None,
    }
}

#[tokio::test]
async fn test_folder_paths_follow_parents() {
    let ctx = TestContext::new();
    let service = &ctx.state.folder_service;

    let root = service.create_folder(folder("Projects", None), "alice").await.unwrap();
    assert_eq!(root.path, "/");
    assert!(root.parent_id.is_none());

    let child = service
        .create_folder(folder("Bridge-A", Some(root.id)), "alice")
        .await
        .unwrap();
    assert_eq!(child.path, "/Projects/");
    assert_eq!(child.parent_id, Some(root.id));

    let grandchild = service
        .create_folder(folder("Drawings", Some(child.id)), "alice")
        .await
        .unwrap();
    assert_eq!(grandchild.path, "/Projects/Bridge-A/");

    assert_eq!(service.get_folder(grandchild.id).await.unwrap(), grandchild);
}

#[tokio::test]
async fn test_missing_parent_or_project_is_reference_error() {
    let ctx = TestContext::new();
    let service = &ctx.state.folder_service;

    let result = service
        .create_folder(folder("Lost", Some(Uuid::new_v4())), "alice")
        .await;
    assert!(matches!(
        result,
        Err(AppError::ReferenceNotFound { entity: "folder", .. })
    ));

    let mut request = folder("Lost", None);
    request.project_id = Some(Uuid::new_v4());
    let result = service.create_folder(request, "alice").await;
    assert!(matches!(
        result,
        Err(AppError::ReferenceNotFound { entity: "project", .. })
    ));
    assert_eq!(ctx.store.write_count(), 0);
}

#[tokio::test]
async fn test_child_inherits_project_and_documents_can_reference_folder() {
    let ctx = TestContext::new();
    let project = ctx
        .store
        .create_project(Project {
            id: Uuid::new_v4(),
            name: "Harbor expansion".to_string(),
            created_at: Utc::now(),
        })
        .await
        .unwrap();

    let service = &ctx.state.folder_service;
    let mut request = folder("Harbor", None);
    request.project_id = Some(project.id);
    let root = service.create_folder(request, "alice").await.unwrap();
    let child = service
        .create_folder(folder("Permits", Some(root.id)), "alice")
        .await
        .unwrap();
    assert_eq!(child.project_id, Some(project.id));

    let mut request = document_request("Permit A");
    request.folder_id = Some(child.id);
    request.project_id = Some(project.id);
    let document = ctx
        .state
        .document_service
        .create_document(request, None, "alice")
        .await
        .unwrap();
    assert_eq!(document.folder_id, Some(child.id));
}

#[tokio::test]
async fn test_folder_name_cannot_contain_separator() {
    let ctx = TestContext::new();
    let result = ctx
        .state
        .folder_service
        .create_folder(folder("a/b", None), "alice")
        .await;
    assert!(matches!(result, Err(AppError::ValidationFailure(_))));
}

#[tokio::test]
async fn test_unknown_folder_is_not_found() {
    let ctx = TestContext::new();
    let result = ctx.state.folder_service.get_folder(Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}
