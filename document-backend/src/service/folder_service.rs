// document-backend/src/service/folder_service.rs

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::folder_dto::CreateFolderRequest;
use crate::domain::document_folder_model::{self, Model as DocumentFolder};
use crate::error::AppResult;
use crate::log_with_context;
use crate::store::DocumentStore;
use crate::utils::error_helper::{not_found_error, reference_not_found};

pub struct FolderService {
    store: Arc<dyn DocumentStore>,
}

impl FolderService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// path は作成時点の親から計算し、以後は再計算しない
    pub async fn create_folder(
        &self,
        request: CreateFolderRequest,
        user_id: &str,
    ) -> AppResult<DocumentFolder> {
        request.validate()?;

        let parent = match request.parent_id {
            Some(parent_id) => Some(self.store.find_folder(parent_id).await?.ok_or_else(|| {
                reference_not_found("folder", parent_id, "folder_service::create_folder")
            })?),
            None => None,
        };

        if let Some(project_id) = request.project_id {
            if self.store.find_project(project_id).await?.is_none() {
                return Err(reference_not_found(
                    "project",
                    project_id,
                    "folder_service::create_folder",
                ));
            }
        }

        let now = Utc::now();
        let folder = DocumentFolder {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            description: request.description,
            parent_id: parent.as_ref().map(|p| p.id),
            path: document_folder_model::child_path(parent.as_ref()),
            project_id: request
                .project_id
                .or_else(|| parent.as_ref().and_then(|p| p.project_id)),
            created_by: user_id.to_string(),
            created_at: now,
            updated_at: now,
        };

        let created = self.store.create_folder(folder).await?;

        log_with_context!(
            tracing::Level::INFO,
            "Folder created",
            "folder_id" => created.id,
            "path" => &created.path,
            "user_id" => user_id,
        );

        Ok(created)
    }

    pub async fn get_folder(&self, id: Uuid) -> AppResult<DocumentFolder> {
        self.store
            .find_folder(id)
            .await?
            .ok_or_else(|| not_found_error("Folder", &id.to_string(), "folder_service::get_folder"))
    }
}
