// document-backend/src/domain/mod.rs

pub mod approval_process;
pub mod approval_status;
pub mod approval_workflow_model;
pub mod document_access_log_model;
pub mod document_approval_model;
pub mod document_folder_model;
pub mod document_model;
pub mod document_share_model;
pub mod document_status;
pub mod document_version_model;
pub mod project_model;
pub mod share_types;
pub mod version_number;
