// document-backend/src/repository/mod.rs

pub mod access_log_repository;
pub mod approval_repository;
pub mod document_repository;
pub mod document_version_repository;
pub mod folder_repository;
pub mod project_repository;
pub mod share_repository;
pub mod workflow_repository;
