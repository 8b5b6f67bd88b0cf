// document-backend/src/service/mod.rs
pub mod access_service;
pub mod approval_service;
pub mod document_service;
pub mod folder_service;
