// document-backend/src/api/handlers/mod.rs
pub mod approval_handler;
pub mod document_handler;
pub mod folder_handler;
pub mod health;
pub mod share_handler;
