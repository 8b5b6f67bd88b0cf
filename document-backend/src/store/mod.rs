// document-backend/src/store/mod.rs

pub mod document_store;
pub mod file_storage;
pub mod sea_orm_store;

pub use document_store::DocumentStore;
pub use file_storage::{FileStorage, FileUpload, S3FileStorage};
pub use sea_orm_store::SeaOrmDocumentStore;
