// document-backend/src/api/dto/mod.rs

pub mod approval_dto;
pub mod document_dto;
pub mod folder_dto;
pub mod share_dto;
