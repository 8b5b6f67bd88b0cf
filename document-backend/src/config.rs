// document-backend/src/config.rs

pub mod app;
pub mod jwt;
pub mod storage;

pub use app::AppConfig;
pub use jwt::JwtConfig;
pub use storage::{StorageConfig, StorageProvider};
