// document-backend/src/store/file_storage.rs

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::{Client, Config};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{StorageConfig, StorageProvider};
use crate::error::AppResult;
use crate::utils::error_helper::internal_server_error;

/// 保存前のファイル
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, content_type: Option<&str>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: normalize_content_type(content_type),
            data,
        }
    }

    pub fn size(&self) -> i64 {
        i64::try_from(self.data.len()).unwrap_or(i64::MAX)
    }
}

/// 外部のファイルストア。戻り値のURLは不透明な文字列として扱う
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn put(&self, file: &FileUpload) -> AppResult<String>;
}

/// S3互換ストレージ（MinIO / R2）
pub struct S3FileStorage {
    client: Client,
    config: StorageConfig,
}

impl S3FileStorage {
    pub fn new(config: StorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "document_storage",
        );

        let mut builder = Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(&config.endpoint)
            .credentials_provider(credentials);

        // MinIOはpath styleを強制
        if config.provider == StorageProvider::MinIO {
            builder = builder.force_path_style(true);
        }

        Self {
            client: Client::from_conf(builder.build()),
            config,
        }
    }

    fn object_key(file_name: &str) -> String {
        let sanitized = sanitize_filename(file_name);
        let name = if sanitized.is_empty() {
            "file".to_string()
        } else {
            sanitized.replace(' ', "_")
        };
        format!(
            "documents/{}/{}/{}",
            Utc::now().format("%Y/%m"),
            Uuid::new_v4(),
            name
        )
    }
}

#[async_trait]
impl FileStorage for S3FileStorage {
    async fn put(&self, file: &FileUpload) -> AppResult<String> {
        let key = Self::object_key(&file.file_name);

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .body(ByteStream::from(file.data.clone()))
            .content_type(&file.content_type)
            .send()
            .await
            .map_err(|e| internal_server_error(e, "s3_file_storage::put", "Failed to upload file"))?;

        Ok(self.config.object_url(&key))
    }
}

pub fn create_file_storage(config: StorageConfig) -> Arc<dyn FileStorage> {
    // MinIOもR2もS3互換なので同じ実装を使用
    Arc::new(S3FileStorage::new(config))
}

/// ファイル名から安全な文字のみを残す
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '.' || *c == '-' || *c == '_' || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string()
}

/// 解釈できないContent-Typeは application/octet-stream に丸める
pub fn normalize_content_type(content_type: Option<&str>) -> String {
    content_type
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .unwrap_or(mime::APPLICATION_OCTET_STREAM)
        .essence_str()
        .to_string()
}
