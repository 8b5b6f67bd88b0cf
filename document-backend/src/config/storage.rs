// document-backend/src/config/storage.rs

use std::env;

use crate::error::{AppError, AppResult};

/// ストレージプロバイダーの種類
#[derive(Debug, Clone, PartialEq)]
pub enum StorageProvider {
    MinIO,
    R2,
}

impl StorageProvider {
    pub fn from_env() -> Self {
        match env::var("STORAGE_PROVIDER")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "r2" | "cloudflare" | "cloudflare-r2" => Self::R2,
            "minio" => Self::MinIO,
            _ => {
                // ENVIRONMENT に基づく既定値
                match env::var("ENVIRONMENT")
                    .unwrap_or_else(|_| "development".to_string())
                    .to_lowercase()
                    .as_str()
                {
                    "production" | "staging" => Self::R2,
                    _ => Self::MinIO,
                }
            }
        }
    }
}

/// ストレージ設定
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub provider: StorageProvider,
    pub endpoint: String,
    pub bucket: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    /// 保存したオブジェクトのURLの先頭部分（未設定なら endpoint/bucket）
    pub public_url: Option<String>,
}

impl StorageConfig {
    pub fn from_env() -> AppResult<Self> {
        let provider = StorageProvider::from_env();
        tracing::info!("Storage provider: {:?}", provider);

        Ok(Self {
            provider,
            endpoint: required("STORAGE_ENDPOINT")?,
            bucket: required("STORAGE_BUCKET")?,
            region: required("STORAGE_REGION")?,
            access_key: required("STORAGE_ACCESS_KEY")?,
            secret_key: required("STORAGE_SECRET_KEY")?,
            public_url: env::var("STORAGE_PUBLIC_URL").ok(),
        })
    }

    /// オブジェクトキーから公開URLを組み立てる
    pub fn object_url(&self, key: &str) -> String {
        match &self.public_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
            None => format!(
                "{}/{}/{}",
                self.endpoint.trim_end_matches('/'),
                self.bucket,
                key
            ),
        }
    }
}

fn required(name: &str) -> AppResult<String> {
    env::var(name).map_err(|_| AppError::InternalServerError(format!("{} not set", name)))
}
