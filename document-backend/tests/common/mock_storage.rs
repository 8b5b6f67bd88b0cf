// tests/common/mock_storage.rs

use async_trait::async_trait;
use document_backend::error::{AppError, AppResult};
use document_backend::store::{FileStorage, FileUpload};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// テスト用のモックファイルストレージ
#[derive(Clone, Default)]
pub struct MockFileStorage {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail: Arc<AtomicBool>,
}

impl MockFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn stored_count(&self) -> usize {
        self.storage.lock().unwrap().len()
    }
}

#[async_trait]
impl FileStorage for MockFileStorage {
    async fn put(&self, file: &FileUpload) -> AppResult<String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::ExternalServiceError(
                "mock storage unavailable".to_string(),
            ));
        }
        let mut storage = self.storage.lock().unwrap();
        let url = format!(
            "http://mock-storage.local/documents/{}/{}",
            storage.len() + 1,
            file.file_name
        );
        storage.insert(url.clone(), file.data.clone());
        Ok(url)
    }
}
