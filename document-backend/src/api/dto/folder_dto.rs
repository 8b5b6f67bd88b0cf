// document-backend/src/api/dto/folder_dto.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct CreateFolderRequest {
    #[validate(
        length(min = 1, max = 255, message = "Folder name must be between 1 and 255 characters"),
        custom(function = validate_folder_name)
    )]
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
}

/// path の区切りに使う "/" はフォルダ名に含められない
fn validate_folder_name(name: &str) -> Result<(), validator::ValidationError> {
    if name.contains('/') {
        let mut error = validator::ValidationError::new("invalid_folder_name");
        error.message = Some("Folder name must not contain '/'".into());
        return Err(error);
    }
    Ok(())
}
