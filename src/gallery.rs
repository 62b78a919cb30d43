//! Image store uploads
//!
//! Photos sent to `/images/upload` as multipart files. These are kept by the
//! backend per user and are separate from the inline profile picture.

use log::info;

use crate::api::{Backend, ImageUpload};
use crate::error::{ApiError, Result};
use crate::models::{UploadedImage, User};
use crate::validation::validate_image_file;

pub const UPLOAD_FAILED: &str = "Failed to upload image";

pub async fn upload_photo(
    backend: &dyn Backend,
    user: &User,
    upload: ImageUpload,
    max_size: u64,
) -> Result<UploadedImage> {
    let Some(user_id) = user.id.as_deref() else {
        return Err(ApiError::validation(
            "Your account has no id yet, please sign in again",
        ));
    };
    validate_image_file(&upload.content_type, upload.bytes.len() as u64, max_size)?;

    let uploaded = backend.upload_image(user_id, false, upload).await?;
    info!("Uploaded {} as image {}", uploaded.filename, uploaded.image_id);
    Ok(uploaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{user, MockBackend};
    use crate::models::Role;

    fn photo(content_type: &str, len: usize) -> ImageUpload {
        ImageUpload {
            file_name: "hike.png".to_string(),
            content_type: content_type.to_string(),
            bytes: vec![0; len],
        }
    }

    #[tokio::test]
    async fn test_upload_sends_user_id() {
        let backend = MockBackend::new();
        let owner = User {
            id: Some("u42".to_string()),
            ..user("John Doe", Role::Student, None)
        };

        let uploaded = upload_photo(&backend, &owner, photo("image/png", 10), 1024)
            .await
            .unwrap();

        assert_eq!(uploaded.filename, "hike.png");
        assert_eq!(backend.calls(), vec!["upload_image:u42:false"]);
    }

    #[tokio::test]
    async fn test_rejected_before_request() {
        let backend = MockBackend::new();
        let anonymous = user("John Doe", Role::Student, None);
        let owner = User {
            id: Some("u42".to_string()),
            ..anonymous.clone()
        };

        assert!(upload_photo(&backend, &anonymous, photo("image/png", 10), 1024).await.is_err());
        assert!(upload_photo(&backend, &owner, photo("text/plain", 10), 1024).await.is_err());
        assert!(upload_photo(&backend, &owner, photo("image/png", 2048), 1024).await.is_err());
        assert!(backend.calls().is_empty());
    }
}
