//! Image Store Endpoint
//!
//! Multipart upload to `/images/upload`. Lives alongside the inline
//! `profile_pic` scheme; the two are independent.

use reqwest::multipart::{Form, Part};

use super::client::{decode, HttpClient};
use crate::error::Result;
use crate::models::UploadedImage;

#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub async fn upload_image(
    http: &HttpClient,
    user_id: &str,
    is_profile_picture: bool,
    image: ImageUpload,
) -> Result<UploadedImage> {
    let payload_len = image.bytes.len();
    let part = Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str(&image.content_type)?;
    let form = Form::new().part("file", part);

    let flag = if is_profile_picture { "true" } else { "false" };
    let body = http
        .post_multipart(
            "/images/upload",
            &[("user_id", user_id), ("is_profile_picture", flag)],
            payload_len,
            form,
        )
        .await?;
    decode(&body)
}
