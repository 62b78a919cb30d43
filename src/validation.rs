//! Form Validation
//!
//! Client-side checks run before any request is made.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ApiError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ApiError::validation("Invalid email format"))
    }
}

/// First and last name at minimum
pub fn validate_full_name(name: &str) -> Result<(), ApiError> {
    if name.split_whitespace().count() < 2 {
        return Err(ApiError::validation(
            "Please enter your full name (first and last name)",
        ));
    }
    Ok(())
}

pub fn validate_signup(full_name: &str, email: &str, password: &str) -> Result<(), ApiError> {
    validate_full_name(full_name)?;
    validate_email(email)?;
    if password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }
    Ok(())
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ApiError> {
    validate_email(email)?;
    if password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }
    Ok(())
}

/// Profile picture picked from disk: any image type, bounded size
pub fn validate_image_file(content_type: &str, size: u64, max_size: u64) -> Result<(), ApiError> {
    if !content_type.starts_with("image/") {
        return Err(ApiError::validation("Please select an image file"));
    }
    if size > max_size {
        return Err(ApiError::validation(format!(
            "Image size should be less than {}MB",
            max_size / (1024 * 1024)
        )));
    }
    Ok(())
}
