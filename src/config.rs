//! Application Configuration
//!
//! Baked in at compile time; the browser has no process environment.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use log::{info, warn};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_AVATAR: &str = "/default_profile.png";

/// Inline images at or above this many characters are stored under their own key
pub const INLINE_IMAGE_THRESHOLD: usize = 50_000;

/// Runtime settings shared by the HTTP client, persistence and pages
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend origin, no trailing slash
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// Ceiling for request and response bodies
    pub max_body_bytes: usize,
    pub default_avatar: String,
    pub inline_image_threshold: usize,
    /// Largest profile picture file accepted from the file picker
    pub max_upload_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            max_body_bytes: 10 * 1024 * 1024,
            default_avatar: DEFAULT_AVATAR.to_string(),
            inline_image_threshold: INLINE_IMAGE_THRESHOLD,
            max_upload_bytes: 5 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: option_env!("MENTOR_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            request_timeout: Duration::from_secs(try_load(
                "MENTOR_API_TIMEOUT_SECS",
                option_env!("MENTOR_API_TIMEOUT_SECS"),
                defaults.request_timeout.as_secs(),
            )),
            max_body_bytes: try_load(
                "MENTOR_API_MAX_BODY_BYTES",
                option_env!("MENTOR_API_MAX_BODY_BYTES"),
                defaults.max_body_bytes,
            ),
            ..defaults
        }
    }

    /// Absolute URL for a backend-relative path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

fn try_load<T: FromStr + Display>(key: &str, raw: Option<&str>, default: T) -> T
where
    T::Err: Display,
{
    match raw {
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
        Some(value) => value.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {value:?}: {e}, using default: {default}");
            default
        }),
    }
}
