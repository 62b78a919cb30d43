//! Profile Image References
//!
//! The backend has returned the "same" image field as an inline data URL,
//! a `/images/...` path, a data URL wrapping such a path, or an absolute URL.
//! Everything is funnelled through [`ImageRef`] before rendering.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

const IMAGES_PREFIX: &str = "/images/";

/// Canonical, non-empty image reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Already loadable as-is (absolute URL or anything unrecognised)
    Url(String),
    /// Backend-relative `/images/...` path
    RelativePath(String),
    /// `data:` URL carrying the bytes inline
    InlineData(String),
}

impl ImageRef {
    /// `None` for missing, empty and the stringified "null"/"undefined"
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let src = raw?.trim();
        if src.is_empty() || src == "null" || src == "undefined" {
            return None;
        }

        if src.starts_with("data:image") {
            // Data prefix followed by a server path, not real inline bytes
            if let Some(idx) = src.find(IMAGES_PREFIX) {
                return Some(ImageRef::RelativePath(src[idx..].to_string()));
            }
            return Some(ImageRef::InlineData(src.to_string()));
        }
        if src.starts_with(IMAGES_PREFIX) {
            return Some(ImageRef::RelativePath(src.to_string()));
        }
        Some(ImageRef::Url(src.to_string()))
    }

    /// Something an `<img src>` can load
    pub fn resolve(&self, origin: &str) -> String {
        match self {
            ImageRef::RelativePath(path) => format!("{origin}{path}"),
            ImageRef::Url(url) | ImageRef::InlineData(url) => url.clone(),
        }
    }
}

/// URL to hand to the browser, or `None` to show the default asset
pub fn normalize_image_url(src: Option<&str>, origin: &str) -> Option<String> {
    ImageRef::parse(src).map(|r| r.resolve(origin))
}

/// Like [`normalize_image_url`], but also repairs bare base64 that lost its
/// `data:` prefix somewhere along the way
pub fn ensure_proper_format(data: &str, origin: &str) -> String {
    match ImageRef::parse(Some(data)) {
        Some(ImageRef::Url(raw)) if looks_like_bare_base64(&raw) => {
            format!("data:image/png;base64,{raw}")
        }
        Some(image) => image.resolve(origin),
        None => data.to_string(),
    }
}

fn looks_like_bare_base64(value: &str) -> bool {
    !value.starts_with("data:")
        && !value.is_empty()
        && value
            .chars()
            .take(20)
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
}

/// What `PUT /profile/image` echoed back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageEcho {
    /// `{"profile_pic": "..."}` or a bare JSON string
    Image(String),
    /// Empty body, `null`, or an object without a usable image
    Absent,
}

impl ImageEcho {
    pub fn from_value(value: &Value) -> Self {
        let candidate = match value {
            Value::Object(map) => map.get("profile_pic").and_then(Value::as_str),
            Value::String(s) => Some(s.as_str()),
            _ => None,
        };
        match candidate {
            Some(s) if !s.trim().is_empty() => ImageEcho::Image(s.to_string()),
            _ => ImageEcho::Absent,
        }
    }

    /// Raw response text: JSON if it parses, otherwise the text itself
    pub fn from_body(body: &str) -> Self {
        if body.trim().is_empty() {
            return ImageEcho::Absent;
        }
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(_) => Self::from_value(&Value::String(body.to_string())),
        }
    }
}

/// Inline `data:` URL for raw file bytes
pub fn to_data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{content_type};base64,{}", STANDARD.encode(bytes))
}

/// Up to two uppercase initials for avatar placeholders
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
