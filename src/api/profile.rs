//! Profile and Group Endpoints

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::client::{decode, segment, HttpClient};
use crate::error::Result;
use crate::image::ImageEcho;
use crate::models::{Role, User};

/// Partial profile update; only supplied fields are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(rename = "fullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fun_facts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
}

#[derive(Serialize)]
struct ProfilePicArgs<'a> {
    profile_pic: &'a str,
}

pub async fn profiles_by_role(http: &HttpClient, role: &Role) -> Result<Vec<User>> {
    http.get_json(&format!("/profile/role/{}", segment(role.as_str())))
        .await
}

pub async fn group_students(http: &HttpClient, mentor_name: &str) -> Result<Vec<User>> {
    http.get_json(&format!("/group/{}", segment(mentor_name))).await
}

pub async fn update_profile(http: &HttpClient, email: &str, update: &ProfileUpdate) -> Result<Value> {
    let body = http
        .send_json(Method::PUT, "/profile", &[("email", email)], update)
        .await?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    decode(&body)
}

pub async fn update_profile_pic(http: &HttpClient, email: &str, profile_pic: &str) -> Result<ImageEcho> {
    let body = http
        .send_json(
            Method::PUT,
            "/profile/image",
            &[("email", email)],
            &ProfilePicArgs { profile_pic },
        )
        .await?;
    Ok(ImageEcho::from_body(&body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_sends_only_supplied_fields() {
        let update = ProfileUpdate {
            fun_facts: Some("Juggles".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"fun_facts":"Juggles"}"#
        );
    }
}
