//! Auth Endpoints

use serde::{Deserialize, Serialize};

use super::client::HttpClient;
use crate::error::Result;
use crate::models::{Role, User};

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    #[serde(rename = "accountType")]
    pub account_type: Role,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    user: User,
}

pub async fn signup(http: &HttpClient, request: &SignupRequest) -> Result<User> {
    let response: AuthResponse = http.post_json("/auth/signup", &[], request).await?;
    Ok(response.user)
}

pub async fn login(http: &HttpClient, request: &LoginRequest) -> Result<User> {
    let response: AuthResponse = http.post_json("/auth/login", &[], request).await?;
    Ok(response.user)
}
