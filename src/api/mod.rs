//! Backend REST API
//!
//! Frontend bindings to the backend's REST routes, organized by domain.
//! Everything above this module talks to the [`Backend`] trait so it can be
//! exercised without a server.

mod auth;
mod bucket_list;
mod client;
mod images;
mod profile;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::Result;
use crate::image::ImageEcho;
use crate::models::{BucketList, Role, UploadedImage, User};

pub use auth::{LoginRequest, SignupRequest};
use client::HttpClient;
pub use images::ImageUpload;
pub use profile::ProfileUpdate;

#[async_trait(?Send)]
pub trait Backend: Send + Sync {
    /// `POST /auth/signup`
    async fn signup(&self, request: &SignupRequest) -> Result<User>;
    /// `POST /auth/login`
    async fn login(&self, request: &LoginRequest) -> Result<User>;
    /// `GET /profile/role/{role}`
    async fn profiles_by_role(&self, role: &Role) -> Result<Vec<User>>;
    /// `GET /group/{mentor_name}`
    async fn group_students(&self, mentor_name: &str) -> Result<Vec<User>>;
    /// `PUT /profile?email=`; returns the backend's echo, whatever its shape
    async fn update_profile(&self, email: &str, update: &ProfileUpdate) -> Result<Value>;
    /// `PUT /profile/image?email=`
    async fn update_profile_pic(&self, email: &str, profile_pic: &str) -> Result<ImageEcho>;
    /// `GET /bucketlist/{mentor_name}/bucket_lists`
    async fn bucket_list(&self, mentor_name: &str) -> Result<BucketList>;
    /// `POST /bucketlist/{mentor_name}/bucket_lists?user_email=`
    async fn add_task(&self, mentor_name: &str, description: &str, user_email: &str) -> Result<()>;
    /// `PUT /bucketlist/{mentor_name}/bucket_lists/toggle/{task_id}?user_email=`
    async fn toggle_task(
        &self,
        mentor_name: &str,
        task_id: &str,
        user_email: &str,
        completed: bool,
    ) -> Result<()>;
    /// `POST /images/upload?user_id=&is_profile_picture=`
    async fn upload_image(
        &self,
        user_id: &str,
        is_profile_picture: bool,
        image: ImageUpload,
    ) -> Result<UploadedImage>;
}

/// [`Backend`] over HTTP
#[derive(Debug, Clone)]
pub struct RestBackend {
    http: HttpClient,
}

impl RestBackend {
    pub fn new(config: AppConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }
}

#[async_trait(?Send)]
impl Backend for RestBackend {
    async fn signup(&self, request: &SignupRequest) -> Result<User> {
        auth::signup(&self.http, request).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<User> {
        auth::login(&self.http, request).await
    }

    async fn profiles_by_role(&self, role: &Role) -> Result<Vec<User>> {
        profile::profiles_by_role(&self.http, role).await
    }

    async fn group_students(&self, mentor_name: &str) -> Result<Vec<User>> {
        profile::group_students(&self.http, mentor_name).await
    }

    async fn update_profile(&self, email: &str, update: &ProfileUpdate) -> Result<Value> {
        profile::update_profile(&self.http, email, update).await
    }

    async fn update_profile_pic(&self, email: &str, profile_pic: &str) -> Result<ImageEcho> {
        profile::update_profile_pic(&self.http, email, profile_pic).await
    }

    async fn bucket_list(&self, mentor_name: &str) -> Result<BucketList> {
        bucket_list::bucket_list(&self.http, mentor_name).await
    }

    async fn add_task(&self, mentor_name: &str, description: &str, user_email: &str) -> Result<()> {
        bucket_list::add_task(&self.http, mentor_name, description, user_email).await
    }

    async fn toggle_task(
        &self,
        mentor_name: &str,
        task_id: &str,
        user_email: &str,
        completed: bool,
    ) -> Result<()> {
        bucket_list::toggle_task(&self.http, mentor_name, task_id, user_email, completed).await
    }

    async fn upload_image(
        &self,
        user_id: &str,
        is_profile_picture: bool,
        image: ImageUpload,
    ) -> Result<UploadedImage> {
        images::upload_image(&self.http, user_id, is_profile_picture, image).await
    }
}
