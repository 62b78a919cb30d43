//! In-memory [`Backend`] that records every call, for tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{Backend, ImageUpload, LoginRequest, ProfileUpdate, SignupRequest};
use crate::error::{ApiError, Result};
use crate::image::ImageEcho;
use crate::models::{BucketList, Role, Task, UploadedImage, User};

#[derive(Default)]
pub struct MockBackend {
    pub users: Mutex<Vec<User>>,
    pub bucket_lists: Mutex<HashMap<String, BucketList>>,
    /// Calls that should fail, keyed as they appear in `calls`
    pub failing: Mutex<HashSet<String>>,
    pub auth_user: Mutex<Option<User>>,
    pub profile_echo: Mutex<Value>,
    pub image_echo: Mutex<Option<ImageEcho>>,
    pub calls: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        let backend = Self::new();
        *backend.users.lock().unwrap() = users;
        backend
    }

    pub fn add_list(&self, mentor_name: &str, tasks: Vec<Task>) {
        self.bucket_lists.lock().unwrap().insert(
            mentor_name.to_string(),
            BucketList {
                mentor_name: mentor_name.to_string(),
                tasks,
            },
        );
    }

    pub fn fail(&self, call: &str) {
        self.failing.lock().unwrap().insert(call.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Record a call, failing it if it was registered with [`fail`](Self::fail)
    fn record(&self, call: String) -> Result<()> {
        let failing = self.failing.lock().unwrap().contains(&call);
        self.calls.lock().unwrap().push(call);
        if failing {
            return Err(ApiError::Status {
                status: 500,
                message: Some("backend unavailable".to_string()),
            });
        }
        Ok(())
    }
}

pub fn user(name: &str, role: Role, mentor: Option<&str>) -> User {
    User {
        id: None,
        full_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        account_type: role,
        mentor_name: mentor.map(str::to_string),
        fun_facts: String::new(),
        points: 0,
        profile_pic: None,
    }
}

pub fn task(id: &str, completed: bool) -> Task {
    Task {
        id: id.to_string(),
        description: format!("Task {id}"),
        completed,
    }
}

#[async_trait(?Send)]
impl Backend for MockBackend {
    async fn signup(&self, request: &SignupRequest) -> Result<User> {
        self.record(format!("signup:{}", request.email))?;
        Ok(self.auth_user.lock().unwrap().clone().unwrap_or_else(|| User {
            full_name: request.full_name.clone(),
            email: request.email.clone(),
            account_type: request.account_type.clone(),
            ..Default::default()
        }))
    }

    async fn login(&self, request: &LoginRequest) -> Result<User> {
        self.record(format!("login:{}", request.email))?;
        self.auth_user
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ApiError::from_status(400, r#"{"detail":"Invalid email or password"}"#))
    }

    async fn profiles_by_role(&self, role: &Role) -> Result<Vec<User>> {
        self.record(format!("role:{role}"))?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| &u.account_type == role)
            .cloned()
            .collect())
    }

    async fn group_students(&self, mentor_name: &str) -> Result<Vec<User>> {
        self.record(format!("group:{mentor_name}"))?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.mentor_name.as_deref() == Some(mentor_name))
            .cloned()
            .collect())
    }

    async fn update_profile(&self, email: &str, _update: &ProfileUpdate) -> Result<Value> {
        self.record(format!("update_profile:{email}"))?;
        Ok(self.profile_echo.lock().unwrap().clone())
    }

    async fn update_profile_pic(&self, email: &str, _profile_pic: &str) -> Result<ImageEcho> {
        self.record(format!("update_profile_pic:{email}"))?;
        Ok(self.image_echo.lock().unwrap().clone().unwrap_or(ImageEcho::Absent))
    }

    async fn bucket_list(&self, mentor_name: &str) -> Result<BucketList> {
        self.record(format!("bucket_list:{mentor_name}"))?;
        self.bucket_lists
            .lock()
            .unwrap()
            .get(mentor_name)
            .cloned()
            .ok_or_else(|| ApiError::from_status(404, r#"{"detail":"Bucket list not found"}"#))
    }

    async fn add_task(&self, mentor_name: &str, description: &str, user_email: &str) -> Result<()> {
        self.record(format!("add_task:{mentor_name}:{user_email}"))?;
        let mut lists = self.bucket_lists.lock().unwrap();
        let list = lists.entry(mentor_name.to_string()).or_insert_with(|| BucketList {
            mentor_name: mentor_name.to_string(),
            tasks: Vec::new(),
        });
        let id = format!("t{}", list.tasks.len() + 1);
        list.tasks.push(Task {
            id,
            description: description.to_string(),
            completed: false,
        });
        Ok(())
    }

    async fn toggle_task(
        &self,
        mentor_name: &str,
        task_id: &str,
        user_email: &str,
        completed: bool,
    ) -> Result<()> {
        self.record(format!("toggle_task:{mentor_name}:{task_id}:{user_email}:{completed}"))?;
        if let Some(list) = self.bucket_lists.lock().unwrap().get_mut(mentor_name) {
            if let Some(task) = list.tasks.iter_mut().find(|t| t.id == task_id) {
                task.completed = completed;
            }
        }
        Ok(())
    }

    async fn upload_image(
        &self,
        user_id: &str,
        is_profile_picture: bool,
        image: ImageUpload,
    ) -> Result<UploadedImage> {
        self.record(format!("upload_image:{user_id}:{is_profile_picture}"))?;
        Ok(UploadedImage {
            image_id: "img-1".to_string(),
            filename: image.file_name,
            content_type: image.content_type,
        })
    }
}
