//! Frontend Models
//!
//! Data structures matching backend entities.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Account type of a user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Student,
    Mentor,
    Admin,
    /// Anything the backend sends that we don't recognise
    Other(String),
}

impl Role {
    pub const SIGNUP_CHOICES: [Role; 3] = [Role::Student, Role::Mentor, Role::Admin];

    /// Case-insensitive; "mentors" shows up in old records
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "student" | "students" => Role::Student,
            "mentor" | "mentors" => Role::Mentor,
            "admin" | "admins" => Role::Admin,
            _ => Role::Other(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Student => "Student",
            Role::Mentor => "Mentor",
            Role::Admin => "Admin",
            Role::Other(s) => s,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| Role::parse(&s)).unwrap_or_default())
    }
}

/// User profile (matches backend `Profile` / auth responses)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    /// `_id` on profile routes, `id` on auth routes
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "fullName", default, deserialize_with = "null_as_default")]
    pub full_name: String,
    pub email: String,
    #[serde(rename = "accountType", default)]
    pub account_type: Role,
    #[serde(default)]
    pub mentor_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fun_facts: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: i64,
    #[serde(default)]
    pub profile_pic: Option<String>,
}

/// A single bucket list goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(alias = "task_id")]
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// A mentor group's shared task list, keyed by mentor name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketList {
    pub mentor_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks: Vec<Task>,
}

/// A bucket list joined with the owning mentor's profile
#[derive(Debug, Clone, PartialEq)]
pub struct MentorBucketList {
    pub list: BucketList,
    pub mentor: User,
}

/// A mentor and the students assigned to them
#[derive(Debug, Clone, PartialEq)]
pub struct MentorGroup {
    pub mentor: User,
    pub students: Vec<User>,
}

/// One car on the leaderboard track
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub points: i64,
    /// Index into the illustration set, fixed by roster order
    pub decoration: usize,
}

/// Response of `POST /images/upload`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadedImage {
    pub image_id: String,
    pub filename: String,
    pub content_type: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
