//! Bucket List Endpoints

use reqwest::Method;
use serde::Serialize;

use super::client::{segment, HttpClient};
use crate::error::Result;
use crate::models::BucketList;

#[derive(Serialize)]
struct NewTaskArgs<'a> {
    description: &'a str,
    completed: bool,
}

#[derive(Serialize)]
struct ToggleArgs {
    completed: bool,
}

fn lists_path(mentor_name: &str) -> String {
    format!("/bucketlist/{}/bucket_lists", segment(mentor_name))
}

pub async fn bucket_list(http: &HttpClient, mentor_name: &str) -> Result<BucketList> {
    http.get_json(&lists_path(mentor_name)).await
}

pub async fn add_task(http: &HttpClient, mentor_name: &str, description: &str, user_email: &str) -> Result<()> {
    http.send_json(
        Method::POST,
        &lists_path(mentor_name),
        &[("user_email", user_email)],
        &NewTaskArgs { description, completed: false },
    )
    .await?;
    Ok(())
}

/// `completed` is the state the task should end up in
pub async fn toggle_task(
    http: &HttpClient,
    mentor_name: &str,
    task_id: &str,
    user_email: &str,
    completed: bool,
) -> Result<()> {
    let path = format!("{}/toggle/{}", lists_path(mentor_name), segment(task_id));
    http.send_json(Method::PUT, &path, &[("user_email", user_email)], &ToggleArgs { completed })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_path_encodes_mentor() {
        assert_eq!(lists_path("Lisa Johnson"), "/bucketlist/Lisa%20Johnson/bucket_lists");
    }
}
