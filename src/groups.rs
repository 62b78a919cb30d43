//! Mentor groups: the roster with each mentor's students

use log::info;

use crate::api::Backend;
use crate::error::Result;
use crate::fetch::{mentor_roster, per_mentor, BatchPolicy};
use crate::models::MentorGroup;

pub const LOAD_FAILED: &str = "Failed to load groups";

/// All groups in roster order. One failed student lookup fails the load.
pub async fn load_groups(backend: &dyn Backend) -> Result<Vec<MentorGroup>> {
    let mentors = mentor_roster(backend).await?;
    let joined = per_mentor(mentors, BatchPolicy::FailFast, |mentor| async move {
        backend.group_students(&mentor.full_name).await
    })
    .await?;

    info!("Loaded {} mentor groups", joined.len());
    Ok(joined
        .into_iter()
        .map(|(mentor, students)| MentorGroup { mentor, students })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{user, MockBackend};
    use crate::models::Role;

    fn roster() -> MockBackend {
        MockBackend::with_users(vec![
            user("Lisa Johnson", Role::Mentor, None),
            user("Mark Lee", Role::Mentor, None),
            user("John Doe", Role::Student, Some("Lisa Johnson")),
            user("Jane Roe", Role::Student, Some("Lisa Johnson")),
            user("Sam Park", Role::Student, Some("Mark Lee")),
        ])
    }

    #[tokio::test]
    async fn test_groups_pair_mentors_with_students() {
        let backend = roster();

        let groups = load_groups(&backend).await.unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].mentor.full_name, "Lisa Johnson");
        assert_eq!(groups[0].students.len(), 2);
        assert_eq!(groups[1].students[0].full_name, "Sam Park");
    }

    #[tokio::test]
    async fn test_single_failure_fails_whole_load() {
        let backend = roster();
        backend.fail("group:Mark Lee");

        let err = load_groups(&backend).await.unwrap_err();

        assert_eq!(err.user_message(LOAD_FAILED), "backend unavailable");
    }
}
