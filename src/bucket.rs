//! Bucket List Logic
//!
//! Progress math, ordering, permissions and the load/mutate/refetch flows
//! used by the bucket list pages.

use std::cmp::Ordering;

use log::{debug, info};

use crate::api::Backend;
use crate::error::{ApiError, Result};
use crate::fetch::{mentor_roster, per_mentor, BatchPolicy};
use crate::models::{BucketList, MentorBucketList, Role, Task, User};
use crate::notify::Notification;

pub const LOAD_FAILED: &str = "Failed to load bucket lists";
pub const ADD_FAILED: &str = "Failed to add task.";
pub const TOGGLE_FAILED: &str = "Failed to toggle task completion.";

/// Delay before the leaderboard reminder follows a completion toast
pub const LEADERBOARD_REMINDER_DELAY_MS: u32 = 1000;

pub fn completed_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.completed).count()
}

/// `round(100 * completed / total)`, 0 for an empty list
pub fn completion_percent(tasks: &[Task]) -> u32 {
    if tasks.is_empty() {
        return 0;
    }
    // Integer half-up rounding; float division misrounds values like 23/40
    let done = completed_count(tasks);
    let total = tasks.len();
    ((200 * done + total) / (2 * total)) as u32
}

/// Orders by exact completion ratio, highest first, without rounding
fn by_completion_desc(a: &[Task], b: &[Task]) -> Ordering {
    let ratio = |tasks: &[Task]| (completed_count(tasks), tasks.len().max(1));
    let (done_a, total_a) = ratio(a);
    let (done_b, total_b) = ratio(b);
    (done_b * total_a).cmp(&(done_a * total_b))
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// List belongs to the viewer: their own (mentor) or their mentor's (student)
pub fn is_own_list(viewer: &User, mentor_name: &str) -> bool {
    same_name(mentor_name, &viewer.full_name)
        || viewer
            .mentor_name
            .as_deref()
            .is_some_and(|m| same_name(mentor_name, m))
}

/// Group members may add goals to their own list
pub fn can_add(viewer: &User, mentor_name: &str) -> bool {
    is_own_list(viewer, mentor_name)
}

/// Mentors tick off their own group's goals; admins any group's
pub fn can_toggle(viewer: &User, mentor_name: &str) -> bool {
    match viewer.account_type {
        Role::Admin => true,
        Role::Mentor => is_own_list(viewer, mentor_name),
        _ => false,
    }
}

/// View options on the all-lists page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListView {
    pub sort_by_completion: bool,
    pub only_my_group: bool,
}

impl ListView {
    /// Sorting a single list is pointless, so the toggle is hidden then
    pub fn sort_available(&self, lists: &[MentorBucketList], viewer: &User) -> bool {
        !self.only_my_group || own_lists(lists, viewer).count() > 1
    }

    pub fn apply(&self, lists: &[MentorBucketList], viewer: &User) -> Vec<MentorBucketList> {
        let mut shown: Vec<MentorBucketList> = if self.only_my_group {
            own_lists(lists, viewer).cloned().collect()
        } else {
            lists.to_vec()
        };
        if self.sort_by_completion {
            // Stable: equal ratios keep roster order
            shown.sort_by(|a, b| by_completion_desc(&a.list.tasks, &b.list.tasks));
        }
        shown
    }
}

fn own_lists<'a>(
    lists: &'a [MentorBucketList],
    viewer: &'a User,
) -> impl Iterator<Item = &'a MentorBucketList> {
    lists
        .iter()
        .filter(move |l| is_own_list(viewer, &l.list.mentor_name))
}

/// Every mentor's list; mentors whose list fails to load are left out
pub async fn load_all(backend: &dyn Backend) -> Result<Vec<MentorBucketList>> {
    let mentors = mentor_roster(backend).await?;
    let joined = per_mentor(mentors, BatchPolicy::SkipFailures, |mentor| async move {
        backend.bucket_list(&mentor.full_name).await
    })
    .await?;

    info!("Loaded {} bucket lists", joined.len());
    Ok(joined
        .into_iter()
        .map(|(mentor, list)| MentorBucketList { list, mentor })
        .collect())
}

pub async fn load_one(backend: &dyn Backend, mentor_name: &str) -> Result<BucketList> {
    backend.bucket_list(mentor_name).await
}

/// Result of a toggle: the refetched list and what to tell the user
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleOutcome {
    pub list: BucketList,
    pub notification: Notification,
    /// Shown [`LEADERBOARD_REMINDER_DELAY_MS`] later, only on completion
    pub reminder: Option<Notification>,
}

/// One toggle request, then one refetch
pub async fn toggle_task(
    backend: &dyn Backend,
    mentor_name: &str,
    task: &Task,
    viewer_email: &str,
) -> Result<ToggleOutcome> {
    let completing = !task.completed;
    debug!("Toggling task {} on {mentor_name}: completed={completing}", task.id);

    backend
        .toggle_task(mentor_name, &task.id, viewer_email, completing)
        .await?;
    let list = backend.bucket_list(mentor_name).await?;

    let (notification, reminder) = if completing {
        (
            Notification::success("Task completed! 🎉"),
            Some(
                Notification::info("Remember to refresh the leaderboard to see updated points!")
                    .with_icon("🏆")
                    .with_duration(5000),
            ),
        )
    } else {
        (Notification::success("Task marked as incomplete"), None)
    };

    Ok(ToggleOutcome {
        list,
        notification,
        reminder,
    })
}

/// Append a goal, then refetch
pub async fn add_task(
    backend: &dyn Backend,
    mentor_name: &str,
    description: &str,
    viewer_email: &str,
) -> Result<BucketList> {
    let description = description.trim();
    if description.is_empty() {
        return Err(ApiError::validation("Task description cannot be empty"));
    }
    backend.add_task(mentor_name, description, viewer_email).await?;
    backend.bucket_list(mentor_name).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{task, user, MockBackend};

    fn entry(name: &str, tasks: Vec<Task>) -> MentorBucketList {
        MentorBucketList {
            list: BucketList {
                mentor_name: name.to_string(),
                tasks,
            },
            mentor: user(name, Role::Mentor, None),
        }
    }

    #[test]
    fn test_completion_percent() {
        assert_eq!(completion_percent(&[]), 0);
        assert_eq!(completion_percent(&[task("1", true), task("2", false), task("3", false)]), 33);
        assert_eq!(completion_percent(&[task("1", true), task("2", true), task("3", false)]), 67);
        assert_eq!(completion_percent(&[task("1", true)]), 100);
        assert_eq!(completed_count(&[task("1", true), task("2", false)]), 1);
    }

    fn tasks(done: usize, total: usize) -> Vec<Task> {
        (0..total).map(|i| task(&i.to_string(), i < done)).collect()
    }

    #[test]
    fn test_completion_percent_rounds_exact_halves_up() {
        assert_eq!(completion_percent(&tasks(23, 40)), 58);
        assert_eq!(completion_percent(&tasks(29, 200)), 15);
        assert_eq!(completion_percent(&tasks(46, 80)), 58);
        assert_eq!(completion_percent(&tasks(1, 8)), 13);
    }

    #[test]
    fn test_sort_uses_exact_ratio() {
        let lists = vec![
            entry("Mark Lee", tasks(33, 100)),
            entry("Lisa Johnson", tasks(1, 3)),
            entry("Ana Ruiz", vec![]),
        ];
        let viewer = user("John Doe", Role::Student, None);

        let sorted = ListView { sort_by_completion: true, only_my_group: false }.apply(&lists, &viewer);
        let names: Vec<_> = sorted.iter().map(|l| l.list.mentor_name.as_str()).collect();
        assert_eq!(names, vec!["Lisa Johnson", "Mark Lee", "Ana Ruiz"]);
    }

    #[test]
    fn test_permissions_are_case_insensitive() {
        let mentor = user("Lisa Johnson", Role::Mentor, None);
        let student = user("John Doe", Role::Student, Some("lisa johnson"));
        let admin = user("Root Admin", Role::Admin, None);

        assert!(can_toggle(&mentor, "LISA JOHNSON"));
        assert!(!can_toggle(&mentor, "Mark Lee"));
        assert!(!can_toggle(&student, "Lisa Johnson"));
        assert!(can_add(&student, "Lisa Johnson"));
        assert!(!can_add(&student, "Mark Lee"));
        assert!(can_toggle(&admin, "Mark Lee"));
    }

    #[test]
    fn test_view_filters_and_sorts() {
        let lists = vec![
            entry("Lisa Johnson", vec![task("1", false), task("2", false)]),
            entry("Mark Lee", vec![task("1", true), task("2", false)]),
            entry("Ana Ruiz", vec![task("1", true)]),
        ];
        let student = user("John Doe", Role::Student, Some("Lisa Johnson"));

        let sorted = ListView { sort_by_completion: true, only_my_group: false }.apply(&lists, &student);
        let names: Vec<_> = sorted.iter().map(|l| l.list.mentor_name.as_str()).collect();
        assert_eq!(names, vec!["Ana Ruiz", "Mark Lee", "Lisa Johnson"]);

        let mine = ListView { sort_by_completion: false, only_my_group: true };
        assert_eq!(mine.apply(&lists, &student).len(), 1);
        assert!(!mine.sort_available(&lists, &student));
        assert!(ListView::default().sort_available(&lists, &student));
    }

    #[tokio::test]
    async fn test_load_all_excludes_failed_lists() {
        let backend = MockBackend::with_users(vec![
            user("Lisa Johnson", Role::Mentor, None),
            user("Mark Lee", Role::Mentor, None),
            user("John Doe", Role::Student, Some("Lisa Johnson")),
        ]);
        backend.add_list("Lisa Johnson", vec![task("1", false)]);
        // No list for Mark Lee -> 404 -> skipped

        let lists = load_all(&backend).await.unwrap();

        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].mentor.full_name, "Lisa Johnson");
        assert_eq!(backend.calls()[0], "role:Mentor");
    }

    #[tokio::test]
    async fn test_load_all_fails_when_roster_fails() {
        let backend = MockBackend::new();
        backend.fail("role:Mentor");
        assert!(load_all(&backend).await.is_err());
    }

    #[tokio::test]
    async fn test_toggle_is_one_request_then_one_refetch() {
        let backend = MockBackend::new();
        backend.add_list("Lisa Johnson", vec![task("t1", false)]);

        let outcome = toggle_task(&backend, "Lisa Johnson", &task("t1", false), "lisa@example.com")
            .await
            .unwrap();

        assert_eq!(
            backend.calls(),
            vec![
                "toggle_task:Lisa Johnson:t1:lisa@example.com:true",
                "bucket_list:Lisa Johnson",
            ]
        );
        assert!(outcome.list.tasks[0].completed);
        assert_eq!(outcome.notification.message, "Task completed! 🎉");
        assert!(outcome.reminder.is_some());
    }

    #[tokio::test]
    async fn test_untoggle_has_no_reminder() {
        let backend = MockBackend::new();
        backend.add_list("Lisa Johnson", vec![task("t1", true)]);

        let outcome = toggle_task(&backend, "Lisa Johnson", &task("t1", true), "lisa@example.com")
            .await
            .unwrap();

        assert!(!outcome.list.tasks[0].completed);
        assert_eq!(outcome.notification.message, "Task marked as incomplete");
        assert!(outcome.reminder.is_none());
    }

    #[tokio::test]
    async fn test_failed_toggle_skips_refetch() {
        let backend = MockBackend::new();
        backend.add_list("Lisa Johnson", vec![task("t1", false)]);
        backend.fail("toggle_task:Lisa Johnson:t1:john@example.com:true");

        let result = toggle_task(&backend, "Lisa Johnson", &task("t1", false), "john@example.com").await;

        assert!(result.is_err());
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_add_task_then_refetch() {
        let backend = MockBackend::new();
        backend.add_list("Lisa Johnson", vec![]);

        let list = add_task(&backend, "Lisa Johnson", "  Go bowling ", "john@example.com")
            .await
            .unwrap();

        assert_eq!(list.tasks.len(), 1);
        assert_eq!(list.tasks[0].description, "Go bowling");
        assert_eq!(backend.calls().len(), 2);

        assert!(add_task(&backend, "Lisa Johnson", "   ", "john@example.com").await.is_err());
        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_load_one_failure_surfaces_message_then_retries() {
        let backend = MockBackend::new();

        let err = load_one(&backend, "Lisa Johnson").await.unwrap_err();
        assert_eq!(err.user_message(LOAD_FAILED), "Bucket list not found");

        backend.add_list("Lisa Johnson", vec![task("t1", false)]);
        let list = load_one(&backend, "Lisa Johnson").await.unwrap();

        assert_eq!(list.tasks.len(), 1);
        assert_eq!(
            backend.calls(),
            vec!["bucket_list:Lisa Johnson", "bucket_list:Lisa Johnson"]
        );
    }
}
