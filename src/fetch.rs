//! Roster Fan-out
//!
//! Pages that need something per mentor first load the mentor roster, then
//! issue one request per mentor concurrently and wait for all of them.

use std::future::Future;

use futures::future::join_all;
use log::error;

use crate::api::Backend;
use crate::error::Result;
use crate::models::{Role, User};

/// What a single failed per-mentor request does to the batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPolicy {
    /// Drop that mentor from the results
    SkipFailures,
    /// Abort the whole batch with the first error (in roster order)
    FailFast,
}

pub async fn mentor_roster(backend: &dyn Backend) -> Result<Vec<User>> {
    backend.profiles_by_role(&Role::Mentor).await
}

/// Run `fetch` for every mentor concurrently and pair results with mentors
pub async fn per_mentor<T, F, Fut>(
    mentors: Vec<User>,
    policy: BatchPolicy,
    fetch: F,
) -> Result<Vec<(User, T)>>
where
    F: Fn(User) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let results = join_all(mentors.iter().cloned().map(&fetch)).await;

    let mut joined = Vec::with_capacity(mentors.len());
    for (mentor, result) in mentors.into_iter().zip(results) {
        match result {
            Ok(value) => joined.push((mentor, value)),
            Err(e) => {
                error!("Fetch for mentor {} failed: {e}", mentor.full_name);
                if policy == BatchPolicy::FailFast {
                    return Err(e);
                }
            }
        }
    }
    Ok(joined)
}
