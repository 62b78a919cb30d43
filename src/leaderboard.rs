//! Leaderboard: one car per mentor group, ordered by points

use crate::api::Backend;
use crate::error::Result;
use crate::fetch::mentor_roster;
use crate::models::{LeaderboardEntry, User};

pub const LOAD_FAILED: &str = "Failed to load leaderboard";

/// Car illustrations, assigned round-robin in roster order
pub const CAR_IMAGES: [&str; 6] = [
    "/cars/red.png",
    "/cars/blue.png",
    "/cars/green.png",
    "/cars/yellow.png",
    "/cars/purple.png",
    "/cars/orange.png",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Lowest first, so the leader finishes the track on the right
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Button text offering the other order
    pub fn toggle_label(self) -> &'static str {
        match self {
            SortOrder::Ascending => "Highest first",
            SortOrder::Descending => "Lowest first",
        }
    }
}

pub fn car_image(entry: &LeaderboardEntry) -> &'static str {
    CAR_IMAGES[entry.decoration % CAR_IMAGES.len()]
}

/// Entries for the given mentors, sorted by points
pub fn build_entries(mentors: &[User], order: SortOrder) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = mentors
        .iter()
        .enumerate()
        .map(|(idx, mentor)| LeaderboardEntry {
            name: mentor.full_name.clone(),
            points: mentor.points,
            decoration: idx % CAR_IMAGES.len(),
        })
        .collect();

    match order {
        SortOrder::Ascending => entries.sort_by_key(|e| e.points),
        SortOrder::Descending => entries.sort_by_key(|e| std::cmp::Reverse(e.points)),
    }
    entries
}

/// First, second and third place; only once there are three groups
pub fn podium(entries: &[LeaderboardEntry], order: SortOrder) -> Option<[&LeaderboardEntry; 3]> {
    let n = entries.len();
    if n < 3 {
        return None;
    }
    Some(match order {
        SortOrder::Ascending => [&entries[n - 1], &entries[n - 2], &entries[n - 3]],
        SortOrder::Descending => [&entries[0], &entries[1], &entries[2]],
    })
}

pub async fn load(backend: &dyn Backend, order: SortOrder) -> Result<Vec<LeaderboardEntry>> {
    let mentors = mentor_roster(backend).await?;
    Ok(build_entries(&mentors, order))
}
