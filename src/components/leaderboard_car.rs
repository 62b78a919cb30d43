use leptos::prelude::*;

use crate::leaderboard::car_image;
use crate::models::LeaderboardEntry;

/// One group's car on the race track
#[component]
pub fn LeaderboardCar(entry: LeaderboardEntry) -> impl IntoView {
    let image = car_image(&entry);
    view! {
        <div class="leaderboard-car">
            <img src=image alt=format!("{} car", entry.name) />
            <p class="car-name">{entry.name.clone()}</p>
            <p class="car-points">{format!("Points: {}", entry.points)}</p>
        </div>
    }
}
