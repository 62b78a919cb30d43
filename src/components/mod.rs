//! UI Components
//!
//! Reusable Leptos components.

mod avatar;
mod bucket_list_card;
mod bucket_list_item;
mod fixed_image;
mod group_card;
mod leaderboard_car;
mod nav_bar;
mod spinner;
mod toaster;

pub use avatar::Avatar;
pub use bucket_list_card::BucketListCard;
pub use bucket_list_item::BucketListItem;
pub use fixed_image::FixedImage;
pub use group_card::GroupCard;
pub use leaderboard_car::LeaderboardCar;
pub use nav_bar::NavBar;
pub use spinner::Spinner;
pub use toaster::Toaster;
