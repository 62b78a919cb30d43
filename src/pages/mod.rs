//! Pages
//!
//! One component per [`Page`](crate::context::Page).

mod bucket_list_detail;
mod bucket_lists;
mod groups;
mod home;
mod leaderboard;
mod login;
mod profile;
mod signup;

pub use bucket_list_detail::BucketListDetailPage;
pub use bucket_lists::BucketListsPage;
pub use groups::GroupsPage;
pub use home::HomePage;
pub use leaderboard::LeaderboardPage;
pub use login::LoginPage;
pub use profile::ProfilePage;
pub use signup::SignupPage;
