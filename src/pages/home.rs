use leptos::prelude::*;

use crate::context::{use_app_context, Page};
use crate::session::SessionStateStoreFields;
use crate::store::{use_app_store, AppStateStoreFields};

const FEATURES: &[(&str, &str, &str, Page)] = &[
    (
        "🏆",
        "Leaderboard",
        "Track your group's progress and see how you match up with the others.",
        Page::Leaderboard,
    ),
    ("🫂", "Groups", "View all the members of each mentor group.", Page::Groups),
    (
        "📝",
        "Bucket Lists",
        "Browse every group's bucket list and keep your own up to date.",
        Page::BucketLists,
    ),
];

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let first_name = move || {
        store
            .session()
            .user()
            .get()
            .and_then(|u| u.full_name.split_whitespace().next().map(str::to_string))
            .unwrap_or_default()
    };

    view! {
        <div class="home">
            <section class="cover">
                <h1>"Ctrl-Alt-Elite"</h1>
                <p class="welcome">{move || format!("Welcome back, {}!", first_name())}</p>
            </section>
            <section class="about">
                <h2>"Create, Complete, and Compete!"</h2>
                <p class="desc">
                    "Build your mentor group's bucket list, tick off goals together and earn "
                    "one point for every completed item."
                </p>
                <div class="feature-cards">
                    {FEATURES
                        .iter()
                        .map(|(icon, title, desc, page)| {
                            let target = page.clone();
                            view! {
                                <button class="feature-card" on:click=move |_| ctx.navigate(target.clone())>
                                    <span class="feature-icon">{*icon}</span>
                                    <span class="feature-title">{*title}</span>
                                    <span class="feature-desc">{*desc}</span>
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </section>
        </div>
    }
}
