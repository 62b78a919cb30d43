//! Navigation Bar Component
//!
//! Page links plus the account menu (Profile / Logout).

use leptos::prelude::*;

use super::Avatar;
use crate::context::{use_app_context, Page};
use crate::session::{self, SessionStateStoreFields};
use crate::store::{apply_transition, use_app_store, AppStateStoreFields};

const LINKS: &[(&str, Page)] = &[
    ("Home", Page::Home),
    ("Groups", Page::Groups),
    ("Bucket Lists", Page::BucketLists),
    ("Leaderboard", Page::Leaderboard),
];

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (menu_open, set_menu_open) = signal(false);

    let user_name = move || {
        store
            .session()
            .user()
            .get()
            .map(|u| u.full_name)
            .unwrap_or_default()
    };
    let picture = Signal::derive(move || store.session().user().get().and_then(|u| u.profile_pic));

    let logout = move |_| {
        set_menu_open.set(false);
        let transition = session::logout(&store.session().get_untracked());
        apply_transition(store, ctx, transition);
        ctx.navigate(Page::Login);
    };

    view! {
        <nav class="nav-bar">
            <button class="nav-brand" on:click=move |_| ctx.navigate(Page::Home)>
                "Ctrl-Alt-Elite"
            </button>
            <div class="nav-links">
                {LINKS.iter().map(|(label, page)| {
                    let target = page.clone();
                    let active = {
                        let page = page.clone();
                        move || ctx.page.get() == page
                    };
                    view! {
                        <button
                            class="nav-link"
                            class:active=active
                            on:click=move |_| ctx.navigate(target.clone())
                        >
                            {*label}
                        </button>
                    }
                }).collect_view()}
            </div>
            <div class="nav-menu">
                <button class="nav-menu-toggle" on:click=move |_| set_menu_open.update(|open| *open = !*open)>
                    {move || view! { <Avatar name=user_name() picture=picture class="avatar-small" /> }}
                </button>
                <Show when=move || menu_open.get()>
                    <div class="nav-dropdown">
                        <button on:click=move |_| {
                            set_menu_open.set(false);
                            ctx.navigate(Page::Profile);
                        }>"Profile"</button>
                        <button on:click=logout>"Logout"</button>
                    </div>
                </Show>
            </div>
        </nav>
    }
}
