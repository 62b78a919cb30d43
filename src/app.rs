//! Mentorship Frontend App
//!
//! Root component: provides context, restores the session, gates pages on
//! authentication and switches between them.

use std::sync::Arc;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::Backend;
use crate::components::{NavBar, Toaster};
use crate::config::AppConfig;
use crate::context::{AppContext, Page};
use crate::pages::{
    BucketListDetailPage, BucketListsPage, GroupsPage, HomePage, LeaderboardPage, LoginPage,
    ProfilePage, SignupPage,
};
use crate::persist::KeyValueStore;
use crate::session::SessionStateStoreFields;
use crate::store::{restore_session, AppState, AppStateStoreFields};

#[component]
pub fn App(
    config: AppConfig,
    backend: Arc<dyn Backend>,
    storage: Arc<dyn KeyValueStore>,
) -> impl IntoView {
    let page = signal(Page::Login);
    let ctx = AppContext::new(page, config, backend, storage);
    let store = Store::new(AppState::default());

    // Provide context to all children
    provide_context(ctx);
    provide_context(store);

    restore_session(store, ctx);

    // Signed-in users never see Login/Signup; everyone else sees nothing but
    Effect::new(move |_| {
        let signed_in = store.session().user().with(Option::is_some);
        let current = ctx.page.get();
        if signed_in && current.is_public() {
            ctx.navigate(Page::Home);
        } else if !signed_in && !current.is_public() {
            ctx.navigate(Page::Login);
        }
    });

    let signed_in = move || store.session().user().with(Option::is_some);

    view! {
        <div class="app-layout">
            <Show when=signed_in>
                <NavBar />
            </Show>
            <main class="main-content">
                {move || match ctx.page.get() {
                    Page::Login => view! { <LoginPage /> }.into_any(),
                    Page::Signup => view! { <SignupPage /> }.into_any(),
                    Page::Home => view! { <HomePage /> }.into_any(),
                    Page::Profile => view! { <ProfilePage /> }.into_any(),
                    Page::Groups => view! { <GroupsPage /> }.into_any(),
                    Page::BucketLists => view! { <BucketListsPage /> }.into_any(),
                    Page::BucketListDetail(mentor) => {
                        view! { <BucketListDetailPage mentor_name=mentor /> }.into_any()
                    }
                    Page::Leaderboard => view! { <LeaderboardPage /> }.into_any(),
                }}
            </main>
            <Toaster />
        </div>
    }
}
