//! All Bucket Lists Page
//!
//! Every mentor group's list, with "my group only" and completion sorting.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::bucket::{is_own_list, load_all, ListView, LOAD_FAILED};
use crate::components::{BucketListCard, Spinner};
use crate::context::use_app_context;
use crate::models::MentorBucketList;
use crate::session::SessionStateStoreFields;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn BucketListsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (lists, set_lists) = signal(Vec::<MentorBucketList>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);
    let (view_opts, set_view_opts) = signal(ListView::default());
    let (attempt, set_attempt) = signal(0u32);

    Effect::new(move |_| {
        attempt.track();
        let backend = ctx.backend();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match load_all(backend.as_ref()).await {
                Ok(loaded) => set_lists.set(loaded),
                Err(e) => {
                    log::error!("Error fetching bucket lists: {e}");
                    set_error.set(Some(e.user_message(LOAD_FAILED)));
                }
            }
            set_loading.set(false);
        });
    });

    let viewer = move || store.session().user().get().unwrap_or_default();
    let shown = Memo::new(move |_| {
        let viewer = viewer();
        lists.with(|all| view_opts.get().apply(all, &viewer))
    });
    let sort_available = move || {
        let viewer = viewer();
        lists.with(|all| view_opts.get().sort_available(all, &viewer))
    };

    view! {
        <div class="bucket-lists-page">
            <h1 class="page-title">"Bucket Lists"</h1>
            <p class="desc">"See what every mentor group is up to and get inspired!"</p>

            {move || {
                if loading.get() {
                    return view! { <Spinner label="Loading bucket lists..." /> }.into_any();
                }
                if let Some(message) = error.get() {
                    return view! {
                        <div class="error-panel">
                            <h2>"Error Loading Bucket Lists"</h2>
                            <p>{message}</p>
                            <button class="btn-primary" on:click=move |_| set_attempt.update(|n| *n += 1)>
                                "Try Again"
                            </button>
                        </div>
                    }
                    .into_any();
                }
                view! {
                    <div class="list-controls">
                        <Show when=sort_available>
                            <button
                                class="btn-toggle"
                                class:active=move || view_opts.get().sort_by_completion
                                on:click=move |_| set_view_opts.update(|v| v.sort_by_completion = !v.sort_by_completion)
                            >
                                "Sort by completion"
                            </button>
                        </Show>
                        <button
                            class="btn-toggle"
                            class:active=move || view_opts.get().only_my_group
                            on:click=move |_| set_view_opts.update(|v| v.only_my_group = !v.only_my_group)
                        >
                            "Show my group only"
                        </button>
                        <span class="count-badge">
                            {move || {
                                let n = shown.with(Vec::len);
                                format!("{n} Bucket List{} Found", if n == 1 { "" } else { "s" })
                            }}
                        </span>
                    </div>
                    <Show when=move || shown.with(Vec::is_empty)>
                        <div class="empty">
                            <p>
                                {move || if view_opts.get().only_my_group {
                                    "You don't have a group bucket list yet."
                                } else {
                                    "No bucket lists found."
                                }}
                            </p>
                            <p class="hint">
                                {move || if view_opts.get().only_my_group {
                                    "Ask your mentor to add the first goal!"
                                } else {
                                    "Try refreshing or adjusting your filters."
                                }}
                            </p>
                        </div>
                    </Show>
                    <div class="bucket-grid">
                        <For
                            each=move || shown.get()
                            key=|entry| entry.list.mentor_name.clone()
                            children=move |entry| {
                                let highlight = is_own_list(&viewer(), &entry.list.mentor_name);
                                view! { <BucketListCard entry=entry highlight=highlight /> }
                            }
                        />
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}
