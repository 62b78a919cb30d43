use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{LeaderboardCar, Spinner};
use crate::context::use_app_context;
use crate::leaderboard::{self, podium, SortOrder, LOAD_FAILED};
use crate::models::LeaderboardEntry;
use crate::notify::Notification;
use crate::store::{push_toast, use_app_store};

const PLACES: [&str; 3] = ["1st Place", "2nd Place", "3rd Place"];

#[component]
pub fn LeaderboardPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (entries, set_entries) = signal(Vec::<LeaderboardEntry>::new());
    let (loading, set_loading) = signal(false);
    let (reload, set_reload) = signal(0u32);
    let (order, set_order) = signal(SortOrder::default());
    // Order the current entries were sorted in
    let (loaded_order, set_loaded_order) = signal(SortOrder::default());

    Effect::new(move |_| {
        reload.track();
        let order = order.get();
        let backend = ctx.backend();
        set_loading.set(true);
        spawn_local(async move {
            match leaderboard::load(backend.as_ref(), order).await {
                Ok(loaded) => {
                    set_entries.set(loaded);
                    set_loaded_order.set(order);
                }
                Err(e) => {
                    log::error!("Error fetching leaderboard: {e}");
                    push_toast(store, Notification::error(e.user_message(LOAD_FAILED)));
                }
            }
            set_loading.set(false);
        });
    });

    let top_three = move || {
        entries.with(|list| {
            podium(list, loaded_order.get()).map(|top| top.map(|entry| entry.name.clone()))
        })
    };

    view! {
        <div class="leaderboard-page">
            <h1 class="page-title">"Leaderboard"</h1>
            <button
                class="btn-secondary"
                disabled=move || loading.get()
                on:click=move |_| set_reload.update(|n| *n += 1)
            >
                {move || if loading.get() { "Refreshing..." } else { "Refresh" }}
            </button>
            <button
                class="btn-secondary"
                disabled=move || loading.get()
                on:click=move |_| set_order.update(|o| *o = o.toggled())
            >
                {move || order.get().toggle_label()}
            </button>

            {move || top_three().map(|names| view! {
                <div class="podium">
                    {PLACES
                        .iter()
                        .zip(names)
                        .map(|(place, name)| view! { <div>{format!("{place}: {name}")}</div> })
                        .collect_view()}
                </div>
            })}

            <Show when=move || !loading.get() || !entries.get().is_empty() fallback=|| view! { <Spinner /> }>
                <div class="race-track">
                    <For
                        each=move || entries.get()
                        key=|entry| (entry.name.clone(), entry.points)
                        children=|entry| view! { <LeaderboardCar entry=entry /> }
                    />
                </div>
            </Show>
        </div>
    }
}
