//! Bucket List Detail Page
//!
//! One mentor group's goals. Group members add goals; the mentor ticks them off.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::bucket::{
    self, can_add, can_toggle, completed_count, completion_percent, ADD_FAILED, LEADERBOARD_REMINDER_DELAY_MS,
    LOAD_FAILED, TOGGLE_FAILED,
};
use crate::components::{BucketListItem, Spinner};
use crate::context::{use_app_context, Page};
use crate::models::{BucketList, Task};
use crate::notify::Notification;
use crate::session::SessionStateStoreFields;
use crate::store::{push_toast, push_toast_later, use_app_store, AppStateStoreFields};

#[component]
pub fn BucketListDetailPage(#[prop(into)] mentor_name: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let mentor = StoredValue::new(mentor_name);

    let (list, set_list) = signal::<Option<BucketList>>(None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);
    let (attempt, set_attempt) = signal(0u32);
    let (toggling, set_toggling) = signal::<Option<String>>(None);
    let (adding, set_adding) = signal(false);
    let (new_task, set_new_task) = signal(String::new());

    Effect::new(move |_| {
        attempt.track();
        let backend = ctx.backend();
        let name = mentor.get_value();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match bucket::load_one(backend.as_ref(), &name).await {
                Ok(loaded) => set_list.set(Some(loaded)),
                Err(e) => {
                    log::error!("Error fetching bucket list for {name}: {e}");
                    set_error.set(Some(e.user_message(LOAD_FAILED)));
                }
            }
            set_loading.set(false);
        });
    });

    let viewer = move || store.session().user().get().unwrap_or_default();
    let may_add = move || mentor.with_value(|name| can_add(&viewer(), name));
    let may_toggle = move || mentor.with_value(|name| can_toggle(&viewer(), name));

    let on_toggle = Callback::new(move |task: Task| {
        if toggling.get_untracked().is_some() {
            return;
        }
        let Some(email) = store.session().user().get_untracked().map(|u| u.email) else {
            return;
        };
        let backend = ctx.backend();
        let name = mentor.get_value();
        set_toggling.set(Some(task.id.clone()));
        spawn_local(async move {
            match bucket::toggle_task(backend.as_ref(), &name, &task, &email).await {
                Ok(outcome) => {
                    set_list.set(Some(outcome.list));
                    push_toast(store, outcome.notification);
                    if let Some(reminder) = outcome.reminder {
                        push_toast_later(store, reminder, LEADERBOARD_REMINDER_DELAY_MS);
                    }
                }
                Err(e) => {
                    log::error!("Error toggling task {}: {e}", task.id);
                    push_toast(store, Notification::error(e.user_message(TOGGLE_FAILED)));
                }
            }
            set_toggling.set(None);
        });
    });

    let add = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(email) = store.session().user().get_untracked().map(|u| u.email) else {
            return;
        };
        let description = new_task.get_untracked();
        let backend = ctx.backend();
        let name = mentor.get_value();
        set_adding.set(true);
        spawn_local(async move {
            match bucket::add_task(backend.as_ref(), &name, &description, &email).await {
                Ok(refreshed) => {
                    set_list.set(Some(refreshed));
                    set_new_task.set(String::new());
                    push_toast(store, Notification::success("New task added to bucket list!"));
                }
                Err(e) => {
                    log::error!("Error adding task: {e}");
                    push_toast(store, Notification::error(e.user_message(ADD_FAILED)));
                }
            }
            set_adding.set(false);
        });
    };

    let progress = move || {
        list.with(|l| {
            l.as_ref().map(|l| {
                (completed_count(&l.tasks), l.tasks.len(), completion_percent(&l.tasks))
            })
        })
    };

    view! {
        <div class="bucket-detail-page">
            <button class="btn-link" on:click=move |_| ctx.navigate(Page::BucketLists)>
                "← All bucket lists"
            </button>
            <h1 class="page-title">{move || format!("{}'s Group", mentor.get_value())}</h1>

            {move || {
                if let Some(message) = error.get() {
                    return view! {
                        <div class="error-panel">
                            <h2>"Error Loading Tasks"</h2>
                            <p>{message}</p>
                            <button class="btn-primary" on:click=move |_| set_attempt.update(|n| *n += 1)>
                                "Try Again"
                            </button>
                            <button class="btn-secondary" on:click=move |_| ctx.navigate(Page::BucketLists)>
                                "Back to All Lists"
                            </button>
                        </div>
                    }
                    .into_any();
                }
                view! {
                    {move || progress().map(|(done, total, percent)| view! {
                        <div class="detail-progress">
                            <span>{format!("{done}/{total} completed")}</span>
                            <div class="progress-bar">
                                <div class="progress-fill" style=format!("width: {percent}%")></div>
                            </div>
                            <span>{format!("{percent}%")}</span>
                        </div>
                    })}

                    <Show when=may_add>
                        <form class="add-task-form" on:submit=add>
                            <input
                                type="text"
                                placeholder="Add a new goal..."
                                prop:value=move || new_task.get()
                                on:input=move |ev| set_new_task.set(event_target_value(&ev))
                            />
                            <button type="submit" class="btn-primary" disabled=move || adding.get()>
                                {move || if adding.get() { "Adding..." } else { "Add" }}
                            </button>
                        </form>
                    </Show>

                    <Show when=move || !loading.get() fallback=|| view! { <Spinner label="Loading bucket list..." /> }>
                        <Show
                            when=move || list.with(|l| l.as_ref().is_some_and(|l| !l.tasks.is_empty()))
                            fallback=|| view! { <p class="empty">"No tasks yet."</p> }
                        >
                            <ul class="task-list">
                                <For
                                    each=move || list.get().map(|l| l.tasks).unwrap_or_default()
                                    key=|task| (task.id.clone(), task.completed)
                                    children=move |task| {
                                        let id = task.id.clone();
                                        let busy = Signal::derive(move || toggling.get().as_deref() == Some(id.as_str()));
                                        view! {
                                            <BucketListItem
                                                task=task
                                                can_toggle=may_toggle()
                                                busy=busy
                                                on_toggle=on_toggle
                                            />
                                        }
                                    }
                                />
                            </ul>
                        </Show>
                    </Show>
                }
                .into_any()
            }}
        </div>
    }
}
