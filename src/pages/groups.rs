use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{GroupCard, Spinner};
use crate::context::use_app_context;
use crate::groups::{load_groups, LOAD_FAILED};
use crate::models::MentorGroup;
use crate::notify::Notification;
use crate::store::{push_toast, use_app_store};

#[component]
pub fn GroupsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (groups, set_groups) = signal(Vec::<MentorGroup>::new());
    let (loading, set_loading) = signal(true);

    Effect::new(move |_| {
        let backend = ctx.backend();
        spawn_local(async move {
            match load_groups(backend.as_ref()).await {
                Ok(loaded) => set_groups.set(loaded),
                Err(e) => {
                    log::error!("Error fetching groups: {e}");
                    push_toast(store, Notification::error(e.user_message(LOAD_FAILED)));
                }
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="groups-page">
            <h1 class="page-title">"Mentor Groups"</h1>
            <Show when=move || !loading.get() fallback=|| view! { <Spinner label="Loading groups..." /> }>
                <Show
                    when=move || !groups.get().is_empty()
                    fallback=|| view! { <p class="empty">"No groups found."</p> }
                >
                    <div class="group-grid">
                        <For
                            each=move || groups.get()
                            key=|group| group.mentor.email.clone()
                            children=|group| view! { <GroupCard group=group /> }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}
