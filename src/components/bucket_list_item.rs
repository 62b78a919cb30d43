use leptos::prelude::*;

use super::Spinner;
use crate::models::Task;

/// One goal row: toggle button for mentors, a read-only check otherwise
#[component]
pub fn BucketListItem(
    task: Task,
    can_toggle: bool,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_toggle: Callback<Task>,
) -> impl IntoView {
    let completed = task.completed;
    let description = task.description.clone();
    let mark = if completed { "☑" } else { "☐" };

    let control = if can_toggle {
        view! {
            <button
                class="task-toggle"
                disabled=move || busy.get()
                on:click=move |_| on_toggle.run(task.clone())
            >
                {mark}
            </button>
        }
        .into_any()
    } else {
        view! { <span class="task-check">{mark}</span> }.into_any()
    };

    view! {
        <li class="task-item" class:completed=completed>
            {control}
            <span class="task-description">{description}</span>
            <Show when=move || completed>
                <span class="badge badge-completed">"Completed"</span>
            </Show>
            <Show when=move || busy.get()>
                <Spinner />
            </Show>
        </li>
    }
}
