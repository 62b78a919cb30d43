//! Toaster Component
//!
//! Renders the notifications held in the app store.

use leptos::prelude::*;

use crate::notify::ToastLevel;
use crate::store::{dismiss_toast, use_app_store, AppStateStoreFields};

#[component]
pub fn Toaster() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toaster">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let note = toast.notification;
                    let level = match note.level {
                        ToastLevel::Success => "toast-success",
                        ToastLevel::Error => "toast-error",
                        ToastLevel::Info => "toast-info",
                    };
                    let icon = note.icon.unwrap_or(match note.level {
                        ToastLevel::Success => "✓",
                        ToastLevel::Error => "✗",
                        ToastLevel::Info => "ℹ",
                    });
                    view! {
                        <div class=format!("toast {level}") on:click=move |_| dismiss_toast(store, id)>
                            <span class="toast-icon">{icon}</span>
                            <span class="toast-message">{note.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
