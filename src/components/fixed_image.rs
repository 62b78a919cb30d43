//! Fixed Image Component
//!
//! `<img>` that accepts whatever image shape the backend returned and falls
//! back to the default avatar when there is nothing to show or loading fails.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::image::normalize_image_url;

#[component]
pub fn FixedImage(
    #[prop(into)] src: Signal<Option<String>>,
    #[prop(into)] alt: String,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let config = use_app_context().config();
    let origin = config.api_base_url;
    let fallback = config.default_avatar;
    let (failed, set_failed) = signal(false);

    // A new source gets a fresh chance to load
    Effect::new(move |_| {
        src.track();
        set_failed.set(false);
    });

    let resolved = move || normalize_image_url(src.get().as_deref(), &origin);
    let url = {
        let fallback = fallback.clone();
        move || {
            if failed.get() {
                return fallback.clone();
            }
            resolved().unwrap_or_else(|| fallback.clone())
        }
    };

    let on_error = move |_| {
        if failed.get_untracked() {
            return;
        }
        log::error!(
            "Image failed to load, using {fallback}: {}",
            src.get_untracked().map(|s| preview(&s)).unwrap_or_default()
        );
        set_failed.set(true);
    };

    view! { <img class=class src=url alt=alt on:error=on_error /> }
}

/// Data URLs are far too long for a log line
fn preview(src: &str) -> String {
    match src.char_indices().nth(60) {
        Some((idx, _)) => format!("{}...", &src[..idx]),
        None => src.to_string(),
    }
}
