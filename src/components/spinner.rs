use leptos::prelude::*;

/// Inline loading indicator
#[component]
pub fn Spinner(#[prop(into, optional)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="spinner-wrap">
            <span class="spinner"></span>
            {label.map(|text| view! { <span class="spinner-label">{text}</span> })}
        </div>
    }
}
