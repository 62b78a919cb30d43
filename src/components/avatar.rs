use leptos::prelude::*;

use super::FixedImage;
use crate::image::{initials, ImageRef};

/// Profile picture, or the person's initials when there is none
#[component]
pub fn Avatar(
    #[prop(into)] name: String,
    #[prop(into)] picture: Signal<Option<String>>,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let letters = initials(&name);
    let has_picture = move || ImageRef::parse(picture.get().as_deref()).is_some();

    view! {
        <div class=format!("avatar {class}")>
            <Show
                when=has_picture
                fallback=move || view! { <span class="avatar-initials">{letters.clone()}</span> }
            >
                <FixedImage src=picture alt=name.clone() class="avatar-img" />
            </Show>
        </div>
    }
}
