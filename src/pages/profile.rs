//! Profile Page
//!
//! Shows the signed-in user's profile, edits name / mentor / fun fact, and
//! changes the profile picture from a local file.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

use crate::api::{ImageUpload, ProfileUpdate};
use crate::components::{FixedImage, Spinner};
use crate::context::use_app_context;
use crate::gallery;
use crate::image::to_data_url;
use crate::notify::Notification;
use crate::session::{self, Busy, SessionStateStoreFields};
use crate::store::{push_toast, run_session_op, use_app_store, AppStateStoreFields};
use crate::validation::validate_image_file;

async fn read_bytes(file: &File) -> Result<Vec<u8>, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

fn picked_file(ev: &leptos::ev::Event) -> Option<File> {
    let input: HtmlInputElement = event_target(ev);
    let file = input.files().and_then(|files| files.get(0));
    // Let the same file be picked again
    input.set_value("");
    file
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let user = move || store.session().user().get();
    let updating = move || store.session().is_updating_profile().get();

    let (editing, set_editing) = signal(false);
    let (full_name, set_full_name) = signal(String::new());
    let (mentor_name, set_mentor_name) = signal(String::new());
    let (fun_facts, set_fun_facts) = signal(String::new());
    let (uploading_photo, set_uploading_photo) = signal(false);

    let start_editing = move |_| {
        if let Some(u) = store.session().user().get_untracked() {
            set_full_name.set(u.full_name);
            set_mentor_name.set(u.mentor_name.unwrap_or_default());
            set_fun_facts.set(u.fun_facts);
        }
        set_editing.set(true);
    };

    let save = move |_| {
        let update = ProfileUpdate {
            full_name: Some(full_name.get_untracked()),
            mentor_name: Some(mentor_name.get_untracked()),
            fun_facts: Some(fun_facts.get_untracked()),
            profile_pic: None,
        };
        set_editing.set(false);
        run_session_op(store, ctx, Busy::UpdatingProfile, move |backend, state| async move {
            session::update_profile(backend.as_ref(), &state, update).await
        });
    };

    let change_picture = move |ev: leptos::ev::Event| {
        let Some(file) = picked_file(&ev) else {
            return;
        };
        let config = ctx.config();
        if let Err(e) = validate_image_file(&file.type_(), file.size() as u64, config.max_upload_bytes) {
            push_toast(store, Notification::error(e.user_message("")));
            return;
        }
        let Some(email) = store.session().user().get_untracked().map(|u| u.email) else {
            return;
        };

        spawn_local(async move {
            let data = match read_bytes(&file).await {
                Ok(bytes) => to_data_url(&file.type_(), &bytes),
                Err(e) => {
                    log::error!("Error reading file: {e:?}");
                    push_toast(store, Notification::error("Error reading file"));
                    return;
                }
            };
            let origin = config.api_base_url;
            run_session_op(store, ctx, Busy::UpdatingProfile, move |backend, state| async move {
                session::update_profile_pic(backend.as_ref(), &state, &origin, &email, &data).await
            });
        });
    };

    let upload_photo = move |ev: leptos::ev::Event| {
        let Some(file) = picked_file(&ev) else {
            return;
        };
        let Some(owner) = store.session().user().get_untracked() else {
            return;
        };
        let max = ctx.config().max_upload_bytes;
        let backend = ctx.backend();
        set_uploading_photo.set(true);

        spawn_local(async move {
            let result = match read_bytes(&file).await {
                Ok(bytes) => {
                    let upload = ImageUpload {
                        file_name: file.name(),
                        content_type: file.type_(),
                        bytes,
                    };
                    gallery::upload_photo(backend.as_ref(), &owner, upload, max).await
                }
                Err(e) => {
                    log::error!("Error reading file: {e:?}");
                    Err(crate::error::ApiError::validation("Error reading file"))
                }
            };
            set_uploading_photo.set(false);
            match result {
                Ok(_) => push_toast(store, Notification::success("Photo uploaded")),
                Err(e) => push_toast(
                    store,
                    Notification::error(e.user_message(gallery::UPLOAD_FAILED)),
                ),
            }
        });
    };

    view! {
        <div class="profile-page">
            <Show
                when=move || user().is_some()
                fallback=|| view! { <Spinner label="Loading profile..." /> }
            >
                <div class="profile-card">
                    <header class="profile-header">
                        <h1>"My Profile"</h1>
                        <Show when=move || !editing.get()>
                            <button class="btn-secondary" on:click=start_editing>"Edit"</button>
                        </Show>
                    </header>

                    <div class="profile-picture">
                        <FixedImage
                            src=Signal::derive(move || user().and_then(|u| u.profile_pic))
                            alt="Profile"
                            class="profile-img"
                        />
                        <label class="btn-secondary" for="profile-picture-upload">
                            {move || if updating() { "Uploading..." } else { "Change Picture" }}
                        </label>
                        <input
                            id="profile-picture-upload"
                            type="file"
                            accept="image/*"
                            class="hidden"
                            disabled=updating
                            on:change=change_picture
                        />
                    </div>

                    <Show
                        when=move || editing.get()
                        fallback=move || {
                            let u = user().unwrap_or_default();
                            view! {
                                <dl class="profile-details">
                                    <dt>"Name"</dt><dd>{u.full_name}</dd>
                                    <dt>"Email"</dt><dd>{u.email}</dd>
                                    <dt>"Role"</dt><dd>{u.account_type.to_string()}</dd>
                                    <dt>"Mentor"</dt><dd>{u.mentor_name.unwrap_or_else(|| "None".to_string())}</dd>
                                    <dt>"Fun Fact"</dt><dd>{u.fun_facts}</dd>
                                    <dt>"Points"</dt><dd>{u.points}</dd>
                                </dl>
                            }
                        }
                    >
                        <div class="profile-form">
                            <label>
                                "Full Name"
                                <input
                                    type="text"
                                    prop:value=move || full_name.get()
                                    on:input=move |ev| set_full_name.set(event_target_value(&ev))
                                />
                            </label>
                            <label>
                                "Mentor Name"
                                <input
                                    type="text"
                                    prop:value=move || mentor_name.get()
                                    on:input=move |ev| set_mentor_name.set(event_target_value(&ev))
                                />
                            </label>
                            <label>
                                "Fun Fact"
                                <textarea
                                    prop:value=move || fun_facts.get()
                                    on:input=move |ev| set_fun_facts.set(event_target_value(&ev))
                                ></textarea>
                            </label>
                            <div class="form-actions">
                                <button class="btn-secondary" on:click=move |_| set_editing.set(false)>
                                    "Cancel"
                                </button>
                                <button class="btn-primary" disabled=updating on:click=save>
                                    "Save"
                                </button>
                            </div>
                        </div>
                    </Show>

                    <div class="profile-gallery">
                        <label class="btn-secondary" for="gallery-upload">
                            {move || if uploading_photo.get() { "Uploading..." } else { "Add Photo" }}
                        </label>
                        <input
                            id="gallery-upload"
                            type="file"
                            accept="image/*"
                            class="hidden"
                            disabled=move || uploading_photo.get()
                            on:change=upload_photo
                        />
                    </div>
                </div>
            </Show>
        </div>
    }
}
