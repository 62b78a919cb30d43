//! Bucket List Card Component
//!
//! Summary tile for one mentor's list: avatar, name, progress. Clicking it
//! opens the detail page.

use leptos::prelude::*;

use super::Avatar;
use crate::bucket::{completed_count, completion_percent};
use crate::context::{use_app_context, Page};
use crate::models::MentorBucketList;

#[component]
pub fn BucketListCard(entry: MentorBucketList, #[prop(optional)] highlight: bool) -> impl IntoView {
    let ctx = use_app_context();
    let MentorBucketList { list, mentor } = entry;

    let done = completed_count(&list.tasks);
    let total = list.tasks.len();
    let percent = completion_percent(&list.tasks);
    let mentor_name = list.mentor_name.clone();
    let picture = mentor.profile_pic.clone();

    view! {
        <div
            class="bucket-card"
            class:my-group=highlight
            on:click=move |_| ctx.navigate(Page::BucketListDetail(mentor_name.clone()))
        >
            <Avatar name=mentor.full_name.clone() picture=Signal::derive(move || picture.clone()) />
            <div class="bucket-card-body">
                <h3>{list.mentor_name}"'s Group"</h3>
                <p class="bucket-card-count">{format!("{done}/{total} completed")}</p>
                <div class="progress-bar">
                    <div class="progress-fill" style=format!("width: {percent}%")></div>
                </div>
                <span class="progress-label">{format!("{percent}%")}</span>
            </div>
        </div>
    }
}
