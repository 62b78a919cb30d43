use leptos::prelude::*;

use super::Avatar;
use crate::models::{MentorGroup, User};

/// A mentor and their students
#[component]
pub fn GroupCard(group: MentorGroup) -> impl IntoView {
    let MentorGroup { mentor, students } = group;
    let count = students.len();

    view! {
        <section class="group-card">
            <header class="group-mentor">
                <PersonTile person=mentor />
                <span class="group-count">{format!("{count} students")}</span>
            </header>
            <div class="group-students">
                {if students.is_empty() {
                    view! { <p class="empty">"No students assigned yet"</p> }.into_any()
                } else {
                    students
                        .into_iter()
                        .map(|student| view! { <PersonTile person=student /> })
                        .collect_view()
                        .into_any()
                }}
            </div>
        </section>
    }
}

#[component]
fn PersonTile(person: User) -> impl IntoView {
    let picture = person.profile_pic.clone();
    view! {
        <div class="person-tile">
            <Avatar name=person.full_name.clone() picture=Signal::derive(move || picture.clone()) />
            <div class="person-info">
                <p class="person-name">{person.full_name}</p>
                <p class="person-role">{person.account_type.to_string()}</p>
                <p class="person-facts">{person.fun_facts}</p>
            </div>
        </div>
    }
}
