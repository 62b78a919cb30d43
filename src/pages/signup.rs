use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::components::Spinner;
use crate::context::{use_app_context, Page};
use crate::models::Role;
use crate::session::{self, Busy, SessionStateStoreFields, SignupForm};
use crate::store::{run_session_op, use_app_store, AppStateStoreFields};

#[component]
pub fn SignupPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (role, set_role) = signal(Role::Student);
    let (full_name, set_full_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let signing_up = move || store.session().is_signing_up().get();

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let form = SignupForm {
            full_name: full_name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            role: role.get_untracked(),
        };
        run_session_op(store, ctx, Busy::SigningUp, move |backend, state| async move {
            session::signup(backend.as_ref(), &state, form).await
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <header class="auth-header">
                    <h1>"Create Account"</h1>
                    <p>"Join your mentor group"</p>
                </header>
                <form class="auth-form" on:submit=submit>
                    <label>
                        "I am a"
                        <select on:change=move |ev| set_role.set(Role::parse(&event_target_value(&ev)))>
                            {Role::SIGNUP_CHOICES
                                .iter()
                                .map(|choice| {
                                    let value = choice.to_string();
                                    let selected = {
                                        let choice = choice.clone();
                                        move || role.get() == choice
                                    };
                                    view! {
                                        <option value=value.clone() selected=selected>{value.clone()}</option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <label>
                        "Full Name"
                        <input
                            type="text"
                            placeholder="John Doe"
                            prop:value=move || full_name.get()
                            on:input=move |ev| set_full_name.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Email"
                        <input
                            type="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Password"
                        <input
                            type="password"
                            placeholder="••••••••"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </label>
                    <button type="submit" class="btn-primary" disabled=signing_up>
                        <Show when=signing_up fallback=|| "Create Account">
                            <Spinner label="Loading..." />
                        </Show>
                    </button>
                </form>
                <footer class="auth-footer">
                    "Already have an account? "
                    <a href="#" on:click=move |ev| {
                        ev.prevent_default();
                        ctx.navigate(Page::Login);
                    }>"Sign in"</a>
                </footer>
            </div>
        </div>
    }
}
