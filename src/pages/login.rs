use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::components::Spinner;
use crate::context::{use_app_context, Page};
use crate::session::{self, Busy, SessionStateStoreFields};
use crate::store::{run_session_op, use_app_store, AppStateStoreFields};

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let logging_in = move || store.session().is_logging_in().get();

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let email = email.get_untracked();
        let password = password.get_untracked();
        run_session_op(store, ctx, Busy::LoggingIn, move |backend, state| async move {
            session::login(backend.as_ref(), &state, &email, &password).await
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <header class="auth-header">
                    <h1>"Ctrl-Alt-Elite"</h1>
                    <p>"Make Bootcamp Fun!"</p>
                </header>
                <form class="auth-form" on:submit=submit>
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
                    <button type="submit" class="btn-primary" disabled=logging_in>
                        <Show when=logging_in fallback=|| "Sign in">
                            <Spinner label="Loading..." />
                        </Show>
                    </button>
                </form>
                <footer class="auth-footer">
                    "Don't have an account? "
                    <a href="#" on:click=move |ev| {
                        ev.prevent_default();
                        ctx.navigate(Page::Signup);
                    }>"Create account"</a>
                </footer>
            </div>
        </div>
    }
}
