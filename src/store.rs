//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Session
//! transitions computed in [`crate::session`] are applied here.

use std::future::Future;
use std::sync::Arc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};
use reactive_stores::Store;

use crate::api::Backend;
use crate::context::AppContext;
use crate::notify::{Notification, Toast};
use crate::session::{Busy, Effect, SessionState, SessionStateStoreFields, Transition};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user and in-flight flags
    pub session: SessionState,
    /// Notifications currently on screen
    pub toasts: Vec<Toast>,
    pub next_toast_id: u32,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Show a notification and schedule its removal
pub fn push_toast(store: AppStore, notification: Notification) {
    let id = {
        let field = store.next_toast_id();
        let mut next = field.write();
        *next = next.wrapping_add(1);
        *next
    };
    let duration = notification.duration_ms;
    store.toasts().write().push(Toast { id, notification });

    spawn_local(async move {
        TimeoutFuture::new(duration).await;
        dismiss_toast(store, id);
    });
}

/// Show a notification after `delay_ms`
pub fn push_toast_later(store: AppStore, notification: Notification, delay_ms: u32) {
    spawn_local(async move {
        TimeoutFuture::new(delay_ms).await;
        push_toast(store, notification);
    });
}

pub fn dismiss_toast(store: AppStore, id: u32) {
    store.toasts().write().retain(|t| t.id != id);
}

/// Read the persisted session into the store
pub fn restore_session(store: AppStore, ctx: AppContext) {
    let user = ctx.with_persistence(|p| p.load());
    if let Some(user) = &user {
        info!("Restored session for {}", user.email);
    }
    store.session().user().set(user);
}

/// Set `busy`, run `op` against the backend, then apply what it returns
pub fn run_session_op<F, Fut>(store: AppStore, ctx: AppContext, busy: Busy, op: F)
where
    F: FnOnce(Arc<dyn Backend>, SessionState) -> Fut + 'static,
    Fut: Future<Output = Transition> + 'static,
{
    let started = store.session().get_untracked().with_busy(busy, true);
    store.session().set(started.clone());
    let backend = ctx.backend();

    spawn_local(async move {
        let transition = op(backend, started.clone()).await;
        for notification in settle(store, ctx, &started, busy, transition) {
            push_toast(store, notification);
        }
    });
}

/// The user an operation started with is no longer the one signed in
fn signed_out_since(started: &SessionState, current: &SessionState) -> bool {
    match (&started.user, &current.user) {
        (Some(before), Some(now)) => before.email != now.email,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Commit a finished operation unless the session changed hands meanwhile
fn settle(
    store: AppStore,
    ctx: AppContext,
    started: &SessionState,
    busy: Busy,
    transition: Transition,
) -> Vec<Notification> {
    let current = store.session().get_untracked();
    if signed_out_since(started, &current) {
        info!("Discarding session result that finished after sign-out");
        store.session().set(current.with_busy(busy, false));
        return Vec::new();
    }
    commit_transition(store, ctx, transition)
}

/// Commit a transition's state and run its effects in order
pub fn apply_transition(store: AppStore, ctx: AppContext, transition: Transition) {
    for notification in commit_transition(store, ctx, transition) {
        push_toast(store, notification);
    }
}

/// Set the state and run storage effects; notifications are handed back
fn commit_transition(store: AppStore, ctx: AppContext, transition: Transition) -> Vec<Notification> {
    let Transition { state, effects } = transition;
    store.session().set(state.clone());

    let mut notifications = Vec::new();
    for effect in effects {
        match effect {
            Effect::Notify(notification) => notifications.push(notification),
            Effect::Persist => {
                if let Err(e) = ctx.with_persistence(|p| p.save(state.user.as_ref())) {
                    error!("Failed to persist session: {e}");
                }
            }
            Effect::Forget(user) => {
                if let Err(e) = ctx.with_persistence(|p| p.clear(Some(&user))) {
                    error!("Failed to clear stored session for {}: {e}", user.email);
                }
            }
        }
    }
    notifications
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{user, MockBackend};
    use crate::config::AppConfig;
    use crate::context::Page;
    use crate::models::{Role, User};
    use crate::notify::ToastLevel;
    use crate::persist::{picture_key, KeyValueStore, MemoryStorage, SESSION_KEY};
    use crate::session;

    const THRESHOLD: usize = 100;

    fn setup() -> (AppStore, AppContext, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let config = AppConfig {
            inline_image_threshold: THRESHOLD,
            ..AppConfig::default()
        };
        let ctx = AppContext::new(
            signal(Page::Login),
            config,
            Arc::new(MockBackend::new()),
            storage.clone(),
        );
        (Store::new(AppState::default()), ctx, storage)
    }

    fn john_with_big_picture() -> User {
        User {
            profile_pic: Some(format!("data:image/png;base64,{}", "A".repeat(THRESHOLD * 2))),
            ..user("John Doe", Role::Student, Some("Lisa Johnson"))
        }
    }

    fn signed_in(me: &User) -> Transition {
        Transition {
            state: SessionState {
                user: Some(me.clone()),
                ..SessionState::default()
            },
            effects: vec![
                Effect::Notify(Notification::success("Logged in successfully")),
                Effect::Persist,
            ],
        }
    }

    #[test]
    fn test_login_persists_with_side_stored_picture() {
        Owner::new().with(|| {
            let (store, ctx, storage) = setup();
            let me = john_with_big_picture();

            let shown = commit_transition(store, ctx, signed_in(&me));

            assert_eq!(shown.len(), 1);
            assert_eq!(shown[0].level, ToastLevel::Success);
            assert_eq!(store.session().user().get_untracked(), Some(me.clone()));
            let main = storage.get(SESSION_KEY).unwrap().unwrap();
            assert!(main.contains(&format!("__REF__{}__", picture_key(&me.email))));
            assert_eq!(
                storage.get(&picture_key(&me.email)).unwrap(),
                me.profile_pic.clone()
            );
        });
    }

    #[test]
    fn test_logout_removes_record_and_picture() {
        Owner::new().with(|| {
            let (store, ctx, storage) = setup();
            let me = john_with_big_picture();
            commit_transition(store, ctx, signed_in(&me));

            let state = store.session().get_untracked();
            commit_transition(store, ctx, session::logout(&state));

            assert_eq!(store.session().user().get_untracked(), None);
            assert!(ctx.with_persistence(|p| p.load()).is_none());
            assert!(storage.get(&picture_key(&me.email)).unwrap().is_none());
        });
    }

    #[test]
    fn test_restore_rehydrates_side_stored_picture() {
        Owner::new().with(|| {
            let (store, ctx, _storage) = setup();
            let me = john_with_big_picture();
            ctx.with_persistence(|p| p.save(Some(&me))).unwrap();

            restore_session(store, ctx);

            let restored = store.session().user().get_untracked().unwrap();
            assert_eq!(restored.profile_pic, me.profile_pic);
            assert_eq!(restored.email, me.email);
        });
    }

    #[test]
    fn test_result_after_sign_out_is_discarded() {
        Owner::new().with(|| {
            let (store, ctx, storage) = setup();
            let me = john_with_big_picture();
            commit_transition(store, ctx, signed_in(&me));
            let started = store
                .session()
                .get_untracked()
                .with_busy(Busy::UpdatingProfile, true);
            store.session().set(started.clone());

            // User signs out while the update is in flight
            let in_flight = store.session().get_untracked();
            commit_transition(store, ctx, session::logout(&in_flight));
            let late = Transition {
                state: SessionState {
                    user: Some(User {
                        fun_facts: "Updated".to_string(),
                        ..me.clone()
                    }),
                    ..SessionState::default()
                },
                effects: vec![
                    Effect::Notify(Notification::success("Profile updated successfully")),
                    Effect::Persist,
                ],
            };

            let shown = settle(store, ctx, &started, Busy::UpdatingProfile, late);

            assert!(shown.is_empty());
            let now = store.session().get_untracked();
            assert_eq!(now.user, None);
            assert!(!now.is_updating_profile);
            assert!(ctx.with_persistence(|p| p.load()).is_none());
            assert!(storage.get(&picture_key(&me.email)).unwrap().is_none());
        });
    }

    #[test]
    fn test_result_for_current_user_is_committed() {
        Owner::new().with(|| {
            let (store, ctx, _storage) = setup();
            let me = john_with_big_picture();
            commit_transition(store, ctx, signed_in(&me));
            let started = store
                .session()
                .get_untracked()
                .with_busy(Busy::UpdatingProfile, true);
            store.session().set(started.clone());

            let shown = settle(store, ctx, &started, Busy::UpdatingProfile, signed_in(&me));

            assert_eq!(shown.len(), 1);
            assert!(!store.session().is_updating_profile().get_untracked());
        });
    }

    #[test]
    fn test_signed_out_since() {
        let john = user("John Doe", Role::Student, None);
        let lisa = user("Lisa Johnson", Role::Mentor, None);
        let with = |u: &User| SessionState {
            user: Some(u.clone()),
            ..SessionState::default()
        };

        assert!(signed_out_since(&with(&john), &SessionState::default()));
        assert!(signed_out_since(&with(&john), &with(&lisa)));
        assert!(!signed_out_since(&with(&john), &with(&john)));
        assert!(!signed_out_since(&SessionState::default(), &with(&john)));
    }
}
