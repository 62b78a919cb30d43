//! Session State
//!
//! The signed-in user plus busy flags, and the operations that change them.
//! Each operation talks to the [`Backend`] and returns the next state along
//! with the side effects to run; nothing here touches the DOM or storage.

use log::{debug, error};
use reactive_stores::Store;
use serde_json::Value;

use crate::api::{Backend, LoginRequest, ProfileUpdate, SignupRequest};
use crate::image::{ensure_proper_format, ImageEcho};
use crate::models::{Role, User};
use crate::notify::Notification;
use crate::validation::{validate_login, validate_signup};

#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct SessionState {
    pub user: Option<User>,
    pub is_signing_up: bool,
    pub is_logging_in: bool,
    pub is_updating_profile: bool,
}

/// Which in-flight flag an operation holds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Busy {
    SigningUp,
    LoggingIn,
    UpdatingProfile,
}

impl SessionState {
    pub fn with_busy(&self, busy: Busy, on: bool) -> Self {
        let mut next = self.clone();
        match busy {
            Busy::SigningUp => next.is_signing_up = on,
            Busy::LoggingIn => next.is_logging_in = on,
            Busy::UpdatingProfile => next.is_updating_profile = on,
        }
        next
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Notify(Notification),
    /// Write the new state's user to storage
    Persist,
    /// Drop storage for a user that just signed out
    Forget(User),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SessionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn failed(state: SessionState, message: String) -> Self {
        Self {
            state,
            effects: vec![Effect::Notify(Notification::error(message))],
        }
    }

    fn succeeded(state: SessionState, message: &str) -> Self {
        Self {
            state,
            effects: vec![Effect::Notify(Notification::success(message)), Effect::Persist],
        }
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.effects.iter().filter_map(|e| match e {
            Effect::Notify(n) => Some(n),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

pub async fn signup(backend: &dyn Backend, state: &SessionState, form: SignupForm) -> Transition {
    let done = state.with_busy(Busy::SigningUp, false);
    let full_name = form.full_name.trim().to_string();
    let email = form.email.trim().to_string();

    // Nothing goes over the wire until the form is sane
    if let Err(e) = validate_signup(&full_name, &email, &form.password) {
        return Transition::failed(done, e.user_message(""));
    }

    let request = SignupRequest {
        account_type: form.role,
        full_name,
        email,
        password: form.password,
    };
    match backend.signup(&request).await {
        Ok(user) => Transition::succeeded(
            SessionState { user: Some(user), ..done },
            "Account created successfully",
        ),
        Err(e) => Transition::failed(done, e.user_message("Signup failed")),
    }
}

pub async fn login(backend: &dyn Backend, state: &SessionState, email: &str, password: &str) -> Transition {
    let done = state.with_busy(Busy::LoggingIn, false);
    let email = email.trim();

    if let Err(e) = validate_login(email, password) {
        return Transition::failed(done, e.user_message(""));
    }

    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    match backend.login(&request).await {
        Ok(user) => Transition::succeeded(
            SessionState { user: Some(user), ..done },
            "Logged in successfully",
        ),
        Err(e) => Transition::failed(done, e.user_message("Login failed")),
    }
}

/// Local only; the backend keeps no session to invalidate
pub fn logout(state: &SessionState) -> Transition {
    let mut effects = vec![Effect::Persist];
    if let Some(user) = state.user.clone() {
        effects.insert(0, Effect::Forget(user));
    }
    Transition {
        state: SessionState { user: None, ..state.clone() },
        effects,
    }
}

pub async fn update_profile(backend: &dyn Backend, state: &SessionState, update: ProfileUpdate) -> Transition {
    let done = state.with_busy(Busy::UpdatingProfile, false);
    let Some(current) = done.user.clone() else {
        return Transition::failed(done, "You must be logged in to update your profile".to_string());
    };

    debug!("Updating profile for {}: {:?}", current.email, update);
    match backend.update_profile(&current.email, &update).await {
        Ok(echo) => {
            let mut merged = merge_user(&current, &echo);
            merged.profile_pic = non_empty(update.profile_pic)
                .or_else(|| echo_picture(&echo))
                .or(current.profile_pic);
            Transition::succeeded(
                SessionState { user: Some(merged), ..done },
                "Profile updated successfully",
            )
        }
        Err(e) => {
            error!("Profile update error: {e}");
            Transition::failed(done, e.user_message("Failed to update profile"))
        }
    }
}

pub async fn update_profile_pic(
    backend: &dyn Backend,
    state: &SessionState,
    origin: &str,
    email: &str,
    profile_pic: &str,
) -> Transition {
    let done = state.with_busy(Busy::UpdatingProfile, false);
    let Some(current) = done.user.clone() else {
        return Transition::failed(done, "You must be logged in to update your picture".to_string());
    };

    debug!("Profile pic update: {} chars, data url: {}", profile_pic.len(), profile_pic.starts_with("data:"));
    match backend.update_profile_pic(email, profile_pic).await {
        Ok(echo) => {
            let picture = match echo {
                ImageEcho::Image(returned) => Some(ensure_proper_format(&returned, origin)),
                ImageEcho::Absent if !profile_pic.is_empty() => {
                    Some(ensure_proper_format(profile_pic, origin))
                }
                ImageEcho::Absent => current.profile_pic.clone(),
            };
            let user = User { profile_pic: picture, ..current };
            Transition::succeeded(
                SessionState { user: Some(user), ..done },
                "Changed profile picture successfully",
            )
        }
        Err(e) => {
            error!("Profile pic update error: {e}");
            Transition::failed(done, e.user_message("Failed to update profile picture"))
        }
    }
}

/// `{...prior, ...echo}` for object echoes; anything else leaves `prior` as is
fn merge_user(prior: &User, echo: &Value) -> User {
    let Value::Object(fields) = echo else {
        return prior.clone();
    };
    let mut base = match serde_json::to_value(prior) {
        Ok(Value::Object(map)) => map,
        _ => return prior.clone(),
    };
    for (key, value) in fields {
        base.insert(key.clone(), value.clone());
    }
    serde_json::from_value(Value::Object(base)).unwrap_or_else(|e| {
        error!("Ignoring unreadable profile echo: {e}");
        prior.clone()
    })
}

fn echo_picture(echo: &Value) -> Option<String> {
    non_empty(echo.get("profile_pic").and_then(Value::as_str).map(str::to_string))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{user, MockBackend};
    use crate::notify::ToastLevel;
    use serde_json::json;

    const ORIGIN: &str = "http://localhost:8000";

    fn signed_in(pic: Option<&str>) -> SessionState {
        let mut lisa = user("Lisa Johnson", Role::Mentor, None);
        lisa.profile_pic = pic.map(str::to_string);
        SessionState {
            user: Some(lisa),
            ..Default::default()
        }
    }

    fn first_message(t: &Transition) -> (ToastLevel, String) {
        let n = t.notifications().next().expect("a notification");
        (n.level, n.message.clone())
    }

    #[tokio::test]
    async fn test_signup_single_word_name_makes_no_request() {
        let backend = MockBackend::new();
        let state = SessionState::default().with_busy(Busy::SigningUp, true);
        let form = SignupForm {
            full_name: "Cher".to_string(),
            email: "cher@example.com".to_string(),
            password: "pw".to_string(),
            role: Role::Student,
        };

        let t = signup(&backend, &state, form).await;

        assert!(backend.calls().is_empty());
        assert!(t.state.user.is_none());
        assert!(!t.state.is_signing_up);
        assert_eq!(first_message(&t).0, ToastLevel::Error);
        assert!(!t.effects.contains(&Effect::Persist));
    }

    #[tokio::test]
    async fn test_signup_success_stores_user() {
        let backend = MockBackend::new();
        let form = SignupForm {
            full_name: " John Doe ".to_string(),
            email: "john@example.com".to_string(),
            password: "pw".to_string(),
            role: Role::Student,
        };

        let t = signup(&backend, &SessionState::default(), form).await;

        assert_eq!(backend.calls(), vec!["signup:john@example.com"]);
        assert_eq!(t.state.user.unwrap().full_name, "John Doe");
        assert!(t.effects.contains(&Effect::Persist));
    }

    #[tokio::test]
    async fn test_login_malformed_email_makes_no_request() {
        let backend = MockBackend::new();
        let t = login(&backend, &SessionState::default(), "not-an-email", "pw").await;

        assert!(backend.calls().is_empty());
        assert_eq!(first_message(&t), (ToastLevel::Error, "Invalid email format".to_string()));
    }

    #[tokio::test]
    async fn test_login_failure_keeps_state_and_surfaces_message() {
        let backend = MockBackend::new();
        let state = SessionState::default().with_busy(Busy::LoggingIn, true);

        let t = login(&backend, &state, "john@example.com", "wrong").await;

        assert_eq!(backend.calls(), vec!["login:john@example.com"]);
        assert!(t.state.user.is_none());
        assert!(!t.state.is_logging_in);
        assert_eq!(first_message(&t).1, "Invalid email or password");
    }

    #[tokio::test]
    async fn test_login_success_becomes_identity() {
        let backend = MockBackend::new();
        *backend.auth_user.lock().unwrap() = Some(user("John Doe", Role::Student, Some("Lisa Johnson")));

        let t = login(&backend, &SessionState::default(), "john.doe@example.com", "pw").await;

        let me = t.state.user.clone().unwrap();
        assert_eq!(me.mentor_name.as_deref(), Some("Lisa Johnson"));
        assert_eq!(first_message(&t), (ToastLevel::Success, "Logged in successfully".to_string()));
    }

    #[test]
    fn test_logout_forgets_user_without_backend() {
        let state = signed_in(None);
        let t = logout(&state);
        assert!(t.state.user.is_none());
        assert!(matches!(t.effects[0], Effect::Forget(ref u) if u.full_name == "Lisa Johnson"));
        assert_eq!(t.effects[1], Effect::Persist);
    }

    #[tokio::test]
    async fn test_update_profile_merges_echo_and_keeps_prior_picture() {
        let backend = MockBackend::new();
        *backend.profile_echo.lock().unwrap() = json!({
            "fullName": "Lisa J. Johnson",
            "email": "lisa.johnson@example.com",
            "accountType": "Mentor",
            "fun_facts": "Sails",
            "points": 30
        });
        let update = ProfileUpdate {
            fun_facts: Some("Sails".to_string()),
            ..Default::default()
        };

        let t = update_profile(&backend, &signed_in(Some("/images/old")), update).await;

        let me = t.state.user.unwrap();
        assert_eq!(me.full_name, "Lisa J. Johnson");
        assert_eq!(me.points, 30);
        assert_eq!(me.profile_pic.as_deref(), Some("/images/old"));
        assert_eq!(backend.calls(), vec!["update_profile:lisa.johnson@example.com"]);
    }

    #[tokio::test]
    async fn test_update_profile_picture_precedence() {
        let backend = MockBackend::new();
        *backend.profile_echo.lock().unwrap() = json!({ "profile_pic": "/images/echo" });

        // Echo beats prior
        let t = update_profile(&backend, &signed_in(Some("/images/old")), ProfileUpdate::default()).await;
        assert_eq!(t.state.user.unwrap().profile_pic.as_deref(), Some("/images/echo"));

        // Supplied beats echo
        let update = ProfileUpdate {
            profile_pic: Some("data:image/png;base64,AAAA".to_string()),
            ..Default::default()
        };
        let t = update_profile(&backend, &signed_in(Some("/images/old")), update).await;
        assert_eq!(
            t.state.user.unwrap().profile_pic.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
    }

    #[tokio::test]
    async fn test_update_profile_without_user_is_rejected_locally() {
        let backend = MockBackend::new();
        let t = update_profile(&backend, &SessionState::default(), ProfileUpdate::default()).await;
        assert!(backend.calls().is_empty());
        assert_eq!(first_message(&t).0, ToastLevel::Error);
    }

    #[tokio::test]
    async fn test_update_profile_failure_uses_fallback_message() {
        let backend = MockBackend::new();
        backend.fail("update_profile:lisa.johnson@example.com");
        let state = signed_in(None).with_busy(Busy::UpdatingProfile, true);

        let t = update_profile(&backend, &state, ProfileUpdate::default()).await;

        assert_eq!(t.state.user, signed_in(None).user);
        assert!(!t.state.is_updating_profile);
        assert_eq!(first_message(&t).1, "backend unavailable");
    }

    #[tokio::test]
    async fn test_profile_pic_uses_object_echo() {
        let backend = MockBackend::new();
        *backend.image_echo.lock().unwrap() = Some(ImageEcho::Image("/images/9".to_string()));

        let t = update_profile_pic(&backend, &signed_in(None), ORIGIN, "lisa.johnson@example.com", "data:image/png;base64,AAAA").await;

        assert_eq!(
            t.state.user.unwrap().profile_pic.as_deref(),
            Some("http://localhost:8000/images/9")
        );
    }

    #[tokio::test]
    async fn test_profile_pic_falls_back_to_sent_data() {
        let backend = MockBackend::new();
        let sent = "data:image/jpeg;base64,/9j/4AAQSkZJRg==";

        let t = update_profile_pic(&backend, &signed_in(Some("/images/old")), ORIGIN, "lisa.johnson@example.com", sent).await;

        assert_eq!(t.state.user.unwrap().profile_pic.as_deref(), Some(sent));
    }

    #[tokio::test]
    async fn test_profile_pic_failure_keeps_prior() {
        let backend = MockBackend::new();
        backend.fail("update_profile_pic:lisa.johnson@example.com");

        let t = update_profile_pic(&backend, &signed_in(Some("/images/old")), ORIGIN, "lisa.johnson@example.com", "data:image/png;base64,AAAA").await;

        assert_eq!(t.state.user.unwrap().profile_pic.as_deref(), Some("/images/old"));
        assert!(!t.effects.contains(&Effect::Persist));
    }
}
