//! Application Context
//!
//! Shared services and navigation provided via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;

use crate::api::Backend;
use crate::config::AppConfig;
use crate::persist::{KeyValueStore, SessionPersistence};

/// Which page is on screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    Login,
    Signup,
    Profile,
    Groups,
    BucketLists,
    /// One mentor's list, by mentor name
    BucketListDetail(String),
    Leaderboard,
}

impl Page {
    /// Reachable without signing in
    pub fn is_public(&self) -> bool {
        matches!(self, Page::Login | Page::Signup)
    }
}

/// App-wide services and navigation provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current page - read
    pub page: ReadSignal<Page>,
    /// Current page - write
    set_page: WriteSignal<Page>,
    config: StoredValue<AppConfig>,
    backend: StoredValue<Arc<dyn Backend>>,
    storage: StoredValue<Arc<dyn KeyValueStore>>,
}

impl AppContext {
    pub fn new(
        page: (ReadSignal<Page>, WriteSignal<Page>),
        config: AppConfig,
        backend: Arc<dyn Backend>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            page: page.0,
            set_page: page.1,
            config: StoredValue::new(config),
            backend: StoredValue::new(backend),
            storage: StoredValue::new(storage),
        }
    }

    pub fn navigate(&self, page: Page) {
        log::debug!("Navigating to {page:?}");
        self.set_page.set(page);
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    pub fn backend(&self) -> Arc<dyn Backend> {
        self.backend.get_value()
    }

    /// Run `f` with the session persistence layer
    pub fn with_persistence<R>(&self, f: impl FnOnce(&SessionPersistence<'_>) -> R) -> R {
        let threshold = self.config.with_value(|c| c.inline_image_threshold);
        self.storage
            .with_value(|store| f(&SessionPersistence::new(store.as_ref(), threshold)))
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
