//! Ctrl-Alt-Elite Mentorship Frontend Entry Point

mod api;
mod app;
mod bucket;
mod components;
mod config;
mod context;
mod error;
mod fetch;
mod gallery;
mod groups;
mod image;
mod leaderboard;
mod models;
mod notify;
mod pages;
mod persist;
mod session;
mod store;
mod validation;

use std::sync::Arc;

use app::App;
use leptos::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::api::{Backend, RestBackend};
use crate::config::AppConfig;
use crate::persist::BrowserStorage;

/// Recent log lines, newest last; callable from the devtools console
#[wasm_bindgen]
pub fn recent_logs() -> String {
    console_logger::recent()
        .iter()
        .map(console_logger::LogEntry::format)
        .collect::<Vec<_>>()
        .join("\n")
}

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_logger::init(log::LevelFilter::Debug) {
        web_sys::console::warn_1(&format!("Logger already set: {e}").into());
    }

    let config = AppConfig::load();
    let backend: Arc<dyn Backend> = match RestBackend::new(config.clone()) {
        Ok(backend) => Arc::new(backend),
        Err(e) => {
            log::error!("Could not create HTTP client: {e}");
            return;
        }
    };
    log::info!("Starting frontend against {}", config.api_base_url);

    mount_to_body(move || {
        view! { <App config=config.clone() backend=backend.clone() storage=Arc::new(BrowserStorage) /> }
    });
}
