//! PC Tracker Frontend App
//!
//! Picks the page from the URL path: `/login` is the sign-in gate, anything
//! else is the collection board.

use leptos::prelude::*;

use crate::browser;
use crate::commands::SupabaseClient;
use crate::components::{BoardPage, LoginPage};
use crate::config::SupabaseConfig;
use crate::context::AppContext;

/// Path of the sign-in page
pub const LOGIN_PATH: &str = "/login";

/// Top-level pages
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Page {
    Login,
    Board,
}

impl Page {
    pub fn from_path(path: &str) -> Self {
        if path.trim_end_matches('/') == LOGIN_PATH {
            Page::Login
        } else {
            Page::Board
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = match SupabaseConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("[APP] {}", e);
            return view! {
                <main class="config-error">
                    <p>"PC Tracker is not configured: " {e.to_string()}</p>
                </main>
            }
            .into_any();
        }
    };

    provide_context(AppContext::new(SupabaseClient::new(config)));

    let page = Page::from_path(&browser::pathname());
    log::info!("[APP] Rendering {:?}", page);

    match page {
        Page::Login => view! { <LoginPage /> }.into_any(),
        Page::Board => view! { <BoardPage /> }.into_any(),
    }
}
