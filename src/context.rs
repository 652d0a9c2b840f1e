//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::commands::SupabaseClient;

/// App-wide handles provided via context
#[derive(Clone)]
pub struct AppContext {
    /// Anonymous client; pages attach the session token themselves
    pub client: SupabaseClient,
}

impl AppContext {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
