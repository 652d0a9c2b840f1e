//! Supabase Command Wrappers
//!
//! Frontend bindings to the Supabase auth and data endpoints, organized by
//! domain.

mod traits;
mod photocards;
pub mod auth;

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::SupabaseConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::Session;

// Re-export all public items
pub use traits::PhotocardBackend;

/// REST client for one Supabase project.
///
/// Requests use the anon key until `authorized` attaches a session token,
/// which row-level security needs to scope `user_pcs` to the signed-in user.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    config: Arc<SupabaseConfig>,
    access_token: Option<String>,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            config: Arc::new(config),
            access_token: None,
        }
    }

    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    /// Copy of this client that authenticates as the session's user
    pub fn authorized(&self, session: &Session) -> Self {
        Self {
            config: Arc::clone(&self.config),
            access_token: Some(session.access_token.clone()),
        }
    }

    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.config.anon_key);
        reqwest::Client::new()
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }
}

/// Fail with the decoded error body on non-2xx responses
async fn check(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_response(status.as_u16(), &body))
}

pub(crate) async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
    let response = check(request.send().await?).await?;
    Ok(response.json::<T>().await?)
}

pub(crate) async fn send_empty(request: RequestBuilder) -> ApiResult<()> {
    check(request.send().await?).await?;
    Ok(())
}
