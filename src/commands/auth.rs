//! Auth Commands
//!
//! GoTrue bindings: OAuth redirect sign-in, session restore/refresh, current
//! user lookup and sign-out. The session lives in `localStorage` under the
//! same key supabase-js uses, so both clients share a sign-in.

use std::collections::HashMap;

use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{send_empty, send_json, SupabaseClient};
use crate::browser;
use crate::config::SupabaseConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{Session, User};

/// Refresh this many seconds before the token actually expires
const EXPIRY_MARGIN_SECS: i64 = 10;

/// Fallback lifetime when the provider omits both expiry fields
const DEFAULT_EXPIRES_IN: i64 = 3600;

fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

// ========================
// OAuth Redirect
// ========================

/// Provider-brokered authorize URL with `return_target` as the post-login redirect
pub fn authorize_url(config: &SupabaseConfig, provider: &str, return_target: &str) -> String {
    format!(
        "{}?provider={}&redirect_to={}",
        config.auth_url("authorize"),
        utf8_percent_encode(provider, NON_ALPHANUMERIC),
        utf8_percent_encode(return_target, NON_ALPHANUMERIC)
    )
}

/// Start the redirect login flow. Only returns if navigation fails.
pub fn sign_in_with_oauth(config: &SupabaseConfig, provider: &str, return_target: &str) -> ApiResult<()> {
    log::info!("[AUTH] Redirecting to {} sign-in", provider);
    browser::navigate(&authorize_url(config, provider, return_target))
}

/// Outcome of reading the URL fragment after an OAuth redirect
#[derive(Debug, Clone, PartialEq)]
pub enum FragmentAuth {
    Absent,
    Session(Session),
    Failed(String),
}

fn decode_component(raw: &str) -> String {
    percent_decode_str(&raw.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}

/// Parse `access_token=..&refresh_token=..&expires_at=..` from a redirect fragment
pub fn parse_fragment(fragment: &str, now_secs: i64) -> FragmentAuth {
    let params: HashMap<String, String> = fragment
        .trim_start_matches('#')
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            Some((decode_component(key), decode_component(value)))
        })
        .collect();

    if let Some(reason) = params.get("error_description").or_else(|| params.get("error")) {
        return FragmentAuth::Failed(reason.clone());
    }

    let Some(access_token) = params.get("access_token") else {
        return FragmentAuth::Absent;
    };

    let expires_at = params
        .get("expires_at")
        .and_then(|v| v.parse::<i64>().ok())
        .or_else(|| {
            params
                .get("expires_in")
                .and_then(|v| v.parse::<i64>().ok())
                .map(|secs| now_secs + secs)
        })
        .unwrap_or(now_secs + DEFAULT_EXPIRES_IN);

    FragmentAuth::Session(Session {
        access_token: access_token.clone(),
        refresh_token: params.get("refresh_token").cloned().unwrap_or_default(),
        token_type: params
            .get("token_type")
            .cloned()
            .unwrap_or_else(|| "bearer".to_string()),
        expires_at,
        user: None,
    })
}

// ========================
// Token + User Endpoints
// ========================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    user: Option<User>,
}

impl TokenResponse {
    fn into_session(self, now_secs: i64) -> Session {
        let expires_at = self
            .expires_at
            .unwrap_or_else(|| now_secs + self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_type: self.token_type.unwrap_or_else(|| "bearer".to_string()),
            expires_at,
            user: self.user,
        }
    }
}

#[derive(Serialize)]
struct RefreshArgs<'a> {
    refresh_token: &'a str,
}

async fn refresh_session(client: &SupabaseClient, refresh_token: &str) -> ApiResult<Session> {
    let request = client
        .request(Method::POST, &client.config().auth_url("token"))
        .query(&[("grant_type", "refresh_token")])
        .json(&RefreshArgs { refresh_token });
    let token: TokenResponse = send_json(request).await?;
    Ok(token.into_session(now_secs()))
}

/// `client` must already carry the session token
async fn fetch_user(client: &SupabaseClient) -> ApiResult<User> {
    send_json(client.request(Method::GET, &client.config().auth_url("user"))).await
}

// ========================
// Session Storage
// ========================

fn load_stored(config: &SupabaseConfig) -> Option<Session> {
    let raw = match browser::storage_get(&config.storage_key()) {
        Ok(raw) => raw?,
        Err(e) => {
            log::warn!("[AUTH] Cannot read stored session: {}", e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("[AUTH] Discarding unreadable stored session: {}", e);
            clear_session(config);
            None
        }
    }
}

fn store_session(config: &SupabaseConfig, session: &Session) {
    let stored = serde_json::to_string(session)
        .map_err(ApiError::from)
        .and_then(|json| browser::storage_set(&config.storage_key(), &json));
    if let Err(e) = stored {
        log::warn!("[AUTH] Cannot persist session: {}", e);
    }
}

fn clear_session(config: &SupabaseConfig) {
    if let Err(e) = browser::storage_remove(&config.storage_key()) {
        log::warn!("[AUTH] Cannot clear stored session: {}", e);
    }
}

// ========================
// Commands
// ========================

/// Where a restored session's user record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserSource {
    /// Read back from local storage, not checked this time
    Stored,
    /// Returned by the auth server during this restore
    Server,
}

/// The session's user when the server already vouched for it
fn checked_user(session: &Session, source: UserSource) -> Option<User> {
    match source {
        UserSource::Server => session.user.clone(),
        UserSource::Stored => None,
    }
}

/// Current session, picking up a fresh OAuth redirect first and refreshing
/// an expired token. `None` when nobody is signed in.
pub async fn get_session(client: &SupabaseClient) -> Option<Session> {
    restore_session(client).await.map(|(session, _)| session)
}

async fn restore_session(client: &SupabaseClient) -> Option<(Session, UserSource)> {
    let config = client.config();
    let now = now_secs();

    let redirected = match parse_fragment(&browser::fragment(), now) {
        FragmentAuth::Absent => None,
        FragmentAuth::Session(session) => {
            log::info!("[AUTH] Picked up session from sign-in redirect");
            if let Err(e) = browser::clear_fragment() {
                log::warn!("[AUTH] Cannot clear redirect fragment: {}", e);
            }
            Some(session)
        }
        FragmentAuth::Failed(reason) => {
            log::warn!("[AUTH] Sign-in redirect reported an error: {}", reason);
            if let Err(e) = browser::clear_fragment() {
                log::warn!("[AUTH] Cannot clear redirect fragment: {}", e);
            }
            None
        }
    };

    let mut session = redirected.or_else(|| load_stored(config))?;
    let mut source = UserSource::Stored;

    if session.is_expired(now, EXPIRY_MARGIN_SECS) {
        log::info!("[AUTH] Session expired, refreshing");
        session = match refresh_session(client, &session.refresh_token).await {
            Ok(fresh) => {
                if fresh.user.is_some() {
                    source = UserSource::Server;
                }
                fresh
            }
            Err(e) => {
                log::warn!("[AUTH] Refresh failed: {}", e);
                clear_session(config);
                return None;
            }
        };
    }

    if session.user.is_none() {
        match fetch_user(&client.authorized(&session)).await {
            Ok(user) => {
                session.user = Some(user);
                source = UserSource::Server;
            }
            Err(ApiError::Unauthorized) => {
                clear_session(config);
                return None;
            }
            Err(e) => {
                log::error!("[AUTH] Cannot load user: {}", e);
                return None;
            }
        }
    }

    store_session(config, &session);
    Some((session, source))
}

/// Signed-in user, verified against the auth server.
///
/// A user the server returned while restoring the session is reused; a
/// stored one is checked again.
pub async fn get_current_user(client: &SupabaseClient) -> Option<User> {
    let (session, source) = restore_session(client).await?;
    if let Some(user) = checked_user(&session, source) {
        return Some(user);
    }
    match fetch_user(&client.authorized(&session)).await {
        Ok(user) => Some(user),
        Err(ApiError::Unauthorized) => {
            clear_session(client.config());
            None
        }
        Err(e) => {
            log::error!("[AUTH] Cannot load user: {}", e);
            None
        }
    }
}

/// Revoke the session (best effort) and forget it locally
pub async fn sign_out(client: &SupabaseClient, session: &Session) {
    let request = client
        .authorized(session)
        .request(Method::POST, &client.config().auth_url("logout"));
    if let Err(e) = send_empty(request).await {
        log::warn!("[AUTH] Logout request failed: {}", e);
    }
    clear_session(client.config());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SupabaseConfig {
        SupabaseConfig::from_values("https://abcd.supabase.co", "anon").unwrap()
    }

    #[test]
    fn test_checked_user_skips_second_lookup_only_when_server_provided() {
        let session = Session {
            access_token: "a".into(),
            refresh_token: "r".into(),
            token_type: "bearer".into(),
            expires_at: 0,
            user: Some(User {
                id: "u1".into(),
                email: None,
                last_sign_in_at: None,
            }),
        };
        assert_eq!(
            checked_user(&session, UserSource::Server).map(|u| u.id),
            Some("u1".to_string())
        );
        assert_eq!(checked_user(&session, UserSource::Stored), None);
    }

    #[test]
    fn test_authorize_url_encodes_return_target() {
        let url = authorize_url(&config(), "google", "https://pcs.example.com");
        assert_eq!(
            url,
            "https://abcd.supabase.co/auth/v1/authorize?provider=google&redirect_to=https%3A%2F%2Fpcs%2Eexample%2Ecom"
        );
    }

    #[test]
    fn test_parse_fragment_session() {
        let fragment = "#access_token=abc.def&expires_at=2000&expires_in=3600&refresh_token=r1&token_type=bearer&provider_token=x";
        match parse_fragment(fragment, 1000) {
            FragmentAuth::Session(session) => {
                assert_eq!(session.access_token, "abc.def");
                assert_eq!(session.refresh_token, "r1");
                assert_eq!(session.expires_at, 2000);
                assert!(session.user.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_fragment_expires_in_only() {
        match parse_fragment("access_token=a&refresh_token=r&expires_in=60", 1000) {
            FragmentAuth::Session(session) => assert_eq!(session.expires_at, 1060),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_fragment_error_and_absent() {
        assert_eq!(
            parse_fragment("error=access_denied&error_description=User+denied%20access", 0),
            FragmentAuth::Failed("User denied access".to_string())
        );
        assert_eq!(parse_fragment("", 0), FragmentAuth::Absent);
        assert_eq!(parse_fragment("section-2", 0), FragmentAuth::Absent);
    }

    #[test]
    fn test_token_response_into_session() {
        let json = r#"{"access_token":"a","refresh_token":"r","expires_in":3600,"token_type":"bearer","user":{"id":"u1","email":"leo@example.com"}}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        let session = token.into_session(100);
        assert_eq!(session.expires_at, 3700);
        assert_eq!(session.user_id(), Some("u1"));
    }
}
