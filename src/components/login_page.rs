//! Login Page Component
//!
//! Sign-in gate: redirects to the board when a user is already signed in,
//! otherwise offers the single OAuth sign-in button.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser;
use crate::commands::auth;
use crate::config::OAUTH_PROVIDER;
use crate::context::use_app_context;
use crate::error::ApiResult;

/// Loading flag once the redirect call has returned.
///
/// Always cleared, so a page restored from the back/forward cache has a
/// working button.
fn loading_after_sign_in(started: ApiResult<()>) -> bool {
    if let Err(e) = started {
        log::warn!("[LOGIN] Sign-in did not start: {}", e);
    }
    false
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let (loading, set_loading) = signal(false);

    // Already signed in: go straight to the board
    let client = ctx.client.clone();
    Effect::new(move |_| {
        let client = client.clone();
        spawn_local(async move {
            if auth::get_current_user(&client).await.is_some() {
                if let Err(e) = browser::navigate("/") {
                    log::error!("[LOGIN] Cannot open board: {}", e);
                }
            }
        });
    });

    let client = ctx.client;
    let sign_in = move |_: web_sys::MouseEvent| {
        set_loading.set(true);
        let started = browser::origin()
            .and_then(|origin| auth::sign_in_with_oauth(client.config(), OAUTH_PROVIDER, &origin));
        set_loading.set(loading_after_sign_in(started));
    };

    view! {
        <main class="login-page">
            <div class="login-card">
                <h1>"Sign in to your PC Tracker"</h1>
                <button
                    class="login-btn"
                    on:click=sign_in
                    disabled=move || loading.get()
                >
                    "Continue with Google"
                </button>
            </div>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn test_button_reenabled_after_sign_in_returns() {
        assert!(!loading_after_sign_in(Ok(())));
        assert!(!loading_after_sign_in(Err(ApiError::Browser("no window".into()))));
    }
}
