//! Configuration
//!
//! Supabase project settings baked in at build time, plus the fixed
//! facet catalogues shown in the filter bar.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{0} is invalid: {1}")]
    Invalid(&'static str, String),
}

/// Members shown in the selector, in display order
pub const MEMBERS: &[&str] = &[
    "Leo",
    "Junseo",
    "Arno",
    "Geonwoo",
    "Sangwon",
    "Xinlong",
    "Anxin",
    "Sanghyeon",
    "Units",
];

/// Era options (value, label)
pub const ERAS: &[(&str, &str)] = &[
    ("Euphoria", "Euphoria"),
    ("b2p", "Boys 2 Planet"),
    ("Otro", "Otros"),
];

/// Type options (value, label)
pub const TYPES: &[(&str, &str)] = &[
    ("Album", "Album"),
    ("POB", "POB"),
    ("Merch", "Merch"),
    ("Other", "Other"),
];

/// OAuth provider used by the sign-in page
pub const OAUTH_PROVIDER: &str = "google";

#[derive(Debug, Clone, PartialEq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    /// Load from `SUPABASE_URL` / `SUPABASE_ANON_KEY` captured at compile time
    pub fn load() -> Result<Self, ConfigError> {
        let url = option_env!("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        let key = option_env!("SUPABASE_ANON_KEY").ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;
        Self::from_values(url, key)
    }

    pub fn from_values(url: &str, anon_key: &str) -> Result<Self, ConfigError> {
        let url = url.trim().trim_end_matches('/');
        let anon_key = anon_key.trim();

        if url.is_empty() {
            return Err(ConfigError::Missing("SUPABASE_URL"));
        }
        if anon_key.is_empty() {
            return Err(ConfigError::Missing("SUPABASE_ANON_KEY"));
        }
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::Invalid("SUPABASE_URL", format!("missing scheme in '{}'", url)));
        }

        Ok(Self {
            url: url.to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table)
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path)
    }

    /// Project ref: first host label, e.g. `abcd` for `https://abcd.supabase.co`
    pub fn project_ref(&self) -> &str {
        let host = self.url.split("://").nth(1).unwrap_or(&self.url);
        host.split(|c| c == '.' || c == ':' || c == '/').next().unwrap_or(host)
    }

    /// Local storage key used for the persisted session
    pub fn storage_key(&self) -> String {
        format!("sb-{}-auth-token", self.project_ref())
    }
}
