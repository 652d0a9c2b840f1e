//! Frontend Models
//!
//! Data structures matching the Supabase tables and auth payloads.

use serde::{Deserialize, Deserializer, Serialize};

/// Ownership status of a photocard. NONE is modelled as `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "prio")]
    Priority,
    #[serde(rename = "otw")]
    OnTheWay,
    #[serde(rename = "owned")]
    Owned,
}

/// Cyclic status order; `None` is the implicit "no status" state
pub const STATUS_ORDER: [Option<Status>; 4] = [
    None,
    Some(Status::Priority),
    Some(Status::OnTheWay),
    Some(Status::Owned),
];

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Priority => "prio",
            Status::OnTheWay => "otw",
            Status::Owned => "owned",
        }
    }

    /// Badge text shown on a card
    pub fn badge(&self) -> &'static str {
        match self {
            Status::Priority => "PRIO",
            Status::OnTheWay => "OTW",
            Status::Owned => "OWNED",
        }
    }

    /// Counts towards collection progress
    pub fn is_completed(&self) -> bool {
        matches!(self, Status::OnTheWay | Status::Owned)
    }

    /// Successor in the cyclic order. Total over all four states.
    pub fn next(current: Option<Status>) -> Option<Status> {
        let index = STATUS_ORDER
            .iter()
            .position(|s| *s == current)
            .unwrap_or(0);
        STATUS_ORDER[(index + 1) % STATUS_ORDER.len()]
    }
}

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Photocard catalog row (`photocards` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photocard {
    /// `bigint` primary key
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub member: String,
    pub era: Option<String>,
    #[serde(rename = "type")]
    pub pc_type: Option<String>,
    pub image_url: Option<String>,
    pub pc_name: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
}

impl Photocard {
    /// Alt text / placeholder label for the card image
    pub fn label(&self) -> &str {
        self.pc_name.as_deref().unwrap_or(&self.member)
    }
}

/// Projection of a `user_pcs` row used when loading the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRow {
    pub pc_id: i64,
    pub status: Status,
}

/// Full `user_pcs` row (insert body and update representation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPc {
    pub user_id: String,
    pub pc_id: i64,
    pub status: Status,
}

/// Authenticated user as returned by `/auth/v1/user`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub last_sign_in_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Auth session persisted in local storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Unix seconds
    pub expires_at: i64,
    #[serde(default)]
    pub user: Option<User>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Expired, or about to expire within `margin_secs`
    pub fn is_expired(&self, now_secs: i64, margin_secs: i64) -> bool {
        self.expires_at <= now_secs + margin_secs
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }
}
