//! Data Backend - Core Trait
//!
//! Abstract interface to the photocard catalog and per-user statuses.
//! `SupabaseClient` talks to PostgREST; tests use an in-memory double.

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::models::{Photocard, Status, StatusRow, UserPc};

/// Remote store for the catalog and `user_pcs` annotations.
///
/// Futures are not `Send`: the browser fetch backend is single-threaded.
#[async_trait(?Send)]
pub trait PhotocardBackend {
    /// Full catalog ordered by `order` ascending
    async fn read_catalog(&self) -> ApiResult<Vec<Photocard>>;

    /// All annotations belonging to `user_id`
    async fn read_statuses(&self, user_id: &str) -> ApiResult<Vec<StatusRow>>;

    /// Update an existing annotation, returning the affected rows (zero or one)
    async fn update_status(&self, user_id: &str, pc_id: i64, status: Status) -> ApiResult<Vec<UserPc>>;

    /// Insert a new annotation
    async fn insert_status(&self, user_id: &str, pc_id: i64, status: Status) -> ApiResult<()>;

    /// Remove the annotation for (user, item)
    async fn delete_status(&self, user_id: &str, pc_id: i64) -> ApiResult<()>;
}
