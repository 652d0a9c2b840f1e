//! Board Controller
//!
//! Side-effecting half of the collection board: initial load and
//! reconciling status changes with the backend.

use std::collections::HashMap;

use crate::commands::PhotocardBackend;
use crate::error::{ApiError, ApiResult};
use crate::models::{Session, Status};
use crate::store::{BoardState, StatusChange};

/// What a persisted status change did remotely
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Updated,
    Inserted,
    Deleted,
}

/// Fetch catalog and statuses for the session's user.
///
/// Read failures are logged and leave the corresponding part empty. Without
/// a session the board is returned empty.
pub async fn load_board<B>(backend: &B, session: Option<&Session>) -> BoardState
where
    B: PhotocardBackend + ?Sized,
{
    let mut state = BoardState::new();

    let Some(user_id) = session.and_then(Session::user_id) else {
        log::info!("[BOARD] No session, showing empty board");
        state.loading = false;
        return state;
    };
    state.user_id = Some(user_id.to_string());

    match backend.read_catalog().await {
        Ok(photocards) => {
            log::info!("[BOARD] Loaded {} photocards", photocards.len());
            state.photocards = photocards;
        }
        Err(e) => log::error!("[BOARD] Failed to load photocards: {}", e),
    }

    match backend.read_statuses(user_id).await {
        Ok(rows) => {
            state.statuses = rows
                .into_iter()
                .map(|row| (row.pc_id, row.status))
                .collect::<HashMap<i64, Status>>();
        }
        Err(e) => log::error!("[BOARD] Failed to load statuses: {}", e),
    }

    state.loading = false;
    state
}

/// Write `change` for `user_id`.
///
/// A move back to no status deletes the row. Otherwise the row is updated
/// and, when the update touched nothing, inserted once. An insert that hits
/// an existing row (a concurrent write got there first) retries the update.
pub async fn persist_change<B>(backend: &B, user_id: &str, change: StatusChange) -> ApiResult<WriteOutcome>
where
    B: PhotocardBackend + ?Sized,
{
    let pc_id = change.pc_id;
    let Some(status) = change.next else {
        backend.delete_status(user_id, pc_id).await?;
        return Ok(WriteOutcome::Deleted);
    };

    match backend.update_status(user_id, pc_id, status).await {
        Ok(rows) if !rows.is_empty() => return Ok(WriteOutcome::Updated),
        Ok(_) => {}
        Err(e) => log::error!("[BOARD] Update failed for card {}: {}", pc_id, e),
    }

    match backend.insert_status(user_id, pc_id, status).await {
        Ok(()) => Ok(WriteOutcome::Inserted),
        Err(ApiError::Conflict(detail)) => {
            log::warn!("[BOARD] Card {} already annotated, updating instead", pc_id);
            let rows = backend.update_status(user_id, pc_id, status).await?;
            if rows.is_empty() {
                Err(ApiError::Conflict(detail))
            } else {
                Ok(WriteOutcome::Updated)
            }
        }
        Err(e) => Err(e),
    }
}

/// Log a write result and return the notice to show, if any
fn write_notice(pc_id: i64, result: &ApiResult<WriteOutcome>) -> Option<String> {
    match result {
        Ok(outcome) => {
            log::debug!("[BOARD] Card {} persisted: {:?}", pc_id, outcome);
            None
        }
        Err(e) => {
            log::error!("[BOARD] Failed to save card {}: {}", pc_id, e);
            Some(format!("Couldn't save change: {}", e))
        }
    }
}

/// Persist a change already applied by [`begin_cycle`](crate::store::begin_cycle).
///
/// Returns the notice to show when the write failed. The optimistic status
/// stays as it is either way.
pub async fn finish_cycle<B>(backend: &B, user_id: &str, change: StatusChange) -> Option<String>
where
    B: PhotocardBackend + ?Sized,
{
    let result = persist_change(backend, user_id, change).await;
    write_notice(change.pc_id, &result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Photocard, StatusRow, User, UserPc};
    use crate::store::begin_cycle;
    use async_trait::async_trait;
    use std::cell::RefCell;

    const USER: &str = "u1";

    /// In-memory `user_pcs` table with call counters and injectable failures
    #[derive(Default)]
    struct MemoryBackend {
        catalog: Vec<Photocard>,
        rows: RefCell<HashMap<(String, i64), Status>>,
        updates: RefCell<u32>,
        inserts: RefCell<u32>,
        deletes: RefCell<u32>,
        fail_catalog: bool,
        fail_statuses: bool,
        fail_writes: bool,
        /// Pretend another tab inserted the row between update and insert
        race_insert: bool,
    }

    impl MemoryBackend {
        fn with_catalog(n: i64) -> Self {
            let catalog = (1..=n)
                .map(|id| Photocard {
                    id,
                    member: "Leo".into(),
                    era: None,
                    pc_type: None,
                    image_url: None,
                    pc_name: None,
                    order: Some(id),
                })
                .collect();
            Self {
                catalog,
                ..Default::default()
            }
        }

        fn stored(&self, pc_id: i64) -> Option<Status> {
            self.rows.borrow().get(&(USER.to_string(), pc_id)).copied()
        }

        fn failure() -> ApiError {
            ApiError::Http("connection reset".into())
        }
    }

    #[async_trait(?Send)]
    impl PhotocardBackend for MemoryBackend {
        async fn read_catalog(&self) -> ApiResult<Vec<Photocard>> {
            if self.fail_catalog {
                return Err(Self::failure());
            }
            Ok(self.catalog.clone())
        }

        async fn read_statuses(&self, user_id: &str) -> ApiResult<Vec<StatusRow>> {
            if self.fail_statuses {
                return Err(Self::failure());
            }
            Ok(self
                .rows
                .borrow()
                .iter()
                .filter(|((user, _), _)| user == user_id)
                .map(|((_, pc_id), status)| StatusRow { pc_id: *pc_id, status: *status })
                .collect())
        }

        async fn update_status(&self, user_id: &str, pc_id: i64, status: Status) -> ApiResult<Vec<UserPc>> {
            *self.updates.borrow_mut() += 1;
            if self.fail_writes {
                return Err(Self::failure());
            }
            let mut rows = self.rows.borrow_mut();
            match rows.get_mut(&(user_id.to_string(), pc_id)) {
                Some(existing) => {
                    *existing = status;
                    Ok(vec![UserPc { user_id: user_id.to_string(), pc_id, status }])
                }
                None => Ok(Vec::new()),
            }
        }

        async fn insert_status(&self, user_id: &str, pc_id: i64, status: Status) -> ApiResult<()> {
            *self.inserts.borrow_mut() += 1;
            if self.fail_writes {
                return Err(Self::failure());
            }
            let key = (user_id.to_string(), pc_id);
            let mut rows = self.rows.borrow_mut();
            if self.race_insert {
                rows.insert(key, Status::Priority);
                return Err(ApiError::Conflict("duplicate key".into()));
            }
            if rows.contains_key(&key) {
                return Err(ApiError::Conflict("duplicate key".into()));
            }
            rows.insert(key, status);
            Ok(())
        }

        async fn delete_status(&self, user_id: &str, pc_id: i64) -> ApiResult<()> {
            *self.deletes.borrow_mut() += 1;
            if self.fail_writes {
                return Err(Self::failure());
            }
            self.rows.borrow_mut().remove(&(user_id.to_string(), pc_id));
            Ok(())
        }
    }

    fn session() -> Session {
        Session {
            access_token: "jwt".into(),
            refresh_token: "r".into(),
            token_type: "bearer".into(),
            expires_at: i64::MAX,
            user: Some(User {
                id: USER.into(),
                email: None,
                last_sign_in_at: None,
            }),
        }
    }

    /// Same two steps the board runs on a card click
    async fn click(backend: &MemoryBackend, state: &mut BoardState, pc_id: i64) -> bool {
        let Some(change) = begin_cycle(state.user_id.as_deref(), &mut state.statuses, pc_id) else {
            return false;
        };
        let user_id = state.user_id.clone().unwrap();
        state.sync_error = finish_cycle(backend, &user_id, change).await;
        true
    }

    fn status_of(state: &BoardState, pc_id: i64) -> Option<Status> {
        state.statuses.get(&pc_id).copied()
    }

    #[tokio::test]
    async fn test_load_board_merges_statuses() {
        let backend = MemoryBackend::with_catalog(3);
        backend.rows.borrow_mut().insert((USER.into(), 2), Status::OnTheWay);
        backend.rows.borrow_mut().insert(("someone-else".into(), 3), Status::Owned);

        let state = load_board(&backend, Some(&session())).await;
        assert!(!state.loading);
        assert_eq!(state.user_id.as_deref(), Some(USER));
        assert_eq!(state.photocards.len(), 3);
        assert_eq!(state.statuses.len(), 1);
        assert_eq!(status_of(&state, 2), Some(Status::OnTheWay));
    }

    #[tokio::test]
    async fn test_load_board_without_session() {
        let backend = MemoryBackend::with_catalog(3);
        let mut state = load_board(&backend, None).await;
        assert!(!state.loading);
        assert!(state.photocards.is_empty());

        assert!(!click(&backend, &mut state, 1).await);
        assert!(state.statuses.is_empty());
        assert_eq!(*backend.updates.borrow(), 0);
        assert_eq!(*backend.inserts.borrow(), 0);
    }

    #[tokio::test]
    async fn test_load_board_read_failures_degrade() {
        let mut backend = MemoryBackend::with_catalog(2);
        backend.rows.borrow_mut().insert((USER.into(), 1), Status::Owned);
        backend.fail_statuses = true;
        let state = load_board(&backend, Some(&session())).await;
        assert_eq!(state.photocards.len(), 2);
        assert!(state.statuses.is_empty());
        assert!(!state.loading);

        backend.fail_statuses = false;
        backend.fail_catalog = true;
        let state = load_board(&backend, Some(&session())).await;
        assert!(state.photocards.is_empty());
        assert_eq!(status_of(&state, 1), Some(Status::Owned));
    }

    #[tokio::test]
    async fn test_first_cycle_inserts_exactly_once() {
        let backend = MemoryBackend::with_catalog(1);
        let mut state = load_board(&backend, Some(&session())).await;

        assert!(click(&backend, &mut state, 1).await);
        assert!(state.sync_error.is_none());
        assert_eq!(*backend.updates.borrow(), 1);
        assert_eq!(*backend.inserts.borrow(), 1);
        assert_eq!(backend.stored(1), Some(Status::Priority));
        assert_eq!(status_of(&state, 1), Some(Status::Priority));
    }

    #[tokio::test]
    async fn test_full_cycle_matches_remote() {
        let backend = MemoryBackend::with_catalog(1);
        let mut state = load_board(&backend, Some(&session())).await;

        for _ in 0..4 {
            assert!(click(&backend, &mut state, 1).await);
            assert!(state.sync_error.is_none());
            assert_eq!(status_of(&state, 1), backend.stored(1));
        }
        assert!(state.statuses.is_empty());
        assert_eq!(*backend.updates.borrow(), 3);
        assert_eq!(*backend.inserts.borrow(), 1);
        assert_eq!(*backend.deletes.borrow(), 1);
    }

    #[tokio::test]
    async fn test_write_failure_keeps_optimistic_state() {
        let mut backend = MemoryBackend::with_catalog(1);
        backend.rows.borrow_mut().insert((USER.into(), 1), Status::Owned);
        let mut state = load_board(&backend, Some(&session())).await;
        backend.fail_writes = true;

        assert!(click(&backend, &mut state, 1).await);
        assert_eq!(status_of(&state, 1), None);
        assert!(state.sync_error.is_some());
        assert_eq!(backend.stored(1), Some(Status::Owned));

        backend.fail_writes = false;
        assert!(click(&backend, &mut state, 1).await);
        assert_eq!(backend.stored(1), Some(Status::Priority));
        assert_eq!(status_of(&state, 1), Some(Status::Priority));
        assert!(state.sync_error.is_none());
    }

    #[tokio::test]
    async fn test_failed_update_still_tries_insert_once() {
        let mut backend = MemoryBackend::with_catalog(1);
        backend.fail_writes = true;
        let change = StatusChange { pc_id: 1, next: Some(Status::Priority) };

        let result = persist_change(&backend, USER, change).await;
        assert!(result.is_err());
        assert_eq!(*backend.updates.borrow(), 1);
        assert_eq!(*backend.inserts.borrow(), 1);
    }

    #[tokio::test]
    async fn test_insert_conflict_retries_update() {
        let mut backend = MemoryBackend::with_catalog(1);
        backend.race_insert = true;
        let change = StatusChange { pc_id: 1, next: Some(Status::OnTheWay) };

        let result = persist_change(&backend, USER, change).await;
        assert_eq!(result, Ok(WriteOutcome::Updated));
        assert_eq!(*backend.inserts.borrow(), 1);
        assert_eq!(*backend.updates.borrow(), 2);
        assert_eq!(backend.stored(1), Some(Status::OnTheWay));
    }

    #[tokio::test]
    async fn test_delete_failure_still_clears_locally() {
        let mut backend = MemoryBackend::with_catalog(1);
        backend.rows.borrow_mut().insert((USER.into(), 1), Status::Owned);
        let mut state = load_board(&backend, Some(&session())).await;
        backend.fail_writes = true;

        assert!(click(&backend, &mut state, 1).await);
        assert!(state.sync_error.is_some());
        assert_eq!(*backend.deletes.borrow(), 1);
        assert_eq!(*backend.updates.borrow(), 0);
        assert!(state.statuses.is_empty());
    }
}
