//! Board State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The state itself
//! is a plain struct; every transition here is synchronous and pure.

use std::collections::HashMap;

use reactive_stores::Store;

use crate::filters::FilterState;
use crate::models::{Photocard, Status};

/// A planned status transition for one card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub pc_id: i64,
    /// `None` removes the annotation
    pub next: Option<Status>,
}

/// Collection board view state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct BoardState {
    /// Signed-in user (None = unauthenticated board)
    pub user_id: Option<String>,
    /// Full catalog in display order
    pub photocards: Vec<Photocard>,
    /// Card id -> status; cards without a status are absent
    pub statuses: HashMap<i64, Status>,
    /// Active facet selection
    pub filters: FilterState,
    /// Initial load still in flight
    pub loading: bool,
    /// Last failed write, shown briefly
    pub sync_error: Option<String>,
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }
}

/// Next step for `pc_id`, or `None` when no user is signed in
fn plan_cycle(user_id: Option<&str>, statuses: &HashMap<i64, Status>, pc_id: i64) -> Option<StatusChange> {
    user_id?;
    let current = statuses.get(&pc_id).copied();
    Some(StatusChange {
        pc_id,
        next: Status::next(current),
    })
}

/// Optimistic local update; not reverted if the remote write fails
fn apply_change(statuses: &mut HashMap<i64, Status>, change: &StatusChange) {
    match change.next {
        Some(status) => {
            statuses.insert(change.pc_id, status);
        }
        None => {
            statuses.remove(&change.pc_id);
        }
    }
}

/// Advance `pc_id` one step locally and return the change to persist.
///
/// Does nothing and returns `None` when no user is signed in.
pub fn begin_cycle(user_id: Option<&str>, statuses: &mut HashMap<i64, Status>, pc_id: i64) -> Option<StatusChange> {
    let change = plan_cycle(user_id, statuses, pc_id)?;
    apply_change(statuses, &change);
    Some(change)
}

/// Type alias for the store
pub type BoardStore = Store<BoardState>;
