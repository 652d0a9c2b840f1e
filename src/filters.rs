//! Filter Utilities
//!
//! Facet filtering and collection progress over the loaded catalog.

use std::collections::HashMap;

use crate::models::{Photocard, Status};

/// Value of the "All" option in the era/type selectors
pub const ALL: &str = "All";

/// Single-valued facet selector
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Facet {
    #[default]
    All,
    Only(String),
}

impl Facet {
    /// Parse a `<select>` value
    pub fn from_value(value: &str) -> Self {
        if value == ALL {
            Facet::All
        } else {
            Facet::Only(value.to_string())
        }
    }

    pub fn as_value(&self) -> &str {
        match self {
            Facet::All => ALL,
            Facet::Only(v) => v,
        }
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(wanted) => value == Some(wanted.as_str()),
        }
    }
}

/// Active filter selection. An empty member list means every member.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub members: Vec<String>,
    pub era: Facet,
    pub pc_type: Facet,
}

impl FilterState {
    /// Add or remove a member from the multi-select
    pub fn toggle_member(&mut self, member: &str) {
        if let Some(pos) = self.members.iter().position(|m| m == member) {
            self.members.remove(pos);
        } else {
            self.members.push(member.to_string());
        }
    }

    pub fn clear_members(&mut self) {
        self.members.clear();
    }

    pub fn is_member_selected(&self, member: &str) -> bool {
        self.members.iter().any(|m| m == member)
    }

    pub fn matches_member(&self, pc: &Photocard) -> bool {
        self.members.is_empty() || self.is_member_selected(&pc.member)
    }

    pub fn matches_era(&self, pc: &Photocard) -> bool {
        self.era.matches(pc.era.as_deref())
    }

    pub fn matches_type(&self, pc: &Photocard) -> bool {
        self.pc_type.matches(pc.pc_type.as_deref())
    }

    /// All three facets, conjunctively
    pub fn matches(&self, pc: &Photocard) -> bool {
        self.matches_member(pc) && self.matches_era(pc) && self.matches_type(pc)
    }
}

/// Cards passing the filters, in catalog order
pub fn visible(photocards: &[Photocard], filters: &FilterState) -> Vec<Photocard> {
    photocards
        .iter()
        .filter(|pc| filters.matches(pc))
        .cloned()
        .collect()
}

/// Rounded percentage of `visible` cards that are on the way or owned.
///
/// `None` when nothing is visible or nothing is completed; the progress bar
/// is hidden in both cases.
pub fn progress(visible: &[Photocard], statuses: &HashMap<i64, Status>) -> Option<u32> {
    let total = visible.len();
    if total == 0 {
        return None;
    }
    let completed = visible
        .iter()
        .filter(|pc| statuses.get(&pc.id).is_some_and(Status::is_completed))
        .count();
    if completed == 0 {
        return None;
    }
    Some((completed as f64 / total as f64 * 100.0).round() as u32)
}
