//! Session Persistence
//!
//! Keeps the dashboard search text and sort choice in `sessionStorage`
//! so they survive a reload within the same tab.

use gloo_storage::{SessionStorage, Storage};

use crate::models::{QueryState, SortType};

const SEARCH_KEY: &str = "searchVal";
const SORT_KEY: &str = "sortVal";

/// Build the initial query from stored values; unknown sorts fall back to the default
pub fn query_from_stored(search: Option<String>, sort: Option<String>) -> QueryState {
    let sort_type = sort
        .as_deref()
        .and_then(SortType::from_wire)
        .unwrap_or_default();
    QueryState::new(search.unwrap_or_default(), sort_type)
}

pub fn restore_query_state() -> QueryState {
    let search = SessionStorage::get::<String>(SEARCH_KEY).ok();
    let sort = SessionStorage::get::<String>(SORT_KEY).ok();
    query_from_stored(search, sort)
}

pub fn persist_search(value: &str) {
    if let Err(e) = SessionStorage::set(SEARCH_KEY, value) {
        log::warn!("[Session] Failed to store search value: {}", e);
    }
}

pub fn persist_sort(sort: SortType) {
    if let Err(e) = SessionStorage::set(SORT_KEY, sort.as_str()) {
        log::warn!("[Session] Failed to store sort type: {}", e);
    }
}
