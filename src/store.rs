//! Feed State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Each page
//! that shows an item grid provides its own store.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::feed::FeedUpdate;
use crate::grid::{GridRow, GridState};
use crate::models::{ItemId, LikedItemSet};

/// Grid rows plus a mirror of the controller's liked set
#[derive(Clone, Debug, Default, Store)]
pub struct FeedState {
    /// Rendered rows, replaced or appended page by page
    pub grid: GridState,
    /// Kept in sync with `FeedController::liked` so every card agrees
    pub liked: LikedItemSet,
}

/// Type alias for the store
pub type FeedStore = Store<FeedState>;

/// Get the feed store from context
pub fn use_feed_store() -> FeedStore {
    expect_context::<FeedStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Render a loaded page into the grid
pub fn store_apply_update(store: &FeedStore, update: &FeedUpdate) {
    store.grid().write().apply_page(&update.items, update.mode);
}

pub fn store_set_liked(store: &FeedStore, liked: LikedItemSet) {
    store.liked().set(liked);
}

/// Record a confirmed like or unlike
pub fn store_mark_liked(store: &FeedStore, id: &ItemId, liked: bool) {
    store.liked().update(|set| {
        if liked {
            set.insert(id.clone());
        } else {
            set.remove(id);
        }
    });
}

/// Tracked read of one id's membership
pub fn store_is_liked(store: &FeedStore, id: &ItemId) -> bool {
    store.liked().with(|set| set.contains(id))
}

pub fn store_rows(store: &FeedStore) -> Vec<GridRow> {
    store.grid().with(|grid| grid.rows.clone())
}

/// True once a page has loaded and produced no cards
pub fn store_shows_empty_notice(store: &FeedStore) -> bool {
    store.grid().with(GridState::shows_empty_notice)
}
