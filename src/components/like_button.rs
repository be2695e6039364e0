//! Like Button Component
//!
//! Heart toggle with the item's like counter. State comes from the page's
//! feed store, mutations go through the feed controller.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_feed_context;
use crate::likes::{LikeButtonState, LikeState};
use crate::models::ItemId;
use crate::store::{store_is_liked, store_mark_liked, use_feed_store};

#[component]
pub fn LikeButton(id: ItemId, initial_count: u64) -> impl IntoView {
    let store = use_feed_store();
    let feed = use_feed_context();
    let button = RwSignal::new(LikeButtonState::new(initial_count));

    let liked_id = id.clone();
    let state = Memo::new(move |_| LikeState::from_membership(store_is_liked(&store, &liked_id)));

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        ev.prevent_default();
        let current = state.get_untracked();
        let mut next = button.get_untracked();
        let Some(action) = next.begin(current) else {
            log::debug!("[LikeButton] Item {} busy, ignoring click", id);
            return;
        };
        button.set(next);

        let id = id.clone();
        spawn_local(async move {
            let result = feed.controller().toggle_like(&id, action).await;
            let outcome = match result {
                Ok(outcome) => {
                    store_mark_liked(&store, &id, outcome.state.is_liked());
                    Some(outcome)
                }
                Err(e) => {
                    log::error!("[LikeButton] Failed to update like for item {}: {}", id, e);
                    None
                }
            };
            button.update(|b| b.finish(action, outcome));
        });
    };

    view! {
        <div class="like-control">
            <button
                type="button"
                class=move || if state.get().is_liked() { "btn like-btn liked" } else { "btn like-btn" }
                disabled=move || button.with(LikeButtonState::in_flight)
                on:click=on_click
            >
                {move || if state.get().is_liked() { "♥ Unlike" } else { "♡ Like" }}
            </button>
            <span class="like-counter">{move || button.with(|b| b.count)}</span>
        </div>
    }
}
