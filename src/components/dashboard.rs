//! Dashboard Component
//!
//! Search box, sort selector and the infinitely scrolling item grid.
//! Search and sort survive reloads through session storage.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::context::{use_app_context, FeedContext};
use crate::feed::{FeedController, LoadOutcome};
use crate::models::{PageCursor, QueryState, SortType};
use crate::query::MAX_SEARCH_VALUE_CHARS;
use crate::scroll::ScrollTrigger;
use crate::session;
use crate::store::{store_apply_update, store_set_liked, FeedState, FeedStore};

use super::{ItemGrid, ItemSubmission};

type TriggerHandle = StoredValue<ScrollTrigger, LocalStorage>;

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_app_context();
    let debounce_ms = ctx.config().search_debounce_ms;

    let store: FeedStore = Store::new(FeedState::default());
    provide_context(store);
    let feed = FeedContext::new(FeedController::new(ctx.api()));
    provide_context(feed);
    let trigger: TriggerHandle = StoredValue::new_local(ScrollTrigger::new());

    let initial = session::restore_query_state();
    let search_value = RwSignal::new(initial.search_value.clone());
    let sort_type = RwSignal::new(initial.sort_type);
    let debounce = StoredValue::new(0u64);

    let reload = move |query: QueryState, refresh_liked: bool| {
        trigger.with_value(ScrollTrigger::disarm);
        spawn_local(async move {
            let controller = feed.controller();
            let outcome = controller.load(query, refresh_liked).await;
            if refresh_liked {
                store_set_liked(&store, controller.liked());
            }
            if let LoadOutcome::Loaded(update) = outcome {
                store_apply_update(&store, &update);
                arm_scroll(feed, store, trigger, update.next_cursor);
            }
        });
    };

    // Initial load with the viewer's liked set
    Effect::new(move |_| {
        let query = untrack(|| QueryState::new(search_value.get(), sort_type.get()));
        log::info!("[Dashboard] Initial load, sort {}", query.sort_type.as_str());
        reload(query, true);
    });

    let on_search = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        session::persist_search(&value);
        search_value.set(value.clone());

        let generation = debounce.get_value() + 1;
        debounce.set_value(generation);
        spawn_local(async move {
            TimeoutFuture::new(debounce_ms).await;
            if debounce.try_get_value() != Some(generation) {
                return;
            }
            reload(QueryState::new(value, sort_type.get_untracked()), false);
        });
    };

    let on_sort = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        let Some(sort) = SortType::from_wire(&value) else {
            log::warn!("[Dashboard] Unknown sort type {}", value);
            return;
        };
        session::persist_sort(sort);
        sort_type.set(sort);
        reload(QueryState::new(search_value.get_untracked(), sort), false);
    };

    view! {
        <div class="dashboard">
            <div class="dashboard-controls form-inline">
                <input
                    type="search"
                    class="form-control"
                    placeholder="Search titles..."
                    maxlength=MAX_SEARCH_VALUE_CHARS.to_string()
                    prop:value=move || search_value.get()
                    on:input=on_search
                />
                <select class="form-control" on:change=on_sort>
                    {SortType::ALL.into_iter().map(|sort| view! {
                        <option value=sort.as_str() selected=move || sort_type.get() == sort>
                            {sort.label()}
                        </option>
                    }).collect_view()}
                </select>
            </div>
            <ItemSubmission />
            <ItemGrid empty_text="No items found" />
        </div>
    }
}

/// Arm infinite scroll for `next`, or disarm for good on the last page
fn arm_scroll(feed: FeedContext, store: FeedStore, trigger: TriggerHandle, next: Option<PageCursor>) {
    let armed = trigger.try_with_value(|t| match next {
        Some(cursor) => t.arm(cursor, move |cursor| load_next_page(feed, store, trigger, cursor)),
        None => {
            log::debug!("[Dashboard] Last page reached");
            t.disarm();
        }
    });
    if armed.is_none() {
        log::debug!("[Dashboard] Scroll trigger disposed");
    }
}

fn load_next_page(feed: FeedContext, store: FeedStore, trigger: TriggerHandle, cursor: PageCursor) {
    spawn_local(async move {
        match feed.controller().load_more(cursor.clone()).await {
            LoadOutcome::Loaded(update) => {
                store_apply_update(&store, &update);
                arm_scroll(feed, store, trigger, update.next_cursor);
            }
            LoadOutcome::Failed => arm_scroll(feed, store, trigger, Some(cursor)),
            LoadOutcome::Stale => {}
        }
    });
}
