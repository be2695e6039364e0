//! Item Page Component
//!
//! Detail card for one item, its comments, and the comment form.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::models::{Comment, ItemId, ItemRecord};
use crate::routes;

use super::CommentList;

#[derive(Debug, Clone, PartialEq)]
enum PageLoad {
    Loading,
    Ready(ItemRecord),
    Missing,
}

#[component]
pub fn ItemPage(id: Option<ItemId>) -> impl IntoView {
    let ctx = use_app_context();
    let page = RwSignal::new(PageLoad::Loading);
    let comments = RwSignal::new(Vec::<Comment>::new());

    // Load details on mount
    let item_id = StoredValue::new(id);
    Effect::new(move |_| {
        let Some(id) = item_id.get_value() else {
            page.set(PageLoad::Missing);
            return;
        };
        let api = ctx.api();
        spawn_local(async move {
            match api.fetch_item_page(&id).await {
                Ok(data) => {
                    log::info!("[ItemPage] Loaded item {} with {} comments", id, data.comments.len());
                    comments.set(data.comments);
                    page.set(PageLoad::Ready(data.item));
                }
                Err(e) => {
                    log::error!("[ItemPage] Failed to load item {}: {}", id, e);
                    page.set(PageLoad::Missing);
                }
            }
        });
    });

    view! {
        <div class="item-page container">
            {move || match page.get() {
                PageLoad::Loading => view! { <p class="text-muted">"Loading..."</p> }.into_any(),
                PageLoad::Missing => view! { <p>"Item not found"</p> }.into_any(),
                PageLoad::Ready(item) => view! {
                    <ItemDetails item=item />
                    <h4>"Comments"</h4>
                    <CommentList comments=comments />
                    <CommentForm item_id=item_id />
                }.into_any(),
            }}
        </div>
    }
}

#[component]
fn ItemDetails(item: ItemRecord) -> impl IntoView {
    let heading = match &item.release_date {
        Some(date) => format!("{} ({})", item.title, date),
        None => item.title.clone(),
    };
    let facts = [
        ("Runtime", item.runtime),
        ("Genre", item.genre),
        ("Directors", item.directors),
        ("Writers", item.writers),
        ("Cast", item.actors),
    ];

    view! {
        <div class="card item-details">
            <img class="card-img-top" src=item.image_url alt=item.title.clone() />
            <div class="card-body">
                <h3 class="card-title">{heading}</h3>
                {facts.into_iter().filter_map(|(label, value)| value.map(|value| view! {
                    <p class="card-text"><strong>{label} ": "</strong>{value}</p>
                })).collect_view()}
                <p class="card-text">{item.description}</p>
            </div>
        </div>
    }
}

#[component]
fn CommentForm(item_id: StoredValue<Option<ItemId>>) -> impl IntoView {
    let ctx = use_app_context();
    let text = RwSignal::new(String::new());
    let posting = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let comment = text.get_untracked().trim().to_string();
        let Some(id) = item_id.get_value() else {
            return;
        };
        if comment.is_empty() || posting.get_untracked() {
            return;
        }
        posting.set(true);
        let api = ctx.api();
        spawn_local(async move {
            match api.post_comment(&id, &comment).await {
                Ok(()) => routes::reload(),
                Err(e) => {
                    log::error!("[ItemPage] Failed to post comment on item {}: {}", id, e);
                    posting.set(false);
                }
            }
        });
    };

    view! {
        {move || match ctx.login.get() {
            Some(status) if status.is_logged_in => view! {
                <form class="comment-form" on:submit=on_submit>
                    <textarea
                        class="form-control"
                        placeholder="Add a comment..."
                        prop:value=move || text.get()
                        on:input=move |ev| text.set(event_target_value(&ev))
                    ></textarea>
                    <button type="submit" class="btn btn-primary" disabled=move || posting.get()>"Post"</button>
                </form>
            }.into_any(),
            Some(status) => view! {
                <a class="btn btn-secondary" href=status.login_url>"Login to Comment"</a>
            }.into_any(),
            None => ().into_any(),
        }}
    }
}
