//! Comment List Component
//!
//! Comments on an item page with avatar, author, text and local time.
//! Authors can delete their own comments.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::models::{avatar_url, Comment, CommentId};

use super::DeleteConfirmButton;

const AVATAR_SIZE: u32 = 40;

/// `timestamp_millis` in the viewer's locale
fn local_time(timestamp_millis: i64) -> String {
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(timestamp_millis as f64));
    String::from(date.to_locale_string("default", &wasm_bindgen::JsValue::UNDEFINED))
}

#[component]
pub fn CommentList(comments: RwSignal<Vec<Comment>>) -> impl IntoView {
    let ctx = use_app_context();

    let delete = move |id: CommentId| {
        let api = ctx.api();
        spawn_local(async move {
            match api.delete_comment(&id).await {
                Ok(()) => {
                    log::info!("[CommentList] Deleted comment {}", id.as_str());
                    comments.update(|list| list.retain(|c| c.comment_id.as_ref() != Some(&id)));
                }
                Err(e) => log::error!("[CommentList] Failed to delete comment {}: {}", id.as_str(), e),
            }
        });
    };

    view! {
        <ul class="list-group comment-list">
            <Show when=move || comments.with(Vec::is_empty)>
                <li class="list-group-item text-muted">"No comments yet"</li>
            </Show>
            {move || comments.get().into_iter().map(|comment| {
                let deletable = comment.comment_id.clone().filter(|_| comment.belongs_to_user);
                view! {
                    <li class="list-group-item comment">
                        <img class="avatar rounded-circle" src=avatar_url(&comment.email, AVATAR_SIZE) alt="" />
                        <strong class="comment-author">{comment.username.clone()}</strong>
                        <small class="comment-time text-muted">{local_time(comment.timestamp_millis)}</small>
                        <p class="comment-text">{comment.comment.clone()}</p>
                        {deletable.map(|id| view! {
                            <DeleteConfirmButton on_confirm=move || delete(id.clone()) />
                        })}
                    </li>
                }
            }).collect_view()}
        </ul>
    }
}
