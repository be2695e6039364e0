//! Item Submission Component
//!
//! Looks a title up on OMDb, checks the catalog for a duplicate and
//! submits new items. The page reloads after a successful submission.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::models::{DuplicateCheck, OmdbItem};
use crate::routes;

#[derive(Debug, Clone, PartialEq)]
enum Lookup {
    Idle,
    Searching,
    NotFound,
    Found { item: OmdbItem, duplicate: Duplicate },
}

#[derive(Debug, Clone, PartialEq)]
enum Duplicate {
    Checking,
    Unique,
    /// Already in the catalog, with a link when the item id is known
    Exists(Option<String>),
    /// Check failed, submission stays disabled
    Unknown,
}

#[component]
pub fn ItemSubmission() -> impl IntoView {
    let ctx = use_app_context();
    let config = ctx.config();
    let enabled = config.omdb_enabled();
    let omdb = StoredValue::new((config.omdb_api_base, config.omdb_api_key));

    let title = RwSignal::new(String::new());
    let lookup = RwSignal::new(Lookup::Idle);
    let submitting = RwSignal::new(false);
    let generation = StoredValue::new(0u64);

    let on_lookup = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let query = title.get_untracked().trim().to_string();
        if query.is_empty() {
            return;
        }
        let current = generation.get_value() + 1;
        generation.set_value(current);
        lookup.set(Lookup::Searching);

        let api = ctx.api();
        let (base, key) = omdb.get_value();
        spawn_local(async move {
            let is_current = move || generation.try_get_value() == Some(current);
            let item = match api.lookup_omdb(&base, &key, &query).await {
                Ok(item) if item.is_found() => item,
                Ok(item) => {
                    log::info!("[ItemSubmission] No OMDb match for {}: {:?}", query, item.error);
                    if is_current() {
                        lookup.set(Lookup::NotFound);
                    }
                    return;
                }
                Err(e) => {
                    log::error!("[ItemSubmission] OMDb lookup failed: {}", e);
                    if is_current() {
                        lookup.set(Lookup::NotFound);
                    }
                    return;
                }
            };
            if !is_current() {
                return;
            }
            let imdb_id = item.imdb_id.clone();
            lookup.set(Lookup::Found { item, duplicate: Duplicate::Checking });

            let duplicate = match api.check_duplicate(&imdb_id).await {
                Ok(DuplicateCheck::Unique) => Duplicate::Unique,
                Ok(check) => Duplicate::Exists(check.existing_link()),
                Err(e) => {
                    log::error!("[ItemSubmission] Duplicate check failed for {}: {}", imdb_id, e);
                    Duplicate::Unknown
                }
            };
            if is_current() {
                lookup.update(|state| {
                    if let Lookup::Found { duplicate: slot, .. } = state {
                        *slot = duplicate;
                    }
                });
            }
        });
    };

    let on_submit = move |_: web_sys::MouseEvent| {
        if submitting.get_untracked() {
            return;
        }
        let Lookup::Found { item, duplicate: Duplicate::Unique } = lookup.get_untracked() else {
            return;
        };
        submitting.set(true);
        let api = ctx.api();
        spawn_local(async move {
            match api.submit_item(&item).await {
                Ok(()) => {
                    log::info!("[ItemSubmission] Submitted {}", item.imdb_id);
                    routes::reload();
                }
                Err(e) => {
                    log::error!("[ItemSubmission] Submission failed for {}: {}", item.imdb_id, e);
                    submitting.set(false);
                }
            }
        });
    };

    view! {
        <Show when=move || enabled>
            <div class="item-submission">
                <form class="form-inline" on:submit=on_lookup>
                    <input
                        type="text"
                        class="form-control"
                        placeholder="Find a title to add..."
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                    <button type="submit" class="btn btn-secondary">"Search"</button>
                </form>
                {move || match lookup.get() {
                    Lookup::Idle => ().into_any(),
                    Lookup::Searching => view! { <p class="text-muted">"Searching..."</p> }.into_any(),
                    Lookup::NotFound => view! { <p>"Item not found!"</p> }.into_any(),
                    Lookup::Found { item, duplicate } => view! {
                        <div class="card omdb-card">
                            <img class="card-img-top" src=item.poster.clone() alt=item.title.clone() />
                            <div class="card-body">
                                <h5 class="card-title">{item.title.clone()}</h5>
                                <p class="card-text">{item.released.clone()}</p>
                                {match duplicate {
                                    Duplicate::Checking => view! { <p class="text-muted">"Checking catalog..."</p> }.into_any(),
                                    Duplicate::Unique => view! {
                                        <button
                                            type="button"
                                            class="btn btn-primary"
                                            disabled=move || submitting.get()
                                            on:click=on_submit
                                        >
                                            "Submit"
                                        </button>
                                    }.into_any(),
                                    Duplicate::Exists(Some(link)) => view! {
                                        <p>"Item already exists " <a href=link>"View item"</a></p>
                                    }.into_any(),
                                    Duplicate::Exists(None) => view! { <p>"Item already exists"</p> }.into_any(),
                                    Duplicate::Unknown => view! { <p class="text-muted">"Could not check the catalog"</p> }.into_any(),
                                }}
                            </div>
                        </div>
                    }.into_any(),
                }}
            </div>
        </Show>
    }
}
