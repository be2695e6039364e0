//! Profile Component
//!
//! A user's profile with recommendations and their liked items.
//! A logged-in viewer without a profile is sent to the create form.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api::ProfileTarget;
use crate::context::{use_app_context, FeedContext};
use crate::feed::{FeedController, FeedUpdate};
use crate::grid::RenderMode;
use crate::models::{avatar_url, ProfileLookup, UserData};
use crate::routes::{self, profile_link, CREATE_PROFILE_PAGE, EDIT_PROFILE_PAGE};
use crate::store::{store_apply_update, store_set_liked, FeedState, FeedStore};

use super::ItemGrid;

const AVATAR_SIZE: u32 = 128;

#[component]
pub fn Profile(target: ProfileTarget) -> impl IntoView {
    let ctx = use_app_context();
    let store: FeedStore = Store::new(FeedState::default());
    provide_context(store);
    let feed = FeedContext::new(FeedController::new(ctx.api()));
    provide_context(feed);

    let user = RwSignal::new(None::<UserData>);
    let is_viewer = target == ProfileTarget::Viewer;
    let target = StoredValue::new(target);

    Effect::new(move |_| {
        let target = target.get_value();
        let api = ctx.api();
        spawn_local(async move {
            let data = match api.fetch_profile(&target).await {
                Ok(ProfileLookup::NeedsProfile) => {
                    log::info!("[Profile] No profile yet, redirecting to create");
                    routes::navigate(&format!("/{}", CREATE_PROFILE_PAGE));
                    return;
                }
                Ok(ProfileLookup::Found(data)) => data,
                Err(e) => {
                    log::error!("[Profile] Failed to load profile {:?}: {}", target, e);
                    return;
                }
            };

            let email = match &target {
                ProfileTarget::Email(email) if data.profile.email.is_empty() => email.clone(),
                _ => data.profile.email.clone(),
            };
            user.set(Some(data));

            let controller = feed.controller();
            controller.refresh_liked().await;
            store_set_liked(&store, controller.liked());

            let owner_likes = if is_viewer {
                Ok(controller.liked())
            } else {
                api.fetch_favorite_ids(Some(&email)).await
            };
            match owner_likes {
                Ok(ids) => {
                    let items = api.fetch_items(ids.iter()).await;
                    log::info!("[Profile] Loaded {} liked items", items.len());
                    let update = FeedUpdate {
                        mode: RenderMode::Replace,
                        items,
                        next_cursor: None,
                    };
                    store_apply_update(&store, &update);
                }
                Err(e) => log::error!("[Profile] Failed to load liked items for {}: {}", email, e),
            }
        });
    });

    view! {
        <div class="profile container">
            {move || user.get().map(|data| {
                let profile = data.profile;
                view! {
                    <div class="card profile-card">
                        <img class="avatar rounded-circle" src=avatar_url(&profile.email, AVATAR_SIZE) alt="" />
                        <div class="card-body">
                            <h3 class="card-title">{profile.name}</h3>
                            <p class="text-muted">"@" {profile.username}</p>
                            <p class="card-text">{profile.bio}</p>
                            <Show when=move || is_viewer>
                                <a class="btn btn-secondary" href=format!("/{}", EDIT_PROFILE_PAGE)>"Edit Profile"</a>
                            </Show>
                        </div>
                    </div>
                    <Show when={
                        let empty = data.recommended_users.is_empty();
                        move || !empty
                    }>
                        <h4>"Recommended Users"</h4>
                    </Show>
                    <ul class="list-group recommended-users">
                        {data.recommended_users.into_iter().map(|email| view! {
                            <li class="list-group-item">
                                <a href=profile_link(&email)>{email.clone()}</a>
                            </li>
                        }).collect_view()}
                    </ul>
                }
            })}
            <h4>"Liked Items"</h4>
            <ItemGrid empty_text="No liked items yet" />
        </div>
    }
}
