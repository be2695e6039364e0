//! Profile Form Component
//!
//! Create or edit the viewer's profile. Edit mode is prefilled from the
//! current profile; all fields are required.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ProfileForm as ProfileFields, ProfileTarget};
use crate::context::use_app_context;
use crate::models::ProfileLookup;
use crate::routes::{self, PROFILE_PAGE};

#[component]
pub fn ProfileForm(edit: bool) -> impl IntoView {
    let ctx = use_app_context();
    let name = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let bio = RwSignal::new(String::new());
    let missing = RwSignal::new(Vec::<&'static str>::new());
    let saving = RwSignal::new(false);

    if edit {
        Effect::new(move |_| {
            let api = ctx.api();
            spawn_local(async move {
                match api.fetch_profile(&ProfileTarget::Viewer).await {
                    Ok(ProfileLookup::Found(data)) => {
                        name.set(data.profile.name);
                        username.set(data.profile.username);
                        bio.set(data.profile.bio);
                    }
                    Ok(ProfileLookup::NeedsProfile) => log::warn!("[ProfileForm] Editing before a profile exists"),
                    Err(e) => log::error!("[ProfileForm] Failed to load profile: {}", e),
                }
            });
        });
    }

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let fields = ProfileFields {
            name: name.get_untracked(),
            username: username.get_untracked(),
            bio: bio.get_untracked(),
        };
        let blank = fields.missing_fields();
        if !blank.is_empty() {
            missing.set(blank);
            return;
        }
        missing.set(Vec::new());
        saving.set(true);
        let api = ctx.api();
        spawn_local(async move {
            match api.save_profile(&fields, edit).await {
                Ok(()) => routes::navigate(&format!("/{}", PROFILE_PAGE)),
                Err(e) => {
                    log::error!("[ProfileForm] Failed to save profile: {}", e);
                    saving.set(false);
                }
            }
        });
    };

    let field_class = move |field: &'static str| {
        move || {
            if missing.with(|m| m.contains(&field)) {
                "form-control is-invalid"
            } else {
                "form-control"
            }
        }
    };

    view! {
        <form class="profile-form container" novalidate=true on:submit=on_submit>
            <h3>{if edit { "Edit Profile" } else { "Create Profile" }}</h3>
            <div class="form-group">
                <label for="name">"Name"</label>
                <input
                    id="name"
                    type="text"
                    class=field_class("name")
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="username">"Username"</label>
                <input
                    id="username"
                    type="text"
                    class=field_class("username")
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="bio">"Bio"</label>
                <textarea
                    id="bio"
                    class=field_class("bio")
                    prop:value=move || bio.get()
                    on:input=move |ev| bio.set(event_target_value(&ev))
                ></textarea>
            </div>
            <Show when=move || missing.with(|m| !m.is_empty())>
                <p class="text-danger">{move || format!("Please fill in: {}", missing.get().join(", "))}</p>
            </Show>
            <button type="submit" class="btn btn-primary" disabled=move || saving.get()>"Save"</button>
        </form>
    }
}
