//! Entertainment Hub Frontend App
//!
//! Nav bar plus the view for the current page URL.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{Dashboard, ItemPage, NavBar, Profile, ProfileForm};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::models::LoginStatus;
use crate::routes::{Page, DASHBOARD_PAGE};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let login = signal::<Option<LoginStatus>>(None);
    let ctx = AppContext::new(config, login);

    // Provide context to all children
    provide_context(ctx);

    // Login state is fetched once per page load
    Effect::new(move |_| {
        let api = ctx.api();
        spawn_local(async move {
            match api.fetch_login_status().await {
                Ok(status) => {
                    log::debug!("[App] Logged in: {}", status.is_logged_in);
                    ctx.set_login(status);
                }
                Err(e) => {
                    log::error!("[App] Failed to fetch login status: {}", e);
                    ctx.set_login(LoginStatus::default());
                }
            }
        });
    });

    let page = Page::current();
    log::info!("[App] Rendering {:?}", page);

    view! {
        <NavBar />
        <main class="main-content">
            {match page {
                Page::Dashboard => view! { <Dashboard /> }.into_any(),
                Page::ItemPage(id) => view! { <ItemPage id=id /> }.into_any(),
                Page::Profile(target) => view! { <Profile target=target /> }.into_any(),
                Page::EditProfile => view! { <ProfileForm edit=true /> }.into_any(),
                Page::CreateProfile => view! { <ProfileForm edit=false /> }.into_any(),
                Page::NotFound => view! {
                    <div class="container">
                        <p>"Page not found"</p>
                        <a href=format!("/{}", DASHBOARD_PAGE)>"Back to the dashboard"</a>
                    </div>
                }.into_any(),
            }}
        </main>
    }
}
