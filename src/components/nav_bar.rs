//! Nav Bar Component
//!
//! Hub title plus Profile/Logout or Login links depending on login state.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::routes::{DASHBOARD_PAGE, PROFILE_PAGE};

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <nav class="navbar navbar-dark bg-dark">
            <a class="navbar-brand" href=DASHBOARD_PAGE>"Entertainment Hub"</a>
            <div class="navbar-nav flex-row">
                {move || ctx.login.get().map(|status| {
                    if status.is_logged_in {
                        view! {
                            <a class="nav-link text-light" href=format!("/{}", PROFILE_PAGE)>"Profile"</a>
                            <a class="nav-link text-light" href=status.logout_url>"Logout"</a>
                        }.into_any()
                    } else {
                        view! {
                            <a class="nav-link text-light" href=status.login_url>"Login"</a>
                        }.into_any()
                    }
                })}
            </div>
        </nav>
    }
}
