//! Page Routing
//!
//! Maps the hub's page URLs onto views. Every page is a full document
//! load, so the route is read once from `window.location`.

use crate::api::ProfileTarget;
use crate::models::ItemId;
use crate::query::url_param;

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Dashboard,
    /// `None` when the `itemId` parameter is missing or empty
    ItemPage(Option<ItemId>),
    Profile(ProfileTarget),
    EditProfile,
    CreateProfile,
    NotFound,
}

pub const DASHBOARD_PAGE: &str = "index.html";
pub const PROFILE_PAGE: &str = "ProfilePage.html";
pub const EDIT_PROFILE_PAGE: &str = "EditProfilePage.html";
pub const CREATE_PROFILE_PAGE: &str = "CreateProfilePage.html";

impl Page {
    pub fn from_location(pathname: &str, search: &str) -> Self {
        let file = pathname.rsplit('/').next().unwrap_or_default();
        match file {
            "" | DASHBOARD_PAGE => Page::Dashboard,
            "item-page.html" => {
                let id = url_param(search, "itemId").and_then(ItemId::new);
                if id.is_none() {
                    log::warn!("[Routes] Item page opened without an itemId");
                }
                Page::ItemPage(id)
            }
            PROFILE_PAGE => {
                let target = if let Some(email) = url_param(search, "email").filter(|v| !v.is_empty()) {
                    ProfileTarget::Email(email)
                } else if let Some(username) = url_param(search, "username").filter(|v| !v.is_empty()) {
                    ProfileTarget::Username(username)
                } else {
                    ProfileTarget::Viewer
                };
                Page::Profile(target)
            }
            EDIT_PROFILE_PAGE => Page::EditProfile,
            CREATE_PROFILE_PAGE => Page::CreateProfile,
            _ => Page::NotFound,
        }
    }

    /// Route for the current document
    pub fn current() -> Self {
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            return Page::Dashboard;
        };
        let pathname = location.pathname().unwrap_or_default();
        let search = location.search().unwrap_or_default();
        Self::from_location(&pathname, &search)
    }
}

/// Link to another user's profile
pub fn profile_link(email: &str) -> String {
    crate::query::build_url("", PROFILE_PAGE, &[("email", email)])
}

/// Full navigation to `href`
pub fn navigate(href: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(href) {
            log::error!("[Routes] Navigation to {} failed: {:?}", href, e);
        }
    }
}

pub fn reload() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().reload() {
            log::error!("[Routes] Reload failed: {:?}", e);
        }
    }
}
