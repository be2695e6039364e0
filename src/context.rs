//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;

use crate::api::HttpApi;
use crate::config::AppConfig;
use crate::feed::FeedController;
use crate::models::LoginStatus;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    api: StoredValue<HttpApi>,
    config: StoredValue<AppConfig>,
    /// Viewer login state; `None` until `/login` answers
    pub login: ReadSignal<Option<LoginStatus>>,
    set_login: WriteSignal<Option<LoginStatus>>,
}

impl AppContext {
    pub fn new(config: AppConfig, login: (ReadSignal<Option<LoginStatus>>, WriteSignal<Option<LoginStatus>>)) -> Self {
        Self {
            api: StoredValue::new(HttpApi::new(config.api_base.clone())),
            config: StoredValue::new(config),
            login: login.0,
            set_login: login.1,
        }
    }

    pub fn api(&self) -> HttpApi {
        self.api.get_value()
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    pub fn set_login(&self, status: LoginStatus) {
        self.set_login.set(Some(status));
    }

    pub fn is_logged_in(&self) -> bool {
        self.login.with(|status| status.as_ref().is_some_and(|s| s.is_logged_in))
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

/// Page-local feed controller. Grids and like buttons below it share one liked set.
#[derive(Clone, Copy)]
pub struct FeedContext {
    controller: StoredValue<Rc<FeedController<HttpApi>>, LocalStorage>,
}

impl FeedContext {
    pub fn new(controller: FeedController<HttpApi>) -> Self {
        Self {
            controller: StoredValue::new_local(Rc::new(controller)),
        }
    }

    pub fn controller(&self) -> Rc<FeedController<HttpApi>> {
        self.controller.get_value()
    }
}

pub fn use_feed_context() -> FeedContext {
    expect_context::<FeedContext>()
}
