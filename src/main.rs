#![allow(warnings)]
//! Entertainment Hub Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod error;
mod feed;
mod grid;
mod likes;
mod logging;
mod models;
mod query;
mod routes;
mod scroll;
mod session;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
    let config = AppConfig::load();
    logging::init(config.log_level_filter());
    log::info!("[Main] Starting, api base {:?}", config.api_base);
    mount_to_body(move || view! { <App config=config /> });
}
