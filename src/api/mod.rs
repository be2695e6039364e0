//! Backend API Bindings
//!
//! Thin async wrappers over the Entertainment Hub endpoints, organized by domain.

mod favorite;
mod feed;
mod item_page;
mod login;
mod profile;
mod submission;

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};
use crate::models::{FeedPage, ItemId, LikedItemSet};
use crate::query::{build_url, FeedRequest};

pub use profile::{ProfileForm, ProfileTarget};

/// Catalog operations the feed controller depends on
#[async_trait(?Send)]
pub trait CatalogApi {
    async fn fetch_feed(&self, request: &FeedRequest) -> ApiResult<FeedPage>;
    async fn fetch_liked_items(&self) -> ApiResult<LikedItemSet>;
    async fn like_item(&self, id: &ItemId) -> ApiResult<()>;
    async fn unlike_item(&self, id: &ItemId) -> ApiResult<()>;
    async fn fetch_like_count(&self, id: &ItemId) -> ApiResult<u64>;
}

/// HTTP client for the backend at `base` ("" for same origin)
#[derive(Debug, Clone, PartialEq)]
pub struct HttpApi {
    base: String,
}

impl HttpApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn url<K: AsRef<str>, V: AsRef<str>>(&self, path: &str, params: &[(K, V)]) -> String {
        build_url(&self.base, path, params)
    }

    fn path(&self, path: &str) -> String {
        let none: [(&str, &str); 0] = [];
        self.url(path, &none)
    }
}

#[async_trait(?Send)]
impl CatalogApi for HttpApi {
    async fn fetch_feed(&self, request: &FeedRequest) -> ApiResult<FeedPage> {
        self.fetch_dashboard_page(request).await
    }

    async fn fetch_liked_items(&self) -> ApiResult<LikedItemSet> {
        self.fetch_favorite_ids(None).await
    }

    async fn like_item(&self, id: &ItemId) -> ApiResult<()> {
        self.add_favorite(id).await
    }

    async fn unlike_item(&self, id: &ItemId) -> ApiResult<()> {
        self.remove_favorite(id).await
    }

    async fn fetch_like_count(&self, id: &ItemId) -> ApiResult<u64> {
        self.fetch_favorite_count(id).await
    }
}

// ========================
// Request Helpers
// ========================

/// Send and require a 2xx status
async fn send(endpoint: &str, request: RequestBuilder) -> ApiResult<Response> {
    expect_ok(endpoint, request.send().await)
}

fn expect_ok(endpoint: &str, result: Result<Response, gloo_net::Error>) -> ApiResult<Response> {
    let response = result.map_err(|e| ApiError::transport(endpoint, e))?;
    if !response.ok() {
        return Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: response.status(),
        });
    }
    Ok(response)
}

async fn read_json<T: DeserializeOwned>(endpoint: &str, response: Response) -> ApiResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::malformed(endpoint, e))
}

async fn get_json<T: DeserializeOwned>(endpoint: &str, url: &str) -> ApiResult<T> {
    let response = send(endpoint, Request::get(url)).await?;
    read_json(endpoint, response).await
}

/// POST an `application/x-www-form-urlencoded` body
async fn post_form(endpoint: &str, url: &str, body: String) -> ApiResult<Response> {
    let request = Request::post(url)
        .header("Content-Type", "application/x-www-form-urlencoded;charset=UTF-8")
        .body(body)
        .map_err(|e| ApiError::transport(endpoint, e))?;
    expect_ok(endpoint, request.send().await)
}
